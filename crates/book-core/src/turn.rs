//! Page-turn state machine.
//!
//! `position` counts turned leaves: `0` is the book closed on its front
//! cover, `spread_count` is the book closed on its back cover. Turns are
//! serialized: while one is pending every navigation request is rejected,
//! and the position only moves when the turn completes.

/// Which way the leaves travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnDirection {
    Forward,
    Backward,
}

/// Emitted when a turn begins, before the position changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnStarted {
    pub from: usize,
    pub target: usize,
    pub direction: TurnDirection,
}

impl TurnStarted {
    /// Number of leaves that change side during this turn.
    pub fn leaves(&self) -> usize {
        self.from.abs_diff(self.target)
    }
}

#[derive(Clone, Debug, Default)]
pub struct PageFlipper {
    position: usize,
    spread_count: usize,
    pending: Option<TurnStarted>,
}

impl PageFlipper {
    pub fn new(spread_count: usize) -> Self {
        Self {
            position: 0,
            spread_count,
            pending: None,
        }
    }

    /// Back to the closed front cover with no turn in flight.
    pub fn reset(&mut self, spread_count: usize) {
        self.position = 0;
        self.spread_count = spread_count;
        self.pending = None;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn spread_count(&self) -> usize {
        self.spread_count
    }

    pub fn is_turning(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<TurnStarted> {
        self.pending
    }

    pub fn is_closed_front(&self) -> bool {
        self.position == 0
    }

    pub fn is_closed_back(&self) -> bool {
        self.position == self.spread_count
    }

    /// Start a turn toward `target`, clamped to the valid range.
    pub fn go_to(&mut self, target: isize) -> Option<TurnStarted> {
        if let Some(pending) = self.pending {
            log::debug!(
                "[turn] rejected target {target}, turn {} -> {} in flight",
                pending.from,
                pending.target
            );
            return None;
        }
        let clamped = target.clamp(0, self.spread_count as isize) as usize;
        if clamped == self.position {
            return None;
        }
        let direction = if clamped > self.position {
            TurnDirection::Forward
        } else {
            TurnDirection::Backward
        };
        let turn = TurnStarted {
            from: self.position,
            target: clamped,
            direction,
        };
        self.pending = Some(turn);
        log::debug!("[turn] {} -> {} ({:?})", turn.from, turn.target, direction);
        Some(turn)
    }

    pub fn next(&mut self) -> Option<TurnStarted> {
        if self.position >= self.spread_count {
            return None;
        }
        self.go_to(self.position as isize + 1)
    }

    pub fn previous(&mut self) -> Option<TurnStarted> {
        if self.position == 0 {
            return None;
        }
        self.go_to(self.position as isize - 1)
    }

    /// Finish the pending turn and return the new position.
    pub fn complete(&mut self) -> Option<usize> {
        let turn = self.pending.take()?;
        self.position = turn.target;
        Some(self.position)
    }

    /// Drop the pending turn without moving.
    pub fn cancel(&mut self) -> Option<TurnStarted> {
        self.pending.take()
    }
}
