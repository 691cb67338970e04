//! Scene driver: turns (spreads, position, turn progress) into leaf poses.
//!
//! Every leaf has two resting poses, untouched on the right of the spine and
//! turned onto the left. A moving leaf blends between them with a smoothstep
//! easing, so a pose at progress 0 and 1 is bit-identical to the matching
//! resting pose and completing a turn never pops.

use crate::constants::*;
use crate::spreads::Spread;
use crate::turn::{TurnDirection, TurnStarted};

/// Transient animation state sampled once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnAnimation {
    pub direction: Option<TurnDirection>,
    pub progress: f32,
    pub leaves: usize,
}

impl TurnAnimation {
    pub const IDLE: TurnAnimation = TurnAnimation {
        direction: None,
        progress: 0.0,
        leaves: 0,
    };

    pub fn idle() -> Self {
        Self::IDLE
    }

    pub fn is_idle(&self) -> bool {
        self.direction.is_none()
    }

    pub fn is_finished(&self) -> bool {
        self.direction.is_some() && self.progress >= 1.0
    }
}

/// Orientation and deformation of one leaf.
///
/// - `rotation`: angle about the spine, `0` flat on the right, `-PI` flat on the left
/// - `curl`: bend accumulated across the leaf width, in radians
/// - `stack`: offset toward the viewer so stacked leaves do not z-fight
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafPose {
    pub index: usize,
    pub rotation: f32,
    pub curl: f32,
    pub stack: f32,
}

impl LeafPose {
    pub fn resting(index: usize, leaf_count: usize, turned: bool) -> Self {
        if turned {
            Self {
                index,
                rotation: TURNED_ROTATION,
                curl: REST_CURL,
                stack: (index + 1) as f32 * PAGE_THICKNESS,
            }
        } else {
            Self {
                index,
                rotation: 0.0,
                curl: -REST_CURL,
                stack: leaf_count.saturating_sub(index) as f32 * PAGE_THICKNESS,
            }
        }
    }

    fn blend(from: &LeafPose, to: &LeafPose, t: f32) -> Self {
        Self {
            index: from.index,
            rotation: mix(from.rotation, to.rotation, t),
            curl: mix(from.curl, to.curl, t),
            stack: mix(from.stack, to.stack, t),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneDescription {
    pub leaves: Vec<LeafPose>,
}

// Exact at both ends: mix(a, b, 0) == a and mix(a, b, 1) == b.
#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

#[inline]
pub fn ease_turn(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Progress of the `order`-th moving leaf when `leaves` move together.
pub fn staggered_progress(progress: f32, order: usize, leaves: usize) -> f32 {
    let progress = progress.clamp(0.0, 1.0);
    if leaves <= 1 {
        return progress;
    }
    let gaps = (leaves - 1) as f32;
    let stagger = JUMP_STAGGER.min(0.5 / gaps);
    let span = 1.0 - stagger * gaps;
    ((progress - stagger * order as f32) / span).clamp(0.0, 1.0)
}

/// Pose every leaf for the given position and turn state.
pub fn describe_scene(
    spreads: &[Spread],
    position: usize,
    animation: &TurnAnimation,
) -> SceneDescription {
    let count = spreads.len();
    let position = position.min(count);
    let leaves = (0..count)
        .map(|index| {
            let turned = index < position;
            let rest = LeafPose::resting(index, count, turned);
            let Some(order) = moving_order(index, position, count, animation) else {
                return rest;
            };
            let target = LeafPose::resting(index, count, !turned);
            let t = ease_turn(staggered_progress(animation.progress, order, animation.leaves));
            LeafPose::blend(&rest, &target, t)
        })
        .collect();
    SceneDescription { leaves }
}

// Position in the turn sequence of a leaf that moves, None if it stays.
fn moving_order(
    index: usize,
    position: usize,
    count: usize,
    animation: &TurnAnimation,
) -> Option<usize> {
    match animation.direction? {
        TurnDirection::Forward => {
            let end = (position + animation.leaves).min(count);
            (index >= position && index < end).then(|| index - position)
        }
        TurnDirection::Backward => {
            let start = position.saturating_sub(animation.leaves);
            (index >= start && index < position).then(|| position - 1 - index)
        }
    }
}

/// Duration of a turn moving `leaves` leaves at once.
pub fn turn_duration_ms(base_ms: f64, extra_per_leaf_ms: f64, max_ms: f64, leaves: usize) -> f64 {
    let extra = leaves.saturating_sub(1) as f64 * extra_per_leaf_ms;
    (base_ms + extra).min(max_ms.max(base_ms))
}

#[derive(Clone, Copy, Debug)]
struct ActiveTurn {
    turn: TurnStarted,
    duration_ms: f64,
    started_at: Option<f64>,
}

/// Derives [`TurnAnimation`] from frame-clock timestamps.
///
/// The start time is stamped by the first sampled frame, so the first frame
/// of a turn always renders at progress 0.
#[derive(Clone, Debug, Default)]
pub struct TurnAnimator {
    active: Option<ActiveTurn>,
}

impl TurnAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, turn: TurnStarted, duration_ms: f64) {
        self.active = Some(ActiveTurn {
            turn,
            duration_ms,
            started_at: None,
        });
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn sample(&mut self, now_ms: f64) -> TurnAnimation {
        let Some(active) = self.active.as_mut() else {
            return TurnAnimation::IDLE;
        };
        let started = *active.started_at.get_or_insert(now_ms);
        let progress = if active.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - started) / active.duration_ms).clamp(0.0, 1.0) as f32
        };
        TurnAnimation {
            direction: Some(active.turn.direction),
            progress,
            leaves: active.turn.leaves(),
        }
    }

    pub fn clear(&mut self) -> Option<TurnStarted> {
        self.active.take().map(|a| a.turn)
    }
}

/// Per-instance data consumed by the leaf shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LeafInstance {
    /// rotation, curl, stack, unused
    pub pose: [f32; 4],
    /// front layer, back layer, roughness layer, unused (negative = none)
    pub layers: [f32; 4],
}

impl LeafInstance {
    pub fn new(
        pose: &LeafPose,
        front_layer: Option<u32>,
        back_layer: Option<u32>,
        roughness_layer: Option<u32>,
    ) -> Self {
        let layer = |l: Option<u32>| l.map_or(-1.0, |l| l as f32);
        Self {
            pose: [pose.rotation, pose.curl, pose.stack, 0.0],
            layers: [
                layer(front_layer),
                layer(back_layer),
                layer(roughness_layer),
                0.0,
            ],
        }
    }
}
