//! Viewer session: one mount of the book preview, from loading to unmount.
//!
//! The session owns every piece of per-mount state (catalog, spreads, turn
//! state machine, animation clock, sounds) and reports what happened through
//! a queue of [`ViewerEvent`]s that the host drains after each call.

use crate::camera::Camera;
use crate::catalog::{PageId, SessionCatalog};
use crate::constants::*;
use crate::controls::{strip_entries, NavAction, StripEntry};
use crate::scene::{describe_scene, turn_duration_ms, SceneDescription, TurnAnimation, TurnAnimator};
use crate::sound::{AudioPreference, SoundBank, SoundCoordinator};
use crate::spreads::{build_book, Spread};
use crate::turn::{PageFlipper, TurnStarted};
use smallvec::SmallVec;

/// Tuning for one viewer session.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub turn_duration_ms: f64,
    pub jump_extra_ms_per_leaf: f64,
    pub turn_duration_max_ms: f64,
    pub fallback_page_count: usize,
    pub discovery_latency_ms: i32,
    pub default_volume: f32,
    pub texture_base_path: &'static str,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            turn_duration_ms: TURN_DURATION_MS,
            jump_extra_ms_per_leaf: JUMP_EXTRA_MS_PER_LEAF,
            turn_duration_max_ms: TURN_DURATION_MAX_MS,
            fallback_page_count: FALLBACK_PAGE_COUNT,
            discovery_latency_ms: DISCOVERY_LATENCY_MS,
            default_volume: DEFAULT_VOLUME,
            texture_base_path: TEXTURE_BASE_PATH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Ready,
    Unmounted,
}

/// Notifications for the host, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewerEvent {
    Ready { spread_count: usize },
    TurnStarted(TurnStarted),
    PositionChanged { position: usize },
    Unmounted,
}

pub type EventQueue = SmallVec<[ViewerEvent; 4]>;

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct ViewerFrame {
    pub scene: SceneDescription,
    pub camera: Camera,
    pub animation: TurnAnimation,
}

pub struct ViewerSession<B: SoundBank> {
    config: ViewerConfig,
    phase: SessionPhase,
    catalog: SessionCatalog,
    spreads: Vec<Spread>,
    render_spreads: Vec<Spread>,
    flipper: PageFlipper,
    animator: TurnAnimator,
    sound: SoundCoordinator<B>,
    events: EventQueue,
}

impl<B: SoundBank> ViewerSession<B> {
    /// Start a session in the loading phase with fresh audio preferences.
    pub fn mount(config: ViewerConfig, bank: B, seed: u64) -> Self {
        let mut sound = SoundCoordinator::new(bank, seed);
        sound.set_volume(config.default_volume);
        log::info!("[viewer] mounted");
        Self {
            config,
            phase: SessionPhase::Loading,
            catalog: SessionCatalog::new(),
            spreads: Vec::new(),
            render_spreads: vec![Spread::covers_only()],
            flipper: PageFlipper::new(0),
            animator: TurnAnimator::new(),
            sound,
            events: EventQueue::new(),
        }
    }

    /// Publish the resolved catalog and show the book.
    ///
    /// Returns false when the session is not loading any more.
    pub fn finish_loading(&mut self, pages: Vec<PageId>) -> bool {
        if self.phase != SessionPhase::Loading {
            log::debug!("[viewer] catalog ignored in phase {:?}", self.phase);
            return false;
        }
        if let Err(e) = self.catalog.publish(pages) {
            log::warn!("[viewer] {}", e);
            return false;
        }
        self.spreads = build_book(self.catalog.pages());
        self.render_spreads = if self.spreads.is_empty() {
            vec![Spread::covers_only()]
        } else {
            self.spreads.clone()
        };
        self.flipper.reset(self.spreads.len());
        self.animator.clear();
        self.phase = SessionPhase::Ready;
        self.sound.play_book_open();
        log::info!(
            "[viewer] ready: {} pages, {} spreads",
            self.catalog.pages().len(),
            self.spreads.len()
        );
        self.events.push(ViewerEvent::Ready {
            spread_count: self.spreads.len(),
        });
        true
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn pages(&self) -> &[PageId] {
        self.catalog.pages()
    }

    /// Spreads built from the catalog; empty for an empty catalog.
    pub fn spreads(&self) -> &[Spread] {
        &self.spreads
    }

    /// Leaves actually drawn, never empty.
    pub fn render_spreads(&self) -> &[Spread] {
        &self.render_spreads
    }

    pub fn strip(&self) -> Vec<StripEntry> {
        strip_entries(self.spreads.len())
    }

    pub fn position(&self) -> usize {
        self.flipper.position()
    }

    pub fn is_turning(&self) -> bool {
        self.flipper.is_turning()
    }

    pub fn preferences(&self) -> AudioPreference {
        self.sound.preferences()
    }

    pub fn sound(&self) -> &SoundCoordinator<B> {
        &self.sound
    }

    pub fn on_navigate(&mut self, target: isize) -> Option<TurnStarted> {
        if self.phase != SessionPhase::Ready {
            return None;
        }
        let turn = self.flipper.go_to(target)?;
        self.start_turn(turn);
        Some(turn)
    }

    pub fn next(&mut self) -> Option<TurnStarted> {
        self.on_navigate(self.flipper.position() as isize + 1)
    }

    pub fn previous(&mut self) -> Option<TurnStarted> {
        self.on_navigate(self.flipper.position() as isize - 1)
    }

    pub fn first(&mut self) -> Option<TurnStarted> {
        self.on_navigate(0)
    }

    pub fn last(&mut self) -> Option<TurnStarted> {
        self.on_navigate(self.flipper.spread_count() as isize)
    }

    /// Apply a control action. `Close` belongs to the host and is ignored.
    pub fn apply(&mut self, action: NavAction) -> Option<TurnStarted> {
        match action {
            NavAction::Next => self.next(),
            NavAction::Previous => self.previous(),
            NavAction::First => self.first(),
            NavAction::Last => self.last(),
            NavAction::GoTo(target) => self.on_navigate(target.min(isize::MAX as usize) as isize),
            NavAction::ToggleMute => {
                self.toggle_mute();
                None
            }
            NavAction::Close => None,
        }
    }

    fn start_turn(&mut self, turn: TurnStarted) {
        let duration = turn_duration_ms(
            self.config.turn_duration_ms,
            self.config.jump_extra_ms_per_leaf,
            self.config.turn_duration_max_ms,
            turn.leaves(),
        );
        self.animator.begin(turn, duration);
        self.events.push(ViewerEvent::TurnStarted(turn));
        self.sound.on_turn_started(&turn);
    }

    /// Advance the animation clock and describe the frame to draw.
    pub fn tick(&mut self, now_ms: f64, viewport_width_css_px: f64, aspect: f32) -> Option<ViewerFrame> {
        if self.phase != SessionPhase::Ready {
            return None;
        }
        let mut animation = self.animator.sample(now_ms);
        if animation.is_finished() {
            self.animator.clear();
            if let Some(position) = self.flipper.complete() {
                log::debug!("[viewer] position {}", position);
                self.events.push(ViewerEvent::PositionChanged { position });
            }
            animation = TurnAnimation::IDLE;
        }
        let scene = describe_scene(&self.render_spreads, self.flipper.position(), &animation);
        Some(ViewerFrame {
            scene,
            camera: Camera::framed(viewport_width_css_px, aspect),
            animation,
        })
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.sound.toggle_mute()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.sound.set_muted(muted);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.sound.set_volume(volume);
    }

    /// Tear the session down. Safe to call more than once.
    pub fn unmount(&mut self) {
        if self.phase == SessionPhase::Unmounted {
            return;
        }
        if let Some(turn) = self.flipper.cancel() {
            log::debug!("[viewer] dropped turn {} -> {}", turn.from, turn.target);
        }
        self.animator.clear();
        self.sound.release();
        self.phase = SessionPhase::Unmounted;
        self.events.push(ViewerEvent::Unmounted);
        log::info!("[viewer] unmounted");
    }

    pub fn drain_events(&mut self) -> EventQueue {
        std::mem::take(&mut self.events)
    }
}

impl<B: SoundBank> Drop for ViewerSession<B> {
    fn drop(&mut self) {
        self.unmount();
    }
}
