use crate::constants::{DEFAULT_VOLUME, PAGE_FLIP_SOUNDS};
use crate::error::SoundError;
use crate::turn::TurnStarted;
use rand::prelude::*;

/// Which preloaded sound to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    /// One of the pooled page-flip sounds.
    PageFlip(usize),
    BookOpen,
}

/// Mute and volume as chosen in the viewer controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioPreference {
    pub muted: bool,
    pub volume: f32,
}

impl Default for AudioPreference {
    fn default() -> Self {
        Self {
            muted: false,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl AudioPreference {
    /// Volume actually applied to the sounds.
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }
}

/// Owned handle to the preloaded viewer sounds.
///
/// Created when the viewer mounts and released when it unmounts.
pub trait SoundBank {
    /// Number of page-flip alternatives in the pool.
    fn flip_count(&self) -> usize {
        PAGE_FLIP_SOUNDS.len()
    }
    /// Restart the cue from the beginning.
    fn play(&mut self, cue: SoundCue) -> Result<(), SoundError>;
    /// Apply a volume uniformly to every pooled sound.
    fn apply_volume(&mut self, volume: f32);
    /// Stop and free every sound. Must be idempotent.
    fn release(&mut self);
}

/// Plays one page-flip sound per started turn and owns [`AudioPreference`].
pub struct SoundCoordinator<B: SoundBank> {
    bank: B,
    prefs: AudioPreference,
    rng: StdRng,
    released: bool,
}

impl<B: SoundBank> SoundCoordinator<B> {
    pub fn new(mut bank: B, seed: u64) -> Self {
        let prefs = AudioPreference::default();
        bank.apply_volume(prefs.effective_volume());
        Self {
            bank,
            prefs,
            rng: StdRng::seed_from_u64(seed),
            released: false,
        }
    }

    pub fn preferences(&self) -> AudioPreference {
        self.prefs
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn on_turn_started(&mut self, turn: &TurnStarted) {
        let pool = self.bank.flip_count();
        if pool == 0 {
            return;
        }
        let pick = self.rng.gen_range(0..pool);
        log::debug!("[sound] flip {} for turn {} -> {}", pick, turn.from, turn.target);
        self.play(SoundCue::PageFlip(pick));
    }

    pub fn play_book_open(&mut self) {
        self.play(SoundCue::BookOpen);
    }

    fn play(&mut self, cue: SoundCue) {
        if self.prefs.muted || self.released {
            return;
        }
        if let Err(e) = self.bank.play(cue) {
            log::warn!("[sound] {:?} not played: {}", cue, e);
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.prefs.muted = muted;
        self.apply();
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.prefs.muted);
        self.prefs.muted
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.prefs.volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            DEFAULT_VOLUME
        };
        self.apply();
    }

    fn apply(&mut self) {
        if !self.released {
            self.bank.apply_volume(self.prefs.effective_volume());
        }
    }

    pub fn release(&mut self) {
        if !self.released {
            self.bank.release();
            self.released = true;
        }
    }
}
