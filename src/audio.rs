use book_core::constants::{BOOK_OPEN_SOUND, PAGE_FLIP_SOUNDS};
use book_core::{SoundBank, SoundCue, SoundError};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Preloaded `<audio>` elements for the viewer sounds.
pub struct HtmlSoundBank {
    flips: Vec<web::HtmlAudioElement>,
    open: Option<web::HtmlAudioElement>,
}

fn create_audio(src: &str) -> Option<web::HtmlAudioElement> {
    match web::HtmlAudioElement::new_with_src(src) {
        Ok(a) => {
            a.set_preload("auto");
            Some(a)
        }
        Err(e) => {
            log::error!("[sound] {} audio element error: {:?}", src, e);
            None
        }
    }
}

impl HtmlSoundBank {
    pub fn preload() -> Self {
        let flips: Vec<_> = PAGE_FLIP_SOUNDS.iter().filter_map(|src| create_audio(src)).collect();
        let open = create_audio(BOOK_OPEN_SOUND);
        log::info!("[sound] preloaded {} flip sounds", flips.len());
        Self { flips, open }
    }

    fn all(&self) -> impl Iterator<Item = &web::HtmlAudioElement> {
        self.flips.iter().chain(self.open.iter())
    }
}

impl SoundBank for HtmlSoundBank {
    fn flip_count(&self) -> usize {
        self.flips.len()
    }

    fn play(&mut self, cue: SoundCue) -> Result<(), SoundError> {
        let el = match cue {
            SoundCue::PageFlip(i) => self.flips.get(i),
            SoundCue::BookOpen => self.open.as_ref(),
        }
        .ok_or(SoundError::Released)?;
        el.set_current_time(0.0);
        let promise = el
            .play()
            .map_err(|e| SoundError::Rejected(format!("{:?}", e)))?;
        // Autoplay policy rejects asynchronously.
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("[sound] {:?} rejected: {:?}", cue, e);
            }
        });
        Ok(())
    }

    fn apply_volume(&mut self, volume: f32) {
        for el in self.all() {
            el.set_volume(volume as f64);
        }
    }

    fn release(&mut self) {
        for el in self.all() {
            _ = el.pause();
            _ = el.remove_attribute("src");
            el.load();
        }
        self.flips.clear();
        self.open = None;
        log::info!("[sound] released");
    }
}
