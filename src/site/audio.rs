//! Short sound cues. Playback failures (autoplay policy, missing file) are
//! logged and otherwise ignored.

use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AudioCue {
    Click,
    Explore,
    Growl,
    Hiss,
    Snap,
}

impl AudioCue {
    pub const ALL: [AudioCue; 5] = [
        AudioCue::Click,
        AudioCue::Explore,
        AudioCue::Growl,
        AudioCue::Hiss,
        AudioCue::Snap,
    ];

    /// Crocodile sounds counted by the exploration tracker.
    pub const AMBIENT: [AudioCue; 3] = [AudioCue::Growl, AudioCue::Hiss, AudioCue::Snap];

    pub fn name(self) -> &'static str {
        match self {
            AudioCue::Click => "click",
            AudioCue::Explore => "explore",
            AudioCue::Growl => "growl",
            AudioCue::Hiss => "hiss",
            AudioCue::Snap => "snap",
        }
    }

    pub fn asset(self) -> &'static str {
        match self {
            AudioCue::Click => "sounds/Click.mp3",
            AudioCue::Explore => "sounds/LetsGo.mp3",
            AudioCue::Growl => "sounds/CrocGrowl.mp3",
            AudioCue::Hiss => "sounds/CrocHiss.mp3",
            AudioCue::Snap => "sounds/CrocChomp.mp3",
        }
    }

    pub fn is_ambient(self) -> bool {
        AudioCue::AMBIENT.contains(&self)
    }

    /// Id of the button that plays an ambient cue.
    pub fn button_id(self) -> Option<&'static str> {
        match self {
            AudioCue::Growl => Some("growl-btn"),
            AudioCue::Hiss => Some("hiss-btn"),
            AudioCue::Snap => Some("snap-btn"),
            AudioCue::Click | AudioCue::Explore => None,
        }
    }

    /// Keyboard shortcut: `1`, `2`, `3` for growl, hiss, snap.
    pub fn from_key(key: &str) -> Option<AudioCue> {
        match key {
            "1" => Some(AudioCue::Growl),
            "2" => Some(AudioCue::Hiss),
            "3" => Some(AudioCue::Snap),
            _ => None,
        }
    }
}

struct Clip {
    cue: AudioCue,
    audio: HtmlAudioElement,
    on_reject: Closure<dyn FnMut(JsValue)>,
}

pub struct AudioCuePlayer {
    clips: Vec<Clip>,
}

impl AudioCuePlayer {
    /// Load every cue. A cue whose element cannot be created is skipped.
    pub fn load() -> Self {
        let clips = AudioCue::ALL
            .into_iter()
            .filter_map(|cue| match HtmlAudioElement::new_with_src(cue.asset()) {
                Ok(audio) => {
                    let on_reject = Closure::wrap(Box::new(move |err: JsValue| {
                        log::warn!("could not play {} sound: {:?}", cue.name(), err);
                    }) as Box<dyn FnMut(JsValue)>);
                    Some(Clip { cue, audio, on_reject })
                }
                Err(err) => {
                    log::warn!("could not load {}: {:?}", cue.asset(), err);
                    None
                }
            })
            .collect();
        Self { clips }
    }

    pub fn element(&self, cue: AudioCue) -> Option<&HtmlAudioElement> {
        self.clips.iter().find(|c| c.cue == cue).map(|c| &c.audio)
    }

    /// Rewind and play `cue`.
    pub fn play(&self, cue: AudioCue) {
        let Some(clip) = self.clips.iter().find(|c| c.cue == cue) else {
            return;
        };
        clip.audio.set_current_time(0.0);
        match clip.audio.play() {
            Ok(promise) => {
                let _: js_sys::Promise = promise.catch(&clip.on_reject);
                log::debug!("playing {} sound", cue.name());
            }
            Err(err) => log::warn!("could not play {} sound: {:?}", cue.name(), err),
        }
    }
}
