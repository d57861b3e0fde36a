use std::{cell::RefCell, rc::Rc};

use gloo_events::EventListener;
use player::{
    media::{Controller, Generation, Media, MediaEvent},
    visualizer::Observed,
    Action, PlayerError, Track, Volume,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlAudioElement;
use yew::{hook, use_effect_with, use_mut_ref, Callback, UseReducerHandle};

use super::latest::Latest;
use crate::musicplayer::Model;

type PlayOutcome = (Generation, Result<(), String>);

/// An `<audio>` element playing one track.
pub struct AudioHandle {
    audio: HtmlAudioElement,
    generation: Generation,
    listeners: Vec<EventListener>,
    on_play: Callback<PlayOutcome>,
}

impl AudioHandle {
    fn open(
        track: &Track,
        generation: Generation,
        on_event: Callback<MediaEvent>,
        on_play: Callback<PlayOutcome>,
    ) -> player::Result<Self> {
        let audio = HtmlAudioElement::new_with_src(&track.source_url)
            .map_err(|e| PlayerError::Media(describe(&e)))?;

        let listener = |name: &'static str, make: fn(&HtmlAudioElement) -> MediaEvent| {
            let on_event = on_event.clone();
            let element = audio.clone();
            EventListener::new(&audio, name, move |_| on_event.emit(make(&element)))
        };

        let listeners = vec![
            listener("timeupdate", |a| MediaEvent::TimeUpdate {
                position: a.current_time(),
                duration: a.duration(),
            }),
            listener("loadedmetadata", |a| MediaEvent::Metadata {
                duration: a.duration(),
            }),
            listener("ended", |_| MediaEvent::Ended),
            listener("error", |a| {
                MediaEvent::Error(match a.error() {
                    Some(e) => format!("media error code {}", e.code()),
                    None => format!("failed to load {}", a.src()),
                })
            }),
        ];

        Ok(Self {
            audio,
            generation,
            listeners,
            on_play,
        })
    }
}

impl Media for AudioHandle {
    fn set_volume(&self, volume: Volume) {
        self.audio.set_volume(volume.as_fraction());
    }

    fn set_muted(&self, muted: bool) {
        self.audio.set_muted(muted);
    }

    fn play(&self) {
        let promise = self.audio.play();
        let on_play = self.on_play.clone();
        let generation = self.generation;
        // NOTE: always report asynchronously, the controller is borrowed right now
        spawn_local(async move {
            let outcome = match promise {
                Ok(promise) => JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|e| describe(&e)),
                Err(e) => Err(describe(&e)),
            };
            on_play.emit((generation, outcome));
        });
    }

    fn pause(&self) {
        if let Err(e) = self.audio.pause() {
            log::error!("Failed to pause: {}", describe(&e));
        }
    }

    fn position(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_position(&self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn release(&mut self) {
        self.listeners.clear();
        self.pause();
        if let Err(e) = self.audio.remove_attribute("src") {
            log::error!("Failed to detach the source: {}", describe(&e));
        }
        self.audio.load();
    }
}

fn describe(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}

#[derive(Clone)]
pub struct UseAudio {
    controller: Rc<RefCell<Controller<AudioHandle>>>,
}

impl UseAudio {
    /// Moves `delta` seconds from where the audio is right now.
    pub fn skip(&self, delta: f64, total: f64) -> Option<f64> {
        self.controller.try_borrow().ok()?.skip(delta, total)
    }

    pub fn seek_percent(&self, percent: f64, total: f64) -> Option<f64> {
        self.controller.try_borrow().ok()?.seek_percent(percent, total)
    }
}

/// Keeps one audio element in sync with the player state.
#[hook]
pub fn use_audio(state: &UseReducerHandle<Model>, observed: Latest<Observed>) -> UseAudio {
    let controller = use_mut_ref(Controller::<AudioHandle>::new);
    let dispatcher = state.dispatcher();

    let on_event = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |event| dispatcher.dispatch(Action::Media(event)))
    };

    let on_play = {
        let controller = Rc::downgrade(&controller);
        let dispatcher = dispatcher.clone();
        Callback::from(move |(generation, outcome): PlayOutcome| {
            let Some(controller) = controller.upgrade() else {
                return;
            };
            let Ok(mut controller) = controller.try_borrow_mut() else {
                log::error!("The media controller is busy, dropping a play outcome");
                return;
            };
            if !controller.is_current(generation) {
                log::debug!("Ignoring a play outcome from a replaced track");
                return;
            }
            match outcome {
                Ok(()) => {
                    controller.settle_play(generation, observed.get().playing);
                    dispatcher.dispatch(Action::Media(MediaEvent::PlayStarted));
                }
                Err(e) => {
                    controller.play_failed(generation);
                    dispatcher.dispatch(Action::Media(MediaEvent::PlayRejected(e)));
                }
            }
        })
    };

    {
        let controller = controller.clone();
        let track = state.current_track().clone();
        let output = state.output();
        use_effect_with(state.current_id(), move |_| {
            let res = controller.borrow_mut().load(&track, output, |track, generation| {
                AudioHandle::open(track, generation, on_event, on_play)
            });
            if let Err(e) = res {
                log::error!("Failed to load track {}: {e}", track.id);
                dispatcher.dispatch(Action::Media(MediaEvent::Error(e.to_string())));
            }
            move || controller.borrow_mut().release()
        });
    }

    {
        let controller = controller.clone();
        let playing = state.is_playing();
        use_effect_with(state.restarts(), move |restarts| {
            if *restarts > 0 {
                controller.borrow_mut().restart(playing);
            }
        });
    }

    {
        let controller = controller.clone();
        use_effect_with(state.is_playing(), move |playing| {
            controller.borrow_mut().set_playing(*playing);
        });
    }

    {
        let controller = controller.clone();
        use_effect_with((state.volume(), state.is_muted()), move |(volume, muted)| {
            controller.borrow().set_output(*volume, *muted);
        });
    }

    UseAudio { controller }
}
