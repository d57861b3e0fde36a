//! Ownership of the one live media handle.
//!
//! A [`Controller`] holds at most one [`Media`] at a time. Loading a new track
//! releases the previous handle before the next one is opened, and every event
//! a handle emits is tagged with the [`Generation`] it was opened under so that
//! late events from a released handle can be told apart and dropped.

use crate::{
    catalog::{Track, TrackId},
    error::Result,
    state::Volume,
    time,
};

/// Imperative playback API of one loaded source.
pub trait Media {
    fn set_volume(&self, volume: Volume);
    fn set_muted(&self, muted: bool);
    /// Requests playback. Completes later with [`MediaEvent::PlayStarted`] or
    /// [`MediaEvent::PlayRejected`].
    fn play(&self);
    fn pause(&self);
    fn position(&self) -> f64;
    fn set_position(&self, seconds: f64);
    /// Stops playback and unsubscribes from every event.
    fn release(&mut self);
}

/// Identifies one opened handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Generation(u64);

/// Notifications from a media handle, in the order the platform emits them.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    TimeUpdate { position: f64, duration: f64 },
    Metadata { duration: f64 },
    Ended,
    Error(String),
    PlayStarted,
    PlayRejected(String),
}

/// What to apply to a freshly opened handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Output {
    pub volume: Volume,
    pub muted: bool,
    pub playing: bool,
}

struct Loaded<M> {
    media: M,
    generation: Generation,
    track: TrackId,
}

pub struct Controller<M: Media> {
    loaded: Option<Loaded<M>>,
    next_generation: u64,
    playing: bool,
}

impl<M: Media> Default for Controller<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Media> Controller<M> {
    pub fn new() -> Self {
        Self {
            loaded: None,
            next_generation: 0,
            playing: false,
        }
    }

    /// Replaces the current handle with one for `track`. `open` receives the
    /// generation the new handle must tag its events with.
    pub fn load<F>(&mut self, track: &Track, output: Output, open: F) -> Result<Generation>
    where
        F: FnOnce(&Track, Generation) -> Result<M>,
    {
        self.release();

        let generation = Generation(self.next_generation);
        self.next_generation += 1;

        log::info!("Loading track {}: {}", track.id, track.title);
        let media = open(track, generation)?;
        media.set_volume(output.volume);
        media.set_muted(output.muted);
        if output.playing {
            media.play();
        }
        self.playing = output.playing;

        self.loaded = Some(Loaded {
            media,
            generation,
            track: track.id,
        });
        Ok(generation)
    }

    /// Releases the current handle, if any.
    pub fn release(&mut self) {
        if let Some(mut old) = self.loaded.take() {
            log::debug!("Releasing the handle for track {}", old.track);
            old.media.release();
        }
        self.playing = false;
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.loaded
            .as_ref()
            .is_some_and(|l| l.generation == generation)
    }

    pub fn set_output(&self, volume: Volume, muted: bool) {
        if let Some(l) = &self.loaded {
            log::debug!("Volume set to {volume}, muted: {muted}");
            l.media.set_volume(volume);
            l.media.set_muted(muted);
        }
    }

    /// Plays or pauses, doing nothing if already in that state.
    pub fn set_playing(&mut self, playing: bool) {
        let Some(l) = &self.loaded else {
            return;
        };
        if self.playing == playing {
            return;
        }
        self.playing = playing;
        if playing {
            l.media.play();
        } else {
            l.media.pause();
        }
    }

    /// Rewinds the loaded handle to the start, playing it again if `playing`.
    /// A handle that ended has stopped on its own, so play is requested even
    /// when it was already playing.
    pub fn restart(&mut self, playing: bool) {
        let Some(l) = &self.loaded else {
            return;
        };
        log::debug!("Restarting track {}", l.track);
        l.media.set_position(0.0);
        self.playing = playing;
        if playing {
            l.media.play();
        } else {
            l.media.pause();
        }
    }

    /// Called when a play request of `generation` completed. If the user paused
    /// while it was in flight the handle is paused again.
    pub fn settle_play(&mut self, generation: Generation, still_wants_play: bool) {
        if !self.is_current(generation) {
            return;
        }
        if !still_wants_play {
            log::debug!("Play completed after a pause, pausing again");
            self.playing = false;
            if let Some(l) = &self.loaded {
                l.media.pause();
            }
        }
    }

    /// Called when a play request of `generation` failed.
    pub fn play_failed(&mut self, generation: Generation) {
        if self.is_current(generation) {
            self.playing = false;
        }
    }

    /// Moves to `seconds`, clamped into `[0, total]`. Returns where it ended up.
    pub fn seek_to(&self, seconds: f64, total: f64) -> Option<f64> {
        let l = self.loaded.as_ref()?;
        let target = time::clamp_position(seconds, total);
        l.media.set_position(target);
        Some(target)
    }

    pub fn seek_percent(&self, percent: f64, total: f64) -> Option<f64> {
        self.seek_to(time::position_at(percent, total), total)
    }

    /// Moves `delta` seconds from the live position. Skipping forward is
    /// ignored until the total duration is known.
    pub fn skip(&self, delta: f64, total: f64) -> Option<f64> {
        let l = self.loaded.as_ref()?;
        let target = time::skip_target(l.media.position(), delta, total)?;
        l.media.set_position(target);
        Some(target)
    }
}

impl<M: Media> Drop for Controller<M> {
    fn drop(&mut self) {
        self.release();
    }
}
