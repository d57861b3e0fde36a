use std::{fmt, rc::Rc};

use crate::{
    catalog::{Catalog, Track, TrackId},
    config::{Config, Overrides},
    media::{MediaEvent, Output},
    time,
    visualizer::Observed,
};

/// A volume in percent, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Volume(u8);

impl Volume {
    pub const MAX: Volume = Volume(100);

    pub fn new(percent: u8) -> Self {
        Self(percent.min(100))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_silent(self) -> bool {
        self.0 == 0
    }

    /// In `0.0..=1.0`, like the media element wants it.
    pub fn as_fraction(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    TogglePlay,
    /// A click in the track list.
    Select(TrackId),
    Next,
    Previous,
    SetVolume(u8),
    ToggleMute,
    /// The progress slider is being dragged to this percent.
    Scrub(f64),
    /// The progress slider was released at this percent.
    CommitScrub(f64),
    /// The media handle was moved to this position.
    Seeked(f64),
    Media(MediaEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    catalog: Rc<Catalog>,
    current: TrackId,
    /// Bumped whenever the current track starts over without changing.
    restarts: u32,
    playing: bool,
    volume: Volume,
    muted: bool,
    current_time: f64,
    total_duration: f64,
    progress: f64,
    seeking: bool,
}

impl PlayerState {
    /// Paused on the first track of `catalog`.
    pub fn new(catalog: Rc<Catalog>, volume: Volume) -> Self {
        let first = catalog.first().id;
        Self {
            catalog,
            current: first,
            restarts: 0,
            playing: false,
            volume,
            muted: volume.is_silent(),
            current_time: 0.0,
            total_duration: 0.0,
            progress: 0.0,
            seeking: false,
        }
    }

    pub fn from_config(config: &Config, overrides: &Overrides) -> Self {
        let start = config.starting_track(overrides).id;
        let catalog = Rc::new(config.catalog.clone());
        let mut state = Self::new(catalog, Volume::new(config.initial_volume));
        state.current = start;
        if let Some(muted) = overrides.muted {
            state.muted = muted || state.volume.is_silent();
        }
        state
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::TogglePlay => self.playing = !self.playing,
            Action::Select(id) => self.select(id),
            Action::Next => self.advance(Catalog::next_of),
            Action::Previous => self.advance(Catalog::previous_of),
            Action::SetVolume(v) => self.set_volume(Volume::new(v)),
            Action::ToggleMute => self.muted = !self.muted,
            Action::Scrub(percent) => {
                self.seeking = true;
                self.scrub_to(percent);
            }
            Action::CommitScrub(percent) => {
                self.seeking = false;
                self.scrub_to(percent);
                self.progress = time::percent_of(self.current_time, self.total_duration);
            }
            Action::Seeked(position) => {
                self.current_time = time::clamp_position(position, self.total_duration);
                self.progress = time::percent_of(self.current_time, self.total_duration);
            }
            Action::Media(event) => self.on_media(event),
        }
    }

    fn on_media(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate { position, duration } => {
                if !self.seeking {
                    self.current_time = time::sanitize(position);
                    self.progress = time::percent_of(position, duration);
                }
            }
            MediaEvent::Metadata { duration } => {
                self.total_duration = time::sanitize(duration);
                log::info!("Audio loaded, duration: {}", self.total_duration);
            }
            MediaEvent::Ended => self.advance(Catalog::next_of),
            MediaEvent::Error(e) => {
                log::error!("Audio error: {e}");
                self.playing = false;
            }
            MediaEvent::PlayRejected(e) => {
                log::error!("Error playing audio: {e}");
                self.playing = false;
            }
            MediaEvent::PlayStarted => log::debug!("Audio playing successfully"),
        }
    }

    fn select(&mut self, id: TrackId) {
        if self.current == id {
            self.playing = !self.playing;
        } else if self.catalog.get(id).is_some() {
            self.change_track(id);
            self.playing = true;
        } else {
            log::warn!("Selected track {id} is not in the catalog");
        }
    }

    fn advance(&mut self, step: for<'a> fn(&'a Catalog, TrackId) -> Option<&'a Track>) {
        match step(self.catalog.as_ref(), self.current).map(|t| t.id) {
            Some(id) if id == self.current => self.restart(),
            Some(id) => self.change_track(id),
            None => log::warn!("Track {} is not in the catalog", self.current),
        }
    }

    /// Same track again, the loaded duration still holds.
    fn restart(&mut self) {
        self.restarts = self.restarts.wrapping_add(1);
        self.current_time = 0.0;
        self.progress = 0.0;
        self.seeking = false;
    }

    fn change_track(&mut self, id: TrackId) {
        self.current = id;
        self.current_time = 0.0;
        self.total_duration = 0.0;
        self.progress = 0.0;
        self.seeking = false;
    }

    fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;
        if volume.is_silent() {
            self.muted = true;
        } else if self.muted {
            self.muted = false;
        }
    }

    fn scrub_to(&mut self, percent: f64) {
        self.progress = time::sanitize(percent).min(100.0);
        self.current_time = time::position_at(self.progress, self.total_duration);
    }

    pub fn catalog(&self) -> &Rc<Catalog> {
        &self.catalog
    }

    pub fn current_track(&self) -> &Track {
        self.catalog
            .get(self.current)
            .expect("the current track is always in the catalog")
    }

    pub fn current_id(&self) -> TrackId {
        self.current
    }

    /// How many times the current track was started over in place.
    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Percent of the track played, for the progress slider.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// What the volume slider shows.
    pub fn displayed_volume(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.volume.get()
        }
    }

    pub fn shows_muted(&self) -> bool {
        self.muted || self.volume.is_silent()
    }

    pub fn time_label(&self) -> String {
        format!(
            "{} / {}",
            time::format_time(self.current_time),
            time::format_time(self.total_duration)
        )
    }

    pub fn output(&self) -> Output {
        Output {
            volume: self.volume,
            muted: self.muted,
            playing: self.playing,
        }
    }

    pub fn observed(&self) -> Observed {
        Observed {
            playing: self.playing,
            current_time: self.current_time,
            total_duration: self.total_duration,
            track: self
                .catalog
                .ordinal(self.current)
                .map(|ordinal| (ordinal, self.catalog.len())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::catalog::test::catalog;

    fn state(ids: &[i64]) -> PlayerState {
        PlayerState::new(Rc::new(catalog(ids)), Volume::new(80))
    }

    fn time_update(position: f64, duration: f64) -> Action {
        Action::Media(MediaEvent::TimeUpdate { position, duration })
    }

    #[test]
    fn starts_paused_on_the_first_track() {
        let s = state(&[4, 2]);
        assert_eq!(TrackId(4), s.current_id());
        assert!(!s.is_playing());
        assert!(!s.is_muted());
        assert_eq!("0:00 / 0:00", s.time_label());
    }

    #[test]
    fn volume_zero_mutes_and_nonzero_unmutes() {
        let mut s = state(&[1]);
        for v in [0u8, 10, 0, 55, 100] {
            let was_muted = s.is_muted();
            s.apply(Action::SetVolume(v));
            if v == 0 {
                assert!(s.is_muted());
            } else if was_muted {
                assert!(!s.is_muted());
            }
        }
        s.apply(Action::ToggleMute);
        assert!(s.is_muted());
        assert_eq!(0, s.displayed_volume());
        s.apply(Action::SetVolume(30));
        assert!(!s.is_muted());
        assert_eq!(30, s.displayed_volume());

        s.apply(Action::SetVolume(250));
        assert_eq!(Volume::MAX, s.volume());
    }

    #[test]
    fn muted_while_silent_stays_visibly_muted() {
        let mut s = state(&[1]);
        s.apply(Action::SetVolume(0));
        s.apply(Action::ToggleMute);
        assert!(!s.is_muted());
        assert!(s.shows_muted());
    }

    #[test]
    fn selecting_the_current_track_toggles() {
        let mut s = state(&[1, 2, 3]);
        s.apply(Action::Select(TrackId(1)));
        assert!(s.is_playing());
        s.apply(Action::Select(TrackId(1)));
        assert!(!s.is_playing());
        assert_eq!(TrackId(1), s.current_id());
    }

    #[test]
    fn selecting_another_track_plays_it() {
        let mut s = state(&[1, 2, 3]);
        s.apply(time_update(30.0, 60.0));
        s.apply(Action::Select(TrackId(3)));
        assert!(s.is_playing());
        assert_eq!(TrackId(3), s.current_id());
        assert_eq!(0.0, s.current_time());
        assert_eq!(0.0, s.progress());

        s.apply(Action::Select(TrackId(2)));
        assert!(s.is_playing());

        s.apply(Action::Select(TrackId(99)));
        assert_eq!(TrackId(2), s.current_id());
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut s = state(&[1, 2, 3, 4, 7, 8, 9, 10]);
        s.apply(Action::Previous);
        assert_eq!(TrackId(10), s.current_id());
        s.apply(Action::Next);
        assert_eq!(TrackId(1), s.current_id());

        let mut seen = vec![];
        for _ in 0..8 {
            s.apply(Action::Next);
            seen.push(s.current_id().0);
        }
        assert_eq!(vec![2, 3, 4, 7, 8, 9, 10, 1], seen);
    }

    #[test]
    fn next_keeps_the_play_state() {
        let mut s = state(&[1, 2]);
        s.apply(Action::TogglePlay);
        s.apply(Action::Next);
        assert!(s.is_playing());
        s.apply(Action::TogglePlay);
        s.apply(Action::Previous);
        assert!(!s.is_playing());
    }

    #[test]
    fn ended_advances() {
        let mut s = state(&[5, 6]);
        s.apply(Action::Select(TrackId(6)));
        s.apply(Action::Media(MediaEvent::Ended));
        assert_eq!(TrackId(5), s.current_id());
        assert!(s.is_playing());
    }

    #[test]
    fn time_updates_are_held_back_while_scrubbing() {
        let mut s = state(&[1]);
        s.apply(Action::Media(MediaEvent::Metadata { duration: 200.0 }));
        s.apply(time_update(20.0, 200.0));
        assert_eq!(20.0, s.current_time());
        assert_eq!(10.0, s.progress());

        s.apply(Action::Scrub(50.0));
        assert_eq!(100.0, s.current_time());
        s.apply(time_update(21.0, 200.0));
        assert_eq!(100.0, s.current_time());
        assert_eq!(50.0, s.progress());

        s.apply(Action::CommitScrub(75.0));
        assert_eq!(150.0, s.current_time());
        assert_eq!(75.0, s.progress());
        s.apply(time_update(150.5, 200.0));
        assert_eq!(150.5, s.current_time());
    }

    #[test]
    fn unknown_duration_is_normalized() {
        let mut s = state(&[1]);
        s.apply(time_update(3.0, f64::NAN));
        assert_eq!(0.0, s.progress());
        s.apply(Action::Media(MediaEvent::Metadata { duration: f64::NAN }));
        assert_eq!(0.0, s.total_duration());
        s.apply(Action::Scrub(40.0));
        assert_eq!(0.0, s.current_time());
        assert_eq!(40.0, s.progress());
        s.apply(Action::CommitScrub(40.0));
        assert_eq!(0.0, s.progress());
        assert_eq!("0:00 / 0:00", s.time_label());

        s.apply(time_update(30.0, f64::NAN));
        s.apply(Action::Seeked(20.0));
        assert_eq!(20.0, s.current_time());
    }

    #[test]
    fn single_track_starts_over() {
        let mut s = state(&[1]);
        s.apply(Action::TogglePlay);
        s.apply(Action::Media(MediaEvent::Metadata { duration: 200.0 }));
        s.apply(time_update(50.0, 200.0));

        s.apply(Action::Next);
        assert_eq!(TrackId(1), s.current_id());
        assert_eq!(1, s.restarts());
        assert!(s.is_playing());
        assert_eq!(200.0, s.total_duration());
        assert_eq!("0:00 / 3:20", s.time_label());

        s.apply(time_update(51.0, 200.0));
        assert_eq!("0:51 / 3:20", s.time_label());
        assert_eq!(
            Some(41.0),
            time::skip_target(s.current_time(), -10.0, s.total_duration())
        );
        assert_eq!(
            Some(61.0),
            time::skip_target(s.current_time(), 10.0, s.total_duration())
        );

        s.apply(Action::Media(MediaEvent::Ended));
        s.apply(Action::Previous);
        assert_eq!(3, s.restarts());
        assert!(s.is_playing());
        assert_eq!(200.0, s.total_duration());
    }

    #[test]
    fn reselecting_keeps_the_loaded_track() {
        let mut s = state(&[1, 2]);
        s.apply(Action::Media(MediaEvent::Metadata { duration: 90.0 }));
        s.apply(Action::Select(TrackId(1)));
        s.apply(Action::Select(TrackId(1)));
        assert_eq!(TrackId(1), s.current_id());
        assert_eq!(0, s.restarts());
        assert_eq!(90.0, s.total_duration());

        s.apply(Action::Next);
        assert_eq!(0, s.restarts());
        assert_eq!(0.0, s.total_duration());
    }

    #[test]
    fn failures_fall_back_to_paused() {
        let mut s = state(&[1]);
        s.apply(Action::TogglePlay);
        s.apply(Action::Media(MediaEvent::PlayRejected("NotAllowedError".into())));
        assert!(!s.is_playing());

        s.apply(Action::TogglePlay);
        s.apply(Action::Media(MediaEvent::PlayStarted));
        assert!(s.is_playing());
        s.apply(Action::Media(MediaEvent::Error("decode".into())));
        assert!(!s.is_playing());
    }

    #[test]
    fn seeked_positions_are_clamped() {
        let mut s = state(&[1]);
        s.apply(Action::Media(MediaEvent::Metadata { duration: 100.0 }));
        s.apply(Action::Seeked(120.0));
        assert_eq!(100.0, s.current_time());
        assert_eq!(100.0, s.progress());
        s.apply(Action::Seeked(-1.0));
        assert_eq!(0.0, s.current_time());
    }

    #[test]
    fn observed_snapshot() {
        let mut s = state(&[3, 9, 12]);
        s.apply(Action::Select(TrackId(9)));
        s.apply(Action::Media(MediaEvent::Metadata { duration: 65.0 }));
        let o = s.observed();
        assert!(o.playing);
        assert_eq!(65.0, o.total_duration);
        assert_eq!(Some((2, 3)), o.track);
    }

    #[test]
    fn from_config_with_overrides() {
        let conf = Config::builtin().unwrap();
        let o = Overrides::from_pairs([("track", "8"), ("muted", "yes")]);
        let s = PlayerState::from_config(&conf, &o);
        assert_eq!(TrackId(8), s.current_id());
        assert!(s.is_muted());
        assert_eq!(80, s.volume().get());
    }
}
