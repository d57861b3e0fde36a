use crate::{
    catalog::{Catalog, Track, TrackId},
    error::{PlayerError, Result},
};

const BUILTIN: &str = include_str!("../assets/player.toml");

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
struct Raw {
    log_level: String,
    initial_volume: u8,
    volume_step: u8,
    skip_seconds: f64,
    seek_step: f64,
    canvas: Canvas,
    visualizer: Visualizer,
    tracks: Vec<Track>,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Visualizer {
    pub bars: usize,
    pub wave_points: usize,
    pub markers: usize,
}

/// Everything the widget can be configured with, including the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: log::Level,
    pub initial_volume: u8,
    pub volume_step: u8,
    pub skip_seconds: f64,
    pub seek_step: f64,
    pub canvas: Canvas,
    pub visualizer: Visualizer,
    pub catalog: Catalog,
}

impl Default for Raw {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            initial_volume: 80,
            volume_step: 10,
            skip_seconds: 10.0,
            seek_step: 0.1,
            canvas: Canvas::default(),
            visualizer: Visualizer::default(),
            tracks: Vec::new(),
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 400,
            height: 120,
        }
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self {
            bars: 32,
            wave_points: 100,
            markers: 5,
        }
    }
}

fn invalid(key: &'static str, reason: impl Into<String>) -> PlayerError {
    PlayerError::InvalidConfig {
        key,
        reason: reason.into(),
    }
}

impl Config {
    /// The config compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN)
    }

    pub fn from_toml(conts: &str) -> Result<Self> {
        let raw: Raw = toml::from_str(conts)?;

        let log_level: log::Level = raw
            .log_level
            .parse()
            .map_err(|_| invalid("log_level", format!("unknown level {:?}", raw.log_level)))?;

        if raw.initial_volume > 100 {
            return Err(invalid("initial_volume", "must be at most 100"));
        }
        if raw.volume_step == 0 || raw.volume_step > 100 {
            return Err(invalid("volume_step", "must be in 1..=100"));
        }
        if !(raw.skip_seconds.is_finite() && raw.skip_seconds > 0.0) {
            return Err(invalid("skip_seconds", "must be a positive number"));
        }
        if !(raw.seek_step.is_finite() && raw.seek_step > 0.0) {
            return Err(invalid("seek_step", "must be a positive number"));
        }
        if raw.canvas.width == 0 || raw.canvas.height == 0 {
            return Err(invalid("canvas", "width and height must be positive"));
        }
        if raw.visualizer.bars == 0 || raw.visualizer.wave_points < 2 {
            return Err(invalid(
                "visualizer",
                "needs at least one bar and two wave points",
            ));
        }

        Ok(Self {
            log_level,
            initial_volume: raw.initial_volume,
            volume_step: raw.volume_step,
            skip_seconds: raw.skip_seconds,
            seek_step: raw.seek_step,
            canvas: raw.canvas,
            visualizer: raw.visualizer,
            catalog: Catalog::new(raw.tracks)?,
        })
    }

    /// Applies the overrides that belong to the config itself.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if let Some(volume) = overrides.volume {
            self.initial_volume = volume;
        }
    }

    /// The track to start on, the first one unless overridden by a known id.
    pub fn starting_track(&self, overrides: &Overrides) -> &Track {
        match overrides.track {
            Some(id) => self.catalog.get(id).unwrap_or_else(|| {
                log::warn!("There is no track with id {id}, starting on the first one");
                self.catalog.first()
            }),
            None => self.catalog.first(),
        }
    }
}

/// Settings taken from the query string of the page, `?volume=30&muted=yes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub volume: Option<u8>,
    pub muted: Option<bool>,
    pub track: Option<TrackId>,
    pub log_level: Option<log::Level>,
}

impl Overrides {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut overrides = Self::default();
        for (k, v) in pairs {
            let v = v.as_ref();
            match k.as_ref() {
                "volume" => overrides.volume = v.parse().ok().filter(|v| *v <= 100),
                "muted" => overrides.muted = parse_bool(v),
                "track" => overrides.track = v.parse().ok().map(TrackId),
                "log" => overrides.log_level = v.parse().ok(),
                other => log::debug!("Ignoring unknown query key: {other}"),
            }
        }
        overrides
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "yes" | "true" | "" => Some(true),
        "no" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const TRACK: &str = r#"
        [[tracks]]
        id = 5
        title = "t"
        artist = "a"
        duration = "1:00"
        source = "https://example.com/a.ogg"
    "#;

    #[test]
    fn builtin_has_the_eight_tracks() {
        let conf = Config::builtin().unwrap();
        let ids: Vec<i64> = conf.catalog.iter().map(|t| t.id.0).collect();
        assert_eq!(vec![1, 2, 3, 4, 7, 8, 9, 10], ids);
        assert_eq!(80, conf.initial_volume);
        assert_eq!(10.0, conf.skip_seconds);
        assert_eq!(log::Level::Info, conf.log_level);
        assert_eq!(Canvas { width: 400, height: 120 }, conf.canvas);
    }

    #[test]
    fn defaults_fill_in_missing_keys() {
        let conf = Config::from_toml(TRACK).unwrap();
        assert_eq!(10, conf.volume_step);
        assert_eq!(32, conf.visualizer.bars);
        assert_eq!("https://example.com/a.ogg", conf.catalog.first().source_url);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_toml(&format!("initial_volume = 101\n{TRACK}")),
            Err(PlayerError::InvalidConfig {
                key: "initial_volume",
                ..
            })
        ));
        assert!(matches!(
            Config::from_toml(&format!("log_level = \"loud\"\n{TRACK}")),
            Err(PlayerError::InvalidConfig {
                key: "log_level",
                ..
            })
        ));
        assert!(matches!(
            Config::from_toml(""),
            Err(PlayerError::EmptyCatalog)
        ));
        assert!(matches!(
            Config::from_toml("initial_volume = \"loud\""),
            Err(PlayerError::ConfigParse(_))
        ));
    }

    #[test]
    fn query_overrides() {
        let o = Overrides::from_pairs([
            ("volume", "30"),
            ("muted", ""),
            ("track", "7"),
            ("log", "debug"),
            ("whatever", "1"),
        ]);
        assert_eq!(
            Overrides {
                volume: Some(30),
                muted: Some(true),
                track: Some(TrackId(7)),
                log_level: Some(log::Level::Debug),
            },
            o
        );

        let o = Overrides::from_pairs([("volume", "300"), ("muted", "maybe")]);
        assert_eq!(Overrides::default(), o);
    }

    #[test]
    fn unknown_starting_track_falls_back() {
        let mut conf = Config::builtin().unwrap();
        let o = Overrides::from_pairs([("track", "5"), ("volume", "20")]);
        assert_eq!(TrackId(1), conf.starting_track(&o).id);
        let o2 = Overrides::from_pairs([("track", "9")]);
        assert_eq!(TrackId(9), conf.starting_track(&o2).id);

        conf.apply(&o);
        assert_eq!(20, conf.initial_volume);
    }
}
