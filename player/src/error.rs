use crate::catalog::TrackId;

#[derive(thiserror::Error, Debug)]
pub enum PlayerError {
    #[error("failed to parse the config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("invalid config value for '{key}': {reason}")]
    InvalidConfig { key: &'static str, reason: String },
    #[error("the track catalog is empty")]
    EmptyCatalog,
    #[error("track id {0} appears more than once in the catalog")]
    DuplicateTrack(TrackId),
    #[error("media failure: {0}")]
    Media(String),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
