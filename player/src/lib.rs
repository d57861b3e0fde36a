pub mod catalog;
pub mod config;
pub mod error;
pub mod media;
pub mod state;
pub mod time;
pub mod visualizer;

pub use catalog::{Catalog, Track, TrackId};
pub use config::{Config, Overrides};
pub use error::{PlayerError, Result};
pub use state::{Action, PlayerState, Volume};
