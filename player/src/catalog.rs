use std::{collections::HashSet, fmt};

use crate::error::{PlayerError, Result};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TrackId(pub i64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    /// Only for display, the loaded media knows the real length.
    pub duration: String,
    #[serde(rename = "source")]
    pub source_url: String,
}

impl Track {
    /// The id padded to two digits, as shown in the track list.
    pub fn label(&self) -> String {
        format!("{:02}", self.id.0)
    }
}

/// A fixed, ordered and non-empty list of tracks with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(PlayerError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        if let Some(dup) = tracks.iter().find(|t| !seen.insert(t.id)) {
            return Err(PlayerError::DuplicateTrack(dup.id));
        }

        Ok(Self { tracks })
    }

    pub fn first(&self) -> &Track {
        self.tracks.first().expect("the catalog is never empty")
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// 1-based position of the track, for "TRACK 3/8" style labels.
    pub fn ordinal(&self, id: TrackId) -> Option<usize> {
        self.position(id).map(|i| i + 1)
    }

    pub fn next_of(&self, id: TrackId) -> Option<&Track> {
        let i = self.position(id)?;
        self.tracks.get((i + 1) % self.len())
    }

    pub fn previous_of(&self, id: TrackId) -> Option<&Track> {
        let i = self.position(id)?;
        self.tracks.get((i + self.len() - 1) % self.len())
    }
}
