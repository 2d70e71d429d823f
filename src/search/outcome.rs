//! Results surfaced to the presentation layer
//!
//! Failures are values here, not log lines: the finder logs them and hands
//! them over, and the presentation decides whether the user sees a message.

use crate::{core::geo::LatLng, providers::GeolocationError, FinderError};

/// How a search attempt ended
#[derive(Debug)]
pub enum SearchOutcome {
    /// Location and places were committed
    Found {
        sequence: u64,
        location: LatLng,
        count: usize,
    },
    /// Nothing changed
    Failed { sequence: u64, error: FinderError },
    /// A newer search started before this one completed; its result was dropped
    Discarded { sequence: u64 },
}

impl SearchOutcome {
    pub fn sequence(&self) -> u64 {
        match self {
            Self::Found { sequence, .. }
            | Self::Failed { sequence, .. }
            | Self::Discarded { sequence } => *sequence,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn error(&self) -> Option<&FinderError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// How a device location request ended
#[derive(Debug, Clone, PartialEq)]
pub enum LocateOutcome {
    Located { sequence: u64, location: LatLng },
    Failed { sequence: u64, error: GeolocationError },
    Discarded { sequence: u64 },
}

impl LocateOutcome {
    pub fn sequence(&self) -> u64 {
        match self {
            Self::Located { sequence, .. }
            | Self::Failed { sequence, .. }
            | Self::Discarded { sequence } => *sequence,
        }
    }
}

/// Completion applied by `BubbleTeaFinder::poll`
#[derive(Debug)]
pub enum FinderEvent {
    Search(SearchOutcome),
    Locate(LocateOutcome),
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Found { count: 0, .. } => write!(f, "No bubble tea nearby"),
            Self::Found { count: 1, .. } => write!(f, "Found 1 place"),
            Self::Found { count, .. } => write!(f, "Found {count} places"),
            Self::Failed {
                error: FinderError::NoResults { address },
                ..
            } => write!(f, "Couldn't find {address:?}"),
            Self::Failed { error, .. } => write!(f, "Search failed: {error}"),
            Self::Discarded { .. } => write!(f, "Superseded by a newer search"),
        }
    }
}
