//! Error type shared by the booking services.

use crate::domain::{ArtistId, EntityKind, Mutation, VenueId};
use thiserror::Error;

/// Domain errors for venue, artist and show operations.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i32 },

    /// A show submission named a venue or artist that does not exist.
    #[error("Venue id or Artist id not found")]
    UnresolvedReference {
        venue_id: VenueId,
        artist_id: ArtistId,
    },

    /// A write was attempted and rolled back.
    #[error("An error occurred. {subject} could not be {action}.")]
    Persistence {
        subject: String,
        action: Mutation,
        reason: String,
    },

    #[error("Database error: {0}")]
    Database(String),
}

impl BookingError {
    #[must_use]
    pub const fn venue_not_found(id: VenueId) -> Self {
        Self::NotFound {
            kind: EntityKind::Venue,
            id: id.value(),
        }
    }

    #[must_use]
    pub const fn artist_not_found(id: ArtistId) -> Self {
        Self::NotFound {
            kind: EntityKind::Artist,
            id: id.value(),
        }
    }

    pub fn persistence(subject: impl Into<String>, action: Mutation, reason: impl ToString) -> Self {
        Self::Persistence {
            subject: subject.into(),
            action,
            reason: reason.to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for BookingError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for BookingError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}
