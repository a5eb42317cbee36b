//! Domain service for shows.

use crate::api::types::{ShowDto, ShowFormDto};
use crate::models::NewShow;
use crate::services::BookingError;

/// Domain service trait for show operations.
///
/// Shows are only ever listed and created; they go away with their venue or artist.
#[async_trait::async_trait]
pub trait ShowService: Send + Sync {
    /// Shows starting after now, earliest first.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Database`] on connection failures.
    async fn list_upcoming(&self) -> Result<Vec<ShowDto>, BookingError>;

    /// # Errors
    ///
    /// Returns [`BookingError::Database`] on connection failures.
    async fn count_upcoming(&self) -> Result<u64, BookingError>;

    /// Venues and artists a new show can be booked between.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Database`] on connection failures.
    async fn form_options(&self) -> Result<ShowFormDto, BookingError>;

    /// Books a show after checking that both its venue and artist exist.
    ///
    /// # Errors
    ///
    /// - Returns [`BookingError::UnresolvedReference`] if either id is unknown;
    ///   nothing is written in that case
    /// - Returns [`BookingError::Persistence`] if the insert was rolled back
    async fn create(&self, show: NewShow) -> Result<ShowDto, BookingError>;
}

/// Label used in notices, e.g. "Show of Guns N Petals at The Musical Hop".
#[must_use]
pub fn show_subject(artist_name: &str, venue_name: &str) -> String {
    format!("Show of {artist_name} at {venue_name}")
}
