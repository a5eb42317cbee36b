//! Domain service for artist listings.

use crate::api::types::{ArtistDetailDto, ListingDto, SearchResultsDto};
use crate::domain::ArtistId;
use crate::models::{Artist, ArtistForm};
use crate::services::BookingError;

/// Domain service trait for artist operations.
///
/// Mirrors [`crate::services::VenueService`] except that artists are listed flat
/// rather than grouped by location.
#[async_trait::async_trait]
pub trait ArtistService: Send + Sync {
    /// Id and name of every artist, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Database`] on connection failures.
    async fn list(&self) -> Result<Vec<ListingDto>, BookingError>;

    /// # Errors
    ///
    /// Returns [`BookingError::Database`] on connection failures.
    async fn search(&self, term: &str) -> Result<SearchResultsDto, BookingError>;

    /// # Errors
    ///
    /// - Returns [`BookingError::NotFound`] if the artist does not exist
    /// - Returns [`BookingError::Database`] on connection failures
    async fn get_details(&self, id: ArtistId) -> Result<ArtistDetailDto, BookingError>;

    /// # Errors
    ///
    /// - Returns [`BookingError::NotFound`] if the artist does not exist
    /// - Returns [`BookingError::Database`] on connection failures
    async fn get_form(&self, id: ArtistId) -> Result<ArtistForm, BookingError>;

    /// # Errors
    ///
    /// Returns [`BookingError::Persistence`] if the insert was rolled back.
    async fn create(&self, form: ArtistForm) -> Result<Artist, BookingError>;

    /// # Errors
    ///
    /// - Returns [`BookingError::NotFound`] if the artist does not exist
    /// - Returns [`BookingError::Persistence`] if the update was rolled back
    async fn update(&self, id: ArtistId, form: ArtistForm) -> Result<Artist, BookingError>;

    /// Deletes an artist together with its shows. Returns the removed artist.
    ///
    /// # Errors
    ///
    /// - Returns [`BookingError::NotFound`] if the artist does not exist
    /// - Returns [`BookingError::Persistence`] if the delete was rolled back
    async fn delete(&self, id: ArtistId) -> Result<Artist, BookingError>;

    /// # Errors
    ///
    /// Returns [`BookingError::Database`] on connection failures.
    async fn recent(&self, limit: u64) -> Result<Vec<ListingDto>, BookingError>;

    /// # Errors
    ///
    /// Returns [`BookingError::Database`] on connection failures.
    async fn count(&self) -> Result<u64, BookingError>;
}

#[must_use]
pub fn artist_subject(name: &str) -> String {
    format!("Artist {name}")
}
