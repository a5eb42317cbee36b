//! Domain service for venue listings.

use crate::api::types::{
    ListingDto, ListingSummaryDto, SearchResultsDto, VenueAreaDto, VenueDetailDto,
};
use crate::domain::VenueId;
use crate::models::{Venue, VenueForm};
use crate::services::BookingError;
use std::collections::{BTreeMap, HashMap};

/// Domain service trait for venue operations.
///
/// # Examples
///
/// ```rust,ignore
/// use gigbook::services::{BookingError, VenueService};
/// use gigbook::domain::VenueId;
/// use std::sync::Arc;
///
/// async fn example(service: Arc<dyn VenueService>) -> Result<(), BookingError> {
///     let details = service.get_details(VenueId::new(1)).await?;
///     println!("{} upcoming", details.upcoming_shows_count);
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait VenueService: Send + Sync {
    /// Lists every venue grouped by (city, state) with its upcoming show count.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Database`] on connection failures.
    async fn list_by_area(&self) -> Result<Vec<VenueAreaDto>, BookingError>;

    /// Case-insensitive substring search on venue names.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Database`] on connection failures.
    async fn search(&self, term: &str) -> Result<SearchResultsDto, BookingError>;

    /// Full venue record with its shows split into past and upcoming.
    ///
    /// # Errors
    ///
    /// - Returns [`BookingError::NotFound`] if the venue does not exist
    /// - Returns [`BookingError::Database`] on connection failures
    async fn get_details(&self, id: VenueId) -> Result<VenueDetailDto, BookingError>;

    /// Current field values for the edit form.
    ///
    /// # Errors
    ///
    /// - Returns [`BookingError::NotFound`] if the venue does not exist
    /// - Returns [`BookingError::Database`] on connection failures
    async fn get_form(&self, id: VenueId) -> Result<VenueForm, BookingError>;

    /// # Errors
    ///
    /// Returns [`BookingError::Persistence`] if the insert was rolled back.
    async fn create(&self, form: VenueForm) -> Result<Venue, BookingError>;

    /// Overwrites every field of an existing venue.
    ///
    /// # Errors
    ///
    /// - Returns [`BookingError::NotFound`] if the venue does not exist
    /// - Returns [`BookingError::Persistence`] if the update was rolled back
    async fn update(&self, id: VenueId, form: VenueForm) -> Result<Venue, BookingError>;

    /// Deletes a venue and, through the foreign key, all of its shows.
    /// Returns the removed venue.
    ///
    /// # Errors
    ///
    /// - Returns [`BookingError::NotFound`] if the venue does not exist
    /// - Returns [`BookingError::Persistence`] if the delete was rolled back
    async fn delete(&self, id: VenueId) -> Result<Venue, BookingError>;

    /// Most recently listed venues, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Database`] on connection failures.
    async fn recent(&self, limit: u64) -> Result<Vec<ListingDto>, BookingError>;

    /// # Errors
    ///
    /// Returns [`BookingError::Database`] on connection failures.
    async fn count(&self) -> Result<u64, BookingError>;
}

/// Label used in notices, e.g. "Venue The Musical Hop".
#[must_use]
pub fn venue_subject(name: &str) -> String {
    format!("Venue {name}")
}

/// Groups venues by their (city, state) pair.
///
/// Each venue lands in exactly one group; groups come out ordered by state then
/// city and keep the input order of their venues.
#[must_use]
pub fn group_by_location(venues: Vec<Venue>, upcoming: &HashMap<i32, u64>) -> Vec<VenueAreaDto> {
    let mut areas: BTreeMap<(String, String), Vec<ListingSummaryDto>> = BTreeMap::new();

    for venue in venues {
        let summary = ListingSummaryDto {
            id: venue.id,
            num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
            name: venue.name,
        };
        areas
            .entry((venue.state, venue.city))
            .or_default()
            .push(summary);
    }

    areas
        .into_iter()
        .map(|((state, city), venues)| VenueAreaDto {
            city,
            state,
            venues,
        })
        .collect()
}
