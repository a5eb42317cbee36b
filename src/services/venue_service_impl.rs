//! `SeaORM` implementation of the `VenueService` trait.

use crate::api::types::{
    ListingDto, ListingSummaryDto, SearchResultsDto, VenueAreaDto, VenueDetailDto, VenueShowDto,
};
use crate::clock::Clock;
use crate::db::Store;
use crate::domain::{EntityKind, Mutation, VenueId};
use crate::models::{Venue, VenueForm};
use crate::services::venue_service::{group_by_location, venue_subject};
use crate::services::{BookingError, VenueService, partition_shows, record_mutation};
use std::sync::Arc;
use tracing::warn;

pub struct SeaOrmVenueService {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
}

impl SeaOrmVenueService {
    #[must_use]
    pub fn new(store: Arc<Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    async fn resolve(&self, id: VenueId) -> Result<Venue, BookingError> {
        self.store
            .get_venue(id.value())
            .await?
            .ok_or_else(|| BookingError::venue_not_found(id))
    }
}

#[async_trait::async_trait]
impl VenueService for SeaOrmVenueService {
    async fn list_by_area(&self) -> Result<Vec<VenueAreaDto>, BookingError> {
        let venues = self.store.list_venues().await?;
        let ids: Vec<i32> = venues.iter().map(|v| v.id).collect();
        let upcoming = self
            .store
            .upcoming_counts_for_venue_ids(&ids, self.clock.now())
            .await?;

        Ok(group_by_location(venues, &upcoming))
    }

    async fn search(&self, term: &str) -> Result<SearchResultsDto, BookingError> {
        let term = term.trim();
        let venues = self.store.search_venues(term).await?;
        let ids: Vec<i32> = venues.iter().map(|v| v.id).collect();
        let upcoming = self
            .store
            .upcoming_counts_for_venue_ids(&ids, self.clock.now())
            .await?;

        let data: Vec<ListingSummaryDto> = venues
            .into_iter()
            .map(|v| ListingSummaryDto {
                num_upcoming_shows: upcoming.get(&v.id).copied().unwrap_or(0),
                id: v.id,
                name: v.name,
            })
            .collect();

        Ok(SearchResultsDto {
            count: data.len(),
            data,
            search_term: term.to_string(),
        })
    }

    async fn get_details(&self, id: VenueId) -> Result<VenueDetailDto, BookingError> {
        let venue = self.resolve(id).await?;
        let shows = self.store.list_shows_for_venue(venue.id).await?;

        let (past_shows, upcoming_shows) = partition_shows(shows, self.clock.now(), |s| {
            VenueShowDto {
                artist_id: s.artist_id,
                artist_name: s.artist_name,
                artist_image_link: s.artist_image_link,
                start_time: s.start_time,
            }
        });

        Ok(VenueDetailDto {
            id: venue.id,
            name: venue.name,
            genres: venue.genres.into(),
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }

    async fn get_form(&self, id: VenueId) -> Result<VenueForm, BookingError> {
        Ok(self.resolve(id).await?.into())
    }

    async fn create(&self, form: VenueForm) -> Result<Venue, BookingError> {
        let subject = venue_subject(&form.name);
        let result = self.store.add_venue(&form).await;
        record_mutation(EntityKind::Venue, Mutation::Listed, result.is_ok());

        result.map_err(|e| {
            warn!(error = %e, venue = %form.name, "Venue insert rolled back");
            BookingError::persistence(subject, Mutation::Listed, e)
        })
    }

    async fn update(&self, id: VenueId, form: VenueForm) -> Result<Venue, BookingError> {
        let existing = self.resolve(id).await?;
        let subject = venue_subject(&existing.name);

        let result = self.store.update_venue(id.value(), &form).await;
        record_mutation(EntityKind::Venue, Mutation::Updated, result.is_ok());

        match result {
            Ok(Some(venue)) => Ok(venue),
            Ok(None) => Err(BookingError::venue_not_found(id)),
            Err(e) => {
                warn!(error = %e, venue_id = %id, "Venue update rolled back");
                Err(BookingError::persistence(subject, Mutation::Updated, e))
            }
        }
    }

    async fn delete(&self, id: VenueId) -> Result<Venue, BookingError> {
        let venue = self.resolve(id).await?;
        let subject = venue_subject(&venue.name);

        let result = self.store.remove_venue(id.value()).await;
        record_mutation(EntityKind::Venue, Mutation::Deleted, result.is_ok());

        match result {
            Ok(true) => Ok(venue),
            Ok(false) => Err(BookingError::venue_not_found(id)),
            Err(e) => {
                warn!(error = %e, venue_id = %id, "Venue delete rolled back");
                Err(BookingError::persistence(subject, Mutation::Deleted, e))
            }
        }
    }

    async fn recent(&self, limit: u64) -> Result<Vec<ListingDto>, BookingError> {
        let venues = self.store.list_recent_venues(limit).await?;
        Ok(venues
            .into_iter()
            .map(|v| ListingDto {
                id: v.id,
                name: v.name,
            })
            .collect())
    }

    async fn count(&self) -> Result<u64, BookingError> {
        Ok(self.store.count_venues().await?)
    }
}
