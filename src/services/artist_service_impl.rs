//! `SeaORM` implementation of the `ArtistService` trait.

use crate::api::types::{
    ArtistDetailDto, ArtistShowDto, ListingDto, ListingSummaryDto, SearchResultsDto,
};
use crate::clock::Clock;
use crate::db::Store;
use crate::domain::{ArtistId, EntityKind, Mutation};
use crate::models::{Artist, ArtistForm};
use crate::services::artist_service::artist_subject;
use crate::services::{ArtistService, BookingError, partition_shows, record_mutation};
use std::sync::Arc;
use tracing::warn;

pub struct SeaOrmArtistService {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
}

impl SeaOrmArtistService {
    #[must_use]
    pub fn new(store: Arc<Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    async fn resolve(&self, id: ArtistId) -> Result<Artist, BookingError> {
        self.store
            .get_artist(id.value())
            .await?
            .ok_or_else(|| BookingError::artist_not_found(id))
    }
}

#[async_trait::async_trait]
impl ArtistService for SeaOrmArtistService {
    async fn list(&self) -> Result<Vec<ListingDto>, BookingError> {
        let artists = self.store.list_artists().await?;
        Ok(artists
            .into_iter()
            .map(|a| ListingDto {
                id: a.id,
                name: a.name,
            })
            .collect())
    }

    async fn search(&self, term: &str) -> Result<SearchResultsDto, BookingError> {
        let term = term.trim();
        let artists = self.store.search_artists(term).await?;
        let ids: Vec<i32> = artists.iter().map(|a| a.id).collect();
        let upcoming = self
            .store
            .upcoming_counts_for_artist_ids(&ids, self.clock.now())
            .await?;

        let data: Vec<ListingSummaryDto> = artists
            .into_iter()
            .map(|a| ListingSummaryDto {
                num_upcoming_shows: upcoming.get(&a.id).copied().unwrap_or(0),
                id: a.id,
                name: a.name,
            })
            .collect();

        Ok(SearchResultsDto {
            count: data.len(),
            data,
            search_term: term.to_string(),
        })
    }

    async fn get_details(&self, id: ArtistId) -> Result<ArtistDetailDto, BookingError> {
        let artist = self.resolve(id).await?;
        let shows = self.store.list_shows_for_artist(artist.id).await?;

        let (past_shows, upcoming_shows) = partition_shows(shows, self.clock.now(), |s| {
            ArtistShowDto {
                venue_id: s.venue_id,
                venue_name: s.venue_name,
                venue_image_link: s.venue_image_link,
                start_time: s.start_time,
            }
        });

        Ok(ArtistDetailDto {
            id: artist.id,
            name: artist.name,
            genres: artist.genres.into(),
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }

    async fn get_form(&self, id: ArtistId) -> Result<ArtistForm, BookingError> {
        Ok(self.resolve(id).await?.into())
    }

    async fn create(&self, form: ArtistForm) -> Result<Artist, BookingError> {
        let subject = artist_subject(&form.name);
        let result = self.store.add_artist(&form).await;
        record_mutation(EntityKind::Artist, Mutation::Listed, result.is_ok());

        result.map_err(|e| {
            warn!(error = %e, artist = %form.name, "Artist insert rolled back");
            BookingError::persistence(subject, Mutation::Listed, e)
        })
    }

    async fn update(&self, id: ArtistId, form: ArtistForm) -> Result<Artist, BookingError> {
        let existing = self.resolve(id).await?;
        let subject = artist_subject(&existing.name);

        let result = self.store.update_artist(id.value(), &form).await;
        record_mutation(EntityKind::Artist, Mutation::Updated, result.is_ok());

        match result {
            Ok(Some(artist)) => Ok(artist),
            Ok(None) => Err(BookingError::artist_not_found(id)),
            Err(e) => {
                warn!(error = %e, artist_id = %id, "Artist update rolled back");
                Err(BookingError::persistence(subject, Mutation::Updated, e))
            }
        }
    }

    async fn delete(&self, id: ArtistId) -> Result<Artist, BookingError> {
        let artist = self.resolve(id).await?;
        let subject = artist_subject(&artist.name);

        let result = self.store.remove_artist(id.value()).await;
        record_mutation(EntityKind::Artist, Mutation::Deleted, result.is_ok());

        match result {
            Ok(true) => Ok(artist),
            Ok(false) => Err(BookingError::artist_not_found(id)),
            Err(e) => {
                warn!(error = %e, artist_id = %id, "Artist delete rolled back");
                Err(BookingError::persistence(subject, Mutation::Deleted, e))
            }
        }
    }

    async fn recent(&self, limit: u64) -> Result<Vec<ListingDto>, BookingError> {
        let artists = self.store.list_recent_artists(limit).await?;
        Ok(artists
            .into_iter()
            .map(|a| ListingDto {
                id: a.id,
                name: a.name,
            })
            .collect())
    }

    async fn count(&self) -> Result<u64, BookingError> {
        Ok(self.store.count_artists().await?)
    }
}
