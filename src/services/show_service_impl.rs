//! `SeaORM` implementation of the `ShowService` trait.

use crate::api::types::{ListingDto, ShowDto, ShowFormDto};
use crate::clock::Clock;
use crate::db::Store;
use crate::domain::{EntityKind, Mutation};
use crate::models::NewShow;
use crate::services::show_service::show_subject;
use crate::services::{BookingError, ShowService, record_mutation};
use std::sync::Arc;
use tracing::warn;

pub struct SeaOrmShowService {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
}

impl SeaOrmShowService {
    #[must_use]
    pub fn new(store: Arc<Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

fn to_listing((id, name): (i32, String)) -> ListingDto {
    ListingDto { id, name }
}

#[async_trait::async_trait]
impl ShowService for SeaOrmShowService {
    async fn list_upcoming(&self) -> Result<Vec<ShowDto>, BookingError> {
        let shows = self.store.list_upcoming_shows(self.clock.now()).await?;
        Ok(shows.into_iter().map(ShowDto::from).collect())
    }

    async fn count_upcoming(&self) -> Result<u64, BookingError> {
        Ok(self.store.count_upcoming_shows(self.clock.now()).await?)
    }

    async fn form_options(&self) -> Result<ShowFormDto, BookingError> {
        let (venues, artists) = tokio::join!(
            self.store.list_venue_names(),
            self.store.list_artist_names()
        );

        Ok(ShowFormDto {
            venues: venues?.into_iter().map(to_listing).collect(),
            artists: artists?.into_iter().map(to_listing).collect(),
        })
    }

    async fn create(&self, show: NewShow) -> Result<ShowDto, BookingError> {
        let (venue, artist) = tokio::join!(
            self.store.get_venue(show.venue_id.value()),
            self.store.get_artist(show.artist_id.value())
        );

        let (Some(venue), Some(artist)) = (venue?, artist?) else {
            return Err(BookingError::UnresolvedReference {
                venue_id: show.venue_id,
                artist_id: show.artist_id,
            });
        };

        let subject = show_subject(&artist.name, &venue.name);
        let result = self.store.add_show(&show).await;
        record_mutation(EntityKind::Show, Mutation::Listed, result.is_ok());

        let id = result.map_err(|e| {
            warn!(
                error = %e,
                venue_id = %show.venue_id,
                artist_id = %show.artist_id,
                "Show insert rolled back"
            );
            BookingError::persistence(subject, Mutation::Listed, e)
        })?;

        Ok(ShowDto {
            id,
            venue_id: venue.id,
            venue_name: venue.name,
            artist_id: artist.id,
            artist_name: artist.name,
            artist_image_link: artist.image_link,
            start_time: show.start_time,
        })
    }
}
