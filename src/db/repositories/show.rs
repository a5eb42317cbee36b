use crate::entities::{artists, prelude::*, shows, venues};
use crate::models::NewShow;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
    TransactionTrait,
};
use std::collections::HashMap;
use tracing::info;

/// Repository for show operations
pub struct ShowRepository {
    conn: DatabaseConnection,
}

impl ShowRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Shows joined with the venue and artist they link, earliest first.
    fn listing_query() -> Select<Shows> {
        Shows::find()
            .select_only()
            .column(shows::Column::Id)
            .column(shows::Column::VenueId)
            .column_as(venues::Column::Name, "venue_name")
            .column_as(venues::Column::ImageLink, "venue_image_link")
            .column(shows::Column::ArtistId)
            .column_as(artists::Column::Name, "artist_name")
            .column_as(artists::Column::ImageLink, "artist_image_link")
            .column(shows::Column::StartTime)
            .join(JoinType::InnerJoin, shows::Relation::Venue.def())
            .join(JoinType::InnerJoin, shows::Relation::Artist.def())
            .order_by_asc(shows::Column::StartTime)
    }

    pub async fn list_upcoming(&self, now: DateTime<Utc>) -> Result<Vec<ShowListing>> {
        let rows = Self::listing_query()
            .filter(shows::Column::StartTime.gt(now))
            .into_model::<ShowListing>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn list_for_venue(&self, venue_id: i32) -> Result<Vec<ShowListing>> {
        let rows = Self::listing_query()
            .filter(shows::Column::VenueId.eq(venue_id))
            .into_model::<ShowListing>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn list_for_artist(&self, artist_id: i32) -> Result<Vec<ShowListing>> {
        let rows = Self::listing_query()
            .filter(shows::Column::ArtistId.eq(artist_id))
            .into_model::<ShowListing>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn list_all(&self) -> Result<Vec<ShowListing>> {
        let rows = Self::listing_query()
            .into_model::<ShowListing>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Shows::find().count(&self.conn).await?)
    }

    pub async fn count_upcoming(&self, now: DateTime<Utc>) -> Result<u64> {
        let count = Shows::find()
            .filter(shows::Column::StartTime.gt(now))
            .count(&self.conn)
            .await?;

        Ok(count)
    }

    pub async fn upcoming_counts_for_venue_ids(
        &self,
        venue_ids: &[i32],
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, u64>> {
        self.upcoming_counts(shows::Column::VenueId, venue_ids, now)
            .await
    }

    pub async fn upcoming_counts_for_artist_ids(
        &self,
        artist_ids: &[i32],
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, u64>> {
        self.upcoming_counts(shows::Column::ArtistId, artist_ids, now)
            .await
    }

    async fn upcoming_counts(
        &self,
        owner: shows::Column,
        ids: &[i32],
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, u64>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let results: Vec<(i32, i64)> = Shows::find()
            .select_only()
            .column(owner)
            .column_as(shows::Column::Id.count(), "count")
            .filter(owner.is_in(ids.to_vec()))
            .filter(shows::Column::StartTime.gt(now))
            .group_by(owner)
            .into_tuple()
            .all(&self.conn)
            .await?;

        let mut map = HashMap::new();
        for (id, count) in results {
            map.insert(id, u64::try_from(count).unwrap_or_default());
        }

        Ok(map)
    }

    pub async fn add(&self, show: &NewShow) -> Result<i32> {
        let txn = self.conn.begin().await?;

        let model = shows::ActiveModel {
            venue_id: Set(show.venue_id.value()),
            artist_id: Set(show.artist_id.value()),
            start_time: Set(show.start_time),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            "Added show {} (venue {}, artist {}) at {}",
            model.id, model.venue_id, model.artist_id, model.start_time
        );
        Ok(model.id)
    }
}

// ============================================================================
// Data Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct ShowListing {
    pub id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}
