use crate::models::{Artist, ArtistForm, NewShow, Venue, VenueForm};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;
pub mod seed;

pub use repositories::show::ShowListing;
pub use seed::SeedOutcome;

/// Persistence handle shared by services and handlers.
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every in-memory SQLite connection is its own database, so keep exactly one.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn venue_repo(&self) -> repositories::venue::VenueRepository {
        repositories::venue::VenueRepository::new(self.conn.clone())
    }

    fn artist_repo(&self) -> repositories::artist::ArtistRepository {
        repositories::artist::ArtistRepository::new(self.conn.clone())
    }

    fn show_repo(&self) -> repositories::show::ShowRepository {
        repositories::show::ShowRepository::new(self.conn.clone())
    }

    // ------------------------------------------------------------------
    // Venues
    // ------------------------------------------------------------------

    pub async fn get_venue(&self, id: i32) -> Result<Option<Venue>> {
        self.venue_repo().get(id).await
    }

    pub async fn list_venues(&self) -> Result<Vec<Venue>> {
        self.venue_repo().list_all().await
    }

    pub async fn search_venues(&self, term: &str) -> Result<Vec<Venue>> {
        self.venue_repo().search_by_name(term).await
    }

    pub async fn list_recent_venues(&self, limit: u64) -> Result<Vec<Venue>> {
        self.venue_repo().list_recent(limit).await
    }

    pub async fn list_venue_names(&self) -> Result<Vec<(i32, String)>> {
        self.venue_repo().list_names().await
    }

    pub async fn count_venues(&self) -> Result<u64> {
        self.venue_repo().count().await
    }

    pub async fn add_venue(&self, form: &VenueForm) -> Result<Venue> {
        self.venue_repo().add(form).await
    }

    pub async fn update_venue(&self, id: i32, form: &VenueForm) -> Result<Option<Venue>> {
        self.venue_repo().update(id, form).await
    }

    pub async fn remove_venue(&self, id: i32) -> Result<bool> {
        self.venue_repo().remove(id).await
    }

    // ------------------------------------------------------------------
    // Artists
    // ------------------------------------------------------------------

    pub async fn get_artist(&self, id: i32) -> Result<Option<Artist>> {
        self.artist_repo().get(id).await
    }

    pub async fn list_artists(&self) -> Result<Vec<Artist>> {
        self.artist_repo().list_all().await
    }

    pub async fn search_artists(&self, term: &str) -> Result<Vec<Artist>> {
        self.artist_repo().search_by_name(term).await
    }

    pub async fn list_recent_artists(&self, limit: u64) -> Result<Vec<Artist>> {
        self.artist_repo().list_recent(limit).await
    }

    pub async fn list_artist_names(&self) -> Result<Vec<(i32, String)>> {
        self.artist_repo().list_names().await
    }

    pub async fn count_artists(&self) -> Result<u64> {
        self.artist_repo().count().await
    }

    pub async fn add_artist(&self, form: &ArtistForm) -> Result<Artist> {
        self.artist_repo().add(form).await
    }

    pub async fn update_artist(&self, id: i32, form: &ArtistForm) -> Result<Option<Artist>> {
        self.artist_repo().update(id, form).await
    }

    pub async fn remove_artist(&self, id: i32) -> Result<bool> {
        self.artist_repo().remove(id).await
    }

    // ------------------------------------------------------------------
    // Shows
    // ------------------------------------------------------------------

    pub async fn list_upcoming_shows(&self, now: DateTime<Utc>) -> Result<Vec<ShowListing>> {
        self.show_repo().list_upcoming(now).await
    }

    pub async fn list_all_shows(&self) -> Result<Vec<ShowListing>> {
        self.show_repo().list_all().await
    }

    pub async fn list_shows_for_venue(&self, venue_id: i32) -> Result<Vec<ShowListing>> {
        self.show_repo().list_for_venue(venue_id).await
    }

    pub async fn list_shows_for_artist(&self, artist_id: i32) -> Result<Vec<ShowListing>> {
        self.show_repo().list_for_artist(artist_id).await
    }

    pub async fn count_shows(&self) -> Result<u64> {
        self.show_repo().count().await
    }

    pub async fn count_upcoming_shows(&self, now: DateTime<Utc>) -> Result<u64> {
        self.show_repo().count_upcoming(now).await
    }

    pub async fn upcoming_counts_for_venue_ids(
        &self,
        venue_ids: &[i32],
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, u64>> {
        self.show_repo()
            .upcoming_counts_for_venue_ids(venue_ids, now)
            .await
    }

    pub async fn upcoming_counts_for_artist_ids(
        &self,
        artist_ids: &[i32],
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, u64>> {
        self.show_repo()
            .upcoming_counts_for_artist_ids(artist_ids, now)
            .await
    }

    pub async fn add_show(&self, show: &NewShow) -> Result<i32> {
        self.show_repo().add(show).await
    }

    // ------------------------------------------------------------------
    // Setup
    // ------------------------------------------------------------------

    pub async fn seed_if_empty(&self) -> Result<SeedOutcome> {
        seed::seed_if_empty(&self.conn).await
    }
}
