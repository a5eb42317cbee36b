use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    ArtistService, SeaOrmArtistService, SeaOrmShowService, SeaOrmVenueService, ShowService,
    VenueService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub venue_service: Arc<dyn VenueService>,

    pub artist_service: Arc<dyn ArtistService>,

    pub show_service: Arc<dyn ShowService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock)).await
    }

    /// Builds the state against an explicit clock. Tests pin "now" this way.
    pub async fn with_clock(config: Config, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::from_parts(config, store, clock))
    }

    #[must_use]
    pub fn from_parts(config: Config, store: Store, clock: Arc<dyn Clock>) -> Self {
        let store_arc = Arc::new(store.clone());

        let venue_service = Arc::new(SeaOrmVenueService::new(store_arc.clone(), clock.clone()))
            as Arc<dyn VenueService + Send + Sync + 'static>;

        let artist_service = Arc::new(SeaOrmArtistService::new(store_arc.clone(), clock.clone()))
            as Arc<dyn ArtistService + Send + Sync + 'static>;

        let show_service = Arc::new(SeaOrmShowService::new(store_arc, clock))
            as Arc<dyn ShowService + Send + Sync + 'static>;

        Self {
            config: Arc::new(config),
            store,
            venue_service,
            artist_service,
            show_service,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
