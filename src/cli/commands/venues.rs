//! List venues command handler

use std::sync::Arc;

use crate::clock::SystemClock;
use crate::config::Config;
use crate::db::Store;
use crate::services::{SeaOrmVenueService, VenueService};

pub async fn cmd_list_venues(config: &Config) -> anyhow::Result<()> {
    let store = Arc::new(Store::new(&config.general.database_path).await?);
    let service = SeaOrmVenueService::new(store, Arc::new(SystemClock));
    let areas = service.list_by_area().await?;

    if areas.is_empty() {
        println!("No venues listed.");
        println!();
        println!("Load sample data with: gigbook seed");
        return Ok(());
    }

    for area in areas {
        println!("{}, {}", area.city, area.state);
        println!("{:-<70}", "");
        for venue in area.venues {
            println!(
                "  [{}] {} ({} upcoming)",
                venue.id, venue.name, venue.num_upcoming_shows
            );
        }
        println!();
    }

    Ok(())
}
