//! List upcoming shows command handler

use std::sync::Arc;

use crate::clock::SystemClock;
use crate::config::Config;
use crate::db::Store;
use crate::services::{SeaOrmShowService, ShowService};

pub async fn cmd_list_shows(config: &Config) -> anyhow::Result<()> {
    let store = Arc::new(Store::new(&config.general.database_path).await?);
    let service = SeaOrmShowService::new(store, Arc::new(SystemClock));
    let shows = service.list_upcoming().await?;

    if shows.is_empty() {
        println!("No upcoming shows.");
        return Ok(());
    }

    println!("Upcoming Shows ({} total)", shows.len());
    println!("{:-<70}", "");

    for show in shows {
        println!(
            "{}  {} @ {}",
            show.start_time.format("%Y-%m-%d %H:%M UTC"),
            show.artist_name,
            show.venue_name
        );
    }

    Ok(())
}
