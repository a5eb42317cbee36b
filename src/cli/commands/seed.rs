//! Seed command handler

use crate::config::Config;
use crate::db::{SeedOutcome, Store};

pub async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    match store.seed_if_empty().await? {
        SeedOutcome::Seeded {
            venues,
            artists,
            shows,
        } => {
            println!("Seeded {venues} venues, {artists} artists and {shows} shows.");
        }
        SeedOutcome::AlreadyPopulated => {
            println!("Database already has venues; nothing to seed.");
        }
    }

    Ok(())
}
