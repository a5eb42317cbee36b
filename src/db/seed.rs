//! Sample listings loaded into an empty directory.
//!
//! Runs once at startup (or through `gigbook seed`). The whole load happens in
//! one transaction and only when venues, artists and shows are all empty, so
//! running it again against a store holding any listing is a no-op.

use crate::entities::{artists, prelude::*, shows, venues};
use crate::models::Genres;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded {
        venues: usize,
        artists: usize,
        shows: usize,
    },
    AlreadyPopulated,
}

pub async fn seed_if_empty(conn: &DatabaseConnection) -> Result<SeedOutcome> {
    let txn = conn.begin().await?;

    if !store_is_empty(&txn).await? {
        return Ok(SeedOutcome::AlreadyPopulated);
    }

    let venue_rows = sample_venues();
    let artist_rows = sample_artists();
    let show_rows = sample_shows()?;
    let outcome = SeedOutcome::Seeded {
        venues: venue_rows.len(),
        artists: artist_rows.len(),
        shows: show_rows.len(),
    };

    Venues::insert_many(venue_rows).exec(&txn).await?;
    Artists::insert_many(artist_rows).exec(&txn).await?;
    Shows::insert_many(show_rows).exec(&txn).await?;

    txn.commit().await?;

    info!(?outcome, "Seeded sample listings");
    Ok(outcome)
}

async fn store_is_empty<C: ConnectionTrait>(conn: &C) -> Result<bool> {
    Ok(Venues::find().count(conn).await? == 0
        && Artists::find().count(conn).await? == 0
        && Shows::find().count(conn).await? == 0)
}

fn genres(tags: &[&str]) -> Genres {
    tags.iter().copied().collect()
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn sample_venues() -> Vec<venues::ActiveModel> {
    vec![
        venues::ActiveModel {
            id: Set(1),
            name: Set("The Musical Hop".to_string()),
            city: Set("San Francisco".to_string()),
            state: Set("CA".to_string()),
            address: Set(text("1015 Folsom Street")),
            phone: Set(text("123-123-1234")),
            image_link: Set(text(
                "https://images.unsplash.com/photo-1543900694-133f37abaaa5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=400&q=60",
            )),
            facebook_link: Set(text("https://www.facebook.com/TheMusicalHop")),
            genres: Set(genres(&["Jazz", "Reggae", "Swing", "Classical", "Folk"])),
            website: Set(text("https://www.themusicalhop.com")),
            seeking_talent: Set(true),
            seeking_description: Set(text(
                "We are on the lookout for a local artist to play every two weeks. Please call us.",
            )),
        },
        venues::ActiveModel {
            id: Set(2),
            name: Set("The Dueling Pianos Bar".to_string()),
            city: Set("New York".to_string()),
            state: Set("NY".to_string()),
            address: Set(text("335 Delancey Street")),
            phone: Set(text("914-003-1132")),
            image_link: Set(text(
                "https://images.unsplash.com/photo-1497032205916-ac775f0649ae?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=750&q=80",
            )),
            facebook_link: Set(text("https://www.facebook.com/theduelingpianos")),
            genres: Set(genres(&["Classical", "R&B", "Hip-Hop"])),
            website: Set(text("https://www.theduelingpianos.com")),
            seeking_talent: Set(false),
            seeking_description: Set(None),
        },
        venues::ActiveModel {
            id: Set(3),
            name: Set("Park Square Live Music & Coffee".to_string()),
            city: Set("San Francisco".to_string()),
            state: Set("CA".to_string()),
            address: Set(text("34 Whiskey Moore Ave")),
            phone: Set(text("415-000-1234")),
            image_link: Set(text(
                "https://images.unsplash.com/photo-1485686531765-ba63b07845a7?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=747&q=80",
            )),
            facebook_link: Set(text(
                "https://www.facebook.com/ParkSquareLiveMusicAndCoffee",
            )),
            genres: Set(genres(&["Rock n Roll", "Jazz", "Classical", "Folk"])),
            website: Set(text("https://www.parksquarelivemusicandcoffee.com")),
            seeking_talent: Set(false),
            seeking_description: Set(None),
        },
    ]
}

fn sample_artists() -> Vec<artists::ActiveModel> {
    vec![
        artists::ActiveModel {
            id: Set(4),
            name: Set("Guns N Petals".to_string()),
            city: Set("San Francisco".to_string()),
            state: Set("CA".to_string()),
            phone: Set(text("326-123-5000")),
            genres: Set(genres(&["Rock n Roll"])),
            image_link: Set(text(
                "https://images.unsplash.com/photo-1549213783-8284d0336c4f?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=300&q=80",
            )),
            facebook_link: Set(text("https://www.facebook.com/GunsNPetals")),
            website: Set(text("https://www.gunsnpetalsband.com")),
            seeking_venue: Set(true),
            seeking_description: Set(text(
                "Looking for shows to perform at in the San Francisco Bay Area!",
            )),
        },
        artists::ActiveModel {
            id: Set(5),
            name: Set("Matt Quevedo".to_string()),
            city: Set("New York".to_string()),
            state: Set("NY".to_string()),
            phone: Set(text("300-400-5000")),
            genres: Set(genres(&["Jazz"])),
            image_link: Set(text(
                "https://images.unsplash.com/photo-1495223153807-b916f75de8c5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=334&q=80",
            )),
            facebook_link: Set(text("https://www.facebook.com/mattquevedo923251523")),
            website: Set(None),
            seeking_venue: Set(false),
            seeking_description: Set(None),
        },
        artists::ActiveModel {
            id: Set(6),
            name: Set("The Wild Sax Band".to_string()),
            city: Set("San Francisco".to_string()),
            state: Set("CA".to_string()),
            phone: Set(text("432-325-5432")),
            genres: Set(genres(&["Jazz", "Classical"])),
            image_link: Set(text(
                "https://images.unsplash.com/photo-1558369981-f9ca78462e61?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=794&q=80",
            )),
            facebook_link: Set(None),
            website: Set(None),
            seeking_venue: Set(false),
            seeking_description: Set(None),
        },
    ]
}

/// (venue id, artist id, start time)
const SAMPLE_SHOWS: [(i32, i32, &str); 4] = [
    (1, 4, "2019-05-21T21:30:00Z"),
    (3, 5, "2019-06-15T23:00:00Z"),
    (3, 6, "2035-04-01T20:00:00Z"),
    (3, 6, "2035-04-08T20:00:00Z"),
];

fn sample_shows() -> Result<Vec<shows::ActiveModel>> {
    SAMPLE_SHOWS
        .iter()
        .map(|&(venue_id, artist_id, start)| {
            let start_time = DateTime::parse_from_rfc3339(start)?.with_timezone(&Utc);
            Ok(shows::ActiveModel {
                venue_id: Set(venue_id),
                artist_id: Set(artist_id),
                start_time: Set(start_time),
                ..Default::default()
            })
        })
        .collect()
}
