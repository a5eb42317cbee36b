//! Service-level tests against a fresh SQLite file and a pinned clock.

use chrono::{DateTime, TimeZone, Utc};
use gigbook::clock::FixedClock;
use gigbook::config::Config;
use gigbook::db::SeedOutcome;
use gigbook::domain::{ArtistId, EntityKind, VenueId};
use gigbook::models::{ArtistForm, Genres, NewShow, VenueForm};
use gigbook::services::BookingError;
use gigbook::state::SharedState;
use sea_orm::ConnectionTrait;
use std::collections::{BTreeSet, HashMap};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
}

/// State over a throwaway database file, removed again on drop.
struct TestState {
    state: SharedState,
    db_path: PathBuf,
}

impl Deref for TestState {
    type Target = SharedState;

    fn deref(&self) -> &SharedState {
        &self.state
    }
}

impl Drop for TestState {
    fn drop(&mut self) {
        remove_db_files(&self.db_path);
    }
}

fn remove_db_files(db_path: &Path) {
    for suffix in ["", "-wal", "-shm", "-journal"] {
        let mut file = db_path.as_os_str().to_owned();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

async fn setup() -> TestState {
    let db_path =
        std::env::temp_dir().join(format!("gigbook-service-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());

    let state = SharedState::with_clock(config, Arc::new(FixedClock::new(fixed_now())))
        .await
        .expect("failed to create state");
    TestState { state, db_path }
}

async fn seeded() -> TestState {
    let state = setup().await;
    state.store.seed_if_empty().await.expect("seed failed");
    state
}

fn venue_form(name: &str, city: &str, state: &str) -> VenueForm {
    VenueForm {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        ..Default::default()
    }
}

fn artist_form(name: &str) -> ArtistForm {
    ArtistForm {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        ..Default::default()
    }
}

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

#[tokio::test]
async fn seed_is_idempotent() {
    let state = setup().await;

    let first = state.store.seed_if_empty().await.unwrap();
    assert_eq!(
        first,
        SeedOutcome::Seeded {
            venues: 3,
            artists: 3,
            shows: 4
        }
    );

    let second = state.store.seed_if_empty().await.unwrap();
    assert_eq!(second, SeedOutcome::AlreadyPopulated);

    assert_eq!(state.store.count_venues().await.unwrap(), 3);
    assert_eq!(state.store.count_artists().await.unwrap(), 3);
    assert_eq!(state.store.count_shows().await.unwrap(), 4);
}

#[tokio::test]
async fn seed_skips_store_with_leftover_artists() {
    let state = seeded().await;
    for id in 1..=3 {
        state.venue_service.delete(VenueId::new(id)).await.unwrap();
    }
    assert_eq!(state.store.count_venues().await.unwrap(), 0);
    assert_eq!(state.store.count_shows().await.unwrap(), 0);

    let outcome = state.store.seed_if_empty().await.unwrap();

    assert_eq!(outcome, SeedOutcome::AlreadyPopulated);
    assert_eq!(state.store.count_venues().await.unwrap(), 0);
    assert_eq!(state.store.count_artists().await.unwrap(), 3);
}

#[tokio::test]
async fn venues_group_by_city_and_state() {
    let state = seeded().await;
    state
        .venue_service
        .create(venue_form("Fillmore", "San Francisco", "CA"))
        .await
        .unwrap();
    state
        .venue_service
        .create(venue_form("Crystal Ballroom", "Portland", "OR"))
        .await
        .unwrap();

    let areas = state.venue_service.list_by_area().await.unwrap();
    let all_venues = state.store.list_venues().await.unwrap();

    let mut seen = BTreeSet::new();
    for area in &areas {
        let expected: BTreeSet<i32> = all_venues
            .iter()
            .filter(|v| v.city == area.city && v.state == area.state)
            .map(|v| v.id)
            .collect();
        let actual: BTreeSet<i32> = area.venues.iter().map(|v| v.id).collect();
        assert_eq!(actual, expected, "group {}, {}", area.city, area.state);

        for id in actual {
            assert!(seen.insert(id), "venue {id} appears in two groups");
        }
    }
    assert_eq!(seen.len(), all_venues.len());
    assert_eq!(areas.len(), 3);
}

#[tokio::test]
async fn upcoming_counts_only_future_shows() {
    let state = seeded().await;

    let areas = state.venue_service.list_by_area().await.unwrap();
    let counts: HashMap<i32, u64> = areas
        .iter()
        .flat_map(|a| a.venues.iter().map(|v| (v.id, v.num_upcoming_shows)))
        .collect();

    // Park Square has one past show and two in 2035.
    assert_eq!(counts[&1], 0);
    assert_eq!(counts[&2], 0);
    assert_eq!(counts[&3], 2);

    let venue = state
        .venue_service
        .create(venue_form("The Fillmore", "San Francisco", "CA"))
        .await
        .unwrap();
    for start in [
        "2020-01-01T20:00:00Z",
        "2027-01-01T20:00:00Z",
        "2028-01-01T20:00:00Z",
        "2029-01-01T20:00:00Z",
    ] {
        state
            .show_service
            .create(NewShow {
                venue_id: VenueId::new(venue.id),
                artist_id: ArtistId::new(4),
                start_time: at(start),
            })
            .await
            .unwrap();
    }

    let results = state.venue_service.search("fillmore").await.unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].num_upcoming_shows, 3);
}

#[tokio::test]
async fn search_is_case_insensitive_substring() {
    let state = seeded().await;

    let hop = state.venue_service.search("hop").await.unwrap();
    assert_eq!(hop.count, 1);
    assert_eq!(hop.data[0].name, "The Musical Hop");

    let music = state.venue_service.search("Music").await.unwrap();
    let names: BTreeSet<&str> = music.data.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(
        names,
        BTreeSet::from(["The Musical Hop", "Park Square Live Music & Coffee"])
    );
    assert_eq!(music.count, 2);

    let everything = state.venue_service.search("").await.unwrap();
    assert_eq!(everything.count, 3);

    let artists = state.artist_service.search("A").await.unwrap();
    let names: BTreeSet<&str> = artists.data.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        BTreeSet::from(["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"])
    );

    let band = state.artist_service.search("band").await.unwrap();
    assert_eq!(band.count, 1);
    assert_eq!(band.data[0].num_upcoming_shows, 2);
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    let state = seeded().await;
    state
        .venue_service
        .create(venue_form("100% Jazz", "New York", "NY"))
        .await
        .unwrap();

    let percent = state.venue_service.search("%").await.unwrap();
    assert_eq!(percent.count, 1);
    assert_eq!(percent.data[0].name, "100% Jazz");

    let underscore = state.venue_service.search("_").await.unwrap();
    assert_eq!(underscore.count, 0);
}

#[tokio::test]
async fn search_matches_non_ascii_names() {
    let state = seeded().await;
    state
        .venue_service
        .create(venue_form("Éclair Hall", "Portland", "OR"))
        .await
        .unwrap();

    let exact = state.venue_service.search("Éclair").await.unwrap();
    assert_eq!(exact.count, 1);
    assert_eq!(exact.data[0].name, "Éclair Hall");

    let folded = state.venue_service.search("clair hall").await.unwrap();
    assert_eq!(folded.count, 1);
}

#[tokio::test]
async fn show_creation_requires_existing_venue() {
    let state = seeded().await;

    let err = state
        .show_service
        .create(NewShow {
            venue_id: VenueId::new(999),
            artist_id: ArtistId::new(4),
            start_time: at("2030-01-01T20:00:00Z"),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::UnresolvedReference { .. }));
    assert_eq!(err.to_string(), "Venue id or Artist id not found");
    assert_eq!(state.store.count_shows().await.unwrap(), 4);
}

#[tokio::test]
async fn show_creation_requires_existing_artist() {
    let state = seeded().await;

    let err = state
        .show_service
        .create(NewShow {
            venue_id: VenueId::new(1),
            artist_id: ArtistId::new(999),
            start_time: at("2030-01-01T20:00:00Z"),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::UnresolvedReference { .. }));
    assert_eq!(state.store.count_shows().await.unwrap(), 4);
}

#[tokio::test]
async fn deleting_venue_removes_its_shows() {
    let state = seeded().await;
    let venue = state
        .venue_service
        .create(venue_form("Short Lived", "Austin", "TX"))
        .await
        .unwrap();

    for start in ["2019-01-01T20:00:00Z", "2031-01-01T20:00:00Z"] {
        state
            .show_service
            .create(NewShow {
                venue_id: VenueId::new(venue.id),
                artist_id: ArtistId::new(5),
                start_time: at(start),
            })
            .await
            .unwrap();
    }
    assert_eq!(state.store.count_shows().await.unwrap(), 6);

    let removed = state
        .venue_service
        .delete(VenueId::new(venue.id))
        .await
        .unwrap();
    assert_eq!(removed.name, "Short Lived");

    assert_eq!(state.store.count_shows().await.unwrap(), 4);
    let remaining = state.store.list_all_shows().await.unwrap();
    assert!(remaining.iter().all(|s| s.venue_id != venue.id));
    assert!(state.store.get_venue(venue.id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_artist_removes_its_shows() {
    let state = seeded().await;

    state.artist_service.delete(ArtistId::new(6)).await.unwrap();

    assert_eq!(state.store.count_shows().await.unwrap(), 2);
    let details = state
        .venue_service
        .get_details(VenueId::new(3))
        .await
        .unwrap();
    assert_eq!(details.upcoming_shows_count, 0);
}

#[tokio::test]
async fn deleting_missing_records_is_not_found() {
    let state = seeded().await;

    let err = state
        .venue_service
        .delete(VenueId::new(404))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BookingError::NotFound {
            kind: EntityKind::Venue,
            id: 404
        }
    ));

    let err = state
        .artist_service
        .delete(ArtistId::new(404))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::NotFound { .. }));
}

#[tokio::test]
async fn update_overwrites_every_field() {
    let state = setup().await;

    let created = state
        .venue_service
        .create(VenueForm {
            name: "Old Name".to_string(),
            city: "Old City".to_string(),
            state: "CA".to_string(),
            address: Some("1 Old Street".to_string()),
            phone: Some("111-111-1111".to_string()),
            image_link: Some("https://example.com/old.jpg".to_string()),
            facebook_link: Some("https://facebook.com/old".to_string()),
            genres: ["Jazz", "Blues"].into_iter().collect(),
            website: Some("https://old.example.com".to_string()),
            seeking_talent: true,
            seeking_description: Some("Looking".to_string()),
        })
        .await
        .unwrap();

    let replacement = VenueForm {
        name: "New Name".to_string(),
        city: "New City".to_string(),
        state: "NY".to_string(),
        address: Some("2 New Avenue".to_string()),
        phone: None,
        image_link: Some("https://example.com/new.jpg".to_string()),
        facebook_link: None,
        genres: ["Punk"].into_iter().collect(),
        website: None,
        seeking_talent: false,
        seeking_description: None,
    };

    state
        .venue_service
        .update(VenueId::new(created.id), replacement.clone())
        .await
        .unwrap();

    let form = state
        .venue_service
        .get_form(VenueId::new(created.id))
        .await
        .unwrap();
    assert_eq!(form, replacement);
}

#[tokio::test]
async fn update_of_missing_artist_is_not_found() {
    let state = setup().await;

    let err = state
        .artist_service
        .update(ArtistId::new(12), artist_form("Nobody"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BookingError::NotFound {
            kind: EntityKind::Artist,
            id: 12
        }
    ));
}

#[tokio::test]
async fn details_partition_past_and_upcoming() {
    let state = seeded().await;

    let venue = state
        .venue_service
        .get_details(VenueId::new(3))
        .await
        .unwrap();
    assert_eq!(venue.past_shows_count, 1);
    assert_eq!(venue.upcoming_shows_count, 2);
    assert_eq!(venue.past_shows[0].artist_name, "Matt Quevedo");
    assert_eq!(venue.past_shows[0].start_time, at("2019-06-15T23:00:00Z"));
    assert!(
        venue
            .upcoming_shows
            .iter()
            .all(|s| s.artist_name == "The Wild Sax Band")
    );
    assert_eq!(venue.genres, vec!["Rock n Roll", "Jazz", "Classical", "Folk"]);

    let artist = state
        .artist_service
        .get_details(ArtistId::new(4))
        .await
        .unwrap();
    assert_eq!(artist.past_shows_count, 1);
    assert_eq!(artist.upcoming_shows_count, 0);
    assert_eq!(artist.past_shows[0].venue_name, "The Musical Hop");
    assert!(artist.seeking_venue);
}

#[tokio::test]
async fn show_starting_now_is_neither_past_nor_upcoming() {
    let state = seeded().await;

    state
        .show_service
        .create(NewShow {
            venue_id: VenueId::new(2),
            artist_id: ArtistId::new(5),
            start_time: fixed_now(),
        })
        .await
        .unwrap();

    let venue = state
        .venue_service
        .get_details(VenueId::new(2))
        .await
        .unwrap();
    assert_eq!(venue.past_shows_count, 0);
    assert_eq!(venue.upcoming_shows_count, 0);
}

#[tokio::test]
async fn upcoming_shows_are_ordered_and_enriched() {
    let state = seeded().await;

    let shows = state.show_service.list_upcoming().await.unwrap();
    assert_eq!(shows.len(), 2);
    assert!(shows[0].start_time < shows[1].start_time);
    assert_eq!(shows[0].venue_name, "Park Square Live Music & Coffee");
    assert_eq!(shows[0].artist_name, "The Wild Sax Band");
    assert!(shows[0].artist_image_link.is_some());

    assert_eq!(state.show_service.count_upcoming().await.unwrap(), 2);
}

#[tokio::test]
async fn failed_insert_leaves_no_row() {
    let state = seeded().await;
    state
        .store
        .conn
        .execute_unprepared(
            "CREATE TRIGGER reject_venue_insert BEFORE INSERT ON venues \
             BEGIN SELECT RAISE(ABORT, 'venues are read only'); END;",
        )
        .await
        .unwrap();

    let err = state
        .venue_service
        .create(venue_form("Blocked", "Reno", "NV"))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "An error occurred. Venue Blocked could not be listed."
    );
    assert_eq!(state.store.count_venues().await.unwrap(), 3);
}

#[tokio::test]
async fn failed_update_rolls_back() {
    let state = seeded().await;
    state
        .store
        .conn
        .execute_unprepared(
            "CREATE TRIGGER reject_artist_update BEFORE UPDATE ON artists \
             BEGIN SELECT RAISE(ABORT, 'artists are read only'); END;",
        )
        .await
        .unwrap();

    let err = state
        .artist_service
        .update(ArtistId::new(5), artist_form("Renamed"))
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Persistence { .. }));
    assert_eq!(
        err.to_string(),
        "An error occurred. Artist Matt Quevedo could not be updated."
    );
    let artist = state.store.get_artist(5).await.unwrap().unwrap();
    assert_eq!(artist.name, "Matt Quevedo");
    assert_eq!(artist.city, "New York");
}

#[tokio::test]
async fn failed_cascade_keeps_venue_and_shows() {
    let state = seeded().await;
    state
        .store
        .conn
        .execute_unprepared(
            "CREATE TRIGGER reject_show_delete BEFORE DELETE ON shows \
             BEGIN SELECT RAISE(ABORT, 'shows are read only'); END;",
        )
        .await
        .unwrap();

    let err = state
        .venue_service
        .delete(VenueId::new(3))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "An error occurred. Venue Park Square Live Music & Coffee could not be deleted."
    );
    assert!(state.store.get_venue(3).await.unwrap().is_some());
    assert_eq!(state.store.count_shows().await.unwrap(), 4);
}

#[tokio::test]
async fn failed_show_insert_names_both_sides() {
    let state = seeded().await;
    state
        .store
        .conn
        .execute_unprepared(
            "CREATE TRIGGER reject_show_insert BEFORE INSERT ON shows \
             BEGIN SELECT RAISE(ABORT, 'shows are read only'); END;",
        )
        .await
        .unwrap();

    let err = state
        .show_service
        .create(NewShow {
            venue_id: VenueId::new(1),
            artist_id: ArtistId::new(4),
            start_time: at("2030-01-01T20:00:00Z"),
        })
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "An error occurred. Show of Guns N Petals at The Musical Hop could not be listed."
    );
    assert_eq!(state.store.count_shows().await.unwrap(), 4);
}

#[tokio::test]
async fn genres_round_trip_through_storage() {
    let state = setup().await;

    let genres: Genres = ["Folk", "Soul", "Folk"].into_iter().collect();
    let artist = state
        .artist_service
        .create(ArtistForm {
            genres,
            ..artist_form("Harmonies")
        })
        .await
        .unwrap();

    let stored = state.store.get_artist(artist.id).await.unwrap().unwrap();
    assert_eq!(stored.genres.as_slice(), ["Folk", "Soul"]);
}

#[tokio::test]
async fn recent_listings_are_newest_first() {
    let state = seeded().await;
    state
        .venue_service
        .create(venue_form("Newest", "Denver", "CO"))
        .await
        .unwrap();

    let recent = state.venue_service.recent(2).await.unwrap();
    let names: Vec<&str> = recent.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Newest", "Park Square Live Music & Coffee"]);
}

#[tokio::test]
async fn cli_listings_read_through_services() {
    let state = seeded().await;

    gigbook::cli::cmd_list_venues(state.config()).await.unwrap();
    gigbook::cli::cmd_list_shows(state.config()).await.unwrap();
}
