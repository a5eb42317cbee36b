pub mod error;
pub use error::BookingError;

pub mod venue_service;
pub mod venue_service_impl;
pub use venue_service::VenueService;
pub use venue_service_impl::SeaOrmVenueService;

pub mod artist_service;
pub mod artist_service_impl;
pub use artist_service::ArtistService;
pub use artist_service_impl::SeaOrmArtistService;

pub mod show_service;
pub mod show_service_impl;
pub use show_service::ShowService;
pub use show_service_impl::SeaOrmShowService;

use crate::db::ShowListing;
use crate::domain::{EntityKind, Mutation};
use crate::models::ShowTiming;
use chrono::{DateTime, Utc};

/// Counts a write attempt under `gigbook_mutations_total`.
pub(crate) fn record_mutation(entity: EntityKind, action: Mutation, succeeded: bool) {
    let outcome = if succeeded { "success" } else { "failure" };
    metrics::counter!(
        "gigbook_mutations_total",
        "entity" => entity.as_str(),
        "action" => action.action(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Splits `shows` into (past, upcoming) relative to `now`, keeping their order.
///
/// A show starting exactly at `now` lands in neither list.
pub(crate) fn partition_shows<T>(
    shows: Vec<ShowListing>,
    now: DateTime<Utc>,
    project: impl Fn(ShowListing) -> T,
) -> (Vec<T>, Vec<T>) {
    let mut past = Vec::new();
    let mut upcoming = Vec::new();

    for show in shows {
        match ShowTiming::classify(show.start_time, now) {
            ShowTiming::Past => past.push(project(show)),
            ShowTiming::Upcoming => upcoming.push(project(show)),
            ShowTiming::Current => {}
        }
    }

    (past, upcoming)
}
