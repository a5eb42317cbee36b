use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ArtistId, VenueId};

/// A validated show submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShow {
    pub venue_id: VenueId,
    pub artist_id: ArtistId,
    pub start_time: DateTime<Utc>,
}

/// Where a show sits relative to the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTiming {
    Past,
    /// Starts exactly now: neither past nor upcoming.
    Current,
    Upcoming,
}

impl ShowTiming {
    #[must_use]
    pub fn classify(start_time: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        match start_time.cmp(&now) {
            std::cmp::Ordering::Less => Self::Past,
            std::cmp::Ordering::Equal => Self::Current,
            std::cmp::Ordering::Greater => Self::Upcoming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn classification_is_strict_on_both_sides() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap();
        let future = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();

        assert_eq!(ShowTiming::classify(past, now), ShowTiming::Past);
        assert_eq!(ShowTiming::classify(future, now), ShowTiming::Upcoming);
        assert_eq!(ShowTiming::classify(now, now), ShowTiming::Current);
    }
}
