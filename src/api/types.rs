use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response envelope shared by every endpoint.
///
/// `message` carries the one-line notice shown after a mutation and `redirect`
/// names the view the client should go to next.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            redirect: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            message: None,
            redirect: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_redirect(mut self, path: impl Into<String>) -> Self {
        self.redirect = Some(path.into());
        self
    }
}

/// Id and name of a listing.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ListingDto {
    pub id: i32,
    pub name: String,
}

/// A venue or artist with its upcoming show count.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ListingSummaryDto {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct VenueAreaDto {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListingSummaryDto>,
}

#[derive(Debug, Serialize, Clone)]
pub struct SearchResultsDto {
    pub count: usize,
    pub data: Vec<ListingSummaryDto>,
    pub search_term: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SearchRequest {
    pub search_term: String,
}

/// A show as seen from its venue's page.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct VenueShowDto {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A show as seen from its artist's page.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ArtistShowDto {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct VenueDetailDto {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: Option<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShowDto>,
    pub upcoming_shows: Vec<VenueShowDto>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Serialize, Clone)]
pub struct ArtistDetailDto {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShowDto>,
    pub upcoming_shows: Vec<ArtistShowDto>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ShowDto {
    pub id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<crate::db::ShowListing> for ShowDto {
    fn from(show: crate::db::ShowListing) -> Self {
        Self {
            id: show.id,
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: show.start_time,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateShowRequest {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: String,
}

/// Form view-model: current field values plus the choice lists to pick from.
#[derive(Debug, Serialize)]
pub struct FormDto<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub form: T,
    pub genre_choices: &'static [&'static str],
    pub state_choices: &'static [&'static str],
}

impl<T> FormDto<T> {
    pub const fn new(id: Option<i32>, form: T) -> Self {
        Self {
            id,
            form,
            genre_choices: crate::constants::GENRE_CHOICES,
            state_choices: crate::constants::STATE_CHOICES,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShowFormDto {
    pub venues: Vec<ListingDto>,
    pub artists: Vec<ListingDto>,
}

/// Identifies the row a mutation touched.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct MutationDto {
    pub id: i32,
}

#[derive(Debug, Serialize)]
pub struct HomeDto {
    pub venue_count: u64,
    pub artist_count: u64,
    pub upcoming_show_count: u64,
    pub recent_venues: Vec<ListingDto>,
    pub recent_artists: Vec<ListingDto>,
}
