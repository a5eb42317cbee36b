use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, HomeDto};
use crate::constants::limits::RECENT_LISTINGS;

pub async fn index(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HomeDto>>, ApiError> {
    let (venue_count, artist_count, upcoming_show_count, recent_venues, recent_artists) = tokio::join!(
        state.venues().count(),
        state.artists().count(),
        state.shows().count_upcoming(),
        state.venues().recent(RECENT_LISTINGS),
        state.artists().recent(RECENT_LISTINGS),
    );

    Ok(Json(ApiResponse::success(HomeDto {
        venue_count: venue_count?,
        artist_count: artist_count?,
        upcoming_show_count: upcoming_show_count?,
        recent_venues: recent_venues?,
        recent_artists: recent_artists?,
    })))
}
