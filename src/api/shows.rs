use axum::{Json, extract::State};
use std::sync::Arc;

use super::validation::parse_start_time;
use super::{ApiError, ApiResponse, AppState, CreateShowRequest, ShowDto, ShowFormDto};
use crate::domain::{ArtistId, Mutation, VenueId};
use crate::models::NewShow;
use crate::services::show_service::show_subject;

pub async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ShowDto>>>, ApiError> {
    let shows = state.shows().list_upcoming().await?;
    Ok(Json(ApiResponse::success(shows)))
}

pub async fn create_show_form(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<ShowFormDto>>, ApiError> {
    let options = state.shows().form_options().await?;
    Ok(Json(ApiResponse::success(options)))
}

pub async fn create_show(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateShowRequest>,
) -> Result<Json<ApiResponse<ShowDto>>, ApiError> {
    let show = NewShow {
        venue_id: VenueId::new(payload.venue_id),
        artist_id: ArtistId::new(payload.artist_id),
        start_time: parse_start_time(&payload.start_time)?,
    };

    let created = state
        .shows()
        .create(show)
        .await
        .map_err(|e| ApiError::from(e).with_redirect("/"))?;

    let notice = Mutation::Listed.notice(&show_subject(&created.artist_name, &created.venue_name));
    Ok(Json(
        ApiResponse::success(created)
            .with_message(notice)
            .with_redirect("/"),
    ))
}
