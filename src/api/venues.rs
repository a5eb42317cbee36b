use axum::{
    Json,
    extract::State,
};
use std::sync::Arc;

use super::extract::RecordId;
use super::validation::validate_venue_form;
use super::{
    ApiError, ApiResponse, AppState, FormDto, MutationDto, SearchRequest, SearchResultsDto,
    VenueAreaDto, VenueDetailDto,
};
use crate::domain::{Mutation, VenueId};
use crate::models::VenueForm;
use crate::services::venue_service::venue_subject;

pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<VenueAreaDto>>>, ApiError> {
    let areas = state.venues().list_by_area().await?;
    Ok(Json(ApiResponse::success(areas)))
}

pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<ApiResponse<SearchResultsDto>>, ApiError> {
    let results = state.venues().search(&payload.search_term).await?;
    Ok(Json(ApiResponse::success(results)))
}

pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ApiResponse<VenueDetailDto>>, ApiError> {
    let venue = state.venues().get_details(VenueId::new(id)).await?;
    Ok(Json(ApiResponse::success(venue)))
}

pub async fn create_venue_form() -> Json<ApiResponse<FormDto<VenueForm>>> {
    Json(ApiResponse::success(FormDto::new(None, VenueForm::default())))
}

pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    Json(form): Json<VenueForm>,
) -> Result<Json<ApiResponse<MutationDto>>, ApiError> {
    validate_venue_form(&form)?;

    let venue = state
        .venues()
        .create(form)
        .await
        .map_err(|e| ApiError::from(e).with_redirect("/"))?;

    let notice = Mutation::Listed.notice(&venue_subject(&venue.name));
    Ok(Json(
        ApiResponse::success(MutationDto { id: venue.id })
            .with_message(notice)
            .with_redirect("/"),
    ))
}

pub async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ApiResponse<FormDto<VenueForm>>>, ApiError> {
    let form = state.venues().get_form(VenueId::new(id)).await?;
    Ok(Json(ApiResponse::success(FormDto::new(Some(id), form))))
}

pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    Json(form): Json<VenueForm>,
) -> Result<Json<ApiResponse<MutationDto>>, ApiError> {
    validate_venue_form(&form)?;

    let venue = state
        .venues()
        .update(VenueId::new(id), form)
        .await
        .map_err(|e| ApiError::from(e).with_redirect(format!("/venues/{id}/edit")))?;

    let notice = Mutation::Updated.notice(&venue_subject(&venue.name));
    Ok(Json(
        ApiResponse::success(MutationDto { id: venue.id })
            .with_message(notice)
            .with_redirect(format!("/venues/{id}")),
    ))
}

pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ApiResponse<MutationDto>>, ApiError> {
    let venue = state
        .venues()
        .delete(VenueId::new(id))
        .await
        .map_err(|e| ApiError::from(e).with_redirect(format!("/venues/{id}")))?;

    let notice = Mutation::Deleted.notice(&venue_subject(&venue.name));
    Ok(Json(
        ApiResponse::success(MutationDto { id: venue.id })
            .with_message(notice)
            .with_redirect("/venues"),
    ))
}
