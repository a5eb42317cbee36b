use axum::{
    Json,
    extract::State,
};
use std::sync::Arc;

use super::extract::RecordId;
use super::validation::validate_artist_form;
use super::{
    ApiError, ApiResponse, AppState, ArtistDetailDto, FormDto, ListingDto, MutationDto,
    SearchRequest, SearchResultsDto,
};
use crate::domain::{ArtistId, Mutation};
use crate::models::ArtistForm;
use crate::services::artist_service::artist_subject;

pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ListingDto>>>, ApiError> {
    let artists = state.artists().list().await?;
    Ok(Json(ApiResponse::success(artists)))
}

pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<ApiResponse<SearchResultsDto>>, ApiError> {
    let results = state.artists().search(&payload.search_term).await?;
    Ok(Json(ApiResponse::success(results)))
}

pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ApiResponse<ArtistDetailDto>>, ApiError> {
    let artist = state.artists().get_details(ArtistId::new(id)).await?;
    Ok(Json(ApiResponse::success(artist)))
}

pub async fn create_artist_form() -> Json<ApiResponse<FormDto<ArtistForm>>> {
    Json(ApiResponse::success(FormDto::new(None, ArtistForm::default())))
}

pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ArtistForm>,
) -> Result<Json<ApiResponse<MutationDto>>, ApiError> {
    validate_artist_form(&form)?;

    let artist = state
        .artists()
        .create(form)
        .await
        .map_err(|e| ApiError::from(e).with_redirect("/"))?;

    let notice = Mutation::Listed.notice(&artist_subject(&artist.name));
    Ok(Json(
        ApiResponse::success(MutationDto { id: artist.id })
            .with_message(notice)
            .with_redirect("/"),
    ))
}

pub async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ApiResponse<FormDto<ArtistForm>>>, ApiError> {
    let form = state.artists().get_form(ArtistId::new(id)).await?;
    Ok(Json(ApiResponse::success(FormDto::new(Some(id), form))))
}

pub async fn update_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    Json(form): Json<ArtistForm>,
) -> Result<Json<ApiResponse<MutationDto>>, ApiError> {
    validate_artist_form(&form)?;

    let artist = state
        .artists()
        .update(ArtistId::new(id), form)
        .await
        .map_err(|e| ApiError::from(e).with_redirect(format!("/artists/{id}/edit")))?;

    let notice = Mutation::Updated.notice(&artist_subject(&artist.name));
    Ok(Json(
        ApiResponse::success(MutationDto { id: artist.id })
            .with_message(notice)
            .with_redirect(format!("/artists/{id}")),
    ))
}

pub async fn delete_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ApiResponse<MutationDto>>, ApiError> {
    let artist = state
        .artists()
        .delete(ArtistId::new(id))
        .await
        .map_err(|e| ApiError::from(e).with_redirect(format!("/artists/{id}")))?;

    let notice = Mutation::Deleted.notice(&artist_subject(&artist.name));
    Ok(Json(
        ApiResponse::success(MutationDto { id: artist.id })
            .with_message(notice)
            .with_redirect("/artists"),
    ))
}
