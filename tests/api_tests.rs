use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use gigbook::config::Config;
use gigbook::state::SharedState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

/// Removes the test database file (and its SQLite side files) on drop.
struct TempDb(PathBuf);

impl Drop for TempDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.0.as_os_str().to_owned();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

async fn spawn_app() -> (Arc<gigbook::api::AppState>, Router, TempDb) {
    let db_path =
        std::env::temp_dir().join(format!("gigbook-api-test-{}.db", uuid::Uuid::new_v4()));
    let db = TempDb(db_path.clone());

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());

    let shared = SharedState::new(config)
        .await
        .expect("failed to create shared state");
    shared.store.seed_if_empty().await.expect("seed failed");

    let state = gigbook::api::create_app_state(Arc::new(shared), None);
    let router = gigbook::api::router(state.clone());
    (state, router, db)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_home() {
    let (_state, app, _db) = spawn_app().await;

    let (status, body) = send(&app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["venue_count"], 3);
    assert_eq!(body["data"]["artist_count"], 3);
    assert_eq!(body["data"]["upcoming_show_count"], 2);
    assert_eq!(body["data"]["recent_venues"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["recent_artists"][0]["name"], "The Wild Sax Band");
}

#[tokio::test]
async fn test_list_venues_grouped() {
    let (_state, app, _db) = spawn_app().await;

    let (status, body) = send(&app, get("/venues")).await;
    assert_eq!(status, StatusCode::OK);

    let areas = body["data"].as_array().unwrap();
    assert_eq!(areas.len(), 2);

    let sf = areas
        .iter()
        .find(|a| a["city"] == "San Francisco")
        .expect("missing San Francisco");
    assert_eq!(sf["state"], "CA");
    assert_eq!(sf["venues"].as_array().unwrap().len(), 2);

    let park_square = sf["venues"]
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["id"] == 3)
        .unwrap();
    assert_eq!(park_square["num_upcoming_shows"], 2);
}

#[tokio::test]
async fn test_search_venues_and_artists() {
    let (_state, app, _db) = spawn_app().await;

    let (status, body) = send(&app, post_json("/venues/search", &json!({"search_term": "Music"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(body["data"]["search_term"], "Music");

    let (_, body) = send(&app, post_json("/venues/search", &json!({}))).await;
    assert_eq!(body["data"]["count"], 3);

    let (_, body) = send(&app, post_json("/artists/search", &json!({"search_term": "GUNS"}))).await;
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["data"][0]["name"], "Guns N Petals");
}

#[tokio::test]
async fn test_venue_detail_and_not_found() {
    let (_state, app, _db) = spawn_app().await;

    let (status, body) = send(&app, get("/venues/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "The Musical Hop");
    assert_eq!(body["data"]["past_shows_count"], 1);
    assert_eq!(body["data"]["upcoming_shows_count"], 0);
    assert_eq!(body["data"]["past_shows"][0]["artist_name"], "Guns N Petals");
    assert_eq!(body["data"]["genres"][0], "Jazz");

    let (status, body) = send(&app, get("/venues/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Venue 999 not found");

    let (status, _) = send(&app, get("/artists/999/edit")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let (_state, app, _db) = spawn_app().await;

    let (status, body) = send(&app, get("/venues/abc")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, body) = send(&app, get("/artists/abc/edit")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, delete("/venues/1.5")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (_state, app, _db) = spawn_app().await;

    let (status, body) = send(&app, get("/nowhere")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_forms_include_choices() {
    let (_state, app, _db) = spawn_app().await;

    let (status, body) = send(&app, get("/venues/create")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["form"]["name"], "");
    assert!(
        body["data"]["genre_choices"]
            .as_array()
            .unwrap()
            .contains(&json!("Jazz"))
    );
    assert!(
        body["data"]["state_choices"]
            .as_array()
            .unwrap()
            .contains(&json!("CA"))
    );

    let (status, body) = send(&app, get("/artists/5/edit")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 5);
    assert_eq!(body["data"]["form"]["name"], "Matt Quevedo");
    assert_eq!(body["data"]["form"]["genres"], json!(["Jazz"]));

    let (status, body) = send(&app, get("/shows/create")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["venues"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["artists"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_update_delete_venue() {
    let (state, app, _db) = spawn_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/venues/create",
            &json!({
                "name": "The Fillmore",
                "city": "San Francisco",
                "state": "CA",
                "genres": ["Rock n Roll", "Funk"],
                "seeking_talent": true
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Venue The Fillmore was successfully listed!");
    assert_eq!(body["redirect"], "/");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        post_json(
            &format!("/venues/{id}/edit"),
            &json!({"name": "Fillmore West", "city": "San Francisco", "state": "CA"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Venue Fillmore West was successfully updated!");
    assert_eq!(body["redirect"], format!("/venues/{id}"));

    // Fields left out of the edit are cleared.
    let (_, body) = send(&app, get(&format!("/venues/{id}"))).await;
    assert_eq!(body["data"]["genres"], json!([]));
    assert_eq!(body["data"]["seeking_talent"], false);

    let (status, body) = send(&app, delete(&format!("/venues/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Venue Fillmore West was successfully deleted!");
    assert_eq!(body["redirect"], "/venues");

    let (status, _) = send(&app, delete(&format!("/venues/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(state.store().count_venues().await.unwrap(), 3);
}

#[tokio::test]
async fn test_create_venue_requires_name() {
    let (state, app, _db) = spawn_app().await;

    let (status, body) = send(
        &app,
        post_json("/venues/create", &json!({"name": "  ", "city": "Reno", "state": "NV"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name cannot be empty");
    assert_eq!(state.store().count_venues().await.unwrap(), 3);
}

#[tokio::test]
async fn test_create_artist() {
    let (_state, app, _db) = spawn_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/artists/create",
            &json!({
                "name": "The Blue Notes",
                "city": "Chicago",
                "state": "IL",
                "phone": "312-555-0100",
                "seeking_venue": true,
                "seeking_description": "Weekend residencies"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Artist The Blue Notes was successfully listed!");

    let id = body["data"]["id"].as_i64().unwrap();
    let (_, body) = send(&app, get(&format!("/artists/{id}"))).await;
    assert_eq!(body["data"]["phone"], "312-555-0100");
    assert_eq!(body["data"]["seeking_venue"], true);
    assert_eq!(body["data"]["upcoming_shows_count"], 0);

    let (_, body) = send(&app, get("/artists")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_create_show() {
    let (state, app, _db) = spawn_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/shows/create",
            &json!({"venue_id": 2, "artist_id": 5, "start_time": "2031-07-04 19:30:00"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Show of Matt Quevedo at The Dueling Pianos Bar was successfully listed!"
    );
    assert_eq!(body["data"]["venue_name"], "The Dueling Pianos Bar");

    let (_, body) = send(&app, get("/shows")).await;
    let shows = body["data"].as_array().unwrap();
    assert_eq!(shows.len(), 3);
    assert_eq!(shows[0]["artist_name"], "Matt Quevedo");

    assert_eq!(state.store().count_shows().await.unwrap(), 5);
}

#[tokio::test]
async fn test_create_show_with_unknown_artist() {
    let (state, app, _db) = spawn_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/shows/create",
            &json!({"venue_id": 1, "artist_id": 42, "start_time": "2031-07-04T19:30:00Z"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Venue id or Artist id not found");
    assert_eq!(state.store().count_shows().await.unwrap(), 4);
}

#[tokio::test]
async fn test_create_show_with_bad_start_time() {
    let (state, app, _db) = spawn_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/shows/create",
            &json!({"venue_id": 1, "artist_id": 4, "start_time": "soon"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(state.store().count_shows().await.unwrap(), 4);
}

#[tokio::test]
async fn test_persistence_failure_keeps_notice() {
    use sea_orm::ConnectionTrait;

    let (state, app, _db) = spawn_app().await;
    state
        .store()
        .conn
        .execute_unprepared(
            "CREATE TRIGGER reject_venue_update BEFORE UPDATE ON venues \
             BEGIN SELECT RAISE(ABORT, 'venues are read only'); END;",
        )
        .await
        .unwrap();

    let (status, body) = send(
        &app,
        post_json(
            "/venues/2/edit",
            &json!({"name": "Renamed", "city": "New York", "state": "NY"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["message"],
        "An error occurred. Venue The Dueling Pianos Bar could not be updated."
    );
    assert_eq!(body["redirect"], "/venues/2/edit");

    let venue = state.store().get_venue(2).await.unwrap().unwrap();
    assert_eq!(venue.name, "The Dueling Pianos Bar");
}

#[tokio::test]
async fn test_metrics_disabled_without_recorder() {
    let (_state, app, _db) = spawn_app().await;

    let response = app.clone().oneshot(get("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
