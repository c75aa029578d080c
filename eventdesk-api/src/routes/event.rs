/// Event endpoints
///
/// Reads are public; writes need an admin token. The creating admin is
/// recorded as the event's owner.

use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use eventdesk_shared::{
    auth::jwt::UserToken,
    models::event::{CreateEvent, Event, UpdateEvent},
    pagination::{PageQuery, Pagination},
    validation::schemas,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::{paginated, success, AppJson, AppPath, AppQuery, Envelope, Paginated},
};

fn not_found() -> ApiError {
    ApiError::NotFound("event not found".to_string())
}

fn check_date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> ApiResult<()> {
    if end < start {
        return Err(ApiError::BadRequest(
            "endDate must not be before startDate".to_string(),
        ));
    }
    Ok(())
}

/// `POST /api/events`
///
/// ```json
/// {
///   "name": "RustConf 2025",
///   "category": "7b0c4f0e-1d2a-4c8e-9f3b-2a6d5e4c3b21",
///   "description": "Three days of Rust",
///   "banner": "rustconf.png",
///   "startDate": "2025-09-02T09:00:00Z",
///   "endDate": "2025-09-04T18:00:00Z",
///   "isOnline": false,
///   "region": "Seattle"
/// }
/// ```
///
/// The slug is derived from the name; a name whose slug is taken gets 409.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<UserToken>,
    AppJson(payload): AppJson<Value>,
) -> ApiResult<Json<Envelope<Event>>> {
    let data: CreateEvent = schemas::EVENT.parse(&payload)?;
    check_date_range(data.start_date, data.end_date)?;

    let event = Event::create(&state.db, data, user.id).await?;

    tracing::info!(event_id = %event.id, slug = %event.slug, "Event created");
    Ok(success("success create an event", event))
}

/// `GET /api/events?page=&limit=&search=`
///
/// `search` is matched as full text against name and description.
pub async fn find_all(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PageQuery>,
) -> ApiResult<Json<Paginated<Event>>> {
    let (events, total) = Event::list(&state.db, &query).await?;

    Ok(paginated(
        "success find all events",
        events,
        Pagination::new(total, &query),
    ))
}

/// `GET /api/events/:id`
pub async fn find_one(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<Json<Envelope<Event>>> {
    let event = Event::find_by_id(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(success("success find one event", event))
}

/// `GET /api/events/:slug/slug`
pub async fn find_by_slug(
    State(state): State<AppState>,
    AppPath(slug): AppPath<String>,
) -> ApiResult<Json<Envelope<Event>>> {
    let event = Event::find_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(not_found)?;

    Ok(success("success find one event by slug", event))
}

/// `PUT /api/events/:id`, partial update
///
/// A date given alone is checked against the stored one by the database.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<Value>,
) -> ApiResult<Json<Envelope<Event>>> {
    let data: UpdateEvent = schemas::EVENT_UPDATE.parse(&payload)?;
    if let (Some(start), Some(end)) = (data.start_date, data.end_date) {
        check_date_range(start, end)?;
    }
    let event = Event::update(&state.db, id, data)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(event_id = %event.id, "Event updated");
    Ok(success("success update an event", event))
}

/// `DELETE /api/events/:id`
pub async fn remove(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<Json<Envelope<Event>>> {
    let event = Event::delete(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(event_id = %event.id, "Event removed");
    Ok(success("success remove an event", event))
}
