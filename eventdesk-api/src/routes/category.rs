/// Category endpoints
///
/// Reads are public; writes need an admin token.

use axum::{extract::State, Json};
use eventdesk_shared::{
    models::category::{Category, CreateCategory, UpdateCategory},
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
    ApiError::NotFound("category not found".to_string())
}

/// `POST /api/category`
///
/// ```json
/// { "name": "Music", "description": "Concerts and festivals", "icon": "music.png" }
/// ```
pub async fn create(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> ApiResult<Json<Envelope<Category>>> {
    let data: CreateCategory = schemas::CATEGORY.parse(&payload)?;
    let category = Category::create(&state.db, data).await?;

    tracing::info!(category_id = %category.id, "Category created");
    Ok(success("success create category", category))
}

/// `GET /api/category?page=&limit=&search=`
pub async fn find_all(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PageQuery>,
) -> ApiResult<Json<Paginated<Category>>> {
    let (categories, total) = Category::list(&state.db, &query).await?;

    Ok(paginated(
        "success find all category",
        categories,
        Pagination::new(total, &query),
    ))
}

/// `GET /api/category/:id`
pub async fn find_one(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<Json<Envelope<Category>>> {
    let category = Category::find_by_id(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(success("success find one category", category))
}

/// `PUT /api/category/:id`, partial update
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<Value>,
) -> ApiResult<Json<Envelope<Category>>> {
    let data: UpdateCategory = schemas::CATEGORY_UPDATE.parse(&payload)?;
    let category = Category::update(&state.db, id, data)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(category_id = %category.id, "Category updated");
    Ok(success("success update category", category))
}

/// `DELETE /api/category/:id`
///
/// Fails with 400 while events still reference the category.
pub async fn remove(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<Json<Envelope<Category>>> {
    let category = Category::delete(&state.db, id)
        .await
        .map_err(|err| {
            if err
                .as_database_error()
                .is_some_and(|db_err| db_err.is_foreign_key_violation())
            {
                ApiError::BadRequest("category is still used by events".to_string())
            } else {
                ApiError::from(err)
            }
        })?
        .ok_or_else(not_found)?;

    tracing::info!(category_id = %category.id, "Category removed");
    Ok(success("success remove category", category))
}
