/// To-do item endpoints
///
/// All routes here sit behind the bearer-auth layer; the owner of every
/// operation is the resolved [`CurrentUser`]. Only the owner of an item may
/// update or delete it.
///
/// # Endpoints
///
/// - `POST /todos` - Create an item with a freshly drawn integer ID
/// - `GET /todos?page=&limit=` - List owned items, ascending by ID
/// - `PUT /todos/:id` - Overwrite title and description of an owned item
/// - `DELETE /todos/:id` - Delete an owned item

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tasknest_shared::{
    auth::middleware::CurrentUser,
    models::todo::{CreateTodo, Todo},
};

/// Upper bound (inclusive) of the item ID draw
const MAX_TODO_ID: i64 = 1_000_000;

/// Fresh draws attempted before giving up on a create
///
/// The ID space is large relative to expected item volume, so exhausting
/// this budget means the table is effectively full.
const MAX_ID_ATTEMPTS: u32 = 32;

/// Create / update request body
#[derive(Debug, Deserialize)]
pub struct TodoRequest {
    /// Short title
    pub title: String,

    /// Longer free-form description
    pub description: String,
}

/// Single-item response shape
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoResponse {
    /// Unique integer ID
    pub id: i64,

    /// Short title
    pub title: String,

    /// Longer free-form description
    pub description: String,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
        }
    }
}

/// Pagination query parameters
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: i64,

    /// Page size
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

/// Paginated list response
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoListResponse {
    /// The requested page of items
    pub data: Vec<TodoResponse>,

    /// Echoed page number
    pub page: i64,

    /// Echoed page size
    pub limit: i64,

    /// Total number of items owned by the caller
    pub total: i64,
}

/// Computes the row offset for a page, or `None` when the page is out of range
///
/// A page is out of range when its first slot lies at or beyond `total`.
/// Both parameters come straight from the query string, so the offset is
/// computed with checked arithmetic; an overflowing page is out of range by
/// definition.
fn page_offset(page: i64, limit: i64, total: i64) -> Option<i64> {
    if page < 1 || limit < 1 {
        return None;
    }
    let offset = (page - 1).checked_mul(limit)?;
    if offset >= total {
        return None;
    }
    Some(offset)
}

/// Create a to-do item
///
/// Draws a candidate ID uniformly from `[1, 10^6]` and inserts atomically;
/// on a collision the draw is retried with a fresh ID, up to a bounded
/// attempt budget.
///
/// # Endpoint
///
/// ```text
/// POST /todos
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "title": "t", "description": "d" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `500 Internal Server Error`: ID draw budget exhausted or store failure
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(CurrentUser(owner)): Extension<CurrentUser>,
    Json(req): Json<TodoRequest>,
) -> ApiResult<(StatusCode, Json<TodoResponse>)> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let id = rand::thread_rng().gen_range(1..=MAX_TODO_ID);

        let created = Todo::create(
            &state.db,
            CreateTodo {
                id,
                title: req.title.clone(),
                description: req.description.clone(),
                owner_id: owner.id,
            },
        )
        .await?;

        if let Some(todo) = created {
            return Ok((StatusCode::CREATED, Json(todo.into())));
        }
        // Candidate collided with an existing item; draw again
    }

    Err(ApiError::InternalError(
        "Exhausted ID draws while creating a to-do item".to_string(),
    ))
}

/// Update a to-do item
///
/// Overwrites the title and description. The item must exist and must be
/// owned by the caller.
///
/// # Errors
///
/// - `403 Forbidden`: Caller is not the owner
/// - `404 Not Found`: No item matches `id`
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(CurrentUser(owner)): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<TodoRequest>,
) -> ApiResult<Json<TodoResponse>> {
    let todo = Todo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("To-do item not found".to_string()))?;

    if todo.owner_id != owner.id {
        return Err(ApiError::Forbidden(
            "The current user is not the creator of the to-do item".to_string(),
        ));
    }

    let updated = Todo::update(&state.db, id, &req.title, &req.description)
        .await?
        .ok_or_else(|| ApiError::NotFound("To-do item not found".to_string()))?;

    Ok(Json(updated.into()))
}

/// Delete a to-do item
///
/// Same ownership check as update; returns 204 with no body on success.
///
/// # Errors
///
/// - `403 Forbidden`: Caller is not the owner
/// - `404 Not Found`: No item matches `id`
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(CurrentUser(owner)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let todo = Todo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("To-do item not found".to_string()))?;

    if todo.owner_id != owner.id {
        return Err(ApiError::Forbidden(
            "The current user is not the creator of the to-do item".to_string(),
        ));
    }

    // The row may have been deleted since the ownership check
    let deleted = Todo::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("To-do item not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// List the caller's to-do items, paginated
///
/// Items are ordered by ascending ID; `total` counts everything the caller
/// owns, and `data` is the slice at offset `(page - 1) * limit`.
///
/// # Endpoint
///
/// ```text
/// GET /todos?page=1&limit=10
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: `page` or `limit` below 1, or the page lies past the
///   last owned item
pub async fn list_todos(
    State(state): State<AppState>,
    Extension(CurrentUser(owner)): Extension<CurrentUser>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<TodoListResponse>> {
    let total = Todo::count_by_owner(&state.db, owner.id).await?;

    let offset = page_offset(params.page, params.limit, total)
        .ok_or_else(|| ApiError::BadRequest("There are not enough results".to_string()))?;

    let todos = Todo::list_by_owner(&state.db, owner.id, params.limit, offset).await?;

    Ok(Json(TodoListResponse {
        data: todos.into_iter().map(TodoResponse::from).collect(),
        page: params.page,
        limit: params.limit,
        total,
    }))
}
