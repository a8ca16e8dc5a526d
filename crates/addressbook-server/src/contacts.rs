//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | Optional `?query=`; fuzzy match on the full name |
//! | `POST`   | `/contacts` | Body: [`ContactInput`]; returns 201 + stored contact |
//! | `GET`    | `/contacts/{id}` | 404 if not found |
//! | `PUT`    | `/contacts/{id}` | Body: [`ContactInput`]; `id`/`createdAt` are ignored |
//! | `DELETE` | `/contacts/{id}` | Returns the deleted contact |
//! | `PUT`    | `/contacts/{id}/favorite` | Body: `true` or `false` |

use addressbook_core::{
  contact::{Contact, ContactId, ContactInput},
  directory::Directory,
  store::ContactStore,
};
use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub query: Option<String>,
}

/// `GET /contacts[?query=<text>]`
pub async fn list<S: ContactStore>(
  State(directory): State<Directory<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Contact>>, ApiError> {
  let contacts = directory.list(params.query.as_deref()).await?;
  Ok(Json(contacts))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts`
pub async fn create<S: ContactStore>(
  State(directory): State<Directory<S>>,
  Json(body): Json<ContactInput>,
) -> Result<impl IntoResponse, ApiError> {
  let contact = directory.create(body).await?;
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Single contact ───────────────────────────────────────────────────────────

/// `GET /contacts/{id}`
pub async fn get_one<S: ContactStore>(
  State(directory): State<Directory<S>>,
  Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
  Ok(Json(directory.read(&ContactId::new(id)).await?))
}

/// `PUT /contacts/{id}`
pub async fn update_one<S: ContactStore>(
  State(directory): State<Directory<S>>,
  Path(id): Path<String>,
  Json(body): Json<ContactInput>,
) -> Result<Json<Contact>, ApiError> {
  Ok(Json(directory.update(&ContactId::new(id), body).await?))
}

/// `DELETE /contacts/{id}`
pub async fn delete_one<S: ContactStore>(
  State(directory): State<Directory<S>>,
  Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
  Ok(Json(directory.delete(&ContactId::new(id)).await?))
}

/// `PUT /contacts/{id}/favorite`; the body is a bare JSON boolean.
pub async fn favorite<S: ContactStore>(
  State(directory): State<Directory<S>>,
  Path(id): Path<String>,
  Json(value): Json<bool>,
) -> Result<Json<Contact>, ApiError> {
  Ok(Json(directory.favorite(&ContactId::new(id), value).await?))
}
