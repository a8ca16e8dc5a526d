//! JSON REST API for the address book.
//!
//! Exposes an axum [`Router`] over a [`Directory`]. The binary in `main.rs`
//! loads [`ServerConfig`], opens the SQLite store, seeds it on first boot and
//! serves the router.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = addressbook_server::router(directory, &config);
//! ```

pub mod contacts;
pub mod error;

use std::path::{Path, PathBuf};

use addressbook_core::{
  directory::Directory,
  seed::{self, SeedData},
  store::ContactStore,
};
use addressbook_store_sqlite::SqliteStore;
use anyhow::Context as _;
use axum::{
  Router,
  extract::{Request, State},
  http::{HeaderName, HeaderValue, Method},
  middleware::{self, Next},
  response::{IntoResponse, Response},
  routing::{get, put},
};
use serde::Deserialize;
use tower_http::{
  cors::{AllowOrigin, Any, CorsLayer},
  trace::TraceLayer,
};

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ADDRESSBOOK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  /// SQLite database file; a leading `~/` expands to `$HOME`.
  pub database_file: PathBuf,
  /// Value of `Access-Control-Allow-Origin`; `*` allows any origin.
  pub cors_origin:   String,
  /// Request headers allowed on cross-origin calls.
  pub cors_headers:  Vec<String>,
  /// Serve read-only: every write is answered with 405.
  pub live_demo:     bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "127.0.0.1".to_string(),
      port:          8080,
      database_file: PathBuf::from("~/.addressbook/addressbook.db"),
      cors_origin:   "*".to_string(),
      cors_headers:  vec!["content-type".to_string()],
      live_demo:     false,
    }
  }
}

// ─── Store bootstrap ──────────────────────────────────────────────────────────

/// Open the SQLite store at `path`, loading the bundled seed contacts only if
/// the file did not exist before this call.
pub async fn open_store(path: &Path) -> anyhow::Result<SqliteStore> {
  let fresh = !tokio::fs::try_exists(path)
    .await
    .with_context(|| format!("failed to inspect {path:?}"))?;

  let store = SqliteStore::open(path)
    .await
    .with_context(|| format!("failed to open store at {path:?}"))?;

  if fresh {
    let data = SeedData::bundled().context("bundled seed data is invalid")?;
    seed::load(&store, data)
      .await
      .context("failed to load seed data")?;
  } else {
    tracing::debug!(?path, "existing database; seed data not loaded");
  }

  Ok(store)
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router: the contact API under `/api`, wrapped in
/// CORS, request tracing and, if enabled, the live-demo write block.
pub fn router<S>(directory: Directory<S>, config: &ServerConfig) -> Router
where
  S: ContactStore + 'static,
{
  let api = Router::new()
    .route("/contacts", get(contacts::list::<S>).post(contacts::create::<S>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update_one::<S>)
        .delete(contacts::delete_one::<S>),
    )
    .route("/contacts/{id}/favorite", put(contacts::favorite::<S>))
    .with_state(directory);

  Router::new()
    .nest("/api", api)
    .layer(middleware::from_fn_with_state(config.live_demo, block_writes))
    .layer(cors_layer(config))
    .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
  let origin = if config.cors_origin == "*" {
    AllowOrigin::any()
  } else {
    match HeaderValue::from_str(&config.cors_origin) {
      Ok(v) => AllowOrigin::exact(v),
      Err(_) => {
        tracing::warn!(origin = %config.cors_origin, "invalid CORS origin; allowing none");
        AllowOrigin::list(Vec::new())
      }
    }
  };

  let headers: Vec<HeaderName> = config
    .cors_headers
    .iter()
    .filter_map(|h| HeaderName::from_bytes(h.as_bytes()).ok())
    .collect();

  CorsLayer::new()
    .allow_origin(origin)
    .allow_methods(Any)
    .allow_headers(headers)
}

/// Reject anything but reads while `live_demo` is on.
async fn block_writes(State(live_demo): State<bool>, req: Request, next: Next) -> Response {
  let read_only = matches!(*req.method(), Method::GET | Method::HEAD | Method::OPTIONS);
  if live_demo && !read_only {
    return ApiError::MethodBlocked(req.method().to_string()).into_response();
  }
  next.run(req).await
}

// ─── Integration tests ────────────────────────────────────────────────────────
