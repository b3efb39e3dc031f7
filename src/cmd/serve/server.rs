// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Component;
use std::path::Path as FsPath;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::signal;
use uebungen_core::Fallible;
use uebungen_core::TinyRng;
use uebungen_core::fail;

use crate::cmd::serve::template::PageAssets;
use crate::cmd::serve::template::lesson_page;
use crate::utils::CACHE_CONTROL_IMMUTABLE;
use crate::utils::clock_seed;
use crate::utils::read_lesson;

pub struct ServerConfig {
    /// Path to the lesson file.
    pub lesson: String,
    pub host: String,
    pub port: u16,
    /// wasm-pack output directory served under `/pkg/`.
    pub pkg_dir: Option<String>,
    /// Seed for scrambling ordering exercises. The clock is used if absent.
    pub seed: Option<u64>,
}

#[derive(Clone)]
struct ServerState {
    page: Arc<String>,
    lesson_json: Arc<String>,
    pkg_dir: Option<Arc<PathBuf>>,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let lesson = read_lesson(&config.lesson)?;
    log::info!(
        "Loaded lesson {} ({} exercises) from {}",
        lesson.number(),
        lesson.len(),
        config.lesson
    );

    let pkg_dir = match config.pkg_dir {
        Some(dir) => {
            let dir = PathBuf::from(dir);
            if !dir.is_dir() {
                return fail("pkg directory does not exist.");
            }
            Some(Arc::new(dir.canonicalize()?))
        }
        None => {
            log::warn!("No --pkg-dir given: the page will render but exercises won't respond.");
            None
        }
    };

    let mut rng = TinyRng::from_seed(config.seed.unwrap_or_else(clock_seed));
    let assets = PageAssets {
        inline_style: false,
        script: Some("/script.js".to_string()),
    };
    let page = lesson_page(&lesson, &mut rng, &assets)?.into_string();
    let state = ServerState {
        page: Arc::new(page),
        lesson_json: Arc::new(serde_json::to_string(&lesson)?),
        pkg_dir,
    };

    let app = Router::new();
    let app = app.route("/", get(page_handler));
    let app = app.route("/lesson.json", get(lesson_handler));
    let app = app.route("/script.js", get(script_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.route("/pkg/{*path}", get(pkg_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("{}:{}", config.host, config.port);

    // Start the server with graceful shutdown on Ctrl+C.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn page_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    (StatusCode::OK, Html(state.page.as_ref().clone()))
}

async fn lesson_handler(
    State(state): State<ServerState>,
) -> (StatusCode, [(HeaderName, &'static str); 1], String) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "application/json")],
        state.lesson_json.as_ref().clone(),
    )
}

async fn script_handler() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript")],
        include_str!("script.js"),
    )
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

/// Resolve a client-supplied path inside `root`. Absolute paths, parent
/// components and anything that isn't an existing regular file are rejected.
pub fn resolve_pkg_file(root: &FsPath, path: &str) -> Option<PathBuf> {
    let relative = PathBuf::from(path);
    let plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !plain {
        return None;
    }
    let full = root.join(relative);
    let metadata = full.symlink_metadata().ok()?;
    if metadata.is_file() { Some(full) } else { None }
}

async fn pkg_handler(
    State(state): State<ServerState>,
    Path(path): Path<String>,
) -> (StatusCode, [(HeaderName, &'static str); 1], Vec<u8>) {
    let not_found = (
        StatusCode::NOT_FOUND,
        [(CONTENT_TYPE, "text/plain")],
        b"Not Found".to_vec(),
    );
    let Some(root) = &state.pkg_dir else {
        return not_found;
    };
    let Some(file) = resolve_pkg_file(root, &path) else {
        return not_found;
    };
    let extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    let content_type: &str = match extension.as_str() {
        "js" => "text/javascript",
        "wasm" => "application/wasm",
        "json" => "application/json",
        "ts" => "text/plain",
        _ => "application/octet-stream",
    };
    match tokio::fs::read(file).await {
        Ok(bytes) => (StatusCode::OK, [(CONTENT_TYPE, content_type)], bytes),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain")],
            b"Internal Server Error".to_vec(),
        ),
    }
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => log::debug!("Received Ctrl+C, shutting down gracefully"),
        Err(e) => {
            log::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await
        }
    }
}
