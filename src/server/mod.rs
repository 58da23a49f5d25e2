//! Development server
//!
//! Pages are rendered per request straight from the posts directory, so an
//! edited post shows up on the next reload without regenerating the site.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::templates::{TemplateRenderer, STYLE_CSS};
use crate::Folio;

/// Server state
struct ServerState {
    folio: Folio,
    renderer: TemplateRenderer,
}

/// Outcome of rendering one page, before it becomes an HTTP response
#[derive(Debug, PartialEq, Eq)]
enum Page {
    Found(String),
    NotFound(String),
}

/// Start the development server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    if folio.seed()? {
        tracing::info!("Seeded sample posts into {:?}", folio.posts_dir);
    }

    let app = router(folio)?;

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router serving the list page, post pages and the stylesheet
pub fn router(folio: &Folio) -> Result<Router> {
    let state = Arc::new(ServerState {
        folio: folio.clone(),
        renderer: TemplateRenderer::new(&folio.config)?,
    });

    let post_route = format!("/{}/:slug", folio.config.post_dir.trim_matches('/'));
    let post_route_slash = format!("{}/", post_route);

    Ok(Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route(&post_route, get(post_handler))
        .route(&post_route_slash, get(post_handler))
        .route("/style.css", get(style_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    respond(state, |state| {
        let posts = state.folio.list_published()?;
        Ok(Page::Found(state.renderer.render_index(&posts)?))
    })
    .await
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    respond(state, move |state| render_post_page(state, &slug)).await
}

async fn not_found_handler(State(state): State<Arc<ServerState>>) -> Response {
    respond(state, |state| {
        Ok(Page::NotFound(state.renderer.render_not_found()?))
    })
    .await
}

async fn style_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}

fn render_post_page(state: &ServerState, slug: &str) -> Result<Page> {
    match state.folio.load_one(slug)? {
        Some(post) => Ok(Page::Found(state.renderer.render_post(&post)?)),
        None => Ok(Page::NotFound(state.renderer.render_not_found()?)),
    }
}

/// Run a page render off the async runtime and map the outcome to a response
async fn respond<F>(state: Arc<ServerState>, render: F) -> Response
where
    F: FnOnce(&ServerState) -> Result<Page> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || render(state.as_ref())).await;

    match result {
        Ok(Ok(Page::Found(html))) => Html(html).into_response(),
        Ok(Ok(Page::NotFound(html))) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Ok(Err(e)) => {
            tracing::error!("Failed to render page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
        Err(e) => {
            tracing::error!("Render task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}
