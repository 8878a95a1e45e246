//! HTTP server
//!
//! Builds the canonical route set and serves it. There is exactly one
//! route table; every endpoint goes through the same rate-limit, cache
//! and error-translation pipeline in its handler.

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::observability::Logger;

use super::handlers::{
    bulk_create_books, bulk_delete_books, create_book, delete_book, get_book, home, list_books,
    update_book, AppState,
};

/// Build the router with all endpoints wired to the given state
pub fn router(state: AppState, config: &Config) -> Router {
    let cors = if config.cors_origins.is_empty() {
        // Development: no configured origins means permissive
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/", get(home))
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/bulk",
            post(bulk_create_books).delete(bulk_delete_books),
        )
        .route(
            "/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .layer(cors)
        .with_state(state)
}

/// The Book Manager HTTP server
pub struct ApiServer {
    config: Config,
    router: Router,
}

impl ApiServer {
    /// Build a server and its dependencies from configuration
    pub fn new(config: Config) -> Self {
        let state = AppState::from_config(&config);
        let router = router(state, &config);
        Self { config, router }
    }

    /// Bind address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// The router, for in-process testing
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        Logger::info("server.start", &[("addr", &addr.to_string())]);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
