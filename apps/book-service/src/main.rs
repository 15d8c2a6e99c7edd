// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

use bookhive_book_service::{config::ServiceConfig, router, store::BookStore, AppState};

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ServiceConfig::from_env();

    let mut store = BookStore::new();
    if config.seed_books {
        store.seed_if_empty();
    }

    let app = router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .expect("failed to bind listen address");

    tracing::info!(addr = %listener.local_addr().unwrap(), "book service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    tracing::info!("shutdown signal received");
}
