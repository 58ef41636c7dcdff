include!("../../lib.rs");

use std::net::SocketAddr;
use std::sync::Arc;
use lambda_http::{run, Error};
use crate::catalog::factory::create_book_service;
use crate::catalog::router::build_router;
use crate::core::controller::AppState;
use crate::core::domain::{Configuration, ServerMode};
use crate::utils::trace::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Configuration::load()?;
    setup_tracing(&config.log, config.server.mode);

    let service = Arc::from(create_book_service(&config).await);
    let state = AppState::new(config.clone(), service);

    match config.server.mode {
        ServerMode::Lambda => {
            tracing::info!(store = ?config.store, "starting lambda handler");
            run(build_router(state)).await
        }
        ServerMode::Http => {
            let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
            tracing::info!(%addr, store = ?config.store, "starting books catalog");
            axum::Server::bind(&addr)
                .serve(build_router::<axum::body::Body>(state).into_make_service())
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            tracing::info!("books catalog shutdown complete");
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
