use std::{
    future::IntoFuture,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing, Json, Router};
use folio_extern_contracts::relay::RelayCredentials;
use folio_models::contact::ContactFormFields;
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::info;

pub const SEND_ROUTE: &str = "/api/v1.0/email/send";

/// Template parameter `name` that makes the fake relay reject a message.
pub const FAILING_NAME: &str = "fail";

pub async fn start_server(
    host: IpAddr,
    port: u16,
    credentials: RelayCredentials,
) -> anyhow::Result<()> {
    info!("Starting message relay testing server on {host}:{port}");
    info!("Message relay send endpoint: http://{host}:{port}{SEND_ROUTE}");
    info!("Credentials: {credentials:?}");
    info!("Messages from a sender named {FAILING_NAME:?} are rejected");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(credentials))
        .await
        .context("Failed to start HTTP server")
}

/// Starts the server on an ephemeral local port in the background and
/// returns its address.
pub async fn spawn_server(credentials: RelayCredentials) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind(("127.0.0.1", 0))
        .await
        .context("Failed to bind to an ephemeral port")?;
    let addr = listener.local_addr()?;
    tokio::spawn(axum::serve(listener, router(credentials)).into_future());
    Ok(addr)
}

fn router(credentials: RelayCredentials) -> Router {
    Router::new()
        .route(SEND_ROUTE, routing::post(send))
        .with_state(Arc::new(credentials))
}

#[derive(Deserialize)]
struct SendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    template_params: ContactFormFields,
}

async fn send(
    credentials: State<Arc<RelayCredentials>>,
    Json(request): Json<SendRequest>,
) -> (StatusCode, &'static str) {
    if request.service_id != credentials.service_id {
        return (StatusCode::BAD_REQUEST, "The service ID is invalid");
    }
    if request.template_id != credentials.template_id {
        return (StatusCode::BAD_REQUEST, "The template ID is invalid");
    }
    if request.user_id != credentials.public_key {
        return (StatusCode::BAD_REQUEST, "The Public Key is invalid");
    }
    if request.template_params.name == FAILING_NAME {
        return (StatusCode::BAD_REQUEST, "The message was rejected");
    }

    info!(params = ?request.template_params, "Received message");
    (StatusCode::OK, "OK")
}
