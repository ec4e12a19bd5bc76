//! HTTP surface: routing, request auth, and the webhook handler

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{Path, State},
    http::{HeaderMap, Request, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::any,
};
use std::net::SocketAddr;
use tracing::{error, info, warn};

use crate::config::RelayConfig;
use crate::lifecycle;
use crate::relay;
use crate::telegram_api::BotApi;
use crate::types::Update;

/// Header Telegram echoes on every webhook delivery, carrying the secret
/// registered at install time.
const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Shared state for all routes
#[derive(Clone)]
pub struct RelayState {
    pub config: RelayConfig,
    pub api: BotApi,
}

/// Build the router for the configured path prefix.
///
/// Telegram issues POSTs and operators often use a browser, so every route
/// accepts any method; the path alone selects the operation.
pub fn build_router(config: RelayConfig) -> Router {
    let api = BotApi::new(config.api_base.clone());
    let prefix = config.prefix.clone();
    let state = RelayState { config, api };

    Router::new()
        .route(
            &format!("/{prefix}/install/{{owner}}/{{bot_token}}"),
            any(handle_install),
        )
        .route(
            &format!("/{prefix}/uninstall/{{bot_token}}"),
            any(handle_uninstall),
        )
        .route(
            &format!("/{prefix}/webhook/{{owner}}/{{bot_token}}"),
            any(handle_webhook),
        )
        .fallback(not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Run the relay HTTP server
pub async fn run_server(addr: SocketAddr, config: RelayConfig) -> anyhow::Result<()> {
    let app = build_router(config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Middleware to log all incoming HTTP requests
async fn log_request(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    info!("🌐 HTTP {} {} → {}", method, path, response.status());

    response
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Scheme-and-host origin of the inbound request, honoring the
/// forwarded-proto header set by a TLS-terminating proxy.
fn request_origin(headers: &HeaderMap) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    format!("{}://{}", scheme, host)
}

/// Register the webhook for a bot (operator-initiated)
async fn handle_install(
    State(state): State<RelayState>,
    Path((owner, bot_token)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let origin = request_origin(&headers);
    let outcome = lifecycle::install(
        &state.api,
        &owner,
        &bot_token,
        &origin,
        &state.config.prefix,
        &state.config.secret_token,
    )
    .await;

    (outcome.status, Json(outcome.body)).into_response()
}

/// Deregister the webhook for a bot (operator-initiated)
async fn handle_uninstall(
    State(state): State<RelayState>,
    Path(bot_token): Path<String>,
) -> Response {
    let outcome = lifecycle::uninstall(&state.api, &bot_token, &state.config.secret_token).await;

    (outcome.status, Json(outcome.body)).into_response()
}

/// Receive one update from Telegram
///
/// Telegram wants a fast 2xx regardless of what forwarding does; only a
/// bad secret (401) or an undecodable body (500) break that contract, and
/// neither triggers an outbound call.
async fn handle_webhook(
    State(state): State<RelayState>,
    Path((owner, bot_token)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let supplied = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if supplied != state.config.secret_token {
        warn!("Webhook delivery with bad secret token for owner {}", owner);
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            error!("Undecodable webhook body: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        }
    };

    let Ok(owner_id) = owner.parse::<i64>() else {
        // Route matched but the owner segment is not a chat id; nothing can
        // be forwarded, and Telegram still gets its acknowledgement.
        warn!("Webhook delivery with non-numeric owner segment '{}'", owner);
        return (StatusCode::OK, "OK").into_response();
    };

    let action = relay::classify(&update, owner_id);
    relay::execute(&state.api, &bot_token, owner_id, action).await;

    (StatusCode::OK, "OK").into_response()
}
