// HTTP surface for the vote service
//
// Routes:
// - POST /votes/add, POST /votes/remove - the vote mutations
// - GET /topics/{id}/voters - who votes for a topic
// - GET /categories/{id}/vote-status - a user's standing in a category
// - PUT /admin/{users,topics,categories} - registry upserts
// - GET /health, GET /metrics - liveness and Prometheus scrape

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::metrics;
use crate::voting::{Category, CategoryId, Topic, TopicId, User, UserId, VoteError, VoteService};

/// Body of the vote mutation routes
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub user_id: UserId,
    pub topic_id: TopicId,
}

#[derive(Debug, Deserialize)]
struct VoteStatusParams {
    user_id: UserId,
}

/// Build the service router
pub fn router(service: VoteService) -> Router {
    Router::new()
        .route("/votes/add", post(add_vote))
        .route("/votes/remove", post(remove_vote))
        .route("/topics/{topic_id}/voters", get(topic_voters))
        .route(
            "/categories/{category_id}/vote-status",
            get(category_vote_status),
        )
        .route("/admin/users", put(upsert_user))
        .route("/admin/topics", put(upsert_topic))
        .route("/admin/categories", put(upsert_category))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Start the HTTP server
pub async fn start_server(config: &ServerConfig, service: VoteService) -> Result<()> {
    // Initialize metrics
    metrics::init().context("Failed to initialize metrics")?;

    let app = router(service);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .context("Invalid server bind address")?;

    info!("Starting vote server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind vote server")?;

    axum::serve(listener, app)
        .await
        .context("Vote server error")?;

    Ok(())
}

/// Map a vote error to a bodyless rejection
fn reject(err: VoteError) -> Response {
    warn!("Vote request rejected: {}", err);
    let status = match err {
        VoteError::IneligibleTopic(_) => StatusCode::UNPROCESSABLE_ENTITY,
        VoteError::TopicNotFound(_)
        | VoteError::CategoryNotFound(_)
        | VoteError::UserNotFound(_) => StatusCode::NOT_FOUND,
    };
    status.into_response()
}

/// Cast a vote. Quota-blocked votes come back as 403 with the receipt so
/// the caller can still render the current counts.
async fn add_vote(State(service): State<VoteService>, Json(req): Json<VoteRequest>) -> Response {
    let timer = Instant::now();
    let response = match service.add_vote(req.user_id, req.topic_id).await {
        Ok(receipt) => {
            let status = if receipt.user_voted {
                StatusCode::OK
            } else {
                StatusCode::FORBIDDEN
            };
            (status, Json(receipt)).into_response()
        }
        Err(err) => reject(err),
    };
    metrics::VOTE_REQUEST_DURATION_SECONDS
        .with_label_values(&["add"])
        .observe(timer.elapsed().as_secs_f64());
    response
}

/// Withdraw a vote. Always 200 past the entity lookups.
async fn remove_vote(State(service): State<VoteService>, Json(req): Json<VoteRequest>) -> Response {
    let timer = Instant::now();
    let response = match service.remove_vote(req.user_id, req.topic_id).await {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(err) => reject(err),
    };
    metrics::VOTE_REQUEST_DURATION_SECONDS
        .with_label_values(&["remove"])
        .observe(timer.elapsed().as_secs_f64());
    response
}

async fn topic_voters(
    State(service): State<VoteService>,
    Path(topic_id): Path<TopicId>,
) -> Response {
    match service.topic_voters(topic_id).await {
        Ok(voters) => (StatusCode::OK, Json(voters)).into_response(),
        Err(err) => reject(err),
    }
}

async fn category_vote_status(
    State(service): State<VoteService>,
    Path(category_id): Path<CategoryId>,
    Query(params): Query<VoteStatusParams>,
) -> Response {
    match service
        .category_vote_status(params.user_id, category_id)
        .await
    {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(err) => reject(err),
    }
}

async fn upsert_user(State(service): State<VoteService>, Json(user): Json<User>) -> StatusCode {
    info!("Registering user {}", user.id);
    service.catalog().upsert_user(user).await;
    StatusCode::NO_CONTENT
}

async fn upsert_topic(State(service): State<VoteService>, Json(topic): Json<Topic>) -> StatusCode {
    info!("Registering topic {}", topic.id);
    service.catalog().upsert_topic(topic).await;
    StatusCode::NO_CONTENT
}

async fn upsert_category(
    State(service): State<VoteService>,
    Json(category): Json<Category>,
) -> StatusCode {
    info!("Registering category {}", category.id);
    service.catalog().upsert_category(category).await;
    StatusCode::NO_CONTENT
}

/// Health check endpoint
async fn health_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Metrics endpoint handler
async fn metrics_handler() -> Response {
    match metrics::gather_metrics() {
        Ok(metrics_text) => (StatusCode::OK, metrics_text).into_response(),
        Err(e) => {
            error!("Failed to gather metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error gathering metrics: {}", e),
            )
                .into_response()
        }
    }
}
