mod auth;
mod config;
mod controllers;
mod db;
mod error;
mod models;
mod repositories;
mod routes;
mod swagger;

use crate::{
    auth::auth_extractor::ApiContext,
    config::Config,
    db::init_pool_default,
    error::{AppError, AppResult},
    swagger::ApiDoc,
};
use axum::{Json, Router, routing::get};
use dotenvy::dotenv;
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> AppResult<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = init_pool_default(&config.database_url).await?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| AppError::Other(format!("Migration failed: {}", e)))?;

    let ctx = ApiContext {
        db: pool,
        jwt_secret: config.jwt_secret.clone(),
        jwt_expires_secs: config.jwt_expires_secs,
    };

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", routes::api_routes())
        .route("/", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(ctx);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "message": "API running" }))
}
