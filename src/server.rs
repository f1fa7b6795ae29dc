use crate::config::Config;
use crate::error::AppResult;
use crate::job::{InMemoryJobStore, JobStore};
use crate::property::{MongoPropertySource, PropertySource};
use crate::query_root::{build_schema, AppSchema};
use crate::request_context::AppContext;
use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::response::Html;
use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Router,
};
use eyre::Context;
use eyre::Result;
use std::sync::Arc;
use tracing::info;

/// Process-wide data sources, cloned into an `AppContext` for every request
pub struct SharedState {
    pub mongodb: Arc<dyn PropertySource>,
    pub jobs: Arc<dyn JobStore>,
}

impl SharedState {
    pub fn request_context(&self) -> AppContext {
        AppContext::new(Arc::clone(&self.mongodb), Arc::clone(&self.jobs))
    }
}

pub async fn serve(config: Config) -> Result<()> {
    info!("Starting Insilico Server");

    let client = mongodb::Client::with_uri_str(&config.mongodb.uri)
        .await
        .wrap_err("Invalid MongoDB connection string")?;
    let db = client.database(&config.mongodb.database);
    info!("Using MongoDB database {}", config.mongodb.database);

    let jobs = match &config.jobs_path {
        Some(jobs_path) => InMemoryJobStore::load(jobs_path).await?,
        None => {
            info!("No jobs_path configured, starting with an empty job store");
            InMemoryJobStore::default()
        }
    };
    info!("Job store holds {} jobs", jobs.len().await);

    let shared_state = Arc::new(SharedState {
        mongodb: Arc::new(MongoPropertySource::new(db)),
        jobs: Arc::new(jobs),
    });

    let routes = router(build_schema(), shared_state);

    tracing::debug!("listening on {}", config.listen_addr);

    axum::Server::bind(&config.listen_addr)
        .serve(routes.into_make_service())
        .await
        .wrap_err("HTTP server error")?;

    Ok(())
}

fn router(schema: AppSchema, shared_state: Arc<SharedState>) -> Router {
    Router::new()
        .route("/", get(graphql_playground).post(graphql_handler))
        .route("/healthz", get(health))
        .layer(Extension(schema))
        .layer(Extension(shared_state))
}

async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/")))
}

async fn graphql_handler(
    Extension(schema): Extension<AppSchema>,
    Extension(shared_state): Extension<Arc<SharedState>>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let req = req.into_inner().data(shared_state.request_context());

    schema.execute(req).await.into()
}

async fn health(
    Extension(shared_state): Extension<Arc<SharedState>>,
) -> AppResult<impl IntoResponse> {
    shared_state.mongodb.ping().await?;

    Ok((StatusCode::OK, "ok"))
}
