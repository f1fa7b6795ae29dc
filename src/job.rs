use async_graphql::Json;
use async_graphql::ID;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use eyre::Context;
use eyre::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::info;

pub mod jobs_query;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Seed data may use string or numeric ids, or none at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Any other job fields, kept as-is from the seed data
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(async_graphql::Enum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Done,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Done => "done",
            JobStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_graphql::Object]
impl Job {
    async fn id(&self) -> Option<ID> {
        self.id.as_ref().map(|id| match id {
            Value::String(id) => ID(id.clone()),
            other => ID(other.to_string()),
        })
    }
    async fn status(&self) -> JobStatus {
        self.status
    }
    async fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
    /// The remaining job fields as a JSON object
    async fn attributes(&self) -> Json<Map<String, Value>> {
        Json(self.attributes.clone())
    }
}

#[derive(Debug, Clone)]
pub struct JobFilter {
    pub status: JobStatus,
}

impl JobFilter {
    pub fn status(status: JobStatus) -> Self {
        Self { status }
    }

    pub fn matches(&self, job: &Job) -> bool {
        job.status == self.status
    }
}

/// Read access to the job records. Implementations must preserve the order
/// in which jobs were stored.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>>;
    async fn find_first(&self, filter: &JobFilter) -> Result<Option<Job>>;
}

#[derive(Clone, Default)]
pub struct InMemoryJobStore {
    jobs: Arc<RwLock<Vec<Job>>>,
}

impl InMemoryJobStore {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self {
            jobs: Arc::new(RwLock::new(jobs)),
        }
    }

    /// Seeds a store from a JSON array of jobs
    pub async fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("Error reading jobs file {}", path.display()))?;

        let jobs: Vec<Job> = serde_json::from_str(&json)
            .wrap_err_with(|| format!("Invalid jobs file {}", path.display()))?;

        info!("Loaded {} jobs from {}", jobs.len(), path.display());

        Ok(Self::new(jobs))
    }

    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>> {
        let jobs = self.jobs.read().await;

        Ok(jobs.iter().filter(|job| filter.matches(job)).cloned().collect())
    }

    async fn find_first(&self, filter: &JobFilter) -> Result<Option<Job>> {
        let jobs = self.jobs.read().await;

        Ok(jobs.iter().find(|job| filter.matches(job)).cloned())
    }
}
