use super::{Job, JobFilter, JobStatus};
use crate::request_context::AppContext;
use async_graphql::FieldResult;
use eyre::eyre;
use tracing::instrument;

#[derive(Default)]
pub struct JobsQuery;

#[async_graphql::Object]
impl JobsQuery {
    /// Every job with the given status, in the order they were stored.
    #[instrument(skip(self, ctx))]
    async fn jobs<'ctx>(
        &self,
        ctx: &'ctx async_graphql::Context<'_>,
        status: JobStatus,
    ) -> FieldResult<Option<Vec<Job>>> {
        let AppContext { jobs, .. } = ctx.data::<AppContext>()?;

        Ok(Some(jobs.list(&JobFilter::status(status)).await?))
    }

    /// The first stored job with the given status. Errors if there is none,
    /// leaving the field null.
    #[instrument(skip(self, ctx))]
    async fn job<'ctx>(
        &self,
        ctx: &'ctx async_graphql::Context<'_>,
        status: JobStatus,
    ) -> FieldResult<Option<Job>> {
        let AppContext { jobs, .. } = ctx.data::<AppContext>()?;

        let job = jobs
            .find_first(&JobFilter::status(status))
            .await?
            .ok_or_else(|| eyre!("No job found with status {}", status))?;

        Ok(Some(job))
    }
}
