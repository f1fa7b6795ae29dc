use async_graphql::{EmptyMutation, EmptySubscription, MergedObject, Schema};

use crate::job::jobs_query::JobsQuery;
use crate::property::properties_query::PropertiesQuery;

#[derive(MergedObject, Default)]
pub struct QueryRoot(PropertiesQuery, JobsQuery);

pub type AppSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn build_schema() -> AppSchema {
    Schema::new(QueryRoot::default(), EmptyMutation, EmptySubscription)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::tests::scenario_store;
    use crate::property::tests::{FailingPropertySource, StaticPropertySource};
    use crate::property::PropertySource;
    use crate::request_context::AppContext;
    use async_graphql::{Request, Response};
    use mongodb::bson::doc;
    use serde_json::json;
    use std::sync::Arc;

    fn context(mongodb: impl PropertySource + 'static) -> AppContext {
        AppContext::new(Arc::new(mongodb), Arc::new(scenario_store()))
    }

    fn metrics_source() -> StaticPropertySource {
        StaticPropertySource::default()
            .with_collection("metrics", vec![doc! { "_id": "a", "val": 1 }])
    }

    async fn execute(ctx: AppContext, query: &str) -> Response {
        build_schema().execute(Request::new(query).data(ctx)).await
    }

    fn data(response: Response) -> serde_json::Value {
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        response.data.into_json().unwrap()
    }

    #[tokio::test]
    async fn jobs_filters_by_status_in_order() {
        let response = execute(
            context(metrics_source()),
            "{ jobs(status: DONE) { id status } }",
        )
        .await;

        assert_eq!(
            data(response),
            json!({ "jobs": [
                { "id": "1", "status": "DONE" },
                { "id": "3", "status": "DONE" },
            ] })
        );
    }

    #[tokio::test]
    async fn jobs_without_matches_is_empty_list() {
        let response = execute(context(metrics_source()), "{ jobs(status: QUEUED) { id } }").await;

        assert_eq!(data(response), json!({ "jobs": [] }));
    }

    #[tokio::test]
    async fn job_returns_first_match() {
        let response = execute(
            context(metrics_source()),
            "{ running: job(status: RUNNING) { id } done: job(status: DONE) { id } }",
        )
        .await;

        assert_eq!(
            data(response),
            json!({ "running": { "id": "2" }, "done": { "id": "1" } })
        );
    }

    #[tokio::test]
    async fn job_without_match_is_a_field_error() {
        let response = execute(
            context(metrics_source()),
            "{ job(status: QUEUED) { id } jobs(status: RUNNING) { id } }",
        )
        .await;

        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "No job found with status queued");
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({ "job": null, "jobs": [{ "id": "2" }] })
        );
    }

    #[tokio::test]
    async fn lowercase_status_is_rejected_by_validation() {
        let response = execute(context(metrics_source()), "{ jobs(status: done) { id } }").await;

        assert!(!response.errors.is_empty());
    }

    #[tokio::test]
    async fn properties_are_projected() {
        let response = execute(
            context(metrics_source()),
            r#"{ properties(collection_name: "metrics") { id collection_name attributes } }"#,
        )
        .await;

        assert_eq!(
            data(response),
            json!({ "properties": [
                { "id": "a", "collection_name": "metrics", "attributes": { "val": 1 } },
            ] })
        );
    }

    #[tokio::test]
    async fn properties_keep_fetch_order_and_count() {
        let source = StaticPropertySource::default().with_collection(
            "molecules",
            vec![
                doc! { "_id": "m3", "smiles": "O" },
                doc! { "_id": "m1", "smiles": "CCO" },
                doc! { "_id": "m2", "smiles": "C" },
            ],
        );

        let response = execute(
            context(source),
            r#"{
                properties(collection_name: "molecules") {
                    id
                    collection_name
                    smiles: attribute(name: "smiles")
                }
            }"#,
        )
        .await;

        assert_eq!(
            data(response),
            json!({ "properties": [
                { "id": "m3", "collection_name": "molecules", "smiles": "O" },
                { "id": "m1", "collection_name": "molecules", "smiles": "CCO" },
                { "id": "m2", "collection_name": "molecules", "smiles": "C" },
            ] })
        );
    }

    #[tokio::test]
    async fn unknown_collection_is_empty() {
        let response = execute(
            context(metrics_source()),
            r#"{ properties(collection_name: "nope") { id } }"#,
        )
        .await;

        assert_eq!(data(response), json!({ "properties": [] }));
    }

    #[tokio::test]
    async fn fetch_failure_is_a_field_error() {
        let response = execute(
            context(FailingPropertySource),
            r#"{ properties(collection_name: "metrics") { id } jobs(status: RUNNING) { id } }"#,
        )
        .await;

        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "connection refused");
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({ "properties": null, "jobs": [{ "id": "2" }] })
        );
    }

    #[tokio::test]
    async fn missing_context_is_an_error() {
        let response = build_schema().execute("{ jobs(status: DONE) { id } }").await;

        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.data.into_json().unwrap(), json!({ "jobs": null }));
    }

    #[test]
    fn sdl_uses_wire_names() {
        let sdl = build_schema().sdl();

        assert!(sdl.contains("properties(collection_name: String!): [Property!]\n"));
        assert!(sdl.contains("jobs(status: JobStatus!): [Job!]\n"));
        assert!(sdl.contains("job(status: JobStatus!): Job\n"));
        assert!(sdl.contains("id: ID\n"));
    }
}
