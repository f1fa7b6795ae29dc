use super::Property;
use crate::request_context::AppContext;
use async_graphql::FieldResult;
use eyre::Result;
use tracing::instrument;

#[derive(Default)]
pub struct PropertiesQuery;

#[async_graphql::Object]
impl PropertiesQuery {
    /// Every property stored in the named collection.
    #[instrument(skip(self, ctx))]
    async fn properties<'ctx>(
        &self,
        ctx: &'ctx async_graphql::Context<'_>,
        #[graphql(name = "collection_name")] collection_name: String,
    ) -> FieldResult<Option<Vec<Property>>> {
        let AppContext { mongodb, .. } = ctx.data::<AppContext>()?;

        let documents = mongodb.fetch_properties_from_collection(&collection_name).await?;

        let properties = documents
            .into_iter()
            .map(|document| Property::from_document(document, &collection_name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(properties))
    }
}
