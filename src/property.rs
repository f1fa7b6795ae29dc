use async_graphql::Json;
use async_graphql::ID;
use async_trait::async_trait;
use eyre::eyre;
use eyre::Result;
use mongodb::bson::{Bson, Document};
use serde::Serialize;
use serde_json::{Map, Value};

mod mongo_property_source;
pub mod properties_query;

pub use self::mongo_property_source::MongoPropertySource;

const STORE_ID_FIELD: &str = "_id";

/// Fetches raw property documents out of a named collection
#[async_trait]
pub trait PropertySource: Send + Sync {
    async fn fetch_properties_from_collection(
        &self,
        collection_name: &str,
    ) -> Result<Vec<Document>>;

    async fn ping(&self) -> Result<()>;
}

/// A stored property, tagged with the collection it was read from.
///
/// The serde form is the flat JSON shape of a property record:
/// `{"id": .., <stored fields>.., "collection_name": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub id: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
    pub collection_name: String,
}

impl Property {
    /// Builds a property from a fetched document. The store's `_id` becomes
    /// `id`, and `collection_name` always reflects the requested collection.
    pub fn from_document(mut document: Document, collection_name: &str) -> Result<Self> {
        let id = document.remove(STORE_ID_FIELD).ok_or_else(|| {
            eyre!("Property in {} is missing {}", collection_name, STORE_ID_FIELD)
        })?;

        let attributes = document
            .into_iter()
            .filter(|(key, _)| key != "id" && key != "collection_name")
            .map(|(key, value)| (key, value.into_relaxed_extjson()))
            .collect();

        Ok(Self {
            id: id_to_string(id),
            attributes,
            collection_name: collection_name.to_owned(),
        })
    }
}

fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(id) => id,
        other => match other.into_relaxed_extjson() {
            Value::String(id) => id,
            value => value.to_string(),
        },
    }
}

#[async_graphql::Object]
impl Property {
    async fn id(&self) -> ID {
        ID(self.id.clone())
    }
    #[graphql(name = "collection_name")]
    async fn collection_name(&self) -> &str {
        &self.collection_name
    }
    /// Every other stored field as a JSON object
    async fn attributes(&self) -> Json<Map<String, Value>> {
        Json(self.attributes.clone())
    }
    /// A single stored field, if present
    async fn attribute(&self, name: String) -> Option<Json<Value>> {
        self.attributes.get(&name).cloned().map(Json)
    }
}
