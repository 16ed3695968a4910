use std::fmt;

use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::KioskConfig;

/// Store-assigned document identifier. Kept opaque so the raw `_id`
/// representation never leaks into domain logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Thin client for the document store's JSON action API. Every call is
/// `POST {base_url}/action/{action}` with the database and collection
/// named in the body.
pub struct DocumentStoreClient {
    client: Client,
    base_url: String,
    api_key: String,
    database: String,
}

impl DocumentStoreClient {
    pub fn new(config: &KioskConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.database_url.clone(),
            api_key: config.database_api_key.clone(),
            database: config.database_name.clone(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert("apikey", HeaderValue::from_str(&self.api_key).unwrap());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        headers
    }

    async fn action(&self, action: &str, body: Value) -> Result<Value> {
        let url = format!("{}/action/{}", self.base_url, action);
        debug!("Store request to {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.get_headers())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Store error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Store authentication error: {}", error_text),
                404 => anyhow!("Store resource not found: {}", error_text),
                _ => anyhow!("Store error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<Value>().await?;
        Ok(data)
    }

    fn collection_body(&self, collection: &str) -> Value {
        json!({
            "database": self.database,
            "collection": collection,
        })
    }

    pub async fn insert_one(&self, collection: &str, document: Value) -> Result<DocumentId> {
        let mut body = self.collection_body(collection);
        body["document"] = document;

        let result = self.action("insertOne", body).await?;
        let id = result
            .get("insertedId")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("insertOne response missing insertedId"))?;

        Ok(DocumentId(id.to_string()))
    }

    pub async fn find(&self, collection: &str, filter: Value) -> Result<Vec<Value>> {
        let mut body = self.collection_body(collection);
        body["filter"] = filter;

        let result = self.action("find", body).await?;
        match result.get("documents") {
            Some(Value::Array(documents)) => Ok(documents.clone()),
            _ => Err(anyhow!("find response missing documents array")),
        }
    }

    pub async fn find_one(&self, collection: &str, filter: Value) -> Result<Option<Value>> {
        let mut body = self.collection_body(collection);
        body["filter"] = filter;

        let result = self.action("findOne", body).await?;
        match result.get("document") {
            Some(Value::Null) | None => Ok(None),
            Some(document) => Ok(Some(document.clone())),
        }
    }

    /// Applies `$set` fields to the first document matching the filter.
    /// Returns the matched count.
    pub async fn update_one(&self, collection: &str, filter: Value, set: Value) -> Result<u64> {
        let mut body = self.collection_body(collection);
        body["filter"] = filter;
        body["update"] = json!({ "$set": set });

        let result = self.action("updateOne", body).await?;
        Ok(result
            .get("matchedCount")
            .and_then(Value::as_u64)
            .unwrap_or(0))
    }

    /// Counts documents matching the filter via a `$match`/`$count`
    /// aggregation. An empty result set counts as zero.
    pub async fn count(&self, collection: &str, filter: Value) -> Result<i64> {
        let mut body = self.collection_body(collection);
        body["pipeline"] = json!([
            { "$match": filter },
            { "$count": "count" },
        ]);

        let result = self.action("aggregate", body).await?;
        let count = result
            .get("documents")
            .and_then(Value::as_array)
            .and_then(|documents| documents.first())
            .and_then(|doc| doc.get("count"))
            .and_then(Value::as_i64)
            .unwrap_or(0);

        Ok(count)
    }

    pub async fn list_collection_names(&self) -> Result<Vec<String>> {
        let body = json!({ "database": self.database });

        let result = self.action("listCollections", body).await?;
        let names = result
            .get("collections")
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("listCollections response missing collections array"))?
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();

        Ok(names)
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }
}
