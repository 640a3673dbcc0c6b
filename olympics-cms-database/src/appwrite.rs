use core::time::Duration;

use async_trait::async_trait;
use olympics_cms_config::StoreConfig;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::error::StoreError;
use crate::id::DocumentId;
use crate::store::{AccountService, DocumentList, DocumentStore, ListQuery, RawDocument};

const HEADER_PROJECT: &str = "x-appwrite-project";
const HEADER_KEY: &str = "x-appwrite-key";
const HEADER_SESSION: &str = "x-appwrite-session";

// https://appwrite.io/docs/references/cloud/server-rest/databases
#[derive(Clone)]
pub struct AppwriteStore {
    client: Client,
    endpoint: String,
    database_id: String,
}

#[derive(Deserialize)]
struct ServiceError {
    message: String,
}

#[derive(Deserialize)]
struct SessionResponse {
    #[serde(default)]
    secret: String,
}

impl AppwriteStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_PROJECT, header_value(&config.project_id)?);
        if let Some(api_key) = &config.api_key {
            let mut value = header_value(api_key)?;
            value.set_sensitive(true);
            headers.insert(HEADER_KEY, value);
        }
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(StoreError::ClientBuild)?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_owned(),
            database_id: config.database_id.clone(),
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, collection
        )
    }

    fn document_url(&self, collection: &str, id: &DocumentId) -> String {
        format!("{}/{}", self.documents_url(collection), id)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!("{method} {url}");
        self.client.request(method, url)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, StoreError> {
    HeaderValue::from_str(value).map_err(|_err| StoreError::InvalidHeader)
}

/// Queries are sent as json objects, one `queries[]` parameter each.
fn encode_queries(query: ListQuery) -> Vec<(&'static str, String)> {
    let mut queries = vec![(
        "queries[]",
        json!({"method": "limit", "values": [query.limit]}).to_string(),
    )];
    if let Some(offset) = query.offset {
        queries.push((
            "queries[]",
            json!({"method": "offset", "values": [offset]}).to_string(),
        ));
    }
    queries
}

async fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ServiceError>().await {
        Ok(error) => error.message,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_owned(),
    };
    error!("document store answered {status}: {message}");
    Err(StoreError::Status {
        status: status.as_u16(),
        message,
    })
}

fn not_found(error: StoreError, id: &DocumentId) -> StoreError {
    match error {
        StoreError::Status { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
            StoreError::NotFound(id.to_string())
        }
        other => other,
    }
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn list(
        &self,
        collection: &str,
        query: ListQuery,
    ) -> Result<DocumentList, StoreError> {
        let response = self
            .request(Method::GET, &self.documents_url(collection))
            .query(&encode_queries(query))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn get(&self, collection: &str, id: &DocumentId) -> Result<RawDocument, StoreError> {
        let response = self
            .request(Method::GET, &self.document_url(collection, id))
            .send()
            .await?;
        let response = check(response).await.map_err(|err| not_found(err, id))?;
        Ok(response.json().await?)
    }

    async fn create(
        &self,
        collection: &str,
        id: &DocumentId,
        data: RawDocument,
    ) -> Result<RawDocument, StoreError> {
        let response = self
            .request(Method::POST, &self.documents_url(collection))
            .json(&json!({"documentId": id, "data": Value::Object(data)}))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn update(
        &self,
        collection: &str,
        id: &DocumentId,
        data: RawDocument,
    ) -> Result<RawDocument, StoreError> {
        let response = self
            .request(Method::PATCH, &self.document_url(collection, id))
            .json(&json!({"data": Value::Object(data)}))
            .send()
            .await?;
        let response = check(response).await.map_err(|err| not_found(err, id))?;
        Ok(response.json().await?)
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE, &self.document_url(collection, id))
            .send()
            .await?;
        check(response).await.map_err(|err| not_found(err, id))?;
        Ok(())
    }
}

// https://appwrite.io/docs/references/cloud/client-rest/account
#[async_trait]
impl AccountService for AppwriteStore {
    async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<String, StoreError> {
        let response = self
            .request(Method::POST, &format!("{}/account/sessions/email", self.endpoint))
            .json(&json!({"email": email, "password": password}))
            .send()
            .await?;
        let response = check(response).await.map_err(|err| match err {
            StoreError::Status { status: 401, .. } => StoreError::InvalidCredentials,
            other => other,
        })?;
        let session: SessionResponse = response.json().await?;
        // the secret is only revealed to requests authenticated with a server key
        if session.secret.is_empty() {
            return Err(StoreError::MissingSessionSecret);
        }
        Ok(session.secret)
    }

    async fn delete_session(&self, secret: &str) -> Result<(), StoreError> {
        let response = self
            .request(
                Method::DELETE,
                &format!("{}/account/sessions/current", self.endpoint),
            )
            .header(HEADER_SESSION, header_value(secret)?)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use olympics_cms_config::CollectionIds;

    use super::*;

    fn config() -> StoreConfig {
        StoreConfig {
            endpoint: "https://store.example/v1/".to_owned(),
            project_id: "olympics".to_owned(),
            api_key: Some("key".to_owned()),
            database_id: "main".to_owned(),
            collections: CollectionIds {
                athletes: "athletes".to_owned(),
                events: "events".to_owned(),
                tally: "tally".to_owned(),
                breaking_news: "news".to_owned(),
            },
            timeout_secs: 5,
        }
    }

    #[test]
    fn builds_document_urls() {
        let store = AppwriteStore::new(&config()).unwrap();
        let id = DocumentId::parse("abc123").unwrap();
        assert_eq!(
            store.document_url("tally", &id),
            "https://store.example/v1/databases/main/collections/tally/documents/abc123"
        );
    }

    #[test]
    fn encodes_limit_and_offset() {
        assert_eq!(
            encode_queries(ListQuery::full()),
            vec![("queries[]", r#"{"method":"limit","values":[1000]}"#.to_owned())]
        );
        let paged = encode_queries(ListQuery::page(25, 50));
        assert_eq!(paged.len(), 2);
        assert_eq!(paged[1].1, r#"{"method":"offset","values":[50]}"#);
    }
}
