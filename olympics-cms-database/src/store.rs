use core::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::id::DocumentId;
use crate::models::Record;

/// Upper bound the list views ask for.
pub const FULL_FETCH_LIMIT: usize = 1000;

pub type RawDocument = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: usize,
    pub offset: Option<usize>,
}

impl ListQuery {
    #[must_use]
    pub const fn full() -> Self {
        Self {
            limit: FULL_FETCH_LIMIT,
            offset: None,
        }
    }

    #[must_use]
    pub const fn page(limit: usize, offset: usize) -> Self {
        Self {
            limit,
            offset: Some(offset),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DocumentList<T = RawDocument> {
    /// Number of documents in the collection, not in this response.
    pub total: usize,
    pub documents: Vec<T>,
}

/// The operations the hosted document database offers us.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list(
        &self,
        collection: &str,
        query: ListQuery,
    ) -> Result<DocumentList, StoreError>;

    async fn get(&self, collection: &str, id: &DocumentId) -> Result<RawDocument, StoreError>;

    async fn create(
        &self,
        collection: &str,
        id: &DocumentId,
        data: RawDocument,
    ) -> Result<RawDocument, StoreError>;

    async fn update(
        &self,
        collection: &str,
        id: &DocumentId,
        data: RawDocument,
    ) -> Result<RawDocument, StoreError>;

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError>;
}

/// Email/password sessions of the hosted authentication service.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Returns the session secret.
    async fn create_email_session(&self, email: &str, password: &str)
        -> Result<String, StoreError>;

    async fn delete_session(&self, secret: &str) -> Result<(), StoreError>;
}

/// Typed view on one collection.
pub struct Collection<'a, T> {
    store: &'a dyn DocumentStore,
    id: &'a str,
    marker: PhantomData<fn() -> T>,
}

impl<'a, T> Collection<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: &'a dyn DocumentStore, id: &'a str) -> Self {
        Self {
            store,
            id,
            marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &str {
        self.id
    }

    pub async fn list(&self, query: ListQuery) -> Result<DocumentList<Record<T>>, StoreError> {
        let list = self.store.list(self.id, query).await?;
        Ok(DocumentList {
            total: list.total,
            documents: list
                .documents
                .into_iter()
                .map(decode)
                .collect::<Result<_, _>>()?,
        })
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Record<T>, StoreError> {
        decode(self.store.get(self.id, id).await?)
    }

    /// Creates the document under a freshly generated id.
    pub async fn create(&self, data: &T) -> Result<Record<T>, StoreError> {
        let id = DocumentId::unique();
        decode(self.store.create(self.id, &id, encode(data)?).await?)
    }

    pub async fn update(&self, id: &DocumentId, data: &T) -> Result<Record<T>, StoreError> {
        decode(self.store.update(self.id, id, encode(data)?).await?)
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<(), StoreError> {
        self.store.delete(self.id, id).await
    }
}

fn encode<T: Serialize>(data: &T) -> Result<RawDocument, StoreError> {
    match serde_json::to_value(data)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject),
    }
}

fn decode<T: DeserializeOwned>(document: RawDocument) -> Result<Record<T>, StoreError> {
    Ok(serde_json::from_value(Value::Object(document))?)
}
