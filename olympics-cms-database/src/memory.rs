use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng as _};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::id::DocumentId;
use crate::store::{AccountService, DocumentList, DocumentStore, ListQuery, RawDocument};

/// Document store kept in process memory. Documents keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<RawDocument>>>,
    users: Mutex<HashMap<String, String>>,
    sessions: Mutex<Vec<String>>,
    failing: AtomicBool,
    requests: AtomicU64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following request fail with [`StoreError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    #[must_use]
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }

    pub async fn add_user(&self, email: &str, password: &str) {
        self.users
            .lock()
            .await
            .insert(email.to_owned(), password.to_owned());
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Raw documents of a collection, in storage order.
    pub async fn documents(&self, collection: &str) -> Vec<RawDocument> {
        self.collections
            .lock()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn enter(&self) -> Result<(), StoreError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }
}

fn has_id(document: &RawDocument, id: &DocumentId) -> bool {
    document.get("$id").and_then(Value::as_str) == Some(id.as_str())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(
        &self,
        collection: &str,
        query: ListQuery,
    ) -> Result<DocumentList, StoreError> {
        self.enter()?;
        let collections = self.collections.lock().await;
        let documents = collections.get(collection).map_or(&[][..], Vec::as_slice);
        Ok(DocumentList {
            total: documents.len(),
            documents: documents
                .iter()
                .skip(query.offset.unwrap_or(0))
                .take(query.limit)
                .cloned()
                .collect(),
        })
    }

    async fn get(&self, collection: &str, id: &DocumentId) -> Result<RawDocument, StoreError> {
        self.enter()?;
        self.collections
            .lock()
            .await
            .get(collection)
            .and_then(|documents| documents.iter().find(|document| has_id(document, id)))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn create(
        &self,
        collection: &str,
        id: &DocumentId,
        mut data: RawDocument,
    ) -> Result<RawDocument, StoreError> {
        self.enter()?;
        let mut collections = self.collections.lock().await;
        let documents = collections.entry(collection.to_owned()).or_default();
        if documents.iter().any(|document| has_id(document, id)) {
            return Err(StoreError::Status {
                status: 409,
                message: format!("document {id} already exists"),
            });
        }
        data.insert("$id".to_owned(), Value::String(id.to_string()));
        documents.push(data.clone());
        Ok(data)
    }

    async fn update(
        &self,
        collection: &str,
        id: &DocumentId,
        data: RawDocument,
    ) -> Result<RawDocument, StoreError> {
        self.enter()?;
        let mut collections = self.collections.lock().await;
        let document = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|document| has_id(document, id)))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        // partial update, like the hosted service
        document.extend(data.into_iter().filter(|(key, _)| !key.starts_with('$')));
        Ok(document.clone())
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError> {
        self.enter()?;
        let mut collections = self.collections.lock().await;
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let position = documents
            .iter()
            .position(|document| has_id(document, id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        documents.remove(position);
        Ok(())
    }
}

#[async_trait]
impl AccountService for MemoryStore {
    async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<String, StoreError> {
        self.enter()?;
        if self.users.lock().await.get(email).map(String::as_str) != Some(password) {
            return Err(StoreError::InvalidCredentials);
        }
        let secret: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(40)
            .map(char::from)
            .collect();
        self.sessions.lock().await.push(secret.clone());
        Ok(secret)
    }

    async fn delete_session(&self, secret: &str) -> Result<(), StoreError> {
        self.enter()?;
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|session| session != secret);
        if sessions.len() == before {
            return Err(StoreError::Status {
                status: 401,
                message: "no such session".to_owned(),
            });
        }
        Ok(())
    }
}
