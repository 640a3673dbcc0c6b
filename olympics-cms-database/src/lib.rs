pub mod appwrite;
pub mod error;
pub mod id;
pub mod memory;
pub mod models;
pub mod store;

use std::sync::Arc;

use appwrite::AppwriteStore;
use error::StoreError;
use olympics_cms_config::StoreConfig;

pub use crate::id::DocumentId;
pub use crate::store::{AccountService, Collection, DocumentList, DocumentStore, ListQuery};

// https://appwrite.io/docs/apis/rest

/// Connects to the hosted document database described by `config`.
pub fn get_store(config: &StoreConfig) -> Result<Arc<AppwriteStore>, StoreError> {
    Ok(Arc::new(AppwriteStore::new(config)?))
}
