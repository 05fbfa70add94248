//! DashMap-backed generic repository.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use docflow_core::result::AppResult;
use docflow_core::traits::{Identifiable, Repository};

/// In-memory repository keyed by entity id.
///
/// Clones share the same underlying map.
pub struct MemoryRepository<E: Identifiable> {
    /// Stored entities.
    items: Arc<DashMap<E::Id, E>>,
}

impl<E> MemoryRepository<E>
where
    E: Identifiable + Clone,
{
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            items: Arc::new(DashMap::new()),
        }
    }

    /// Create a repository holding `entities`.
    pub fn with_entities(entities: impl IntoIterator<Item = E>) -> Self {
        let repo = Self::new();
        for entity in entities {
            repo.items.insert(entity.id(), entity);
        }
        repo
    }

    /// Copy out every stored entity.
    pub fn snapshot(&self) -> Vec<E> {
        self.items.iter().map(|entry| entry.value().clone()).collect()
    }
}

impl<E> Default for MemoryRepository<E>
where
    E: Identifiable + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Identifiable> Clone for MemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<E: Identifiable> fmt::Debug for MemoryRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRepository")
            .field("len", &self.items.len())
            .finish()
    }
}

#[async_trait]
impl<E> Repository<E> for MemoryRepository<E>
where
    E: Identifiable + Clone + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: &E::Id) -> AppResult<Option<E>> {
        Ok(self.items.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_all(&self) -> AppResult<Vec<E>> {
        Ok(self.snapshot())
    }

    async fn save(&self, entity: &E) -> AppResult<()> {
        self.items.insert(entity.id(), entity.clone());
        Ok(())
    }

    async fn save_all(&self, entities: &[E]) -> AppResult<()> {
        for entity in entities {
            self.items.insert(entity.id(), entity.clone());
        }
        debug!(count = entities.len(), "Saved entities");
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.items.len() as u64)
    }
}
