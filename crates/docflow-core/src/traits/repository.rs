//! Generic repository trait for the external entity store.

use std::fmt::Debug;
use std::hash::Hash;

use async_trait::async_trait;

use crate::result::AppResult;

/// An entity that carries its own primary key.
pub trait Identifiable {
    /// The key type.
    type Id: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// Return the primary key.
    fn id(&self) -> Self::Id;
}

/// Generic store trait.
///
/// The workflow core never persists directly: services compute the new
/// state, then hand every updated or created entity to `save_all` in one
/// call. Entity-specific queries are built on top of `find_all`.
#[async_trait]
pub trait Repository<Entity>: Send + Sync + 'static
where
    Entity: Identifiable + Send + Sync + 'static,
{
    /// Find an entity by its primary key.
    async fn find_by_id(&self, id: &Entity::Id) -> AppResult<Option<Entity>>;

    /// Return every stored entity.
    async fn find_all(&self) -> AppResult<Vec<Entity>>;

    /// Insert or replace a single entity.
    async fn save(&self, entity: &Entity) -> AppResult<()>;

    /// Insert or replace several entities as one commit.
    async fn save_all(&self, entities: &[Entity]) -> AppResult<()>;

    /// Count stored entities.
    async fn count(&self) -> AppResult<u64>;
}
