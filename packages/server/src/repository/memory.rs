use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::{StorageError, TopRepository};
use crate::models::top::Top;

/// In-process repository keyed by Top id.
///
/// Mutations go through `get_mut`, which holds the shard lock for the whole
/// read-modify-write.
#[derive(Default)]
pub struct MemoryTopRepository {
    tops: DashMap<String, Top>,
}

impl MemoryTopRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TopRepository for MemoryTopRepository {
    async fn list(&self, title_filter: Option<&str>) -> Result<Vec<Top>, StorageError> {
        let term = title_filter.unwrap_or_default();
        Ok(self
            .tops
            .iter()
            .filter(|entry| entry.title.contains(term))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn find(&self, id: &str) -> Result<Option<Top>, StorageError> {
        Ok(self.tops.get(id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, top: &Top) -> Result<(), StorageError> {
        match self.tops.entry(top.id.clone()) {
            Entry::Occupied(_) => Err(StorageError::DuplicateId(top.id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(top.clone());
                Ok(())
            }
        }
    }

    async fn update_content(&self, changed: &Top) -> Result<bool, StorageError> {
        let Some(mut stored) = self.tops.get_mut(&changed.id) else {
            return Ok(false);
        };

        stored.title = changed.title.clone();
        for item in &mut stored.items {
            if let Some(name) = changed.item(item.position).map(|i| i.name.clone()) {
                item.name = name;
            }
        }
        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.tops.remove(id).is_some())
    }

    async fn increment_top_likes(&self, id: &str) -> Result<Option<i32>, StorageError> {
        let Some(mut stored) = self.tops.get_mut(id) else {
            return Ok(None);
        };

        stored.likes = stored
            .likes
            .checked_add(1)
            .ok_or(StorageError::LikesLimit)?;
        Ok(Some(stored.likes))
    }

    async fn increment_item_likes(
        &self,
        id: &str,
        position: i32,
    ) -> Result<Option<i32>, StorageError> {
        let Some(mut stored) = self.tops.get_mut(id) else {
            return Ok(None);
        };

        let Some(item) = stored.items.iter_mut().find(|i| i.position == position) else {
            return Ok(None);
        };

        item.likes = item.likes.checked_add(1).ok_or(StorageError::LikesLimit)?;
        Ok(Some(item.likes))
    }
}
