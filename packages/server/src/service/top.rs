use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::models::top::{ITEM_COUNT, Top, TopPayload, merge_editable, validate_top};
use crate::repository::{StorageError, TopRepository};

#[derive(Debug, Error)]
pub enum TopError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    IdConflict(&'static str),

    #[error("Top '{0}' not found")]
    NotFound(String),

    #[error("Top '{id}' has no item at position {position}")]
    ItemNotFound { id: String, position: i32 },

    #[error("likes limit reached")]
    LikesLimit,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn like_storage_error(err: StorageError) -> TopError {
    match err {
        StorageError::LikesLimit => TopError::LikesLimit,
        other => TopError::Storage(other),
    }
}

/// Use cases over Tops. Cheap to clone; all clones share one repository.
#[derive(Clone)]
pub struct TopService {
    repo: Arc<dyn TopRepository>,
}

impl TopService {
    pub fn new(repo: Arc<dyn TopRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, title_filter: Option<&str>) -> Result<Vec<Top>, TopError> {
        Ok(self.repo.list(title_filter).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Top, TopError> {
        self.repo
            .find(id)
            .await?
            .ok_or_else(|| TopError::NotFound(id.to_owned()))
    }

    #[instrument(skip(self, payload), fields(title = %payload.title))]
    pub async fn create(&self, payload: TopPayload) -> Result<Top, TopError> {
        if payload.id.as_deref().is_some_and(|id| !id.is_empty()) {
            return Err(TopError::IdConflict("id must not be supplied"));
        }
        validate_top(&payload).map_err(TopError::Validation)?;

        let top = Top::from_payload(Uuid::new_v4().to_string(), payload);
        self.repo.insert(&top).await?;

        info!(id = %top.id, "Created top");
        Ok(top)
    }

    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: &str, payload: TopPayload) -> Result<Top, TopError> {
        if payload.id.as_deref() != Some(id) {
            return Err(TopError::IdConflict("inconsistent id"));
        }

        let mut stored = self.get(id).await?;
        validate_top(&payload).map_err(TopError::Validation)?;

        merge_editable(&mut stored, &payload);
        if !self.repo.update_content(&stored).await? {
            return Err(TopError::NotFound(id.to_owned()));
        }

        // likes may have moved since the read above
        self.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), TopError> {
        if !self.repo.delete(id).await? {
            return Err(TopError::NotFound(id.to_owned()));
        }
        info!("Deleted top");
        Ok(())
    }

    pub async fn like_top(&self, id: &str) -> Result<i32, TopError> {
        self.repo
            .increment_top_likes(id)
            .await
            .map_err(like_storage_error)?
            .ok_or_else(|| TopError::NotFound(id.to_owned()))
    }

    pub async fn like_item(&self, id: &str, position: i32) -> Result<i32, TopError> {
        let missing = || TopError::ItemNotFound {
            id: id.to_owned(),
            position,
        };

        if !(1..=ITEM_COUNT).contains(&position) {
            return Err(missing());
        }

        match self
            .repo
            .increment_item_likes(id, position)
            .await
            .map_err(like_storage_error)?
        {
            Some(likes) => Ok(likes),
            None => match self.repo.find(id).await? {
                None => Err(TopError::NotFound(id.to_owned())),
                Some(_) => Err(missing()),
            },
        }
    }
}
