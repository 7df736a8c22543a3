use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{LikeExpr, LockType};
use sea_orm::*;
use tracing::debug;

use super::{StorageError, TopRepository};
use crate::entity::{item, top};
use crate::models::shared::escape_like;
use crate::models::top::Top;

/// sea-orm backed repository. Each write runs in its own transaction.
#[derive(Clone)]
pub struct PgTopRepository {
    db: DatabaseConnection,
}

impl PgTopRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TopRepository for PgTopRepository {
    async fn list(&self, title_filter: Option<&str>) -> Result<Vec<Top>, StorageError> {
        let mut select = top::Entity::find();

        if let Some(term) = title_filter.filter(|t| !t.is_empty()) {
            select = select.filter(
                Expr::col(top::Column::Title)
                    .like(LikeExpr::new(format!("%{}%", escape_like(term))).escape('\\')),
            );
        }

        let tops = select.all(&self.db).await?;
        if tops.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = tops.iter().map(|t| t.id.clone()).collect();
        let mut items_by_top: HashMap<String, Vec<item::Model>> = HashMap::new();
        for row in item::Entity::find()
            .filter(item::Column::TopId.is_in(ids))
            .all(&self.db)
            .await?
        {
            items_by_top.entry(row.top_id.clone()).or_default().push(row);
        }

        Ok(tops
            .into_iter()
            .map(|model| {
                let items = items_by_top.remove(&model.id).unwrap_or_default();
                Top::from_models(model, items)
            })
            .collect())
    }

    async fn find(&self, id: &str) -> Result<Option<Top>, StorageError> {
        let Some(model) = top::Entity::find_by_id(id.to_owned()).one(&self.db).await? else {
            return Ok(None);
        };
        let items = find_items(&self.db, id).await?;

        Ok(Some(Top::from_models(model, items)))
    }

    async fn insert(&self, new_top: &Top) -> Result<(), StorageError> {
        let txn = self.db.begin().await?;

        let row = top::ActiveModel {
            id: Set(new_top.id.clone()),
            title: Set(new_top.title.clone()),
            likes: Set(new_top.likes),
            ..Default::default()
        };
        row.insert(&txn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                StorageError::DuplicateId(new_top.id.clone())
            }
            _ => StorageError::from(e),
        })?;

        item::Entity::insert_many(new_top.items.iter().map(|i| item::ActiveModel {
            top_id: Set(new_top.id.clone()),
            position: Set(i.position),
            name: Set(i.name.clone()),
            likes: Set(i.likes),
            ..Default::default()
        }))
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        Ok(())
    }

    async fn update_content(&self, changed: &Top) -> Result<bool, StorageError> {
        let txn = self.db.begin().await?;

        let Some(existing) = find_top_for_update(&txn, &changed.id).await? else {
            return Ok(false);
        };

        let mut active: top::ActiveModel = existing.into();
        active.title = Set(changed.title.clone());
        active.update(&txn).await?;

        for i in &changed.items {
            item::Entity::update_many()
                .col_expr(item::Column::Name, Expr::value(i.name.clone()))
                .filter(item::Column::TopId.eq(changed.id.as_str()))
                .filter(item::Column::Position.eq(i.position))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let txn = self.db.begin().await?;

        let removed_items = item::Entity::delete_many()
            .filter(item::Column::TopId.eq(id))
            .exec(&txn)
            .await?;
        let removed = top::Entity::delete_by_id(id.to_owned()).exec(&txn).await?;

        txn.commit().await?;
        debug!(
            id,
            items = removed_items.rows_affected,
            tops = removed.rows_affected,
            "Deleted top"
        );
        Ok(removed.rows_affected > 0)
    }

    async fn increment_top_likes(&self, id: &str) -> Result<Option<i32>, StorageError> {
        let txn = self.db.begin().await?;

        let Some(existing) = find_top_for_update(&txn, id).await? else {
            return Ok(None);
        };

        let likes = existing
            .likes
            .checked_add(1)
            .ok_or(StorageError::LikesLimit)?;
        let mut active: top::ActiveModel = existing.into();
        active.likes = Set(likes);
        active.update(&txn).await?;

        txn.commit().await?;
        Ok(Some(likes))
    }

    async fn increment_item_likes(
        &self,
        id: &str,
        position: i32,
    ) -> Result<Option<i32>, StorageError> {
        let txn = self.db.begin().await?;

        let Some(existing) = item::Entity::find_by_id((id.to_owned(), position))
            .lock(LockType::Update)
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };

        let likes = existing
            .likes
            .checked_add(1)
            .ok_or(StorageError::LikesLimit)?;
        let mut active: item::ActiveModel = existing.into();
        active.likes = Set(likes);
        active.update(&txn).await?;

        txn.commit().await?;
        Ok(Some(likes))
    }
}

async fn find_items<C: ConnectionTrait>(db: &C, top_id: &str) -> Result<Vec<item::Model>, DbErr> {
    item::Entity::find()
        .filter(item::Column::TopId.eq(top_id))
        .order_by_asc(item::Column::Position)
        .all(db)
        .await
}

async fn find_top_for_update(
    txn: &DatabaseTransaction,
    id: &str,
) -> Result<Option<top::Model>, DbErr> {
    top::Entity::find_by_id(id.to_owned())
        .lock(LockType::Update)
        .one(txn)
        .await
}
