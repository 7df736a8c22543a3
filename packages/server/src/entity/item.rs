use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "String(StringLen::N(36))")]
    pub top_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub position: i32, // 1..=5
    #[sea_orm(belongs_to, from = "top_id", to = "id", on_delete = "Cascade")]
    pub top: HasOne<super::top::Entity>,

    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub name: String,
    pub likes: i32,
}

impl ActiveModelBehavior for ActiveModel {}
