use serde::{Deserialize, Serialize};

use crate::entity::{item, top};

/// Number of items every Top carries.
pub const ITEM_COUNT: i32 = 5;
pub const TITLE_MAX_CHARS: usize = 100;
pub const ITEM_NAME_MAX_CHARS: usize = 50;

/// A stored Top with its five items, sorted by position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Top {
    /// Server-assigned UUID.
    #[schema(example = "0f8fad5b-d9cb-469f-a165-70867728950e")]
    pub id: String,
    #[schema(example = "Best Films")]
    pub title: String,
    #[schema(example = 0)]
    pub likes: i32,
    pub items: Vec<Item>,
}

/// One ranked entry of a Top.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Item {
    /// Rank slot, 1 to 5.
    #[schema(example = 1)]
    pub position: i32,
    #[schema(example = "The Godfather")]
    pub name: String,
    #[schema(example = 0)]
    pub likes: i32,
}

/// Request body for create and update.
///
/// Missing strings deserialize as empty so that validation reports them with
/// the same message as an explicit empty value.
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TopPayload {
    /// Must be absent on create and equal to the path id on update.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "titulo")]
    pub title: String,
    #[serde(default, alias = "curtidas")]
    pub likes: i32,
    #[serde(default, alias = "item", alias = "itens")]
    pub items: Vec<ItemPayload>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ItemPayload {
    #[serde(default, alias = "posicao")]
    pub position: i32,
    #[serde(default, alias = "nome")]
    pub name: String,
    #[serde(default, alias = "curtidas")]
    pub likes: i32,
}

/// Response of both like endpoints.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LikesResponse {
    /// Counter value after the increment.
    #[schema(example = 2)]
    pub likes: i32,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopListQuery {
    /// Case-sensitive substring the title must contain.
    #[serde(alias = "titulo")]
    pub title: Option<String>,
}

/// Check a payload against the five-item rule.
///
/// Stops at the first failure. Items are walked in position order against the
/// run 1..=5, so a duplicated position surfaces as the next expected position
/// being "not provided".
pub fn validate_top(payload: &TopPayload) -> Result<(), String> {
    if payload.title.is_empty() {
        return Err("title not provided".into());
    }
    if payload.title.chars().count() > TITLE_MAX_CHARS {
        return Err(format!("title must be at most {TITLE_MAX_CHARS} characters"));
    }
    if payload.likes < 0 {
        return Err("likes must be non-negative".into());
    }
    if payload.items.len() != ITEM_COUNT as usize {
        return Err(format!("exactly {ITEM_COUNT} items expected"));
    }

    let mut items: Vec<&ItemPayload> = payload.items.iter().collect();
    items.sort_by_key(|i| i.position);

    for (expected, item) in (1..=ITEM_COUNT).zip(items) {
        if item.position != expected {
            return Err(format!("item {expected} not provided"));
        }
        if item.name.is_empty() {
            return Err(format!("item {}: name not provided", item.position));
        }
        if item.name.chars().count() > ITEM_NAME_MAX_CHARS {
            return Err(format!(
                "item {}: name must be at most {ITEM_NAME_MAX_CHARS} characters",
                item.position
            ));
        }
        if item.likes < 0 {
            return Err(format!("item {}: likes must be non-negative", item.position));
        }
    }

    Ok(())
}

/// Apply the editable fields of a validated payload onto a stored Top.
///
/// Only the title and the item names change; like counters and positions stay
/// as stored.
pub fn merge_editable(stored: &mut Top, payload: &TopPayload) {
    stored.title = payload.title.clone();
    for item in &mut stored.items {
        if let Some(changed) = payload.items.iter().find(|p| p.position == item.position) {
            item.name = changed.name.clone();
        }
    }
}

impl Top {
    /// Build a new Top from a validated payload.
    pub fn from_payload(id: String, payload: TopPayload) -> Self {
        let mut items: Vec<Item> = payload
            .items
            .into_iter()
            .map(|i| Item {
                position: i.position,
                name: i.name,
                likes: i.likes,
            })
            .collect();
        items.sort_by_key(|i| i.position);

        Self {
            id,
            title: payload.title,
            likes: payload.likes,
            items,
        }
    }

    /// Assemble a Top from its row and its item rows.
    pub fn from_models(model: top::Model, items: Vec<item::Model>) -> Self {
        let mut items: Vec<Item> = items.into_iter().map(Item::from).collect();
        items.sort_by_key(|i| i.position);

        Self {
            id: model.id,
            title: model.title,
            likes: model.likes,
            items,
        }
    }

    pub fn item(&self, position: i32) -> Option<&Item> {
        self.items.iter().find(|i| i.position == position)
    }
}

impl From<item::Model> for Item {
    fn from(m: item::Model) -> Self {
        Self {
            position: m.position,
            name: m.name,
            likes: m.likes,
        }
    }
}
