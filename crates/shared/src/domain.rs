use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidItem;

/// Opaque identifier assigned by the collection service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Client-side id for items that never reached the service.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(rename = "nome", alias = "name")]
    pub name: String,
    #[serde(rename = "categoria", alias = "category")]
    pub category: String,
    #[serde(rename = "preco", alias = "price")]
    pub price: f64,
    #[serde(rename = "descricao", alias = "description", default)]
    pub description: String,
    #[serde(
        rename = "imagem",
        alias = "imageUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

impl Item {
    /// Items coming off the wire are trusted for shape only; this checks the
    /// price the same way [`NewItem::new`] does.
    pub fn validate(&self) -> Result<(), InvalidItem> {
        check_price(self.price)
    }

    pub fn from_new(id: ItemId, new: NewItem) -> Self {
        Self {
            id,
            name: new.name,
            category: new.category,
            price: new.price,
            description: new.description,
            image_url: new.image_url,
        }
    }
}

/// Creation payload: an [`Item`] without its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "imagem", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "quantidade_estoque", default)]
    pub stock_quantity: u32,
}

impl NewItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        description: impl Into<String>,
    ) -> Result<Self, InvalidItem> {
        check_price(price)?;
        Ok(Self {
            name: name.into(),
            category: category.into(),
            price,
            description: description.into(),
            image_url: None,
            stock_quantity: 0,
        })
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_stock_quantity(mut self, stock_quantity: u32) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }
}

/// Partial update body; absent fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "preco", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "imagem", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
    }

    pub fn validate(&self) -> Result<(), InvalidItem> {
        if let Some(price) = self.price {
            check_price(price)?;
        }
        Ok(())
    }
}

fn check_price(price: f64) -> Result<(), InvalidItem> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(InvalidItem::Price(price))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    #[serde(rename = "nome", alias = "name")]
    Name,
    #[serde(rename = "preco", alias = "price")]
    Price,
    #[serde(rename = "categoria", alias = "category")]
    Category,
}

impl SortField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" | "nome" => Some(Self::Name),
            "price" | "preco" => Some(Self::Price),
            "category" | "categoria" => Some(Self::Category),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Category => "category",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub search_name: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(rename = "sortBy")]
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl FilterCriteria {
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(search_name) = patch.search_name {
            self.search_name = search_name;
        }
        if let Some(min_price) = patch.min_price {
            self.min_price = min_price;
        }
        if let Some(max_price) = patch.max_price {
            self.max_price = max_price;
        }
        if let Some(sort_field) = patch.sort_field {
            self.sort_field = sort_field;
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = sort_order;
        }
    }
}

/// Partial [`FilterCriteria`]. `None` leaves a field as is; for the price
/// bounds `Some(None)` clears the bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub search_name: Option<String>,
    pub min_price: Option<Option<f64>>,
    pub max_price: Option<Option<f64>>,
    pub sort_field: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

impl FilterPatch {
    pub fn search(name: impl Into<String>) -> Self {
        Self {
            search_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn min_price(bound: Option<f64>) -> Self {
        Self {
            min_price: Some(bound),
            ..Self::default()
        }
    }

    pub fn max_price(bound: Option<f64>) -> Self {
        Self {
            max_price: Some(bound),
            ..Self::default()
        }
    }

    pub fn sort(field: SortField, order: SortOrder) -> Self {
        Self {
            sort_field: Some(field),
            sort_order: Some(order),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Profile stored next to the session credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub signed_in_at: DateTime<Utc>,
}
