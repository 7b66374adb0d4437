use serde::{Deserialize, Serialize};

use crate::de::number_or_string;
use crate::{ModelError, Searchable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CategoryForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() { return Err(ModelError::required("name")); }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "number_or_string")]
    pub price: f64,
    #[serde(default, alias = "category_id")]
    pub category: Option<i64>,
    #[serde(default, alias = "image_url")]
    pub image: Option<String>,
    #[serde(default = "yes", alias = "available")]
    pub is_available: bool,
}

fn yes() -> bool { true }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(alias = "categoryId", alias = "category_id")]
    pub category: i64,
    #[serde(default = "yes", alias = "isAvailable")]
    pub is_available: bool,
}

impl MenuItemForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() { return Err(ModelError::required("name")); }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ModelError::Validation("price must be a non-negative amount".into()));
        }
        Ok(())
    }
}

impl Searchable for MenuItem {
    fn search_fields(&self) -> Vec<String> {
        let mut v = vec![self.name.clone(), format!("{:.2}", self.price)];
        v.extend(self.description.clone());
        v
    }
}

impl Searchable for MenuCategory {
    fn search_fields(&self) -> Vec<String> {
        let mut v = vec![self.name.clone()];
        v.extend(self.description.clone());
        v
    }
}
