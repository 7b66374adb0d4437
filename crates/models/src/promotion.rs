use serde::{Deserialize, Serialize};

use crate::de::{opt_number_or_string, parse_date};
use crate::{ModelError, Searchable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: i64,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub discount_percentage: Option<f64>,
    #[serde(default, alias = "promotion_image")]
    pub image: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "startDate")]
    pub start_date: String,
    #[serde(alias = "endDate")]
    pub end_date: String,
    #[serde(default, alias = "discountPercentage", skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
}

impl PromotionForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().is_empty() { return Err(ModelError::required("title")); }
        let start = parse_date("start_date", &self.start_date)?;
        let end = parse_date("end_date", &self.end_date)?;
        if end < start {
            return Err(ModelError::Validation("end_date must not be before start_date".into()));
        }
        if let Some(d) = self.discount_percentage {
            if !(0.0..=100.0).contains(&d) {
                return Err(ModelError::Validation(
                    "discount_percentage must be within 0..=100".into(),
                ));
            }
        }
        Ok(())
    }
}

impl Searchable for Promotion {
    fn search_fields(&self) -> Vec<String> {
        let mut v = vec![self.title.clone()];
        v.extend(self.description.clone());
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dates_map_and_validate() {
        let f: PromotionForm = serde_json::from_value(json!({
            "title": "Happy hour", "startDate": "2024-02-01", "endDate": "2024-02-01"
        }))
        .unwrap();
        assert!(f.validate().is_ok());
        let wire = serde_json::to_value(&f).unwrap();
        assert_eq!(wire["start_date"], "2024-02-01");
        assert_eq!(wire["end_date"], "2024-02-01");
    }

    #[test]
    fn discount_out_of_range() {
        let f = PromotionForm {
            title: "x".into(),
            description: String::new(),
            start_date: "2024-02-01".into(),
            end_date: "2024-02-02".into(),
            discount_percentage: Some(120.0),
        };
        assert!(f.validate().is_err());
    }
}
