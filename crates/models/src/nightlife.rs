use serde::{Deserialize, Serialize};

use crate::de::{number_or_string, parse_date, parse_time};
use crate::{ModelError, Searchable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightlifeEvent {
    pub id: i64,
    #[serde(alias = "event_name")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "date")]
    pub event_date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventForm {
    #[serde(rename = "event_name", alias = "eventName", alias = "name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "eventDate")]
    pub event_date: String,
    #[serde(alias = "startTime")]
    pub start_time: String,
    #[serde(alias = "endTime")]
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl EventForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() { return Err(ModelError::required("event_name")); }
        parse_date("event_date", &self.event_date)?;
        parse_time("start_time", &self.start_time)?;
        parse_time("end_time", &self.end_time)?;
        if self.capacity == Some(0) {
            return Err(ModelError::Validation("capacity must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryType {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "number_or_string")]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryTypeForm {
    pub name: String,
    pub price: f64,
}

impl EntryTypeForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() { return Err(ModelError::required("name")); }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ModelError::Validation("price must be a non-negative amount".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: i64,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotForm {
    #[serde(alias = "startTime")]
    pub start_time: String,
    #[serde(alias = "endTime")]
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl TimeSlotForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        let start = parse_time("start_time", &self.start_time)?;
        let end = parse_time("end_time", &self.end_time)?;
        if end <= start {
            return Err(ModelError::Validation("time slot must end after it starts".into()));
        }
        Ok(())
    }
}

impl Searchable for NightlifeEvent {
    fn search_fields(&self) -> Vec<String> {
        let mut v = vec![self.name.clone()];
        v.extend(self.description.clone());
        v.extend(self.event_date.clone());
        v
    }
}
