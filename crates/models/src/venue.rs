use serde::{Deserialize, Serialize};

use crate::{ModelError, Searchable};

/// The caller's own venue as returned by the "my venue" endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    #[serde(default, rename = "venue_name", alias = "name")]
    pub name: Option<String>,
    #[serde(default)]
    pub user: Option<VenueUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueUser {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VenueProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "venue_name", alias = "name", default)]
    pub venue_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, alias = "phone")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "venue_type")]
    pub category: Option<String>,
    #[serde(default, alias = "profile_image")]
    pub profile_picture: Option<String>,
}

/// Profile update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProfileForm {
    #[serde(rename = "venue_name", alias = "venueName")]
    pub venue_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, alias = "phoneNumber", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.venue_name.trim().is_empty() { return Err(ModelError::required("venue_name")); }
        if let Some(email) = &self.email {
            if !email.contains('@') { return Err(ModelError::Validation("invalid email".into())); }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Opening window for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingHours {
    #[serde(alias = "dayOfWeek", rename = "day_of_week")]
    pub day: Weekday,
    #[serde(default, alias = "openTime", rename = "open_time")]
    pub open_time: Option<String>,
    #[serde(default, alias = "closeTime", rename = "close_time")]
    pub close_time: Option<String>,
    #[serde(default, alias = "isClosed", rename = "is_closed")]
    pub is_closed: bool,
}

impl OperatingHours {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.is_closed { return Ok(()); }
        let open = self.open_time.as_deref().ok_or_else(|| ModelError::required("open_time"))?;
        let close = self.close_time.as_deref().ok_or_else(|| ModelError::required("close_time"))?;
        crate::de::parse_time("open_time", open)?;
        crate::de::parse_time("close_time", close)?;
        Ok(())
    }
}

impl Searchable for VenueProfile {
    fn search_fields(&self) -> Vec<String> {
        let mut v = vec![self.venue_name.clone()];
        v.extend(self.address.clone());
        v.extend(self.email.clone());
        v
    }
}
