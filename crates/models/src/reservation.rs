use serde::{Deserialize, Serialize};

use crate::{ModelError, Searchable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Seated,
    Completed,
    Cancelled,
    #[serde(rename = "no_show")]
    NoShow,
    #[serde(other)]
    Unknown,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Seated => "seated",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::NoShow => "no_show",
            ReservationStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub guest_name: String,
    pub party_size: u32,
    #[serde(default, alias = "date")]
    pub reservation_date: Option<String>,
    #[serde(default, alias = "time")]
    pub reservation_time: Option<String>,
    pub status: ReservationStatus,
    #[serde(default, alias = "phone")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
}

/// Create/update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationForm {
    #[serde(alias = "guestName")]
    pub guest_name: String,
    #[serde(alias = "partySize")]
    pub party_size: u32,
    #[serde(alias = "reservationDate")]
    pub reservation_date: String,
    #[serde(alias = "reservationTime")]
    pub reservation_time: String,
    #[serde(default, alias = "phoneNumber", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, alias = "specialRequests", skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl ReservationForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.guest_name.trim().is_empty() { return Err(ModelError::required("guest_name")); }
        if self.party_size == 0 {
            return Err(ModelError::Validation("party_size must be at least 1".into()));
        }
        crate::de::parse_date("reservation_date", &self.reservation_date)?;
        crate::de::parse_time("reservation_time", &self.reservation_time)?;
        Ok(())
    }
}

impl Searchable for Reservation {
    fn search_fields(&self) -> Vec<String> {
        let mut v = vec![
            self.guest_name.clone(),
            self.party_size.to_string(),
            self.status.as_str().to_string(),
        ];
        v.extend(self.reservation_date.clone());
        v.extend(self.phone_number.clone());
        v
    }
}
