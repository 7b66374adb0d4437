use serde::{Deserialize, Serialize};

use crate::de::{number_or_string, opt_number_or_string};
use crate::{ModelError, Searchable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankDetails {
    #[serde(default)]
    pub id: Option<i64>,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    #[serde(default, alias = "ifsc_code", alias = "sort_code")]
    pub routing_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankDetailsForm {
    #[serde(alias = "bankName")]
    pub bank_name: String,
    #[serde(alias = "accountName")]
    pub account_name: String,
    #[serde(alias = "accountNumber")]
    pub account_number: String,
    #[serde(default, alias = "routingCode", skip_serializing_if = "Option::is_none")]
    pub routing_code: Option<String>,
}

impl BankDetailsForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.bank_name.trim().is_empty() { return Err(ModelError::required("bank_name")); }
        if self.account_name.trim().is_empty() { return Err(ModelError::required("account_name")); }
        let digits = self.account_number.trim();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ModelError::Validation("account_number must be alphanumeric".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Pending,
    Approved,
    Rejected,
    Paid,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub id: i64,
    #[serde(deserialize_with = "number_or_string")]
    pub amount: f64,
    pub status: WithdrawalStatus,
    #[serde(default, alias = "requested_at")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalForm {
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl WithdrawalForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ModelError::Validation("amount must be greater than zero".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EarningsSummary {
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub total_earnings: Option<f64>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub available_balance: Option<f64>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub pending_balance: Option<f64>,
    #[serde(default)]
    pub total_orders: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsEntry {
    pub date: String,
    #[serde(deserialize_with = "number_or_string")]
    pub amount: f64,
    #[serde(default)]
    pub orders: Option<u64>,
}

impl Searchable for WithdrawalRequest {
    fn search_fields(&self) -> Vec<String> {
        let mut v = vec![format!("{:.2}", self.amount)];
        v.extend(
            serde_json::to_value(self.status).ok().and_then(|s| s.as_str().map(str::to_string)),
        );
        v.extend(self.created_at.clone());
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn withdrawal_amount_must_be_positive() {
        assert!(WithdrawalForm { amount: 0.0, note: None }.validate().is_err());
        assert!(WithdrawalForm { amount: f64::NAN, note: None }.validate().is_err());
        assert!(WithdrawalForm { amount: 10.0, note: None }.validate().is_ok());
    }

    #[test]
    fn account_number_characters() {
        let f = BankDetailsForm {
            bank_name: "B".into(),
            account_name: "A".into(),
            account_number: "12-34".into(),
            routing_code: None,
        };
        assert!(f.validate().is_err());
    }

    #[test]
    fn withdrawal_search_includes_status() {
        let w = WithdrawalRequest {
            id: 1,
            amount: 5.0,
            status: WithdrawalStatus::Pending,
            created_at: None,
            note: None,
        };
        assert_eq!(w.search_fields(), vec!["5.00".to_string(), "pending".to_string()]);
    }
}
