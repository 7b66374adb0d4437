use serde::{Deserialize, Serialize};

use crate::ModelError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.email.contains('@') { return Err(ModelError::Validation("invalid email".into())); }
        if self.password.is_empty() { return Err(ModelError::required("password")); }
        Ok(())
    }
}

/// Keys under which the login endpoint has been seen to return the token.
pub const TOKEN_KEYS: [&str; 5] = ["token", "access", "access_token", "key", "auth_token"];

/// Pull the bearer token out of a login response, looking at the top level
/// first and then inside a `data` envelope.
pub fn extract_token(body: &serde_json::Value) -> Option<String> {
    let find = |v: &serde_json::Value| {
        TOKEN_KEYS
            .iter()
            .find_map(|k| {
                v.get(*k).and_then(|t| t.as_str()).filter(|t| !t.is_empty()).map(str::to_string)
            })
    };
    find(body).or_else(|| body.get("data").and_then(find))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_found_under_any_known_key() {
        assert_eq!(extract_token(&json!({"token": "a"})).as_deref(), Some("a"));
        assert_eq!(extract_token(&json!({"access": "b"})).as_deref(), Some("b"));
        assert_eq!(extract_token(&json!({"data": {"access_token": "c"}})).as_deref(), Some("c"));
        assert_eq!(extract_token(&json!({"key": ""})), None);
        assert_eq!(extract_token(&json!({"message": "ok"})), None);
    }

    #[test]
    fn login_validation() {
        assert!(LoginRequest { email: "x".into(), password: "p".into() }.validate().is_err());
        assert!(LoginRequest { email: "a@b.c".into(), password: "".into() }.validate().is_err());
        assert!(LoginRequest { email: "a@b.c".into(), password: "p".into() }.validate().is_ok());
    }
}
