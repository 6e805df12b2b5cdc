use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

use crate::entities::user::UserRole;

static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{3,30}$").expect("valid username regex"));

// short numbers are allowed, registration falls back to a random id for them
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{1,15}$").expect("valid phone regex"));

pub fn trim_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

pub fn validate_username(u: &str) -> Result<(), ValidationError> {
    if USERNAME_REGEX.is_match(u) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_username")
            .with_message("Letters, numbers and '_'. Between 3 and 30 characters".into()))
    }
}

pub fn validate_phone_number(u: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(u) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_phone_number"))
    }
}

/// Only marketplace roles can be picked by the client.
pub fn validate_public_role(role: &UserRole) -> Result<(), ValidationError> {
    match role {
        UserRole::Worker | UserRole::Advertiser => Ok(()),
        UserRole::Admin => Err(ValidationError::new("invalid_role")
            .with_message("Role must be WORKER or ADVERTISER".into())),
    }
}
