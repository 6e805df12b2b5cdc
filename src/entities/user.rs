use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::middleware::error::{AppError, AppResult};
use crate::utils::money::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Worker,
    Advertiser,
    Admin,
}

impl UserRole {
    /// Worker and advertiser swap; admin keeps its role.
    pub fn switched(self) -> Self {
        match self {
            UserRole::Worker => UserRole::Advertiser,
            UserRole::Advertiser => UserRole::Worker,
            UserRole::Admin => UserRole::Admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Active,
    Banned,
    PendingVerification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum KycStatus {
    None,
    Pending,
    Verified,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    /// Projection of the session ledger, never written on its own.
    pub balance: Amount,
    pub avatar_url: String,
    pub username: String,
    pub phone_number: String,
    pub status: UserStatus,
    pub joined_at: NaiveDate,
    pub kyc_status: KycStatus,
    pub referral_count: u32,
}

impl User {
    pub fn require_role(&self, role: UserRole) -> AppResult<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::AuthorizationFail {
                required: format!("{role} role"),
            })
        }
    }
}

/// Partial user record merged over the login template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserOverrides {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub username: Option<String>,
    pub phone_number: Option<String>,
    pub balance: Option<Amount>,
    pub status: Option<UserStatus>,
    pub joined_at: Option<NaiveDate>,
    pub kyc_status: Option<KycStatus>,
    pub referral_count: Option<u32>,
}

impl UserOverrides {
    pub fn apply(self, user: User) -> User {
        User {
            id: self.id.unwrap_or(user.id),
            name: self.name.unwrap_or(user.name),
            email: self.email.unwrap_or(user.email),
            role: user.role,
            balance: self.balance.unwrap_or(user.balance),
            avatar_url: self.avatar_url.unwrap_or(user.avatar_url),
            username: self.username.unwrap_or(user.username),
            phone_number: self.phone_number.unwrap_or(user.phone_number),
            status: self.status.unwrap_or(user.status),
            joined_at: self.joined_at.unwrap_or(user.joined_at),
            kyc_status: self.kyc_status.unwrap_or(user.kyc_status),
            referral_count: self.referral_count.unwrap_or(user.referral_count),
        }
    }
}
