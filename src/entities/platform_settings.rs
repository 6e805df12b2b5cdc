use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::money::{naira, Amount};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PlatformSettings {
    #[validate(range(min = 1))]
    pub min_withdrawal_limit: Amount,
    #[validate(range(min = 0))]
    pub referral_bonus_amount: Amount,
    #[validate(range(min = 1))]
    pub min_task_price: Amount,
    pub payment_gateway_public_key: String,
    pub payment_gateway_secret_key: String,
    pub payment_gateway_enabled: bool,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            min_withdrawal_limit: naira(1_000),
            referral_bonus_amount: naira(500),
            min_task_price: naira(20),
            payment_gateway_public_key: "pk_test_xxxxxxxxxxxxxxxxxxxx".to_string(),
            payment_gateway_secret_key: "sk_test_xxxxxxxxxxxxxxxxxxxx".to_string(),
            payment_gateway_enabled: true,
        }
    }
}
