use serde::{Deserialize, Serialize};

use crate::utils::money::Amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Lowest reward a task in this category may offer.
    pub min_price: Amount,
}
