use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::notification::{Notification, NotificationType};
use crate::entities::transaction::{Ledger, Transaction, TransactionStatus, TransactionType};
use crate::entities::user::{KycStatus, User, UserStatus};
use crate::middleware::error::AppResult;
use crate::utils::money::Amount;

pub const SESSION_KEY: &str = "microgigs_user";

/// Everything one logged-in client owns. Every transition returns a new
/// snapshot and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user: User,
    pub notifications: Vec<Notification>,
    pub ledger: Ledger,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Opens a session; a non-zero starting balance becomes the opening
    /// ledger entry.
    pub fn open(user: User, notifications: Vec<Notification>) -> Self {
        let ledger = match user.balance {
            0 => Ledger::default(),
            balance => Ledger::opening(balance),
        };
        Self {
            id: Uuid::new_v4().to_string(),
            user: User {
                balance: ledger.balance(),
                ..user
            },
            notifications,
            ledger,
            created_at: Utc::now(),
        }
    }

    pub fn storage_key(&self) -> String {
        format!("{SESSION_KEY}-{}", self.id)
    }

    pub fn balance(&self) -> Amount {
        self.ledger.balance()
    }

    pub fn with_transaction(&self, tx: Transaction) -> AppResult<Self> {
        let ledger = self.ledger.appended(tx)?;
        Ok(Self {
            user: User {
                balance: ledger.balance(),
                ..self.user.clone()
            },
            ledger,
            ..self.clone()
        })
    }

    /// Additive, with no lower bound.
    pub fn update_balance(&self, delta: Amount) -> AppResult<Self> {
        self.with_transaction(Transaction::new(
            delta,
            TransactionType::Adjustment,
            TransactionStatus::Success,
            "Balance adjustment",
        ))
    }

    pub fn with_user_status(&self, status: UserStatus) -> Self {
        Self {
            user: User {
                status,
                ..self.user.clone()
            },
            ..self.clone()
        }
    }

    pub fn switch_role(&self) -> Self {
        Self {
            user: User {
                role: self.user.role.switched(),
                ..self.user.clone()
            },
            ..self.clone()
        }
    }

    pub fn mark_notification_read(&self, notification_id: &str) -> Self {
        let notifications = self
            .notifications
            .iter()
            .map(|n| match n.id == notification_id {
                true => Notification {
                    read: true,
                    ..n.clone()
                },
                false => n.clone(),
            })
            .collect();
        Self {
            notifications,
            ..self.clone()
        }
    }

    pub fn mark_all_notifications_read(&self) -> Self {
        let notifications = self
            .notifications
            .iter()
            .map(|n| Notification {
                read: true,
                ..n.clone()
            })
            .collect();
        Self {
            notifications,
            ..self.clone()
        }
    }

    pub fn with_notification(&self, notification: Notification) -> Self {
        let mut notifications = Vec::with_capacity(self.notifications.len() + 1);
        notifications.push(notification);
        notifications.extend(self.notifications.iter().cloned());
        Self {
            notifications,
            ..self.clone()
        }
    }

    pub fn with_kyc_submitted(&self) -> Self {
        let next = Self {
            user: User {
                kyc_status: KycStatus::Pending,
                ..self.user.clone()
            },
            ..self.clone()
        };
        next.with_notification(Notification::unread(
            &self.user.id,
            NotificationType::Info,
            "KYC Submitted",
            "Your identity verification documents have been received and are under review.",
        ))
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fixtures;

    fn session() -> Session {
        let user = fixtures::template_user();
        let notifications = fixtures::demo_notifications(&user.id);
        Session::open(user, notifications)
    }

    #[test]
    fn opening_balance_is_recorded_in_ledger() {
        let s = session();
        assert_eq!(s.user.balance, 450_050);
        assert_eq!(s.balance(), s.user.balance);
        assert_eq!(s.ledger.len(), 1);
    }

    #[test]
    fn zero_balance_opens_empty_ledger() {
        let user = User {
            balance: 0,
            ..fixtures::template_user()
        };
        let s = Session::open(user, vec![]);
        assert!(s.ledger.is_empty());
        assert_eq!(s.user.balance, 0);
    }

    #[test]
    fn update_balance_has_no_lower_bound() {
        let s = session().update_balance(-1_000_000).unwrap();
        assert_eq!(s.user.balance, 450_050 - 1_000_000);
        assert_eq!(s.balance(), s.user.balance);
    }

    #[test]
    fn mark_read_only_touches_matching_entry() {
        let s = session();
        let target = s.notifications.iter().find(|n| !n.read).unwrap().id.clone();
        let next = s.mark_notification_read(&target);
        for (before, after) in s.notifications.iter().zip(next.notifications.iter()) {
            if before.id == target {
                assert!(after.read);
            } else {
                assert_eq!(before, after);
            }
        }
        assert_eq!(next.unread_count(), 0);
    }

    #[test]
    fn unknown_notification_id_is_noop() {
        let s = session();
        assert_eq!(s.mark_notification_read("missing"), s);
    }

    #[test]
    fn kyc_submission_sets_pending_and_prepends_info() {
        let s = session().with_kyc_submitted();
        assert_eq!(s.user.kyc_status, KycStatus::Pending);
        let first = &s.notifications[0];
        assert_eq!(first.title, "KYC Submitted");
        assert_eq!(first.r#type, NotificationType::Info);
        assert!(!first.read);
    }

    #[test]
    fn switch_role_twice_restores_role() {
        let s = session();
        assert_eq!(s.switch_role().switch_role().user.role, s.user.role);
        assert_ne!(s.switch_role().user.role, s.user.role);
    }
}
