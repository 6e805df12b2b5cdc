//! Demo records the marketplace starts with.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::entities::category::Category;
use crate::entities::dispute::{Dispute, DisputeStatus};
use crate::entities::kyc_request::KycRequest;
use crate::entities::money_movement::{Deposit, ReviewStatus, WithdrawalMethod, WithdrawalRequest};
use crate::entities::notification::{Notification, NotificationType};
use crate::entities::platform_settings::PlatformSettings;
use crate::entities::task::{ProofType, Task, TaskStatus};
use crate::entities::user::{KycStatus, User, UserOverrides, UserRole, UserStatus};
use crate::models::market_board::MarketBoard;
use crate::utils::money::naira;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn instant(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The account every simulated login starts from.
pub fn template_user() -> User {
    User {
        id: "u1".to_string(),
        name: "Alex Worker".to_string(),
        email: "alex@microgigs.com".to_string(),
        role: UserRole::Worker,
        balance: 450_050,
        avatar_url: "https://picsum.photos/200/200".to_string(),
        username: "alex_worker".to_string(),
        phone_number: "08012345678".to_string(),
        status: UserStatus::Active,
        joined_at: day(2023, 1, 15),
        kyc_status: KycStatus::None,
        referral_count: 3,
    }
}

pub fn admin_overrides(email: &str) -> UserOverrides {
    UserOverrides {
        id: Some("admin-root".to_string()),
        name: Some("System Administrator".to_string()),
        email: Some(email.to_string()),
        username: Some("sysadmin".to_string()),
        avatar_url: Some(
            "https://ui-avatars.com/api/?name=System+Admin&background=0f172a&color=fff".to_string(),
        ),
        kyc_status: Some(KycStatus::Verified),
        ..Default::default()
    }
}

pub fn demo_notifications(user_id: &str) -> Vec<Notification> {
    vec![
        Notification {
            id: "n1".to_string(),
            user_id: user_id.to_string(),
            title: "Task Approved".to_string(),
            message: "Your submission for \"Follow Instagram Page\" was approved. +₦50".to_string(),
            r#type: NotificationType::Success,
            read: false,
            created_at: instant(2023, 10, 27, 10),
        },
        Notification {
            id: "n2".to_string(),
            user_id: user_id.to_string(),
            title: "Welcome to MicroGigs".to_string(),
            message: "Complete your profile to start earning more.".to_string(),
            r#type: NotificationType::Info,
            read: true,
            created_at: instant(2023, 10, 20, 9),
        },
    ]
}

fn directory_user(id: &str, name: &str, email: &str, username: &str, phone: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        avatar_url: format!("https://ui-avatars.com/api/?name={}", name.replace(' ', "+")),
        username: username.to_string(),
        phone_number: phone.to_string(),
        referral_count: 0,
        ..template_user()
    }
}

#[allow(clippy::too_many_arguments)]
fn task(
    id: &str,
    advertiser_id: &str,
    title: &str,
    description: &str,
    category: &str,
    platform: &str,
    reward: i64,
    slots: (u32, u32),
    status: TaskStatus,
    requirements: &[&str],
    expiry_date: NaiveDate,
) -> Task {
    Task {
        id: id.to_string(),
        advertiser_id: advertiser_id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        platform: platform.to_string(),
        reward: naira(reward),
        total_slots: slots.0,
        filled_slots: slots.1,
        status,
        requirements: requirements.iter().map(|r| r.to_string()).collect(),
        created_at: Utc::now(),
        expiry_date: Some(expiry_date),
        proof_type: Some(ProofType::Screenshot),
    }
}

pub fn seed_tasks() -> Vec<Task> {
    vec![
        task(
            "t1",
            "a1",
            "Follow our Instagram Page",
            "Go to the link, follow the account, and like the last 3 posts.",
            "Social Media",
            "Instagram",
            50,
            (1000, 450),
            TaskStatus::Active,
            &["Screenshot of following", "Username used"],
            day(2023, 12, 31),
        ),
        task(
            "t2",
            "a2",
            "Test new Mobile App Signup",
            "Download our app, sign up, and verify email.",
            "App Testing",
            "Android",
            350,
            (100, 88),
            TaskStatus::Active,
            &["Screenshot of welcome email", "Email address used"],
            day(2023, 11, 30),
        ),
        task(
            "t3",
            "a1",
            "Watch YouTube Video (3 mins)",
            "Watch the full video and comment related to the content.",
            "Video Marketing",
            "YouTube",
            80,
            (500, 120),
            TaskStatus::Active,
            &["Screenshot of watch time", "Screenshot of comment"],
            day(2023, 12, 15),
        ),
        task(
            "t4",
            "a3",
            "Write a Review on Trustpilot",
            "Give us an honest 5-star review regarding our customer service.",
            "Writing",
            "Trustpilot",
            500,
            (50, 48),
            TaskStatus::Active,
            &["Screenshot of published review"],
            day(2023, 11, 20),
        ),
        task(
            "t5",
            "a1",
            "Pending Task: App Download",
            "Download this app and rate it 5 stars.",
            "App Testing",
            "iOS",
            200,
            (50, 0),
            TaskStatus::Pending,
            &["Screenshot of rating"],
            day(2023, 12, 25),
        ),
    ]
}

pub fn seed_board() -> MarketBoard {
    let users = vec![
        template_user(),
        User {
            role: UserRole::Advertiser,
            balance: naira(125_000),
            joined_at: day(2023, 2, 20),
            kyc_status: KycStatus::Verified,
            ..directory_user("a1", "Big Brand Co", "brand@microgigs.com", "big_brand", "08099999999")
        },
        User {
            balance: naira(1_200),
            status: UserStatus::PendingVerification,
            joined_at: day(2023, 10, 10),
            kyc_status: KycStatus::Pending,
            ..directory_user("u2", "Sarah Connor", "sarah@microgigs.com", "s_connor", "08011112222")
        },
        User {
            balance: 0,
            status: UserStatus::Banned,
            joined_at: day(2023, 10, 25),
            kyc_status: KycStatus::Rejected,
            ..directory_user("u3", "Spam Bot", "bot@spam.com", "spambot99", "08000000000")
        },
    ];

    let deposits = vec![
        Deposit {
            id: "d1".to_string(),
            advertiser_name: "TechSolutions Ltd".to_string(),
            amount: naira(50_000),
            date: day(2023, 10, 26),
            status: ReviewStatus::Pending,
            reference: "REF-88723".to_string(),
            proof_url: Some("https://picsum.photos/id/20/300/400".to_string()),
        },
        Deposit {
            id: "d2".to_string(),
            advertiser_name: "Jane Doe".to_string(),
            amount: naira(5_000),
            date: day(2023, 10, 25),
            status: ReviewStatus::Approved,
            reference: "REF-12993".to_string(),
            proof_url: None,
        },
        Deposit {
            id: "d3".to_string(),
            advertiser_name: "Viral Marketing Co".to_string(),
            amount: naira(120_000),
            date: day(2023, 10, 24),
            status: ReviewStatus::Pending,
            reference: "REF-99281".to_string(),
            proof_url: Some("https://picsum.photos/id/42/300/400".to_string()),
        },
        Deposit {
            id: "d4".to_string(),
            advertiser_name: "John Smith".to_string(),
            amount: naira(2_500),
            date: day(2023, 10, 22),
            status: ReviewStatus::Rejected,
            reference: "REF-11002".to_string(),
            proof_url: None,
        },
    ];

    let withdrawals = vec![
        WithdrawalRequest {
            id: "w1".to_string(),
            user_id: "u1".to_string(),
            user_name: "Alex Worker".to_string(),
            amount: naira(2_500),
            method: WithdrawalMethod::BankTransfer,
            details: "GTBank - 0123456789 - Alex W.".to_string(),
            status: ReviewStatus::Pending,
            date: day(2023, 10, 27),
        },
        WithdrawalRequest {
            id: "w2".to_string(),
            user_id: "u2".to_string(),
            user_name: "Sarah Connor".to_string(),
            amount: naira(1_000),
            method: WithdrawalMethod::MobileMoney,
            details: "OPay - 08011112222".to_string(),
            status: ReviewStatus::Approved,
            date: day(2023, 10, 26),
        },
    ];

    let disputes = vec![
        Dispute {
            id: "dp1".to_string(),
            task_id: "t1".to_string(),
            worker_id: "u1".to_string(),
            advertiser_id: "a1".to_string(),
            reason: "Worker claims task was done but advertiser rejected it without reason."
                .to_string(),
            status: DisputeStatus::Open,
            created_at: day(2023, 10, 28),
        },
        Dispute {
            id: "dp2".to_string(),
            task_id: "t3".to_string(),
            worker_id: "u2".to_string(),
            advertiser_id: "a1".to_string(),
            reason: "Advertiser says screenshot is fake.".to_string(),
            status: DisputeStatus::ResolvedAdvertiser,
            created_at: day(2023, 10, 20),
        },
    ];

    let categories = [
        ("c1", "Social Media", 20),
        ("c2", "App Testing", 100),
        ("c3", "Video Marketing", 50),
        ("c4", "Writing", 200),
        ("c5", "Surveys", 150),
    ]
    .into_iter()
    .map(|(id, name, min_price)| Category {
        id: id.to_string(),
        name: name.to_string(),
        min_price: naira(min_price),
    })
    .collect();

    let kyc_requests = vec![KycRequest {
        id: "k1".to_string(),
        user_id: "u2".to_string(),
        user_name: "Sarah Connor".to_string(),
        document_type: "National ID".to_string(),
        document_url: "https://picsum.photos/id/100/400/300".to_string(),
        status: KycStatus::Pending,
        submitted_at: instant(2023, 10, 27, 14),
    }];

    MarketBoard {
        users,
        tasks: seed_tasks(),
        submissions: vec![],
        deposits,
        withdrawals,
        disputes,
        categories,
        kyc_requests,
        settings: PlatformSettings::default(),
    }
}
