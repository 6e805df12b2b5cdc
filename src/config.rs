use std::str::FromStr;

use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OriginCheckKind {
    /// Flags a fixed share of proof submissions.
    Random,
    /// Flags a worker submitting twice for the same task.
    Repeat,
}

#[derive(Debug)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub is_development: bool,
    pub port: u16,
    pub session_store_dir: String,
    pub admin_email: String,
    pub admin_password: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_url: String,
    pub simulated_latency_ms: u64,
    pub duplicate_origin_probability: f64,
    pub origin_check: OriginCheckKind,
    pub sentry_project_link: Option<String>,
}

fn parsed_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name).map_or(default, |value| {
        value
            .trim()
            .parse::<T>()
            .unwrap_or_else(|_| panic!("{name} has an invalid value: {value}"))
    })
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let jwt_secret = std::env::var("JWT_SECRET").expect("Missing JWT_SECRET in env");
        let is_development = std::env::var("DEVELOPMENT")
            .map(|v| v.eq("true"))
            .unwrap_or(false);
        let port = parsed_or("PORT", 8080);
        let session_store_dir =
            std::env::var("SESSION_STORE_DIR").unwrap_or("sessions".to_string());

        let admin_email =
            std::env::var("ADMIN_EMAIL").unwrap_or("admin@microgigs.com".to_string());
        let admin_password = std::env::var("ADMIN_PASSWORD").unwrap_or("admin123".to_string());

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let gemini_model =
            std::env::var("GEMINI_MODEL").unwrap_or("gemini-2.5-flash".to_string());
        let gemini_api_url = std::env::var("GEMINI_API_URL")
            .unwrap_or("https://generativelanguage.googleapis.com/v1beta".to_string());

        let simulated_latency_ms = parsed_or("SIMULATED_LATENCY_MS", 1000);
        let duplicate_origin_probability = parsed_or("DUPLICATE_ORIGIN_PROBABILITY", 0.05);
        let origin_check = parsed_or("ORIGIN_CHECK", OriginCheckKind::Random);

        let sentry_project_link = std::env::var("SENTRY_PROJECT_LINK").ok();

        Self {
            jwt_secret,
            is_development,
            port,
            session_store_dir,
            admin_email,
            admin_password,
            gemini_api_key,
            gemini_model,
            gemini_api_url,
            simulated_latency_ms,
            duplicate_origin_probability,
            origin_check,
            sentry_project_link,
        }
    }
}
