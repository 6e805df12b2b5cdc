use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Operator credentials for the admin console. The password is only kept
/// as an argon2 hash.
pub struct AdminCredentials {
    email: String,
    password_hash: String,
}

impl AdminCredentials {
    pub fn new(email: &str, password: &str) -> Result<Self, String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| err.to_string())?;
        Ok(Self {
            email: email.to_lowercase(),
            password_hash: hash.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Email is compared case-insensitively, password exactly.
    pub fn verify(&self, email: &str, password: &str) -> bool {
        if email.to_lowercase() != self.email {
            return false;
        }
        let Ok(parsed_hash) = PasswordHash::new(&self.password_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
