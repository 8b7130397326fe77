use std::env;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// bcrypt work factor used when hashing account passwords
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            bcrypt_cost: env::var("PANEL_TRACKER_BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|cost| (4..=31).contains(cost))
                .unwrap_or(bcrypt::DEFAULT_COST),
        }
    }
}
