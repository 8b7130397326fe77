use sea_orm::Value;

use crate::config::CONFIG;
use crate::error::{AppError, Result};
use crate::services::tables::PartialRow;

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, CONFIG.auth.bcrypt_cost)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Whether a stored value already is a bcrypt hash
pub fn is_password_hash(value: &str) -> bool {
    value.len() == 60 && value.starts_with("$2")
}

/// Replace a plaintext `password` entry of an account row with its hash.
///
/// Rows without a password and rows carrying an existing hash pass through.
pub fn hash_row_password(row: &mut PartialRow) -> Result<()> {
    let Some(Some(Value::String(Some(password)))) = row.get("password") else {
        return Ok(());
    };

    if is_password_hash(password) {
        return Ok(());
    }

    let hashed = hash_password(password)?;
    row.insert("password".to_string(), Some(Value::from(hashed)));
    Ok(())
}
