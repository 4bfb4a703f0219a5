use hmac::{Hmac, Mac};
use pbkdf2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Pbkdf2,
};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password for storage using salted PBKDF2-SHA256
///
/// Returns a PHC string (`$pbkdf2-sha256$...`) embedding the salt and
/// parameters, so verification needs no separate salt column.
pub fn hash_password(password: &str) -> Result<String, pbkdf2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Pbkdf2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a submitted password against a stored PHC string
///
/// Comparison happens inside the hash library with constant-time semantics.
/// A malformed stored hash verifies as false rather than erroring, so login
/// keeps its single generic failure path.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Stored password hash is malformed: {}", e);
            return false;
        }
    };

    Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok()
}

// =============================================================================
// Cookie Signing
// =============================================================================

/// Compute the hex HMAC-SHA256 signature for a session payload
pub fn sign_payload(payload: &[u8], secret: &str) -> String {
    // HmacSha256::new_from_slice accepts keys of any length
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            tracing::error!("Failed to create HMAC instance");
            return String::new();
        }
    };
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify the hex HMAC-SHA256 signature of a session payload
pub fn verify_payload(payload: &[u8], signature: &str, secret: &str) -> bool {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            tracing::error!("Failed to create HMAC instance");
            return false;
        }
    };
    mac.update(payload);

    let sig_bytes = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::warn!("Invalid hex signature format");
            return false;
        }
    };

    mac.verify_slice(&sig_bytes).is_ok()
}
