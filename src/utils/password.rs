use crate::config::{AppConfig, Argon2Config};
use crate::errors::CoopError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// Argon2id hash with the configured cost parameters.
pub fn hash_password(password: &str) -> Result<String, CoopError> {
    hash_with(password, &AppConfig::get().argon2)
}

fn hash_with(password: &str, cost: &Argon2Config) -> Result<String, CoopError> {
    let params = Params::new(cost.memory_cost, cost.time_cost, cost.parallelism, None)
        .map_err(|e| CoopError::validation(format!("Invalid Argon2 parameters: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CoopError::validation(format!("Password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Parameters are read back from the PHC string, so old hashes keep verifying
/// after the cost settings change.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Argon2Config {
        Argon2Config {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_with("Coop2025pass", &cheap()).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Coop2025pass", &hash));
        assert!(!verify_password("coop2025pass", &hash));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
