use bcrypt::{DEFAULT_COST, hash, verify};
use rand::Rng;

use crate::utils::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to verify password: {}", e)))
}

/// Generates a throwaway credential for accounts the system creates on
/// behalf of a user: 4 random letters followed by 4 random digits. The
/// plaintext is returned to the caller exactly once and never stored.
pub fn generate_password() -> String {
    let mut rng = rand::thread_rng();
    let letters: String = (0..4)
        .map(|_| rng.gen_range(b'a'..=b'z') as char)
        .collect();
    let digits: String = (0..4).map(|_| rng.gen_range(b'0'..=b'9') as char).collect();
    format!("{}{}", letters, digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_password_shape() {
        for _ in 0..20 {
            let pw = generate_password();
            assert_eq!(pw.len(), 8);
            assert!(pw[..4].chars().all(|c| c.is_ascii_lowercase()));
            assert!(pw[4..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("secret123").unwrap();
        assert!(verify_password("secret123", &hash).unwrap());
        assert!(!verify_password("secret124", &hash).unwrap());
    }
}
