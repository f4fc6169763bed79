
//! Password hashing for stored user credentials.
//!
//! Credentials are stored as argon2 PHC strings and compared with
//! argon2's verifier. Plaintext passwords never touch the store.

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use argon2::password_hash::SaltString;

fn generate_random_salt() -> SaltString {
  let mut rng = rand::thread_rng();
  SaltString::generate(&mut rng)
}

/// Hashes a plaintext password into a self-describing PHC string
/// suitable for storage.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
  let salt = generate_random_salt();
  let hashed = Argon2::default().hash_password(password.as_bytes(), &salt)?;
  Ok(hashed.to_string())
}

/// Verifies a candidate password against a stored PHC string. A
/// stored value that fails to parse as a PHC string is treated as a
/// mismatch rather than an error.
pub fn verify_password(stored_hash: &str, candidate: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(stored_hash) else {
    return false;
  };
  Argon2::default().verify_password(candidate.as_bytes(), &parsed).is_ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_and_verify_round_trip() {
    let hash = hash_password("p1").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password(&hash, "p1"));
  }

  #[test]
  fn wrong_password_does_not_verify() {
    let hash = hash_password("p1").unwrap();
    assert!(!verify_password(&hash, "p2"));
  }

  #[test]
  fn malformed_stored_hash_is_a_mismatch() {
    assert!(!verify_password("plaintext-from-a-legacy-row", "plaintext-from-a-legacy-row"));
  }

  #[test]
  fn salting_makes_hashes_distinct() {
    let first = hash_password("p1").unwrap();
    let second = hash_password("p1").unwrap();
    assert_ne!(first, second);
  }
}
