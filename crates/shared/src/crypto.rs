//! Admin API key generation and hashing.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Prefix carried by every admin API key.
pub const API_KEY_PREFIX: &str = "gym_";

/// Number of random characters after the prefix in generated keys.
const API_KEY_RANDOM_LEN: usize = 32;

/// Length of the display prefix stored alongside the key hash.
const DISPLAY_PREFIX_LEN: usize = 8;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Returns true if the key has the admin prefix and enough characters after it
/// to carry a display prefix.
pub fn is_well_formed_api_key(key: &str) -> bool {
    key.starts_with(API_KEY_PREFIX) && key.len() >= API_KEY_PREFIX.len() + DISPLAY_PREFIX_LEN
}

/// Extracts the display prefix from an API key (first 8 characters after "gym_").
pub fn extract_key_prefix(key: &str) -> Option<&str> {
    if is_well_formed_api_key(key) {
        let start = API_KEY_PREFIX.len();
        key.get(start..start + DISPLAY_PREFIX_LEN)
    } else {
        None
    }
}

/// Generates a new random admin API key (`gym_` + 32 alphanumerics).
pub fn generate_api_key() -> String {
    let mut rng = rand::thread_rng();
    let random: String = (0..API_KEY_RANDOM_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("{}{}", API_KEY_PREFIX, random)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex("test"),
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_is_deterministic() {
        assert_eq!(sha256_hex("gym_key"), sha256_hex("gym_key"));
        assert_ne!(sha256_hex("gym_key1"), sha256_hex("gym_key2"));
    }

    #[test]
    fn test_generate_api_key_format() {
        let key = generate_api_key();
        assert!(key.starts_with(API_KEY_PREFIX));
        assert_eq!(key.len(), API_KEY_PREFIX.len() + API_KEY_RANDOM_LEN);
        assert!(key[API_KEY_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_keys_are_unique() {
        assert_ne!(generate_api_key(), generate_api_key());
    }

    #[test]
    fn test_extract_key_prefix() {
        assert_eq!(extract_key_prefix("gym_abcdefgh12345"), Some("abcdefgh"));
        assert_eq!(extract_key_prefix("gym_abcdefgh"), Some("abcdefgh"));
        assert_eq!(extract_key_prefix("gym_short"), None);
        assert_eq!(extract_key_prefix("pm_abcdefgh12345"), None);
        assert_eq!(extract_key_prefix("GYM_abcdefgh12345"), None);
        assert_eq!(extract_key_prefix(""), None);
    }

    #[test]
    fn test_generated_key_has_extractable_prefix() {
        let key = generate_api_key();
        assert_eq!(extract_key_prefix(&key).map(str::len), Some(8));
    }
}
