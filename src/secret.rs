//! Shared-secret strength policy
//!
//! The same secret gates operator install/uninstall requests and
//! authenticates Telegram's webhook deliveries, so a weak value exposes
//! both surfaces at once.

/// Requirement text shown to operators when the gate rejects a secret.
pub const REQUIREMENTS: &str = "Secret token must be at least 16 characters \
     and contain uppercase letters, lowercase letters, and numbers.";

/// True iff the secret is longer than 15 characters and contains at least
/// one ASCII uppercase letter, one lowercase letter, and one digit.
pub fn is_strong(secret: &str) -> bool {
    secret.len() > 15
        && secret.chars().any(|c| c.is_ascii_uppercase())
        && secret.chars().any(|c| c.is_ascii_lowercase())
        && secret.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_strong_secret() {
        assert!(is_strong("Aa1aaaaaaaaaaaaaa"));
        assert!(is_strong("CorrectHorse42BatteryStaple"));
    }

    #[test]
    fn test_rejects_short_secret() {
        // 15 characters is still too short; the minimum is 16.
        assert!(!is_strong("Aa1aaaaaaaaaaaa"));
        assert!(!is_strong("short1A"));
        assert!(!is_strong(""));
    }

    #[test]
    fn test_rejects_missing_character_class() {
        assert!(!is_strong("aaaaaaaaaaaaaaaa1")); // no uppercase
        assert!(!is_strong("AAAAAAAAAAAAAAAA1")); // no lowercase
        assert!(!is_strong("AaAaAaAaAaAaAaAa")); // no digit
    }

    #[test]
    fn test_non_ascii_does_not_count() {
        // Long and mixed-looking, but the classes must be ASCII.
        assert!(!is_strong("ÄÖÜäöü1111111111111"));
    }
}
