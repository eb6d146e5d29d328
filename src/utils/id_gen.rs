//! ID generation utilities

/// Generate a stored account ID (32 hex characters, UUID v4 without dashes)
pub fn generate_account_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_account_id() {
        let id = generate_account_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_account_id_unique() {
        assert_ne!(generate_account_id(), generate_account_id());
    }
}
