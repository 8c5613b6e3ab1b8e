use uuid::Uuid;

use crate::errors::AppError;

/// Parses a record id; a malformed id cannot match any record, so it is not found
pub fn valid_uuid(id: &str, not_found: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.trim()).map_err(|_| AppError::NotFound(not_found.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_ids_are_not_found() {
        assert!(matches!(
            valid_uuid("not-a-uuid", "Contact not found"),
            Err(AppError::NotFound(msg)) if msg == "Contact not found"
        ));
    }

    #[test]
    fn parses_hyphenated_ids() {
        let id = Uuid::new_v4();
        assert_eq!(valid_uuid(&id.to_string(), "x").unwrap(), id);
    }
}
