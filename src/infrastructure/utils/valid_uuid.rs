use uuid::Uuid;

use crate::errors::AppError;

/// Parses a record id taken from a request path.
///
/// A string that is not a UUID cannot name any stored record, so it is
/// reported as `NotFound` with the caller's message rather than as bad input.
pub fn parse_record_id(id: &str, not_found: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.trim()).map_err(|_| AppError::NotFound(not_found.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hyphenated_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_record_id(&id.to_string(), "missing").unwrap(), id);
    }

    #[test]
    fn malformed_id_is_not_found() {
        let err = parse_record_id("unknown-id", "Skill not found").unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Skill not found"));
    }
}
