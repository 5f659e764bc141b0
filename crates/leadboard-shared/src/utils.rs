//! Utility functions

use uuid::Uuid;

/// Treats empty or whitespace-only values as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an optional query value as a UUID. Blank values count as absent.
pub fn parse_optional_uuid(field: &str, value: Option<String>) -> Result<Option<Uuid>, String> {
    match non_blank(value) {
        None => Ok(None),
        Some(v) => Uuid::parse_str(&v)
            .map(Some)
            .map_err(|_| format!("'{}' is not a valid UUID for {}", v, field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(Some(" acme ".to_string())), Some("acme".to_string()));
    }

    #[test]
    fn test_parse_optional_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_optional_uuid("board", Some(id.to_string())), Ok(Some(id)));
        assert_eq!(parse_optional_uuid("board", Some(String::new())), Ok(None));
        assert!(parse_optional_uuid("board", Some("nope".to_string())).is_err());
    }
}
