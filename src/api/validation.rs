use super::ApiError;
use crate::entities::users::Gender;

/// Treats a missing field and an empty string identically, the way the
/// upstream form submits them.
pub fn provided(value: &Option<String>) -> Option<&str> {
    match value.as_deref() {
        Some(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Optional free-text field: empty strings are stored as NULL.
pub fn optional(value: &Option<String>) -> Option<String> {
    provided(value).map(str::to_string)
}

pub fn validate_gender(gender: &str) -> Result<&str, ApiError> {
    if Gender::parse(gender).is_none() {
        return Err(ApiError::validation("Invalid gender value"));
    }
    Ok(gender)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provided() {
        assert_eq!(provided(&Some("x".to_string())), Some("x"));
        assert_eq!(provided(&Some(String::new())), None);
        assert_eq!(provided(&None), None);
    }

    #[test]
    fn test_optional_maps_empty_to_none() {
        assert_eq!(optional(&Some("Oslo".to_string())), Some("Oslo".to_string()));
        assert_eq!(optional(&Some(String::new())), None);
        assert_eq!(optional(&None), None);
    }

    #[test]
    fn test_validate_gender() {
        assert!(validate_gender("MALE").is_ok());
        assert!(validate_gender("FEMALE").is_ok());
        assert!(validate_gender("OTHER").is_ok());
        assert!(validate_gender("male").is_err());
        assert!(validate_gender("UNKNOWN").is_err());
        assert!(validate_gender("").is_err());
    }
}
