//! Validation helpers for request DTOs.
//!
//! Request bodies keep loosely typed fields so a missing or mistyped value
//! surfaces as a 400 with a readable message instead of an extractor rejection.

use serde_json::Value;
use validator::ValidationError;

fn invalid(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Accepts a non-blank JSON string.
///
/// # Examples
///
/// ```ignore
/// validate_identifier("playerId", Some(&json!("hero-1"))) // Ok
/// validate_identifier("playerId", Some(&json!("")))       // Err - required
/// validate_identifier("playerId", Some(&json!(42)))       // Err - not a string
/// ```
pub fn validate_identifier(field: &str, value: Option<&Value>) -> Result<(), ValidationError> {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(()),
        None | Some(Value::Null) | Some(Value::String(_)) => {
            Err(invalid("required", format!("{field} is required")))
        }
        Some(_) => Err(invalid(
            "identifier_format",
            format!("{field} must be a non-empty string"),
        )),
    }
}

/// Accepts any value except the falsy ones (`null`, `false`, `0`, `""`).
/// The content itself is never inspected.
pub fn validate_present(field: &str, value: Option<&Value>) -> Result<(), ValidationError> {
    let blank = match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(Value::Number(number)) => number.as_f64() == Some(0.0),
        Some(_) => false,
    };
    if blank {
        Err(invalid("required", format!("{field} is required")))
    } else {
        Ok(())
    }
}

/// Text of an identifier already accepted by [`validate_identifier`].
pub fn identifier_text(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_validate_identifier_valid() {
        assert!(validate_identifier("playerId", Some(&json!("hero-1"))).is_ok());
        assert_eq!(identifier_text(Some(&json!("hero-1"))), "hero-1");
    }

    #[test]
    fn test_validate_identifier_missing_or_blank() {
        for value in [None, Some(json!(null)), Some(json!("")), Some(json!("   "))] {
            let err = validate_identifier("playerId", value.as_ref()).unwrap_err();
            assert_eq!(err.code, "required");
            assert_eq!(err.message.as_deref(), Some("playerId is required"));
        }
    }

    #[test]
    fn test_validate_identifier_wrong_type() {
        let err = validate_identifier("nftId", Some(&json!(7))).unwrap_err();
        assert_eq!(err.code, "identifier_format");
    }

    #[test]
    fn test_validate_present_accepts_any_shape() {
        for value in [
            json!({ "type": "shield" }),
            json!({ "id": 7 }),
            json!("sword"),
            json!([1, 2]),
            json!(3),
            json!(true),
        ] {
            assert!(validate_present("nft", Some(&value)).is_ok(), "{value}");
        }
    }

    #[test]
    fn test_validate_present_rejects_falsy() {
        for value in [None, Some(json!(null)), Some(json!(false)), Some(json!(0)), Some(json!(""))] {
            let err = validate_present("nft", value.as_ref()).unwrap_err();
            assert_eq!(err.message.as_deref(), Some("nft is required"));
        }
    }
}
