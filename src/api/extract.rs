//! JSON body extractor that validates before the handler runs

use axum::{
    Json, async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::domain::{DomainError, FieldError, Validate};

static MISSING_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"missing field `([^`]+)`").expect("missing-field pattern is valid"));

// serde_path_to_error prefixes type errors with the offending path
static FIELD_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"target type: ([A-Za-z_][A-Za-z0-9_.\[\]]*): ").expect("field-path pattern is valid")
});

/// `Json<T>` that also runs [`Validate`].
///
/// Undecodable bodies and constraint violations are both answered with a
/// 422 validation error, so nothing invalid reaches a repository.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError(rejection_to_domain(&rejection)))?;

        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

fn rejection_to_domain(rejection: &JsonRejection) -> DomainError {
    let text = rejection.body_text();
    let field = match rejection {
        JsonRejection::JsonDataError(_) => field_from_message(&text),
        _ => "body".to_string(),
    };
    DomainError::Validation(vec![FieldError::new(field, text)])
}

fn field_from_message(text: &str) -> String {
    MISSING_FIELD
        .captures(text)
        .or_else(|| FIELD_PATH.captures(text))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "body".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_from_missing_field_message() {
        let text = "Failed to deserialize the JSON body into the target type: \
                    missing field `email` at line 1 column 40";
        assert_eq!(field_from_message(text), "email");
    }

    #[test]
    fn test_field_from_type_error_message() {
        let text = "Failed to deserialize the JSON body into the target type: \
                    year_started: invalid type: string \"1950\", expected i32 at line 1 column 20";
        assert_eq!(field_from_message(text), "year_started");
    }

    #[test]
    fn test_unknown_message_falls_back_to_body() {
        assert_eq!(field_from_message("something else"), "body");
    }
}
