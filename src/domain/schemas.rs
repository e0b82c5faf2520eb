//! Request and response schemas
//!
//! Request bodies are plain deserialized records that are checked through
//! [`Validate`] before any handler runs. Read schemas are only ever built
//! from a persisted model.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use super::DomainError;
use super::validation::{
    NAME_MAX_LEN, PAGES_MAX, PAGES_MIN, TITLE_MAX_LEN, Validate, Violations, YEAR_STARTED_MAX,
    YEAR_STARTED_MIN,
};
use crate::models::{author, book};

/// Keeps a field that was sent as `null` distinguishable from an absent one:
/// absent stays `None` through `#[serde(default)]`, `null` becomes `Some(None)`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of `POST /api/authors` and `PUT /api/authors/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorCreate {
    #[schema(min_length = 1, max_length = 100, example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(minimum = 1900, maximum = 2100, example = 1843)]
    pub year_started: i32,
}

impl Validate for AuthorCreate {
    fn validate(&self) -> Result<(), DomainError> {
        let mut v = Violations::new();
        v.text("name", &self.name, NAME_MAX_LEN);
        v.email("email", &self.email);
        v.range(
            "year_started",
            self.year_started,
            YEAR_STARTED_MIN,
            YEAR_STARTED_MAX,
        );
        v.into_result()
    }
}

/// Body of `PATCH /api/authors/{id}`; only fields present in the payload are applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct AuthorPatch {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub year_started: Option<Option<i32>>,
}

impl AuthorPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.year_started.is_none()
    }
}

impl Validate for AuthorPatch {
    fn validate(&self) -> Result<(), DomainError> {
        let mut v = Violations::new();
        if let Some(name) = v.present("name", &self.name) {
            v.text("name", name, NAME_MAX_LEN);
        }
        if let Some(email) = v.present("email", &self.email) {
            v.email("email", email);
        }
        if let Some(&year) = v.present("year_started", &self.year_started) {
            v.range("year_started", year, YEAR_STARTED_MIN, YEAR_STARTED_MAX);
        }
        v.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorRead {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub year_started: i32,
}

impl From<author::Model> for AuthorRead {
    fn from(model: author::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            year_started: model.year_started,
        }
    }
}

/// Body of `POST /api/books`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookCreate {
    #[schema(min_length = 1, max_length = 255, example = "Notes")]
    pub title: String,
    #[schema(minimum = 1, maximum = 10000, example = 200)]
    pub pages: i32,
    pub author_id: i32,
}

impl Validate for BookCreate {
    fn validate(&self) -> Result<(), DomainError> {
        let mut v = Violations::new();
        v.text("title", &self.title, TITLE_MAX_LEN);
        v.range("pages", self.pages, PAGES_MIN, PAGES_MAX);
        v.into_result()
    }
}

/// Body of `PATCH /api/books/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct BookPatch {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub pages: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub author_id: Option<Option<i32>>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.pages.is_none() && self.author_id.is_none()
    }
}

impl Validate for BookPatch {
    fn validate(&self) -> Result<(), DomainError> {
        let mut v = Violations::new();
        if let Some(title) = v.present("title", &self.title) {
            v.text("title", title, TITLE_MAX_LEN);
        }
        if let Some(&pages) = v.present("pages", &self.pages) {
            v.range("pages", pages, PAGES_MIN, PAGES_MAX);
        }
        v.present("author_id", &self.author_id);
        v.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookRead {
    pub id: i32,
    pub title: String,
    pub pages: i32,
    pub author_id: i32,
}

impl From<book::Model> for BookRead {
    fn from(model: book::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            pages: model.pages,
            author_id: model.author_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invalid_fields(result: Result<(), DomainError>) -> Vec<String> {
        match result {
            Err(DomainError::Validation(errors)) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_author_create_accepts_valid_payload() {
        let payload: AuthorCreate = serde_json::from_value(json!({
            "name": "Ada",
            "email": "ada@x.com",
            "year_started": 1950
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_author_create_reports_every_bad_field() {
        let payload = AuthorCreate {
            name: String::new(),
            email: "not-an-email".to_string(),
            year_started: 1899,
        };
        assert_eq!(
            invalid_fields(payload.validate()),
            vec!["name", "email", "year_started"]
        );
    }

    #[test]
    fn test_author_create_requires_all_fields() {
        let result: Result<AuthorCreate, _> =
            serde_json::from_value(json!({"name": "Ada", "email": "ada@x.com"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_author_patch_tracks_presence() {
        let patch: AuthorPatch = serde_json::from_value(json!({})).unwrap();
        assert!(patch.is_empty());
        assert!(patch.validate().is_ok());

        let patch: AuthorPatch = serde_json::from_value(json!({"name": "Grace"})).unwrap();
        assert_eq!(patch.name, Some(Some("Grace".to_string())));
        assert_eq!(patch.email, None);
        assert_eq!(patch.year_started, None);

        let patch: AuthorPatch = serde_json::from_value(json!({"email": null})).unwrap();
        assert_eq!(patch.email, Some(None));
        assert_eq!(invalid_fields(patch.validate()), vec!["email"]);
    }

    #[test]
    fn test_author_patch_validates_present_values() {
        let patch: AuthorPatch =
            serde_json::from_value(json!({"year_started": 2101, "name": "ok"})).unwrap();
        assert_eq!(invalid_fields(patch.validate()), vec!["year_started"]);
    }

    #[test]
    fn test_book_create_bounds() {
        let mut payload = BookCreate {
            title: "Notes".to_string(),
            pages: 200,
            author_id: 1,
        };
        assert!(payload.validate().is_ok());

        payload.pages = 0;
        payload.title = "x".repeat(256);
        assert_eq!(invalid_fields(payload.validate()), vec!["title", "pages"]);
    }

    #[test]
    fn test_book_patch_rejects_null_author() {
        let patch: BookPatch = serde_json::from_value(json!({"author_id": null})).unwrap();
        assert_eq!(invalid_fields(patch.validate()), vec!["author_id"]);
    }

    #[test]
    fn test_read_schemas_come_from_models() {
        let author = AuthorRead::from(author::Model {
            id: 3,
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            year_started: 1950,
        });
        assert_eq!(author.id, 3);
        assert_eq!(author.email, "ada@x.com");

        let book = BookRead::from(book::Model {
            id: 9,
            title: "Notes".to_string(),
            pages: 200,
            author_id: 3,
        });
        assert_eq!(book.author_id, 3);
        assert_eq!(book.pages, 200);
    }
}
