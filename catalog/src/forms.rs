//! Product form schema, validation, and server-error reconciliation.
//!
//! The form layer keeps every field string-friendly for the host's inputs
//! (`category_id` is a `String` until submission) and coerces into the wire
//! payload at the submission boundary. Validation failures never reach the
//! network; server rejections are mapped back onto the form.

use std::collections::BTreeMap;

use serde_json::Value;
use storefront_api::types::PLACEHOLDER_IMAGE;
use storefront_api::{ApiError, NewProduct, Product, ProductUpdate};
use validator::Validate;

/// Editable product fields, as the host's form renders them.
#[derive(Debug, Clone, PartialEq, Default, Validate)]
pub struct ProductForm {
    /// Display title.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Unit price. Defaults to zero, which fails validation.
    #[validate(range(min = 1.0, message = "Price must be a positive number"))]
    pub price: f64,
    /// Description.
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// Selected category id, string-typed until submission.
    #[validate(length(min = 1, message = "Category is required"))]
    pub category_id: String,
}

impl ProductForm {
    /// Seed a form from an existing product, for the edit surface.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price: product.price,
            description: product.description.clone(),
            category_id: product.category.id.to_string(),
        }
    }

    /// Validate and parse the category id, returning the pieces the
    /// payload conversions share.
    fn checked(self) -> Result<(Self, i64), FormErrors> {
        self.validate().map_err(FormErrors::from_validation)?;
        let category_id = self.category_id.trim().parse::<i64>().map_err(|_| {
            let mut errors = FormErrors::default();
            errors.push_field("category_id", "Category is required");
            errors
        })?;
        Ok((self, category_id))
    }

    /// Convert into an update payload, carrying over the record's images.
    ///
    /// # Errors
    ///
    /// Returns the validation [`FormErrors`] when any field is invalid.
    pub fn into_update(self, images: Vec<String>) -> Result<ProductUpdate, FormErrors> {
        let (form, category_id) = self.checked()?;
        let images = if images.is_empty() {
            vec![PLACEHOLDER_IMAGE.to_string()]
        } else {
            images
        };
        Ok(ProductUpdate {
            title: form.title,
            price: form.price,
            description: form.description,
            category_id,
            images,
        })
    }
}

impl TryFrom<ProductForm> for NewProduct {
    type Error = FormErrors;

    /// Validation gate at the submission boundary: parses `category_id`
    /// and defaults `images` to the placeholder.
    fn try_from(form: ProductForm) -> Result<Self, FormErrors> {
        let (form, category_id) = form.checked()?;
        Ok(Self {
            title: form.title,
            price: form.price,
            description: form.description,
            category_id,
            images: vec![PLACEHOLDER_IMAGE.to_string()],
        })
    }
}

/// What a rejected submission was trying to do, for the generic fallback
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitIntent {
    /// Creating a new product.
    Create,
    /// Updating an existing product.
    Update,
    /// Deleting a product.
    Delete,
}

impl SubmitIntent {
    const fn generic_message(self) -> &'static str {
        match self {
            Self::Create => "An error occurred while creating the product.",
            Self::Update => "An error occurred while updating the product.",
            Self::Delete => "An error occurred while deleting the product.",
        }
    }
}

/// Validation and reconciliation errors, keyed for the form surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors {
    /// Per-field messages, keyed by form field name.
    pub field_errors: BTreeMap<String, Vec<String>>,
    /// Messages not attributable to a single field.
    pub form_errors: Vec<String>,
}

impl FormErrors {
    /// Whether any message is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.form_errors.is_empty()
    }

    /// Append a message for `field`.
    pub fn push_field(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// A single displayable message: the first form-level message, else
    /// the first field message. Reconciliation always records at least
    /// one message, so this is `None` only for empty errors.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.form_errors
            .first()
            .or_else(|| self.field_errors.values().flatten().next())
            .map(String::as_str)
    }

    /// Collect `validator` output into field-keyed messages, preferring
    /// the declared message over the rule code.
    #[must_use]
    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        let mut out = Self::default();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                out.push_field(field.to_string(), message);
            }
        }
        out
    }

    /// Map a failed mutation back onto the form.
    ///
    /// Recognizes the structured rejection body `{ error, message,
    /// "field"?, statusCode }` (with `message` a string or an array of
    /// strings): messages land on the server-named field when one is
    /// given, on the form level when not. Anything else - a network
    /// failure, an empty or unparseable body - yields the generic message
    /// for `intent`. Never empty, so no failed submit is silent.
    #[must_use]
    pub fn from_rejection(error: &ApiError, intent: SubmitIntent) -> Self {
        let generic = || {
            let mut out = Self::default();
            out.form_errors.push(intent.generic_message().to_string());
            out
        };

        let Some(body) = error.body() else {
            return generic();
        };
        let Ok(value) = serde_json::from_str::<Value>(body) else {
            return generic();
        };
        let recognized = value.get("error").is_some() || value.get("statusCode").is_some();
        let messages = value.get("message").map(collect_messages).unwrap_or_default();
        if !recognized || messages.is_empty() {
            return generic();
        }

        let mut out = Self::default();
        match value.get("field").and_then(Value::as_str) {
            Some(field) => {
                for message in messages {
                    out.push_field(field, message);
                }
            }
            None => out.form_errors = messages,
        }
        out
    }
}

/// `message` on the wire is a single string or an array of strings.
fn collect_messages(value: &Value) -> Vec<String> {
    match value {
        Value::String(message) => vec![message.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(String::from))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use storefront_api::Category;

    fn valid_form() -> ProductForm {
        ProductForm {
            title: "Chair".to_string(),
            price: 49.0,
            description: "A chair".to_string(),
            category_id: "3".to_string(),
        }
    }

    #[test]
    fn test_empty_form_yields_all_four_field_errors() {
        let result = NewProduct::try_from(ProductForm::default());
        let errors = result.unwrap_err();

        assert_eq!(errors.field_errors.len(), 4);
        assert_eq!(
            errors.field_errors["title"],
            vec!["Title is required".to_string()]
        );
        assert_eq!(
            errors.field_errors["price"],
            vec!["Price must be a positive number".to_string()]
        );
        assert_eq!(
            errors.field_errors["description"],
            vec!["Description is required".to_string()]
        );
        assert_eq!(
            errors.field_errors["category_id"],
            vec!["Category is required".to_string()]
        );
        assert!(errors.form_errors.is_empty());
    }

    #[test]
    fn test_valid_form_converts_with_placeholder_image() {
        let input = NewProduct::try_from(valid_form()).unwrap();
        assert_eq!(input.title, "Chair");
        assert_eq!(input.category_id, 3);
        assert_eq!(input.images, vec![PLACEHOLDER_IMAGE.to_string()]);
    }

    #[test]
    fn test_non_numeric_category_fails_at_the_boundary() {
        let mut form = valid_form();
        form.category_id = "furniture".to_string();
        let errors = NewProduct::try_from(form).unwrap_err();
        assert_eq!(
            errors.field_errors["category_id"],
            vec!["Category is required".to_string()]
        );
    }

    #[test]
    fn test_update_keeps_existing_images() {
        let update = valid_form()
            .into_update(vec!["https://example.com/a.png".to_string()])
            .unwrap();
        assert_eq!(update.images, vec!["https://example.com/a.png".to_string()]);

        let defaulted = valid_form().into_update(vec![]).unwrap();
        assert_eq!(defaulted.images, vec![PLACEHOLDER_IMAGE.to_string()]);
    }

    #[test]
    fn test_form_seeds_from_product() {
        let product = Product {
            id: 9,
            title: "Desk".to_string(),
            slug: "desk".to_string(),
            price: 120.0,
            description: "Oak desk".to_string(),
            category: Category {
                id: 4,
                name: "Furniture".to_string(),
                slug: "furniture".to_string(),
                image: String::new(),
            },
            images: vec![],
        };
        let form = ProductForm::from_product(&product);
        assert_eq!(form.title, "Desk");
        assert_eq!(form.price, 120.0);
        assert_eq!(form.category_id, "4");
    }

    #[test]
    fn test_rejection_with_named_field_lands_on_that_field() {
        let error = ApiError::Status {
            status: 400,
            body: r#"{"error":"Bad Request","message":["Price must be positive"],"field":"price","statusCode":400}"#.to_string(),
        };
        let errors = FormErrors::from_rejection(&error, SubmitIntent::Create);
        assert_eq!(
            errors.field_errors["price"],
            vec!["Price must be positive".to_string()]
        );
        assert!(errors.form_errors.is_empty());
    }

    #[test]
    fn test_rejection_without_field_is_form_level() {
        let error = ApiError::Status {
            status: 400,
            body: r#"{"error":"Bad Request","message":["title should not be empty","price must be a number"],"statusCode":400}"#.to_string(),
        };
        let errors = FormErrors::from_rejection(&error, SubmitIntent::Create);
        assert!(errors.field_errors.is_empty());
        assert_eq!(errors.form_errors.len(), 2);
    }

    #[test]
    fn test_rejection_with_string_message_is_accepted() {
        let error = ApiError::Status {
            status: 422,
            body: r#"{"error":"Unprocessable","message":"category does not exist","statusCode":422}"#.to_string(),
        };
        let errors = FormErrors::from_rejection(&error, SubmitIntent::Update);
        assert_eq!(errors.form_errors, vec!["category does not exist".to_string()]);
    }

    #[test]
    fn test_unrecognizable_rejection_falls_back_to_generic() {
        for error in [
            ApiError::Request("connection reset".to_string()),
            ApiError::Status {
                status: 500,
                body: "<html>Internal Server Error</html>".to_string(),
            },
            ApiError::Status {
                status: 500,
                body: r#"{"unexpected":"shape"}"#.to_string(),
            },
        ] {
            let errors = FormErrors::from_rejection(&error, SubmitIntent::Create);
            assert_eq!(
                errors.form_errors,
                vec!["An error occurred while creating the product.".to_string()],
                "for {error:?}"
            );
        }

        let errors = FormErrors::from_rejection(
            &ApiError::Request("timed out".to_string()),
            SubmitIntent::Update,
        );
        assert_eq!(
            errors.summary(),
            Some("An error occurred while updating the product.")
        );
    }

    #[test]
    fn test_summary_prefers_form_level_messages() {
        let mut errors = FormErrors::default();
        errors.push_field("title", "Title is required");
        assert_eq!(errors.summary(), Some("Title is required"));

        errors.form_errors.push("Something broke".to_string());
        assert_eq!(errors.summary(), Some("Something broke"));
        assert!(!errors.is_empty());
    }
}
