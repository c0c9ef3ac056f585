//! Data-driven request body validation.
//!
//! A [`Schema`] is a list of fields, each carrying a rule list. Validation is
//! purely syntactic: it never touches the database, collects every violation
//! instead of stopping at the first, strips unknown fields, and applies
//! declared coercions (numeric string to number) on the way through.

use std::collections::BTreeMap;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

pub mod schemas;

/// Field name to list of violation messages, as rendered in the 400 payload.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of violation messages across all fields.
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    Required,
    TypeString,
    TypeNumber { coerce: bool },
    MaxLen(usize),
    MinLen(usize),
    /// Money rule: strictly positive and representable as a decimal amount.
    Positive,
    Email,
}

pub struct Field {
    pub name: &'static str,
    /// Human label used in violation messages ("Name is required").
    pub label: &'static str,
    pub rules: &'static [Rule],
}

pub struct Schema {
    pub fields: &'static [Field],
}

impl Schema {
    /// Validate a raw JSON body. On success returns the normalized value:
    /// only declared fields, with coercions applied. Absent optional fields
    /// stay absent; `null` counts as absent.
    pub fn validate(&self, raw: &Value) -> Result<Value, FieldErrors> {
        let Some(body) = raw.as_object() else {
            return Err(FieldErrors::single("body", "Validation failed"));
        };

        let mut errors = FieldErrors::new();
        let mut normalized = Map::new();

        for field in self.fields {
            match body.get(field.name) {
                None | Some(Value::Null) => {
                    if field.is_required() {
                        errors.push(field.name, format!("{} is required", field.label));
                    }
                }
                Some(value) => {
                    let value = field.coerce(value);
                    let before = errors.len();
                    for rule in field.rules {
                        rule.check(field.label, &value, field.name, &mut errors);
                    }
                    if errors.len() == before {
                        normalized.insert(field.name.to_string(), value);
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(normalized))
        } else {
            Err(errors)
        }
    }
}

impl Field {
    fn is_required(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, Rule::Required))
    }

    /// Apply declared coercions before the type rules run.
    fn coerce(&self, value: &Value) -> Value {
        for rule in self.rules {
            if let Rule::TypeNumber { coerce: true } = rule {
                if let Some(s) = value.as_str() {
                    if let Some(n) = s.trim().parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                        return Value::Number(n);
                    }
                }
            }
        }
        value.clone()
    }
}

impl Rule {
    fn check(&self, label: &str, value: &Value, field: &str, errors: &mut FieldErrors) {
        match self {
            // Presence was already established by the caller.
            Rule::Required => {}
            Rule::TypeString => {
                if !value.is_string() {
                    errors.push(field, format!("{label} must be string"));
                }
            }
            Rule::TypeNumber { .. } => {
                if !value.is_number() {
                    errors.push(field, format!("{label} must be number"));
                }
            }
            Rule::MaxLen(max) => {
                if let Some(s) = value.as_str() {
                    if s.chars().count() > *max {
                        errors.push(field, format!("{label} must not exceed {max} characters"));
                    }
                }
            }
            Rule::MinLen(min) => {
                if let Some(s) = value.as_str() {
                    if s.chars().count() < *min {
                        errors.push(field, format!("{label} must be at least {min} characters"));
                    }
                }
            }
            Rule::Positive => {
                if let Some(n) = value.as_f64() {
                    if n <= 0.0 {
                        errors.push(field, format!("{label} must be greater than 0"));
                    } else if Decimal::from_f64(n).is_none() {
                        // Magnitudes a decimal amount cannot hold fail here,
                        // not in the handler's deserialization.
                        errors.push(field, format!("{label} is out of range"));
                    }
                }
            }
            Rule::Email => {
                if let Some(s) = value.as_str() {
                    if !is_email(s) {
                        errors.push(field, format!("{label} must be a valid email"));
                    }
                }
            }
        }
    }
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static TEST_SCHEMA: Schema = Schema {
        fields: &[
            Field {
                name: "name",
                label: "Name",
                rules: &[Rule::Required, Rule::TypeString, Rule::MaxLen(10)],
            },
            Field {
                name: "description",
                label: "Description",
                rules: &[Rule::TypeString, Rule::MaxLen(20)],
            },
            Field {
                name: "price",
                label: "Price",
                rules: &[Rule::Required, Rule::TypeNumber { coerce: true }, Rule::Positive],
            },
        ],
    };

    #[test]
    fn valid_body_passes_with_unknown_fields_stripped() {
        let out = TEST_SCHEMA
            .validate(&json!({"name": "Mug", "price": 9.99, "color": "red"}))
            .unwrap();
        assert_eq!(out, json!({"name": "Mug", "price": 9.99}));
    }

    #[test]
    fn numeric_string_price_is_coerced() {
        let out = TEST_SCHEMA
            .validate(&json!({"name": "Mug", "price": "12.5"}))
            .unwrap();
        assert_eq!(out["price"], json!(12.5));
    }

    #[test]
    fn all_violations_are_collected() {
        let errors = TEST_SCHEMA
            .validate(&json!({"name": 42, "description": "x".repeat(25), "price": -1}))
            .unwrap_err();
        assert_eq!(errors.messages("name"), ["Name must be string"]);
        assert_eq!(
            errors.messages("description"),
            ["Description must not exceed 20 characters"]
        );
        assert_eq!(errors.messages("price"), ["Price must be greater than 0"]);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let errors = TEST_SCHEMA.validate(&json!({})).unwrap_err();
        assert_eq!(errors.messages("name"), ["Name is required"]);
        assert_eq!(errors.messages("price"), ["Price is required"]);
    }

    #[test]
    fn null_counts_as_absent() {
        let errors = TEST_SCHEMA
            .validate(&json!({"name": null, "price": 1}))
            .unwrap_err();
        assert_eq!(errors.messages("name"), ["Name is required"]);
    }

    #[test]
    fn optional_field_may_be_omitted() {
        let out = TEST_SCHEMA
            .validate(&json!({"name": "Mug", "price": 1}))
            .unwrap();
        assert!(out.get("description").is_none());
    }

    #[test]
    fn non_object_body_fails_generically() {
        let errors = TEST_SCHEMA.validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(errors.messages("body"), ["Validation failed"]);
    }

    #[test]
    fn unrepresentable_price_is_out_of_range() {
        let errors = TEST_SCHEMA
            .validate(&json!({"name": "Mug", "price": 1e300}))
            .unwrap_err();
        assert_eq!(errors.messages("price"), ["Price is out of range"]);

        // Same via the string coercion path.
        let errors = TEST_SCHEMA
            .validate(&json!({"name": "Mug", "price": "1e300"}))
            .unwrap_err();
        assert_eq!(errors.messages("price"), ["Price is out of range"]);
    }

    #[test]
    fn large_but_representable_price_passes() {
        let out = TEST_SCHEMA
            .validate(&json!({"name": "Mug", "price": 1e20}))
            .unwrap();
        assert_eq!(out["price"], json!(1e20));
    }

    #[test]
    fn uncoercible_price_string_is_a_type_error() {
        let errors = TEST_SCHEMA
            .validate(&json!({"name": "Mug", "price": "cheap"}))
            .unwrap_err();
        assert_eq!(errors.messages("price"), ["Price must be number"]);
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("a@b.com"));
        assert!(!is_email("a.b.com"));
        assert!(!is_email("@b.com"));
        assert!(!is_email("a@com"));
    }
}
