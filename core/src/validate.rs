//! Pre-flight checks for outgoing payloads and list queries.
//!
//! Validators work on JSON objects rather than typed structs so the same
//! checks cover both typed callers (their payload is serialized first) and
//! loosely-typed input. Required-field checks collect every missing field
//! before failing; type checks stop at the first mismatch, in declaration
//! order.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::error::ValidationError;

pub const PRODUCT_FIELDS: [&str; 5] = ["name", "description", "price", "tags", "images"];
pub const ARTICLE_FIELDS: [&str; 4] = ["title", "content", "writer", "image"];
pub const LIST_PARAMS: [&str; 4] = ["page", "pageSize", "orderBy", "keyword"];

#[derive(Debug, Clone, Copy)]
enum Kind {
    String,
    NonNegativeNumber,
    NonNegativeInteger,
    StringArray,
}

impl Kind {
    fn expected(self) -> &'static str {
        match self {
            Kind::String => "a string",
            Kind::NonNegativeNumber => "a number >= 0",
            Kind::NonNegativeInteger => "an integer >= 0",
            Kind::StringArray => "an array of strings",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Kind::String => value.is_string(),
            Kind::NonNegativeNumber => value.as_f64().is_some_and(|n| n >= 0.0),
            Kind::NonNegativeInteger => value.is_u64(),
            Kind::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

const PRODUCT_SCHEMA: [(&str, Kind); 5] = [
    ("name", Kind::String),
    ("description", Kind::String),
    ("price", Kind::NonNegativeNumber),
    ("tags", Kind::StringArray),
    ("images", Kind::StringArray),
];

const ARTICLE_SCHEMA: [(&str, Kind); 4] = [
    ("title", Kind::String),
    ("content", Kind::String),
    ("writer", Kind::String),
    ("image", Kind::String),
];

const LIST_SCHEMA: [(&str, Kind); 4] = [
    ("page", Kind::NonNegativeInteger),
    ("pageSize", Kind::NonNegativeInteger),
    ("orderBy", Kind::String),
    ("keyword", Kind::String),
];

/// Check a full product payload: all fields present, then all fields typed.
pub fn validate_product(fields: &Map<String, Value>) -> Result<(), ValidationError> {
    require_all(&PRODUCT_SCHEMA, fields)?;
    check_types(&PRODUCT_SCHEMA, fields)
}

/// Check a partial product update: known keys only, present fields typed.
pub fn validate_product_patch(fields: &Map<String, Value>) -> Result<(), ValidationError> {
    validate_property_names(&PRODUCT_FIELDS, fields)?;
    check_types(&PRODUCT_SCHEMA, fields)
}

/// Check a full article payload.
pub fn validate_article(fields: &Map<String, Value>) -> Result<(), ValidationError> {
    require_all(&ARTICLE_SCHEMA, fields)?;
    check_types(&ARTICLE_SCHEMA, fields)
}

/// Check a partial article update.
pub fn validate_article_patch(fields: &Map<String, Value>) -> Result<(), ValidationError> {
    validate_property_names(&ARTICLE_FIELDS, fields)?;
    check_types(&ARTICLE_SCHEMA, fields)
}

/// Check a list query object: allowed keys only, present fields typed.
pub fn validate_list_params(params: &Map<String, Value>) -> Result<(), ValidationError> {
    validate_property_names(&LIST_PARAMS, params)?;
    check_types(&LIST_SCHEMA, params)
}

/// Fail if `target` has any key outside `allowed`.
pub fn validate_property_names(
    allowed: &[&'static str],
    target: &Map<String, Value>,
) -> Result<(), ValidationError> {
    let allowed_set: BTreeSet<&str> = allowed.iter().copied().collect();
    let unknown: Vec<String> = target
        .keys()
        .filter(|key| !allowed_set.contains(key.as_str()))
        .cloned()
        .collect();

    if unknown.is_empty() {
        return Ok(());
    }
    Err(ValidationError::UnknownProperties {
        unknown,
        allowed: allowed.to_vec(),
    })
}

/// Serialize a typed payload and hand back its JSON object form.
pub(crate) fn as_object<T: serde::Serialize>(
    value: &T,
) -> Result<Map<String, Value>, ValidationError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ValidationError::Malformed(format!(
            "expected a JSON object, got {other}"
        ))),
        Err(e) => Err(ValidationError::Malformed(e.to_string())),
    }
}

fn is_missing(fields: &Map<String, Value>, name: &str) -> bool {
    fields.get(name).map_or(true, Value::is_null)
}

fn require_all(
    schema: &[(&'static str, Kind)],
    fields: &Map<String, Value>,
) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = schema
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| is_missing(fields, name))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

/// Absent fields are skipped; callers that need presence run `require_all` first.
fn check_types(
    schema: &[(&'static str, Kind)],
    fields: &Map<String, Value>,
) -> Result<(), ValidationError> {
    for (name, kind) in schema {
        let Some(value) = fields.get(*name) else {
            continue;
        };
        if !kind.accepts(value) {
            return Err(ValidationError::InvalidField {
                field: *name,
                expected: kind.expected(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn valid_product() -> Map<String, Value> {
        object(json!({
            "name": "Keyboard",
            "description": "Mechanical",
            "price": 0,
            "tags": ["office"],
            "images": [],
        }))
    }

    #[test]
    fn valid_product_passes() {
        assert!(validate_product(&valid_product()).is_ok());
    }

    #[test]
    fn missing_product_fields_are_all_reported_in_order() {
        let err = validate_product(&object(json!({"description": "d", "tags": []}))).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields(vec!["name", "price", "images"]));
        assert_eq!(err.to_string(), "missing required fields: name, price, images");
    }

    #[test]
    fn null_counts_as_missing() {
        let mut fields = valid_product();
        fields.insert("price".to_string(), Value::Null);
        let err = validate_product(&fields).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields(vec!["price"]));
    }

    #[test]
    fn missing_fields_win_over_type_errors() {
        let err = validate_product(&object(json!({"name": 1, "description": "d"}))).unwrap_err();
        assert!(matches!(err, ValidationError::MissingFields(_)));
    }

    #[test]
    fn first_type_mismatch_wins() {
        let mut fields = valid_product();
        fields.insert("description".to_string(), json!(3));
        fields.insert("images".to_string(), json!("not-an-array"));
        let err = validate_product(&fields).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidField {
                field: "description",
                expected: "a string",
            }
        );
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut fields = valid_product();
        fields.insert("price".to_string(), json!(-1.5));
        let err = validate_product(&fields).unwrap_err();
        assert_eq!(err.to_string(), "price must be a number >= 0");
    }

    #[test]
    fn tags_must_hold_strings() {
        let mut fields = valid_product();
        fields.insert("tags".to_string(), json!([1, 2]));
        let err = validate_product(&fields).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "tags", .. }));
    }

    #[test]
    fn article_checks_follow_declaration_order() {
        let err = validate_article(&object(json!({}))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec!["title", "content", "writer", "image"])
        );

        let err = validate_article(&object(json!({
            "title": "t",
            "content": "c",
            "writer": false,
            "image": 7,
        })))
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "writer", .. }));
    }

    #[test]
    fn property_names_outside_allow_list_fail() {
        let err =
            validate_property_names(&["page", "pageSize"], &object(json!({"foo": 1}))).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnknownProperties { ref unknown, .. }
                if unknown == &vec!["foo".to_string()]
        ));
    }

    #[test]
    fn property_names_inside_allow_list_pass() {
        assert!(validate_property_names(&["page"], &object(json!({"page": 1}))).is_ok());
        assert!(validate_property_names(&["page"], &Map::new()).is_ok());
    }

    #[test]
    fn list_params_check_their_own_fields() {
        assert!(validate_list_params(&object(json!({"keyword": "desk"}))).is_ok());

        let err = validate_list_params(&object(json!({"page": -1}))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "page", .. }));

        let err = validate_list_params(&object(json!({"pageSize": "10"}))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "pageSize", .. }));
    }

    #[test]
    fn product_patch_checks_only_present_fields() {
        assert!(validate_product_patch(&object(json!({"price": 9.99}))).is_ok());

        let err = validate_product_patch(&object(json!({"manufacturer": "Acme"}))).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownProperties { .. }));

        let err = validate_product_patch(&object(json!({"name": ["x"]}))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "name", .. }));
    }

    #[test]
    fn article_patch_rejects_unknown_keys() {
        assert!(validate_article_patch(&object(json!({"title": "new"}))).is_ok());
        let err = validate_article_patch(&object(json!({"likes": 3}))).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownProperties { .. }));
    }
}
