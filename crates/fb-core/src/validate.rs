//! Advisory validation for placed fields.
//!
//! Findings feed the properties panel; they never block a mutation or an
//! export. Each rule appends human-readable messages for one field.

use crate::id::FieldId;
use crate::model::FormField;
use regex::Regex;
use std::collections::HashMap;

/// Minimum advisory field width in pixels.
pub const MIN_FIELD_WIDTH: f32 = 50.0;
/// Minimum advisory field height in pixels.
pub const MIN_FIELD_HEIGHT: f32 = 20.0;

/// Run all rules over one field and return its messages.
#[must_use]
pub fn validate_field(field: &FormField) -> Vec<String> {
    let mut errors = Vec::new();
    check_label(field, &mut errors);
    check_key(field, &mut errors);
    check_pattern(field, &mut errors);
    check_geometry(field, &mut errors);
    errors
}

/// Validate a whole collection; only fields with findings appear in the map.
#[must_use]
pub fn validate_form(fields: &[FormField]) -> HashMap<FieldId, Vec<String>> {
    let mut errors = HashMap::new();
    for field in fields {
        let field_errors = validate_field(field);
        if !field_errors.is_empty() {
            errors.insert(field.id, field_errors);
        }
    }
    errors
}

fn check_label(field: &FormField, errors: &mut Vec<String>) {
    if field.label.trim().is_empty() {
        errors.push("Field label is required".to_string());
    }
}

fn check_key(field: &FormField, errors: &mut Vec<String>) {
    if field.key.trim().is_empty() {
        errors.push("Field key is required".to_string());
    }
}

fn check_pattern(field: &FormField, errors: &mut Vec<String>) {
    if let Some(ref pattern) = field.validation
        && Regex::new(pattern).is_err()
    {
        errors.push("Invalid validation pattern".to_string());
    }
}

fn check_geometry(field: &FormField, errors: &mut Vec<String>) {
    if field.width < MIN_FIELD_WIDTH {
        errors.push(format!("Width must be at least {MIN_FIELD_WIDTH}px"));
    }
    if field.height < MIN_FIELD_HEIGHT {
        errors.push(format!("Height must be at least {MIN_FIELD_HEIGHT}px"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::descriptor_by_id;
    use crate::model::Position;

    fn valid_field() -> FormField {
        descriptor_by_id("textfield").unwrap().instantiate(
            FieldId::intern("textfield-v"),
            "textfield_v1".to_string(),
            Position::new(0.0, 0.0),
        )
    }

    #[test]
    fn well_formed_field_has_no_findings() {
        assert!(validate_field(&valid_field()).is_empty());
    }

    #[test]
    fn narrow_field_reports_minimum_width_and_stays_unmodified() {
        let mut field = valid_field();
        field.width = 30.0;
        let errors = validate_field(&field);
        assert_eq!(errors, vec!["Width must be at least 50px".to_string()]);
        assert_eq!(field.width, 30.0);
    }

    #[test]
    fn blank_label_and_key_each_report() {
        let mut field = valid_field();
        field.label = "   ".to_string();
        field.key = String::new();
        let errors = validate_field(&field);
        assert!(errors.contains(&"Field label is required".to_string()));
        assert!(errors.contains(&"Field key is required".to_string()));
    }

    #[test]
    fn malformed_pattern_reports_valid_pattern_does_not() {
        let mut field = valid_field();
        field.validation = Some("[a-z".to_string());
        assert!(
            validate_field(&field).contains(&"Invalid validation pattern".to_string())
        );

        field.validation = Some(r"^\d{5}$".to_string());
        assert!(validate_field(&field).is_empty());
    }

    #[test]
    fn form_map_contains_only_offending_fields() {
        let good = valid_field();
        let mut bad = valid_field();
        bad.height = 10.0;
        bad.id = FieldId::intern("textfield-bad");

        let report = validate_form(&[good.clone(), bad.clone()]);
        assert!(!report.contains_key(&good.id));
        assert_eq!(
            report.get(&bad.id).unwrap(),
            &vec!["Height must be at least 20px".to_string()]
        );
    }
}
