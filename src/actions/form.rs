//! Invoice form schema
//!
//! Submitted values arrive as optional strings. They are coerced into
//! [`InvoiceFields`] and checked with `validator`; every failing field is
//! reported, keyed by its form name.

use crate::core::model::InvoiceStatus;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const CUSTOMER_REQUIRED: &str = "Please select a customer.";
pub const AMOUNT_NOT_POSITIVE: &str = "Please enter an amount greater than $0.";
pub const AMOUNT_NOT_A_NUMBER: &str = "Expected number, received nan";
pub const STATUS_REQUIRED: &str = "Please select an invoice status.";

/// Struct field name and form field name, in reporting order
const FIELD_NAMES: [(&str, &str); 3] = [
    ("customer_id", "customerId"),
    ("amount", "amount"),
    ("status", "status"),
];

/// Raw invoice form submission
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InvoiceFormData {
    #[serde(rename = "customerId")]
    pub customer_id: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
}

impl InvoiceFormData {
    pub fn new(customer_id: &str, amount: &str, status: &str) -> Self {
        Self {
            customer_id: Some(customer_id.to_string()),
            amount: Some(amount.to_string()),
            status: Some(status.to_string()),
        }
    }
}

/// Coerced form values
#[derive(Debug, Clone, Validate)]
pub struct InvoiceFields {
    #[validate(required(message = "Please select a customer."))]
    pub customer_id: Option<String>,

    /// Dollars; NaN when the submitted text was not a number
    #[validate(range(exclusive_min = 0.0, message = "Please enter an amount greater than $0."))]
    pub amount: f64,

    #[validate(required(message = "Please select an invoice status."))]
    pub status: Option<InvoiceStatus>,
}

/// A form submission that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidInvoice {
    pub customer_id: String,
    /// Dollars
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl ValidInvoice {
    /// Amount in whole cents
    pub fn amount_in_cents(&self) -> i64 {
        to_cents(self.amount)
    }
}

fn to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

/// Field name to messages, only for fields that failed
pub type FieldErrors = IndexMap<String, Vec<String>>;

impl From<&InvoiceFormData> for InvoiceFields {
    fn from(form: &InvoiceFormData) -> Self {
        Self {
            customer_id: form
                .customer_id
                .clone()
                .filter(|id| !id.trim().is_empty()),
            amount: coerce_number(form.amount.as_deref()),
            status: form.status.as_deref().and_then(|s| s.parse().ok()),
        }
    }
}

/// Numeric coercion of a form value; missing or blank is zero
fn coerce_number(value: Option<&str>) -> f64 {
    let text = value.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return 0.0;
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => f64::NAN,
    }
}

/// Validate a submission, collecting every field error
pub fn validate_invoice_form(form: &InvoiceFormData) -> Result<ValidInvoice, FieldErrors> {
    let fields = InvoiceFields::from(form);
    let mut errors = FieldErrors::new();

    if let Err(report) = fields.validate() {
        let by_field = report.field_errors();
        for (field, form_name) in FIELD_NAMES {
            if let Some(list) = by_field.get(field) {
                let messages = list
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                errors.insert(form_name.to_string(), messages);
            }
        }
    }

    if fields.amount.is_nan() {
        errors.insert("amount".to_string(), vec![AMOUNT_NOT_A_NUMBER.to_string()]);
    } else if to_cents(fields.amount) <= 0 {
        // positive in dollars but under half a cent
        errors
            .entry("amount".to_string())
            .or_insert_with(|| vec![AMOUNT_NOT_POSITIVE.to_string()]);
    }
    let position =
        |name: &String| FIELD_NAMES.iter().position(|(_, form_name)| *form_name == name.as_str());
    errors.sort_by(|a, _, b, _| position(a).cmp(&position(b)));

    match (fields.customer_id, fields.status) {
        (Some(customer_id), Some(status)) if errors.is_empty() => Ok(ValidInvoice {
            customer_id,
            amount: fields.amount,
            status,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form() {
        let valid = validate_invoice_form(&InvoiceFormData::new("c-1", "125.5", "paid")).unwrap();
        assert_eq!(valid.customer_id, "c-1");
        assert_eq!(valid.status, InvoiceStatus::Paid);
        assert_eq!(valid.amount_in_cents(), 12_550);
    }

    #[test]
    fn test_cents_are_rounded() {
        let valid = validate_invoice_form(&InvoiceFormData::new("c-1", "19.99", "pending")).unwrap();
        assert_eq!(valid.amount_in_cents(), 1999);
    }

    #[test]
    fn test_zero_and_negative_amounts_rejected() {
        for amount in ["0", "-5", "", "   "] {
            let errors =
                validate_invoice_form(&InvoiceFormData::new("c-1", amount, "paid")).unwrap_err();
            assert_eq!(errors["amount"], vec![AMOUNT_NOT_POSITIVE], "amount {:?}", amount);
        }
    }

    #[test]
    fn test_sub_cent_amounts_rejected() {
        for amount in ["0.001", "0.004"] {
            let errors =
                validate_invoice_form(&InvoiceFormData::new("c-1", amount, "paid")).unwrap_err();
            assert_eq!(errors["amount"], vec![AMOUNT_NOT_POSITIVE], "amount {:?}", amount);
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn test_smallest_accepted_amount_is_one_cent() {
        let valid = validate_invoice_form(&InvoiceFormData::new("c-1", "0.01", "paid")).unwrap();
        assert_eq!(valid.amount_in_cents(), 1);
    }

    #[test]
    fn test_sub_cent_error_keeps_field_order() {
        let form = InvoiceFormData {
            customer_id: None,
            amount: Some("0.001".to_string()),
            status: None,
        };
        let errors = validate_invoice_form(&form).unwrap_err();
        let names: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["customerId", "amount", "status"]);
    }

    #[test]
    fn test_derived_messages_match_constants() {
        let fields = InvoiceFields {
            customer_id: None,
            amount: 0.0,
            status: None,
        };
        let report = fields.validate().unwrap_err();
        let by_field = report.field_errors();
        let message = |field: &str| {
            by_field[field][0]
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_default()
        };
        assert_eq!(message("customer_id"), CUSTOMER_REQUIRED);
        assert_eq!(message("amount"), AMOUNT_NOT_POSITIVE);
        assert_eq!(message("status"), STATUS_REQUIRED);
    }

    #[test]
    fn test_customer_id_is_forwarded_verbatim() {
        let valid = validate_invoice_form(&InvoiceFormData::new(" c-1 ", "1", "paid")).unwrap();
        assert_eq!(valid.customer_id, " c-1 ");

        let errors = validate_invoice_form(&InvoiceFormData::new("   ", "1", "paid")).unwrap_err();
        assert_eq!(errors["customerId"], vec![CUSTOMER_REQUIRED]);
    }

    #[test]
    fn test_non_numeric_amount() {
        let errors =
            validate_invoice_form(&InvoiceFormData::new("c-1", "twelve", "paid")).unwrap_err();
        assert_eq!(errors["amount"], vec![AMOUNT_NOT_A_NUMBER]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_invalid_status_rejected() {
        let errors =
            validate_invoice_form(&InvoiceFormData::new("c-1", "10", "overdue")).unwrap_err();
        assert_eq!(errors["status"], vec![STATUS_REQUIRED]);
    }

    #[test]
    fn test_empty_form_reports_every_field_in_order() {
        let errors = validate_invoice_form(&InvoiceFormData::default()).unwrap_err();
        let names: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["customerId", "amount", "status"]);
        assert_eq!(errors["customerId"], vec![CUSTOMER_REQUIRED]);
    }

    #[test]
    fn test_nan_amount_keeps_field_order() {
        let form = InvoiceFormData {
            customer_id: None,
            amount: Some("abc".to_string()),
            status: None,
        };
        let errors = validate_invoice_form(&form).unwrap_err();
        let names: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["customerId", "amount", "status"]);
    }

    #[test]
    fn test_form_data_uses_camel_case_customer_id() {
        let form: InvoiceFormData =
            serde_json::from_value(serde_json::json!({ "customerId": "c-9" })).unwrap();
        assert_eq!(form.customer_id.as_deref(), Some("c-9"));
    }
}
