//! # Validation Module
//!
//! The form validator that gates every create and edit.
//!
//! ## Validation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Write Boundary                                     │
//! │                                                                         │
//! │  FormInput (raw strings / dates)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate(input, rules)                                                │
//! │  ├── rules run in declared order                                       │
//! │  ├── first failure → ValidationError { field, message }               │
//! │  └── success → Validated (numbers parsed, dates parsed, text trimmed)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  XxxDraft::from_form(&validated) → store.insert / store.update         │
//! │                                                                         │
//! │  A failure happens before any store call, so nothing is half-written.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use oasis_core::validation::{validate, FormInput, Rule, Rules};
//!
//! let rules = Rules::new()
//!     .field("number", [Rule::Required])
//!     .field("capacity", [Rule::Required, Rule::Integer { min: 1, max: 20 }]);
//!
//! let input = FormInput::new().text("number", " 101 ").text("capacity", "2");
//! let form = validate(&input, &rules).unwrap();
//! assert_eq!(form.text("number"), Some("101"));
//! assert_eq!(form.integer("capacity"), Some(2));
//!
//! let bad = FormInput::new().text("number", "101").text("capacity", "two");
//! assert_eq!(validate(&bad, &rules).unwrap_err().field(), "capacity");
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Token;
use crate::MAX_AMOUNT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Calendar date format accepted from text inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Form Input
// =============================================================================

/// One raw value as supplied by a form widget.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
}

/// Raw form values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    fields: BTreeMap<String, FieldValue>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, field: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(field.to_string(), FieldValue::Text(value.into()));
        self
    }

    /// Numeric widget value, kept as text until a numeric rule parses it.
    pub fn number(self, field: &str, value: impl ToString) -> Self {
        self.text(field, value.to_string())
    }

    pub fn date(mut self, field: &str, value: NaiveDate) -> Self {
        self.fields
            .insert(field.to_string(), FieldValue::Date(value));
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Reads a field as a date, whether typed as text or picked as a date.
    /// Returns `None` when absent or unparseable.
    fn date_of(&self, field: &str) -> Option<NaiveDate> {
        match self.fields.get(field)? {
            FieldValue::Date(date) => Some(*date),
            FieldValue::Text(text) => NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok(),
        }
    }
}

// =============================================================================
// Rules
// =============================================================================

/// A single field-level check.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Value must be present and non-blank.
    Required,
    /// Minimum length in characters.
    MinLength(usize),
    /// Maximum length in characters.
    MaxLength(usize),
    /// Whole number within `min..=max`.
    Integer { min: i64, max: i64 },
    /// Decimal number within `min..=max`. Accepts `,` as decimal mark.
    Decimal { min: f64, max: f64 },
    /// Money amount within `0..=MAX_AMOUNT`. Accepts thousands separators.
    Amount,
    /// Value must be one of these tokens.
    OneOf(&'static [&'static str]),
    Email,
    /// Calendar date, `YYYY-MM-DD` or a picked date.
    Date,
    /// Date strictly after the date in the named field.
    After(&'static str),
    /// Comma-separated list; items trimmed, empty items dropped.
    List,
}

/// A rule bound to the field it checks.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
}

/// Ordered rule list for one form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rules {
    entries: Vec<FieldRule>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `rules` for `field`, after everything declared so far.
    pub fn field(mut self, field: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.entries
            .extend(rules.into_iter().map(|rule| FieldRule { field, rule }));
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldRule> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Validated Output
// =============================================================================

/// A normalized field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Amount(Money),
    Date(NaiveDate),
    List(Vec<String>),
    /// Optional field left empty.
    Absent,
}

/// The normalized value set produced by a successful [`validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validated {
    values: BTreeMap<&'static str, Value>,
}

impl Validated {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        match self.values.get(field)? {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn integer(&self, field: &str) -> Option<i64> {
        match self.values.get(field)? {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn decimal(&self, field: &str) -> Option<f64> {
        match self.values.get(field)? {
            Value::Decimal(n) => Some(*n),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn amount(&self, field: &str) -> Option<Money> {
        match self.values.get(field)? {
            Value::Amount(m) => Some(*m),
            _ => None,
        }
    }

    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        match self.values.get(field)? {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// List items; empty when the field is absent.
    pub fn list(&self, field: &str) -> Vec<String> {
        match self.values.get(field) {
            Some(Value::List(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    /// Optional text as an owned value.
    pub fn optional_text(&self, field: &str) -> Option<String> {
        self.text(field).map(str::to_string)
    }

    // -------------------------------------------------------------------------
    // Required accessors: a form built without the matching rule reports the
    // field as missing instead of panicking.
    // -------------------------------------------------------------------------

    pub fn required_text(&self, field: &str) -> ValidationResult<String> {
        self.optional_text(field).ok_or_else(|| missing(field))
    }

    pub fn required_integer(&self, field: &str) -> ValidationResult<i64> {
        self.integer(field).ok_or_else(|| missing(field))
    }

    pub fn required_decimal(&self, field: &str) -> ValidationResult<f64> {
        self.decimal(field).ok_or_else(|| missing(field))
    }

    pub fn required_amount(&self, field: &str) -> ValidationResult<Money> {
        self.amount(field).ok_or_else(|| missing(field))
    }

    pub fn required_date(&self, field: &str) -> ValidationResult<NaiveDate> {
        self.date(field).ok_or_else(|| missing(field))
    }

    /// Whole number that fits a `u32` count (capacity, guests, quantity).
    pub fn required_count(&self, field: &str) -> ValidationResult<u32> {
        let n = self.required_integer(field)?;
        u32::try_from(n).map_err(|_| ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: u32::MAX.to_string(),
        })
    }

    /// Parses a token field into its enumeration.
    pub fn required_token<T: Token>(&self, field: &str) -> ValidationResult<T> {
        let text = self.text(field).ok_or_else(|| missing(field))?;
        T::from_str(text).map_err(|_| not_allowed(field, T::TOKENS))
    }
}

fn missing(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

fn not_allowed(field: &str, allowed: &[&str]) -> ValidationError {
    ValidationError::NotAllowed {
        field: field.to_string(),
        allowed: allowed.iter().map(|s| s.to_string()).collect(),
    }
}

// =============================================================================
// Validate
// =============================================================================

/// Evaluates `rules` in declared order against `input`.
///
/// ## Returns
/// - `Ok(Validated)` with every ruled field normalized
/// - `Err(ValidationError)` for the first failing rule
pub fn validate(input: &FormInput, rules: &Rules) -> ValidationResult<Validated> {
    let mut validated = Validated::default();

    for FieldRule { field, rule } in rules.iter() {
        let value = validated
            .values
            .entry(*field)
            .or_insert_with(|| initial_value(input, field));
        check(field, rule, value, input)?;
    }

    Ok(validated)
}

fn initial_value(input: &FormInput, field: &str) -> Value {
    match input.get(field) {
        Some(FieldValue::Text(text)) if !text.trim().is_empty() => {
            Value::Text(text.trim().to_string())
        }
        Some(FieldValue::Date(date)) => Value::Date(*date),
        _ => Value::Absent,
    }
}

fn check(field: &str, rule: &Rule, value: &mut Value, input: &FormInput) -> ValidationResult<()> {
    if matches!(value, Value::Absent) {
        return match rule {
            Rule::Required => Err(missing(field)),
            _ => Ok(()),
        };
    }

    match rule {
        Rule::Required => {}

        Rule::MinLength(min) => {
            if let Value::Text(text) = value {
                if text.chars().count() < *min {
                    return Err(ValidationError::TooShort {
                        field: field.to_string(),
                        min: *min,
                    });
                }
            }
        }

        Rule::MaxLength(max) => {
            if let Value::Text(text) = value {
                if text.chars().count() > *max {
                    return Err(ValidationError::TooLong {
                        field: field.to_string(),
                        max: *max,
                    });
                }
            }
        }

        Rule::Integer { min, max } => {
            let n = match value {
                Value::Integer(n) => *n,
                Value::Text(text) => text.parse::<i64>().map_err(|_| not_a_number(field))?,
                _ => return Err(not_a_number(field)),
            };
            if n < *min || n > *max {
                return Err(out_of_range(field, min, max));
            }
            *value = Value::Integer(n);
        }

        Rule::Decimal { min, max } => {
            let n = match value {
                Value::Decimal(n) => *n,
                Value::Integer(n) => *n as f64,
                Value::Text(text) => text
                    .replace(',', ".")
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| not_a_number(field))?,
                _ => return Err(not_a_number(field)),
            };
            if n < *min || n > *max {
                return Err(out_of_range(field, min, max));
            }
            *value = Value::Decimal(n);
        }

        Rule::Amount => {
            let amount = match value {
                Value::Amount(m) => *m,
                Value::Text(text) => Money::parse(text).ok_or_else(|| not_a_number(field))?,
                _ => return Err(not_a_number(field)),
            };
            if amount.is_negative() || amount > MAX_AMOUNT {
                return Err(out_of_range(field, &0, &MAX_AMOUNT.units()));
            }
            *value = Value::Amount(amount);
        }

        Rule::OneOf(allowed) => {
            let Value::Text(text) = value else {
                return Err(not_allowed(field, allowed));
            };
            if !allowed.contains(&text.as_str()) {
                return Err(not_allowed(field, allowed));
            }
        }

        Rule::Email => {
            if let Value::Text(text) = value {
                if !looks_like_email(text) {
                    return Err(ValidationError::InvalidFormat {
                        field: field.to_string(),
                        reason: "expected an email address".to_string(),
                    });
                }
            }
        }

        Rule::Date => {
            if let Value::Text(text) = value {
                let date = NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| {
                    ValidationError::InvalidFormat {
                        field: field.to_string(),
                        reason: "expected a date as YYYY-MM-DD".to_string(),
                    }
                })?;
                *value = Value::Date(date);
            }
        }

        Rule::After(other) => {
            let this = match value {
                Value::Date(date) => Some(*date),
                Value::Text(text) => NaiveDate::parse_from_str(text, DATE_FORMAT).ok(),
                _ => None,
            };
            if let (Some(this), Some(earlier)) = (this, input.date_of(other)) {
                if this <= earlier {
                    return Err(ValidationError::NotAfter {
                        field: field.to_string(),
                        other: other.to_string(),
                    });
                }
            }
        }

        Rule::List => {
            if let Value::Text(text) = value {
                let items = text
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect();
                *value = Value::List(items);
            }
        }
    }

    Ok(())
}

fn not_a_number(field: &str) -> ValidationError {
    ValidationError::NotANumber {
        field: field.to_string(),
    }
}

fn out_of_range<T: ToString>(field: &str, min: &T, max: &T) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: min.to_string(),
        max: max.to_string(),
    }
}

fn looks_like_email(text: &str) -> bool {
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !text.contains(char::is_whitespace)
}

// =============================================================================
// Search Query
// =============================================================================

/// Validates a list search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
