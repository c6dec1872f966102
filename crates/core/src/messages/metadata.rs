//! Typed, named references to remote document fields.
//!
//! A [`Metadata`] carries the raw field name, the scalar kind the service
//! stores for that field, and zero or more values. Values are not coerced at
//! assignment time; a value whose runtime type disagrees with the declared
//! kind is reported by validation, not by construction.

use crate::validation::{validate_component, Rule, Validatable, ValidationContext};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Wire format the service expects for date values.
pub const SERVICE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Scalar kind of a document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    /// Full-text searchable string field
    FullText,
    String,
    Integer,
    Float,
    Boolean,
    Date,
    /// Stored but not searchable
    NotIndexed,
}

impl MetadataKind {
    /// Wire-name prefix. Fixed per kind; must stay byte-exact for
    /// compatibility with the remote index schema.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::FullText => "esIN_",
            Self::String => "esST_",
            Self::Integer | Self::Float => "esNU_",
            Self::Boolean => "esBO_",
            Self::Date => "esDATE_",
            Self::NotIndexed => "esNI_",
        }
    }

    /// String and full-text fields
    pub fn is_textual(self) -> bool {
        matches!(self, Self::FullText | Self::String)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Scalar type expected for values of this kind, as shown in violation
    /// messages.
    fn scalar_type_name(self) -> &'static str {
        match self {
            Self::FullText | Self::String | Self::NotIndexed => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }
}

/// One scalar value carried by a metadata field.
///
/// Dates are carried as their raw textual form and only parsed when
/// validated or converted for the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(String),
}

impl MetadataValue {
    /// Builds a date value from its textual form.
    pub fn date(raw: impl Into<String>) -> Self {
        Self::Date(raw.into())
    }

    /// Whether this value's runtime type matches the declared field kind.
    pub fn matches_kind(&self, kind: MetadataKind) -> bool {
        matches!(
            (self, kind),
            (
                Self::String(_),
                MetadataKind::FullText | MetadataKind::String | MetadataKind::NotIndexed
            ) | (Self::Integer(_), MetadataKind::Integer)
                | (Self::Float(_), MetadataKind::Float)
                | (Self::Integer(_), MetadataKind::Float)
                | (Self::Boolean(_), MetadataKind::Boolean)
                | (Self::Date(_), MetadataKind::Date)
        )
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// A typed, named reference to a remote document field, used for filtering,
/// sorting, boosting and indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    raw_name: String,
    kind: MetadataKind,
    values: Vec<MetadataValue>,
}

impl Metadata {
    pub fn new(kind: MetadataKind, raw_name: impl Into<String>) -> Self {
        Self {
            raw_name: raw_name.into(),
            kind,
            values: Vec::new(),
        }
    }

    pub fn full_text(raw_name: impl Into<String>) -> Self {
        Self::new(MetadataKind::FullText, raw_name)
    }

    pub fn string(raw_name: impl Into<String>) -> Self {
        Self::new(MetadataKind::String, raw_name)
    }

    pub fn integer(raw_name: impl Into<String>) -> Self {
        Self::new(MetadataKind::Integer, raw_name)
    }

    pub fn float(raw_name: impl Into<String>) -> Self {
        Self::new(MetadataKind::Float, raw_name)
    }

    pub fn boolean(raw_name: impl Into<String>) -> Self {
        Self::new(MetadataKind::Boolean, raw_name)
    }

    pub fn date(raw_name: impl Into<String>) -> Self {
        Self::new(MetadataKind::Date, raw_name)
    }

    pub fn not_indexed(raw_name: impl Into<String>) -> Self {
        Self::new(MetadataKind::NotIndexed, raw_name)
    }

    /// Replaces the value list. No coercion is performed; type mismatches
    /// surface at validation time.
    pub fn set_values(&mut self, values: Vec<MetadataValue>) {
        self.values = values;
    }

    /// Builder form of [`Metadata::set_values`].
    pub fn with_values(mut self, values: Vec<MetadataValue>) -> Self {
        self.values = values;
        self
    }

    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    pub fn kind(&self) -> MetadataKind {
        self.kind
    }

    pub fn values(&self) -> &[MetadataValue] {
        &self.values
    }

    /// Field name as the remote schema knows it: the kind prefix followed by
    /// the raw name.
    pub fn wire_name(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.raw_name)
    }
}

impl Validatable for Metadata {
    fn rules() -> &'static [Rule<Self>] {
        const RULES: &[Rule<Metadata>] = &[Rule {
            path: "rawName",
            check: |metadata| !metadata.raw_name.trim().is_empty(),
            message: "This value should not be blank.",
        }];
        RULES
    }

    fn validate_custom(&self, ctx: &mut ValidationContext) {
        for (index, value) in self.values.iter().enumerate() {
            if !value.matches_kind(self.kind) {
                ctx.violate(
                    &format!("values[{index}]"),
                    format!("This value should be of type {}.", self.kind.scalar_type_name()),
                );
            } else if let MetadataValue::Date(raw) = value {
                if parse_service_date(raw).is_none() {
                    ctx.violate(
                        &format!("values[{index}]"),
                        "This value is not a valid datetime.",
                    );
                }
            }
        }
    }
}

/// Parses a date value from the forms callers supply: RFC 3339, a date-time
/// without offset (UTC assumed), or a bare date (midnight UTC).
pub fn parse_service_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc().fixed_offset());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset());
    }
    None
}

/// Formats a parsed date the way the service expects it on the wire.
pub fn format_service_date(date: &DateTime<FixedOffset>) -> String {
    date.format(SERVICE_DATE_FORMAT).to_string()
}

/// Convenience for validating a nested metadata property.
pub(crate) fn validate_nested_metadata(
    metadata: &Metadata,
    segment: &str,
    ctx: &mut ValidationContext,
) {
    ctx.nested(segment, |ctx| validate_component(metadata, ctx));
}
