//! Component converters: one per component type, mapping a node (plus its
//! already-converted children) to a wire-format fragment.

mod clauses;
mod metadata;
mod queries;

pub use clauses::{
    FieldExistsClauseConverter, RangeClauseConverter, TermClauseConverter, TermsClauseConverter,
};
pub use metadata::MetadataConverter;
pub use queries::{AggregatedFiltersConverter, BooleanQueryConverter, BoostingQueryConverter};

use crate::proxy::ComponentRef;
use searchgate_core::messages::metadata::{format_service_date, parse_service_date};
use searchgate_core::messages::{MetadataKind, MetadataValue};
use searchgate_core::{Error, Result};
use serde_json::Value;

/// Converts one component into its wire-format fragment.
///
/// `Ok(None)` means the component contributes nothing to the wire document
/// and the parent must omit it.
pub trait ComponentConverter: Send + Sync {
    /// Conversion for leaf components.
    fn convert(&self, component: ComponentRef<'_>) -> Result<Option<Value>>;

    /// Conversion for composite components, given the ordered, non-empty
    /// fragments of their children.
    fn convert_with_children(
        &self,
        component: ComponentRef<'_>,
        _children: Vec<Value>,
    ) -> Result<Option<Value>> {
        self.convert(component)
    }
}

/// Per-kind value conversion shared by the clause and metadata converters:
/// dates are reformatted to the service wire format, booleans become JSON
/// booleans, everything else passes through unchanged.
pub(crate) fn convert_metadata_value(kind: MetadataKind, value: &MetadataValue) -> Result<Value> {
    if kind == MetadataKind::Date {
        if let MetadataValue::Date(raw) = value {
            let parsed = parse_service_date(raw)
                .ok_or_else(|| Error::conversion(format!("Unrecognized date value '{raw}'")))?;
            return Ok(Value::String(format_service_date(&parsed)));
        }
    }

    Ok(match value {
        MetadataValue::String(text) => Value::String(text.clone()),
        MetadataValue::Integer(number) => Value::from(*number),
        MetadataValue::Float(number) => Value::from(*number),
        MetadataValue::Boolean(flag) => Value::Bool(*flag),
        MetadataValue::Date(raw) => Value::String(raw.clone()),
    })
}

/// Error for a converter handed a component variant it is not registered
/// for; indicates a mis-assembled registry.
pub(crate) fn unexpected_component(expected: &str) -> Error {
    Error::conversion(format!("Converter expected a {expected} component"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_date_values_are_reformatted_for_the_wire() {
        let converted = convert_metadata_value(
            MetadataKind::Date,
            &MetadataValue::date("2020-01-01"),
        )
        .unwrap();
        assert_eq!(converted, json!("2020-01-01T00:00:00+00:00"));
    }

    #[test]
    fn test_non_date_values_pass_through_unchanged() {
        assert_eq!(
            convert_metadata_value(MetadataKind::String, &"x".into()).unwrap(),
            json!("x")
        );
        assert_eq!(
            convert_metadata_value(MetadataKind::Integer, &10i64.into()).unwrap(),
            json!(10)
        );
        assert_eq!(
            convert_metadata_value(MetadataKind::Boolean, &true.into()).unwrap(),
            json!(true)
        );
    }

    #[test]
    fn test_unparseable_date_is_a_conversion_error() {
        let error =
            convert_metadata_value(MetadataKind::Date, &MetadataValue::date("soon")).unwrap_err();
        assert!(matches!(error, Error::Conversion(_)));
    }
}
