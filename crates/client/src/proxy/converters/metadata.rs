//! Converter for metadata components of index documents.

use crate::proxy::converters::{convert_metadata_value, unexpected_component, ComponentConverter};
use crate::proxy::ComponentRef;
use searchgate_core::Result;
use serde_json::{Map, Value};

/// `{"<wireName>": [<converted values>]}`
///
/// Values go through the same per-kind conversion as term clauses, so dates
/// and booleans reach the index in their wire form.
pub struct MetadataConverter;

impl ComponentConverter for MetadataConverter {
    fn convert(&self, component: ComponentRef<'_>) -> Result<Option<Value>> {
        let ComponentRef::Metadata(metadata) = component else {
            return Err(unexpected_component("metadata"));
        };

        let values = metadata
            .values()
            .iter()
            .map(|value| convert_metadata_value(metadata.kind(), value))
            .collect::<Result<Vec<_>>>()?;

        let mut wrapper = Map::new();
        wrapper.insert(metadata.wire_name(), Value::Array(values));
        Ok(Some(Value::Object(wrapper)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use searchgate_core::messages::{Metadata, MetadataValue};
    use serde_json::json;

    #[test]
    fn test_metadata_converts_to_wire_name_and_values() {
        let metadata = Metadata::date("pubDate").with_values(vec![
            MetadataValue::date("2020-01-01"),
            MetadataValue::date("2021-06-15 08:30:00"),
        ]);

        let fragment = MetadataConverter
            .convert(ComponentRef::Metadata(&metadata))
            .unwrap()
            .unwrap();

        assert_eq!(
            fragment,
            json!({"esDATE_pubDate": [
                "2020-01-01T00:00:00+00:00",
                "2021-06-15T08:30:00+00:00"
            ]})
        );
    }
}
