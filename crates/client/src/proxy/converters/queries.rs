//! Converters for the combined queries.
//!
//! All three share one conversion shape: a labelled array (or merged object)
//! of the non-empty child fragments, or nothing at all when every child
//! converted to nothing.

use crate::proxy::converters::{unexpected_component, ComponentConverter};
use crate::proxy::ComponentRef;
use searchgate_core::Result;
use serde_json::{Map, Value};

/// `{"<label>": [<child fragments, insertion order>]}`
pub struct AggregatedFiltersConverter;

impl ComponentConverter for AggregatedFiltersConverter {
    fn convert(&self, component: ComponentRef<'_>) -> Result<Option<Value>> {
        self.convert_with_children(component, Vec::new())
    }

    fn convert_with_children(
        &self,
        component: ComponentRef<'_>,
        children: Vec<Value>,
    ) -> Result<Option<Value>> {
        let ComponentRef::Aggregated(query) = component else {
            return Err(unexpected_component("aggregated filters"));
        };

        if children.is_empty() {
            return Ok(None);
        }

        let mut wrapper = Map::new();
        wrapper.insert(query.aggregation_label().to_string(), Value::Array(children));
        Ok(Some(Value::Object(wrapper)))
    }
}

/// Merges labelled bucket fragments (`{"must": [...]}` etc.) into one object.
fn merge_buckets(children: Vec<Value>) -> Map<String, Value> {
    let mut merged = Map::new();
    for child in children {
        if let Value::Object(bucket) = child {
            merged.extend(bucket);
        }
    }
    merged
}

/// `{"bool": {"must": [...], "should": [...], "must_not": [...]}}` with
/// empty buckets left out.
pub struct BooleanQueryConverter;

impl ComponentConverter for BooleanQueryConverter {
    fn convert(&self, component: ComponentRef<'_>) -> Result<Option<Value>> {
        self.convert_with_children(component, Vec::new())
    }

    fn convert_with_children(
        &self,
        component: ComponentRef<'_>,
        children: Vec<Value>,
    ) -> Result<Option<Value>> {
        let ComponentRef::Boolean(_) = component else {
            return Err(unexpected_component("boolean query"));
        };

        let merged = merge_buckets(children);
        if merged.is_empty() {
            return Ok(None);
        }

        let mut wrapper = Map::new();
        wrapper.insert("bool".to_string(), Value::Object(merged));
        Ok(Some(Value::Object(wrapper)))
    }
}

/// `{"boosting": {"positive": [...], "negative": [...]}}` with empty buckets
/// left out.
pub struct BoostingQueryConverter;

impl ComponentConverter for BoostingQueryConverter {
    fn convert(&self, component: ComponentRef<'_>) -> Result<Option<Value>> {
        self.convert_with_children(component, Vec::new())
    }

    fn convert_with_children(
        &self,
        component: ComponentRef<'_>,
        children: Vec<Value>,
    ) -> Result<Option<Value>> {
        let ComponentRef::Boosting(_) = component else {
            return Err(unexpected_component("boosting query"));
        };

        let merged = merge_buckets(children);
        if merged.is_empty() {
            return Ok(None);
        }

        let mut wrapper = Map::new();
        wrapper.insert("boosting".to_string(), Value::Object(merged));
        Ok(Some(Value::Object(wrapper)))
    }
}
