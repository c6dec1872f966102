//! Converters for the simple filter clauses.

use crate::proxy::converters::{convert_metadata_value, unexpected_component, ComponentConverter};
use crate::proxy::ComponentRef;
use searchgate_core::messages::{Clause, RangeClause};
use searchgate_core::Result;
use serde_json::{Map, Value};

/// `{"term": {"<wireName>": <value>, "boost"?: <number>}}`
pub struct TermClauseConverter;

impl ComponentConverter for TermClauseConverter {
    fn convert(&self, component: ComponentRef<'_>) -> Result<Option<Value>> {
        let ComponentRef::Clause(Clause::Term(clause)) = component else {
            return Err(unexpected_component("term clause"));
        };

        let metadata = clause.implied_metadata();
        let converted = convert_metadata_value(metadata.kind(), clause.tested_value())?;

        let mut value_object = Map::new();
        value_object.insert(metadata.wire_name(), converted);
        if let Some(boost) = clause.boost() {
            value_object.insert("boost".to_string(), Value::from(boost));
        }

        let mut wrapper = Map::new();
        wrapper.insert("term".to_string(), Value::Object(value_object));
        Ok(Some(Value::Object(wrapper)))
    }
}

/// `{"terms": {"<wireName>": [<values>], "boost"?: <number>}}`
pub struct TermsClauseConverter;

impl ComponentConverter for TermsClauseConverter {
    fn convert(&self, component: ComponentRef<'_>) -> Result<Option<Value>> {
        let ComponentRef::Clause(Clause::Terms(clause)) = component else {
            return Err(unexpected_component("terms clause"));
        };

        let metadata = clause.implied_metadata();
        let converted = clause
            .tested_values()
            .iter()
            .map(|value| convert_metadata_value(metadata.kind(), value))
            .collect::<Result<Vec<_>>>()?;

        let mut value_object = Map::new();
        value_object.insert(metadata.wire_name(), Value::Array(converted));
        if let Some(boost) = clause.boost() {
            value_object.insert("boost".to_string(), Value::from(boost));
        }

        let mut wrapper = Map::new();
        wrapper.insert("terms".to_string(), Value::Object(value_object));
        Ok(Some(Value::Object(wrapper)))
    }
}

/// `{"exists": {"field": "<wireName>"}}`
pub struct FieldExistsClauseConverter;

impl ComponentConverter for FieldExistsClauseConverter {
    fn convert(&self, component: ComponentRef<'_>) -> Result<Option<Value>> {
        let ComponentRef::Clause(Clause::FieldExists(clause)) = component else {
            return Err(unexpected_component("field-exists clause"));
        };

        let mut field_object = Map::new();
        field_object.insert(
            "field".to_string(),
            Value::String(clause.implied_metadata().wire_name()),
        );

        let mut wrapper = Map::new();
        wrapper.insert("exists".to_string(), Value::Object(field_object));
        Ok(Some(Value::Object(wrapper)))
    }
}

/// `{"range": {"<wireName>": {"gt"|"gte"|"lt"|"lte": ..., "boost"?: ...}}}`
pub struct RangeClauseConverter;

impl RangeClauseConverter {
    fn bounds_object(clause: &RangeClause) -> Result<Map<String, Value>> {
        let kind = clause.implied_metadata().kind();
        let mut bounds = Map::new();
        if let Some(bound) = clause.lower() {
            let key = if bound.inclusive { "gte" } else { "gt" };
            bounds.insert(key.to_string(), convert_metadata_value(kind, &bound.value)?);
        }
        if let Some(bound) = clause.upper() {
            let key = if bound.inclusive { "lte" } else { "lt" };
            bounds.insert(key.to_string(), convert_metadata_value(kind, &bound.value)?);
        }
        if let Some(boost) = clause.boost() {
            bounds.insert("boost".to_string(), Value::from(boost));
        }
        Ok(bounds)
    }
}

impl ComponentConverter for RangeClauseConverter {
    fn convert(&self, component: ComponentRef<'_>) -> Result<Option<Value>> {
        let ComponentRef::Clause(Clause::Range(clause)) = component else {
            return Err(unexpected_component("range clause"));
        };

        let mut field_object = Map::new();
        field_object.insert(
            clause.implied_metadata().wire_name(),
            Value::Object(Self::bounds_object(clause)?),
        );

        let mut wrapper = Map::new();
        wrapper.insert("range".to_string(), Value::Object(field_object));
        Ok(Some(Value::Object(wrapper)))
    }
}
