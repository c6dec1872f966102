//! Filter clauses: predicates over a single metadata field.

use crate::messages::metadata::{
    parse_service_date, validate_nested_metadata, Metadata, MetadataKind, MetadataValue,
};
use crate::validation::{Validatable, ValidationContext};

/// A predicate over one metadata field.
///
/// The discriminant doubles as the converter type identifier during request
/// assembly.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Term(TermClause),
    Terms(TermsClause),
    FieldExists(FieldExistsClause),
    Range(RangeClause),
}

impl Clause {
    /// The field this clause filters on.
    pub fn implied_metadata(&self) -> &Metadata {
        match self {
            Self::Term(clause) => clause.implied_metadata(),
            Self::Terms(clause) => clause.implied_metadata(),
            Self::FieldExists(clause) => clause.implied_metadata(),
            Self::Range(clause) => clause.implied_metadata(),
        }
    }

    /// Ranking boost, for the boostable variants.
    pub fn boost(&self) -> Option<f64> {
        match self {
            Self::Term(clause) => clause.boost(),
            Self::Terms(clause) => clause.boost(),
            Self::FieldExists(_) => None,
            Self::Range(clause) => clause.boost(),
        }
    }
}

impl From<TermClause> for Clause {
    fn from(clause: TermClause) -> Self {
        Self::Term(clause)
    }
}

impl From<TermsClause> for Clause {
    fn from(clause: TermsClause) -> Self {
        Self::Terms(clause)
    }
}

impl From<FieldExistsClause> for Clause {
    fn from(clause: FieldExistsClause) -> Self {
        Self::FieldExists(clause)
    }
}

impl From<RangeClause> for Clause {
    fn from(clause: RangeClause) -> Self {
        Self::Range(clause)
    }
}

/// Exact match of one value against one field.
#[derive(Debug, Clone, PartialEq)]
pub struct TermClause {
    metadata: Metadata,
    tested_value: MetadataValue,
    boost: Option<f64>,
}

impl TermClause {
    pub fn new(metadata: Metadata, tested_value: impl Into<MetadataValue>) -> Self {
        Self {
            metadata,
            tested_value: tested_value.into(),
            boost: None,
        }
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn implied_metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn tested_value(&self) -> &MetadataValue {
        &self.tested_value
    }

    pub fn boost(&self) -> Option<f64> {
        self.boost
    }
}

/// Match of any of several values against one field.
#[derive(Debug, Clone, PartialEq)]
pub struct TermsClause {
    metadata: Metadata,
    tested_values: Vec<MetadataValue>,
    boost: Option<f64>,
}

impl TermsClause {
    pub fn new(metadata: Metadata, tested_values: Vec<MetadataValue>) -> Self {
        Self {
            metadata,
            tested_values,
            boost: None,
        }
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn implied_metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn tested_values(&self) -> &[MetadataValue] {
        &self.tested_values
    }

    pub fn boost(&self) -> Option<f64> {
        self.boost
    }
}

/// Matches documents where the field is present at all.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldExistsClause {
    metadata: Metadata,
}

impl FieldExistsClause {
    pub fn new(metadata: Metadata) -> Self {
        Self { metadata }
    }

    pub fn implied_metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// One end of a range, inclusive or exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeBound {
    pub value: MetadataValue,
    pub inclusive: bool,
}

/// Matches documents whose field value falls between two boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeClause {
    metadata: Metadata,
    lower: Option<RangeBound>,
    upper: Option<RangeBound>,
    boost: Option<f64>,
}

impl RangeClause {
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            lower: None,
            upper: None,
            boost: None,
        }
    }

    pub fn with_lower_included(mut self, value: impl Into<MetadataValue>) -> Self {
        self.lower = Some(RangeBound {
            value: value.into(),
            inclusive: true,
        });
        self
    }

    pub fn with_lower_excluded(mut self, value: impl Into<MetadataValue>) -> Self {
        self.lower = Some(RangeBound {
            value: value.into(),
            inclusive: false,
        });
        self
    }

    pub fn with_upper_included(mut self, value: impl Into<MetadataValue>) -> Self {
        self.upper = Some(RangeBound {
            value: value.into(),
            inclusive: true,
        });
        self
    }

    pub fn with_upper_excluded(mut self, value: impl Into<MetadataValue>) -> Self {
        self.upper = Some(RangeBound {
            value: value.into(),
            inclusive: false,
        });
        self
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn implied_metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn lower(&self) -> Option<&RangeBound> {
        self.lower.as_ref()
    }

    pub fn upper(&self) -> Option<&RangeBound> {
        self.upper.as_ref()
    }

    pub fn boost(&self) -> Option<f64> {
        self.boost
    }
}

fn check_value_kind(
    ctx: &mut ValidationContext,
    path: &str,
    kind: MetadataKind,
    value: &MetadataValue,
) {
    if !value.matches_kind(kind) {
        ctx.violate(
            path,
            "The tested value type does not match the metadata type.",
        );
    } else if let MetadataValue::Date(raw) = value {
        if parse_service_date(raw).is_none() {
            ctx.violate(path, "This value is not a valid datetime.");
        }
    }
}

impl Validatable for Clause {
    fn validate_custom(&self, ctx: &mut ValidationContext) {
        let metadata = self.implied_metadata();
        validate_nested_metadata(metadata, "impliedMetadata", ctx);

        match self {
            Self::Term(clause) => {
                check_value_kind(ctx, "testedValue", metadata.kind(), clause.tested_value());
            }
            Self::Terms(clause) => {
                for (index, value) in clause.tested_values().iter().enumerate() {
                    check_value_kind(
                        ctx,
                        &format!("testedValues[{index}]"),
                        metadata.kind(),
                        value,
                    );
                }
            }
            Self::FieldExists(_) => {}
            Self::Range(clause) => {
                if clause.lower().is_none() && clause.upper().is_none() {
                    ctx.violate("lowerBoundary", "At least one boundary must be defined.");
                }
                if let Some(bound) = clause.lower() {
                    check_value_kind(ctx, "lowerBoundary", metadata.kind(), &bound.value);
                }
                if let Some(bound) = clause.upper() {
                    check_value_kind(ctx, "upperBoundary", metadata.kind(), &bound.value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validator;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_exists_accepts_every_metadata_kind() {
        let clauses = [
            Clause::from(FieldExistsClause::new(Metadata::string("test_data1"))),
            Clause::from(FieldExistsClause::new(Metadata::boolean("test_data2"))),
            Clause::from(FieldExistsClause::new(Metadata::integer("test_data3"))),
            Clause::from(FieldExistsClause::new(Metadata::date("test_data4"))),
            Clause::from(FieldExistsClause::new(Metadata::float("test_data5"))),
        ];

        for clause in &clauses {
            assert!(
                Validator::validate(clause).is_valid(),
                "unexpected violations for {clause:?}"
            );
        }
    }

    #[test]
    fn test_blank_metadata_name_is_reported_under_implied_metadata() {
        let clause = Clause::from(FieldExistsClause::new(Metadata::string("")));
        let result = Validator::validate(&clause);

        assert_eq!(
            result.message_at("impliedMetadata.rawName"),
            Some("This value should not be blank.")
        );
    }

    #[test]
    fn test_term_value_must_match_metadata_kind() {
        let clause = Clause::from(TermClause::new(Metadata::integer("pages"), "ten"));
        let result = Validator::validate(&clause);

        assert_eq!(result.len(), 1);
        assert_eq!(
            result.message_at("testedValue"),
            Some("The tested value type does not match the metadata type.")
        );
    }

    #[test]
    fn test_terms_values_are_reported_per_index() {
        let clause = Clause::from(TermsClause::new(
            Metadata::string("keywords"),
            vec!["fine".into(), 4i64.into()],
        ));
        let result = Validator::validate(&clause);

        assert_eq!(result.paths(), vec!["testedValues[1]"]);
    }

    #[test]
    fn test_range_requires_a_boundary() {
        let clause = Clause::from(RangeClause::new(Metadata::integer("pages")));
        let result = Validator::validate(&clause);

        assert_eq!(
            result.message_at("lowerBoundary"),
            Some("At least one boundary must be defined.")
        );
    }

    #[test]
    fn test_range_boundaries_are_checked_against_the_kind() {
        let clause = Clause::from(
            RangeClause::new(Metadata::integer("pages"))
                .with_lower_included(10i64)
                .with_upper_excluded("many"),
        );
        let result = Validator::validate(&clause);

        assert_eq!(result.paths(), vec!["upperBoundary"]);
    }
}
