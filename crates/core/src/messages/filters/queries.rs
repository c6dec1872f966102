//! Combined queries: composite nodes grouping filters under an aggregation
//! label.

use crate::messages::filters::clauses::Clause;
use crate::validation::{validate_component, Validatable, ValidationContext};

/// One entry of an aggregation: either a simple filter clause or a nested
/// combined query. Entries keep their insertion order, which becomes array
/// order in the wire document.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryFilter {
    Clause(Clause),
    Boolean(BooleanQuery),
    Boosting(BoostingQuery),
    Aggregated(AggregatedFilters),
}

impl From<Clause> for QueryFilter {
    fn from(clause: Clause) -> Self {
        Self::Clause(clause)
    }
}

impl From<BooleanQuery> for QueryFilter {
    fn from(query: BooleanQuery) -> Self {
        Self::Boolean(query)
    }
}

impl From<BoostingQuery> for QueryFilter {
    fn from(query: BoostingQuery) -> Self {
        Self::Boosting(query)
    }
}

impl From<AggregatedFilters> for QueryFilter {
    fn from(query: AggregatedFilters) -> Self {
        Self::Aggregated(query)
    }
}

/// An ordered aggregation of filters under a label such as `must` or
/// `positive`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedFilters {
    aggregation_label: String,
    filter_list: Vec<QueryFilter>,
}

impl AggregatedFilters {
    pub fn new(aggregation_label: impl Into<String>) -> Self {
        Self {
            aggregation_label: aggregation_label.into(),
            filter_list: Vec::new(),
        }
    }

    pub fn aggregation_label(&self) -> &str {
        &self.aggregation_label
    }

    /// Appends a simple filter clause; call order is preserved.
    pub fn add_clause(&mut self, clause: impl Into<Clause>) {
        self.filter_list.push(QueryFilter::Clause(clause.into()));
    }

    /// Appends a nested combined query; call order is preserved.
    pub fn add_query(&mut self, query: impl Into<QueryFilter>) {
        self.filter_list.push(query.into());
    }

    pub fn filters(&self) -> &[QueryFilter] {
        &self.filter_list
    }

    pub fn is_empty(&self) -> bool {
        self.filter_list.is_empty()
    }
}

impl Validatable for AggregatedFilters {
    fn validate_custom(&self, ctx: &mut ValidationContext) {
        for (index, filter) in self.filter_list.iter().enumerate() {
            ctx.nested(&format!("filterList[{index}]"), |ctx| match filter {
                QueryFilter::Clause(clause) => validate_component(clause, ctx),
                QueryFilter::Boolean(query) => validate_component(query, ctx),
                QueryFilter::Boosting(query) => validate_component(query, ctx),
                QueryFilter::Aggregated(query) => validate_component(query, ctx),
            });
        }
    }
}

/// Boolean filter compound: `must`, `should` and `must_not` buckets, all
/// three always present.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanQuery {
    must: AggregatedFilters,
    should: AggregatedFilters,
    must_not: AggregatedFilters,
}

impl Default for BooleanQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl BooleanQuery {
    pub fn new() -> Self {
        Self {
            must: AggregatedFilters::new("must"),
            should: AggregatedFilters::new("should"),
            must_not: AggregatedFilters::new("must_not"),
        }
    }

    pub fn add_must(&mut self, filter: impl Into<QueryFilter>) {
        self.must.add_query(filter);
    }

    pub fn add_should(&mut self, filter: impl Into<QueryFilter>) {
        self.should.add_query(filter);
    }

    pub fn add_must_not(&mut self, filter: impl Into<QueryFilter>) {
        self.must_not.add_query(filter);
    }

    pub fn must(&self) -> &AggregatedFilters {
        &self.must
    }

    pub fn should(&self) -> &AggregatedFilters {
        &self.should
    }

    pub fn must_not(&self) -> &AggregatedFilters {
        &self.must_not
    }
}

impl Validatable for BooleanQuery {
    fn validate_custom(&self, ctx: &mut ValidationContext) {
        ctx.nested("must", |ctx| validate_component(&self.must, ctx));
        ctx.nested("should", |ctx| validate_component(&self.should, ctx));
        ctx.nested("mustNot", |ctx| validate_component(&self.must_not, ctx));
    }
}

/// Ranking-bias compound: biases fields positively or negatively without
/// excluding non-matching documents.
///
/// Only filters over textual or numeric metadata are supported; the
/// `positive` and `negative` buckets are always present, even when empty.
#[derive(Debug, Clone, PartialEq)]
pub struct BoostingQuery {
    positive_filters: AggregatedFilters,
    negative_filters: AggregatedFilters,
}

impl BoostingQuery {
    pub fn new() -> Self {
        Self {
            positive_filters: AggregatedFilters::new("positive"),
            negative_filters: AggregatedFilters::new("negative"),
        }
    }

    /// Adds a clause biasing its field positively.
    pub fn add_positive(&mut self, clause: impl Into<Clause>) {
        self.positive_filters.add_clause(clause);
    }

    /// Adds a clause biasing its field negatively.
    pub fn add_negative(&mut self, clause: impl Into<Clause>) {
        self.negative_filters.add_clause(clause);
    }

    pub fn positive_filters(&self) -> &AggregatedFilters {
        &self.positive_filters
    }

    pub fn negative_filters(&self) -> &AggregatedFilters {
        &self.negative_filters
    }
}

impl Default for BoostingQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Validatable for BoostingQuery {
    fn validate_custom(&self, ctx: &mut ValidationContext) {
        if self.positive_filters.is_empty() && self.negative_filters.is_empty() {
            ctx.violate("positiveFilters", "At least one of the filter list must filled.");
        }

        check_boosting_bucket(&self.positive_filters, "positiveFilters", ctx);
        check_boosting_bucket(&self.negative_filters, "negativeFilters", ctx);

        ctx.nested("positiveFilters", |ctx| {
            validate_component(&self.positive_filters, ctx)
        });
        ctx.nested("negativeFilters", |ctx| {
            validate_component(&self.negative_filters, ctx)
        });
    }
}

/// Boosting only makes sense over text and numbers; date and boolean fields
/// are rejected with a violation scoped to the offending bucket entry.
fn check_boosting_bucket(bucket: &AggregatedFilters, property: &str, ctx: &mut ValidationContext) {
    for (index, filter) in bucket.filters().iter().enumerate() {
        if let QueryFilter::Clause(clause) = filter {
            let kind = clause.implied_metadata().kind();
            if !kind.is_textual() && !kind.is_numeric() {
                ctx.violate(
                    &format!("{property}[{index}]"),
                    "The Metadata implied in the filter is not supported. Only text and numerical ones are valid.",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::filters::clauses::TermClause;
    use crate::messages::metadata::{Metadata, MetadataValue};
    use crate::validation::Validator;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_boosting_query_reports_one_violation_at_positive_filters() {
        let query = BoostingQuery::new();
        let result = Validator::validate(&query);

        assert_eq!(result.len(), 1);
        assert_eq!(
            result.message_at("positiveFilters"),
            Some("At least one of the filter list must filled.")
        );
    }

    #[test]
    fn test_boosting_rejects_date_and_boolean_metadata() {
        let mut query = BoostingQuery::new();
        query.add_positive(TermClause::new(
            Metadata::date("pubDate"),
            MetadataValue::date("2020-01-01"),
        ));
        query.add_negative(TermClause::new(Metadata::string("title"), "fine"));
        query.add_negative(TermClause::new(Metadata::boolean("archived"), true));

        let result = Validator::validate(&query);

        assert_eq!(result.paths(), vec!["positiveFilters[0]", "negativeFilters[1]"]);
    }

    #[test]
    fn test_boosting_accepts_textual_and_numeric_metadata() {
        let mut query = BoostingQuery::new();
        query.add_positive(TermClause::new(Metadata::string("title"), "rust"));
        query.add_positive(TermClause::new(Metadata::integer("pages"), 10i64));
        query.add_negative(TermClause::new(Metadata::float("rank"), 0.5));

        assert!(Validator::validate(&query).is_valid());
    }

    #[test]
    fn test_aggregated_filters_keep_call_order() {
        let mut aggregated = AggregatedFilters::new("must");
        aggregated.add_clause(TermClause::new(Metadata::string("first"), "1"));
        aggregated.add_query(BooleanQuery::new());
        aggregated.add_clause(TermClause::new(Metadata::string("second"), "2"));

        let kinds: Vec<&str> = aggregated
            .filters()
            .iter()
            .map(|f| match f {
                QueryFilter::Clause(_) => "clause",
                QueryFilter::Boolean(_) => "boolean",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["clause", "boolean", "clause"]);
    }

    #[test]
    fn test_nested_violations_carry_bucket_paths() {
        let mut query = BooleanQuery::new();
        query.add_must(Clause::from(TermClause::new(Metadata::integer("pages"), "ten")));

        let result = Validator::validate(&query);

        assert_eq!(
            result.message_at("must.filterList[0].testedValue"),
            Some("The tested value type does not match the metadata type.")
        );
    }
}
