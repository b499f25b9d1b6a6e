use crate::clause::{Bucket, ClauseKind, PredicateValue};
use crate::conditions::Conditions;
use serde_json::Value;

/// Default `slop` of a phrase match
pub const DEFAULT_SLOP: u32 = 0;

/// Predicate verbs shared by [`crate::Query`] and [`crate::Filter`].
///
/// The plain form of each verb appends to `must`, the `or_` form to `should`.
pub trait Predicates {
    fn conditions(&self) -> &Conditions;

    fn conditions_mut(&mut self) -> &mut Conditions;

    /// Exact value: `term`
    fn where_(&mut self, field: &str, value: impl Into<PredicateValue>) -> &mut Self {
        self.conditions_mut()
            .push(Bucket::Must, ClauseKind::Term, field, value.into());
        self
    }

    fn or_where(&mut self, field: &str, value: impl Into<PredicateValue>) -> &mut Self {
        self.conditions_mut()
            .push(Bucket::Should, ClauseKind::Term, field, value.into());
        self
    }

    /// Adds `value` as an alternative for `field`. An array replaces the
    /// alternatives collected so far.
    ///
    /// Only [`crate::Filter`] compiles nested groups. On a [`crate::Query`]
    /// this just registers `field` for highlighting.
    fn where_nested(&mut self, field: &str, value: impl Into<PredicateValue>) -> &mut Self {
        self.conditions_mut()
            .nest_value(ClauseKind::Term, field, value.into());
        self
    }

    /// Any of the values: `terms` with `execution: bool`
    fn where_in<I>(&mut self, field: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.conditions_mut().terms(Bucket::Must, field, values);
        self
    }

    fn or_where_in<I>(&mut self, field: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.conditions_mut().terms(Bucket::Should, field, values);
        self
    }

    fn wildcard(&mut self, field: &str, value: impl Into<PredicateValue>) -> &mut Self {
        self.conditions_mut()
            .push(Bucket::Must, ClauseKind::Wildcard, field, value.into());
        self
    }

    fn or_wildcard(&mut self, field: &str, value: impl Into<PredicateValue>) -> &mut Self {
        self.conditions_mut()
            .push(Bucket::Should, ClauseKind::Wildcard, field, value.into());
        self
    }

    /// Full-text `match`
    fn match_(&mut self, field: &str, terms: impl Into<PredicateValue>) -> &mut Self {
        self.conditions_mut()
            .push(Bucket::Must, ClauseKind::Match, field, terms.into());
        self
    }

    fn or_match(&mut self, field: &str, terms: impl Into<PredicateValue>) -> &mut Self {
        self.conditions_mut()
            .push(Bucket::Should, ClauseKind::Match, field, terms.into());
        self
    }

    fn match_phrase(&mut self, field: &str, phrase: &str, slop: u32) -> &mut Self {
        self.conditions_mut()
            .match_phrase(Bucket::Must, field, phrase, slop);
        self
    }

    fn or_match_phrase(&mut self, field: &str, phrase: &str, slop: u32) -> &mut Self {
        self.conditions_mut()
            .match_phrase(Bucket::Should, field, phrase, slop);
        self
    }

    /// `prefix`
    fn starts_with(&mut self, field: &str, value: impl Into<PredicateValue>) -> &mut Self {
        self.conditions_mut()
            .push(Bucket::Must, ClauseKind::Prefix, field, value.into());
        self
    }

    fn or_starts_with(&mut self, field: &str, value: impl Into<PredicateValue>) -> &mut Self {
        self.conditions_mut()
            .push(Bucket::Should, ClauseKind::Prefix, field, value.into());
        self
    }

    /// Inclusive range `gte min, lte max`
    fn between(&mut self, field: &str, min: impl Into<Value>, max: impl Into<Value>) -> &mut Self {
        self.conditions_mut()
            .range(Bucket::Must, field, Some(min.into()), Some(max.into()));
        self
    }

    fn or_between(&mut self, field: &str, min: impl Into<Value>, max: impl Into<Value>) -> &mut Self {
        self.conditions_mut()
            .range(Bucket::Should, field, Some(min.into()), Some(max.into()));
        self
    }

    /// Range kept as an alternative, expanded together with the other nested
    /// ranges. Like [`Predicates::where_nested`], it has no effect on a
    /// compiled [`crate::Query`].
    fn between_nested(
        &mut self,
        field: &str,
        min: impl Into<Value>,
        max: impl Into<Value>,
    ) -> &mut Self {
        self.conditions_mut()
            .nest_range(field, Some(min.into()), Some(max.into()));
        self
    }

    /// Lower bound, inclusive (`gte`)
    fn gt(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.conditions_mut()
            .range(Bucket::Must, field, Some(value.into()), None);
        self
    }

    fn or_gt(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.conditions_mut()
            .range(Bucket::Should, field, Some(value.into()), None);
        self
    }

    /// Upper bound, inclusive (`lte`)
    fn lt(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.conditions_mut()
            .range(Bucket::Must, field, None, Some(value.into()));
        self
    }

    fn or_lt(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.conditions_mut()
            .range(Bucket::Should, field, None, Some(value.into()));
        self
    }
}
