// src/query.rs
//! Builds the filter document sent with every posts query.
//!
//! Whatever the caller asks for, the query is scoped to documents whose
//! `Type` select is `Post`: the result is always a top-level `and` whose
//! first condition is that base predicate.

use crate::constants::{BASE_PREDICATE_PROPERTY, BASE_PREDICATE_VALUE};
use crate::model::{FilterPredicate, SortSpec};
use serde::Serialize;

/// The condition every posts query carries.
pub fn base_predicate() -> FilterPredicate {
    FilterPredicate::select_equals(BASE_PREDICATE_PROPERTY, BASE_PREDICATE_VALUE)
}

/// Combines `base` with an optional caller filter into one `And`.
///
/// A caller `And` is spliced in one level deep; an `Or` or a simple
/// predicate is appended whole. An empty compound counts as no filter.
pub fn build_filter(base: FilterPredicate, user_filter: Option<FilterPredicate>) -> FilterPredicate {
    let mut conditions = vec![base];

    match user_filter {
        None => {}
        Some(filter) if filter.is_empty() => {}
        Some(FilterPredicate::And(predicates)) => conditions.extend(predicates),
        Some(other) => conditions.push(other),
    }

    FilterPredicate::And(conditions)
}

/// What a caller wants from the posts database.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentQuery {
    pub filter: Option<FilterPredicate>,
    pub sort: SortSpec,
}

impl DocumentQuery {
    pub fn new(filter: Option<FilterPredicate>, sort: SortSpec) -> Self {
        Self { filter, sort }
    }
}

/// Body of `POST /databases/{id}/query`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionQuery {
    pub filter: FilterPredicate,
    #[serde(rename = "sorts", skip_serializing_if = "SortSpec::is_empty")]
    pub sort: SortSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl CollectionQuery {
    /// A first-page query for `query`, scoped by the base predicate.
    pub fn scoped(query: DocumentQuery) -> Self {
        Self {
            filter: build_filter(base_predicate(), query.filter),
            sort: query.sort,
            start_cursor: None,
            page_size: None,
        }
    }

    /// The same query positioned at `cursor`.
    pub fn page(&self, page_size: u32, cursor: Option<String>) -> Self {
        Self {
            start_cursor: cursor,
            page_size: Some(page_size),
            ..self.clone()
        }
    }
}
