//! Lowering of scope predicates to SQL.
//!
//! A resolved scope is a union of [`SubQuery`] predicates. They become one
//! parenthesized `OR` over the `audit_log` alias `l`, with every value bound
//! as a numbered parameter. Each predicate names the entity kind it accepts,
//! so ownership paths never cross (a file id logged as a comment does not
//! resolve through the file table).

use quire_core::enums::{EntityKind, OwnedKind, SortColumn};
use quire_core::query::Sort;
use quire_core::scope::SubQuery;

/// Numbered-parameter accumulator shared by every clause of one statement.
#[derive(Debug, Default)]
pub struct Params {
    values: Vec<libsql::Value>,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value and return its placeholder (`?1`, `?2`, ...).
    pub fn bind(&mut self, value: impl Into<libsql::Value>) -> String {
        self.values.push(value.into());
        format!("?{}", self.values.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The bound values, for `libsql::params_from_iter`.
    #[must_use]
    pub fn values(&self) -> Vec<libsql::Value> {
        self.values.clone()
    }
}

/// Table and column that map an owned entity id to its document.
#[must_use]
pub const fn owner_source(kind: OwnedKind) -> (&'static str, &'static str) {
    match kind {
        OwnedKind::File => ("files", "document_id"),
        OwnedKind::Comment => ("comments", "document_id"),
        OwnedKind::AccessEntry => ("acl", "source_id"),
        OwnedKind::Route => ("routes", "document_id"),
    }
}

/// SQL condition for one predicate.
pub fn lower(predicate: &SubQuery, params: &mut Params) -> String {
    match predicate {
        SubQuery::EntityIs { kind, entity_id } => {
            let k = params.bind(kind.as_str());
            let id = params.bind(entity_id.as_str());
            format!("(l.entity_kind = {k} AND l.entity_id = {id})")
        }
        SubQuery::OwnedBy { kind, document_id } => {
            let (table, column) = owner_source(*kind);
            let k = params.bind(kind.entity_kind().as_str());
            let doc = params.bind(document_id.as_str());
            format!(
                "(l.entity_kind = {k} AND l.entity_id IN (SELECT id FROM {table} WHERE {column} = {doc}))"
            )
        }
        SubQuery::AllExcept { kind } => {
            let k = params.bind(kind.as_str());
            format!("(l.entity_kind <> {k})")
        }
        SubQuery::ActorExcept { actor_id, kind } => {
            let actor = params.bind(actor_id.as_str());
            let k = params.bind(kind.as_str());
            format!("(l.actor_id = {actor} AND l.entity_kind <> {k})")
        }
    }
}

/// SQL condition for the union of `predicates`, or `None` for an empty set.
///
/// `None` means "matches nothing"; callers must not run an unfiltered query.
pub fn lower_union(predicates: &[SubQuery], params: &mut Params) -> Option<String> {
    if predicates.is_empty() {
        return None;
    }
    let parts: Vec<String> = predicates.iter().map(|p| lower(p, params)).collect();
    Some(format!("({})", parts.join(" OR ")))
}

/// `ORDER BY` body for a search page. `actor_name` is the joined display name.
#[must_use]
pub fn order_by(sort: Sort) -> String {
    let column = match sort.column {
        SortColumn::CreatedAt => "l.created_at",
        SortColumn::Actor => "actor_name",
        SortColumn::EntityId => "l.entity_id",
        SortColumn::EntityKind => "l.entity_kind",
        SortColumn::EventKind => "l.event_kind",
    };
    let direction = if sort.ascending { "ASC" } else { "DESC" };
    format!("{column} {direction}, l.id ASC")
}

/// `SELECT document_id, log_id` over every log entry that resolves to a
/// document, one arm per ownership path joined by `UNION ALL`.
///
/// Arms are disjoint by entity kind and owner ids are primary keys, so each
/// entry appears at most once and a per-document `count(*)` equals the total
/// of that document's scoped search.
pub fn document_resolution(params: &mut Params) -> String {
    let k = params.bind(EntityKind::Document.as_str());
    let mut arms = vec![format!(
        "SELECT l.entity_id AS document_id, l.id AS log_id FROM audit_log l WHERE l.entity_kind = {k}"
    )];
    for kind in OwnedKind::ALL {
        let (table, column) = owner_source(kind);
        let k = params.bind(kind.entity_kind().as_str());
        arms.push(format!(
            "SELECT o.{column} AS document_id, l.id AS log_id FROM audit_log l \
             JOIN {table} o ON o.id = l.entity_id WHERE l.entity_kind = {k}"
        ));
    }
    arms.join(" UNION ALL ")
}
