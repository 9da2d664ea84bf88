//! Query composer: scoped, sorted, paginated search over the log.

use std::collections::HashSet;

use quire_core::entities::LogEntryView;
use quire_core::query::{PageRequest, SearchPage, Sort};
use quire_core::scope::{SearchScope, SubQuery};

use crate::error::DatabaseError;
use crate::helpers::{get_count, parse_datetime, parse_enum};
use crate::predicates::{Params, lower_union, order_by};
use crate::service::QuireService;

fn row_to_view(row: &libsql::Row) -> Result<LogEntryView, DatabaseError> {
    Ok(LogEntryView {
        id: row.get(0)?,
        actor_name: row.get(1)?,
        entity_id: row.get(2)?,
        entity_kind: parse_enum(&row.get::<String>(3)?)?,
        event_kind: parse_enum(&row.get::<String>(4)?)?,
        message: row.get(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl QuireService {
    /// One page of the entries visible through `scope`, plus the size of the
    /// whole result set.
    ///
    /// A scope with a blank target returns an empty page without touching the
    /// store. Permission to read a document's events is the caller's check.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Decode` if any returned row carries an
    /// unrecognized kind, and propagates store failures.
    pub async fn search(
        &self,
        scope: &SearchScope,
        sort: Sort,
        page: PageRequest,
    ) -> Result<SearchPage, DatabaseError> {
        self.search_predicates(&scope.resolve(), sort, page).await
    }

    /// [`Self::search`] over an already resolved predicate set.
    ///
    /// # Errors
    ///
    /// Same as [`Self::search`].
    pub async fn search_predicates(
        &self,
        predicates: &[SubQuery],
        sort: Sort,
        page: PageRequest,
    ) -> Result<SearchPage, DatabaseError> {
        let mut params = Params::new();
        let Some(filter) = lower_union(predicates, &mut params) else {
            tracing::debug!("empty scope, skipping search");
            return Ok(SearchPage::empty());
        };

        let total = self.count_matching(&filter, &params).await?;

        let limit = params.bind(i64::from(page.limit));
        let offset = params.bind(i64::from(page.offset));
        let sql = format!(
            "SELECT l.id, COALESCE(u.username, l.actor_id) AS actor_name, l.entity_id,
                    l.entity_kind, l.event_kind, l.message, l.created_at
             FROM audit_log l
             LEFT JOIN users u ON u.id = l.actor_id
             WHERE {filter}
             ORDER BY {order}
             LIMIT {limit} OFFSET {offset}",
            order = order_by(sort),
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params.values()))
            .await?;

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            let view = row_to_view(&row)?;
            if seen.insert(view.id.clone()) {
                entries.push(view);
            }
        }

        tracing::debug!(
            predicates = predicates.len(),
            column = %sort.column,
            ascending = sort.ascending,
            offset = page.offset,
            returned = entries.len(),
            total,
            "search"
        );
        Ok(SearchPage { entries, total })
    }

    async fn count_matching(&self, filter: &str, params: &Params) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT count(*) FROM audit_log l WHERE {filter}"),
                libsql::params_from_iter(params.values()),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }
}
