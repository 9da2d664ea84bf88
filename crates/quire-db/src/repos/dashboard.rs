//! Aggregator: derived views over the whole log.
//!
//! Every view is recomputed from the store on each call. Nothing is cached.

use chrono::{DateTime, Datelike, TimeDelta, Utc};
use quire_core::enums::{EntityKind, EventKind};
use quire_core::responses::{
    ActiveDocument, ActivityByType, ActivityOverTime, Dashboard, DashboardOptions, RecentActivity,
};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_count, get_opt_string, parse_datetime, parse_enum};
use crate::predicates::{Params, document_resolution};
use crate::service::QuireService;

/// Lower bound used when a window reaches back past year 1, the earliest
/// timestamp the stored form can hold.
const EARLIEST_STORED: &str = "0001-01-01T00:00:00.000000Z";

/// Start of a `days`-long window ending at `now`, or `None` when it would
/// fall before year 1.
fn window_start(now: DateTime<Utc>, days: u32) -> Option<DateTime<Utc>> {
    now.checked_sub_signed(TimeDelta::days(i64::from(days)))
        .filter(|start| start.year() >= 1)
}

impl QuireService {
    /// Per-actor daily event counts over the last `days` days.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn activity_over_time(&self, days: u32) -> Result<ActivityOverTime, DatabaseError> {
        match window_start(Utc::now(), days) {
            Some(cutoff) => self.activity_since(cutoff).await,
            None => self.activity_from(EARLIEST_STORED).await,
        }
    }

    /// Per-actor daily event counts for entries at or after `cutoff`.
    ///
    /// Days are UTC calendar days. Actors and days without events are absent.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn activity_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<ActivityOverTime, DatabaseError> {
        self.activity_from(&format_datetime(&cutoff)).await
    }

    async fn activity_from(&self, cutoff: &str) -> Result<ActivityOverTime, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT actor_id, substr(created_at, 1, 10) AS day, count(*)
                 FROM audit_log
                 WHERE created_at >= ?1
                 GROUP BY actor_id, day",
                [cutoff.to_string()],
            )
            .await?;

        let mut activity = ActivityOverTime::new();
        while let Some(row) = rows.next().await? {
            let actor: String = row.get(0)?;
            let day: String = row.get(1)?;
            activity
                .entry(actor)
                .or_default()
                .insert(day, get_count(&row, 2)?);
        }
        Ok(activity)
    }

    /// Total entries per event kind.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Decode` if a stored event kind is unrecognized.
    pub async fn activity_count_by_type(&self) -> Result<ActivityByType, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT event_kind, count(*) FROM audit_log GROUP BY event_kind",
                (),
            )
            .await?;

        let mut by_type = ActivityByType::new();
        while let Some(row) = rows.next().await? {
            let kind: EventKind = parse_enum(&row.get::<String>(0)?)?;
            by_type.insert(kind, get_count(&row, 1)?);
        }
        Ok(by_type)
    }

    /// Live documents ranked by the number of entries their document scope
    /// resolves to, highest first, ties by document id.
    ///
    /// Documents without entries are omitted.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn most_active_documents(
        &self,
        limit: u32,
    ) -> Result<Vec<ActiveDocument>, DatabaseError> {
        let mut params = Params::new();
        let resolved = document_resolution(&mut params);
        let limit = params.bind(i64::from(limit));
        let sql = format!(
            "WITH resolved AS ({resolved})
             SELECT d.id, d.title, count(*) AS n
             FROM resolved r
             JOIN documents d ON d.id = r.document_id
             WHERE d.deleted_at IS NULL
             GROUP BY d.id, d.title
             ORDER BY n DESC, d.id ASC
             LIMIT {limit}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params.values()))
            .await?;

        let mut documents = Vec::new();
        while let Some(row) = rows.next().await? {
            documents.push(ActiveDocument {
                id: row.get(0)?,
                title: row.get(1)?,
                count: get_count(&row, 2)?,
            });
        }
        Ok(documents)
    }

    /// The newest `limit` entries, newest first, with presentation fields
    /// joined in.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Decode` if a returned row carries an
    /// unrecognized kind.
    pub async fn recent_activity(&self, limit: u32) -> Result<Vec<RecentActivity>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT l.id, l.created_at, l.actor_id, COALESCE(u.username, l.actor_id),
                        l.event_kind, l.entity_kind, l.entity_id, l.message,
                        CASE WHEN l.entity_kind = ?1 THEN d.title END
                 FROM audit_log l
                 LEFT JOIN users u ON u.id = l.actor_id
                 LEFT JOIN documents d ON d.id = l.entity_id AND d.deleted_at IS NULL
                 ORDER BY l.created_at DESC, l.id ASC
                 LIMIT ?2",
                libsql::params![EntityKind::Document.as_str(), i64::from(limit)],
            )
            .await?;

        let mut feed = Vec::new();
        while let Some(row) = rows.next().await? {
            feed.push(RecentActivity {
                id: row.get(0)?,
                created_at: parse_datetime(&row.get::<String>(1)?)?,
                actor_id: row.get(2)?,
                actor_name: row.get(3)?,
                event_kind: parse_enum(&row.get::<String>(4)?)?,
                entity_kind: parse_enum(&row.get::<String>(5)?)?,
                entity_id: row.get(6)?,
                message: row.get(7)?,
                document_title: get_opt_string(&row, 8)?,
            });
        }
        Ok(feed)
    }

    /// All four views. Any failing view fails the whole dashboard.
    ///
    /// # Errors
    ///
    /// The first error raised by any view.
    pub async fn dashboard(&self, options: DashboardOptions) -> Result<Dashboard, DatabaseError> {
        let dashboard = Dashboard {
            user_activity: self.activity_over_time(options.activity_days).await?,
            activity_by_type: self.activity_count_by_type().await?,
            active_documents: self.most_active_documents(options.active_documents).await?,
            recent_activity: self.recent_activity(options.recent_activity).await?,
        };
        tracing::debug!(
            actors = dashboard.user_activity.len(),
            documents = dashboard.active_documents.len(),
            recent = dashboard.recent_activity.len(),
            "dashboard"
        );
        Ok(dashboard)
    }
}
