//! Saved investigations.
//!
//! CRUD operations for the `investigations` table. Each row keeps the search
//! subject, the full result set and the cross groups as JSON.

use crate::error::{DatabaseError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use investiga_core::{ResultSet, Subject};
use investiga_cross::CrossGroup;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};

/// A saved search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investigation {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// When the investigation was saved
    pub created_at: DateTime<Utc>,
    /// Optional free-form label
    pub label: Option<String>,
    /// Subject as searched
    pub subject: Subject,
    /// Items per field and provider
    pub results: ResultSet,
    /// Cross-reference groups
    pub cross_groups: Vec<CrossGroup>,
}

/// One row of the history listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestigationSummary {
    /// Unique identifier
    pub id: String,
    /// When the investigation was saved
    pub created_at: DateTime<Utc>,
    /// Optional free-form label
    pub label: Option<String>,
    /// Subject as searched
    pub subject: Subject,
    /// Number of items across every field and provider
    pub item_count: usize,
    /// Number of cross groups
    pub group_count: usize,
}

/// Save a finished search and return its new id.
///
/// # Errors
/// Returns `DatabaseError` if serialization or the insert fails.
pub async fn save_investigation(
    pool: &Pool<Sqlite>,
    subject: &Subject,
    results: &ResultSet,
    cross_groups: &[CrossGroup],
    label: Option<&str>,
) -> Result<String> {
    let id = uuid::Uuid::new_v4().to_string();
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let label = label.map(str::trim).filter(|l| !l.is_empty());

    sqlx::query(
        "INSERT INTO investigations (id, created_at, label, subject, results, cross_groups)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&created_at)
    .bind(label)
    .bind(serde_json::to_string(subject)?)
    .bind(serde_json::to_string(results)?)
    .bind(serde_json::to_string(cross_groups)?)
    .execute(pool)
    .await?;

    tracing::debug!(
        "Saved investigation {} ({} items, {} groups)",
        id,
        results.item_count(),
        cross_groups.len()
    );

    Ok(id)
}

/// Load one investigation by id.
///
/// # Errors
/// Returns `DatabaseError::NotFound` if no row has this id, or
/// `DatabaseError::Serialization` if a stored column no longer decodes.
pub async fn get_investigation(pool: &Pool<Sqlite>, id: &str) -> Result<Investigation> {
    let row = sqlx::query(
        "SELECT id, created_at, label, subject, results, cross_groups
         FROM investigations
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(id.to_string()))?;

    let results: String = row.try_get("results")?;
    let cross_groups: String = row.try_get("cross_groups")?;

    Ok(Investigation {
        id: row.try_get("id")?,
        created_at: parse_created_at(&row)?,
        label: row.try_get("label")?,
        subject: serde_json::from_str(&row.try_get::<String, _>("subject")?)?,
        results: serde_json::from_str(&results)?,
        cross_groups: serde_json::from_str(&cross_groups)?,
    })
}

/// Most recent investigations first, at most `limit` rows.
///
/// # Errors
/// Returns `DatabaseError` if the query fails or a stored column no longer
/// decodes.
pub async fn list_investigations(
    pool: &Pool<Sqlite>,
    limit: u32,
) -> Result<Vec<InvestigationSummary>> {
    let rows = sqlx::query(
        "SELECT id, created_at, label, subject, results, cross_groups
         FROM investigations
         ORDER BY created_at DESC
         LIMIT ?",
    )
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    rows.iter().map(parse_summary).collect()
}

/// Delete an investigation.
///
/// # Errors
/// Returns `DatabaseError::NotFound` if no row has this id.
pub async fn delete_investigation(pool: &Pool<Sqlite>, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM investigations WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(id.to_string()));
    }

    tracing::debug!("Deleted investigation {}", id);
    Ok(())
}

fn parse_summary(row: &SqliteRow) -> Result<InvestigationSummary> {
    let results: ResultSet = serde_json::from_str(&row.try_get::<String, _>("results")?)?;
    let cross_groups: Vec<serde_json::Value> =
        serde_json::from_str(&row.try_get::<String, _>("cross_groups")?)?;

    Ok(InvestigationSummary {
        id: row.try_get("id")?,
        created_at: parse_created_at(row)?,
        label: row.try_get("label")?,
        subject: serde_json::from_str(&row.try_get::<String, _>("subject")?)?,
        item_count: results.item_count(),
        group_count: cross_groups.len(),
    })
}

fn parse_created_at(row: &SqliteRow) -> Result<DateTime<Utc>> {
    let created_at: String = row.try_get("created_at")?;
    DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::Sqlx(sqlx::Error::Decode(Box::new(e))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use investiga_core::{CrossConfig, Provider, SearchItem, SubjectField};
    use investiga_cross::cross_reference;

    async fn setup_test_db() -> Database {
        Database::in_memory().await.expect("open database")
    }

    fn sample() -> (Subject, ResultSet, Vec<CrossGroup>) {
        let subject = Subject::default()
            .with(SubjectField::Cpf, "123.456.789-09")
            .with(SubjectField::Celular, "(11) 98765-4321");
        let mut results = ResultSet::new();
        results.insert(
            SubjectField::Cpf,
            Provider::Cpf,
            vec![SearchItem::new(Provider::Cpf)
                .with_title("CPF válido")
                .with_attr("cpf", "123.456.789-09")],
        );
        results.insert(
            SubjectField::Celular,
            Provider::DirectData,
            vec![SearchItem::new(Provider::DirectData)
                .with_title("Titular")
                .with_attr("cpf", "12345678909")],
        );
        let report = cross_reference(&results, &CrossConfig::default());
        (subject, results, report.groups)
    }

    #[tokio::test]
    async fn test_save_and_get_roundtrip() {
        let db = setup_test_db().await;
        let (subject, results, groups) = sample();

        let id = save_investigation(db.pool(), &subject, &results, &groups, Some(" caso 7 "))
            .await
            .expect("save");
        let saved = get_investigation(db.pool(), &id).await.expect("get");

        assert_eq!(saved.id, id);
        assert_eq!(saved.label.as_deref(), Some("caso 7"));
        assert_eq!(saved.subject, subject);
        assert_eq!(saved.results, results);
        assert_eq!(saved.cross_groups, groups);
        assert_eq!(saved.cross_groups.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_label_is_stored_as_null() {
        let db = setup_test_db().await;
        let (subject, results, groups) = sample();

        let id = save_investigation(db.pool(), &subject, &results, &groups, Some("   "))
            .await
            .expect("save");
        let saved = get_investigation(db.pool(), &id).await.expect("get");
        assert_eq!(saved.label, None);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let db = setup_test_db().await;
        let err = get_investigation(db.pool(), "nao-existe")
            .await
            .expect_err("missing");
        assert!(matches!(err, DatabaseError::NotFound(id) if id == "nao-existe"));
    }

    #[tokio::test]
    async fn test_list_newest_first_with_limit() {
        let db = setup_test_db().await;
        let (subject, results, groups) = sample();

        let mut ids = Vec::new();
        for label in ["primeira", "segunda", "terceira"] {
            ids.push(
                save_investigation(db.pool(), &subject, &results, &groups, Some(label))
                    .await
                    .expect("save"),
            );
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let listed = list_investigations(db.pool(), 2).await.expect("list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].label.as_deref(), Some("terceira"));
        assert_eq!(listed[1].label.as_deref(), Some("segunda"));
        assert_eq!(listed[0].item_count, 2);
        assert_eq!(listed[0].group_count, 1);
        assert_eq!(listed[0].subject, subject);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = setup_test_db().await;
        let (subject, results, groups) = sample();
        let id = save_investigation(db.pool(), &subject, &results, &groups, None)
            .await
            .expect("save");

        delete_investigation(db.pool(), &id).await.expect("delete");
        assert!(list_investigations(db.pool(), 10)
            .await
            .expect("list")
            .is_empty());

        let err = delete_investigation(db.pool(), &id)
            .await
            .expect_err("already deleted");
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }
}
