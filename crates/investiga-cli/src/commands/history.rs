//! `investiga history`

use super::subject_summary;
use anyhow::{Context, Result};
use clap::Subcommand;
use investiga_core::AppConfig;
use investiga_cross::CrossReport;
use investiga_db::{investigations, Database, InvestigationSummary};
use investiga_export::{Dossier, ExportFormat, ExportOptions};

/// Saved investigation commands.
#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List the most recent investigations.
    List {
        /// Maximum number of rows
        #[arg(long, short, default_value_t = 20)]
        limit: u32,
    },

    /// Print a saved investigation as a dossier.
    Show {
        /// Investigation id
        id: String,

        /// Output format: json, csv or markdown
        #[arg(long, short, default_value = "json")]
        format: ExportFormat,
    },

    /// Delete a saved investigation.
    Delete {
        /// Investigation id
        id: String,
    },
}

/// One line of `history list` output.
pub fn format_summary(summary: &InvestigationSummary) -> String {
    format!(
        "{}  {}  {}  {}  ({} itens, {} cruzamentos)",
        summary.id,
        summary.created_at.format("%Y-%m-%d %H:%M"),
        summary.label.as_deref().unwrap_or("-"),
        subject_summary(&summary.subject),
        summary.item_count,
        summary.group_count
    )
}

/// Run a history subcommand against the configured database.
pub async fn run(command: HistoryCommand) -> Result<()> {
    let config = AppConfig::load_with_env().context("failed to load configuration")?;
    let path = config
        .database
        .resolve_path()
        .context("failed to locate history database")?;
    let db = Database::open(&path)
        .await
        .with_context(|| format!("failed to open {}", path.display()))?;

    match command {
        HistoryCommand::List { limit } => {
            let rows = investigations::list_investigations(db.pool(), limit)
                .await
                .context("failed to list investigations")?;
            if rows.is_empty() {
                println!("Nenhuma investigação salva.");
            }
            for row in &rows {
                println!("{}", format_summary(row));
            }
        }
        HistoryCommand::Show { id, format } => {
            let saved = investigations::get_investigation(db.pool(), &id)
                .await
                .with_context(|| format!("failed to load investigation {id}"))?;
            let report = CrossReport::from_groups(saved.cross_groups);
            let dossier = Dossier::new(&saved.subject, &saved.results, &report)
                .generated_at(saved.created_at);
            let rendered = format
                .render(&dossier, &ExportOptions::from_config(&config))
                .context("failed to render dossier")?;
            println!("{rendered}");
        }
        HistoryCommand::Delete { id } => {
            investigations::delete_investigation(db.pool(), &id)
                .await
                .with_context(|| format!("failed to delete investigation {id}"))?;
            println!("Investigação {id} removida.");
        }
    }

    db.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use investiga_core::{Subject, SubjectField};

    #[test]
    fn test_format_summary() {
        let summary = InvestigationSummary {
            id: "b1c2".to_string(),
            created_at: Utc
                .with_ymd_and_hms(2024, 5, 1, 12, 30, 0)
                .single()
                .expect("valid time"),
            label: None,
            subject: Subject::default().with(SubjectField::Cpf, "123.456.789-09"),
            item_count: 4,
            group_count: 1,
        };
        assert_eq!(
            format_summary(&summary),
            "b1c2  2024-05-01 12:30  -  CPF: 123.456.789-09  (4 itens, 1 cruzamentos)"
        );
    }
}
