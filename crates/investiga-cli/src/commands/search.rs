//! `investiga search`

use anyhow::{Context, Result};
use clap::Args;
use investiga_core::{AppConfig, Subject, SubjectField};
use investiga_db::{investigations, Database};
use investiga_export::{Dossier, ExportFormat, ExportOptions};
use investiga_search::{SearchOrchestrator, SearchSession};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Subject fields and output options for a search.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// CPF, with or without punctuation
    #[arg(long)]
    pub cpf: Option<String>,

    /// CNPJ, with or without punctuation
    #[arg(long)]
    pub cnpj: Option<String>,

    /// RG as written on the document
    #[arg(long)]
    pub rg: Option<String>,

    /// CEP (postal code)
    #[arg(long)]
    pub cep: Option<String>,

    /// Mobile or landline number with DDD
    #[arg(long)]
    pub celular: Option<String>,

    /// Full name
    #[arg(long)]
    pub nome: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Output format: json, csv or markdown
    #[arg(long, short, default_value = "json")]
    pub format: ExportFormat,

    /// Write the dossier to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Only export items that take part in a cross group
    #[arg(long)]
    pub only_crossed: bool,

    /// Also mine person names from titles and descriptions
    #[arg(long)]
    pub extract_names: bool,

    /// Save the investigation to the history database
    #[arg(long)]
    pub save: bool,

    /// Label stored with a saved investigation
    #[arg(long, requires = "save")]
    pub label: Option<String>,
}

impl SearchArgs {
    /// Subject built from the field flags.
    pub fn subject(&self) -> Subject {
        let fields = [
            (SubjectField::Cpf, &self.cpf),
            (SubjectField::Cnpj, &self.cnpj),
            (SubjectField::Rg, &self.rg),
            (SubjectField::Cep, &self.cep),
            (SubjectField::Celular, &self.celular),
            (SubjectField::Nome, &self.nome),
            (SubjectField::Email, &self.email),
        ];
        fields
            .into_iter()
            .fold(Subject::default(), |subject, (field, value)| match value {
                Some(v) => subject.with(field, v.as_str()),
                None => subject,
            })
    }

    fn apply_to(&self, config: &mut AppConfig) {
        if self.only_crossed {
            config.export.only_crossed = true;
        }
        if self.extract_names {
            config.cross.extract_names_from_text = true;
        }
    }
}

/// Run the search, print or write the dossier, and optionally save it.
pub async fn run(args: SearchArgs) -> Result<()> {
    let subject = args.subject();
    if subject.is_empty() {
        anyhow::bail!("informe ao menos um campo (--cpf, --cnpj, --rg, --cep, --celular, --nome, --email)");
    }

    let mut config = AppConfig::load_with_env().context("failed to load configuration")?;
    args.apply_to(&mut config);

    let orchestrator =
        SearchOrchestrator::from_config(config.clone()).context("failed to set up providers")?;

    let session = Arc::new(SearchSession::new());
    let token = session.begin();
    {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("received Ctrl+C, cancelling search...");
                session.cancel();
            }
        });
    }

    let outcome = match orchestrator.search(&subject, &token).await {
        Ok(outcome) => outcome,
        Err(e) if e.is_cancelled() => {
            info!("search cancelled");
            return Ok(());
        }
        Err(e) => return Err(e).context("search failed"),
    };

    let options = ExportOptions::from_config(&config);
    let dossier = Dossier::new(&outcome.subject, &outcome.results, &outcome.report);
    let rendered = args
        .format
        .render(&dossier, &options)
        .context("failed to render dossier")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Dossier written to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    if args.save {
        let path = config
            .database
            .resolve_path()
            .context("failed to locate history database")?;
        let db = Database::open(&path)
            .await
            .with_context(|| format!("failed to open {}", path.display()))?;
        let id = investigations::save_investigation(
            db.pool(),
            &outcome.subject,
            &outcome.results,
            &outcome.report.groups,
            args.label.as_deref(),
        )
        .await
        .context("failed to save investigation")?;
        eprintln!("Investigação salva: {id}");
    }

    Ok(())
}
