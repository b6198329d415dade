//! Compliance CLI - runs the evaluation core over an extracted document.
//!
//! Text extraction happens upstream; this binary consumes the extractor's
//! JSON output (per-page text plus extraction metadata), evaluates it against
//! a rule catalogue and writes a JSON report artifact.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use compliance_engine::{ComplianceEngine, RuleCatalog, SectionIndex};
use serde::Serialize;
use shared_types::{ComplianceReport, ExtractionStats, FinancialDocument};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "compliance-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Evaluate an extracted document against the rule catalogue.
    Check {
        /// Extracted document JSON (per-page text, extraction metadata).
        document: PathBuf,
        /// Rule catalogue JSON; uses the built-in IndAS catalogue if omitted.
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Write the full JSON report artifact here.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the standards and checks in the rule catalogue.
    Rules {
        /// Rule catalogue JSON; uses the built-in IndAS catalogue if omitted.
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

/// On-disk report artifact. The evaluation result itself is deterministic;
/// run metadata (timestamp, extraction stats) lives only in this envelope.
#[derive(Serialize)]
struct ReportArtifact<'a> {
    document: &'a str,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    extraction: Option<&'a ExtractionStats>,
    sections: &'a SectionIndex,
    report: &'a ComplianceReport,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check {
            document,
            rules,
            output,
        } => check(&document, rules.as_deref(), output.as_deref()),
        Commands::Rules { rules } => list_rules(rules.as_deref()),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<RuleCatalog> {
    match path {
        Some(path) => RuleCatalog::load(path)
            .with_context(|| format!("loading rule catalogue from {}", path.display())),
        None => Ok(RuleCatalog::builtin()),
    }
}

fn check(document: &Path, rules: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let raw = fs::read_to_string(document)
        .with_context(|| format!("reading extracted document {}", document.display()))?;
    let doc: FinancialDocument =
        serde_json::from_str(&raw).context("parsing extracted document JSON")?;

    let catalog = load_catalog(rules)?;
    info!(
        standards = catalog.standards().len(),
        checks = catalog.total_checks(),
        pages = doc.pages.len(),
        "starting compliance evaluation"
    );

    let sections = SectionIndex::build(&doc.pages);
    let engine = ComplianceEngine::new(catalog);
    let report = engine.evaluate_with_sections(&doc, &sections);

    info!(
        score = report.score,
        rating = report.rating.label(),
        compliant = report.compliant,
        non_compliant = report.non_compliant,
        missing = report.missing,
        sections_found = sections.found(),
        "evaluation complete"
    );

    println!(
        "{}: score {:.1}% ({}), {}/{} checks compliant",
        doc.filename,
        report.score,
        report.rating.label(),
        report.compliant,
        report.total_checks
    );
    for (kind, span) in sections.iter() {
        println!(
            "  section {}: pages {}-{}",
            kind.name(),
            span.start_page,
            span.end_page
        );
    }
    for recommendation in &report.recommendations {
        println!("  - {recommendation}");
    }

    if let Some(path) = output {
        let artifact = ReportArtifact {
            document: &doc.filename,
            generated_at: chrono::Utc::now().to_rfc3339(),
            extraction: doc.extraction.as_ref(),
            sections: &sections,
            report: &report,
        };
        let json = serde_json::to_string_pretty(&artifact)?;
        fs::write(path, json)
            .with_context(|| format!("writing report to {}", path.display()))?;
        info!(path = %path.display(), "report artifact written");
    }

    Ok(())
}

fn list_rules(rules: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(rules)?;

    for standard in catalog.standards() {
        println!(
            "{}: {} [{} / {}] - {} checks",
            standard.id,
            standard.name,
            standard.category,
            standard.priority.label(),
            standard.checks.len()
        );
        for check in &standard.checks {
            println!(
                "   {} {} ({} keywords, weight {}{})",
                check.id,
                check.requirement,
                check.keywords.len(),
                check.weight,
                if check.mandatory { ", mandatory" } else { "" }
            );
        }
    }
    println!(
        "{} standards, {} checks total",
        catalog.standards().len(),
        catalog.total_checks()
    );

    Ok(())
}
