//! `normcheck` command-line adapter.
//!
//! ## Commands
//!
//! - `normcheck evaluate [--catalog P] [--use-cases P] [--answers FILE] [--non-interactive] [--json]`
//! - `normcheck check [--catalog P] --answers FILE [--json]`
//!
//! ## Exit Codes
//!
//! - 0: Success
//! - 1: Any error (missing catalog, malformed catalog, unanswered question)

mod prompt;

pub use prompt::PromptQuestioner;

use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use normcheck_evaluator::catalog::{Catalog, load_catalog, load_use_cases};
use normcheck_evaluator::config::{AppConfig, ConfigLoader};
use normcheck_evaluator::questioner::{PrefilledQuestioner, ScriptedQuestioner};
use normcheck_evaluator::session::{Session, SessionOutcome};
use normcheck_evaluator::{AnswerStore, resolve};

/// Determine which regulatory norms apply to an AI system
#[derive(Debug, Parser)]
#[command(name = "normcheck", version)]
pub struct Cli {
    /// Configuration file (defaults to ./normcheck.toml, then user config dirs)
    #[arg(long = "config", short = 'c', value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a full classification session
    Evaluate(EvaluateArgs),

    /// Resolve applicable norms from a saved answer snapshot without asking
    Check(CheckArgs),
}

/// Arguments for `evaluate`
#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// Norm catalog JSON (overrides catalog.catalog_path)
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Use-case area catalog JSON (overrides catalog.use_cases_path)
    #[arg(long = "use-cases", value_name = "PATH")]
    pub use_cases: Option<PathBuf>,

    /// Answer snapshot used to prefill the session
    #[arg(long = "answers", value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// Fail on any question the snapshot does not answer instead of prompting
    #[arg(long = "non-interactive")]
    pub non_interactive: bool,

    /// Output as JSON instead of text
    #[arg(long = "json", short = 'j')]
    pub json: bool,
}

/// Arguments for `check`
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Norm catalog JSON (overrides catalog.catalog_path)
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Answer snapshot to resolve against
    #[arg(long = "answers", value_name = "FILE")]
    pub answers: PathBuf,

    /// Output as JSON instead of text
    #[arg(long = "json", short = 'j')]
    pub json: bool,
}

impl Cli {
    /// Load configuration from `--config` or the default locations.
    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        let config = match &self.config {
            Some(path) => ConfigLoader::new().with_file(path).load(),
            None => ConfigLoader::load_default(),
        };
        config.context("loading configuration")
    }

    /// Run the selected command.
    ///
    /// Questions are prompted on `prompts` and answered from `input`; results
    /// go to `out`.
    pub fn run<R: BufRead, P: Write>(
        self,
        config: &AppConfig,
        input: R,
        prompts: P,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        match self.command {
            Command::Evaluate(args) => run_evaluate(args, config, input, prompts, out),
            Command::Check(args) => run_check(args, config, out),
        }
    }
}

fn run_evaluate<R: BufRead, P: Write>(
    args: EvaluateArgs,
    config: &AppConfig,
    input: R,
    prompts: P,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let catalog = load_norms(args.catalog.as_deref(), config)?;
    let use_cases_path = match args.use_cases {
        Some(path) => path,
        None => config.catalog.require_use_cases_path()?.to_path_buf(),
    };
    let use_cases = load_use_cases(&use_cases_path)
        .with_context(|| format!("loading use cases from {}", use_cases_path.display()))?;

    let snapshot = match &args.answers {
        Some(path) => read_snapshot(path)?,
        None => AnswerStore::new(),
    };

    let session =
        Session::new(&catalog, &use_cases, &config.session).with_answers(snapshot.clone());
    let outcome = if args.non_interactive {
        session.run(&mut ScriptedQuestioner::new(snapshot.iter()))
    } else {
        let mut questioner =
            PrefilledQuestioner::new(snapshot, PromptQuestioner::new(input, prompts));
        session.run(&mut questioner)
    }
    .context("classification session aborted")?;

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;
    } else {
        write_verdicts(out, &outcome)?;
        write_applicable(out, &catalog, &outcome.applicable)?;
    }
    Ok(())
}

fn run_check(args: CheckArgs, config: &AppConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let catalog = load_norms(args.catalog.as_deref(), config)?;
    let answers = read_snapshot(&args.answers)?;
    let applicable = resolve(&catalog, &answers);

    if args.json {
        let report = serde_json::json!({
            "answers": answers,
            "applicable": applicable,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write_applicable(out, &catalog, &applicable)?;
    }
    Ok(())
}

fn load_norms(flag: Option<&Path>, config: &AppConfig) -> anyhow::Result<Catalog> {
    let path = match flag {
        Some(path) => path,
        None => config.catalog.require_catalog_path()?,
    };
    load_catalog(path).with_context(|| format!("loading catalog from {}", path.display()))
}

fn read_snapshot(path: &Path) -> anyhow::Result<AnswerStore> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading answer snapshot {}", path.display()))?;
    let answers = serde_json::from_str(&content)
        .with_context(|| format!("parsing answer snapshot {}", path.display()))?;
    Ok(answers)
}

fn write_verdicts(out: &mut dyn Write, outcome: &SessionOutcome) -> std::io::Result<()> {
    if let Some(high_risk) = &outcome.high_risk {
        writeln!(out, "High-risk: {high_risk}")?;
        if let Some(use_case) = high_risk.matched_use_case() {
            writeln!(out, "  matched {}: {}", use_case.id, use_case.description)?;
            if let Some(note) = &use_case.special_registration {
                writeln!(out, "  special registration: {note}")?;
            }
        }
    }
    if let Some(systemic_risk) = &outcome.systemic_risk {
        writeln!(out, "Systemic risk: {systemic_risk}")?;
    }
    Ok(())
}

fn write_applicable(
    out: &mut dyn Write,
    catalog: &Catalog,
    applicable: &BTreeSet<String>,
) -> std::io::Result<()> {
    if applicable.is_empty() {
        return writeln!(out, "No applicable norms.");
    }

    writeln!(out, "Applicable norms ({}):", applicable.len())?;
    for id in applicable {
        let name = catalog.norm(id).map(|norm| norm.name()).unwrap_or_default();
        writeln!(out, "  {id}: {name}")?;
    }
    Ok(())
}
