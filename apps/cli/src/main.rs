use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use token_manager_core::{
    analyze_rows, build_language, build_merged, detect_duplicates, flatten, parse_document,
    FindingsReport, Language, LanguageTrees, ManagerConfig, ReportWriter, RowSnapshot,
};

/// Token Manager - multilingual design-token translations
#[derive(Parser, Debug)]
#[command(name = "token-manager")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flatten per-language token exports into a row snapshot
    Import {
        /// Azerbaijani token export
        #[arg(long)]
        az: Option<PathBuf>,

        /// English token export
        #[arg(long)]
        en: Option<PathBuf>,

        /// Russian token export
        #[arg(long)]
        ru: Option<PathBuf>,

        /// Snapshot file to write
        #[arg(long, default_value = "tokens.snapshot.json")]
        snapshot: PathBuf,
    },

    /// Build the merged developer file from a snapshot
    ExportMerged {
        #[arg(long, default_value = "tokens.snapshot.json")]
        snapshot: PathBuf,

        /// Output file; defaults to the configured name
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Build a single-language Figma file from a snapshot
    ExportFigma {
        #[arg(long, default_value = "tokens.snapshot.json")]
        snapshot: PathBuf,

        /// Language code (az, en, ru)
        #[arg(long)]
        lang: Language,

        /// Output file; defaults to the configured name
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check key paths for unsafe or reserved last segments
    Lint {
        #[arg(long, default_value = "tokens.snapshot.json")]
        snapshot: PathBuf,
    },

    /// List values shared by more than one key in the same language
    Dupes {
        #[arg(long, default_value = "tokens.snapshot.json")]
        snapshot: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Import { az, en, ru, snapshot } => {
            import(&config, az.as_deref(), en.as_deref(), ru.as_deref(), &snapshot)
        }
        Command::ExportMerged { snapshot, out } => export_merged(&config, &snapshot, out.as_deref()),
        Command::ExportFigma { snapshot, lang, out } => {
            export_figma(&config, &snapshot, lang, out.as_deref())
        }
        Command::Lint { snapshot } => lint(&config, &snapshot),
        Command::Dupes { snapshot } => dupes(&config, &snapshot),
    }
}

fn load_config(path: Option<&Path>) -> Result<ManagerConfig> {
    match path {
        Some(path) => ManagerConfig::from_json_file(path)
            .map_err(|e| anyhow::anyhow!(e))
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(ManagerConfig::default()),
    }
}

fn import(
    config: &ManagerConfig,
    az: Option<&Path>,
    en: Option<&Path>,
    ru: Option<&Path>,
    snapshot_path: &Path,
) -> Result<()> {
    let sources = [(Language::Az, az), (Language::En, en), (Language::Ru, ru)];
    if sources.iter().all(|(_, path)| path.is_none()) {
        bail!("at least one of --az, --en, --ru is required");
    }

    let mut trees = LanguageTrees::default();
    for (language, path) in sources {
        if let Some(path) = path {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading {} export {}", language, path.display()))?;
            let tree = parse_document(&content)
                .with_context(|| format!("parsing {} export {}", language, path.display()))?;
            trees.set(language, tree);
        }
    }

    let output = flatten(&trees);
    info!(
        "flattened {} rows and {} group extensions",
        output.rows.len(),
        output.group_extensions.len()
    );

    let snapshot = RowSnapshot::from_flatten(config.project.clone(), output);
    snapshot
        .to_json_file(snapshot_path)
        .map_err(|e| anyhow::anyhow!(e))?;
    println!("Wrote {}", snapshot_path.display());
    Ok(())
}

fn export_merged(config: &ManagerConfig, snapshot_path: &Path, out: Option<&Path>) -> Result<()> {
    let snapshot = load_snapshot(snapshot_path)?;
    let merged = build_merged(&snapshot.rows);

    let default_name = PathBuf::from(&config.export.merged_file_name);
    let out = out.unwrap_or_else(|| default_name.as_path());
    write_artifact(config, out, &merged)?;
    println!("Wrote {}", out.display());
    Ok(())
}

fn export_figma(
    config: &ManagerConfig,
    snapshot_path: &Path,
    language: Language,
    out: Option<&Path>,
) -> Result<()> {
    let snapshot = load_snapshot(snapshot_path)?;
    let built = build_language(&snapshot.rows, &snapshot.group_extensions, language);

    let default_name = PathBuf::from(config.export.language_file_name(language));
    let out = out.unwrap_or_else(|| default_name.as_path());
    write_artifact(config, out, &built)?;
    println!("Wrote {}", out.display());
    Ok(())
}

fn lint(config: &ManagerConfig, snapshot_path: &Path) -> Result<()> {
    let snapshot = load_snapshot(snapshot_path)?;
    let issues = analyze_rows(&snapshot.rows);

    for issue in &issues {
        println!("{}  ->  {}", issue.original, issue.key_path);
    }
    println!("{} issue(s) in {} row(s)", issues.len(), snapshot.rows.len());

    let failed = config.lint.fail_on_issues && !issues.is_empty();
    write_report(config, &snapshot, issues, Vec::new())?;

    if failed {
        process::exit(1);
    }
    Ok(())
}

fn dupes(config: &ManagerConfig, snapshot_path: &Path) -> Result<()> {
    let snapshot = load_snapshot(snapshot_path)?;
    let groups = detect_duplicates(&snapshot.rows);

    for group in &groups {
        println!(
            "[{}] {:?} used by {}",
            group.language,
            group.value,
            group.key_paths.join(", ")
        );
    }
    println!("{} duplicate group(s) in {} row(s)", groups.len(), snapshot.rows.len());

    write_report(config, &snapshot, Vec::new(), groups)?;
    Ok(())
}

fn load_snapshot(path: &Path) -> Result<RowSnapshot> {
    RowSnapshot::from_json_file(path)
        .map_err(|e| anyhow::anyhow!(e))
        .with_context(|| format!("loading snapshot {}", path.display()))
}

fn write_artifact(config: &ManagerConfig, path: &Path, value: &serde_json::Value) -> Result<()> {
    let content = if config.export.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serializing export artifact")?;
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}

fn write_report(
    config: &ManagerConfig,
    snapshot: &RowSnapshot,
    issues: Vec<token_manager_core::KeyIssue>,
    groups: Vec<token_manager_core::DuplicateGroup>,
) -> Result<()> {
    let Some(report_path) = &config.lint.report_path else {
        return Ok(());
    };
    let report = FindingsReport::new(snapshot.project.clone(), snapshot.rows.len(), issues, groups);
    ReportWriter::new(report_path)
        .append(&report)
        .with_context(|| format!("appending findings report to {}", report_path))
}
