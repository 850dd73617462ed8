use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume::config::Config;
use resume::{
    parse, reconstruct_with_rule, serialize, DateRange, Document, EntryRef, Inclusion,
    InclusionPolicy, MonthYear,
};

#[derive(Parser)]
#[command(name = "resume")]
#[command(about = "Parse, format, and export structured resume Markdown", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a resume and report the first structural error
    Check {
        /// Resume Markdown file
        input: PathBuf,
    },
    /// Print the canonical form of a resume
    Fmt {
        input: PathBuf,

        /// Rewrite the file in place instead of printing
        #[arg(long)]
        write: bool,
    },
    /// List Experience entries with the references used by export policies
    List { input: PathBuf },
    /// Derive an export variant under an inclusion policy and date window
    Export(ExportArgs),
}

#[derive(Args)]
struct ExportArgs {
    input: PathBuf,

    /// JSON policy file, e.g. {"roles": {"0": "omit"}}
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Entry to drop (role:N or project:N); repeatable
    #[arg(long, value_name = "REF")]
    omit: Vec<EntryRef>,

    /// Entry to keep without its responsibilities; repeatable
    #[arg(long, value_name = "REF")]
    not_relevant: Vec<EntryRef>,

    /// Window start, MM/YYYY
    #[arg(long, requires = "to", conflicts_with = "last_months")]
    from: Option<MonthYear>,

    /// Window end, MM/YYYY
    #[arg(long, requires = "from")]
    to: Option<MonthYear>,

    /// Window covering the N most recent months, current month included
    #[arg(long, value_name = "N")]
    last_months: Option<u32>,

    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr so stdout carries only document output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Check { input } => {
            let doc = load_document(&input, &config)?;
            println!(
                "OK: {} ({} projects, {} roles)",
                input.display(),
                doc.projects().len(),
                doc.roles().len()
            );
        }
        Command::Fmt { input, write } => {
            let canonical = serialize(&load_document(&input, &config)?);
            if write {
                fs::write(&input, canonical)
                    .with_context(|| format!("failed to write {}", input.display()))?;
                info!(path = %input.display(), "rewrote resume in canonical form");
            } else {
                print!("{canonical}");
            }
        }
        Command::List { input } => {
            let doc = load_document(&input, &config)?;
            for entry in doc.entries() {
                println!("{entry}\t{}", doc.describe(entry).unwrap_or_default());
            }
        }
        Command::Export(args) => export(args, &config)?,
    }
    Ok(())
}

fn export(args: ExportArgs, config: &Config) -> Result<()> {
    let doc = load_document(&args.input, config)?;

    let base = match &args.policy {
        Some(path) => load_policy(path)?,
        None => InclusionPolicy::default(),
    };
    let policy = apply_overrides(base, &args.omit, &args.not_relevant);
    for (entry, _) in policy.overrides() {
        if doc.describe(entry).is_none() {
            warn!(%entry, "policy names an entry the resume does not have");
        }
    }

    let today = chrono::Utc::now().date_naive();
    let window = resolve_window(args.from, args.to, args.last_months, today)?;

    let derived = reconstruct_with_rule(&doc, &policy, window.as_ref(), config.window_rule);
    let rendered = match args.format {
        Format::Markdown => serialize(&derived),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(&derived)?;
            json.push('\n');
            json
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "export written");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn load_document(path: &Path, config: &Config) -> Result<Document> {
    let text = read_bounded(path, config.max_input_bytes)?;
    parse(&text).with_context(|| format!("{} is not a valid resume", path.display()))
}

/// Reads a file, refusing anything over `max_bytes`.
fn read_bounded(path: &Path, max_bytes: usize) -> Result<String> {
    let size = fs::metadata(path)
        .with_context(|| format!("failed to read {}", path.display()))?
        .len();
    if size > max_bytes as u64 {
        bail!(
            "{} is {size} bytes, over the {max_bytes} byte limit (RESUME_MAX_INPUT_BYTES)",
            path.display()
        );
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_policy(path: &Path) -> Result<InclusionPolicy> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read policy {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid policy file {}", path.display()))
}

/// Command-line flags win over the policy file.
fn apply_overrides(
    policy: InclusionPolicy,
    omit: &[EntryRef],
    not_relevant: &[EntryRef],
) -> InclusionPolicy {
    let policy = not_relevant
        .iter()
        .fold(policy, |policy, entry| policy.with(*entry, Inclusion::NotRelevant));
    omit.iter()
        .fold(policy, |policy, entry| policy.with(*entry, Inclusion::Omit))
}

fn resolve_window(
    from: Option<MonthYear>,
    to: Option<MonthYear>,
    last_months: Option<u32>,
    today: chrono::NaiveDate,
) -> Result<Option<DateRange>> {
    match (from, to, last_months) {
        (Some(from), Some(to), None) => Ok(Some(DateRange::new(from, to)?)),
        (None, None, Some(0)) => bail!("--last-months must be at least 1"),
        (None, None, Some(months)) => Ok(Some(DateRange::trailing_months(months, today))),
        (None, None, None) => Ok(None),
        _ => bail!("use either --from with --to, or --last-months"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn my(text: &str) -> MonthYear {
        text.parse().unwrap()
    }

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_flags_parse_entry_refs() {
        let cli = Cli::try_parse_from([
            "resume", "export", "cv.md", "--omit", "role:1", "--not-relevant", "project:0",
            "--from", "01/2020", "--to", "12/2022", "--format", "json",
        ])
        .unwrap();
        let Command::Export(args) = cli.command else {
            panic!("expected export subcommand");
        };
        assert_eq!(args.omit, vec![EntryRef::Role(1)]);
        assert_eq!(args.not_relevant, vec![EntryRef::Project(0)]);
        assert_eq!(args.from, Some(my("01/2020")));
        assert!(args.format == Format::Json);
    }

    #[test]
    fn test_window_flags_conflict() {
        let result = Cli::try_parse_from([
            "resume", "export", "cv.md", "--from", "01/2020", "--to", "12/2022", "--last-months", "6",
        ]);
        assert!(result.is_err(), "--from/--to and --last-months must conflict");

        let result = Cli::try_parse_from(["resume", "export", "cv.md", "--from", "01/2020"]);
        assert!(result.is_err(), "--from requires --to");
    }

    #[test]
    fn test_load_policy_from_json_file() {
        let file = temp_file(r#"{"roles": {"0": "omit", "2": "not_relevant"}, "projects": {"1": "omit"}}"#);
        let policy = load_policy(file.path()).unwrap();
        assert_eq!(policy.get(EntryRef::Role(0)), Inclusion::Omit);
        assert_eq!(policy.get(EntryRef::Role(1)), Inclusion::Include);
        assert_eq!(policy.get(EntryRef::Role(2)), Inclusion::NotRelevant);
        assert_eq!(policy.get(EntryRef::Project(1)), Inclusion::Omit);
    }

    #[test]
    fn test_load_policy_rejects_unknown_inclusion() {
        let file = temp_file(r#"{"roles": {"0": "hide"}}"#);
        let err = load_policy(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid policy file"), "got: {err}");
    }

    #[test]
    fn test_flags_override_policy_file() {
        let base = InclusionPolicy::new().with(EntryRef::Role(0), Inclusion::Omit);
        let policy = apply_overrides(base, &[EntryRef::Role(1)], &[EntryRef::Role(0)]);
        assert_eq!(policy.get(EntryRef::Role(0)), Inclusion::NotRelevant);
        assert_eq!(policy.get(EntryRef::Role(1)), Inclusion::Omit);
    }

    #[test]
    fn test_read_bounded_enforces_limit() {
        let file = temp_file("# Personal\n");
        assert!(read_bounded(file.path(), 64).is_ok());
        let err = read_bounded(file.path(), 4).unwrap_err();
        assert!(err.to_string().contains("byte limit"), "got: {err}");
    }

    #[test]
    fn test_resolve_window() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        assert_eq!(resolve_window(None, None, None, today).unwrap(), None);

        let window = resolve_window(None, None, Some(12), today).unwrap().unwrap();
        assert_eq!(window.start(), my("04/2023"));
        assert_eq!(window.end(), my("03/2024"));

        let window = resolve_window(Some(my("01/2020")), Some(my("06/2020")), None, today)
            .unwrap()
            .unwrap();
        assert_eq!(window.to_string(), "01/2020 - 06/2020");

        assert!(resolve_window(Some(my("06/2020")), Some(my("01/2020")), None, today).is_err());
        assert!(resolve_window(None, None, Some(0), today).is_err());
    }

    #[test]
    fn test_load_document_reports_path() {
        let file = temp_file("# Hobbies\n");
        let err = load_document(file.path(), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("is not a valid resume"), "got: {err}");
    }
}
