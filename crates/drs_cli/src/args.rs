//! Deterministic, offline CLI argument parsing & validation.
//! - No networked paths (reject http/https schemes)
//! - `--vc-threshold` (epsilon, as `num/den`) switches on variable-consistency
//!   induction; omitted means classical DRSA certain-rule induction.

use clap::Parser;
use std::{
    fs,
    path::{Path, PathBuf},
};

use drs_algo::Ratio;

#[derive(Debug, Parser)]
#[command(name = "drs", about = "DRSA / VC-DomLEM rule induction")]
pub struct Args {
    /// Attribute-list JSON file (spec §6).
    #[arg(long)]
    pub attributes: PathBuf,

    /// Input rows: CSV or JSON array of objects. Format is inferred from the
    /// file extension unless `--format` is given.
    #[arg(long)]
    pub rows: PathBuf,

    /// Force the row format instead of inferring it from `--rows`'s extension.
    #[arg(long, value_parser = ["csv", "json"])]
    pub format: Option<String>,

    /// CSV delimiter (single ASCII byte). Ignored for JSON rows.
    #[arg(long, default_value = ",")]
    pub delimiter: String,

    /// CSV rows have no header line. Ignored for JSON rows.
    #[arg(long)]
    pub no_header: bool,

    /// Marker used for missing values in CSV cells.
    #[arg(long, default_value = "?")]
    pub missing_marker: String,

    /// Output directory for rendered rule sets.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Rendering formats to emit. Repeatable.
    #[arg(long, value_parser = ["json", "ruleml"], num_args = 0..=2)]
    pub render: Vec<String>,

    /// Variable-consistency epsilon threshold as `num/den` (e.g. `1/5`).
    /// Omit for classical DRSA certain-rule induction.
    #[arg(long)]
    pub vc_threshold: Option<String>,

    /// Only ingest and validate the table; skip rule induction entirely.
    #[arg(long)]
    pub validate_only: bool,

    /// Increase log verbosity (`-v`, `-vv`). Overridden by `RUST_LOG` if set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
    BadThreshold(String),
    UnknownFormat(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            NonLocalPath(p) => write!(f, "path must be local (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
            BadThreshold(s) => write!(f, "invalid --vc-threshold `{s}`, expected `num/den`"),
            UnknownFormat(p) => write!(f, "cannot infer row format from `{p}`; pass --format"),
        }
    }
}
impl std::error::Error for CliError {}

pub fn parse_and_validate() -> Result<Args, CliError> {
    let mut args = Args::parse();

    if args.render.is_empty() {
        args.render.push("json".to_string());
    }

    ensure_local_exists(&args.attributes, "--attributes")?;
    ensure_local_exists(&args.rows, "--rows")?;

    if args.format.is_none() && resolve_format(&args).is_err() {
        return Err(CliError::UnknownFormat(args.rows.display().to_string()));
    }

    if let Some(t) = &args.vc_threshold {
        parse_ratio(t)?;
    }

    Ok(args)
}

/// The row format to use: explicit `--format`, else inferred from `--rows`'s
/// extension (`.csv` / `.json`).
pub fn resolve_format(args: &Args) -> Result<&'static str, CliError> {
    if let Some(f) = &args.format {
        return Ok(if f == "csv" { "csv" } else { "json" });
    }
    match args.rows.extension().and_then(|e| e.to_str()) {
        Some("csv") => Ok("csv"),
        Some("json") => Ok("json"),
        _ => Err(CliError::UnknownFormat(args.rows.display().to_string())),
    }
}

pub fn parse_ratio(s: &str) -> Result<Ratio, CliError> {
    let (num, den) = s.split_once('/').ok_or_else(|| CliError::BadThreshold(s.to_string()))?;
    let numerator: u64 = num.parse().map_err(|_| CliError::BadThreshold(s.to_string()))?;
    let denominator: u64 = den.parse().map_err(|_| CliError::BadThreshold(s.to_string()))?;
    if denominator == 0 {
        return Err(CliError::BadThreshold(s.to_string()));
    }
    Ok(Ratio::new(numerator, denominator))
}

fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    let s = p.to_string_lossy().to_string();
    if has_scheme(&s) {
        return Err(CliError::NonLocalPath(format!("{label} {s}")));
    }
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {s}")))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {s}")));
    }
    Ok(())
}

fn has_scheme(s: &str) -> bool {
    s.contains("://") || s.starts_with("http:") || s.starts_with("https:")
}
