// crates/drs_cli/src/main.rs
//
// drs — CLI entrypoint for the DRSA / VC-DomLEM rule induction engine.
// Ingests an attribute list and a row set, induces a rule set, and renders
// it to RuleML and/or JSON. Strictly offline & deterministic.

mod args;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use args::{parse_and_validate, resolve_format, Args, CliError};
use drs_algo::AlgoError;
use drs_core::{CoreError, InformationTable, ObjectIdGenerator};
use drs_io::{CsvIngestOptions, IoError};
use drs_report::ReportError;

fn main() -> ExitCode {
    let args = match parse_and_validate() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("drs: error: {e}");
            return ExitCode::from(2);
        }
    };

    install_tracing(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("drs: error: {e}");
            e.exit_code()
        }
    }
}

fn install_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Every failure mode this CLI can hit, carrying its exit-code class (spec
/// §6: 0 success, 2 invalid input, 1 other failure).
#[derive(Debug)]
enum AppError {
    Cli(CliError),
    Io(IoError),
    Core(CoreError),
    InvalidAlgoInput(AlgoError),
    AlgoInternal(AlgoError),
    Report(ReportError),
    Write(std::io::Error),
}

impl AppError {
    fn exit_code(&self) -> ExitCode {
        match self {
            AppError::Cli(_) | AppError::Io(_) | AppError::Core(_) | AppError::InvalidAlgoInput(_) => ExitCode::from(2),
            AppError::AlgoInternal(_) | AppError::Report(_) | AppError::Write(_) => ExitCode::from(1),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Cli(e) => write!(f, "{e}"),
            AppError::Io(e) => write!(f, "{e}"),
            AppError::Core(e) => write!(f, "{e}"),
            AppError::InvalidAlgoInput(e) | AppError::AlgoInternal(e) => write!(f, "{e}"),
            AppError::Report(e) => write!(f, "{e}"),
            AppError::Write(e) => write!(f, "{e}"),
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, AppError> {
    fs::create_dir_all(&args.out).map_err(AppError::Write)?;

    let attributes_json = fs::read_to_string(&args.attributes).map_err(AppError::Write)?;
    let attributes = drs_io::parse_attributes(&attributes_json).map_err(AppError::Io)?;

    let format = resolve_format(args).map_err(AppError::Cli)?;
    let rows = match format {
        "csv" => {
            let delimiter = args.delimiter.as_bytes().first().copied().unwrap_or(b',');
            let options = CsvIngestOptions {
                delimiter,
                has_header: !args.no_header,
                missing_value_marker: args.missing_marker.clone(),
            };
            let file = fs::File::open(&args.rows).map_err(AppError::Write)?;
            drs_io::parse_csv_rows(&attributes, file, &options).map_err(AppError::Io)?
        }
        _ => {
            let json = fs::read_to_string(&args.rows).map_err(AppError::Write)?;
            drs_io::parse_json_rows(&attributes, &json).map_err(AppError::Io)?
        }
    };

    let id_gen = ObjectIdGenerator::new();
    let table = InformationTable::from_rows(attributes.clone(), rows, &id_gen).map_err(AppError::Core)?;

    if !args.quiet {
        println!("drs: ingested {} objects, {} attributes", table.num_objects(), table.num_attributes());
    }

    if args.validate_only {
        return Ok(ExitCode::from(0));
    }

    let (rule_set, coverage) = induce(args, &table)?;

    if !args.quiet {
        println!("drs: induced {} rules", rule_set.len());
    }

    for fmt in &args.render {
        match fmt.as_str() {
            "json" => {
                let s = drs_report::render_json(&rule_set, &attributes, coverage.as_deref()).map_err(AppError::Report)?;
                write_output(&args.out, "rules.json", s.as_bytes())?;
            }
            "ruleml" => {
                let s = drs_report::render_ruleml(&rule_set, &attributes).map_err(AppError::Report)?;
                write_output(&args.out, "rules.xml", s.as_bytes())?;
            }
            other => eprintln!("drs: warning: unknown --render format: {other}"),
        }
    }

    Ok(ExitCode::from(0))
}

fn induce(args: &Args, table: &InformationTable) -> Result<(drs_algo::RuleSet, Option<Vec<drs_algo::RuleCoverageInfo>>), AppError> {
    match &args.vc_threshold {
        Some(t) => {
            let threshold = args::parse_ratio(t).map_err(AppError::Cli)?;
            let rule_set = drs_algo::induce_rules_vc(table, threshold).map_err(classify_algo_error)?;
            Ok((rule_set, None))
        }
        None => {
            let result = drs_algo::induce_rules_with_characteristics(table).map_err(classify_algo_error)?;
            Ok((result.rules, Some(result.coverage)))
        }
    }
}

fn classify_algo_error(e: AlgoError) -> AppError {
    match e {
        AlgoError::NoOrdinalDecisionAttribute
        | AlgoError::EmptyConsistencyMeasures
        | AlgoError::MeasureThresholdCountMismatch { .. } => AppError::InvalidAlgoInput(e),
        AlgoError::Core(core) => AppError::Core(core),
        _ => AppError::AlgoInternal(e),
    }
}

fn write_output(out_dir: &Path, file_name: &str, bytes: &[u8]) -> Result<(), AppError> {
    let path = out_dir.join(file_name);
    fs::write(&path, bytes).map_err(AppError::Write)
}
