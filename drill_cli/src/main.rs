//! # Drillsheet CLI
//!
//! Generates arithmetic worksheets from the terminal, as aligned text or
//! JSON. The last settings used are cached in `drillsheet.json` (or the
//! `--settings` path), so repeated runs only need the flags that change.

mod render;
mod telemetry;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Arg, ArgAction, ArgMatches, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, warn};

use drill_core::errors::{DrillError, DrillResult};
use drill_core::file_io::{load_settings_or_default, save_settings, SettingsLock};
use drill_core::layout::{check_a4_overflow, max_problems_per_a4, RenderMode};
use drill_core::pattern::{CalculationPattern, PatternFamily};
use drill_core::problem::ProblemType;
use drill_core::settings::WorksheetSettings;
use drill_core::worksheet::{build_worksheet_batch, WorksheetData};

const DEFAULT_SETTINGS_PATH: &str = "drillsheet.json";

/// Most pages a single `generate` run prints
const MAX_PAGES: i64 = 50;

/// Exit status for usage errors, matching clap's own
const USAGE_EXIT: u8 = 2;

fn settings_args() -> Vec<Arg> {
    vec![
        Arg::new("settings")
            .long("settings")
            .value_name("PATH")
            .default_value(DEFAULT_SETTINGS_PATH)
            .help("Settings cache to read and update."),
        Arg::new("grade")
            .short('g')
            .long("grade")
            .value_name("1-6")
            .help("School grade."),
        Arg::new("type")
            .short('t')
            .long("type")
            .value_name("TYPE")
            .help("Problem type: basic, hissan, fraction, decimal, mixed, word, word-en."),
        Arg::new("operation")
            .short('o')
            .long("operation")
            .value_name("OP")
            .help("Operation: addition, subtraction, multiplication, division (or + - x /)."),
        Arg::new("pattern")
            .short('p')
            .long("pattern")
            .value_name("PATTERN")
            .help("Calculation pattern; 'none' clears it. See 'drill patterns'."),
        Arg::new("count")
            .short('n')
            .long("count")
            .value_name("N")
            .value_parser(clap::value_parser!(usize))
            .help("Problems per page."),
        Arg::new("columns")
            .short('c')
            .long("columns")
            .value_name("1-3")
            .help("Printed columns."),
    ]
}

fn cli() -> Command {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    Command::new("drill")
        .version(VERSION)
        .propagate_version(true)
        .about("Printable arithmetic worksheets for grades 1 to 6.")
        .disable_help_subcommand(true)
        .subcommand(
            Command::new("generate")
                .about("Generate worksheet pages")
                .args(settings_args())
                .arg(
                    Arg::new("title")
                        .long("title")
                        .value_name("TEXT")
                        .help("Heading printed at the top of each page."),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .value_name("TEXT")
                        .help("Student name printed on each page."),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("YYYY-MM-DD")
                        .help("Date printed on each page."),
                )
                .arg(
                    Arg::new("answers")
                        .long("answers")
                        .action(ArgAction::SetTrue)
                        .help("Append the answer key to each page."),
                )
                .arg(
                    Arg::new("pages")
                        .long("pages")
                        .value_name("N")
                        .default_value("1")
                        .value_parser(clap::value_parser!(u16).range(1..=MAX_PAGES))
                        .help("Number of pages to generate (at most 50)."),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_name("N")
                        .value_parser(clap::value_parser!(u64))
                        .help("Seed the random source to reproduce a worksheet."),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit pages as JSON instead of text."),
                )
                .arg(
                    Arg::new("no-save")
                        .long("no-save")
                        .action(ArgAction::SetTrue)
                        .help("Do not update the settings cache."),
                ),
        )
        .subcommand(
            Command::new("fit")
                .about("Check whether the settings fit on one A4 page")
                .args(settings_args())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit the result as JSON."),
                ),
        )
        .subcommand(Command::new("patterns").about("List calculation patterns"))
}

/// Cached settings with command-line overrides applied.
fn resolve_settings(matches: &ArgMatches) -> DrillResult<(WorksheetSettings, bool)> {
    let path = settings_path(matches);
    let mut settings = load_settings_or_default(&path)?;
    let mut changed = false;

    if let Some(grade) = matches.get_one::<String>("grade") {
        settings.grade = grade.parse()?;
        changed = true;
    }
    if let Some(problem_type) = matches.get_one::<String>("type") {
        settings.problem_type = problem_type.parse()?;
        changed = true;
    }
    if let Some(operation) = matches.get_one::<String>("operation") {
        settings.operation = operation.parse()?;
        changed = true;
    }
    if let Some(pattern) = matches.get_one::<String>("pattern") {
        settings.calculation_pattern = match pattern.as_str() {
            "none" | "" => None,
            name => Some(name.parse()?),
        };
        changed = true;
    }
    if let Some(count) = matches.get_one::<usize>("count") {
        settings.problem_count = *count;
        changed = true;
    }
    if let Some(columns) = matches.get_one::<String>("columns") {
        settings.layout_columns = columns.parse()?;
        changed = true;
    }

    // Page details only exist on `generate`
    if matches.try_contains_id("answers").unwrap_or(false) {
        if let Some(title) = matches.get_one::<String>("title") {
            settings.title = Some(title.clone());
            changed = true;
        }
        if let Some(name) = matches.get_one::<String>("name") {
            settings.student_name = Some(name.clone());
            changed = true;
        }
        if let Some(date) = matches.get_one::<String>("date") {
            let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                DrillError::invalid_input("date", date.clone(), e.to_string())
            })?;
            settings.date = Some(parsed);
            changed = true;
        }
        if matches.get_flag("answers") {
            settings.show_answers = true;
            changed = true;
        }
    }

    settings.validate()?;
    Ok((settings, changed))
}

fn settings_path(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<String>("settings")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH))
}

/// Save under the cache lock; a busy lock only costs the cache update.
fn persist(settings: &WorksheetSettings, path: &Path) -> DrillResult<()> {
    let lock = match SettingsLock::acquire(path) {
        Ok(lock) => lock,
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "Settings cache busy; not saving");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    save_settings(settings, path)?;
    drop(lock);
    Ok(())
}

fn emit_pages(pages: &[WorksheetData], json: bool) -> DrillResult<()> {
    if json {
        let text = serde_json::to_string_pretty(pages).map_err(DrillError::serialization)?;
        println!("{}", text);
        return Ok(());
    }
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            println!("\u{000C}");
        }
        print!("{}", render::render_page(page, i + 1, pages.len()));
    }
    Ok(())
}

fn run_generate(matches: &ArgMatches) -> DrillResult<()> {
    let (settings, changed) = resolve_settings(matches)?;
    let pages = matches.get_one::<u16>("pages").map_or(1, |p| usize::from(*p));

    if let Some(overflow) = check_a4_overflow(&settings, RenderMode::Preview) {
        eprintln!("warning: {}", overflow.message);
    }

    let worksheets = match matches.get_one::<u64>("seed") {
        Some(seed) => {
            debug!(seed, "Using seeded random source");
            build_worksheet_batch(&mut StdRng::seed_from_u64(*seed), &settings, pages, None)
        }
        None => build_worksheet_batch(&mut rand::thread_rng(), &settings, pages, None),
    };
    emit_pages(&worksheets, matches.get_flag("json"))?;

    if changed && !matches.get_flag("no-save") {
        persist(&settings, &settings_path(matches))?;
    }
    Ok(())
}

#[derive(Serialize)]
struct FitReport {
    problem_type: ProblemType,
    grade: u8,
    columns: usize,
    requested: usize,
    max: usize,
    fits: bool,
}

fn run_fit(matches: &ArgMatches) -> DrillResult<bool> {
    let (settings, _) = resolve_settings(matches)?;
    let max = max_problems_per_a4(settings.problem_type, settings.grade, settings.layout_columns);
    let report = FitReport {
        problem_type: settings.problem_type,
        grade: settings.grade.value(),
        columns: settings.layout_columns.count(),
        requested: settings.problem_count,
        max,
        fits: settings.problem_count <= max,
    };
    if matches.get_flag("json") {
        let text = serde_json::to_string_pretty(&report).map_err(DrillError::serialization)?;
        println!("{}", text);
    } else if report.fits {
        println!(
            "{} {} problems fit on one A4 page ({} max in {} column(s)).",
            report.requested, report.problem_type, report.max, report.columns
        );
    } else if let Some(overflow) = check_a4_overflow(&settings, RenderMode::Preview) {
        println!("{}", overflow.message);
    }
    Ok(report.fits)
}

fn family_label(pattern: CalculationPattern) -> String {
    match pattern.family() {
        PatternFamily::Arithmetic => "basic, hissan".to_string(),
        PatternFamily::Missing => "basic (missing number)".to_string(),
        PatternFamily::Fraction => "fraction".to_string(),
        PatternFamily::Word(category) => {
            let name = serde_json::to_value(category)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            format!("word, word-en ({})", name)
        }
    }
}

fn run_patterns() {
    for pattern in CalculationPattern::ALL {
        println!("{:<24} {}", pattern.name(), family_label(pattern));
    }
}

fn main() -> ExitCode {
    telemetry::init_tracing();
    let matches = cli().get_matches();
    ExitCode::from(dispatch(&matches))
}

/// Run the chosen subcommand and return the process exit status.
fn dispatch(matches: &ArgMatches) -> u8 {
    let result = match matches.subcommand() {
        Some(("generate", submatches)) => run_generate(submatches).map(|_| true),
        Some(("fit", submatches)) => run_fit(submatches),
        Some(("patterns", _)) => {
            run_patterns();
            Ok(true)
        }
        _ => {
            eprintln!("usage: drill [COMMAND] ...");
            eprintln!("Try '--help' for more information.");
            return USAGE_EXIT;
        }
    };

    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("error [{}]: {}", e.error_code(), e);
            USAGE_EXIT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn test_missing_subcommand_is_a_usage_error() {
        let matches = cli().try_get_matches_from(["drill"]).unwrap();
        assert_eq!(dispatch(&matches), USAGE_EXIT);
    }

    #[test]
    fn test_page_count_is_bounded() {
        let pages = |n: &str| cli().try_get_matches_from(["drill", "generate", "--pages", n]);
        assert!(pages("0").is_err());
        assert!(pages("51").is_err());
        let matches = pages("50").unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<u16>("pages"), Some(&50));
    }

    #[test]
    fn test_overrides_apply_without_cache() {
        let path = std::env::temp_dir().join(format!("drill_cli_missing_{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let matches = cli()
            .try_get_matches_from([
                "drill",
                "generate",
                "--settings",
                path.to_str().unwrap(),
                "--grade",
                "4",
                "--type",
                "word-en",
                "--pattern",
                "speed-time-en",
                "--count",
                "6",
                "--date",
                "2025-04-01",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let (settings, changed) = resolve_settings(sub).unwrap();
        assert!(changed);
        assert_eq!(settings.grade.value(), 4);
        assert_eq!(settings.problem_type, ProblemType::WordEn);
        assert_eq!(settings.calculation_pattern, Some(CalculationPattern::SpeedTime));
        assert_eq!(settings.problem_count, 6);
        assert_eq!(settings.date, NaiveDate::from_ymd_opt(2025, 4, 1));
    }

    #[test]
    fn test_bad_grade_is_invalid_input() {
        let matches = cli()
            .try_get_matches_from(["drill", "fit", "--settings", "/nonexistent/x.json", "--grade", "9"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let err = resolve_settings(sub).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
