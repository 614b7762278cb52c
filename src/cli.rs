//! Subcommand dispatch for the praktika binary.

use std::path::{Path, PathBuf};

use crate::assign::{check_caseloads, plan_assignments, report_caseloads, staff_summaries};
use crate::config::load_config;
use crate::data::export::{default_output_name, summary_path, write_assignments, write_summary};
use crate::data::loader::{
    check_columns, load_staff, load_students, STAFF_COLUMNS, STUDENT_COLUMNS,
};
use crate::geo::providers::{NominatimGeocoder, OrsRouter};
use crate::geo::travel::WallClockPacer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Plan,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("plan") => Some(Command::Plan),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Plan) => handle_plan(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: praktika <plan|validate>");
            2
        }
    }
}

fn handle_plan(args: &[String]) -> i32 {
    let (Some(students_path), Some(staff_path)) = (args.get(2), args.get(3)) else {
        eprintln!(
            "usage: praktika plan <students.xlsx> <staff.xlsx> \
             [--config <config.json>] [--out <file.csv>]"
        );
        return 2;
    };
    let config_path = flag_value(args, "--config").unwrap_or("config.json");
    let out_override = flag_value(args, "--out");

    // Configuration problems are the one fatal class; nothing runs before
    // the config is complete and sane.
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return 1;
        }
    };

    let students = match load_students(Path::new(students_path)) {
        Ok(students) => students,
        Err(err) => {
            eprintln!("failed to load students: {err}");
            return 1;
        }
    };
    let staff = match load_staff(Path::new(staff_path)) {
        Ok(staff) => staff,
        Err(err) => {
            eprintln!("failed to load staff: {err}");
            return 1;
        }
    };
    println!("loaded {} students, {} staff", students.len(), staff.len());

    let geocoder = NominatimGeocoder::new();
    let router = OrsRouter::new(config.api_key.as_str());
    let outcome = plan_assignments(&students, &staff, &config, geocoder, router, WallClockPacer);

    for record in &outcome.records {
        println!(
            "  {} -> {} (score {:.1})",
            record.student, record.staff, record.score
        );
    }

    println!("final caseloads:");
    let diagnostics = check_caseloads(&staff, &outcome.roster);
    report_caseloads(&diagnostics);

    let out_path: PathBuf = match out_override {
        Some(path) => PathBuf::from(path),
        None => {
            let mut classes: Vec<String> =
                students.iter().map(|student| student.class.clone()).collect();
            classes.sort();
            classes.dedup();
            PathBuf::from(default_output_name(&classes))
        }
    };

    if let Err(err) = write_assignments(&out_path, &outcome.records) {
        eprintln!("failed to write assignments: {err}");
        return 1;
    }
    let summary = summary_path(&out_path);
    if let Err(err) = write_summary(&summary, &staff_summaries(&staff, &outcome.roster)) {
        eprintln!("failed to write summary: {err}");
        return 1;
    }

    println!(
        "wrote {} assignment(s) to {} (summary: {})",
        outcome.records.len(),
        out_path.display(),
        summary.display()
    );
    0
}

fn handle_validate(args: &[String]) -> i32 {
    let (Some(students_path), Some(staff_path)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: praktika validate <students.xlsx> <staff.xlsx>");
        return 2;
    };

    let checks = [
        ("students", students_path.as_str(), STUDENT_COLUMNS),
        ("staff", staff_path.as_str(), STAFF_COLUMNS),
    ];

    let mut failures = 0;
    for (label, path, required) in checks {
        match check_columns(Path::new(path), required) {
            Ok(missing) if missing.is_empty() => println!("{label}: ok ({path})"),
            Ok(missing) => {
                eprintln!("{label}: missing columns in {path}: {}", missing.join(", "));
                failures += 1;
            }
            Err(err) => {
                eprintln!("{label}: {err}");
                failures += 1;
            }
        }
    }

    if failures == 0 {
        0
    } else {
        1
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::{flag_value, parse_command, Command};

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command(&args(&["praktika", "plan"])), Some(Command::Plan));
        assert_eq!(
            parse_command(&args(&["praktika", "validate"])),
            Some(Command::Validate)
        );
        assert_eq!(parse_command(&args(&["praktika", "optimize"])), None);
        assert_eq!(parse_command(&args(&["praktika"])), None);
    }

    #[test]
    fn flag_value_returns_following_argument() {
        let argv = args(&["praktika", "plan", "s.xlsx", "l.xlsx", "--out", "result.csv"]);
        assert_eq!(flag_value(&argv, "--out"), Some("result.csv"));
        assert_eq!(flag_value(&argv, "--config"), None);
    }

    #[test]
    fn flag_without_value_yields_none() {
        let argv = args(&["praktika", "plan", "s.xlsx", "l.xlsx", "--out"]);
        assert_eq!(flag_value(&argv, "--out"), None);
    }
}
