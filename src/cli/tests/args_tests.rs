use super::args::{CliArgs, Command, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

fn check_args(argv: &[&str]) -> super::args::CheckArgs {
    let args = CliArgs::try_parse_from(argv).expect("arguments should parse");
    match args.command {
        Command::Check(check) => check,
    }
}

#[test]
fn test_check_defaults() {
    let check = check_args(&["gti", "check", "program.json"]);
    assert_eq!(check.file, PathBuf::from("program.json"));
    assert_eq!(check.format, OutputFormat::Text);
    assert!(check.externs.is_none());
    assert!(check.config.is_none());
    assert!(!check.dump_scopes);
    assert!(check.max_worklist_iterations.is_none());
}

#[test]
fn test_check_all_flags() {
    let check = check_args(&[
        "gti",
        "check",
        "program.json",
        "--externs",
        "externs.json",
        "-c",
        "gti.json",
        "--format",
        "JSON",
        "--dump-scopes",
        "--max-worklist-iterations",
        "64",
        "--no-color",
    ]);
    assert_eq!(check.externs, Some(PathBuf::from("externs.json")));
    assert_eq!(check.config, Some(PathBuf::from("gti.json")));
    assert_eq!(check.format, OutputFormat::Json);
    assert!(check.dump_scopes);
    assert_eq!(check.max_worklist_iterations, Some(64));
    assert!(check.no_color);
}

#[test]
fn test_check_requires_a_file() {
    assert!(CliArgs::try_parse_from(["gti", "check"]).is_err());
    assert!(CliArgs::try_parse_from(["gti", "check", "a.json", "--format", "xml"]).is_err());
}
