//! Command-line interface for opn
//! This binary parses OPN protocol definition files and prints the AST or
//! diagnostics in a chosen format.
//!
//! Usage:
//!   opn parse `<path>` [--format `<format>`]  - Parse a file and print the AST
//!   opn check `<path>`                      - Print diagnostics only
//!   opn tokens `<path>`                     - Dump the token stream
//!   opn grammar                           - Print the production table

use clap::{Arg, Command};
use opn::opn::ast::snapshot::snapshot_unit;
use opn::opn::diagnostics::Diagnostic;
use opn::opn::formats::{to_source, to_tag_string, to_treeviz_string};
use opn::opn::grammar::grammar;
use opn::opn::lexer::tokenize;
use opn::opn::pipeline::parse_source;
use std::fs;
use std::process;

fn main() {
    let matches = Command::new("opn")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A parser for the OPN protocol definition notation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parse a file and print the AST")
                .arg(
                    Arg::new("path")
                        .help("Path to the .opn file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: tag, treeviz, json, yaml, source")
                        .default_value("tag"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Parse a file and report diagnostics only")
                .arg(
                    Arg::new("path")
                        .help("Path to the .opn file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Dump the token stream of a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the .opn file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("grammar").about("Print the production table"))
        .get_matches();

    match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let path = parse_matches.get_one::<String>("path").unwrap();
            let format = parse_matches.get_one::<String>("format").unwrap();
            handle_parse_command(path, format);
        }
        Some(("check", check_matches)) => {
            let path = check_matches.get_one::<String>("path").unwrap();
            handle_check_command(path);
        }
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches.get_one::<String>("path").unwrap();
            handle_tokens_command(path);
        }
        Some(("grammar", _)) => {
            print!("{}", grammar().describe());
        }
        _ => unreachable!(),
    }
}

fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error reading {}: {}", path, error);
            process::exit(1);
        }
    }
}

fn report_diagnostics(path: &str, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!(
            "{}:{}: {}: {}",
            path,
            diagnostic.location.start,
            diagnostic.category,
            diagnostic.message
        );
    }
}

/// Handle the parse command
fn handle_parse_command(path: &str, format: &str) {
    let source = read_source(path);
    let outcome = parse_source(&source);
    report_diagnostics(path, &outcome.diagnostics);

    let rendered = match format {
        "tag" => to_tag_string(&outcome.unit),
        "treeviz" => to_treeviz_string(&outcome.unit),
        "source" => to_source(&outcome.unit),
        "json" => match serde_json::to_string_pretty(&snapshot_unit(&outcome.unit)) {
            Ok(json) => json,
            Err(error) => {
                eprintln!("Error serializing AST: {}", error);
                process::exit(1);
            }
        },
        "yaml" => match serde_yaml::to_string(&snapshot_unit(&outcome.unit)) {
            Ok(yaml) => yaml,
            Err(error) => {
                eprintln!("Error serializing AST: {}", error);
                process::exit(1);
            }
        },
        other => {
            eprintln!("Unknown format: {}", other);
            process::exit(1);
        }
    };

    println!("{}", rendered);

    if outcome.has_errors() {
        process::exit(1);
    }
}

/// Handle the check command
fn handle_check_command(path: &str) {
    let source = read_source(path);
    let outcome = parse_source(&source);
    report_diagnostics(path, &outcome.diagnostics);

    if outcome.has_errors() {
        process::exit(1);
    }
    println!(
        "{}: ok ({} declarations)",
        path,
        outcome.unit.declarations.len()
    );
}

/// Handle the tokens command
fn handle_tokens_command(path: &str) {
    let source = read_source(path);
    let (tokens, diagnostics) = tokenize(&source);
    report_diagnostics(path, &diagnostics);

    for (token, span) in &tokens {
        println!("{:?} @ {}..{}", token, span.start, span.end);
    }
}
