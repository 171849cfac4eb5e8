use std::fs;
use std::path::Path;
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::debug;

use bibtex_lint::error::{Error, Result};
use bibtex_lint::span::LineIndex;
use bibtex_lint::{Config, Diagnostic, parse, tokenize, validate};

fn main() -> ExitCode {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("bibtex-lint")
        .version(VERSION)
        .propagate_version(true)
        .about("Check .bib files for structural and catalog problems.")
        .disable_help_subcommand(true)
        .subcommand(
            Command::new("check")
                .about("Validate the given bibliography")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("FILE")
                        .help(
                            "A JSON file with the checks to enable, \
                             such as {\"checkUnknownFields\": false}.",
                        ),
                )
                .arg(
                    Arg::new("disable")
                        .long("disable")
                        .value_name("CHECK")
                        .action(ArgAction::Append)
                        .value_parser(Config::CHECKS)
                        .help("Disable a check. May be given more than once."),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the diagnostics as a JSON array."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The .bib file to validate."),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the tokens of the given bibliography")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The .bib file to tokenize."),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("check", submatches)) => check(submatches),
        Some(("tokens", submatches)) => tokens(submatches),
        _ => {
            println!("usage: bibtex-lint [COMMAND] ...");
            println!("Try '--help' for more information.");
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("bibtex-lint: {}", err);
            ExitCode::from(2)
        }
    }
}

fn read(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::io(path, source))
}

fn check(submatches: &ArgMatches) -> Result<ExitCode> {
    let mut config = match submatches.get_one::<String>("config") {
        Some(path) => Config::from_json(&read(path)?)?,
        None => Config::default(),
    };
    if let Some(checks) = submatches.get_many::<String>("disable") {
        for check in checks {
            config.set(check, false)?;
        }
    }

    let filename = submatches
        .get_one::<String>("filename")
        .map(String::as_str)
        .unwrap_or_default();
    let input = read(filename)?;
    let doc = parse(&input);
    let diagnostics = validate(&doc, &config);
    debug!(?config, filename, "checked");

    if submatches.get_flag("json") {
        let json = serde_json::to_string_pretty(&diagnostics).map_err(Error::Output)?;
        println!("{}", json);
    } else {
        print_diagnostics(Path::new(filename), &input, &diagnostics);
    }

    if diagnostics.iter().any(Diagnostic::is_error) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_diagnostics(path: &Path, input: &str, diagnostics: &[Diagnostic]) {
    let index = LineIndex::new(input);
    for diagnostic in diagnostics {
        let (line, column) = index.line_col(diagnostic.span.from);
        println!("{}:{}:{}: {}", path.display(), line, column, diagnostic);
    }
}

fn tokens(submatches: &ArgMatches) -> Result<ExitCode> {
    let filename = submatches
        .get_one::<String>("filename")
        .map(String::as_str)
        .unwrap_or_default();
    let input = read(filename)?;
    for token in tokenize(&input) {
        println!("{} {} {:?}", token.span, token.kind, token.text(&input));
    }
    Ok(ExitCode::SUCCESS)
}
