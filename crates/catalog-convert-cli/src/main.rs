//! `catalog-convert` binary: converts one entity document per run

use anyhow::{Context, Result};
use catalog_convert::{convert, Direction, EntityKind};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let direction = Arg::new("direction")
        .long("direction")
        .short('d')
        .required(true)
        .value_parser(value_parser!(Direction))
        .help("forward (1to2) or reverse (2to1)");

    Command::new("catalog-convert")
        .version(catalog_convert::VERSION)
        .about("Convert catalog entities between the IDP 1.0 and IDP 2.0 YAML dialects")
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON on stderr"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("convert")
                .about("Convert one entity document")
                .arg(direction.clone())
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .value_parser(value_parser!(PathBuf))
                        .help("Input file (defaults to stdin)"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .conflicts_with("output-default")
                        .help("Output file (defaults to stdout)"),
                )
                .arg(
                    Arg::new("output-default")
                        .long("output-default")
                        .action(ArgAction::SetTrue)
                        .help("Write to converted_idp2.yaml / converted_idp1.yaml"),
                ),
        )
        .subcommand(
            Command::new("kinds")
                .about("List the entity kinds accepted as input")
                .arg(direction),
        )
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
            Ok(())
        }
        None => io::stdout()
            .write_all(text.as_bytes())
            .context("failed to write stdout"),
    }
}

/// Where the converted document goes; `None` means stdout
fn output_path(args: &ArgMatches, direction: Direction) -> Option<PathBuf> {
    if args.get_flag("output-default") {
        Some(PathBuf::from(direction.output_file_name()))
    } else {
        args.get_one::<PathBuf>("output").cloned()
    }
}

fn exit_code(result: &Result<()>) -> i32 {
    i32::from(result.is_err())
}

fn run_convert(args: &ArgMatches) -> Result<()> {
    let direction = *args
        .get_one::<Direction>("direction")
        .context("missing --direction")?;
    let raw = read_input(args.get_one::<PathBuf>("input"))?;
    let output = output_path(args, direction);

    tracing::info!("Converting {} → {}", direction.source(), direction.target());
    let converted = convert(&raw, direction)?;
    write_output(output.as_deref(), &converted)
}

fn run_kinds(args: &ArgMatches) -> Result<()> {
    let direction = *args
        .get_one::<Direction>("direction")
        .context("missing --direction")?;
    for literal in EntityKind::supported_literals(direction.source()) {
        println!("{literal}");
    }
    Ok(())
}

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    let result = match matches.subcommand() {
        Some(("convert", args)) => run_convert(args),
        Some(("kinds", args)) => run_kinds(args),
        _ => Ok(()),
    };

    let code = exit_code(&result);
    if let Err(e) = result {
        tracing::error!("{e:#}");
        eprintln!("{e:#}");
        std::process::exit(code);
    }
}
