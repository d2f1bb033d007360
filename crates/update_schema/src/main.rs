use anyhow::Result;
use clap::{value_parser, Arg, Command};
use std::path::PathBuf;

use update_schema::config::{AppConfig, CliArgs, OUTPUT_ENV, SOURCE_ENV};

fn main() -> Result<()> {
    let matches = Command::new("update_schema")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Downloads the prisma schema and annotates fields named `type` for renaming")
        .arg(
            Arg::new("source")
                .long("source")
                .num_args(1)
                .help(format!("Schema URL or local path (overrides {})", SOURCE_ENV)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .num_args(1)
                .value_parser(value_parser!(PathBuf))
                .help(format!("Where to write the annotated schema (overrides {})", OUTPUT_ENV)),
        )
        .arg(
            Arg::new("timeout_secs")
                .long("timeout-secs")
                .num_args(1)
                .value_parser(value_parser!(u64).range(1..))
                .help("Request timeout for remote sources, in seconds"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let args = CliArgs {
        source: matches.get_one::<String>("source").cloned(),
        output: matches.get_one::<PathBuf>("output").cloned(),
        timeout_secs: matches.get_one::<u64>("timeout_secs").copied(),
        verbose: matches.get_flag("verbose"),
    };
    let config = AppConfig::from_env(args);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.default_log_filter()),
    )
    .init();
    log::debug!("{:?}", config);

    let summary = match update_schema::run(&config) {
        Ok(summary) => summary,
        Err(err) => {
            // Reported once, on one line, with the cause chain.
            if log::log_enabled!(log::Level::Error) {
                log::error!("{:#}", err);
            } else {
                eprintln!("Error: {:#}", err);
            }
            std::process::exit(1);
        }
    };
    println!(
        "Annotated {} field(s); wrote {} bytes to {}",
        summary.annotated,
        summary.bytes_written,
        summary.output.display()
    );
    Ok(())
}
