mod report;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env2flag::clap_ext::EnvParser;
use env2flag::{Mapper, Normalize, Table};
use log::{debug, info};

/// Show which environment variable each flag name reads, and its value.
///
/// The --log-level and --map options can also be set from the environment:
/// LOG_LEVEL=debug works like --log-level debug, MAP=NAME=VAR like --map.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Error)]
    log_level: LogLevel,

    /// Look NAME up as VAR instead of normalizing it (NAME=VAR, repeatable)
    #[arg(id = "map", long = "map", value_name = "NAME=VAR")]
    maps: Vec<String>,

    /// Flag names to resolve
    #[arg(required = true)]
    names: Vec<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse_with_env();

    env_logger::Builder::new()
        .filter_level(cli.log_level.to_filter())
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("CLI arguments: {:#?}", cli);

    let key_mapper: Box<dyn Mapper> = if cli.maps.is_empty() {
        Box::new(Normalize)
    } else {
        let table = Table::from_pairs(cli.maps.as_slice()).context("Invalid --map entry")?;
        info!("Using {} table entries instead of normalization", cli.maps.len());
        Box::new(table)
    };

    for line in report::describe(&cli.names, key_mapper.as_ref()) {
        println!("{}", line);
    }

    Ok(())
}
