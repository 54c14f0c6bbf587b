use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, LevelFilter};
use std::path::Path;
use std::process;

use smart_bank::cli;
use smart_bank::config::{self, Config};

/// Smart Banking CLI - open, fund and close accounts from a terminal menu
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Sets the configuration file
    #[clap(
        short,
        long,
        value_name = "FILE",
        default_value = "smart-bank.toml",
        env = "SMART_BANK_CONFIG"
    )]
    config: String,

    /// Turn debugging information on
    #[clap(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    /// Print without colours
    #[clap(long)]
    no_color: bool,

    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive banking dashboard (default)
    Run,

    /// Configuration file commands
    Config {
        #[clap(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write the default configuration to the configuration path
    Init {
        /// Overwrite an existing file
        #[clap(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

fn init_logger(verbosity: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    match verbosity {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn init_config(path: &str, force: bool) -> Result<()> {
    if Path::new(path).exists() && !force {
        bail!("{} already exists, pass --force to overwrite it", path);
    }
    config::save_config(path, &Config::default())?;
    println!("Wrote default configuration to {}", path);
    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}

fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();
    init_logger(cli.debug);

    if let Some(Commands::Config { command: ConfigCommands::Init { force } }) = &cli.command {
        if let Err(err) = init_config(&cli.config, *force) {
            error!("Failed to write configuration: {:#}", err);
            process::exit(1);
        }
        return;
    }

    let mut config = match config::load_config(&cli.config) {
        Ok(config) => {
            info!("Configuration loaded from {}", cli.config);
            config
        }
        Err(err) => {
            error!("Failed to load configuration: {:#}", err);
            process::exit(1);
        }
    };

    if cli.no_color {
        config.display.color = false;
    }

    let result = match &cli.command {
        Some(Commands::Config { command: ConfigCommands::Show }) => show_config(&config),
        _ => cli::run_interactive(config),
    };

    if let Err(err) = result {
        error!("{:#}", err);
        process::exit(1);
    }
}
