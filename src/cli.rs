// CLI module - command-line argument parsing and handlers
//
// With no subcommand the viewer runs. `config` manages the config file:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Print the config file location

use crate::config::{Config, VERSION};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;

/// postboard - browse an employee's posts and their comments
#[derive(Parser)]
#[command(name = "postboard")]
#[command(version = VERSION)]
#[command(about = "Browse employee posts and comments in the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub fn handle_cli() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path()?;
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset()?;
            } else {
                println!("Usage: postboard config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

fn handle_config_path() -> anyhow::Result<()> {
    let path = Config::config_path().context("could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!("# demo_mode = {}, enable_tui = {}", config.demo_mode, config.enable_tui);
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() -> anyhow::Result<()> {
    let path = Config::config_path().context("could not determine config path")?;

    if path.exists() {
        eprint!("Config file exists at {}. Overwrite? [y/N] ", path.display());
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    Config::default().write_to(&path)?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}
