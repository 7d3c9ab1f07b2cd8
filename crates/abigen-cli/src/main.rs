//! Command-line binding generator
//!
//! This binary drives the whole pipeline: discover ABI documents, normalize
//! each one, render it through the template set, and write the generated
//! bindings. Defaults match a conventional project layout; every path is
//! overridable on the command line.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;

use abigen_core::Backend;

mod commands;
mod template;

use commands::GenerateOptions;

/// Backend selection on the command line
#[derive(Clone, Debug, Default, ValueEnum)]
enum BackendOpt {
    /// web3.js conventions
    Web3,
    /// ethers.js conventions
    #[default]
    Ethers,
}

impl From<BackendOpt> for Backend {
    fn from(value: BackendOpt) -> Self {
        match value {
            BackendOpt::Web3 => Backend::Web3,
            BackendOpt::Ethers => Backend::Ethers,
        }
    }
}

#[derive(Parser)]
#[command(name = "abigen")]
#[command(about = "Typed contract binding generator for Ethereum ABIs")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate typed bindings from contract ABI files
    Generate {
        /// Glob pattern for input ABI files
        #[arg(long, default_value = "abis/**/*.json")]
        abis: String,

        /// Main contract template
        #[arg(long, default_value = "templates/contract.tera")]
        template: PathBuf,

        /// Glob pattern for partial templates
        #[arg(long, default_value = "templates/partials/*.tera")]
        partials: String,

        /// Output directory, created if absent
        #[arg(short, long, default_value = "built")]
        output_dir: PathBuf,

        /// Target contract backend
        #[arg(long, value_enum, default_value = "ethers")]
        backend: BackendOpt,

        /// File extension for generated bindings
        #[arg(long, default_value = "ts")]
        ext: String,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let result = match cli.command {
        Command::Generate {
            abis,
            template,
            partials,
            output_dir,
            backend,
            ext,
        } => commands::cmd_generate(&GenerateOptions {
            abis,
            template,
            partials,
            output_dir,
            extension: ext,
            backend: backend.into(),
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
