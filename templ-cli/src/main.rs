//! templcss CLI
//!
//! Processes a CSS, CSS module, or SCSS file and prints the resulting
//! stylesheet followed by the generated Rust constants.

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize as _;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use templ_codegen::plugin::{Pipeline, PluginInput};
use templ_codegen::transpile::LazyTranspiler;

#[derive(Parser)]
#[command(name = "templcss", about = "Generate scoped CSS and Rust constants from stylesheets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate Rust code from a CSS, CSS module, or SCSS file.
    Generate {
        /// File to process.
        file: PathBuf,
        /// Module name for the generated code.
        #[arg(long, default_value = "styles")]
        module: String,
        /// Print the class-name mapping as JSON instead of generated code.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Command) -> Result<()> {
    match command {
        Command::Generate { file, module, json } => {
            let css = fs::read_to_string(file)
                .with_context(|| format!("could not read file: {}", file.display()))?;
            let pipeline = Pipeline::new(LazyTranspiler::sass_cli());
            let output = pipeline
                .process(&PluginInput {
                    file_name: file.display().to_string(),
                    module_name: module.clone(),
                    css,
                })
                .with_context(|| format!("could not process file: {}", file.display()))?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&output.classes)?);
                return Ok(());
            }
            println!("{}", output.css);
            println!("{}", output.code);
            Ok(())
        }
    }
}
