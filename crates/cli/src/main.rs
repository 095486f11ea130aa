//! rest-client-generator CLI
//!
//! Command-line interface for generating typed Rust REST clients from
//! OpenAPI-style API descriptions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use rest_client_generator_common::ClientModel;
use rest_client_generator_generator::{postprocess, ClientGenerator};
use rest_client_generator_parser::DocumentParser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rest-client-generator")]
#[command(version, about = "Generate typed Rust REST clients from API descriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an API description and display the extracted client model
    #[command(after_help = "EXAMPLES:\n  \
        # Inspect the model built from an API description\n  \
        rest-client-generator parse --spec api.json\n\n  \
        # Show every endpoint and diagnostic\n  \
        rest-client-generator parse --spec api.json --verbose")]
    Parse {
        /// Path to the API description file
        #[arg(short, long)]
        spec: PathBuf,
    },

    /// Generate a typed client crate from an API description
    #[command(after_help = "EXAMPLES:\n  \
        # Generate a client crate\n  \
        rest-client-generator generate \\\n    \
        --spec api.json \\\n    \
        --name widgets-api-client \\\n    \
        --output ./widgets-api-client\n\n  \
        # Skip the formatter and lint-fix passes\n  \
        rest-client-generator generate --spec api.json --skip-postprocess")]
    Generate {
        /// Path to the API description file
        #[arg(short, long)]
        spec: PathBuf,

        /// Name of the generated crate
        #[arg(long, default_value = "rest-api-client")]
        name: String,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Skip the formatter / lint-autofix passes on the generated crate
        #[arg(long)]
        skip_postprocess: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Parse { spec } => {
            parse_command(spec.as_path(), cli.verbose)?;
        }
        Commands::Generate {
            spec,
            name,
            output,
            skip_postprocess,
        } => {
            generate_command(
                spec.as_path(),
                &name,
                output.as_path(),
                skip_postprocess,
                cli.verbose,
            )?;
        }
    }

    Ok(())
}

fn parse_command(spec_path: &Path, verbose: bool) -> Result<()> {
    println!("{} Parsing spec file: {}", "→".cyan(), spec_path.display());

    let parser = DocumentParser::from_file(spec_path).context("Failed to load API description")?;
    let model = parser.build();

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "Client Model:".bold());
    println!("  Endpoints: {}", model.endpoints.len());
    println!("  Methods: {}", format_methods(&model));
    println!("  Union types: {}", model.unions.len());
    println!("  Diagnostics: {}", model.diagnostics.len());

    if verbose {
        println!("\n{}", "Endpoints:".bold());
        for endpoint in &model.endpoints {
            println!(
                "  • {} {} {}",
                endpoint.http_method.as_lowercase().yellow(),
                endpoint.path_template,
                endpoint.identifier.cyan()
            );
            println!("    Path variables: {}", endpoint.path_variables.len());
            println!("    Response fields: {}", endpoint.response_fields.len());
        }
    }

    print_diagnostics(&model);

    Ok(())
}

fn generate_command(
    spec_path: &Path,
    crate_name: &str,
    output: &Path,
    skip_postprocess: bool,
    verbose: bool,
) -> Result<()> {
    println!(
        "{} Generating client from: {}",
        "→".cyan(),
        spec_path.display()
    );

    if verbose {
        println!("  Crate name: {}", crate_name);
        println!("  Output: {}", output.display());
    }

    println!("{} Parsing spec...", "→".cyan());
    let parser = DocumentParser::from_file(spec_path).context("Failed to load API description")?;
    let model = parser.build();

    println!(
        "{} Built {} endpoints, {} union types",
        "✓".green(),
        model.endpoints.len(),
        model.unions.len()
    );
    print_diagnostics(&model);

    println!("{} Rendering client crate...", "→".cyan());
    let generator =
        ClientGenerator::new(model, crate_name).context("Failed to initialize generator")?;
    generator
        .generate_to_directory(output)
        .context("Failed to generate client crate")?;

    if skip_postprocess {
        println!("{} Skipping post-processing", "→".cyan());
    } else {
        println!("{} Running formatter and lint fixes...", "→".cyan());
        postprocess::run(output).context("Post-processing failed")?;
    }

    println!(
        "\n{} Client crate written to {}",
        "✓ Generation successful!".green().bold(),
        output.display()
    );

    Ok(())
}

fn format_methods(model: &ClientModel) -> String {
    model
        .methods
        .iter()
        .map(|m| m.variant_name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_diagnostics(model: &ClientModel) {
    if model.diagnostics.is_empty() {
        return;
    }

    println!("\n{}", "Diagnostics:".bold());
    for diagnostic in &model.diagnostics {
        println!("  {} {}", "!".yellow(), diagnostic);
    }
}
