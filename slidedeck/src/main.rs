//! slidedeck - Corporate slide decks from plain Markdown
//!
//! A CLI tool that structures a Markdown document into a Marp deck and
//! renders it to PDF, PPTX or HTML with a generated corporate theme.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ConfigArgs, StructureArgs};
use slidedeck::{preprocess, runner, templates, theme, PreprocessResult, StyleConfig};
use std::path::{Path, PathBuf};

/// Main entry point for the slidedeck CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            output,
            config,
            structure,
        } => {
            init_logging(config.verbose);
            handle_build_command(input, output, &config, structure)?;
        }

        Commands::Preprocess {
            input,
            output,
            config,
            structure,
        } => {
            init_logging(config.verbose);
            handle_preprocess_command(input, output, &config, structure)?;
        }

        Commands::Theme { output, config } => {
            init_logging(config.verbose);
            handle_theme_command(output, &config)?;
        }

        Commands::Init { path, force } => {
            init_logging(false);
            handle_init_command(path, force)?;
        }
    }

    Ok(())
}

/// Initialize logging; `RUST_LOG` still applies when not verbose
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

/// Load the style configuration and apply the palette override
fn load_config(args: &ConfigArgs) -> Result<StyleConfig> {
    let config = StyleConfig::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    match &args.palette {
        Some(name) => config
            .with_active_palette(name)
            .with_context(|| format!("Cannot switch to palette '{}'", name)),
        None => Ok(config),
    }
}

/// Read and preprocess the input document
fn preprocess_input(
    input: &Path,
    config: &StyleConfig,
    structure: StructureArgs,
) -> Result<PreprocessResult> {
    let markdown = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file {}", input.display()))?;

    preprocess(&markdown, config, structure.options())
        .with_context(|| format!("Failed to preprocess {}", input.display()))
}

/// Write `content` to `output`, or to stdout when no path is given
fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("✓ Successfully wrote: {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Handle the build command
fn handle_build_command(
    input: PathBuf,
    output: Option<PathBuf>,
    args: &ConfigArgs,
    structure: StructureArgs,
) -> Result<()> {
    if !input.is_file() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    let output = output.unwrap_or_else(|| input.with_extension("pdf"));

    println!("Building slides...");
    println!("Config: {}", args.config.display());
    println!("Input: {}", input.display());
    println!("Output: {}", output.display());

    let config = load_config(args)?;

    let work_dir = match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let theme_file = theme::write_theme_css(&config, &work_dir)
        .with_context(|| "Failed to generate theme CSS")?;

    let result = preprocess_input(&input, &config, structure)?;
    print_structure_summary(&result);

    runner::build_slides(&result.markdown, theme_file.path(), &output, &work_dir)
        .with_context(|| format!("Failed to render {}", output.display()))?;

    println!("\n✓ Build completed successfully!");
    Ok(())
}

/// Handle the preprocess command
fn handle_preprocess_command(
    input: PathBuf,
    output: Option<PathBuf>,
    args: &ConfigArgs,
    structure: StructureArgs,
) -> Result<()> {
    let config = load_config(args)?;
    let result = preprocess_input(&input, &config, structure)?;

    if args.verbose {
        print_structure_summary(&result);
    }

    write_output(output.as_deref(), &result.markdown)
}

/// Handle the theme command
fn handle_theme_command(output: Option<PathBuf>, args: &ConfigArgs) -> Result<()> {
    let config = load_config(args)?;
    let css = theme::generate_theme_css(&config).with_context(|| "Failed to generate theme CSS")?;

    write_output(output.as_deref(), &css)
}

/// Handle the init command
fn handle_init_command(path: Option<PathBuf>, force: bool) -> Result<()> {
    let target_path = path.unwrap_or_else(|| PathBuf::from("."));
    println!("Target path: {}", target_path.display());

    // Create the target directory if it doesn't exist
    if !target_path.exists() {
        std::fs::create_dir_all(&target_path)
            .with_context(|| format!("Failed to create directory {}", target_path.display()))?;
    }

    let mut files_created = 0;
    for file in templates::starter_files() {
        let full_path = target_path.join(file.name);
        if full_path.exists() && !force {
            println!("  skipped {} (already exists, use --force to overwrite)", file.name);
            continue;
        }

        std::fs::write(&full_path, file.content)
            .with_context(|| format!("Failed to write file {}", full_path.display()))?;
        println!("  created {}", file.name);
        files_created += 1;
    }

    println!("\n✓ Successfully created {} files", files_created);
    println!("\nNext steps:");
    println!("  1. Edit slidedeck.toml to match your corporate design");
    println!("  2. Write your deck in Markdown (see sample-deck.md)");
    println!("  3. Run 'slidedeck build sample-deck.md' to render it");

    Ok(())
}

/// Print the detected document structure
fn print_structure_summary(result: &PreprocessResult) {
    eprintln!("\nDiscovered {} sections:", result.sections.len());
    for section in &result.sections {
        eprintln!("  {:02} - {}", section.index, section.title);
    }
    if let Some(cover) = &result.cover {
        eprintln!("Cover: \"{}\"", cover.title);
    }
}
