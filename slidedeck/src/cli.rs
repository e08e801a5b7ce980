//! Command-line interface definitions for slidedeck

use clap::{Args, Parser, Subcommand};
use slidedeck::PreprocessOptions;
use std::path::PathBuf;

/// Default configuration file name
pub const DEFAULT_CONFIG: &str = "slidedeck.toml";

/// CLI structure for the slidedeck application
#[derive(Parser)]
#[command(name = "slidedeck")]
#[command(version)]
#[command(about = "Corporate slide decks from plain Markdown with Marp", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that read a style configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Style configuration file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Use this palette instead of `colors.active`
    #[arg(long, value_name = "NAME")]
    pub palette: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Switches that turn off automatic structuring
#[derive(Args, Debug, Clone, Copy)]
pub struct StructureArgs {
    /// Do not insert a cover slide
    #[arg(long)]
    pub no_auto_cover: bool,

    /// Do not append a closing slide
    #[arg(long)]
    pub no_auto_end: bool,

    /// Do not detect sections
    #[arg(long)]
    pub no_auto_section: bool,
}

impl StructureArgs {
    /// Overrides for the preprocessor; unset switches keep the configured value
    pub fn options(self) -> PreprocessOptions {
        let disabled = |flag: bool| flag.then_some(false);
        PreprocessOptions {
            auto_section: disabled(self.no_auto_section),
            auto_cover: disabled(self.no_auto_cover),
            auto_end: disabled(self.no_auto_end),
        }
    }
}

/// Available subcommands for slidedeck
#[derive(Subcommand)]
pub enum Commands {
    /// Build a PDF, PPTX or HTML deck from Markdown
    Build {
        /// Input Markdown file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (defaults to the input with a .pdf extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,

        #[command(flatten)]
        structure: StructureArgs,
    },

    /// Write the preprocessed Marp Markdown without rendering
    Preprocess {
        /// Input Markdown file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,

        #[command(flatten)]
        structure: StructureArgs,
    },

    /// Write the generated theme stylesheet
    Theme {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Create a starter configuration and sample deck
    Init {
        /// Directory to initialize (defaults to current directory)
        path: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}
