//! Marp CLI invocation
//!
//! The renderer is an external program. This module only builds its command
//! line, stages the preprocessed Markdown in a temporary file and reports how
//! the process ended.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Program used to launch the Marp CLI
const NPX: &str = "npx";

/// npm package providing the Marp CLI
const MARP_PACKAGE: &str = "@marp-team/marp-cli";

/// Errors that can occur while rendering slides
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The renderer process could not be started
    #[error("Failed to launch {program} (is Node.js installed?)")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The renderer ran but reported failure
    #[error("Marp CLI failed with {status}")]
    Failed {
        /// Exit status of the renderer
        status: ExitStatus,
    },

    /// A temporary file could not be written
    #[error("I/O error at {path}", path = .path.display())]
    Io {
        /// Path involved in the failed operation
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// Output format, picked from the output file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// PDF document
    Pdf,
    /// PowerPoint presentation
    Pptx,
    /// Standalone HTML
    Html,
}

impl OutputFormat {
    /// Detect the format of `path`
    ///
    /// `.pptx` and `.html` select their formats; everything else, including a
    /// missing extension, renders PDF.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("pptx") => OutputFormat::Pptx,
            Some("html") => OutputFormat::Html,
            _ => OutputFormat::Pdf,
        }
    }

    /// Marp CLI flag selecting this format (HTML is the default)
    pub fn flag(self) -> Option<&'static str> {
        match self {
            OutputFormat::Pdf => Some("--pdf"),
            OutputFormat::Pptx => Some("--pptx"),
            OutputFormat::Html => None,
        }
    }
}

/// One Marp CLI invocation
#[derive(Debug, Clone)]
pub struct MarpCommand {
    /// Preprocessed Markdown file
    pub input: PathBuf,
    /// Theme stylesheet
    pub theme: PathBuf,
    /// Rendered output file
    pub output: PathBuf,
    /// Allow raw HTML in slides
    pub html: bool,
}

impl MarpCommand {
    /// Create a command with HTML enabled
    pub fn new(input: impl Into<PathBuf>, theme: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            theme: theme.into(),
            output: output.into(),
            html: true,
        }
    }

    /// Output format implied by the output path
    pub fn format(&self) -> OutputFormat {
        OutputFormat::from_path(&self.output)
    }

    /// Arguments passed to `npx`
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--yes".into(),
            MARP_PACKAGE.into(),
            "--theme".into(),
            self.theme.clone().into_os_string(),
        ];
        if self.html {
            args.push("--html".into());
        }
        if let Some(flag) = self.format().flag() {
            args.push(flag.into());
        }
        args.extend([
            self.input.clone().into_os_string(),
            "--allow-local-files".into(),
            "-o".into(),
            self.output.clone().into_os_string(),
        ]);
        args
    }

    /// Full command line for display
    pub fn display(&self) -> String {
        std::iter::once(NPX.to_string())
            .chain(self.args().iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn command(&self) -> Command {
        #[cfg(target_os = "windows")]
        let mut command = {
            let mut command = Command::new("cmd");
            command.args(["/C", NPX]);
            command
        };
        #[cfg(not(target_os = "windows"))]
        let mut command = Command::new(NPX);

        command.args(self.args());
        if let Some(dir) = self.input.parent().filter(|d| !d.as_os_str().is_empty()) {
            command.current_dir(dir);
        }
        command
    }

    /// Run the renderer with inherited stdio and wait for it
    pub fn run(&self) -> Result<(), RunnerError> {
        log::info!("Running: {}", self.display());

        let status = self
            .command()
            .status()
            .map_err(|source| RunnerError::Spawn {
                program: NPX.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(RunnerError::Failed { status });
        }

        Ok(())
    }
}

/// Render `markdown` with the Marp CLI
///
/// The Markdown is written to a temporary file in `work_dir` so relative
/// image paths in the deck keep working. The file is removed however the
/// render ends.
///
/// # Parameters
/// * `markdown` - Preprocessed Marp Markdown
/// * `theme_css` - Theme stylesheet path
/// * `output` - Output file; its extension selects the format
/// * `work_dir` - Directory for the temporary Markdown file
pub fn build_slides(
    markdown: &str,
    theme_css: &Path,
    output: &Path,
    work_dir: &Path,
) -> Result<(), RunnerError> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| RunnerError::Io { path, source }
    };

    let mut input = tempfile::Builder::new()
        .prefix(".slidedeck-")
        .suffix(".md")
        .tempfile_in(work_dir)
        .map_err(io_error(work_dir))?;
    input
        .write_all(markdown.as_bytes())
        .and_then(|()| input.flush())
        .map_err(io_error(input.path()))?;

    // The renderer runs inside work_dir, so relative paths must be made absolute first
    let output = std::path::absolute(output).map_err(io_error(output))?;
    let theme = std::path::absolute(theme_css).map_err(io_error(theme_css))?;

    MarpCommand::new(input.path(), theme, &output).run()?;
    log::info!("Wrote {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(command: &MarpCommand) -> Vec<String> {
        command
            .args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("deck.pdf")), OutputFormat::Pdf);
        assert_eq!(OutputFormat::from_path(Path::new("deck.PPTX")), OutputFormat::Pptx);
        assert_eq!(OutputFormat::from_path(Path::new("deck.html")), OutputFormat::Html);
        assert_eq!(OutputFormat::from_path(Path::new("deck.txt")), OutputFormat::Pdf);
        assert_eq!(OutputFormat::from_path(Path::new("deck")), OutputFormat::Pdf);
    }

    #[test]
    fn test_pdf_command_args() {
        let command = MarpCommand::new("/work/in.md", "/work/theme.css", "/out/deck.pdf");

        assert_eq!(
            args(&command),
            vec![
                "--yes",
                "@marp-team/marp-cli",
                "--theme",
                "/work/theme.css",
                "--html",
                "--pdf",
                "/work/in.md",
                "--allow-local-files",
                "-o",
                "/out/deck.pdf",
            ]
        );
    }

    #[test]
    fn test_html_command_has_no_format_flag() {
        let mut command = MarpCommand::new("in.md", "theme.css", "deck.html");
        command.html = false;

        let args = args(&command);
        assert!(!args.iter().any(|a| a == "--pdf" || a == "--pptx" || a == "--html"));
        assert_eq!(args.last().map(String::as_str), Some("deck.html"));
    }

    #[test]
    fn test_pptx_display() {
        let command = MarpCommand::new("in.md", "theme.css", "deck.pptx");
        assert_eq!(
            command.display(),
            "npx --yes @marp-team/marp-cli --theme theme.css --html --pptx in.md --allow-local-files -o deck.pptx"
        );
    }
}
