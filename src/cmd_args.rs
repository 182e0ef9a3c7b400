use crate::document::Mode;
use crate::editor::ViewMode;
use crate::protocol::ExportFormat;
use clap::{Args, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Markdown/LaTeX editor with live preview", long_about = None)]
struct ClapArgs {
    /// Profile name. Settings are read from this section of the profile
    /// file; a missing section falls back to defaults.
    #[clap(
        short = 'p',
        long,
        global = true,
        default_value = "default",
        help = "profile name"
    )]
    profile: String,

    #[clap(short = 'v', long, global = true, help = "verbose logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the editor server
    Serve {
        #[clap(long, help = "address to bind")]
        host: Option<String>,
        #[clap(long, help = "port to bind")]
        port: Option<u16>,
    },

    /// Render a document to HTML on stdout
    Render(DocumentArgs),

    /// Edit a file against the server: live preview, save and autosave
    Edit {
        #[command(flatten)]
        document: DocumentArgs,
        #[clap(long, value_name = "FILE", help = "write each preview to this file")]
        preview_out: Option<PathBuf>,
        #[clap(long, value_enum, default_value_t = ViewMode::Split, help = "panels to show")]
        view: ViewMode,
    },

    /// Export a document through the server
    Export {
        #[command(flatten)]
        document: DocumentArgs,
        #[clap(short = 'f', long, value_enum)]
        format: ExportFormat,
        #[clap(short = 'o', long, default_value = ".", help = "directory to write into")]
        out_dir: PathBuf,
    },

    /// Ask the writing assistant
    Ask {
        #[clap(required = true, num_args = 1..)]
        question: Vec<String>,
        #[clap(short = 'm', long, default_value = "markdown")]
        mode: Mode,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct DocumentArgs {
    /// Document file
    pub file: PathBuf,

    /// Document mode; guessed from the file extension when omitted
    #[clap(short = 'm', long)]
    pub mode: Option<Mode>,
}

impl DocumentArgs {
    pub fn mode(&self) -> Mode {
        self.mode.unwrap_or_else(|| Mode::from_path(&self.file))
    }
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    verbose: bool,
    command: Command,
}

impl CommandLineArgs {
    fn from_clap(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            verbose: args.verbose,
            command: args.command,
        }
    }

    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::try_parse_from(itr).map(Self::from_clap)
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args_profile_and_verbose() {
        let args = CommandLineArgs::parse_from(["texmark", "--profile", "test", "-v", "serve"]);
        assert_eq!(args.profile(), "test");
        assert!(args.verbose());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CommandLineArgs::parse_from(["texmark", "serve", "-p", "dev"]);
        assert_eq!(args.profile(), "dev");
    }

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["texmark", "serve"]);
        assert_eq!(args.profile(), "default");
        assert!(!args.verbose());
        assert_eq!(
            args.command(),
            &Command::Serve {
                host: None,
                port: None
            }
        );
    }

    #[test]
    fn test_serve_bind_options() {
        let args =
            CommandLineArgs::parse_from(["texmark", "serve", "--host", "0.0.0.0", "--port", "8080"]);
        assert_eq!(
            args.command(),
            &Command::Serve {
                host: Some("0.0.0.0".to_string()),
                port: Some(8080)
            }
        );
    }

    #[test]
    fn test_render_mode_from_extension() {
        let args = CommandLineArgs::parse_from(["texmark", "render", "paper.tex"]);
        match args.command() {
            Command::Render(document) => assert_eq!(document.mode(), Mode::Latex),
            other => panic!("Expected Render, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_mode_overrides_extension() {
        let args = CommandLineArgs::parse_from(["texmark", "render", "notes.tex", "-m", "markdown"]);
        match args.command() {
            Command::Render(document) => assert_eq!(document.mode(), Mode::Markdown),
            other => panic!("Expected Render, got {other:?}"),
        }
    }

    #[test]
    fn test_export_requires_format() {
        assert!(CommandLineArgs::try_parse_from(["texmark", "export", "a.md"]).is_err());

        let args =
            CommandLineArgs::parse_from(["texmark", "export", "a.md", "--format", "pdf", "-o", "out"]);
        match args.command() {
            Command::Export {
                format, out_dir, ..
            } => {
                assert_eq!(*format, ExportFormat::Pdf);
                assert_eq!(out_dir, &PathBuf::from("out"));
            }
            other => panic!("Expected Export, got {other:?}"),
        }
    }

    #[test]
    fn test_edit_options() {
        let args = CommandLineArgs::parse_from([
            "texmark",
            "edit",
            "a.md",
            "--preview-out",
            "a.html",
            "--view",
            "preview",
        ]);
        match args.command() {
            Command::Edit {
                preview_out, view, ..
            } => {
                assert_eq!(preview_out.as_deref(), Some(std::path::Path::new("a.html")));
                assert_eq!(*view, ViewMode::Preview);
            }
            other => panic!("Expected Edit, got {other:?}"),
        }
    }

    #[test]
    fn test_ask_joins_words() {
        let args = CommandLineArgs::parse_from(["texmark", "ask", "how", "to", "bold?", "-m", "latex"]);
        match args.command() {
            Command::Ask { question, mode } => {
                assert_eq!(question.join(" "), "how to bold?");
                assert_eq!(*mode, Mode::Latex);
            }
            other => panic!("Expected Ask, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(CommandLineArgs::try_parse_from(["texmark", "render", "a.md", "-m", "rst"]).is_err());
    }
}
