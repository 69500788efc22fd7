use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Engine Template - request a starter game engine archive
#[derive(Parser)]
#[command(name = "engine-template")]
#[command(about = "Fill in a short form and download a game engine template archive")]
#[command(version)]
pub struct Cli {
    /// Base URL of the template service
    #[arg(long, global = true, default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Directory the downloaded archive is written to
    #[arg(long, global = true, default_value = ".")]
    pub output_dir: PathBuf,

    /// Log file used while the form is on screen
    #[arg(long, global = true, default_value = "engine-template.log")]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive form (default)
    Form {
        /// JSON request file used to prefill the form
        #[arg(short, long)]
        prefill: Option<PathBuf>,

        /// Write the form's request record to this file on exit
        #[arg(long)]
        save_request: Option<PathBuf>,
    },
    /// Generate a template without the form
    Generate {
        /// JSON request file; flags below override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Engine name
        #[arg(long)]
        engine_name: Option<String>,

        /// Engine version
        #[arg(long)]
        engine_version: Option<String>,

        /// Author name
        #[arg(long)]
        author: Option<String>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,

        /// Leave example content out of the archive
        #[arg(long)]
        no_examples: bool,

        /// Target framework (unity, unreal, custom)
        #[arg(short, long)]
        framework: Option<String>,
    },
    /// Validate a request file
    Validate {
        /// Path to the JSON request file
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_args() {
        // No subcommand opens the form
        let cli = Cli::try_parse_from(["engine-template"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_cli_form_with_prefill() {
        let cli =
            Cli::try_parse_from(["engine-template", "form", "--prefill", "req.json"]).unwrap();
        match cli.command {
            Some(Commands::Form { prefill, save_request }) => {
                assert_eq!(prefill.unwrap(), PathBuf::from("req.json"));
                assert!(save_request.is_none());
            }
            _ => panic!("Expected Form command"),
        }
    }

    #[test]
    fn test_cli_generate_flags() {
        let cli = Cli::try_parse_from([
            "engine-template",
            "--output-dir",
            "/tmp/out",
            "generate",
            "--engine-name",
            "Forge",
            "--engine-version",
            "0.1",
            "--author",
            "Ada",
            "--no-examples",
            "--framework",
            "unreal",
        ])
        .unwrap();
        assert_eq!(cli.output_dir, PathBuf::from("/tmp/out"));
        match cli.command {
            Some(Commands::Generate {
                engine_name,
                engine_version,
                no_examples,
                framework,
                ..
            }) => {
                assert_eq!(engine_name.as_deref(), Some("Forge"));
                assert_eq!(engine_version.as_deref(), Some("0.1"));
                assert!(no_examples);
                assert_eq!(framework.as_deref(), Some("unreal"));
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_validate_command() {
        let cli =
            Cli::try_parse_from(["engine-template", "validate", "/path/to/req.json"]).unwrap();
        match cli.command {
            Some(Commands::Validate { config }) => {
                assert_eq!(config, PathBuf::from("/path/to/req.json"));
            }
            _ => panic!("Expected Validate command"),
        }
    }
}
