//! CLI module - Command-line interface definition and entry point
//!
//! Uses clap v4 with derive macros for argument parsing. With no arguments
//! the tool converts every `*.md` file under `client/src/data/courses`.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::debug;

use crate::batch::{self, Reporter, SilentReporter, WriteMode};
use crate::config::Config;
use crate::error::{NarrateError, Result};
use crate::narrative::{Converter, ListForm};

pub mod diff;
pub mod output;

pub use output::OutputFormat;

/// Narrate - Rewrite heading-led markdown lists into connected prose
#[derive(Parser, Debug)]
#[command(name = "narrate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Documents root to scan (default: client/src/data/courses)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Document extension to convert, repeatable (default: md)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Follow symbolic links while scanning
    #[arg(long)]
    pub follow_links: bool,

    /// Only rewrite lists of the given form, repeatable
    #[arg(long, value_enum, value_name = "FORM")]
    pub only: Vec<ListForm>,

    /// Report files that would change without writing; fails if any would
    #[arg(long)]
    pub check: bool,

    /// Show a line diff for each file that would change, without writing
    #[arg(long)]
    pub diff: bool,

    /// Convert standard input to standard output
    #[arg(long, conflicts_with_all = ["root", "extensions", "follow_links", "check", "diff"])]
    pub stdin: bool,

    /// Output format (human, json)
    #[arg(long, short = 'O', value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Machine-readable JSON output (shorthand for --output-format=json)
    #[arg(long, short = 'm')]
    pub machine: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Config file path (default: ./narrate.toml, then ~/.config/narrate/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Effective output format from flags, falling back to the config file.
    pub fn output_format(&self, config: &Config) -> Result<OutputFormat> {
        if let Some(format) = self.output_format {
            return Ok(format);
        }
        if self.machine {
            return Ok(OutputFormat::Json);
        }
        OutputFormat::from_config(&config.output.format)
    }

    /// Whether JSON output was requested on the command line.
    #[must_use]
    pub fn wants_json(&self) -> bool {
        self.machine || self.output_format == Some(OutputFormat::Json)
    }

    #[must_use]
    pub const fn write_mode(&self) -> WriteMode {
        if self.check || self.diff {
            WriteMode::Check
        } else {
            WriteMode::Write
        }
    }

    /// Layer command-line flags over the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) -> Result<()> {
        if let Some(root) = &self.root {
            config.convert.root.clone_from(root);
        }
        if !self.extensions.is_empty() {
            config.convert.extensions = self
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect();
        }
        if self.follow_links {
            config.convert.follow_links = true;
        }
        if !self.only.is_empty() {
            config.convert.forms.clone_from(&self.only);
        }
        config.validate()
    }
}

/// Resolve configuration, then convert stdin or the documents tree.
pub fn run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let mut config = Config::load(cli.config.as_deref(), &cwd)?;
    cli.apply_to(&mut config)?;
    debug!(?config, "resolved config");

    let converter = Converter::new(config.convert.form_set());
    if cli.stdin {
        return convert_stdin(&converter);
    }

    let format = cli.output_format(&config)?;
    convert_tree(cli, &config, &converter, format)
}

fn convert_stdin(converter: &Converter) -> Result<()> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let conversion = converter.convert(&input);
    debug!(lists = conversion.rewritten, "converted stdin");
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(conversion.output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn convert_tree(
    cli: &Cli,
    config: &Config,
    converter: &Converter,
    format: OutputFormat,
) -> Result<()> {
    let root: &Path = &config.convert.root;
    let discovery = match batch::discover_documents(
        root,
        &config.convert.extensions,
        config.convert.follow_links,
    ) {
        Ok(discovery) => discovery,
        Err(err @ NarrateError::RootNotFound(_)) => {
            return output::print_root_missing(format, &err, root);
        }
        Err(err) => return Err(err),
    };

    let mode = cli.write_mode();
    let mut reporter: Box<dyn Reporter> = match format {
        OutputFormat::Human => Box::new(output::HumanReporter::new(mode, cli.diff)),
        OutputFormat::Json => Box::new(SilentReporter),
    };
    let summary = batch::run(discovery, converter, mode, reporter.as_mut());

    if format == OutputFormat::Json {
        output::print_json_summary(root, &summary)?;
    }
    if cli.check && summary.converted_count() > 0 {
        return Err(NarrateError::CheckFailed(summary.converted_count()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["narrate"]).unwrap();
        assert!(cli.root.is_none());
        assert_eq!(cli.write_mode(), WriteMode::Write);
        let mut config = Config::default();
        cli.apply_to(&mut config).unwrap();
        assert_eq!(config.convert.root, PathBuf::from("client/src/data/courses"));
        assert_eq!(cli.output_format(&config).unwrap(), OutputFormat::Human);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "narrate", "--root", "docs", "--ext", ".markdown", "--only", "numbered", "-m",
        ])
        .unwrap();
        let mut config = Config::default();
        cli.apply_to(&mut config).unwrap();
        assert_eq!(config.convert.root, PathBuf::from("docs"));
        assert_eq!(config.convert.extensions, vec!["markdown"]);
        assert_eq!(config.convert.forms, vec![ListForm::Numbered]);
        assert_eq!(cli.output_format(&config).unwrap(), OutputFormat::Json);
        assert!(cli.wants_json());
    }

    #[test]
    fn check_and_diff_do_not_write() {
        let cli = Cli::try_parse_from(["narrate", "--diff"]).unwrap();
        assert_eq!(cli.write_mode(), WriteMode::Check);
        let cli = Cli::try_parse_from(["narrate", "--check"]).unwrap();
        assert_eq!(cli.write_mode(), WriteMode::Check);
    }

    #[test]
    fn stdin_conflicts_with_tree_flags() {
        assert!(Cli::try_parse_from(["narrate", "--stdin", "--root", "x"]).is_err());
        assert!(Cli::try_parse_from(["narrate", "--stdin", "--check"]).is_err());
        assert!(Cli::try_parse_from(["narrate", "--stdin", "--only", "plain"]).is_ok());
    }

    #[test]
    fn unknown_form_is_rejected() {
        assert!(Cli::try_parse_from(["narrate", "--only", "bullets"]).is_err());
    }
}
