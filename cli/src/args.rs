//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use shaderfx_effects::{LineDirectives, PreprocessorConfig};

/// Line directive mode as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CliLineDirectives {
    /// `#line` before and after each include.
    Bracket,
    /// `#line` only after each include.
    #[default]
    Restore,
    /// No `#line` directives.
    Off,
}

impl From<CliLineDirectives> for LineDirectives {
    fn from(cli: CliLineDirectives) -> Self {
        match cli {
            CliLineDirectives::Bracket => LineDirectives::Bracket,
            CliLineDirectives::Restore => LineDirectives::Restore,
            CliLineDirectives::Off => LineDirectives::Off,
        }
    }
}

/// Resolve effects from multi-effect shader files.
#[derive(Parser, Debug)]
#[command(
    name = "shaderfx",
    version,
    about = "Resolve effects from multi-effect shader files",
    long_about = "Prints the include-free source of one effect.\n\n\
        KEY is `<file prefix>.<effect name>`, e.g. `Gravity.Fragment` reads \
        `<root>/<base>/Gravity.glsl` and prints its `--Fragment` effect. \
        Built-in library effects are available as `builtin/Common.Math` \
        unless --no-builtin is given."
)]
pub struct Args {
    /// Effect key, file prefix with --list, or program name with --program.
    pub key: String,

    /// Directory the shader files are read from.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Directory below the root that keys are relative to. `builtin/...`
    /// keys are not affected.
    #[arg(long, default_value = "")]
    pub base: String,

    /// Shader file extension.
    #[arg(long, default_value = ".glsl")]
    pub extension: String,

    /// Which `#line` directives to emit around includes.
    #[arg(long, value_enum, default_value_t = CliLineDirectives::Restore)]
    pub line_directives: CliLineDirectives,

    /// List the effects declared in the file KEY instead of resolving.
    #[arg(long, conflicts_with = "program")]
    pub list: bool,

    /// Treat KEY as a program name and print its Vertex, Geometry and Fragment stages.
    #[arg(long)]
    pub program: bool,

    /// Do not mount the built-in effect library under `builtin/`.
    #[arg(long)]
    pub no_builtin: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Preprocessor configuration selected by the arguments.
    pub fn config(&self) -> PreprocessorConfig {
        PreprocessorConfig::default()
            .with_extension(self.extension.as_str())
            .with_line_directives(self.line_directives.into())
    }

    /// Default `env_logger` filter; `RUST_LOG` still takes precedence.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
