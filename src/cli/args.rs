//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Locate and generate test class counterparts in multi-root source trees
#[derive(Parser, Debug)]
#[command(name = "gentest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the test class of a class
    Locate {
        /// Qualified class name or class file
        class: String,
    },

    /// Create the test class of a class
    Create {
        /// Qualified class name or class file
        class: String,
        /// Root to create the test in (default: beside the class)
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        test_root: Option<PathBuf>,
    },

    /// List source roots
    Roots,

    /// List production classes without a test class
    Missing {
        /// Only classes of this module
        #[arg(short, long)]
        module: Option<String>,
    },

    /// List test classes whose production class is gone
    Orphans,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
    /// Print a commented config template
    Template,
}
