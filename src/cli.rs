//! CLI definitions for markwise.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// markwise CLI.
#[derive(Parser)]
#[command(name = "markwise")]
#[command(about = "Bookmark folder recommendations from your own bookmark tree")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.markwise/config.toml)
    #[arg(short, long, env = "MARKWISE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the folder digest and structure summary
    Digest {
        /// Print statistics as JSON instead of markdown
        #[arg(long)]
        json: bool,

        /// Re-read the bookmark tree instead of using the cache
        #[arg(long)]
        refresh: bool,
    },

    /// Check whether a URL is already bookmarked
    Check {
        /// Page URL
        url: String,
    },

    /// Ask for folder recommendations for a URL
    Recommend {
        /// Page URL
        url: String,

        /// Page title
        #[arg(short, long, default_value = "")]
        title: String,

        /// Create the bookmark from the Nth recommendation (1-based)
        #[arg(long)]
        accept: Option<usize>,
    },

    /// Create a bookmark under a folder path
    Add {
        /// Page URL
        url: String,

        /// Folder path, segments separated by " > "
        #[arg(short, long)]
        path: String,

        /// Bookmark title
        #[arg(short, long)]
        title: String,

        /// Create the last path segment as a new folder
        #[arg(long)]
        new_folder: bool,
    },

    /// List recently used folders
    Recent,

    /// API key management commands
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Copy a URL to the system clipboard
    Copy {
        /// Page URL
        url: String,
    },

    /// Drop the cached bookmark structure
    Invalidate,
}

#[derive(Subcommand)]
pub(crate) enum KeyAction {
    /// Save an API key
    Set {
        /// Gemini API key
        key: String,
    },

    /// Show the API key in use, masked
    Show,
}
