//! CLI module for repairdesk
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Repairdesk - repair ticket stage tracking for auto shops
#[derive(Parser, Debug)]
#[command(name = "repairdesk")]
#[command(version)]
#[command(about = "Track repair tickets through the shop's stage lifecycle")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory to search for the shop workspace (defaults to the current directory)
    #[arg(long, global = true)]
    pub shop_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a .repairdesk workspace in the current directory
    Init {
        /// Shop this workspace belongs to
        #[arg(long)]
        shop_id: Option<String>,

        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Open a new ticket at Checked In
    Open {
        /// Owning customer's id
        #[arg(long)]
        client: String,

        /// Customer display name
        #[arg(long)]
        customer: String,

        /// Vehicle description
        #[arg(long)]
        vehicle: String,

        /// Reported issue
        #[arg(long)]
        issue: String,
    },

    /// List tickets of the configured shop
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a ticket's stage track
    Show {
        /// Ticket ID
        id: String,

        /// Viewer role (client, staff, owner)
        #[arg(long, default_value = "client")]
        role: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Request a stage change
    Stage {
        /// Ticket ID
        id: String,

        /// Acting role (client, staff, owner)
        #[arg(long)]
        role: String,

        /// Target stage index (0 = Checked In, 6 = Completed); out-of-range values clamp
        #[arg(long, allow_hyphen_values = true)]
        to: i64,

        /// Confirm a rollback without prompting
        #[arg(long)]
        yes: bool,
    },

    /// Print the stage sequence
    Stages,
}

/// Parse a role argument.
pub(crate) fn parse_role(text: &str) -> crate::Result<crate::Role> {
    text.parse().map_err(crate::ShopError::InvalidRole)
}
