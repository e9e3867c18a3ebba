use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sieve", version)]
#[command(about = "Filter JSON records and manage saved filter views", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Storage key (saved-view namespace) to operate on
    #[arg(short, long, global = true)]
    pub key: Option<String>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter a JSON records file
    #[command(alias = "a")]
    Apply {
        /// JSON file holding an array of objects
        records: PathBuf,

        /// Condition as field:operator:value (repeatable, all must match)
        #[arg(short = 'w', long = "where", value_name = "FIELD:OP:VALUE")]
        conditions: Vec<String>,

        /// Use a saved view (id, name or position)
        #[arg(long, conflicts_with = "conditions")]
        view: Option<String>,

        /// Skip the default view and show every record
        #[arg(long, conflicts_with_all = ["conditions", "view"])]
        all: bool,

        /// Print matching records as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the distinct values of a field
    Values {
        /// JSON file holding an array of objects
        records: PathBuf,

        /// Field to inspect
        field: String,
    },

    /// List the fields found in a records file
    Fields {
        /// JSON file holding an array of objects
        records: PathBuf,
    },

    /// List the available operators
    #[command(alias = "ops")]
    Operators,

    /// Manage saved views
    #[command(subcommand, alias = "v")]
    View(ViewCommands),

    /// List storage keys that hold saved views
    Keys,
}

#[derive(Subcommand, Debug)]
pub enum ViewCommands {
    /// List saved views
    #[command(alias = "ls")]
    List,

    /// Save conditions as a named view
    Save {
        /// Name of the view
        name: String,

        /// Condition as field:operator:value (repeatable)
        #[arg(short = 'w', long = "where", value_name = "FIELD:OP:VALUE", required = true)]
        conditions: Vec<String>,

        /// Check fields against this records file before saving
        #[arg(long)]
        records: Option<PathBuf>,
    },

    /// Show a view's conditions
    Show {
        /// Id, name or position
        selector: String,
    },

    /// Delete a view
    #[command(alias = "rm")]
    Delete {
        /// Id, name or position
        selector: String,
    },

    /// Toggle whether a view is the default
    Default {
        /// Id, name or position
        selector: String,
    },

    /// Clear the default view
    ClearDefault,
}
