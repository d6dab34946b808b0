use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use localvault_core::VERSION;

/// LocalVault - a local, passphrase-protected secret vault
#[derive(Parser)]
#[command(name = "localvault")]
#[command(version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the encrypted account blobs
    #[arg(short = 'd', long, global = true, env = "LOCALVAULT_DIR")]
    pub vault_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all accounts
    Accounts,

    /// Create a new account with an empty vault
    Create(CreateArgs),

    /// Delete an account and its encrypted blob
    Delete(DeleteArgs),

    /// Change an account's master passphrase
    Rotate(RotateArgs),

    /// Add an entry to an account's vault
    Add(AddArgs),

    /// List entries in an account's vault
    List(ListArgs),

    /// Show a single entry
    Show(ShowArgs),

    /// Edit fields of an existing entry
    Edit(EditArgs),

    /// Remove an entry
    Remove(RemoveArgs),

    /// Export an account's encrypted blob to a JSON file
    Export(ExportArgs),

    /// Import an account from an exported JSON file
    Import(ImportArgs),

    /// Generate a random password without touching any vault
    Generate(GenerateArgs),
}

/// Arguments for the `create` command
#[derive(Args)]
pub struct CreateArgs {
    /// Account name (e.g. personal, work)
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Account name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `rotate` command
#[derive(Args)]
pub struct RotateArgs {
    /// Account name
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Account name
    #[arg(value_name = "ACCOUNT")]
    pub account: String,

    /// Entry title (e.g. Gmail)
    #[arg(short, long)]
    pub title: String,

    /// Username or email
    #[arg(short, long, default_value = "")]
    pub username: String,

    /// Secret value; prompted for if neither this nor --generate is given
    #[arg(short, long)]
    pub secret: Option<String>,

    /// Generate a random secret of the given length instead of prompting
    #[arg(short, long, value_name = "LENGTH")]
    pub generate: Option<usize>,

    /// Free-form notes
    #[arg(short, long, default_value = "")]
    pub notes: String,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Account name
    #[arg(value_name = "ACCOUNT")]
    pub account: String,

    /// Case-insensitive substring filter on title or username
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Output JSON instead of a table (secrets are not included)
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Account name
    #[arg(value_name = "ACCOUNT")]
    pub account: String,

    /// Entry ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Print the secret in the clear
    #[arg(long)]
    pub reveal: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Account name
    #[arg(value_name = "ACCOUNT")]
    pub account: String,

    /// Entry ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New username
    #[arg(short, long)]
    pub username: Option<String>,

    /// New secret value
    #[arg(short, long)]
    pub secret: Option<String>,

    /// Replace the secret with a generated one of the given length
    #[arg(short, long, value_name = "LENGTH")]
    pub generate: Option<usize>,

    /// New notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

/// Arguments for the `remove` command
#[derive(Args)]
pub struct RemoveArgs {
    /// Account name
    #[arg(value_name = "ACCOUNT")]
    pub account: String,

    /// Entry ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Account name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Output path (defaults to localvault-<name>-export-<stamp>.json)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// Path to an exported JSON file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Overwrite an existing account of the same name without asking
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for the `generate` command
#[derive(Args)]
pub struct GenerateArgs {
    /// Password length
    #[arg(short, long, default_value_t = 16)]
    pub length: usize,
}
