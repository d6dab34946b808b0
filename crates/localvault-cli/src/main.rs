//! LocalVault CLI - a local, passphrase-protected secret vault
//!
//! This is the command-line interface for LocalVault. It is a thin
//! presentation layer over `localvault-core`: prompting, table rendering,
//! and file pickers live here; all cryptographic and session logic lives
//! in the core crate.

mod cli;
mod commands;
mod config;
mod helpers;
mod output;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::output::print_error;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Accounts => commands::accounts::handle_accounts(cli),
        Commands::Create(args) => commands::accounts::handle_create(cli, args),
        Commands::Delete(args) => commands::accounts::handle_delete(cli, args),
        Commands::Rotate(args) => commands::accounts::handle_rotate(cli, args),
        Commands::Add(args) => commands::entries::handle_add(cli, args),
        Commands::List(args) => commands::entries::handle_list(cli, args),
        Commands::Show(args) => commands::entries::handle_show(cli, args),
        Commands::Edit(args) => commands::entries::handle_edit(cli, args),
        Commands::Remove(args) => commands::entries::handle_remove(cli, args),
        Commands::Export(args) => commands::transfer::handle_export(cli, args),
        Commands::Import(args) => commands::transfer::handle_import(cli, args),
        Commands::Generate(args) => commands::generate::handle_generate(args),
    }
}
