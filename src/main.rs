mod exec;
mod manifest;
mod user;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;

use crate::exec::{Commander, DryRunCommander, SystemCommander};
use crate::user::UserSpec;
use crate::user::lookup;

/// uctl main parser
#[derive(Parser, Debug)]
#[command(author, version, about = "Declarative local user account management", long_about = None)]
struct Cli {
    /// Print commands instead of running them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a local user account
    Add {
        /// Username to create
        name: String,
        /// Login shell
        #[arg(short, long, default_value = "/bin/bash")]
        shell: String,
        /// Home directory (defaults to /home/<name>)
        #[arg(short, long)]
        directory: Option<String>,
        /// Supplementary groups
        #[arg(short = 'G', long, value_delimiter = ',')]
        groups: Vec<String>,
        /// Create a system account
        #[arg(short = 'r', long)]
        system: bool,
        /// Explicit numeric user id
        #[arg(short, long)]
        uid: Option<String>,
        /// Explicit numeric group id
        #[arg(short, long)]
        gid: Option<String>,
    },

    /// Remove a local user account
    Del {
        /// Username to remove
        name: String,
    },

    /// Show a user from the OS user database
    Show {
        /// Username to look up
        name: String,
    },

    /// Converge the system towards a user manifest
    Apply {
        /// Path to the TOML manifest
        manifest: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {e:#}", "Error:".red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Add {
            name,
            shell,
            directory,
            groups,
            system,
            uid,
            gid,
        } => {
            require_root(cli.dry_run)?;
            let spec = UserSpec {
                name: name.clone(),
                directory: directory.unwrap_or_default(),
                shell,
                groups,
                system,
                uid: uid.unwrap_or_default(),
                gid: gid.unwrap_or_default(),
            };
            let mut commander = commander_for(cli.dry_run);
            spec.add(commander.as_mut())
                .with_context(|| format!("failed to create user '{name}'"))?;
            if !cli.dry_run {
                println!("{} user '{}'", "Created".green(), name);
            }
        }
        Commands::Del { name } => {
            require_root(cli.dry_run)?;
            let spec = UserSpec {
                name: name.clone(),
                ..Default::default()
            };
            let mut commander = commander_for(cli.dry_run);
            spec.delete(commander.as_mut())
                .with_context(|| format!("failed to remove user '{name}'"))?;
            if !cli.dry_run {
                println!("{} user '{}'", "Removed".green(), name);
            }
        }
        Commands::Show { name } => {
            let record = lookup::lookup(&name)?;
            print_record(&record);
        }
        Commands::Apply { manifest } => {
            require_root(cli.dry_run)?;
            let manifest = manifest::load(&manifest)?;
            let mut commander = commander_for(cli.dry_run);
            manifest::apply(&manifest, commander.as_mut())?;
        }
    }

    Ok(())
}

fn commander_for(dry_run: bool) -> Box<dyn Commander> {
    if dry_run {
        Box::new(DryRunCommander::default())
    } else {
        Box::new(SystemCommander::default())
    }
}

fn require_root(dry_run: bool) -> Result<()> {
    if dry_run {
        return Ok(());
    }
    if !matches!(sudo::check(), sudo::RunningAs::Root) {
        bail!("this command must run as root (or use --dry-run)");
    }
    Ok(())
}

fn print_record(record: &lookup::UserRecord) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["Field", "Value"]);
    table.add_row(["Name".to_string(), record.name.clone()]);
    table.add_row(["UID".to_string(), record.uid.to_string()]);
    table.add_row(["GID".to_string(), record.gid.to_string()]);
    table.add_row(["Home".to_string(), record.home.display().to_string()]);
    table.add_row(["Shell".to_string(), record.shell.display().to_string()]);
    println!("{table}");
}
