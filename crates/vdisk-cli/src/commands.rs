use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vdisk_core::DiskFormat;

#[derive(Debug, Parser)]
#[command(name = "vdisk")]
#[command(about = "Create and catalog QEMU virtual disk images", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a folder (recursively) for .qcow2 and .raw files and list them
    Scan {
        folder: String,
        /// Also write the resulting list to this CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Create a virtual disk with qemu-img
    Create(CreateArgs),
    /// Show qemu-img info for a disk image
    Info { path: String },
    /// Interactive session that keeps a disk list until you quit
    Shell,
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// File name of the new disk; `.qcow2` or `.raw` is appended when missing
    pub path: String,
    /// Disk format: qcow2 (recommended) or raw
    #[arg(short, long)]
    pub format: Option<DiskFormat>,
    /// Disk size, e.g. 20G, 100M, 1T
    #[arg(short, long)]
    pub size: Option<String>,
}

/// One line typed into the interactive session.
#[derive(Debug, Parser)]
#[command(multicall = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// Scan a folder for .qcow2 and .raw files and add them to the list
    Scan { folder: String },
    /// Create a virtual disk and add it to the list
    Create(CreateArgs),
    /// Show the disk list
    #[command(alias = "ls")]
    List,
    /// Show the full path of a listed disk
    Path { row: usize },
    /// Show qemu-img info for a listed disk
    Info { row: usize },
    /// Remove a disk from the list (the file is not deleted)
    #[command(alias = "rm")]
    Remove {
        row: usize,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Export the list to CSV
    Export { file: Option<PathBuf> },
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}
