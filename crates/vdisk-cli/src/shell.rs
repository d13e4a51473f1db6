use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colored::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::error;

use vdisk_core::export::default_export_filename;
use vdisk_core::{AddOutcome, AppConfig, DiskEngine, DiskTool};

use crate::commands::{CreateArgs, ShellCommand, ShellLine};
use crate::display;
use crate::progress::CliReporter;

/// Read-eval loop over one in-memory disk list. Each command runs to completion
/// before the next prompt.
pub fn run(config: &AppConfig) -> Result<()> {
    let mut engine = DiskEngine::from_config(config.clone());
    let reporter = CliReporter::new();
    let stdin = io::stdin();
    let mut line = String::new();

    println!("{}", "QEMU Virtual Disk Manager".bold());
    println!("Type `help` for commands, `quit` to leave.");

    loop {
        print!("vdisk> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        let args = match split_line(line.trim()) {
            Ok(args) if args.is_empty() => continue,
            Ok(args) => args,
            Err(msg) => {
                eprintln!("{}", msg.red());
                continue;
            }
        };

        let command = match ShellLine::try_parse_from(args) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                err.print()?;
                continue;
            }
        };

        match dispatch(&mut engine, command, &reporter) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                error!("{:#}", err);
                eprintln!("{} {:#}", "Error:".red().bold(), err);
            }
        }
    }

    Ok(())
}

/// Returns `false` when the session should end.
fn dispatch<T: DiskTool>(
    engine: &mut DiskEngine<T>,
    command: ShellCommand,
    reporter: &CliReporter,
) -> Result<bool> {
    match command {
        ShellCommand::Scan { folder } => {
            let report = engine.scan_folder(&folder, reporter)?;
            display::print_scan_summary(&folder, &report);
            display::print_table(engine.catalog().all());
        }
        ShellCommand::Create(args) => create(engine, args)?,
        ShellCommand::List => display::print_table(engine.catalog().all()),
        ShellCommand::Path { row } => {
            println!("Full path:\n{}", engine.full_path(row)?);
        }
        ShellCommand::Info { row } => {
            let info = engine.disk_info(row)?;
            println!("{}", info);
        }
        ShellCommand::Remove { row, yes } => {
            let filename = engine.select(row)?.filename.clone();
            let prompt = format!(
                "Remove '{}' from the list? Note: This does NOT delete the actual file.",
                filename
            );
            if yes || prompt_confirm(&prompt, Some(false))? {
                let removed = engine.remove(row)?;
                println!("Removed from list: {}", removed.filename);
            }
        }
        ShellCommand::Export { file } => {
            let destination =
                file.unwrap_or_else(|| PathBuf::from(default_export_filename(Local::now())));
            let count = engine
                .export(&destination)
                .with_context(|| format!("Failed to export CSV to {}", destination.display()))?;
            println!(
                "Exported {} disk(s) to:\n{}",
                format!("{}", count).green(),
                destination.display()
            );
        }
        ShellCommand::Quit => return Ok(false),
    }

    Ok(true)
}

pub fn create<T: DiskTool>(engine: &mut DiskEngine<T>, args: CreateArgs) -> Result<()> {
    let format = args.format.unwrap_or(engine.config().default_format);
    let size = args
        .size
        .unwrap_or_else(|| engine.config().default_size.clone());

    let created = engine.create_disk(&args.path, format, &size)?;
    display::print_created(&created.record);
    match created.outcome {
        AddOutcome::Added => {}
        AddOutcome::Duplicate => println!("{}", "The disk was already in the list.".yellow()),
        AddOutcome::PathExists => println!(
            "{}",
            "A disk with this path is already in the list; the entry was not changed.".yellow()
        ),
    }
    Ok(())
}

pub fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) | None => print!("{} (y/N): ", prompt),
        }
        io::stdout().flush()?;

        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(default.unwrap_or(false));
        }

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}

/// Split a command line into words. Single or double quotes group words that
/// contain spaces; the quotes themselves are dropped.
fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("Unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}
