mod commands;
mod display;
mod logging;
mod progress;
mod shell;

use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliReporter;
use tracing::error;
use vdisk_core::{AppConfig, DiskEngine, DiskTool, QemuImg};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match vdisk_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    let result = match args.command {
        Some(Commands::Scan { folder, export }) => run_scan(&config, &folder, export),
        Some(Commands::Create(create_args)) => {
            let mut engine = DiskEngine::from_config(config.clone());
            shell::create(&mut engine, create_args)
        }
        Some(Commands::Info { path }) => run_info(&config, &path),
        Some(Commands::Shell) => shell::run(&config),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
            Ok(())
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = result {
        error!("Error: {:#}", err);
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        process::exit(1);
    }

    Ok(())
}

fn run_scan(
    config: &AppConfig,
    folder: &str,
    export: Option<std::path::PathBuf>,
) -> anyhow::Result<()> {
    let mut engine = DiskEngine::from_config(config.clone());
    let reporter = CliReporter::new();

    let report = engine.scan_folder(folder, &reporter)?;
    display::print_scan_summary(folder, &report);
    display::print_table(engine.catalog().all());

    if let Some(destination) = export {
        let count = engine.export(&destination)?;
        println!(
            "Exported {} disk(s) to {}",
            format!("{}", count).green(),
            destination.display()
        );
    }

    Ok(())
}

fn run_info(config: &AppConfig, path: &str) -> anyhow::Result<()> {
    let tool = QemuImg::new(&config.qemu_img);
    let output = tool.info(std::path::Path::new(path))?;
    print!("{}", output);
    Ok(())
}
