use anyhow::Context;
use clap::Parser;
use roster_sync::cli::{
    args::{Args, Commands},
    commands,
};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.get_command() else {
        show_help_and_commands();
        process::exit(0);
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(run_with_shutdown(command));

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            if error
                .downcast_ref::<roster_sync::Error>()
                .is_some_and(roster_sync::Error::is_store_failure)
            {
                commands::shared::print_failure_notice();
            }
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Run the command, stopping early on Ctrl+C
async fn run_with_shutdown(command: &Commands) -> anyhow::Result<()> {
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to install CTRL+C signal handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = commands::run(command) => {
            result.with_context(|| command_label(command))
        }
        _ = shutdown_signal => {
            commands::shared::print_interrupt_notice();
            Err(roster_sync::Error::processing_interrupted("Import interrupted by user").into())
        }
    }
}

fn command_label(command: &Commands) -> String {
    match command {
        Commands::Import(args) => format!("{} import of {} failed", args.flow, args.file.display()),
        Commands::Inspect(args) => format!("Could not inspect {}", args.file.display()),
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Roster Sync - Enrollment Export Importer");
    println!("========================================");
    println!();
    println!("Reconcile CSV exports from the enrollment platform against the");
    println!("student roster: append the enrollment log, add new students, or");
    println!("update the class and days of students already on the roster.");
    println!();
    println!("USAGE:");
    println!("    roster-sync <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Import a CSV export (enrollment-log, add-student, schedule-update)");
    println!("    inspect     Parse and clean a CSV export without touching the roster");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Update class schedules, previewing first:");
    println!("    roster-sync import schedule-update export.csv --dry-run");
    println!();
    println!("    # Add new students from a registration export:");
    println!("    roster-sync import add-student registrations.csv");
    println!();
    println!("    # Show the cleaned rows of an enrollment log:");
    println!("    roster-sync inspect log.csv --flow enrollment-log");
    println!();
    println!("For detailed help on any command, use:");
    println!("    roster-sync <COMMAND> --help");
}
