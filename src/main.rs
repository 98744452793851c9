use clap::Parser;
use kpi_game::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run(args)) {
        Ok(status) => process::exit(status.exit_code()),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("KPI Game - Campaign KPI Progress Client");
    println!("=======================================");
    println!();
    println!("Log in to the KPI Game campaign and follow your monthly KPI progress");
    println!("toward each target, in cartones and hectolitros.");
    println!();
    println!("USAGE:");
    println!("    kpi-game [OPTIONS] <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    login       Log in with your client code and password");
    println!("    signup      Register a new participant");
    println!("    logout      Log out and clear the stored session");
    println!("    status      Show the stored session");
    println!("    dashboard   Show KPI progress for a date window (requires login)");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    --config <FILE>          Configuration file (JSON)");
    println!("    --session-file <FILE>    Session file location");
    println!("    -v, --verbose            Increase logging verbosity");
    println!("    -q, --quiet              Only show errors");
    println!("    -h, --help               Show help information");
    println!("    -V, --version            Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Log in (the password is prompted when omitted):");
    println!("    kpi-game login --codigo C-001");
    println!();
    println!("    # Show August 2024 progress in hectolitros only:");
    println!("    kpi-game dashboard --from 2024-08-01 --to 2024-08-31 --unit hectolitros");
    println!();
    println!("    # Machine-readable output:");
    println!("    kpi-game dashboard --format json");
    println!();
    println!("The API key is read from the config file or KPI_GAME_API_KEY.");
    println!("For detailed help on any command, use:");
    println!("    kpi-game <COMMAND> --help");
}
