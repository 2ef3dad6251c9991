use arcflash_cli::cli::{Cli, Commands};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

mod commands;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so table and JSON output stay clean on stdout.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: could not install log subscriber: {err}");
    }
    debug!(command = ?cli.command, "arcflash starting");

    let result = match &cli.command {
        Commands::Calc {
            equipment,
            current,
            duration,
            duration_reduced,
        } => commands::calc::handle(equipment, *current, *duration, *duration_reduced, cli.format),
        Commands::Multistep {
            equipment,
            current,
            segments,
            variant,
        } => commands::multistep::handle(equipment, current, segments, *variant, cli.format),
        Commands::Sweep { .. } => commands::sweep::handle(&cli.command, cli.format),
        Commands::Presets => commands::presets::handle(cli.format),
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
