use std::process::ExitCode;

use tcprobe::cli;
use tcprobe::{ShutdownSignal, StatusPrinter};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let shutdown = ShutdownSignal::new();
    let handler_signal = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        println!("\nInterrupt received. Exiting gracefully...");
        handler_signal.trigger();
    }) {
        tracing::warn!(error = %e, "interrupt handler not installed");
    }

    let args: Vec<String> = std::env::args().collect();
    let mut printer = StatusPrinter::stdout();

    ExitCode::from(cli::run(&args, shutdown, &mut printer))
}
