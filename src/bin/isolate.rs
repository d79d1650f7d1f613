//! Find offsets that changed (or stayed) across hex dump snapshots
//!
//! Usage: hori-isolate dump1 [= | == | !=] dump2 [op] dump3 ...

use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "hori-isolate")]
#[command(version, about = "Isolate memory offsets across hexdump snapshots")]
struct Cli {
    /// Dump files and operators (`=`/`==` keep unchanged, `!=` keep changed)
    #[arg(required = true, allow_hyphen_values = true)]
    args: Vec<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match hori_driver::isolate::run(&cli.args) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
