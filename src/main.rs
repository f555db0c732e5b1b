// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, build the composer, hand it to the
//   interactive session.
// - Maps the outcome to an exit code: 0 on success or Ctrl-C (at a prompt
//   or mid-batch), 1 on anything unexpected.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::process::{self, ExitCode};
use tracing_subscriber::EnvFilter;
use username_gen_cli::api::HttpWordSupplier;
use username_gen_cli::composer::Composer;
use username_gen_cli::config::Config;
use username_gen_cli::ui::{install_interrupt_handler, is_cancellation, session, CANCELLED_MESSAGE};

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_cancellation(&e) => {
            println!("\n\n{CANCELLED_MESSAGE}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\n❌ Unexpected error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    // Prompts see Ctrl-C as an `Interrupted` error; everywhere else the
    // signal lands here.
    install_interrupt_handler(|| {
        println!("\n\n{CANCELLED_MESSAGE}");
        process::exit(0);
    })?;

    let config = Config::from_env();
    let supplier = HttpWordSupplier::new(&config)?;
    let composer = Composer::new(supplier).with_pacing(config.pacing);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Blocks until the session finishes.
    session(&composer, &mut rng)
}

// Supplier warnings go to stderr; `RUST_LOG` overrides the default level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}
