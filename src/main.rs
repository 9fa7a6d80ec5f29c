use std::io::{self, IsTerminal};

use anyhow::Context as _;
use clap::Parser;
use reckon::shell::{BufReadReader, EditorReader, Shell};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// reckon is an interactive calculator that safely evaluates arithmetic
/// expressions: numbers, parentheses, unary signs and + - * / // % **.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {}

fn main() -> anyhow::Result<()> {
    let _args = Args::parse();
    init_logging();

    let session = if io::stdin().is_terminal() {
        let reader = EditorReader::new().context("failed to set up the line editor")?;
        Shell::new(reader, io::stdout()).run()
    } else {
        #[cfg(unix)]
        exit_on_interrupt().context("failed to install the interrupt handler")?;
        let reader = BufReadReader::new(io::stdin().lock(), io::stdout());
        Shell::new(reader, io::stdout()).run()
    };

    if let Err(e) = session {
        error!(error = %e, "shell terminated");
        return Err(e).context("reading input or writing output failed");
    }
    Ok(())
}

/// Ends a piped session on SIGINT the way end of input ends it: a blank line
/// and a successful exit. The line editor reports Ctrl-C itself, so this is
/// only needed when stdin is not a terminal.
#[cfg(unix)]
fn exit_on_interrupt() -> io::Result<()> {
    use std::{io::Write as _, process, thread};

    use signal_hook::{consts::SIGINT, iterator::Signals};
    use tracing::{debug, warn};

    let mut signals = Signals::new([SIGINT])?;
    thread::spawn(move || {
        if signals.forever().next().is_some() {
            debug!("interrupted while reading piped input");
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout).and_then(|()| stdout.flush()) {
                warn!(error = %e, "could not finish the session output");
            }
            process::exit(0);
        }
    });
    Ok(())
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, quiet by default.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(io::stderr)
                             .with_target(false)
                             .init();
}
