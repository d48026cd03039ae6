use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;

use spooky_console::cli::CliArgs;
use spooky_console::journal::LayoutJournal;
use spooky_console::shell::{Flow, Shell};

// ============================================================================
// MAIN - Entry point
// ============================================================================

fn main() -> Result<()> {
    spooky_console::tracing::init();

    let startup = CliArgs::parse().into_config();
    let console = &startup.console;
    tracing::info!(prog_name = %console.prog_name, "starting console");

    let mut shell = Shell::new(console)?;
    if console.journal.enabled {
        match LayoutJournal::open_default(console.journal.flush_every) {
            Ok(journal) => {
                tracing::info!("Journaling layout changes to {}", journal.path().display());
                shell = shell.with_journal(journal);
            }
            Err(e) => tracing::warn!("Layout journal disabled: {:#}", e),
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(script) = &startup.script {
        if shell.run_script(script, &mut out)? == Flow::Quit {
            return shell.flush();
        }
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    // A script with piped stdin runs on its own
    if startup.script.is_none() || interactive {
        shell.run(stdin.lock(), &mut out, interactive)?;
    }

    shell.flush()
}
