//! `lox` — hôte en ligne de commande
//!
//! Argument parsing, telemetry setup, then delegation to `lox_cli` (lib).

#![forbid(unsafe_code)]

use std::{io, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use lox_cli as cli;

// ──────────────────────────── CLI (clap) ────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "lox", version, about = "Lox bytecode host: demo, run, disassemble, check", long_about = None)]
struct Opt {
    /// Augmente la verbosité (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux (errors only)
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Disassemble and interpret the built-in test chunk
    Demo {
        /// Trace every executed instruction
        #[arg(long)]
        trace: bool,
    },

    /// Assemble a text file (or - for stdin) and interpret it
    Run {
        input: Option<PathBuf>,
        /// Trace every executed instruction
        #[arg(long)]
        trace: bool,
        /// Validate the chunk before running it
        #[arg(long)]
        validate: bool,
    },

    /// Assemble a text file and print its disassembly
    Disasm {
        input: Option<PathBuf>,
    },

    /// Assemble a text file and validate it without running it
    Check {
        input: Option<PathBuf>,
    },
}

fn input_from_opt(p: Option<PathBuf>) -> cli::Input {
    match p {
        Some(path) if path.as_os_str() == "-" => cli::Input::Stdin,
        Some(path) => cli::Input::Path(path),
        None => cli::Input::Stdin,
    }
}

// ──────────────────────────── main ────────────────────────────

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn real_main() -> Result<u8> {
    let opt = Opt::parse();

    let trace = matches!(opt.cmd, Command::Demo { trace: true } | Command::Run { trace: true, .. })
        || lox_vm::VmOptions::from_env().trace;
    cli::init_telemetry(opt.verbose, opt.quiet, trace);

    use cli::{CheckTask, Command as C, DemoTask, DisasmTask, RunTask};

    let command = match opt.cmd {
        Command::Demo { trace } => C::Demo(DemoTask { trace }),
        Command::Run { input, trace, validate } => {
            C::Run(RunTask { input: input_from_opt(input), trace, validate })
        }
        Command::Disasm { input } => C::Disasm(DisasmTask { input: input_from_opt(input) }),
        Command::Check { input } => C::Check(CheckTask { input: input_from_opt(input) }),
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    cli::execute(command, &mut stdout.lock(), &mut stderr.lock())
        .context("échec d'exécution de la commande")
}
