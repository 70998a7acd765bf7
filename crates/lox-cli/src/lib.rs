//! lox-cli — bibliothèque interne du binaire `lox`
//!
//! Keeps argument parsing in `main.rs` and everything testable here:
//! - `Command` + tasks: what to do, already parsed
//! - `execute`: runs a command against explicit stdout/stderr writers, returns the exit code
//! - `demo_chunk`: the hand-assembled `test chunk`
//! - `init_telemetry`: `tracing-subscriber` setup driven by `-v`/`-q`/`RUST_LOG`

#![deny(unused_must_use)]
#![forbid(unsafe_code)]

use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use lox_core::{
    asm::assemble, disasm::disassemble_chunk, validate::validate_chunk, value::format_value, Chunk,
    OpCode,
};
use lox_vm::{InterpretResult, Vm, VmOptions};
use tracing::{debug, info};
use tracing_subscriber::{filter::Directive, EnvFilter};

// ───────────────────────────── Types publics ─────────────────────────────

/// High-level command, already parsed.
#[derive(Clone, Debug)]
pub enum Command {
    /// Disassemble and run the built-in test chunk.
    Demo(DemoTask),
    /// Assemble a file and interpret it.
    Run(RunTask),
    /// Assemble a file and print its listing.
    Disasm(DisasmTask),
    /// Assemble a file and validate it without running it.
    Check(CheckTask),
}

#[derive(Clone, Debug, Default)]
pub struct DemoTask {
    pub trace: bool,
}

#[derive(Clone, Debug, Default)]
pub struct RunTask {
    pub input: Input,
    pub trace: bool,
    pub validate: bool, // refuse to run a chunk that fails validation
}

#[derive(Clone, Debug, Default)]
pub struct DisasmTask {
    pub input: Input,
}

#[derive(Clone, Debug, Default)]
pub struct CheckTask {
    pub input: Input,
}

/// Assembly text source: a file or `-` (stdin).
#[derive(Clone, Debug, Default)]
pub enum Input {
    Path(PathBuf),
    #[default]
    Stdin,
}

impl Input {
    fn name(&self) -> String {
        match self {
            Input::Path(p) => p.display().to_string(),
            Input::Stdin => "<stdin>".to_string(),
        }
    }

    fn read_to_string(&self) -> Result<String> {
        match self {
            Input::Path(p) => fs::read_to_string(p).with_context(|| format!("lecture de {}", p.display())),
            Input::Stdin => {
                let mut s = String::new();
                io::stdin().read_to_string(&mut s).context("lecture de stdin")?;
                Ok(s)
            }
        }
    }
}

// ───────────────────────────── Exécution ─────────────────────────────

/// The hand-assembled `test chunk`: `1.2` loaded on line 1,
/// `OP_RETURN` on line 2.
pub fn demo_chunk() -> Result<Chunk> {
    let mut chunk = Chunk::new();

    let constant = chunk.add_constant(1.2);
    chunk.write_op(OpCode::Constant, 1);
    chunk.write(u8::try_from(constant).context("index de constante hors d'un octet")?, 1);

    chunk.write_op(OpCode::Return, 2);
    Ok(chunk)
}

/// Runs `command`, writing listings/results to `out` and diagnostics to `err`.
///
/// Returns the process exit code: [`InterpretResult::exit_code`] for runs,
/// the compile-error code for assembly or validation failures.
/// I/O failures come back as `Err`.
pub fn execute<O: Write, E: Write>(command: Command, out: &mut O, err: &mut E) -> Result<u8> {
    match command {
        Command::Demo(task) => {
            let chunk = demo_chunk()?;
            write!(out, "{}", disassemble_chunk(&chunk, "test chunk"))?;
            let status = interpret(&chunk, task.trace, out, err)?;
            Ok(status.exit_code())
        }
        Command::Run(task) => {
            let Some(chunk) = load(&task.input, err)? else {
                return Ok(InterpretResult::CompileError.exit_code());
            };
            if task.validate {
                if let Err(e) = validate_chunk(&chunk) {
                    writeln!(err, "{}: {e}", task.input.name())?;
                    return Ok(InterpretResult::CompileError.exit_code());
                }
            }
            let status = interpret(&chunk, task.trace, out, err)?;
            Ok(status.exit_code())
        }
        Command::Disasm(task) => {
            let Some(chunk) = load(&task.input, err)? else {
                return Ok(InterpretResult::CompileError.exit_code());
            };
            write!(out, "{}", disassemble_chunk(&chunk, &task.input.name()))?;
            Ok(0)
        }
        Command::Check(task) => {
            let Some(chunk) = load(&task.input, err)? else {
                return Ok(InterpretResult::CompileError.exit_code());
            };
            match validate_chunk(&chunk) {
                Ok(()) => {
                    writeln!(out, "ok")?;
                    Ok(0)
                }
                Err(e) => {
                    writeln!(err, "{}: {e}", task.input.name())?;
                    Ok(InterpretResult::CompileError.exit_code())
                }
            }
        }
    }
}

/// Reads and assembles `input`. Assembly errors are reported on `err` and yield `None`.
fn load<E: Write>(input: &Input, err: &mut E) -> Result<Option<Chunk>> {
    let source = input.read_to_string()?;
    match assemble(&source) {
        Ok(chunk) => {
            debug!(input = %input.name(), bytes = chunk.len(), "assembled");
            Ok(Some(chunk))
        }
        Err(e) => {
            writeln!(err, "{}: {e}", input.name())?;
            Ok(None)
        }
    }
}

fn interpret<O: Write, E: Write>(chunk: &Chunk, trace: bool, out: &mut O, err: &mut E) -> Result<InterpretResult> {
    let options = VmOptions::from_env();
    let options = options.with_trace(options.trace || trace);
    let mut vm = Vm::with_options(options);

    let status = vm.interpret(chunk);
    match (status, vm.last_error()) {
        (InterpretResult::RuntimeError, Some(e)) => writeln!(err, "runtime error: {e}")?,
        _ => {
            if let Some(value) = vm.return_value() {
                writeln!(out, "{}", format_value(value))?;
            }
        }
    }
    info!(?status, "done");
    vm.free();
    Ok(status)
}

// ───────────────────────────── Logger ─────────────────────────────

/// Installs the global `tracing` subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise the level comes from `-q`/`-v`.
/// `trace` additionally enables the VM's per-instruction events.
pub fn init_telemetry(verbose: u8, quiet: bool, trace: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    if trace {
        if let Ok(directive) = "lox_vm::trace=trace".parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

// ───────────────────────────── Tests ─────────────────────────────
