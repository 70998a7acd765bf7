use std::fmt::Write as _;

use lox_core::{disasm::disassemble_instruction, value::format_value, Chunk, OpCode, Value};
use tracing::{debug, error, trace};

use crate::{
    error::VmError,
    options::{VmOptions, STACK_INITIAL},
    InterpretResult,
};

/// Lifecycle of a [`Vm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VmState {
    /// No chunk bound.
    Ready,
    /// Inside the dispatch loop.
    Running,
    /// Last run reached `OP_RETURN`.
    HaltedOk,
    /// Last run stopped on an error.
    HaltedError,
}

/// Bytecode interpreter.
///
/// A chunk is borrowed only for the duration of one [`Vm::interpret`] call;
/// the VM never owns or frees it. Independent instances share nothing.
#[derive(Debug)]
pub struct Vm {
    options: VmOptions,
    stack: Vec<Value>,
    state: VmState,
    return_value: Option<Value>,
    last_error: Option<VmError>,
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

/// Instruction pointer over one chunk. `ip == code.len()` means the stream is exhausted.
struct Cursor<'c> {
    chunk: &'c Chunk,
    ip: usize,
}

impl<'c> Cursor<'c> {
    const fn new(chunk: &'c Chunk) -> Self {
        Self { chunk, ip: 0 }
    }

    /// Fetch-then-advance.
    fn read_byte(&mut self) -> Result<u8, VmError> {
        let byte = self
            .chunk
            .byte_at(self.ip)
            .ok_or(VmError::MissingReturn { len: self.chunk.len() })?;
        self.ip += 1;
        Ok(byte)
    }

    fn line_at(&self, offset: usize) -> u32 {
        self.chunk.line_at(offset).unwrap_or_default()
    }
}

impl Vm {
    /// VM with default options.
    pub fn new() -> Self {
        Self::with_options(VmOptions::default())
    }

    /// VM with explicit options.
    pub fn with_options(options: VmOptions) -> Self {
        let reserve = options.stack_max.map_or(STACK_INITIAL, |max| max.min(STACK_INITIAL));
        Self {
            options,
            stack: Vec::with_capacity(reserve),
            state: VmState::Ready,
            return_value: None,
            last_error: None,
        }
    }

    /// Active options.
    pub const fn options(&self) -> &VmOptions {
        &self.options
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> VmState {
        self.state
    }

    /// Value popped by the last `OP_RETURN`, if the stack held one.
    pub const fn return_value(&self) -> Option<Value> {
        self.return_value
    }

    /// Error that ended the last run.
    pub const fn last_error(&self) -> Option<&VmError> {
        self.last_error.as_ref()
    }

    /// Values left on the stack by the last run.
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    /// Runs `chunk` to completion and reports the status.
    ///
    /// The error behind a `RuntimeError` stays available through [`Vm::last_error`].
    pub fn interpret(&mut self, chunk: &Chunk) -> InterpretResult {
        match self.execute(chunk) {
            Ok(_) => InterpretResult::Ok,
            Err(_) => InterpretResult::RuntimeError,
        }
    }

    /// Runs `chunk` to completion, returning the value popped by `OP_RETURN`.
    pub fn execute(&mut self, chunk: &Chunk) -> Result<Option<Value>, VmError> {
        self.stack.clear();
        self.return_value = None;
        self.last_error = None;
        self.state = VmState::Running;
        debug!(bytes = chunk.len(), constants = chunk.constants().len(), "interpret");

        match self.run(chunk) {
            Ok(value) => {
                self.state = VmState::HaltedOk;
                self.return_value = value;
                debug!(returned = ?value, "halted");
                Ok(value)
            }
            Err(err) => {
                self.state = VmState::HaltedError;
                error!(%err, "runtime error");
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Drops VM-owned state and returns to [`VmState::Ready`].
    pub fn free(&mut self) {
        self.stack = Vec::new();
        self.state = VmState::Ready;
        self.return_value = None;
        self.last_error = None;
    }

    fn run(&mut self, chunk: &Chunk) -> Result<Option<Value>, VmError> {
        let mut cursor = Cursor::new(chunk);
        loop {
            if self.options.trace {
                self.trace_instruction(chunk, cursor.ip);
            }

            let offset = cursor.ip;
            let byte = cursor.read_byte()?;
            let op = OpCode::try_from(byte).map_err(|_| VmError::UnknownOpcode {
                byte,
                offset,
                line: cursor.line_at(offset),
            })?;

            match op {
                OpCode::Constant => {
                    let index = usize::from(cursor.read_byte()?);
                    let value = chunk.constant_at(index).ok_or_else(|| VmError::ConstantOutOfRange {
                        index,
                        len: chunk.constants().len(),
                        offset,
                        line: cursor.line_at(offset),
                    })?;
                    self.push(value, offset, cursor.line_at(offset))?;
                }
                OpCode::Return => return Ok(self.stack.pop()),
            }
        }
    }

    fn push(&mut self, value: Value, offset: usize, line: u32) -> Result<(), VmError> {
        if let Some(max) = self.options.stack_max {
            if self.stack.len() >= max {
                return Err(VmError::StackOverflow { max, offset, line });
            }
        }
        self.stack.push(value);
        Ok(())
    }

    fn trace_instruction(&self, chunk: &Chunk, ip: usize) {
        if ip >= chunk.len() || !tracing::enabled!(target: "lox_vm::trace", tracing::Level::TRACE) {
            return;
        }
        let mut stack = String::from("          ");
        for value in &self.stack {
            let _ = write!(stack, "[ {} ]", format_value(*value));
        }
        let (instruction, _) = disassemble_instruction(chunk, ip);
        trace!(target: "lox_vm::trace", "{stack}\n{instruction}");
    }
}
