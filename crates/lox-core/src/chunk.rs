//! Bytecode chunk: instruction bytes, a parallel line table and the constant pool.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{ChunkError, ChunkResult},
    memory::GrowArray,
    opcode::OpCode,
    value::{Value, ValueArray},
};

/// Unit of compiled bytecode.
///
/// `code` and `lines` always have the same length: `lines[i]` is the source
/// line that produced `code[i]`. A chunk is only ever appended to; hand it to
/// the VM once it is complete.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(try_from = "RawChunk"))]
pub struct Chunk {
    code: GrowArray<u8>,
    lines: GrowArray<u32>,
    constants: ValueArray,
}

impl Chunk {
    /// Empty chunk.
    pub const fn new() -> Self {
        Self { code: GrowArray::new(), lines: GrowArray::new(), constants: ValueArray::new() }
    }

    /// Appends one instruction byte produced by source line `line`.
    pub fn write(&mut self, byte: u8, line: u32) {
        self.code.write(byte);
        self.lines.write(line);
    }

    /// Appends an opcode byte.
    pub fn write_op(&mut self, op: OpCode, line: u32) {
        self.write(op.into(), line);
    }

    /// Adds `value` to the constant pool and returns its index.
    pub fn add_constant(&mut self, value: Value) -> usize {
        self.constants.write(value)
    }

    /// Interns `value` and emits `OP_CONSTANT index`.
    ///
    /// Fails when the pool already holds 256 constants, the most a one-byte
    /// operand can address. The constant is still added in that case.
    pub fn write_constant(&mut self, value: Value, line: u32) -> ChunkResult<u8> {
        let index = self.add_constant(value);
        let operand = u8::try_from(index).map_err(|_| ChunkError::TooManyConstants { index })?;
        self.write_op(OpCode::Constant, line);
        self.write(operand, line);
        Ok(operand)
    }

    /// Releases code, lines and constants. The chunk is empty afterwards.
    pub fn free(&mut self) {
        self.code.free();
        self.lines.free();
        self.constants.free();
    }

    /// Number of code bytes (`count`).
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// Whether no byte has been written.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Slots reserved for code bytes.
    pub fn capacity(&self) -> usize {
        self.code.capacity()
    }

    /// Instruction bytes.
    pub fn code(&self) -> &[u8] {
        self.code.as_slice()
    }

    /// Line of every instruction byte.
    pub fn lines(&self) -> &[u32] {
        self.lines.as_slice()
    }

    /// Constant pool.
    pub fn constants(&self) -> &ValueArray {
        &self.constants
    }

    /// Byte at `offset`.
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.code.get(offset).copied()
    }

    /// Source line of the byte at `offset`.
    pub fn line_at(&self, offset: usize) -> Option<u32> {
        self.lines.get(offset).copied()
    }

    /// Constant at `index`.
    pub fn constant_at(&self, index: usize) -> Option<Value> {
        self.constants.get(index)
    }
}

/// Unchecked serde shape of a [`Chunk`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawChunk {
    code: GrowArray<u8>,
    lines: GrowArray<u32>,
    constants: ValueArray,
}

#[cfg(feature = "serde")]
impl TryFrom<RawChunk> for Chunk {
    type Error = ChunkError;

    fn try_from(raw: RawChunk) -> ChunkResult<Self> {
        if raw.code.len() != raw.lines.len() {
            return Err(ChunkError::LineTableMismatch {
                code: raw.code.len(),
                lines: raw.lines.len(),
            });
        }
        Ok(Self { code: raw.code, lines: raw.lines, constants: raw.constants })
    }
}
