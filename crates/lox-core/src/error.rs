use thiserror::Error;

use crate::opcode::OpCode;

/// Errors raised while building, decoding or checking a chunk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    /// Byte that does not name any instruction.
    #[error("unknown opcode {byte} at offset {offset}")]
    UnknownOpcode {
        /// Raw byte read from the stream.
        byte: u8,
        /// Position of the byte in `code`.
        offset: usize,
    },

    /// Instruction whose operand bytes run past the end of `code`.
    #[error("{} at offset {offset} is missing its operand", .op.name())]
    TruncatedInstruction {
        /// Opcode that expected operands.
        op: OpCode,
        /// Position of the opcode in `code`.
        offset: usize,
    },

    /// Constant index with no matching entry in the pool.
    #[error("constant index {index} out of range (pool holds {len}) at offset {offset}")]
    ConstantOutOfRange {
        /// Operand read from the stream.
        index: usize,
        /// Size of the constant pool.
        len: usize,
        /// Position of the `OP_CONSTANT` opcode.
        offset: usize,
    },

    /// Instruction stream that ends without an `OP_RETURN`.
    #[error("instruction stream of {len} bytes ends without OP_RETURN")]
    MissingReturn {
        /// Length of `code`.
        len: usize,
    },

    /// `code` and `lines` disagree in length.
    #[error("line table holds {lines} entries for {code} code bytes")]
    LineTableMismatch {
        /// Length of `code`.
        code: usize,
        /// Length of `lines`.
        lines: usize,
    },

    /// Constant pool too large to be addressed by a one-byte operand.
    #[error("too many constants in one chunk (index {index} does not fit in a byte)")]
    TooManyConstants {
        /// Index the new constant received.
        index: usize,
    },

    /// Assembly source rejected.
    #[error("line {line}: {message}")]
    Asm {
        /// 1-based line in the assembly text.
        line: u32,
        /// What went wrong.
        message: String,
    },
}

impl ChunkError {
    /// Builds an assembler error.
    pub fn asm(line: u32, message: impl Into<String>) -> Self {
        Self::Asm { line, message: message.into() }
    }
}

/// Alias résultat commun au core.
pub type ChunkResult<T> = Result<T, ChunkError>;
