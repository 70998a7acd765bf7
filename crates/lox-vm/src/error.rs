use thiserror::Error;

/// Why a run ended in `InterpretResult::RuntimeError`.
///
/// Every variant is terminal for the `interpret` call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    /// Byte at the instruction pointer is not an opcode.
    #[error("[line {line}] unknown opcode {byte} at offset {offset}")]
    UnknownOpcode {
        /// Raw byte fetched.
        byte: u8,
        /// Offset of the byte.
        offset: usize,
        /// Source line of the byte.
        line: u32,
    },

    /// `OP_CONSTANT` names a slot the pool does not have.
    #[error("[line {line}] constant index {index} out of range (pool holds {len}) at offset {offset}")]
    ConstantOutOfRange {
        /// Operand fetched.
        index: usize,
        /// Size of the constant pool.
        len: usize,
        /// Offset of the `OP_CONSTANT` opcode.
        offset: usize,
        /// Source line of the instruction.
        line: u32,
    },

    /// Instruction pointer reached the end of the code without `OP_RETURN`.
    #[error("ran off the end of a {len}-byte chunk without OP_RETURN")]
    MissingReturn {
        /// Length of the chunk's code.
        len: usize,
    },

    /// Value stack reached its configured bound.
    #[error("[line {line}] stack overflow (max {max}) at offset {offset}")]
    StackOverflow {
        /// Configured stack bound.
        max: usize,
        /// Offset of the instruction that pushed.
        offset: usize,
        /// Source line of the instruction.
        line: u32,
    },
}
