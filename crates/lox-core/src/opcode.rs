//! Instruction set.
//!
//! Each instruction is one opcode byte followed by `operand_len()` operand
//! bytes. Decoding goes through [`OpCode::try_from`]; every `match` on
//! `OpCode` is exhaustive, so a new variant has to be handled by the VM, the
//! disassembler, the validator and the assembler before the crate builds.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ChunkError;

/// One-byte operation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum OpCode {
    /// Ends execution of the chunk.
    Return = 0,
    /// Loads the constant whose index is the next byte.
    Constant = 1,
}

impl OpCode {
    /// Every opcode, in byte order.
    pub const ALL: [OpCode; 2] = [OpCode::Return, OpCode::Constant];

    /// Name used in listings.
    pub const fn name(self) -> &'static str {
        match self {
            OpCode::Return => "OP_RETURN",
            OpCode::Constant => "OP_CONSTANT",
        }
    }

    /// Number of operand bytes following the opcode.
    pub const fn operand_len(self) -> usize {
        match self {
            OpCode::Return => 0,
            OpCode::Constant => 1,
        }
    }

    /// Decodes the byte found at `offset` in a code stream.
    pub fn decode_at(byte: u8, offset: usize) -> Result<Self, ChunkError> {
        Self::try_from(byte).map_err(|_| ChunkError::UnknownOpcode { byte, offset })
    }

    /// Looks an opcode up by mnemonic, with or without the `OP_` prefix.
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        let upper = text.to_ascii_uppercase();
        let bare = upper.strip_prefix("OP_").unwrap_or(&upper);
        Self::ALL.into_iter().find(|op| &op.name()[3..] == bare)
    }
}

impl From<OpCode> for u8 {
    fn from(op: OpCode) -> Self {
        op as u8
    }
}

impl TryFrom<u8> for OpCode {
    type Error = ChunkError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0 => Ok(OpCode::Return),
            1 => Ok(OpCode::Constant),
            _ => Err(ChunkError::UnknownOpcode { byte, offset: 0 }),
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
