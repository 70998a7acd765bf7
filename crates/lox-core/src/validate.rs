//! Structural validation of a finished chunk.

use crate::{
    chunk::Chunk,
    error::{ChunkError, ChunkResult},
    opcode::OpCode,
};

/// Walks `chunk` with the VM's decoding rules, without executing anything.
///
/// The walk stops at the first `OP_RETURN`; bytes after it are never
/// reached by the VM and are not inspected. A chunk that passes interprets
/// without a decoding error.
pub fn validate_chunk(chunk: &Chunk) -> ChunkResult<()> {
    let code = chunk.code();
    if code.len() != chunk.lines().len() {
        return Err(ChunkError::LineTableMismatch { code: code.len(), lines: chunk.lines().len() });
    }

    let mut offset = 0;
    while offset < code.len() {
        let op = OpCode::decode_at(code[offset], offset)?;
        let next = offset + 1 + op.operand_len();
        if next > code.len() {
            return Err(ChunkError::TruncatedInstruction { op, offset });
        }

        match op {
            OpCode::Return => return Ok(()),
            OpCode::Constant => {
                let index = usize::from(code[offset + 1]);
                let len = chunk.constants().len();
                if index >= len {
                    return Err(ChunkError::ConstantOutOfRange { index, len, offset });
                }
            }
        }
        offset = next;
    }

    Err(ChunkError::MissingReturn { len: code.len() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_of(bytes: &[u8], constants: &[f64]) -> Chunk {
        let mut chunk = Chunk::new();
        for value in constants {
            chunk.add_constant(*value);
        }
        for byte in bytes {
            chunk.write(*byte, 1);
        }
        chunk
    }

    #[test]
    fn accepts_constant_then_return() {
        assert_eq!(validate_chunk(&chunk_of(&[1, 0, 0], &[1.2])), Ok(()));
    }

    #[test]
    fn accepts_lone_return() {
        assert_eq!(validate_chunk(&chunk_of(&[0], &[])), Ok(()));
    }

    #[test]
    fn ignores_bytes_after_return() {
        assert_eq!(validate_chunk(&chunk_of(&[0, 0xFF, 0xFF], &[])), Ok(()));
    }

    #[test]
    fn rejects_unknown_opcode() {
        assert_eq!(
            validate_chunk(&chunk_of(&[1, 0, 42], &[1.0])),
            Err(ChunkError::UnknownOpcode { byte: 42, offset: 2 })
        );
    }

    #[test]
    fn rejects_out_of_range_constant() {
        assert_eq!(
            validate_chunk(&chunk_of(&[1, 3, 0], &[1.0])),
            Err(ChunkError::ConstantOutOfRange { index: 3, len: 1, offset: 0 })
        );
    }

    #[test]
    fn rejects_truncated_operand() {
        assert_eq!(
            validate_chunk(&chunk_of(&[1], &[1.0])),
            Err(ChunkError::TruncatedInstruction { op: OpCode::Constant, offset: 0 })
        );
    }

    #[test]
    fn rejects_missing_return() {
        assert_eq!(validate_chunk(&chunk_of(&[], &[])), Err(ChunkError::MissingReturn { len: 0 }));
        assert_eq!(
            validate_chunk(&chunk_of(&[1, 0], &[2.0])),
            Err(ChunkError::MissingReturn { len: 2 })
        );
    }
}
