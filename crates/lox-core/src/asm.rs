//! Small assembler so hosts can build chunks without a compiler.
//!
//! ```text
//! ; the classic test chunk
//! CONSTANT 1.2
//! RETURN
//! ```
//!
//! - `CONSTANT <number>` adds a constant and emits `OP_CONSTANT <index>`.
//! - `RETURN` emits `OP_RETURN`.
//! - `BYTE <0-255>` emits a raw byte (handy for malformed-chunk experiments).
//! - Mnemonics are case-insensitive and accept the `OP_` prefix.
//! - `;` starts a comment. The text line number becomes the chunk line.

use crate::{
    chunk::Chunk,
    error::{ChunkError, ChunkResult},
    opcode::OpCode,
    value::Value,
};

/// Assemble a source snippet into a [`Chunk`].
pub fn assemble(source: &str) -> ChunkResult<Chunk> {
    let mut chunk = Chunk::new();

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        let line = raw_line.split(';').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let mnemonic = parts.next().unwrap_or_default();
        let operand = parts.next();
        if let Some(extra) = parts.next() {
            return Err(ChunkError::asm(line_no, format!("unexpected `{extra}`")));
        }

        if mnemonic.eq_ignore_ascii_case("BYTE") {
            let byte = parse_operand::<u8>(operand, line_no, "a byte (0-255)")?;
            chunk.write(byte, line_no);
            continue;
        }

        let Some(op) = OpCode::from_mnemonic(mnemonic) else {
            return Err(ChunkError::asm(line_no, format!("unsupported instruction `{mnemonic}`")));
        };

        match op {
            OpCode::Return => {
                if let Some(extra) = operand {
                    return Err(ChunkError::asm(line_no, format!("RETURN takes no operand, got `{extra}`")));
                }
                chunk.write_op(op, line_no);
            }
            OpCode::Constant => {
                let value = parse_operand::<Value>(operand, line_no, "a number")?;
                chunk
                    .write_constant(value, line_no)
                    .map_err(|err| ChunkError::asm(line_no, err.to_string()))?;
            }
        }
    }

    Ok(chunk)
}

fn parse_operand<T: core::str::FromStr>(operand: Option<&str>, line: u32, expected: &str) -> ChunkResult<T> {
    let text = operand.ok_or_else(|| ChunkError::asm(line, format!("expected {expected}")))?;
    text.parse::<T>()
        .map_err(|_| ChunkError::asm(line, format!("expected {expected}, got `{text}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn assembles_test_chunk() {
        let chunk = assemble("CONSTANT 1.2\nRETURN\n").unwrap();
        assert_eq!(chunk.code(), &[1, 0, 0]);
        assert_eq!(chunk.lines(), &[1, 1, 2]);
        assert_eq!(chunk.constant_at(0), Some(1.2));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let src = "; header\n\n  op_constant 2 ; two\nreturn\n";
        let chunk = assemble(src).unwrap();
        assert_eq!(chunk.code(), &[1, 0, 0]);
        assert_eq!(chunk.lines(), &[3, 3, 4]);
    }

    #[test]
    fn raw_bytes() {
        let chunk = assemble("BYTE 7\nbyte 0").unwrap();
        assert_eq!(chunk.code(), &[7, 0]);
    }

    #[test]
    fn reports_line_of_error() {
        assert_eq!(
            assemble("RETURN\nPUSH 1").unwrap_err(),
            ChunkError::asm(2, "unsupported instruction `PUSH`")
        );
        assert_eq!(
            assemble("CONSTANT abc").unwrap_err(),
            ChunkError::asm(1, "expected a number, got `abc`")
        );
        assert_eq!(assemble("BYTE").unwrap_err(), ChunkError::asm(1, "expected a byte (0-255)"));
        assert_eq!(assemble("BYTE 300").unwrap_err().to_string(), "line 1: expected a byte (0-255), got `300`");
        assert_eq!(assemble("RETURN 1").unwrap_err(), ChunkError::asm(1, "RETURN takes no operand, got `1`"));
    }

    #[test]
    fn too_many_constants_is_an_asm_error() {
        let src = "CONSTANT 1\n".repeat(257);
        let err = assemble(&src).unwrap_err();
        assert!(matches!(err, ChunkError::Asm { line: 257, .. }), "{err:?}");
    }
}
