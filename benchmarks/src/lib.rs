//! Chunk fixtures shared by the benches.

use lox_core::{Chunk, OpCode};

/// `loads` times `OP_CONSTANT 0` over a one-entry pool, then `OP_RETURN`.
pub fn load_chain(loads: usize) -> Chunk {
    let mut chunk = Chunk::new();
    let index = chunk.add_constant(1.5);
    let operand = u8::try_from(index).unwrap_or_default();
    for i in 0..loads {
        let line = u32::try_from(i / 4 + 1).unwrap_or(u32::MAX);
        chunk.write_op(OpCode::Constant, line);
        chunk.write(operand, line);
    }
    chunk.write_op(OpCode::Return, u32::try_from(loads / 4 + 1).unwrap_or(u32::MAX));
    chunk
}
