//! Textual disassembly, used by the CLI listings and the VM execution trace.

use core::fmt::Write;

use crate::{chunk::Chunk, opcode::OpCode, value::format_value};

/// Full listing: a `== name ==` header then one line per instruction.
pub fn disassemble_chunk(chunk: &Chunk, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {name} ==");

    let mut offset = 0;
    while offset < chunk.len() {
        let (line, next) = disassemble_instruction(chunk, offset);
        let _ = writeln!(out, "{line}");
        offset = next;
    }
    out
}

/// Renders the instruction at `offset` and returns it with the next offset.
///
/// ```text
/// 0000    1 OP_CONSTANT         0 '1.2'
/// 0002    2 OP_RETURN
/// ```
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> (String, usize) {
    let mut out = String::new();
    let _ = write!(out, "{offset:04} ");

    let line = chunk.line_at(offset).unwrap_or_default();
    if offset > 0 && chunk.line_at(offset - 1) == Some(line) {
        out.push_str("   | ");
    } else {
        let _ = write!(out, "{line:4} ");
    }

    let Some(byte) = chunk.byte_at(offset) else {
        out.push_str("<end>");
        return (out, offset);
    };

    let next = match OpCode::try_from(byte) {
        Ok(op @ OpCode::Return) => simple_instruction(&mut out, op, offset),
        Ok(op @ OpCode::Constant) => constant_instruction(&mut out, op, chunk, offset),
        Err(_) => {
            let _ = write!(out, "Unknown opcode {byte}");
            offset + 1
        }
    };
    (out, next)
}

fn simple_instruction(out: &mut String, op: OpCode, offset: usize) -> usize {
    out.push_str(op.name());
    offset + 1
}

fn constant_instruction(out: &mut String, op: OpCode, chunk: &Chunk, offset: usize) -> usize {
    let Some(index) = chunk.byte_at(offset + 1) else {
        let _ = write!(out, "{:<16} <truncated>", op.name());
        return chunk.len();
    };
    let _ = write!(out, "{:<16} {index:4} ", op.name());
    match chunk.constant_at(usize::from(index)) {
        Some(value) => {
            let _ = write!(out, "'{}'", format_value(value));
        }
        None => out.push_str("<out of range>"),
    }
    offset + 2
}
