//! lox-core — primitives partagées du bytecode Lox
//!
//! Provides:
//! - `GrowArray<T>`: amortised growable sequence (capacity 8, then doubling)
//! - `Value` + `ValueArray`: the constant pool
//! - `OpCode`: closed instruction set, decoded from raw bytes
//! - `Chunk`: code bytes, parallel line table, owned constants
//! - `validate_chunk`, `disassemble_*`, `assemble`: tooling over a finished chunk
//!
//! Features:
//! - `serde`: derive (de)serialisation on the chunk structures

#![deny(missing_docs)]

/* ─────────────────────────── Modules publics ─────────────────────────── */

/// Textual assembler producing chunks.
pub mod asm;
/// Chunk of bytecode with its line table and constants.
pub mod chunk;
/// Human-readable chunk listings.
pub mod disasm;
/// Error type shared by the chunk tooling.
pub mod error;
/// Generic growable array.
pub mod memory;
/// Instruction set.
pub mod opcode;
/// Structural checks over a chunk.
pub mod validate;
/// Constant values and the constant pool.
pub mod value;

pub use chunk::Chunk;
pub use error::{ChunkError, ChunkResult};
pub use memory::GrowArray;
pub use opcode::OpCode;
pub use value::{Value, ValueArray};

/* ─────────────────────────── Prélude ─────────────────────────── */

/// Prélude pratique pour importer les types/funcs clés du crate.
pub mod prelude {
    pub use super::{
        asm::assemble,
        disasm::{disassemble_chunk, disassemble_instruction},
        validate::validate_chunk,
        Chunk, ChunkError, ChunkResult, GrowArray, OpCode, Value, ValueArray,
    };
}
