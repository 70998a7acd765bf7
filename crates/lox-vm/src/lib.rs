//! lox-vm — exécution des chunks Lox
//!
//! - `Vm`: explicit interpreter instance (no global state), fetch/decode/dispatch loop
//! - `VmOptions`: trace switch and stack bound, from code or the environment
//! - `InterpretResult`: status returned to the host
//! - `VmError`: why a run stopped with `InterpretResult::RuntimeError`
//!
//! ```
//! use lox_core::{Chunk, OpCode};
//! use lox_vm::{InterpretResult, Vm};
//!
//! let mut chunk = Chunk::new();
//! chunk.write_constant(1.2, 1).unwrap();
//! chunk.write_op(OpCode::Return, 2);
//!
//! let mut vm = Vm::new();
//! assert_eq!(vm.interpret(&chunk), InterpretResult::Ok);
//! assert_eq!(vm.return_value(), Some(1.2));
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

mod error;
mod options;
mod vm;

pub use error::VmError;
pub use options::{VmOptions, STACK_INITIAL};
pub use vm::{Vm, VmState};

/* ------------------------------ Résultat ------------------------------ */

/// Outcome of one `interpret` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterpretResult {
    /// The chunk reached `OP_RETURN`.
    Ok,
    /// Reserved for a compiler stage chained before execution. The VM never
    /// produces it.
    CompileError,
    /// Execution stopped on a malformed instruction stream.
    RuntimeError,
}

impl InterpretResult {
    /// Whether the run succeeded.
    pub const fn is_ok(self) -> bool {
        matches!(self, InterpretResult::Ok)
    }

    /// Process exit status for hosts (sysexits: 65 data error, 70 software error).
    pub const fn exit_code(self) -> u8 {
        match self {
            InterpretResult::Ok => 0,
            InterpretResult::CompileError => 65,
            InterpretResult::RuntimeError => 70,
        }
    }
}

/// Prelude pratique pour importer d’un coup.
pub mod prelude {
    pub use crate::{InterpretResult, Vm, VmError, VmOptions, VmState};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(InterpretResult::Ok.exit_code(), 0);
        assert_eq!(InterpretResult::CompileError.exit_code(), 65);
        assert_eq!(InterpretResult::RuntimeError.exit_code(), 70);
        assert!(InterpretResult::Ok.is_ok());
        assert!(!InterpretResult::CompileError.is_ok());
    }
}
