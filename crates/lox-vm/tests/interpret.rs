//! End-to-end runs: chunks built through the public builder API, then interpreted.

use lox_core::{asm::assemble, validate::validate_chunk, Chunk, OpCode};
use lox_vm::{InterpretResult, Vm, VmError, VmOptions, VmState};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn test_chunk() -> Chunk {
    let mut chunk = Chunk::new();
    let constant = chunk.add_constant(1.2);
    chunk.write_op(OpCode::Constant, 1);
    chunk.write(u8::try_from(constant).unwrap(), 1);
    chunk.write_op(OpCode::Return, 2);
    chunk
}

#[test]
fn constant_then_return_is_ok() {
    let mut vm = Vm::new();
    assert_eq!(vm.interpret(&test_chunk()), InterpretResult::Ok);
    assert_eq!(vm.return_value(), Some(1.2));
}

#[test]
fn lone_return_is_ok() {
    let mut chunk = Chunk::new();
    chunk.write_op(OpCode::Return, 1);

    let mut vm = Vm::new();
    assert_eq!(vm.interpret(&chunk), InterpretResult::Ok);
    assert_eq!(vm.return_value(), None);
}

#[test]
fn single_unknown_byte_is_runtime_error() {
    let mut chunk = Chunk::new();
    chunk.write(0xAB, 1);

    let mut vm = Vm::new();
    assert_eq!(vm.interpret(&chunk), InterpretResult::RuntimeError);
    assert_eq!(vm.last_error(), Some(&VmError::UnknownOpcode { byte: 0xAB, offset: 0, line: 1 }));
}

#[test]
fn constant_without_pool_entry_or_return_is_runtime_error() {
    let mut chunk = Chunk::new();
    chunk.write_op(OpCode::Constant, 1);
    chunk.write(0, 1);

    let mut vm = Vm::new();
    assert_eq!(vm.interpret(&chunk), InterpretResult::RuntimeError);
    assert_eq!(vm.state(), VmState::HaltedError);
}

#[test]
fn falling_off_the_end_is_runtime_error() {
    let mut chunk = Chunk::new();
    chunk.write_constant(4.0, 1).unwrap();

    let mut vm = Vm::new();
    assert_eq!(vm.execute(&chunk), Err(VmError::MissingReturn { len: 2 }));
}

#[test]
fn empty_chunk_is_runtime_error() {
    let mut vm = Vm::new();
    assert_eq!(vm.interpret(&Chunk::new()), InterpretResult::RuntimeError);
}

#[test]
fn freed_chunk_is_empty_and_reusable() {
    let mut chunk = test_chunk();
    chunk.free();
    assert_eq!(chunk.len(), 0);

    chunk.write_op(OpCode::Return, 1);
    let mut vm = Vm::new();
    assert_eq!(vm.interpret(&chunk), InterpretResult::Ok);
}

#[test]
fn independent_vms_do_not_interfere() {
    let mut bad = Chunk::new();
    bad.write(200, 1);

    let mut a = Vm::new();
    let mut b = Vm::new();
    assert_eq!(a.interpret(&bad), InterpretResult::RuntimeError);
    assert_eq!(b.interpret(&test_chunk()), InterpretResult::Ok);
    assert_eq!(a.state(), VmState::HaltedError);
    assert_eq!(b.state(), VmState::HaltedOk);
}

#[test]
fn long_constant_chain_is_ok() {
    let mut chunk = Chunk::new();
    let constant = u8::try_from(chunk.add_constant(1.0)).unwrap();
    for _ in 0..1000 {
        chunk.write_op(OpCode::Constant, 1);
        chunk.write(constant, 1);
    }
    chunk.write_op(OpCode::Return, 2);

    let mut vm = Vm::new();
    assert_eq!(vm.interpret(&chunk), InterpretResult::Ok);
    assert_eq!(vm.return_value(), Some(1.0));
    assert_eq!(vm.stack().len(), 999);
}

#[test]
fn unbounded_stack_from_max_usize_runs() {
    let mut vm = Vm::with_options(VmOptions::default().with_stack_max(usize::MAX));
    assert_eq!(vm.interpret(&test_chunk()), InterpretResult::Ok);
    vm.free();
    assert_eq!(vm.state(), VmState::Ready);
}

#[test]
fn assembled_source_runs() {
    let chunk = assemble("CONSTANT 1\nCONSTANT 2\nRETURN").unwrap();
    let mut vm = Vm::new();
    assert_eq!(vm.execute(&chunk), Ok(Some(2.0)));
    assert_eq!(vm.stack(), &[1.0]);
}

proptest! {
    // The validator and the VM decode the same way: a chunk validates
    // exactly when it interprets to OK (the default stack is unbounded).
    #[test]
    fn validator_agrees_with_vm(
        bytes in proptest::collection::vec(prop_oneof![Just(0u8), Just(1u8), 0u8..4, any::<u8>()], 0..64),
        pool in 0usize..4,
    ) {
        let mut chunk = Chunk::new();
        for i in 0..pool {
            chunk.add_constant(i as f64);
        }
        for byte in &bytes {
            chunk.write(*byte, 1);
        }

        let mut vm = Vm::new();
        let status = vm.interpret(&chunk);
        prop_assert_eq!(validate_chunk(&chunk).is_ok(), status == InterpretResult::Ok);
    }
}
