// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use crate::core::assembler::error::EncodeErrorKind;
use crate::core::expr::{Expr, SymbolMapContext};
use crate::core::family::{CpuState, EncodeOutcome, EncodingContext};
use crate::core::operand::{Arg, Instruction, OperandShape};
use crate::core::registry::CpuHandlerDyn;
use crate::families::intel8080::I80CpuHandler;

use super::module::Z80_PROFILE;

fn cpu() -> I80CpuHandler {
    I80CpuHandler::new(&Z80_PROFILE)
}

fn reg(name: &str) -> Arg {
    Arg::Register(name.to_string())
}

fn ind(name: &str) -> Arg {
    Arg::RegisterIndirect(name.to_string())
}

fn num(value: i64) -> Arg {
    Arg::Expr(Expr::num(value))
}

fn indexed(register: &str, displacement: i64) -> Arg {
    Arg::IndexDisplacement {
        register: register.to_string(),
        displacement: Expr::num(displacement),
    }
}

fn instr(mnemonic: &str, args: Vec<Arg>) -> Instruction {
    if args.is_empty() {
        Instruction::implied(mnemonic)
    } else {
        Instruction::new(mnemonic, OperandShape::Args(args))
    }
}

fn encode_at(instr: &Instruction, pc: u32) -> EncodeOutcome {
    cpu().encode(instr, &EncodingContext::at(pc), &SymbolMapContext::new())
}

fn bytes(mnemonic: &str, args: Vec<Arg>) -> Vec<u8> {
    encode_at(&instr(mnemonic, args), 0).bytes()
}

fn decode_text(bytes: &[u8], pc: u32) -> String {
    cpu()
        .decode(bytes, 0, pc, &CpuState::default())
        .expect("decodes")
        .text
}

#[test]
fn register_and_immediate_loads() {
    assert_eq!(bytes("ld", vec![reg("a"), num(5)]), vec![0x3E, 0x05]);
    assert_eq!(bytes("ld", vec![reg("b"), reg("c")]), vec![0x41]);
    assert_eq!(bytes("ld", vec![reg("hl"), num(0x1234)]), vec![0x21, 0x34, 0x12]);
    assert_eq!(
        bytes("ld", vec![reg("hl"), Arg::Indirect(Expr::num(0x1234))]),
        vec![0x2A, 0x34, 0x12]
    );
    assert_eq!(
        bytes("ld", vec![reg("bc"), Arg::Indirect(Expr::num(0x1234))]),
        vec![0xED, 0x4B, 0x34, 0x12]
    );
    assert_eq!(bytes("ex", vec![reg("af"), reg("af'")]), vec![0x08]);
    assert_eq!(
        encode_at(&instr("ld", vec![reg("a"), num(0x100)]), 0)
            .error()
            .map(|err| err.kind()),
        Some(EncodeErrorKind::OperandOutOfRange)
    );
}

#[test]
fn accumulator_operand_is_optional_for_logic_ops() {
    assert_eq!(bytes("sub", vec![reg("b")]), vec![0x90]);
    assert_eq!(bytes("sub", vec![reg("a"), reg("b")]), vec![0x90]);
    assert_eq!(bytes("add", vec![reg("a"), num(1)]), vec![0xC6, 0x01]);
    assert_eq!(decode_text(&[0x90], 0), "sub b");
}

#[test]
fn indexed_forms() {
    let out = bytes("ld", vec![indexed("ix", 5), num(0x12)]);
    assert_eq!(out, vec![0xDD, 0x36, 0x05, 0x12]);
    assert_eq!(decode_text(&out, 0), "ld (ix+$05),$12");
    assert_eq!(bytes("ld", vec![reg("a"), ind("ix")]), vec![0xDD, 0x7E, 0x00]);
    assert_eq!(bytes("jp", vec![ind("iy")]), vec![0xFD, 0xE9]);
    assert_eq!(bytes("push", vec![reg("ix")]), vec![0xDD, 0xE5]);
    assert_eq!(bytes("ld", vec![reg("ixh"), num(0x12)]), vec![0xDD, 0x26, 0x12]);
    assert_eq!(bytes("ld", vec![reg("a"), reg("iyl")]), vec![0xFD, 0x7D]);
}

#[test]
fn displacement_sits_before_the_final_cb_opcode() {
    let out = bytes("bit", vec![num(3), indexed("iy", -2)]);
    assert_eq!(out, vec![0xFD, 0xCB, 0xFE, 0x5E]);
    assert_eq!(decode_text(&out, 0), "bit 3,(iy-$02)");
    assert_eq!(
        bytes("rlc", vec![indexed("ix", 1)]),
        vec![0xDD, 0xCB, 0x01, 0x06]
    );
    assert_eq!(bytes("set", vec![num(7), reg("a")]), vec![0xCB, 0xFF]);
}

#[test]
fn relative_jumps() {
    let jr = instr("jr", vec![reg("nz"), num(0x0110)]);
    assert_eq!(encode_at(&jr, 0x0100).bytes(), vec![0x20, 0x0E]);
    let far = instr("jr", vec![reg("nz"), num(0x0200)]);
    assert_eq!(
        encode_at(&far, 0x0100).error().map(|err| err.kind()),
        Some(EncodeErrorKind::RelativeOffsetTooFar)
    );
    let djnz = instr("djnz", vec![num(0x00FE)]);
    assert_eq!(encode_at(&djnz, 0x0100).bytes(), vec![0x10, 0xFC]);
    assert_eq!(decode_text(&[0x10, 0xFC], 0x0100), "djnz $00FE");
}

#[test]
fn literal_operands_select_the_opcode() {
    assert_eq!(bytes("im", vec![num(1)]), vec![0xED, 0x56]);
    assert_eq!(bytes("rst", vec![num(0x38)]), vec![0xFF]);
    assert_eq!(decode_text(&[0xFF], 0), "rst $38");
    assert_eq!(
        encode_at(&instr("im", vec![num(3)]), 0).error().map(|err| err.kind()),
        Some(EncodeErrorKind::AddressingModeUnsupported)
    );
}

#[test]
fn ports() {
    assert_eq!(
        bytes("in", vec![reg("a"), Arg::Indirect(Expr::num(0xFE))]),
        vec![0xDB, 0xFE]
    );
    assert_eq!(bytes("out", vec![ind("c"), reg("a")]), vec![0xED, 0x79]);
}

#[test]
fn forward_reference_defers_with_full_width() {
    let jp = instr("jp", vec![Arg::Expr(Expr::sym("later"))]);
    let ctx = EncodingContext::at(0).with_pass_needed(true);
    let out = cpu().encode(&jp, &ctx, &SymbolMapContext::new());
    assert!(out.is_deferred());
    assert_eq!(out.len(), 3);
}

#[test]
fn condition_names_parsed_as_expressions() {
    let ret = Instruction::new("ret", OperandShape::Single(Expr::sym("nc")));
    assert_eq!(encode_at(&ret, 0).bytes(), vec![0xD0]);
}

#[test]
fn displacements_and_immediates_are_bounded() {
    let err = |instr: &Instruction| encode_at(instr, 0).error().map(|err| err.kind());
    assert_eq!(
        bytes("ld", vec![reg("a"), indexed("ix", -128)]),
        vec![0xDD, 0x7E, 0x80]
    );
    assert_eq!(
        err(&instr("ld", vec![reg("a"), indexed("ix", 128)])),
        Some(EncodeErrorKind::OperandOutOfRange)
    );
    assert_eq!(
        err(&instr("ld", vec![reg("hl"), num(0x1_0000)])),
        Some(EncodeErrorKind::OperandOutOfRange)
    );

    let later = Arg::IndexDisplacement {
        register: "iy".to_string(),
        displacement: Expr::sym("later"),
    };
    let load = instr("ld", vec![reg("a"), later]);
    assert_eq!(err(&load), Some(EncodeErrorKind::Expression));
    let ctx = EncodingContext::at(0).with_pass_needed(true);
    let out = cpu().encode(&load, &ctx, &SymbolMapContext::new());
    assert!(out.is_deferred());
    assert_eq!(out.len(), 3);
}
