// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use crate::core::assembler::error::EncodeErrorKind;
use crate::core::expr::{Expr, SymbolMapContext};
use crate::core::family::{CpuState, EncodeOutcome, EncodingContext};
use crate::core::operand::{IndexRegister, Instruction, OperandShape};
use crate::core::registry::CpuHandlerDyn;

use super::module::M6800_PROFILE;
use super::M68CpuHandler;

fn cpu() -> M68CpuHandler {
    M68CpuHandler::new(&M6800_PROFILE)
}

fn encode_at(instr: &Instruction, pc: u32) -> EncodeOutcome {
    cpu().encode(instr, &EncodingContext::at(pc), &SymbolMapContext::new())
}

fn single(mnemonic: &str, value: i64) -> Instruction {
    Instruction::new(mnemonic, OperandShape::Single(Expr::num(value)))
}

#[test]
fn accumulator_loads_pick_the_shortest_mode() {
    let imm = Instruction::new("ldaa", OperandShape::Immediate(Expr::num(0x12)));
    assert_eq!(encode_at(&imm, 0).bytes(), vec![0x86, 0x12]);
    assert_eq!(encode_at(&single("ldaa", 0x10), 0).bytes(), vec![0x96, 0x10]);
    assert_eq!(
        encode_at(&single("ldaa", 0x1234), 0).bytes(),
        vec![0xB6, 0x12, 0x34]
    );
}

#[test]
fn forced_width_selects_extended() {
    let instr = single("ldaa", 0x10).with_bitwidth(16);
    assert_eq!(encode_at(&instr, 0).bytes(), vec![0xB6, 0x00, 0x10]);
}

#[test]
fn index_register_x_only() {
    let indexed = |index| {
        Instruction::new(
            "ldaa",
            OperandShape::Indexed {
                expr: Expr::num(5),
                index,
            },
        )
    };
    assert_eq!(encode_at(&indexed(IndexRegister::X), 0).bytes(), vec![0xA6, 0x05]);
    assert_eq!(
        encode_at(&indexed(IndexRegister::Y), 0).error().map(|err| err.kind()),
        Some(EncodeErrorKind::AddressingModeUnsupported)
    );
    let decoded = cpu()
        .decode(&[0xA6, 0x05], 0, 0, &CpuState::default())
        .expect("decodes");
    assert_eq!(decoded.text, "ldaa $05,x");
}

#[test]
fn sixteen_bit_immediate_for_index_loads() {
    let instr = Instruction::new("ldx", OperandShape::Immediate(Expr::num(0x12)));
    assert_eq!(encode_at(&instr, 0).bytes(), vec![0xCE, 0x00, 0x12]);
}

#[test]
fn branches_are_relative() {
    assert_eq!(encode_at(&single("bra", 0x0110), 0x0100).bytes(), vec![0x20, 0x0E]);
    assert_eq!(encode_at(&single("bsr", 0x00F0), 0x0100).bytes(), vec![0x8D, 0xEE]);
    assert_eq!(
        encode_at(&single("bne", 0x0400), 0x0100).error().map(|err| err.kind()),
        Some(EncodeErrorKind::RelativeOffsetTooFar)
    );
}

#[test]
fn jsr_has_no_direct_form() {
    assert_eq!(encode_at(&single("jsr", 0x0010), 0).bytes(), vec![0xBD, 0x00, 0x10]);
}

#[test]
fn no_post_byte_forms_or_setdp() {
    let auto = Instruction::new(
        "ldaa",
        OperandShape::AutoIndex {
            register: IndexRegister::X,
            step: 1,
            indirect: false,
        },
    );
    assert!(encode_at(&auto, 0).error().is_some());
    let mut state = CpuState::default();
    assert_eq!(cpu().apply_directive("setdp $20", &mut state), Ok(false));
    assert_eq!(state.direct_page, 0);
}

#[test]
fn register_names() {
    assert!(super::is_register("dp"));
    assert!(super::is_register("PCR"));
    assert!(!super::is_register("hl"));
}

#[test]
fn immediates_and_byte_offsets_are_bounded() {
    let imm = |expr| Instruction::new("ldx", OperandShape::Immediate(expr));
    assert_eq!(
        encode_at(&imm(Expr::num(0x1_0000)), 0).error().map(|err| err.kind()),
        Some(EncodeErrorKind::OperandOutOfRange)
    );
    assert_eq!(
        encode_at(&imm(Expr::sym("later")), 0).error().map(|err| err.kind()),
        Some(EncodeErrorKind::Expression)
    );
    let pending = EncodingContext::at(0).with_pass_needed(true);
    let out = cpu().encode(&imm(Expr::sym("later")), &pending, &SymbolMapContext::new());
    assert!(out.is_deferred());
    assert_eq!(out.len(), 3);

    let far = Instruction::new(
        "ldaa",
        OperandShape::Indexed {
            expr: Expr::num(0x100),
            index: IndexRegister::X,
        },
    );
    assert_eq!(
        encode_at(&far, 0).error().map(|err| err.kind()),
        Some(EncodeErrorKind::OperandOutOfRange)
    );
}
