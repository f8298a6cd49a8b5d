// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

mod common;

use multiasm::config::EngineConfig;
use multiasm::core::assembler::error::{EncodeErrorKind, EngineError};
use multiasm::core::expr::{Expr, SymbolMapContext};
use multiasm::core::operand::{IndexRegister, Instruction, OperandShape};
use multiasm::Engine;

use common::{assemble, instr, label, op, op_num, op_sym, Line};

fn engine(cpu: &str) -> Engine {
    let mut engine = Engine::default();
    engine.set_cpu(cpu).expect("known cpu");
    engine
}

fn encode(engine: &mut Engine, instruction: &Instruction, pc: u32) -> Vec<u8> {
    let ctx = engine.context(pc, false, None).expect("context");
    engine
        .emit(instruction, &ctx, &SymbolMapContext::new())
        .expect("cpu")
        .bytes()
}

fn single(mnemonic: &str, value: i64) -> Instruction {
    Instruction::new(mnemonic, OperandShape::Single(Expr::num(value)))
}

#[test]
fn zero_page_operand_uses_short_form() {
    let mut engine = engine("6502");
    assert_eq!(encode(&mut engine, &single("lda", 0x10), 0x0200), vec![0xA5, 0x10]);
}

#[test]
fn wide_operand_uses_absolute_form() {
    let mut engine = engine("6502");
    assert_eq!(
        encode(&mut engine, &single("lda", 0x1234), 0x0200),
        vec![0xAD, 0x34, 0x12]
    );
}

#[test]
fn forward_branch_resolves_and_decodes_back() {
    let mut engine = engine("6502");
    let mut program = vec![op_sym("bne", "skip")];
    program.extend((0..8).map(|_| op("nop")));
    program.push(label("skip"));
    let out = assemble(&mut engine, 0x0200, &program, 8).expect("converges");
    assert_eq!(&out.bytes[..2], &[0xD0, 0x08]);
    assert_eq!(out.labels["skip"], 0x020A);

    let decoded = engine
        .decode_one(&[0xD0, 0x08], 0, 0x0200)
        .expect("cpu")
        .expect("known opcode");
    assert_eq!(decoded.size, 2);
    assert_eq!(decoded.target(), Some(0x020A));
    assert_eq!(decoded.text, "bne $020A");
}

#[test]
fn bra_needs_a_cmos_cpu() {
    let mut nmos = engine("6502");
    let ctx = nmos.context(0x0200, false, Some(1)).expect("context");
    let out = nmos
        .emit(&single("bra", 0x0210), &ctx, &SymbolMapContext::new())
        .expect("cpu");
    assert_eq!(
        out.error().map(|err| err.kind()),
        Some(EncodeErrorKind::AddressingModeUnsupported)
    );

    let mut cmos = engine("65c02");
    assert_eq!(
        encode(&mut cmos, &single("bra", 0x0210), 0x0200),
        vec![0x80, 0x0E]
    );
}

#[test]
fn branch_reach_is_127_forward_and_128_back() {
    let mut engine = engine("65c02");
    let pc = 0x1000u32;
    let next = i64::from(pc) + 2;
    assert_eq!(encode(&mut engine, &single("bra", next + 127), pc), vec![0x80, 0x7F]);
    assert_eq!(encode(&mut engine, &single("bra", next - 128), pc), vec![0x80, 0x80]);

    for target in [next + 128, next - 129] {
        let ctx = engine.context(pc, false, None).expect("context");
        let out = engine
            .emit(&single("bra", target), &ctx, &SymbolMapContext::new())
            .expect("cpu");
        assert_eq!(
            out.error().map(|err| err.kind()),
            Some(EncodeErrorKind::RelativeOffsetTooFar)
        );
    }
}

#[test]
fn derived_layer_shadows_base_entries() {
    // 65C02 adds `(zp)` to LDA and gives JMP an `(abs,x)` form.
    let mut nmos = engine("6502");
    let mut cmos = engine("65c02");
    let lda = Instruction::new(
        "lda",
        OperandShape::Indirect {
            expr: Expr::num(0x20),
            long: false,
        },
    );
    assert!(nmos
        .emit(&lda, &nmos.context(0, false, None).expect("ctx"), &SymbolMapContext::new())
        .expect("cpu")
        .error()
        .is_some());
    assert_eq!(encode(&mut cmos, &lda, 0), vec![0xB2, 0x20]);

    // Undocumented opcodes exist only in the 6502i layer.
    let mut illegal = engine("6502i");
    assert_eq!(encode(&mut illegal, &single("lax", 0x10), 0), vec![0xA7, 0x10]);
    assert!(nmos.decode_one(&[0xA7, 0x10], 0, 0).expect("cpu").is_none());
}

#[test]
fn forward_reference_keeps_its_first_size() {
    let mut engine = engine("6502");
    let program = vec![op_sym("lda", "data"), op("nop"), label("data")];
    let out = assemble(&mut engine, 0x0000, &program, 8).expect("converges");
    assert_eq!(out.bytes, vec![0xAD, 0x04, 0x00, 0xEA]);
    assert!(out.passes >= 2);
    assert!(out.diagnostics.is_empty());
}

#[test]
fn backward_reference_takes_zero_page() {
    let mut engine = engine("6502");
    let program = vec![label("here"), op_sym("lda", "here")];
    let out = assemble(&mut engine, 0x0010, &program, 8).expect("converges");
    assert_eq!(out.bytes, vec![0xA5, 0x10]);
}

#[test]
fn pass_cap_reports_non_convergence() {
    let mut engine = engine("6502");
    let program = vec![op_sym("jmp", "later"), label("later")];
    assert!(matches!(
        assemble(&mut engine, 0, &program, 1),
        Err(EngineError::NonConvergent(1))
    ));
}

#[test]
fn unresolved_symbol_on_final_pass_is_an_error() {
    let mut engine = engine("z80");
    let program = vec![instr(Instruction::new(
        "jp",
        OperandShape::Single(Expr::sym("nowhere")),
    ))];
    let out = assemble(&mut engine, 0, &program, 4).expect("converges");
    assert!(out.bytes.is_empty());
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].code(), "asm401");
}

#[test]
fn long_branch_promotion_converges_on_6809() {
    let mut engine = engine("6809");
    let mut program: Vec<Line> = vec![op_sym("bne", "far")];
    program.extend((0..200).map(|_| op("nop")));
    program.push(label("far"));
    let out = assemble(&mut engine, 0x1000, &program, 8).expect("converges");
    assert_eq!(&out.bytes[..4], &[0x10, 0x26, 0x00, 0xC8]);
    assert_eq!(out.labels["far"], 0x1000 + 4 + 200);
}

#[test]
fn default_engine_takes_the_long_branch_slot() {
    let mut m6809 = engine("6809");
    assert_eq!(
        encode(&mut m6809, &single("bne", 0x1000 + 2 + 128), 0x1000),
        vec![0x10, 0x26, 0x00, 0x7E]
    );
    let mut m65816 = engine("65816");
    assert_eq!(
        encode(&mut m65816, &single("bra", 0x0200 + 200), 0x0200),
        vec![0x82, 0xC5, 0x00]
    );

    let config = EngineConfig {
        promote_long_branches: false,
        default_cpu: Some("6809".to_string()),
        ..EngineConfig::default()
    };
    let mut short_only = Engine::with_config(config).expect("engine");
    let ctx = short_only.context(0x1000, false, None).expect("context");
    let out = short_only
        .emit(&single("bne", 0x1000 + 2 + 128), &ctx, &SymbolMapContext::new())
        .expect("cpu");
    assert_eq!(
        out.error().map(|err| err.kind()),
        Some(EncodeErrorKind::RelativeOffsetTooFar)
    );
}

#[test]
fn direct_page_directive_applies_between_lines() {
    let mut engine = engine("6809");
    let program = vec![
        op_num("lda", 0x2010),
        Line::Directive("setdp $20"),
        op_num("lda", 0x2010),
    ];
    let out = assemble(&mut engine, 0, &program, 4).expect("converges");
    assert_eq!(out.bytes, vec![0xB6, 0x20, 0x10, 0x96, 0x10]);
}

#[test]
fn z80_program_with_relative_loop() {
    let mut engine = engine("z80");
    let program = vec![
        label("loop"),
        instr(Instruction::new(
            "djnz",
            OperandShape::Single(Expr::sym("loop")),
        )),
        op("ret"),
    ];
    let out = assemble(&mut engine, 0x8000, &program, 4).expect("converges");
    assert_eq!(out.bytes, vec![0x10, 0xFE, 0xC9]);
}

#[test]
fn indexed_modes_pick_zero_page_first() {
    let mut engine = engine("6502");
    let lda_x = |value| {
        Instruction::new(
            "lda",
            OperandShape::Indexed {
                expr: Expr::num(value),
                index: IndexRegister::X,
            },
        )
    };
    assert_eq!(encode(&mut engine, &lda_x(0x80), 0), vec![0xB5, 0x80]);
    assert_eq!(encode(&mut engine, &lda_x(0x180), 0), vec![0xBD, 0x80, 0x01]);
}

#[test]
fn decode_buffer_renders_listing_text() {
    let engine = engine("6502");
    let text = engine
        .decode_buffer(&[0xA9, 0x01, 0x8D, 0x00, 0x02, 0xFF], 0, 0xC000, false)
        .expect("cpu");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("C000    A9 01"));
    assert!(lines[0].ends_with("lda #$01"));
    assert!(lines[1].ends_with("sta $0200"));
    assert!(lines[2].ends_with(".byte $FF"));
}
