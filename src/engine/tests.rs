// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use super::*;
use crate::core::assembler::error::{CODE_CALL_RETURN, CODE_JMP_INDIRECT_PAGE};
use crate::core::expr::{Expr, SymbolMapContext};
use crate::core::operand::OperandShape;

fn engine(cpu: &str) -> Engine {
    let mut engine = Engine::default();
    engine.set_cpu(cpu).expect("known cpu");
    engine
}

fn single(mnemonic: &str, value: i64) -> Instruction {
    Instruction::new(mnemonic, OperandShape::Single(Expr::num(value)))
}

fn emit(engine: &mut Engine, instr: &Instruction, pc: u32, line: usize) -> EncodeOutcome {
    let ctx = engine.context(pc, false, Some(line)).expect("context");
    engine
        .emit(instr, &ctx, &SymbolMapContext::new())
        .expect("cpu selected")
}

#[test]
fn unknown_cpu_is_fatal() {
    let mut engine = Engine::default();
    assert!(matches!(
        engine.set_cpu("6309"),
        Err(EngineError::UnknownCpu(name)) if name == "6309"
    ));
    assert!(matches!(
        engine.decode_one(&[0xEA], 0, 0),
        Err(EngineError::NoCpuSelected)
    ));
    let ctx = EncodingContext::at(0);
    assert!(matches!(
        engine.emit(&Instruction::implied("nop"), &ctx, &SymbolMapContext::new()),
        Err(EngineError::NoCpuSelected)
    ));
}

#[test]
fn set_cpu_accepts_aliases() {
    let mut engine = Engine::default();
    assert_eq!(engine.set_cpu("MOS6502").expect("alias").as_str(), "m6502");
    assert_eq!(engine.set_cpu("sm83").expect("alias").as_str(), "gb80");
    assert_eq!(engine.cpu(), Some(CpuType::new("gb80")));
}

#[test]
fn switching_cpu_forgets_line_sizes() {
    let mut engine = engine("6502");
    assert_eq!(
        emit(&mut engine, &single("lda", 0x1234), 0, 0).bytes(),
        vec![0xAD, 0x34, 0x12]
    );

    engine.set_cpu("65c02").expect("known cpu");
    assert_eq!(emit(&mut engine, &single("lda", 0x10), 0, 0).bytes(), vec![0xA5, 0x10]);
}

#[test]
fn emit_encodes_and_records_failures() {
    let mut engine = engine("6502");
    assert_eq!(emit(&mut engine, &single("lda", 0x10), 0, 1).bytes(), vec![0xA5, 0x10]);
    assert!(engine.diagnostics().is_empty());

    let bra = single("bra", 0x0210);
    let out = emit(&mut engine, &bra, 0x0200, 2);
    assert_eq!(
        out.error().map(|err| err.kind()),
        Some(EncodeErrorKind::AddressingModeUnsupported)
    );
    let diagnostics = engine.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].line(), Some(2));
    assert_eq!(diagnostics[0].code(), "asm301");
    assert_eq!(diagnostics[0].severity(), Severity::Error);
    assert!(engine.diagnostics().is_empty());
}

#[test]
fn illegal_bitwidth_is_dropped_with_warning() {
    let mut engine = engine("6502");
    let out = emit(&mut engine, &single("lda", 0x10).with_bitwidth(24), 0, 1);
    assert_eq!(out.bytes(), vec![0xA5, 0x10]);
    let diagnostics = engine.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity(), Severity::Warning);
    assert_eq!(diagnostics[0].code(), "asm304");

    let out = emit(&mut engine, &single("lda", 0x10).with_bitwidth(16), 0, 2);
    assert_eq!(out.bytes(), vec![0xAD, 0x10, 0x00]);
    assert!(engine.diagnostics().is_empty());
}

#[test]
fn long_bitwidth_is_legal_on_65816_only() {
    let mut engine = engine("65816");
    emit(&mut engine, &single("lda", 0x10).with_bitwidth(24), 0, 1);
    assert!(engine
        .diagnostics()
        .iter()
        .all(|diag| diag.code() != "asm304"));
}

#[test]
fn ledger_keeps_line_from_shrinking() {
    let mut engine = engine("6502");
    let sta = Instruction::new("sta", OperandShape::Single(Expr::sym("later")));
    let ctx = engine.context(0, true, Some(7)).expect("context");
    let out = engine
        .emit(&sta, &ctx, &SymbolMapContext::new())
        .expect("cpu");
    assert!(out.is_deferred());
    assert_eq!(out.len(), 3);

    engine.begin_pass();
    let mut symbols = SymbolMapContext::new();
    symbols.define("later", 0x10);
    let ctx = engine.context(0, false, Some(7)).expect("context");
    let out = engine.emit(&sta, &ctx, &symbols).expect("cpu");
    assert_eq!(out.bytes(), vec![0x8D, 0x10, 0x00]);

    engine.reset();
    let ctx = engine.context(0, false, Some(7)).expect("context");
    let out = engine.emit(&sta, &ctx, &symbols).expect("cpu");
    assert_eq!(out.bytes(), vec![0x85, 0x10]);
}

#[test]
fn growing_line_marks_size_changed() {
    let mut engine = engine("6502");
    emit(&mut engine, &single("lda", 0x10), 0, 1);
    assert!(!engine.size_changed());
    emit(&mut engine, &single("lda", 0x1234), 0, 1);
    assert!(engine.size_changed());
    engine.begin_pass();
    assert!(!engine.size_changed());
}

#[test]
fn directives_reach_the_cpu() {
    let mut engine = engine("6809");
    assert!(engine.apply_directive("setdp $20").expect("cpu"));
    assert_eq!(engine.state().map(|state| state.direct_page), Some(0x20));
    assert_eq!(
        emit(&mut engine, &single("lda", 0x2010), 0, 1).bytes(),
        vec![0x96, 0x10]
    );
    assert!(!engine.apply_directive(".m16").expect("cpu"));

    assert!(engine.apply_directive("setdp $200").expect("cpu"));
    assert_eq!(engine.take_diagnostics()[0].code(), "asm302");

    engine.reset();
    assert_eq!(engine.state().map(|state| state.direct_page), Some(0));
}

#[test]
fn decode_buffer_groups_unknown_bytes() {
    let engine = engine("6502");
    let bytes = [0xA5, 0x10, 0x02, 0x12, 0xEA];
    let lines = engine.decode_lines(&bytes, 0, 0x0200, false).expect("cpu");
    let texts: Vec<&str> = lines.iter().map(|line| line.text.as_str()).collect();
    assert_eq!(texts, vec!["lda $10", ".byte $02,$12", "nop"]);
    assert_eq!(lines[1].addr, 0x0202);
    assert_eq!(lines[2].addr, 0x0204);
}

#[test]
fn decode_buffer_starts_at_offset() {
    let engine = engine("z80");
    let bytes = [0xFF, 0x00, 0x3E, 0x12];
    let lines = engine.decode_lines(&bytes, 2, 0x8000, false).expect("cpu");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].addr, 0x8000);
    assert_eq!(lines[0].bytes, vec![0x3E, 0x12]);
    assert_eq!(lines[0].text, "ld a,$12");
}

#[test]
fn suppressed_disassembly_is_all_data() {
    let mut config = EngineConfig::default();
    config.listing.bytes_per_line = 4;
    config.default_cpu = Some("6502".to_string());
    let engine = Engine::with_config(config).expect("engine");
    let bytes: Vec<u8> = (0..10).collect();
    let lines = engine.decode_lines(&bytes, 0, 0x1000, true).expect("cpu");
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line.is_data()));
    assert_eq!(lines[0].bytes.len(), 4);
    assert_eq!(lines[1].addr, 0x1004);
    assert_eq!(lines[2].text, ".byte $08,$09");

    let text = engine.decode_buffer(&bytes, 0, 0x1000, true).expect("cpu");
    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("1000    00 01 02 03"));
}

#[test]
fn pseudo_branches_fold_when_enabled() {
    let bytes = [0xB0, 0x03, 0x4C, 0x00, 0x30];
    let plain = engine("6502");
    assert_eq!(plain.decode_lines(&bytes, 0, 0x0200, false).expect("cpu").len(), 2);

    let config = EngineConfig {
        fold_pseudo_branches: true,
        default_cpu: Some("6502".to_string()),
        ..EngineConfig::default()
    };
    let folding = Engine::with_config(config).expect("engine");
    let lines = folding.decode_lines(&bytes, 0, 0x0200, false).expect("cpu");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "jcc $3000");
    assert_eq!(lines[0].bytes.len(), 5);
}

#[test]
fn analyze_suggests_tail_jumps() {
    let engine = engine("6502");
    let blocks = [CodeBlock::new(0x0200, vec![0x20, 0x00, 0x30, 0x60])];
    let diagnostics = engine.analyze(&blocks).expect("cpu");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), CODE_CALL_RETURN);
    assert_eq!(diagnostics[0].address(), Some(0x0200));
    assert!(diagnostics[0].message().contains("`jmp $3000`"));
}

#[test]
fn analyze_uses_the_cpu_jump_mnemonic() {
    let blocks = [CodeBlock::new(0, vec![0xCD, 0x00, 0x20, 0xC9])];
    let z80 = engine("z80").analyze(&blocks).expect("cpu");
    assert!(z80[0].message().ends_with("`jp $2000`"));
    let i8080 = engine("8080").analyze(&blocks).expect("cpu");
    assert!(i8080[0].message().ends_with("`jmp $2000`"));
}

#[test]
fn analyze_skips_conditional_pairs() {
    // call nz,$2000 ; ret
    let conditional_call = [CodeBlock::new(0, vec![0xC4, 0x00, 0x20, 0xC9])];
    assert!(engine("z80").analyze(&conditional_call).expect("cpu").is_empty());
    // call $2000 ; ret z
    let conditional_ret = [CodeBlock::new(0, vec![0xCD, 0x00, 0x20, 0xC8])];
    assert!(engine("z80").analyze(&conditional_ret).expect("cpu").is_empty());
}

#[test]
fn analyze_flags_indirect_jump_defect_on_nmos_only() {
    let blocks = [CodeBlock::new(0x0400, vec![0x6C, 0xFF, 0x10])];
    let diagnostics = engine("6502").analyze(&blocks).expect("cpu");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), CODE_JMP_INDIRECT_PAGE);
    assert_eq!(diagnostics[0].address(), Some(0x0400));
    assert!(engine("65c02").analyze(&blocks).expect("cpu").is_empty());

    let mut config = EngineConfig::default();
    config.analysis.jmp_indirect_bug = false;
    config.default_cpu = Some("6502".to_string());
    let quiet = Engine::with_config(config).expect("engine");
    assert!(quiet.analyze(&blocks).expect("cpu").is_empty());
}
