// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Minimal multi-pass driver over the engine.

#![allow(dead_code)]

use std::collections::HashMap;

use multiasm::core::assembler::error::{Diagnostic, EngineError};
use multiasm::core::expr::{Expr, SymbolMapContext};
use multiasm::core::operand::{Instruction, OperandShape};
use multiasm::Engine;

/// One source line as the parser would hand it over.
#[derive(Debug, Clone)]
pub enum Line {
    Label(&'static str),
    Instr(Instruction),
    Directive(&'static str),
}

pub fn label(name: &'static str) -> Line {
    Line::Label(name)
}

pub fn op(mnemonic: &str) -> Line {
    Line::Instr(Instruction::implied(mnemonic))
}

pub fn op_num(mnemonic: &str, value: i64) -> Line {
    Line::Instr(Instruction::new(mnemonic, OperandShape::Single(Expr::num(value))))
}

pub fn op_sym(mnemonic: &str, name: &str) -> Line {
    Line::Instr(Instruction::new(mnemonic, OperandShape::Single(Expr::sym(name))))
}

pub fn instr(instruction: Instruction) -> Line {
    Line::Instr(instruction)
}

#[derive(Debug)]
pub struct Assembled {
    pub bytes: Vec<u8>,
    pub labels: HashMap<String, i64>,
    pub passes: usize,
    pub diagnostics: Vec<Diagnostic>,
}

struct PassResult {
    bytes: Vec<u8>,
    labels: HashMap<String, i64>,
}

fn run_pass(
    engine: &mut Engine,
    origin: u32,
    program: &[Line],
    known: &HashMap<String, i64>,
    pass_needed: bool,
) -> Result<PassResult, EngineError> {
    let mut symbols = SymbolMapContext::new();
    for (name, value) in known {
        symbols.define(name.clone(), *value);
    }
    let mut labels = HashMap::new();
    let mut bytes = Vec::new();
    let mut pc = origin;

    for (line_no, line) in program.iter().enumerate() {
        match line {
            Line::Label(name) => {
                labels.insert(name.to_string(), i64::from(pc));
                symbols.define(*name, i64::from(pc));
            }
            Line::Directive(text) => {
                engine.apply_directive(text)?;
            }
            Line::Instr(instruction) => {
                symbols.set_address(i64::from(pc));
                let ctx = engine.context(pc, pass_needed, Some(line_no))?;
                let emitted = engine.emit(instruction, &ctx, &symbols)?.bytes();
                pc = pc.wrapping_add(emitted.len() as u32);
                bytes.extend(emitted);
            }
        }
    }
    Ok(PassResult { bytes, labels })
}

/// Assemble until label values and line sizes stop moving, then run one
/// final pass with no further passes allowed. Symbols still undefined at
/// that point surface as errors. Gives up after `max_passes`.
pub fn assemble(
    engine: &mut Engine,
    origin: u32,
    program: &[Line],
    max_passes: usize,
) -> Result<Assembled, EngineError> {
    engine.reset();
    let mut known: HashMap<String, i64> = HashMap::new();
    for pass in 1..=max_passes {
        engine.begin_pass();
        let result = run_pass(engine, origin, program, &known, true)?;
        let stable = result.labels == known && !engine.size_changed();
        known = result.labels;
        if stable {
            engine.begin_pass();
            let last = run_pass(engine, origin, program, &known, false)?;
            return Ok(Assembled {
                bytes: last.bytes,
                labels: last.labels,
                passes: pass + 1,
                diagnostics: engine.take_diagnostics(),
            });
        }
    }
    Err(EngineError::NonConvergent(max_passes))
}
