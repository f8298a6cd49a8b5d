// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Shared encoding vocabulary used by every CPU family.
//!
//! # Architecture Overview
//!
//! ```text
//! Driver → Engine → CPU handler → resolvers/builders → EncodeOutcome
//! ```
//!
//! - **Driver**: walks source lines, owns labels and the pass loop
//! - **CPU handler**: matches the operand shape against its catalog view
//! - **Resolvers**: size selection, branches and packed operands

use crate::core::assembler::error::{EncodeError, EncodeErrorKind};
use crate::core::catalog::{OpcodeKey, OpcodeLayout};
use crate::core::cpu::ByteOrder;
use crate::core::expr::{eval_expr, Expr, SymbolMapContext};

/// Failure from the bounded-number primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    /// The expression could not be evaluated (usually an unresolved symbol).
    Eval(String),
    /// The value evaluated but lies outside the requested bounds.
    OutOfRange(i64),
}

/// Evaluation services the engine consumes from the driver.
pub trait AssemblerContext {
    /// Evaluate an expression as a full address-space value.
    fn eval_address(&self, expr: &Expr) -> Result<i64, String>;

    /// Evaluate an expression and check it against `min..=max`.
    fn eval_number(&self, expr: &Expr, min: i64, max: i64) -> Result<i64, NumberError> {
        let value = self.eval_address(expr).map_err(NumberError::Eval)?;
        if value < min || value > max {
            return Err(NumberError::OutOfRange(value));
        }
        Ok(value)
    }
}

impl AssemblerContext for SymbolMapContext {
    fn eval_address(&self, expr: &Expr) -> Result<i64, String> {
        eval_expr(expr, self).map_err(|err| err.to_string())
    }
}

/// Evaluate a bounded operand through [`AssemblerContext::eval_number`].
///
/// `Ok(None)` means the value is unknown or out of bounds while another pass
/// is pending; the caller emits a provisional encoding.
pub fn evaluate_number(
    expr: &Expr,
    min: i64,
    max: i64,
    ctx: &EncodingContext,
    eval: &dyn AssemblerContext,
) -> Result<Option<i64>, EncodeError> {
    match eval.eval_number(expr, min, max) {
        Ok(value) => Ok(Some(value)),
        Err(_) if ctx.pass_needed => Ok(None),
        Err(NumberError::Eval(message)) => Err(EncodeError::new(EncodeErrorKind::Expression, message)),
        Err(NumberError::OutOfRange(value)) => Err(EncodeError::out_of_range(value)),
    }
}

/// 65816 accumulator/index register widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegisterWidths {
    pub accumulator16: bool,
    pub index16: bool,
}

impl RegisterWidths {
    pub fn accumulator_bytes(self) -> u8 {
        if self.accumulator16 {
            2
        } else {
            1
        }
    }

    pub fn index_bytes(self) -> u8 {
        if self.index16 {
            2
        } else {
            1
        }
    }
}

/// Per-line state handed to the encoder.
#[derive(Debug, Clone)]
pub struct EncodingContext {
    /// Logical program counter of the instruction's first byte.
    pub pc: u32,
    /// Set by the driver while some symbol may still move.
    pub pass_needed: bool,
    /// Stable identity of the source line across passes.
    pub line: Option<usize>,
    pub widths: RegisterWidths,
    /// Direct page base (65816: full address; 6809: the DP register value).
    pub direct_page: u32,
    pub truncate_direct_page: bool,
    pub auto_widen: bool,
    /// Short branches out of range become their long counterpart
    /// (`bra` to `brl`, `bne` to `lbne`). On unless turned off.
    pub promote_long_branches: bool,
    /// Smallest size this line may take, from earlier passes.
    pub size_floor: Option<usize>,
}

impl Default for EncodingContext {
    fn default() -> Self {
        CpuState::default().context(0, false, None)
    }
}

impl EncodingContext {
    pub fn at(pc: u32) -> Self {
        Self {
            pc,
            ..Self::default()
        }
    }

    pub fn with_pass_needed(mut self, pass_needed: bool) -> Self {
        self.pass_needed = pass_needed;
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Register-width and direct-page state carried between lines.
///
/// Directives and width-changing instructions mutate this as the source is
/// walked; each line gets a fresh [`EncodingContext`] derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuState {
    pub widths: RegisterWidths,
    pub direct_page: u32,
    pub truncate_direct_page: bool,
    pub auto_widen: bool,
    pub promote_long_branches: bool,
}

impl Default for CpuState {
    fn default() -> Self {
        Self {
            widths: RegisterWidths::default(),
            direct_page: 0,
            truncate_direct_page: false,
            auto_widen: false,
            promote_long_branches: true,
        }
    }
}

impl CpuState {
    pub fn context(&self, pc: u32, pass_needed: bool, line: Option<usize>) -> EncodingContext {
        EncodingContext {
            pc,
            pass_needed,
            line,
            widths: self.widths,
            direct_page: self.direct_page,
            truncate_direct_page: self.truncate_direct_page,
            auto_widen: self.auto_widen,
            promote_long_branches: self.promote_long_branches,
            size_floor: None,
        }
    }
}

/// A single operand field of an emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandField {
    pub value: i64,
    pub size: u8,
}

/// Opcode plus operand fields produced for one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub opcode: OpcodeKey,
    fields: Vec<OperandField>,
    order: ByteOrder,
    layout: OpcodeLayout,
}

impl Emission {
    pub fn new(opcode: OpcodeKey, order: ByteOrder) -> Self {
        Self {
            opcode,
            fields: Vec::new(),
            order,
            layout: OpcodeLayout::Standard,
        }
    }

    pub fn with_field(mut self, value: i64, size: u8) -> Self {
        if size > 0 {
            self.fields.push(OperandField { value, size });
        }
        self
    }

    pub fn with_layout(mut self, layout: OpcodeLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn fields(&self) -> &[OperandField] {
        &self.fields
    }

    pub fn opcode_size(&self) -> usize {
        self.opcode.len()
    }

    pub fn operand_size(&self) -> usize {
        self.fields.iter().map(|field| usize::from(field.size)).sum()
    }

    pub fn len(&self) -> usize {
        self.opcode_size() + self.operand_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn operand_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.operand_size());
        for field in &self.fields {
            self.order
                .write(field.value, usize::from(field.size), &mut out);
        }
        out
    }

    /// Operand bytes read back as one value in the family byte order.
    pub fn operand_value(&self) -> i64 {
        let bytes = self.operand_bytes();
        let raw = match self.order {
            ByteOrder::Little => bytes
                .iter()
                .rev()
                .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte)),
            ByteOrder::Big => bytes
                .iter()
                .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte)),
        };
        raw as i64
    }

    /// Full machine code, opcode bytes first.
    pub fn bytes(&self) -> Vec<u8> {
        let opcode = self.opcode.to_bytes();
        let operands = self.operand_bytes();
        match self.layout {
            OpcodeLayout::Standard => {
                let mut out = opcode;
                out.extend(operands);
                out
            }
            OpcodeLayout::DisplacementBeforeOpcode => {
                // prefix, prefix, displacement, final opcode
                let split = opcode.len().saturating_sub(1);
                let mut out = opcode[..split].to_vec();
                out.extend(operands);
                out.extend_from_slice(&opcode[split..]);
                out
            }
        }
    }
}

/// Result of encoding one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeOutcome {
    Emitted(Emission),
    /// Provisional encoding sized for the largest candidate; another pass is needed.
    Deferred(Emission),
    Failed(EncodeError),
}

impl EncodeOutcome {
    pub fn emission(&self) -> Option<&Emission> {
        match self {
            EncodeOutcome::Emitted(emission) | EncodeOutcome::Deferred(emission) => Some(emission),
            EncodeOutcome::Failed(_) => None,
        }
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.emission().map(Emission::bytes).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.emission().map(Emission::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, EncodeOutcome::Deferred(_))
    }

    pub fn error(&self) -> Option<&EncodeError> {
        match self {
            EncodeOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expr::Expr;

    #[test]
    fn emission_serializes_prefix_then_operands() {
        let emission = Emission::new(OpcodeKey::new(0x10_8E), ByteOrder::Big).with_field(0x1234, 2);
        assert_eq!(emission.bytes(), vec![0x10, 0x8E, 0x12, 0x34]);
        assert_eq!(emission.opcode_size(), 2);
        assert_eq!(emission.operand_size(), 2);
        assert_eq!(emission.operand_value(), 0x1234);
    }

    #[test]
    fn displaced_layout_puts_displacement_before_final_opcode() {
        let emission = Emission::new(OpcodeKey::new(0xDD_CB_06), ByteOrder::Little)
            .with_field(5, 1)
            .with_layout(OpcodeLayout::DisplacementBeforeOpcode);
        assert_eq!(emission.bytes(), vec![0xDD, 0xCB, 0x05, 0x06]);
    }

    #[test]
    fn default_eval_number_checks_bounds() {
        let mut ctx = SymbolMapContext::new();
        ctx.define("big", 300);
        assert_eq!(
            ctx.eval_number(&Expr::sym("big"), -128, 255),
            Err(NumberError::OutOfRange(300))
        );
        assert!(matches!(
            ctx.eval_number(&Expr::sym("nope"), 0, 255),
            Err(NumberError::Eval(_))
        ));
    }

    #[test]
    fn bounded_operands_defer_only_while_a_pass_is_pending() {
        let mut symbols = SymbolMapContext::new();
        symbols.define("wide", 0x1_0000);
        let ctx = EncodingContext::at(0);
        let pending = ctx.clone().with_pass_needed(true);

        assert_eq!(evaluate_number(&Expr::num(0x7F), -0x80, 0x7F, &ctx, &symbols), Ok(Some(0x7F)));
        let err = evaluate_number(&Expr::sym("wide"), 0, 0xFFFF, &ctx, &symbols).unwrap_err();
        assert_eq!(err.kind(), EncodeErrorKind::OperandOutOfRange);
        let err = evaluate_number(&Expr::sym("later"), 0, 0xFF, &ctx, &symbols).unwrap_err();
        assert_eq!(err.kind(), EncodeErrorKind::Expression);

        assert_eq!(evaluate_number(&Expr::sym("wide"), 0, 0xFFFF, &pending, &symbols), Ok(None));
        assert_eq!(evaluate_number(&Expr::sym("later"), 0, 0xFF, &pending, &symbols), Ok(None));
    }
}
