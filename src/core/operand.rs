// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! CPU-agnostic instruction shapes.
//!
//! The parser classifies source text into an [`Instruction`]: a mnemonic,
//! one [`OperandShape`] and an optional forced bitwidth. Family encoders
//! match on the shape once and dispatch to the resolvers for that family.

use crate::core::expr::Expr;

/// Index register named in an indexed addressing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexRegister {
    X,
    Y,
    Z,
    /// 6502-family stack pointer (`,s` / `,sp`).
    S,
    /// 6809 user stack pointer.
    U,
    /// 6809 program counter, offset taken literally (`n,pc`).
    Pc,
    /// 6809 program counter, offset computed from a target (`label,pcr`).
    Pcr,
}

impl IndexRegister {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "x" => Some(IndexRegister::X),
            "y" => Some(IndexRegister::Y),
            "z" => Some(IndexRegister::Z),
            "s" | "sp" => Some(IndexRegister::S),
            "u" => Some(IndexRegister::U),
            "pc" => Some(IndexRegister::Pc),
            "pcr" => Some(IndexRegister::Pcr),
            _ => None,
        }
    }
}

/// One argument of a Z80-style comma-separated operand list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Plain expression (`n`, `nn`, branch target, bit number).
    Expr(Expr),
    /// Register or condition name: `a`, `hl`, `af'`, `nz`.
    Register(String),
    /// Register indirect: `(hl)`, `(c)`, `(hl+)`.
    RegisterIndirect(String),
    /// Index register with displacement: `(ix+d)`.
    IndexDisplacement { register: String, displacement: Expr },
    /// Memory indirect through an address: `(nn)`, `(n)`.
    Indirect(Expr),
}

/// Classified operand syntax for one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperandShape {
    /// No operand.
    Implied,
    /// `expr`: address, branch target or accumulator name.
    Single(Expr),
    /// `#expr`.
    Immediate(Expr),
    /// Comma-separated expressions: `bbr0 $10,label`, `mvn 1,2`,
    /// `tst #1,$20`, `tii src,dst,len`.
    List(Vec<OperandShape>),
    /// `expr,x` / `expr,y` / `d,s`; 6809 `n,x` / `label,pcr`.
    Indexed { expr: Expr, index: IndexRegister },
    /// `(expr)` or `[expr]` when `long`.
    Indirect { expr: Expr, long: bool },
    /// `(expr,x)`; 6809 `[n,x]`.
    IndexedIndirect {
        expr: Expr,
        index: IndexRegister,
        long: bool,
    },
    /// `(expr),y`, `[expr],y`, `(expr),z`, `[expr],z` and `(d,s),y`.
    IndirectIndexed {
        expr: Expr,
        index: IndexRegister,
        long: bool,
        stack: bool,
    },
    /// R65C02 bit instructions written `rmb 3,$10` or `bbr 3,$10,label`.
    Bit {
        bit: u8,
        operands: Vec<OperandShape>,
    },
    /// 6809 push/pull list or TFR/EXG pair.
    RegisterList(Vec<String>),
    /// Z80-family argument list.
    Args(Vec<Arg>),
    /// 6809 `,x+`, `,x++`, `,-x`, `,--x` (and bracketed forms).
    AutoIndex {
        register: IndexRegister,
        step: i8,
        indirect: bool,
    },
    /// 6809 `a,x`, `b,x`, `d,x` (and bracketed forms).
    AccumulatorIndexed {
        accumulator: char,
        index: IndexRegister,
        indirect: bool,
    },
}

/// A classified instruction handed to the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: String,
    pub shape: OperandShape,
    /// Forced operand bitwidth (`[16] expr`, `<`/`>` forcing).
    pub bitwidth: Option<u8>,
}

impl Instruction {
    pub fn new(mnemonic: impl Into<String>, shape: OperandShape) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            shape,
            bitwidth: None,
        }
    }

    pub fn implied(mnemonic: impl Into<String>) -> Self {
        Self::new(mnemonic, OperandShape::Implied)
    }

    pub fn with_bitwidth(mut self, bits: u8) -> Self {
        self.bitwidth = Some(bits);
        self
    }

    pub fn upper_mnemonic(&self) -> String {
        self.mnemonic.to_ascii_uppercase()
    }
}
