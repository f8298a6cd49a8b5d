// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Operand expressions and a reference evaluator.
//!
//! The engine only consumes evaluated values through
//! [`AssemblerContext`](crate::core::family::AssemblerContext); the tree and
//! evaluator here are what drivers and tests hand to that trait.

use std::collections::HashMap;

use thiserror::Error;

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Minus,
    BitNot,
    /// `<expr`: low byte.
    Low,
    /// `>expr`: high byte.
    High,
    /// `^expr`: bank byte.
    Bank,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

/// An operand sub-expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Number(i64),
    Identifier(String),
    /// `*` or `$`: the current program counter.
    Dollar,
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn num(value: i64) -> Self {
        Expr::Number(value)
    }

    pub fn sym(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    pub fn unary(op: UnaryOp, expr: Expr) -> Self {
        Expr::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Bare identifier text, used to spot register operands such as `a`.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expr::Identifier(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// Error returned from expression evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Undefined symbol: {0}")]
    UndefinedSymbol(String),
    #[error("Current address not available")]
    NoCurrentAddress,
    #[error("Division by zero")]
    DivideByZero,
}

/// Context for expression evaluation.
pub trait EvalContext {
    /// Look up a symbol's value by name.
    fn lookup_symbol(&self, name: &str) -> Option<i64>;

    /// Get the current address (`*`).
    fn current_address(&self) -> Option<i64>;
}

/// Evaluate an expression to a numeric value.
pub fn eval_expr(expr: &Expr, ctx: &dyn EvalContext) -> Result<i64, EvalError> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Identifier(name) => ctx
            .lookup_symbol(name)
            .ok_or_else(|| EvalError::UndefinedSymbol(name.clone())),
        Expr::Dollar => ctx.current_address().ok_or(EvalError::NoCurrentAddress),
        Expr::Unary { op, expr } => Ok(apply_unary(*op, eval_expr(expr, ctx)?)),
        Expr::Binary { op, left, right } => {
            let l = eval_expr(left, ctx)?;
            let r = eval_expr(right, ctx)?;
            apply_binary(*op, l, r)
        }
    }
}

/// Apply a unary operator to a value.
pub fn apply_unary(op: UnaryOp, val: i64) -> i64 {
    match op {
        UnaryOp::Minus => -val,
        UnaryOp::BitNot => !val,
        UnaryOp::Low => val & 0xff,
        UnaryOp::High => (val >> 8) & 0xff,
        UnaryOp::Bank => (val >> 16) & 0xff,
    }
}

/// Apply a binary operator to two values.
pub fn apply_binary(op: BinaryOp, l: i64, r: i64) -> Result<i64, EvalError> {
    Ok(match op {
        BinaryOp::Add => l.wrapping_add(r),
        BinaryOp::Subtract => l.wrapping_sub(r),
        BinaryOp::Multiply => l.wrapping_mul(r),
        BinaryOp::Divide => {
            if r == 0 {
                return Err(EvalError::DivideByZero);
            }
            l / r
        }
        BinaryOp::Mod => {
            if r == 0 {
                return Err(EvalError::DivideByZero);
            }
            l % r
        }
        BinaryOp::BitAnd => l & r,
        BinaryOp::BitOr => l | r,
        BinaryOp::BitXor => l ^ r,
        // Shift amounts are masked to the 32-bit value domain.
        BinaryOp::Shl => l.wrapping_shl((r & 0x1f) as u32),
        BinaryOp::Shr => ((l as u64).wrapping_shr((r & 0x1f) as u32)) as i64,
    })
}

/// Parse a number literal.
///
/// Supports `42`, `$2A`, `0x2A`, `2Ah`, `%101010` and `0b101010`.
pub fn parse_number(text: &str) -> Option<i64> {
    let text = text.trim();
    let (is_neg, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if text.is_empty() {
        return None;
    }
    let text: String = text.chars().filter(|&c| c != '_').collect();
    let text = text.as_str();

    let val = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(hex) = text.strip_prefix('$') {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(bin) = text.strip_prefix('%') {
        i64::from_str_radix(bin, 2).ok()?
    } else if let Some(bin) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        i64::from_str_radix(bin, 2).ok()?
    } else if let Some(hex) = text.strip_suffix('h').or_else(|| text.strip_suffix('H')) {
        i64::from_str_radix(hex, 16).ok()?
    } else {
        text.parse::<i64>().ok()?
    };

    Some(if is_neg { -val } else { val })
}

/// Evaluation context over a plain symbol map.
#[derive(Debug, Clone, Default)]
pub struct SymbolMapContext {
    symbols: HashMap<String, i64>,
    addr: Option<i64>,
}

impl SymbolMapContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address(mut self, addr: i64) -> Self {
        self.addr = Some(addr);
        self
    }

    pub fn define(&mut self, name: impl Into<String>, value: i64) {
        self.symbols.insert(name.into(), value);
    }

    pub fn set_address(&mut self, addr: i64) {
        self.addr = Some(addr);
    }
}

impl EvalContext for SymbolMapContext {
    fn lookup_symbol(&self, name: &str) -> Option<i64> {
        self.symbols.get(name).copied()
    }

    fn current_address(&self) -> Option<i64> {
        self.addr
    }
}
