// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error types and diagnostics for the encoding engine.

use thiserror::Error;

/// Categories of per-line encoding errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodeErrorKind {
    AddressingModeUnsupported,
    OperandOutOfRange,
    RelativeOffsetTooFar,
    InvalidBitwidthModifier,
    DuplicateRegisterInList,
    Expression,
}

impl EncodeErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EncodeErrorKind::AddressingModeUnsupported => "addressing mode unsupported",
            EncodeErrorKind::OperandOutOfRange => "operand out of range",
            EncodeErrorKind::RelativeOffsetTooFar => "relative offset too far",
            EncodeErrorKind::InvalidBitwidthModifier => "invalid bitwidth modifier",
            EncodeErrorKind::DuplicateRegisterInList => "duplicate register in list",
            EncodeErrorKind::Expression => "expression error",
        }
    }
}

/// A per-line encoding error with a kind and message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EncodeError {
    kind: EncodeErrorKind,
    message: String,
}

impl EncodeError {
    pub fn new(kind: EncodeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unsupported(mnemonic: &str) -> Self {
        Self::new(
            EncodeErrorKind::AddressingModeUnsupported,
            format!("Addressing mode not supported for {}", mnemonic.to_ascii_uppercase()),
        )
    }

    pub fn out_of_range(value: i64) -> Self {
        Self::new(
            EncodeErrorKind::OperandOutOfRange,
            format!("Operand value {value} (${:X}) out of range", value),
        )
    }

    pub fn too_far(offset: i64) -> Self {
        Self::new(
            EncodeErrorKind::RelativeOffsetTooFar,
            format!("Relative branch offset {offset} too far"),
        )
    }

    pub fn kind(&self) -> EncodeErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Fatal errors that abort a whole run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown CPU: {0}")]
    UnknownCpu(String),
    #[error("No CPU selected")]
    NoCpuSelected,
    #[error("Assembly did not converge after {0} passes")]
    NonConvergent(usize),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A diagnostic attached to a source line or program address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub(crate) line: Option<usize>,
    pub(crate) address: Option<u32>,
    pub(crate) code: String,
    pub(crate) severity: Severity,
    pub(crate) message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            line: None,
            address: None,
            code: code.into(),
            severity,
            message: message.into(),
        }
    }

    pub fn from_error(severity: Severity, error: &EncodeError) -> Self {
        Self::new(severity, default_diagnostic_code(error.kind()), error.message())
    }

    pub fn with_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    pub fn with_address(mut self, address: u32) -> Self {
        self.address = Some(address);
        self
    }

    pub fn format(&self) -> String {
        let sev = match self.severity {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        let location = match (self.line, self.address) {
            (Some(line), _) => line.to_string(),
            (None, Some(addr)) => format!("${addr:04X}"),
            (None, None) => "-".to_string(),
        };
        format!("{location}: {sev} [{}] - {}", self.code, self.message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn address(&self) -> Option<u32> {
        self.address
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Receiver for diagnostics raised while encoding.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

pub fn default_diagnostic_code(kind: EncodeErrorKind) -> &'static str {
    match kind {
        EncodeErrorKind::AddressingModeUnsupported => "asm301",
        EncodeErrorKind::OperandOutOfRange => "asm302",
        EncodeErrorKind::RelativeOffsetTooFar => "asm303",
        EncodeErrorKind::InvalidBitwidthModifier => "asm304",
        EncodeErrorKind::DuplicateRegisterInList => "asm305",
        EncodeErrorKind::Expression => "asm401",
    }
}

/// Diagnostic codes for `analyze` warnings.
pub const CODE_CALL_RETURN: &str = "asm501";
pub const CODE_JMP_INDIRECT_PAGE: &str = "asm502";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_format_prefers_line_number() {
        let err = EncodeError::unsupported("bra");
        let diag = Diagnostic::from_error(Severity::Error, &err)
            .with_line(Some(12))
            .with_address(0x200);
        assert_eq!(
            diag.format(),
            "12: ERROR [asm301] - Addressing mode not supported for BRA"
        );
    }

    #[test]
    fn diagnostic_format_falls_back_to_address() {
        let diag = Diagnostic::new(Severity::Warning, CODE_CALL_RETURN, "jsr then rts")
            .with_address(0x0c00);
        assert_eq!(diag.format(), "$0C00: WARNING [asm501] - jsr then rts");
    }

    #[test]
    fn vec_sink_collects_reports() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(Diagnostic::new(Severity::Warning, "asm304", "ignored"));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].severity(), Severity::Warning);
    }
}
