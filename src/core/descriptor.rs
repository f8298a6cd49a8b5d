// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Decode descriptors and operand field rendering.
//!
//! Descriptors are built from the same tables as the encoder entries, so
//! every encodable variant has a matching decode path. Width-dependent
//! fields take the register widths as a render parameter instead of storing
//! a mutable format string.

use crate::core::catalog::{OpcodeKey, OpcodeLayout};
use crate::core::cpu::ByteOrder;
use crate::core::family::RegisterWidths;

/// Which 65816 register width sizes a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidthFlag {
    Accumulator,
    Index,
}

/// Custom field decoder: remaining bytes and the address of the field's
/// first byte in, rendered text and consumed byte count out.
pub type CustomFieldDecoder = fn(&[u8], u32) -> Option<(String, usize)>;

/// One operand field of a decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldSpec {
    Byte,
    Word,
    Long,
    /// Signed 8-bit branch displacement, rendered as its target.
    Rel8,
    /// Signed 16-bit branch displacement, rendered as its target.
    Rel16,
    /// Signed 8-bit index displacement, rendered `+$05` / `-$05`.
    Disp8,
    /// One or two bytes depending on the 65816 M or X flag.
    Width(WidthFlag),
    /// Architecture-specific packed field (6809 post-bytes, register masks).
    Custom(CustomFieldDecoder),
}

impl FieldSpec {
    /// Byte size, or `None` when only the decoder can tell.
    pub fn size(self, widths: RegisterWidths) -> Option<usize> {
        match self {
            FieldSpec::Byte | FieldSpec::Rel8 | FieldSpec::Disp8 => Some(1),
            FieldSpec::Word | FieldSpec::Rel16 => Some(2),
            FieldSpec::Long => Some(3),
            FieldSpec::Width(WidthFlag::Accumulator) => Some(widths.accumulator_bytes().into()),
            FieldSpec::Width(WidthFlag::Index) => Some(widths.index_bytes().into()),
            FieldSpec::Custom(_) => None,
        }
    }

    pub fn is_relative(self) -> bool {
        matches!(self, FieldSpec::Rel8 | FieldSpec::Rel16)
    }
}

/// Immutable decode entry for one composite opcode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionDescriptor {
    pub opcode: OpcodeKey,
    pub mnemonic: String,
    /// Disassembly template; `{n}` is replaced by field `n`.
    pub template: String,
    pub fields: Vec<FieldSpec>,
    pub order: ByteOrder,
    pub layout: OpcodeLayout,
}

impl InstructionDescriptor {
    pub fn new(
        opcode: OpcodeKey,
        mnemonic: &str,
        template: impl Into<String>,
        fields: Vec<FieldSpec>,
        order: ByteOrder,
    ) -> Self {
        Self {
            opcode,
            mnemonic: mnemonic.to_ascii_lowercase(),
            template: template.into(),
            fields,
            order,
            layout: OpcodeLayout::Standard,
        }
    }

    pub fn with_layout(mut self, layout: OpcodeLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Total size when every field has a fixed width under `widths`.
    pub fn size(&self, widths: RegisterWidths) -> Option<usize> {
        self.fields
            .iter()
            .try_fold(self.opcode.len(), |acc, field| {
                field.size(widths).map(|size| acc + size)
            })
    }

    pub fn is_relative(&self) -> bool {
        self.fields.iter().any(|field| field.is_relative())
    }
}

/// Substitute `{n}` placeholders with rendered fields.
pub fn render_template(template: &str, values: &[String]) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '{' {
            out.push(ch);
            continue;
        }
        let mut digits = String::new();
        while let Some(next) = chars.peek().copied() {
            chars.next();
            if next == '}' {
                break;
            }
            digits.push(next);
        }
        match digits.parse::<usize>().ok().and_then(|idx| values.get(idx)) {
            Some(value) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(&digits);
                out.push('}');
            }
        }
    }
    out
}

pub fn format_hex(value: u32, bytes: usize) -> String {
    format!("${:0width$X}", value, width = bytes * 2)
}

pub fn format_address(value: u32) -> String {
    if value > 0xFFFF {
        format_hex(value, 3)
    } else {
        format_hex(value, 2)
    }
}

pub fn format_displacement(value: i8) -> String {
    if value < 0 {
        format!("-${:02X}", -(value as i16))
    } else {
        format!("+${:02X}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_positional_placeholders() {
        let text = render_template("bbr0 {0},{1}", &["$10".to_string(), "$0210".to_string()]);
        assert_eq!(text, "bbr0 $10,$0210");
    }

    #[test]
    fn render_keeps_unknown_placeholders() {
        assert_eq!(render_template("x {3}", &[]), "x {3}");
    }

    #[test]
    fn width_fields_follow_register_widths() {
        let desc = InstructionDescriptor::new(
            OpcodeKey::new(0xA9),
            "lda",
            "lda #{0}",
            vec![FieldSpec::Width(WidthFlag::Accumulator)],
            ByteOrder::Little,
        );
        assert_eq!(desc.size(RegisterWidths::default()), Some(2));
        let wide = RegisterWidths {
            accumulator16: true,
            index16: false,
        };
        assert_eq!(desc.size(wide), Some(3));
    }

    #[test]
    fn displacement_formatting_is_signed() {
        assert_eq!(format_displacement(5), "+$05");
        assert_eq!(format_displacement(-128), "-$80");
        assert_eq!(format_address(0x20A), "$020A");
        assert_eq!(format_address(0x12_3456), "$123456");
    }
}
