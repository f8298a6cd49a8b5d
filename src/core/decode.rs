// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Table-driven instruction decoding.

use std::hash::Hash;
use std::sync::Arc;

use crate::core::branch::{effective_address, sign_extend};
use crate::core::catalog::{CatalogView, OpcodeKey, OpcodeLayout};
use crate::core::descriptor::{
    format_address, format_displacement, format_hex, render_template, FieldSpec,
    InstructionDescriptor,
};
use crate::core::family::RegisterWidths;

/// Decode-time parameters.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    pub widths: RegisterWidths,
    /// Branch targets wrap within this mask; higher bits stay from the PC.
    pub address_mask: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            widths: RegisterWidths::default(),
            address_mask: 0xFFFF,
        }
    }
}

/// One decoded instruction.
#[derive(Debug, Clone)]
pub struct DecodedInstruction {
    pub pc: u32,
    pub opcode: OpcodeKey,
    pub text: String,
    pub size: usize,
    /// Raw field values in field order; relative fields hold their target.
    pub values: Vec<u32>,
    pub descriptor: Arc<InstructionDescriptor>,
}

impl DecodedInstruction {
    pub fn mnemonic(&self) -> &str {
        &self.descriptor.mnemonic
    }

    /// Branch target, when the instruction has a relative field.
    pub fn target(&self) -> Option<u32> {
        self.descriptor
            .fields
            .iter()
            .position(|field| field.is_relative())
            .and_then(|idx| self.values.get(idx).copied())
    }
}

/// Decode one instruction at `bytes[offset..]` located at `pc`.
///
/// Composite opcodes match greedily, longest key first. Returns `None` for
/// an unknown opcode or a truncated instruction.
pub fn decode_one<K: Eq + Hash + Clone>(
    view: &CatalogView<K>,
    bytes: &[u8],
    offset: usize,
    pc: u32,
    options: DecodeOptions,
) -> Option<DecodedInstruction> {
    let data = bytes.get(offset..)?;
    if data.is_empty() {
        return None;
    }

    if data.len() >= 4 {
        let prefix = (u32::from(data[0]) << 8) | u32::from(data[1]);
        if view.is_displaced_prefix(prefix) {
            let opcode = OpcodeKey::with_prefix(prefix, data[3]);
            if let Some(descriptor) = view.descriptor(opcode) {
                if descriptor.layout == OpcodeLayout::DisplacementBeforeOpcode {
                    let (values, text) = decode_fields(descriptor, &data[2..3], pc, 4, options)?;
                    return Some(DecodedInstruction {
                        pc,
                        opcode,
                        text,
                        size: 4,
                        values,
                        descriptor: Arc::clone(descriptor),
                    });
                }
            }
        }
    }

    let longest = view.max_opcode_len().min(data.len());
    for len in (1..=longest).rev() {
        let opcode = OpcodeKey::from_bytes(&data[..len]);
        let Some(descriptor) = view.descriptor(opcode) else {
            continue;
        };
        if descriptor.layout != OpcodeLayout::Standard || opcode.len() != len {
            continue;
        }
        let fixed: usize = descriptor
            .fields
            .iter()
            .filter_map(|field| field.size(options.widths))
            .sum();
        let (values, text, consumed) =
            decode_with_custom(descriptor, &data[len..], pc, len, fixed, options)?;
        return Some(DecodedInstruction {
            pc,
            opcode,
            text,
            size: len + consumed,
            values,
            descriptor: Arc::clone(descriptor),
        });
    }
    None
}

fn decode_with_custom(
    descriptor: &InstructionDescriptor,
    operands: &[u8],
    pc: u32,
    opcode_len: usize,
    fixed: usize,
    options: DecodeOptions,
) -> Option<(Vec<u32>, String, usize)> {
    let mut cursor = 0usize;
    let mut values = Vec::with_capacity(descriptor.fields.len());
    let mut rendered = Vec::with_capacity(descriptor.fields.len());
    let pc_after = pc.wrapping_add((opcode_len + fixed) as u32);
    for field in &descriptor.fields {
        if let FieldSpec::Custom(decoder) = field {
            let field_pc = pc.wrapping_add((opcode_len + cursor) as u32);
            let (text, used) = decoder(operands.get(cursor..)?, field_pc)?;
            values.push(u32::from(*operands.get(cursor)?));
            rendered.push(text);
            cursor += used;
            continue;
        }
        let size = field.size(options.widths)?;
        let raw = descriptor.order.read(operands.get(cursor..cursor + size)?);
        let (value, text) = render_field(*field, raw, size, pc_after, options);
        values.push(value);
        rendered.push(text);
        cursor += size;
    }
    Some((values, render_template(&descriptor.template, &rendered), cursor))
}

fn decode_fields(
    descriptor: &InstructionDescriptor,
    operands: &[u8],
    pc: u32,
    total: usize,
    options: DecodeOptions,
) -> Option<(Vec<u32>, String)> {
    let pc_after = pc.wrapping_add(total as u32);
    let mut cursor = 0usize;
    let mut values = Vec::new();
    let mut rendered = Vec::new();
    for field in &descriptor.fields {
        let size = field.size(options.widths)?;
        let raw = descriptor.order.read(operands.get(cursor..cursor + size)?);
        let (value, text) = render_field(*field, raw, size, pc_after, options);
        values.push(value);
        rendered.push(text);
        cursor += size;
    }
    Some((values, render_template(&descriptor.template, &rendered)))
}

fn render_field(
    field: FieldSpec,
    raw: u32,
    size: usize,
    pc_after: u32,
    options: DecodeOptions,
) -> (u32, String) {
    match field {
        FieldSpec::Rel8 | FieldSpec::Rel16 => {
            let target = effective_address(pc_after, sign_extend(raw, size), options.address_mask);
            (target, format_address(target))
        }
        FieldSpec::Disp8 => (raw, format_displacement(raw as u8 as i8)),
        _ => (raw, format_hex(raw, size)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::CatalogLayer;
    use crate::core::cpu::ByteOrder;
    use crate::core::descriptor::WidthFlag;

    fn view() -> CatalogView<u32> {
        let mut layer = CatalogLayer::new("test");
        layer.insert(
            1,
            InstructionDescriptor::new(
                OpcodeKey::new(0xD0),
                "bne",
                "bne {0}",
                vec![FieldSpec::Rel8],
                ByteOrder::Little,
            ),
        );
        layer.insert(
            2,
            InstructionDescriptor::new(
                OpcodeKey::new(0xA9),
                "lda",
                "lda #{0}",
                vec![FieldSpec::Width(WidthFlag::Accumulator)],
                ByteOrder::Little,
            ),
        );
        layer.insert(
            3,
            InstructionDescriptor::new(
                OpcodeKey::new(0xDD_CB_06),
                "rlc",
                "rlc (ix{0})",
                vec![FieldSpec::Disp8],
                ByteOrder::Little,
            )
            .with_layout(OpcodeLayout::DisplacementBeforeOpcode),
        );
        layer.insert(
            4,
            InstructionDescriptor::new(
                OpcodeKey::new(0xDD_21),
                "ld",
                "ld ix,{0}",
                vec![FieldSpec::Word],
                ByteOrder::Little,
            ),
        );
        CatalogView::new(vec![Arc::new(layer)])
    }

    #[test]
    fn relative_target_uses_pc_after_instruction() {
        let decoded = decode_one(&view(), &[0xD0, 0x08], 0, 0x0200, DecodeOptions::default())
            .expect("decodes");
        assert_eq!(decoded.text, "bne $020A");
        assert_eq!(decoded.size, 2);
        assert_eq!(decoded.target(), Some(0x020A));
    }

    #[test]
    fn width_parameter_changes_immediate_size() {
        let wide = DecodeOptions {
            widths: RegisterWidths {
                accumulator16: true,
                index16: false,
            },
            ..DecodeOptions::default()
        };
        let narrow = decode_one(&view(), &[0xA9, 0x34, 0x12], 0, 0, DecodeOptions::default())
            .expect("decodes");
        assert_eq!(narrow.text, "lda #$34");
        let decoded = decode_one(&view(), &[0xA9, 0x34, 0x12], 0, 0, wide).expect("decodes");
        assert_eq!(decoded.text, "lda #$1234");
        assert_eq!(decoded.size, 3);
    }

    #[test]
    fn displaced_layout_reads_displacement_before_opcode() {
        let decoded = decode_one(&view(), &[0xDD, 0xCB, 0xFE, 0x06], 0, 0, DecodeOptions::default())
            .expect("decodes");
        assert_eq!(decoded.text, "rlc (ix-$02)");
        assert_eq!(decoded.size, 4);
    }

    #[test]
    fn prefixed_opcode_matches_longest_key() {
        let decoded = decode_one(&view(), &[0xDD, 0x21, 0x34, 0x12], 0, 0, DecodeOptions::default())
            .expect("decodes");
        assert_eq!(decoded.text, "ld ix,$1234");
    }

    #[test]
    fn unknown_or_truncated_opcode_is_none() {
        assert!(decode_one(&view(), &[0x02], 0, 0, DecodeOptions::default()).is_none());
        assert!(decode_one(&view(), &[0xD0], 0, 0, DecodeOptions::default()).is_none());
        assert!(decode_one(&view(), &[], 0, 0, DecodeOptions::default()).is_none());
    }
}
