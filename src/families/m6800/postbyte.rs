// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! 6809 packed operands: indexed post-bytes, register lists and TFR/EXG
//! register pairs, in both directions.
//!
//! Post-byte layout: `1RRIxxxx`, where `RR` selects X/Y/U/S and `I` marks
//! the indirect form. A clear top bit means a 5-bit signed offset inline.

use crate::core::assembler::error::{EncodeError, EncodeErrorKind};
use crate::core::catalog::OpcodeKey;
use crate::core::descriptor::{format_address, format_hex};
use crate::core::operand::IndexRegister;
use crate::core::resolve::{fits_signed, SlotCandidate};

pub(crate) const INDIRECT_BIT: u8 = 0x10;
/// `[nnnn]`: extended indirect, followed by a 16-bit address.
pub(crate) const EXTENDED_INDIRECT: u8 = 0x9F;

/// Post-byte and the offset field that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PostByte {
    pub postbyte: u8,
    pub offset: i64,
    pub offset_size: u8,
}

impl PostByte {
    fn new(postbyte: u8, offset: i64, offset_size: u8) -> Self {
        Self {
            postbyte,
            offset,
            offset_size,
        }
    }
}

/// Slot width counts the post-byte itself.
pub(crate) type PostByteSlot = SlotCandidate<PostByte>;

pub(crate) fn base_bits(index: IndexRegister) -> Option<u8> {
    match index {
        IndexRegister::X => Some(0x00),
        IndexRegister::Y => Some(0x20),
        IndexRegister::U => Some(0x40),
        IndexRegister::S => Some(0x60),
        _ => None,
    }
}

fn indirect_bit(indirect: bool) -> u8 {
    if indirect {
        INDIRECT_BIT
    } else {
        0
    }
}

/// Constant-offset candidates, narrowest first: no offset, 5-bit inline
/// (direct only), 8-bit and 16-bit.
pub(crate) fn offset_candidates(
    opcode: OpcodeKey,
    base: u8,
    value: Option<i64>,
    indirect: bool,
) -> Vec<PostByteSlot> {
    let ind = indirect_bit(indirect);
    let raw = value.unwrap_or(0);
    let fits = |width: u8| value.is_some_and(|value| fits_signed(value, width));
    let mut slots = vec![PostByteSlot::new(
        Some(opcode),
        1,
        value == Some(0),
        PostByte::new(0x84 | base | ind, 0, 0),
    )];
    if !indirect {
        let inline = value.is_some_and(|value| (-16..=15).contains(&value));
        slots.push(PostByteSlot::new(
            Some(opcode),
            1,
            inline,
            PostByte::new(base | (raw as u8 & 0x1F), 0, 0),
        ));
    }
    slots.push(PostByteSlot::new(
        Some(opcode),
        2,
        fits(1),
        PostByte::new(0x88 | base | ind, raw, 1),
    ));
    slots.push(PostByteSlot::new(
        Some(opcode),
        3,
        fits(2),
        PostByte::new(0x89 | base | ind, raw, 2),
    ));
    slots
}

/// Program-counter relative candidates.
///
/// With `target` the offset is computed from the address after each
/// candidate (`label,pcr`); otherwise `literal` is used as given (`n,pc`).
pub(crate) fn pc_relative_candidates(
    opcode: OpcodeKey,
    pc: u32,
    target: Option<i64>,
    literal: bool,
    indirect: bool,
) -> Vec<PostByteSlot> {
    let ind = indirect_bit(indirect);
    let after = |width: u8| i64::from(pc) + opcode.len() as i64 + i64::from(width);
    [(0x8C, 1u8), (0x8D, 2u8)]
        .into_iter()
        .map(|(mode, size)| {
            let offset = match target {
                Some(value) if literal => value,
                Some(value) => value - after(size + 1),
                None => 0,
            };
            let fits = target.is_some() && fits_signed(offset, size);
            PostByteSlot::new(Some(opcode), size + 1, fits, PostByte::new(mode | ind, offset, size))
        })
        .collect()
}

/// `,r+` `,r++` `,-r` `,--r`; indirect allows only the double steps.
pub(crate) fn auto_postbyte(base: u8, step: i8, indirect: bool) -> Result<u8, EncodeError> {
    let mode = match (step, indirect) {
        (1, false) => 0x80,
        (2, _) => 0x81,
        (-1, false) => 0x82,
        (-2, _) => 0x83,
        _ => {
            return Err(EncodeError::new(
                EncodeErrorKind::AddressingModeUnsupported,
                "Indirect indexing needs a double increment or decrement",
            ))
        }
    };
    Ok(mode | base | indirect_bit(indirect))
}

/// `a,r` `b,r` `d,r`.
pub(crate) fn accumulator_postbyte(accumulator: char, base: u8, indirect: bool) -> Option<u8> {
    let mode = match accumulator.to_ascii_lowercase() {
        'b' => 0x85,
        'a' => 0x86,
        'd' => 0x8B,
        _ => return None,
    };
    Some(mode | base | indirect_bit(indirect))
}

/// Transfer register codes; codes below 8 are 16-bit registers.
const PAIR_REGISTERS: &[(&str, u8)] = &[
    ("D", 0x0),
    ("X", 0x1),
    ("Y", 0x2),
    ("U", 0x3),
    ("S", 0x4),
    ("PC", 0x5),
    ("A", 0x8),
    ("B", 0x9),
    ("CC", 0xA),
    ("DP", 0xB),
];

fn pair_code(name: &str) -> Option<u8> {
    PAIR_REGISTERS
        .iter()
        .find(|(register, _)| register.eq_ignore_ascii_case(name))
        .map(|(_, code)| *code)
}

fn pair_name(code: u8) -> Option<&'static str> {
    PAIR_REGISTERS
        .iter()
        .find(|(_, register)| *register == code)
        .map(|(name, _)| *name)
}

/// TFR/EXG post-byte: source in the high nibble, destination in the low.
pub(crate) fn register_pair_postbyte(mnemonic: &str, registers: &[String]) -> Result<u8, EncodeError> {
    let [source, dest] = registers else {
        return Err(EncodeError::unsupported(mnemonic));
    };
    let code = |name: &str| {
        pair_code(name).ok_or_else(|| {
            EncodeError::new(
                EncodeErrorKind::AddressingModeUnsupported,
                format!("Invalid register {} for {mnemonic}", name.to_ascii_uppercase()),
            )
        })
    };
    let (src, dst) = (code(source)?, code(dest)?);
    if (src < 8) != (dst < 8) {
        return Err(EncodeError::new(
            EncodeErrorKind::AddressingModeUnsupported,
            format!(
                "Register size mismatch in {mnemonic} {},{}",
                source.to_ascii_uppercase(),
                dest.to_ascii_uppercase()
            ),
        ));
    }
    Ok((src << 4) | dst)
}

/// Push order, bit 0 first; `None` marks the stack-dependent bit 6.
const LIST_BITS: &[(&str, u8)] = &[
    ("CC", 0x01),
    ("A", 0x02),
    ("B", 0x04),
    ("DP", 0x08),
    ("X", 0x10),
    ("Y", 0x20),
    ("", 0x40),
    ("PC", 0x80),
];

/// Register-list mask for PSHS/PULS (`other` = "U") or PSHU/PULU (`"S"`).
pub(crate) fn register_list_mask(
    mnemonic: &str,
    other: &str,
    registers: &[String],
) -> Result<u8, EncodeError> {
    let mut mask = 0u8;
    for name in registers {
        let upper = name.to_ascii_uppercase();
        let bits = match upper.as_str() {
            "D" => 0x06,
            _ if upper == other => 0x40,
            _ => LIST_BITS
                .iter()
                .find(|(register, _)| !register.is_empty() && *register == upper)
                .map(|(_, bit)| *bit)
                .ok_or_else(|| {
                    EncodeError::new(
                        EncodeErrorKind::AddressingModeUnsupported,
                        format!("Invalid register {upper} in {mnemonic} list"),
                    )
                })?,
        };
        if mask & bits != 0 {
            return Err(EncodeError::new(
                EncodeErrorKind::DuplicateRegisterInList,
                format!("Register {upper} appears twice in {mnemonic} list"),
            ));
        }
        mask |= bits;
    }
    Ok(mask)
}

fn render_list(mask: u8, other: &str) -> String {
    let names: Vec<String> = LIST_BITS
        .iter()
        .filter(|(_, bit)| mask & bit != 0)
        .map(|(name, _)| if name.is_empty() { other } else { name })
        .map(str::to_ascii_lowercase)
        .collect();
    names.join(",")
}

pub(crate) fn decode_register_list_s(bytes: &[u8], _pc: u32) -> Option<(String, usize)> {
    Some((render_list(*bytes.first()?, "U"), 1))
}

pub(crate) fn decode_register_list_u(bytes: &[u8], _pc: u32) -> Option<(String, usize)> {
    Some((render_list(*bytes.first()?, "S"), 1))
}

pub(crate) fn decode_register_pair(bytes: &[u8], _pc: u32) -> Option<(String, usize)> {
    let byte = *bytes.first()?;
    let source = pair_name(byte >> 4)?;
    let dest = pair_name(byte & 0x0F)?;
    Some((
        format!("{},{}", source.to_ascii_lowercase(), dest.to_ascii_lowercase()),
        1,
    ))
}

fn signed_offset(value: i64) -> String {
    let magnitude = value.unsigned_abs() as u32;
    let digits = if magnitude > 0xFF { 2 } else { 1 };
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{}", format_hex(magnitude, digits))
}

fn read_offset(bytes: &[u8], size: usize) -> Option<i64> {
    match size {
        1 => Some(i64::from(*bytes.get(1)? as i8)),
        _ => {
            let raw = u16::from_be_bytes([*bytes.get(1)?, *bytes.get(2)?]);
            Some(i64::from(raw as i16))
        }
    }
}

/// Render an indexed operand starting at its post-byte; `pc` is the address
/// of the post-byte.
pub(crate) fn decode_indexed(bytes: &[u8], pc: u32) -> Option<(String, usize)> {
    let postbyte = *bytes.first()?;
    let register = ["x", "y", "u", "s"][usize::from((postbyte >> 5) & 0x03)];
    if postbyte & 0x80 == 0 {
        let offset = i64::from(((postbyte & 0x1F) as i8) << 3 >> 3);
        return Some((format!("{},{register}", signed_offset(offset)), 1));
    }
    if postbyte == EXTENDED_INDIRECT {
        let address = u32::from(u16::from_be_bytes([*bytes.get(1)?, *bytes.get(2)?]));
        return Some((format!("[{}]", format_hex(address, 2)), 3));
    }
    let indirect = postbyte & INDIRECT_BIT != 0;
    let (body, used) = match postbyte & 0x0F {
        0x0 if !indirect => (format!(",{register}+"), 1),
        0x1 => (format!(",{register}++"), 1),
        0x2 if !indirect => (format!(",-{register}"), 1),
        0x3 => (format!(",--{register}"), 1),
        0x4 => (format!(",{register}"), 1),
        0x5 => (format!("b,{register}"), 1),
        0x6 => (format!("a,{register}"), 1),
        0x8 => (format!("{},{register}", signed_offset(read_offset(bytes, 1)?)), 2),
        0x9 => (format!("{},{register}", signed_offset(read_offset(bytes, 2)?)), 3),
        0xB => (format!("d,{register}"), 1),
        mode @ (0xC | 0xD) => {
            let size = if mode == 0xC { 1 } else { 2 };
            let offset = read_offset(bytes, size)?;
            let after = i64::from(pc) + 1 + size as i64;
            let target = ((after + offset) & 0xFFFF) as u32;
            (format!("{},pcr", format_address(target)), size + 1)
        }
        _ => return None,
    };
    if indirect {
        Some((format!("[{body}]"), used))
    } else {
        Some((body, used))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolve::{resolve_sized_variant, Resolution, SizePolicy};

    const LDA: OpcodeKey = OpcodeKey::new(0xA6);

    fn chosen(slots: &[PostByteSlot]) -> PostByte {
        match resolve_sized_variant(slots, SizePolicy::default()) {
            Resolution::Selected(chosen) => chosen.tag,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn offsets_pick_the_smallest_form() {
        assert_eq!(chosen(&offset_candidates(LDA, 0x00, Some(0), false)).postbyte, 0x84);
        assert_eq!(chosen(&offset_candidates(LDA, 0x00, Some(5), false)).postbyte, 0x05);
        assert_eq!(chosen(&offset_candidates(LDA, 0x20, Some(-16), false)).postbyte, 0x30);
        let byte = chosen(&offset_candidates(LDA, 0x00, Some(100), false));
        assert_eq!((byte.postbyte, byte.offset_size), (0x88, 1));
        let word = chosen(&offset_candidates(LDA, 0x40, Some(0x1234), false));
        assert_eq!((word.postbyte, word.offset_size), (0xC9, 2));
    }

    #[test]
    fn indirect_skips_the_inline_form() {
        let byte = chosen(&offset_candidates(LDA, 0x00, Some(5), true));
        assert_eq!((byte.postbyte, byte.offset_size), (0x98, 1));
        assert_eq!(chosen(&offset_candidates(LDA, 0x00, Some(0), true)).postbyte, 0x94);
    }

    #[test]
    fn auto_increment_rules() {
        assert_eq!(auto_postbyte(0x00, 1, false), Ok(0x80));
        assert_eq!(auto_postbyte(0x20, -2, true), Ok(0xB3));
        assert!(auto_postbyte(0x00, 1, true).is_err());
    }

    #[test]
    fn register_lists_reject_duplicates() {
        let regs = |names: &[&str]| names.iter().map(|name| name.to_string()).collect::<Vec<_>>();
        assert_eq!(register_list_mask("PSHS", "U", &regs(&["a", "b", "x", "u"])), Ok(0x56));
        assert_eq!(register_list_mask("PSHU", "S", &regs(&["s", "pc"])), Ok(0xC0));
        let err = register_list_mask("PSHS", "U", &regs(&["d", "a"])).expect_err("duplicate");
        assert_eq!(err.kind(), EncodeErrorKind::DuplicateRegisterInList);
        assert!(register_list_mask("PSHS", "U", &regs(&["s"])).is_err());
    }

    #[test]
    fn register_pairs_check_sizes() {
        let regs = |a: &str, b: &str| vec![a.to_string(), b.to_string()];
        assert_eq!(register_pair_postbyte("TFR", &regs("x", "y")), Ok(0x12));
        assert_eq!(register_pair_postbyte("EXG", &regs("a", "b")), Ok(0x89));
        assert!(register_pair_postbyte("TFR", &regs("a", "x")).is_err());
        assert_eq!(decode_register_pair(&[0x89], 0), Some(("a,b".to_string(), 1)));
    }

    #[test]
    fn decodes_post_bytes() {
        assert_eq!(decode_indexed(&[0x05], 0), Some(("$05,x".to_string(), 1)));
        assert_eq!(decode_indexed(&[0x3F], 0), Some(("-$01,y".to_string(), 1)));
        assert_eq!(decode_indexed(&[0xB3], 0), Some(("[,--y]".to_string(), 1)));
        assert_eq!(decode_indexed(&[0xC9, 0x12, 0x34], 0), Some(("$1234,u".to_string(), 3)));
        assert_eq!(decode_indexed(&[0x9F, 0x20, 0x00], 0), Some(("[$2000]".to_string(), 3)));
        assert_eq!(
            decode_indexed(&[0x8C, 0x10], 0x1001),
            Some(("$1013,pcr".to_string(), 2))
        );
        assert_eq!(decode_indexed(&[0x90], 0), None);
    }

    #[test]
    fn register_list_rendering_names_the_other_stack() {
        assert_eq!(decode_register_list_s(&[0x56], 0), Some(("a,b,x,u".to_string(), 1)));
        assert_eq!(decode_register_list_u(&[0xC0], 0), Some(("s,pc".to_string(), 1)));
    }
}
