// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! 6502-family addressing modes.
//!
//! Every CPU of the family shares one mode list; a CPU layer simply has no
//! entries for the modes it lacks. Each mode knows its disassembly template
//! and the operand fields that follow the opcode.

use crate::core::descriptor::{FieldSpec, WidthFlag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressMode {
    Implied,
    Accumulator,
    Immediate,
    /// 16-bit immediate (65CE02 `phw #`).
    ImmediateWord,
    /// 65816 immediate sized by the M flag.
    ImmediateM,
    /// 65816 immediate sized by the X flag.
    ImmediateX,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    AbsoluteLong,
    AbsoluteLongX,
    /// `jmp (abs)`.
    Indirect,
    /// `(zp,x)`.
    IndexedIndirectX,
    /// `(zp),y`.
    IndirectIndexedY,
    /// `(zp)`.
    ZeroPageIndirect,
    /// `jmp (abs,x)`.
    AbsoluteIndexedIndirect,
    Relative,
    RelativeLong,
    /// `[dp]`.
    IndirectLong,
    /// `[dp],y`.
    IndirectLongY,
    /// `jml [abs]`.
    AbsoluteIndirectLong,
    /// `d,s`.
    StackRelative,
    /// `(d,s),y`.
    StackRelativeIndirectY,
    /// `(zp),z`.
    IndirectIndexedZ,
    /// 45GS02 flat `[zp],z`.
    FlatIndirectZ,
    /// `mvn src,dst`; bytes are dest bank then source bank.
    BlockMove,
    /// `bbr0 zp,target`.
    ZeroPageRelative,
    /// HuC6280 `tst #imm,zp`.
    ImmediateZeroPage,
    ImmediateZeroPageX,
    ImmediateAbsolute,
    ImmediateAbsoluteX,
    /// HuC6280 `tii src,dst,len`.
    BlockTransfer,
}

impl AddressMode {
    /// Disassembly template; `{m}` is the mnemonic.
    pub fn template(self) -> &'static str {
        use AddressMode::*;
        match self {
            Implied => "{m}",
            Accumulator => "{m} a",
            Immediate | ImmediateWord | ImmediateM | ImmediateX => "{m} #{0}",
            ZeroPage | Absolute | AbsoluteLong | Relative | RelativeLong => "{m} {0}",
            ZeroPageX | AbsoluteX | AbsoluteLongX => "{m} {0},x",
            ZeroPageY | AbsoluteY => "{m} {0},y",
            Indirect | ZeroPageIndirect => "{m} ({0})",
            IndexedIndirectX | AbsoluteIndexedIndirect => "{m} ({0},x)",
            IndirectIndexedY => "{m} ({0}),y",
            IndirectLong | AbsoluteIndirectLong => "{m} [{0}]",
            IndirectLongY => "{m} [{0}],y",
            StackRelative => "{m} {0},s",
            StackRelativeIndirectY => "{m} ({0},s),y",
            IndirectIndexedZ => "{m} ({0}),z",
            FlatIndirectZ => "{m} [{0}],z",
            BlockMove => "{m} {1},{0}",
            ZeroPageRelative => "{m} {0},{1}",
            ImmediateZeroPage | ImmediateAbsolute => "{m} #{0},{1}",
            ImmediateZeroPageX | ImmediateAbsoluteX => "{m} #{0},{1},x",
            BlockTransfer => "{m} {0},{1},{2}",
        }
    }

    pub fn fields(self) -> Vec<FieldSpec> {
        use AddressMode::*;
        use FieldSpec::*;
        match self {
            Implied | Accumulator => vec![],
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | IndexedIndirectX
            | IndirectIndexedY | ZeroPageIndirect | IndirectLong | IndirectLongY
            | StackRelative | StackRelativeIndirectY | IndirectIndexedZ | FlatIndirectZ => {
                vec![Byte]
            }
            ImmediateWord | Absolute | AbsoluteX | AbsoluteY | Indirect
            | AbsoluteIndexedIndirect | AbsoluteIndirectLong => vec![Word],
            ImmediateM => vec![Width(WidthFlag::Accumulator)],
            ImmediateX => vec![Width(WidthFlag::Index)],
            AbsoluteLong | AbsoluteLongX => vec![Long],
            Relative => vec![Rel8],
            RelativeLong => vec![Rel16],
            BlockMove => vec![Byte, Byte],
            ZeroPageRelative => vec![Byte, Rel8],
            ImmediateZeroPage | ImmediateZeroPageX => vec![Byte, Byte],
            ImmediateAbsolute | ImmediateAbsoluteX => vec![Byte, Word],
            BlockTransfer => vec![Word, Word, Word],
        }
    }

    pub fn is_branch(self) -> bool {
        matches!(self, AddressMode::Relative | AddressMode::RelativeLong)
    }
}

/// Catalog key for the 6502 family: upper-case mnemonic plus mode.
pub type MosKey = (String, AddressMode);

pub fn key(mnemonic: &str, mode: AddressMode) -> MosKey {
    (mnemonic.to_ascii_uppercase(), mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_move_renders_source_first() {
        assert_eq!(AddressMode::BlockMove.template(), "{m} {1},{0}");
        assert_eq!(AddressMode::BlockMove.fields().len(), 2);
    }

    #[test]
    fn bit_branch_carries_relative_field() {
        let fields = AddressMode::ZeroPageRelative.fields();
        assert!(fields.iter().any(|field| field.is_relative()));
        assert!(!AddressMode::ZeroPageRelative.is_branch());
    }
}
