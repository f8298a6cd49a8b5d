// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Addressing modes for the Motorola 6800 family (6800 and 6809).

use crate::core::descriptor::FieldSpec;

use super::postbyte::{decode_indexed, decode_register_list_s, decode_register_list_u, decode_register_pair};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressMode {
    Inherent,
    Immediate8,
    Immediate16,
    Direct,
    Extended,
    /// 6800 `n,x`: unsigned byte offset from X.
    IndexedByte,
    /// 6809 indexed: post-byte plus an optional 8/16-bit offset.
    Indexed,
    Relative8,
    Relative16,
    /// TFR/EXG source and destination nibbles.
    RegisterPair,
    /// PSHS/PULS mask; bit 6 names U.
    RegisterListS,
    /// PSHU/PULU mask; bit 6 names S.
    RegisterListU,
}

impl AddressMode {
    pub fn template(self) -> &'static str {
        use AddressMode::*;
        match self {
            Inherent => "{m}",
            Immediate8 | Immediate16 => "{m} #{0}",
            IndexedByte => "{m} {0},x",
            Direct | Extended | Indexed | Relative8 | Relative16 | RegisterPair
            | RegisterListS | RegisterListU => "{m} {0}",
        }
    }

    pub fn fields(self) -> Vec<FieldSpec> {
        use AddressMode::*;
        use FieldSpec::*;
        match self {
            Inherent => vec![],
            Immediate8 | Direct | IndexedByte => vec![Byte],
            Immediate16 | Extended => vec![Word],
            Indexed => vec![Custom(decode_indexed)],
            Relative8 => vec![Rel8],
            Relative16 => vec![Rel16],
            RegisterPair => vec![Custom(decode_register_pair)],
            RegisterListS => vec![Custom(decode_register_list_s)],
            RegisterListU => vec![Custom(decode_register_list_u)],
        }
    }
}

/// Catalog key for the 6800 family: upper-case mnemonic plus mode.
pub type M68Key = (String, AddressMode);

pub fn key(mnemonic: &str, mode: AddressMode) -> M68Key {
    (mnemonic.to_ascii_uppercase(), mode)
}
