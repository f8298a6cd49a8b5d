// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Motorola 6800 family: the 6800 and the 6809.

mod handler;
pub mod module;
pub mod operand;
mod postbyte;
pub mod table;

#[cfg(test)]
mod tests;

pub use handler::{M6800FamilyHandler, M68CpuHandler, M68Profile};
pub use operand::{key, AddressMode, M68Key};
pub use table::{build_layer, entry, FamilyInstructionEntry, FAMILY_INSTRUCTION_TABLE};

pub fn is_register(name: &str) -> bool {
    matches!(
        name.to_ascii_uppercase().as_str(),
        "A" | "B" | "CC" | "DP" | "D" | "X" | "Y" | "U" | "S" | "SP" | "PC" | "PCR"
    )
}
