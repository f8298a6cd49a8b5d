// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! MOS 6502 family: the base NMOS table, the shared encoder facade and the
//! profile type every family CPU is built from.

mod handler;
pub mod module;
pub mod operand;
mod operand_resolution;
pub mod table;
mod undocumented;


pub use handler::{MOS6502FamilyHandler, MosCpuHandler, MosProfile, WidthHooks};
pub use operand::{key, AddressMode, MosKey};
pub use table::{build_layer, entry, FamilyInstructionEntry, FAMILY_INSTRUCTION_TABLE};

pub fn is_register(name: &str) -> bool {
    matches!(name.to_ascii_uppercase().as_str(), "A" | "X" | "Y" | "Z" | "S" | "SP")
}
