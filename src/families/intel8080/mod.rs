// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Intel 8080 family: the 8080, the Z80 and the Game Boy SM83.

pub mod form;
mod handler;
pub mod module;
pub mod table;

pub use form::{key, FormKey};
pub use handler::{
    I80CpuHandler, I80Profile, Intel8080FamilyHandler, INTEL_CALL_RETURN, ZILOG_CALL_RETURN,
};
pub use table::{entry, FamilyInstructionEntry, LayerBuilder};

/// Check if a name is a register of any CPU in the family.
pub fn is_register(name: &str) -> bool {
    matches!(
        name.to_ascii_uppercase().as_str(),
        "A" | "B"
            | "C"
            | "D"
            | "E"
            | "H"
            | "L"
            | "M"
            | "I"
            | "R"
            | "AF"
            | "AF'"
            | "BC"
            | "DE"
            | "HL"
            | "SP"
            | "PSW"
            | "IX"
            | "IY"
            | "IXH"
            | "IXL"
            | "IYH"
            | "IYL"
    )
}

/// Check if a name is a Zilog condition code.
pub fn is_condition(name: &str) -> bool {
    matches!(
        name.to_ascii_uppercase().as_str(),
        "NZ" | "Z" | "NC" | "C" | "PO" | "PE" | "P" | "M"
    )
}

pub fn is_index_register(name: &str) -> bool {
    matches!(name.to_ascii_uppercase().as_str(), "IX" | "IY")
}
