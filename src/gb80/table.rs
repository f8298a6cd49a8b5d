// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! SM83 instruction layer.
//!
//! The Zilog core minus the parity/sign conditions, with SWAP in place of
//! SLL and the Game Boy high-page and post-increment loads.

use crate::core::catalog::CatalogLayer;
use crate::families::intel8080::table::{add_cb_group, add_zilog_core, ZILOG_CONDITIONS};
use crate::families::intel8080::{entry, FamilyInstructionEntry, FormKey, LayerBuilder};

const GB_SHIFTS: [&str; 8] = ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SWAP", "SRL"];

static GB_LISTED: &[FamilyInstructionEntry] = &[
    entry("LD", "(nn),SP", 0x08),
    entry("STOP", "", 0x1000),
    entry("LD", "(HL+),A", 0x22),
    entry("LD", "A,(HL+)", 0x2A),
    entry("LD", "(HL-),A", 0x32),
    entry("LD", "A,(HL-)", 0x3A),
    entry("RETI", "", 0xD9),
    entry("LDH", "(n),A", 0xE0),
    entry("LD", "(C),A", 0xE2),
    entry("ADD", "SP,d", 0xE8),
    entry("LD", "(nn),A", 0xEA),
    entry("LDH", "A,(n)", 0xF0),
    entry("LD", "A,(C)", 0xF2),
    entry("LD", "HL,SP+d", 0xF8),
    entry("LD", "A,(nn)", 0xFA),
    // Alternate spellings.
    entry("LDI", "(HL),A", 0x22),
    entry("LDI", "A,(HL)", 0x2A),
    entry("LDD", "(HL),A", 0x32),
    entry("LDD", "A,(HL)", 0x3A),
    entry("LDH", "(C),A", 0xE2),
    entry("LDH", "A,(C)", 0xF2),
    entry("JP", "HL", 0xE9),
];

pub fn gb80_layer() -> CatalogLayer<FormKey> {
    let mut builder = LayerBuilder::new("gb80");
    add_zilog_core(&mut builder, &ZILOG_CONDITIONS[..4]);
    builder.extend(GB_LISTED);
    add_cb_group(&mut builder, &GB_SHIFTS);
    builder.finish()
}
