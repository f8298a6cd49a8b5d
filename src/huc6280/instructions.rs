// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! HuC6280 additions over the R65C02.

use crate::families::mos6502::AddressMode::*;
use crate::families::mos6502::{entry, FamilyInstructionEntry};

pub static CPU_INSTRUCTION_TABLE: &[FamilyInstructionEntry] = &[
    entry("SXY", Implied, 0x02),
    entry("SAX", Implied, 0x22),
    entry("SAY", Implied, 0x42),
    entry("ST0", Immediate, 0x03),
    entry("ST1", Immediate, 0x13),
    entry("ST2", Immediate, 0x23),
    entry("TMA", Immediate, 0x43),
    entry("TAM", Immediate, 0x53),
    entry("BSR", Relative, 0x44),
    entry("CSL", Implied, 0x54),
    entry("CSH", Implied, 0xD4),
    entry("CLA", Implied, 0x62),
    entry("CLX", Implied, 0x82),
    entry("CLY", Implied, 0xC2),
    entry("SET", Implied, 0xF4),
    entry("TST", ImmediateZeroPage, 0x83),
    entry("TST", ImmediateAbsolute, 0x93),
    entry("TST", ImmediateZeroPageX, 0xA3),
    entry("TST", ImmediateAbsoluteX, 0xB3),
    entry("TII", BlockTransfer, 0x73),
    entry("TDD", BlockTransfer, 0xC3),
    entry("TIN", BlockTransfer, 0xD3),
    entry("TIA", BlockTransfer, 0xE3),
    entry("TAI", BlockTransfer, 0xF3),
];
