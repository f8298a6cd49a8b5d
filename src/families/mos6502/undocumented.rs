// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Stable undocumented NMOS opcodes (the `6502i` profile).

use crate::families::mos6502::table::{entry, FamilyInstructionEntry};
use crate::families::mos6502::AddressMode::*;

pub static UNDOCUMENTED_INSTRUCTION_TABLE: &[FamilyInstructionEntry] = &[
    entry("SLO", ZeroPage, 0x07),
    entry("SLO", ZeroPageX, 0x17),
    entry("SLO", Absolute, 0x0F),
    entry("SLO", AbsoluteX, 0x1F),
    entry("SLO", AbsoluteY, 0x1B),
    entry("SLO", IndexedIndirectX, 0x03),
    entry("SLO", IndirectIndexedY, 0x13),
    entry("RLA", ZeroPage, 0x27),
    entry("RLA", ZeroPageX, 0x37),
    entry("RLA", Absolute, 0x2F),
    entry("RLA", AbsoluteX, 0x3F),
    entry("RLA", AbsoluteY, 0x3B),
    entry("RLA", IndexedIndirectX, 0x23),
    entry("RLA", IndirectIndexedY, 0x33),
    entry("SRE", ZeroPage, 0x47),
    entry("SRE", ZeroPageX, 0x57),
    entry("SRE", Absolute, 0x4F),
    entry("SRE", AbsoluteX, 0x5F),
    entry("SRE", AbsoluteY, 0x5B),
    entry("SRE", IndexedIndirectX, 0x43),
    entry("SRE", IndirectIndexedY, 0x53),
    entry("RRA", ZeroPage, 0x67),
    entry("RRA", ZeroPageX, 0x77),
    entry("RRA", Absolute, 0x6F),
    entry("RRA", AbsoluteX, 0x7F),
    entry("RRA", AbsoluteY, 0x7B),
    entry("RRA", IndexedIndirectX, 0x63),
    entry("RRA", IndirectIndexedY, 0x73),
    entry("SAX", ZeroPage, 0x87),
    entry("SAX", ZeroPageY, 0x97),
    entry("SAX", Absolute, 0x8F),
    entry("SAX", IndexedIndirectX, 0x83),
    entry("LAX", ZeroPage, 0xA7),
    entry("LAX", ZeroPageY, 0xB7),
    entry("LAX", Absolute, 0xAF),
    entry("LAX", AbsoluteY, 0xBF),
    entry("LAX", IndexedIndirectX, 0xA3),
    entry("LAX", IndirectIndexedY, 0xB3),
    entry("DCP", ZeroPage, 0xC7),
    entry("DCP", ZeroPageX, 0xD7),
    entry("DCP", Absolute, 0xCF),
    entry("DCP", AbsoluteX, 0xDF),
    entry("DCP", AbsoluteY, 0xDB),
    entry("DCP", IndexedIndirectX, 0xC3),
    entry("DCP", IndirectIndexedY, 0xD3),
    entry("ISC", ZeroPage, 0xE7),
    entry("ISC", ZeroPageX, 0xF7),
    entry("ISC", Absolute, 0xEF),
    entry("ISC", AbsoluteX, 0xFF),
    entry("ISC", AbsoluteY, 0xFB),
    entry("ISC", IndexedIndirectX, 0xE3),
    entry("ISC", IndirectIndexedY, 0xF3),
    entry("ANC", Immediate, 0x0B),
    entry("ALR", Immediate, 0x4B),
    entry("ARR", Immediate, 0x6B),
    entry("SBX", Immediate, 0xCB),
    entry("LAS", AbsoluteY, 0xBB),
    entry("TAS", AbsoluteY, 0x9B),
    entry("SHY", AbsoluteX, 0x9C),
    entry("SHX", AbsoluteY, 0x9E),
    entry("SHA", AbsoluteY, 0x9F),
    entry("SHA", IndirectIndexedY, 0x93),
];
