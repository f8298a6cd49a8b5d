// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! 65816 additions over the 65C02.

use crate::families::mos6502::AddressMode::*;
use crate::families::mos6502::{entry, FamilyInstructionEntry};

/// Accumulator immediates sized by the M flag.
pub const M_IMMEDIATE: &[&str] = &["ADC", "AND", "BIT", "CMP", "EOR", "LDA", "ORA", "SBC"];
/// Index immediates sized by the X flag.
pub const X_IMMEDIATE: &[&str] = &["CPX", "CPY", "LDX", "LDY"];

pub static CPU_INSTRUCTION_TABLE: &[FamilyInstructionEntry] = &[
    entry("ADC", ImmediateM, 0x69),
    entry("AND", ImmediateM, 0x29),
    entry("BIT", ImmediateM, 0x89),
    entry("CMP", ImmediateM, 0xC9),
    entry("EOR", ImmediateM, 0x49),
    entry("LDA", ImmediateM, 0xA9),
    entry("ORA", ImmediateM, 0x09),
    entry("SBC", ImmediateM, 0xE9),
    entry("CPX", ImmediateX, 0xE0),
    entry("CPY", ImmediateX, 0xC0),
    entry("LDX", ImmediateX, 0xA2),
    entry("LDY", ImmediateX, 0xA0),
    entry("ORA", StackRelative, 0x03),
    entry("ORA", IndirectLong, 0x07),
    entry("ORA", AbsoluteLong, 0x0F),
    entry("ORA", StackRelativeIndirectY, 0x13),
    entry("ORA", IndirectLongY, 0x17),
    entry("ORA", AbsoluteLongX, 0x1F),
    entry("AND", StackRelative, 0x23),
    entry("AND", IndirectLong, 0x27),
    entry("AND", AbsoluteLong, 0x2F),
    entry("AND", StackRelativeIndirectY, 0x33),
    entry("AND", IndirectLongY, 0x37),
    entry("AND", AbsoluteLongX, 0x3F),
    entry("EOR", StackRelative, 0x43),
    entry("EOR", IndirectLong, 0x47),
    entry("EOR", AbsoluteLong, 0x4F),
    entry("EOR", StackRelativeIndirectY, 0x53),
    entry("EOR", IndirectLongY, 0x57),
    entry("EOR", AbsoluteLongX, 0x5F),
    entry("ADC", StackRelative, 0x63),
    entry("ADC", IndirectLong, 0x67),
    entry("ADC", AbsoluteLong, 0x6F),
    entry("ADC", StackRelativeIndirectY, 0x73),
    entry("ADC", IndirectLongY, 0x77),
    entry("ADC", AbsoluteLongX, 0x7F),
    entry("STA", StackRelative, 0x83),
    entry("STA", IndirectLong, 0x87),
    entry("STA", AbsoluteLong, 0x8F),
    entry("STA", StackRelativeIndirectY, 0x93),
    entry("STA", IndirectLongY, 0x97),
    entry("STA", AbsoluteLongX, 0x9F),
    entry("LDA", StackRelative, 0xA3),
    entry("LDA", IndirectLong, 0xA7),
    entry("LDA", AbsoluteLong, 0xAF),
    entry("LDA", StackRelativeIndirectY, 0xB3),
    entry("LDA", IndirectLongY, 0xB7),
    entry("LDA", AbsoluteLongX, 0xBF),
    entry("CMP", StackRelative, 0xC3),
    entry("CMP", IndirectLong, 0xC7),
    entry("CMP", AbsoluteLong, 0xCF),
    entry("CMP", StackRelativeIndirectY, 0xD3),
    entry("CMP", IndirectLongY, 0xD7),
    entry("CMP", AbsoluteLongX, 0xDF),
    entry("SBC", StackRelative, 0xE3),
    entry("SBC", IndirectLong, 0xE7),
    entry("SBC", AbsoluteLong, 0xEF),
    entry("SBC", StackRelativeIndirectY, 0xF3),
    entry("SBC", IndirectLongY, 0xF7),
    entry("SBC", AbsoluteLongX, 0xFF),
    entry("BRL", RelativeLong, 0x82),
    entry("PER", RelativeLong, 0x62),
    entry("COP", Immediate, 0x02),
    entry("WDM", Immediate, 0x42),
    entry("REP", Immediate, 0xC2),
    entry("SEP", Immediate, 0xE2),
    entry("JML", AbsoluteLong, 0x5C),
    entry("JML", AbsoluteIndirectLong, 0xDC),
    entry("JMP", AbsoluteLong, 0x5C),
    entry("JMP", AbsoluteIndirectLong, 0xDC),
    entry("JSL", AbsoluteLong, 0x22),
    entry("JSR", AbsoluteLong, 0x22),
    entry("JSR", AbsoluteIndexedIndirect, 0xFC),
    entry("MVN", BlockMove, 0x54),
    entry("MVP", BlockMove, 0x44),
    entry("PEA", Absolute, 0xF4),
    entry("PEA", ImmediateWord, 0xF4),
    entry("PEI", ZeroPageIndirect, 0xD4),
    entry("PHB", Implied, 0x8B),
    entry("PHD", Implied, 0x0B),
    entry("PHK", Implied, 0x4B),
    entry("PLB", Implied, 0xAB),
    entry("PLD", Implied, 0x2B),
    entry("RTL", Implied, 0x6B),
    entry("STP", Implied, 0xDB),
    entry("WAI", Implied, 0xCB),
    entry("TCD", Implied, 0x5B),
    entry("TCS", Implied, 0x1B),
    entry("TDC", Implied, 0x7B),
    entry("TSC", Implied, 0x3B),
    entry("TXY", Implied, 0x9B),
    entry("TYX", Implied, 0xBB),
    entry("XBA", Implied, 0xEB),
    entry("XCE", Implied, 0xFB),
];
