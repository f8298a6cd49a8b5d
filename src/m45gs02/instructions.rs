// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! 65CE02 and 45GS02 instruction tables.
//!
//! The 65CE02 turns the 65C02 `(zp)` column into `(zp),z`; the old syntax
//! keeps encoding to the same opcode. The 45GS02 adds flat-memory `[zp],z`
//! behind an `EA` prefix and 32-bit Q operations behind `42 42`.

use crate::families::mos6502::AddressMode::*;
use crate::families::mos6502::{entry, FamilyInstructionEntry};

pub static CE02_INSTRUCTION_TABLE: &[FamilyInstructionEntry] = &[
    entry("CLE", Implied, 0x02),
    entry("SEE", Implied, 0x03),
    entry("TSY", Implied, 0x0B),
    entry("INZ", Implied, 0x1B),
    entry("TYS", Implied, 0x2B),
    entry("DEZ", Implied, 0x3B),
    entry("TAZ", Implied, 0x4B),
    entry("TAB", Implied, 0x5B),
    entry("TZA", Implied, 0x6B),
    entry("TBA", Implied, 0x7B),
    entry("PHZ", Implied, 0xDB),
    entry("PLZ", Implied, 0xFB),
    entry("NEG", Implied, 0x42),
    entry("ASR", Accumulator, 0x43),
    entry("ASR", ZeroPage, 0x44),
    entry("ASR", ZeroPageX, 0x54),
    entry("ORA", IndirectIndexedZ, 0x12),
    entry("AND", IndirectIndexedZ, 0x32),
    entry("EOR", IndirectIndexedZ, 0x52),
    entry("ADC", IndirectIndexedZ, 0x72),
    entry("STA", IndirectIndexedZ, 0x92),
    entry("LDA", IndirectIndexedZ, 0xB2),
    entry("CMP", IndirectIndexedZ, 0xD2),
    entry("SBC", IndirectIndexedZ, 0xF2),
    entry("BPL", RelativeLong, 0x13),
    entry("BMI", RelativeLong, 0x33),
    entry("BVC", RelativeLong, 0x53),
    entry("BSR", RelativeLong, 0x63),
    entry("BVS", RelativeLong, 0x73),
    entry("BRA", RelativeLong, 0x83),
    entry("BCC", RelativeLong, 0x93),
    entry("BCS", RelativeLong, 0xB3),
    entry("BNE", RelativeLong, 0xD3),
    entry("BEQ", RelativeLong, 0xF3),
    entry("JSR", Indirect, 0x22),
    entry("JSR", AbsoluteIndexedIndirect, 0x23),
    entry("RTS", Immediate, 0x62),
    entry("STA", StackRelativeIndirectY, 0x82),
    entry("LDA", StackRelativeIndirectY, 0xE2),
    entry("STY", AbsoluteX, 0x8B),
    entry("STX", AbsoluteY, 0x9B),
    entry("LDZ", Immediate, 0xA3),
    entry("LDZ", Absolute, 0xAB),
    entry("LDZ", AbsoluteX, 0xBB),
    entry("CPZ", Immediate, 0xC2),
    entry("CPZ", ZeroPage, 0xD4),
    entry("CPZ", Absolute, 0xDC),
    entry("DEW", ZeroPage, 0xC3),
    entry("INW", ZeroPage, 0xE3),
    entry("ASW", Absolute, 0xCB),
    entry("ROW", Absolute, 0xEB),
    entry("PHW", ImmediateWord, 0xF4),
    entry("PHW", Absolute, 0xFC),
];

pub static GS02_INSTRUCTION_TABLE: &[FamilyInstructionEntry] = &[
    entry("MAP", Implied, 0x5C),
    entry("EOM", Implied, 0xEA),
    entry("ORA", FlatIndirectZ, 0xEA12),
    entry("AND", FlatIndirectZ, 0xEA32),
    entry("EOR", FlatIndirectZ, 0xEA52),
    entry("ADC", FlatIndirectZ, 0xEA72),
    entry("STA", FlatIndirectZ, 0xEA92),
    entry("LDA", FlatIndirectZ, 0xEAB2),
    entry("CMP", FlatIndirectZ, 0xEAD2),
    entry("SBC", FlatIndirectZ, 0xEAF2),
    entry("ORQ", ZeroPage, 0x4242_05),
    entry("ORQ", Absolute, 0x4242_0D),
    entry("ORQ", IndirectIndexedZ, 0x4242_12),
    entry("ORQ", FlatIndirectZ, 0x4242_EA12),
    entry("ANDQ", ZeroPage, 0x4242_25),
    entry("ANDQ", Absolute, 0x4242_2D),
    entry("ANDQ", IndirectIndexedZ, 0x4242_32),
    entry("ANDQ", FlatIndirectZ, 0x4242_EA32),
    entry("EORQ", ZeroPage, 0x4242_45),
    entry("EORQ", Absolute, 0x4242_4D),
    entry("EORQ", IndirectIndexedZ, 0x4242_52),
    entry("EORQ", FlatIndirectZ, 0x4242_EA52),
    entry("ADCQ", ZeroPage, 0x4242_65),
    entry("ADCQ", Absolute, 0x4242_6D),
    entry("ADCQ", IndirectIndexedZ, 0x4242_72),
    entry("ADCQ", FlatIndirectZ, 0x4242_EA72),
    entry("STQ", ZeroPage, 0x4242_85),
    entry("STQ", Absolute, 0x4242_8D),
    entry("STQ", IndirectIndexedZ, 0x4242_92),
    entry("STQ", FlatIndirectZ, 0x4242_EA92),
    entry("LDQ", ZeroPage, 0x4242_A5),
    entry("LDQ", Absolute, 0x4242_AD),
    entry("LDQ", IndirectIndexedZ, 0x4242_B2),
    entry("LDQ", FlatIndirectZ, 0x4242_EAB2),
    entry("CMPQ", ZeroPage, 0x4242_C5),
    entry("CMPQ", Absolute, 0x4242_CD),
    entry("CMPQ", IndirectIndexedZ, 0x4242_D2),
    entry("CMPQ", FlatIndirectZ, 0x4242_EAD2),
    entry("SBCQ", ZeroPage, 0x4242_E5),
    entry("SBCQ", Absolute, 0x4242_ED),
    entry("SBCQ", IndirectIndexedZ, 0x4242_F2),
    entry("SBCQ", FlatIndirectZ, 0x4242_EAF2),
    entry("BITQ", ZeroPage, 0x4242_24),
    entry("BITQ", Absolute, 0x4242_2C),
    entry("ASLQ", Accumulator, 0x4242_0A),
    entry("ASLQ", ZeroPage, 0x4242_06),
    entry("ASLQ", ZeroPageX, 0x4242_16),
    entry("ASLQ", Absolute, 0x4242_0E),
    entry("ASLQ", AbsoluteX, 0x4242_1E),
    entry("ROLQ", Accumulator, 0x4242_2A),
    entry("ROLQ", ZeroPage, 0x4242_26),
    entry("ROLQ", ZeroPageX, 0x4242_36),
    entry("ROLQ", Absolute, 0x4242_2E),
    entry("ROLQ", AbsoluteX, 0x4242_3E),
    entry("LSRQ", Accumulator, 0x4242_4A),
    entry("LSRQ", ZeroPage, 0x4242_46),
    entry("LSRQ", ZeroPageX, 0x4242_56),
    entry("LSRQ", Absolute, 0x4242_4E),
    entry("LSRQ", AbsoluteX, 0x4242_5E),
    entry("RORQ", Accumulator, 0x4242_6A),
    entry("RORQ", ZeroPage, 0x4242_66),
    entry("RORQ", ZeroPageX, 0x4242_76),
    entry("RORQ", Absolute, 0x4242_6E),
    entry("RORQ", AbsoluteX, 0x4242_7E),
    entry("ASRQ", Accumulator, 0x4242_43),
    entry("ASRQ", ZeroPage, 0x4242_44),
    entry("ASRQ", ZeroPageX, 0x4242_54),
    entry("INQ", Accumulator, 0x4242_1A),
    entry("INQ", ZeroPage, 0x4242_E6),
    entry("INQ", ZeroPageX, 0x4242_F6),
    entry("INQ", Absolute, 0x4242_EE),
    entry("INQ", AbsoluteX, 0x4242_FE),
    entry("DEQ", Accumulator, 0x4242_3A),
    entry("DEQ", ZeroPage, 0x4242_C6),
    entry("DEQ", ZeroPageX, 0x4242_D6),
    entry("DEQ", Absolute, 0x4242_CE),
    entry("DEQ", AbsoluteX, 0x4242_DE),
];
