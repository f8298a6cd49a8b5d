// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! MC6809 instruction table.
//!
//! Page 2 and page 3 opcodes carry their $10/$11 prefix in the high byte.
//! `TFR`/`EXG` and the stack push/pull instructions take a packed
//! register post-byte instead of an immediate operand.

use crate::families::m6800::{entry, AddressMode, FamilyInstructionEntry};

use AddressMode::*;

pub static CPU_INSTRUCTION_TABLE: &[FamilyInstructionEntry] = &[
    entry("NEG", Direct, 0x00),
    entry("COM", Direct, 0x03),
    entry("LSR", Direct, 0x04),
    entry("ROR", Direct, 0x06),
    entry("ASR", Direct, 0x07),
    entry("ASL", Direct, 0x08),
    entry("LSL", Direct, 0x08),
    entry("ROL", Direct, 0x09),
    entry("DEC", Direct, 0x0A),
    entry("INC", Direct, 0x0C),
    entry("TST", Direct, 0x0D),
    entry("JMP", Direct, 0x0E),
    entry("CLR", Direct, 0x0F),
    entry("NOP", Inherent, 0x12),
    entry("SYNC", Inherent, 0x13),
    entry("LBRA", Relative16, 0x16),
    entry("LBSR", Relative16, 0x17),
    entry("DAA", Inherent, 0x19),
    entry("ORCC", Immediate8, 0x1A),
    entry("ANDCC", Immediate8, 0x1C),
    entry("SEX", Inherent, 0x1D),
    entry("EXG", RegisterPair, 0x1E),
    entry("TFR", RegisterPair, 0x1F),
    entry("BRA", Relative8, 0x20),
    entry("BRN", Relative8, 0x21),
    entry("BHI", Relative8, 0x22),
    entry("BLS", Relative8, 0x23),
    entry("BCC", Relative8, 0x24),
    entry("BHS", Relative8, 0x24),
    entry("BCS", Relative8, 0x25),
    entry("BLO", Relative8, 0x25),
    entry("BNE", Relative8, 0x26),
    entry("BEQ", Relative8, 0x27),
    entry("BVC", Relative8, 0x28),
    entry("BVS", Relative8, 0x29),
    entry("BPL", Relative8, 0x2A),
    entry("BMI", Relative8, 0x2B),
    entry("BGE", Relative8, 0x2C),
    entry("BLT", Relative8, 0x2D),
    entry("BGT", Relative8, 0x2E),
    entry("BLE", Relative8, 0x2F),
    entry("LEAX", Indexed, 0x30),
    entry("LEAY", Indexed, 0x31),
    entry("LEAS", Indexed, 0x32),
    entry("LEAU", Indexed, 0x33),
    entry("PSHS", RegisterListS, 0x34),
    entry("PULS", RegisterListS, 0x35),
    entry("PSHU", RegisterListU, 0x36),
    entry("PULU", RegisterListU, 0x37),
    entry("RTS", Inherent, 0x39),
    entry("ABX", Inherent, 0x3A),
    entry("RTI", Inherent, 0x3B),
    entry("CWAI", Immediate8, 0x3C),
    entry("MUL", Inherent, 0x3D),
    entry("SWI", Inherent, 0x3F),
    entry("NEGA", Inherent, 0x40),
    entry("COMA", Inherent, 0x43),
    entry("LSRA", Inherent, 0x44),
    entry("RORA", Inherent, 0x46),
    entry("ASRA", Inherent, 0x47),
    entry("ASLA", Inherent, 0x48),
    entry("LSLA", Inherent, 0x48),
    entry("ROLA", Inherent, 0x49),
    entry("DECA", Inherent, 0x4A),
    entry("INCA", Inherent, 0x4C),
    entry("TSTA", Inherent, 0x4D),
    entry("CLRA", Inherent, 0x4F),
    entry("NEGB", Inherent, 0x50),
    entry("COMB", Inherent, 0x53),
    entry("LSRB", Inherent, 0x54),
    entry("RORB", Inherent, 0x56),
    entry("ASRB", Inherent, 0x57),
    entry("ASLB", Inherent, 0x58),
    entry("LSLB", Inherent, 0x58),
    entry("ROLB", Inherent, 0x59),
    entry("DECB", Inherent, 0x5A),
    entry("INCB", Inherent, 0x5C),
    entry("TSTB", Inherent, 0x5D),
    entry("CLRB", Inherent, 0x5F),
    entry("NEG", Indexed, 0x60),
    entry("COM", Indexed, 0x63),
    entry("LSR", Indexed, 0x64),
    entry("ROR", Indexed, 0x66),
    entry("ASR", Indexed, 0x67),
    entry("ASL", Indexed, 0x68),
    entry("LSL", Indexed, 0x68),
    entry("ROL", Indexed, 0x69),
    entry("DEC", Indexed, 0x6A),
    entry("INC", Indexed, 0x6C),
    entry("TST", Indexed, 0x6D),
    entry("JMP", Indexed, 0x6E),
    entry("CLR", Indexed, 0x6F),
    entry("NEG", Extended, 0x70),
    entry("COM", Extended, 0x73),
    entry("LSR", Extended, 0x74),
    entry("ROR", Extended, 0x76),
    entry("ASR", Extended, 0x77),
    entry("ASL", Extended, 0x78),
    entry("LSL", Extended, 0x78),
    entry("ROL", Extended, 0x79),
    entry("DEC", Extended, 0x7A),
    entry("INC", Extended, 0x7C),
    entry("TST", Extended, 0x7D),
    entry("JMP", Extended, 0x7E),
    entry("CLR", Extended, 0x7F),
    entry("SUBA", Immediate8, 0x80),
    entry("CMPA", Immediate8, 0x81),
    entry("SBCA", Immediate8, 0x82),
    entry("SUBD", Immediate16, 0x83),
    entry("ANDA", Immediate8, 0x84),
    entry("BITA", Immediate8, 0x85),
    entry("LDA", Immediate8, 0x86),
    entry("EORA", Immediate8, 0x88),
    entry("ADCA", Immediate8, 0x89),
    entry("ORA", Immediate8, 0x8A),
    entry("ADDA", Immediate8, 0x8B),
    entry("CMPX", Immediate16, 0x8C),
    entry("BSR", Relative8, 0x8D),
    entry("LDX", Immediate16, 0x8E),
    entry("SUBA", Direct, 0x90),
    entry("CMPA", Direct, 0x91),
    entry("SBCA", Direct, 0x92),
    entry("SUBD", Direct, 0x93),
    entry("ANDA", Direct, 0x94),
    entry("BITA", Direct, 0x95),
    entry("LDA", Direct, 0x96),
    entry("STA", Direct, 0x97),
    entry("EORA", Direct, 0x98),
    entry("ADCA", Direct, 0x99),
    entry("ORA", Direct, 0x9A),
    entry("ADDA", Direct, 0x9B),
    entry("CMPX", Direct, 0x9C),
    entry("JSR", Direct, 0x9D),
    entry("LDX", Direct, 0x9E),
    entry("STX", Direct, 0x9F),
    entry("SUBA", Indexed, 0xA0),
    entry("CMPA", Indexed, 0xA1),
    entry("SBCA", Indexed, 0xA2),
    entry("SUBD", Indexed, 0xA3),
    entry("ANDA", Indexed, 0xA4),
    entry("BITA", Indexed, 0xA5),
    entry("LDA", Indexed, 0xA6),
    entry("STA", Indexed, 0xA7),
    entry("EORA", Indexed, 0xA8),
    entry("ADCA", Indexed, 0xA9),
    entry("ORA", Indexed, 0xAA),
    entry("ADDA", Indexed, 0xAB),
    entry("CMPX", Indexed, 0xAC),
    entry("JSR", Indexed, 0xAD),
    entry("LDX", Indexed, 0xAE),
    entry("STX", Indexed, 0xAF),
    entry("SUBA", Extended, 0xB0),
    entry("CMPA", Extended, 0xB1),
    entry("SBCA", Extended, 0xB2),
    entry("SUBD", Extended, 0xB3),
    entry("ANDA", Extended, 0xB4),
    entry("BITA", Extended, 0xB5),
    entry("LDA", Extended, 0xB6),
    entry("STA", Extended, 0xB7),
    entry("EORA", Extended, 0xB8),
    entry("ADCA", Extended, 0xB9),
    entry("ORA", Extended, 0xBA),
    entry("ADDA", Extended, 0xBB),
    entry("CMPX", Extended, 0xBC),
    entry("JSR", Extended, 0xBD),
    entry("LDX", Extended, 0xBE),
    entry("STX", Extended, 0xBF),
    entry("SUBB", Immediate8, 0xC0),
    entry("CMPB", Immediate8, 0xC1),
    entry("SBCB", Immediate8, 0xC2),
    entry("ADDD", Immediate16, 0xC3),
    entry("ANDB", Immediate8, 0xC4),
    entry("BITB", Immediate8, 0xC5),
    entry("LDB", Immediate8, 0xC6),
    entry("EORB", Immediate8, 0xC8),
    entry("ADCB", Immediate8, 0xC9),
    entry("ORB", Immediate8, 0xCA),
    entry("ADDB", Immediate8, 0xCB),
    entry("LDD", Immediate16, 0xCC),
    entry("LDU", Immediate16, 0xCE),
    entry("SUBB", Direct, 0xD0),
    entry("CMPB", Direct, 0xD1),
    entry("SBCB", Direct, 0xD2),
    entry("ADDD", Direct, 0xD3),
    entry("ANDB", Direct, 0xD4),
    entry("BITB", Direct, 0xD5),
    entry("LDB", Direct, 0xD6),
    entry("STB", Direct, 0xD7),
    entry("EORB", Direct, 0xD8),
    entry("ADCB", Direct, 0xD9),
    entry("ORB", Direct, 0xDA),
    entry("ADDB", Direct, 0xDB),
    entry("LDD", Direct, 0xDC),
    entry("STD", Direct, 0xDD),
    entry("LDU", Direct, 0xDE),
    entry("STU", Direct, 0xDF),
    entry("SUBB", Indexed, 0xE0),
    entry("CMPB", Indexed, 0xE1),
    entry("SBCB", Indexed, 0xE2),
    entry("ADDD", Indexed, 0xE3),
    entry("ANDB", Indexed, 0xE4),
    entry("BITB", Indexed, 0xE5),
    entry("LDB", Indexed, 0xE6),
    entry("STB", Indexed, 0xE7),
    entry("EORB", Indexed, 0xE8),
    entry("ADCB", Indexed, 0xE9),
    entry("ORB", Indexed, 0xEA),
    entry("ADDB", Indexed, 0xEB),
    entry("LDD", Indexed, 0xEC),
    entry("STD", Indexed, 0xED),
    entry("LDU", Indexed, 0xEE),
    entry("STU", Indexed, 0xEF),
    entry("SUBB", Extended, 0xF0),
    entry("CMPB", Extended, 0xF1),
    entry("SBCB", Extended, 0xF2),
    entry("ADDD", Extended, 0xF3),
    entry("ANDB", Extended, 0xF4),
    entry("BITB", Extended, 0xF5),
    entry("LDB", Extended, 0xF6),
    entry("STB", Extended, 0xF7),
    entry("EORB", Extended, 0xF8),
    entry("ADCB", Extended, 0xF9),
    entry("ORB", Extended, 0xFA),
    entry("ADDB", Extended, 0xFB),
    entry("LDD", Extended, 0xFC),
    entry("STD", Extended, 0xFD),
    entry("LDU", Extended, 0xFE),
    entry("STU", Extended, 0xFF),
    entry("LBRN", Relative16, 0x1021),
    entry("LBHI", Relative16, 0x1022),
    entry("LBLS", Relative16, 0x1023),
    entry("LBCC", Relative16, 0x1024),
    entry("LBHS", Relative16, 0x1024),
    entry("LBCS", Relative16, 0x1025),
    entry("LBLO", Relative16, 0x1025),
    entry("LBNE", Relative16, 0x1026),
    entry("LBEQ", Relative16, 0x1027),
    entry("LBVC", Relative16, 0x1028),
    entry("LBVS", Relative16, 0x1029),
    entry("LBPL", Relative16, 0x102A),
    entry("LBMI", Relative16, 0x102B),
    entry("LBGE", Relative16, 0x102C),
    entry("LBLT", Relative16, 0x102D),
    entry("LBGT", Relative16, 0x102E),
    entry("LBLE", Relative16, 0x102F),
    entry("SWI2", Inherent, 0x103F),
    entry("CMPD", Immediate16, 0x1083),
    entry("CMPY", Immediate16, 0x108C),
    entry("LDY", Immediate16, 0x108E),
    entry("CMPD", Direct, 0x1093),
    entry("CMPY", Direct, 0x109C),
    entry("LDY", Direct, 0x109E),
    entry("STY", Direct, 0x109F),
    entry("CMPD", Indexed, 0x10A3),
    entry("CMPY", Indexed, 0x10AC),
    entry("LDY", Indexed, 0x10AE),
    entry("STY", Indexed, 0x10AF),
    entry("CMPD", Extended, 0x10B3),
    entry("CMPY", Extended, 0x10BC),
    entry("LDY", Extended, 0x10BE),
    entry("STY", Extended, 0x10BF),
    entry("LDS", Immediate16, 0x10CE),
    entry("LDS", Direct, 0x10DE),
    entry("STS", Direct, 0x10DF),
    entry("LDS", Indexed, 0x10EE),
    entry("STS", Indexed, 0x10EF),
    entry("LDS", Extended, 0x10FE),
    entry("STS", Extended, 0x10FF),
    entry("SWI3", Inherent, 0x113F),
    entry("CMPU", Immediate16, 0x1183),
    entry("CMPS", Immediate16, 0x118C),
    entry("CMPU", Direct, 0x1193),
    entry("CMPS", Direct, 0x119C),
    entry("CMPU", Indexed, 0x11A3),
    entry("CMPS", Indexed, 0x11AC),
    entry("CMPU", Extended, 0x11B3),
    entry("CMPS", Extended, 0x11BC),
    // Unsigned-compare aliases.
    entry("BHS", Relative8, 0x24),
    entry("BLO", Relative8, 0x25),
    entry("LBHS", Relative16, 0x1024),
    entry("LBLO", Relative16, 0x1025),
];
