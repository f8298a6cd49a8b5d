// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Instruction table for the Motorola 6800.
//!
//! The 6809 is source-incompatible with the 6800 and carries its own table
//! (`m6809::instructions`); both are built into layers the same way.

use crate::core::catalog::{CatalogLayer, OpcodeKey};
use crate::core::cpu::ByteOrder;
use crate::core::descriptor::InstructionDescriptor;

use super::operand::{key, AddressMode, M68Key};

use AddressMode::*;

#[derive(Debug, Clone, Copy)]
pub struct FamilyInstructionEntry {
    pub mnemonic: &'static str,
    pub mode: AddressMode,
    /// Composite opcode; the 6809 page prefixes $10/$11 sit in the high byte.
    pub opcode: u32,
}

pub const fn entry(mnemonic: &'static str, mode: AddressMode, opcode: u32) -> FamilyInstructionEntry {
    FamilyInstructionEntry {
        mnemonic,
        mode,
        opcode,
    }
}

pub fn build_layer(name: &'static str, entries: &[FamilyInstructionEntry]) -> CatalogLayer<M68Key> {
    let mut layer = CatalogLayer::new(name);
    for item in entries {
        let mnemonic = item.mnemonic.to_ascii_lowercase();
        let descriptor = InstructionDescriptor::new(
            OpcodeKey::new(item.opcode),
            &mnemonic,
            item.mode.template().replace("{m}", &mnemonic),
            item.mode.fields(),
            ByteOrder::Big,
        );
        layer.insert(key(item.mnemonic, item.mode), descriptor);
    }
    layer
}

pub static FAMILY_INSTRUCTION_TABLE: &[FamilyInstructionEntry] = &[
    entry("NOP", Inherent, 0x01),
    entry("TAP", Inherent, 0x06),
    entry("TPA", Inherent, 0x07),
    entry("INX", Inherent, 0x08),
    entry("DEX", Inherent, 0x09),
    entry("CLV", Inherent, 0x0A),
    entry("SEV", Inherent, 0x0B),
    entry("CLC", Inherent, 0x0C),
    entry("SEC", Inherent, 0x0D),
    entry("CLI", Inherent, 0x0E),
    entry("SEI", Inherent, 0x0F),
    entry("SBA", Inherent, 0x10),
    entry("CBA", Inherent, 0x11),
    entry("TAB", Inherent, 0x16),
    entry("TBA", Inherent, 0x17),
    entry("DAA", Inherent, 0x19),
    entry("ABA", Inherent, 0x1B),
    entry("BRA", Relative8, 0x20),
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
    entry("TSX", Inherent, 0x30),
    entry("INS", Inherent, 0x31),
    entry("PULA", Inherent, 0x32),
    entry("PULB", Inherent, 0x33),
    entry("DES", Inherent, 0x34),
    entry("TXS", Inherent, 0x35),
    entry("PSHA", Inherent, 0x36),
    entry("PSHB", Inherent, 0x37),
    entry("RTS", Inherent, 0x39),
    entry("RTI", Inherent, 0x3B),
    entry("WAI", Inherent, 0x3E),
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
    entry("NEG", IndexedByte, 0x60),
    entry("NEG", Extended, 0x70),
    entry("COM", IndexedByte, 0x63),
    entry("COM", Extended, 0x73),
    entry("LSR", IndexedByte, 0x64),
    entry("LSR", Extended, 0x74),
    entry("ROR", IndexedByte, 0x66),
    entry("ROR", Extended, 0x76),
    entry("ASR", IndexedByte, 0x67),
    entry("ASR", Extended, 0x77),
    entry("ASL", IndexedByte, 0x68),
    entry("ASL", Extended, 0x78),
    entry("LSL", IndexedByte, 0x68),
    entry("LSL", Extended, 0x78),
    entry("ROL", IndexedByte, 0x69),
    entry("ROL", Extended, 0x79),
    entry("DEC", IndexedByte, 0x6A),
    entry("DEC", Extended, 0x7A),
    entry("INC", IndexedByte, 0x6C),
    entry("INC", Extended, 0x7C),
    entry("TST", IndexedByte, 0x6D),
    entry("TST", Extended, 0x7D),
    entry("JMP", IndexedByte, 0x6E),
    entry("JMP", Extended, 0x7E),
    entry("CLR", IndexedByte, 0x6F),
    entry("CLR", Extended, 0x7F),
    entry("SUBA", Immediate8, 0x80),
    entry("SUBA", Direct, 0x90),
    entry("SUBA", IndexedByte, 0xA0),
    entry("SUBA", Extended, 0xB0),
    entry("CMPA", Immediate8, 0x81),
    entry("CMPA", Direct, 0x91),
    entry("CMPA", IndexedByte, 0xA1),
    entry("CMPA", Extended, 0xB1),
    entry("SBCA", Immediate8, 0x82),
    entry("SBCA", Direct, 0x92),
    entry("SBCA", IndexedByte, 0xA2),
    entry("SBCA", Extended, 0xB2),
    entry("ANDA", Immediate8, 0x84),
    entry("ANDA", Direct, 0x94),
    entry("ANDA", IndexedByte, 0xA4),
    entry("ANDA", Extended, 0xB4),
    entry("BITA", Immediate8, 0x85),
    entry("BITA", Direct, 0x95),
    entry("BITA", IndexedByte, 0xA5),
    entry("BITA", Extended, 0xB5),
    entry("LDAA", Immediate8, 0x86),
    entry("LDAA", Direct, 0x96),
    entry("LDAA", IndexedByte, 0xA6),
    entry("LDAA", Extended, 0xB6),
    entry("STAA", Direct, 0x97),
    entry("STAA", IndexedByte, 0xA7),
    entry("STAA", Extended, 0xB7),
    entry("EORA", Immediate8, 0x88),
    entry("EORA", Direct, 0x98),
    entry("EORA", IndexedByte, 0xA8),
    entry("EORA", Extended, 0xB8),
    entry("ADCA", Immediate8, 0x89),
    entry("ADCA", Direct, 0x99),
    entry("ADCA", IndexedByte, 0xA9),
    entry("ADCA", Extended, 0xB9),
    entry("ORAA", Immediate8, 0x8A),
    entry("ORAA", Direct, 0x9A),
    entry("ORAA", IndexedByte, 0xAA),
    entry("ORAA", Extended, 0xBA),
    entry("ADDA", Immediate8, 0x8B),
    entry("ADDA", Direct, 0x9B),
    entry("ADDA", IndexedByte, 0xAB),
    entry("ADDA", Extended, 0xBB),
    entry("CPX", Immediate16, 0x8C),
    entry("CPX", Direct, 0x9C),
    entry("CPX", IndexedByte, 0xAC),
    entry("CPX", Extended, 0xBC),
    entry("BSR", Relative8, 0x8D),
    entry("LDS", Immediate16, 0x8E),
    entry("LDS", Direct, 0x9E),
    entry("LDS", IndexedByte, 0xAE),
    entry("LDS", Extended, 0xBE),
    entry("STS", Direct, 0x9F),
    entry("STS", IndexedByte, 0xAF),
    entry("STS", Extended, 0xBF),
    entry("JSR", IndexedByte, 0xAD),
    entry("JSR", Extended, 0xBD),
    entry("SUBB", Immediate8, 0xC0),
    entry("SUBB", Direct, 0xD0),
    entry("SUBB", IndexedByte, 0xE0),
    entry("SUBB", Extended, 0xF0),
    entry("CMPB", Immediate8, 0xC1),
    entry("CMPB", Direct, 0xD1),
    entry("CMPB", IndexedByte, 0xE1),
    entry("CMPB", Extended, 0xF1),
    entry("SBCB", Immediate8, 0xC2),
    entry("SBCB", Direct, 0xD2),
    entry("SBCB", IndexedByte, 0xE2),
    entry("SBCB", Extended, 0xF2),
    entry("ANDB", Immediate8, 0xC4),
    entry("ANDB", Direct, 0xD4),
    entry("ANDB", IndexedByte, 0xE4),
    entry("ANDB", Extended, 0xF4),
    entry("BITB", Immediate8, 0xC5),
    entry("BITB", Direct, 0xD5),
    entry("BITB", IndexedByte, 0xE5),
    entry("BITB", Extended, 0xF5),
    entry("LDAB", Immediate8, 0xC6),
    entry("LDAB", Direct, 0xD6),
    entry("LDAB", IndexedByte, 0xE6),
    entry("LDAB", Extended, 0xF6),
    entry("STAB", Direct, 0xD7),
    entry("STAB", IndexedByte, 0xE7),
    entry("STAB", Extended, 0xF7),
    entry("EORB", Immediate8, 0xC8),
    entry("EORB", Direct, 0xD8),
    entry("EORB", IndexedByte, 0xE8),
    entry("EORB", Extended, 0xF8),
    entry("ADCB", Immediate8, 0xC9),
    entry("ADCB", Direct, 0xD9),
    entry("ADCB", IndexedByte, 0xE9),
    entry("ADCB", Extended, 0xF9),
    entry("ORAB", Immediate8, 0xCA),
    entry("ORAB", Direct, 0xDA),
    entry("ORAB", IndexedByte, 0xEA),
    entry("ORAB", Extended, 0xFA),
    entry("ADDB", Immediate8, 0xCB),
    entry("ADDB", Direct, 0xDB),
    entry("ADDB", IndexedByte, 0xEB),
    entry("ADDB", Extended, 0xFB),
    entry("LDX", Immediate16, 0xCE),
    entry("LDX", Direct, 0xDE),
    entry("LDX", IndexedByte, 0xEE),
    entry("LDX", Extended, 0xFE),
    entry("STX", Direct, 0xDF),
    entry("STX", IndexedByte, 0xEF),
    entry("STX", Extended, 0xFF),
];
