// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! CMOS additions: the WDC/Rockwell 65C02 and its bit-manipulation and
//! low-power variants.

use crate::families::mos6502::AddressMode::*;
use crate::families::mos6502::{entry, FamilyInstructionEntry};

pub static CPU_INSTRUCTION_TABLE: &[FamilyInstructionEntry] = &[
    entry("ADC", ZeroPageIndirect, 0x72),
    entry("AND", ZeroPageIndirect, 0x32),
    entry("CMP", ZeroPageIndirect, 0xD2),
    entry("EOR", ZeroPageIndirect, 0x52),
    entry("LDA", ZeroPageIndirect, 0xB2),
    entry("ORA", ZeroPageIndirect, 0x12),
    entry("SBC", ZeroPageIndirect, 0xF2),
    entry("STA", ZeroPageIndirect, 0x92),
    entry("BIT", Immediate, 0x89),
    entry("BIT", ZeroPageX, 0x34),
    entry("BIT", AbsoluteX, 0x3C),
    entry("DEC", Accumulator, 0x3A),
    entry("INC", Accumulator, 0x1A),
    entry("JMP", AbsoluteIndexedIndirect, 0x7C),
    entry("BRA", Relative, 0x80),
    entry("PHX", Implied, 0xDA),
    entry("PHY", Implied, 0x5A),
    entry("PLX", Implied, 0xFA),
    entry("PLY", Implied, 0x7A),
    entry("STZ", ZeroPage, 0x64),
    entry("STZ", ZeroPageX, 0x74),
    entry("STZ", Absolute, 0x9C),
    entry("STZ", AbsoluteX, 0x9E),
    entry("TRB", ZeroPage, 0x14),
    entry("TRB", Absolute, 0x1C),
    entry("TSB", ZeroPage, 0x04),
    entry("TSB", Absolute, 0x0C),
];

/// Rockwell bit instructions; the bit number is part of the mnemonic.
pub static ROCKWELL_INSTRUCTION_TABLE: &[FamilyInstructionEntry] = &[
    entry("RMB0", ZeroPage, 0x07),
    entry("RMB1", ZeroPage, 0x17),
    entry("RMB2", ZeroPage, 0x27),
    entry("RMB3", ZeroPage, 0x37),
    entry("RMB4", ZeroPage, 0x47),
    entry("RMB5", ZeroPage, 0x57),
    entry("RMB6", ZeroPage, 0x67),
    entry("RMB7", ZeroPage, 0x77),
    entry("SMB0", ZeroPage, 0x87),
    entry("SMB1", ZeroPage, 0x97),
    entry("SMB2", ZeroPage, 0xA7),
    entry("SMB3", ZeroPage, 0xB7),
    entry("SMB4", ZeroPage, 0xC7),
    entry("SMB5", ZeroPage, 0xD7),
    entry("SMB6", ZeroPage, 0xE7),
    entry("SMB7", ZeroPage, 0xF7),
    entry("BBR0", ZeroPageRelative, 0x0F),
    entry("BBR1", ZeroPageRelative, 0x1F),
    entry("BBR2", ZeroPageRelative, 0x2F),
    entry("BBR3", ZeroPageRelative, 0x3F),
    entry("BBR4", ZeroPageRelative, 0x4F),
    entry("BBR5", ZeroPageRelative, 0x5F),
    entry("BBR6", ZeroPageRelative, 0x6F),
    entry("BBR7", ZeroPageRelative, 0x7F),
    entry("BBS0", ZeroPageRelative, 0x8F),
    entry("BBS1", ZeroPageRelative, 0x9F),
    entry("BBS2", ZeroPageRelative, 0xAF),
    entry("BBS3", ZeroPageRelative, 0xBF),
    entry("BBS4", ZeroPageRelative, 0xCF),
    entry("BBS5", ZeroPageRelative, 0xDF),
    entry("BBS6", ZeroPageRelative, 0xEF),
    entry("BBS7", ZeroPageRelative, 0xFF),
];

/// WDC low-power instructions.
pub static WDC_INSTRUCTION_TABLE: &[FamilyInstructionEntry] = &[
    entry("WAI", Implied, 0xCB),
    entry("STP", Implied, 0xDB),
];
