// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Instruction tables for the Intel 8080 family.
//!
//! The regular opcode blocks (register moves, ALU groups, condition codes,
//! RST vectors, CB rotates and bit operations) are generated from their
//! register fields; irregular instructions are listed. The 8080 layer lives
//! here; the Z80 and SM83 layers reuse the Zilog-syntax generators.

use crate::core::catalog::{CatalogLayer, OpcodeKey, OpcodeLayout};
use crate::core::cpu::ByteOrder;
use crate::core::descriptor::InstructionDescriptor;

use super::form::{key, template, FormKey};

/// One listed instruction.
#[derive(Debug, Clone, Copy)]
pub struct FamilyInstructionEntry {
    pub mnemonic: &'static str,
    pub form: &'static str,
    pub opcode: u32,
}

pub const fn entry(mnemonic: &'static str, form: &'static str, opcode: u32) -> FamilyInstructionEntry {
    FamilyInstructionEntry {
        mnemonic,
        form,
        opcode,
    }
}

/// Accumulates one catalog layer.
pub struct LayerBuilder {
    layer: CatalogLayer<FormKey>,
}

impl LayerBuilder {
    pub fn new(name: &'static str) -> Self {
        Self {
            layer: CatalogLayer::new(name),
        }
    }

    fn insert(&mut self, mnemonic: &str, form: &str, opcode: u32, layout: OpcodeLayout) {
        let (text, fields) = template(mnemonic, form);
        let descriptor = InstructionDescriptor::new(
            OpcodeKey::new(opcode),
            mnemonic,
            text,
            fields,
            ByteOrder::Little,
        )
        .with_layout(layout);
        self.layer.insert(key(mnemonic, form), descriptor);
    }

    pub fn add(&mut self, mnemonic: &str, form: &str, opcode: u32) -> &mut Self {
        self.insert(mnemonic, form, opcode, OpcodeLayout::Standard);
        self
    }

    /// `DD CB d op` / `FD CB d op`.
    pub fn add_displaced(&mut self, mnemonic: &str, form: &str, opcode: u32) -> &mut Self {
        self.insert(mnemonic, form, opcode, OpcodeLayout::DisplacementBeforeOpcode);
        self
    }

    pub fn extend(&mut self, entries: &[FamilyInstructionEntry]) -> &mut Self {
        for item in entries {
            self.add(item.mnemonic, item.form, item.opcode);
        }
        self
    }

    pub fn finish(self) -> CatalogLayer<FormKey> {
        self.layer
    }
}

/// 3-bit register field order for Zilog syntax.
pub const ZILOG_REGISTERS: [&str; 8] = ["B", "C", "D", "E", "H", "L", "(HL)", "A"];
/// 3-bit register field order for Intel syntax.
pub const INTEL_REGISTERS: [&str; 8] = ["B", "C", "D", "E", "H", "L", "M", "A"];
pub const ZILOG_PAIRS: [&str; 4] = ["BC", "DE", "HL", "SP"];
pub const ZILOG_STACK_PAIRS: [&str; 4] = ["BC", "DE", "HL", "AF"];
pub const ZILOG_CONDITIONS: [&str; 8] = ["NZ", "Z", "NC", "C", "PO", "PE", "P", "M"];

/// CB-prefix shift and rotate group, in opcode order.
pub const CB_SHIFTS: [&str; 8] = ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SLL", "SRL"];

/// ALU group in opcode order; `true` when the accumulator must be written.
pub const ALU_ZILOG: [(&str, bool); 8] = [
    ("ADD", true),
    ("ADC", true),
    ("SUB", false),
    ("SBC", true),
    ("AND", false),
    ("XOR", false),
    ("OR", false),
    ("CP", false),
];

/// Zilog-syntax instructions shared by the Z80 and the SM83.
///
/// `conditions` limits JP/CALL/RET condition codes; JR always takes the
/// first four.
pub fn add_zilog_core(builder: &mut LayerBuilder, conditions: &[&str]) {
    for (dst, dst_name) in ZILOG_REGISTERS.iter().enumerate() {
        for (src, src_name) in ZILOG_REGISTERS.iter().enumerate() {
            if dst == 6 && src == 6 {
                continue;
            }
            let opcode = 0x40 | (dst << 3) as u32 | src as u32;
            builder.add("LD", &format!("{dst_name},{src_name}"), opcode);
        }
        let code = (dst << 3) as u32;
        builder.add("LD", &format!("{dst_name},n"), 0x06 | code);
        builder.add("INC", dst_name, 0x04 | code);
        builder.add("DEC", dst_name, 0x05 | code);
    }
    builder.add("HALT", "", 0x76);

    for (op, (mnemonic, explicit_a)) in ALU_ZILOG.iter().enumerate() {
        let base = (op << 3) as u32;
        for (reg, name) in ZILOG_REGISTERS.iter().enumerate() {
            let opcode = 0x80 | base | reg as u32;
            if *explicit_a {
                builder.add(mnemonic, &format!("A,{name}"), opcode);
            } else {
                builder.add(mnemonic, name, opcode);
                builder.add(mnemonic, &format!("A,{name}"), opcode);
            }
        }
        let opcode = 0xC6 | base;
        if *explicit_a {
            builder.add(mnemonic, "A,n", opcode);
        } else {
            builder.add(mnemonic, "n", opcode);
            builder.add(mnemonic, "A,n", opcode);
        }
    }

    for (pair, name) in ZILOG_PAIRS.iter().enumerate() {
        let code = (pair << 4) as u32;
        builder.add("LD", &format!("{name},nn"), 0x01 | code);
        builder.add("INC", name, 0x03 | code);
        builder.add("DEC", name, 0x0B | code);
        builder.add("ADD", &format!("HL,{name}"), 0x09 | code);
    }
    for (pair, name) in ZILOG_STACK_PAIRS.iter().enumerate() {
        let code = (pair << 4) as u32;
        builder.add("POP", name, 0xC1 | code);
        builder.add("PUSH", name, 0xC5 | code);
    }

    for (cc, name) in conditions.iter().enumerate() {
        let code = (cc << 3) as u32;
        builder.add("RET", name, 0xC0 | code);
        builder.add("JP", &format!("{name},nn"), 0xC2 | code);
        builder.add("CALL", &format!("{name},nn"), 0xC4 | code);
        if cc < 4 {
            builder.add("JR", &format!("{name},e"), 0x20 | code);
        }
    }
    for vector in 0..8u32 {
        builder.add("RST", &format!("${:02X}", vector << 3), 0xC7 | (vector << 3));
    }

    builder
        .add("NOP", "", 0x00)
        .add("LD", "(BC),A", 0x02)
        .add("LD", "A,(BC)", 0x0A)
        .add("LD", "(DE),A", 0x12)
        .add("LD", "A,(DE)", 0x1A)
        .add("RLCA", "", 0x07)
        .add("RRCA", "", 0x0F)
        .add("RLA", "", 0x17)
        .add("RRA", "", 0x1F)
        .add("JR", "e", 0x18)
        .add("DAA", "", 0x27)
        .add("CPL", "", 0x2F)
        .add("SCF", "", 0x37)
        .add("CCF", "", 0x3F)
        .add("RET", "", 0xC9)
        .add("JP", "nn", 0xC3)
        .add("CALL", "nn", 0xCD)
        .add("JP", "(HL)", 0xE9)
        .add("LD", "SP,HL", 0xF9)
        .add("DI", "", 0xF3)
        .add("EI", "", 0xFB);
}

/// CB-prefix rotates, shifts and BIT/RES/SET on registers.
pub fn add_cb_group(builder: &mut LayerBuilder, shifts: &[&str; 8]) {
    for (reg, name) in ZILOG_REGISTERS.iter().enumerate() {
        let reg = reg as u32;
        for (op, mnemonic) in shifts.iter().enumerate() {
            builder.add(mnemonic, name, 0xCB00 | ((op as u32) << 3) | reg);
        }
        for bit in 0..8u32 {
            let form = format!("{bit},{name}");
            builder.add("BIT", &form, 0xCB40 | (bit << 3) | reg);
            builder.add("RES", &form, 0xCB80 | (bit << 3) | reg);
            builder.add("SET", &form, 0xCBC0 | (bit << 3) | reg);
        }
    }
}

static I8080_LISTED: &[FamilyInstructionEntry] = &[
    entry("NOP", "", 0x00),
    entry("STAX", "B", 0x02),
    entry("STAX", "D", 0x12),
    entry("LDAX", "B", 0x0A),
    entry("LDAX", "D", 0x1A),
    entry("RLC", "", 0x07),
    entry("RRC", "", 0x0F),
    entry("RAL", "", 0x17),
    entry("RAR", "", 0x1F),
    entry("SHLD", "nn", 0x22),
    entry("DAA", "", 0x27),
    entry("LHLD", "nn", 0x2A),
    entry("CMA", "", 0x2F),
    entry("STA", "nn", 0x32),
    entry("STC", "", 0x37),
    entry("LDA", "nn", 0x3A),
    entry("CMC", "", 0x3F),
    entry("HLT", "", 0x76),
    entry("RET", "", 0xC9),
    entry("JMP", "nn", 0xC3),
    entry("CALL", "nn", 0xCD),
    entry("OUT", "n", 0xD3),
    entry("IN", "n", 0xDB),
    entry("XTHL", "", 0xE3),
    entry("PCHL", "", 0xE9),
    entry("XCHG", "", 0xEB),
    entry("DI", "", 0xF3),
    entry("SPHL", "", 0xF9),
    entry("EI", "", 0xFB),
];

const ALU_INTEL: [(&str, &str); 8] = [
    ("ADD", "ADI"),
    ("ADC", "ACI"),
    ("SUB", "SUI"),
    ("SBB", "SBI"),
    ("ANA", "ANI"),
    ("XRA", "XRI"),
    ("ORA", "ORI"),
    ("CMP", "CPI"),
];

const INTEL_CONDITIONS: [&str; 8] = ["NZ", "Z", "NC", "C", "PO", "PE", "P", "M"];

/// The 8080 instruction set in Intel syntax.
pub fn i8080_layer() -> CatalogLayer<FormKey> {
    let mut builder = LayerBuilder::new("i8080");
    for (dst, dst_name) in INTEL_REGISTERS.iter().enumerate() {
        for (src, src_name) in INTEL_REGISTERS.iter().enumerate() {
            if dst == 6 && src == 6 {
                continue;
            }
            let opcode = 0x40 | (dst << 3) as u32 | src as u32;
            builder.add("MOV", &format!("{dst_name},{src_name}"), opcode);
        }
        let code = (dst << 3) as u32;
        builder.add("MVI", &format!("{dst_name},n"), 0x06 | code);
        builder.add("INR", dst_name, 0x04 | code);
        builder.add("DCR", dst_name, 0x05 | code);
    }
    for (op, (register_form, immediate_form)) in ALU_INTEL.iter().enumerate() {
        let base = (op << 3) as u32;
        for (reg, name) in INTEL_REGISTERS.iter().enumerate() {
            builder.add(register_form, name, 0x80 | base | reg as u32);
        }
        builder.add(immediate_form, "n", 0xC6 | base);
    }
    for (pair, name) in ["B", "D", "H", "SP"].iter().enumerate() {
        let code = (pair << 4) as u32;
        builder.add("LXI", &format!("{name},nn"), 0x01 | code);
        builder.add("INX", name, 0x03 | code);
        builder.add("DAD", name, 0x09 | code);
        builder.add("DCX", name, 0x0B | code);
    }
    for (pair, name) in ["B", "D", "H", "PSW"].iter().enumerate() {
        let code = (pair << 4) as u32;
        builder.add("POP", name, 0xC1 | code);
        builder.add("PUSH", name, 0xC5 | code);
    }
    for (cc, name) in INTEL_CONDITIONS.iter().enumerate() {
        let code = (cc << 3) as u32;
        builder.add(&format!("R{name}"), "", 0xC0 | code);
        builder.add(&format!("J{name}"), "nn", 0xC2 | code);
        builder.add(&format!("C{name}"), "nn", 0xC4 | code);
    }
    for vector in 0..8u32 {
        builder.add("RST", &vector.to_string(), 0xC7 | (vector << 3));
    }
    builder.extend(I8080_LISTED);
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::CatalogView;
    use std::sync::Arc;

    #[test]
    fn the_8080_fills_all_but_twelve_opcodes() {
        let view = CatalogView::new(vec![Arc::new(i8080_layer())]);
        // 08 10 18 20 28 30 38 CB D9 DD ED FD are undefined.
        assert_eq!(view.descriptors().len(), 256 - 12);
        assert_eq!(view.select(&key("mov", "A,M")), Some(OpcodeKey::new(0x7E)));
        assert_eq!(view.select(&key("rst", "7")), Some(OpcodeKey::new(0xFF)));
        assert_eq!(view.select(&key("cpe", "nn")), Some(OpcodeKey::new(0xEC)));
    }

    #[test]
    fn zilog_alu_accepts_the_optional_accumulator() {
        let mut builder = LayerBuilder::new("core");
        add_zilog_core(&mut builder, &ZILOG_CONDITIONS);
        let view = CatalogView::new(vec![Arc::new(builder.finish())]);
        assert_eq!(view.select(&key("sub", "B")), Some(OpcodeKey::new(0x90)));
        assert_eq!(view.select(&key("sub", "A,B")), Some(OpcodeKey::new(0x90)));
        assert_eq!(view.select(&key("add", "B")), None);
        let sub = view.descriptor(OpcodeKey::new(0x90)).expect("described");
        assert_eq!(sub.template, "sub b");
    }
}
