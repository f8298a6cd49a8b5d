// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Z80 instruction layer: the Zilog core plus the CB, ED, DD and FD pages.

use crate::core::catalog::CatalogLayer;
use crate::families::intel8080::table::{
    add_cb_group, add_zilog_core, ALU_ZILOG, CB_SHIFTS, ZILOG_CONDITIONS, ZILOG_PAIRS,
    ZILOG_REGISTERS,
};
use crate::families::intel8080::{entry, FamilyInstructionEntry, FormKey, LayerBuilder};

static Z80_LISTED: &[FamilyInstructionEntry] = &[
    entry("EX", "AF,AF'", 0x08),
    entry("DJNZ", "e", 0x10),
    entry("LD", "(nn),HL", 0x22),
    entry("LD", "HL,(nn)", 0x2A),
    entry("LD", "(nn),A", 0x32),
    entry("LD", "A,(nn)", 0x3A),
    entry("OUT", "(n),A", 0xD3),
    entry("EXX", "", 0xD9),
    entry("IN", "A,(n)", 0xDB),
    entry("EX", "(SP),HL", 0xE3),
    entry("EX", "DE,HL", 0xEB),
];

static ED_LISTED: &[FamilyInstructionEntry] = &[
    entry("NEG", "", 0xED44),
    entry("RETN", "", 0xED45),
    entry("IM", "0", 0xED46),
    entry("LD", "I,A", 0xED47),
    entry("RETI", "", 0xED4D),
    entry("LD", "R,A", 0xED4F),
    entry("IM", "1", 0xED56),
    entry("LD", "A,I", 0xED57),
    entry("IM", "2", 0xED5E),
    entry("LD", "A,R", 0xED5F),
    entry("RRD", "", 0xED67),
    entry("RLD", "", 0xED6F),
    entry("LDI", "", 0xEDA0),
    entry("CPI", "", 0xEDA1),
    entry("INI", "", 0xEDA2),
    entry("OUTI", "", 0xEDA3),
    entry("LDD", "", 0xEDA8),
    entry("CPD", "", 0xEDA9),
    entry("IND", "", 0xEDAA),
    entry("OUTD", "", 0xEDAB),
    entry("LDIR", "", 0xEDB0),
    entry("CPIR", "", 0xEDB1),
    entry("INIR", "", 0xEDB2),
    entry("OTIR", "", 0xEDB3),
    entry("LDDR", "", 0xEDB8),
    entry("CPDR", "", 0xEDB9),
    entry("INDR", "", 0xEDBA),
    entry("OTDR", "", 0xEDBB),
];

fn add_ed_page(builder: &mut LayerBuilder) {
    for (reg, name) in ZILOG_REGISTERS.iter().enumerate() {
        if reg == 6 {
            continue;
        }
        let code = (reg << 3) as u32;
        builder.add("IN", &format!("{name},(C)"), 0xED40 | code);
        builder.add("OUT", &format!("(C),{name}"), 0xED41 | code);
    }
    for (pair, name) in ZILOG_PAIRS.iter().enumerate() {
        let code = (pair << 4) as u32;
        builder.add("SBC", &format!("HL,{name}"), 0xED42 | code);
        builder.add("ADC", &format!("HL,{name}"), 0xED4A | code);
        // HL already has the shorter unprefixed forms.
        if *name != "HL" {
            builder.add("LD", &format!("(nn),{name}"), 0xED43 | code);
            builder.add("LD", &format!("{name},(nn)"), 0xED4B | code);
        }
    }
    builder.extend(ED_LISTED);
}

/// DD (IX) or FD (IY) page, including the undocumented half registers and
/// the `DD CB d op` bit group.
fn add_index_page(builder: &mut LayerBuilder, prefix: u32, index: &str) {
    let page = prefix << 8;
    let disp = format!("({index}+d)");
    let high = format!("{index}H");
    let low = format!("{index}L");

    builder
        .add("LD", &format!("{index},nn"), page | 0x21)
        .add("LD", &format!("(nn),{index}"), page | 0x22)
        .add("LD", &format!("{index},(nn)"), page | 0x2A)
        .add("INC", index, page | 0x23)
        .add("DEC", index, page | 0x2B)
        .add("INC", &disp, page | 0x34)
        .add("DEC", &disp, page | 0x35)
        .add("LD", &format!("{disp},n"), page | 0x36)
        .add("POP", index, page | 0xE1)
        .add("EX", &format!("(SP),{index}"), page | 0xE3)
        .add("PUSH", index, page | 0xE5)
        .add("JP", &format!("({index})"), page | 0xE9)
        .add("LD", &format!("SP,{index}"), page | 0xF9);
    for (pair, name) in ["BC", "DE", index, "SP"].iter().enumerate() {
        builder.add("ADD", &format!("{index},{name}"), page | 0x09 | (pair << 4) as u32);
    }

    let half = |reg: usize| -> String {
        match reg {
            4 => high.clone(),
            5 => low.clone(),
            _ => ZILOG_REGISTERS[reg].to_string(),
        }
    };
    for (reg, name) in ZILOG_REGISTERS.iter().enumerate() {
        if reg == 6 {
            continue;
        }
        let code = reg as u32;
        builder.add("LD", &format!("{name},{disp}"), page | 0x46 | (code << 3));
        builder.add("LD", &format!("{disp},{name}"), page | 0x70 | code);
        for src in (0..8).filter(|src| *src != 6) {
            if [4, 5].contains(&reg) || [4, 5].contains(&src) {
                let opcode = page | 0x40 | (code << 3) | src as u32;
                builder.add("LD", &format!("{},{}", half(reg), half(src)), opcode);
            }
        }
    }
    builder
        .add("LD", &format!("{high},n"), page | 0x26)
        .add("LD", &format!("{low},n"), page | 0x2E)
        .add("INC", &high, page | 0x24)
        .add("DEC", &high, page | 0x25)
        .add("INC", &low, page | 0x2C)
        .add("DEC", &low, page | 0x2D);

    for (op, (mnemonic, explicit_a)) in ALU_ZILOG.iter().enumerate() {
        let base = page | ((op << 3) as u32);
        for (operand, code) in [(&disp, 0x86), (&high, 0x84), (&low, 0x85)] {
            if !explicit_a {
                builder.add(mnemonic, operand, base | code);
            }
            builder.add(mnemonic, &format!("A,{operand}"), base | code);
        }
    }

    let bits = (page << 8) | 0xCB00;
    for (op, mnemonic) in CB_SHIFTS.iter().enumerate() {
        builder.add_displaced(mnemonic, &disp, bits | ((op as u32) << 3) | 0x06);
    }
    for bit in 0..8u32 {
        let form = format!("{bit},{disp}");
        builder.add_displaced("BIT", &form, bits | 0x46 | (bit << 3));
        builder.add_displaced("RES", &form, bits | 0x86 | (bit << 3));
        builder.add_displaced("SET", &form, bits | 0xC6 | (bit << 3));
    }
}

pub fn z80_layer() -> CatalogLayer<FormKey> {
    let mut builder = LayerBuilder::new("z80");
    add_zilog_core(&mut builder, &ZILOG_CONDITIONS);
    builder.extend(Z80_LISTED);
    add_cb_group(&mut builder, &CB_SHIFTS);
    add_ed_page(&mut builder);
    add_index_page(&mut builder, 0xDD, "IX");
    add_index_page(&mut builder, 0xFD, "IY");
    builder.finish()
}
