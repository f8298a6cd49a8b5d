// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Every catalog entry decodes to itself, and every encodable entry encodes
//! to bytes that decode back to the same opcode and canonical text.

use std::hash::Hash;

use multiasm::core::catalog::{CatalogView, OpcodeKey, OpcodeLayout};
use multiasm::core::descriptor::InstructionDescriptor;
use multiasm::core::expr::{parse_number, Expr, SymbolMapContext};
use multiasm::core::family::{CpuState, EncodeOutcome, EncodingContext, RegisterWidths};
use multiasm::core::operand::{Arg, IndexRegister, Instruction, OperandShape};
use multiasm::core::registry::CpuHandlerDyn;
use multiasm::families::intel8080::form::{placeholder, template, Placeholder};
use multiasm::families::intel8080::module::I8080_PROFILE;
use multiasm::families::intel8080::I80CpuHandler;
use multiasm::families::m6800::module::M6800_PROFILE;
use multiasm::families::m6800::{self, M68CpuHandler};
use multiasm::families::mos6502::module::{M6502I_PROFILE, M6502_PROFILE};
use multiasm::families::mos6502::{self, MosCpuHandler, MosProfile};
use multiasm::gb80::module::GB80_PROFILE;
use multiasm::huc6280::module::HUC6280_PROFILE;
use multiasm::m45gs02::module::{M45GS02_PROFILE, M65CE02_PROFILE};
use multiasm::m65816::module::M65816_PROFILE;
use multiasm::m65c02::module::{M65C02_PROFILE, R65C02_PROFILE, W65C02_PROFILE};
use multiasm::m6809::module::M6809_PROFILE;
use multiasm::z80::module::Z80_PROFILE;

const PC: u32 = 0x0400;

static MOS_PROFILES: [&MosProfile; 9] = [
    &M6502_PROFILE,
    &M6502I_PROFILE,
    &M65C02_PROFILE,
    &R65C02_PROFILE,
    &W65C02_PROFILE,
    &HUC6280_PROFILE,
    &M65CE02_PROFILE,
    &M45GS02_PROFILE,
    &M65816_PROFILE,
];

/// Opcode bytes followed by zeroed fixed-size fields, or `None` when a
/// field's length depends on its contents.
fn zero_operand_bytes(descriptor: &InstructionDescriptor) -> Option<Vec<u8>> {
    let size = descriptor.size(RegisterWidths::default())?;
    let opcode = descriptor.opcode.to_bytes();
    let mut bytes = vec![0u8; size];
    match descriptor.layout {
        OpcodeLayout::Standard => bytes[..opcode.len()].copy_from_slice(&opcode),
        OpcodeLayout::DisplacementBeforeOpcode => {
            let (last, prefix) = opcode.split_last()?;
            bytes[..prefix.len()].copy_from_slice(prefix);
            bytes[size - 1] = *last;
        }
    }
    Some(bytes)
}

fn assert_descriptors_decode<K: Eq + Hash + Clone>(
    name: &str,
    view: &CatalogView<K>,
    cpu: &dyn CpuHandlerDyn,
) -> usize {
    let mut checked = 0;
    for descriptor in view.descriptors() {
        let Some(bytes) = zero_operand_bytes(&descriptor) else {
            continue;
        };
        let decoded = cpu
            .decode(&bytes, 0, PC, &CpuState::default())
            .unwrap_or_else(|| panic!("{name}: {} does not decode", descriptor.opcode));
        assert_eq!(decoded.opcode, descriptor.opcode, "{name}: {}", decoded.text);
        assert_eq!(decoded.size, bytes.len(), "{name}: {}", decoded.text);
        checked += 1;
    }
    checked
}

/// Encode `instr`, decode the bytes and compare opcode and size. `expected`
/// is the canonical disassembly when the entry owns its opcode's descriptor.
fn assert_round_trip(
    name: &str,
    cpu: &dyn CpuHandlerDyn,
    instr: &Instruction,
    opcode: OpcodeKey,
    expected: Option<&str>,
) {
    let ctx = EncodingContext::at(PC);
    let out = cpu.encode(instr, &ctx, &SymbolMapContext::new());
    let EncodeOutcome::Emitted(emission) = &out else {
        panic!("{name}: {instr:?} did not encode: {out:?}");
    };
    let bytes = emission.bytes();
    let decoded = cpu
        .decode(&bytes, 0, PC, &CpuState::default())
        .unwrap_or_else(|| panic!("{name}: {bytes:02X?} does not decode"));
    assert_eq!(decoded.opcode, opcode, "{name}: {instr:?} -> {}", decoded.text);
    assert_eq!(decoded.size, bytes.len(), "{name}: {}", decoded.text);
    if let Some(expected) = expected {
        assert_eq!(decoded.text, expected, "{name}: {instr:?} -> {bytes:02X?}");
    }
}

fn line(mnemonic: &str, operands: &str) -> String {
    let mnemonic = mnemonic.to_ascii_lowercase();
    if operands.is_empty() {
        mnemonic
    } else {
        format!("{mnemonic} {operands}")
    }
}

/// Whether `opcode` decodes with the template this key would produce; alias
/// keys decode as the entry that owns the opcode.
fn owns_descriptor<K: Eq + Hash + Clone>(view: &CatalogView<K>, opcode: OpcodeKey, template: &str) -> bool {
    view.descriptor(opcode)
        .is_some_and(|descriptor| descriptor.template == template)
}

#[test]
fn every_descriptor_decodes_to_itself() {
    for profile in MOS_PROFILES {
        let cpu = MosCpuHandler::new(profile);
        assert!(assert_descriptors_decode(profile.name, cpu.view(), &cpu) > 50);
    }
    for profile in [&M6800_PROFILE, &M6809_PROFILE] {
        let cpu = M68CpuHandler::new(profile);
        assert!(assert_descriptors_decode(profile.name, cpu.view(), &cpu) > 50);
    }
    for profile in [&I8080_PROFILE, &Z80_PROFILE, &GB80_PROFILE] {
        let cpu = I80CpuHandler::new(profile);
        assert!(assert_descriptors_decode(profile.name, cpu.view(), &cpu) > 200);
    }
}

const NEAR: i64 = PC as i64 + 0x10;
const FAR: i64 = PC as i64 + 0x1000;

fn num(value: i64) -> OperandShape {
    OperandShape::Single(Expr::num(value))
}

fn imm(value: i64) -> OperandShape {
    OperandShape::Immediate(Expr::num(value))
}

fn indexed(value: i64, index: IndexRegister) -> OperandShape {
    OperandShape::Indexed {
        expr: Expr::num(value),
        index,
    }
}

fn indirect(value: i64, long: bool) -> OperandShape {
    OperandShape::Indirect {
        expr: Expr::num(value),
        long,
    }
}

fn indirect_indexed(value: i64, index: IndexRegister, long: bool, stack: bool) -> OperandShape {
    OperandShape::IndirectIndexed {
        expr: Expr::num(value),
        index,
        long,
        stack,
    }
}

/// Operand shape for a 6502-family mode and the text it disassembles to.
fn mos_case(mode: mos6502::AddressMode) -> (OperandShape, &'static str) {
    use mos6502::AddressMode::*;
    use IndexRegister::{S, X, Y, Z};
    match mode {
        Implied => (OperandShape::Implied, ""),
        Accumulator => (OperandShape::Implied, "a"),
        Immediate | ImmediateM | ImmediateX => (imm(0x12), "#$12"),
        ImmediateWord => (imm(0x1234), "#$1234"),
        ZeroPage => (num(0x12), "$12"),
        Absolute => (num(0x1234), "$1234"),
        AbsoluteLong => (num(0x12_3456), "$123456"),
        ZeroPageX => (indexed(0x12, X), "$12,x"),
        ZeroPageY => (indexed(0x12, Y), "$12,y"),
        AbsoluteX => (indexed(0x1234, X), "$1234,x"),
        AbsoluteY => (indexed(0x1234, Y), "$1234,y"),
        AbsoluteLongX => (indexed(0x12_3456, X), "$123456,x"),
        Indirect => (indirect(0x1234, false), "($1234)"),
        ZeroPageIndirect => (indirect(0x12, false), "($12)"),
        IndexedIndirectX | AbsoluteIndexedIndirect => {
            let (value, text) = if mode == IndexedIndirectX {
                (0x12, "($12,x)")
            } else {
                (0x1234, "($1234,x)")
            };
            let shape = OperandShape::IndexedIndirect {
                expr: Expr::num(value),
                index: X,
                long: false,
            };
            (shape, text)
        }
        IndirectIndexedY => (indirect_indexed(0x12, Y, false, false), "($12),y"),
        IndirectLong => (indirect(0x12, true), "[$12]"),
        AbsoluteIndirectLong => (indirect(0x1234, true), "[$1234]"),
        IndirectLongY => (indirect_indexed(0x12, Y, true, false), "[$12],y"),
        StackRelative => (indexed(0x12, S), "$12,s"),
        StackRelativeIndirectY => (indirect_indexed(0x12, Y, false, true), "($12,s),y"),
        IndirectIndexedZ => (indirect_indexed(0x12, Z, false, false), "($12),z"),
        FlatIndirectZ => (indirect_indexed(0x12, Z, true, false), "[$12],z"),
        Relative => (num(NEAR), "$0410"),
        RelativeLong => (num(FAR), "$1400"),
        BlockMove => (OperandShape::List(vec![num(0x01), num(0x02)]), "$01,$02"),
        ZeroPageRelative => (OperandShape::List(vec![num(0x12), num(NEAR)]), "$12,$0410"),
        ImmediateZeroPage => (OperandShape::List(vec![imm(0x55), num(0x12)]), "#$55,$12"),
        ImmediateAbsolute => (OperandShape::List(vec![imm(0x55), num(0x1234)]), "#$55,$1234"),
        ImmediateZeroPageX => (
            OperandShape::List(vec![imm(0x55), indexed(0x12, X)]),
            "#$55,$12,x",
        ),
        ImmediateAbsoluteX => (
            OperandShape::List(vec![imm(0x55), indexed(0x1234, X)]),
            "#$55,$1234,x",
        ),
        BlockTransfer => (
            OperandShape::List(vec![num(0x2000), num(0x3000), num(0x0010)]),
            "$2000,$3000,$0010",
        ),
    }
}

#[test]
fn mos_entries_encode_and_decode_back() {
    for profile in MOS_PROFILES {
        let cpu = MosCpuHandler::new(profile);
        let mut checked = 0;
        let mut texts = 0;
        for ((mnemonic, mode), opcode) in cpu.view().entries() {
            let (shape, operands) = mos_case(mode);
            let template = mode.template().replace("{m}", &mnemonic.to_ascii_lowercase());
            let expected = owns_descriptor(cpu.view(), opcode, &template).then(|| line(&mnemonic, operands));
            texts += usize::from(expected.is_some());
            assert_round_trip(
                profile.name,
                &cpu,
                &Instruction::new(&mnemonic, shape),
                opcode,
                expected.as_deref(),
            );
            checked += 1;
        }
        assert_eq!(checked, cpu.view().entry_count());
        assert!(texts > 100, "{}: only {texts} texts compared", profile.name);
    }
}

fn registers(names: &[&str]) -> OperandShape {
    OperandShape::RegisterList(names.iter().map(|name| name.to_string()).collect())
}

/// Operand shapes for a Motorola mode and the text each disassembles to.
/// 6809 indexed entries are tried in every post-byte flavour.
fn m68_cases(mode: m6800::AddressMode) -> Vec<(OperandShape, &'static str)> {
    use m6800::AddressMode::*;
    match mode {
        Inherent => vec![(OperandShape::Implied, "")],
        Immediate8 => vec![(imm(0x12), "#$12")],
        Immediate16 => vec![(imm(0x1234), "#$1234")],
        Direct => vec![(num(0x12), "$12")],
        Extended => vec![(num(0x1234), "$1234")],
        IndexedByte => vec![(indexed(0x12, IndexRegister::X), "$12,x")],
        Relative8 => vec![(num(NEAR), "$0410")],
        Relative16 => vec![(num(FAR), "$1400")],
        Indexed => vec![
            (indexed(5, IndexRegister::X), "$05,x"),
            (indexed(0x40, IndexRegister::Y), "$40,y"),
            (
                OperandShape::IndexedIndirect {
                    expr: Expr::num(0x1234),
                    index: IndexRegister::U,
                    long: true,
                },
                "[$1234,u]",
            ),
            (
                OperandShape::AutoIndex {
                    register: IndexRegister::S,
                    step: 2,
                    indirect: false,
                },
                ",s++",
            ),
            (
                OperandShape::AccumulatorIndexed {
                    accumulator: 'b',
                    index: IndexRegister::X,
                    indirect: false,
                },
                "b,x",
            ),
            (indirect(0x2000, true), "[$2000]"),
        ],
        RegisterPair => vec![(registers(&["d", "x"]), "d,x")],
        RegisterListS => vec![(registers(&["cc", "a", "x", "u", "pc"]), "cc,a,x,u,pc")],
        RegisterListU => vec![(registers(&["cc", "a", "x", "s", "pc"]), "cc,a,x,s,pc")],
    }
}

#[test]
fn motorola_entries_encode_and_decode_back() {
    for profile in [&M6800_PROFILE, &M6809_PROFILE] {
        let cpu = M68CpuHandler::new(profile);
        let mut checked = 0;
        let mut texts = 0;
        for ((mnemonic, mode), opcode) in cpu.view().entries() {
            let template = mode.template().replace("{m}", &mnemonic.to_ascii_lowercase());
            let owned = owns_descriptor(cpu.view(), opcode, &template);
            for (shape, operands) in m68_cases(mode) {
                let expected = owned.then(|| line(&mnemonic, operands));
                texts += usize::from(expected.is_some());
                assert_round_trip(
                    profile.name,
                    &cpu,
                    &Instruction::new(&mnemonic, shape),
                    opcode,
                    expected.as_deref(),
                );
            }
            checked += 1;
        }
        assert_eq!(checked, cpu.view().entry_count());
        assert!(texts > 100, "{}: only {texts} texts compared", profile.name);
    }
}

const BYTE: i64 = 0x12;
const WORD: i64 = 0x1234;
const DISPLACEMENT: i64 = 5;

/// Argument that spells `token` in an 8080-family form.
fn form_arg(token: &str) -> Arg {
    if let Some((kind, _)) = placeholder(token) {
        let value = match kind {
            Placeholder::Byte => BYTE,
            Placeholder::Word => WORD,
            Placeholder::Relative => i64::from(PC),
            Placeholder::Signed => DISPLACEMENT,
        };
        if let Some(inner) = token.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
            if let Some((register, _)) = inner.split_once('+') {
                return Arg::IndexDisplacement {
                    register: register.to_string(),
                    displacement: Expr::num(value),
                };
            }
            return Arg::Indirect(Expr::num(value));
        }
        if let Some((register, _)) = token.split_once('+') {
            return Arg::IndexDisplacement {
                register: register.to_string(),
                displacement: Expr::num(value),
            };
        }
        return Arg::Expr(Expr::num(value));
    }
    if let Some(inner) = token.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        return Arg::RegisterIndirect(inner.to_string());
    }
    match parse_number(token) {
        Some(value) => Arg::Expr(Expr::num(value)),
        None => Arg::Register(token.to_string()),
    }
}

/// How `token` reads back once [`form_arg`]'s value is in place.
fn form_text(token: &str) -> String {
    let lower = token.to_ascii_lowercase();
    match token {
        "n" => "$12".to_string(),
        "nn" => "$1234".to_string(),
        "e" => "$0400".to_string(),
        "d" => "+$05".to_string(),
        "(n)" => "($12)".to_string(),
        "(nn)" => "($1234)".to_string(),
        _ if token.ends_with("+d)") || token.ends_with("+d") => lower.replacen("+d", "+$05", 1),
        _ => lower,
    }
}

#[test]
fn intel_entries_encode_and_decode_back() {
    for profile in [&I8080_PROFILE, &Z80_PROFILE, &GB80_PROFILE] {
        let cpu = I80CpuHandler::new(profile);
        let mut checked = 0;
        let mut texts = 0;
        for ((mnemonic, form), opcode) in cpu.view().entries() {
            let tokens: Vec<&str> = form.split(',').filter(|token| !token.is_empty()).collect();
            let args: Vec<Arg> = tokens.iter().map(|token| form_arg(token)).collect();
            let shape = if args.is_empty() {
                OperandShape::Implied
            } else {
                OperandShape::Args(args)
            };
            let operands: Vec<String> = tokens.iter().map(|token| form_text(token)).collect();
            let expected = owns_descriptor(cpu.view(), opcode, &template(&mnemonic, &form).0)
                .then(|| line(&mnemonic, &operands.join(",")));
            texts += usize::from(expected.is_some());
            assert_round_trip(
                profile.name,
                &cpu,
                &Instruction::new(&mnemonic, shape),
                opcode,
                expected.as_deref(),
            );
            checked += 1;
        }
        assert_eq!(checked, cpu.view().entry_count());
        assert!(texts > 150, "{}: only {texts} texts compared", profile.name);
    }
}
