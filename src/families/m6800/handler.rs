// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Motorola 6800 family encoder.
//!
//! One handler serves the 6800 and the 6809. The profile says whether the
//! CPU has the 6809 post-byte indexing and a DP register; everything else
//! comes from the catalog layers.

use std::sync::Arc;

use crate::core::assembler::error::{EncodeError, EncodeErrorKind};
use crate::core::branch::{resolve_branch, BranchSlots};
use crate::core::catalog::{CatalogLayer, CatalogView, OpcodeKey};
use crate::core::cpu::{ByteOrder, CpuFamily, CpuType};
use crate::core::decode::{decode_one, DecodeOptions, DecodedInstruction};
use crate::core::expr::{parse_number, Expr};
use crate::core::family::{
    evaluate_number, AssemblerContext, CpuState, EncodeOutcome, EncodingContext, Emission,
};
use crate::core::operand::{IndexRegister, Instruction, OperandShape};
use crate::core::registry::{AnalysisRules, CallReturn, CpuHandlerDyn, FamilyHandlerDyn};
use crate::core::resolve::{
    fits_signed, fits_unsigned, resolve_sized_variant, Resolution, ResolveFailure, SizePolicy,
    SlotCandidate,
};

use super::module::FAMILY_ID;
use super::operand::{key, AddressMode, M68Key};
use super::postbyte::{
    accumulator_postbyte, auto_postbyte, base_bits, offset_candidates, pc_relative_candidates,
    register_list_mask, register_pair_postbyte, PostByteSlot, EXTENDED_INDIRECT,
};

const ORDER: ByteOrder = ByteOrder::Big;

const CALL_RETURN: &[CallReturn] = &[
    CallReturn {
        call: "jsr",
        ret: "rts",
        jump: "jmp",
    },
    CallReturn {
        call: "bsr",
        ret: "rts",
        jump: "bra",
    },
    CallReturn {
        call: "lbsr",
        ret: "rts",
        jump: "lbra",
    },
];

/// Static description of one 6800-family CPU.
pub struct M68Profile {
    pub cpu: CpuType,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub layers: fn() -> Vec<Arc<CatalogLayer<M68Key>>>,
    /// 6809 DP register: direct mode reaches the page it names.
    pub direct_page_register: bool,
    /// 6809 post-byte indexing instead of the 6800 `n,x` byte offset.
    pub postbyte_indexing: bool,
}

#[derive(Debug, Default)]
pub struct M6800FamilyHandler;

impl M6800FamilyHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FamilyHandlerDyn for M6800FamilyHandler {
    fn family_id(&self) -> CpuFamily {
        FAMILY_ID
    }

    fn byte_order(&self) -> ByteOrder {
        ORDER
    }

    fn analysis_rules(&self) -> AnalysisRules {
        AnalysisRules {
            call_return: CALL_RETURN,
        }
    }

    fn is_register(&self, name: &str) -> bool {
        super::is_register(name)
    }
}

type Slot = SlotCandidate<i64>;

fn evaluate(
    expr: &Expr,
    ctx: &EncodingContext,
    eval: &dyn AssemblerContext,
) -> Result<Option<i64>, EncodeError> {
    match eval.eval_address(expr) {
        Ok(value) => Ok(Some(value)),
        Err(_) if ctx.pass_needed => Ok(None),
        Err(message) => Err(EncodeError::new(EncodeErrorKind::Expression, message)),
    }
}

fn emit(emission: Emission, deferred: bool) -> EncodeOutcome {
    if deferred {
        EncodeOutcome::Deferred(emission)
    } else {
        EncodeOutcome::Emitted(emission)
    }
}

/// Resolve single-field slots: the tag is the value written to the field.
fn emit_slots(
    mnemonic: &str,
    value: Option<i64>,
    slots: &[Slot],
    forced: Option<u8>,
    ctx: &EncodingContext,
) -> EncodeOutcome {
    let build = |opcode: OpcodeKey, field: i64, width: u8| {
        Emission::new(opcode, ORDER).with_field(field, width)
    };
    match resolve_sized_variant(slots, SizePolicy::from_context(ctx, forced)) {
        Resolution::Selected(chosen) => {
            EncodeOutcome::Emitted(build(chosen.opcode, chosen.tag, chosen.width))
        }
        Resolution::Deferred(chosen) => {
            EncodeOutcome::Deferred(build(chosen.opcode, chosen.tag, chosen.width))
        }
        Resolution::Failed(ResolveFailure::NoSlot) => {
            EncodeOutcome::Failed(EncodeError::unsupported(mnemonic))
        }
        Resolution::Failed(ResolveFailure::TooWide) => {
            EncodeOutcome::Failed(EncodeError::out_of_range(value.unwrap_or(0)))
        }
    }
}

/// Resolve post-byte slots; the slot width includes the post-byte.
fn emit_postbyte(
    mnemonic: &str,
    slots: &[PostByteSlot],
    forced: Option<u8>,
    ctx: &EncodingContext,
    too_wide: impl FnOnce() -> EncodeError,
) -> EncodeOutcome {
    let forced = forced.map(|bytes| bytes + 1);
    let build = |opcode: OpcodeKey, tag: super::postbyte::PostByte| {
        Emission::new(opcode, ORDER)
            .with_field(i64::from(tag.postbyte), 1)
            .with_field(tag.offset, tag.offset_size)
    };
    match resolve_sized_variant(slots, SizePolicy::from_context(ctx, forced)) {
        Resolution::Selected(chosen) => EncodeOutcome::Emitted(build(chosen.opcode, chosen.tag)),
        Resolution::Deferred(chosen) => EncodeOutcome::Deferred(build(chosen.opcode, chosen.tag)),
        Resolution::Failed(ResolveFailure::NoSlot) => {
            EncodeOutcome::Failed(EncodeError::unsupported(mnemonic))
        }
        Resolution::Failed(ResolveFailure::TooWide) => EncodeOutcome::Failed(too_wide()),
    }
}

pub struct M68CpuHandler {
    profile: &'static M68Profile,
    view: CatalogView<M68Key>,
}

impl M68CpuHandler {
    pub fn new(profile: &'static M68Profile) -> Self {
        Self {
            profile,
            view: CatalogView::new((profile.layers)()),
        }
    }

    pub fn view(&self) -> &CatalogView<M68Key> {
        &self.view
    }

    fn select(&self, mnemonic: &str, mode: AddressMode) -> Option<OpcodeKey> {
        self.view.select(&key(mnemonic, mode))
    }

    fn unsupported(mnemonic: &str) -> EncodeOutcome {
        EncodeOutcome::Failed(EncodeError::unsupported(mnemonic))
    }

    fn branch_slots(&self, mnemonic: &str, ctx: &EncodingContext) -> BranchSlots {
        let mut slots = BranchSlots {
            short: self.select(mnemonic, AddressMode::Relative8),
            long: self.select(mnemonic, AddressMode::Relative16),
        };
        if slots.short.is_some() && slots.long.is_none() && ctx.promote_long_branches {
            slots.long = self.select(&format!("L{mnemonic}"), AddressMode::Relative16);
        }
        slots
    }

    fn encode_immediate(
        &self,
        mnemonic: &str,
        expr: &Expr,
        forced: Option<u8>,
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> EncodeOutcome {
        let value = match evaluate_number(expr, -0x8000, 0xFFFF, ctx, eval) {
            Ok(value) => value,
            Err(err) => return EncodeOutcome::Failed(err),
        };
        let fits = |width: u8| {
            value.is_some_and(|value| fits_unsigned(value, width) || fits_signed(value, width))
        };
        let raw = value.unwrap_or(0);
        let slots = [
            Slot::new(self.select(mnemonic, AddressMode::Immediate8), 1, fits(1), raw),
            Slot::new(self.select(mnemonic, AddressMode::Immediate16), 2, fits(2), raw),
        ];
        emit_slots(mnemonic, value, &slots, forced, ctx)
    }

    /// Direct-page offset of an address, if direct mode can reach it.
    fn direct_offset(&self, value: i64, ctx: &EncodingContext) -> Option<i64> {
        let page = if self.profile.direct_page_register {
            i64::from(ctx.direct_page & 0xFF)
        } else {
            0
        };
        (fits_unsigned(value, 2) && value >> 8 == page).then_some(value & 0xFF)
    }

    fn encode_address(
        &self,
        mnemonic: &str,
        expr: &Expr,
        forced: Option<u8>,
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> EncodeOutcome {
        let slots = self.branch_slots(mnemonic, ctx);
        if !slots.is_empty() {
            return resolve_branch(mnemonic, slots, eval.eval_address(expr), &[], ctx, ORDER);
        }
        let value = match evaluate(expr, ctx, eval) {
            Ok(value) => value,
            Err(err) => return EncodeOutcome::Failed(err),
        };
        let direct = value.and_then(|value| self.direct_offset(value, ctx));
        let slots = [
            Slot::new(
                self.select(mnemonic, AddressMode::Direct),
                1,
                direct.is_some(),
                direct.unwrap_or(0),
            ),
            Slot::new(
                self.select(mnemonic, AddressMode::Extended),
                2,
                value.is_some_and(|value| fits_unsigned(value, 2)),
                value.unwrap_or(0),
            ),
        ];
        emit_slots(mnemonic, value, &slots, forced, ctx)
    }

    /// 6800 `n,x`.
    fn encode_byte_indexed(
        &self,
        mnemonic: &str,
        expr: &Expr,
        index: IndexRegister,
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> EncodeOutcome {
        if index != IndexRegister::X {
            return Self::unsupported(mnemonic);
        }
        let value = match evaluate_number(expr, 0, 0xFF, ctx, eval) {
            Ok(value) => value,
            Err(err) => return EncodeOutcome::Failed(err),
        };
        let slots = [Slot::new(
            self.select(mnemonic, AddressMode::IndexedByte),
            1,
            value.is_some_and(|value| fits_unsigned(value, 1)),
            value.unwrap_or(0),
        )];
        emit_slots(mnemonic, value, &slots, None, ctx)
    }

    /// 6809 `n,r`, `[n,r]`, `n,pc`, `label,pcr`.
    fn encode_offset_indexed(
        &self,
        mnemonic: &str,
        expr: &Expr,
        (index, indirect): (IndexRegister, bool),
        forced: Option<u8>,
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> EncodeOutcome {
        let Some(opcode) = self.select(mnemonic, AddressMode::Indexed) else {
            return Self::unsupported(mnemonic);
        };
        // A PC-relative operand is an address; a register offset is a constant.
        let value = match index {
            IndexRegister::Pc | IndexRegister::Pcr => evaluate(expr, ctx, eval),
            _ => evaluate_number(expr, -0x8000, 0xFFFF, ctx, eval),
        };
        let value = match value {
            Ok(value) => value,
            Err(err) => return EncodeOutcome::Failed(err),
        };
        match index {
            IndexRegister::Pc | IndexRegister::Pcr => {
                let literal = index == IndexRegister::Pc;
                let slots = pc_relative_candidates(opcode, ctx.pc, value, literal, indirect);
                let offset = slots.first().map_or(0, |slot| slot.tag.offset);
                emit_postbyte(mnemonic, &slots, forced, ctx, || {
                    if literal {
                        EncodeError::out_of_range(offset)
                    } else {
                        EncodeError::too_far(offset)
                    }
                })
            }
            _ => {
                let Some(base) = base_bits(index) else {
                    return Self::unsupported(mnemonic);
                };
                let slots = offset_candidates(opcode, base, value, indirect);
                emit_postbyte(mnemonic, &slots, forced, ctx, || {
                    EncodeError::out_of_range(value.unwrap_or(0))
                })
            }
        }
    }

    /// `[nnnn]`.
    fn encode_extended_indirect(
        &self,
        mnemonic: &str,
        expr: &Expr,
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> EncodeOutcome {
        let Some(opcode) = self.select(mnemonic, AddressMode::Indexed) else {
            return Self::unsupported(mnemonic);
        };
        let (address, deferred) = match evaluate(expr, ctx, eval) {
            Ok(Some(value)) if fits_unsigned(value, 2) => (value, false),
            Ok(Some(value)) => return EncodeOutcome::Failed(EncodeError::out_of_range(value)),
            Ok(None) => (0, true),
            Err(err) => return EncodeOutcome::Failed(err),
        };
        let emission = Emission::new(opcode, ORDER)
            .with_field(i64::from(EXTENDED_INDIRECT), 1)
            .with_field(address, 2);
        emit(emission, deferred)
    }

    fn encode_postbyte_only(&self, mnemonic: &str, postbyte: Result<u8, EncodeError>) -> EncodeOutcome {
        let Some(opcode) = self.select(mnemonic, AddressMode::Indexed) else {
            return Self::unsupported(mnemonic);
        };
        match postbyte {
            Ok(postbyte) => EncodeOutcome::Emitted(
                Emission::new(opcode, ORDER).with_field(i64::from(postbyte), 1),
            ),
            Err(err) => EncodeOutcome::Failed(err),
        }
    }

    fn encode_register_list(&self, mnemonic: &str, registers: &[String]) -> EncodeOutcome {
        let (opcode, result) = if let Some(opcode) = self.select(mnemonic, AddressMode::RegisterPair) {
            (opcode, register_pair_postbyte(mnemonic, registers))
        } else if let Some(opcode) = self.select(mnemonic, AddressMode::RegisterListS) {
            (opcode, register_list_mask(mnemonic, "U", registers))
        } else if let Some(opcode) = self.select(mnemonic, AddressMode::RegisterListU) {
            (opcode, register_list_mask(mnemonic, "S", registers))
        } else {
            return Self::unsupported(mnemonic);
        };
        match result {
            Ok(byte) => {
                EncodeOutcome::Emitted(Emission::new(opcode, ORDER).with_field(i64::from(byte), 1))
            }
            Err(err) => EncodeOutcome::Failed(err),
        }
    }
}

impl CpuHandlerDyn for M68CpuHandler {
    fn cpu_id(&self) -> CpuType {
        self.profile.cpu
    }

    fn family_id(&self) -> CpuFamily {
        FAMILY_ID
    }

    fn encode(
        &self,
        instr: &Instruction,
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> EncodeOutcome {
        let mnemonic = instr.upper_mnemonic();
        let forced = instr.bitwidth.map(|bits| bits / 8);
        let postbyte = self.profile.postbyte_indexing;
        match &instr.shape {
            OperandShape::Implied => self
                .select(&mnemonic, AddressMode::Inherent)
                .map(|opcode| EncodeOutcome::Emitted(Emission::new(opcode, ORDER)))
                .unwrap_or_else(|| Self::unsupported(&mnemonic)),
            OperandShape::Immediate(expr) => {
                self.encode_immediate(&mnemonic, expr, forced, ctx, eval)
            }
            OperandShape::Single(expr) => self.encode_address(&mnemonic, expr, forced, ctx, eval),
            OperandShape::Indexed { expr, index } if postbyte => {
                self.encode_offset_indexed(&mnemonic, expr, (*index, false), forced, ctx, eval)
            }
            OperandShape::Indexed { expr, index } => {
                self.encode_byte_indexed(&mnemonic, expr, *index, ctx, eval)
            }
            OperandShape::IndexedIndirect {
                expr,
                index,
                long: true,
            } if postbyte => {
                self.encode_offset_indexed(&mnemonic, expr, (*index, true), forced, ctx, eval)
            }
            OperandShape::Indirect { expr, long: true } if postbyte => {
                self.encode_extended_indirect(&mnemonic, expr, ctx, eval)
            }
            OperandShape::AutoIndex {
                register,
                step,
                indirect,
            } if postbyte => {
                let result = base_bits(*register)
                    .ok_or_else(|| EncodeError::unsupported(&mnemonic))
                    .and_then(|base| auto_postbyte(base, *step, *indirect));
                self.encode_postbyte_only(&mnemonic, result)
            }
            OperandShape::AccumulatorIndexed {
                accumulator,
                index,
                indirect,
            } if postbyte => {
                let result = base_bits(*index)
                    .and_then(|base| accumulator_postbyte(*accumulator, base, *indirect))
                    .ok_or_else(|| EncodeError::unsupported(&mnemonic));
                self.encode_postbyte_only(&mnemonic, result)
            }
            OperandShape::RegisterList(registers) => {
                self.encode_register_list(&mnemonic, registers)
            }
            _ => Self::unsupported(&mnemonic),
        }
    }

    fn decode(
        &self,
        bytes: &[u8],
        offset: usize,
        pc: u32,
        _state: &CpuState,
    ) -> Option<DecodedInstruction> {
        decode_one(&self.view, bytes, offset, pc, DecodeOptions::default())
    }

    fn layer_names(&self) -> Vec<&'static str> {
        self.view.layer_names()
    }

    fn entry_count(&self) -> usize {
        self.view.entry_count()
    }

    /// `setdp n` sets the page direct mode reaches.
    fn apply_directive(&self, directive: &str, state: &mut CpuState) -> Result<bool, EncodeError> {
        if !self.profile.direct_page_register {
            return Ok(false);
        }
        let mut parts = directive.split_whitespace();
        let name = parts.next().unwrap_or_default().trim_start_matches('.');
        if !name.eq_ignore_ascii_case("setdp") {
            return Ok(false);
        }
        let text = parts.next().unwrap_or_default();
        match parse_number(text) {
            Some(page) if fits_unsigned(page, 1) => {
                state.direct_page = page as u32;
                Ok(true)
            }
            Some(page) => Err(EncodeError::out_of_range(page)),
            None => Err(EncodeError::new(
                EncodeErrorKind::Expression,
                format!("Invalid direct page value '{text}'"),
            )),
        }
    }
}
