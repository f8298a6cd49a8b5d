// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Encoder facade for the 6502 family.
//!
//! One handler serves every CPU of the family; the [`MosProfile`] picks the
//! catalog layers and the CPU-specific behaviour (65816 register widths,
//! the NMOS indirect jump defect).

use std::sync::Arc;

use crate::core::assembler::error::EncodeError;
use crate::core::branch::{expand_pseudo_branch, resolve_branch, BranchSlots, PseudoBranch, PSEUDO_SKIP};
use crate::core::catalog::{CatalogLayer, CatalogView, OpcodeKey};
use crate::core::cpu::{ByteOrder, CpuFamily, CpuType};
use crate::core::decode::{decode_one, DecodeOptions, DecodedInstruction};
use crate::core::descriptor::format_address;
use crate::core::expr::Expr;
use crate::core::family::{
    evaluate_number, AssemblerContext, CpuState, EncodeOutcome, EncodingContext, Emission,
    OperandField,
};
use crate::core::operand::{IndexRegister, Instruction, OperandShape};
use crate::core::registry::{AnalysisRules, CallReturn, CpuHandlerDyn, FamilyHandlerDyn};
use super::module::FAMILY_ID;
use super::operand_resolution::{
    address_candidates, direct_offset, emit_resolved, evaluate, immediate_candidates, DIRECT,
    DIRECT_X, DIRECT_Y, INDEXED_INDIRECT, INDIRECT, INDIRECT_LONG,
};
use super::{key, AddressMode, MosKey};

const CALL_RETURN: &[CallReturn] = &[
    CallReturn {
        call: "jsr",
        ret: "rts",
        jump: "jmp",
    },
    CallReturn {
        call: "jsl",
        ret: "rtl",
        jump: "jml",
    },
];

/// Pseudo mnemonic, the real branch of the same condition and its inverse.
const PSEUDO_BRANCHES: &[(&str, &str, Option<&str>)] = &[
    ("JCC", "BCC", Some("BCS")),
    ("JCS", "BCS", Some("BCC")),
    ("JEQ", "BEQ", Some("BNE")),
    ("JNE", "BNE", Some("BEQ")),
    ("JMI", "BMI", Some("BPL")),
    ("JPL", "BPL", Some("BMI")),
    ("JVC", "BVC", Some("BVS")),
    ("JVS", "BVS", Some("BVC")),
    ("JRA", "BRA", None),
];

/// Static description of one 6502-family CPU.
pub struct MosProfile {
    pub cpu: CpuType,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Layers ordered base first.
    pub layers: fn() -> Vec<Arc<CatalogLayer<MosKey>>>,
    /// NMOS `jmp ($xxFF)` wraps within the page.
    pub jmp_indirect_bug: bool,
    /// Present when status flags size immediates (65816).
    pub width_hooks: Option<&'static WidthHooks>,
    pub extra_bitwidths: &'static [u8],
}

/// Register-width state transitions for CPUs with M/X flags.
pub struct WidthHooks {
    /// Called with the lower-case mnemonic and first operand of each
    /// emitted or decoded instruction while auto-widen is on.
    pub status_change: fn(&str, i64, &mut CpuState),
    /// Width directives such as `.m16`; false when not recognised.
    pub directive: fn(&str, &mut CpuState) -> bool,
}

#[derive(Default)]
pub struct MOS6502FamilyHandler;

impl MOS6502FamilyHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FamilyHandlerDyn for MOS6502FamilyHandler {
    fn family_id(&self) -> CpuFamily {
        FAMILY_ID
    }

    fn byte_order(&self) -> ByteOrder {
        ByteOrder::Little
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

pub struct MosCpuHandler {
    profile: &'static MosProfile,
    view: CatalogView<MosKey>,
}

impl MosCpuHandler {
    pub fn new(profile: &'static MosProfile) -> Self {
        Self {
            profile,
            view: CatalogView::new((profile.layers)()),
        }
    }

    pub fn view(&self) -> &CatalogView<MosKey> {
        &self.view
    }

    fn select(&self, mnemonic: &str, mode: AddressMode) -> Option<OpcodeKey> {
        self.view.select(&key(mnemonic, mode))
    }

    fn resolve_modes(
        &self,
        mnemonic: &str,
        modes: &[AddressMode],
        expr: &Expr,
        forced: Option<u8>,
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> EncodeOutcome {
        let value = match evaluate(expr, ctx, eval) {
            Ok(value) => value,
            Err(err) => return EncodeOutcome::Failed(err),
        };
        let slots = address_candidates(modes, value, ctx, |mode| self.select(mnemonic, mode));
        emit_resolved(mnemonic, value, &slots, forced, &[], ctx)
    }

    fn branch_slots(&self, mnemonic: &str, ctx: &EncodingContext) -> BranchSlots {
        let mut slots = BranchSlots {
            short: self.select(mnemonic, AddressMode::Relative),
            long: self.select(mnemonic, AddressMode::RelativeLong),
        };
        if slots.long.is_none() && ctx.promote_long_branches && mnemonic == "BRA" {
            slots.long = self.select("BRL", AddressMode::RelativeLong);
        }
        slots
    }

    fn pseudo_branch(&self, mnemonic: &str) -> Option<Result<PseudoBranch, EncodeError>> {
        let (_, near, inverse) = PSEUDO_BRANCHES
            .iter()
            .find(|(pseudo, _, _)| *pseudo == mnemonic)?;
        let Some(jump) = self.select("JMP", AddressMode::Absolute) else {
            return Some(Err(EncodeError::unsupported(mnemonic)));
        };
        Some(Ok(PseudoBranch {
            near: self.select(near, AddressMode::Relative),
            inverse: inverse.and_then(|inverse| self.select(inverse, AddressMode::Relative)),
            jump,
        }))
    }

    fn encode_single(
        &self,
        mnemonic: &str,
        expr: &Expr,
        forced: Option<u8>,
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> EncodeOutcome {
        if let Some(pseudo) = self.pseudo_branch(mnemonic) {
            return match pseudo {
                Ok(pseudo) => expand_pseudo_branch(
                    mnemonic,
                    pseudo,
                    eval.eval_address(expr),
                    ctx,
                    ByteOrder::Little,
                ),
                Err(err) => EncodeOutcome::Failed(err),
            };
        }
        let slots = self.branch_slots(mnemonic, ctx);
        if !slots.is_empty() {
            return resolve_branch(
                mnemonic,
                slots,
                eval.eval_address(expr),
                &[],
                ctx,
                ByteOrder::Little,
            );
        }
        let accumulator = expr
            .as_identifier()
            .is_some_and(|name| name.eq_ignore_ascii_case("a"));
        if accumulator {
            if let Some(opcode) = self.select(mnemonic, AddressMode::Accumulator) {
                return EncodeOutcome::Emitted(Emission::new(opcode, ByteOrder::Little));
            }
        }
        self.resolve_modes(mnemonic, DIRECT, expr, forced, ctx, eval)
    }

    fn encode_implied(&self, mnemonic: &str) -> EncodeOutcome {
        self.select(mnemonic, AddressMode::Implied)
            .or_else(|| self.select(mnemonic, AddressMode::Accumulator))
            .map(|opcode| EncodeOutcome::Emitted(Emission::new(opcode, ByteOrder::Little)))
            .unwrap_or_else(|| EncodeOutcome::Failed(EncodeError::unsupported(mnemonic)))
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
        let slots = immediate_candidates(value, ctx, |mode| self.select(mnemonic, mode));
        emit_resolved(mnemonic, value, &slots, forced, &[], ctx)
    }

    fn encode_list(
        &self,
        mnemonic: &str,
        items: &[OperandShape],
        forced: Option<u8>,
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> EncodeOutcome {
        if let Some(opcode) = self.select(mnemonic, AddressMode::BlockMove) {
            return self.encode_block_move(mnemonic, opcode, items, ctx, eval);
        }
        if let Some(opcode) = self.select(mnemonic, AddressMode::ZeroPageRelative) {
            return self.encode_bit_branch(mnemonic, opcode, items, ctx, eval);
        }
        if let Some(opcode) = self.select(mnemonic, AddressMode::BlockTransfer) {
            return self.encode_block_transfer(mnemonic, opcode, items, ctx, eval);
        }
        if let [OperandShape::Immediate(imm), target] = items {
            return self.encode_test(mnemonic, imm, target, forced, ctx, eval);
        }
        EncodeOutcome::Failed(EncodeError::unsupported(mnemonic))
    }

    /// `mvn src,dst`: a value above $FF contributes its bank byte.
    fn encode_block_move(
        &self,
        mnemonic: &str,
        opcode: OpcodeKey,
        items: &[OperandShape],
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> EncodeOutcome {
        let [source, dest] = items else {
            return EncodeOutcome::Failed(EncodeError::unsupported(mnemonic));
        };
        let mut banks = [0i64; 2];
        let mut deferred = false;
        for (slot, item) in banks.iter_mut().zip([source, dest]) {
            let (OperandShape::Single(expr) | OperandShape::Immediate(expr)) = item else {
                return EncodeOutcome::Failed(EncodeError::unsupported(mnemonic));
            };
            match evaluate_number(expr, 0, 0xFF_FFFF, ctx, eval) {
                Ok(Some(value)) => *slot = if value > 0xFF { value >> 16 } else { value },
                Ok(None) => deferred = true,
                Err(err) => return EncodeOutcome::Failed(err),
            }
        }
        let emission = Emission::new(opcode, ByteOrder::Little)
            .with_field(banks[1], 1)
            .with_field(banks[0], 1);
        if deferred {
            EncodeOutcome::Deferred(emission)
        } else {
            EncodeOutcome::Emitted(emission)
        }
    }

    /// `bbr0 zp,target`: zero-page byte then an 8-bit displacement.
    fn encode_bit_branch(
        &self,
        mnemonic: &str,
        opcode: OpcodeKey,
        items: &[OperandShape],
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> EncodeOutcome {
        let [OperandShape::Single(zp), OperandShape::Single(target)] = items else {
            return EncodeOutcome::Failed(EncodeError::unsupported(mnemonic));
        };
        let zp = match evaluate(zp, ctx, eval) {
            Ok(Some(value)) => match direct_offset(value, ctx) {
                Some(offset) => offset,
                None => return EncodeOutcome::Failed(EncodeError::out_of_range(value)),
            },
            Ok(None) => 0,
            Err(err) => return EncodeOutcome::Failed(err),
        };
        let slots = BranchSlots {
            short: Some(opcode),
            long: None,
        };
        resolve_branch(
            mnemonic,
            slots,
            eval.eval_address(target),
            &[OperandField { value: zp, size: 1 }],
            ctx,
            ByteOrder::Little,
        )
    }

    /// HuC6280 `tii src,dst,len`.
    fn encode_block_transfer(
        &self,
        mnemonic: &str,
        opcode: OpcodeKey,
        items: &[OperandShape],
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> EncodeOutcome {
        if items.len() != 3 {
            return EncodeOutcome::Failed(EncodeError::unsupported(mnemonic));
        }
        let mut emission = Emission::new(opcode, ByteOrder::Little);
        let mut deferred = false;
        for item in items {
            let OperandShape::Single(expr) = item else {
                return EncodeOutcome::Failed(EncodeError::unsupported(mnemonic));
            };
            let value = match evaluate_number(expr, 0, 0xFFFF, ctx, eval) {
                Ok(Some(value)) => value,
                Ok(None) => {
                    deferred = true;
                    0
                }
                Err(err) => return EncodeOutcome::Failed(err),
            };
            emission = emission.with_field(value, 2);
        }
        if deferred {
            EncodeOutcome::Deferred(emission)
        } else {
            EncodeOutcome::Emitted(emission)
        }
    }

    /// HuC6280 `tst #imm,addr` and `tst #imm,addr,x`.
    fn encode_test(
        &self,
        mnemonic: &str,
        imm: &Expr,
        target: &OperandShape,
        forced: Option<u8>,
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> EncodeOutcome {
        use AddressMode::*;
        let (expr, indexed) = match target {
            OperandShape::Single(expr) => (expr, false),
            OperandShape::Indexed {
                expr,
                index: IndexRegister::X,
            } => (expr, true),
            _ => return EncodeOutcome::Failed(EncodeError::unsupported(mnemonic)),
        };
        let imm = match evaluate_number(imm, -0x80, 0xFF, ctx, eval) {
            Ok(Some(value)) => value,
            Ok(None) => 0,
            Err(err) => return EncodeOutcome::Failed(err),
        };
        let value = match evaluate(expr, ctx, eval) {
            Ok(value) => value,
            Err(err) => return EncodeOutcome::Failed(err),
        };
        let remap = |mode| match (mode, indexed) {
            (ZeroPage, false) => ImmediateZeroPage,
            (ZeroPage, true) => ImmediateZeroPageX,
            (_, false) => ImmediateAbsolute,
            (_, true) => ImmediateAbsoluteX,
        };
        let slots = address_candidates(&[ZeroPage, Absolute], value, ctx, |mode| {
            self.select(mnemonic, remap(mode))
        });
        emit_resolved(
            mnemonic,
            value,
            &slots,
            forced,
            &[OperandField { value: imm, size: 1 }],
            ctx,
        )
    }
}

impl CpuHandlerDyn for MosCpuHandler {
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
        use AddressMode::*;
        let mnemonic = instr.upper_mnemonic();
        let forced = instr.bitwidth.map(|bits| bits / 8);
        match &instr.shape {
            OperandShape::Implied => self.encode_implied(&mnemonic),
            OperandShape::Single(expr) => self.encode_single(&mnemonic, expr, forced, ctx, eval),
            OperandShape::Immediate(expr) => {
                self.encode_immediate(&mnemonic, expr, forced, ctx, eval)
            }
            OperandShape::Indexed { expr, index } => {
                let modes: &[AddressMode] = match index {
                    IndexRegister::X => DIRECT_X,
                    IndexRegister::Y => DIRECT_Y,
                    IndexRegister::S => &[StackRelative],
                    _ => return EncodeOutcome::Failed(EncodeError::unsupported(&mnemonic)),
                };
                self.resolve_modes(&mnemonic, modes, expr, forced, ctx, eval)
            }
            OperandShape::Indirect { expr, long } => {
                let modes = if *long { INDIRECT_LONG } else { INDIRECT };
                self.resolve_modes(&mnemonic, modes, expr, forced, ctx, eval)
            }
            OperandShape::IndexedIndirect {
                expr,
                index: IndexRegister::X,
                long: false,
            } => self.resolve_modes(&mnemonic, INDEXED_INDIRECT, expr, forced, ctx, eval),
            OperandShape::IndirectIndexed {
                expr,
                index,
                long,
                stack,
            } => {
                let mode = match (index, long, stack) {
                    (IndexRegister::Y, false, false) => IndirectIndexedY,
                    (IndexRegister::Y, true, false) => IndirectLongY,
                    (IndexRegister::Y, false, true) => StackRelativeIndirectY,
                    (IndexRegister::Z, false, false) => IndirectIndexedZ,
                    (IndexRegister::Z, true, false) => FlatIndirectZ,
                    _ => return EncodeOutcome::Failed(EncodeError::unsupported(&mnemonic)),
                };
                self.resolve_modes(&mnemonic, &[mode], expr, forced, ctx, eval)
            }
            OperandShape::List(items) => self.encode_list(&mnemonic, items, forced, ctx, eval),
            OperandShape::Bit { bit, operands } => {
                let mnemonic = format!("{mnemonic}{bit}");
                match operands.as_slice() {
                    [OperandShape::Single(expr)] => {
                        self.resolve_modes(&mnemonic, DIRECT, expr, forced, ctx, eval)
                    }
                    items => self.encode_list(&mnemonic, items, forced, ctx, eval),
                }
            }
            _ => EncodeOutcome::Failed(EncodeError::unsupported(&mnemonic)),
        }
    }

    fn decode(
        &self,
        bytes: &[u8],
        offset: usize,
        pc: u32,
        state: &CpuState,
    ) -> Option<DecodedInstruction> {
        let options = DecodeOptions {
            widths: state.widths,
            ..DecodeOptions::default()
        };
        decode_one(&self.view, bytes, offset, pc, options)
    }

    fn layer_names(&self) -> Vec<&'static str> {
        self.view.layer_names()
    }

    fn entry_count(&self) -> usize {
        self.view.entry_count()
    }

    fn extra_bitwidths(&self) -> &'static [u8] {
        self.profile.extra_bitwidths
    }

    fn update_state_after_encode(
        &self,
        instr: &Instruction,
        emission: &Emission,
        state: &mut CpuState,
    ) {
        let Some(hooks) = self.profile.width_hooks else {
            return;
        };
        if let (true, Some(field)) = (state.auto_widen, emission.fields().first()) {
            let mnemonic = instr.mnemonic.to_ascii_lowercase();
            (hooks.status_change)(&mnemonic, field.value, state);
        }
    }

    fn update_state_after_decode(&self, decoded: &DecodedInstruction, state: &mut CpuState) {
        let Some(hooks) = self.profile.width_hooks else {
            return;
        };
        if let (true, Some(value)) = (state.auto_widen, decoded.values.first()) {
            (hooks.status_change)(decoded.mnemonic(), i64::from(*value), state);
        }
    }

    fn apply_directive(&self, directive: &str, state: &mut CpuState) -> Result<bool, EncodeError> {
        Ok(self
            .profile
            .width_hooks
            .is_some_and(|hooks| (hooks.directive)(directive, state)))
    }

    fn fold_pseudo_branch(
        &self,
        first: &DecodedInstruction,
        second: &DecodedInstruction,
    ) -> Option<String> {
        let (pseudo, _, _) = PSEUDO_BRANCHES.iter().find(|(_, _, inverse)| {
            inverse.is_some_and(|inverse| inverse.eq_ignore_ascii_case(first.mnemonic()))
        })?;
        let skip_target = first.pc.wrapping_add(first.size as u32 + PSEUDO_SKIP as u32);
        let adjacent = second.pc == first.pc.wrapping_add(first.size as u32);
        let is_jump = Some(second.opcode) == self.select("JMP", AddressMode::Absolute);
        if first.size != 2 || first.target() != Some(skip_target) || !adjacent || !is_jump {
            return None;
        }
        let target = second.values.first()?;
        Some(format!(
            "{} {}",
            pseudo.to_ascii_lowercase(),
            format_address(*target)
        ))
    }

    fn hardware_defect(&self, decoded: &DecodedInstruction) -> Option<String> {
        if !self.profile.jmp_indirect_bug || decoded.opcode != OpcodeKey::new(0x6C) {
            return None;
        }
        let pointer = *decoded.values.first()?;
        (pointer & 0xFF == 0xFF).then(|| {
            format!(
                "JMP (${pointer:04X}) reads its high byte from ${:04X}, not ${:04X}",
                pointer & 0xFF00,
                pointer.wrapping_add(1) & 0xFFFF
            )
        })
    }
}
