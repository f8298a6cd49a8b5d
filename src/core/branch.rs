// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Relative branches and pseudo-branch expansion.
//!
//! Displacements are always measured from the address after the whole
//! instruction. The decoder converts raw displacements back with
//! [`effective_address`], so both directions share one convention.

use crate::core::assembler::error::{EncodeError, EncodeErrorKind};
use crate::core::catalog::OpcodeKey;
use crate::core::cpu::ByteOrder;
use crate::core::family::{EncodeOutcome, EncodingContext, Emission, OperandField};
use crate::core::resolve::{
    fits_signed, fits_unsigned, resolve_sized_variant, Resolution, ResolveFailure, SizePolicy,
    SlotCandidate,
};

/// Bytes skipped by the inverted branch in a far pseudo-branch (`JMP abs`).
pub const PSEUDO_SKIP: i64 = 3;

/// Sign-extend a raw little field of `bytes` bytes.
pub fn sign_extend(raw: u32, bytes: usize) -> i64 {
    match bytes {
        1 => i64::from(raw as u8 as i8),
        2 => i64::from(raw as u16 as i16),
        _ => i64::from(raw as i32),
    }
}

/// Target of a displacement taken from `pc_after`, wrapping within `mask`.
///
/// Bits above `mask` (the 65816 program bank) are kept from `pc_after`.
pub fn effective_address(pc_after: u32, offset: i64, mask: u32) -> u32 {
    let bank = pc_after & !mask;
    let low = (i64::from(pc_after & mask) + offset) as u32 & mask;
    bank | low
}

/// Opcodes a branch mnemonic can use on the active CPU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchSlots {
    pub short: Option<OpcodeKey>,
    pub long: Option<OpcodeKey>,
}

impl BranchSlots {
    pub fn is_empty(&self) -> bool {
        self.short.is_none() && self.long.is_none()
    }
}

/// Encode a relative branch, escalating from 8 to 16 bits when a long
/// opcode exists. `leading` fields (the zero-page byte of `BBR`) precede the
/// displacement.
pub fn resolve_branch(
    mnemonic: &str,
    slots: BranchSlots,
    target: Result<i64, String>,
    leading: &[OperandField],
    ctx: &EncodingContext,
    order: ByteOrder,
) -> EncodeOutcome {
    let target = match target {
        Ok(value) => Some(value),
        Err(_) if ctx.pass_needed => None,
        Err(message) => {
            return EncodeOutcome::Failed(EncodeError::new(EncodeErrorKind::Expression, message))
        }
    };
    let lead_size: usize = leading.iter().map(|field| usize::from(field.size)).sum();
    let pc = i64::from(ctx.pc);
    let candidate = |opcode: Option<OpcodeKey>, width: u8| {
        let size = opcode.map_or(0, OpcodeKey::len) + lead_size + usize::from(width);
        let offset = target.map_or(0, |target| target - (pc + size as i64));
        let fits = target.is_some() && fits_signed(offset, width);
        SlotCandidate::new(opcode, width, fits, offset)
    };
    let candidates = [candidate(slots.short, 1), candidate(slots.long, 2)];
    let mut policy = SizePolicy::from_context(ctx, None);
    // Leading fields are part of every candidate's total size.
    policy.size_floor = policy.size_floor.map(|floor| floor.saturating_sub(lead_size));

    match resolve_sized_variant(&candidates, policy) {
        Resolution::Selected(chosen) => {
            EncodeOutcome::Emitted(branch_emission(chosen.opcode, leading, chosen.tag, chosen.width, order))
        }
        Resolution::Deferred(chosen) => {
            EncodeOutcome::Deferred(branch_emission(chosen.opcode, leading, chosen.tag, chosen.width, order))
        }
        Resolution::Failed(ResolveFailure::NoSlot) => {
            EncodeOutcome::Failed(EncodeError::unsupported(mnemonic))
        }
        Resolution::Failed(ResolveFailure::TooWide) => {
            EncodeOutcome::Failed(EncodeError::too_far(candidates[0].tag))
        }
    }
}

fn branch_emission(
    opcode: OpcodeKey,
    leading: &[OperandField],
    offset: i64,
    width: u8,
    order: ByteOrder,
) -> Emission {
    leading
        .iter()
        .fold(Emission::new(opcode, order), |emission, field| {
            emission.with_field(field.value, field.size)
        })
        .with_field(offset, width)
}

/// Opcodes behind one pseudo-branch mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PseudoBranch {
    /// Real branch taken when the target is near.
    pub near: Option<OpcodeKey>,
    /// Inverted-condition branch that skips the far jump. `None` for an
    /// unconditional pseudo-branch whose far form is the jump alone.
    pub inverse: Option<OpcodeKey>,
    /// Absolute jump opcode.
    pub jump: OpcodeKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PseudoForm {
    Near(i64),
    Far(i64),
}

/// Expand a pseudo-branch into a real branch or a branch-over-jump pair.
pub fn expand_pseudo_branch(
    mnemonic: &str,
    pseudo: PseudoBranch,
    target: Result<i64, String>,
    ctx: &EncodingContext,
    order: ByteOrder,
) -> EncodeOutcome {
    let target = match target {
        Ok(value) => Some(value),
        Err(_) if ctx.pass_needed => None,
        Err(message) => {
            return EncodeOutcome::Failed(EncodeError::new(EncodeErrorKind::Expression, message))
        }
    };
    let pc = i64::from(ctx.pc);
    let near_offset = target.map_or(0, |target| target - (pc + 2));
    let far_target = target.unwrap_or(0);
    let far_fits = target.is_some_and(|target| fits_unsigned(target, 2));
    let near = SlotCandidate::new(
        pseudo.near,
        1,
        target.is_some() && fits_signed(near_offset, 1),
        PseudoForm::Near(near_offset),
    );
    let far = match pseudo.inverse {
        Some(inverse) => SlotCandidate::new(Some(inverse), 4, far_fits, PseudoForm::Far(far_target)),
        None => SlotCandidate::new(Some(pseudo.jump), 2, far_fits, PseudoForm::Far(far_target)),
    };

    let emit = |opcode: OpcodeKey, form: PseudoForm| match form {
        PseudoForm::Near(offset) => Emission::new(opcode, order).with_field(offset, 1),
        PseudoForm::Far(target) if pseudo.inverse.is_some() => Emission::new(opcode, order)
            .with_field(PSEUDO_SKIP, 1)
            .with_field(i64::from(pseudo.jump.terminal()), 1)
            .with_field(target, 2),
        PseudoForm::Far(target) => Emission::new(opcode, order).with_field(target, 2),
    };

    match resolve_sized_variant(&[near, far], SizePolicy::from_context(ctx, None)) {
        Resolution::Selected(chosen) => EncodeOutcome::Emitted(emit(chosen.opcode, chosen.tag)),
        Resolution::Deferred(chosen) => EncodeOutcome::Deferred(emit(chosen.opcode, chosen.tag)),
        Resolution::Failed(ResolveFailure::NoSlot) => {
            EncodeOutcome::Failed(EncodeError::unsupported(mnemonic))
        }
        Resolution::Failed(ResolveFailure::TooWide) => {
            EncodeOutcome::Failed(EncodeError::out_of_range(far_target))
        }
    }
}
