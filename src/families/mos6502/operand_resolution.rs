// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Slot candidates for the 6502 family's overlapping addressing modes.
//!
//! A shape such as `expr,x` maps to an ordered list of modes (zero page,
//! absolute, long). Each present mode becomes a [`SlotCandidate`] and the
//! shared resolver picks the narrowest one that holds the value.

use crate::core::assembler::error::{EncodeError, EncodeErrorKind};
use crate::core::catalog::OpcodeKey;
use crate::core::cpu::ByteOrder;
use crate::core::descriptor::FieldSpec;
use crate::core::expr::Expr;
use crate::core::family::{AssemblerContext, EncodeOutcome, EncodingContext, Emission, OperandField};
use crate::core::resolve::{
    fits_signed, fits_unsigned, resolve_sized_variant, Resolution, ResolveFailure, SizePolicy,
    SlotCandidate,
};

use super::AddressMode::{self, *};

pub(crate) const DIRECT: &[AddressMode] = &[ZeroPage, Absolute, AbsoluteLong];
pub(crate) const DIRECT_X: &[AddressMode] = &[ZeroPageX, AbsoluteX, AbsoluteLongX];
pub(crate) const DIRECT_Y: &[AddressMode] = &[ZeroPageY, AbsoluteY];
pub(crate) const INDIRECT: &[AddressMode] = &[ZeroPageIndirect, Indirect];
pub(crate) const INDIRECT_LONG: &[AddressMode] = &[IndirectLong, AbsoluteIndirectLong];
pub(crate) const INDEXED_INDIRECT: &[AddressMode] = &[IndexedIndirectX, AbsoluteIndexedIndirect];

/// Candidate tag: the mode and the value written into its field.
pub(crate) type Slot = SlotCandidate<(AddressMode, i64)>;

/// Evaluate an operand; `Ok(None)` means unknown while a pass is pending.
pub(crate) fn evaluate(
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

/// Zero-page field value for an address, if it is reachable in one byte.
pub(crate) fn direct_offset(value: i64, ctx: &EncodingContext) -> Option<i64> {
    let offset = if ctx.truncate_direct_page {
        value - i64::from(ctx.direct_page)
    } else {
        value
    };
    (0..=0xFF).contains(&offset).then_some(offset)
}

/// One candidate per mode; the first field of the mode decides its width.
pub(crate) fn address_candidates(
    modes: &[AddressMode],
    value: Option<i64>,
    ctx: &EncodingContext,
    select: impl Fn(AddressMode) -> Option<OpcodeKey>,
) -> Vec<Slot> {
    modes
        .iter()
        .map(|&mode| {
            let opcode = select(mode);
            match mode.fields().first() {
                Some(FieldSpec::Byte) => {
                    let offset = value.and_then(|value| direct_offset(value, ctx));
                    SlotCandidate::new(opcode, 1, offset.is_some(), (mode, offset.unwrap_or(0)))
                }
                Some(FieldSpec::Long) => {
                    let value = value.unwrap_or(0);
                    SlotCandidate::new(opcode, 3, fits_unsigned(value, 3), (mode, value))
                }
                _ => {
                    let fits = value.is_some_and(|value| fits_unsigned(value, 2));
                    SlotCandidate::new(opcode, 2, fits, (mode, value.unwrap_or(0)))
                }
            }
        })
        .map(|mut slot| {
            slot.fits &= value.is_some();
            slot
        })
        .collect()
}

/// Immediate slots: fixed byte, fixed word and the 65816 M/X forms.
pub(crate) fn immediate_candidates(
    value: Option<i64>,
    ctx: &EncodingContext,
    select: impl Fn(AddressMode) -> Option<OpcodeKey>,
) -> Vec<Slot> {
    let fits = |width: u8| {
        value.is_some_and(|value| fits_unsigned(value, width) || fits_signed(value, width))
    };
    let raw = value.unwrap_or(0);
    [
        (Immediate, 1),
        (ImmediateWord, 2),
        (ImmediateM, ctx.widths.accumulator_bytes()),
        (ImmediateX, ctx.widths.index_bytes()),
    ]
    .into_iter()
    .map(|(mode, width)| SlotCandidate::new(select(mode), width, fits(width), (mode, raw)))
    .collect()
}

/// Run the resolver and turn its answer into an outcome.
///
/// `leading` fields precede the resolved field (HuC6280 `tst #imm,addr`).
pub(crate) fn emit_resolved(
    mnemonic: &str,
    value: Option<i64>,
    candidates: &[Slot],
    forced_width: Option<u8>,
    leading: &[OperandField],
    ctx: &EncodingContext,
) -> EncodeOutcome {
    let lead_size: usize = leading.iter().map(|field| usize::from(field.size)).sum();
    let mut policy = SizePolicy::from_context(ctx, forced_width);
    policy.size_floor = policy.size_floor.map(|floor| floor.saturating_sub(lead_size));
    let build = |opcode: OpcodeKey, value: i64, width: u8| {
        leading
            .iter()
            .fold(Emission::new(opcode, ByteOrder::Little), |emission, field| {
                emission.with_field(field.value, field.size)
            })
            .with_field(value, width)
    };
    match resolve_sized_variant(candidates, policy) {
        Resolution::Selected(chosen) => {
            EncodeOutcome::Emitted(build(chosen.opcode, chosen.tag.1, chosen.width))
        }
        Resolution::Deferred(chosen) => {
            EncodeOutcome::Deferred(build(chosen.opcode, chosen.tag.1, chosen.width))
        }
        Resolution::Failed(ResolveFailure::NoSlot) => {
            EncodeOutcome::Failed(EncodeError::unsupported(mnemonic))
        }
        Resolution::Failed(ResolveFailure::TooWide) => {
            EncodeOutcome::Failed(EncodeError::out_of_range(value.unwrap_or(0)))
        }
    }
}
