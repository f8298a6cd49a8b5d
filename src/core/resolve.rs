// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Escalate-or-defer slot selection.
//!
//! Every sized choice in the engine goes through [`resolve_sized_variant`]:
//! zero page versus absolute versus long, short versus long branches, 6809
//! post-byte offset widths and pseudo-branch expansion. Callers describe each
//! candidate slot (its opcode if the CPU has one, operand width, whether the
//! value fits) and get back the narrowest slot that works, a provisional
//! deferral, or a failure.

use tracing::trace;

use crate::core::catalog::OpcodeKey;
use crate::core::family::EncodingContext;

/// Smallest byte width holding `value` as either a signed or unsigned quantity.
pub fn natural_width(value: i64) -> u8 {
    match value {
        -0x80..=0xFF => 1,
        -0x8000..=0xFFFF => 2,
        -0x80_0000..=0xFF_FFFF => 3,
        _ => 4,
    }
}

pub fn fits_unsigned(value: i64, width: u8) -> bool {
    value >= 0 && (width >= 8 || value < 1i64 << (u32::from(width) * 8))
}

pub fn fits_signed(value: i64, width: u8) -> bool {
    if width == 0 {
        return value == 0;
    }
    let bits = u32::from(width) * 8;
    let min = -(1i64 << (bits - 1));
    let max = (1i64 << (bits - 1)) - 1;
    (min..=max).contains(&value)
}

/// One candidate encoding for a sized operand.
#[derive(Debug, Clone)]
pub struct SlotCandidate<T> {
    /// `None` when the active CPU has no encoding for this slot.
    pub opcode: Option<OpcodeKey>,
    /// Operand bytes this slot emits.
    pub width: u8,
    pub fits: bool,
    pub tag: T,
}

impl<T> SlotCandidate<T> {
    pub fn new(opcode: Option<OpcodeKey>, width: u8, fits: bool, tag: T) -> Self {
        Self {
            opcode,
            width,
            fits,
            tag,
        }
    }

    pub fn total_size(&self) -> usize {
        self.opcode.map_or(0, OpcodeKey::len) + usize::from(self.width)
    }
}

/// Pass-dependent constraints on the choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizePolicy {
    /// Forced operand width in bytes.
    pub forced_width: Option<u8>,
    pub pass_needed: bool,
    /// Smallest total size allowed (from the pass-stability ledger).
    pub size_floor: Option<usize>,
}

impl SizePolicy {
    pub fn from_context(ctx: &EncodingContext, forced_width: Option<u8>) -> Self {
        Self {
            forced_width,
            pass_needed: ctx.pass_needed,
            size_floor: ctx.size_floor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chosen<T> {
    pub opcode: OpcodeKey,
    pub width: u8,
    pub tag: T,
}

/// Why no slot was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveFailure {
    /// The CPU has no slot at all for this shape.
    NoSlot,
    /// Slots exist but none holds the value.
    TooWide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Selected(Chosen<T>),
    /// Provisionally the largest slot; valid only while a pass is pending.
    Deferred(Chosen<T>),
    Failed(ResolveFailure),
}

fn choose<T: Clone>(candidate: &SlotCandidate<T>) -> Option<Chosen<T>> {
    candidate.opcode.map(|opcode| Chosen {
        opcode,
        width: candidate.width,
        tag: candidate.tag.clone(),
    })
}

/// Pick the narrowest present slot that holds the value.
///
/// Candidates are considered in ascending total size (ties keep their given
/// order). A forced width pins the slot. With nothing fitting, the largest
/// slot is assumed while a pass is pending, otherwise the choice fails.
pub fn resolve_sized_variant<T: Clone>(
    candidates: &[SlotCandidate<T>],
    policy: SizePolicy,
) -> Resolution<T> {
    let mut available: Vec<&SlotCandidate<T>> = candidates
        .iter()
        .filter(|candidate| candidate.opcode.is_some())
        .collect();
    if available.is_empty() {
        return Resolution::Failed(ResolveFailure::NoSlot);
    }
    available.sort_by_key(|candidate| candidate.total_size());

    if let Some(forced) = policy.forced_width {
        let Some(slot) = available.iter().find(|candidate| candidate.width == forced) else {
            return Resolution::Failed(ResolveFailure::NoSlot);
        };
        return match (slot.fits, policy.pass_needed, choose(slot)) {
            (true, _, Some(chosen)) => Resolution::Selected(chosen),
            (false, true, Some(chosen)) => Resolution::Deferred(chosen),
            _ => Resolution::Failed(ResolveFailure::TooWide),
        };
    }

    let floor = policy.size_floor.unwrap_or(0);
    let fitting = available
        .iter()
        .find(|candidate| candidate.fits && candidate.total_size() >= floor)
        .or_else(|| available.iter().rev().find(|candidate| candidate.fits));
    if let Some(slot) = fitting {
        if slot.total_size() > available[0].total_size() {
            trace!(
                size = slot.total_size(),
                floor,
                "escalated past narrower slot"
            );
        }
        if let Some(chosen) = choose(slot) {
            return Resolution::Selected(chosen);
        }
    }

    if policy.pass_needed {
        if let Some(chosen) = available.last().and_then(|slot| choose(slot)) {
            trace!(size = chosen.width, "deferring with largest slot");
            return Resolution::Deferred(chosen);
        }
    }
    Resolution::Failed(ResolveFailure::TooWide)
}
