// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! 65816 register-width state.
//!
//! `REP`/`SEP` clear or set the M and X status bits; with auto-widen on the
//! encoder follows them so later immediates get the right size. The width
//! directives set the same state explicitly.

use crate::core::family::CpuState;
use crate::families::mos6502::WidthHooks;

pub const STATUS_M: i64 = 0x20;
pub const STATUS_X: i64 = 0x10;

pub static WIDTH_HOOKS: WidthHooks = WidthHooks {
    status_change,
    directive: apply_width_directive,
};

fn set_widths(state: &mut CpuState, mask: i64, wide: bool) {
    if mask & STATUS_M != 0 {
        state.widths.accumulator16 = wide;
    }
    if mask & STATUS_X != 0 {
        state.widths.index16 = wide;
    }
}

/// `rep` clears status bits (16-bit registers), `sep` sets them.
pub fn status_change(mnemonic: &str, mask: i64, state: &mut CpuState) {
    match mnemonic {
        "rep" => set_widths(state, mask, true),
        "sep" => set_widths(state, mask, false),
        _ => {}
    }
}

/// `.m8`, `.m16`, `.x8`, `.x16`, `.mx8` and `.mx16`.
pub fn apply_width_directive(directive: &str, state: &mut CpuState) -> bool {
    let directive = directive.trim().trim_start_matches('.').to_ascii_lowercase();
    let (mask, wide) = match directive.as_str() {
        "m8" => (STATUS_M, false),
        "m16" => (STATUS_M, true),
        "x8" => (STATUS_X, false),
        "x16" => (STATUS_X, true),
        "mx8" => (STATUS_M | STATUS_X, false),
        "mx16" => (STATUS_M | STATUS_X, true),
        _ => return false,
    };
    set_widths(state, mask, wide);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rep_and_sep_follow_the_mask() {
        let mut state = CpuState::default();
        status_change("rep", 0x30, &mut state);
        assert!(state.widths.accumulator16 && state.widths.index16);
        status_change("sep", STATUS_X, &mut state);
        assert!(state.widths.accumulator16);
        assert!(!state.widths.index16);
        status_change("lda", 0xFF, &mut state);
        assert!(state.widths.accumulator16);
    }

    #[test]
    fn width_directives() {
        let mut state = CpuState::default();
        assert!(apply_width_directive(".mx16", &mut state));
        assert!(state.widths.index16);
        assert!(apply_width_directive(".M8", &mut state));
        assert!(!state.widths.accumulator16);
        assert!(!apply_width_directive(".org", &mut state));
    }
}
