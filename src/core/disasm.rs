// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Buffer disassembly.
//!
//! Decodes a byte buffer instruction by instruction. Bytes that do not start
//! a known instruction are collected into `.byte` lines.

use crate::core::assembler::listing::ListingLine;
use crate::core::family::CpuState;
use crate::core::registry::CpuHandlerDyn;

pub const MAX_DATA_BYTES_PER_LINE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisasmOptions {
    /// Emit every byte as data.
    pub suppress: bool,
    /// Bytes per `.byte` line, clamped to 1..=8.
    pub bytes_per_line: usize,
    /// Show `B<inverse> +3; JMP abs` as the pseudo-branch it came from.
    pub fold_pseudo_branches: bool,
}

impl Default for DisasmOptions {
    fn default() -> Self {
        Self {
            suppress: false,
            bytes_per_line: MAX_DATA_BYTES_PER_LINE,
            fold_pseudo_branches: false,
        }
    }
}

/// Decode `bytes[offset..]`, where `bytes[offset]` sits at `origin`.
///
/// `state` carries register widths across instructions and is updated as
/// width-changing instructions are decoded.
pub fn decode_lines(
    cpu: &dyn CpuHandlerDyn,
    state: &mut CpuState,
    bytes: &[u8],
    offset: usize,
    origin: u32,
    options: DisasmOptions,
) -> Vec<ListingLine> {
    let per_line = options.bytes_per_line.clamp(1, MAX_DATA_BYTES_PER_LINE);
    let pc_at = |pos: usize| origin.wrapping_add((pos - offset) as u32);
    let mut lines = Vec::new();
    let mut data_start: Option<usize> = None;
    let mut pos = offset;

    while pos < bytes.len() {
        let decoded = if options.suppress {
            None
        } else {
            cpu.decode(bytes, pos, pc_at(pos), state)
        };
        let Some(decoded) = decoded.filter(|decoded| decoded.size > 0) else {
            let start = *data_start.get_or_insert(pos);
            pos += 1;
            if pos - start == per_line {
                lines.push(ListingLine::data(pc_at(start), &bytes[start..pos]));
                data_start = None;
            }
            continue;
        };
        if let Some(start) = data_start.take() {
            lines.push(ListingLine::data(pc_at(start), &bytes[start..pos]));
        }

        cpu.update_state_after_decode(&decoded, state);
        let next = (pos + decoded.size).min(bytes.len());
        if options.fold_pseudo_branches {
            let folded = cpu
                .decode(bytes, next, pc_at(next), state)
                .and_then(|second| {
                    cpu.fold_pseudo_branch(&decoded, &second)
                        .map(|text| (text, second.size))
                });
            if let Some((text, second_size)) = folded {
                let end = (next + second_size).min(bytes.len());
                lines.push(ListingLine::new(decoded.pc, &bytes[pos..end], text));
                pos = end;
                continue;
            }
        }
        lines.push(ListingLine::new(decoded.pc, &bytes[pos..next], decoded.text));
        pos = next;
    }

    if let Some(start) = data_start {
        lines.push(ListingLine::data(pc_at(start), &bytes[start..]));
    }
    lines
}
