// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Post-assembly peephole warnings over emitted code blocks.

use tracing::trace;

use crate::core::assembler::error::{
    Diagnostic, Severity, CODE_CALL_RETURN, CODE_JMP_INDIRECT_PAGE,
};
use crate::core::decode::DecodedInstruction;
use crate::core::family::CpuState;
use crate::core::registry::{AnalysisRules, CpuHandlerDyn, FamilyHandlerDyn};

/// A contiguous run of emitted bytes starting at `origin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub origin: u32,
    pub bytes: Vec<u8>,
}

impl CodeBlock {
    pub fn new(origin: u32, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            origin,
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub call_return: bool,
    pub hardware_defects: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            call_return: true,
            hardware_defects: true,
        }
    }
}

/// Decode every block and report call/return pairs and hardware defects.
///
/// Undecodable bytes are skipped one at a time and break any pair.
pub fn analyze(
    family: &dyn FamilyHandlerDyn,
    cpu: &dyn CpuHandlerDyn,
    mut state: CpuState,
    blocks: &[CodeBlock],
    options: AnalysisOptions,
) -> Vec<Diagnostic> {
    let rules = cpu
        .analysis_rules()
        .unwrap_or_else(|| family.analysis_rules());
    let mut diagnostics = Vec::new();

    for block in blocks {
        let mut previous: Option<DecodedInstruction> = None;
        let mut pos = 0usize;
        while pos < block.bytes.len() {
            let pc = block.origin.wrapping_add(pos as u32);
            let Some(decoded) = cpu
                .decode(&block.bytes, pos, pc, &state)
                .filter(|decoded| decoded.size > 0)
            else {
                previous = None;
                pos += 1;
                continue;
            };
            cpu.update_state_after_decode(&decoded, &mut state);

            if options.hardware_defects {
                if let Some(message) = cpu.hardware_defect(&decoded) {
                    diagnostics.push(
                        Diagnostic::new(Severity::Warning, CODE_JMP_INDIRECT_PAGE, message)
                            .with_address(decoded.pc),
                    );
                }
            }
            if options.call_return {
                if let Some(call) = &previous {
                    if let Some(message) = tail_call(family, &rules, call, &decoded) {
                        trace!(pc = call.pc, "call followed by return");
                        diagnostics.push(
                            Diagnostic::new(Severity::Warning, CODE_CALL_RETURN, message)
                                .with_address(call.pc),
                        );
                    }
                }
            }

            pos += decoded.size;
            previous = Some(decoded);
        }
    }
    diagnostics
}

fn operands(decoded: &DecodedInstruction) -> Option<&str> {
    decoded
        .text
        .split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim())
        .filter(|rest| !rest.is_empty())
}

fn tail_call(
    family: &dyn FamilyHandlerDyn,
    rules: &AnalysisRules,
    call: &DecodedInstruction,
    ret: &DecodedInstruction,
) -> Option<String> {
    if operands(ret).is_some() {
        return None;
    }
    let jump = rules.tail_jump(call.mnemonic(), ret.mnemonic())?;
    let target = operands(call)?;
    let first = target.split(',').next().unwrap_or(target).trim();
    if family.is_condition(first) {
        return None;
    }
    Some(format!(
        "`{}` followed by `{}` can be `{} {}`",
        call.text,
        ret.text,
        jump.to_ascii_lowercase(),
        target
    ))
}
