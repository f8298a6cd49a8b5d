// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Session facade over the registry: one selected CPU, its state, the size
//! ledger and the diagnostics raised so far.

use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::core::analyze::{self, AnalysisOptions, CodeBlock};
use crate::core::assembler::error::{
    default_diagnostic_code, Diagnostic, EncodeError, EncodeErrorKind, EngineError, Severity,
};
use crate::core::assembler::listing::{render_lines, ListingLine};
use crate::core::cpu::CpuType;
use crate::core::decode::DecodedInstruction;
use crate::core::disasm::{decode_lines, DisasmOptions};
use crate::core::family::{AssemblerContext, CpuState, EncodeOutcome, EncodingContext};
use crate::core::operand::Instruction;
use crate::core::registry::{ModuleRegistry, RegistryError, ResolvedPipeline};
use crate::core::size_stability::SizeLedger;
use crate::registry_defaults::build_default_registry;

struct ActiveCpu {
    cpu: CpuType,
    pipeline: ResolvedPipeline,
    state: CpuState,
}

pub struct Engine {
    registry: ModuleRegistry,
    config: EngineConfig,
    active: Option<ActiveCpu>,
    ledger: SizeLedger,
    size_changed: bool,
    diagnostics: Vec<Diagnostic>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(build_default_registry(), EngineConfig::default())
    }
}

impl Engine {
    pub fn new(registry: ModuleRegistry, config: EngineConfig) -> Self {
        Self {
            registry,
            config,
            active: None,
            ledger: SizeLedger::new(),
            size_changed: false,
            diagnostics: Vec::new(),
        }
    }

    /// Engine over the built-in CPUs, selecting the configured default CPU.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        let default_cpu = config.default_cpu.clone();
        let mut engine = Self::new(build_default_registry(), config);
        if let Some(name) = default_cpu {
            engine.set_cpu(&name)?;
        }
        Ok(engine)
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Select a CPU by name or alias. The previous view is dropped, never
    /// mutated; CPU state restarts from the configuration and line sizes
    /// recorded for the previous CPU are forgotten.
    pub fn set_cpu(&mut self, name: &str) -> Result<CpuType, EngineError> {
        let cpu = self
            .registry
            .resolve_cpu_name(name)
            .ok_or_else(|| EngineError::UnknownCpu(name.to_string()))?;
        let pipeline = self.registry.resolve_pipeline(cpu).map_err(|err| match err {
            RegistryError::MissingFamily(_) | RegistryError::MissingCpu(_) => {
                EngineError::UnknownCpu(name.to_string())
            }
        })?;
        debug!(
            cpu = cpu.as_str(),
            family = pipeline.family.family_id().as_str(),
            layers = ?pipeline.cpu.layer_names(),
            entries = pipeline.cpu.entry_count(),
            "cpu selected"
        );
        self.active = Some(ActiveCpu {
            cpu,
            pipeline,
            state: self.config.initial_state(),
        });
        self.ledger.clear();
        self.size_changed = false;
        Ok(cpu)
    }

    pub fn cpu(&self) -> Option<CpuType> {
        self.active.as_ref().map(|active| active.cpu)
    }

    pub fn state(&self) -> Option<&CpuState> {
        self.active.as_ref().map(|active| &active.state)
    }

    /// Start a new assembly: forget line sizes, diagnostics and CPU state.
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.size_changed = false;
        self.diagnostics.clear();
        let initial = self.config.initial_state();
        if let Some(active) = &mut self.active {
            active.state = initial;
        }
    }

    /// Start another pass over the same source. Line sizes are kept.
    pub fn begin_pass(&mut self) {
        self.size_changed = false;
        self.diagnostics.clear();
        let initial = self.config.initial_state();
        if let Some(active) = &mut self.active {
            active.state = initial;
        }
    }

    /// True when a line grew since the last `begin_pass`.
    pub fn size_changed(&self) -> bool {
        self.size_changed
    }

    /// Per-line context from the current CPU state.
    pub fn context(
        &self,
        pc: u32,
        pass_needed: bool,
        line: Option<usize>,
    ) -> Result<EncodingContext, EngineError> {
        let active = self.active.as_ref().ok_or(EngineError::NoCpuSelected)?;
        Ok(active.state.context(pc, pass_needed, line))
    }

    /// Encode one instruction.
    ///
    /// Failures are also recorded as diagnostics against `ctx.line`. An
    /// illegal bitwidth modifier is dropped with a warning.
    pub fn emit(
        &mut self,
        instr: &Instruction,
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> Result<EncodeOutcome, EngineError> {
        let active = self.active.as_mut().ok_or(EngineError::NoCpuSelected)?;
        let mut ctx = ctx.clone();
        let floor = self.ledger.floor(ctx.line);
        if floor.is_some() {
            trace!(line = ?ctx.line, floor = ?floor, "size floor from earlier pass");
        }
        ctx.size_floor = ctx.size_floor.max(floor);

        let checked;
        let instr = match instr.bitwidth {
            Some(bits) if !legal_bitwidth(&active.pipeline, bits) => {
                warn!(
                    mnemonic = instr.mnemonic.as_str(),
                    bits,
                    cpu = active.cpu.as_str(),
                    "bitwidth modifier ignored"
                );
                let err = EncodeError::new(
                    EncodeErrorKind::InvalidBitwidthModifier,
                    format!(
                        "Bitwidth modifier {bits} is not valid for {}",
                        active.cpu.as_str()
                    ),
                );
                self.diagnostics
                    .push(Diagnostic::from_error(Severity::Warning, &err).with_line(ctx.line));
                checked = Instruction {
                    bitwidth: None,
                    ..instr.clone()
                };
                &checked
            }
            _ => instr,
        };

        let outcome = active.pipeline.cpu.encode(instr, &ctx, eval);
        match &outcome {
            EncodeOutcome::Emitted(emission) | EncodeOutcome::Deferred(emission) => {
                if self.ledger.record(ctx.line, emission.len()) {
                    trace!(line = ?ctx.line, size = emission.len(), "line grew");
                    self.size_changed = true;
                }
                active
                    .pipeline
                    .cpu
                    .update_state_after_encode(instr, emission, &mut active.state);
            }
            EncodeOutcome::Failed(err) => {
                self.diagnostics.push(
                    Diagnostic::new(
                        Severity::Error,
                        default_diagnostic_code(err.kind()),
                        err.message(),
                    )
                    .with_line(ctx.line)
                    .with_address(ctx.pc),
                );
            }
        }
        Ok(outcome)
    }

    /// Apply a CPU directive (`.m16`, `setdp $20`). Returns false when the
    /// selected CPU does not know it.
    pub fn apply_directive(&mut self, directive: &str) -> Result<bool, EngineError> {
        let active = self.active.as_mut().ok_or(EngineError::NoCpuSelected)?;
        match active
            .pipeline
            .cpu
            .apply_directive(directive, &mut active.state)
        {
            Ok(handled) => Ok(handled),
            Err(err) => {
                self.diagnostics
                    .push(Diagnostic::from_error(Severity::Error, &err));
                Ok(true)
            }
        }
    }

    /// Decode one instruction with the current CPU state.
    pub fn decode_one(
        &self,
        bytes: &[u8],
        offset: usize,
        pc: u32,
    ) -> Result<Option<DecodedInstruction>, EngineError> {
        let active = self.active.as_ref().ok_or(EngineError::NoCpuSelected)?;
        Ok(active.pipeline.cpu.decode(bytes, offset, pc, &active.state))
    }

    /// Listing lines for `bytes[offset..]` placed at `origin`.
    pub fn decode_lines(
        &self,
        bytes: &[u8],
        offset: usize,
        origin: u32,
        suppress: bool,
    ) -> Result<Vec<ListingLine>, EngineError> {
        let active = self.active.as_ref().ok_or(EngineError::NoCpuSelected)?;
        let mut state = active.state;
        let options = DisasmOptions {
            suppress,
            bytes_per_line: self.config.listing.bytes_per_line,
            fold_pseudo_branches: self.config.fold_pseudo_branches,
        };
        Ok(decode_lines(
            active.pipeline.cpu.as_ref(),
            &mut state,
            bytes,
            offset,
            origin,
            options,
        ))
    }

    /// Listing text for `bytes[offset..]` placed at `origin`.
    pub fn decode_buffer(
        &self,
        bytes: &[u8],
        offset: usize,
        origin: u32,
        suppress: bool,
    ) -> Result<String, EngineError> {
        Ok(render_lines(&self.decode_lines(bytes, offset, origin, suppress)?))
    }

    /// Peephole warnings over emitted code.
    pub fn analyze(&self, blocks: &[CodeBlock]) -> Result<Vec<Diagnostic>, EngineError> {
        let active = self.active.as_ref().ok_or(EngineError::NoCpuSelected)?;
        let options = AnalysisOptions {
            call_return: self.config.analysis.call_return,
            hardware_defects: self.config.analysis.jmp_indirect_bug,
        };
        Ok(analyze::analyze(
            active.pipeline.family.as_ref(),
            active.pipeline.cpu.as_ref(),
            self.config.initial_state(),
            blocks,
            options,
        ))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

fn legal_bitwidth(pipeline: &ResolvedPipeline, bits: u8) -> bool {
    pipeline.family.legal_bitwidths().contains(&bits)
        || pipeline.cpu.extra_bitwidths().contains(&bits)
}

#[cfg(test)]
mod tests;
