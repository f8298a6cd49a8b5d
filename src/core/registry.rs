// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Module registry for CPU families and CPUs.
//!
//! The registry has no knowledge of concrete families or CPUs. Family and CPU
//! modules register themselves and hand out type-erased handlers; the CPU
//! handler owns the catalog view for its profile.

use std::collections::HashMap;

use thiserror::Error;

use crate::core::assembler::error::EncodeError;
use crate::core::cpu::{ByteOrder, CpuFamily, CpuType};
use crate::core::decode::DecodedInstruction;
use crate::core::family::{AssemblerContext, CpuState, EncodeOutcome, Emission, EncodingContext};
use crate::core::operand::Instruction;

/// A call mnemonic, the return that may follow it, and the jump that
/// replaces the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallReturn {
    pub call: &'static str,
    pub ret: &'static str,
    pub jump: &'static str,
}

/// Mnemonics `analyze` uses to spot a call followed by a return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisRules {
    pub call_return: &'static [CallReturn],
}

impl AnalysisRules {
    /// Jump suggested for `call` followed by `ret`, if the pair is known.
    pub fn tail_jump(&self, call: &str, ret: &str) -> Option<&'static str> {
        self.call_return
            .iter()
            .find(|rule| rule.call.eq_ignore_ascii_case(call) && rule.ret.eq_ignore_ascii_case(ret))
            .map(|rule| rule.jump)
    }
}

/// Type-erased family handler: constants shared by every CPU of a family.
pub trait FamilyHandlerDyn: Send + Sync {
    fn family_id(&self) -> CpuFamily;
    fn byte_order(&self) -> ByteOrder;
    /// Legal bitwidth modifier values, in bits.
    fn legal_bitwidths(&self) -> &'static [u8] {
        &[8, 16]
    }
    fn analysis_rules(&self) -> AnalysisRules;
    fn is_register(&self, name: &str) -> bool;
    /// Branch condition names (`nz`, `c`) accepted as the first operand.
    fn is_condition(&self, _name: &str) -> bool {
        false
    }
}

/// Type-erased CPU handler holding the active catalog view.
pub trait CpuHandlerDyn: Send + Sync {
    fn cpu_id(&self) -> CpuType;
    fn family_id(&self) -> CpuFamily;
    fn encode(
        &self,
        instr: &Instruction,
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> EncodeOutcome;
    fn decode(
        &self,
        bytes: &[u8],
        offset: usize,
        pc: u32,
        state: &CpuState,
    ) -> Option<DecodedInstruction>;
    fn layer_names(&self) -> Vec<&'static str>;
    fn entry_count(&self) -> usize;
    /// Extra legal bitwidths beyond the family's (65816 long addresses).
    fn extra_bitwidths(&self) -> &'static [u8] {
        &[]
    }
    fn update_state_after_encode(
        &self,
        _instr: &Instruction,
        _emission: &Emission,
        _state: &mut CpuState,
    ) {
    }
    fn update_state_after_decode(&self, _decoded: &DecodedInstruction, _state: &mut CpuState) {}
    /// Apply a CPU directive such as `.m16`. Returns false when not handled.
    fn apply_directive(&self, _directive: &str, _state: &mut CpuState) -> Result<bool, EncodeError> {
        Ok(false)
    }
    /// Re-present a decoded branch-over-jump pair as one pseudo-instruction.
    fn fold_pseudo_branch(
        &self,
        _first: &DecodedInstruction,
        _second: &DecodedInstruction,
    ) -> Option<String> {
        None
    }
    /// Known silicon defect triggered by this instruction.
    fn hardware_defect(&self, _decoded: &DecodedInstruction) -> Option<String> {
        None
    }
    /// Analysis rules replacing the family's for this CPU.
    fn analysis_rules(&self) -> Option<AnalysisRules> {
        None
    }
}

/// Registration interface for a CPU family.
pub trait FamilyModule: Send + Sync {
    fn family_id(&self) -> CpuFamily;
    fn cpu_names(&self, registry: &ModuleRegistry) -> Vec<String> {
        registry.family_cpu_names(self.family_id())
    }
    fn handler(&self) -> Box<dyn FamilyHandlerDyn>;
}

/// Registration interface for a specific CPU.
pub trait CpuModule: Send + Sync {
    fn cpu_id(&self) -> CpuType;
    fn family_id(&self) -> CpuFamily;
    fn cpu_name(&self) -> &'static str;
    fn cpu_aliases(&self) -> &'static [&'static str] {
        &[]
    }
    fn handler(&self) -> Box<dyn CpuHandlerDyn>;
}

/// Error returned when the registry cannot resolve a requested pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no handler registered for family {0:?}")]
    MissingFamily(CpuFamily),
    #[error("no handler registered for CPU {0:?}")]
    MissingCpu(CpuType),
}

/// A resolved pipeline: family handler plus CPU handler.
pub struct ResolvedPipeline {
    pub family: Box<dyn FamilyHandlerDyn>,
    pub cpu: Box<dyn CpuHandlerDyn>,
}

/// Central registry mapping CPU families and CPU types.
pub struct ModuleRegistry {
    families: HashMap<CpuFamily, Box<dyn FamilyModule>>,
    cpus: HashMap<CpuType, Box<dyn CpuModule>>,
    cpu_names: HashMap<String, CpuType>,
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            families: HashMap::new(),
            cpus: HashMap::new(),
            cpu_names: HashMap::new(),
        }
    }

    pub fn register_family(&mut self, module: Box<dyn FamilyModule>) {
        self.families.insert(module.family_id(), module);
    }

    pub fn register_cpu(&mut self, module: Box<dyn CpuModule>) {
        let cpu_id = module.cpu_id();
        self.cpu_names
            .insert(normalize_cpu_name(module.cpu_name()), cpu_id);
        for alias in module.cpu_aliases() {
            self.cpu_names.insert(normalize_cpu_name(alias), cpu_id);
        }
        self.cpus.insert(cpu_id, module);
    }

    pub fn resolve_cpu_name(&self, name: &str) -> Option<CpuType> {
        self.cpu_names.get(&normalize_cpu_name(name)).copied()
    }

    pub fn cpu_display_name(&self, cpu: CpuType) -> Option<&'static str> {
        self.cpus.get(&cpu).map(|module| module.cpu_name())
    }

    pub fn cpu_aliases(&self, cpu: CpuType) -> &'static [&'static str] {
        self.cpus
            .get(&cpu)
            .map(|module| module.cpu_aliases())
            .unwrap_or(&[])
    }

    pub fn cpu_family(&self, cpu: CpuType) -> Option<CpuFamily> {
        self.cpus.get(&cpu).map(|module| module.family_id())
    }

    pub fn family_cpu_names(&self, family: CpuFamily) -> Vec<String> {
        let mut names: Vec<String> = self
            .cpus
            .values()
            .filter(|module| module.family_id() == family)
            .map(|module| module.cpu_name().to_string())
            .collect();
        names.sort();
        names
    }

    pub fn family_ids(&self) -> Vec<CpuFamily> {
        let mut ids: Vec<CpuFamily> = self.families.keys().copied().collect();
        ids.sort_by_key(|id| id.as_str());
        ids
    }

    /// Registered CPU types, sorted by display name.
    pub fn cpu_ids(&self) -> Vec<CpuType> {
        let mut ids: Vec<CpuType> = self.cpus.keys().copied().collect();
        ids.sort_by_key(|id| self.cpu_display_name(*id).unwrap_or(id.as_str()));
        ids
    }

    pub fn resolve_pipeline(&self, cpu: CpuType) -> Result<ResolvedPipeline, RegistryError> {
        let cpu_module = self.cpus.get(&cpu).ok_or(RegistryError::MissingCpu(cpu))?;
        let family_id = cpu_module.family_id();
        let family_module = self
            .families
            .get(&family_id)
            .ok_or(RegistryError::MissingFamily(family_id))?;
        Ok(ResolvedPipeline {
            family: family_module.handler(),
            cpu: cpu_module.handler(),
        })
    }
}

fn normalize_cpu_name(name: &str) -> String {
    name.to_ascii_lowercase()
}
