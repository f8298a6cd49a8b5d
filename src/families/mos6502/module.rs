// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! MOS 6502 family module.

use std::sync::{Arc, OnceLock};

use crate::core::catalog::CatalogLayer;
use crate::core::cpu::{CpuFamily, CpuType};
use crate::core::registry::{CpuHandlerDyn, CpuModule, FamilyHandlerDyn, FamilyModule};

use super::table::{build_layer, FAMILY_INSTRUCTION_TABLE};
use super::undocumented::UNDOCUMENTED_INSTRUCTION_TABLE;
use super::{MOS6502FamilyHandler, MosCpuHandler, MosKey, MosProfile};

pub const FAMILY_ID: CpuFamily = CpuFamily::new("mos6502");
pub const CPU_ID: CpuType = CpuType::new("m6502");
pub const CPU_6502I_ID: CpuType = CpuType::new("m6502i");

/// Cache a layer for the life of the process.
pub fn shared_layer(
    cell: &'static OnceLock<Arc<CatalogLayer<MosKey>>>,
    build: fn() -> CatalogLayer<MosKey>,
) -> Arc<CatalogLayer<MosKey>> {
    Arc::clone(cell.get_or_init(|| Arc::new(build())))
}

pub fn base_layer() -> Arc<CatalogLayer<MosKey>> {
    static LAYER: OnceLock<Arc<CatalogLayer<MosKey>>> = OnceLock::new();
    shared_layer(&LAYER, || build_layer("6502", FAMILY_INSTRUCTION_TABLE))
}

pub fn undocumented_layer() -> Arc<CatalogLayer<MosKey>> {
    static LAYER: OnceLock<Arc<CatalogLayer<MosKey>>> = OnceLock::new();
    shared_layer(&LAYER, || build_layer("illegal", UNDOCUMENTED_INSTRUCTION_TABLE))
}

fn m6502_layers() -> Vec<Arc<CatalogLayer<MosKey>>> {
    vec![base_layer()]
}

fn m6502i_layers() -> Vec<Arc<CatalogLayer<MosKey>>> {
    vec![base_layer(), undocumented_layer()]
}

pub static M6502_PROFILE: MosProfile = MosProfile {
    cpu: CPU_ID,
    name: "6502",
    aliases: &["m6502", "mos6502"],
    layers: m6502_layers,
    jmp_indirect_bug: true,
    width_hooks: None,
    extra_bitwidths: &[],
};

pub static M6502I_PROFILE: MosProfile = MosProfile {
    cpu: CPU_6502I_ID,
    name: "6502i",
    aliases: &["6502x", "nmos6502i"],
    layers: m6502i_layers,
    jmp_indirect_bug: true,
    width_hooks: None,
    extra_bitwidths: &[],
};

pub struct MOS6502FamilyModule;

impl FamilyModule for MOS6502FamilyModule {
    fn family_id(&self) -> CpuFamily {
        FAMILY_ID
    }

    fn handler(&self) -> Box<dyn FamilyHandlerDyn> {
        Box::new(MOS6502FamilyHandler::new())
    }
}

/// Registers one 6502-family CPU described by a [`MosProfile`].
pub struct MosCpuModule(pub &'static MosProfile);

impl CpuModule for MosCpuModule {
    fn cpu_id(&self) -> CpuType {
        self.0.cpu
    }

    fn family_id(&self) -> CpuFamily {
        FAMILY_ID
    }

    fn cpu_name(&self) -> &'static str {
        self.0.name
    }

    fn cpu_aliases(&self) -> &'static [&'static str] {
        self.0.aliases
    }

    fn handler(&self) -> Box<dyn CpuHandlerDyn> {
        Box::new(MosCpuHandler::new(self.0))
    }
}
