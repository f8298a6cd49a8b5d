// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Motorola 6800 family module.

use std::sync::{Arc, OnceLock};

use crate::core::catalog::CatalogLayer;
use crate::core::cpu::{CpuFamily, CpuType};
use crate::core::registry::{CpuHandlerDyn, CpuModule, FamilyHandlerDyn, FamilyModule};

use super::table::{build_layer, FAMILY_INSTRUCTION_TABLE};
use super::{M6800FamilyHandler, M68CpuHandler, M68Key, M68Profile};

pub const FAMILY_ID: CpuFamily = CpuFamily::new("m6800");
pub const CPU_ID: CpuType = CpuType::new("m6800");

fn m6800_layers() -> Vec<Arc<CatalogLayer<M68Key>>> {
    static LAYER: OnceLock<Arc<CatalogLayer<M68Key>>> = OnceLock::new();
    vec![Arc::clone(
        LAYER.get_or_init(|| Arc::new(build_layer("6800", FAMILY_INSTRUCTION_TABLE))),
    )]
}

pub static M6800_PROFILE: M68Profile = M68Profile {
    cpu: CPU_ID,
    name: "6800",
    aliases: &["m6800", "mc6800"],
    layers: m6800_layers,
    direct_page_register: false,
    postbyte_indexing: false,
};

pub struct M6800FamilyModule;

impl FamilyModule for M6800FamilyModule {
    fn family_id(&self) -> CpuFamily {
        FAMILY_ID
    }

    fn handler(&self) -> Box<dyn FamilyHandlerDyn> {
        Box::new(M6800FamilyHandler::new())
    }
}

/// Registers one 6800-family CPU described by an [`M68Profile`].
pub struct M68CpuModule(pub &'static M68Profile);

impl CpuModule for M68CpuModule {
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
        Box::new(M68CpuHandler::new(self.0))
    }
}
