// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Intel 8080 family module.

use std::sync::{Arc, OnceLock};

use crate::core::catalog::CatalogLayer;
use crate::core::cpu::{CpuFamily, CpuType};
use crate::core::registry::{CpuHandlerDyn, CpuModule, FamilyHandlerDyn, FamilyModule};

use super::table::i8080_layer;
use super::{FormKey, I80CpuHandler, I80Profile, Intel8080FamilyHandler, INTEL_CALL_RETURN};

pub const FAMILY_ID: CpuFamily = CpuFamily::new("intel8080");
pub const CPU_ID: CpuType = CpuType::new("8080");

/// Cache a layer for the life of the process.
pub fn shared_layer(
    cell: &'static OnceLock<Arc<CatalogLayer<FormKey>>>,
    build: fn() -> CatalogLayer<FormKey>,
) -> Arc<CatalogLayer<FormKey>> {
    Arc::clone(cell.get_or_init(|| Arc::new(build())))
}

fn i8080_layers() -> Vec<Arc<CatalogLayer<FormKey>>> {
    static LAYER: OnceLock<Arc<CatalogLayer<FormKey>>> = OnceLock::new();
    vec![shared_layer(&LAYER, i8080_layer)]
}

pub static I8080_PROFILE: I80Profile = I80Profile {
    cpu: CPU_ID,
    name: "i8080",
    aliases: &["8080", "intel8080"],
    layers: i8080_layers,
    call_return: INTEL_CALL_RETURN,
};

pub struct Intel8080FamilyModule;

impl FamilyModule for Intel8080FamilyModule {
    fn family_id(&self) -> CpuFamily {
        FAMILY_ID
    }

    fn handler(&self) -> Box<dyn FamilyHandlerDyn> {
        Box::new(Intel8080FamilyHandler::new())
    }
}

/// Registers one 8080-family CPU described by an [`I80Profile`].
pub struct I80CpuModule(pub &'static I80Profile);

impl CpuModule for I80CpuModule {
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
        Box::new(I80CpuHandler::new(self.0))
    }
}
