// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Motorola 6809 CPU module.

use std::sync::{Arc, OnceLock};

use crate::core::catalog::CatalogLayer;
use crate::core::cpu::CpuType;
use crate::families::m6800::{build_layer, M68Key, M68Profile};

use super::instructions::CPU_INSTRUCTION_TABLE;

pub const CPU_ID: CpuType = CpuType::new("m6809");

fn m6809_layers() -> Vec<Arc<CatalogLayer<M68Key>>> {
    static LAYER: OnceLock<Arc<CatalogLayer<M68Key>>> = OnceLock::new();
    vec![Arc::clone(
        LAYER.get_or_init(|| Arc::new(build_layer("6809", CPU_INSTRUCTION_TABLE))),
    )]
}

pub static M6809_PROFILE: M68Profile = M68Profile {
    cpu: CPU_ID,
    name: "6809",
    aliases: &["m6809", "mc6809"],
    layers: m6809_layers,
    direct_page_register: true,
    postbyte_indexing: true,
};
