// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! HuC6280 CPU module.

use std::sync::{Arc, OnceLock};

use crate::core::catalog::CatalogLayer;
use crate::core::cpu::CpuType;
use crate::families::mos6502::module::shared_layer;
use crate::families::mos6502::{build_layer, MosKey, MosProfile};
use crate::m65c02::module::r65c02_layers;

use super::instructions::CPU_INSTRUCTION_TABLE;

pub const CPU_ID: CpuType = CpuType::new("huc6280");

fn huc6280_layer() -> Arc<CatalogLayer<MosKey>> {
    static LAYER: OnceLock<Arc<CatalogLayer<MosKey>>> = OnceLock::new();
    shared_layer(&LAYER, || build_layer("huc6280", CPU_INSTRUCTION_TABLE))
}

fn huc6280_layers() -> Vec<Arc<CatalogLayer<MosKey>>> {
    let mut layers = r65c02_layers();
    layers.push(huc6280_layer());
    layers
}

pub static HUC6280_PROFILE: MosProfile = MosProfile {
    cpu: CPU_ID,
    name: "huc6280",
    aliases: &["h6280", "pce"],
    layers: huc6280_layers,
    jmp_indirect_bug: false,
    width_hooks: None,
    extra_bitwidths: &[],
};
