// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! 65CE02 and 45GS02 CPU modules.

use std::sync::{Arc, OnceLock};

use crate::core::catalog::CatalogLayer;
use crate::core::cpu::CpuType;
use crate::families::mos6502::module::shared_layer;
use crate::families::mos6502::{build_layer, MosKey, MosProfile};
use crate::m65c02::module::r65c02_layers;

use super::instructions::{CE02_INSTRUCTION_TABLE, GS02_INSTRUCTION_TABLE};

pub const M65CE02_CPU_ID: CpuType = CpuType::new("65ce02");
pub const CPU_ID: CpuType = CpuType::new("45gs02");

fn ce02_layer() -> Arc<CatalogLayer<MosKey>> {
    static LAYER: OnceLock<Arc<CatalogLayer<MosKey>>> = OnceLock::new();
    shared_layer(&LAYER, || build_layer("65ce02", CE02_INSTRUCTION_TABLE))
}

fn gs02_layer() -> Arc<CatalogLayer<MosKey>> {
    static LAYER: OnceLock<Arc<CatalogLayer<MosKey>>> = OnceLock::new();
    shared_layer(&LAYER, || build_layer("45gs02", GS02_INSTRUCTION_TABLE))
}

fn m65ce02_layers() -> Vec<Arc<CatalogLayer<MosKey>>> {
    let mut layers = r65c02_layers();
    layers.push(ce02_layer());
    layers
}

fn m45gs02_layers() -> Vec<Arc<CatalogLayer<MosKey>>> {
    let mut layers = m65ce02_layers();
    layers.push(gs02_layer());
    layers
}

pub static M65CE02_PROFILE: MosProfile = MosProfile {
    cpu: M65CE02_CPU_ID,
    name: "65ce02",
    aliases: &["m65ce02", "csg65ce02"],
    layers: m65ce02_layers,
    jmp_indirect_bug: false,
    width_hooks: None,
    extra_bitwidths: &[],
};

pub static M45GS02_PROFILE: MosProfile = MosProfile {
    cpu: CPU_ID,
    name: "45gs02",
    aliases: &["m45gs02", "mega65", "4510", "csg4510"],
    layers: m45gs02_layers,
    jmp_indirect_bug: false,
    width_hooks: None,
    extra_bitwidths: &[],
};
