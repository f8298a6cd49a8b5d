// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! 65C02 CPU modules.

use std::sync::{Arc, OnceLock};

use crate::core::catalog::CatalogLayer;
use crate::core::cpu::CpuType;
use crate::families::mos6502::module::{base_layer, shared_layer};
use crate::families::mos6502::{build_layer, MosKey, MosProfile};

use super::instructions::{CPU_INSTRUCTION_TABLE, ROCKWELL_INSTRUCTION_TABLE, WDC_INSTRUCTION_TABLE};

pub const CPU_ID: CpuType = CpuType::new("65c02");
pub const R65C02_CPU_ID: CpuType = CpuType::new("r65c02");
pub const W65C02_CPU_ID: CpuType = CpuType::new("w65c02");

pub fn cmos_layer() -> Arc<CatalogLayer<MosKey>> {
    static LAYER: OnceLock<Arc<CatalogLayer<MosKey>>> = OnceLock::new();
    shared_layer(&LAYER, || build_layer("65c02", CPU_INSTRUCTION_TABLE))
}

pub fn rockwell_layer() -> Arc<CatalogLayer<MosKey>> {
    static LAYER: OnceLock<Arc<CatalogLayer<MosKey>>> = OnceLock::new();
    shared_layer(&LAYER, || build_layer("r65c02", ROCKWELL_INSTRUCTION_TABLE))
}

fn wdc_layer() -> Arc<CatalogLayer<MosKey>> {
    static LAYER: OnceLock<Arc<CatalogLayer<MosKey>>> = OnceLock::new();
    shared_layer(&LAYER, || build_layer("w65c02", WDC_INSTRUCTION_TABLE))
}

/// Base 6502, CMOS and Rockwell layers; shared by the CPUs built on the R65C02.
pub fn r65c02_layers() -> Vec<Arc<CatalogLayer<MosKey>>> {
    vec![base_layer(), cmos_layer(), rockwell_layer()]
}

fn m65c02_layers() -> Vec<Arc<CatalogLayer<MosKey>>> {
    vec![base_layer(), cmos_layer()]
}

fn w65c02_layers() -> Vec<Arc<CatalogLayer<MosKey>>> {
    let mut layers = r65c02_layers();
    layers.push(wdc_layer());
    layers
}

pub static M65C02_PROFILE: MosProfile = MosProfile {
    cpu: CPU_ID,
    name: "65c02",
    aliases: &["m65c02"],
    layers: m65c02_layers,
    jmp_indirect_bug: false,
    width_hooks: None,
    extra_bitwidths: &[],
};

pub static R65C02_PROFILE: MosProfile = MosProfile {
    cpu: R65C02_CPU_ID,
    name: "r65c02",
    aliases: &["rockwell65c02"],
    layers: r65c02_layers,
    jmp_indirect_bug: false,
    width_hooks: None,
    extra_bitwidths: &[],
};

pub static W65C02_PROFILE: MosProfile = MosProfile {
    cpu: W65C02_CPU_ID,
    name: "w65c02",
    aliases: &["wdc65c02"],
    layers: w65c02_layers,
    jmp_indirect_bug: false,
    width_hooks: None,
    extra_bitwidths: &[],
};
