// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! 65816 CPU module.

use std::sync::{Arc, OnceLock};

use crate::core::catalog::CatalogLayer;
use crate::core::cpu::CpuType;
use crate::families::mos6502::module::{base_layer, shared_layer};
use crate::families::mos6502::{build_layer, key, AddressMode, MosKey, MosProfile};
use crate::m65c02::module::cmos_layer;

use super::instructions::{CPU_INSTRUCTION_TABLE, M_IMMEDIATE, X_IMMEDIATE};
use super::state::WIDTH_HOOKS;

pub const CPU_ID: CpuType = CpuType::new("65816");

/// The 65816 table, with the fixed-width immediates of the M/X mnemonics
/// shadowed so only the flag-sized form encodes.
fn build_native_layer() -> CatalogLayer<MosKey> {
    let mut layer = build_layer("65816", CPU_INSTRUCTION_TABLE);
    for mnemonic in M_IMMEDIATE.iter().chain(X_IMMEDIATE) {
        layer.remove(key(mnemonic, AddressMode::Immediate));
    }
    layer
}

fn native_layer() -> Arc<CatalogLayer<MosKey>> {
    static LAYER: OnceLock<Arc<CatalogLayer<MosKey>>> = OnceLock::new();
    shared_layer(&LAYER, build_native_layer)
}

fn m65816_layers() -> Vec<Arc<CatalogLayer<MosKey>>> {
    vec![base_layer(), cmos_layer(), native_layer()]
}

pub static M65816_PROFILE: MosProfile = MosProfile {
    cpu: CPU_ID,
    name: "65816",
    aliases: &["65c816", "w65c816", "m65816"],
    layers: m65816_layers,
    jmp_indirect_bug: false,
    width_hooks: Some(&WIDTH_HOOKS),
    extra_bitwidths: &[24],
};
