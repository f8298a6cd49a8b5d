// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Z80 CPU module.

use std::sync::{Arc, OnceLock};

use crate::core::catalog::CatalogLayer;
use crate::core::cpu::CpuType;
use crate::families::intel8080::module::shared_layer;
use crate::families::intel8080::{FormKey, I80Profile, ZILOG_CALL_RETURN};

use super::table::z80_layer;

pub const CPU_ID: CpuType = CpuType::new("z80");

fn z80_layers() -> Vec<Arc<CatalogLayer<FormKey>>> {
    static LAYER: OnceLock<Arc<CatalogLayer<FormKey>>> = OnceLock::new();
    vec![shared_layer(&LAYER, z80_layer)]
}

pub static Z80_PROFILE: I80Profile = I80Profile {
    cpu: CPU_ID,
    name: "z80",
    aliases: &["zilogz80"],
    layers: z80_layers,
    call_return: ZILOG_CALL_RETURN,
};
