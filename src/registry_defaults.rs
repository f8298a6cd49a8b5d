// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Default registry with every built-in family and CPU profile.

use crate::core::registry::ModuleRegistry;
use crate::families::intel8080::module::{I80CpuModule, Intel8080FamilyModule, I8080_PROFILE};
use crate::families::m6800::module::{M6800FamilyModule, M68CpuModule, M6800_PROFILE};
use crate::families::mos6502::module::{
    MOS6502FamilyModule, MosCpuModule, M6502I_PROFILE, M6502_PROFILE,
};
use crate::gb80::module::GB80_PROFILE;
use crate::huc6280::module::HUC6280_PROFILE;
use crate::m45gs02::module::{M45GS02_PROFILE, M65CE02_PROFILE};
use crate::m65816::module::M65816_PROFILE;
use crate::m65c02::module::{M65C02_PROFILE, R65C02_PROFILE, W65C02_PROFILE};
use crate::m6809::module::M6809_PROFILE;
use crate::z80::module::Z80_PROFILE;

/// Build the registry the engine and CLI resolve CPU names against.
pub fn build_default_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register_family(Box::new(Intel8080FamilyModule));
    registry.register_family(Box::new(M6800FamilyModule));
    registry.register_family(Box::new(MOS6502FamilyModule));

    for profile in [
        &M6502_PROFILE,
        &M6502I_PROFILE,
        &M65C02_PROFILE,
        &R65C02_PROFILE,
        &W65C02_PROFILE,
        &HUC6280_PROFILE,
        &M65CE02_PROFILE,
        &M45GS02_PROFILE,
        &M65816_PROFILE,
    ] {
        registry.register_cpu(Box::new(MosCpuModule(profile)));
    }
    for profile in [&M6800_PROFILE, &M6809_PROFILE] {
        registry.register_cpu(Box::new(M68CpuModule(profile)));
    }
    for profile in [&I8080_PROFILE, &Z80_PROFILE, &GB80_PROFILE] {
        registry.register_cpu(Box::new(I80CpuModule(profile)));
    }
    registry
}
