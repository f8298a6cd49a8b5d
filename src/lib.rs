// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Instruction encoding and decoding engine for 6502, 6800/6809 and
//! Z80-family cross assemblers.

pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod families;
pub mod gb80;
pub mod huc6280;
pub mod m45gs02;
pub mod m65816;
pub mod m65c02;
pub mod m6809;
pub mod registry_defaults;
pub mod z80;

pub use config::EngineConfig;
pub use engine::Engine;
