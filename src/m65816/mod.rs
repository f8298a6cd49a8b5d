// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! WDC 65C816 / 65816 CPU extension module.

pub mod instructions;
pub mod module;
pub mod state;
