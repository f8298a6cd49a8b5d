// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! 65C02 CPU extension module (65C02, R65C02, W65C02).

pub mod instructions;
pub mod module;
