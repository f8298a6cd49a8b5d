// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! HuC6280 CPU extension module.

pub mod instructions;
pub mod module;
