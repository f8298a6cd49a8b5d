// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Sharp SM83 (Game Boy CPU) support module.

pub mod module;
pub mod table;
