// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! CPU family implementations.
//!
//! Each family holds the handler, catalog and encoder shared by a group of
//! related CPUs. CPU-specific layers live in the top-level CPU modules.

pub mod intel8080;
pub mod m6800;
pub mod mos6502;
