// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! CPU-agnostic reporting pieces.
//!
//! - [`error`] - Error types and diagnostics
//! - [`listing`] - Disassembly listing output

pub mod error;
pub mod listing;
