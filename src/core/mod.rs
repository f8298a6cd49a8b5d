// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! CPU-independent engine shared by every family encoder.

pub mod analyze;
pub mod assembler;
pub mod branch;
pub mod catalog;
pub mod cpu;
pub mod decode;
pub mod descriptor;
pub mod disasm;
pub mod expr;
pub mod family;
pub mod operand;
pub mod registry;
pub mod resolve;
pub mod size_stability;
