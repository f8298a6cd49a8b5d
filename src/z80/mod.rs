// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Zilog Z80 CPU support module.

pub mod module;
pub mod table;

#[cfg(test)]
mod tests;
