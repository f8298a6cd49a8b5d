// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! CPU identifiers and per-family constants.
//!
//! Family and CPU modules define their own identifiers and expose them through
//! the registry at runtime; nothing here names a concrete CPU.

/// Identifier for a CPU family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CpuFamily(&'static str);

impl CpuFamily {
    /// Create a new CPU family identifier.
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// Return the identifier string.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Identifier for a CPU type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CpuType(&'static str);

impl CpuType {
    /// Create a new CPU type identifier.
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// Return the identifier string.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Byte order used for multi-byte operand fields.
///
/// Fixed per family: the 6502 and Z80 families are little-endian, the
/// 6800/6809 family is big-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// Serialize the low `size` bytes of `value`.
    pub fn write(self, value: i64, size: usize, out: &mut Vec<u8>) {
        let raw = value as u64;
        match self {
            ByteOrder::Little => {
                for idx in 0..size {
                    out.push((raw >> (idx * 8)) as u8);
                }
            }
            ByteOrder::Big => {
                for idx in (0..size).rev() {
                    out.push((raw >> (idx * 8)) as u8);
                }
            }
        }
    }

    /// Read an unsigned value of `bytes.len()` bytes.
    pub fn read(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::Little => bytes
                .iter()
                .rev()
                .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte)),
            ByteOrder::Big => bytes
                .iter()
                .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte)),
        }
    }
}
