// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::collections::HashMap;

/// Sizes chosen for each source line on earlier passes.
///
/// A line never shrinks while the ledger holds a larger size for it, which
/// keeps the driver's fixed-point loop monotonic.
#[derive(Debug, Default, Clone)]
pub struct SizeLedger {
    sizes: HashMap<usize, usize>,
}

impl SizeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum size for `line`, if it was sized before.
    pub fn floor(&self, line: Option<usize>) -> Option<usize> {
        line.and_then(|line| self.sizes.get(&line).copied())
    }

    /// Record a chosen size. Returns true when the line grew.
    pub fn record(&mut self, line: Option<usize>, size: usize) -> bool {
        let Some(line) = line else {
            return false;
        };
        let entry = self.sizes.entry(line).or_insert(0);
        if size > *entry {
            let grew = *entry != 0;
            *entry = size;
            return grew;
        }
        false
    }

    pub fn clear(&mut self) {
        self.sizes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}
