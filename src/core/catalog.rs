// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Layered opcode catalogs.
//!
//! A CPU profile is an ordered stack of [`CatalogLayer`]s, base first. A
//! [`CatalogView`] answers lookups most-specific-layer-first: the first layer
//! that mentions a key decides, either with an opcode or with an explicit
//! removal. Layers are shared behind `Arc` and never mutated once built.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

use crate::core::descriptor::InstructionDescriptor;

/// Composite opcode: prefix bytes in the high-order positions, terminal
/// opcode byte lowest. `0xDD_CB_06` is emitted as `DD CB .. 06`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpcodeKey(u32);

impl OpcodeKey {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn with_prefix(prefix: u32, opcode: u8) -> Self {
        Self((prefix << 8) | opcode as u32)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Terminal opcode byte.
    pub const fn terminal(self) -> u8 {
        self.0 as u8
    }

    /// Prefix bytes above the terminal byte.
    pub const fn prefix(self) -> u32 {
        self.0 >> 8
    }

    /// Byte length; at least one.
    pub fn len(self) -> usize {
        match self.0 {
            0..=0xFF => 1,
            0x100..=0xFFFF => 2,
            0x1_0000..=0xFF_FFFF => 3,
            _ => 4,
        }
    }

    pub fn is_empty(self) -> bool {
        false
    }

    pub fn to_bytes(self) -> Vec<u8> {
        let len = self.len();
        (0..len)
            .rev()
            .map(|idx| (self.0 >> (idx * 8)) as u8)
            .collect()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(
            bytes
                .iter()
                .take(4)
                .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte)),
        )
    }
}

impl std::fmt::Display for OpcodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.len() * 2;
        write!(f, "{:0width$X}", self.0, width = width)
    }
}

/// Placement of operand bytes relative to the opcode bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OpcodeLayout {
    #[default]
    Standard,
    /// Z80 `DD CB d op`: the displacement precedes the terminal byte.
    DisplacementBeforeOpcode,
}

/// One layer of a CPU profile.
#[derive(Debug)]
pub struct CatalogLayer<K> {
    name: &'static str,
    encodings: HashMap<K, Option<OpcodeKey>>,
    descriptors: HashMap<OpcodeKey, Option<Arc<InstructionDescriptor>>>,
    displaced_prefixes: HashSet<u32>,
}

impl<K: Eq + Hash + Clone> CatalogLayer<K> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            encodings: HashMap::new(),
            descriptors: HashMap::new(),
            displaced_prefixes: HashSet::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.encodings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encodings.is_empty()
    }

    /// Add an encodable entry together with its decode descriptor.
    ///
    /// The first descriptor registered for an opcode in a layer is kept; later
    /// keys sharing that opcode become encode-only aliases.
    pub fn insert(&mut self, key: K, descriptor: InstructionDescriptor) {
        let opcode = descriptor.opcode;
        if descriptor.layout == OpcodeLayout::DisplacementBeforeOpcode {
            self.displaced_prefixes.insert(opcode.prefix());
        }
        self.encodings.insert(key, Some(opcode));
        self.descriptors
            .entry(opcode)
            .or_insert_with(|| Some(Arc::new(descriptor)));
    }

    /// Shadow a lower layer's entry so the key has no encoding here.
    pub fn remove(&mut self, key: K) {
        self.encodings.insert(key, None);
    }

    /// Shadow a lower layer's decode descriptor.
    pub fn remove_opcode(&mut self, opcode: OpcodeKey) {
        self.descriptors.insert(opcode, None);
    }
}

/// The active, immutable view over a CPU profile's layers.
#[derive(Debug)]
pub struct CatalogView<K> {
    layers: Vec<Arc<CatalogLayer<K>>>,
    max_opcode_len: usize,
    displaced_prefixes: HashSet<u32>,
}

impl<K> Clone for CatalogView<K> {
    fn clone(&self) -> Self {
        Self {
            layers: self.layers.clone(),
            max_opcode_len: self.max_opcode_len,
            displaced_prefixes: self.displaced_prefixes.clone(),
        }
    }
}

impl<K: Eq + Hash + Clone> CatalogView<K> {
    /// Build a view from layers ordered base first.
    pub fn new(layers: Vec<Arc<CatalogLayer<K>>>) -> Self {
        let max_opcode_len = layers
            .iter()
            .flat_map(|layer| layer.descriptors.keys())
            .map(|opcode| opcode.len())
            .max()
            .unwrap_or(1);
        let displaced_prefixes = layers
            .iter()
            .flat_map(|layer| layer.displaced_prefixes.iter().copied())
            .collect();
        Self {
            layers,
            max_opcode_len,
            displaced_prefixes,
        }
    }

    /// Opcode for `key`, most specific layer first.
    pub fn select(&self, key: &K) -> Option<OpcodeKey> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.encodings.get(key))
            .copied()
            .flatten()
    }

    /// Decode descriptor for a composite opcode, most specific layer first.
    pub fn descriptor(&self, opcode: OpcodeKey) -> Option<&Arc<InstructionDescriptor>> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.descriptors.get(&opcode))
            .and_then(Option::as_ref)
    }

    pub fn max_opcode_len(&self) -> usize {
        self.max_opcode_len
    }

    pub fn is_displaced_prefix(&self, prefix: u32) -> bool {
        self.displaced_prefixes.contains(&prefix)
    }

    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    /// Every effective (key, opcode) pair after shadowing.
    pub fn entries(&self) -> Vec<(K, OpcodeKey)> {
        let mut seen: HashSet<&K> = HashSet::new();
        let mut out = Vec::new();
        for layer in self.layers.iter().rev() {
            for (key, slot) in &layer.encodings {
                if !seen.insert(key) {
                    continue;
                }
                if let Some(opcode) = slot {
                    out.push((key.clone(), *opcode));
                }
            }
        }
        out
    }

    /// Every effective decode descriptor after shadowing.
    pub fn descriptors(&self) -> Vec<Arc<InstructionDescriptor>> {
        let mut seen: HashSet<OpcodeKey> = HashSet::new();
        let mut out = Vec::new();
        for layer in self.layers.iter().rev() {
            for (opcode, slot) in &layer.descriptors {
                if !seen.insert(*opcode) {
                    continue;
                }
                if let Some(descriptor) = slot {
                    out.push(Arc::clone(descriptor));
                }
            }
        }
        out.sort_by_key(|descriptor| descriptor.opcode);
        out
    }

    pub fn entry_count(&self) -> usize {
        self.entries().len()
    }
}
