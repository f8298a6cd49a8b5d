// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Engine settings read from a JSON settings object.

use serde_json::Value;

use crate::core::family::CpuState;

pub const DEFAULT_MAX_PASSES: usize = 8;
pub const MAX_BYTES_PER_LINE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Warn about a call immediately followed by a return.
    pub call_return: bool,
    /// Warn about `JMP ($xxFF)` on CPUs with the page-wrap defect.
    pub jmp_indirect_bug: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            call_return: true,
            jmp_indirect_bug: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    pub bytes_per_line: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            bytes_per_line: MAX_BYTES_PER_LINE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub default_cpu: Option<String>,
    pub auto_widen: bool,
    pub truncate_direct_page: bool,
    pub promote_long_branches: bool,
    pub fold_pseudo_branches: bool,
    pub max_passes: usize,
    pub analysis: AnalysisConfig,
    pub listing: ListingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_cpu: None,
            auto_widen: true,
            truncate_direct_page: false,
            promote_long_branches: true,
            fold_pseudo_branches: false,
            max_passes: DEFAULT_MAX_PASSES,
            analysis: AnalysisConfig::default(),
            listing: ListingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a settings document, starting from the defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        let mut config = Self::default();
        config.update_from_settings(Some(&value));
        Ok(config)
    }

    /// Overlay the keys present in `settings`. Unknown keys and values of
    /// the wrong type are ignored.
    pub fn update_from_settings(&mut self, settings: Option<&Value>) {
        let Some(root) = settings else {
            return;
        };

        if let Some(cpu) = read_optional_string(root.get("defaultCpu")) {
            self.default_cpu = cpu;
        }
        if let Some(flag) = read_bool(root.get("autoWiden")) {
            self.auto_widen = flag;
        }
        if let Some(flag) = read_bool(root.get("truncateDirectPage")) {
            self.truncate_direct_page = flag;
        }
        if let Some(flag) = read_bool(root.get("promoteLongBranches")) {
            self.promote_long_branches = flag;
        }
        if let Some(flag) = read_bool(root.get("foldPseudoBranches")) {
            self.fold_pseudo_branches = flag;
        }
        if let Some(passes) = root.get("maxPasses").and_then(Value::as_u64) {
            self.max_passes = usize::try_from(passes).unwrap_or(usize::MAX).max(1);
        }
        if let Some(analysis) = root.get("analysis") {
            if let Some(flag) = read_bool(analysis.get("callReturn")) {
                self.analysis.call_return = flag;
            }
            if let Some(flag) = read_bool(analysis.get("jmpIndirectBug")) {
                self.analysis.jmp_indirect_bug = flag;
            }
        }
        if let Some(listing) = root.get("listing") {
            if let Some(count) = listing.get("bytesPerLine").and_then(Value::as_u64) {
                self.listing.bytes_per_line = count.clamp(1, MAX_BYTES_PER_LINE as u64) as usize;
            }
        }
    }

    /// CPU state a freshly selected CPU starts from.
    pub fn initial_state(&self) -> CpuState {
        CpuState {
            truncate_direct_page: self.truncate_direct_page,
            auto_widen: self.auto_widen,
            promote_long_branches: self.promote_long_branches,
            ..CpuState::default()
        }
    }
}

fn read_bool(value: Option<&Value>) -> Option<bool> {
    value.and_then(Value::as_bool)
}

fn read_optional_string(value: Option<&Value>) -> Option<Option<String>> {
    value.map(|v| v.as_str().map(ToString::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn settings_overlay_known_keys() {
        let mut config = EngineConfig::default();
        config.update_from_settings(Some(&json!({
            "defaultCpu": "65c02",
            "autoWiden": false,
            "promoteLongBranches": false,
            "maxPasses": 4,
            "analysis": { "callReturn": false },
            "listing": { "bytesPerLine": 4 },
            "somethingElse": 12
        })));
        assert_eq!(config.default_cpu.as_deref(), Some("65c02"));
        assert!(!config.auto_widen);
        assert!(!config.promote_long_branches);
        assert_eq!(config.max_passes, 4);
        assert!(!config.analysis.call_return);
        assert!(config.analysis.jmp_indirect_bug);
        assert_eq!(config.listing.bytes_per_line, 4);
    }

    #[test]
    fn bytes_per_line_is_clamped() {
        let mut config = EngineConfig::default();
        config.update_from_settings(Some(&json!({ "listing": { "bytesPerLine": 40 } })));
        assert_eq!(config.listing.bytes_per_line, 8);
        config.update_from_settings(Some(&json!({ "listing": { "bytesPerLine": 0 } })));
        assert_eq!(config.listing.bytes_per_line, 1);
    }

    #[test]
    fn wrong_types_are_ignored() {
        let mut config = EngineConfig::default();
        config.update_from_settings(Some(&json!({ "autoWiden": "yes", "maxPasses": -1 })));
        assert_eq!(config, EngineConfig::default());
        config.update_from_settings(None);
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn null_default_cpu_clears_it() {
        let mut config = EngineConfig::from_json(r#"{"defaultCpu": "z80"}"#).expect("parse");
        assert_eq!(config.default_cpu.as_deref(), Some("z80"));
        config.update_from_settings(Some(&json!({ "defaultCpu": null })));
        assert_eq!(config.default_cpu, None);
    }

    #[test]
    fn initial_state_carries_flags() {
        let config = EngineConfig {
            truncate_direct_page: true,
            ..EngineConfig::default()
        };
        let state = config.initial_state();
        assert!(state.truncate_direct_page);
        assert!(state.auto_widen);
        assert!(state.promote_long_branches);
        assert_eq!(state.direct_page, 0);
    }
}
