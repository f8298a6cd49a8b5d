// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command line interface for the `multiasm` binary.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::core::analyze::CodeBlock;
use crate::core::assembler::error::{Diagnostic, EngineError, Severity};
use crate::core::assembler::listing::{ListingLine, ListingWriter};
use crate::core::expr::parse_number;
use crate::engine::Engine;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(
    name = "multiasm",
    version = VERSION,
    about = "Disassembler and code analyzer for 6502, 6800/6809 and Z80-family CPUs"
)]
pub struct Cli {
    #[arg(
        long = "log-level",
        value_enum,
        default_value_t = LogLevel::Warn,
        global = true,
        long_help = "Log verbosity written to stderr."
    )]
    pub log_level: LogLevel,
    #[arg(
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Text,
        global = true
    )]
    pub format: OutputFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Disassemble a binary file.
    Dis(DisArgs),
    /// List the registered CPUs and their aliases.
    Cpus,
    /// Report peephole warnings for a binary file.
    Analyze(CodeArgs),
}

#[derive(Args, Debug)]
pub struct CodeArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    #[arg(long = "cpu", value_name = "ID")]
    pub cpu: Option<String>,
    #[arg(
        long = "org",
        value_name = "ADDR",
        value_parser = parse_address,
        default_value = "0",
        long_help = "Address of the first disassembled byte ($C000, 0xC000 or 49152)."
    )]
    pub org: u32,
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DisArgs {
    #[command(flatten)]
    pub code: CodeArgs,
    #[arg(long = "offset", value_name = "N", value_parser = parse_offset, default_value = "0")]
    pub offset: usize,
    #[arg(long = "suppress", long_help = "List every byte as .byte data.")]
    pub suppress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_tracing(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("Offset {offset} is past the end of {len}-byte input")]
    Offset { offset: usize, len: usize },
}

fn parse_address(text: &str) -> Result<u32, String> {
    parse_number(text)
        .and_then(|value| u32::try_from(value).ok())
        .ok_or_else(|| format!("invalid address '{text}'"))
}

fn parse_offset(text: &str) -> Result<usize, String> {
    parse_number(text)
        .and_then(|value| usize::try_from(value).ok())
        .ok_or_else(|| format!("invalid offset '{text}'"))
}

fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(EngineConfig::from_json(&text).map_err(EngineError::from)?)
}

fn open_engine(args: &CodeArgs) -> Result<Engine, CliError> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(cpu) = &args.cpu {
        config.default_cpu = Some(cpu.clone());
    }
    if config.default_cpu.is_none() {
        return Err(EngineError::NoCpuSelected.into());
    }
    Ok(Engine::with_config(config)?)
}

/// Run a parsed command, returning the text for stdout.
pub fn run(cli: &Cli) -> Result<String, CliError> {
    match &cli.command {
        Command::Dis(args) => disassemble(args, cli.format),
        Command::Cpus => Ok(list_cpus(&Engine::default(), cli.format)),
        Command::Analyze(args) => analyze(args, cli.format),
    }
}

fn disassemble(args: &DisArgs, format: OutputFormat) -> Result<String, CliError> {
    let engine = open_engine(&args.code)?;
    let bytes = read_file(&args.code.file)?;
    if args.offset > bytes.len() {
        return Err(CliError::Offset {
            offset: args.offset,
            len: bytes.len(),
        });
    }
    let lines = engine.decode_lines(&bytes, args.offset, args.code.org, args.suppress)?;
    let cpu = engine.cpu().map(|cpu| cpu.as_str()).unwrap_or_default();
    Ok(match format {
        OutputFormat::Text => {
            let mut out = Vec::new();
            let mut writer = ListingWriter::new(&mut out);
            let title = format!("{} ({cpu})", args.code.file.display());
            writer
                .header(&title)
                .and_then(|_| writer.write_lines(&lines))
                .map_err(|source| CliError::Io {
                    path: "<listing>".to_string(),
                    source,
                })?;
            String::from_utf8_lossy(&out).into_owned()
        }
        OutputFormat::Json => {
            let value = json!({
                "cpu": cpu,
                "origin": args.code.org,
                "lines": lines.iter().map(line_json).collect::<Vec<_>>(),
            });
            format!("{value:#}\n")
        }
    })
}

fn line_json(line: &ListingLine) -> Value {
    json!({
        "address": line.addr,
        "bytes": line.bytes,
        "text": line.text,
        "data": line.is_data(),
    })
}

fn list_cpus(engine: &Engine, format: OutputFormat) -> String {
    let registry = engine.registry();
    let cpus: Vec<(String, String, Vec<&str>)> = registry
        .cpu_ids()
        .into_iter()
        .map(|cpu| {
            let name = registry.cpu_display_name(cpu).unwrap_or(cpu.as_str());
            let family = registry
                .cpu_family(cpu)
                .map(|family| family.as_str())
                .unwrap_or_default();
            (
                name.to_string(),
                family.to_string(),
                registry.cpu_aliases(cpu).to_vec(),
            )
        })
        .collect();
    match format {
        OutputFormat::Text => cpus
            .iter()
            .map(|(name, family, aliases)| {
                format!("{name:<10} {family:<10} {}\n", aliases.join(", "))
            })
            .collect(),
        OutputFormat::Json => {
            let value = Value::Array(
                cpus.iter()
                    .map(|(name, family, aliases)| {
                        json!({
                            "name": name,
                            "family": family,
                            "aliases": aliases,
                        })
                    })
                    .collect(),
            );
            format!("{value:#}\n")
        }
    }
}

fn analyze(args: &CodeArgs, format: OutputFormat) -> Result<String, CliError> {
    let engine = open_engine(args)?;
    let bytes = read_file(&args.file)?;
    let diagnostics = engine.analyze(&[CodeBlock::new(args.org, bytes)])?;
    Ok(match format {
        OutputFormat::Text => diagnostics
            .iter()
            .map(|diag| format!("{}\n", diag.format()))
            .collect(),
        OutputFormat::Json => {
            let value = Value::Array(diagnostics.iter().map(diagnostic_json).collect());
            format!("{value:#}\n")
        }
    })
}

fn diagnostic_json(diag: &Diagnostic) -> Value {
    json!({
        "address": diag.address(),
        "severity": match diag.severity() {
            Severity::Warning => "warning",
            Severity::Error => "error",
        },
        "code": diag.code(),
        "message": diag.message(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dis_arguments_parse_addresses() {
        let cli = Cli::try_parse_from([
            "multiasm", "dis", "rom.bin", "--cpu", "6502", "--org", "$C000", "--offset", "0x10",
            "--suppress",
        ])
        .expect("parse");
        let Command::Dis(args) = cli.command else {
            panic!("expected dis");
        };
        assert_eq!(args.code.org, 0xC000);
        assert_eq!(args.offset, 16);
        assert!(args.suppress);
        assert_eq!(args.code.cpu.as_deref(), Some("6502"));
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["multiasm", "cpus", "--format", "json", "--log-level", "debug"])
            .expect("parse");
        assert!(matches!(cli.command, Command::Cpus));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.log_level.as_tracing(), tracing::Level::DEBUG);
    }

    #[test]
    fn bad_address_is_rejected() {
        assert!(Cli::try_parse_from(["multiasm", "dis", "rom.bin", "--org", "nope"]).is_err());
        assert!(parse_address("-1").is_err());
    }

    #[test]
    fn cpu_listing_names_every_profile() {
        let text = list_cpus(&Engine::default(), OutputFormat::Text);
        assert_eq!(text.lines().count(), 14);
        assert!(text.lines().any(|line| line.starts_with("gb80") && line.contains("lr35902")));

        let json: Value =
            serde_json::from_str(&list_cpus(&Engine::default(), OutputFormat::Json)).expect("json");
        assert_eq!(json.as_array().map(Vec::len), Some(14));
    }

    #[test]
    fn missing_cpu_is_reported() {
        let args = CodeArgs {
            file: PathBuf::from("unused.bin"),
            cpu: None,
            org: 0,
            config: None,
        };
        assert!(matches!(
            open_engine(&args),
            Err(CliError::Engine(EngineError::NoCpuSelected))
        ));
    }
}
