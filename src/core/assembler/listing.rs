// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Disassembly listing output.

use std::io::Write;

/// One listing line: an instruction or a run of raw data bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLine {
    pub addr: u32,
    pub bytes: Vec<u8>,
    pub text: String,
}

impl ListingLine {
    pub fn new(addr: u32, bytes: &[u8], text: impl Into<String>) -> Self {
        Self {
            addr,
            bytes: bytes.to_vec(),
            text: text.into(),
        }
    }

    /// A `.byte` line for bytes no instruction claims.
    pub fn data(addr: u32, bytes: &[u8]) -> Self {
        let values = bytes
            .iter()
            .map(|b| format!("${b:02X}"))
            .collect::<Vec<_>>()
            .join(",");
        Self::new(addr, bytes, format!(".byte {values}"))
    }

    pub fn is_data(&self) -> bool {
        self.text.starts_with(".byte")
    }
}

/// Writer for listing output.
pub struct ListingWriter<W: Write> {
    out: W,
}

impl<W: Write> ListingWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn header(&mut self, title: &str) -> std::io::Result<()> {
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "ADDR    BYTES                    SOURCE")?;
        writeln!(self.out, "------  -----------------------  ------")?;
        Ok(())
    }

    pub fn write_line(&mut self, line: &ListingLine) -> std::io::Result<()> {
        writeln!(
            self.out,
            "{:<6}  {:<23}  {}",
            format_addr(line.addr),
            format_bytes(&line.bytes),
            line.text
        )
    }

    pub fn write_lines(&mut self, lines: &[ListingLine]) -> std::io::Result<()> {
        for line in lines {
            self.write_line(line)?;
        }
        Ok(())
    }
}

/// Render lines without a header.
pub fn render_lines(lines: &[ListingLine]) -> String {
    let mut out = Vec::new();
    let mut writer = ListingWriter::new(&mut out);
    // Writing into a Vec cannot fail.
    let _ = writer.write_lines(lines);
    String::from_utf8_lossy(&out).into_owned()
}

fn format_addr(addr: u32) -> String {
    if addr <= 0xFFFF {
        format!("{addr:04X}")
    } else if addr <= 0xFF_FFFF {
        format!("{addr:06X}")
    } else {
        format!("{addr:08X}")
    }
}

/// Format bytes as hex string for listing.
pub fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
