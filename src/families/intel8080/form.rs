// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Operand forms for the Intel 8080 family.
//!
//! A catalog key is a mnemonic plus a form: the operand list spelled with
//! register names in upper case and lower-case placeholders for values,
//! e.g. `LD` + `A,(nn)`, `BIT` + `3,(IX+d)`, `JR` + `NZ,e`. Literal
//! operands that select the opcode (RST vectors, IM modes, bit numbers)
//! are spelled as numbers.

use crate::core::descriptor::FieldSpec;
use crate::core::resolve::{fits_signed, fits_unsigned};

pub type FormKey = (String, String);

pub fn key(mnemonic: &str, form: &str) -> FormKey {
    (mnemonic.to_ascii_uppercase(), form.to_string())
}

/// A value-carrying position in a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `n`, `(n)`.
    Byte,
    /// `nn`, `(nn)`.
    Word,
    /// `e`: branch target, encoded as a signed offset from the next instruction.
    Relative,
    /// `d`: signed byte (`(IX+d)`, `SP+d`).
    Signed,
}

impl Placeholder {
    pub fn size(self) -> u8 {
        match self {
            Placeholder::Word => 2,
            _ => 1,
        }
    }

    pub fn field(self) -> FieldSpec {
        match self {
            Placeholder::Byte => FieldSpec::Byte,
            Placeholder::Word => FieldSpec::Word,
            Placeholder::Relative => FieldSpec::Rel8,
            Placeholder::Signed => FieldSpec::Disp8,
        }
    }

    /// Range check for the value written to the field.
    pub fn fits(self, value: i64) -> bool {
        match self {
            Placeholder::Byte => fits_unsigned(value, 1) || fits_signed(value, 1),
            Placeholder::Word => fits_unsigned(value, 2) || fits_signed(value, 2),
            Placeholder::Relative | Placeholder::Signed => fits_signed(value, 1),
        }
    }
}

/// Placeholder in one comma-separated form token, with its display pattern
/// (`#` marks where the rendered value goes).
pub fn placeholder(token: &str) -> Option<(Placeholder, String)> {
    let found = match token {
        "n" => (Placeholder::Byte, "#".to_string()),
        "nn" => (Placeholder::Word, "#".to_string()),
        "e" => (Placeholder::Relative, "#".to_string()),
        "d" => (Placeholder::Signed, "#".to_string()),
        "(n)" => (Placeholder::Byte, "(#)".to_string()),
        "(nn)" => (Placeholder::Word, "(#)".to_string()),
        _ => {
            let register = token
                .strip_suffix("+d)")
                .and_then(|rest| rest.strip_prefix('('));
            if let Some(register) = register {
                (Placeholder::Signed, format!("({}#)", register.to_ascii_lowercase()))
            } else if let Some(register) = token.strip_suffix("+d") {
                (Placeholder::Signed, format!("{}#", register.to_ascii_lowercase()))
            } else {
                return None;
            }
        }
    };
    Some(found)
}

/// Placeholders of a form in operand order.
pub fn placeholders(form: &str) -> Vec<Placeholder> {
    tokens(form)
        .filter_map(|token| placeholder(token).map(|(kind, _)| kind))
        .collect()
}

fn tokens(form: &str) -> impl Iterator<Item = &str> {
    form.split(',').filter(|token| !token.is_empty())
}

/// Disassembly template and decode fields for a mnemonic/form pair.
pub fn template(mnemonic: &str, form: &str) -> (String, Vec<FieldSpec>) {
    let mnemonic = mnemonic.to_ascii_lowercase();
    let mut fields = Vec::new();
    let mut parts = Vec::new();
    for token in tokens(form) {
        match placeholder(token) {
            Some((kind, pattern)) => {
                parts.push(pattern.replace('#', &format!("{{{}}}", fields.len())));
                fields.push(kind.field());
            }
            None => parts.push(token.to_ascii_lowercase()),
        }
    }
    if parts.is_empty() {
        (mnemonic, fields)
    } else {
        (format!("{mnemonic} {}", parts.join(",")), fields)
    }
}
