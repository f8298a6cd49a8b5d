// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Intel 8080 family encoder.
//!
//! Each argument is spelled as every token it could stand for in a form
//! (`(ix)` is both `(IX)` and `(IX+d)` with a zero displacement; an
//! expression is `n`, `nn`, `e`, `d` or a literal). The combinations the
//! active catalog knows become size candidates for the shared resolver.

use std::sync::Arc;

use crate::core::assembler::error::EncodeError;
use crate::core::catalog::{CatalogLayer, CatalogView, OpcodeKey, OpcodeLayout};
use crate::core::cpu::{ByteOrder, CpuFamily, CpuType};
use crate::core::decode::{decode_one, DecodeOptions, DecodedInstruction};
use crate::core::expr::Expr;
use crate::core::family::{
    evaluate_number, AssemblerContext, CpuState, EncodeOutcome, EncodingContext, Emission,
};
use crate::core::operand::{Arg, Instruction, OperandShape};
use crate::core::registry::{AnalysisRules, CallReturn, CpuHandlerDyn, FamilyHandlerDyn};
use crate::core::resolve::{
    resolve_sized_variant, Resolution, ResolveFailure, SizePolicy, SlotCandidate,
};

use super::form::{key, placeholder, FormKey, Placeholder};
use super::module::FAMILY_ID;

const ORDER: ByteOrder = ByteOrder::Little;

/// `(IX+d)`, `(IY+d)` and `SP+d`.
const DISPLACEMENT: (i64, i64) = (-0x80, 0x7F);
/// `n`, `nn`, `e` and the indirect forms.
const WORD: (i64, i64) = (-0x8000, 0xFFFF);

pub const ZILOG_CALL_RETURN: &[CallReturn] = &[CallReturn {
    call: "call",
    ret: "ret",
    jump: "jp",
}];

pub const INTEL_CALL_RETURN: &[CallReturn] = &[CallReturn {
    call: "call",
    ret: "ret",
    jump: "jmp",
}];

/// Static description of one 8080-family CPU.
pub struct I80Profile {
    pub cpu: CpuType,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub layers: fn() -> Vec<Arc<CatalogLayer<FormKey>>>,
    pub call_return: &'static [CallReturn],
}

#[derive(Debug, Default)]
pub struct Intel8080FamilyHandler;

impl Intel8080FamilyHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FamilyHandlerDyn for Intel8080FamilyHandler {
    fn family_id(&self) -> CpuFamily {
        FAMILY_ID
    }

    fn byte_order(&self) -> ByteOrder {
        ORDER
    }

    fn analysis_rules(&self) -> AnalysisRules {
        AnalysisRules {
            call_return: ZILOG_CALL_RETURN,
        }
    }

    fn is_register(&self, name: &str) -> bool {
        super::is_register(name)
    }

    fn is_condition(&self, name: &str) -> bool {
        super::is_condition(name)
    }
}

/// Value carried by one spelling of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgValue {
    /// Register or literal token.
    None,
    Known(i64),
    /// Unresolved while a pass is pending.
    Pending,
}

#[derive(Debug, Clone)]
struct Spelling {
    token: String,
    value: ArgValue,
}

impl Spelling {
    fn fixed(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            value: ArgValue::None,
        }
    }

    fn valued(token: impl Into<String>, value: ArgValue) -> Self {
        Self {
            token: token.into(),
            value,
        }
    }
}

/// Operand fields of one candidate plus where the displacement goes.
#[derive(Debug, Clone)]
struct Fields {
    values: Vec<(i64, u8)>,
    layout: OpcodeLayout,
    /// First value that does not fit its field.
    overflow: Option<i64>,
}

pub struct I80CpuHandler {
    profile: &'static I80Profile,
    view: CatalogView<FormKey>,
}

impl I80CpuHandler {
    pub fn new(profile: &'static I80Profile) -> Self {
        Self {
            profile,
            view: CatalogView::new((profile.layers)()),
        }
    }

    pub fn view(&self) -> &CatalogView<FormKey> {
        &self.view
    }

    pub fn profile(&self) -> &'static I80Profile {
        self.profile
    }

    /// Bounded evaluation; `range` covers every placeholder the value may fill.
    fn evaluate(
        expr: &Expr,
        range: (i64, i64),
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> Result<ArgValue, EncodeError> {
        let value = evaluate_number(expr, range.0, range.1, ctx, eval)?;
        Ok(value.map_or(ArgValue::Pending, ArgValue::Known))
    }

    fn spellings(
        arg: &Arg,
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> Result<Vec<Spelling>, EncodeError> {
        let spellings = match arg {
            Arg::Register(name) => vec![Spelling::fixed(name.to_ascii_uppercase())],
            Arg::RegisterIndirect(name) => {
                let upper = name.to_ascii_uppercase();
                let mut out = vec![Spelling::fixed(format!("({upper})"))];
                if super::is_index_register(&upper) {
                    out.push(Spelling::valued(format!("({upper}+d)"), ArgValue::Known(0)));
                }
                out
            }
            Arg::IndexDisplacement {
                register,
                displacement,
            } => {
                let upper = register.to_ascii_uppercase();
                let value = Self::evaluate(displacement, DISPLACEMENT, ctx, eval)?;
                let token = if upper == "SP" {
                    format!("{upper}+d")
                } else {
                    format!("({upper}+d)")
                };
                vec![Spelling::valued(token, value)]
            }
            Arg::Indirect(expr) => {
                let value = Self::evaluate(expr, WORD, ctx, eval)?;
                vec![
                    Spelling::valued("(nn)", value),
                    Spelling::valued("(n)", value),
                ]
            }
            Arg::Expr(expr) => {
                if let Some(name) = expr
                    .as_identifier()
                    .filter(|name| super::is_register(name) || super::is_condition(name))
                {
                    return Ok(vec![Spelling::fixed(name.to_ascii_uppercase())]);
                }
                let value = Self::evaluate(expr, WORD, ctx, eval)?;
                let mut out: Vec<Spelling> = ["n", "nn", "e", "d"]
                    .into_iter()
                    .map(|token| Spelling::valued(token, value))
                    .collect();
                if let ArgValue::Known(literal) = value {
                    if (0..=0xFF).contains(&literal) {
                        out.push(Spelling::fixed(literal.to_string()));
                        out.push(Spelling::fixed(format!("${literal:02X}")));
                    }
                }
                out
            }
        };
        Ok(spellings)
    }

    fn args(instr: &Instruction) -> Option<Vec<Arg>> {
        match &instr.shape {
            OperandShape::Implied => Some(Vec::new()),
            OperandShape::Args(args) => Some(args.clone()),
            OperandShape::Single(expr) | OperandShape::Immediate(expr) => {
                Some(vec![Arg::Expr(expr.clone())])
            }
            _ => None,
        }
    }

    /// Every form spelled by the arguments, with the values in form order.
    fn combinations(per_arg: &[Vec<Spelling>]) -> Vec<(String, Vec<ArgValue>)> {
        let mut out = vec![(String::new(), Vec::new())];
        for (idx, spellings) in per_arg.iter().enumerate() {
            let mut next = Vec::with_capacity(out.len() * spellings.len());
            for (form, values) in &out {
                for spelling in spellings {
                    let mut form = form.clone();
                    if idx > 0 {
                        form.push(',');
                    }
                    form.push_str(&spelling.token);
                    let mut values = values.clone();
                    if spelling.value != ArgValue::None {
                        values.push(spelling.value);
                    }
                    next.push((form, values));
                }
            }
            out = next;
        }
        out
    }

    fn candidate(
        &self,
        opcode: OpcodeKey,
        form: &str,
        values: &[ArgValue],
        pc: u32,
    ) -> SlotCandidate<Fields> {
        let kinds: Vec<Placeholder> = form
            .split(',')
            .filter_map(|token| placeholder(token).map(|(kind, _)| kind))
            .collect();
        let width: u8 = kinds.iter().map(|kind| kind.size()).sum();
        let next_pc = i64::from(pc) + opcode.len() as i64 + i64::from(width);
        let mut fits = true;
        let mut overflow = None;
        let mut fields = Vec::with_capacity(kinds.len());
        for (kind, value) in kinds.iter().zip(values) {
            let raw = match (kind, value) {
                (Placeholder::Relative, ArgValue::Known(target)) => target - next_pc,
                (_, ArgValue::Known(value)) => *value,
                _ => {
                    fits = false;
                    0
                }
            };
            if !kind.fits(raw) {
                fits = false;
                overflow = overflow.or(Some(raw));
            }
            fields.push((raw, kind.size()));
        }
        let layout = self
            .view
            .descriptor(opcode)
            .map_or(OpcodeLayout::Standard, |descriptor| descriptor.layout);
        SlotCandidate::new(
            Some(opcode),
            width,
            fits,
            Fields {
                values: fields,
                layout,
                overflow,
            },
        )
    }

    fn build(opcode: OpcodeKey, fields: Fields) -> Emission {
        fields
            .values
            .into_iter()
            .fold(Emission::new(opcode, ORDER), |emission, (value, size)| {
                emission.with_field(value, size)
            })
            .with_layout(fields.layout)
    }

    fn too_wide(slots: &[SlotCandidate<Fields>], forms: &[String]) -> EncodeError {
        let relative = forms
            .iter()
            .any(|form| form.split(',').any(|token| token == "e"));
        let first = slots
            .iter()
            .find_map(|slot| slot.tag.overflow)
            .unwrap_or(0);
        if relative {
            EncodeError::too_far(first)
        } else {
            EncodeError::out_of_range(first)
        }
    }
}

impl CpuHandlerDyn for I80CpuHandler {
    fn cpu_id(&self) -> CpuType {
        self.profile.cpu
    }

    fn family_id(&self) -> CpuFamily {
        FAMILY_ID
    }

    fn encode(
        &self,
        instr: &Instruction,
        ctx: &EncodingContext,
        eval: &dyn AssemblerContext,
    ) -> EncodeOutcome {
        let mnemonic = instr.upper_mnemonic();
        let Some(args) = Self::args(instr) else {
            return EncodeOutcome::Failed(EncodeError::unsupported(&mnemonic));
        };
        let per_arg = match args
            .iter()
            .map(|arg| Self::spellings(arg, ctx, eval))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(per_arg) => per_arg,
            Err(err) => return EncodeOutcome::Failed(err),
        };

        let mut forms = Vec::new();
        let mut slots = Vec::new();
        for (form, values) in Self::combinations(&per_arg) {
            if let Some(opcode) = self.view.select(&key(&mnemonic, &form)) {
                slots.push(self.candidate(opcode, &form, &values, ctx.pc));
                forms.push(form);
            }
        }
        let forced = instr.bitwidth.map(|bits| bits / 8);
        match resolve_sized_variant(&slots, SizePolicy::from_context(ctx, forced)) {
            Resolution::Selected(chosen) => {
                EncodeOutcome::Emitted(Self::build(chosen.opcode, chosen.tag))
            }
            Resolution::Deferred(chosen) => {
                EncodeOutcome::Deferred(Self::build(chosen.opcode, chosen.tag))
            }
            Resolution::Failed(ResolveFailure::NoSlot) => {
                EncodeOutcome::Failed(EncodeError::unsupported(&mnemonic))
            }
            Resolution::Failed(ResolveFailure::TooWide) => {
                EncodeOutcome::Failed(Self::too_wide(&slots, &forms))
            }
        }
    }

    fn decode(
        &self,
        bytes: &[u8],
        offset: usize,
        pc: u32,
        _state: &CpuState,
    ) -> Option<DecodedInstruction> {
        decode_one(&self.view, bytes, offset, pc, DecodeOptions::default())
    }

    fn layer_names(&self) -> Vec<&'static str> {
        self.view.layer_names()
    }

    fn entry_count(&self) -> usize {
        self.view.entry_count()
    }

    fn analysis_rules(&self) -> Option<AnalysisRules> {
        Some(AnalysisRules {
            call_return: self.profile.call_return,
        })
    }
}
