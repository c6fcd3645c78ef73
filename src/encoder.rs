//! Second pass: turn each instruction line into a 16-bit word.
//!
//! Field layouts, most significant field first. R, I and J layouts are
//! 14 bits wide and sit in the low bits of the word, so bits 15..14 are
//! always zero.
//!
//! | format | layout                                   |
//! |--------|------------------------------------------|
//! | R      | `rs:2 rt:2 rd:2 00:2 opcode:6`           |
//! | I      | `rs:2 rt:2 imm:4 opcode:6`               |
//! | J      | `rs:2 rt:2 target:4 opcode:6`            |
//! | H      | `0:10 opcode:6`                          |

use bitvec::prelude::*;
use tracing::debug;

use crate::config::AsmConfig;
use crate::error::AsmError;
use crate::instructions::{lookup, Format, InstrDesc, Register};
use crate::labels::LabelTable;
use crate::source::{scan, SourceLine};

pub type Word = u16;

type WordBits = BitArr!(for 16, in u16, Msb0);

/// Pack `(value, width)` fields MSB-first into the low bits of one word.
/// Values are truncated to their field width.
fn pack(fields: &[(u16, usize)]) -> Word {
    let total: usize = fields.iter().map(|&(_, width)| width).sum();
    debug_assert!(total <= 16);
    let mut bits: WordBits = BitArray::ZERO;
    let mut at = 16 - total;
    for &(value, width) in fields {
        let mask = u16::MAX >> (16 - width);
        bits[at..at + width].store_be::<u16>(value & mask);
        at += width;
    }
    bits.into_inner()[0]
}

pub fn encode_r(rd: Register, rs: Register, rt: Register, opcode: u8) -> Word {
    pack(&[
        (rs.code().into(), 2),
        (rt.code().into(), 2),
        (rd.code().into(), 2),
        (0, 2),
        (opcode.into(), 6),
    ])
}

pub fn encode_i(rt: Register, rs: Register, imm: u8, opcode: u8) -> Word {
    pack(&[
        (rs.code().into(), 2),
        (rt.code().into(), 2),
        (imm.into(), 4),
        (opcode.into(), 6),
    ])
}

pub fn encode_j(rs: Register, rt: Register, target: u8, opcode: u8) -> Word {
    pack(&[
        (rs.code().into(), 2),
        (rt.code().into(), 2),
        (target.into(), 4),
        (opcode.into(), 6),
    ])
}

pub fn encode_h(opcode: u8) -> Word {
    pack(&[(0, 10), (opcode.into(), 6)])
}

/// Operands of one line, with the line number for error reporting.
struct Operands<'a> {
    line: usize,
    desc: &'static InstrDesc,
    tokens: &'a [String],
}

impl<'a> Operands<'a> {
    fn get(&self, idx: usize) -> Result<&'a str, AsmError> {
        self.tokens
            .get(idx)
            .map(String::as_str)
            .ok_or(AsmError::MissingOperand {
                line: self.line,
                mnemonic: self.desc.mnemonic,
                expected: 3,
                found: self.tokens.len(),
            })
    }

    fn reg(&self, idx: usize) -> Result<Register, AsmError> {
        let name = self.get(idx)?;
        Register::from_name(name).ok_or_else(|| AsmError::UnknownRegister {
            line: self.line,
            name: name.to_string(),
        })
    }

    fn imm(&self, idx: usize, cfg: &AsmConfig) -> Result<u8, AsmError> {
        let text = self.get(idx)?;
        let (negative, digits) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AsmError::InvalidImmediate {
                line: self.line,
                text: text.to_string(),
            });
        }
        let (low4, magnitude) = fold_decimal(digits);
        if cfg.strict_ranges && ((negative && magnitude != 0) || magnitude > 0xF) {
            return Err(AsmError::ValueOutOfRange {
                line: self.line,
                text: text.to_string(),
            });
        }
        // two's complement wrap: -1 -> 0b1111
        Ok(if negative { (16 - low4) & 0xF } else { low4 })
    }

    fn target(&self, idx: usize, labels: &LabelTable, cfg: &AsmConfig) -> Result<u8, AsmError> {
        let text = self.get(idx)?;
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            let (low4, magnitude) = fold_decimal(text);
            if cfg.strict_ranges && magnitude > 0xF {
                return Err(AsmError::ValueOutOfRange {
                    line: self.line,
                    text: text.to_string(),
                });
            }
            return Ok(low4);
        }
        let addr = labels.get(text).ok_or_else(|| AsmError::UnknownLabel {
            line: self.line,
            label: text.to_string(),
        })?;
        debug!(line = self.line, "resolved label {text} -> address {addr}");
        if cfg.strict_ranges && addr > 0xF {
            return Err(AsmError::ValueOutOfRange {
                line: self.line,
                text: format!("{text} ({addr})"),
            });
        }
        Ok((addr & 0xF) as u8)
    }
}

/// Returns the value modulo 16 and a saturating magnitude, for decimal
/// strings of any length.
fn fold_decimal(digits: &str) -> (u8, u64) {
    digits.bytes().fold((0u8, 0u64), |(low4, mag), b| {
        let d = b - b'0';
        ((low4 * 10 + d) % 16, mag.saturating_mul(10).saturating_add(d.into()))
    })
}

/// Encode one instruction line (label already split off).
pub fn encode_line(
    line: &SourceLine,
    labels: &LabelTable,
    cfg: &AsmConfig,
) -> Result<Word, AsmError> {
    let Some(mnemonic) = line.tokens.first() else {
        return Err(AsmError::UnknownInstruction {
            line: line.number,
            mnemonic: String::new(),
        });
    };
    let desc = lookup(mnemonic).ok_or_else(|| AsmError::UnknownInstruction {
        line: line.number,
        mnemonic: mnemonic.clone(),
    })?;
    debug!(
        line = line.number,
        "assembling: {} | opcode {:06b} | format {:?}",
        line.tokens.join(" "),
        desc.opcode,
        desc.format
    );

    let ops = Operands {
        line: line.number,
        desc,
        tokens: &line.tokens[1..],
    };
    let word = match desc.format {
        Format::R => {
            let (rd, rs, rt) = (ops.reg(0)?, ops.reg(1)?, ops.reg(2)?);
            encode_r(rd, rs, rt, desc.opcode)
        }
        Format::I => {
            let (rt, rs) = (ops.reg(0)?, ops.reg(1)?);
            let imm = ops.imm(2, cfg)?;
            encode_i(rt, rs, imm, desc.opcode)
        }
        Format::J => {
            let (rs, rt) = (ops.reg(0)?, ops.reg(1)?);
            let target = ops.target(2, labels, cfg)?;
            encode_j(rs, rt, target, desc.opcode)
        }
        Format::H => encode_h(desc.opcode),
    };
    debug!(line = line.number, "{:?} encoding -> 0b{word:016b} ({word:#06x})", desc.format);
    Ok(word)
}

/// Second pass over `source`. Stops at the first error; no partial output.
pub fn encode_program(
    source: &str,
    labels: &LabelTable,
    cfg: &AsmConfig,
) -> Result<Vec<Word>, AsmError> {
    scan(source)
        .filter(SourceLine::is_instruction)
        .map(|line| encode_line(&line, labels, cfg))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::Register::*;

    #[test]
    fn pack_is_msb_first_right_aligned() {
        assert_eq!(pack(&[(0b11, 2), (0, 14)]), 0xC000);
        assert_eq!(pack(&[(0b11, 2), (0, 12)]), 0x3000);
        assert_eq!(pack(&[(0, 10), (0b001111, 6)]), 0x000F);
        assert_eq!(pack(&[(0x1F, 4), (0, 12)]), 0xF000);
    }

    #[test]
    fn field_layouts() {
        // rs=R0 rt=R1 rd=R2 pad opcode ADD
        assert_eq!(encode_r(R2, R0, R1, 0b010100), 0b00_01_10_00_010100);
        assert_eq!(encode_i(R1, R0, 3, 0b010101), 0x04D5);
        assert_eq!(encode_j(R0, R1, 0, 0b001110), 0b00_01_0000_001110);
        assert_eq!(encode_h(0b001111), 0x000F);
    }

    #[test]
    fn decimal_fold_wraps() {
        assert_eq!(fold_decimal("3"), (3, 3));
        assert_eq!(fold_decimal("17"), (1, 17));
        assert_eq!(fold_decimal("99999999999999999999999").0, (99999999999999999999999u128 % 16) as u8);
    }
}
