use bitvec::prelude::*;

use crate::decoder::{Decoded, Decoder};
use crate::instructions::{by_opcode, Format, Register, OPCODE_MASK};

/// Decoder for the 16-bit COAL word formats.
///
/// R, I and J fields occupy bits 13..0 (MSB-first: rs, rt, then rd+pad or
/// imm, then opcode). Rejects words whose opcode is not in the instruction
/// table, and words whose unused bits are not zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct Coal16Decoder;

impl Coal16Decoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for Coal16Decoder {
    fn decode(&self, word: u16) -> Option<Decoded> {
        let bits = word.view_bits::<Msb0>();
        let field = |from: usize, to: usize| bits[from..to].load_be::<u8>();

        let desc = by_opcode((word & OPCODE_MASK) as u8)?;
        if desc.format != Format::H && field(0, 2) != 0 {
            return None;
        }
        let rs = Register::from_code(field(2, 4));
        let rt = Register::from_code(field(4, 6));

        match desc.format {
            Format::R => {
                if field(8, 10) != 0 {
                    return None;
                }
                Some(Decoded {
                    desc,
                    rd: Register::from_code(field(6, 8)),
                    rs,
                    rt,
                    imm: 0,
                })
            }
            Format::I | Format::J => Some(Decoded {
                desc,
                rd: Register::R0,
                rs,
                rt,
                imm: field(6, 10),
            }),
            Format::H => {
                if word >> 6 != 0 {
                    return None;
                }
                Some(Decoded {
                    desc,
                    rd: Register::R0,
                    rs: Register::R0,
                    rt: Register::R0,
                    imm: 0,
                })
            }
        }
    }
}
