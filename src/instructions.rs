use serde::{Deserialize, Serialize};

use crate::error::AsmError;

/// Operand layout class of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    /// `MN Rd, Rs, Rt`
    R,
    /// `MN Rt, Rs, Imm`
    I,
    /// `MN Rs, Rt, Target`
    J,
    /// no operands
    H,
}

impl Format {
    pub fn from_char(c: char) -> Result<Self, AsmError> {
        match c.to_ascii_uppercase() {
            'R' => Ok(Format::R),
            'I' => Ok(Format::I),
            'J' => Ok(Format::J),
            'H' => Ok(Format::H),
            other => Err(AsmError::UnknownFormat { format: other }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Register {
    R0,
    R1,
    R2,
    R3,
}

impl Register {
    pub const ALL: [Register; 4] = [Register::R0, Register::R1, Register::R2, Register::R3];

    /// Parse an upper-cased register token.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "R0" => Some(Register::R0),
            "R1" => Some(Register::R1),
            "R2" => Some(Register::R2),
            "R3" => Some(Register::R3),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Self {
        Self::ALL[(code & 0b11) as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Register::R0 => "R0",
            Register::R1 => "R1",
            Register::R2 => "R2",
            Register::R3 => "R3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstrDesc {
    pub mnemonic: &'static str,
    pub opcode: u8, // low 6 bits of the word
    pub format: Format,
}

pub const OPCODE_MASK: u16 = 0x3F;

pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        mnemonic: "AND",
        opcode: 0b010000,
        format: Format::R,
    },
    InstrDesc {
        mnemonic: "OR",
        opcode: 0b010010,
        format: Format::R,
    },
    InstrDesc {
        mnemonic: "ADD",
        opcode: 0b010100,
        format: Format::R,
    },
    InstrDesc {
        mnemonic: "SUB",
        opcode: 0b011100,
        format: Format::R,
    },
    InstrDesc {
        mnemonic: "ANDI",
        opcode: 0b010001,
        format: Format::I,
    },
    InstrDesc {
        mnemonic: "ORI",
        opcode: 0b010011,
        format: Format::I,
    },
    InstrDesc {
        mnemonic: "ADDI",
        opcode: 0b010101,
        format: Format::I,
    },
    InstrDesc {
        mnemonic: "SUBI",
        opcode: 0b011101,
        format: Format::I,
    },
    InstrDesc {
        mnemonic: "SLT",
        opcode: 0b011110,
        format: Format::R,
    },
    InstrDesc {
        mnemonic: "LW",
        opcode: 0b110101,
        format: Format::I,
    },
    InstrDesc {
        mnemonic: "SW",
        opcode: 0b100101,
        format: Format::I,
    },
    InstrDesc {
        mnemonic: "BLT",
        opcode: 0b001110,
        format: Format::J,
    },
    InstrDesc {
        mnemonic: "HALT",
        opcode: 0b001111,
        format: Format::H,
    },
];

/// Look up an upper-cased mnemonic.
pub fn lookup(mnemonic: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.mnemonic == mnemonic)
}

pub fn by_opcode(opcode: u8) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.opcode == opcode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcodes_are_unique_and_six_bits() {
        for (i, a) in TABLE.iter().enumerate() {
            assert!(u16::from(a.opcode) <= OPCODE_MASK, "{}", a.mnemonic);
            for b in &TABLE[i + 1..] {
                assert_ne!(a.opcode, b.opcode, "{} / {}", a.mnemonic, b.mnemonic);
            }
        }
        assert_eq!(TABLE.len(), 13);
    }

    #[test]
    fn register_codes() {
        for r in Register::ALL {
            assert_eq!(Register::from_name(r.name()), Some(r));
            assert_eq!(Register::from_code(r.code()), r);
        }
        assert_eq!(Register::R2.code(), 0b10);
        assert_eq!(Register::from_name("R4"), None);
        assert_eq!(Register::from_name("r1"), None);
    }

    #[test]
    fn format_from_char() {
        assert_eq!(Format::from_char('j').unwrap(), Format::J);
        assert!(matches!(
            Format::from_char('X'),
            Err(AsmError::UnknownFormat { format: 'X' })
        ));
    }
}
