use serde::Serialize;

use crate::instructions::{InstrDesc, Register};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub desc: &'static InstrDesc,
    pub rd: Register, // R-format only
    pub rs: Register,
    pub rt: Register,
    pub imm: u8, // immediate or branch target, I/J only
}

pub trait Decoder {
    fn decode(&self, word: u16) -> Option<Decoded>;
}
