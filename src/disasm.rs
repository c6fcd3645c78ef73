use crate::decoder::Decoded;
use crate::instructions::Format;

/// Render a decoded word in the same operand order the assembler accepts,
/// so the text reassembles to the identical word.
pub fn fmt_decoded(d: &Decoded) -> String {
    let mn = d.desc.mnemonic;
    match d.desc.format {
        Format::R => format!("{mn} {}, {}, {}", d.rd.name(), d.rs.name(), d.rt.name()),
        Format::I => format!("{mn} {}, {}, {}", d.rt.name(), d.rs.name(), d.imm),
        Format::J => format!("{mn} {}, {}, {}", d.rs.name(), d.rt.name(), d.imm),
        Format::H => mn.to_string(),
    }
}

pub fn fmt_word(word: u16) -> String {
    format!("{word:#06x}")
}
