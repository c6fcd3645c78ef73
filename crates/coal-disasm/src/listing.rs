use std::collections::BTreeMap;

use serde::Serialize;

use coal_asm::decoder::{Decoded, Decoder};
use coal_asm::disasm::{fmt_decoded, fmt_word};
use coal_asm::instructions::Format;
use coal_asm::isa::coal16::Coal16Decoder;

use crate::model::{read_word, Image};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingLine {
    pub addr: usize,
    pub word: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

fn branch_target(d: &Decoded) -> Option<usize> {
    (d.desc.format == Format::J).then_some(d.imm as usize)
}

/// Addresses inside the image that some branch jumps to, with generated names.
pub fn branch_targets(img: &Image) -> BTreeMap<usize, String> {
    let dec = Coal16Decoder::new();
    img.words
        .iter()
        .filter_map(|&w| dec.decode(w))
        .filter_map(|d| branch_target(&d))
        .filter(|&t| t < img.words.len())
        .map(|t| (t, format!("L{t}")))
        .collect()
}

/// Decode every word. With `symbolic`, branch targets inside the image are
/// rendered as generated labels.
pub fn build_listing(img: &Image, symbolic: bool) -> Vec<ListingLine> {
    let dec = Coal16Decoder::new();
    let labels = if symbolic {
        branch_targets(img)
    } else {
        BTreeMap::new()
    };
    (0..img.words.len())
        .filter_map(|addr| read_word(img, addr).map(|w| (addr, w)))
        .map(|(addr, w)| {
            let text = match dec.decode(w) {
                Some(d) => match branch_target(&d).and_then(|t| labels.get(&t)) {
                    Some(name) => format!(
                        "{} {}, {}, {name}",
                        d.desc.mnemonic,
                        d.rs.name(),
                        d.rt.name()
                    ),
                    None => fmt_decoded(&d),
                },
                None => format!(".word {}", fmt_word(w)),
            };
            ListingLine {
                addr,
                word: fmt_word(w),
                text,
                label: labels.get(&addr).cloned(),
            }
        })
        .collect()
}

/// Listing as COAL source; feeding it back to the assembler reproduces the
/// image when every word decodes.
pub fn render_source(lines: &[ListingLine]) -> String {
    let mut out = String::new();
    for l in lines {
        if let Some(label) = &l.label {
            out.push_str(label);
            out.push_str(": ");
        }
        out.push_str(&l.text);
        out.push('\n');
    }
    out
}
