use anyhow::{Context, Result};
use std::path::Path;

/// Instruction memory image: word N lives at address N.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub words: Vec<u16>,
}

/// Parse assembler output (`0x1355,0x000f`). Commas and whitespace both separate words;
/// the `0x` prefix is optional.
pub fn parse_hex_line(text: &str) -> Result<Vec<u16>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| {
            let hex = t
                .strip_prefix("0x")
                .or_else(|| t.strip_prefix("0X"))
                .unwrap_or(t);
            u16::from_str_radix(hex, 16).with_context(|| format!("bad word: {t}"))
        })
        .collect()
}

pub fn load_hex_image(path: &Path) -> Result<Image> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(Image {
        words: parse_hex_line(&text)?,
    })
}

pub fn read_word(img: &Image, addr: usize) -> Option<u16> {
    img.words.get(addr).copied()
}
