use coal_asm::decoder::Decoder;
use coal_asm::disasm::fmt_decoded;
use coal_asm::instructions::{Format, Register, TABLE};
use coal_asm::isa::coal16::Coal16Decoder;
use coal_asm::{assemble, AsmConfig};
use pretty_assertions::assert_eq;

fn source_for(mnemonic: &str, format: Format, a: Register, b: Register, c: Register, imm: u8) -> String {
    match format {
        Format::R => format!("{mnemonic} {}, {}, {}", a.name(), b.name(), c.name()),
        Format::I | Format::J => format!("{mnemonic} {}, {}, {imm}", a.name(), b.name()),
        Format::H => mnemonic.to_string(),
    }
}

#[test]
fn every_instruction_decodes_to_its_fields() {
    let dec = Coal16Decoder::new();
    let cfg = AsmConfig::default();
    let picks = [
        (Register::R0, Register::R1, Register::R2, 0u8),
        (Register::R3, Register::R2, Register::R1, 9),
        (Register::R1, Register::R3, Register::R3, 15),
    ];
    for desc in TABLE {
        for &(a, b, c, imm) in &picks {
            let src = source_for(desc.mnemonic, desc.format, a, b, c, imm);
            let word = assemble(&src, &cfg).unwrap().words[0];
            let d = dec.decode(word).unwrap_or_else(|| panic!("{src}: {word:#06x}"));

            assert_eq!(d.desc.mnemonic, desc.mnemonic);
            assert_eq!(word & 0x3F, u16::from(desc.opcode));
            match desc.format {
                Format::R => assert_eq!((d.rd, d.rs, d.rt), (a, b, c), "{src}"),
                Format::I => assert_eq!((d.rt, d.rs, d.imm), (a, b, imm), "{src}"),
                Format::J => assert_eq!((d.rs, d.rt, d.imm), (a, b, imm), "{src}"),
                Format::H => assert_eq!(word, u16::from(desc.opcode)),
            }
            if desc.format != Format::H {
                assert_eq!(word >> 14, 0, "{src}");
            }
            // the disassembly is valid source for the same word
            let again = assemble(&fmt_decoded(&d), &cfg).unwrap().words[0];
            assert_eq!(again, word, "{src}");
        }
    }
}

#[test]
fn reserved_bits_do_not_decode() {
    let dec = Coal16Decoder::new();
    // ADD with a non-zero pad field
    assert!(dec.decode((0b01 << 6) | 0b010100).is_none());
    // HALT with operand bits set
    assert!(dec.decode((1 << 8) | 0b001111).is_none());
    // top two bits set on an I-format word
    assert!(dec.decode(0x8000 | 0b010101).is_none());
    // unassigned opcode
    assert!(dec.decode(0b111111).is_none());
}
