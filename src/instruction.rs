use crate::error::ErrorDetail;
use crate::opcode::Opcode;
use std::fmt;

/// An enum with a variant for each instruction within the CHIP-8 instruction set.
#[derive(Debug, PartialEq)]
pub(crate) enum Instruction {
    Op00E0,                               // Clear screen
    Op00EE,                               // Subroutine (return)
    Op1NNN { nnn: u16 },                  // Jump to NNN
    Op2NNN { nnn: u16 },                  // Subroutine (call)
    Op3XNN { x: usize, nn: u8 },          // Skip (if Vx = NN)
    Op4XNN { x: usize, nn: u8 },          // Skip (if Vx != NN)
    Op5XY0 { x: usize, y: usize },        // Skip (if Vx = Vy)
    Op6XNN { x: usize, nn: u8 },          // Set register
    Op7XNN { x: usize, nn: u8 },          // Add (NN to Vx)
    Op8XY0 { x: usize, y: usize },        // Set (Vy to Vx)
    Op8XY1 { x: usize, y: usize },        // Binary OR
    Op8XY2 { x: usize, y: usize },        // Binary AND
    Op8XY3 { x: usize, y: usize },        // Logical XOR
    Op8XY4 { x: usize, y: usize },        // Add (Vy to Vx)
    Op8XY5 { x: usize, y: usize },        // Subtract (Vx - Vy -> Vx)
    Op8XY6 { x: usize },                  // Shift Vx >> 1, set Vf to shifted-out bit
    Op8XY7 { x: usize, y: usize },        // Subtract (Vy - Vx -> Vx)
    Op8XYE { x: usize },                  // Shift Vx << 1, set Vf to shifted-out bit
    Op9XY0 { x: usize, y: usize },        // Skip (if Vx != Vy)
    OpANNN { nnn: u16 },                  // Set I = NNN
    OpBNNN { nnn: u16 },                  // Jump to NNN + V0
    OpCXNN { x: usize, nn: u8 },          // Rnd & NN, insert to Vx
    OpDXYN { x: usize, y: usize, n: u8 }, // Draw sprite
    OpEX9E { x: usize },                  // Skip if Vx key is pressed
    OpEXA1 { x: usize },                  // Skip if Vx key is not pressed
    OpFX07 { x: usize },                  // Vx = value of delay timer
    OpFX0A { x: usize },                  // Vx = await keypress
    OpFX15 { x: usize },                  // value of delay timer = Vx
    OpFX18 { x: usize },                  // value of sound timer = Vx
    OpFX1E { x: usize },                  // I = I + Vx
    OpFX29 { x: usize },                  // Read char from Vx, set I to address of that font char
    OpFX33 { x: usize },                  // Binary-coded decimal conversion
    OpFX55 { x: usize },                  // Store V registers to memory
    OpFX65 { x: usize },                  // Load V registers from memory
}

impl Instruction {
    /// Constructor/builder method that classifies the supplied [Opcode] and returns the
    /// corresponding [Instruction] enum variant with its operands extracted.  Returns
    /// [ErrorDetail::UnknownInstruction] if the opcode does not match any instruction.
    ///
    /// # Arguments
    ///
    /// * `opcode` - the two-byte opcode to be classified
    pub(crate) fn decode_from(opcode: Opcode) -> Result<Instruction, ErrorDetail> {
        // Pattern match on the four nibbles as appropriate to identify the instruction and
        // return the corresponding enum variant
        match (opcode.a(), opcode.b(), opcode.c(), opcode.d()) {
            (0x0, 0x0, 0xE, 0x0) => Ok(Instruction::Op00E0),
            (0x0, 0x0, 0xE, 0xE) => Ok(Instruction::Op00EE),
            (0x1, _, _, _) => Ok(Instruction::Op1NNN {
                nnn: opcode.address(),
            }),
            (0x2, _, _, _) => Ok(Instruction::Op2NNN {
                nnn: opcode.address(),
            }),
            (0x3, _, _, _) => Ok(Instruction::Op3XNN {
                x: opcode.x(),
                nn: opcode.byte(),
            }),
            (0x4, _, _, _) => Ok(Instruction::Op4XNN {
                x: opcode.x(),
                nn: opcode.byte(),
            }),
            (0x5, _, _, 0x0) => Ok(Instruction::Op5XY0 {
                x: opcode.x(),
                y: opcode.y(),
            }),
            (0x6, _, _, _) => Ok(Instruction::Op6XNN {
                x: opcode.x(),
                nn: opcode.byte(),
            }),
            (0x7, _, _, _) => Ok(Instruction::Op7XNN {
                x: opcode.x(),
                nn: opcode.byte(),
            }),
            (0x8, _, _, 0x0) => Ok(Instruction::Op8XY0 {
                x: opcode.x(),
                y: opcode.y(),
            }),
            (0x8, _, _, 0x1) => Ok(Instruction::Op8XY1 {
                x: opcode.x(),
                y: opcode.y(),
            }),
            (0x8, _, _, 0x2) => Ok(Instruction::Op8XY2 {
                x: opcode.x(),
                y: opcode.y(),
            }),
            (0x8, _, _, 0x3) => Ok(Instruction::Op8XY3 {
                x: opcode.x(),
                y: opcode.y(),
            }),
            (0x8, _, _, 0x4) => Ok(Instruction::Op8XY4 {
                x: opcode.x(),
                y: opcode.y(),
            }),
            (0x8, _, _, 0x5) => Ok(Instruction::Op8XY5 {
                x: opcode.x(),
                y: opcode.y(),
            }),
            (0x8, _, _, 0x6) => Ok(Instruction::Op8XY6 { x: opcode.x() }),
            (0x8, _, _, 0x7) => Ok(Instruction::Op8XY7 {
                x: opcode.x(),
                y: opcode.y(),
            }),
            (0x8, _, _, 0xE) => Ok(Instruction::Op8XYE { x: opcode.x() }),
            (0x9, _, _, 0x0) => Ok(Instruction::Op9XY0 {
                x: opcode.x(),
                y: opcode.y(),
            }),
            (0xA, _, _, _) => Ok(Instruction::OpANNN {
                nnn: opcode.address(),
            }),
            (0xB, _, _, _) => Ok(Instruction::OpBNNN {
                nnn: opcode.address(),
            }),
            (0xC, _, _, _) => Ok(Instruction::OpCXNN {
                x: opcode.x(),
                nn: opcode.byte(),
            }),
            (0xD, _, _, _) => Ok(Instruction::OpDXYN {
                x: opcode.x(),
                y: opcode.y(),
                n: opcode.nibble(),
            }),
            (0xE, _, 0x9, 0xE) => Ok(Instruction::OpEX9E { x: opcode.x() }),
            (0xE, _, 0xA, 0x1) => Ok(Instruction::OpEXA1 { x: opcode.x() }),
            (0xF, _, 0x0, 0x7) => Ok(Instruction::OpFX07 { x: opcode.x() }),
            (0xF, _, 0x0, 0xA) => Ok(Instruction::OpFX0A { x: opcode.x() }),
            (0xF, _, 0x1, 0x5) => Ok(Instruction::OpFX15 { x: opcode.x() }),
            (0xF, _, 0x1, 0x8) => Ok(Instruction::OpFX18 { x: opcode.x() }),
            (0xF, _, 0x1, 0xE) => Ok(Instruction::OpFX1E { x: opcode.x() }),
            (0xF, _, 0x2, 0x9) => Ok(Instruction::OpFX29 { x: opcode.x() }),
            (0xF, _, 0x3, 0x3) => Ok(Instruction::OpFX33 { x: opcode.x() }),
            (0xF, _, 0x5, 0x5) => Ok(Instruction::OpFX55 { x: opcode.x() }),
            (0xF, _, 0x6, 0x5) => Ok(Instruction::OpFX65 { x: opcode.x() }),
            _ => Err(ErrorDetail::UnknownInstruction {
                opcode: opcode.word(),
            }),
        }
    }
}

/// Renders the instruction as its assembly mnemonic with operands, e.g. `LD VA 0x02`.
/// This is the format used by [Disassembler](crate::Disassembler) listings.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instruction::Op00E0 => write!(f, "CLS"),
            Instruction::Op00EE => write!(f, "RET"),
            Instruction::Op1NNN { nnn } => write!(f, "JP {:#05X}", nnn),
            Instruction::Op2NNN { nnn } => write!(f, "CALL {:#05X}", nnn),
            Instruction::Op3XNN { x, nn } => write!(f, "SE V{:X} {:#04X}", x, nn),
            Instruction::Op4XNN { x, nn } => write!(f, "SNE V{:X} {:#04X}", x, nn),
            Instruction::Op5XY0 { x, y } => write!(f, "SE V{:X} V{:X}", x, y),
            Instruction::Op6XNN { x, nn } => write!(f, "LD V{:X} {:#04X}", x, nn),
            Instruction::Op7XNN { x, nn } => write!(f, "ADD V{:X} {:#04X}", x, nn),
            Instruction::Op8XY0 { x, y } => write!(f, "LD V{:X} V{:X}", x, y),
            Instruction::Op8XY1 { x, y } => write!(f, "OR V{:X} V{:X}", x, y),
            Instruction::Op8XY2 { x, y } => write!(f, "AND V{:X} V{:X}", x, y),
            Instruction::Op8XY3 { x, y } => write!(f, "XOR V{:X} V{:X}", x, y),
            Instruction::Op8XY4 { x, y } => write!(f, "ADD V{:X} V{:X}", x, y),
            Instruction::Op8XY5 { x, y } => write!(f, "SUB V{:X} V{:X}", x, y),
            Instruction::Op8XY6 { x } => write!(f, "SHR V{:X}", x),
            Instruction::Op8XY7 { x, y } => write!(f, "SUBN V{:X} V{:X}", x, y),
            Instruction::Op8XYE { x } => write!(f, "SHL V{:X}", x),
            Instruction::Op9XY0 { x, y } => write!(f, "SNE V{:X} V{:X}", x, y),
            Instruction::OpANNN { nnn } => write!(f, "LD I {:#05X}", nnn),
            Instruction::OpBNNN { nnn } => write!(f, "JP V0 {:#05X}", nnn),
            Instruction::OpCXNN { x, nn } => write!(f, "RND V{:X} {:#04X}", x, nn),
            Instruction::OpDXYN { x, y, n } => write!(f, "DRW V{:X} V{:X} {:#03X}", x, y, n),
            Instruction::OpEX9E { x } => write!(f, "SKP V{:X}", x),
            Instruction::OpEXA1 { x } => write!(f, "SKNP V{:X}", x),
            Instruction::OpFX07 { x } => write!(f, "LD V{:X} DT", x),
            Instruction::OpFX0A { x } => write!(f, "LD V{:X} K", x),
            Instruction::OpFX15 { x } => write!(f, "LD DT V{:X}", x),
            Instruction::OpFX18 { x } => write!(f, "LD ST V{:X}", x),
            Instruction::OpFX1E { x } => write!(f, "ADD I V{:X}", x),
            Instruction::OpFX29 { x } => write!(f, "LD F V{:X}", x),
            Instruction::OpFX33 { x } => write!(f, "LD B V{:X}", x),
            Instruction::OpFX55 { x } => write!(f, "LD I V{:X}", x),
            Instruction::OpFX65 { x } => write!(f, "LD V{:X} I", x),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;

    fn decode(word: u16) -> Result<Instruction, ErrorDetail> {
        Instruction::decode_from(Opcode::new(word))
    }

    #[test]
    fn test_decode_00E0() {
        assert_eq!(decode(0x00E0).unwrap(), Instruction::Op00E0);
    }

    #[test]
    fn test_decode_00EE() {
        assert_eq!(decode(0x00EE).unwrap(), Instruction::Op00EE);
    }

    #[test]
    fn test_decode_1NNN() {
        assert_eq!(
            decode(0x1D2E).unwrap(),
            Instruction::Op1NNN { nnn: 0xD2E }
        );
    }

    #[test]
    fn test_decode_2NNN() {
        assert_eq!(
            decode(0x2F4A).unwrap(),
            Instruction::Op2NNN { nnn: 0xF4A }
        );
    }

    #[test]
    fn test_decode_3XNN() {
        assert_eq!(
            decode(0x3C63).unwrap(),
            Instruction::Op3XNN { x: 0xC, nn: 0x63 }
        );
    }

    #[test]
    fn test_decode_4XNN() {
        assert_eq!(
            decode(0x42E7).unwrap(),
            Instruction::Op4XNN { x: 0x2, nn: 0xE7 }
        );
    }

    #[test]
    fn test_decode_5XY0() {
        assert_eq!(
            decode(0x5C30).unwrap(),
            Instruction::Op5XY0 { x: 0xC, y: 0x3 }
        );
    }

    #[test]
    fn test_decode_6XNN() {
        assert_eq!(
            decode(0x6A02).unwrap(),
            Instruction::Op6XNN { x: 0xA, nn: 0x02 }
        );
    }

    #[test]
    fn test_decode_7XNN() {
        assert_eq!(
            decode(0x7B9F).unwrap(),
            Instruction::Op7XNN { x: 0xB, nn: 0x9F }
        );
    }

    #[test]
    fn test_decode_8XY0() {
        assert_eq!(
            decode(0x8D10).unwrap(),
            Instruction::Op8XY0 { x: 0xD, y: 0x1 }
        );
    }

    #[test]
    fn test_decode_8XY1() {
        assert_eq!(
            decode(0x8DE1).unwrap(),
            Instruction::Op8XY1 { x: 0xD, y: 0xE }
        );
    }

    #[test]
    fn test_decode_8XY2() {
        assert_eq!(
            decode(0x8322).unwrap(),
            Instruction::Op8XY2 { x: 0x3, y: 0x2 }
        );
    }

    #[test]
    fn test_decode_8XY3() {
        assert_eq!(
            decode(0x81F3).unwrap(),
            Instruction::Op8XY3 { x: 0x1, y: 0xF }
        );
    }

    #[test]
    fn test_decode_8XY4() {
        assert_eq!(
            decode(0x8964).unwrap(),
            Instruction::Op8XY4 { x: 0x9, y: 0x6 }
        );
    }

    #[test]
    fn test_decode_8XY5() {
        assert_eq!(
            decode(0x8B05).unwrap(),
            Instruction::Op8XY5 { x: 0xB, y: 0x0 }
        );
    }

    #[test]
    fn test_decode_8XY6() {
        assert_eq!(decode(0x82C6).unwrap(), Instruction::Op8XY6 { x: 0x2 });
    }

    #[test]
    fn test_decode_8XY7() {
        assert_eq!(
            decode(0x8EF7).unwrap(),
            Instruction::Op8XY7 { x: 0xE, y: 0xF }
        );
    }

    #[test]
    fn test_decode_8XYE() {
        assert_eq!(decode(0x814E).unwrap(), Instruction::Op8XYE { x: 0x1 });
    }

    #[test]
    fn test_decode_9XY0() {
        assert_eq!(
            decode(0x9E20).unwrap(),
            Instruction::Op9XY0 { x: 0xE, y: 0x2 }
        );
    }

    #[test]
    fn test_decode_ANNN() {
        assert_eq!(
            decode(0xA41C).unwrap(),
            Instruction::OpANNN { nnn: 0x41C }
        );
    }

    #[test]
    fn test_decode_BNNN() {
        assert_eq!(
            decode(0xB2EA).unwrap(),
            Instruction::OpBNNN { nnn: 0x2EA }
        );
    }

    #[test]
    fn test_decode_CXNN() {
        assert_eq!(
            decode(0xC4DE).unwrap(),
            Instruction::OpCXNN { x: 0x4, nn: 0xDE }
        );
    }

    #[test]
    fn test_decode_DXYN() {
        assert_eq!(
            decode(0xD2FB).unwrap(),
            Instruction::OpDXYN {
                x: 0x2,
                y: 0xF,
                n: 0xB
            }
        );
    }

    #[test]
    fn test_decode_EX9E() {
        assert_eq!(decode(0xE39E).unwrap(), Instruction::OpEX9E { x: 0x3 });
    }

    #[test]
    fn test_decode_EXA1() {
        assert_eq!(decode(0xEAA1).unwrap(), Instruction::OpEXA1 { x: 0xA });
    }

    #[test]
    fn test_decode_FX07() {
        assert_eq!(decode(0xFB07).unwrap(), Instruction::OpFX07 { x: 0xB });
    }

    #[test]
    fn test_decode_FX0A() {
        assert_eq!(decode(0xFC0A).unwrap(), Instruction::OpFX0A { x: 0xC });
    }

    #[test]
    fn test_decode_FX15() {
        assert_eq!(decode(0xF615).unwrap(), Instruction::OpFX15 { x: 0x6 });
    }

    #[test]
    fn test_decode_FX18() {
        assert_eq!(decode(0xFE18).unwrap(), Instruction::OpFX18 { x: 0xE });
    }

    #[test]
    fn test_decode_FX1E() {
        assert_eq!(decode(0xF51E).unwrap(), Instruction::OpFX1E { x: 0x5 });
    }

    #[test]
    fn test_decode_FX29() {
        assert_eq!(decode(0xF429).unwrap(), Instruction::OpFX29 { x: 0x4 });
    }

    #[test]
    fn test_decode_FX33() {
        assert_eq!(decode(0xFD33).unwrap(), Instruction::OpFX33 { x: 0xD });
    }

    #[test]
    fn test_decode_FX55() {
        assert_eq!(decode(0xF755).unwrap(), Instruction::OpFX55 { x: 0x7 });
    }

    #[test]
    fn test_decode_FX65() {
        assert_eq!(decode(0xFA65).unwrap(), Instruction::OpFX65 { x: 0xA });
    }

    // Opcodes that fall outside every documented format must classify as unknown,
    // including family-0 words other than 00E0/00EE and 5/9/E/F-family words with
    // unrecognised trailing nibbles.
    #[test]
    fn test_decode_unknown_instructions() {
        for word in [
            0x0000, 0x0123, 0x00FF, 0x024B, 0x5341, 0x8AB8, 0x9E21, 0xE29F, 0xE2A2, 0xFA08,
            0xFA99, 0xFFFF,
        ] {
            assert_eq!(
                decode(word).unwrap_err(),
                ErrorDetail::UnknownInstruction { opcode: word }
            );
        }
    }

    #[test]
    fn test_display_no_operands() {
        assert!(decode(0x00E0).unwrap().to_string() == "CLS"
            && decode(0x00EE).unwrap().to_string() == "RET");
    }

    #[test]
    fn test_display_address_operands() {
        assert!(decode(0x1D2E).unwrap().to_string() == "JP 0xD2E"
            && decode(0x2F4A).unwrap().to_string() == "CALL 0xF4A"
            && decode(0xA41C).unwrap().to_string() == "LD I 0x41C"
            && decode(0xB2EA).unwrap().to_string() == "JP V0 0x2EA");
    }

    #[test]
    fn test_display_register_byte_operands() {
        assert!(decode(0x3C63).unwrap().to_string() == "SE VC 0x63"
            && decode(0x42E7).unwrap().to_string() == "SNE V2 0xE7"
            && decode(0x6A02).unwrap().to_string() == "LD VA 0x02"
            && decode(0x7B9F).unwrap().to_string() == "ADD VB 0x9F"
            && decode(0xC4DE).unwrap().to_string() == "RND V4 0xDE");
    }

    #[test]
    fn test_display_register_register_operands() {
        assert!(decode(0x5C30).unwrap().to_string() == "SE VC V3"
            && decode(0x8D10).unwrap().to_string() == "LD VD V1"
            && decode(0x8DE1).unwrap().to_string() == "OR VD VE"
            && decode(0x8322).unwrap().to_string() == "AND V3 V2"
            && decode(0x81F3).unwrap().to_string() == "XOR V1 VF"
            && decode(0x8964).unwrap().to_string() == "ADD V9 V6"
            && decode(0x8B05).unwrap().to_string() == "SUB VB V0"
            && decode(0x8EF7).unwrap().to_string() == "SUBN VE VF"
            && decode(0x9E20).unwrap().to_string() == "SNE VE V2");
    }

    #[test]
    fn test_display_shift_instructions() {
        assert!(decode(0x82C6).unwrap().to_string() == "SHR V2"
            && decode(0x814E).unwrap().to_string() == "SHL V1");
    }

    #[test]
    fn test_display_draw() {
        assert_eq!(decode(0xD2FB).unwrap().to_string(), "DRW V2 VF 0xB");
    }

    #[test]
    fn test_display_key_instructions() {
        assert!(decode(0xE39E).unwrap().to_string() == "SKP V3"
            && decode(0xEAA1).unwrap().to_string() == "SKNP VA"
            && decode(0xFC0A).unwrap().to_string() == "LD VC K");
    }

    #[test]
    fn test_display_timer_instructions() {
        assert!(decode(0xFB07).unwrap().to_string() == "LD VB DT"
            && decode(0xF615).unwrap().to_string() == "LD DT V6"
            && decode(0xFE18).unwrap().to_string() == "LD ST VE");
    }

    #[test]
    fn test_display_index_instructions() {
        assert!(decode(0xF51E).unwrap().to_string() == "ADD I V5"
            && decode(0xF429).unwrap().to_string() == "LD F V4"
            && decode(0xFD33).unwrap().to_string() == "LD B VD"
            && decode(0xF755).unwrap().to_string() == "LD I V7"
            && decode(0xFA65).unwrap().to_string() == "LD VA I");
    }
}
