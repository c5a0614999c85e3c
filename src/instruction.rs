use crate::error::ErrorDetail;

/// An enum with a variant for each instruction within the base CHIP-8 instruction set.
#[derive(Debug, PartialEq)]
pub(crate) enum Instruction {
    Op00E0,                               // Clear screen
    Op00EE,                               // Subroutine (return)
    Op0NNN { nnn: u16 },                  // Legacy machine language routine call
    Op1NNN { nnn: u16 },                  // Jump to NNN
    Op2NNN { nnn: u16 },                  // Subroutine (call)
    Op3XNN { x: usize, nn: u8 },          // Skip (if Vx = NN)
    Op4XNN { x: usize, nn: u8 },          // Skip (if Vx != NN)
    Op5XY0 { x: usize, y: usize },        // Skip (if Vx = Vy)
    Op6XNN { x: usize, nn: u8 },          // Set register
    Op7XNN { x: usize, nn: u8 },          // Add (NN to Vx)
    Op8XY0 { x: usize, y: usize },        // Set
    Op8XY1 { x: usize, y: usize },        // Binary OR
    Op8XY2 { x: usize, y: usize },        // Binary AND
    Op8XY3 { x: usize, y: usize },        // Logical XOR
    Op8XY4 { x: usize, y: usize },        // Add (Vy to Vx), Vf = carry
    Op8XY5 { x: usize, y: usize },        // Subtract (Vx - Vy -> Vx), Vf = not borrow
    Op8XY6 { x: usize, y: usize },        // Shift right by one, Vf = shifted-out bit
    Op8XY7 { x: usize, y: usize },        // Subtract (Vy - Vx -> Vx), Vf = not borrow
    Op8XYE { x: usize, y: usize },        // Shift left by one, Vf = shifted-out bit
    Op9XY0 { x: usize, y: usize },        // Skip (if Vx != Vy)
    OpANNN { nnn: u16 },                  // Set I = NNN
    OpBNNN { nnn: u16 },                  // Jump to NNN + V0
    OpCXNN { x: usize, nn: u8 },          // Rnd & NN, insert to Vx
    OpDXYN { x: usize, y: usize, n: u8 }, // Draw sprite
    OpEX9E { x: usize },                  // Skip if Vx key is pressed
    OpEXA1 { x: usize },                  // Skip if Vx key is not pressed
    OpFX07 { x: usize },                  // Vx = value of delay timer
    OpFX0A { x: usize },                  // Vx = await keypress
    OpFX15 { x: usize },                  // Value of delay timer = Vx
    OpFX18 { x: usize },                  // Value of sound timer = Vx
    OpFX1E { x: usize },                  // I = I + Vx
    OpFX29 { x: usize },                  // Set I to address of font char for digit in Vx
    OpFX33 { x: usize },                  // Binary-coded decimal conversion
    OpFX55 { x: usize },                  // Store V registers to memory
    OpFX65 { x: usize },                  // Load V registers from memory
}

impl Instruction {
    /// Constructor/builder method that parses the supplied two-byte opcode and returns the
    /// corresponding [Instruction] enum variant.  Returns [ErrorDetail::UnknownInstruction]
    /// if the opcode cannot be parsed or recognised.
    ///
    /// Decoding is pure and total: the same opcode always yields the same variant and
    /// operand fields.  Sub-opcode families are matched strictly, so for example 0x5001
    /// (the SE family requires a zero low nibble) is a decode error rather than a silent
    /// no-op.  All 0x0NNN opcodes other than 00E0 and 00EE decode to the distinct
    /// [Instruction::Op0NNN] variant, whose treatment is a processor policy decision.
    ///
    /// # Arguments
    ///
    /// * `opcode` - a (big-endian) two-byte representation of the opcode to be parsed
    pub(crate) fn decode_from(opcode: u16) -> Result<Instruction, ErrorDetail> {
        // Divide the 16-bit opcode into four 4-bit nibbles, using bit shifting and masking
        let first_nibble: u16 = opcode >> 12;
        let second_nibble: u16 = (opcode & 0x0F00) >> 8;
        let third_nibble: u16 = (opcode & 0x00F0) >> 4;
        let fourth_nibble: u16 = opcode & 0x000F;
        // Pattern match on the nibbles as appropriate to identify the opcode and return
        // the corresponding enum variant
        match (first_nibble, second_nibble, third_nibble, fourth_nibble) {
            (0x0, 0x0, 0xE, 0x0) => Ok(Instruction::Op00E0),
            (0x0, 0x0, 0xE, 0xE) => Ok(Instruction::Op00EE),
            (0x0, ..) => Ok(Instruction::Op0NNN {
                nnn: opcode & 0x0FFF,
            }),
            (0x1, ..) => Ok(Instruction::Op1NNN {
                nnn: opcode & 0x0FFF,
            }),
            (0x2, ..) => Ok(Instruction::Op2NNN {
                nnn: opcode & 0x0FFF,
            }),
            (0x3, ..) => Ok(Instruction::Op3XNN {
                x: second_nibble as usize,
                nn: (opcode & 0x00FF) as u8,
            }),
            (0x4, ..) => Ok(Instruction::Op4XNN {
                x: second_nibble as usize,
                nn: (opcode & 0x00FF) as u8,
            }),
            (0x5, _, _, 0x0) => Ok(Instruction::Op5XY0 {
                x: second_nibble as usize,
                y: third_nibble as usize,
            }),
            (0x6, ..) => Ok(Instruction::Op6XNN {
                x: second_nibble as usize,
                nn: (opcode & 0x00FF) as u8,
            }),
            (0x7, ..) => Ok(Instruction::Op7XNN {
                x: second_nibble as usize,
                nn: (opcode & 0x00FF) as u8,
            }),
            (0x8, _, _, 0x0) => Ok(Instruction::Op8XY0 {
                x: second_nibble as usize,
                y: third_nibble as usize,
            }),
            (0x8, _, _, 0x1) => Ok(Instruction::Op8XY1 {
                x: second_nibble as usize,
                y: third_nibble as usize,
            }),
            (0x8, _, _, 0x2) => Ok(Instruction::Op8XY2 {
                x: second_nibble as usize,
                y: third_nibble as usize,
            }),
            (0x8, _, _, 0x3) => Ok(Instruction::Op8XY3 {
                x: second_nibble as usize,
                y: third_nibble as usize,
            }),
            (0x8, _, _, 0x4) => Ok(Instruction::Op8XY4 {
                x: second_nibble as usize,
                y: third_nibble as usize,
            }),
            (0x8, _, _, 0x5) => Ok(Instruction::Op8XY5 {
                x: second_nibble as usize,
                y: third_nibble as usize,
            }),
            (0x8, _, _, 0x6) => Ok(Instruction::Op8XY6 {
                x: second_nibble as usize,
                y: third_nibble as usize,
            }),
            (0x8, _, _, 0x7) => Ok(Instruction::Op8XY7 {
                x: second_nibble as usize,
                y: third_nibble as usize,
            }),
            (0x8, _, _, 0xE) => Ok(Instruction::Op8XYE {
                x: second_nibble as usize,
                y: third_nibble as usize,
            }),
            (0x9, _, _, 0x0) => Ok(Instruction::Op9XY0 {
                x: second_nibble as usize,
                y: third_nibble as usize,
            }),
            (0xA, ..) => Ok(Instruction::OpANNN {
                nnn: opcode & 0x0FFF,
            }),
            (0xB, ..) => Ok(Instruction::OpBNNN {
                nnn: opcode & 0x0FFF,
            }),
            (0xC, ..) => Ok(Instruction::OpCXNN {
                x: second_nibble as usize,
                nn: (opcode & 0x00FF) as u8,
            }),
            (0xD, ..) => Ok(Instruction::OpDXYN {
                x: second_nibble as usize,
                y: third_nibble as usize,
                n: fourth_nibble as u8,
            }),
            (0xE, _, 0x9, 0xE) => Ok(Instruction::OpEX9E {
                x: second_nibble as usize,
            }),
            (0xE, _, 0xA, 0x1) => Ok(Instruction::OpEXA1 {
                x: second_nibble as usize,
            }),
            (0xF, _, 0x0, 0x7) => Ok(Instruction::OpFX07 {
                x: second_nibble as usize,
            }),
            (0xF, _, 0x0, 0xA) => Ok(Instruction::OpFX0A {
                x: second_nibble as usize,
            }),
            (0xF, _, 0x1, 0x5) => Ok(Instruction::OpFX15 {
                x: second_nibble as usize,
            }),
            (0xF, _, 0x1, 0x8) => Ok(Instruction::OpFX18 {
                x: second_nibble as usize,
            }),
            (0xF, _, 0x1, 0xE) => Ok(Instruction::OpFX1E {
                x: second_nibble as usize,
            }),
            (0xF, _, 0x2, 0x9) => Ok(Instruction::OpFX29 {
                x: second_nibble as usize,
            }),
            (0xF, _, 0x3, 0x3) => Ok(Instruction::OpFX33 {
                x: second_nibble as usize,
            }),
            (0xF, _, 0x5, 0x5) => Ok(Instruction::OpFX55 {
                x: second_nibble as usize,
            }),
            (0xF, _, 0x6, 0x5) => Ok(Instruction::OpFX65 {
                x: second_nibble as usize,
            }),
            // If we have not matched by this point then we cannot identify the
            // instruction; return an Error
            _ => Err(ErrorDetail::UnknownInstruction { opcode }),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;

    #[test]
    fn test_decode_00E0() {
        assert_eq!(
            Instruction::decode_from(0x00E0).unwrap(),
            Instruction::Op00E0
        );
    }

    #[test]
    fn test_decode_00EE() {
        assert_eq!(
            Instruction::decode_from(0x00EE).unwrap(),
            Instruction::Op00EE
        );
    }

    #[test]
    fn test_decode_0NNN() {
        assert_eq!(
            Instruction::decode_from(0x016F).unwrap(),
            Instruction::Op0NNN { nnn: 0x16F }
        );
    }

    #[test]
    fn test_decode_1NNN() {
        assert_eq!(
            Instruction::decode_from(0x1D38).unwrap(),
            Instruction::Op1NNN { nnn: 0xD38 }
        );
    }

    #[test]
    fn test_decode_2NNN() {
        assert_eq!(
            Instruction::decode_from(0x21CD).unwrap(),
            Instruction::Op2NNN { nnn: 0x1CD }
        );
    }

    #[test]
    fn test_decode_3XNN() {
        assert_eq!(
            Instruction::decode_from(0x3C63).unwrap(),
            Instruction::Op3XNN { x: 0xC, nn: 0x63 }
        );
    }

    #[test]
    fn test_decode_4XNN() {
        assert_eq!(
            Instruction::decode_from(0x42A7).unwrap(),
            Instruction::Op4XNN { x: 0x2, nn: 0xA7 }
        );
    }

    #[test]
    fn test_decode_5XY0() {
        assert_eq!(
            Instruction::decode_from(0x5340).unwrap(),
            Instruction::Op5XY0 { x: 0x3, y: 0x4 }
        );
    }

    #[test]
    fn test_decode_5XY0_nonzero_low_nibble_error() {
        // The SE family requires a zero low nibble; anything else must be a decode
        // error rather than a silent no-op
        assert_eq!(
            Instruction::decode_from(0x5001).unwrap_err(),
            ErrorDetail::UnknownInstruction { opcode: 0x5001 }
        );
    }

    #[test]
    fn test_decode_6XNN() {
        assert_eq!(
            Instruction::decode_from(0x602E).unwrap(),
            Instruction::Op6XNN { x: 0x0, nn: 0x2E }
        );
    }

    #[test]
    fn test_decode_7XNN() {
        assert_eq!(
            Instruction::decode_from(0x7A9F).unwrap(),
            Instruction::Op7XNN { x: 0xA, nn: 0x9F }
        );
    }

    #[test]
    fn test_decode_8XY0() {
        assert_eq!(
            Instruction::decode_from(0x8270).unwrap(),
            Instruction::Op8XY0 { x: 0x2, y: 0x7 }
        );
    }

    #[test]
    fn test_decode_8XY1() {
        assert_eq!(
            Instruction::decode_from(0x8DE1).unwrap(),
            Instruction::Op8XY1 { x: 0xD, y: 0xE }
        );
    }

    #[test]
    fn test_decode_8XY2() {
        assert_eq!(
            Instruction::decode_from(0x8322).unwrap(),
            Instruction::Op8XY2 { x: 0x3, y: 0x2 }
        );
    }

    #[test]
    fn test_decode_8XY3() {
        assert_eq!(
            Instruction::decode_from(0x81F3).unwrap(),
            Instruction::Op8XY3 { x: 0x1, y: 0xF }
        );
    }

    #[test]
    fn test_decode_8XY4() {
        assert_eq!(
            Instruction::decode_from(0x8964).unwrap(),
            Instruction::Op8XY4 { x: 0x9, y: 0x6 }
        );
    }

    #[test]
    fn test_decode_8XY5() {
        assert_eq!(
            Instruction::decode_from(0x8B05).unwrap(),
            Instruction::Op8XY5 { x: 0xB, y: 0x0 }
        );
    }

    #[test]
    fn test_decode_8XY6() {
        assert_eq!(
            Instruction::decode_from(0x8246).unwrap(),
            Instruction::Op8XY6 { x: 0x2, y: 0x4 }
        );
    }

    #[test]
    fn test_decode_8XY7() {
        assert_eq!(
            Instruction::decode_from(0x8EF7).unwrap(),
            Instruction::Op8XY7 { x: 0xE, y: 0xF }
        );
    }

    #[test]
    fn test_decode_8XYE() {
        assert_eq!(
            Instruction::decode_from(0x816E).unwrap(),
            Instruction::Op8XYE { x: 0x1, y: 0x6 }
        );
    }

    #[test]
    fn test_decode_8XY8_unknown_sub_opcode_error() {
        assert_eq!(
            Instruction::decode_from(0x8238).unwrap_err(),
            ErrorDetail::UnknownInstruction { opcode: 0x8238 }
        );
    }

    #[test]
    fn test_decode_9XY0() {
        assert_eq!(
            Instruction::decode_from(0x9E20).unwrap(),
            Instruction::Op9XY0 { x: 0xE, y: 0x2 }
        );
    }

    #[test]
    fn test_decode_9XY0_nonzero_low_nibble_error() {
        assert_eq!(
            Instruction::decode_from(0x9E2F).unwrap_err(),
            ErrorDetail::UnknownInstruction { opcode: 0x9E2F }
        );
    }

    #[test]
    fn test_decode_ANNN() {
        assert_eq!(
            Instruction::decode_from(0xA41C).unwrap(),
            Instruction::OpANNN { nnn: 0x41C }
        );
    }

    #[test]
    fn test_decode_BNNN() {
        assert_eq!(
            Instruction::decode_from(0xB2EA).unwrap(),
            Instruction::OpBNNN { nnn: 0x2EA }
        );
    }

    #[test]
    fn test_decode_CXNN() {
        assert_eq!(
            Instruction::decode_from(0xC4DE).unwrap(),
            Instruction::OpCXNN { x: 0x4, nn: 0xDE }
        );
    }

    #[test]
    fn test_decode_DXYN() {
        assert_eq!(
            Instruction::decode_from(0xD2FB).unwrap(),
            Instruction::OpDXYN {
                x: 0x2,
                y: 0xF,
                n: 0xB
            }
        );
    }

    #[test]
    fn test_decode_EX9E() {
        assert_eq!(
            Instruction::decode_from(0xE39E).unwrap(),
            Instruction::OpEX9E { x: 0x3 }
        );
    }

    #[test]
    fn test_decode_EXA1() {
        assert_eq!(
            Instruction::decode_from(0xEAA1).unwrap(),
            Instruction::OpEXA1 { x: 0xA }
        );
    }

    #[test]
    fn test_decode_EX_unknown_sub_opcode_error() {
        assert_eq!(
            Instruction::decode_from(0xE39F).unwrap_err(),
            ErrorDetail::UnknownInstruction { opcode: 0xE39F }
        );
    }

    #[test]
    fn test_decode_FX07() {
        assert_eq!(
            Instruction::decode_from(0xFB07).unwrap(),
            Instruction::OpFX07 { x: 0xB }
        );
    }

    #[test]
    fn test_decode_FX0A() {
        assert_eq!(
            Instruction::decode_from(0xFC0A).unwrap(),
            Instruction::OpFX0A { x: 0xC }
        );
    }

    #[test]
    fn test_decode_FX15() {
        assert_eq!(
            Instruction::decode_from(0xF615).unwrap(),
            Instruction::OpFX15 { x: 0x6 }
        );
    }

    #[test]
    fn test_decode_FX18() {
        assert_eq!(
            Instruction::decode_from(0xFE18).unwrap(),
            Instruction::OpFX18 { x: 0xE }
        );
    }

    #[test]
    fn test_decode_FX1E() {
        assert_eq!(
            Instruction::decode_from(0xF51E).unwrap(),
            Instruction::OpFX1E { x: 0x5 }
        );
    }

    #[test]
    fn test_decode_FX29() {
        assert_eq!(
            Instruction::decode_from(0xF429).unwrap(),
            Instruction::OpFX29 { x: 0x4 }
        );
    }

    #[test]
    fn test_decode_FX33() {
        assert_eq!(
            Instruction::decode_from(0xFD33).unwrap(),
            Instruction::OpFX33 { x: 0xD }
        );
    }

    #[test]
    fn test_decode_FX55() {
        assert_eq!(
            Instruction::decode_from(0xF855).unwrap(),
            Instruction::OpFX55 { x: 0x8 }
        );
    }

    #[test]
    fn test_decode_FX65() {
        assert_eq!(
            Instruction::decode_from(0xFA65).unwrap(),
            Instruction::OpFX65 { x: 0xA }
        );
    }

    #[test]
    fn test_decode_FX_unknown_sub_opcode_error() {
        assert_eq!(
            Instruction::decode_from(0xFA75).unwrap_err(),
            ErrorDetail::UnknownInstruction { opcode: 0xFA75 }
        );
    }

    #[test]
    fn test_decode_unrecognised_opcode() {
        assert_eq!(
            Instruction::decode_from(0xFFFF).unwrap_err(),
            ErrorDetail::UnknownInstruction { opcode: 0xFFFF }
        );
    }

    #[test]
    fn test_decode_is_deterministic() {
        for opcode in [0x00E0, 0x1D38, 0x8246, 0xD2FB, 0xFA65] {
            assert_eq!(
                Instruction::decode_from(opcode),
                Instruction::decode_from(opcode)
            );
        }
    }
}
