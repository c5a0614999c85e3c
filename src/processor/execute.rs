use super::*;
use crate::options::ShiftSource;
use std::collections::HashMap;

// Each execute method manages the program counter itself: sequential instructions advance
// it by one opcode (two bytes) on completion, skips advance it by two opcodes, and jumps,
// calls and returns set it directly.  A method that returns an error leaves the program
// counter addressing the faulting instruction, so error reports identify it precisely.
impl Processor {
    /// Executes the 00E0 instruction - CLS
    /// Purpose: clear the display
    pub(super) fn execute_00E0(&mut self) -> Result<(), ErrorDetail> {
        self.frame_buffer.clear();
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the 00EE instruction - RET
    /// Purpose: return from a subroutine
    pub(super) fn execute_00EE(&mut self) -> Result<(), ErrorDetail> {
        // The stack holds the address of the corresponding CALL instruction, so
        // execution resumes at the instruction after it
        let address: u16 = self.stack.pop()?;
        self.program_counter = address + 0x2;
        Ok(())
    }

    /// Executes the 0NNN instruction - SYS addr
    /// Purpose: jump to a machine code routine at NNN.  Native machine code cannot be
    /// executed; depending on the configured quirks this is either treated as a no-op
    /// (some ROMs contain vestigial COSMAC calls) or a fatal error
    pub(super) fn execute_0NNN(&mut self, nnn: u16) -> Result<(), ErrorDetail> {
        if self.quirks.sys_opcodes_are_noops {
            self.program_counter += 0x2;
            Ok(())
        } else {
            Err(ErrorDetail::UnknownInstruction { opcode: nnn })
        }
    }

    /// Executes the 1NNN instruction - JP addr
    /// Purpose: jump to location NNN
    pub(super) fn execute_1NNN(&mut self, nnn: u16) -> Result<(), ErrorDetail> {
        self.program_counter = nnn;
        Ok(())
    }

    /// Executes the 2NNN instruction - CALL addr
    /// Purpose: call subroutine at NNN
    pub(super) fn execute_2NNN(&mut self, nnn: u16) -> Result<(), ErrorDetail> {
        // Push the address of this CALL instruction; RET advances past it
        self.stack.push(self.program_counter)?;
        self.program_counter = nnn;
        Ok(())
    }

    /// Executes the 3XNN instruction - SE Vx, byte
    /// Purpose: skip next instruction if Vx = NN
    pub(super) fn execute_3XNN(&mut self, x: usize, nn: u8) -> Result<(), ErrorDetail> {
        if self.variable_registers[x] == nn {
            self.program_counter += 0x4;
        } else {
            self.program_counter += 0x2;
        }
        Ok(())
    }

    /// Executes the 4XNN instruction - SNE Vx, byte
    /// Purpose: skip next instruction if Vx != NN
    pub(super) fn execute_4XNN(&mut self, x: usize, nn: u8) -> Result<(), ErrorDetail> {
        if self.variable_registers[x] != nn {
            self.program_counter += 0x4;
        } else {
            self.program_counter += 0x2;
        }
        Ok(())
    }

    /// Executes the 5XY0 instruction - SE Vx, Vy
    /// Purpose: skip next instruction if Vx = Vy
    pub(super) fn execute_5XY0(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        if self.variable_registers[x] == self.variable_registers[y] {
            self.program_counter += 0x4;
        } else {
            self.program_counter += 0x2;
        }
        Ok(())
    }

    /// Executes the 6XNN instruction - LD Vx, byte
    /// Purpose: set Vx = NN
    pub(super) fn execute_6XNN(&mut self, x: usize, nn: u8) -> Result<(), ErrorDetail> {
        self.variable_registers[x] = nn;
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the 7XNN instruction - ADD Vx, byte
    /// Purpose: set Vx = Vx + NN (wrapping; Vf is not affected)
    pub(super) fn execute_7XNN(&mut self, x: usize, nn: u8) -> Result<(), ErrorDetail> {
        self.variable_registers[x] = self.variable_registers[x].wrapping_add(nn);
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the 8XY0 instruction - LD Vx, Vy
    /// Purpose: set Vx = Vy
    pub(super) fn execute_8XY0(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        self.variable_registers[x] = self.variable_registers[y];
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the 8XY1 instruction - OR Vx, Vy
    /// Purpose: set Vx = Vx OR Vy
    pub(super) fn execute_8XY1(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        self.variable_registers[x] |= self.variable_registers[y];
        if self.quirks.logic_ops_reset_flag {
            self.variable_registers[0xF] = 0x0;
        }
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the 8XY2 instruction - AND Vx, Vy
    /// Purpose: set Vx = Vx AND Vy
    pub(super) fn execute_8XY2(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        self.variable_registers[x] &= self.variable_registers[y];
        if self.quirks.logic_ops_reset_flag {
            self.variable_registers[0xF] = 0x0;
        }
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the 8XY3 instruction - XOR Vx, Vy
    /// Purpose: set Vx = Vx XOR Vy
    pub(super) fn execute_8XY3(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        self.variable_registers[x] ^= self.variable_registers[y];
        if self.quirks.logic_ops_reset_flag {
            self.variable_registers[0xF] = 0x0;
        }
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the 8XY4 instruction - ADD Vx, Vy
    /// Purpose: set Vx = Vx + Vy (wrapping), set Vf = carry
    pub(super) fn execute_8XY4(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        let (result, carry) =
            self.variable_registers[x].overflowing_add(self.variable_registers[y]);
        // The flag is written after the result so Vf holds the carry even when x is 0xF
        self.variable_registers[x] = result;
        self.variable_registers[0xF] = carry as u8;
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the 8XY5 instruction - SUB Vx, Vy
    /// Purpose: set Vx = Vx - Vy (wrapping), set Vf = NOT borrow
    pub(super) fn execute_8XY5(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        let not_borrow: u8 = (self.variable_registers[x] >= self.variable_registers[y]) as u8;
        self.variable_registers[x] =
            self.variable_registers[x].wrapping_sub(self.variable_registers[y]);
        self.variable_registers[0xF] = not_borrow;
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the 8XY6 instruction - SHR Vx {, Vy}
    /// Purpose: shift right by one bit, set Vf = the shifted-out bit.  Whether the value
    /// shifted is Vy (original COSMAC VIP) or Vx in place (CHIP-48 onwards) depends on
    /// the configured [ShiftSource] quirk
    pub(super) fn execute_8XY6(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        let source: u8 = match self.quirks.shift_source {
            ShiftSource::Vx => self.variable_registers[x],
            ShiftSource::Vy => self.variable_registers[y],
        };
        self.variable_registers[x] = source >> 1;
        self.variable_registers[0xF] = source & 0x1;
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the 8XY7 instruction - SUBN Vx, Vy
    /// Purpose: set Vx = Vy - Vx (wrapping), set Vf = NOT borrow
    pub(super) fn execute_8XY7(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        let not_borrow: u8 = (self.variable_registers[y] >= self.variable_registers[x]) as u8;
        self.variable_registers[x] =
            self.variable_registers[y].wrapping_sub(self.variable_registers[x]);
        self.variable_registers[0xF] = not_borrow;
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the 8XYE instruction - SHL Vx {, Vy}
    /// Purpose: shift left by one bit, set Vf = the shifted-out bit.  Whether the value
    /// shifted is Vy (original COSMAC VIP) or Vx in place (CHIP-48 onwards) depends on
    /// the configured [ShiftSource] quirk
    pub(super) fn execute_8XYE(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        let source: u8 = match self.quirks.shift_source {
            ShiftSource::Vx => self.variable_registers[x],
            ShiftSource::Vy => self.variable_registers[y],
        };
        self.variable_registers[x] = source << 1;
        self.variable_registers[0xF] = source >> 7;
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the 9XY0 instruction - SNE Vx, Vy
    /// Purpose: skip next instruction if Vx != Vy
    pub(super) fn execute_9XY0(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        if self.variable_registers[x] != self.variable_registers[y] {
            self.program_counter += 0x4;
        } else {
            self.program_counter += 0x2;
        }
        Ok(())
    }

    /// Executes the ANNN instruction - LD I, addr
    /// Purpose: set I = NNN
    pub(super) fn execute_ANNN(&mut self, nnn: u16) -> Result<(), ErrorDetail> {
        self.index_register = nnn;
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the BNNN instruction - JP V0, addr
    /// Purpose: jump to location NNN + V0
    pub(super) fn execute_BNNN(&mut self, nnn: u16) -> Result<(), ErrorDetail> {
        self.program_counter = nnn + self.variable_registers[0x0] as u16;
        Ok(())
    }

    /// Executes the CXNN instruction - RND Vx, byte
    /// Purpose: set Vx = random byte AND NN
    pub(super) fn execute_CXNN(&mut self, x: usize, nn: u8) -> Result<(), ErrorDetail> {
        self.variable_registers[x] = self.rng.gen::<u8>() & nn;
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the DXYN instruction - DRW Vx, Vy, nibble
    /// Purpose: draw the N-byte sprite starting at memory location I at display
    /// coordinate (Vx, Vy), set Vf = collision
    pub(super) fn execute_DXYN(&mut self, x: usize, y: usize, n: u8) -> Result<(), ErrorDetail> {
        if n == 0x0 {
            // A zero-height sprite draws nothing and cannot collide
            self.variable_registers[0xF] = 0x0;
            self.program_counter += 0x2;
            return Ok(());
        }
        let x_start_pixel: usize = self.variable_registers[x] as usize;
        let y_start_pixel: usize = self.variable_registers[y] as usize;
        self.variable_registers[0xF] = 0x0;
        let sprite: &[u8] = self
            .memory
            .read_bytes(self.index_register as usize, n as usize)?;
        let collision: bool = self
            .frame_buffer
            .draw_sprite(x_start_pixel, y_start_pixel, sprite);
        self.variable_registers[0xF] = collision as u8;
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the EX9E instruction - SKP Vx
    /// Purpose: skip next instruction if the key with the value of Vx is pressed
    pub(super) fn execute_EX9E(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if self.keypad.is_key_pressed(self.variable_registers[x])? {
            self.program_counter += 0x4;
        } else {
            self.program_counter += 0x2;
        }
        Ok(())
    }

    /// Executes the EXA1 instruction - SKNP Vx
    /// Purpose: skip next instruction if the key with the value of Vx is not pressed
    pub(super) fn execute_EXA1(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if !self.keypad.is_key_pressed(self.variable_registers[x])? {
            self.program_counter += 0x4;
        } else {
            self.program_counter += 0x2;
        }
        Ok(())
    }

    /// Executes the FX07 instruction - LD Vx, DT
    /// Purpose: set Vx = delay timer value
    pub(super) fn execute_FX07(&mut self, x: usize) -> Result<(), ErrorDetail> {
        self.variable_registers[x] = self.delay_timer;
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the FX0A instruction - LD Vx, K
    /// Purpose: wait for a key press-then-release, store the key ordinal in Vx
    ///
    /// This stalls the processor rather than blocking: the program counter is left
    /// addressing this instruction and the processor enters
    /// [ProcessorStatus::WaitingForKeypress], in which state each subsequent
    /// [Processor::step()] call polls the keypad for resolution of the wait
    pub(super) fn execute_FX0A(&mut self, x: usize) -> Result<(), ErrorDetail> {
        self.waiting_register = x;
        self.waiting_keypad_snapshot = self.keypad.state();
        self.keys_pressed_since_wait.clear();
        self.status = ProcessorStatus::WaitingForKeypress;
        Ok(())
    }

    /// Executes the FX15 instruction - LD DT, Vx
    /// Purpose: set delay timer = Vx
    pub(super) fn execute_FX15(&mut self, x: usize) -> Result<(), ErrorDetail> {
        self.delay_timer = self.variable_registers[x];
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the FX18 instruction - LD ST, Vx
    /// Purpose: set sound timer = Vx
    pub(super) fn execute_FX18(&mut self, x: usize) -> Result<(), ErrorDetail> {
        self.sound_timer = self.variable_registers[x];
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the FX1E instruction - ADD I, Vx
    /// Purpose: set I = I + Vx.  Standard CHIP-8 leaves Vf untouched; with the
    /// relevant quirk enabled, Vf is set when the result leaves the addressable
    /// 0xFFF range (the "Amiga" convention, relied upon by at least one known ROM)
    pub(super) fn execute_FX1E(&mut self, x: usize) -> Result<(), ErrorDetail> {
        self.index_register = self
            .index_register
            .wrapping_add(self.variable_registers[x] as u16);
        if self.quirks.index_add_sets_flag {
            self.variable_registers[0xF] = (self.index_register > 0xFFF) as u8;
        }
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the FX29 instruction - LD F, Vx
    /// Purpose: set I = location of the font sprite for the hex digit held in Vx
    pub(super) fn execute_FX29(&mut self, x: usize) -> Result<(), ErrorDetail> {
        let digit: u8 = self.variable_registers[x];
        // Only the sixteen hex digit glyphs exist; anything else has no sprite address
        if digit > 0xF {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("digit".to_string(), digit as usize);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        self.index_register =
            (self.font_start_address + digit as usize * self.font.char_size()) as u16;
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the FX33 instruction - LD B, Vx
    /// Purpose: store the binary-coded decimal representation of Vx in memory locations
    /// I (hundreds), I+1 (tens) and I+2 (ones)
    pub(super) fn execute_FX33(&mut self, x: usize) -> Result<(), ErrorDetail> {
        let value: u8 = self.variable_registers[x];
        let address: usize = self.index_register as usize;
        self.memory.write_byte(address, value / 100)?;
        self.memory.write_byte(address + 1, (value / 10) % 10)?;
        self.memory.write_byte(address + 2, value % 10)?;
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the FX55 instruction - LD [I], Vx
    /// Purpose: store registers V0 through Vx in memory starting at location I.
    /// With the relevant quirk enabled, I is left incremented by X + 1 afterwards
    /// (original COSMAC VIP behaviour); otherwise I is unmodified
    pub(super) fn execute_FX55(&mut self, x: usize) -> Result<(), ErrorDetail> {
        let address: usize = self.index_register as usize;
        for i in 0x0..=x {
            self.memory.write_byte(address + i, self.variable_registers[i])?;
        }
        if self.quirks.increment_index_on_reg_dump {
            self.index_register += x as u16 + 0x1;
        }
        self.program_counter += 0x2;
        Ok(())
    }

    /// Executes the FX65 instruction - LD Vx, [I]
    /// Purpose: load registers V0 through Vx from memory starting at location I.
    /// With the relevant quirk enabled, I is left incremented by X + 1 afterwards
    /// (original COSMAC VIP behaviour); otherwise I is unmodified
    pub(super) fn execute_FX65(&mut self, x: usize) -> Result<(), ErrorDetail> {
        let address: usize = self.index_register as usize;
        for i in 0x0..=x {
            self.variable_registers[i] = self.memory.read_byte(address + i)?;
        }
        if self.quirks.increment_index_on_reg_dump {
            self.index_register += x as u16 + 0x1;
        }
        self.program_counter += 0x2;
        Ok(())
    }
}
