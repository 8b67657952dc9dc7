use super::*;
use rand::Rng;
use std::collections::HashMap;

impl Processor {
    /// Executes the 00E0 instruction - CLS
    /// Purpose: clear the display
    pub(super) fn execute_00E0(&mut self) -> Result<(), ErrorDetail> {
        self.frame_buffer.clear();
        Ok(())
    }

    /// Executes the 00EE instruction - RET
    /// Purpose: return from a subroutine
    pub(super) fn execute_00EE(&mut self) -> Result<(), ErrorDetail> {
        let address: u16 = self.stack.pop()?;
        self.program_counter = address;
        Ok(())
    }

    /// Executes the 1NNN instruction - JP addr
    /// Purpose: jump to the specified address
    pub(super) fn execute_1NNN(&mut self, nnn: u16) -> Result<(), ErrorDetail> {
        // The fetch address of this instruction is two behind the already-advanced
        // program counter.  A jump targeting its own fetch address is the conventional
        // end-of-program signal, so treat it as completion rather than spinning forever.
        // A jump from elsewhere that merely lands on such an instruction still executes
        // normally and completes on the following cycle.
        let fetch_address: u16 = self.program_counter - 0x2;
        if nnn == fetch_address {
            debug!("jump-to-self at {:#05X}, program complete", fetch_address);
            self.status = ProcessorStatus::Completed;
            return Ok(());
        }
        self.program_counter = nnn;
        Ok(())
    }

    /// Executes the 2NNN instruction - CALL addr
    /// Purpose: call the subroutine at the specified address
    pub(super) fn execute_2NNN(&mut self, nnn: u16) -> Result<(), ErrorDetail> {
        // The program counter has already been advanced past this instruction, so its
        // current value is the return address
        self.stack.push(self.program_counter)?;
        self.program_counter = nnn;
        Ok(())
    }

    /// Executes the 3XNN instruction - SE Vx, byte
    /// Purpose: skip the following instruction if Vx equals the specified value
    pub(super) fn execute_3XNN(&mut self, x: usize, nn: u8) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        if self.variable_registers[x] == nn {
            self.program_counter += 0x2;
        }
        Ok(())
    }

    /// Executes the 4XNN instruction - SNE Vx, byte
    /// Purpose: skip the following instruction if Vx does not equal the specified value
    pub(super) fn execute_4XNN(&mut self, x: usize, nn: u8) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        if self.variable_registers[x] != nn {
            self.program_counter += 0x2;
        }
        Ok(())
    }

    /// Executes the 5XY0 instruction - SE Vx, Vy
    /// Purpose: skip the following instruction if Vx equals Vy
    pub(super) fn execute_5XY0(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT || y >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            operands.insert("y".to_string(), y);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        if self.variable_registers[x] == self.variable_registers[y] {
            self.program_counter += 0x2;
        }
        Ok(())
    }

    /// Executes the 6XNN instruction - LD Vx, byte
    /// Purpose: set Vx to the specified value
    pub(super) fn execute_6XNN(&mut self, x: usize, nn: u8) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        self.variable_registers[x] = nn;
        Ok(())
    }

    /// Executes the 7XNN instruction - ADD Vx, byte
    /// Purpose: add the specified value to Vx, wrapping modulo 256 without touching VF
    pub(super) fn execute_7XNN(&mut self, x: usize, nn: u8) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        self.variable_registers[x] = self.variable_registers[x].wrapping_add(nn);
        Ok(())
    }

    /// Executes the 8XY0 instruction - LD Vx, Vy
    /// Purpose: set Vx to the value of Vy
    pub(super) fn execute_8XY0(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT || y >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            operands.insert("y".to_string(), y);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        self.variable_registers[x] = self.variable_registers[y];
        Ok(())
    }

    /// Executes the 8XY1 instruction - OR Vx, Vy
    /// Purpose: set Vx to the bitwise OR of Vx and Vy
    pub(super) fn execute_8XY1(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT || y >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            operands.insert("y".to_string(), y);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        self.variable_registers[x] |= self.variable_registers[y];
        Ok(())
    }

    /// Executes the 8XY2 instruction - AND Vx, Vy
    /// Purpose: set Vx to the bitwise AND of Vx and Vy
    pub(super) fn execute_8XY2(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT || y >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            operands.insert("y".to_string(), y);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        self.variable_registers[x] &= self.variable_registers[y];
        Ok(())
    }

    /// Executes the 8XY3 instruction - XOR Vx, Vy
    /// Purpose: set Vx to the bitwise XOR of Vx and Vy
    pub(super) fn execute_8XY3(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT || y >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            operands.insert("y".to_string(), y);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        self.variable_registers[x] ^= self.variable_registers[y];
        Ok(())
    }

    /// Executes the 8XY4 instruction - ADD Vx, Vy
    /// Purpose: add Vy to Vx modulo 256, setting VF to 1 if the true sum exceeds 255
    /// and 0 otherwise
    pub(super) fn execute_8XY4(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT || y >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            operands.insert("y".to_string(), y);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        // Widen to 16 bits so the carry can be observed
        let result: u16 =
            (self.variable_registers[x] as u16) + (self.variable_registers[y] as u16);
        self.variable_registers[x] = (result & 0xFF) as u8;
        // Flag written after the result so the flag survives when x is 0xF
        self.variable_registers[0xF] = if result > 0xFF { 0x1 } else { 0x0 };
        Ok(())
    }

    /// Executes the 8XY5 instruction - SUB Vx, Vy
    /// Purpose: subtract Vy from Vx modulo 256, setting VF to 1 if no borrow occurred
    /// and 0 otherwise
    pub(super) fn execute_8XY5(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT || y >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            operands.insert("y".to_string(), y);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        let vx: u8 = self.variable_registers[x];
        let vy: u8 = self.variable_registers[y];
        self.variable_registers[x] = vx.wrapping_sub(vy);
        // Flag written after the result so the flag survives when x is 0xF
        self.variable_registers[0xF] = if vx >= vy { 0x1 } else { 0x0 };
        Ok(())
    }

    /// Executes the 8XY6 instruction - SHR Vx
    /// Purpose: shift Vx one bit right, setting VF to the shifted-out bit
    pub(super) fn execute_8XY6(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        let shifted_out_bit: u8 = self.variable_registers[x] & 0x1;
        self.variable_registers[x] >>= 0x1;
        self.variable_registers[0xF] = shifted_out_bit;
        Ok(())
    }

    /// Executes the 8XY7 instruction - SUBN Vx, Vy
    /// Purpose: set Vx to Vy minus Vx modulo 256, setting VF to 1 if no borrow occurred
    /// and 0 otherwise
    pub(super) fn execute_8XY7(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT || y >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            operands.insert("y".to_string(), y);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        let vx: u8 = self.variable_registers[x];
        let vy: u8 = self.variable_registers[y];
        self.variable_registers[x] = vy.wrapping_sub(vx);
        // Flag written after the result so the flag survives when x is 0xF
        self.variable_registers[0xF] = if vy >= vx { 0x1 } else { 0x0 };
        Ok(())
    }

    /// Executes the 8XYE instruction - SHL Vx
    /// Purpose: shift Vx one bit left, setting VF to the shifted-out bit
    pub(super) fn execute_8XYE(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        let shifted_out_bit: u8 = (self.variable_registers[x] & 0x80) >> 0x7;
        self.variable_registers[x] <<= 0x1;
        self.variable_registers[0xF] = shifted_out_bit;
        Ok(())
    }

    /// Executes the 9XY0 instruction - SNE Vx, Vy
    /// Purpose: skip the following instruction if Vx does not equal Vy
    pub(super) fn execute_9XY0(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT || y >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            operands.insert("y".to_string(), y);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        if self.variable_registers[x] != self.variable_registers[y] {
            self.program_counter += 0x2;
        }
        Ok(())
    }

    /// Executes the ANNN instruction - LD I, addr
    /// Purpose: set the index register to the specified address
    pub(super) fn execute_ANNN(&mut self, nnn: u16) -> Result<(), ErrorDetail> {
        self.index_register = nnn;
        Ok(())
    }

    /// Executes the BNNN instruction - JP V0, addr
    /// Purpose: jump to the specified address plus the value of V0
    pub(super) fn execute_BNNN(&mut self, nnn: u16) -> Result<(), ErrorDetail> {
        // A target beyond addressable memory is caught by the following fetch
        self.program_counter = nnn + (self.variable_registers[0x0] as u16);
        Ok(())
    }

    /// Executes the CXNN instruction - RND Vx, byte
    /// Purpose: set Vx to a random byte masked with the specified value
    pub(super) fn execute_CXNN(&mut self, x: usize, nn: u8) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        let mut rng = rand::thread_rng();
        self.variable_registers[x] = rng.gen::<u8>() & nn;
        Ok(())
    }

    /// Executes the DXYN instruction - DRW Vx, Vy, nibble
    /// Purpose: XOR the n-byte sprite at the index register onto the display at
    /// coordinates (Vx, Vy), setting VF to 1 if any set pixel was unset and 0 otherwise
    pub(super) fn execute_DXYN(&mut self, x: usize, y: usize, n: u8) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT || y >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            operands.insert("y".to_string(), y);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        let x_start_pixel: usize = self.variable_registers[x] as usize;
        let y_start_pixel: usize = self.variable_registers[y] as usize;
        let sprite: &[u8] = self
            .memory
            .read_bytes(self.index_register as usize, n as usize)?;
        let pixel_turned_off: bool =
            self.frame_buffer
                .draw_sprite(x_start_pixel, y_start_pixel, sprite);
        self.variable_registers[0xF] = if pixel_turned_off { 0x1 } else { 0x0 };
        Ok(())
    }

    /// Executes the EX9E instruction - SKP Vx
    /// Purpose: skip the following instruction if the key with the ordinal held in Vx
    /// is pressed
    pub(super) fn execute_EX9E(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        let key: u8 = self.variable_registers[x];
        if self.keystate.is_key_pressed(key)? {
            self.program_counter += 0x2;
            // Consume the keypress so a held key does not trigger repeated skips
            self.keystate.set_key_status(key, false)?;
        }
        Ok(())
    }

    /// Executes the EXA1 instruction - SKNP Vx
    /// Purpose: skip the following instruction if the key with the ordinal held in Vx
    /// is not pressed
    pub(super) fn execute_EXA1(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        let key: u8 = self.variable_registers[x];
        if !self.keystate.is_key_pressed(key)? {
            self.program_counter += 0x2;
        } else {
            // Consume the keypress that suppressed the skip
            self.keystate.set_key_status(key, false)?;
        }
        Ok(())
    }

    /// Executes the FX07 instruction - LD Vx, DT
    /// Purpose: set Vx to the current value of the delay timer
    pub(super) fn execute_FX07(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        self.variable_registers[x] = self.timers.lock()?.delay;
        Ok(())
    }

    /// Executes the FX0A instruction - LD Vx, K
    /// Purpose: wait for a keypress and store the pressed key's ordinal in Vx
    pub(super) fn execute_FX0A(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        match self.keystate.first_pressed_key() {
            Some(key) => {
                self.variable_registers[x] = key;
                // Consume the keypress so the next wait does not resolve instantly
                self.keystate.set_key_status(key, false)?;
                self.status = ProcessorStatus::Running;
            }
            None => {
                // Rewind the program counter so this instruction executes again next
                // cycle; the processor never blocks waiting on input
                self.program_counter -= 0x2;
                self.status = ProcessorStatus::WaitingForKeypress;
            }
        }
        Ok(())
    }

    /// Executes the FX15 instruction - LD DT, Vx
    /// Purpose: set the delay timer to the value of Vx
    pub(super) fn execute_FX15(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        self.timers.lock()?.delay = self.variable_registers[x];
        Ok(())
    }

    /// Executes the FX18 instruction - LD ST, Vx
    /// Purpose: set the sound timer to the value of Vx
    pub(super) fn execute_FX18(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        self.timers.lock()?.sound = self.variable_registers[x];
        Ok(())
    }

    /// Executes the FX1E instruction - ADD I, Vx
    /// Purpose: add the value of Vx to the index register
    pub(super) fn execute_FX1E(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        // The index register wraps modulo 2^16; VF is left untouched.  A resulting
        // address outside memory is caught when the register is next used to access it
        self.index_register = self
            .index_register
            .wrapping_add(self.variable_registers[x] as u16);
        Ok(())
    }

    /// Executes the FX29 instruction - LD F, Vx
    /// Purpose: set the index register to the address of the font glyph for the
    /// hexadecimal digit held in Vx
    pub(super) fn execute_FX29(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        let character: usize = self.variable_registers[x] as usize;
        if character >= self.font.glyph_count() {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("character".to_string(), character);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        self.index_register =
            (self.font_start_address + character * self.font.glyph_size()) as u16;
        Ok(())
    }

    /// Executes the FX33 instruction - LD B, Vx
    /// Purpose: write the three decimal digits of Vx to memory at the index register,
    /// most significant digit first
    pub(super) fn execute_FX33(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        let value: u8 = self.variable_registers[x];
        let index: usize = self.index_register as usize;
        self.memory.write_byte(index, value / 100)?;
        self.memory.write_byte(index + 1, (value % 100) / 10)?;
        self.memory.write_byte(index + 2, value % 10)?;
        Ok(())
    }

    /// Executes the FX55 instruction - LD I, Vx
    /// Purpose: store registers V0 to Vx inclusive to memory beginning at the index
    /// register, which is left unmodified
    pub(super) fn execute_FX55(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        let index: usize = self.index_register as usize;
        self.memory
            .write_bytes(index, &self.variable_registers[0x0..=x])?;
        Ok(())
    }

    /// Executes the FX65 instruction - LD Vx, I
    /// Purpose: load registers V0 to Vx inclusive from memory beginning at the index
    /// register, which is left unmodified
    pub(super) fn execute_FX65(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if x >= VARIABLE_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        let index: usize = self.index_register as usize;
        let bytes: &[u8] = self.memory.read_bytes(index, x + 1)?;
        self.variable_registers[0x0..=x].copy_from_slice(bytes);
        Ok(())
    }
}
