/// An immutable value type representing a single big-endian 16-bit opcode.
///
/// The opcode is split into its four constituent nibbles on construction, with accessors
/// for the operand projections the instruction set draws from them.  Both instruction
/// decoding and disassembly work from this type so the two always classify identically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Opcode {
    word: u16,
    a: u8,
    b: u8,
    c: u8,
    d: u8,
}

impl Opcode {
    pub(crate) fn new(word: u16) -> Self {
        Opcode {
            word,
            a: ((word & 0xF000) >> 12) as u8,
            b: ((word & 0x0F00) >> 8) as u8,
            c: ((word & 0x00F0) >> 4) as u8,
            d: (word & 0x000F) as u8,
        }
    }

    /// Returns the original 16-bit word
    pub(crate) fn word(&self) -> u16 {
        self.word
    }

    /// Returns the first (most-significant) nibble
    pub(crate) fn a(&self) -> u8 {
        self.a
    }

    /// Returns the second nibble
    pub(crate) fn b(&self) -> u8 {
        self.b
    }

    /// Returns the third nibble
    pub(crate) fn c(&self) -> u8 {
        self.c
    }

    /// Returns the fourth (least-significant) nibble
    pub(crate) fn d(&self) -> u8 {
        self.d
    }

    /// Returns the second nibble as a variable register index (the X operand)
    pub(crate) fn x(&self) -> usize {
        self.b as usize
    }

    /// Returns the third nibble as a variable register index (the Y operand)
    pub(crate) fn y(&self) -> usize {
        self.c as usize
    }

    /// Returns the low byte (the NN operand)
    pub(crate) fn byte(&self) -> u8 {
        (self.c << 4) | self.d
    }

    /// Returns the low 12 bits (the NNN operand)
    pub(crate) fn address(&self) -> u16 {
        self.word & 0x0FFF
    }

    /// Returns the fourth nibble (the N operand)
    pub(crate) fn nibble(&self) -> u8 {
        self.d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibble_split() {
        let opcode: Opcode = Opcode::new(0xD2F7);
        assert!(
            opcode.a() == 0xD && opcode.b() == 0x2 && opcode.c() == 0xF && opcode.d() == 0x7
        );
    }

    #[test]
    fn test_word() {
        assert_eq!(Opcode::new(0x8AB4).word(), 0x8AB4);
    }

    #[test]
    fn test_register_operands() {
        let opcode: Opcode = Opcode::new(0x5C30);
        assert!(opcode.x() == 0xC && opcode.y() == 0x3);
    }

    #[test]
    fn test_byte_operand() {
        assert_eq!(Opcode::new(0x6A9E).byte(), 0x9E);
    }

    #[test]
    fn test_address_operand() {
        assert_eq!(Opcode::new(0x1FED).address(), 0xFED);
    }

    #[test]
    fn test_nibble_operand() {
        assert_eq!(Opcode::new(0xD49B).nibble(), 0xB);
    }

    #[test]
    fn test_zero_word() {
        let opcode: Opcode = Opcode::new(0x0000);
        assert!(opcode.address() == 0x0 && opcode.byte() == 0x0 && opcode.nibble() == 0x0);
    }
}
