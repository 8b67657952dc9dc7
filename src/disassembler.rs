use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::program::Program;

/// The address at which listings begin, matching the conventional program load address
const LOAD_ADDRESS: u16 = 0x200;

/// A disassembler that renders a [Program] as a human-readable instruction listing.
///
/// The program is walked two bytes at a time and each word is classified exactly as the
/// processor would classify it during execution, then rendered as one line of the form
/// `address<TAB>opcode<TAB>mnemonic`.  Words that do not correspond to any documented
/// instruction are listed as `DATA` rather than aborting, since ROMs routinely interleave
/// sprite and table data with code.
pub struct Disassembler {
    program: Program,
}

impl Disassembler {
    /// Constructor that returns a [Disassembler] for the supplied [Program].
    ///
    /// # Arguments
    ///
    /// * `program` - the program to disassemble
    pub fn new(program: Program) -> Self {
        Disassembler { program }
    }

    /// Returns the complete listing as a newline-terminated string.  Addresses begin at
    /// the 0x200 load base.  A trailing odd byte (which can never form an instruction)
    /// is omitted from the listing.
    pub fn disassemble(&self) -> String {
        let mut listing: String = String::new();
        for (i, pair) in self.program.program_data().chunks_exact(2).enumerate() {
            let address: u16 = LOAD_ADDRESS + (i as u16) * 0x2;
            let word: u16 = ((pair[0] as u16) << 8) | (pair[1] as u16);
            match Instruction::decode_from(Opcode::new(word)) {
                Ok(instruction) => {
                    listing.push_str(&format!("{:04X}:\t{:04X}\t{}\n", address, word, instruction));
                }
                Err(_) => {
                    listing.push_str(&format!("{:04X}:\t{:04X}\tDATA\n", address, word));
                }
            }
        }
        listing
    }
}
