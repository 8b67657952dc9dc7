use crate::error::ErrorDetail;
use std::fs;
use std::path::Path;

/// An abstraction of a CHIP-8 ROM, ready for loading into the emulator.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    /// A byte vector containing the program data as loaded from the ROM.
    program_data: Vec<u8>,
}

impl Default for Program {
    /// Constructor that returns an empty [Program] instance.
    fn default() -> Self {
        Program {
            program_data: Vec::new(),
        }
    }
}

impl Program {
    /// Constructor that returns a [Program] instance representing the passed program data.
    pub fn new(data: Vec<u8>) -> Self {
        Program { program_data: data }
    }

    /// Constructor that returns a [Program] instance holding the contents of the ROM file
    /// at the specified path, or [ErrorDetail::UnloadableProgram] if it cannot be read.
    ///
    /// # Arguments
    ///
    /// * `path` - the path of the ROM file to read
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Program, ErrorDetail> {
        match fs::read(&path) {
            Ok(data) => Ok(Program::new(data)),
            Err(error) => Err(ErrorDetail::UnloadableProgram {
                reason: format!("{}: {}", path.as_ref().display(), error),
            }),
        }
    }

    /// Returns a reference to the program data held in this instance.
    pub fn program_data(&self) -> &Vec<u8> {
        &self.program_data
    }

    /// Returns the size of the instance's program data (in bytes).
    pub fn program_data_size(&self) -> usize {
        self.program_data.len()
    }
}
