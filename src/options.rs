use crate::error::ErrorDetail;
use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The default number of fetch->decode->execute cycles carried out per second
const DEFAULT_PROCESSOR_SPEED_HERTZ: u64 = 720;
/// The default program start address within memory
const DEFAULT_PROGRAM_ADDRESS: u16 = 0x200;
/// The default font start address within memory
const DEFAULT_FONT_ADDRESS: u16 = 0x0;

/// A struct to allow specification of emulator start-up parameters.
///
/// An instance of this is passed to
/// [Processor::initialise_and_load()](crate::processor::Processor::initialise_and_load) when
/// instantiating [Processor](crate::Processor).  Options can also be serialised to and from
/// JSON so hosting applications can persist a configuration alongside a ROM.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// The number of complete fetch->decode->execute cycles carried out per second
    pub processor_speed_hertz: u64,
    /// The location in memory at which the program is loaded (and program counter set)
    pub program_start_address: u16,
    /// The location in memory at which the system font is loaded
    pub font_start_address: u16,
}

impl Default for Options {
    /// Constructor that returns an [Options] instance using typical default settings.
    fn default() -> Self {
        Options {
            processor_speed_hertz: DEFAULT_PROCESSOR_SPEED_HERTZ,
            program_start_address: DEFAULT_PROGRAM_ADDRESS,
            font_start_address: DEFAULT_FONT_ADDRESS,
        }
    }
}

impl Options {
    /// Constructor that returns an [Options] instance deserialised from the JSON file at
    /// the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - the location of the JSON file to load
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Options, ErrorDetail> {
        let path: &Path = path.as_ref();
        let json: String =
            fs::read_to_string(path).map_err(|error| ErrorDetail::UnloadableOptions {
                reason: format!("{}: {}", path.display(), error),
            })?;
        serde_json::from_str(&json).map_err(|error| ErrorDetail::UnloadableOptions {
            reason: format!("{}: {}", path.display(), error),
        })
    }
}
