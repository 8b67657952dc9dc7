use crate::error::ErrorDetail;

/// The total size of addressable memory (4 KiB)
pub(crate) const MEMORY_SIZE_BYTES: usize = 0x1000;

/// An abstraction of the CHIP-8 memory space, being 4 KiB of byte-addressable RAM.
///
/// All accessor methods bounds-check their address arguments and return
/// [ErrorDetail::MemoryAddressOutOfBounds] rather than panicking, so a program that
/// computes a bad address crashes the emulated machine and not the host.
#[derive(Clone, Debug, PartialEq)]
pub struct Memory {
    pub bytes: [u8; MEMORY_SIZE_BYTES],
}

impl Memory {
    /// Constructor that returns a zero-initialised [Memory] instance.
    pub(crate) fn new() -> Self {
        Memory {
            bytes: [0x0; MEMORY_SIZE_BYTES],
        }
    }

    /// Returns the byte held at the specified address.
    ///
    /// # Arguments
    ///
    /// * `address` - the address of the byte to read
    pub(crate) fn read_byte(&self, address: usize) -> Result<u8, ErrorDetail> {
        if address >= MEMORY_SIZE_BYTES {
            return Err(ErrorDetail::MemoryAddressOutOfBounds { address });
        }
        Ok(self.bytes[address])
    }

    /// Writes a byte to the specified address.
    ///
    /// # Arguments
    ///
    /// * `address` - the address to write to
    /// * `byte` - the byte to write
    pub(crate) fn write_byte(&mut self, address: usize, byte: u8) -> Result<(), ErrorDetail> {
        if address >= MEMORY_SIZE_BYTES {
            return Err(ErrorDetail::MemoryAddressOutOfBounds { address });
        }
        self.bytes[address] = byte;
        Ok(())
    }

    /// Returns a slice of the specified number of bytes beginning at the specified address.
    ///
    /// # Arguments
    ///
    /// * `start_address` - the address of the first byte to read
    /// * `num_bytes` - the number of bytes to read
    pub(crate) fn read_bytes(
        &self,
        start_address: usize,
        num_bytes: usize,
    ) -> Result<&[u8], ErrorDetail> {
        let end_address: usize = start_address + num_bytes;
        if end_address > MEMORY_SIZE_BYTES {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: end_address - 1,
            });
        }
        Ok(&self.bytes[start_address..end_address])
    }

    /// Returns two consecutive bytes beginning at the specified address, assembled into a
    /// sixteen-bit value big-endian style (first byte high).  This is the representation
    /// used when fetching opcodes.
    ///
    /// # Arguments
    ///
    /// * `start_address` - the address of the first (high) byte
    pub(crate) fn read_two_bytes(&self, start_address: usize) -> Result<u16, ErrorDetail> {
        if start_address + 1 >= MEMORY_SIZE_BYTES {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: start_address + 1,
            });
        }
        Ok(((self.bytes[start_address] as u16) << 8) | (self.bytes[start_address + 1] as u16))
    }

    /// Writes the supplied slice of bytes into memory beginning at the specified address.
    ///
    /// # Arguments
    ///
    /// * `start_address` - the address at which to write the first byte
    /// * `bytes` - the bytes to write
    pub(crate) fn write_bytes(
        &mut self,
        start_address: usize,
        bytes: &[u8],
    ) -> Result<(), ErrorDetail> {
        let end_address: usize = start_address + bytes.len();
        if end_address > MEMORY_SIZE_BYTES {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: end_address - 1,
            });
        }
        self.bytes[start_address..end_address].copy_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_memory_zeroed() {
        let memory: Memory = Memory::new();
        assert!(memory.bytes.iter().all(|&byte| byte == 0x0));
    }

    #[test]
    fn test_read_byte() {
        let mut memory: Memory = Memory::new();
        memory.bytes[0x5F2] = 0xD4;
        assert_eq!(memory.read_byte(0x5F2).unwrap(), 0xD4);
    }

    #[test]
    fn test_read_byte_error() {
        let memory: Memory = Memory::new();
        assert_eq!(
            memory.read_byte(MEMORY_SIZE_BYTES).unwrap_err(),
            ErrorDetail::MemoryAddressOutOfBounds {
                address: MEMORY_SIZE_BYTES
            }
        );
    }

    #[test]
    fn test_write_byte() {
        let mut memory: Memory = Memory::new();
        memory.write_byte(0x2A1, 0x77).unwrap();
        assert_eq!(memory.bytes[0x2A1], 0x77);
    }

    #[test]
    fn test_write_byte_error() {
        let mut memory: Memory = Memory::new();
        assert_eq!(
            memory.write_byte(MEMORY_SIZE_BYTES, 0x77).unwrap_err(),
            ErrorDetail::MemoryAddressOutOfBounds {
                address: MEMORY_SIZE_BYTES
            }
        );
    }

    #[test]
    fn test_read_bytes() {
        let mut memory: Memory = Memory::new();
        memory.bytes[0x310] = 0x01;
        memory.bytes[0x311] = 0x02;
        memory.bytes[0x312] = 0x03;
        assert_eq!(memory.read_bytes(0x310, 0x3).unwrap(), &[0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_read_bytes_empty() {
        let memory: Memory = Memory::new();
        assert_eq!(memory.read_bytes(0x310, 0x0).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn test_read_bytes_error() {
        let memory: Memory = Memory::new();
        assert_eq!(
            memory.read_bytes(MEMORY_SIZE_BYTES - 0x2, 0x3).unwrap_err(),
            ErrorDetail::MemoryAddressOutOfBounds {
                address: MEMORY_SIZE_BYTES
            }
        );
    }

    #[test]
    fn test_read_two_bytes_big_endian() {
        let mut memory: Memory = Memory::new();
        memory.bytes[0x200] = 0x6A;
        memory.bytes[0x201] = 0x02;
        assert_eq!(memory.read_two_bytes(0x200).unwrap(), 0x6A02);
    }

    #[test]
    fn test_read_two_bytes_error() {
        let memory: Memory = Memory::new();
        assert_eq!(
            memory.read_two_bytes(MEMORY_SIZE_BYTES - 0x1).unwrap_err(),
            ErrorDetail::MemoryAddressOutOfBounds {
                address: MEMORY_SIZE_BYTES
            }
        );
    }

    #[test]
    fn test_write_bytes() {
        let mut memory: Memory = Memory::new();
        memory.write_bytes(0x8FE, &[0xAB, 0xCD, 0xEF]).unwrap();
        assert!(
            memory.bytes[0x8FE] == 0xAB
                && memory.bytes[0x8FF] == 0xCD
                && memory.bytes[0x900] == 0xEF
        );
    }

    #[test]
    fn test_write_bytes_error() {
        let mut memory: Memory = Memory::new();
        assert_eq!(
            memory
                .write_bytes(MEMORY_SIZE_BYTES - 0x2, &[0xAB, 0xCD, 0xEF])
                .unwrap_err(),
            ErrorDetail::MemoryAddressOutOfBounds {
                address: MEMORY_SIZE_BYTES
            }
        );
    }

    #[test]
    fn test_write_bytes_at_limit() {
        let mut memory: Memory = Memory::new();
        memory
            .write_bytes(MEMORY_SIZE_BYTES - 0x2, &[0xAB, 0xCD])
            .unwrap();
        assert!(
            memory.bytes[MEMORY_SIZE_BYTES - 0x2] == 0xAB
                && memory.bytes[MEMORY_SIZE_BYTES - 0x1] == 0xCD
        );
    }
}
