use crate::error::ErrorDetail;

/// The size of the CHIP-8 memory space (in bytes).
const MEMORY_SIZE_BYTES: usize = 0x1000;

/// An abstraction of the CHIP-8 memory space.
#[derive(Clone, Debug, PartialEq)]
pub struct Memory {
    /// A stack-allocated array of bytes representing the entire CHIP-8 memory space
    pub bytes: [u8; MEMORY_SIZE_BYTES],
}

impl Memory {
    /// Constructor that returns a [Memory] instance initialised with all bytes 0x00.
    pub(crate) fn new() -> Self {
        Self {
            bytes: [0x0; MEMORY_SIZE_BYTES],
        }
    }

    /// Returns a copy of the byte in memory at the specified address.  If the address
    /// is outside the addressable range, returns [ErrorDetail::MemoryAddressOutOfBounds].
    ///
    /// # Arguments
    ///
    /// * `address` - the memory address at which the byte should be read
    pub fn read_byte(&self, address: usize) -> Result<u8, ErrorDetail> {
        if address >= MEMORY_SIZE_BYTES {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: address as u16,
            });
        }
        Ok(self.bytes[address])
    }

    /// Writes the passed byte to the specified memory address.  If the address is
    /// outside the addressable range, returns [ErrorDetail::MemoryAddressOutOfBounds].
    ///
    /// # Arguments
    ///
    /// * `address` - the memory address at which the byte should be written
    /// * `value` - the byte value to be written
    pub fn write_byte(&mut self, address: usize, value: u8) -> Result<(), ErrorDetail> {
        if address >= MEMORY_SIZE_BYTES {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: address as u16,
            });
        }
        Ok(self.bytes[address] = value)
    }

    /// Returns an array slice from memory as per the specified start address and
    /// number of bytes.  If the operands are such that the array slice would extend beyond
    /// addressable memory then returns [ErrorDetail::MemoryAddressOutOfBounds].
    ///
    /// # Arguments
    ///
    /// * `start_address` - the memory address at the start of the range from which to read
    /// * `num_bytes` - the number of bytes to read from memory
    pub fn read_bytes(&self, start_address: usize, num_bytes: usize) -> Result<&[u8], ErrorDetail> {
        let final_address: usize = start_address + num_bytes - 1;
        if final_address >= MEMORY_SIZE_BYTES {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: final_address as u16,
            });
        }
        Ok(&self.bytes[start_address..(final_address + 1)])
    }

    /// Returns a 16-bit unsigned integer constructed by reading two consecutive bytes from
    /// memory starting from the specified address, most-significant byte first.  In the
    /// unlikely event that the second byte would fall outside the addressable memory space,
    /// this returns [ErrorDetail::MemoryAddressOutOfBounds].
    ///
    /// The method is generally used as a convenience for fetching opcodes from memory, as
    /// CHIP-8 opcodes are 16-bits in size.
    ///
    /// # Arguments
    ///
    /// * `start_address` - the memory address of the first (most significant) byte to read
    pub fn read_two_bytes(&self, start_address: usize) -> Result<u16, ErrorDetail> {
        if start_address + 1 >= MEMORY_SIZE_BYTES {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: start_address as u16,
            });
        }
        Ok(((self.bytes[start_address] as u16) << 8) | self.bytes[start_address + 1] as u16)
    }

    /// Writes the passed byte array slice to memory starting at the specified address.
    /// If the operands are such that the operation would write to addresses extending beyond
    /// the addressable memory then returns [ErrorDetail::MemoryAddressOutOfBounds].
    ///
    /// # Arguments
    ///
    /// * `start_address` - the memory address at the start of the range to which to write
    /// * `bytes_to_write` - the array slice containing the bytes to write to memory
    pub fn write_bytes(
        &mut self,
        start_address: usize,
        bytes_to_write: &[u8],
    ) -> Result<(), ErrorDetail> {
        let final_address: usize = start_address + bytes_to_write.len() - 1;
        if final_address >= MEMORY_SIZE_BYTES {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: final_address as u16,
            });
        }
        self.bytes[start_address..=final_address].copy_from_slice(bytes_to_write);
        Ok(())
    }

    /// Returns the size of the addressable memory space in bytes
    pub fn max_addressable_size(&self) -> usize {
        MEMORY_SIZE_BYTES
    }
}
