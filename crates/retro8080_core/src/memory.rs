use crate::error::MemoryError;
use crate::{Bus8080, MEMORY_SIZE};

/// Flat 64 KiB of zero-initialised RAM.
///
/// The `u16` accessors used by the CPU cannot go out of range. The `usize`
/// accessors are for host code (loaders, debuggers) and report addresses past
/// 0xFFFF as [`MemoryError::AddressOutOfRange`].
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            bytes: vec![0; MEMORY_SIZE].into_boxed_slice(),
        }
    }
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }

    pub fn try_read(&self, address: usize) -> Result<u8, MemoryError> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(MemoryError::AddressOutOfRange { address })
    }

    pub fn try_write(&mut self, address: usize, value: u8) -> Result<(), MemoryError> {
        let cell = self
            .bytes
            .get_mut(address)
            .ok_or(MemoryError::AddressOutOfRange { address })?;
        *cell = value;
        Ok(())
    }

    /// Copy a program image into memory starting at `origin`.
    ///
    /// Nothing is written if the image would run past 0xFFFF.
    pub fn load(&mut self, origin: u16, image: &[u8]) -> Result<(), MemoryError> {
        let start = origin as usize;
        let end = start + image.len();
        if end > MEMORY_SIZE {
            return Err(MemoryError::AddressOutOfRange {
                address: MEMORY_SIZE,
            });
        }
        self.bytes[start..end].copy_from_slice(image);
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Bus8080 for Memory {
    fn mem_read(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }

    fn mem_write(&mut self, addr: u16, value: u8) {
        self.write(addr, value);
    }
}
