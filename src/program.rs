/// An abstraction of a CHIP-8 ROM image, ready for loading into the Ocho emulator.
///
/// Reading the image from storage is the hosting application's concern; the core
/// accepts a byte vector however it was obtained.
#[derive(Debug, Default)]
pub struct Program {
    /// A byte vector containing the program data.
    program_data: Vec<u8>,
}

impl Program {
    /// Constructor that returns a [Program] instance representing the passed program data.
    pub fn new(data: Vec<u8>) -> Self {
        Program { program_data: data }
    }

    /// Returns a reference to the program data held in this instance.
    pub fn program_data(&self) -> &Vec<u8> {
        &self.program_data
    }

    /// Returns the size of the instance's program data (in bytes).
    pub(crate) fn program_data_size(&self) -> usize {
        self.program_data.len()
    }
}
