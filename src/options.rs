use serde_derive::{Deserialize, Serialize};

/// The default CHIP-8 program start address within memory.
const DEFAULT_PROGRAM_ADDRESS: u16 = 0x200;
/// The default CHIP-8 font start address within memory.
const DEFAULT_FONT_ADDRESS: u16 = 0x0;

/// An enum specifying which register a shift instruction (8XY6 / 8XYE) operates on.
///
/// Historic interpreters disagree: the original COSMAC VIP interpreter shifted the
/// value of Vy into Vx, whereas the CHIP-48 re-implementation (and most interpreters
/// since) shift Vx in place and ignore Vy entirely.  In both conventions Vf receives
/// the shifted-out bit of whichever register supplied the value.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShiftSource {
    /// Shift Vx in place, ignoring Vy
    Vx,
    /// Store Vy shifted by one bit into Vx
    Vy,
}

/// A set of flags covering the behaviours on which historic CHIP-8 interpreters
/// diverge.
///
/// None of these are implementation bugs to be papered over; real interpreter
/// revisions genuinely disagree, and ROMs exist that depend on either convention.
/// Each divergence is therefore an explicit, independently testable flag rather
/// than a silently hard-coded choice.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quirks {
    /// Which register the 8XY6 / 8XYE shift instructions operate on.
    pub shift_source: ShiftSource,
    /// Whether the logical instructions 8XY1 / 8XY2 / 8XY3 reset Vf to zero as a
    /// side effect (original COSMAC VIP behaviour).
    pub logic_ops_reset_flag: bool,
    /// Whether FX55 / FX65 leave the index register incremented by X + 1 after the
    /// register dump/load (original COSMAC VIP behaviour).
    pub increment_index_on_reg_dump: bool,
    /// Whether FX1E sets Vf to 1 when the index register is pushed beyond the
    /// addressable 0xFFF range (the "Amiga" convention); standard CHIP-8 leaves
    /// Vf untouched.
    pub index_add_sets_flag: bool,
    /// Whether 0NNN machine-code call opcodes (other than 00E0 / 00EE) execute as
    /// no-ops for compatibility with ROMs containing legacy COSMAC calls.  When
    /// false, such opcodes are fatal decode errors.
    pub sys_opcodes_are_noops: bool,
}

impl Default for Quirks {
    /// Constructor that returns the quirk conventions of the modern mainstream
    /// of interpreters (CHIP-48 lineage).
    fn default() -> Self {
        Quirks {
            shift_source: ShiftSource::Vx,
            logic_ops_reset_flag: false,
            increment_index_on_reg_dump: false,
            index_add_sets_flag: false,
            sys_opcodes_are_noops: false,
        }
    }
}

impl Quirks {
    /// Constructor that returns the quirk conventions of the original COSMAC VIP
    /// CHIP-8 interpreter.
    pub fn original_chip8() -> Self {
        Quirks {
            shift_source: ShiftSource::Vy,
            logic_ops_reset_flag: true,
            increment_index_on_reg_dump: true,
            index_add_sets_flag: false,
            sys_opcodes_are_noops: true,
        }
    }
}

/// A struct to allow specification of Ocho start-up parameters.
///
/// Configuration covers the memory layout (program and font start addresses), the
/// [Quirks] flag set to emulate, and an optional random number generator seed for
/// fully deterministic execution.  An instance is passed to
/// [Processor::initialise_and_load()](crate::processor::Processor::initialise_and_load)
/// when instantiating [Processor](crate::Processor).
///
/// [Options] serializes via serde, so hosting applications can persist and reload
/// named configuration profiles (see [Options::to_json] / [Options::from_json]).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// The location in memory at which the program is loaded (and program counter set).
    pub program_start_address: u16,
    /// The location in memory at which the system font is loaded.
    pub font_start_address: u16,
    /// The interpreter divergence flags to emulate.
    pub quirks: Quirks,
    /// A fixed seed for the random number generator; when `None` the generator is
    /// seeded from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for Options {
    /// Constructor that returns an [Options] instance using typical default settings.
    fn default() -> Self {
        Options {
            program_start_address: DEFAULT_PROGRAM_ADDRESS,
            font_start_address: DEFAULT_FONT_ADDRESS,
            quirks: Quirks::default(),
            rng_seed: None,
        }
    }
}

impl Options {
    /// Serializes this instance to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes an [Options] instance from a JSON string.
    ///
    /// # Arguments
    ///
    /// * `json` - the JSON representation, as produced by [Options::to_json]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_memory_layout() {
        let options: Options = Options::default();
        assert!(options.program_start_address == 0x200 && options.font_start_address == 0x0);
    }

    #[test]
    fn test_default_quirks_modern() {
        let quirks: Quirks = Quirks::default();
        assert!(
            quirks.shift_source == ShiftSource::Vx
                && !quirks.logic_ops_reset_flag
                && !quirks.increment_index_on_reg_dump
                && !quirks.index_add_sets_flag
                && !quirks.sys_opcodes_are_noops
        );
    }

    #[test]
    fn test_original_chip8_quirks() {
        let quirks: Quirks = Quirks::original_chip8();
        assert!(
            quirks.shift_source == ShiftSource::Vy
                && quirks.logic_ops_reset_flag
                && quirks.increment_index_on_reg_dump
                && quirks.sys_opcodes_are_noops
        );
    }

    #[test]
    fn test_json_round_trip() {
        let mut options: Options = Options::default();
        options.quirks = Quirks::original_chip8();
        options.rng_seed = Some(0xC0FFEE);
        let json: String = options.to_json().unwrap();
        assert_eq!(Options::from_json(&json).unwrap(), options);
    }

    #[test]
    fn test_from_json_invalid_error() {
        assert!(Options::from_json("not json").is_err());
    }
}
