#![allow(non_snake_case)]

use super::display::Display;
use super::error::{ErrorDetail, OchoError};
use super::font::Font;
use super::instruction::Instruction;
use super::keypad::{Keypad, KEY_COUNT};
use super::memory::Memory;
use super::options::{Options, Quirks};
use super::program::Program;
use super::stack::Stack;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp;

mod execute; // separate sub-module for all the instruction execution methods

/// The number of microseconds that should pass inbetween decrements of the delay and
/// sound timers (one tick of a 60hz clock).
const TIMER_TICK_INTERVAL_MICROSECONDS: u64 = 16_667;
/// The number of variable registers available.
const VARIABLE_REGISTER_COUNT: usize = 16;

/// An enum used to keep track of the processor execution status.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ProcessorStatus {
    /// The processor has been instantiated and font data loaded
    Initialised,
    /// A program has been loaded into the processor's memory
    ProgramLoaded,
    /// The program is being executed (the fetch->decode->execute cycle has begun)
    Running,
    /// The processor is stalled waiting for a keypress (instruction FX0A)
    WaitingForKeypress,
    /// The processor is in an error state, having generated an [OchoError]
    Crashed,
}

/// An enum describing the result of a successful call to [Processor::step()].
#[derive(Debug, PartialEq)]
pub enum StepOutcome {
    /// An instruction completed this cycle
    Executed {
        /// True if the display frame buffer was updated this cycle
        display_updated: bool,
    },
    /// The processor is stalled on an FX0A keypress wait; no instruction completed.
    /// Machine state other than the cycle counter is unchanged, and the hosting
    /// application should feed in key events and call [Processor::step()] again
    WaitingForKey,
}

/// An enum used to indicate which variant of [StateSnapshot] should be returned when a call is
/// made to [Processor::export_state_snapshot()].
pub enum StateSnapshotVerbosity {
    /// Only the frame buffer state will be reported
    Minimal,
    /// The frame buffer, registers, stack and memory state will all be reported
    Extended,
}

/// An enum with variants representing the different Ocho state snapshots that can be
/// returned to hosting applications for processing
#[derive(Debug, PartialEq)]
pub enum StateSnapshot {
    /// Minimal snapshot containing only the frame buffer state
    MinimalSnapshot {
        frame_buffer: Display,
        status: ProcessorStatus,
    },
    /// Extended snapshot containing the frame buffer state along with all registers,
    /// stack and memory
    ExtendedSnapshot {
        frame_buffer: Display,
        status: ProcessorStatus,
        stack: Stack,
        memory: Memory,
        program_counter: u16,
        index_register: u16,
        variable_registers: [u8; VARIABLE_REGISTER_COUNT],
        delay_timer: u8,
        sound_timer: u8,
        cycles: usize,
        quirks: Quirks,
    },
}

/// An abstraction of the CHIP-8 processor, and the core public interface to the Ocho crate.
///
/// This struct holds representations of all CHIP-8 sub-components, and exposes methods through
/// which a program can be loaded to memory and executed one cycle at a time, as well as methods
/// for supplying input to the processor (in the form of keypresses and timer ticks) and output
/// to the host application (in the form of a bitmapped display).
///
/// The processor performs no I/O and keeps no clock of its own; the hosting application drives
/// execution by calling [Processor::step()] at whatever rate it chooses and
/// [Processor::tick_timers()] with measured elapsed time.
#[derive(Debug)]
pub struct Processor {
    // CHIP-8 COMPONENT STATE FIELDS
    frame_buffer: Display, // The display frame buffer
    stack: Stack,          // The call stack (holds return addresses for subroutines)
    memory: Memory,        // The system memory
    program_counter: u16, // The program counter register (points to next opcode location in memory)
    index_register: u16,  // The index register (used to point to memory addresses)
    variable_registers: [u8; VARIABLE_REGISTER_COUNT], // General purpose registers
    delay_timer: u8,      // Delay timer, decremented at 60hz via tick_timers() when non-zero
    sound_timer: u8,      // Sound timer, decremented at 60hz via tick_timers() when non-zero
    cycles: usize,        // The number of processor cycles that have been executed
    // ADDITIONAL STATE FIELDS
    keypad: Keypad, // A representation of the state (pressed/not pressed) of each key
    waiting_register: usize, // The Vx register in which an FX0A wait will store its key
    waiting_keypad_snapshot: [bool; KEY_COUNT], // Keypad state as at the start of an FX0A wait
    keys_pressed_since_wait: Vec<u8>, // Keys pressed (but not yet released) during FX0A wait
    status: ProcessorStatus, // The current execution status of the processor
    rng: StdRng,    // The random number generator used by the CXNN instruction
    // CONFIG AND SETUP FIELDS
    font: Font,       // The font loaded into the processor (only used during initialisation)
    program: Program, // The program loaded into the processor (only used during initialisation)
    font_start_address: usize, // The start address in memory at which the font is loaded
    program_start_address: usize, // The start address in memory at which the program is loaded
    quirks: Quirks,   // The interpreter divergence flags to emulate
}

impl Processor {
    /// Constructor/builder function that returns a freshly-initialised [Processor] instance
    /// with the supplied program data loaded into memory ready for execution.
    ///
    /// # Arguments
    ///
    /// * `program` - a [Program] instance holding the bytes of the ROM to be executed
    /// * `options` - an [Options] instance holding Ocho start-up configuration information
    pub fn initialise_and_load(program: Program, options: Options) -> Result<Self, OchoError> {
        let rng: StdRng = match options.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut processor = Processor {
            frame_buffer: Display::new(),
            stack: Stack::new(),
            memory: Memory::new(),
            program_counter: options.program_start_address,
            index_register: 0x0,
            variable_registers: [0x0; VARIABLE_REGISTER_COUNT],
            delay_timer: 0x0,
            sound_timer: 0x0,
            cycles: 0,
            keypad: Keypad::new(),
            waiting_register: 0x0,
            waiting_keypad_snapshot: [false; KEY_COUNT],
            keys_pressed_since_wait: Vec::new(),
            status: ProcessorStatus::Initialised,
            rng,
            font: Font::default(),
            program,
            font_start_address: options.font_start_address as usize,
            program_start_address: options.program_start_address as usize,
            quirks: options.quirks,
        };
        if let Err(e) = processor.load_font_data() {
            return Err(processor.crash(None, e));
        }
        if let Err(e) = processor.load_program() {
            return Err(processor.crash(None, e));
        }
        processor.status = ProcessorStatus::ProgramLoaded;
        Ok(processor)
    }

    /// Returns a copy of the current state of Ocho.
    ///
    /// The minimal level of state reporting returns just a copy of the [Display] frame buffer
    /// instance, from which the bitmapped pixel state can be interrogated for rendering
    /// purposes.
    ///
    /// The extended level of state reporting returns a copy of the [Display] frame buffer
    /// instance in addition to a copy of all registers and timers, the [Stack] and the [Memory].
    ///
    /// # Arguments
    ///
    /// * `verbosity` - the amount of state that should be returned
    pub fn export_state_snapshot(&self, verbosity: StateSnapshotVerbosity) -> StateSnapshot {
        match verbosity {
            StateSnapshotVerbosity::Minimal => StateSnapshot::MinimalSnapshot {
                frame_buffer: self.frame_buffer.clone(),
                status: self.status,
            },
            StateSnapshotVerbosity::Extended => StateSnapshot::ExtendedSnapshot {
                frame_buffer: self.frame_buffer.clone(),
                status: self.status,
                stack: self.stack.clone(),
                memory: self.memory.clone(),
                program_counter: self.program_counter,
                index_register: self.index_register,
                variable_registers: self.variable_registers,
                delay_timer: self.delay_timer,
                sound_timer: self.sound_timer,
                cycles: self.cycles,
                quirks: self.quirks,
            },
        }
    }

    /// Returns a reference to the display frame buffer, for rendering by the hosting
    /// application.
    pub fn frame_buffer(&self) -> &Display {
        &self.frame_buffer
    }

    /// Returns the current execution status of the processor.
    pub fn status(&self) -> ProcessorStatus {
        self.status
    }

    /// Returns the number of processor cycles that have been executed.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Provides key press input to Ocho, by setting the state of the specified key
    /// in the internal representation to pressed / not pressed as per supplied value.
    ///
    /// # Arguments
    ///
    /// * `key` - the hex ordinal of the key (valid range 0x0 to 0xF inclusive)
    /// * `status` - the value to set for the specified key (true means pressed)
    pub fn set_key_status(&mut self, key: u8, status: bool) -> Result<(), OchoError> {
        if let Err(e) = self.keypad.set_key_status(key, status) {
            return Err(self.crash(None, e));
        }
        Ok(())
    }

    /// Re-seeds the random number generator used by the CXNN instruction, making all
    /// subsequent random draws deterministic.
    ///
    /// # Arguments
    ///
    /// * `seed` - the new seed
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Loads the processor's font data into memory.  If the font data combined with the
    /// specified start location would overlap the program area, then return an
    /// [ErrorDetail::MemoryAddressOutOfBounds].
    fn load_font_data(&mut self) -> Result<(), ErrorDetail> {
        if self.font_start_address + self.font.font_data_size() > self.program_start_address {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: (self.font_start_address + self.font.font_data_size()) as u16,
            });
        }
        self.memory
            .write_bytes(self.font_start_address, self.font.font_data())?;
        Ok(())
    }

    /// Loads the processor's program data into memory.  If the size of the program data
    /// exceeds the memory remaining above the program start address, then return an
    /// [ErrorDetail::ProgramTooLarge].  A program that exactly fills the remaining
    /// memory loads successfully.
    fn load_program(&mut self) -> Result<(), ErrorDetail> {
        let available: usize = self.memory.max_addressable_size() - self.program_start_address;
        if self.program.program_data_size() > available {
            return Err(ErrorDetail::ProgramTooLarge {
                program_size: self.program.program_data_size(),
                available,
            });
        }
        if self.program.program_data_size() > 0 {
            self.memory
                .write_bytes(self.program_start_address, self.program.program_data())?;
        }
        Ok(())
    }

    /// Helper method that "crashes" the processor when an [ErrorDetail] instance is returned
    /// from a function call, and wraps this in an appropriate [OchoError] instance (carrying
    /// the program counter and, where one had been fetched, the raw opcode) before returning.
    fn crash(&mut self, opcode: Option<u16>, inner_error: ErrorDetail) -> OchoError {
        self.status = ProcessorStatus::Crashed;
        OchoError {
            program_counter: self.program_counter,
            opcode,
            inner_error,
        }
    }

    /// Executes one iteration of the Ocho fetch -> decode -> execute cycle.  Returns a
    /// [StepOutcome] indicating whether an instruction completed (and if so whether the
    /// display frame buffer was updated), or whether the processor is stalled on an FX0A
    /// keypress wait.
    ///
    /// While stalled, each call polls the keypad state for resolution of the wait and
    /// otherwise leaves machine state (other than the cycle counter) untouched; the
    /// hosting application should keep feeding key events in via
    /// [Processor::set_key_status()] and calling this method again.
    pub fn step(&mut self) -> Result<StepOutcome, OchoError> {
        // Change processor status if appropriate
        match self.status {
            ProcessorStatus::ProgramLoaded => self.status = ProcessorStatus::Running,
            ProcessorStatus::Running | ProcessorStatus::WaitingForKeypress => {
                // no change
            }
            status @ (ProcessorStatus::Initialised | ProcessorStatus::Crashed) => {
                return Err(self.crash(None, ErrorDetail::NotReady { status }));
            }
        }
        // Increment the cycles counter
        self.cycles += 1;
        // If stalled on an FX0A keypress wait, poll the keypad for resolution instead of
        // fetching an instruction
        if self.status == ProcessorStatus::WaitingForKeypress {
            return Ok(self.resume_from_keypress_wait());
        }
        // Fetch two-byte opcode from current program counter memory location
        let opcode: u16 = match self.memory.read_two_bytes(self.program_counter as usize) {
            Ok(opcode) => opcode,
            Err(e) => return Err(self.crash(None, e)),
        };
        // Decode the opcode into an instruction, setting processor state to Crashed on error
        let instruction: Instruction = match Instruction::decode_from(opcode) {
            Ok(instruction) => instruction,
            Err(e) => return Err(self.crash(Some(opcode), e)),
        };
        // If the instruction is one that updates the display, set a local flag to true
        let display_updated: bool = matches!(
            instruction,
            Instruction::Op00E0 | Instruction::OpDXYN { .. }
        );
        // Execute the instruction, setting processor state to Crashed on error.  Each execute
        // method manages the program counter itself (advancing past the instruction, skipping,
        // or jumping as appropriate), so on error the program counter still addresses the
        // faulting instruction
        if let Err(e) = self.execute(instruction) {
            return Err(self.crash(Some(opcode), e));
        }
        // An FX0A instruction stalls the processor rather than completing
        if self.status == ProcessorStatus::WaitingForKeypress {
            return Ok(StepOutcome::WaitingForKey);
        }
        Ok(StepOutcome::Executed { display_updated })
    }

    /// Polls the keypad state for resolution of an in-progress FX0A keypress wait.
    ///
    /// The wait resolves on a full press-then-release: a key must be newly pressed after
    /// the wait began and subsequently released.  A key already held when the wait began
    /// does not qualify until released and pressed again.  On resolution, the key ordinal
    /// is stored in the waiting Vx register, the program counter finally advances past
    /// the FX0A instruction, and the processor resumes running.
    fn resume_from_keypress_wait(&mut self) -> StepOutcome {
        let current_keypad_state: [bool; KEY_COUNT] = self.keypad.state();
        for key in 0..KEY_COUNT {
            match (self.waiting_keypad_snapshot[key], current_keypad_state[key]) {
                // A key held since before the wait began has been released; a subsequent
                // re-press now qualifies
                (true, false) => self.waiting_keypad_snapshot[key] = false,
                // A key has been newly pressed during the wait; record it
                (false, true) => {
                    if !self.keys_pressed_since_wait.contains(&(key as u8)) {
                        self.keys_pressed_since_wait.push(key as u8);
                    }
                }
                _ => {}
            }
        }
        // Resolve on the first recorded key that has since been released
        for i in 0..self.keys_pressed_since_wait.len() {
            let key: u8 = self.keys_pressed_since_wait[i];
            if !current_keypad_state[key as usize] {
                self.variable_registers[self.waiting_register] = key;
                self.program_counter += 0x2;
                self.keys_pressed_since_wait.clear();
                self.status = ProcessorStatus::Running;
                return StepOutcome::Executed {
                    display_updated: false,
                };
            }
        }
        StepOutcome::WaitingForKey
    }

    /// Decrements the delay and sound timers to account for the passage of the specified
    /// amount of wall-clock time, at the CHIP-8 rate of 60hz.  The hosting application
    /// measures elapsed time and calls this alongside its [Processor::step()] loop; the
    /// processor itself never consults a clock, so execution is fully deterministic and
    /// can be driven at any pace (including in tests).
    ///
    /// Each timer decrements once per whole 60hz tick contained in the elapsed time, and
    /// stops at zero rather than wrapping.
    ///
    /// # Arguments
    ///
    /// * `elapsed_microseconds` - the wall-clock time to account for, in microseconds
    pub fn tick_timers(&mut self, elapsed_microseconds: u64) {
        let ticks: u8 =
            cmp::min(elapsed_microseconds / TIMER_TICK_INTERVAL_MICROSECONDS, 0xFF) as u8;
        self.delay_timer = self.delay_timer.saturating_sub(ticks);
        self.sound_timer = self.sound_timer.saturating_sub(ticks);
    }

    /// Returns true if the sound timer is active i.e. if the hosting application should
    /// play audio
    pub fn sound_timer_active(&self) -> bool {
        self.sound_timer > 0x0
    }

    /// Executes the passed Instruction.
    ///
    /// # Arguments
    ///
    /// * `instr` - the instruction to be executed
    fn execute(&mut self, instr: Instruction) -> Result<(), ErrorDetail> {
        match instr {
            Instruction::Op00E0 => self.execute_00E0(),
            Instruction::Op00EE => self.execute_00EE(),
            Instruction::Op0NNN { nnn } => self.execute_0NNN(nnn),
            Instruction::Op1NNN { nnn } => self.execute_1NNN(nnn),
            Instruction::Op2NNN { nnn } => self.execute_2NNN(nnn),
            Instruction::Op3XNN { x, nn } => self.execute_3XNN(x, nn),
            Instruction::Op4XNN { x, nn } => self.execute_4XNN(x, nn),
            Instruction::Op5XY0 { x, y } => self.execute_5XY0(x, y),
            Instruction::Op6XNN { x, nn } => self.execute_6XNN(x, nn),
            Instruction::Op7XNN { x, nn } => self.execute_7XNN(x, nn),
            Instruction::Op8XY0 { x, y } => self.execute_8XY0(x, y),
            Instruction::Op8XY1 { x, y } => self.execute_8XY1(x, y),
            Instruction::Op8XY2 { x, y } => self.execute_8XY2(x, y),
            Instruction::Op8XY3 { x, y } => self.execute_8XY3(x, y),
            Instruction::Op8XY4 { x, y } => self.execute_8XY4(x, y),
            Instruction::Op8XY5 { x, y } => self.execute_8XY5(x, y),
            Instruction::Op8XY6 { x, y } => self.execute_8XY6(x, y),
            Instruction::Op8XY7 { x, y } => self.execute_8XY7(x, y),
            Instruction::Op8XYE { x, y } => self.execute_8XYE(x, y),
            Instruction::Op9XY0 { x, y } => self.execute_9XY0(x, y),
            Instruction::OpANNN { nnn } => self.execute_ANNN(nnn),
            Instruction::OpBNNN { nnn } => self.execute_BNNN(nnn),
            Instruction::OpCXNN { x, nn } => self.execute_CXNN(x, nn),
            Instruction::OpDXYN { x, y, n } => self.execute_DXYN(x, y, n),
            Instruction::OpEX9E { x } => self.execute_EX9E(x),
            Instruction::OpEXA1 { x } => self.execute_EXA1(x),
            Instruction::OpFX07 { x } => self.execute_FX07(x),
            Instruction::OpFX0A { x } => self.execute_FX0A(x),
            Instruction::OpFX15 { x } => self.execute_FX15(x),
            Instruction::OpFX18 { x } => self.execute_FX18(x),
            Instruction::OpFX1E { x } => self.execute_FX1E(x),
            Instruction::OpFX29 { x } => self.execute_FX29(x),
            Instruction::OpFX33 { x } => self.execute_FX33(x),
            Instruction::OpFX55 { x } => self.execute_FX55(x),
            Instruction::OpFX65 { x } => self.execute_FX65(x),
        }
    }
}
