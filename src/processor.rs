#![allow(non_snake_case)]

use crate::display::Display;
use crate::error::{ErrorDetail, OchoError};
use crate::font::Font;
use crate::instruction::Instruction;
use crate::keystate::KeyState;
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::options::Options;
use crate::program::Program;
use crate::stack::Stack;
use crate::timer::{TimerClock, Timers};
use log::{debug, error};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

mod execute; // separate sub-module for all the instruction execution methods

/// The number of variable registers
const VARIABLE_REGISTER_COUNT: usize = 16;

/// An enum representing the current state of the processor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProcessorStatus {
    /// The processor has been instantiated but memory is empty
    StartingUp,
    /// The system font has been loaded into memory
    Initialised,
    /// The program has been loaded into memory and the processor is ready to run
    ProgramLoaded,
    /// The processor is executing cycles
    Running,
    /// Execution is paused pending a keypress
    WaitingForKeypress,
    /// The program signalled completion by jumping to its own address
    Completed,
    /// An unrecoverable error occurred and the processor has stopped
    Crashed,
}

/// An enum for specifying the level of detail of an exported state snapshot.
pub enum StateSnapshotVerbosity {
    /// Only the frame buffer and processor status are exported
    Minimal,
    /// All processor state is exported, including memory and register contents
    Extended,
}

/// An exported copy of processor state, at one of two levels of detail.
///
/// The minimal form carries just enough for a hosting application to render a frame;
/// the extended form is a full dump suitable for debuggers and crash reports.
#[derive(Debug, PartialEq)]
pub enum StateSnapshot {
    MinimalSnapshot {
        frame_buffer: Display,
        status: ProcessorStatus,
    },
    ExtendedSnapshot {
        frame_buffer: Display,
        status: ProcessorStatus,
        program_counter: u16,
        index_register: u16,
        variable_registers: [u8; VARIABLE_REGISTER_COUNT],
        delay_timer: u8,
        sound_timer: u8,
        stack: Stack,
        memory: Memory,
        cycles: usize,
    },
}

/// An emulation of a CHIP-8 processor together with its memory, frame buffer, call stack,
/// keypad state and timers.
///
/// The hosting application drives emulation one fetch->decode->execute cycle at a time
/// through [execute_cycle()](Processor::execute_cycle), feeds keypad transitions in through
/// [set_key_status()](Processor::set_key_status), and reads the display (or the whole
/// machine state) back out through
/// [export_state_snapshot()](Processor::export_state_snapshot).  The delay and sound
/// timers are decremented at 60 Hz by a clock thread owned by this struct; the thread is
/// signalled and joined when the processor completes, crashes or is dropped, so no timer
/// activity ever outlives the processor.
#[derive(Debug)]
pub struct Processor {
    /// The frame buffer to which sprites are drawn
    frame_buffer: Display,
    /// The call stack of subroutine return addresses
    stack: Stack,
    /// The 4 KiB memory space, holding the font, the program and its working data
    memory: Memory,
    /// The address of the next instruction to fetch
    program_counter: u16,
    /// The index register, used to address memory for draw and bulk load/store operations
    index_register: u16,
    /// The sixteen variable registers V0 to VF
    variable_registers: [u8; VARIABLE_REGISTER_COUNT],
    /// The delay and sound timers, shared with the clock thread
    timers: Arc<Mutex<Timers>>,
    /// The clock thread that ticks the timers at 60 Hz
    timer_clock: TimerClock,
    /// The number of cycles executed since the last (re)initialisation
    cycles: usize,
    /// The current state of the keypad as reported by the hosting application
    keystate: KeyState,
    /// The current lifecycle state of the processor
    status: ProcessorStatus,
    /// The system font, loaded into memory during initialisation
    font: Font,
    /// The program, loaded into memory during initialisation and kept for resets
    program: Program,
    /// The address at which the font is loaded
    font_start_address: usize,
    /// The address at which the program is loaded
    program_start_address: usize,
    /// The number of cycles to execute per second
    processor_speed_hertz: u64,
    /// The moment the previous cycle finished, used to pace execution
    last_execution_cycle_complete: Instant,
}

impl Processor {
    /// Constructor that instantiates a [Processor] per the supplied [Options], loads the
    /// system font and the supplied [Program] into memory, and starts the timer clock
    /// thread.  The returned processor is ready for its first
    /// [execute_cycle()](Processor::execute_cycle) call.
    ///
    /// # Arguments
    ///
    /// * `program` - the program to load
    /// * `options` - the start-up parameters to apply
    pub fn initialise_and_load(program: Program, options: Options) -> Result<Self, OchoError> {
        let timers: Arc<Mutex<Timers>> = Arc::new(Mutex::new(Timers::new()));
        let timer_clock: TimerClock = TimerClock::start(Arc::clone(&timers));
        let mut processor: Processor = Processor {
            frame_buffer: Display::new(),
            stack: Stack::new(),
            memory: Memory::new(),
            program_counter: options.program_start_address,
            index_register: 0x0,
            variable_registers: [0x0; VARIABLE_REGISTER_COUNT],
            timers,
            timer_clock,
            cycles: 0x0,
            keystate: KeyState::new(),
            status: ProcessorStatus::StartingUp,
            font: Font::new(),
            program,
            font_start_address: options.font_start_address as usize,
            program_start_address: options.program_start_address as usize,
            processor_speed_hertz: options.processor_speed_hertz,
            last_execution_cycle_complete: Instant::now(),
        };
        if let Err(error) = processor.load_font_data() {
            return Err(processor.crash(processor.program_counter, 0x0, error));
        }
        processor.status = ProcessorStatus::Initialised;
        if let Err(error) = processor.load_program() {
            return Err(processor.crash(processor.program_counter, 0x0, error));
        }
        processor.status = ProcessorStatus::ProgramLoaded;
        debug!(
            "loaded {} byte program at {:#05X}",
            processor.program.program_data_size(),
            processor.program_start_address
        );
        Ok(processor)
    }

    /// Reinitialises the processor to the state produced by
    /// [initialise_and_load()](Processor::initialise_and_load): memory, registers, stack,
    /// frame buffer, keypad and timers are all cleared and the font and program reloaded.
    /// The timer clock thread is stopped and a fresh one started.
    pub fn reset(&mut self) -> Result<(), OchoError> {
        self.timer_clock.stop();
        self.frame_buffer.clear();
        self.stack = Stack::new();
        self.memory = Memory::new();
        self.program_counter = self.program_start_address as u16;
        self.index_register = 0x0;
        self.variable_registers = [0x0; VARIABLE_REGISTER_COUNT];
        self.timers = Arc::new(Mutex::new(Timers::new()));
        self.timer_clock = TimerClock::start(Arc::clone(&self.timers));
        self.cycles = 0x0;
        self.keystate = KeyState::new();
        self.status = ProcessorStatus::StartingUp;
        if let Err(error) = self.load_font_data() {
            return Err(self.crash(self.program_counter, 0x0, error));
        }
        self.status = ProcessorStatus::Initialised;
        if let Err(error) = self.load_program() {
            return Err(self.crash(self.program_counter, 0x0, error));
        }
        self.status = ProcessorStatus::ProgramLoaded;
        debug!("processor reset");
        Ok(())
    }

    /// Returns the current lifecycle state of the processor.
    pub fn status(&self) -> ProcessorStatus {
        self.status
    }

    /// Returns the configured processor speed in cycles per second.
    pub fn processor_speed(&self) -> u64 {
        self.processor_speed_hertz
    }

    /// Sets the processor speed in cycles per second.  A speed of zero disables pacing
    /// entirely.
    ///
    /// # Arguments
    ///
    /// * `speed_hertz` - the new speed
    pub fn set_processor_speed(&mut self, speed_hertz: u64) {
        self.processor_speed_hertz = speed_hertz;
    }

    /// Returns true while the sound timer is non-zero, during which the hosting
    /// application should sound a tone.
    pub fn sound_timer_active(&self) -> bool {
        self.read_timers().1 > 0x0
    }

    /// Records a keypad key transition as reported by the hosting application.
    ///
    /// # Arguments
    ///
    /// * `key` - the hex ordinal of the key (valid range 0x0 to 0xF inclusive)
    /// * `status` - boolean representing key state (true meaning pressed)
    pub fn set_key_status(&mut self, key: u8, status: bool) -> Result<(), OchoError> {
        if let Err(error) = self.keystate.set_key_status(key, status) {
            return Err(self.crash(self.program_counter, 0x0, error));
        }
        Ok(())
    }

    /// Exports a copy of the current processor state at the specified level of detail.
    ///
    /// # Arguments
    ///
    /// * `verbosity` - the level of detail to export
    pub fn export_state_snapshot(&self, verbosity: StateSnapshotVerbosity) -> StateSnapshot {
        match verbosity {
            StateSnapshotVerbosity::Minimal => StateSnapshot::MinimalSnapshot {
                frame_buffer: self.frame_buffer.clone(),
                status: self.status,
            },
            StateSnapshotVerbosity::Extended => {
                let (delay_timer, sound_timer) = self.read_timers();
                StateSnapshot::ExtendedSnapshot {
                    frame_buffer: self.frame_buffer.clone(),
                    status: self.status,
                    program_counter: self.program_counter,
                    index_register: self.index_register,
                    variable_registers: self.variable_registers,
                    delay_timer,
                    sound_timer,
                    stack: self.stack.clone(),
                    memory: self.memory.clone(),
                    cycles: self.cycles,
                }
            }
        }
    }

    /// Carries out one complete fetch->decode->execute cycle, returning true if the cycle
    /// modified the frame buffer (meaning the hosting application should redraw).
    ///
    /// Any failure crashes the processor: the returned [OchoError] carries the failure
    /// condition along with the program counter and opcode in play and a full state
    /// snapshot, and the timer clock thread is stopped.  Once the processor reports
    /// [ProcessorStatus::Completed] or [ProcessorStatus::Crashed], further calls return an
    /// [ErrorDetail::NotRunnable] error.
    pub fn execute_cycle(&mut self) -> Result<bool, OchoError> {
        match self.status {
            ProcessorStatus::ProgramLoaded
            | ProcessorStatus::Running
            | ProcessorStatus::WaitingForKeypress => self.status = ProcessorStatus::Running,
            ProcessorStatus::StartingUp
            | ProcessorStatus::Initialised
            | ProcessorStatus::Completed
            | ProcessorStatus::Crashed => {
                return Err(self.crash(self.program_counter, 0x0, ErrorDetail::NotRunnable))
            }
        }
        self.cycles += 1;
        // Fetch.  The program counter is advanced past the instruction before execution,
        // so jumps and skips operate on the address of the following instruction
        let fetch_address: u16 = self.program_counter;
        let opcode: u16 = match self.memory.read_two_bytes(fetch_address as usize) {
            Ok(opcode) => opcode,
            Err(error) => return Err(self.crash(fetch_address, 0x0, error)),
        };
        self.program_counter += 0x2;
        // Decode
        let instruction: Instruction = match Instruction::decode_from(Opcode::new(opcode)) {
            Ok(instruction) => instruction,
            Err(error) => return Err(self.crash(fetch_address, opcode, error)),
        };
        let display_updated: bool =
            matches!(&instruction, Instruction::Op00E0 | Instruction::OpDXYN { .. });
        // Execute
        if let Err(error) = self.execute(instruction) {
            return Err(self.crash(fetch_address, opcode, error));
        }
        if self.status == ProcessorStatus::Completed {
            self.timer_clock.stop();
        }
        // Pace execution to the configured speed, sleeping off whatever remains of this
        // cycle's time slice
        if let Some(remaining) = self
            .cycle_interval()
            .checked_sub(self.last_execution_cycle_complete.elapsed())
        {
            thread::sleep(remaining);
        }
        self.last_execution_cycle_complete = Instant::now();
        Ok(display_updated)
    }

    /// Calls the appropriate execution method for the supplied [Instruction], passing
    /// through its operands.
    ///
    /// # Arguments
    ///
    /// * `instruction` - the instruction to execute
    fn execute(&mut self, instruction: Instruction) -> Result<(), ErrorDetail> {
        match instruction {
            Instruction::Op00E0 => self.execute_00E0(),
            Instruction::Op00EE => self.execute_00EE(),
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
            Instruction::Op8XY6 { x } => self.execute_8XY6(x),
            Instruction::Op8XY7 { x, y } => self.execute_8XY7(x, y),
            Instruction::Op8XYE { x } => self.execute_8XYE(x),
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

    /// Moves the processor to [ProcessorStatus::Crashed], stops the timer clock thread,
    /// and wraps the supplied [ErrorDetail] into an [OchoError] along with the failing
    /// program counter, the opcode in play (0x0 if the failure preceded a successful
    /// fetch) and an extended state snapshot.
    fn crash(&mut self, program_counter: u16, opcode: u16, error: ErrorDetail) -> OchoError {
        self.status = ProcessorStatus::Crashed;
        self.timer_clock.stop();
        error!(
            "crashed at {:#05X} on opcode {:#06X}: {}",
            program_counter, opcode, error
        );
        OchoError {
            program_counter,
            opcode,
            inner_error: error,
            state_snapshot_dump: self.export_state_snapshot(StateSnapshotVerbosity::Extended),
        }
    }

    /// Loads the system font into memory at the configured font start address.  The font
    /// must sit entirely below the program area.
    fn load_font_data(&mut self) -> Result<(), ErrorDetail> {
        let font_end_address: usize = self.font_start_address + self.font.font_data_size();
        if font_end_address > self.program_start_address {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: font_end_address - 1,
            });
        }
        self.memory
            .write_bytes(self.font_start_address, self.font.font_data())
    }

    /// Loads the program into memory at the configured program start address.
    fn load_program(&mut self) -> Result<(), ErrorDetail> {
        self.memory
            .write_bytes(self.program_start_address, self.program.program_data())
    }

    /// Reads both timers, recovering the values even if the clock thread panicked while
    /// holding the lock (snapshots are taken on the crash path too).
    fn read_timers(&self) -> (u8, u8) {
        match self.timers.lock() {
            Ok(timers) => (timers.delay, timers.sound),
            Err(poisoned) => {
                let timers = poisoned.into_inner();
                (timers.delay, timers.sound)
            }
        }
    }

    /// Returns the time one cycle should occupy at the configured processor speed.
    fn cycle_interval(&self) -> Duration {
        if self.processor_speed_hertz == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(1_000_000 / self.processor_speed_hertz)
    }
}
