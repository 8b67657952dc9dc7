use clap::Parser;
use crossterm::cursor;
use crossterm::event::{poll, read, Event, KeyCode};
use crossterm::terminal;
use crossterm::ExecutableCommand;
use ocho::{
    Disassembler, Display, OchoError, Options, Processor, ProcessorStatus, Program,
    StateSnapshot, StateSnapshotVerbosity,
};
use std::collections::HashMap;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// Keyboard-to-keypad map using the left-hand side of a qwerty keyboard, mirroring the
/// conventional 4x4 hex keypad layout
const KEYPAD_MAP: [(char, u8); 16] = [
    ('x', 0x0),
    ('1', 0x1),
    ('2', 0x2),
    ('3', 0x3),
    ('q', 0x4),
    ('w', 0x5),
    ('e', 0x6),
    ('a', 0x7),
    ('s', 0x8),
    ('d', 0x9),
    ('z', 0xA),
    ('c', 0xB),
    ('4', 0xC),
    ('r', 0xD),
    ('f', 0xE),
    ('v', 0xF),
];
/// How long each pass of the UI loop waits for a key event before servicing updates
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(5);
/// Terminals report key repeats but not key releases, so a held key is instead released
/// automatically once this long has passed since it was last reported pressed
const KEY_RELEASE_DELAY: Duration = Duration::from_millis(200);

#[derive(Parser)]
#[command(version, about = "A CHIP-8 emulator for the terminal")]
struct Args {
    /// Path of the ROM image to run
    rom: PathBuf,
    /// Processor speed in cycles per second (overrides any options file)
    #[arg(long)]
    speed: Option<u64>,
    /// Path of a JSON options file specifying start-up parameters
    #[arg(long)]
    options: Option<PathBuf>,
    /// Print a disassembly listing of the ROM and exit instead of running it
    #[arg(long)]
    disassemble: bool,
}

/// Messages sent from the UI thread to the thread hosting the emulated processor.
enum MessageToOcho {
    KeyPressEvent { key: u8, pressed: bool },
    Terminate,
}

/// Messages sent from the thread hosting the emulated processor back to the UI thread.
enum MessageFromOcho {
    FrameUpdate {
        snapshot: StateSnapshot,
        sound_active: bool,
    },
    ErrorReport {
        error: OchoError,
    },
}

/// Restores the terminal on drop, so a panic or early return cannot leave the user's
/// shell in raw mode with a hidden cursor.
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = io::stdout().execute(cursor::Show);
    }
}

fn main() {
    env_logger::init();
    let args: Args = Args::parse();
    if let Err(error) = run(args) {
        eprintln!("ocho: {}", error);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let program: Program = Program::from_file(&args.rom)?;
    if args.disassemble {
        print!("{}", Disassembler::new(program).disassemble());
        return Ok(());
    }
    let mut options: Options = match &args.options {
        Some(path) => Options::load_from_file(path)?,
        None => Options::default(),
    };
    if let Some(speed) = args.speed {
        options.processor_speed_hertz = speed;
    }
    let processor: Processor = Processor::initialise_and_load(program, options)?;
    run_emulation(processor)
}

/// Hosts the supplied processor on a worker thread and runs the terminal UI loop on this
/// one, exchanging keypad events and frame updates over channels until the program
/// completes, crashes or the user presses Esc.
fn run_emulation(processor: Processor) -> Result<(), Box<dyn Error>> {
    let (message_to_ocho_tx, message_to_ocho_rx) = mpsc::channel::<MessageToOcho>();
    let (message_from_ocho_tx, message_from_ocho_rx) = mpsc::channel::<MessageFromOcho>();
    let worker: thread::JoinHandle<()> =
        spawn_emulation_thread(processor, message_to_ocho_rx, message_from_ocho_tx);

    let _raw_mode: RawModeGuard = RawModeGuard::new()?;
    let mut terminal: Terminal<CrosstermBackend<io::Stdout>> =
        Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    terminal.hide_cursor()?;

    let keypad_map: HashMap<char, u8> = HashMap::from(KEYPAD_MAP);
    let mut held_keys: HashMap<u8, Instant> = HashMap::new();
    let mut frame_buffer: Option<Display> = None;
    let mut status: ProcessorStatus = ProcessorStatus::Running;
    let mut sound_active: bool = false;
    let mut crash: Option<OchoError> = None;
    'ui: loop {
        // Keyboard input
        if poll(EVENT_POLL_INTERVAL)? {
            if let Event::Key(key_event) = read()? {
                match key_event.code {
                    KeyCode::Esc => {
                        let _ = message_to_ocho_tx.send(MessageToOcho::Terminate);
                        break 'ui;
                    }
                    KeyCode::Char(character) => {
                        if let Some(&key) = keypad_map.get(&character) {
                            let _ = message_to_ocho_tx
                                .send(MessageToOcho::KeyPressEvent { key, pressed: true });
                            // Re-pressing (or key repeat) refreshes the release deadline
                            held_keys.insert(key, Instant::now());
                        }
                    }
                    _ => (),
                }
            }
        }
        // Release held keys whose deadline has passed
        held_keys.retain(|&key, pressed_at| {
            if pressed_at.elapsed() >= KEY_RELEASE_DELAY {
                let _ = message_to_ocho_tx
                    .send(MessageToOcho::KeyPressEvent { key, pressed: false });
                false
            } else {
                true
            }
        });
        // Service updates from the emulation thread
        let mut redraw: bool = false;
        for message in message_from_ocho_rx.try_iter() {
            match message {
                MessageFromOcho::FrameUpdate {
                    snapshot,
                    sound_active: sound,
                } => {
                    if let StateSnapshot::MinimalSnapshot {
                        frame_buffer: updated_frame_buffer,
                        status: updated_status,
                    } = snapshot
                    {
                        frame_buffer = Some(updated_frame_buffer);
                        status = updated_status;
                    }
                    sound_active = sound;
                    redraw = true;
                }
                MessageFromOcho::ErrorReport { error } => {
                    crash = Some(error);
                    break 'ui;
                }
            }
        }
        if redraw {
            if let Some(frame) = &frame_buffer {
                render_frame(&mut terminal, frame, status, sound_active)?;
            }
        }
    }
    terminal.clear()?;
    terminal.show_cursor()?;
    let _ = worker.join();
    match crash {
        Some(error) => Err(Box::new(error)),
        None => Ok(()),
    }
}

/// Spawns the thread that hosts the emulated processor, continually executing cycles
/// while handling keypad messages from the UI, and reporting frame updates, sound state
/// transitions and errors back to it.
fn spawn_emulation_thread(
    mut processor: Processor,
    message_to_ocho_rx: mpsc::Receiver<MessageToOcho>,
    message_from_ocho_tx: mpsc::Sender<MessageFromOcho>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut sound_was_active: bool = false;
        'emulation: loop {
            // Process any messages waiting from the UI
            for message in message_to_ocho_rx.try_iter() {
                match message {
                    MessageToOcho::KeyPressEvent { key, pressed } => {
                        if let Err(error) = processor.set_key_status(key, pressed) {
                            let _ = message_from_ocho_tx
                                .send(MessageFromOcho::ErrorReport { error });
                            break 'emulation;
                        }
                    }
                    MessageToOcho::Terminate => break 'emulation,
                }
            }
            // Run a processor cycle
            match processor.execute_cycle() {
                Ok(display_updated) => {
                    let sound_active: bool = processor.sound_timer_active();
                    let completed: bool = processor.status() == ProcessorStatus::Completed;
                    if display_updated || sound_active != sound_was_active || completed {
                        let snapshot: StateSnapshot =
                            processor.export_state_snapshot(StateSnapshotVerbosity::Minimal);
                        if message_from_ocho_tx
                            .send(MessageFromOcho::FrameUpdate {
                                snapshot,
                                sound_active,
                            })
                            .is_err()
                        {
                            // The UI has gone away
                            break 'emulation;
                        }
                        sound_was_active = sound_active;
                    }
                    if completed {
                        break 'emulation;
                    }
                }
                Err(error) => {
                    let _ = message_from_ocho_tx.send(MessageFromOcho::ErrorReport { error });
                    break 'emulation;
                }
            }
        }
    })
}

/// Renders the frame buffer to the terminal as a bordered canvas, one canvas point per
/// display pixel.
fn render_frame(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    frame_buffer: &Display,
    status: ProcessorStatus,
    sound_active: bool,
) -> Result<(), io::Error> {
    terminal.draw(|frame| {
        // Two extra cells in each direction for the border
        let canvas_area: Rect = Rect::new(
            0,
            0,
            (Display::WIDTH_PIXELS + 2) as u16,
            (Display::HEIGHT_PIXELS + 2) as u16,
        )
        .intersection(frame.size());
        let canvas = Canvas::default()
            .block(
                Block::default()
                    .title(frame_title(status, sound_active))
                    .borders(Borders::ALL)
                    .style(Style::default().bg(Color::Black)),
            )
            .x_bounds([0.0, (Display::WIDTH_PIXELS - 1) as f64])
            .y_bounds([-1.0 * (Display::HEIGHT_PIXELS - 1) as f64, 0.0])
            .marker(Marker::Block)
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords: &lit_points(frame_buffer),
                    color: Color::White,
                });
            });
        frame.render_widget(canvas, canvas_area);
    })?;
    Ok(())
}

/// Expands the frame buffer's bitmap rows into the (x, y) coordinates of the lit pixels,
/// in the inverted-y form the canvas expects.
fn lit_points(frame_buffer: &Display) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = Vec::new();
    for (row, row_bytes) in frame_buffer.pixels.iter().enumerate() {
        for (byte_index, byte) in row_bytes.iter().enumerate() {
            for bit in 0..8 {
                if byte & (0x80 >> bit) != 0x0 {
                    points.push(((byte_index * 8 + bit) as f64, -1.0 * (row as f64)));
                }
            }
        }
    }
    points
}

fn frame_title(status: ProcessorStatus, sound_active: bool) -> String {
    let mut title: String = String::from(" ocho ");
    if sound_active {
        title.push_str("[beep] ");
    }
    if status == ProcessorStatus::Completed {
        title.push_str("(program complete - Esc to exit) ");
    }
    title
}
