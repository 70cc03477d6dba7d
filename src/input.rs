// keyboard input comes from stdin in non-canonical mode: a reader thread
// pushes raw bytes into a channel and the game loop decodes them once a tick
use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use circular_buffer::CircularBuffer;
use log::{debug, warn};
use termios::{tcsetattr, Termios, ECHO, ICANON, ISIG, TCSANOW};

use crate::grid::Direction;
use crate::snake::Snake;

type InputBuffer = CircularBuffer<64, u8>; // 64 bytes of undecoded input

const ESC: u8 = 27;
const CSI: u8 = b'[';
const CTRL_C: u8 = 3;
const CTRL_D: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Turn(Direction),
    /// The player asked to leave (the terminal's version of closing the window).
    Close,
}

/// A non-blocking source of input events.
pub trait EventSource {
    /// Everything that happened since the previous poll, oldest first.
    fn poll(&mut self) -> Vec<InputEvent>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Close,
}

/// Polls `source` once and routes the events: turns are queued on the snake,
/// a close request stops the loop.
pub fn handle_keys<E: EventSource + ?Sized>(source: &mut E, snake: &mut Snake) -> Control {
    for event in source.poll() {
        match event {
            InputEvent::Close => return Control::Close,
            InputEvent::Turn(direction) => {
                if !snake.queue_direction(direction) {
                    debug!("ignoring reversal to {:?}", direction);
                }
            }
        }
    }
    Control::Continue
}

fn arrow(byte: u8) -> Option<Direction> {
    match byte {
        b'A' => Some(Direction::Up),
        b'B' => Some(Direction::Down),
        b'C' => Some(Direction::Right),
        b'D' => Some(Direction::Left),
        _ => None,
    }
}

fn is_close(byte: u8) -> bool {
    matches!(byte, b'q' | b'Q' | CTRL_C | CTRL_D)
}

/// Turns raw terminal bytes into input events. Arrow keys are the escape
/// sequences `ESC [ A..D`; incomplete sequences wait for the next bytes.
#[derive(Debug)]
pub struct KeyDecoder {
    buffer: InputBuffer,
}

impl KeyDecoder {
    pub fn new() -> Self {
        KeyDecoder {
            buffer: InputBuffer::new(),
        }
    }

    pub fn feed(&mut self, key: u8) {
        let wanted = matches!(key, ESC | CSI) || arrow(key).is_some() || is_close(key);
        // anything else, or a full buffer, is dropped
        if !wanted || self.buffer.is_full() {
            return;
        }
        self.buffer.push_back(key);
    }

    pub fn decode(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Some(&first) = self.buffer.front() {
            if is_close(first) {
                events.push(InputEvent::Close);
                self.buffer.pop_front();
                continue;
            }
            if first != ESC {
                self.buffer.pop_front();
                continue;
            }
            match self.buffer.nth_front(1).copied() {
                // lone escape, wait for more
                None => break,
                Some(CSI) => match self.buffer.nth_front(2).copied() {
                    None => break,
                    Some(third) => {
                        if let Some(direction) = arrow(third) {
                            events.push(InputEvent::Turn(direction));
                            self.buffer.pop_front();
                            self.buffer.pop_front();
                        }
                        self.buffer.pop_front();
                    }
                },
                Some(_) => {
                    self.buffer.pop_front();
                }
            }
        }
        events
    }

    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes keys arriving on a byte channel. A hung-up sender reads as a
/// close request on every poll from then on.
pub struct KeyChannel {
    receiver: Receiver<u8>,
    decoder: KeyDecoder,
    closed: bool,
}

impl KeyChannel {
    pub fn new(receiver: Receiver<u8>) -> Self {
        KeyChannel {
            receiver,
            decoder: KeyDecoder::new(),
            closed: false,
        }
    }
}

impl EventSource for KeyChannel {
    fn poll(&mut self) -> Vec<InputEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(key) => self.decoder.feed(key),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.closed {
                        warn!("stdin closed, treating it as a quit request");
                        self.closed = true;
                    }
                    break;
                }
            }
        }
        let mut events = self.decoder.decode();
        if self.closed {
            events.push(InputEvent::Close);
        }
        events
    }
}

/// Keyboard input read from the controlling terminal.
pub struct TerminalInput {
    keys: KeyChannel,
    old_termios: Termios,
    new_termios: Termios,
}

impl TerminalInput {
    pub fn new() -> io::Result<Self> {
        let termios = Termios::from_fd(0)?; // 0 is file descriptor for stdin
        let mut new_termios = termios;
        // no echo, no line buffering, ctrl-c arrives as a byte
        new_termios.c_lflag &= !(ICANON | ECHO | ISIG);
        Ok(TerminalInput {
            keys: KeyChannel::new(spawn_stdin_channel()),
            old_termios: termios,
            new_termios,
        })
    }

    pub fn setup_streams(&mut self) -> io::Result<()> {
        tcsetattr(0, TCSANOW, &self.new_termios)
    }

    pub fn reset_streams(&mut self) -> io::Result<()> {
        tcsetattr(0, TCSANOW, &self.old_termios)
    }
}

impl EventSource for TerminalInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.keys.poll()
    }
}

/// Shows the cursor again, flushes `out` and runs `restore`. The terminal is
/// restored even when the flush fails; the flush error is reported after.
pub fn restore_terminal<W, F>(out: &mut W, restore: F) -> io::Result<()>
where
    W: Write,
    F: FnOnce() -> io::Result<()>,
{
    let flushed = write!(out, "{}[?25h", ESC as char).and_then(|_| out.flush());
    restore()?;
    flushed
}

fn spawn_stdin_channel() -> Receiver<u8> {
    let (tx, rx) = mpsc::channel::<u8>();
    thread::spawn(move || {
        let mut reader = io::stdin();
        let mut buffer: [u8; 1] = [0; 1];
        // read one u8 at a time, stop when stdin or the game goes away
        while reader.read_exact(&mut buffer).is_ok() {
            if tx.send(buffer[0]).is_err() {
                break;
            }
        }
    });
    rx
}
