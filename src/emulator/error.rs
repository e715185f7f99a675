use std::io;
use thiserror::Error;

/// Errors that stop the emulator.
///
/// Only configuration problems and failures of the output device end up here.
/// Everything that can go wrong while a program runs (bad opcodes, stack
/// misuse, addresses out of range) is absorbed by the interpreter.
#[derive(Debug, Error)]
pub enum Error {
    #[error("program is {size} bytes, but only {max} bytes fit in memory from 0x200")]
    RomTooLarge { size: usize, max: usize },

    #[error("terminal is {cols}x{rows}, which is too small for a {width}x{height} display")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        width: usize,
        height: usize,
    },

    #[error("could not write to the terminal")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
