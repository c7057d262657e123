pub mod error;
pub mod interpreter;
pub mod builtins;
pub mod stdlib;

pub mod prelude {
    pub use super::{
        error::*,
        interpreter::*
    };
}

use std::path::PathBuf;

use utf8_chars::BufReadCharsExt;

use crate::{
    parser::prelude::{parse_module_from_stream, Parsed},
    utils::prelude::Error
};

use prelude::{Config, Interpreter};

/// Parses and runs a source file with a fresh interpreter.
pub fn run_file(path: PathBuf, config: Config) -> Result<(), Error> {
    let (src, parsed) = parse_file_from_stream(path.clone())?;

    let mut interpreter = Interpreter::new(config);

    interpreter
        .run(&parsed.module.program)
        .map_err(|error| Error::Runtime { path, src, error })
}

/// Streams the file through the lexer instead of reading it up front.
/// The source still accumulates on the side for error reporting.
pub fn parse_file_from_stream(path: PathBuf) -> Result<(String, Parsed), Error> {
    let file = match std::fs::File::open(path.clone()) {
        Ok(file) => file,
        Err(err) => {
            let error = Error::StdIo { err: err.kind() };
            return Err(error)
        }
    };

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = std::io::BufReader::new(file);
    let stream = reader.chars()
        .map(|c| {
            let c = c.unwrap();
            src.push(c);
            c
        });

    let parsed = match parse_module_from_stream(stream) {
        Ok(parsed) => parsed,
        Err(err) => {
            let error = Error::Parse { path, src, error: err };
            return Err(error)
        }
    };

    Ok((src, parsed))
}

#[cfg(test)]
mod tests;
