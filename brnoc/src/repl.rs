use std::io::Write;
use std::path::PathBuf;

use brno_core::{
    eval::prelude::{Capabilities, Config, Interpreter},
    parser::prelude::parse_module,
    utils::prelude::Error
};

use crate::loader::FileLoader;

const PROMPT: &str = "brn> ";
const CONTINUATION: &str = "...> ";

/// Interactive session. Input accumulates until a line ends with the
/// `piča` terminator or a closing brace, then the buffer runs against
/// a persistent interpreter, so definitions survive between entries.
pub fn start(unsafe_fs: bool) -> std::io::Result<()> {
	ctrlc::set_handler(|| {
		println!();
		std::process::exit(0);
	}).expect("setting Ctrl-C handler");

	let mut interpreter = Interpreter::new(Config {
		loader: Some(Box::new(FileLoader::new())),
		capabilities: Capabilities { fs_enabled: unsafe_fs },
		..Config::default()
	});

	let stdin = std::io::stdin();
	let mut buffer = String::from("");

	loop {
		match buffer.is_empty() {
			true => print!("{}", PROMPT),
			false => print!("{}", CONTINUATION)
		}
		std::io::stdout().flush()?;

		let mut input = String::from("");
		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		if buffer.is_empty() && input == ".exit" {
			return Ok(());
		}

		buffer.push_str(&input);
		buffer.push('\n');

		let trimmed = input.trim_end();
		if !(trimmed.ends_with("piča") || trimmed.ends_with('}')) {
			continue;
		}

		let src = std::mem::take(&mut buffer);
		run_entry(&mut interpreter, &src);
	}
}

fn run_entry(interpreter: &mut Interpreter, src: &str) {
	let buf_writer = crate::cli::stderr_buffer_writer();
	let mut buf = buf_writer.buffer();

	let path = PathBuf::from("<repl>");

	let result = match parse_module(src) {
		Ok(parsed) => interpreter
			.run(&parsed.module.program)
			.map_err(|error| Error::Runtime {
				path,
				src: src.into(),
				error
			}),
		Err(error) => Err(Error::Parse {
			path,
			src: src.into(),
			error
		})
	};

	if let Err(err) = result {
		err.pretty(&mut buf);
		buf_writer
			.print(&buf)
			.expect("Writing error to stderr");
	}
}
