use std::io::Write;

use brno_core::parser::prelude::parse_module;

const PROMPT: &str = "ast> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;
		stdin.read_line(&mut input)?;

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				match parse_module(&input) {
					Ok(parsed) => {
						println!("{:#?}", parsed.module.program);
					},
					Err(err) => {
						let (message, messages) = err.details();

						println!("[at {}] Parse error: {}", err.span.start, message);
						for line in messages {
							println!("\t{line}");
						}
					}
				}
			}
		}
	}
}
