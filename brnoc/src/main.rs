mod cli;
mod loader;
mod repl;
mod rlpl;
mod rppl;

use std::path::PathBuf;

use clap::Parser;

use brno_core::eval::{
    prelude::{Capabilities, Config},
    run_file
};

use loader::FileLoader;

#[derive(Parser)]
enum Command {
    /// Runs a source file
    Run {
        /// Path of source file
        path: PathBuf,
        /// Allow filesystem access from scripts
        #[arg(long = "unsafe-fs", default_value_t = false)]
        unsafe_fs: bool
    },
    /// Runs interactive Read Eval Print Loop
    Repl {
        /// Allow filesystem access from scripts
        #[arg(long = "unsafe-fs", default_value_t = false)]
        unsafe_fs: bool
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn main() {
    let _ = match Command::parse() {
        Command::Run { path, unsafe_fs } => {
            let buf_writer = crate::cli::stderr_buffer_writer();
            let mut buf = buf_writer.buffer();

            cli::print_running(path.to_str().unwrap());
            let start = std::time::Instant::now();

            let config = Config {
                loader: Some(Box::new(FileLoader::new())),
                capabilities: Capabilities { fs_enabled: unsafe_fs },
                ..Config::default()
            };

            if let Err(err) = run_file(path, config) {
                err.pretty(&mut buf);
                buf_writer
                    .print(&buf)
                    .expect("Writing error to stderr");
            }

            cli::print_finished(std::time::Instant::now() - start);
        },
        Command::Repl { unsafe_fs } => {
            let _ = repl::start(unsafe_fs);
        },
        Command::Rlpl => {
            let _ = rlpl::start();
        },
        Command::Rppl => {
            let _ = rppl::start();
        }
    };
}
