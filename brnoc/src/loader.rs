use std::path::{Path, PathBuf};

use brno_core::eval::prelude::ModuleLoader;

/// Resolves `vokno` paths against the working directory; absolute
/// paths pass through untouched.
pub struct FileLoader {
    base: PathBuf,
}

impl FileLoader {
    pub fn new() -> Self {
        Self {
            base: std::env::current_dir().unwrap_or_default()
        }
    }
}

impl ModuleLoader for FileLoader {
    fn load(&self, path: &str) -> Result<String, String> {
        let resolved = match Path::new(path).is_absolute() {
            true => PathBuf::from(path),
            false => self.base.join(path),
        };

        std::fs::read_to_string(&resolved)
            .map_err(|err| format!("{}: {err}", resolved.display()))
    }
}
