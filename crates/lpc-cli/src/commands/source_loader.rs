use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use lpc_syntax::ParseOptions;

/// Source text and the name diagnostics refer to it by.
pub struct LoadedSource {
    pub name: String,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("source required: pass a file, \"-\" for stdin, or -s/--source")]
    Missing,

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn load_source(path: Option<&Path>, text: Option<&str>) -> Result<LoadedSource, LoadError> {
    if let Some(text) = text {
        return Ok(LoadedSource {
            name: "<inline>".to_string(),
            text: text.to_string(),
        });
    }

    let Some(path) = path else {
        return Err(LoadError::Missing);
    };

    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(LoadError::Stdin)?;
        return Ok(LoadedSource {
            name: "<stdin>".to_string(),
            text: buf,
        });
    }

    let text = fs::read_to_string(path).map_err(|source| LoadError::File {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(LoadedSource {
        name: path.display().to_string(),
        text,
    })
}

/// Loads the source or exits with status 1.
pub fn load_or_exit(path: Option<&Path>, text: Option<&str>) -> LoadedSource {
    match load_source(path, text) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Default limits, with `--fuel` overriding the token budget.
pub fn parse_options(fuel: Option<u32>) -> ParseOptions {
    match fuel {
        Some(limit) => ParseOptions::default().with_exec_fuel(Some(limit)),
        None => ParseOptions::default(),
    }
}
