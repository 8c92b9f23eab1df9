use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    /// Upper bound on tokens in one line.
    pub max_tokens: usize,
}

impl Default for Config {
    fn default() -> Self {
        ConfigLoader::default_config()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: "scsh $ ".to_string(),
            max_tokens: 256,
        }
    }

    /// `SCSH_CONFIG` if set, otherwise `~/.scshrc` when present, otherwise
    /// the defaults.
    pub fn load() -> Result<Config, ConfigError> {
        if let Some(path) = std::env::var_os("SCSH_CONFIG") {
            return Self::load_from_file(PathBuf::from(path));
        }
        match std::env::var_os("HOME").map(|home| Path::new(&home).join(".scshrc")) {
            Some(path) if path.is_file() => Self::load_from_file(path),
            _ => Ok(Self::default_config()),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            let line_no = lineno + 1;
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse {
                    line: line_no,
                    message: format!("no '=' found: {}", line),
                });
            };

            // The prompt keeps its surrounding spaces
            match key.trim() {
                "prompt" => config.prompt = value.to_string(),
                "max_tokens" => {
                    config.max_tokens = match value.trim().parse::<usize>() {
                        Ok(n) if n > 0 => n,
                        _ => {
                            return Err(ConfigError::Parse {
                                line: line_no,
                                message: format!("invalid max_tokens: {}", value.trim()),
                            });
                        }
                    }
                }
                other => {
                    return Err(ConfigError::Parse {
                        line: line_no,
                        message: format!("unknown key: {}", other),
                    });
                }
            }
        }

        Ok(config)
    }
}
