use clap::Parser;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const HOST: &str = "NOTES_HOST";
    pub const PORT: &str = "NOTES_PORT";
    /// Directory holding the `<name>.txt` note files. Must exist before startup.
    pub const CACHE_DIR: &str = "NOTES_CACHE_DIR";
}

/// Default values
pub mod defaults {
    /// Route the upload form is served under
    pub const UPLOAD_FORM: &str = "UploadForm.html";
}

/// Server configuration. Every value is required, either as a flag or
/// through its environment variable (a `.env` file is loaded first).
#[derive(Parser, Clone, Debug)]
#[command(name = "notes-backend", version, about = "Plain-text notes over HTTP", long_about = None)]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(short = 'H', long, env = env_vars::HOST)]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(short, long, env = env_vars::PORT)]
    pub port: u16,

    /// Directory where notes are stored (must already exist)
    #[arg(short, long, env = env_vars::CACHE_DIR)]
    pub cache: PathBuf,
}

impl Config {
    /// Parse configuration from the process arguments and environment.
    /// Exits with a usage message when a value is missing or malformed.
    pub fn from_args() -> Self {
        Self::parse()
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_flags() {
        let config =
            Config::try_parse_from(["notes-backend", "-H", "127.0.0.1", "-p", "8000", "-c", "/tmp/notes"])
                .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.cache, PathBuf::from("/tmp/notes"));
        assert_eq!(config.bind_addr(), ("127.0.0.1".to_string(), 8000));
    }

    #[test]
    fn test_parse_long_flags() {
        let config = Config::try_parse_from([
            "notes-backend",
            "--host",
            "0.0.0.0",
            "--port",
            "9090",
            "--cache",
            "./cache",
        ])
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.cache, PathBuf::from("./cache"));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let result = Config::try_parse_from([
            "notes-backend",
            "--host",
            "localhost",
            "--port",
            "not-a-port",
            "--cache",
            "/tmp",
        ]);
        assert!(result.is_err());
    }
}
