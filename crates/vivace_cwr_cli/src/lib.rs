//! Shared plumbing for the vivace CWR command-line tools.

use std::io::{self, Read};
use std::process;

use log::error;
use vivace_cwr::CwrVersion;

/// Common arguments shared by the CWR binaries.
#[derive(Default)]
pub struct BaseConfig {
    pub input_file: Option<String>,
    pub cwr_version: Option<CwrVersion>,
    pub validate: bool,
    pub output_file: Option<String>,
}

impl BaseConfig {
    pub fn new() -> Self {
        BaseConfig { validate: true, ..Default::default() }
    }

    pub fn set_cwr_version(&mut self, version_str: &str) -> Result<(), String> {
        match CwrVersion::from_version_str(version_str) {
            Some(version) => {
                self.cwr_version = Some(version);
                Ok(())
            }
            None => Err(format!("Invalid CWR version '{}'. Valid versions: 2.1, 2.2", version_str)),
        }
    }

    pub fn set_input_file(&mut self, file: String) -> Result<(), String> {
        if self.input_file.is_some() {
            return Err("Only one input file may be given".to_string());
        }
        self.input_file = Some(file);
        Ok(())
    }
}

pub fn get_value(parser: &mut lexopt::Parser, arg_name: &str) -> Result<String, String> {
    parser
        .value()
        .map(|val| val.to_string_lossy().to_string())
        .map_err(|e| format!("Missing value for --{}: {}", arg_name, e))
}

/// Reads all of stdin; exits with the host-error code on failure.
pub fn read_stdin_or_exit() -> String {
    let mut buffer = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buffer) {
        eprintln!("Error reading from stdin: {}", e);
        process::exit(2);
    }
    buffer
}

pub fn init_logging_and_parse_args<F, T>(parser_fn: F) -> T
where
    F: FnOnce() -> Result<T, String>,
{
    env_logger::init();

    match parser_fn() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cwr_version() {
        let mut config = BaseConfig::new();
        assert!(config.set_cwr_version("2.1").is_ok());
        assert_eq!(config.cwr_version, Some(CwrVersion::V2_1));
        assert!(config.set_cwr_version("02.20").is_ok());
        assert_eq!(config.cwr_version, Some(CwrVersion::V2_2));
        assert!(config.set_cwr_version("3.0").is_err());
    }

    #[test]
    fn test_single_input_file() {
        let mut config = BaseConfig::new();
        assert!(config.set_input_file("a.cwr".to_string()).is_ok());
        assert!(config.set_input_file("b.cwr".to_string()).is_err());
    }
}
