use anyhow::{anyhow, Result};
use std::{env, fs, io::ErrorKind, path::Path};

mod raw;

pub use raw::OutputFormat;

const DEFAULT_CONFIG_FILE_NAME: &str = "geopin.toml";

const ENV_NAME_OUTPUT_FORMAT: &str = "GEOPIN_OUTPUT_FORMAT";

pub struct Config {
    pub output: Output,
    pub decoder: Decoder,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::debug!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::debug!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(format) = env::var(ENV_NAME_OUTPUT_FORMAT) {
            cfg.output.format = parse_output_format(&format)?;
        }
        Ok(cfg)
    }
}

pub struct Output {
    pub format: OutputFormat,
}

pub struct Decoder {
    /// Report undecodable values instead of replacing them with `0,0`.
    pub strict: bool,
}

fn parse_output_format(s: &str) -> Result<OutputFormat> {
    match s.trim().to_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(anyhow!("Invalid output format '{s}'")),
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config { output, decoder } = from;

        let raw::Output { format } = output.unwrap_or_default();
        let output = Output { format };

        let raw::Decoder { strict } = decoder.unwrap_or_default();
        let decoder = Decoder { strict };

        Ok(Self { output, decoder })
    }
}
