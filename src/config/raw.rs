use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG_FILE: &str = include_str!("geopin.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub output: Option<Output>,
    pub decoder: Option<Decoder>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Output {
    pub format: OutputFormat,
}

impl Default for Output {
    fn default() -> Self {
        Config::default().output.expect("Output configuration")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Decoder {
    pub strict: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Config::default().decoder.expect("Decoder configuration")
    }
}
