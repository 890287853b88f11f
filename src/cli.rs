use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use geopin_boundary as json;
use geopin_entities::{
    geo::Coordinate,
    geography::{self, InvalidGeography, RawGeographyValue},
};
use serde_json::Value;

use crate::config::{Config, OutputFormat};

#[derive(Parser)]
#[command(author, version, about = "Decode geography column values into coordinates")]
struct Cli {
    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode GeoJSON or hex encoded (E)WKB points
    Decode(DecodeArgs),
}

#[derive(Args)]
struct DecodeArgs {
    /// Output format (overrides the configuration)
    #[arg(long, value_enum)]
    format: Option<Format>,
    /// Report values that cannot be decoded and exit with an error
    #[arg(long)]
    strict: bool,
    /// Parse each value as a JSON document first
    #[arg(long)]
    json_input: bool,
    /// Raw geography values (read line by line from stdin if omitted)
    values: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(from: Format) -> Self {
        match from {
            Format::Text => Self::Text,
            Format::Json => Self::Json,
        }
    }
}

pub fn run() -> Result<()> {
    let Cli { config, command } = Cli::parse();
    let cfg = Config::try_load_from_file_or_default(config)?;
    match command {
        Command::Decode(args) => {
            let settings = DecodeSettings {
                format: args.format.map(Into::into).unwrap_or(cfg.output.format),
                strict: args.strict || cfg.decoder.strict,
                json_input: args.json_input,
            };
            let stdout = io::stdout();
            let stderr = io::stderr();
            let mut decoder = ValueDecoder::new(settings, stdout.lock(), stderr.lock());
            if args.values.is_empty() {
                log::debug!("Reading geography values from stdin");
                decode_lines(&mut decoder, io::stdin().lock())?;
            } else {
                for value in &args.values {
                    decoder.decode(value)?;
                }
            }
            let rejected = decoder.finish()?;
            if rejected > 0 {
                bail!("{rejected} value(s) could not be decoded");
            }
        }
    }
    Ok(())
}

struct DecodeSettings {
    format: OutputFormat,
    strict: bool,
    json_input: bool,
}

/// Decodes values one by one and prints the results as they come.
///
/// Coordinates go to `out`. In strict mode undecodable values are reported
/// on `err` and omitted from `out`, otherwise they are printed as `0,0`.
struct ValueDecoder<O, E> {
    settings: DecodeSettings,
    out: O,
    err: E,
    rejected: usize,
}

impl<O: Write, E: Write> ValueDecoder<O, E> {
    fn new(settings: DecodeSettings, out: O, err: E) -> Self {
        Self {
            settings,
            out,
            err,
            rejected: 0,
        }
    }

    fn decode(&mut self, input: &str) -> Result<()> {
        let parsed;
        let raw = if self.settings.json_input {
            parsed = parse_json_input(input);
            RawGeographyValue::from(&parsed)
        } else {
            RawGeographyValue::Text(input)
        };
        match geography::try_decode(raw) {
            Ok(coord) => write_coordinate(self.settings.format, coord, &mut self.out),
            Err(err) if self.settings.strict => {
                self.rejected += 1;
                log::debug!("Rejecting undecodable value '{input}': {err}");
                write_rejected(self.settings.format, input, err, &mut self.err)
            }
            Err(err) => {
                log::debug!("Replacing undecodable value '{input}' with 0,0: {err}");
                write_coordinate(self.settings.format, Coordinate::SENTINEL, &mut self.out)
            }
        }
    }

    /// Flushes the output and returns the number of rejected values.
    fn finish(mut self) -> Result<usize> {
        self.out.flush()?;
        self.err.flush()?;
        Ok(self.rejected)
    }
}

/// Decodes one value per line.
///
/// Lines that are not valid UTF-8 are decoded lossily and thus end up
/// as undecodable values instead of aborting the whole input.
fn decode_lines<R, O, E>(decoder: &mut ValueDecoder<O, E>, mut reader: R) -> Result<()>
where
    R: BufRead,
    O: Write,
    E: Write,
{
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&line);
        decoder.decode(text.trim_end_matches(['\n', '\r']))?;
    }
}

fn parse_json_input(input: &str) -> Value {
    serde_json::from_str(input).unwrap_or_else(|err| {
        log::debug!("Treating unparseable JSON input '{input}' as absent: {err}");
        Value::Null
    })
}

fn write_coordinate<W: Write>(format: OutputFormat, coord: Coordinate, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{coord}")?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &json::Coordinate::from(coord))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_rejected<W: Write>(
    format: OutputFormat,
    input: &str,
    reason: InvalidGeography,
    err: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(err, "Unable to decode '{input}': {reason}")?,
        OutputFormat::Json => {
            let rejected = json::RejectedValue {
                value: input.to_string(),
                reason: reason.to_string(),
            };
            serde_json::to_writer(&mut *err, &rejected)?;
            writeln!(err)?;
        }
    }
    Ok(())
}
