use crate::config::*;
use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Errors raised while collecting the simulation parameters.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("'{input}' is not a valid positive number")]
    NotANumber { input: String },
    #[error("{parameter} must be between {min} and {max}, got {value}")]
    OutOfRange {
        parameter: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("input closed before {0} was provided")]
    InputClosed(&'static str),
    #[error("failed to read parameters: {0}")]
    Io(#[from] io::Error),
}

/// The user-tunable numbers of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    StepsPerCycle,
    ParticleCount,
    FoodCount,
    MaxCycles,
}

impl Parameter {
    pub fn name(self) -> &'static str {
        match self {
            Parameter::StepsPerCycle => "steps per cycle",
            Parameter::ParticleCount => "particle count",
            Parameter::FoodCount => "food count",
            Parameter::MaxCycles => "max cycles",
        }
    }

    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            Parameter::StepsPerCycle => STEPS_PER_CYCLE_RANGE,
            Parameter::ParticleCount => PARTICLE_COUNT_RANGE,
            Parameter::FoodCount => FOOD_COUNT_RANGE,
            Parameter::MaxCycles => MAX_CYCLES_RANGE,
        }
    }

    pub fn validate(self, value: u32) -> Result<u32, SettingsError> {
        let range = self.range();
        if range.contains(&value) {
            Ok(value)
        } else {
            Err(SettingsError::OutOfRange {
                parameter: self.name(),
                value,
                min: *range.start(),
                max: *range.end(),
            })
        }
    }

    /// Parse and range-check one line of user input
    pub fn parse(self, input: &str) -> Result<u32, SettingsError> {
        let trimmed = input.trim();
        let value = trimmed.parse::<u32>().map_err(|_| SettingsError::NotANumber {
            input: trimmed.to_string(),
        })?;
        self.validate(value)
    }
}

/// Validated parameters for one simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationSettings {
    pub steps_per_cycle: u32,
    pub particle_count: u32,
    pub food_count: u32,
    pub max_cycles: u32,
    /// Fixed seed for reproducible runs; fresh entropy when absent
    pub seed: Option<u64>,
}

/// Values that may already be known (e.g. from command-line flags)
#[derive(Debug, Default, Clone)]
pub struct PartialSettings {
    pub steps_per_cycle: Option<u32>,
    pub particle_count: Option<u32>,
    pub food_count: Option<u32>,
    pub max_cycles: Option<u32>,
    pub seed: Option<u64>,
}

impl PartialSettings {
    /// Validate the known values and ask for the missing ones.
    pub fn complete<R: BufRead, W: Write>(
        self,
        input: &mut R,
        output: &mut W,
    ) -> Result<SimulationSettings, SettingsError> {
        Ok(SimulationSettings {
            steps_per_cycle: resolve(Parameter::StepsPerCycle, self.steps_per_cycle, input, output)?,
            particle_count: resolve(Parameter::ParticleCount, self.particle_count, input, output)?,
            food_count: resolve(Parameter::FoodCount, self.food_count, input, output)?,
            max_cycles: resolve(Parameter::MaxCycles, self.max_cycles, input, output)?,
            seed: self.seed,
        })
    }
}

fn resolve<R: BufRead, W: Write>(
    parameter: Parameter,
    known: Option<u32>,
    input: &mut R,
    output: &mut W,
) -> Result<u32, SettingsError> {
    match known {
        Some(value) => parameter.validate(value),
        None => prompt(parameter, input, output),
    }
}

/// Ask for `parameter` until the answer parses and is in range
pub fn prompt<R: BufRead, W: Write>(
    parameter: Parameter,
    input: &mut R,
    output: &mut W,
) -> Result<u32, SettingsError> {
    let range = parameter.range();
    let mut line = String::new();

    loop {
        write!(
            output,
            "Enter the {} ({}-{}): ",
            parameter.name(),
            range.start(),
            range.end()
        )?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(SettingsError::InputClosed(parameter.name()));
        }

        match parameter.parse(&line) {
            Ok(value) => return Ok(value),
            Err(err @ (SettingsError::NotANumber { .. } | SettingsError::OutOfRange { .. })) => {
                writeln!(output, "{}", err)?;
            }
            Err(err) => return Err(err),
        }
    }
}
