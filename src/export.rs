//! Program export to JSON and CSV files.
//!
//! Exports carry the inputs alongside the generated prescriptions so a
//! file is reproducible on its own. Full-catalog export fans out across
//! programs with rayon; each job writes an independent file.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::Writer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::catalog::{self, ProgramDefinition};
use crate::models::{RepMaxes, SetsPrescription, WorkoutDay};

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Result<Self, ExportError> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// A generated week bundled with the inputs that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedProgram {
    pub program: String,
    pub maxes: RepMaxes,
    pub week: u32,
    pub days: Vec<WorkoutDay>,
}

impl GeneratedProgram {
    pub fn new(definition: &ProgramDefinition, maxes: &RepMaxes, week: u32) -> Self {
        GeneratedProgram {
            program: definition.key.to_string(),
            maxes: *maxes,
            week,
            days: (definition.generate)(maxes, week),
        }
    }
}

/// Export a generated program to pretty-printed JSON
pub fn export_json<P: AsRef<Path>>(
    program: &GeneratedProgram,
    output_path: P,
) -> Result<(), ExportError> {
    let json_data = serde_json::to_string_pretty(program)
        .map_err(|e| ExportError::SerializationError(e.to_string()))?;

    let mut file = File::create(output_path)?;
    file.write_all(json_data.as_bytes())?;

    Ok(())
}

/// Export a generated program to CSV, one row per prescribed set.
///
/// Free-text prescriptions get a single row with the note in the reps
/// column and empty set/weight cells.
pub fn export_csv<P: AsRef<Path>>(
    program: &GeneratedProgram,
    output_path: P,
) -> Result<(), ExportError> {
    let file = File::create(output_path)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record([
        "program", "week", "day", "focus", "exercise", "set", "weight", "reps",
    ])?;

    for day in &program.days {
        for exercise in &day.exercises {
            match &exercise.sets {
                SetsPrescription::Sets(sets) => {
                    for (i, set) in sets.iter().enumerate() {
                        writer.write_record([
                            program.program.clone(),
                            program.week.to_string(),
                            day.day.clone(),
                            day.focus.clone(),
                            exercise.name.clone(),
                            (i + 1).to_string(),
                            set.weight.to_string(),
                            set.reps.to_string(),
                        ])?;
                    }
                }
                SetsPrescription::Note(text) => {
                    writer.write_record([
                        program.program.clone(),
                        program.week.to_string(),
                        day.day.clone(),
                        day.focus.clone(),
                        exercise.name.clone(),
                        String::new(),
                        String::new(),
                        text.clone(),
                    ])?;
                }
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Export one generated program in the requested format
pub fn export_program<P: AsRef<Path>>(
    program: &GeneratedProgram,
    format: ExportFormat,
    output_path: P,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Json => export_json(program, output_path),
        ExportFormat::Csv => export_csv(program, output_path),
    }
}

/// File name for one exported program week.
///
/// Weekly programs get a `_week<N>` suffix; week-invariant programs
/// are named by key alone.
pub fn export_file_name(
    definition: &ProgramDefinition,
    week: u32,
    format: ExportFormat,
) -> String {
    if definition.weekly {
        format!("{}_week{}.{}", definition.key, week, format.extension())
    } else {
        format!("{}.{}", definition.key, format.extension())
    }
}

/// Export every catalog program into `dir`, one file per generated week.
///
/// Weekly programs produce one file per cycle week; week-invariant
/// programs produce a single file. Returns the written paths in sorted
/// order.
pub fn export_full_catalog(
    maxes: &RepMaxes,
    dir: &Path,
    format: ExportFormat,
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir)?;

    let jobs: Vec<(&ProgramDefinition, u32, PathBuf)> = catalog::PROGRAMS
        .iter()
        .flat_map(|definition| {
            let weeks = if definition.weekly {
                1..=definition.cycle_weeks
            } else {
                1..=1
            };
            weeks.map(move |week| {
                (
                    definition,
                    week,
                    dir.join(export_file_name(definition, week, format)),
                )
            })
        })
        .collect();

    let mut written = jobs
        .par_iter()
        .map(|(definition, week, path)| {
            let generated = GeneratedProgram::new(definition, maxes, *week);
            export_program(&generated, format, path)?;
            Ok(path.clone())
        })
        .collect::<Result<Vec<PathBuf>, ExportError>>()?;

    written.sort();
    info!(files = written.len(), "catalog export complete");
    Ok(written)
}
