//! Dataset and settings loading for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::ranges::{
    normalize_categorical_declarations, normalize_numeric_declarations, ColumnElementDef,
    ColumnRangeDef,
};
use super::settings::{element_text, parse_settings, ColumnBinSettings};

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Load a dataset from a file (CSV or Parquet based on extension)
///
/// `infer_schema_length` of 0 scans the whole CSV file for type inference.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension_of(path).as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        other => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            other
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Save dataset to file (CSV or Parquet based on extension)
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    match extension_of(path).as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        other => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            other
        ),
    }

    Ok(())
}

/// Default output path: `<stem>_binned.<ext>` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("parquet");
    parent.join(format!("{}_binned.{}", stem, extension))
}

/// Read a JSON array of column settings from disk
pub fn load_settings(path: &Path) -> Result<Vec<ColumnBinSettings>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    parse_settings(&json)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))
}

/// User range/element declarations, as written in a declarations file:
///
/// ```json
/// {"numeric": [["income", 0, 9999], ["income", 5000, 20000]],
///  "categorical": [["home", ["RENT", "OWN"]]]}
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Declarations {
    #[serde(default)]
    pub numeric: Vec<(String, f64, f64)>,
    #[serde(default, deserialize_with = "deserialize_categorical")]
    pub categorical: Vec<(String, Vec<String>)>,
}

/// Categorical declarations with scalar elements read as text
fn deserialize_categorical<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(String, Vec<String>)>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Vec::<(String, Vec<serde_json::Value>)>::deserialize(deserializer)?
        .into_iter()
        .map(|(column, values)| {
            let elements = values
                .into_iter()
                .map(|value| {
                    let shown = value.to_string();
                    element_text(value).ok_or_else(|| {
                        serde::de::Error::custom(format!(
                            "elements of '{}' must be strings, numbers or booleans, got {}",
                            column, shown
                        ))
                    })
                })
                .collect::<std::result::Result<Vec<_>, D::Error>>()?;
            Ok((column, elements))
        })
        .collect()
}

impl Declarations {
    /// Fold the declarations into canonical per-column definitions
    pub fn normalize(&self) -> Result<(Vec<ColumnRangeDef>, Vec<ColumnElementDef>)> {
        let ranges = normalize_numeric_declarations(&self.numeric)?;
        let elements = normalize_categorical_declarations(&self.categorical);
        Ok((ranges, elements))
    }
}

/// Read a declarations file from disk
pub fn load_declarations(path: &Path) -> Result<Declarations> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read declarations file: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse declarations file: {}", path.display()))
}
