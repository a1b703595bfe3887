//! Per-column binning settings
//!
//! Settings arrive as JSON:
//!
//! ```json
//! {"column": "person_income", "type": "numerical",
//!  "bins": [{"name": "low", "ranges": [[0, 9999], [30000, 39999]]}]}
//! ```
//!
//! `bins` is the literal `"none"`, an auto-binning descriptor
//! (`{"algo": "equal width", "method": "width", "value": 5}`) or an explicit
//! ordered list of bins.

use serde::{Deserialize, Serialize};

use super::error::{BinningError, Result};
use super::ranges::{format_elements, format_ranges, NumericRange};

/// Declared type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numerical,
    Categorical,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Numerical => write!(f, "numerical"),
            ColumnType::Categorical => write!(f, "categorical"),
        }
    }
}

/// What a bin is made of
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinMembers {
    /// Numeric bin: a row belongs if any range contains it
    Ranges(Vec<NumericRange>),
    /// Categorical bin: a row belongs if its value is listed
    #[serde(deserialize_with = "deserialize_elements")]
    Elements(Vec<String>),
}

/// Text of a scalar JSON element, matching how a column value reads as a string
pub(crate) fn element_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accept strings, numbers and booleans as categorical elements
pub(crate) fn deserialize_elements<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Vec::<serde_json::Value>::deserialize(deserializer)?
        .into_iter()
        .map(|value| {
            let shown = value.to_string();
            element_text(value).ok_or_else(|| {
                serde::de::Error::custom(format!(
                    "bin elements must be strings, numbers or booleans, got {}",
                    shown
                ))
            })
        })
        .collect()
}

/// A named group of rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Label written for every row in this bin; derived from the members when omitted
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub members: BinMembers,
}

impl Bin {
    /// Numeric bin named by its canonical range string
    pub fn from_ranges(ranges: Vec<NumericRange>) -> Self {
        Self {
            name: format_ranges(&ranges),
            members: BinMembers::Ranges(ranges),
        }
    }

    /// Categorical bin named by its element listing
    pub fn from_elements(elements: Vec<String>) -> Self {
        Self {
            name: format_elements(&elements),
            members: BinMembers::Elements(elements),
        }
    }

    /// Ranges of a numeric bin, `None` for categorical bins
    pub fn ranges(&self) -> Option<&[NumericRange]> {
        match &self.members {
            BinMembers::Ranges(ranges) => Some(ranges),
            BinMembers::Elements(_) => None,
        }
    }

    /// Elements of a categorical bin, `None` for numeric bins
    pub fn elements(&self) -> Option<&[String]> {
        match &self.members {
            BinMembers::Elements(elements) => Some(elements),
            BinMembers::Ranges(_) => None,
        }
    }

    fn fill_default_name(&mut self) {
        if self.name.is_empty() {
            self.name = match &self.members {
                BinMembers::Ranges(ranges) => format_ranges(ranges),
                BinMembers::Elements(elements) => format_elements(elements),
            };
        }
    }
}

/// Auto-binning algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BinningAlgo {
    EqualWidth,
    EqualFrequency,
}

impl std::fmt::Display for BinningAlgo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinningAlgo::EqualWidth => write!(f, "equal width"),
            BinningAlgo::EqualFrequency => write!(f, "equal frequency"),
        }
    }
}

impl std::str::FromStr for BinningAlgo {
    type Err = std::convert::Infallible;

    /// `"equal width"` selects equal-width; anything else is equal-frequency
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "equal width" => BinningAlgo::EqualWidth,
            _ => BinningAlgo::EqualFrequency,
        })
    }
}

impl From<String> for BinningAlgo {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(algo) => algo,
            Err(never) => match never {},
        }
    }
}

impl From<BinningAlgo> for String {
    fn from(algo: BinningAlgo) -> Self {
        algo.to_string()
    }
}

/// How the auto-binning parameter is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BinningMethod {
    /// `value` is a bin width
    Width,
    /// `value` is a target row count per bin
    Freq,
    /// `value` is the number of bins
    NumBins,
}

impl std::fmt::Display for BinningMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinningMethod::Width => write!(f, "width"),
            BinningMethod::Freq => write!(f, "freq"),
            BinningMethod::NumBins => write!(f, "num_bins"),
        }
    }
}

impl std::str::FromStr for BinningMethod {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "width" => BinningMethod::Width,
            "freq" => BinningMethod::Freq,
            _ => BinningMethod::NumBins,
        })
    }
}

impl From<String> for BinningMethod {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(method) => method,
            Err(never) => match never {},
        }
    }
}

impl From<BinningMethod> for String {
    fn from(method: BinningMethod) -> Self {
        method.to_string()
    }
}

/// Auto-binning descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoBinning {
    pub algo: BinningAlgo,
    pub method: BinningMethod,
    pub value: f64,
}

/// The `bins` field of a column's settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBins", into = "RawBins")]
pub enum BinSpec {
    /// Pass values through unchanged
    NoBinning,
    Auto(AutoBinning),
    /// Explicit bins, matched first to last
    Custom(Vec<Bin>),
}

impl std::fmt::Display for BinSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinSpec::NoBinning => write!(f, "none"),
            BinSpec::Auto(auto) => write!(f, "{} ({} = {})", auto.algo, auto.method, auto.value),
            BinSpec::Custom(bins) => write!(f, "custom ({} bins)", bins.len()),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawBins {
    Sentinel(String),
    Auto(AutoBinning),
    Custom(Vec<Bin>),
}

const NO_BINNING: &str = "none";

impl TryFrom<RawBins> for BinSpec {
    type Error = BinningError;

    fn try_from(raw: RawBins) -> Result<Self> {
        match raw {
            RawBins::Sentinel(s) if s == NO_BINNING => Ok(BinSpec::NoBinning),
            RawBins::Sentinel(s) => Err(BinningError::InvalidSettings(format!(
                "bins must be \"{}\", an auto-binning object or a list of bins, got \"{}\"",
                NO_BINNING, s
            ))),
            RawBins::Auto(auto) => Ok(BinSpec::Auto(auto)),
            RawBins::Custom(mut bins) => {
                bins.iter_mut().for_each(Bin::fill_default_name);
                Ok(BinSpec::Custom(bins))
            }
        }
    }
}

impl From<BinSpec> for RawBins {
    fn from(spec: BinSpec) -> Self {
        match spec {
            BinSpec::NoBinning => RawBins::Sentinel(NO_BINNING.to_string()),
            BinSpec::Auto(auto) => RawBins::Auto(auto),
            BinSpec::Custom(bins) => RawBins::Custom(bins),
        }
    }
}

/// Binning configuration for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnBinSettings {
    pub column: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub bins: BinSpec,
}

impl ColumnBinSettings {
    pub fn new(column: impl Into<String>, column_type: ColumnType, bins: BinSpec) -> Self {
        Self {
            column: column.into(),
            column_type,
            bins,
        }
    }
}

/// Parse a JSON array of column settings
pub fn parse_settings(json: &str) -> Result<Vec<ColumnBinSettings>> {
    serde_json::from_str(json).map_err(|e| BinningError::InvalidSettings(e.to_string()))
}

/// Find the settings for a column; the first entry naming it wins
pub fn find_settings<'a>(
    settings: &'a [ColumnBinSettings],
    column: &str,
) -> Option<&'a ColumnBinSettings> {
    settings.iter().find(|s| s.column == column)
}
