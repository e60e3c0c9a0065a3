use crate::data::table::{
    InvalidSexCode, LookupTable, Parameter, Sex, SplineSet, UnknownParameter,
};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// The lookup table bundled with the crate, for zero-configuration use
const DEFAULT_TABLE: &str = include_str!("../gli_lookup.csv");

/// Custom error type for the module
#[derive(Error, Debug, Clone)]
pub enum GliError {
    /// Error encountered when reading CSV data
    #[error("CSV error: {0}")]
    CSVError(String),
    /// Sex code in the table outside the recognized values
    #[error(transparent)]
    UnknownSex(#[from] InvalidSexCode),
    /// Parameter name in the table outside the recognized spellings
    #[error(transparent)]
    UnknownParameter(#[from] UnknownParameter),
    /// The same (sex, parameter, age) key appears more than once
    #[error("Duplicate lookup entry for sex {sex:?}, parameter {parameter}, age {age}")]
    DuplicateEntry {
        sex: Sex,
        parameter: Parameter,
        age: u32,
    },
    /// The source parsed cleanly but contains no rows
    #[error("Lookup table from {source_name} contains no rows")]
    EmptyTable { source_name: String },
}

/// A [Row] represents a row in the GLI lookup table format
///
/// Column names follow the bundled GLI global lookup table: `Male`, `Param`,
/// `Age`, `M Spline`, `S Spline`, `L Spline`. Headers are lowercased before
/// deserialization, so matching is case-insensitive.
#[derive(Deserialize, Debug, Clone)]
struct Row {
    /// Sex code: 1 = male, 0 = female
    male: i64,
    /// Parameter name: fev1, fvc, or fev1fvc
    param: String,
    /// Age in whole years
    age: u32,
    /// M-spline offset for the median equation
    #[serde(rename = "m spline")]
    m_spline: f64,
    /// S-spline offset for the coefficient-of-variation equation
    #[serde(rename = "s spline")]
    s_spline: f64,
    /// L-spline offset, carried but unused by the published equations
    #[serde(rename = "l spline")]
    l_spline: f64,
}

/// Read a GLI lookup table CSV file and convert it to a [LookupTable]
///
/// The file must carry the columns `Male`, `Param`, `Age`, `M Spline`,
/// `S Spline`, and `L Spline` (any casing). Each (sex, parameter, age)
/// key must be unique.
///
/// # Arguments
///
/// * `path` - The path to the lookup table CSV file
///
/// # Returns
///
/// * `Result<LookupTable, GliError>` - The parsed table, or the first load error
///
/// # Example
///
/// ```rust,no_run
/// use spirosol::prelude::data::read_gli;
///
/// let table = read_gli("path/to/gli_lookuptable.csv").unwrap();
/// println!("Number of cells: {}", table.len());
/// ```
pub fn read_gli(path: impl AsRef<Path>) -> Result<LookupTable, GliError> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .has_headers(true)
        .from_path(path)
        .map_err(|e| GliError::CSVError(e.to_string()))?;

    parse_table(reader, &path.display().to_string())
}

/// Parse the bundled default lookup table
pub(crate) fn read_gli_default() -> Result<LookupTable, GliError> {
    let reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .has_headers(true)
        .from_reader(DEFAULT_TABLE.as_bytes());

    parse_table(reader, "<built-in table>")
}

fn parse_table<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    source_name: &str,
) -> Result<LookupTable, GliError> {
    // Convert headers to lowercase
    let headers = reader
        .headers()
        .map_err(|e| GliError::CSVError(e.to_string()))?
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>();
    reader.set_headers(csv::StringRecord::from(headers));

    let mut table = LookupTable::new();
    for row_result in reader.deserialize() {
        let row: Row = row_result.map_err(|e| GliError::CSVError(e.to_string()))?;
        let sex = Sex::from_code(row.male)?;
        let parameter: Parameter = row.param.parse()?;
        let splines = SplineSet {
            m: row.m_spline,
            s: row.s_spline,
            l: row.l_spline,
        };
        if table.insert(sex, parameter, row.age, splines).is_some() {
            return Err(GliError::DuplicateEntry {
                sex,
                parameter,
                age: row.age,
            });
        }
    }

    if table.is_empty() {
        return Err(GliError::EmptyTable {
            source_name: source_name.to_string(),
        });
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(data: &str) -> Result<LookupTable, GliError> {
        let reader = csv::ReaderBuilder::new()
            .comment(Some(b'#'))
            .has_headers(true)
            .from_reader(data.as_bytes());
        parse_table(reader, "<test>")
    }

    #[test]
    fn test_default_table_parses() {
        let table = read_gli_default().unwrap();
        assert_eq!(table.len(), 24);
        assert!(table.get(Sex::Female, Parameter::Fev1, 95).is_some());
        assert!(table.get(Sex::Male, Parameter::Fvc, 75).is_some());
        assert!(table.get(Sex::Female, Parameter::Fev1Fvc, 50).is_some());
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let table = parse_str(
            "MALE,PARAM,AGE,M SPLINE,S SPLINE,L SPLINE\n\
             1,fev1,40,0.01,0.002,0.0\n",
        )
        .unwrap();
        let splines = table.get(Sex::Male, Parameter::Fev1, 40).unwrap();
        assert_eq!(splines.m, 0.01);
        assert_eq!(splines.s, 0.002);
    }

    #[test]
    fn test_duplicate_key_is_an_error() {
        let result = parse_str(
            "Male,Param,Age,M Spline,S Spline,L Spline\n\
             0,fvc,60,0.01,0.002,0.0\n\
             0,fvc,60,0.02,0.003,0.0\n",
        );
        assert!(matches!(
            result,
            Err(GliError::DuplicateEntry {
                sex: Sex::Female,
                parameter: Parameter::Fvc,
                age: 60
            })
        ));
    }

    #[test]
    fn test_unknown_sex_code_is_an_error() {
        let result = parse_str(
            "Male,Param,Age,M Spline,S Spline,L Spline\n\
             2,fev1,40,0.01,0.002,0.0\n",
        );
        assert!(matches!(result, Err(GliError::UnknownSex(_))));
    }

    #[test]
    fn test_unknown_parameter_is_an_error() {
        let result = parse_str(
            "Male,Param,Age,M Spline,S Spline,L Spline\n\
             1,pef,40,0.01,0.002,0.0\n",
        );
        assert!(matches!(result, Err(GliError::UnknownParameter(_))));
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let result = parse_str(
            "Male,Param,Age,M Spline\n\
             1,fev1,40,0.01\n",
        );
        assert!(matches!(result, Err(GliError::CSVError(_))));
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let result = parse_str("Male,Param,Age,M Spline,S Spline,L Spline\n");
        assert!(matches!(result, Err(GliError::EmptyTable { .. })));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = read_gli("does/not/exist.csv");
        assert!(matches!(result, Err(GliError::CSVError(_))));
    }
}
