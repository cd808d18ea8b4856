//! CSV input loaders.
//!
//! Exposure files carry one exposure per row:
//!
//! ```text
//! id,category,ead,ccf,covered,mitigant_weight,provisioning_rate
//! LOAN-1,CORPORATE_UNRATED,100,,40,0.20,
//! NPL-7,PAST_DUE,250,,,,0.5
//! ```
//!
//! Only `category` and `ead` are required; blank optional cells take their
//! defaults. NAV tables have a `date` column followed by one column per
//! instrument, with blank cells for missing observations.

use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;

use solva_core::types::{Date, Exposure, ExposureCategory, Mitigant, PricePoint, PriceSeries};

use crate::error::{CliError, CliResult};

const DATE_COLUMN: &str = "date";

/// Parses a decimal, accepting scientific notation.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Column positions of an exposure file.
struct ExposureColumns {
    id: Option<usize>,
    category: usize,
    ead: usize,
    ccf: Option<usize>,
    covered: Option<usize>,
    mitigant_weight: Option<usize>,
    provisioning_rate: Option<usize>,
}

impl ExposureColumns {
    fn locate(headers: &StringRecord, file: &str) -> CliResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| CliError::MissingColumn {
                file: file.to_string(),
                column: name.to_string(),
            })
        };

        Ok(Self {
            id: find("id"),
            category: require("category")?,
            ead: require("ead")?,
            ccf: find("ccf"),
            covered: find("covered"),
            mitigant_weight: find("mitigant_weight"),
            provisioning_rate: find("provisioning_rate"),
        })
    }
}

/// One row being decoded, for error reporting.
struct Row<'a> {
    file: &'a str,
    line: usize,
    record: &'a StringRecord,
}

impl Row<'_> {
    fn cell(&self, index: Option<usize>) -> Option<&str> {
        index
            .and_then(|i| self.record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn decimal(&self, index: Option<usize>, field: &str) -> CliResult<Option<Decimal>> {
        match self.cell(index) {
            None => Ok(None),
            Some(raw) => parse_decimal(raw).map(Some).ok_or_else(|| CliError::InvalidNumber {
                file: self.file.to_string(),
                line: self.line,
                field: field.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    fn required_decimal(&self, index: usize, field: &str) -> CliResult<Decimal> {
        self.decimal(Some(index), field)?
            .ok_or_else(|| CliError::InvalidNumber {
                file: self.file.to_string(),
                line: self.line,
                field: field.to_string(),
                value: String::new(),
            })
    }
}

/// Loads exposures from a CSV file.
///
/// Unrecognized category labels become [`ExposureCategory::Unclassified`],
/// weighted at the default 100%, and are reported with a warning.
pub fn load_exposures(path: &Path) -> CliResult<Vec<Exposure>> {
    let file = path.display().to_string();
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    let columns = ExposureColumns::locate(reader.headers()?, &file)?;

    let mut exposures = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line() as usize);
        let row = Row {
            file: &file,
            line,
            record: &record,
        };

        let label = row.cell(Some(columns.category)).unwrap_or_default();
        let category = ExposureCategory::parse_or_unclassified(label);
        if category == ExposureCategory::Unclassified {
            tracing::warn!(file = %file, line, label, "unrecognized category, applying default weight");
        }

        let ead = row.required_decimal(columns.ead, "ead")?;
        let mut exposure = Exposure::on_balance(category, ead);

        if let Some(id) = row.cell(columns.id) {
            exposure = exposure.with_id(id);
        }
        if let Some(ccf) = row.decimal(columns.ccf, "ccf")? {
            exposure = exposure.with_ccf(ccf);
        }
        if let Some(covered) = row.decimal(columns.covered, "covered")? {
            let weight = row
                .decimal(columns.mitigant_weight, "mitigant_weight")?
                .ok_or_else(|| CliError::InvalidNumber {
                    file: file.clone(),
                    line,
                    field: "mitigant_weight".to_string(),
                    value: String::new(),
                })?;
            exposure = exposure.with_mitigant(Mitigant::new(covered, weight));
        }
        if let Some(rate) = row.decimal(columns.provisioning_rate, "provisioning_rate")? {
            exposure = exposure.with_past_due(rate);
        }

        exposures.push(exposure);
    }

    if exposures.is_empty() {
        return Err(CliError::EmptyFile(file));
    }
    tracing::debug!(file = %file, count = exposures.len(), "exposures loaded");
    Ok(exposures)
}

/// Daily NAV observations for several instruments.
#[derive(Debug, Clone)]
pub struct NavTable {
    file: String,
    instruments: Vec<String>,
    dates: Vec<Date>,
    values: Vec<Vec<Option<Decimal>>>,
}

impl NavTable {
    /// Loads a NAV table from a CSV file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let file = path.display().to_string();
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
        let headers = reader.headers()?.clone();

        let date_index = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(DATE_COLUMN))
            .ok_or_else(|| CliError::MissingColumn {
                file: file.clone(),
                column: DATE_COLUMN.to_string(),
            })?;
        let instruments: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_index)
            .map(|(i, h)| (i, h.to_string()))
            .collect();

        let mut dates = Vec::new();
        let mut values = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line() as usize);
            let row = Row {
                file: &file,
                line,
                record: &record,
            };

            let raw_date = row.cell(Some(date_index)).unwrap_or_default();
            let date = Date::parse(raw_date)
                .map_err(|_| CliError::InvalidDate(format!("{file}, line {line}: '{raw_date}'")))?;

            let mut cells = Vec::with_capacity(instruments.len());
            for (index, name) in &instruments {
                cells.push(row.decimal(Some(*index), name)?);
            }
            dates.push(date);
            values.push(cells);
        }

        if dates.is_empty() {
            return Err(CliError::EmptyFile(file));
        }

        Ok(Self {
            file,
            instruments: instruments.into_iter().map(|(_, name)| name).collect(),
            dates,
            values,
        })
    }

    /// Instrument column names in file order.
    pub fn instruments(&self) -> &[String] {
        &self.instruments
    }

    /// Latest observation date.
    pub fn last_date(&self) -> Option<Date> {
        self.dates.iter().max().copied()
    }

    /// Observations of one instrument, skipping blank cells.
    pub fn series(&self, instrument: &str) -> CliResult<PriceSeries> {
        let column = self
            .instruments
            .iter()
            .position(|name| name == instrument)
            .ok_or_else(|| CliError::MissingColumn {
                file: self.file.clone(),
                column: instrument.to_string(),
            })?;

        let points = self
            .dates
            .iter()
            .zip(&self.values)
            .filter_map(|(date, row)| row[column].map(|value| PricePoint::new(*date, value)))
            .collect();

        Ok(PriceSeries::new(points)?)
    }

    /// Resolves which instrument to use: the requested one, or the only one.
    pub fn resolve_instrument(&self, requested: Option<&str>) -> CliResult<String> {
        match (requested, self.instruments.as_slice()) {
            (Some(name), _) => Ok(name.to_string()),
            (None, [only]) => Ok(only.clone()),
            (None, _) => Err(CliError::MissingArgument(format!(
                "--column (one of: {})",
                self.instruments.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(" 12.5 "), Some(Decimal::new(125, 1)));
        assert_eq!(parse_decimal("1e3"), Some(Decimal::new(1000, 0)));
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn test_load_exposures() {
        let file = csv_file(
            "id,category,ead,ccf,covered,mitigant_weight,provisioning_rate\n\
             LOAN-1,CORPORATE_UNRATED,100,,40,0.20,\n\
             NPL-7,Past due,250,,,,0.5\n\
             RCF,corporate a,500,0.5,,,\n\
             X,crypto,10,,,,\n",
        );
        let exposures = load_exposures(file.path()).unwrap();
        assert_eq!(exposures.len(), 4);

        assert_eq!(exposures[0].mitigant, Some(Mitigant::new(Decimal::from(40), Decimal::new(20, 2))));
        assert_eq!(exposures[1].category, ExposureCategory::PastDue);
        assert!(exposures[1].past_due.is_some());
        assert_eq!(exposures[2].credit_conversion_factor, Decimal::new(5, 1));
        assert_eq!(exposures[3].category, ExposureCategory::Unclassified);
    }

    #[test]
    fn test_exposure_errors() {
        let missing = csv_file("id,ead\nA,100\n");
        assert!(matches!(
            load_exposures(missing.path()),
            Err(CliError::MissingColumn { ref column, .. }) if column == "category"
        ));

        let bad = csv_file("category,ead\nRETAIL,1O0\n");
        let err = load_exposures(bad.path()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("1O0"));

        let no_weight = csv_file("category,ead,covered\nRETAIL,100,50\n");
        assert!(load_exposures(no_weight.path()).is_err());

        let empty = csv_file("category,ead\n");
        assert!(matches!(load_exposures(empty.path()), Err(CliError::EmptyFile(_))));
    }

    #[test]
    fn test_nav_table() {
        let file = csv_file(
            "date,SOROS,PAULSON\n\
             2015-03-02,100,50\n\
             2015-03-03,101,\n\
             2015-03-04 00:00:00,99,51\n",
        );
        let table = NavTable::load(file.path()).unwrap();
        assert_eq!(table.instruments(), ["SOROS".to_string(), "PAULSON".to_string()]);
        assert_eq!(table.last_date(), Some(Date::from_ymd(2015, 3, 4).unwrap()));
        assert_eq!(table.series("SOROS").unwrap().len(), 3);
        assert_eq!(table.series("PAULSON").unwrap().len(), 2);
        assert!(table.series("TIGER").is_err());

        assert!(table.resolve_instrument(None).is_err());
        assert_eq!(table.resolve_instrument(Some("PAULSON")).unwrap(), "PAULSON");
    }
}
