//! Triple file reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::TripleReadOptions;
use gridcalc_core::FormulaTriple;

/// Triple file reader
pub struct TripleReader;

impl TripleReader {
    /// Read triples from a file
    pub fn read_file<P: AsRef<Path>>(
        path: P,
        options: &TripleReadOptions,
    ) -> CsvResult<Vec<FormulaTriple>> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read triples from a reader
    pub fn read<R: Read>(reader: R, options: &TripleReadOptions) -> CsvResult<Vec<FormulaTriple>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(options.has_header)
            .flexible(true)
            .from_reader(reader);

        let mut triples = Vec::new();

        for (index, result) in csv_reader.records().enumerate() {
            let record = result?;
            let number = index + 1;

            if record.len() != 3 {
                return Err(CsvError::Parse {
                    record: number,
                    message: format!("expected 3 fields, found {}", record.len()),
                });
            }

            let row = Self::parse_coordinate(&record[0], "row", number)?;
            let column = Self::parse_coordinate(&record[1], "column", number)?;

            triples.push(FormulaTriple::new(row, column, &record[2]));
        }

        Ok(triples)
    }

    fn parse_coordinate(field: &str, name: &str, record: usize) -> CsvResult<u16> {
        field.trim().parse().map_err(|_| CsvError::Parse {
            record,
            message: format!("invalid {} '{}'", name, field),
        })
    }
}
