//! Triple file writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{LineTerminator, TripleWriteOptions};
use gridcalc_core::FormulaTriple;

/// Triple file writer
pub struct TripleWriter;

impl TripleWriter {
    /// Write triples to a file
    pub fn write_file<'a, I, P>(triples: I, path: P, options: &TripleWriteOptions) -> CsvResult<()>
    where
        I: IntoIterator<Item = &'a FormulaTriple>,
        P: AsRef<Path>,
    {
        let file = File::create(path)?;
        Self::write(triples, file, options)
    }

    /// Write triples to a writer
    ///
    /// Triples with empty formula text are skipped; an empty cell is never
    /// persisted.
    pub fn write<'a, I, W>(triples: I, writer: W, options: &TripleWriteOptions) -> CsvResult<()>
    where
        I: IntoIterator<Item = &'a FormulaTriple>,
        W: Write,
    {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        if options.write_header {
            csv_writer.write_record(["row", "column", "formula"])?;
        }

        for triple in triples {
            if triple.formula.is_empty() {
                continue;
            }
            csv_writer.write_record([
                triple.row.to_string(),
                triple.column.to_string(),
                triple.formula.clone(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
