use crate::engines::valuation::SensitivityMatrix;
use crate::error::Result;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

pub struct MatrixExporter;

impl MatrixExporter {
    /// Write the sensitivity table as CSV, growth labels in the first column
    pub fn to_csv<P: AsRef<Path>>(matrix: &SensitivityMatrix, path: P) -> Result<()> {
        let mut df = matrix.to_dataframe()?;
        let mut file = File::create(path.as_ref())?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;

        log::info!("Exported sensitivity table to {}", path.as_ref().display());
        Ok(())
    }
}
