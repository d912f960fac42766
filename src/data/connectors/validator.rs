use super::types::{StatementKind, PERIOD_COLUMN};
use crate::error::ProviderError;
use polars::prelude::*;
use std::collections::HashMap;

pub struct StatementValidator;

impl StatementValidator {
    /// Fail when the period column or a required line item is missing outright
    pub fn validate(df: &DataFrame, kind: StatementKind) -> Result<(), ProviderError> {
        let columns = df.get_column_names();

        if !columns.iter().any(|c| c.as_str() == PERIOD_COLUMN) {
            return Err(ProviderError::DataNotAvailable(format!(
                "{} statement has no '{}' column",
                kind.as_str(),
                PERIOD_COLUMN
            )));
        }

        for required in kind.required_columns() {
            if !columns.iter().any(|c| c.as_str() == *required) {
                return Err(ProviderError::DataNotAvailable(format!(
                    "Missing line item '{}' in {} statement (available: {:?})",
                    required,
                    kind.as_str(),
                    columns
                )));
            }
        }

        let nulls = Self::check_nulls(df);
        if !nulls.is_empty() {
            log::debug!("{} statement has gaps: {:?}", kind.as_str(), nulls);
        }

        Ok(())
    }

    /// Null counts per line item column
    pub fn check_nulls(df: &DataFrame) -> HashMap<String, usize> {
        df.get_columns()
            .iter()
            .filter(|c| c.name().as_str() != PERIOD_COLUMN && c.null_count() > 0)
            .map(|c| (c.name().to_string(), c.null_count()))
            .collect()
    }
}
