// src/engines/valuation/sensitivity.rs
use super::dcf::intrinsic_value_per_share;
use crate::error::{DcfError, Result};
use crate::types::{rate_label, round2, ValuationInputs, DEFAULT_HORIZON_YEARS, DEFAULT_TERMINAL_GROWTH};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Inputs held fixed across the sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepBase {
    pub avg_fcf: f64,
    pub shares_outstanding: Option<u64>,
    pub net_debt: f64,
    pub terminal_growth: f64,
    pub horizon_years: u32,
}

impl SweepBase {
    pub fn new(avg_fcf: f64, shares_outstanding: Option<u64>, net_debt: f64) -> Self {
        Self {
            avg_fcf,
            shares_outstanding,
            net_debt,
            terminal_growth: DEFAULT_TERMINAL_GROWTH,
            horizon_years: DEFAULT_HORIZON_YEARS,
        }
    }

    pub fn inputs(&self, growth_rate: f64, discount_rate: f64) -> ValuationInputs {
        ValuationInputs {
            avg_fcf: self.avg_fcf,
            shares_outstanding: self.shares_outstanding,
            net_debt: self.net_debt,
            growth_rate,
            discount_rate,
            terminal_growth: self.terminal_growth,
            horizon_years: self.horizon_years,
        }
    }
}

/// Per-share values over growth (rows) x discount (columns).
///
/// Cells are rounded to two decimals. A `None` cell marks a pair whose
/// discount rate does not exceed the terminal growth rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityMatrix {
    growth_rates: Vec<f64>,
    discount_rates: Vec<f64>,
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    cells: Vec<Vec<Option<f64>>>,
}

impl SensitivityMatrix {
    pub fn build(base: &SweepBase, growth_rates: &[f64], discount_rates: &[f64]) -> Result<Self> {
        let row_labels = unique_labels("growth", growth_rates)?;
        let column_labels = unique_labels("discount", discount_rates)?;

        let mut cells = Vec::with_capacity(growth_rates.len());

        for &growth in growth_rates {
            let mut row = Vec::with_capacity(discount_rates.len());
            for &discount in discount_rates {
                match intrinsic_value_per_share(&base.inputs(growth, discount)) {
                    Ok(value) => row.push(Some(round2(value))),
                    Err(DcfError::DegenerateRates { .. }) => {
                        log::warn!(
                            "Skipping growth {} / discount {}: discount must exceed terminal growth {}",
                            rate_label(growth),
                            rate_label(discount),
                            rate_label(base.terminal_growth)
                        );
                        row.push(None);
                    }
                    Err(e) => return Err(e),
                }
            }
            cells.push(row);
        }

        Ok(Self {
            growth_rates: growth_rates.to_vec(),
            discount_rates: discount_rates.to_vec(),
            row_labels,
            column_labels,
            cells,
        })
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    pub fn growth_rates(&self) -> &[f64] {
        &self.growth_rates
    }

    pub fn discount_rates(&self) -> &[f64] {
        &self.discount_rates
    }

    pub fn num_rows(&self) -> usize {
        self.cells.len()
    }

    pub fn num_columns(&self) -> usize {
        self.column_labels.len()
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.cells
    }

    /// Cell at (row, column) position; `None` when out of range or degenerate
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.cells.get(row)?.get(column).copied().flatten()
    }

    /// Cell addressed by its percentage labels, e.g. `("8%", "10%")`
    pub fn get_by_label(&self, growth: &str, discount: &str) -> Option<f64> {
        let row = self.row_labels.iter().position(|l| l == growth)?;
        let column = self.column_labels.iter().position(|l| l == discount)?;
        self.get(row, column)
    }

    /// (min, max) over defined cells, used for heatmap coloring
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Table form: a "growth" label column followed by one column per discount rate
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.column_labels.len() + 1);
        columns.push(Column::new("growth".into(), self.row_labels.clone()));

        for (j, label) in self.column_labels.iter().enumerate() {
            let values: Vec<Option<f64>> = self.cells.iter().map(|row| row[j]).collect();
            columns.push(Column::new(label.as_str().into(), values));
        }

        Ok(DataFrame::new(columns)?)
    }
}

/// Labels for one axis; two rates sharing a label would collide as table columns
fn unique_labels(axis: &str, rates: &[f64]) -> Result<Vec<String>> {
    let labels: Vec<String> = rates.iter().map(|&r| rate_label(r)).collect();
    for (i, label) in labels.iter().enumerate() {
        if labels[..i].contains(label) {
            return Err(DcfError::InvalidInput(format!(
                "Duplicate {} rate {}",
                axis, label
            )));
        }
    }
    Ok(labels)
}
