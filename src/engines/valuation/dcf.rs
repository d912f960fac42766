// src/engines/valuation/dcf.rs
use crate::error::{DcfError, Result};
use crate::types::{ValuationBreakdown, ValuationInputs, MAX_HORIZON_YEARS};

/// Intrinsic equity value per share.
///
/// Projects `avg_fcf` forward at `growth_rate` for `horizon_years` periods,
/// discounts each flow at `discount_rate`, adds a Gordon-growth terminal value
/// and subtracts net debt. Returns exactly `0.0` when there is no positive
/// share count.
pub fn intrinsic_value_per_share(inputs: &ValuationInputs) -> Result<f64> {
    valuation_breakdown(inputs).map(|b| b.per_share)
}

/// Same computation as [`intrinsic_value_per_share`], keeping every step.
pub fn valuation_breakdown(inputs: &ValuationInputs) -> Result<ValuationBreakdown> {
    validate(inputs)?;

    let growth = 1.0 + inputs.growth_rate;
    let discount = 1.0 + inputs.discount_rate;
    // compounded jointly; separate powers overflow first
    let ratio = growth / discount;
    let n = inputs.horizon_years as i32;

    let discounted_flows: Vec<f64> = (1..=n)
        .map(|t| inputs.avg_fcf * ratio.powi(t))
        .collect();

    let terminal_fcf = inputs.avg_fcf * growth.powi(n);
    let terminal_value = terminal_fcf * (1.0 + inputs.terminal_growth)
        / (inputs.discount_rate - inputs.terminal_growth);
    let terminal_value_pv = inputs.avg_fcf * ratio.powi(n) * (1.0 + inputs.terminal_growth)
        / (inputs.discount_rate - inputs.terminal_growth);

    let enterprise_value = discounted_flows.iter().sum::<f64>() + terminal_value_pv;
    let equity_value = enterprise_value - inputs.net_debt;

    let per_share = match inputs.shares_outstanding {
        Some(shares) if shares > 0 => equity_value / shares as f64,
        _ => 0.0,
    };

    let results = [
        ("terminal value", terminal_value),
        ("enterprise value", enterprise_value),
        ("per-share value", per_share),
    ];
    if let Some((name, value)) = results.iter().find(|(_, v)| !v.is_finite()) {
        return Err(DcfError::InvalidInput(format!(
            "{} overflows over {} periods: {}",
            name, inputs.horizon_years, value
        )));
    }

    Ok(ValuationBreakdown {
        discounted_flows,
        terminal_value,
        terminal_value_pv,
        enterprise_value,
        equity_value,
        per_share,
    })
}

fn validate(inputs: &ValuationInputs) -> Result<()> {
    let numbers = [
        ("average FCF", inputs.avg_fcf),
        ("net debt", inputs.net_debt),
        ("growth rate", inputs.growth_rate),
        ("discount rate", inputs.discount_rate),
        ("terminal growth", inputs.terminal_growth),
    ];
    if let Some((name, value)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
        return Err(DcfError::InvalidInput(format!("{} is not finite: {}", name, value)));
    }
    if inputs.horizon_years == 0 {
        return Err(DcfError::InvalidInput(
            "Projection horizon must be at least one period".to_string(),
        ));
    }
    if inputs.horizon_years > MAX_HORIZON_YEARS {
        return Err(DcfError::InvalidInput(format!(
            "Projection horizon {} exceeds {} periods",
            inputs.horizon_years, MAX_HORIZON_YEARS
        )));
    }
    if inputs.discount_rate <= inputs.terminal_growth {
        return Err(DcfError::DegenerateRates {
            discount_rate: inputs.discount_rate,
            terminal_growth: inputs.terminal_growth,
        });
    }
    Ok(())
}
