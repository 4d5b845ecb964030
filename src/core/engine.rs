use super::types::{Comparison, Parameters, Regime, Series, Summary, YearRecord};

/// Purchase price every comparison starts from: 1 crore.
pub const BASE_PRICE: f64 = 10_000_000.0;
/// Old regime: 20% of the gain over the indexed cost.
pub const OLD_REGIME_RATE: f64 = 0.20;
/// New regime: 12.5% flat on the unindexed gain.
pub const NEW_REGIME_RATE: f64 = 0.125;

pub fn sell_price(price_multiplier: f64) -> f64 {
    BASE_PRICE * price_multiplier
}

pub fn compute_series(price_multiplier: f64, indexation_rate: f64, holding_years: u32) -> Series {
    (0..=holding_years)
        .map(|year| year_record(year, price_multiplier, indexation_rate))
        .collect()
}

pub fn year_record(year: u32, price_multiplier: f64, indexation_rate: f64) -> YearRecord {
    let sell_price = sell_price(price_multiplier);
    let indexation_factor = (1.0 + indexation_rate / 100.0).powf(f64::from(year));
    let indexed_cost = BASE_PRICE * indexation_factor;

    let capital_gain = floor_at_zero(sell_price - indexed_cost);
    let old_tax = capital_gain * OLD_REGIME_RATE;
    // Flat regime ignores indexation, so this is the same for every year.
    let new_tax = floor_at_zero((sell_price - BASE_PRICE) * NEW_REGIME_RATE);

    YearRecord {
        year,
        old_tax,
        new_tax,
        indexed_cost,
    }
}

/// First year where the flat regime costs strictly more than the indexed one.
pub fn find_crossover(series: &[YearRecord]) -> Option<&YearRecord> {
    series.iter().find(|record| record.new_tax > record.old_tax)
}

pub fn summarize(
    series: &[YearRecord],
    crossover: Option<&YearRecord>,
    parameters: &Parameters,
) -> Summary {
    if let Some(point) = crossover {
        return Summary::Crossover {
            year: point.year,
            sell_price: sell_price(parameters.price_multiplier),
            indexed_cost: point.indexed_cost,
            old_tax: point.old_tax,
            new_tax: point.new_tax,
        };
    }

    let Some(final_year) = series.last() else {
        return Summary::Throughout {
            favoured: Regime::New,
            final_year: 0,
        };
    };
    // Ties fall through to the new regime.
    let favoured = if final_year.old_tax < final_year.new_tax {
        Regime::Old
    } else {
        Regime::New
    };
    Summary::Throughout {
        favoured,
        final_year: final_year.year,
    }
}

pub fn compare(parameters: &Parameters) -> Comparison {
    let series = compute_series(
        parameters.price_multiplier,
        parameters.indexation_rate,
        parameters.holding_years,
    );
    let crossover = find_crossover(&series).copied();
    let summary = summarize(&series, crossover.as_ref(), parameters);

    match &summary {
        Summary::Crossover { year, .. } => {
            log::debug!("Crossover at year {year} for {parameters:?}");
        }
        Summary::Throughout { favoured, .. } => {
            log::debug!("No crossover for {parameters:?}, {favoured:?} regime favoured");
        }
    }

    Comparison {
        parameters: *parameters,
        base_price: BASE_PRICE,
        sell_price: sell_price(parameters.price_multiplier),
        series,
        crossover,
        summary,
    }
}

// f64::max would swallow NaN; keep it visible.
fn floor_at_zero(value: f64) -> f64 {
    if value < 0.0 { 0.0 } else { value }
}
