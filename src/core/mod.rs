mod engine;
mod narrative;
mod types;

pub use engine::{
    BASE_PRICE, NEW_REGIME_RATE, OLD_REGIME_RATE, compare, compute_series, find_crossover,
    sell_price, summarize, year_record,
};
pub use narrative::{FORMULA_LINES, base_price_line, format_inr, rupees, summary_lines};
pub use types::{Comparison, Parameters, Regime, Series, Summary, YearRecord};
