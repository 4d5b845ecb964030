use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    pub price_multiplier: f64,
    /// Annual indexation in percent, e.g. 5 for 5%.
    pub indexation_rate: f64,
    pub holding_years: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRecord {
    pub year: u32,
    pub old_tax: f64,
    pub new_tax: f64,
    pub indexed_cost: f64,
}

pub type Series = Vec<YearRecord>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Old,
    New,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Summary {
    #[serde(rename_all = "camelCase")]
    Crossover {
        year: u32,
        sell_price: f64,
        indexed_cost: f64,
        old_tax: f64,
        new_tax: f64,
    },
    /// No crossover inside the horizon; `favoured` is cheaper for the whole period.
    #[serde(rename_all = "camelCase")]
    Throughout { favoured: Regime, final_year: u32 },
}

#[derive(Debug, Clone)]
pub struct Comparison {
    pub parameters: Parameters,
    pub base_price: f64,
    pub sell_price: f64,
    pub series: Series,
    pub crossover: Option<YearRecord>,
    pub summary: Summary,
}
