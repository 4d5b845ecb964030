//! Terminal rendering of a comparison for the `compare` command.

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::core::{Comparison, FORMULA_LINES, YearRecord, base_price_line, rupees, summary_lines};

#[derive(Debug, Clone, Tabled)]
pub struct YearRow {
    #[tabled(rename = "Year")]
    year: u32,
    #[tabled(rename = "Indexed Cost")]
    indexed_cost: String,
    #[tabled(rename = "Old Tax (20% indexed)")]
    old_tax: String,
    #[tabled(rename = "New Tax (12.5% flat)")]
    new_tax: String,
    #[tabled(rename = "Cheaper")]
    cheaper: &'static str,
}

impl From<&YearRecord> for YearRow {
    fn from(record: &YearRecord) -> Self {
        let cheaper = if record.old_tax < record.new_tax {
            "old"
        } else if record.new_tax < record.old_tax {
            "new"
        } else {
            "-"
        };
        Self {
            year: record.year,
            indexed_cost: rupees(record.indexed_cost),
            old_tax: rupees(record.old_tax),
            new_tax: rupees(record.new_tax),
            cheaper,
        }
    }
}

/// Picks the rows to print: every `every`-th year, plus year 0, the crossover
/// year and the final year.
pub fn select_rows(comparison: &Comparison, every: u32) -> Vec<YearRow> {
    let every = every.max(1);
    let final_year = comparison.series.last().map(|r| r.year);
    let crossover_year = comparison.crossover.map(|r| r.year);

    comparison
        .series
        .iter()
        .filter(|r| {
            r.year % every == 0 || Some(r.year) == final_year || Some(r.year) == crossover_year
        })
        .map(YearRow::from)
        .collect()
}

pub fn render(comparison: &Comparison, every: u32) -> String {
    let rows = select_rows(comparison, every);
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();

    let mut out = String::new();
    out.push_str(&base_price_line());
    out.push('\n');
    out.push_str(&format!(
        "Sell price: {} ({}x)\n",
        rupees(comparison.sell_price),
        comparison.parameters.price_multiplier
    ));
    out.push_str(&table);
    out.push_str("\n\n");
    for line in summary_lines(&comparison.summary) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str("\nTax Calculation Formulas:\n");
    for line in FORMULA_LINES {
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Parameters, compare};

    fn comparison(price_multiplier: f64, indexation_rate: f64, holding_years: u32) -> Comparison {
        compare(&Parameters {
            price_multiplier,
            indexation_rate,
            holding_years,
        })
    }

    #[test]
    fn select_rows_keeps_start_crossover_and_final_year() {
        let comparison = comparison(3.0, 5.0, 70);
        let years: Vec<u32> = select_rows(&comparison, 10)
            .iter()
            .map(|row| row.year)
            .collect();

        assert_eq!(years, vec![0, 10, 12, 20, 30, 40, 50, 60, 70]);
    }

    #[test]
    fn select_rows_treats_zero_step_as_every_year() {
        let comparison = comparison(2.0, 1.0, 4);
        assert_eq!(select_rows(&comparison, 0).len(), 5);
    }

    #[test]
    fn row_marks_cheaper_regime() {
        let comparison = comparison(3.0, 5.0, 70);
        let rows = select_rows(&comparison, 70);
        assert_eq!(rows[0].cheaper, "new");
        assert_eq!(rows.last().map(|r| r.cheaper), Some("old"));
        assert_eq!(rows[0].old_tax, "₹40,00,000");
    }

    #[test]
    fn render_includes_table_summary_and_formulas() {
        let out = render(&comparison(50.0, 0.0, 3), 1);

        assert!(out.starts_with("Base property value: ₹1,00,00,000 (1 Crore)\n"));
        assert!(out.contains("Sell price: ₹50,00,00,000 (50x)"));
        assert!(out.contains("Indexed Cost"));
        assert!(out.contains("₹9,80,00,000"));
        assert!(out.contains("₹6,12,50,000"));
        assert!(out.contains(
            "New tax system remains more advantageous throughout the selected holding period."
        ));
        assert!(out.contains("Indexed Cost = Purchase Price * (1 + Indexation Rate)^Years"));
    }
}
