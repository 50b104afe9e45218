//! Plain-text report tables.

use std::fmt;

use crate::runner::{ComparisonRun, RankedVehicle};

const NAME_WIDTH: usize = 20;

/// Ranking table, one line per vehicle, cheapest per mile first.
///
/// Columns: new-vehicle flag, name, `$/mi`, `$k/yr`, `$/mo`, years owned,
/// resale in `$k`, ten years at the yearly rate in `$k`, and cumulative
/// spend at loan payoff in `$k` (lifetime mode only).
pub struct RankingReport<'a>(pub &'a [RankedVehicle]);

impl fmt::Display for RankingReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>3}  {:<w$} {:>6} {:>6} {:>5} {:>7} {:>6} {:>6} {:>6}",
            "new",
            "NAME",
            "$/mi",
            "$k/yr",
            "$/mo",
            "yr own",
            "$sell",
            "$10yr",
            "$edln",
            w = NAME_WIDTH
        )?;
        for r in self.0 {
            let p = &r.profile;
            let payoff = p
                .cost_at_loan_payoff
                .map_or_else(|| "    -".to_string(), |c| format!("{:5.1}", c / 1000.0));
            writeln!(
                f,
                "{:>3}  {:<w$}  {:5.2}  {:5.1}  {:4.0}  {:6.1}  {:5.1}  {:5.1} {}",
                if r.is_new { "*" } else { " " },
                r.name,
                p.cost_per_mile,
                p.cost_per_year / 1000.0,
                p.cost_per_month(),
                p.years_owned,
                p.resale_value / 1000.0,
                p.ten_year_cost() / 1000.0,
                payoff,
                w = NAME_WIDTH
            )?;
        }
        Ok(())
    }
}

/// Year-by-year comparison table followed by the summary.
pub struct ComparisonReport<'a>(pub &'a ComparisonRun);

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let run = self.0;
        writeln!(f, "Car A: {}", run.summary.name_a)?;
        writeln!(f, "Car B: {}", run.summary.name_b)?;
        writeln!(f)?;
        writeln!(f, "Units: $1/1000")?;
        writeln!(
            f,
            "{:<4} {:>7} {:>6}  {:>5} {:>4}  {:>7} {:>6}",
            "Year", "Ayr", "Byr", "diffYr", "intYr", "YearTot", "Totl"
        )?;
        for r in &run.comparison.records {
            writeln!(f, "{r}")?;
        }
        writeln!(f)?;
        write!(f, "{}", run.summary)
    }
}
