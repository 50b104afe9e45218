//! CSV export for rankings and comparisons.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::compare::ComparisonYearRecord;
use crate::runner::RankedVehicle;

/// Column header for ranking export.
const RANKING_HEADER: &str = "rank,name,is_new,cost_per_mile,cost_per_year,cost_per_month,\
                              years_owned,resale_value,ten_year_cost,cost_at_loan_payoff";

/// Column header for comparison export.
const COMPARISON_HEADER: &str =
    "year,cost_a,cost_b,diff,opportunity_accrual,year_total,running_balance";

/// Exports a ranking to a CSV file at the given path.
///
/// # Arguments
///
/// * `ranked` - Evaluated vehicles in rank order
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_ranking_csv(ranked: &[RankedVehicle], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_ranking_csv(ranked, io::BufWriter::new(file))
}

/// Writes a ranking as CSV to any writer.
///
/// `cost_at_loan_payoff` is left empty for annualized profiles.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_ranking_csv(ranked: &[RankedVehicle], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(RANKING_HEADER.split(',').map(str::trim))?;

    for r in ranked {
        let p = &r.profile;
        wtr.write_record(&[
            r.rank.to_string(),
            r.name.clone(),
            r.is_new.to_string(),
            format!("{:.4}", p.cost_per_mile),
            format!("{:.2}", p.cost_per_year),
            format!("{:.2}", p.cost_per_month()),
            format!("{:.3}", p.years_owned),
            format!("{:.2}", p.resale_value),
            format!("{:.2}", p.ten_year_cost()),
            p.cost_at_loan_payoff
                .map(|c| format!("{c:.2}"))
                .unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports comparison year records to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_comparison_csv(records: &[ComparisonYearRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_comparison_csv(records, io::BufWriter::new(file))
}

/// Writes comparison year records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_comparison_csv(records: &[ComparisonYearRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(COMPARISON_HEADER.split(','))?;

    for r in records {
        wtr.write_record(&[
            r.year.to_string(),
            format!("{:.2}", r.cost_a),
            format!("{:.2}", r.cost_b),
            format!("{:.2}", r.diff),
            format!("{:.2}", r.opportunity_accrual),
            format!("{:.2}", r.year_total),
            format!("{:.2}", r.running_balance),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{CostBreakdown, CostMode, VehicleCostProfile};

    fn ranked(rank: usize, name: &str, payoff: Option<f64>) -> RankedVehicle {
        RankedVehicle {
            rank,
            name: name.to_string(),
            is_new: rank % 2 == 1,
            profile: VehicleCostProfile {
                mode: if payoff.is_some() {
                    CostMode::lifetime()
                } else {
                    CostMode::Annualized
                },
                initial_cost: 25_000.0,
                recurring_cost: 2_000.0,
                total_cost: 35_000.0,
                cost_per_mile: 0.35,
                cost_per_year: 3_500.0,
                resale_value: 5_000.0,
                years_owned: 10.0,
                miles_driven: 100_000.0,
                cost_at_loan_payoff: payoff,
                breakdown: CostBreakdown {
                    purchase_with_tax: 23_000.0,
                    sales_tax: 1_000.0,
                    interest: 2_000.0,
                    fuel: 8_000.0,
                    maintenance: 4_000.0,
                    insurance: 8_000.0,
                },
            },
        }
    }

    fn record(year: u32) -> ComparisonYearRecord {
        ComparisonYearRecord {
            year,
            cost_a: 12_000.0,
            cost_b: 10_000.0,
            diff: 2_000.0,
            opportunity_accrual: 40.0,
            year_total: 2_040.0,
            running_balance: 2_040.0 * f64::from(year),
        }
    }

    #[test]
    fn ranking_header_is_fixed() {
        let mut buf = Vec::new();
        write_ranking_csv(&[ranked(1, "civic", Some(30_000.0))], &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let first_line = output.lines().next().unwrap();
        assert_eq!(
            first_line,
            "rank,name,is_new,cost_per_mile,cost_per_year,cost_per_month,\
             years_owned,resale_value,ten_year_cost,cost_at_loan_payoff"
        );
    }

    #[test]
    fn ranking_row_count_and_empty_payoff() {
        let rows = vec![
            ranked(1, "Model 3 SR", None),
            ranked(2, "Model 3", None),
            ranked(3, "Model Y", None),
        ];
        let mut buf = Vec::new();
        write_ranking_csv(&rows, &mut buf).unwrap();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(&records[0][1], "Model 3 SR");
        assert_eq!(&records[0][9], "");
        assert_eq!(records[1][3].parse::<f64>().unwrap(), 0.35);
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let mut buf = Vec::new();
        write_ranking_csv(&[ranked(1, "civic, used", Some(1.0))], &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("\"civic, used\""));
    }

    #[test]
    fn comparison_rows_match_records() {
        let records: Vec<ComparisonYearRecord> = (1..=15).map(record).collect();
        let mut buf = Vec::new();
        write_comparison_csv(&records, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        // 1 header + 15 data rows
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], COMPARISON_HEADER);
        assert_eq!(lines[1], "1,12000.00,10000.00,2000.00,40.00,2040.00,2040.00");
    }

    #[test]
    fn deterministic_output() {
        let records: Vec<ComparisonYearRecord> = (1..=5).map(record).collect();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_comparison_csv(&records, &mut buf1).unwrap();
        write_comparison_csv(&records, &mut buf2).unwrap();
        assert_eq!(buf1, buf2);
    }
}
