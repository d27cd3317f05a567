//! Delimited text export of an analysis run.
//!
//! Renders the sample set and its per-sample statistics as comma-separated
//! text: one column per dimension (`X1..Xp`), then `T2`,
//! `Mahalanobis_Distance`, and `Is_Outlier` encoded as 1/0. Row order
//! mirrors draw order.

use crate::analyzer::EllipticalAnalysis;

/// Serialize the sample set and derived statistics to delimited text.
///
/// # Example
/// ```rust
/// use mspc_engine::{analyze, export_delimited, EllipticalConfig};
///
/// let analysis = analyze(&EllipticalConfig {
///     seed: Some(7),
///     ..EllipticalConfig::default()
/// })
/// .unwrap();
/// let csv = export_delimited(&analysis);
/// assert!(csv.starts_with("X1,X2,T2,Mahalanobis_Distance,Is_Outlier\n"));
/// ```
pub fn export_delimited(analysis: &EllipticalAnalysis) -> String {
    let dimension = analysis.covariance.len();

    let mut header: Vec<String> = (1..=dimension).map(|i| format!("X{}", i)).collect();
    header.push("T2".to_string());
    header.push("Mahalanobis_Distance".to_string());
    header.push("Is_Outlier".to_string());

    let mut lines = Vec::with_capacity(analysis.samples.len() + 1);
    lines.push(header.join(","));

    for (idx, sample) in analysis.samples.iter().enumerate() {
        let t2 = analysis.t2_values[idx];
        let mut fields: Vec<String> = sample.iter().map(|v| v.to_string()).collect();
        fields.push(t2.to_string());
        fields.push(t2.sqrt().to_string());
        fields.push(if analysis.outliers[idx] { "1" } else { "0" }.to_string());
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{analyze, EllipticalConfig};

    fn small_analysis() -> EllipticalAnalysis {
        analyze(&EllipticalConfig {
            sample_count: 5,
            seed: Some(99),
            ..EllipticalConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_header_and_row_count() {
        let analysis = small_analysis();
        let csv = export_delimited(&analysis);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "X1,X2,T2,Mahalanobis_Distance,Is_Outlier");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_row_fields_round_trip() {
        let analysis = small_analysis();
        let csv = export_delimited(&analysis);
        let first_row: Vec<&str> = csv.lines().nth(1).unwrap().split(',').collect();

        assert_eq!(first_row.len(), 5);
        let x1: f64 = first_row[0].parse().unwrap();
        let t2: f64 = first_row[2].parse().unwrap();
        let distance: f64 = first_row[3].parse().unwrap();

        assert_eq!(x1, analysis.samples[0][0]);
        assert_eq!(t2, analysis.t2_values[0]);
        assert!((distance - t2.sqrt()).abs() < 1e-12);
        assert!(first_row[4] == "0" || first_row[4] == "1");
    }

    #[test]
    fn test_outlier_flag_encoding() {
        let analysis = small_analysis();
        let csv = export_delimited(&analysis);
        for (line, &flag) in csv.lines().skip(1).zip(&analysis.outliers) {
            let encoded = line.rsplit(',').next().unwrap();
            assert_eq!(encoded, if flag { "1" } else { "0" });
        }
    }
}
