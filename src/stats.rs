use serde::Serialize;
use tracing::trace;

use crate::table::NumericTable;

/// One output row: the identifier as written in the input, and the mean of
/// that row's feature columns. Field names double as the CSV header `Id,y`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowMean {
    #[serde(rename = "Id")]
    pub id: String,
    pub y: f64,
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Reduces every data row to `(identifier, mean of features)`, in input order.
pub fn row_means(table: &NumericTable) -> Vec<RowMean> {
    table
        .rows()
        .iter()
        .map(|row| {
            let y = mean(&row.features);
            trace!(line = row.line, id = %row.id, y, "Row reduced");
            RowMean {
                id: row.id.clone(),
                y,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ReadOptions, parse};

    fn table(input: &str) -> NumericTable {
        parse(input.as_bytes(), ReadOptions::default()).unwrap()
    }

    #[test]
    fn test_mean_with_empty_slice() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_normal_values() {
        assert_eq!(mean(&[2.0, 4.0, 6.0]), 4.0);
        assert_eq!(mean(&[1.0, 2.0]), 1.5);
    }

    #[test]
    fn test_row_means_example() {
        let means = row_means(&table("Id,x1,x2,x3\n1,2,4,6\n2,10,20,30\n"));

        assert_eq!(
            means,
            vec![
                RowMean {
                    id: "1".to_string(),
                    y: 4.0
                },
                RowMean {
                    id: "2".to_string(),
                    y: 20.0
                },
            ]
        );
    }

    #[test]
    fn test_row_means_single_feature_is_identity() {
        let means = row_means(&table("Id,x\n1,3.25\n2,-7\n"));

        assert_eq!(means[0].y, 3.25);
        assert_eq!(means[1].y, -7.0);
    }

    #[test]
    fn test_row_means_preserves_order_and_ids() {
        let means = row_means(&table("Id,a,b\n30,1,2\n10,3,4\n20,5,6\n"));
        let ids: Vec<_> = means.iter().map(|m| m.id.as_str()).collect();

        assert_eq!(ids, vec!["30", "10", "20"]);
    }

    #[test]
    fn test_row_means_within_tolerance() {
        let means = row_means(&table("Id,a,b,c\n1,0.1,0.2,0.3\n"));

        assert!((means[0].y - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_row_means_nan_propagates() {
        let means = row_means(&table("Id,a,b\n1,nan,2\n"));

        assert!(means[0].y.is_nan());
    }
}
