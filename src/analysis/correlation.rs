//! Pearson correlation between the numeric columns of the transaction table.

use super::prepare::PreparedRow;

/// The names of the correlated columns, in matrix order.
pub(super) const CORRELATION_COLUMNS: [&str; 4] = ["Amount_Abs", "Day", "Month", "Year"];

const COLUMN_COUNT: usize = CORRELATION_COLUMNS.len();

/// A symmetric matrix of correlation coefficients.
///
/// An entry is `None` when the coefficient is undefined, i.e. there are fewer
/// than two rows or one of the columns is constant.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CorrelationMatrix {
    pub values: [[Option<f64>; COLUMN_COUNT]; COLUMN_COUNT],
}

impl CorrelationMatrix {
    /// The coefficient between the columns at `row` and `column`.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.values
            .get(row)
            .and_then(|values| values.get(column))
            .copied()
            .flatten()
    }
}

/// The Pearson correlation coefficient of `xs` and `ys`.
///
/// Returns `None` if the slices differ in length, hold fewer than two values,
/// or either has zero variance.
pub(super) fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let count = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / count;
    let mean_y = ys.iter().sum::<f64>() / count;

    let (mut covariance, mut variance_x, mut variance_y) = (0.0, 0.0, 0.0);

    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    let divisor = (variance_x * variance_y).sqrt();

    if divisor == 0.0 || !divisor.is_finite() {
        return None;
    }

    Some((covariance / divisor).clamp(-1.0, 1.0))
}

fn columns(rows: &[PreparedRow<'_>]) -> [Vec<f64>; COLUMN_COUNT] {
    let mut amount_abs = Vec::with_capacity(rows.len());
    let mut day = Vec::with_capacity(rows.len());
    let mut month = Vec::with_capacity(rows.len());
    let mut year = Vec::with_capacity(rows.len());

    for row in rows {
        amount_abs.push(row.amount_abs);
        day.push(f64::from(row.day));
        month.push(f64::from(row.month));
        year.push(f64::from(row.year));
    }

    [amount_abs, day, month, year]
}

/// Correlate every pair of [CORRELATION_COLUMNS].
pub(super) fn correlation_matrix(rows: &[PreparedRow<'_>]) -> CorrelationMatrix {
    let columns = columns(rows);
    let mut values = [[None; COLUMN_COUNT]; COLUMN_COUNT];

    for i in 0..COLUMN_COUNT {
        for j in 0..=i {
            let coefficient = pearson(&columns[i], &columns[j]);
            values[i][j] = coefficient;
            values[j][i] = coefficient;
        }
    }

    CorrelationMatrix { values }
}
