use crate::schema::{NUMERIC_COLUMNS, REVENUE_ADJ};
use polars::prelude::*;
use tracing::debug;

/// Symmetric Pearson matrix. `values[i][j]` pairs `fields[i]` with `fields[j]`;
/// undefined coefficients are `NaN`.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub fields: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        Some(self.values[self.position(a)?][self.position(b)?])
    }

    /// The `n` other fields most positively correlated with `field`. Undefined
    /// coefficients are left out.
    pub fn strongest_with(&self, field: &str, n: usize) -> Vec<(String, f64)> {
        let Some(i) = self.position(field) else {
            return Vec::new();
        };
        let mut ranked: Vec<(String, f64)> = self
            .fields
            .iter()
            .zip(self.values[i].iter())
            .enumerate()
            .filter(|(j, (_, r))| *j != i && r.is_finite())
            .map(|(_, (name, r))| (name.clone(), *r))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

/// Pearson coefficient over pairwise-complete observations. `NaN` when fewer
/// than two pairs remain or either side has zero variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let (dx, dy) = (a - mean_x, b - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

/// Pairwise Pearson matrix over `columns` of `df`, in the given order.
pub fn correlation_matrix(df: &DataFrame, columns: &[&str]) -> PolarsResult<CorrelationMatrix> {
    let mut data: Vec<Vec<Option<f64>>> = Vec::with_capacity(columns.len());
    for name in columns {
        let values = df.column(name)?.cast(&DataType::Float64)?;
        data.push(values.f64()?.into_iter().collect());
    }

    let k = columns.len();
    let mut values = vec![vec![f64::NAN; k]; k];
    for i in 0..k {
        for j in i..k {
            let r = pearson(&data[i], &data[j]);
            // a defined self-correlation is exactly one
            let r = if i == j && r.is_finite() { 1.0 } else { r };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        fields: columns.iter().map(|c| c.to_string()).collect(),
        values,
    })
}

/// De-duplicates `raw`, keeps the `top_n` rows with the highest
/// `revenue_adj`, and correlates every numeric column present.
pub fn revenue_correlation(raw: &DataFrame, top_n: usize) -> PolarsResult<CorrelationMatrix> {
    let top = raw
        .unique_stable(None, UniqueKeepStrategy::First, None)?
        .sort(
            [REVENUE_ADJ],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true)
                .with_maintain_order(true),
        )?
        .head(Some(top_n));

    let numeric: Vec<&str> = NUMERIC_COLUMNS
        .into_iter()
        .filter(|name| top.column(name).is_ok())
        .collect();
    debug!(
        "correlating {} columns over {} top-revenue rows",
        numeric.len(),
        top.height()
    );

    correlation_matrix(&top, &numeric)
}
