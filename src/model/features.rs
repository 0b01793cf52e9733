use serde_json::Value;

/// The fixed column schema of the wine-quality model, in training order.
/// Input values are mapped to these columns positionally.
pub const FEATURE_NAMES: [&str; 11] = [
    "fixed acidity",
    "volatile acidity",
    "citric acid",
    "residual sugar",
    "chlorides",
    "free sulfur dioxide",
    "total sulfur dioxide",
    "density",
    "pH",
    "sulphates",
    "alcohol",
];

/// Ordered subset of features with input-distribution histograms,
/// as (input position, metric suffix).
pub const INSTRUMENTED_FEATURES: [(usize, &str); 2] =
    [(0, "fixed_acidity"), (1, "volatile_acidity")];

/// Reads the value at `index` as a float, failing on a missing index or a
/// non-numeric element. Inputs are not validated ahead of time; this is
/// where a short or malformed request first surfaces.
pub fn numeric_at(data: &[Value], index: usize) -> Result<f64, String> {
    let value = data
        .get(index)
        .ok_or_else(|| format!("input has no value at position {}", index))?;
    value
        .as_f64()
        .ok_or_else(|| format!("value at position {} is not numeric: {}", index, value))
}

/// A single-row table over the fixed feature columns.
///
/// Construction requires exact column/value-count alignment, so any input
/// whose length differs from the schema width is rejected here.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    values: Vec<f64>,
}

impl Frame {
    /// Builds a single row by mapping `data` onto the feature columns
    /// positionally.
    pub fn single_row(data: &[Value]) -> Result<Self, String> {
        if data.len() != FEATURE_NAMES.len() {
            return Err(format!(
                "expected exactly {} values for columns {:?}, got {}",
                FEATURE_NAMES.len(),
                FEATURE_NAMES,
                data.len()
            ));
        }
        let values = (0..data.len())
            .map(|i| numeric_at(data, i))
            .collect::<Result<Vec<f64>, String>>()?;
        Ok(Frame { values })
    }

    /// Builds a row directly from floats; width must match the schema.
    pub fn from_values(values: Vec<f64>) -> Result<Self, String> {
        if values.len() != FEATURE_NAMES.len() {
            return Err(format!(
                "expected exactly {} values, got {}",
                FEATURE_NAMES.len(),
                values.len()
            ));
        }
        Ok(Frame { values })
    }

    /// The row values, in column order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
