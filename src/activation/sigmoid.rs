/// Logistic activation: `1 / (1 + e^-x)`.
///
/// Defined for every real `x`. Large magnitudes saturate to exactly `0.0` or
/// `1.0` instead of producing NaN, because `exp` overflows to `inf` and
/// `1 / inf == 0`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid expressed through its own output.
///
/// `y` must be the **already activated** value `sigmoid(x)`, not the
/// pre-activation input: `σ'(x) = y * (1 - y)`.
pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}
