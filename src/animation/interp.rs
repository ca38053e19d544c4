use crate::foundation::error::{LyricueError, LyricueResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Behavior outside the breakpoint range.
pub enum Extrapolate {
    /// Hold the first/last output value.
    #[default]
    Clamp,
    /// Continue the first/last segment's slope.
    Extend,
}

/// Piecewise-linear map of `x` through `input -> output` breakpoints.
///
/// `input` must be finite and strictly increasing, and both slices must have the same
/// length (at least 2). Violations are errors rather than silently producing garbage.
pub fn interpolate(
    x: f64,
    input: &[f64],
    output: &[f64],
    extrapolate: Extrapolate,
) -> LyricueResult<f64> {
    validate_breakpoints(input, output)?;

    let last = input.len() - 1;
    if x.is_nan() {
        return Ok(output[0]);
    }
    if x <= input[0] {
        return Ok(match extrapolate {
            Extrapolate::Clamp => output[0],
            Extrapolate::Extend => segment(x, input, output, 0),
        });
    }
    if x >= input[last] {
        return Ok(match extrapolate {
            Extrapolate::Clamp => output[last],
            Extrapolate::Extend => segment(x, input, output, last - 1),
        });
    }

    // First breakpoint strictly greater than x; x > input[0] so idx >= 1.
    let idx = input.partition_point(|&v| v <= x);
    Ok(segment(x, input, output, idx - 1))
}

/// Check breakpoint shape without evaluating.
pub fn validate_breakpoints(input: &[f64], output: &[f64]) -> LyricueResult<()> {
    if input.len() != output.len() {
        return Err(LyricueError::interpolation(format!(
            "input has {} breakpoints but output has {}",
            input.len(),
            output.len()
        )));
    }
    if input.len() < 2 {
        return Err(LyricueError::interpolation(
            "at least 2 breakpoints are required",
        ));
    }
    if input.iter().chain(output).any(|v| !v.is_finite()) {
        return Err(LyricueError::interpolation("breakpoints must be finite"));
    }
    if !input.windows(2).all(|w| w[0] < w[1]) {
        return Err(LyricueError::interpolation(format!(
            "input range must be strictly increasing, got {input:?}"
        )));
    }
    Ok(())
}

fn segment(x: f64, input: &[f64], output: &[f64], i: usize) -> f64 {
    let (x0, x1) = (input[i], input[i + 1]);
    let (y0, y1) = (output[i], output[i + 1]);
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
