use crate::{
    animation::ease::Ease,
    foundation::error::{CurveError, CurveResult},
};

/// Policy for inputs outside the breakpoint range on one side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Continue the outermost segment's slope.
    #[default]
    Extend,
    /// Pin to the boundary output value.
    Clamp,
    /// Return the input unchanged.
    Identity,
}

/// Options for [`interpolate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterpolateOptions {
    /// Behavior below the first input breakpoint.
    #[serde(default)]
    pub extrapolate_left: Extrapolate,
    /// Behavior above the last input breakpoint.
    #[serde(default)]
    pub extrapolate_right: Extrapolate,
    /// Curve applied to the normalized position inside the chosen segment.
    #[serde(default)]
    pub easing: Ease,
}

impl InterpolateOptions {
    /// Clamp on both sides.
    pub fn clamped() -> Self {
        Self {
            extrapolate_left: Extrapolate::Clamp,
            extrapolate_right: Extrapolate::Clamp,
            easing: Ease::Linear,
        }
    }

    /// Clamp below the first breakpoint, extend above.
    pub fn clamp_left() -> Self {
        Self {
            extrapolate_left: Extrapolate::Clamp,
            ..Self::default()
        }
    }

    /// Clamp above the last breakpoint, extend below.
    pub fn clamp_right() -> Self {
        Self {
            extrapolate_right: Extrapolate::Clamp,
            ..Self::default()
        }
    }

    /// Replace the easing curve.
    pub fn with_easing(mut self, easing: Ease) -> Self {
        self.easing = easing;
        self
    }
}

/// Piecewise-linear mapping between validated breakpoint sequences.
///
/// Construction checks the breakpoint contract once; [`RangeMap::map`] then only rejects NaN
/// inputs.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RangeMap {
    input: Vec<f64>,
    output: Vec<f64>,
    opts: InterpolateOptions,
}

impl RangeMap {
    /// Validate breakpoints and build a reusable mapping.
    pub fn new(input: &[f64], output: &[f64], opts: InterpolateOptions) -> CurveResult<Self> {
        validate_ranges(input, output)?;
        Ok(Self {
            input: input.to_vec(),
            output: output.to_vec(),
            opts,
        })
    }

    /// Input breakpoints.
    pub fn input(&self) -> &[f64] {
        &self.input
    }

    /// Output breakpoints.
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// Map `x` through the ranges.
    pub fn map(&self, x: f64) -> CurveResult<f64> {
        if x.is_nan() {
            return Err(CurveError::interpolation("input value must not be NaN"));
        }
        Ok(map_unchecked(x, &self.input, &self.output, self.opts))
    }
}

/// Remap `input` from the piecewise-linear scale `input_range` onto `output_range`.
///
/// Fails fast when the ranges differ in length, have fewer than two breakpoints, contain
/// non-finite values, or when `input_range` is not strictly increasing. These always point at a
/// timing bug in the caller.
pub fn interpolate(
    input: f64,
    input_range: &[f64],
    output_range: &[f64],
    opts: InterpolateOptions,
) -> CurveResult<f64> {
    validate_ranges(input_range, output_range)?;
    if input.is_nan() {
        return Err(CurveError::interpolation("input value must not be NaN"));
    }
    Ok(map_unchecked(input, input_range, output_range, opts))
}

fn validate_ranges(input_range: &[f64], output_range: &[f64]) -> CurveResult<()> {
    if input_range.len() != output_range.len() {
        return Err(CurveError::interpolation(format!(
            "input range ({} values) and output range ({} values) must have the same length",
            input_range.len(),
            output_range.len()
        )));
    }
    if input_range.len() < 2 {
        return Err(CurveError::interpolation(format!(
            "ranges need at least 2 breakpoints, got {}",
            input_range.len()
        )));
    }
    if let Some(v) = input_range.iter().find(|v| !v.is_finite()) {
        return Err(CurveError::interpolation(format!(
            "input range must be finite, got {v}"
        )));
    }
    if let Some(v) = output_range.iter().find(|v| !v.is_finite()) {
        return Err(CurveError::interpolation(format!(
            "output range must be finite, got {v}"
        )));
    }
    if let Some(w) = input_range.windows(2).find(|w| w[0] >= w[1]) {
        return Err(CurveError::interpolation(format!(
            "input range must be strictly increasing, got {} then {}",
            w[0], w[1]
        )));
    }
    Ok(())
}

fn map_unchecked(x: f64, input_range: &[f64], output_range: &[f64], opts: InterpolateOptions) -> f64 {
    let seg = find_segment(x, input_range);
    map_segment(
        x,
        (input_range[seg], input_range[seg + 1]),
        (output_range[seg], output_range[seg + 1]),
        opts,
    )
}

// First segment whose right breakpoint is >= x, else the last one.
fn find_segment(x: f64, input_range: &[f64]) -> usize {
    let last = input_range.len() - 1;
    let mut i = 1;
    while i < last && input_range[i] < x {
        i += 1;
    }
    i - 1
}

fn map_segment(
    x: f64,
    (in_min, in_max): (f64, f64),
    (out_min, out_max): (f64, f64),
    opts: InterpolateOptions,
) -> f64 {
    if x == in_min {
        return out_min;
    }
    if x == in_max {
        return out_max;
    }

    if x < in_min {
        match opts.extrapolate_left {
            Extrapolate::Identity => return x,
            Extrapolate::Clamp => return out_min,
            Extrapolate::Extend => {}
        }
    }
    if x > in_max {
        match opts.extrapolate_right {
            Extrapolate::Identity => return x,
            Extrapolate::Clamp => return out_max,
            Extrapolate::Extend => {}
        }
    }

    if out_min == out_max {
        return out_min;
    }

    let t = opts.easing.eval((x - in_min) / (in_max - in_min));
    let v = t * (out_max - out_min) + out_min;
    if (in_min..=in_max).contains(&x) {
        // Keep rounding from stepping past the segment's output bounds.
        v.clamp(out_min.min(out_max), out_min.max(out_max))
    } else {
        v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
