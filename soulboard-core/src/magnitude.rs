use thiserror::Error;

/// Unit names for successive powers of 1000, starting at 1000^0.
pub const MAGNITUDE_SUFFIXES: [&str; 12] = ["", "k", "m", "b", "T", "q", "Q", "s", "S", "o", "N", "d"];

const MAGNITUDE_BASE: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MagnitudeError {
    /// The value sits outside the range the suffix table covers.
    #[error("{value} is outside the displayable range (magnitude {index})")]
    OutOfRange { value: f64, index: i64 },
    /// Zero, negative and non-finite values have no magnitude.
    #[error("{value} has no magnitude")]
    Undefined { value: f64 },
}

/// Render a positive number as `<mantissa with 3 decimals><suffix>`.
///
/// `1000` formats as `1.000k`: an exact power of 1000 takes the larger unit.
pub fn format_magnitude(value: f64) -> Result<String, MagnitudeError> {
    let index = magnitude_index(value)?;
    let suffix = usize::try_from(index)
        .ok()
        .and_then(|idx| MAGNITUDE_SUFFIXES.get(idx))
        .ok_or(MagnitudeError::OutOfRange { value, index })?;

    // index <= 11 here, so the cast is lossless.
    let mantissa = value / MAGNITUDE_BASE.powi(index as i32);
    Ok(format!("{:.3}{}", mantissa, suffix))
}

/// `floor(log_1000(value))` for finite positive values.
pub fn magnitude_index(value: f64) -> Result<i64, MagnitudeError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MagnitudeError::Undefined { value });
    }

    Ok((value.ln() / MAGNITUDE_BASE.ln()).floor() as i64)
}
