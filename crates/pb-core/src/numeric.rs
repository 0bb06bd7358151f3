use crate::PbError;

/// Floating point type used for every canvas coordinate.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PbError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PbError::NonFinite { what, value: v })
    }
}

/// True when `a` and `b` differ by more than `epsilon` on either axis.
pub fn moved_beyond(a: (Real, Real), b: (Real, Real), epsilon: Real) -> bool {
    (a.0 - b.0).abs() > epsilon || (a.1 - b.1).abs() > epsilon
}
