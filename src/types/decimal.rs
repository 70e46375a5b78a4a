//! Decimal byte codec
//!
//! Values keep decimals as encoded bytes; the accessors convert at the
//! boundary through these two functions.
//!
//! ## Layout
//! ```text
//! ┌────────────┬──────────────────────────────────────┐
//! │ Scale (4)  │ Unscaled (1.., two's complement)     │
//! └────────────┴──────────────────────────────────────┘
//! ```
//! Both fields are big-endian. The scale is any `i32` (negative scales
//! multiply by a power of ten); the unscaled integer has no width limit and
//! uses the fewest bytes that still carry its sign.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::error::{QlError, Result};

/// Scale field width
const SCALE_SIZE: usize = 4;

/// Encode a decimal into its canonical byte form
///
/// Fails with `InvalidArgument` if the scale does not fit the 4-byte field.
pub fn encode(value: &BigDecimal) -> Result<Vec<u8>> {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    let scale = i32::try_from(scale).map_err(|_| {
        QlError::invalid_argument(format!("decimal scale {} does not fit in 32 bits", scale))
    })?;

    let unscaled = unscaled.to_signed_bytes_be();
    let mut bytes = Vec::with_capacity(SCALE_SIZE + unscaled.len());
    bytes.extend_from_slice(&scale.to_be_bytes());
    bytes.extend_from_slice(&unscaled);
    Ok(bytes)
}

/// Decode canonical decimal bytes
///
/// Fails with `Corruption` when there is no unscaled byte after the scale.
pub fn decode(bytes: &[u8]) -> Result<BigDecimal> {
    if bytes.len() <= SCALE_SIZE {
        return Err(QlError::corruption(format!(
            "decimal: expected more than {} bytes, got {}",
            SCALE_SIZE,
            bytes.len()
        )));
    }

    let (scale_bytes, unscaled) = bytes.split_at(SCALE_SIZE);
    let mut scale = [0u8; SCALE_SIZE];
    scale.copy_from_slice(scale_bytes);
    let scale = i32::from_be_bytes(scale);

    Ok(BigDecimal::new(
        BigInt::from_signed_bytes_be(unscaled),
        i64::from(scale),
    ))
}
