//! Payload validation.
//!
//! Business rules checked before any storage access: required strings must
//! be non-empty after trimming, and every dimension must be strictly
//! positive. Each validator stops at the first problem, mirroring how a
//! form surfaces one message at a time.
//!
//! # Examples
//!
//! ```
//! use packing_core::*;
//!
//! let ok = TransformerPayload::new("TR-500", 1.2, 0.9, 1.4);
//! assert!(validate_transformer(&ok).is_empty());
//!
//! let flat = TransformerPayload::new("TR-500", 1.2, 0.9, -1.0);
//! assert_eq!(
//!     validate_transformer(&flat),
//!     vec![ValidationError::NonPositiveDimensions("transformer")],
//! );
//! ```

use thiserror::Error;

use crate::{ContainerPayload, OrderCalculationPayload, OrderPayload, TransformerPayload};

/// Payload validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is empty or whitespace-only. Carries the entity label.
    #[error("{0} name is required")]
    EmptyName(&'static str),
    /// One of length, width or height is zero, negative, infinite or NaN.
    #[error("{0} dimensions must be greater than zero")]
    NonPositiveDimensions(&'static str),
    /// Order date is empty or whitespace-only.
    #[error("order date is required")]
    EmptyOrderDate,
    /// Calculation does not reference a valid order identity.
    #[error("invalid order reference: {0}")]
    InvalidOrderReference(i64),
    /// Calculation fit count is negative.
    #[error("total fit cannot be negative: {0}")]
    NegativeTotalFit(i64),
}

/// Validates a container payload.
pub fn validate_container(payload: &ContainerPayload) -> Vec<ValidationError> {
    validate_named_box(
        "container",
        &payload.name,
        [payload.length, payload.width, payload.height],
    )
}

/// Validates a transformer payload.
pub fn validate_transformer(payload: &TransformerPayload) -> Vec<ValidationError> {
    validate_named_box(
        "transformer",
        &payload.name,
        [payload.length, payload.width, payload.height],
    )
}

/// Validates an order payload.
pub fn validate_order(payload: &OrderPayload) -> Vec<ValidationError> {
    if payload.order_date.trim().is_empty() {
        return vec![ValidationError::EmptyOrderDate];
    }
    Vec::new()
}

/// Validates a calculation payload.
///
/// Snapshot dimensions follow the same positivity rule as the records they
/// were copied from.
///
/// # Examples
///
/// ```
/// use packing_core::*;
///
/// let payload = OrderCalculationPayload::new(0, [12.0, 2.3, 2.6], [1.2, 0.9, 1.4]);
/// assert_eq!(
///     validate_calculation(&payload),
///     vec![ValidationError::InvalidOrderReference(0)],
/// );
/// ```
pub fn validate_calculation(payload: &OrderCalculationPayload) -> Vec<ValidationError> {
    if payload.order_id <= 0 {
        return vec![ValidationError::InvalidOrderReference(payload.order_id)];
    }

    let container = [
        payload.container_length,
        payload.container_width,
        payload.container_height,
    ];
    if !all_positive(&container) {
        return vec![ValidationError::NonPositiveDimensions("container")];
    }

    let transformer = [
        payload.transformer_length,
        payload.transformer_width,
        payload.transformer_height,
    ];
    if !all_positive(&transformer) {
        return vec![ValidationError::NonPositiveDimensions("transformer")];
    }

    if let Some(total_fit) = payload.total_fit {
        if total_fit < 0 {
            return vec![ValidationError::NegativeTotalFit(total_fit)];
        }
    }

    Vec::new()
}

fn validate_named_box(entity: &'static str, name: &str, dims: [f64; 3]) -> Vec<ValidationError> {
    if name.trim().is_empty() {
        return vec![ValidationError::EmptyName(entity)];
    }
    if !all_positive(&dims) {
        return vec![ValidationError::NonPositiveDimensions(entity)];
    }
    Vec::new()
}

fn all_positive(dims: &[f64]) -> bool {
    dims.iter().all(|d| d.is_finite() && *d > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_container_rejects_whitespace_name() {
        let payload = ContainerPayload::new(" \t ", 1.0, 1.0, 1.0);
        assert_eq!(
            validate_container(&payload),
            vec![ValidationError::EmptyName("container")]
        );
    }

    #[test]
    fn test_validate_container_rejects_zero_dimension() {
        for dims in [[0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]] {
            let payload = ContainerPayload::new("c", dims[0], dims[1], dims[2]);
            assert_eq!(
                validate_container(&payload),
                vec![ValidationError::NonPositiveDimensions("container")]
            );
        }
    }

    #[test]
    fn test_validate_transformer_rejects_nan_dimension() {
        let payload = TransformerPayload::new("t", f64::NAN, 1.0, 1.0);
        assert_eq!(
            validate_transformer(&payload),
            vec![ValidationError::NonPositiveDimensions("transformer")]
        );
    }

    #[test]
    fn test_infinite_dimensions_are_rejected() {
        let container = ContainerPayload::new("c", f64::INFINITY, 1.0, 1.0);
        assert_eq!(
            validate_container(&container),
            vec![ValidationError::NonPositiveDimensions("container")]
        );

        let mut calc = OrderCalculationPayload::new(1, [1.0; 3], [1.0; 3]);
        calc.transformer_width = f64::NEG_INFINITY;
        assert_eq!(
            validate_calculation(&calc),
            vec![ValidationError::NonPositiveDimensions("transformer")]
        );
    }

    #[test]
    fn test_name_is_checked_before_dimensions() {
        let payload = TransformerPayload::new("", -1.0, -1.0, -1.0);
        assert_eq!(
            validate_transformer(&payload),
            vec![ValidationError::EmptyName("transformer")]
        );
    }

    #[test]
    fn test_validate_order_requires_date() {
        assert_eq!(
            validate_order(&OrderPayload::new("   ")),
            vec![ValidationError::EmptyOrderDate]
        );
        assert!(validate_order(&OrderPayload::new("2026-03-01")).is_empty());
    }

    #[test]
    fn test_validate_calculation_rules() {
        let valid = OrderCalculationPayload::new(1, [12.0, 2.3, 2.6], [1.2, 0.9, 1.4]);
        assert!(validate_calculation(&valid).is_empty());

        let bad_container = OrderCalculationPayload::new(1, [12.0, 0.0, 2.6], [1.2, 0.9, 1.4]);
        assert_eq!(
            validate_calculation(&bad_container),
            vec![ValidationError::NonPositiveDimensions("container")]
        );

        let bad_transformer = OrderCalculationPayload::new(1, [12.0, 2.3, 2.6], [1.2, 0.9, -3.0]);
        assert_eq!(
            validate_calculation(&bad_transformer),
            vec![ValidationError::NonPositiveDimensions("transformer")]
        );

        let negative_fit = valid.clone().with_total_fit(-2);
        assert_eq!(
            validate_calculation(&negative_fit),
            vec![ValidationError::NegativeTotalFit(-2)]
        );

        assert!(validate_calculation(&valid.with_total_fit(0)).is_empty());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::EmptyName("container").to_string(),
            "container name is required"
        );
        assert_eq!(
            ValidationError::NonPositiveDimensions("transformer").to_string(),
            "transformer dimensions must be greater than zero"
        );
    }
}
