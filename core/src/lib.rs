//! Core entity types and payload validation for the packing ledger.
//!
//! This crate defines the four record kinds persisted by the ledger and the
//! payloads used to create or update them:
//!
//! - [`Container`] / [`ContainerPayload`] — a cargo container with inner
//!   dimensions and an optional weight limit.
//! - [`Transformer`] / [`TransformerPayload`] — the unit being packed.
//! - [`Order`] / [`OrderPayload`] — a dated customer order.
//! - [`OrderCalculation`] / [`OrderCalculationPayload`] — a packing result
//!   for an order, carrying a snapshot of the container and transformer
//!   dimensions taken when the calculation was recorded.
//!
//! Validation ([`validate_container`], [`validate_transformer`],
//! [`validate_order`], [`validate_calculation`]) runs before any storage
//! access and reports [`ValidationError`]s.
//!
//! # Example
//!
//! ```
//! use packing_core::*;
//!
//! let payload = ContainerPayload::new("40ft High Cube", 12.03, 2.35, 2.69)
//!     .with_max_weight(26_500.0);
//! assert!(validate_container(&payload).is_empty());
//!
//! let bad = ContainerPayload::new("   ", 12.03, 0.0, 2.69);
//! assert_eq!(
//!     validate_container(&bad),
//!     vec![ValidationError::EmptyName("container")],
//! );
//! ```

mod types;
mod validate;

pub use types::*;
pub use validate::{
    ValidationError, validate_calculation, validate_container, validate_order,
    validate_transformer,
};
