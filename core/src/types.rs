//! Entity and payload definitions.
//!
//! Records mirror the stored rows one-to-one and are what repositories
//! return. Payloads are the caller-supplied subset used for create and
//! update; identities and timestamps are always assigned by the store.
//! Every type derives [`serde`] traits so it can cross a JSON boundary
//! unchanged.

use serde::{Deserialize, Serialize};

/// A transformer unit that gets packed into containers.
///
/// Dimensions share the unit of the containers they are packed into; the
/// ledger does not convert between units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformer {
    /// Store-generated identity.
    pub id: i64,
    /// Display name, stored trimmed.
    pub name: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    /// Unit weight, if known.
    pub weight: Option<f64>,
    pub notes: Option<String>,
    /// Insert timestamp assigned by the store.
    pub created_at: String,
    /// Set on every update; `None` until the first one.
    pub updated_at: Option<String>,
}

/// Create/update payload for a [`Transformer`].
///
/// # Examples
///
/// ```
/// use packing_core::TransformerPayload;
///
/// let payload = TransformerPayload::new("TR-500", 1.2, 0.9, 1.4)
///     .with_weight(850.0)
///     .with_notes("oil filled");
/// assert_eq!(payload.weight, Some(850.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerPayload {
    pub name: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TransformerPayload {
    /// Creates a payload with the required fields set and no optionals.
    pub fn new(name: impl Into<String>, length: f64, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            length,
            width,
            height,
            weight: None,
            notes: None,
        }
    }

    /// Sets the unit weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets free-text notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A shipping container with inner dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: i64,
    pub name: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    /// Maximum payload weight, if known.
    pub max_weight: Option<f64>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Create/update payload for a [`Container`].
///
/// # Examples
///
/// ```
/// use packing_core::ContainerPayload;
///
/// let payload = ContainerPayload::new("20ft Standard", 5.9, 2.35, 2.39);
/// assert!(payload.max_weight.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerPayload {
    pub name: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub max_weight: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ContainerPayload {
    /// Creates a payload with the required fields set and no optionals.
    pub fn new(name: impl Into<String>, length: f64, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            length,
            width,
            height,
            max_weight: None,
            notes: None,
        }
    }

    /// Sets the maximum payload weight.
    pub fn with_max_weight(mut self, max_weight: f64) -> Self {
        self.max_weight = Some(max_weight);
        self
    }

    /// Sets free-text notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A customer order that packing calculations are recorded against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    /// External order reference, if the customer supplied one.
    pub order_number: Option<String>,
    /// Order date as entered, stored trimmed.
    pub order_date: String,
    pub notes: Option<String>,
    pub created_at: String,
}

/// Create/update payload for an [`Order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    #[serde(default)]
    pub order_number: Option<String>,
    pub order_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl OrderPayload {
    /// Creates a payload for the given order date.
    pub fn new(order_date: impl Into<String>) -> Self {
        Self {
            order_number: None,
            order_date: order_date.into(),
            notes: None,
        }
    }

    /// Sets the external order number.
    pub fn with_order_number(mut self, order_number: impl Into<String>) -> Self {
        self.order_number = Some(order_number.into());
        self
    }

    /// Sets free-text notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A packing result recorded for an order.
///
/// The `container_*` and `transformer_*` dimension fields are a snapshot
/// taken when the calculation was created. They are never refreshed from
/// the source records, so editing or deleting a container or transformer
/// leaves existing calculations untouched; `container_id` and
/// `transformer_id` may then point at rows that no longer exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCalculation {
    pub id: i64,
    pub order_id: i64,
    pub container_id: Option<i64>,
    pub transformer_id: Option<i64>,

    pub container_name: Option<String>,
    pub container_length: f64,
    pub container_width: f64,
    pub container_height: f64,
    pub container_max_weight: Option<f64>,

    pub transformer_name: Option<String>,
    pub transformer_length: f64,
    pub transformer_width: f64,
    pub transformer_height: f64,
    pub transformer_weight: Option<f64>,

    /// Whether transformers may be stacked on top of each other.
    pub stacking_enabled: bool,
    /// Free-form orientation label chosen by the caller.
    pub orientation: Option<String>,
    /// Number of transformers that fit, if computed.
    pub total_fit: Option<i64>,
    pub notes: Option<String>,
    pub created_at: String,
}

/// Create payload for an [`OrderCalculation`].
///
/// Use [`from_sources`](Self::from_sources) to snapshot the dimensions of
/// an existing container and transformer.
///
/// # Examples
///
/// ```
/// use packing_core::OrderCalculationPayload;
///
/// let payload = OrderCalculationPayload::new(7, [12.0, 2.3, 2.6], [1.2, 0.9, 1.4])
///     .with_stacking(true)
///     .with_total_fit(36);
/// assert_eq!(payload.order_id, 7);
/// assert!(payload.stacking_enabled);
/// assert_eq!(payload.container_id, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCalculationPayload {
    pub order_id: i64,
    #[serde(default)]
    pub container_id: Option<i64>,
    #[serde(default)]
    pub transformer_id: Option<i64>,

    #[serde(default)]
    pub container_name: Option<String>,
    pub container_length: f64,
    pub container_width: f64,
    pub container_height: f64,
    #[serde(default)]
    pub container_max_weight: Option<f64>,

    #[serde(default)]
    pub transformer_name: Option<String>,
    pub transformer_length: f64,
    pub transformer_width: f64,
    pub transformer_height: f64,
    #[serde(default)]
    pub transformer_weight: Option<f64>,

    #[serde(default)]
    pub stacking_enabled: bool,
    #[serde(default)]
    pub orientation: Option<String>,
    #[serde(default)]
    pub total_fit: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl OrderCalculationPayload {
    /// Creates a payload from raw `[length, width, height]` dimensions with
    /// no source references.
    pub fn new(order_id: i64, container: [f64; 3], transformer: [f64; 3]) -> Self {
        let [container_length, container_width, container_height] = container;
        let [transformer_length, transformer_width, transformer_height] = transformer;
        Self {
            order_id,
            container_id: None,
            transformer_id: None,
            container_name: None,
            container_length,
            container_width,
            container_height,
            container_max_weight: None,
            transformer_name: None,
            transformer_length,
            transformer_width,
            transformer_height,
            transformer_weight: None,
            stacking_enabled: false,
            orientation: None,
            total_fit: None,
            notes: None,
        }
    }

    /// Creates a payload that references `container` and `transformer` and
    /// snapshots their current names, dimensions and weights.
    pub fn from_sources(order_id: i64, container: &Container, transformer: &Transformer) -> Self {
        Self {
            order_id,
            container_id: Some(container.id),
            transformer_id: Some(transformer.id),
            container_name: Some(container.name.clone()),
            container_length: container.length,
            container_width: container.width,
            container_height: container.height,
            container_max_weight: container.max_weight,
            transformer_name: Some(transformer.name.clone()),
            transformer_length: transformer.length,
            transformer_width: transformer.width,
            transformer_height: transformer.height,
            transformer_weight: transformer.weight,
            stacking_enabled: false,
            orientation: None,
            total_fit: None,
            notes: None,
        }
    }

    /// Sets whether stacking is allowed.
    pub fn with_stacking(mut self, enabled: bool) -> Self {
        self.stacking_enabled = enabled;
        self
    }

    /// Sets the orientation label.
    pub fn with_orientation(mut self, orientation: impl Into<String>) -> Self {
        self.orientation = Some(orientation.into());
        self
    }

    /// Sets the computed fit count.
    pub fn with_total_fit(mut self, total_fit: i64) -> Self {
        self.total_fit = Some(total_fit);
        self
    }

    /// Sets free-text notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
