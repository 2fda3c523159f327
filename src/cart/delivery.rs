//! Deliveries.
//!
//! A delivery groups the items of a cart that share one fulfilment method
//! and destination. Next to the structured fields, `DeliveryInfo` carries
//! two extension maps: flat string attributes, and opaque JSON blobs that
//! are decoded on demand into caller-supplied types.

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::value::RawValue;

use crate::cart::{
    address::Address,
    errors::CartError,
    item::Item,
    totals::{DeliveryTotals, ShippingItem},
};

/// Fulfilment workflow of a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryWorkflow {
    /// Workflow not decided yet.
    #[default]
    Unspecified,
    /// Shipment to a delivery location.
    Delivery,
    /// Customer picks the items up.
    Pickup,
}

/// Kind of destination a delivery targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationType {
    /// Destination not decided yet.
    #[default]
    Unspecified,
    /// A shared collection point.
    CollectionPoint,
    /// A retail store.
    Store,
    /// A postal address.
    Address,
    /// A freight station.
    FreightStation,
}

/// The destination of a delivery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeliveryLocation {
    /// Kind of destination.
    pub location_type: LocationType,
    /// Postal address; only set for address-type locations.
    pub address: Option<Address>,
    /// Identifier of the destination for special location types.
    pub code: String,
}

/// Details of a delivery, normally completed during checkout.
#[derive(Debug, Clone, Default)]
pub struct DeliveryInfo {
    /// Project-specific identifier of the delivery, unique within a cart.
    pub code: String,
    /// Fulfilment workflow.
    pub workflow: DeliveryWorkflow,
    /// Project-specific shipping method.
    pub method: String,
    /// Carrier responsible for executing the delivery.
    pub carrier: String,
    /// Target destination.
    pub location: DeliveryLocation,
    /// Desired time of the delivery.
    pub desired_time: Option<Timestamp>,
    /// Flat key-value attributes, free for each project to use.
    pub additional_data: FxHashMap<String, String>,
    /// Opaque JSON blobs keyed by string; consumers must treat unknown
    /// keys as opaque and preserve them on round-trip.
    pub additional_delivery_infos: FxHashMap<String, Box<RawValue>>,
}

impl DeliveryInfo {
    /// A delivery info with just a code, everything else unset.
    #[must_use]
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// Decodes the additional info stored under `key` into `target`.
    ///
    /// # Errors
    ///
    /// - [`CartError::AdditionalInfoNotFound`] if nothing is stored under
    ///   the key.
    /// - [`CartError::AdditionalInfoDecode`] if the stored blob does not
    ///   decode into the target type.
    pub fn load_additional_info<T>(&self, key: &str, target: &mut T) -> Result<(), CartError>
    where
        T: AdditionalDeliveryInfo,
    {
        let raw = self
            .additional_delivery_infos
            .get(key)
            .ok_or(CartError::AdditionalInfoNotFound)?;

        target.unmarshal(raw).map_err(CartError::AdditionalInfoDecode)
    }
}

/// A structured object that can be stored on a delivery as an opaque blob.
///
/// This is the cart model's one extensibility seam: projects attach their
/// own types to a delivery without this crate knowing them. Any type that
/// is serde-serializable and -deserializable qualifies via the blanket
/// implementation.
pub trait AdditionalDeliveryInfo {
    /// Encodes the value into a raw JSON blob.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the value cannot be encoded.
    fn marshal(&self) -> Result<Box<RawValue>, serde_json::Error>;

    /// Decodes a raw JSON blob into the value in place.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the blob does not match the
    /// value's shape.
    fn unmarshal(&mut self, raw: &RawValue) -> Result<(), serde_json::Error>;
}

impl<T> AdditionalDeliveryInfo for T
where
    T: Serialize + DeserializeOwned,
{
    fn marshal(&self) -> Result<Box<RawValue>, serde_json::Error> {
        serde_json::value::to_raw_value(self)
    }

    fn unmarshal(&mut self, raw: &RawValue) -> Result<(), serde_json::Error> {
        *self = serde_json::from_str(raw.get())?;

        Ok(())
    }
}

/// A shipment or pickup group: delivery details plus the assigned items.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// Details of this delivery.
    pub delivery_info: DeliveryInfo,
    /// Items assigned to this delivery, in insertion order.
    pub items: Vec<Item>,
    /// Customer-facing money summary for this delivery.
    pub totals: DeliveryTotals,
    /// Shipping cost line, when shipping is involved.
    pub shipping_item: Option<ShippingItem>,
}

impl Delivery {
    /// Creates a delivery from its parts, without a shipping line.
    #[must_use]
    pub fn new(delivery_info: DeliveryInfo, items: Vec<Item>, totals: DeliveryTotals) -> Self {
        Self {
            delivery_info,
            items,
            totals,
            shipping_item: None,
        }
    }

    /// Whether any items are assigned to this delivery.
    #[must_use]
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }
}
