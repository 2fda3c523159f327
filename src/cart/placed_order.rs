//! Placed order infos.

/// Info about one order placed from a cart delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrderInfo {
    /// Order number assigned by the order management system.
    pub order_number: String,
    /// Code of the delivery the order was placed for.
    pub delivery_code: String,
}

/// The orders placed from a cart, one per delivery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlacedOrderInfos(Vec<PlacedOrderInfo>);

impl PlacedOrderInfos {
    /// Creates the collection from a list of placed order infos.
    #[must_use]
    pub fn new(infos: Vec<PlacedOrderInfo>) -> Self {
        Self(infos)
    }

    /// The order number for the given delivery code, first match wins.
    #[must_use]
    pub fn order_number_for_delivery(&self, delivery_code: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|info| info.delivery_code == delivery_code)
            .map(|info| info.order_number.as_str())
    }

    /// Iterates over the placed order infos in order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedOrderInfo> {
        self.0.iter()
    }

    /// Number of placed orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no orders were placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PlacedOrderInfo>> for PlacedOrderInfos {
    fn from(infos: Vec<PlacedOrderInfo>) -> Self {
        Self::new(infos)
    }
}
