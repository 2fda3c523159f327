//! Cart
//!
//! The cart aggregate: a passive value-object graph (cart → deliveries →
//! items → applied discounts, plus totals summaries) with pure query and
//! derivation helpers layered on top. The owning cart service constructs
//! and replaces the whole graph on every mutating operation; nothing in
//! this module mutates a cart in place.

pub mod address;
pub mod behaviour;
pub mod delivery;
pub mod errors;
pub mod item;
pub mod placed_order;
pub mod totals;

pub use address::{Address, ExistingCustomerData, Person, PersonalDetails};
pub use behaviour::{
    BehaviourError, CartEvent, DeferEvents, GiftCardAndVoucherBehaviour, InvalidateCartEvent,
    MockGiftCardAndVoucherBehaviour, Session,
};
pub use delivery::{
    AdditionalDeliveryInfo, Delivery, DeliveryInfo, DeliveryLocation, DeliveryWorkflow,
    LocationType,
};
pub use errors::CartError;
pub use item::{Item, ItemCartReference, ItemDiscount};
pub use placed_order::{PlacedOrderInfo, PlacedOrderInfos};
pub use totals::{DeliveryTotals, ShippingItem, TotalItem, TotalType, Totals};

use rustc_hash::FxHashMap;

use crate::prices::{Price, PriceError};

/// A coupon code applied to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponCode {
    /// The code as entered by the customer.
    pub code: String,
}

/// The payment selected for a cart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectedPayment {
    /// Payment provider identifier.
    pub provider: String,
    /// Payment method within the provider.
    pub method: String,
}

/// Supplementary cart data, free for each project to use.
#[derive(Debug, Clone, Default)]
pub struct AdditionalData {
    /// Flat custom attributes.
    pub custom_attributes: FxHashMap<String, String>,
    /// Payment selection, once made.
    pub selected_payment: Option<SelectedPayment>,
}

/// A lightweight summary projection of a cart, for display without
/// loading the full aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teaser {
    /// Number of distinct item lines across all deliveries.
    pub product_count: usize,
    /// Number of units across all deliveries.
    pub item_count: u64,
    /// Codes of the deliveries that hold at least one item.
    pub delivery_codes: Vec<String>,
}

/// The in-progress order aggregate before checkout.
///
/// Immutable in intent: the cart service replaces the whole graph instead
/// of mutating it, so every query here is a pure read and the aggregate is
/// safe for concurrent read access by construction.
#[derive(Debug, Clone)]
pub struct Cart {
    /// Main identifier of the cart.
    pub id: String,
    /// Secondary identifier used by some backends.
    pub entity_id: String,
    /// Order id already reserved for the future order, if any.
    pub reserved_order_id: String,
    /// Summary costs and discounts for the whole cart.
    ///
    /// Must be derivable from the deliveries' items and discounts; keeping
    /// it consistent is the owning service's job, not this model's.
    pub totals: Totals,
    /// Main billing address, relevant for payments and invoices.
    pub billing_address: Option<Address>,
    /// Legal contact person for this order.
    pub purchaser: Option<Person>,
    /// Desired deliveries involved in this cart, in insertion order.
    pub deliveries: Vec<Delivery>,
    /// Supplementary custom attributes.
    pub additional_data: AdditionalData,
    /// False for a guest cart, true once the cart belongs to an
    /// authenticated user.
    pub belongs_to_authenticated_user: bool,
    /// Id of the authenticated user, when there is one.
    pub authenticated_user_id: String,
    /// Coupon codes applied to this cart.
    pub applied_coupon_codes: Vec<CouponCode>,
}

impl Cart {
    /// Creates an empty cart with the given id and totals summary.
    #[must_use]
    pub fn new(id: impl Into<String>, totals: Totals) -> Self {
        Self {
            id: id.into(),
            entity_id: String::new(),
            reserved_order_id: String::new(),
            totals,
            billing_address: None,
            purchaser: None,
            deliveries: Vec::new(),
            additional_data: AdditionalData::default(),
            belongs_to_authenticated_user: false,
            authenticated_user_id: String::new(),
            applied_coupon_codes: Vec::new(),
        }
    }

    /// The first non-empty email on a delivery location address, scanning
    /// deliveries in order. First match wins; addresses are not merged.
    #[must_use]
    pub fn main_shipping_email(&self) -> Option<&str> {
        self.deliveries
            .iter()
            .filter_map(|delivery| delivery.delivery_info.location.address.as_ref())
            .find(|address| address.has_email())
            .map(|address| address.email.as_str())
    }

    /// The delivery with the given code.
    ///
    /// Codes are expected unique within a cart; with duplicates the first
    /// match wins, undetected.
    #[must_use]
    pub fn get_delivery(&self, delivery_code: &str) -> Option<&Delivery> {
        self.deliveries
            .iter()
            .find(|delivery| delivery.delivery_info.code == delivery_code)
    }

    /// Whether a delivery with the given code exists in the cart.
    #[must_use]
    pub fn has_delivery(&self, delivery_code: &str) -> bool {
        self.get_delivery(delivery_code).is_some()
    }

    /// Codes of all deliveries that hold at least one item, in delivery
    /// order.
    #[must_use]
    pub fn delivery_codes(&self) -> Vec<String> {
        self.deliveries
            .iter()
            .filter(|delivery| delivery.has_items())
            .map(|delivery| delivery.delivery_info.code.clone())
            .collect()
    }

    /// The item with the given id within the delivery with the given code.
    ///
    /// # Errors
    ///
    /// - [`CartError::DeliveryNotFound`] if no delivery carries the code.
    /// - [`CartError::ItemNotFound`] if the delivery holds no such item.
    pub fn get_item(&self, delivery_code: &str, item_id: &str) -> Result<&Item, CartError> {
        let delivery = self
            .get_delivery(delivery_code)
            .ok_or_else(|| CartError::DeliveryNotFound(delivery_code.to_owned()))?;

        delivery
            .items
            .iter()
            .find(|item| item.id == item_id)
            .ok_or_else(|| CartError::ItemNotFound(item_id.to_owned()))
    }

    /// Number of units in the cart: the sum of all item quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.deliveries
            .iter()
            .flat_map(|delivery| &delivery.items)
            .map(|item| u64::from(item.qty))
            .sum()
    }

    /// Number of distinct item lines in the cart. Deliberately a different
    /// metric from [`Cart::item_count`]: lines, not units.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.deliveries.iter().map(|delivery| delivery.items.len()).sum()
    }

    /// References to every item in the cart, in delivery-then-item order.
    #[must_use]
    pub fn item_references(&self) -> Vec<ItemCartReference> {
        self.deliveries
            .iter()
            .flat_map(|delivery| {
                delivery.items.iter().map(|item| ItemCartReference {
                    item_id: item.id.clone(),
                    delivery_code: delivery.delivery_info.code.clone(),
                })
            })
            .collect()
    }

    /// Total savings from discount summary lines, negative aggregates
    /// clamped to zero. `None` when no discount lines exist.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the discount lines disagree on
    /// currency; partial sums are never returned.
    pub fn savings(&self) -> Result<Option<Price>, PriceError> {
        self.savings_of_type(TotalType::Discount)
    }

    /// Total savings from voucher summary lines, negative aggregates
    /// clamped to zero. `None` when no voucher lines exist.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the voucher lines disagree on currency;
    /// partial sums are never returned.
    pub fn voucher_savings(&self) -> Result<Option<Price>, PriceError> {
        self.savings_of_type(TotalType::Voucher)
    }

    /// Whether any coupon code is applied to the cart.
    #[must_use]
    pub fn has_applied_coupon_code(&self) -> bool {
        !self.applied_coupon_codes.is_empty()
    }

    /// The teaser summary of this cart.
    #[must_use]
    pub fn teaser(&self) -> Teaser {
        Teaser {
            product_count: self.product_count(),
            item_count: self.item_count(),
            delivery_codes: self.delivery_codes(),
        }
    }

    fn savings_of_type(&self, total_type: TotalType) -> Result<Option<Price>, PriceError> {
        let total = Price::sum(
            self.totals
                .total_items_by_type(total_type)
                .map(|item| item.price),
        )?;

        Ok(total.map(Price::clamped_to_zero))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    fn delivery(code: &str, quantities: &[u32]) -> TestResult<Delivery> {
        let items = quantities
            .iter()
            .enumerate()
            .map(|(i, &qty)| {
                Item::new(
                    format!("{code}-item-{i}"),
                    qty,
                    Price::from_minor(500, GBP),
                    Price::from_minor(600, GBP),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Delivery::new(
            DeliveryInfo::with_code(code),
            items,
            DeliveryTotals::zero(GBP),
        ))
    }

    fn total_item(code: &str, minor: i64, total_type: TotalType) -> TotalItem {
        TotalItem {
            code: code.into(),
            title: code.to_uppercase(),
            price: Price::from_minor(minor, GBP),
            total_type,
        }
    }

    fn cart_with_deliveries(deliveries: Vec<Delivery>) -> Cart {
        let mut cart = Cart::new("cart-1", Totals::zero(GBP));
        cart.deliveries = deliveries;
        cart
    }

    #[test]
    fn counts_on_empty_cart_are_zero() {
        let cart = Cart::new("cart-1", Totals::zero(GBP));

        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.product_count(), 0);
        assert!(cart.delivery_codes().is_empty(), "no codes expected");
    }

    #[test]
    fn item_count_sums_units_product_count_counts_lines() -> TestResult {
        let cart = cart_with_deliveries(vec![
            delivery("d1", &[2, 3])?,
            delivery("d2", &[1])?,
        ]);

        assert_eq!(cart.item_count(), 6);
        assert_eq!(cart.product_count(), 3);

        Ok(())
    }

    #[test]
    fn delivery_codes_skip_deliveries_without_items() -> TestResult {
        let cart = cart_with_deliveries(vec![
            delivery("d1", &[1])?,
            delivery("d-empty", &[])?,
            delivery("d2", &[2])?,
        ]);

        assert_eq!(cart.delivery_codes(), ["d1", "d2"]);

        Ok(())
    }

    #[test]
    fn get_delivery_finds_by_code() -> TestResult {
        let cart = cart_with_deliveries(vec![delivery("d1", &[2, 3])?]);

        let found = cart.get_delivery("d1");

        assert_eq!(found.map(|d| d.items.len()), Some(2));
        assert!(cart.get_delivery("missing").is_none(), "missing code");
        assert!(cart.has_delivery("d1"), "d1 exists");
        assert!(!cart.has_delivery("missing"), "missing does not exist");

        Ok(())
    }

    #[test]
    fn get_item_distinguishes_both_failure_stages() -> TestResult {
        let cart = cart_with_deliveries(vec![delivery("d1", &[1])?]);

        let missing_delivery = cart.get_item("d2", "d1-item-0");
        assert!(
            matches!(missing_delivery, Err(CartError::DeliveryNotFound(code)) if code == "d2"),
            "expected DeliveryNotFound"
        );

        let missing_item = cart.get_item("d1", "x");
        assert!(
            matches!(missing_item, Err(CartError::ItemNotFound(id)) if id == "x"),
            "expected ItemNotFound"
        );

        let item = cart.get_item("d1", "d1-item-0")?;
        assert_eq!(item.qty, 1);

        Ok(())
    }

    #[test]
    fn item_references_follow_delivery_then_item_order() -> TestResult {
        let cart = cart_with_deliveries(vec![
            delivery("d1", &[1, 1])?,
            delivery("d2", &[1])?,
        ]);

        let refs: Vec<(String, String)> = cart
            .item_references()
            .into_iter()
            .map(|r| (r.delivery_code, r.item_id))
            .collect();

        assert_eq!(
            refs,
            [
                ("d1".to_owned(), "d1-item-0".to_owned()),
                ("d1".to_owned(), "d1-item-1".to_owned()),
                ("d2".to_owned(), "d2-item-0".to_owned()),
            ]
        );

        Ok(())
    }

    #[test]
    fn savings_sums_discount_lines_only() -> TestResult {
        let mut cart = Cart::new("cart-1", Totals::zero(GBP));
        cart.totals.total_items = vec![
            total_item("summer", 500, TotalType::Discount),
            total_item("clearance", 300, TotalType::Discount),
            total_item("gift", 200, TotalType::Voucher),
        ];

        assert_eq!(cart.savings()?, Some(Price::from_minor(800, GBP)));
        assert_eq!(cart.voucher_savings()?, Some(Price::from_minor(200, GBP)));

        Ok(())
    }

    #[test]
    fn savings_none_without_matching_lines() -> TestResult {
        let cart = Cart::new("cart-1", Totals::zero(GBP));

        assert_eq!(cart.savings()?, None);
        assert_eq!(cart.voucher_savings()?, None);

        Ok(())
    }

    #[test]
    fn savings_propagates_currency_mismatch_instead_of_partial_sum() {
        let mut cart = Cart::new("cart-1", Totals::zero(GBP));
        cart.totals.total_items = vec![
            total_item("summer", 500, TotalType::Discount),
            TotalItem {
                code: "abroad".into(),
                title: "ABROAD".into(),
                price: Price::from_minor(300, USD),
                total_type: TotalType::Discount,
            },
        ];

        let result = cart.savings();

        assert!(
            matches!(result, Err(crate::prices::PriceError::CurrencyMismatch { .. })),
            "expected CurrencyMismatch, got {result:?}"
        );
    }

    #[test]
    fn negative_savings_clamp_to_zero() -> TestResult {
        let mut cart = Cart::new("cart-1", Totals::zero(GBP));
        cart.totals.total_items = vec![total_item("correction", -500, TotalType::Discount)];

        assert_eq!(cart.savings()?, Some(Price::zero(GBP)));

        Ok(())
    }

    #[test]
    fn main_shipping_email_is_first_match() -> TestResult {
        let mut first = delivery("d1", &[1])?;
        first.delivery_info.location.address = Some(Address::default());

        let mut second = delivery("d2", &[1])?;
        second.delivery_info.location.address = Some(Address {
            email: "first@example.com".into(),
            ..Address::default()
        });

        let mut third = delivery("d3", &[1])?;
        third.delivery_info.location.address = Some(Address {
            email: "second@example.com".into(),
            ..Address::default()
        });

        let cart = cart_with_deliveries(vec![first, second, third]);

        assert_eq!(cart.main_shipping_email(), Some("first@example.com"));

        Ok(())
    }

    #[test]
    fn main_shipping_email_none_without_addresses() -> TestResult {
        let cart = cart_with_deliveries(vec![delivery("d1", &[1])?]);

        assert_eq!(cart.main_shipping_email(), None);

        Ok(())
    }

    #[test]
    fn has_applied_coupon_code() {
        let mut cart = Cart::new("cart-1", Totals::zero(GBP));
        assert!(!cart.has_applied_coupon_code(), "no codes applied yet");

        cart.applied_coupon_codes.push(CouponCode {
            code: "SUMMER10".into(),
        });
        assert!(cart.has_applied_coupon_code(), "one code applied");
    }

    #[test]
    fn teaser_bundles_counts_and_codes() -> TestResult {
        let cart = cart_with_deliveries(vec![
            delivery("d1", &[2, 3])?,
            delivery("d2", &[1])?,
        ]);

        let teaser = cart.teaser();

        assert_eq!(teaser.item_count, 6);
        assert_eq!(teaser.product_count, 3);
        assert_eq!(teaser.delivery_codes, ["d1", "d2"]);

        Ok(())
    }
}
