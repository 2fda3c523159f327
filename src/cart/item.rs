//! Cart items.

use rustc_hash::FxHashMap;

use crate::prices::{Price, PriceError};

/// One line in a delivery: a product, a quantity and the derived row prices.
///
/// Row invariants (established by [`Item::new`] and
/// [`Item::with_discounts`], relied upon by the totals derivation):
///
/// - `row_total = single_price × qty`
/// - `tax_amount = qty × (single_price_incl_tax − single_price)`
/// - `row_total_incl_tax = row_total + tax_amount`
/// - the `row_total_with_*` fields subtract the matching discount sums
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Item id, unique within its delivery.
    pub id: String,
    /// Globally unique id assigned by the owning service.
    pub unique_id: String,
    /// Marketplace code of the product.
    pub marketplace_code: String,
    /// Variant code for configurable products.
    pub variant_marketplace_code: String,
    /// Display name of the product.
    pub product_name: String,
    /// Source location the item should be picked from.
    pub source_id: String,
    /// Number of units.
    pub qty: u32,
    /// Free-form per-item attributes.
    pub additional_data: FxHashMap<String, String>,
    /// Price per unit, tax-exclusive.
    pub single_price: Price,
    /// Price per unit, tax-inclusive.
    pub single_price_incl_tax: Price,
    /// `single_price × qty`.
    pub row_total: Price,
    /// Tax for the whole row.
    pub tax_amount: Price,
    /// `row_total + tax_amount`.
    pub row_total_incl_tax: Price,
    /// Discounts applied to this item, item-related or cart-scoped.
    pub applied_discounts: Vec<ItemDiscount>,
    /// Sum of all applied discounts.
    pub total_discount_amount: Price,
    /// Sum of applied discounts with `is_item_related` set.
    pub item_related_discount_amount: Price,
    /// Sum of applied discounts without `is_item_related`.
    pub non_item_related_discount_amount: Price,
    /// `row_total − item_related_discount_amount`.
    pub row_total_with_item_related_discount: Price,
    /// `row_total_incl_tax − item_related_discount_amount`.
    pub row_total_with_item_related_discount_incl_tax: Price,
    /// `row_total_incl_tax − total_discount_amount`; what the customer pays.
    pub row_total_with_discount_incl_tax: Price,
}

impl Item {
    /// Creates an undiscounted item with its row prices derived from the
    /// unit prices and quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the two unit prices are denominated in
    /// different currencies.
    pub fn new(
        id: impl Into<String>,
        qty: u32,
        single_price: Price,
        single_price_incl_tax: Price,
    ) -> Result<Self, PriceError> {
        let row_total = single_price.multiply(qty);
        let tax_amount = single_price_incl_tax.sub(single_price)?.multiply(qty);
        let row_total_incl_tax = row_total.add(tax_amount)?;
        let zero = Price::zero(single_price.currency());

        Ok(Self {
            id: id.into(),
            unique_id: String::new(),
            marketplace_code: String::new(),
            variant_marketplace_code: String::new(),
            product_name: String::new(),
            source_id: String::new(),
            qty,
            additional_data: FxHashMap::default(),
            single_price,
            single_price_incl_tax,
            row_total,
            tax_amount,
            row_total_incl_tax,
            applied_discounts: Vec::new(),
            total_discount_amount: zero,
            item_related_discount_amount: zero,
            non_item_related_discount_amount: zero,
            row_total_with_item_related_discount: row_total,
            row_total_with_item_related_discount_incl_tax: row_total_incl_tax,
            row_total_with_discount_incl_tax: row_total_incl_tax,
        })
    }

    /// Replaces the applied discounts and rederives the discount-adjusted
    /// row fields.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if any discount is denominated in a
    /// currency other than the item's.
    pub fn with_discounts(mut self, discounts: Vec<ItemDiscount>) -> Result<Self, PriceError> {
        let currency = self.single_price.currency();

        let mut total = Price::zero(currency);
        let mut item_related = Price::zero(currency);
        let mut non_item_related = Price::zero(currency);

        for discount in &discounts {
            total = total.add(discount.price)?;

            if discount.is_item_related {
                item_related = item_related.add(discount.price)?;
            } else {
                non_item_related = non_item_related.add(discount.price)?;
            }
        }

        self.total_discount_amount = total;
        self.item_related_discount_amount = item_related;
        self.non_item_related_discount_amount = non_item_related;
        self.row_total_with_item_related_discount = self.row_total.sub(item_related)?;
        self.row_total_with_item_related_discount_incl_tax =
            self.row_total_incl_tax.sub(item_related)?;
        self.row_total_with_discount_incl_tax = self.row_total_incl_tax.sub(total)?;
        self.applied_discounts = discounts;

        Ok(self)
    }

    /// Total savings on this item: the sum of its applied discounts, with
    /// negative aggregates clamped to zero.
    ///
    /// Returns `None` when no discounts are applied.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the discounts disagree on currency.
    pub fn savings(&self) -> Result<Option<Price>, PriceError> {
        let total = Price::sum(self.applied_discounts.iter().map(|discount| discount.price))?;

        Ok(total.map(Price::clamped_to_zero))
    }
}

/// A discount or fee line applied to a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDiscount {
    /// Campaign or rule code the discount originates from.
    pub code: String,
    /// Human-readable title for display.
    pub title: String,
    /// Discounted amount.
    pub price: Price,
    /// True when the discount targets this item; false when it is the
    /// item's share of a cart-scoped discount.
    pub is_item_related: bool,
}

/// Lightweight reference to an item within a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCartReference {
    /// Id of the referenced item.
    pub item_id: String,
    /// Code of the delivery holding the item.
    pub delivery_code: String,
}
