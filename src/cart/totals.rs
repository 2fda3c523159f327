//! Cart and delivery totals.
//!
//! Pre-aggregated money summaries. The owning cart service recomputes these
//! whenever it replaces the cart graph; this crate only offers the
//! derivation arithmetic and order-preserving filters over them.

use rusty_money::iso::Currency;

use crate::{
    cart::item::Item,
    prices::{Price, PriceError},
};

/// Classification of a summary line contributing to the grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TotalType {
    /// A cart-level discount line.
    Discount,
    /// A redeemed voucher or gift card line.
    Voucher,
    /// A tax line.
    Tax,
    /// A loyalty points redemption line.
    LoyaltyPoints,
    /// A shipping cost line.
    Shipping,
}

/// A named summary line (tax, discount, shipping, ...) on the cart totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalItem {
    /// Identifier of the line, e.g. a campaign or voucher code.
    pub code: String,
    /// Human-readable title for display.
    pub title: String,
    /// Amount this line contributes; discounts are typically negative.
    pub price: Price,
    /// Classification used to filter summary lines.
    pub total_type: TotalType,
}

/// The shipping cost line of a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingItem {
    /// Display title of the shipping method.
    pub title: String,
    /// Shipping cost.
    pub price: Price,
    /// Tax portion of the shipping cost.
    pub tax_amount: Price,
    /// Discount applied to the shipping cost.
    pub discount_amount: Price,
}

impl ShippingItem {
    /// A free shipping line in the given currency.
    #[must_use]
    pub fn free(title: impl Into<String>, currency: &'static Currency) -> Self {
        Self {
            title: title.into(),
            price: Price::zero(currency),
            tax_amount: Price::zero(currency),
            discount_amount: Price::zero(currency),
        }
    }
}

/// Money summary over a whole cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals {
    /// Named summary lines contributing to the grand total.
    pub total_items: Vec<TotalItem>,
    /// Combined shipping cost line across deliveries.
    pub total_shipping_item: Option<ShippingItem>,
    /// Final amount to pay.
    pub grand_total: Price,
    /// Sum of item row totals, tax-exclusive.
    pub sub_total: Price,
    /// Sum of item row totals, tax-inclusive.
    pub sub_total_incl_tax: Price,
    /// Subtotal minus item-related discounts.
    pub sub_total_with_discounts: Price,
    /// Tax-inclusive subtotal minus item-related discounts.
    pub sub_total_with_discounts_and_tax: Price,
    /// Sum of all item discount amounts.
    pub total_discount_amount: Price,
    /// Sum of item discounts that are not item-related.
    pub total_non_item_related_discount_amount: Price,
    /// Sum of item tax amounts.
    pub tax_amount: Price,
}

impl Totals {
    /// An all-zero summary in the given currency, with no summary lines.
    #[must_use]
    pub fn zero(currency: &'static Currency) -> Self {
        let zero = Price::zero(currency);

        Self {
            total_items: Vec::new(),
            total_shipping_item: None,
            grand_total: zero,
            sub_total: zero,
            sub_total_incl_tax: zero,
            sub_total_with_discounts: zero,
            sub_total_with_discounts_and_tax: zero,
            total_discount_amount: zero,
            total_non_item_related_discount_amount: zero,
            tax_amount: zero,
        }
    }

    /// Summary lines of the given type, in their original order.
    pub fn total_items_by_type(
        &self,
        total_type: TotalType,
    ) -> impl Iterator<Item = &TotalItem> {
        self.total_items
            .iter()
            .filter(move |item| item.total_type == total_type)
    }
}

/// Money summary over a single delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryTotals {
    /// Sum of item row totals, tax-exclusive.
    pub sub_total: Price,
    /// Sum of item row totals, tax-inclusive.
    pub sub_total_incl_tax: Price,
    /// Subtotal minus item-related discounts.
    pub sub_total_with_discounts: Price,
    /// Tax-inclusive subtotal minus item-related discounts.
    pub sub_total_with_discounts_and_tax: Price,
    /// Sum of all item discount amounts.
    pub total_discount_amount: Price,
    /// Sum of item discounts that are not item-related.
    pub total_non_item_related_discount_amount: Price,
}

impl DeliveryTotals {
    /// An all-zero summary in the given currency.
    #[must_use]
    pub fn zero(currency: &'static Currency) -> Self {
        let zero = Price::zero(currency);

        Self {
            sub_total: zero,
            sub_total_incl_tax: zero,
            sub_total_with_discounts: zero,
            sub_total_with_discounts_and_tax: zero,
            total_discount_amount: zero,
            total_non_item_related_discount_amount: zero,
        }
    }

    /// Derives the delivery summary from its item rows.
    ///
    /// This is the executable form of the aggregate invariant: the summary
    /// fields must equal the corresponding sums over the items.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if any item row is denominated in a
    /// currency other than `currency`.
    pub fn calculate(items: &[Item], currency: &'static Currency) -> Result<Self, PriceError> {
        let mut totals = Self::zero(currency);

        for item in items {
            totals.sub_total = totals.sub_total.add(item.row_total)?;
            totals.sub_total_incl_tax = totals.sub_total_incl_tax.add(item.row_total_incl_tax)?;
            totals.sub_total_with_discounts = totals
                .sub_total_with_discounts
                .add(item.row_total_with_item_related_discount)?;
            totals.sub_total_with_discounts_and_tax = totals
                .sub_total_with_discounts_and_tax
                .add(item.row_total_with_item_related_discount_incl_tax)?;
            totals.total_discount_amount = totals
                .total_discount_amount
                .add(item.total_discount_amount)?;
            totals.total_non_item_related_discount_amount = totals
                .total_non_item_related_discount_amount
                .add(item.non_item_related_discount_amount)?;
        }

        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    fn total_item(code: &str, minor: i64, total_type: TotalType) -> TotalItem {
        TotalItem {
            code: code.into(),
            title: code.to_uppercase(),
            price: Price::from_minor(minor, GBP),
            total_type,
        }
    }

    #[test]
    fn total_items_by_type_filters_and_preserves_order() {
        let totals = Totals {
            total_items: vec![
                total_item("summer", -500, TotalType::Discount),
                total_item("gift", -200, TotalType::Voucher),
                total_item("clearance", -300, TotalType::Discount),
            ],
            ..Totals::zero(GBP)
        };

        let codes: Vec<&str> = totals
            .total_items_by_type(TotalType::Discount)
            .map(|item| item.code.as_str())
            .collect();

        assert_eq!(codes, ["summer", "clearance"]);
    }

    #[test]
    fn total_items_by_type_empty_for_absent_type() {
        let totals = Totals::zero(GBP);

        assert_eq!(totals.total_items_by_type(TotalType::Tax).count(), 0);
    }

    #[test]
    fn calculate_sums_item_rows() -> TestResult {
        let items = [
            Item::new("a", 2, Price::from_minor(500, GBP), Price::from_minor(600, GBP))?,
            Item::new("b", 1, Price::from_minor(250, GBP), Price::from_minor(300, GBP))?,
        ];

        let totals = DeliveryTotals::calculate(&items, GBP)?;

        assert_eq!(totals.sub_total, Price::from_minor(1250, GBP));
        assert_eq!(totals.sub_total_incl_tax, Price::from_minor(1500, GBP));
        assert_eq!(totals.total_discount_amount, Price::zero(GBP));

        Ok(())
    }

    #[test]
    fn calculate_rejects_foreign_currency_rows() -> TestResult {
        let items = [Item::new(
            "a",
            1,
            Price::from_minor(500, USD),
            Price::from_minor(600, USD),
        )?];

        let result = DeliveryTotals::calculate(&items, GBP);

        assert!(
            matches!(result, Err(PriceError::CurrencyMismatch { .. })),
            "expected CurrencyMismatch, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn free_shipping_is_all_zero() {
        let shipping = ShippingItem::free("Standard", GBP);

        assert!(shipping.price.is_zero(), "price should be zero");
        assert!(shipping.tax_amount.is_zero(), "tax should be zero");
    }
}
