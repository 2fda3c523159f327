//! Hamper prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        AdditionalData, AdditionalDeliveryInfo, Address, BehaviourError, Cart, CartError,
        CartEvent, CouponCode, DeferEvents, Delivery, DeliveryInfo, DeliveryLocation,
        DeliveryTotals, DeliveryWorkflow, ExistingCustomerData, GiftCardAndVoucherBehaviour,
        InvalidateCartEvent, Item, ItemCartReference, ItemDiscount, LocationType,
        MockGiftCardAndVoucherBehaviour, Person, PersonalDetails, PlacedOrderInfo,
        PlacedOrderInfos, SelectedPayment, Session, ShippingItem, Teaser, TotalItem, TotalType,
        Totals,
    },
    prices::{Price, PriceError},
};
