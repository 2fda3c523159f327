//! Cart behaviours.
//!
//! The boundary to the external cart service: this crate defines the data
//! passed through it and a generated mock for tests, never the behaviour's
//! logic itself.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::cart::{Cart, errors::CartError};

/// Handle to the web session a cart belongs to.
///
/// Carried as an event payload only; nothing in this crate acts on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque session identifier.
    pub id: String,
}

/// Signals that a cached cart must be dropped and re-fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidateCartEvent {
    /// Session whose cached cart is stale.
    pub session: Session,
}

/// An event a behaviour asks the caller to dispatch after it commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A cached cart became stale.
    Invalidated(InvalidateCartEvent),
}

/// Events to be dispatched by the caller once the behaviour's result has
/// been committed.
pub type DeferEvents = Vec<CartEvent>;

/// Errors returned by cart behaviours.
#[derive(Debug, Error)]
pub enum BehaviourError {
    /// The code is not redeemable against the given cart.
    #[error("code {0} could not be applied")]
    NotApplicable(String),

    /// A cart lookup inside the behaviour failed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Applies a code that may be either a gift card or a voucher.
///
/// Implemented by the external cart service; carts are immutable here, so
/// a successful application returns a replacement cart plus the events to
/// defer. The generated [`MockGiftCardAndVoucherBehaviour`] stands in for
/// the service in tests.
#[automock]
#[async_trait]
pub trait GiftCardAndVoucherBehaviour: Send + Sync {
    /// Applies `any_code` to the cart, returning the updated cart and the
    /// events to dispatch after commit.
    ///
    /// # Errors
    ///
    /// Returns a [`BehaviourError`] if the code cannot be applied.
    async fn apply_any(
        &self,
        cart: &Cart,
        any_code: &str,
    ) -> Result<(Cart, DeferEvents), BehaviourError>;
}
