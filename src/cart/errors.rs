//! Cart errors.

use thiserror::Error;

/// Errors raised by the cart aggregate's lookup and decode operations.
///
/// All of these are recoverable "not there" conditions for the caller to
/// handle; none of them terminate anything.
#[derive(Debug, Error)]
pub enum CartError {
    /// No delivery in the cart carries the given code.
    #[error("delivery for code {0} not found")]
    DeliveryNotFound(String),

    /// The delivery exists but holds no item with the given id.
    #[error("item {0} not existing in delivery")]
    ItemNotFound(String),

    /// The delivery carries no additional info under the requested key.
    #[error("additional delivery infos not found")]
    AdditionalInfoNotFound,

    /// An additional info blob exists but could not be decoded into the
    /// requested target type.
    #[error("could not decode additional delivery info")]
    AdditionalInfoDecode(#[source] serde_json::Error),
}
