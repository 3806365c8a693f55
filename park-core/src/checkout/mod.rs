//! Ending a booking through the external checkout endpoint.
//!
//! The endpoint itself is a collaborator behind [`CheckoutGateway`]; this
//! module decides what the user is told about the result and keeps a
//! booking from being checked out twice at once.

pub mod coordinator;
pub mod factory;
pub mod gateway;
pub mod outcome;

pub use coordinator::CheckoutCoordinator;
pub use factory::{GatewayConfig, GatewayFactory, GatewayRegistry};
pub use gateway::{CheckoutError, CheckoutGateway};
pub use outcome::{CHECKOUT_CONFIRM_PROMPT, CheckoutOutcome, REFRESH_DELAY};
