//! `reqwest`-backed checkout gateway for the ParkWise server.

mod factory;
mod gateway;

pub use factory::HttpGatewayFactory;
pub use gateway::HttpCheckoutGateway;
