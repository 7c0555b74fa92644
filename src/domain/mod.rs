//! Domain types and the ports the gateway talks through.

pub mod card;
pub mod money;
pub mod options;
pub mod order;
pub mod payment;
pub mod ports;
pub mod response;
