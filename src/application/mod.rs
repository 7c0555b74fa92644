//! Application layer: the gateway and the pieces it composes per operation.
//!
//! `StripeGateway` routes each payment operation to the request builder, consults the
//! profile resolver when storing a card, hands the request to the provider and reads the
//! answer back through the response mapper.

pub mod gateway;
pub mod profile_resolver;
pub mod request_builder;
pub mod response_mapper;
