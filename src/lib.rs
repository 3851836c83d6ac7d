//! PriceLens - Pricing intelligence engine.
//!
//! Elasticity simulation and decision lifecycle modeling, organized in a
//! hexagonal architecture: `domain` holds the core model, `ports` define
//! the contracts with the outside world, `adapters` implement them,
//! `application` orchestrates use cases, and `config` wires it together.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
