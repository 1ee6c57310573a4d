//! # API Module
//!
//! HTTP surface of the relay.
//!
//! ## Structure
//!
//! * `controllers` - Request handling, delegating to the domain services
//! * `routes` - Endpoint definitions and routing

pub mod controllers;

pub mod routes;
