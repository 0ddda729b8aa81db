//! # waypost-std
//!
//! Standard implementations for the Waypost HTTP dispatch pipeline.
//!
//! This crate provides:
//! - **Route tables**: [`PatternTable`](routing::PatternTable)
//! - **Handler resolvers**: [`ControllerActionResolver`](resolvers::ControllerActionResolver),
//!   [`CallableResolver`](resolvers::CallableResolver)
//! - **Controller construction**: [`ControllerRegistry`](registry::ControllerRegistry)
//! - **Routing**: [`Router`](router::Router)
//! - **Events**: [`EventEmitter`](emitter::EventEmitter),
//!   [`BeforeController`](events::BeforeController), [`AfterController`](events::AfterController)
//! - **Dispatch**: [`Engine`](engine::Engine), [`EngineBuilder`](engine::EngineBuilder)
//! - **Standard listeners**: Logging

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use waypost_core;

// Modules
pub mod emitter;
pub mod engine;
pub mod events;
pub mod listeners;
pub mod registry;
pub mod resolvers;
pub mod router;
pub mod routing;
pub mod testing;

#[cfg(feature = "inventory")]
pub use inventory;
