//! # Handler Resolvers
//!
//! The two standard [`HandlerResolver`] variants:
//!
//! - [`ControllerActionResolver`]: `"<ControllerId>#<action>"` descriptors,
//!   constructing the controller through an [`Injector`].
//! - [`CallableResolver`]: descriptors that already are a handler.
//!
//! [`HandlerResolver`]: waypost_core::HandlerResolver
//! [`Injector`]: waypost_core::Injector

pub mod callable;
pub mod controller_action;

pub use callable::CallableResolver;
pub use controller_action::ControllerActionResolver;
