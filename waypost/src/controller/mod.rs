//! Built-in controllers.

pub mod welcome;

pub use welcome::{WelcomeController, WelcomeError};
