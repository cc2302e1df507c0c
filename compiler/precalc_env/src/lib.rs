pub mod env;

pub use env::{is_identifier, parse_binding, parse_bindings, BindingError, ValueEnv};
