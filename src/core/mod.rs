// Core value types, arithmetic, and error modeling.
pub mod counter;
pub mod error;
pub mod tripler;
