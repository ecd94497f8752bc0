pub mod action;
pub mod directive;
pub mod transcript;

pub use action::*;
pub use directive::*;
pub use transcript::*;
