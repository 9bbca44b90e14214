pub(crate) mod core;
pub(crate) mod diagnostic;
pub(crate) mod error;
pub(crate) mod math;
