pub(crate) mod action;
pub(crate) mod ease;
pub mod ops;
pub(crate) mod runner;
