pub(crate) mod bmfont;
pub(crate) mod display;
pub(crate) mod label;
pub(crate) mod layout;
pub(crate) mod outline;
