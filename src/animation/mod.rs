pub(crate) mod ease;
pub(crate) mod envelope;
pub(crate) mod interp;
pub(crate) mod reveal;
pub(crate) mod sway;
