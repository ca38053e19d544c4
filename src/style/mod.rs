pub(crate) mod config;
pub(crate) mod kind;
pub(crate) mod plan;
