/// Qualified names and the wrapper namespace.
pub mod name;

/// The generic list wrapper and named root elements.
pub mod wrapper;
