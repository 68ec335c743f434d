//! Version identifiers written into every output series

pub const SOFTWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the calculation method (*NOT* the package version)
pub const CALCULATION_VERSION: &str = "3.20210820";
