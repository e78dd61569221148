use lazy_static::lazy_static;
use ron::{Options, extensions::Extensions};

lazy_static! {
    /// Shared `ron` options for every RON document aztft reads: configuration files and resource catalogs.
    pub static ref RON: Options = Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
}

/// Case-insensitive ASCII comparison, the way ARM compares keywords, namespaces and types.
pub fn eq_fold(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
