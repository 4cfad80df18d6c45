macro_rules! version {
    ($prefix:expr) => {
        concat!($prefix, env!("CARGO_PKG_VERSION"))
    };
}
