#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![no_std]

/// Sets a gauge, optionally with labels.
///
/// ```ignore
/// sable_macros::set!(gauge, crate::Metrics::PEER_HEAD, head as f64);
/// ```
#[macro_export]
macro_rules! set {
    ($instrument:ident, $metric:path, $amount:expr $(, $key:expr => $value:expr)* $(,)?) => {
        #[cfg(feature = "metrics")]
        metrics::$instrument!($metric $(, $key => $value)*).set($amount);
    };
}

/// Increments a counter or gauge by one, optionally with labels.
///
/// ```ignore
/// sable_macros::inc!(counter, crate::Metrics::SERVED_ITEMS, "kind" => "headers");
/// ```
#[macro_export]
macro_rules! inc {
    ($instrument:ident, $metric:path $(, $key:expr => $value:expr)* $(,)?) => {
        #[cfg(feature = "metrics")]
        metrics::$instrument!($metric $(, $key => $value)*).increment(1);
    };
}

/// Increments a counter or gauge by an amount, optionally with labels.
#[macro_export]
macro_rules! add {
    ($instrument:ident, $metric:path, $amount:expr $(, $key:expr => $value:expr)* $(,)?) => {
        #[cfg(feature = "metrics")]
        metrics::$instrument!($metric $(, $key => $value)*).increment($amount);
    };
}

/// Records a histogram sample, optionally with labels.
#[macro_export]
macro_rules! record {
    ($instrument:ident, $metric:path, $amount:expr $(, $key:expr => $value:expr)* $(,)?) => {
        #[cfg(feature = "metrics")]
        metrics::$instrument!($metric $(, $key => $value)*).record($amount);
    };
}
