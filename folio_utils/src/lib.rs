/// Version string reported by the binaries and sent in the relay user agent.
pub fn folio_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Asserts that an expression matches a pattern, optionally guarded by a
/// predicate over the bindings of the pattern.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat $(if $pred:expr)?) => {{
        let val = $expr;
        match &val {
            #[allow(unused_variables, reason = "bindings may only be used by the guard")]
            $pat $(if $pred)? => (),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match {}",
                ::core::stringify!($pat $(if $pred)?)
            ),
        }
    }};
}
