use proc_macro::TokenStream;
use quote::quote;
use syn::{Ident, ItemFn, parse_macro_input};

/// Baseline targets, always compiled.
const BASELINE_TARGETS: [&str; 2] = ["x86_64+sse2", "aarch64+neon"];

/// Wide targets, only worth the compile time in optimized builds.
const WIDE_TARGETS: [&str; 4] = [
    "x86_64+avx512f+avx512bw+avx512cd+avx512dq+avx512vl",
    "x86_64+avx2+fma",
    "x86_64+sse4.2",
    "aarch64+neon+sve",
];

/// Compiles a per-pixel kernel once per CPU feature set and dispatches at runtime.
///
/// Expands to `#[multiversion::multiversion(targets(...))]`. The calling crate
/// must depend on `multiversion`.
///
/// `#[simd_targets(baseline)]` restricts the expansion to the baseline targets
/// even in release builds, for kernels where wider vectors do not pay off.
///
/// # Example
///
/// ```ignore
/// use duotoner_macros::simd_targets;
///
/// #[simd_targets]
/// fn luma_row(row: &[u8], out: &mut [f32]) {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn simd_targets(attr: TokenStream, input: TokenStream) -> TokenStream {
    let func = parse_macro_input!(input as ItemFn);

    let baseline_only = if attr.is_empty() {
        false
    } else {
        let flag = parse_macro_input!(attr as Ident);
        if flag != "baseline" {
            return syn::Error::new(flag.span(), "expected `baseline` or no argument")
                .to_compile_error()
                .into();
        }
        true
    };

    let mut targets: Vec<&str> = Vec::new();
    if !baseline_only && !cfg!(debug_assertions) {
        targets.extend(WIDE_TARGETS);
    }
    targets.extend(BASELINE_TARGETS);

    let expanded = quote! {
        #[multiversion::multiversion(targets(#(#targets),*))]
        #func
    };

    TokenStream::from(expanded)
}
