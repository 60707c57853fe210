use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Wraps a function in a [`tracing`] span which logs the returned value on
/// the trace level.
///
/// Any arguments are passed on to `#[tracing::instrument]`, e.g.
/// `#[trace_instrument(skip(self))]`.
#[proc_macro_attribute]
pub fn trace_instrument(meta: TokenStream, input: TokenStream) -> TokenStream {
    let meta = proc_macro2::TokenStream::from(meta);
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(input as ItemFn);

    let args = if meta.is_empty() {
        quote! { ret(level = "trace") }
    } else {
        quote! { ret(level = "trace"), #meta }
    };

    quote! {
        #[::tracing::instrument(#args)]
        #(#attrs)*
        #vis #sig {
            ::tracing::trace!("enter");
            #block
        }
    }
    .into()
}
