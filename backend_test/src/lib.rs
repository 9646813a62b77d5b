use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, punctuated::Punctuated, spanned::Spanned, FnArg, Ident, ItemFn, Pat,
    Signature, Token, Type,
};

/// Transform an asynchronous test into a synchronous one and inject dependencies.
///
/// Injectable dependencies are [`rocket::local::asynchronous::Client`] and
/// `crate::store::MemoryStore`; the client talks to a server built over that
/// same store.
///
/// Accepted arguments:
/// - `seeded`: start from the example nominees and votes rather than an empty store.
/// - `strict`: run the server with strict nominee validation.
#[proc_macro_attribute]
pub fn backend_test(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut item_fn = parse_macro_input!(input as ItemFn);
    let args = parse_macro_input!(args with Punctuated::<Ident, Token![,]>::parse_terminated);

    // Extract type information and reject invalid function signatures.
    let test_args = match check_sig(item_fn.sig.clone()) {
        Ok(args) => args,
        Err(err) => {
            return err.into_compile_error().into();
        }
    };

    // Interpret the setup options.
    let mut seeded = false;
    let mut strict = false;
    for arg in &args {
        if arg == "seeded" {
            seeded = true;
        } else if arg == "strict" {
            strict = true;
        } else {
            return syn::Error::new(arg.span(), "Expected `seeded` and/or `strict`")
                .into_compile_error()
                .into();
        }
    }
    let store_init = if seeded {
        quote! { crate::store::MemoryStore::example().await }
    } else {
        quote! { crate::store::MemoryStore::default() }
    };
    let validation = if strict {
        quote! { crate::ValidationMode::Strict }
    } else {
        quote! { crate::ValidationMode::Lenient }
    };

    // Rename the future so the test can have its original name.
    let name = item_fn.sig.ident.clone();
    let new_name = format_ident!("{}_fut", name);
    item_fn.sig.ident = new_name.clone();

    // Rewrite the test function.
    quote! {
        #[test]
        fn #name() {
            /// Test setup.
            async fn setup() -> (rocket::local::asynchronous::Client, crate::store::MemoryStore) {
                let store = #store_init;
                let rocket = crate::rocket_for_stores(
                    std::sync::Arc::new(store.clone()),
                    std::sync::Arc::new(store.clone()),
                    crate::Config::new(#validation),
                );
                let rocket_client = rocket::local::asynchronous::Client::tracked(rocket)
                    .await
                    .unwrap();
                (rocket_client, store)
            }

            /// The test itself.
            #item_fn

            let runtime = rocket::tokio::runtime::Builder::new_multi_thread()
                .thread_name("rocket-worker-test-thread")
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();

            runtime.block_on(async {
                #[allow(unused_variables)]
                let (rocket_client, store) = setup().await;
                #new_name(#(#test_args),*).await;
            });
        }
    }
    .into()
}

/// Ensure the wrapped test is async, extract parameters to inject, and reject unknown parameters.
fn check_sig(sig: Signature) -> Result<Vec<TokenStream2>, syn::Error> {
    if sig.asyncness.is_none() {
        return Err(syn::Error::new(sig.span(), "Test must be marked `async`"));
    }

    let mut has_client = false;
    let mut has_store = false;
    let mut args = vec![];

    for input in &sig.inputs {
        if let FnArg::Typed(pat_type) = input {
            if let (Pat::Ident(_), Type::Path(type_path)) = (&*pat_type.pat, &*pat_type.ty) {
                if let Some(type_ident) = type_path.path.get_ident() {
                    if type_ident == "Client" {
                        if has_client {
                            return Err(syn::Error::new(
                                input.span(),
                                "Test cannot accept more than one `rocket::local::asynchronous::Client`",
                            ));
                        }
                        has_client = true;
                        args.push(quote! { rocket_client });
                        continue;
                    } else if type_ident == "MemoryStore" {
                        if has_store {
                            return Err(syn::Error::new(
                                input.span(),
                                "Test cannot accept more than one `MemoryStore`",
                            ));
                        }
                        has_store = true;
                        args.push(quote! { store.clone() });
                        continue;
                    }
                }
            }
        }

        return Err(syn::Error::new(
            input.span(),
            "Expected one of `client_ident: Client` or `store_ident: MemoryStore`",
        ));
    }

    Ok(args)
}
