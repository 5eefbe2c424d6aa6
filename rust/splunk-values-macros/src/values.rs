//! `Values` derive macro implementation
//!
//! Generates `Fields` and `Value` impls for a struct with named fields.
//!
//! # Example input
//!
//! ```rust,ignore
//! #[derive(Values)]
//! pub struct EntryId {
//!     #[values("-")]
//!     pub namespace: Namespace,
//!     #[values("name")]
//!     pub title: String,
//! }
//! ```
//!
//! # Generated output (simplified)
//!
//! ```rust,ignore
//! impl splunk_values::Fields for EntryId {
//!     fn type_name(&self) -> &'static str { "EntryId" }
//!     fn fields(&self) -> Vec<splunk_values::Field<'_>> {
//!         vec![
//!             Field { name: "namespace", tag: Some("-"), selective: None, exported: true, value: &self.namespace },
//!             Field { name: "title", tag: Some("name"), selective: None, exported: true, value: &self.title },
//!         ]
//!     }
//! }
//!
//! impl splunk_values::Value for EntryId {
//!     fn kind(&self) -> Kind<'_> { Kind::Struct(self) }
//!     fn is_empty(&self) -> bool { /* every field is empty */ }
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, ext::IdentExt, parse_macro_input, parse_quote};

use super::helpers::{is_exported, parse_string_attribute};

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let struct_name_lit = syn::LitStr::new(&struct_name.unraw().to_string(), struct_name.span());

    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields_named) => &fields_named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Values can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Values can only be derived for structs",
            ));
        }
    };

    let mut entries = Vec::with_capacity(fields.len());

    for field in fields {
        // Named fields always carry an ident
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };

        let name = syn::LitStr::new(&ident.unraw().to_string(), ident.span());
        let tag = match parse_string_attribute(&field.attrs, "values")? {
            Some(lit) => quote! { ::core::option::Option::Some(#lit) },
            None => quote! { ::core::option::Option::None },
        };
        let selective = match parse_string_attribute(&field.attrs, "selective")? {
            Some(lit) => quote! { ::core::option::Option::Some(#lit) },
            None => quote! { ::core::option::Option::None },
        };
        let exported = is_exported(&field.vis);

        entries.push(quote! {
            ::splunk_values::Field {
                name: #name,
                tag: #tag,
                selective: #selective,
                exported: #exported,
                value: &self.#ident,
            }
        });
    }

    // Generic structs bound every field type rather than every type
    // parameter, so marker parameters behind PhantomData need no impl.
    let mut generics = input.generics.clone();
    if !generics.params.is_empty() {
        let where_clause = generics.make_where_clause();
        for field in fields {
            let ty = &field.ty;
            where_clause
                .predicates
                .push(parse_quote! { #ty: ::splunk_values::Value });
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::splunk_values::Fields for #struct_name #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #struct_name_lit
            }

            fn fields(&self) -> ::std::vec::Vec<::splunk_values::Field<'_>> {
                ::std::vec![#(#entries),*]
            }
        }

        impl #impl_generics ::splunk_values::Value for #struct_name #ty_generics #where_clause {
            fn kind(&self) -> ::splunk_values::Kind<'_> {
                ::splunk_values::Kind::Struct(self)
            }

            fn is_empty(&self) -> bool {
                ::splunk_values::Fields::fields(self)
                    .iter()
                    .all(|field| ::splunk_values::Value::is_empty(field.value))
            }
        }
    })
}
