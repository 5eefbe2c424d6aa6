//! Shared helper functions for the derive macros

use syn::{Attribute, LitStr, Visibility};

/// Read the string literal of a `#[name("...")]` attribute.
///
/// Returns `Ok(None)` when the attribute is absent and an error spanning the
/// attribute when it is repeated or is not a single string literal.
pub fn parse_string_attribute(attrs: &[Attribute], name: &str) -> syn::Result<Option<LitStr>> {
    let mut found: Option<LitStr> = None;

    for attr in attrs {
        if !attr.path().is_ident(name) {
            continue;
        }

        if found.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                format!("duplicate #[{name}(...)] attribute"),
            ));
        }

        let lit = attr.parse_args::<LitStr>().map_err(|_| {
            syn::Error::new_spanned(
                attr,
                format!("expected a string literal, e.g. #[{name}(\"...\")]"),
            )
        })?;
        found = Some(lit);
    }

    Ok(found)
}

/// Only `pub` fields take part in encoding and selection.
pub fn is_exported(vis: &Visibility) -> bool {
    matches!(vis, Visibility::Public(_))
}
