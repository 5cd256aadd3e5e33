//! # ams-macros
//!
//! Derive macro for the value objects of the accounts management API.
//!
//! `#[derive(Object)]` turns a struct of optional fields into the full binding
//! for one API type: a chainable builder, paired accessors (`name()` returning
//! the zero value, `get_name()` returning presence), an `empty()` predicate, the
//! serde wire struct and the `ams_core::Object` codec implementation.
//!
//! The generated code refers to `::ams_core`, so the deriving crate must depend
//! on it. Use the re-export `ams_core::Object` rather than this crate directly.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use proc_macro::TokenStream;
use proc_macro_error2::proc_macro_error;
use syn::{DeriveInput, parse_macro_input};

mod object;

/// Derives the builder, accessors and wire codec of an API object.
///
/// # Example
///
/// ```ignore
/// use ams_core::Object;
///
/// #[derive(Debug, Clone, PartialEq, Object)]
/// #[object(kind = "Plan")]
/// pub struct Plan {
///     id: Option<String>,
///     href: Option<String>,
///     link: bool,
///     name: Option<String>,
///     #[object(rename = "type")]
///     type_: Option<String>,
/// }
///
/// let plan = Plan::builder().id("basic").name("Basic").build()?;
/// assert_eq!(plan.to_json()?, r#"{"kind":"Plan","id":"basic","name":"Basic"}"#);
/// ```
///
/// Struct attributes:
/// - `kind = "..."`: the object has identity (`id`, `href`, `link`) and a wire kind.
/// - `validate = "path"`: `fn(&T) -> Result<(), ams_core::BuildError>` run by `build`.
///
/// Field attributes:
/// - `rename = "..."`: wire name of the field.
///
/// Fields are `Option<T>` where `T` is `String`, a number, `bool`,
/// `OffsetDateTime`, another object, a `Vec` of those, or a
/// `BTreeMap<String, _>` of objects.
#[proc_macro_derive(Object, attributes(object))]
#[proc_macro_error]
pub fn derive_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    object::expand_derive_object(&input).into()
}
