use proc_macro_error2::{abort, emit_error};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Data, DeriveInput, Field, Fields, GenericArgument, Ident, LitStr, Path, PathArguments,
    PathSegment, Type, spanned::Spanned,
};

const SCALARS: &[&str] = &[
    "bool", "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize", "f32", "f64",
];

/// How a field is stored, copied and encoded.
enum Shape {
    Text,
    Scalar,
    Time,
    TextList,
    Nested(Type),
    NestedList(Type),
    /// `BTreeMap<String, N>`.
    NestedMap(Type),
}

/// One optional attribute of the object.
struct Attribute {
    ident: Ident,
    /// Name used for the `get_*` accessor, without trailing underscores.
    presence: Ident,
    /// JSON field name.
    wire: String,
    /// `T` in `Option<T>`.
    ty: Type,
    shape: Shape,
}

/// Parsed `#[object(...)]` container attributes.
#[derive(Default)]
struct ObjectAttrs {
    kind: Option<String>,
    validate: Option<Path>,
}

fn last_segment(ty: &Type) -> Option<&PathSegment> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path.path.segments.last(),
        _ => None,
    }
}

fn is_named(ty: &Type, name: &str) -> bool {
    last_segment(ty).is_some_and(|segment| segment.ident == name && segment.arguments.is_none())
}

/// Returns `T` when `ty` is `wrapper<T>`.
fn generic_arg<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let segment = last_segment(ty)?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

/// Returns `V` when `ty` is `BTreeMap<String, V>`.
fn map_value(ty: &Type) -> Option<&Type> {
    let segment = last_segment(ty)?;
    if segment.ident != "BTreeMap" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match (args.args.first(), args.args.get(1)) {
        (Some(GenericArgument::Type(key)), Some(GenericArgument::Type(value)))
            if args.args.len() == 2 && is_named(key, "String") =>
        {
            Some(value)
        }
        _ => None,
    }
}

fn classify(inner: &Type) -> Shape {
    if is_named(inner, "String") {
        Shape::Text
    } else if SCALARS.iter().any(|scalar| is_named(inner, scalar)) {
        Shape::Scalar
    } else if is_named(inner, "OffsetDateTime") {
        Shape::Time
    } else if let Some(element) = generic_arg(inner, "Vec") {
        if is_named(element, "String") {
            Shape::TextList
        } else {
            Shape::NestedList(element.clone())
        }
    } else if let Some(value) = map_value(inner) {
        Shape::NestedMap(value.clone())
    } else {
        Shape::Nested(inner.clone())
    }
}

fn parse_object_attrs(input: &DeriveInput) -> ObjectAttrs {
    let mut attrs = ObjectAttrs::default();
    for attr in &input.attrs {
        if !attr.path().is_ident("object") {
            continue;
        }
        let result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("kind") {
                let lit: LitStr = meta.value()?.parse()?;
                attrs.kind = Some(lit.value());
            } else if meta.path.is_ident("validate") {
                let lit: LitStr = meta.value()?.parse()?;
                attrs.validate = Some(lit.parse()?);
            } else {
                return Err(meta.error("expected `kind` or `validate`"));
            }
            Ok(())
        });
        if let Err(e) = result {
            emit_error!(attr.span(), "Failed to parse #[object] attribute: {}", e);
        }
    }
    attrs
}

fn parse_attribute(field: &Field, ident: Ident, inner: &Type) -> Attribute {
    let name = ident.to_string();
    let bare = name
        .strip_prefix("r#")
        .unwrap_or(&name)
        .trim_end_matches('_');
    let mut wire = bare.to_owned();
    for attr in &field.attrs {
        if !attr.path().is_ident("object") {
            continue;
        }
        let result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                wire = lit.value();
                Ok(())
            } else {
                Err(meta.error("expected `rename`"))
            }
        });
        if let Err(e) = result {
            emit_error!(attr.span(), "Failed to parse #[object] attribute: {}", e);
        }
    }
    Attribute {
        presence: format_ident!("get_{}", bare),
        ident,
        wire,
        ty: inner.clone(),
        shape: classify(inner),
    }
}

pub fn expand_derive_object(input: &DeriveInput) -> TokenStream {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => abort!(
                input.span(),
                "#[derive(Object)] requires a struct with named fields"
            ),
        },
        _ => abort!(
            input.span(),
            "#[derive(Object)] can only be applied to structs"
        ),
    };
    if !input.generics.params.is_empty() {
        abort!(
            input.generics.span(),
            "#[derive(Object)] doesn't support generic structs"
        );
    }

    let attrs = parse_object_attrs(input);
    let mut attributes = Vec::new();
    let mut has_link = false;
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        if ident == "link" && is_named(&field.ty, "bool") {
            has_link = true;
            continue;
        }
        let Some(inner) = generic_arg(&field.ty, "Option") else {
            emit_error!(
                field.ty.span(),
                "object fields must be `Option<_>`, only `link` may be a plain `bool`"
            );
            continue;
        };
        attributes.push(parse_attribute(field, ident, inner));
    }

    if attrs.kind.is_some() {
        if !has_link {
            emit_error!(
                input.ident.span(),
                "objects with a kind must declare `link: bool`"
            );
        }
        for required in ["id", "href"] {
            let declared = attributes
                .iter()
                .any(|a| a.ident == required && matches!(a.shape, Shape::Text));
            if !declared {
                emit_error!(
                    input.ident.span(),
                    "objects with a kind must declare `{}: Option<String>`",
                    required
                );
            }
        }
    } else if has_link {
        emit_error!(
            input.ident.span(),
            "`link` is only supported together with #[object(kind = \"...\")]"
        );
    }

    let builder = expand_builder(input, &attrs, &attributes);
    let accessors = expand_accessors(input, &attrs, &attributes);
    let codec = expand_codec(input, &attrs, &attributes);
    quote! {
        #builder
        #accessors
        #codec
    }
}

fn builder_ident(input: &DeriveInput) -> Ident {
    format_ident!("{}Builder", input.ident)
}

fn data_ident(input: &DeriveInput) -> Ident {
    format_ident!("{}Data", input.ident)
}

/// Expression deciding whether every attribute but `href` is unset.
fn empty_check(attributes: &[Attribute]) -> TokenStream {
    let checks: Vec<_> = attributes
        .iter()
        .filter(|a| a.ident != "href")
        .map(|a| {
            let ident = &a.ident;
            match a.shape {
                Shape::TextList | Shape::NestedList(_) => quote! {
                    self.#ident.as_ref().is_none_or(::std::vec::Vec::is_empty)
                },
                Shape::NestedMap(_) => quote! {
                    self.#ident
                        .as_ref()
                        .is_none_or(::std::collections::BTreeMap::is_empty)
                },
                _ => quote! { self.#ident.is_none() },
            }
        })
        .collect();
    if checks.is_empty() {
        quote! { true }
    } else {
        quote! { #(#checks)&&* }
    }
}

/// Fresh builder of `nested` holding a copy of `value`.
fn nested_copy(nested: &Type) -> TokenStream {
    quote! {
        <<#nested as ::ams_core::Object>::Builder as ::ams_core::ObjectBuilder>::copy(
            ::core::default::Default::default(),
            value,
        )
    }
}

/// Path of `ObjectBuilder::build` for the builder of `nested`.
fn nested_build(nested: &Type) -> TokenStream {
    quote! {
        <<#nested as ::ams_core::Object>::Builder as ::ams_core::ObjectBuilder>::build
    }
}

fn expand_builder(
    input: &DeriveInput,
    attrs: &ObjectAttrs,
    attributes: &[Attribute],
) -> TokenStream {
    let name = &input.ident;
    let builder = builder_ident(input);
    let vis = &input.vis;
    let doc = format!("Builder of [`{name}`] objects.");
    let identified = attrs.kind.is_some();

    let fields = attributes.iter().map(|a| {
        let ident = &a.ident;
        let ty = &a.ty;
        let stored = match &a.shape {
            Shape::Text => quote! { ::std::string::String },
            Shape::Scalar | Shape::Time => quote! { #ty },
            Shape::TextList => quote! { ::std::vec::Vec<::std::string::String> },
            Shape::Nested(nested) => quote! { <#nested as ::ams_core::Object>::Builder },
            Shape::NestedList(nested) => {
                quote! { ::std::vec::Vec<<#nested as ::ams_core::Object>::Builder> }
            }
            Shape::NestedMap(nested) => quote! {
                ::std::collections::BTreeMap<
                    ::std::string::String,
                    <#nested as ::ams_core::Object>::Builder,
                >
            },
        };
        quote! { #ident: ::core::option::Option<#stored>, }
    });

    let setters = attributes.iter().map(|a| {
        let ident = &a.ident;
        let ty = &a.ty;
        match &a.shape {
            Shape::Text => quote! {
                pub fn #ident(
                    mut self,
                    value: impl ::core::convert::Into<::std::string::String>,
                ) -> Self {
                    self.#ident = ::core::option::Option::Some(value.into());
                    self
                }
            },
            Shape::Scalar | Shape::Time => quote! {
                pub fn #ident(mut self, value: #ty) -> Self {
                    self.#ident = ::core::option::Option::Some(value);
                    self
                }
            },
            Shape::TextList => quote! {
                pub fn #ident<I, S>(mut self, values: I) -> Self
                where
                    I: ::core::iter::IntoIterator<Item = S>,
                    S: ::core::convert::Into<::std::string::String>,
                {
                    self.#ident = ::core::option::Option::Some(
                        values.into_iter().map(::core::convert::Into::into).collect(),
                    );
                    self
                }
            },
            Shape::Nested(nested) => quote! {
                pub fn #ident(mut self, value: <#nested as ::ams_core::Object>::Builder) -> Self {
                    self.#ident = ::core::option::Option::Some(value);
                    self
                }
            },
            Shape::NestedList(nested) => quote! {
                pub fn #ident<I>(mut self, values: I) -> Self
                where
                    I: ::core::iter::IntoIterator<
                        Item = <#nested as ::ams_core::Object>::Builder,
                    >,
                {
                    self.#ident = ::core::option::Option::Some(values.into_iter().collect());
                    self
                }
            },
            Shape::NestedMap(nested) => quote! {
                pub fn #ident<I, K>(mut self, entries: I) -> Self
                where
                    I: ::core::iter::IntoIterator<
                        Item = (K, <#nested as ::ams_core::Object>::Builder),
                    >,
                    K: ::core::convert::Into<::std::string::String>,
                {
                    self.#ident = ::core::option::Option::Some(
                        entries
                            .into_iter()
                            .map(|(key, value)| (::core::convert::Into::into(key), value))
                            .collect(),
                    );
                    self
                }
            },
        }
    });

    let copies = attributes.iter().map(|a| {
        let ident = &a.ident;
        match &a.shape {
            Shape::Text | Shape::TextList => quote! { self.#ident = object.#ident.clone(); },
            Shape::Scalar | Shape::Time => quote! { self.#ident = object.#ident; },
            Shape::Nested(nested) => {
                let copy = nested_copy(nested);
                quote! {
                    self.#ident = object.#ident.as_ref().map(|value| #copy);
                }
            }
            Shape::NestedList(nested) => {
                let copy = nested_copy(nested);
                quote! {
                    self.#ident = object
                        .#ident
                        .as_ref()
                        .map(|values| values.iter().map(|value| #copy).collect());
                }
            }
            Shape::NestedMap(nested) => {
                let copy = nested_copy(nested);
                quote! {
                    self.#ident = object.#ident.as_ref().map(|entries| {
                        entries
                            .iter()
                            .map(|(key, value)| (::core::clone::Clone::clone(key), #copy))
                            .collect()
                    });
                }
            }
        }
    });

    let builds = attributes.iter().map(|a| {
        let ident = &a.ident;
        let wire = &a.wire;
        match &a.shape {
            Shape::Text | Shape::TextList => quote! { #ident: self.#ident.clone(), },
            Shape::Scalar | Shape::Time => quote! { #ident: self.#ident, },
            Shape::Nested(nested) => {
                let build = nested_build(nested);
                quote! {
                    #ident: match &self.#ident {
                        ::core::option::Option::Some(builder) => ::core::option::Option::Some(
                            #build(builder).map_err(|e| ::ams_core::BuildError::nested(#wire, e))?,
                        ),
                        ::core::option::Option::None => ::core::option::Option::None,
                    },
                }
            }
            Shape::NestedList(nested) => {
                let build = nested_build(nested);
                quote! {
                    #ident: match &self.#ident {
                        ::core::option::Option::Some(builders) => {
                            let mut items = ::std::vec::Vec::with_capacity(builders.len());
                            for (index, builder) in builders.iter().enumerate() {
                                items.push(#build(builder).map_err(|e| {
                                    let path = ::std::format!("{}[{}]", #wire, index);
                                    ::ams_core::BuildError::nested(path, e)
                                })?);
                            }
                            ::core::option::Option::Some(items)
                        }
                        ::core::option::Option::None => ::core::option::Option::None,
                    },
                }
            }
            Shape::NestedMap(nested) => {
                let build = nested_build(nested);
                quote! {
                    #ident: match &self.#ident {
                        ::core::option::Option::Some(builders) => {
                            let mut entries = ::std::collections::BTreeMap::new();
                            for (key, builder) in builders {
                                let value = #build(builder).map_err(|e| {
                                    let path = ::std::format!("{}[{}]", #wire, key);
                                    ::ams_core::BuildError::nested(path, e)
                                })?;
                                entries.insert(::core::clone::Clone::clone(key), value);
                            }
                            ::core::option::Option::Some(entries)
                        }
                        ::core::option::Option::None => ::core::option::Option::None,
                    },
                }
            }
        }
    });

    let link_field = identified.then(|| quote! { link: bool, });
    let link_setter = identified.then(|| {
        quote! {
            /// Marks the object as a link: only its identity is meaningful.
            pub fn link(mut self, value: bool) -> Self {
                self.link = value;
                self
            }
        }
    });
    let link_copy = identified.then(|| quote! { self.link = object.link; });
    let link_build = identified.then(|| quote! { link: self.link, });
    let validate = attrs
        .validate
        .as_ref()
        .map(|path| quote! { #path(&object)?; });
    let empty = empty_check(attributes);

    quote! {
        #[doc = #doc]
        #[derive(::core::fmt::Debug, ::core::clone::Clone, ::core::default::Default)]
        #[must_use]
        #vis struct #builder {
            #link_field
            #(#fields)*
        }

        impl #builder {
            pub fn new() -> Self {
                ::core::default::Default::default()
            }

            #link_setter

            #(#setters)*

            /// Replaces the content of the builder with a deep copy of `object`.
            pub fn copy(mut self, object: &#name) -> Self {
                #link_copy
                #(#copies)*
                self
            }

            /// Returns `true` when no attribute has been set.
            #[must_use]
            pub fn empty(&self) -> bool {
                #empty
            }

            /// Builds the object, building nested builders first.
            ///
            /// # Errors
            /// Returns the first error reported by a nested builder or by validation.
            pub fn build(&self) -> ::core::result::Result<#name, ::ams_core::BuildError> {
                let object = #name {
                    #link_build
                    #(#builds)*
                };
                #validate
                ::core::result::Result::Ok(object)
            }
        }

        impl ::ams_core::ObjectBuilder for #builder {
            type Object = #name;

            fn build(&self) -> ::core::result::Result<#name, ::ams_core::BuildError> {
                #builder::build(self)
            }

            fn copy(self, object: &#name) -> Self {
                #builder::copy(self, object)
            }
        }
    }
}

fn expand_accessors(
    input: &DeriveInput,
    attrs: &ObjectAttrs,
    attributes: &[Attribute],
) -> TokenStream {
    let name = &input.ident;
    let builder = builder_ident(input);

    let getters = attributes.iter().map(|a| {
        let ident = &a.ident;
        let presence = &a.presence;
        let ty = &a.ty;
        match &a.shape {
            Shape::Text => quote! {
                #[must_use]
                pub fn #ident(&self) -> &str {
                    self.#ident.as_deref().unwrap_or_default()
                }

                #[must_use]
                pub fn #presence(&self) -> ::core::option::Option<&str> {
                    self.#ident.as_deref()
                }
            },
            Shape::Scalar => quote! {
                #[must_use]
                pub fn #ident(&self) -> #ty {
                    self.#ident.unwrap_or_default()
                }

                #[must_use]
                pub fn #presence(&self) -> ::core::option::Option<#ty> {
                    self.#ident
                }
            },
            Shape::Time => quote! {
                #[must_use]
                pub fn #ident(&self) -> #ty {
                    self.#ident.unwrap_or(<#ty>::UNIX_EPOCH)
                }

                #[must_use]
                pub fn #presence(&self) -> ::core::option::Option<#ty> {
                    self.#ident
                }
            },
            Shape::TextList => quote! {
                #[must_use]
                pub fn #ident(&self) -> &[::std::string::String] {
                    self.#ident.as_deref().unwrap_or_default()
                }

                #[must_use]
                pub fn #presence(&self) -> ::core::option::Option<&[::std::string::String]> {
                    self.#ident.as_deref()
                }
            },
            Shape::Nested(nested) => quote! {
                #[must_use]
                pub fn #ident(&self) -> ::core::option::Option<&#nested> {
                    self.#ident.as_ref()
                }

                #[must_use]
                pub fn #presence(&self) -> ::core::option::Option<&#nested> {
                    self.#ident.as_ref()
                }
            },
            Shape::NestedList(nested) => quote! {
                #[must_use]
                pub fn #ident(&self) -> &[#nested] {
                    self.#ident.as_deref().unwrap_or_default()
                }

                #[must_use]
                pub fn #presence(&self) -> ::core::option::Option<&[#nested]> {
                    self.#ident.as_deref()
                }
            },
            Shape::NestedMap(nested) => quote! {
                /// Value stored under `key`.
                #[must_use]
                pub fn #ident(&self, key: &str) -> ::core::option::Option<&#nested> {
                    self.#ident.as_ref().and_then(|entries| entries.get(key))
                }

                #[must_use]
                pub fn #presence(
                    &self,
                ) -> ::core::option::Option<
                    &::std::collections::BTreeMap<::std::string::String, #nested>,
                > {
                    self.#ident.as_ref()
                }
            },
        }
    });

    let identity = attrs.kind.as_ref().map(|_| {
        quote! {
            /// Wire kind of the object, the link kind when it is only a reference.
            #[must_use]
            pub fn kind(&self) -> &'static str {
                if self.link {
                    <Self as ::ams_core::Object>::LINK_KIND
                } else {
                    <Self as ::ams_core::Object>::KIND
                }
            }

            #[must_use]
            pub fn link(&self) -> bool {
                self.link
            }
        }
    });
    let empty = empty_check(attributes);

    quote! {
        impl #name {
            pub fn builder() -> #builder {
                #builder::new()
            }

            #identity

            #(#getters)*

            /// Returns `true` when no attribute is set.
            #[must_use]
            pub fn empty(&self) -> bool {
                #empty
            }
        }
    }
}

fn expand_codec(input: &DeriveInput, attrs: &ObjectAttrs, attributes: &[Attribute]) -> TokenStream {
    let name = &input.ident;
    let builder = builder_ident(input);
    let data = data_ident(input);
    let vis = &input.vis;
    let kind = attrs.kind.clone().unwrap_or_else(|| name.to_string());
    let link_kind = format!("{kind}Link");
    let list_kind = format!("{kind}List");
    let list_link_kind = format!("{kind}ListLink");
    let list_nil_kind = format!("{kind}ListNil");
    let identified = attrs.kind.is_some();

    let data_fields = attributes.iter().map(|a| {
        let ident = &a.ident;
        let wire = &a.wire;
        let ty = &a.ty;
        let (stored, with) = match &a.shape {
            Shape::Text => (quote! { ::std::string::String }, None),
            Shape::Scalar => (quote! { #ty }, None),
            Shape::Time => (
                quote! { #ty },
                Some(quote! { with = "::ams_core::timestamp::option", }),
            ),
            Shape::TextList => (quote! { ::std::vec::Vec<::std::string::String> }, None),
            Shape::Nested(nested) => (quote! { <#nested as ::ams_core::Object>::Data }, None),
            Shape::NestedList(nested) => (
                quote! { ::std::vec::Vec<<#nested as ::ams_core::Object>::Data> },
                None,
            ),
            Shape::NestedMap(nested) => (
                quote! {
                    ::std::collections::BTreeMap<
                        ::std::string::String,
                        <#nested as ::ams_core::Object>::Data,
                    >
                },
                None,
            ),
        };
        quote! {
            #[serde(
                default,
                skip_serializing_if = "::core::option::Option::is_none",
                rename = #wire,
                #with
            )]
            pub #ident: ::core::option::Option<#stored>,
        }
    });

    let wraps = attributes.iter().map(|a| {
        let ident = &a.ident;
        match &a.shape {
            Shape::Text | Shape::TextList => quote! { #ident: self.#ident.clone(), },
            Shape::Scalar | Shape::Time => quote! { #ident: self.#ident, },
            Shape::Nested(nested) => quote! {
                #ident: self.#ident.as_ref().map(<#nested as ::ams_core::Object>::wrap),
            },
            Shape::NestedList(nested) => quote! {
                #ident: self.#ident.as_ref().map(|items| {
                    items.iter().map(<#nested as ::ams_core::Object>::wrap).collect()
                }),
            },
            Shape::NestedMap(nested) => quote! {
                #ident: self.#ident.as_ref().map(|entries| {
                    entries
                        .iter()
                        .map(|(key, value)| {
                            let value = <#nested as ::ams_core::Object>::wrap(value);
                            (::core::clone::Clone::clone(key), value)
                        })
                        .collect()
                }),
            },
        }
    });

    let unwraps = attributes.iter().map(|a| {
        let ident = &a.ident;
        match &a.shape {
            Shape::Nested(nested) => quote! {
                #ident: data
                    .#ident
                    .map(<#nested as ::ams_core::Object>::unwrap)
                    .transpose()?,
            },
            Shape::NestedList(nested) => quote! {
                #ident: data
                    .#ident
                    .map(|items| {
                        items
                            .into_iter()
                            .map(<#nested as ::ams_core::Object>::unwrap)
                            .collect::<::core::result::Result<::std::vec::Vec<_>, _>>()
                    })
                    .transpose()?,
            },
            Shape::NestedMap(nested) => quote! {
                #ident: data
                    .#ident
                    .map(|entries| {
                        entries
                            .into_iter()
                            .map(|(key, value)| {
                                let value = <#nested as ::ams_core::Object>::unwrap(value)?;
                                ::core::result::Result::Ok((key, value))
                            })
                            .collect::<::core::result::Result<
                                ::std::collections::BTreeMap<_, _>,
                                ::ams_core::DecodeError,
                            >>()
                    })
                    .transpose()?,
            },
            _ => quote! { #ident: data.#ident, },
        }
    });

    let kind_field = identified.then(|| {
        quote! {
            #[serde(default, skip_serializing_if = "::core::option::Option::is_none")]
            pub kind: ::core::option::Option<::std::string::String>,
        }
    });
    let kind_wrap = identified.then(|| {
        quote! {
            kind: ::core::option::Option::Some(::std::borrow::ToOwned::to_owned(self.kind())),
        }
    });
    let (link_decode, link_unwrap) = if identified {
        (
            Some(quote! {
                let link = ::ams_core::decode_kind(
                    data.kind.as_deref(),
                    <Self as ::ams_core::Object>::KIND,
                    <Self as ::ams_core::Object>::LINK_KIND,
                )?;
            }),
            Some(quote! { link, }),
        )
    } else {
        (None, None)
    };
    let data_doc = format!("Wire representation of [`{name}`].");

    quote! {
        #[doc = #data_doc]
        #[doc(hidden)]
        #[derive(
            ::core::fmt::Debug,
            ::core::clone::Clone,
            ::core::default::Default,
            ::ams_core::__private::serde::Serialize,
            ::ams_core::__private::serde::Deserialize
        )]
        #[serde(crate = "::ams_core::__private::serde")]
        #vis struct #data {
            #kind_field
            #(#data_fields)*
        }

        impl ::ams_core::Object for #name {
            const KIND: &'static str = #kind;
            const LINK_KIND: &'static str = #link_kind;
            const LIST_KIND: &'static str = #list_kind;
            const LIST_LINK_KIND: &'static str = #list_link_kind;
            const LIST_NIL_KIND: &'static str = #list_nil_kind;
            const IDENTIFIED: bool = #identified;

            type Data = #data;
            type Builder = #builder;

            fn wrap(&self) -> #data {
                #data {
                    #kind_wrap
                    #(#wraps)*
                }
            }

            fn unwrap(data: #data) -> ::core::result::Result<Self, ::ams_core::DecodeError> {
                #link_decode
                ::core::result::Result::Ok(Self {
                    #link_unwrap
                    #(#unwraps)*
                })
            }
        }
    }
}
