//! Derive record codecs with per-field length tags.
//!
//! `#[derive(Read, Write)]` on a struct encodes its fields in declaration order. Each field may
//! carry one `#[codec(...)]` attribute:
//!
//! - `#[codec(tag = "...")]`: a length tag (`"N"`, `"len:N"` or `"-"`). A malformed tag is
//!   reported at the attribute and fails to compile.
//! - `#[codec(skip)]`: the field is not part of the encoding at all and decodes to
//!   `Default::default()`. Its type does not need to be encodable.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Data, DeriveInput, Error, Fields, Generics, Ident, Index,
    Lit, Member, Meta, NestedMeta, Type,
};

/// How a field takes part in the encoding.
enum Mode {
    /// Encoded under the given tag (possibly empty, possibly `-`).
    Tagged(String),
    /// Not encoded at all.
    Skipped,
}

struct Field {
    member: Member,
    name: String,
    ty: Type,
    mode: Mode,
}

impl Field {
    fn is_excluded(&self) -> bool {
        matches!(&self.mode, Mode::Tagged(tag) if tag == "-")
    }
}

/// The shape of the struct's constructor.
enum Shape {
    Named,
    Unnamed,
    Unit,
}

struct Record {
    shape: Shape,
    fields: Vec<Field>,
}

impl Record {
    fn parse(input: &DeriveInput, derive: &str) -> Result<Self, Error> {
        if let Some(attr) = input.attrs.iter().find(|attr| attr.path.is_ident("codec")) {
            return Err(Error::new_spanned(
                attr,
                "`#[codec(...)]` is only supported on fields",
            ));
        }

        let data = match &input.data {
            Data::Struct(data) => data,
            Data::Enum(data) => {
                return Err(Error::new_spanned(
                    data.enum_token,
                    format!("`#[derive({derive})]` only supports structs"),
                ))
            }
            Data::Union(data) => {
                return Err(Error::new_spanned(
                    data.union_token,
                    format!("`#[derive({derive})]` only supports structs"),
                ))
            }
        };

        let shape = match &data.fields {
            Fields::Named(_) => Shape::Named,
            Fields::Unnamed(_) => Shape::Unnamed,
            Fields::Unit => Shape::Unit,
        };

        let mut fields = Vec::new();
        for (index, field) in data.fields.iter().enumerate() {
            let (member, name) = match &field.ident {
                Some(ident) => (
                    Member::Named(ident.clone()),
                    ident.to_string().trim_start_matches("r#").to_string(),
                ),
                None => (Member::Unnamed(Index::from(index)), index.to_string()),
            };
            fields.push(Field {
                member,
                name,
                ty: field.ty.clone(),
                mode: parse_mode(field)?,
            });
        }

        Ok(Self { shape, fields })
    }

    /// Fields that appear in the descriptor table, with their position in it.
    fn encoded(&self) -> impl Iterator<Item = (usize, &Field)> {
        self.fields
            .iter()
            .filter(|field| matches!(field.mode, Mode::Tagged(_)))
            .enumerate()
    }

    /// Declares the constant descriptor table of all encoded fields, if there are any.
    fn descriptors(&self) -> TokenStream2 {
        let entries: Vec<_> = self
            .encoded()
            .map(|(_, field)| {
                let name = &field.name;
                let tag = match &field.mode {
                    Mode::Tagged(tag) => tag.as_str(),
                    Mode::Skipped => "",
                };
                quote! { ::binwire_codec::FieldDescriptor::new(#name, #tag) }
            })
            .collect();
        if entries.is_empty() {
            return TokenStream2::new();
        }
        let len = entries.len();
        quote! {
            const FIELDS: [::binwire_codec::FieldDescriptor; #len] = [#(#entries),*];
        }
    }
}

fn parse_mode(field: &syn::Field) -> Result<Mode, Error> {
    let mut mode = None;
    for attr in field.attrs.iter().filter(|attr| attr.path.is_ident("codec")) {
        let list = match attr.parse_meta()? {
            Meta::List(list) => list,
            other => {
                return Err(Error::new_spanned(
                    other,
                    "expected `#[codec(tag = \"...\")]` or `#[codec(skip)]`",
                ))
            }
        };
        for nested in list.nested {
            let parsed = match &nested {
                NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("tag") => match &nv.lit
                {
                    Lit::Str(tag) => {
                        let value = tag.value();
                        if !is_valid_tag(&value) {
                            return Err(Error::new_spanned(
                                tag,
                                format!(
                                    "malformed length tag `{value}`: expected `-`, `N` or `len:N`"
                                ),
                            ));
                        }
                        Mode::Tagged(value)
                    }
                    lit => return Err(Error::new_spanned(lit, "tag must be a string literal")),
                },
                NestedMeta::Meta(Meta::Path(path)) if path.is_ident("skip") => Mode::Skipped,
                _ => {
                    return Err(Error::new_spanned(
                        &nested,
                        "unknown codec attribute, expected `tag = \"...\"` or `skip`",
                    ))
                }
            };
            if mode.is_some() {
                return Err(Error::new_spanned(
                    &nested,
                    "a field takes at most one codec attribute",
                ));
            }
            mode = Some(parsed);
        }
    }
    Ok(mode.unwrap_or_else(|| Mode::Tagged(String::new())))
}

/// Checks a tag against the grammar of `binwire_codec::Tag::parse`. An empty tag is accepted.
fn is_valid_tag(tag: &str) -> bool {
    if tag.is_empty() || tag == "-" {
        return true;
    }
    let digits = tag.strip_prefix("len:").unwrap_or(tag);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && digits.parse::<u32>().is_ok()
}

/// Bounds each field type of a generic struct by its codec trait.
fn add_bounds<'a>(
    generics: &Generics,
    bounds: impl Iterator<Item = (&'a Type, TokenStream2)>,
) -> Generics {
    let mut generics = generics.clone();
    if generics.type_params().next().is_none() {
        return generics;
    }
    let where_clause = generics.make_where_clause();
    for (ty, bound) in bounds {
        where_clause.predicates.push(parse_quote! { #ty: #bound });
    }
    generics
}

/// Names the buffer parameter, or `_` if the body never touches it.
fn buf_param(used: bool) -> TokenStream2 {
    if used {
        let ident = Ident::new("buf", Span::call_site());
        quote! { #ident }
    } else {
        quote! { _ }
    }
}

/// Derives `binwire_codec::Write` for a struct.
#[proc_macro_derive(Write, attributes(codec))]
pub fn derive_write(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_write(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand_write(input: &DeriveInput) -> Result<TokenStream2, Error> {
    let record = Record::parse(input, "Write")?;
    let name = &input.ident;
    let generics = add_bounds(
        &input.generics,
        record
            .encoded()
            .map(|(_, field)| (&field.ty, quote! { ::binwire_codec::Write })),
    );
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let descriptors = record.descriptors();
    let writes = record.encoded().map(|(index, field)| {
        let member = &field.member;
        quote! {
            ::binwire_codec::record::write_field(&self.#member, buf, &FIELDS[#index])?;
        }
    });
    let buf = buf_param(record.encoded().next().is_some());

    Ok(quote! {
        impl #impl_generics ::binwire_codec::Write for #name #ty_generics #where_clause {
            fn write_framed(
                &self,
                #buf: &mut impl ::binwire_codec::bytes::BufMut,
                _: ::binwire_codec::Framing,
            ) -> ::core::result::Result<(), ::binwire_codec::Error> {
                #descriptors
                #(#writes)*
                ::core::result::Result::Ok(())
            }
        }
    })
}

/// Derives `binwire_codec::Read` for a struct.
#[proc_macro_derive(Read, attributes(codec))]
pub fn derive_read(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_read(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand_read(input: &DeriveInput) -> Result<TokenStream2, Error> {
    let record = Record::parse(input, "Read")?;
    let name = &input.ident;
    let generics = add_bounds(
        &input.generics,
        record.fields.iter().map(|field| {
            let bound = match &field.mode {
                Mode::Skipped => quote! { ::core::default::Default },
                Mode::Tagged(_) if field.is_excluded() => {
                    quote! { ::binwire_codec::Read + ::core::default::Default }
                }
                Mode::Tagged(_) => quote! { ::binwire_codec::Read },
            };
            (&field.ty, bound)
        }),
    );
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let descriptors = record.descriptors();
    let mut position = 0usize;
    let values: Vec<_> = record
        .fields
        .iter()
        .map(|field| match &field.mode {
            Mode::Skipped => quote! { ::core::default::Default::default() },
            Mode::Tagged(_) => {
                let index = position;
                position += 1;
                if field.is_excluded() {
                    quote! { ::binwire_codec::record::read_excluded(buf, &FIELDS[#index])? }
                } else {
                    quote! { ::binwire_codec::record::read_field(buf, &FIELDS[#index])? }
                }
            }
        })
        .collect();
    let construct = match record.shape {
        Shape::Named => {
            let members = record.fields.iter().map(|field| &field.member);
            quote! { Self { #(#members: #values),* } }
        }
        Shape::Unnamed => quote! { Self(#(#values),*) },
        Shape::Unit => quote! { Self },
    };
    let buf = buf_param(position > 0);

    Ok(quote! {
        impl #impl_generics ::binwire_codec::Read for #name #ty_generics #where_clause {
            fn read_framed(
                #buf: &mut impl ::binwire_codec::bytes::Buf,
                _: ::binwire_codec::Framing,
            ) -> ::core::result::Result<Self, ::binwire_codec::Error> {
                #descriptors
                ::core::result::Result::Ok(#construct)
            }
        }
    })
}
