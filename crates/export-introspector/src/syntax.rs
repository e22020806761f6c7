//! Conversion from `syn` syntax trees to the attribute model.
//!
//! Attribute arguments are parsed as comma-separated expressions:
//! `name = expr` becomes a named member and anything else is positional.
//! Positional arguments are stored under `value`, as a list when there is
//! more than one.

use client_export_core::{Attribute, AttributeValue, names};
use proc_macro2::{Delimiter, Group, Spacing, TokenStream, TokenTree};
use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::{Expr, ExprLit, Lit, Meta, Token, UnOp};

/// Attributes never relevant to extraction.
const IGNORED_ATTRIBUTES: &[&str] = &["doc"];

/// Converts a `syn` attribute into the attribute model.
///
/// Only the last segment of the attribute path is kept, so
/// `#[web::get_mapping("/")]` is recognized as `get_mapping`.
/// Returns `None` for doc comments.
///
/// # Examples
///
/// ```
/// use client_export_introspector::syntax::convert_attribute;
///
/// let attr: syn::Attribute = syn::parse_quote!(#[web::get_mapping("/orders", produces = "json")]);
/// let converted = convert_attribute(&attr).unwrap();
/// assert_eq!(converted.name(), "get_mapping");
/// assert_eq!(converted.str_member("value"), Some("/orders"));
/// assert_eq!(converted.str_member("produces"), Some("json"));
/// ```
#[must_use]
pub fn convert_attribute(attr: &syn::Attribute) -> Option<Attribute> {
    let name = attr.path().segments.last()?.ident.to_string();
    if IGNORED_ATTRIBUTES.contains(&name.as_str()) {
        return None;
    }

    let attribute = match &attr.meta {
        Meta::Path(_) => Attribute::new(name),
        Meta::NameValue(nv) => Attribute::new(name).with_value(convert_expr(&nv.value)),
        Meta::List(list) => {
            match list.parse_args_with(Punctuated::<Expr, Token![,]>::parse_terminated) {
                Ok(args) => convert_arguments(Attribute::new(name), args),
                Err(_) => {
                    let raw = normalize_tokens(&list.tokens);
                    if raw.is_empty() {
                        Attribute::new(name)
                    } else {
                        Attribute::new(name).with_value(AttributeValue::Raw(raw))
                    }
                }
            }
        }
    };

    Some(attribute)
}

/// Converts every non-doc attribute in `attrs`.
#[must_use]
pub fn convert_attributes(attrs: &[syn::Attribute]) -> Vec<Attribute> {
    attrs.iter().filter_map(convert_attribute).collect()
}

fn convert_arguments(mut attribute: Attribute, args: Punctuated<Expr, Token![,]>) -> Attribute {
    let mut positional = Vec::new();

    for arg in args {
        match arg {
            Expr::Assign(assign) => match member_name(&assign.left) {
                Some(member) => attribute.set_member(member, convert_expr(&assign.right)),
                None => positional.push(AttributeValue::Raw(normalize_tokens(
                    &assign.to_token_stream(),
                ))),
            },
            other => positional.push(convert_expr(&other)),
        }
    }

    match positional.len() {
        0 => {}
        1 => {
            if let Some(value) = positional.pop() {
                attribute.set_member(names::VALUE_MEMBER, value);
            }
        }
        _ => attribute.set_member(names::VALUE_MEMBER, AttributeValue::List(positional)),
    }

    attribute
}

fn member_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Path(path) if path.qself.is_none() => {
            path.path.get_ident().map(ToString::to_string)
        }
        _ => None,
    }
}

/// Converts an attribute argument expression into an attribute value.
#[must_use]
pub fn convert_expr(expr: &Expr) -> AttributeValue {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => AttributeValue::Str(s.value()),
            Lit::Bool(b) => AttributeValue::Bool(b.value),
            Lit::Int(i) => i
                .base10_parse::<i64>()
                .map_or_else(|_| raw(expr), AttributeValue::Int),
            _ => raw(expr),
        },
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => match convert_expr(&unary.expr)
        {
            AttributeValue::Int(i) => AttributeValue::Int(-i),
            _ => raw(expr),
        },
        Expr::Array(array) => AttributeValue::List(array.elems.iter().map(convert_expr).collect()),
        Expr::Group(group) => convert_expr(&group.expr),
        Expr::Paren(paren) => convert_expr(&paren.expr),
        _ => raw(expr),
    }
}

fn raw(expr: &Expr) -> AttributeValue {
    AttributeValue::Raw(normalize_tokens(&expr.to_token_stream()))
}

/// Renders a type as compact source text.
///
/// # Examples
///
/// ```
/// use client_export_introspector::syntax::type_to_string;
///
/// let ty: syn::Type = syn::parse_quote!(Result<Vec<&'static str>, std::io::Error>);
/// assert_eq!(type_to_string(&ty), "Result<Vec<&'static str>, std::io::Error>");
/// ```
#[must_use]
pub fn type_to_string(ty: &syn::Type) -> String {
    normalize_tokens(&ty.to_token_stream())
}

/// Renders tokens as source text with conventional spacing.
///
/// Tokens are written one at a time, omitting the spaces Rust style leaves
/// out around paths, generics, references, and delimiters. Literals are
/// copied verbatim.
#[must_use]
pub fn normalize_tokens(tokens: &TokenStream) -> String {
    let mut out = String::new();
    let mut prev: Option<TokenTree> = None;
    let mut after_path_sep = false;

    for token in tokens.clone() {
        if let Some(previous) = &prev
            && !after_path_sep
            && needs_space(previous, &token)
        {
            out.push(' ');
        }

        after_path_sep = matches!(
            (&prev, &token),
            (Some(TokenTree::Punct(a)), TokenTree::Punct(b))
                if a.as_char() == ':' && a.spacing() == Spacing::Joint && b.as_char() == ':'
        );

        match &token {
            TokenTree::Group(group) => write_group(group, &mut out),
            other => out.push_str(&other.to_string()),
        }
        prev = Some(token);
    }

    out
}

fn write_group(group: &Group, out: &mut String) {
    let inner = normalize_tokens(&group.stream());
    let (open, close) = match group.delimiter() {
        Delimiter::Parenthesis => ("(", ")"),
        Delimiter::Bracket => ("[", "]"),
        Delimiter::Brace if inner.is_empty() => ("{", "}"),
        Delimiter::Brace => ("{ ", " }"),
        Delimiter::None => ("", ""),
    };
    out.push_str(open);
    out.push_str(&inner);
    out.push_str(close);
}

fn needs_space(prev: &TokenTree, token: &TokenTree) -> bool {
    if let TokenTree::Punct(p) = prev {
        if p.spacing() == Spacing::Joint || matches!(p.as_char(), '<' | '&') {
            return false;
        }
        // `name!(..)`
        if p.as_char() == '!'
            && matches!(token, TokenTree::Group(g) if g.delimiter() == Delimiter::Parenthesis)
        {
            return false;
        }
    }

    match token {
        TokenTree::Punct(p) => match p.as_char() {
            '<' | '>' | ',' | ';' => false,
            ':' => p.spacing() != Spacing::Joint,
            '!' => !(p.spacing() == Spacing::Alone && matches!(prev, TokenTree::Ident(_))),
            _ => true,
        },
        _ => true,
    }
}
