use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute,
    Expr,
    Fields,
    Ident,
    ItemStruct,
    Result,
    Token,
};

/// A single `name = expr` tag inside the `error` attribute.
struct Tag {
    name: Ident,
    value: Expr,
}

impl Parse for Tag {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse()?;
        input.parse::<Token![=]>()?;
        Ok(Self { name, value: input.parse()? })
    }
}

/// The tags of the `error` attribute. Only `message` is required.
#[derive(Default)]
pub struct ErrorArgs {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
    note: Option<Expr>,
}

impl ErrorArgs {
    /// Stores the tag in its slot. Unknown and repeated tags are rejected.
    fn apply(&mut self, tag: Tag) -> Result<()> {
        let name = tag.name.to_string();
        let slot = match name.as_str() {
            "message" => &mut self.message,
            "labels" => &mut self.labels,
            "help" => &mut self.help,
            "note" => &mut self.note,
            _ => return Err(syn::Error::new_spanned(tag.name, format!("unknown tag `{}`", name))),
        };

        if slot.is_some() {
            return Err(syn::Error::new_spanned(tag.name, format!("tag `{}` given more than once", name)));
        }
        *slot = Some(tag.value);
        Ok(())
    }
}

impl Parse for ErrorArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = Self::default();
        for tag in Punctuated::<Tag, Token![,]>::parse_terminated(input)? {
            args.apply(tag)?;
        }
        Ok(args)
    }
}

/// The struct to derive [`ErrorKind`] for.
pub struct ErrorKindTarget {
    pub name: Ident,
    fields: Fields,
    args: ErrorArgs,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        let attributes = input.call(Attribute::parse_outer)?;
        let item = input.parse::<ItemStruct>()?;

        let args = match attributes.iter().find(|attr| attr.path().is_ident("error")) {
            Some(attr) => attr.parse_args::<ErrorArgs>()?,
            None => return Err(syn::Error::new_spanned(&item.ident, "missing `error` attribute")),
        };
        if args.message.is_none() {
            return Err(syn::Error::new_spanned(&item.ident, "missing `message` tag in `error` attribute"));
        }

        Ok(Self {
            name: item.ident,
            fields: item.fields,
            args,
        })
    }
}

impl ErrorKindTarget {
    /// A `let` statement bringing the named fields of `self` into scope, so that the tag
    /// expressions can refer to them.
    fn bindings(&self) -> TokenStream2 {
        let name = &self.name;
        match &self.fields {
            Fields::Named(fields) => {
                let fields = fields.named.iter().map(|field| &field.ident);
                quote! { let #name { #(#fields),* } = self; }
            },
            Fields::Unnamed(_) => quote_spanned! {
                name.span() => compile_error!("`ErrorKind` cannot be derived for tuple structs");
            },
            Fields::Unit => quote! {},
        }
    }

    /// Builds the labels, pairing each label text with a span. Spanless errors, or errors
    /// without a `labels` tag, get no labels.
    fn labels(&self) -> TokenStream2 {
        let Some(labels) = &self.args.labels else {
            return quote! { Vec::new() };
        };

        quote! {
            #labels
                .into_iter()
                .zip(spans.iter())
                .map(|(text, span)| {
                    let label = ariadne::Label::new((src_id, span.clone())).with_color(dfx_error::EXPR);
                    match text.to_string() {
                        text if text.is_empty() => label,
                        text => label.with_message(text),
                    }
                })
                .collect::<Vec<_>>()
        }
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let bindings = self.bindings();
        let message = &self.args.message;
        let labels = self.labels();
        let help = self.args.help.as_ref().map(|help| quote! { builder.set_help(#help); });
        let note = self.args.note.as_ref().map(|note| quote! { builder.set_note(#note); });

        tokens.extend(quote! {
            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #[allow(unused_variables)]
                #bindings

                let offset = spans.first().map_or(0, |span| span.start);
                let mut builder = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                    .with_message(#message)
                    .with_labels(#labels);

                #help
                #note
                builder.finish()
            }
        });
    }
}
