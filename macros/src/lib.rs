use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;

/// Derive `chromawheel::layout::VertexLayout` for a `#[repr(C)]` struct made
/// of `[f32; N]` fields. Each field becomes one attribute, in declaration
/// order, with its offset counted in floats from the start of the vertex.
#[proc_macro_derive(VertexLayout)]
pub fn derive_vertex_layout(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    let fields = match &input.data {
        syn::Data::Struct(syn::DataStruct {
            fields: syn::Fields::Named(named),
            ..
        }) => &named.named,
        _ => {
            return quote! {
                compile_error!("VertexLayout can only be derived for structs with named fields.");
            }
            .into();
        }
    };

    let is_repr_c = input.attrs.iter().any(|attr| {
        attr.path().is_ident("repr")
            && attr
                .parse_args::<syn::Ident>()
                .map(|ident| ident == "C")
                .unwrap_or(false)
    });
    if !is_repr_c {
        return syn::Error::new(input.ident.span(), "VertexLayout requires #[repr(C)]")
            .to_compile_error()
            .into();
    }

    let mut attributes = vec![];
    let mut offset = 0usize;

    for field in fields {
        let components = match array_len(&field.ty) {
            Some(len) => len,
            None => {
                return syn::Error::new(
                    field.ty.span(),
                    "VertexLayout fields must be [f32; N] arrays",
                )
                .to_compile_error()
                .into();
            }
        };

        // Unwrap is fine, we only accept named fields.
        let name = field.ident.as_ref().unwrap().to_string();

        attributes.push(quote! {
            chromawheel::layout::VertexAttribute {
                name: #name,
                components: #components,
                offset: #offset,
            }
        });

        offset += components;
    }

    let struct_name = &input.ident;
    let (impl_gen, type_gen, where_clause) = input.generics.split_for_impl();

    // Generic vertex types can't be sized in a free const item.
    let size_check: proc_macro2::TokenStream = if input.generics.params.is_empty() {
        quote! {
            const _: () = assert!(
                ::std::mem::size_of::<#struct_name>() == #offset * ::std::mem::size_of::<f32>(),
                "vertex struct has padding between its attributes"
            );
        }
    } else {
        quote! {}
    };

    quote! {
        impl #impl_gen chromawheel::layout::VertexLayout for #struct_name #type_gen #where_clause {
            const STRIDE: usize = #offset * ::std::mem::size_of::<f32>();
            const ATTRIBUTES: &'static [chromawheel::layout::VertexAttribute] = &[
                #(#attributes,)*
            ];
        }

        #size_check
    }
    .into()
}

/// Return `N` for a `[f32; N]` type with a literal length.
fn array_len(ty: &syn::Type) -> Option<usize> {
    let syn::Type::Array(array) = ty else {
        return None;
    };

    match array.elem.as_ref() {
        syn::Type::Path(path) if path.path.is_ident("f32") => {}
        _ => return None,
    }

    match &array.len {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Int(len),
            ..
        }) => len.base10_parse::<usize>().ok(),
        _ => None,
    }
}
