use crate::{
    emit::{EmitError, GeneratedFile, default_value, ident_tokens, path_tokens, type_tokens},
    model::CollectionModel,
};
use convert_case::{Case, Casing};
use optreg_symbols::{
    graph::SymbolGraph,
    node::{MethodSig, Param},
    types::TypeRef,
};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::BTreeSet;

/// Synthesize the null-object source unit for a trait-contract base.
///
/// The null object is a stateless struct implementing the full contract:
/// every property getter answers a type-appropriate default, and every
/// abstract method along the inheritance chain gets a benign body. When
/// the same signature surfaces more than once along the chain, the
/// declaration closest to the base wins.
///
/// Returns `Ok(None)` for collections whose base is a concrete class;
/// those fall back to a constructor-built sentinel instead.
pub(crate) fn emit_null_object(
    graph: &SymbolGraph,
    model: &CollectionModel,
) -> Result<Option<GeneratedFile>, EmitError> {
    if !model.emit_null_object {
        return Ok(None);
    }

    let Some(base) = graph.find_type(&model.base_type) else {
        return Err(EmitError::InvalidPath {
            path: model.base_type.to_string(),
            reason: "base type is no longer present in the symbol graph".to_string(),
        });
    };

    let short = model.base_type.short();
    let null_ident = ident_tokens(&format!("Null{short}"))?;
    let trait_path = path_tokens(&model.base_type)?;

    let mut items = TokenStream::new();
    let mut seen_props = BTreeSet::new();
    let mut seen_sigs = BTreeSet::new();
    for decl in graph.base_chain(base) {
        for property in decl.properties() {
            if !seen_props.insert(property.name.clone()) {
                continue;
            }
            let name = ident_tokens(&property.name.to_case(Case::Snake))?;
            let ty = type_tokens(&property.ty)?;
            let default = default_value(&property.ty);
            items.extend(quote! {
                fn #name(&self) -> #ty {
                    #default
                }
            });
        }
        for sig in decl.abstract_methods() {
            if !seen_sigs.insert(sig.signature_key()) {
                continue;
            }
            items.extend(method_item(sig)?);
        }
    }

    let doc = format!(
        "Null-object implementation of `{}`: a stateless stand-in whose \
         every member answers a type-appropriate default. Returned by the \
         generated registry on lookup misses so callers never branch on \
         absence.",
        model.base_type,
    );

    let tokens = match &base.generics {
        Some(text) => {
            let generics: syn::Generics =
                syn::parse_str(text).map_err(|e| EmitError::InvalidGenerics {
                    text: text.clone(),
                    reason: e.to_string(),
                })?;
            let params: Vec<_> = generics.type_params().map(|p| p.ident.clone()).collect();
            let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
            quote! {
                #[doc = #doc]
                pub struct #null_ident #generics (::core::marker::PhantomData<(#(#params),*)>);

                #[allow(unused_variables)]
                impl #impl_generics #trait_path #ty_generics for #null_ident #ty_generics #where_clause {
                    #items
                }
            }
        }
        None => quote! {
            #[doc = #doc]
            #[derive(Clone, Copy, Debug, Default)]
            pub struct #null_ident;

            #[allow(unused_variables)]
            impl #trait_path for #null_ident {
                #items
            }
        },
    };

    Ok(Some(GeneratedFile {
        name: format!("{}.null.rs", short.to_case(Case::Snake)),
        contents: tokens.to_string(),
    }))
}

fn method_item(sig: &MethodSig) -> Result<TokenStream, EmitError> {
    let name = ident_tokens(&sig.name.to_case(Case::Snake))?;
    let params = sig
        .params
        .iter()
        .map(|p| {
            let pname = ident_tokens(&p.name.to_case(Case::Snake))?;
            let pty = type_tokens(&p.ty)?;
            Ok(quote!(, #pname: #pty))
        })
        .collect::<Result<Vec<_>, EmitError>>()?;
    let ret = match &sig.ret {
        Some(ret) => {
            let ty = type_tokens(ret)?;
            quote!(-> #ty)
        }
        None => TokenStream::new(),
    };
    let body = method_body(sig)?;
    Ok(quote! {
        fn #name(&self #(#params)*) #ret {
            #body
        }
    })
}

// Benign body selection, in priority order: echo a parameter whose type
// is exactly the return type, then wrap a success-type match in `Ok` for
// fallible signatures, then fall back to the type-appropriate default.
// No-return methods are no-ops.
fn method_body(sig: &MethodSig) -> Result<TokenStream, EmitError> {
    let Some(ret) = &sig.ret else {
        return Ok(TokenStream::new());
    };

    if let Some(param) = echo_param(sig, ret) {
        let ident = ident_tokens(&param.name.to_case(Case::Snake))?;
        return Ok(quote!(#ident));
    }

    if ret.is_result_wrapper() {
        return Ok(match ret.args.first() {
            Some(ok_ty) => match echo_param(sig, ok_ty) {
                Some(param) => {
                    let ident = ident_tokens(&param.name.to_case(Case::Snake))?;
                    quote!(::core::result::Result::Ok(#ident))
                }
                None => {
                    let default = default_value(ok_ty);
                    quote!(::core::result::Result::Ok(#default))
                }
            },
            None => quote!(::core::result::Result::Ok(())),
        });
    }

    Ok(default_value(ret))
}

fn echo_param<'s>(sig: &'s MethodSig, wanted: &TypeRef) -> Option<&'s Param> {
    sig.params.iter().find(|p| &p.ty == wanted)
}
