use crate::{
    emit::{EmitError, GeneratedFile, Stage, default_value, ident_tokens, path_tokens, type_tokens},
    model::{CollectionModel, LookupSpec, Sentinel},
    options::{AccessorStyle, AltKeyMode, Exposure, GenOptions},
};
use convert_case::{Case, Casing};
use optreg_symbols::node::TypeKind;
use proc_macro2::{Ident, Literal, TokenStream};
use quote::quote;

// Per-value emission plan, fixed during the convert stage. Values that
// cannot be instantiated are dropped here: they contribute no map entry
// and no accessor.
struct ValuePlan {
    fn_ident: Ident,
    const_ident: Ident,
    path: syn::Path,
    key: PlanKey,
}

// Statically-known keys become integer literals; the rest are read from
// the value's identity property into a dedicated key static.
enum PlanKey {
    Literal(i64),
    Runtime(Ident),
}

impl PlanKey {
    fn expr(&self) -> TokenStream {
        match self {
            Self::Literal(key) => {
                let key = Literal::i64_suffixed(*key);
                quote!(#key)
            }
            Self::Runtime(key_ident) => quote!(*#key_ident),
        }
    }
}

///
/// RegistryEmitter
///
/// Emits one registry source unit from a resolved collection model. The
/// emitter walks the fixed stage pipeline; every stage is pure given the
/// model and appends to its own output slot only, so stage order is the
/// single piece of mutable state.
///

pub struct RegistryEmitter<'a> {
    model: &'a CollectionModel,
    options: &'a GenOptions,
    stage: Stage,
    plans: Vec<ValuePlan>,
    fields: TokenStream,
    init_fns: TokenStream,
    accessors: TokenStream,
    statics: TokenStream,
}

impl<'a> RegistryEmitter<'a> {
    #[must_use]
    pub fn new(model: &'a CollectionModel, options: &'a GenOptions) -> Self {
        Self {
            model,
            options,
            stage: Stage::NotStarted,
            plans: Vec::new(),
            fields: TokenStream::new(),
            init_fns: TokenStream::new(),
            accessors: TokenStream::new(),
            statics: TokenStream::new(),
        }
    }

    pub fn emit(mut self) -> Result<GeneratedFile, EmitError> {
        self.convert_values()?;
        self.emit_static_fields()?;
        self.emit_static_constructor()?;
        self.emit_accessors()?;
        self.finish()
    }

    fn advance(&mut self, to: Stage) -> Result<(), EmitError> {
        if self.stage.successor() == Some(to) {
            self.stage = to;
            Ok(())
        } else {
            Err(EmitError::StageOrder {
                from: self.stage,
                to,
            })
        }
    }

    // -------------------------
    // Naming
    //
    // Every ident here derives from a host-supplied string; all of them
    // parse fallibly so a malformed marker name fails this collection's
    // emission instead of panicking the pass.
    // -------------------------

    fn snake(&self) -> String {
        self.model.collection_name.to_case(Case::Snake)
    }

    fn prefix(&self) -> String {
        self.model.collection_name.to_case(Case::UpperSnake)
    }

    fn struct_ident(&self) -> Result<Ident, EmitError> {
        ident_tokens(&self.model.collection_name.to_case(Case::Pascal))
    }

    fn map_ident(&self) -> Result<Ident, EmitError> {
        ident_tokens(&format!("{}_BY_ID", self.prefix()))
    }

    fn empty_ident(&self) -> Result<Ident, EmitError> {
        ident_tokens(&format!("{}_EMPTY", self.prefix()))
    }

    fn init_ident(&self) -> Result<Ident, EmitError> {
        ident_tokens(&format!("{}_init", self.snake()))
    }

    fn empty_init_ident(&self) -> Result<Ident, EmitError> {
        ident_tokens(&format!("{}_empty", self.snake()))
    }

    fn alt_ident(&self, lookup: &LookupSpec) -> Result<Ident, EmitError> {
        ident_tokens(&format!(
            "{}_{}",
            self.prefix(),
            lookup.method_name.to_case(Case::UpperSnake)
        ))
    }

    fn alt_init_ident(&self, lookup: &LookupSpec) -> Result<Ident, EmitError> {
        ident_tokens(&format!(
            "{}_{}_init",
            self.snake(),
            lookup.method_name.to_case(Case::Snake)
        ))
    }

    fn identity_ident(&self) -> Result<Ident, EmitError> {
        ident_tokens(&self.model.identity_property.to_case(Case::Snake))
    }

    // -------------------------
    // Types
    // -------------------------

    fn return_ty(&self) -> Result<TokenStream, EmitError> {
        let path = path_tokens(&self.model.return_type)?;
        Ok(match self.model.base_kind {
            TypeKind::Trait => quote!(::std::sync::Arc<dyn #path>),
            TypeKind::Class => quote!(::std::sync::Arc<#path>),
        })
    }

    /// Accessor return type on a possible miss: the sentinel type itself,
    /// or `Option` of it in absent-sentinel mode.
    fn miss_ty(&self) -> Result<TokenStream, EmitError> {
        let ret = self.return_ty()?;
        Ok(if self.model.sentinel == Sentinel::Absent {
            quote!(::core::option::Option<#ret>)
        } else {
            ret
        })
    }

    fn alt_key_ty(lookup: &LookupSpec) -> Result<TokenStream, EmitError> {
        if lookup.property_ty.is_text() {
            Ok(quote!(::std::string::String))
        } else {
            let ty = type_tokens(&lookup.property_ty)?;
            Ok(quote!(#ty))
        }
    }

    fn lookup_element_ty(&self, lookup: &LookupSpec) -> Result<TokenStream, EmitError> {
        match &lookup.return_type {
            Some(path) => {
                let path = path_tokens(path)?;
                Ok(quote!(::std::sync::Arc<dyn #path>))
            }
            None => self.return_ty(),
        }
    }

    // -------------------------
    // Stages
    // -------------------------

    fn convert_values(&mut self) -> Result<(), EmitError> {
        self.advance(Stage::ValuesConverted)?;

        let prefix = self.prefix();
        let mut plans = Vec::new();
        for value in &self.model.values {
            if !value.constructible {
                continue;
            }
            let path = path_tokens(&value.full_name)?;
            let upper = value.display_key.to_case(Case::UpperSnake);
            plans.push(ValuePlan {
                fn_ident: ident_tokens(&value.display_key.to_case(Case::Snake))?,
                const_ident: ident_tokens(&format!("{prefix}_{upper}"))?,
                path,
                key: match value.primary_key {
                    Some(key) => PlanKey::Literal(key),
                    None => PlanKey::Runtime(ident_tokens(&format!("{prefix}_KEY_{upper}"))?),
                },
            });
        }
        self.plans = plans;

        Ok(())
    }

    fn emit_static_fields(&mut self) -> Result<(), EmitError> {
        self.advance(Stage::StaticFieldsEmitted)?;

        let ret = self.return_ty()?;
        let map_ident = self.map_ident()?;
        let init_ident = self.init_ident()?;
        let mut fields = quote! {
            static #map_ident: ::std::sync::LazyLock<
                ::std::collections::HashMap<i64, #ret>
            > = ::std::sync::LazyLock::new(#init_ident);
        };

        if self.model.sentinel != Sentinel::Absent {
            let empty_ident = self.empty_ident()?;
            let empty_init_ident = self.empty_init_ident()?;
            fields.extend(quote! {
                static #empty_ident: ::std::sync::LazyLock<#ret> =
                    ::std::sync::LazyLock::new(#empty_init_ident);
            });
        }

        // Values with no statically-known key read their identity once at
        // static-initialization time.
        let identity = self.identity_ident()?;
        for plan in &self.plans {
            if let PlanKey::Runtime(key_ident) = &plan.key {
                let path = &plan.path;
                fields.extend(quote! {
                    static #key_ident: ::std::sync::LazyLock<i64> =
                        ::std::sync::LazyLock::new(|| #path::new().#identity());
                });
            }
        }

        for lookup in &self.model.lookups {
            let alt_ident = self.alt_ident(lookup)?;
            let alt_init_ident = self.alt_init_ident(lookup)?;
            let key_ty = Self::alt_key_ty(lookup)?;
            let value_ty = self.alt_value_ty(lookup)?;
            fields.extend(quote! {
                static #alt_ident: ::std::sync::LazyLock<
                    ::std::collections::HashMap<#key_ty, #value_ty>
                > = ::std::sync::LazyLock::new(#alt_init_ident);
            });
        }

        self.fields = fields;

        Ok(())
    }

    fn alt_value_ty(&self, lookup: &LookupSpec) -> Result<TokenStream, EmitError> {
        // Overridden return types always get their own materialized map;
        // the shared instances in the primary map cannot change trait.
        let indexed =
            self.options.alt_key_mode == AltKeyMode::IndexedView && lookup.return_type.is_none();
        let element = if indexed {
            quote!(i64)
        } else {
            self.lookup_element_ty(lookup)?
        };
        Ok(if lookup.allow_multiple {
            quote!(::std::vec::Vec<#element>)
        } else {
            element
        })
    }

    fn emit_static_constructor(&mut self) -> Result<(), EmitError> {
        self.advance(Stage::StaticConstructorEmitted)?;

        let ret = self.return_ty()?;
        let init_ident = self.init_ident()?;
        let identity = self.identity_ident()?;

        let mut inserts = TokenStream::new();
        for plan in &self.plans {
            let path = &plan.path;
            match &plan.key {
                PlanKey::Literal(key) => {
                    let key = Literal::i64_suffixed(*key);
                    inserts.extend(quote! {
                        {
                            let value: #ret = ::std::sync::Arc::new(#path::new());
                            map.insert(#key, value);
                        }
                    });
                }
                PlanKey::Runtime(_) => {
                    inserts.extend(quote! {
                        {
                            let value = #path::new();
                            let key = value.#identity();
                            let value: #ret = ::std::sync::Arc::new(value);
                            map.insert(key, value);
                        }
                    });
                }
            }
        }

        let mut init_fns = quote! {
            fn #init_ident() -> ::std::collections::HashMap<i64, #ret> {
                let mut map = ::std::collections::HashMap::new();
                #inserts
                map
            }
        };

        init_fns.extend(self.empty_init_fn(&ret)?);
        for lookup in &self.model.lookups {
            init_fns.extend(self.alt_init_fn(lookup)?);
        }

        self.init_fns = init_fns;

        Ok(())
    }

    fn empty_init_fn(&self, ret: &TokenStream) -> Result<TokenStream, EmitError> {
        let empty_init_ident = self.empty_init_ident()?;
        let body = match &self.model.sentinel {
            Sentinel::Absent => return Ok(TokenStream::new()),
            Sentinel::NullTrait => {
                let null_ident = ident_tokens(&format!("Null{}", self.model.base_type.short()))?;
                quote!(::std::sync::Arc::new(#null_ident))
            }
            Sentinel::NullCtor(params) => {
                let base = path_tokens(&self.model.base_type)?;
                let defaults = params.iter().map(default_value);
                quote!(::std::sync::Arc::new(#base::new(#(#defaults),*)))
            }
        };
        Ok(quote! {
            fn #empty_init_ident() -> #ret {
                #body
            }
        })
    }

    fn alt_init_fn(&self, lookup: &LookupSpec) -> Result<TokenStream, EmitError> {
        let alt_init_ident = self.alt_init_ident(lookup)?;
        let key_ty = Self::alt_key_ty(lookup)?;
        let value_ty = self.alt_value_ty(lookup)?;
        let map_ident = self.map_ident()?;
        let prop = ident_tokens(&lookup.property_name.to_case(Case::Snake))?;

        let body = if lookup.return_type.is_some() {
            // Dedicated map from fresh instances, coerced to the declared
            // lookup trait.
            let element = self.lookup_element_ty(lookup)?;
            let mut inserts = TokenStream::new();
            for plan in &self.plans {
                let path = &plan.path;
                let insert = if lookup.allow_multiple {
                    quote!(map.entry(key).or_insert_with(::std::vec::Vec::new).push(value);)
                } else {
                    quote!(map.insert(key, value);)
                };
                inserts.extend(quote! {
                    {
                        let value = #path::new();
                        let key = value.#prop();
                        let value: #element = ::std::sync::Arc::new(value);
                        #insert
                    }
                });
            }
            inserts
        } else {
            let indexed = self.options.alt_key_mode == AltKeyMode::IndexedView;
            match (indexed, lookup.allow_multiple) {
                (false, false) => quote! {
                    for value in #map_ident.values() {
                        map.insert(value.#prop(), value.clone());
                    }
                },
                (false, true) => quote! {
                    for value in #map_ident.values() {
                        map.entry(value.#prop())
                            .or_insert_with(::std::vec::Vec::new)
                            .push(value.clone());
                    }
                },
                (true, false) => quote! {
                    for (key, value) in #map_ident.iter() {
                        map.insert(value.#prop(), *key);
                    }
                },
                (true, true) => quote! {
                    for (key, value) in #map_ident.iter() {
                        map.entry(value.#prop())
                            .or_insert_with(::std::vec::Vec::new)
                            .push(*key);
                    }
                },
            }
        };

        Ok(quote! {
            fn #alt_init_ident() -> ::std::collections::HashMap<#key_ty, #value_ty> {
                let mut map = ::std::collections::HashMap::new();
                #body
                map
            }
        })
    }

    fn emit_accessors(&mut self) -> Result<(), EmitError> {
        self.advance(Stage::AccessorsEmitted)?;

        let ret = self.return_ty()?;
        let miss = self.miss_ty()?;
        let map_ident = self.map_ident()?;
        let absent = self.model.sentinel == Sentinel::Absent;

        // Primary-key lookup, always present.
        let mut accessors = if absent {
            quote! {
                #[must_use]
                pub fn get(id: i64) -> #miss {
                    #map_ident.get(&id).cloned()
                }
            }
        } else {
            let empty_ident = self.empty_ident()?;
            quote! {
                #[must_use]
                pub fn get(id: i64) -> #miss {
                    #map_ident
                        .get(&id)
                        .cloned()
                        .unwrap_or_else(|| #empty_ident.clone())
                }
            }
        };

        let struct_ident = self.struct_ident()?;
        let mut statics = TokenStream::new();
        for plan in &self.plans {
            let key_expr = plan.key.expr();

            match self.options.accessor_style {
                AccessorStyle::Method => {
                    let fn_ident = &plan.fn_ident;
                    let path = &plan.path;
                    accessors.extend(match self.options.exposure {
                        Exposure::Singleton => quote! {
                            #[must_use]
                            pub fn #fn_ident() -> #miss {
                                Self::get(#key_expr)
                            }
                        },
                        Exposure::Factory => quote! {
                            #[must_use]
                            pub fn #fn_ident() -> #ret {
                                let value: #ret = ::std::sync::Arc::new(#path::new());
                                value
                            }
                        },
                    });
                }
                AccessorStyle::Property => {
                    let const_ident = &plan.const_ident;
                    statics.extend(quote! {
                        pub static #const_ident: ::std::sync::LazyLock<#miss> =
                            ::std::sync::LazyLock::new(|| #struct_ident::get(#key_expr));
                    });
                }
            }
        }

        for lookup in &self.model.lookups {
            accessors.extend(self.lookup_accessor(lookup)?);
        }

        self.accessors = accessors;
        self.statics = statics;

        Ok(())
    }

    fn lookup_accessor(&self, lookup: &LookupSpec) -> Result<TokenStream, EmitError> {
        let method = ident_tokens(&lookup.method_name.to_case(Case::Snake))?;
        let alt_ident = self.alt_ident(lookup)?;
        let element = self.lookup_element_ty(lookup)?;
        let absent = self.model.sentinel == Sentinel::Absent;
        let overridden = lookup.return_type.is_some();
        let indexed = self.options.alt_key_mode == AltKeyMode::IndexedView && !overridden;

        let (param, key_expr) = if lookup.property_ty.is_text() {
            (quote!(key: &str), quote!(key))
        } else {
            let key_ty = type_tokens(&lookup.property_ty)?;
            (quote!(key: &#key_ty), quote!(key))
        };

        let body;
        let ret_ty;
        if lookup.allow_multiple {
            ret_ty = quote!(::std::vec::Vec<#element>);
            body = if indexed {
                if absent {
                    quote! {
                        #alt_ident
                            .get(#key_expr)
                            .map(|ids| ids.iter().filter_map(|id| Self::get(*id)).collect())
                            .unwrap_or_default()
                    }
                } else {
                    quote! {
                        #alt_ident
                            .get(#key_expr)
                            .map(|ids| ids.iter().map(|id| Self::get(*id)).collect())
                            .unwrap_or_default()
                    }
                }
            } else {
                quote!(#alt_ident.get(#key_expr).cloned().unwrap_or_default())
            };
        } else if absent || overridden {
            // Overridden lookups have no sentinel of their own type; they
            // expose the absent form regardless of the collection sentinel.
            ret_ty = quote!(::core::option::Option<#element>);
            body = if indexed {
                quote!(#alt_ident.get(#key_expr).and_then(|id| Self::get(*id)))
            } else {
                quote!(#alt_ident.get(#key_expr).cloned())
            };
        } else {
            let empty_ident = self.empty_ident()?;
            ret_ty = quote!(#element);
            body = if indexed {
                quote! {
                    #alt_ident
                        .get(#key_expr)
                        .map(|id| Self::get(*id))
                        .unwrap_or_else(|| #empty_ident.clone())
                }
            } else {
                quote! {
                    #alt_ident
                        .get(#key_expr)
                        .cloned()
                        .unwrap_or_else(|| #empty_ident.clone())
                }
            };
        }

        Ok(quote! {
            #[must_use]
            pub fn #method(#param) -> #ret_ty {
                #body
            }
        })
    }

    fn finish(mut self) -> Result<GeneratedFile, EmitError> {
        self.advance(Stage::Done)?;

        let struct_ident = self.struct_ident()?;
        let mut doc = format!(
            "Generated registry `{}` over base `{}`. The primary map is built once and never mutated afterwards; lookups are lock-free.",
            self.model.collection_name, self.model.base_type,
        );
        if self.model.sentinel == Sentinel::Absent {
            doc.push_str(
                " No sentinel instance exists for this base type: lookup misses return `None` and callers must handle the absent case.",
            );
        }

        let fields = self.fields;
        let init_fns = self.init_fns;
        let accessors = self.accessors;
        let statics = self.statics;
        let tokens = quote! {
            #[doc = #doc]
            pub struct #struct_ident;

            #fields

            #init_fns

            impl #struct_ident {
                #accessors
            }

            #statics
        };

        Ok(GeneratedFile {
            name: format!("{}.registry.rs", self.model.collection_name.to_case(Case::Snake)),
            contents: tokens.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValueModel;
    use optreg_symbols::types::{TypePath, TypeRef};

    fn value(short: &str, key: Option<i64>) -> ValueModel {
        ValueModel {
            short_name: short.to_string(),
            full_name: TypePath::from(format!("demo::{short}").as_str()),
            display_key: short.to_string(),
            primary_key: key,
            constructible: true,
        }
    }

    fn shapes_model() -> CollectionModel {
        CollectionModel {
            namespace: Some("demo".into()),
            collection_name: "Shapes".into(),
            base_type: TypePath::from("demo::Shape"),
            base_kind: TypeKind::Trait,
            return_type: TypePath::from("demo::Shape"),
            identity_property: "id".into(),
            values: vec![value("Circle", Some(1)), value("Square", Some(2))],
            lookups: vec![LookupSpec {
                property_name: "name".into(),
                property_ty: TypeRef::named("String"),
                method_name: "ByName".into(),
                allow_multiple: false,
                return_type: None,
            }],
            sentinel: Sentinel::NullTrait,
            emit_null_object: true,
        }
    }

    fn norm(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn emitted_registry_parses_as_rust() {
        let options = GenOptions::default();
        let file = RegistryEmitter::new(&shapes_model(), &options)
            .emit()
            .expect("emits");
        syn::parse_file(&file.contents).expect("generated unit must be well-formed");
        assert_eq!(file.name, "shapes.registry.rs");
    }

    #[test]
    fn literal_keys_become_map_inserts_and_accessors() {
        let options = GenOptions::default();
        let file = RegistryEmitter::new(&shapes_model(), &options)
            .emit()
            .expect("emits");
        let text = norm(&file.contents);
        assert!(text.contains("map.insert(1i64"));
        assert!(text.contains("map.insert(2i64"));
        assert!(text.contains("pubfncircle()"));
        assert!(text.contains("pubfnget(id:i64)"));
        assert!(text.contains("pubfnby_name(key:&str)"));
        assert!(text.contains("SHAPES_EMPTY"));
    }

    #[test]
    fn runtime_key_falls_back_to_identity_read() {
        let mut model = shapes_model();
        model.values = vec![value("Blob", None)];
        let options = GenOptions::default();
        let file = RegistryEmitter::new(&model, &options).emit().expect("emits");
        let text = norm(&file.contents);
        assert!(text.contains("letkey=value.id()"));
        assert!(text.contains("SHAPES_KEY_BLOB"));
    }

    #[test]
    fn non_constructible_values_are_skipped_entirely() {
        let mut model = shapes_model();
        model.values[1].constructible = false;
        let options = GenOptions::default();
        let file = RegistryEmitter::new(&model, &options).emit().expect("emits");
        let text = norm(&file.contents);
        assert!(text.contains("Circle"));
        assert!(!text.contains("Square"), "abstract value must not surface");
    }

    #[test]
    fn absent_sentinel_exposes_option_accessors() {
        let mut model = shapes_model();
        model.sentinel = Sentinel::Absent;
        let options = GenOptions::default();
        let file = RegistryEmitter::new(&model, &options).emit().expect("emits");
        let text = norm(&file.contents);
        assert!(text.contains("Option<::std::sync::Arc<dyndemo::Shape>>"));
        assert!(!text.contains("SHAPES_EMPTY"));
    }

    #[test]
    fn class_base_sentinel_calls_minimal_ctor_with_defaults() {
        let mut model = shapes_model();
        model.base_kind = TypeKind::Class;
        model.sentinel = Sentinel::NullCtor(vec![
            TypeRef::named("i64"),
            TypeRef::named("String"),
            TypeRef::named("bool"),
        ]);
        model.emit_null_object = false;
        let options = GenOptions::default();
        let file = RegistryEmitter::new(&model, &options).emit().expect("emits");
        let text = norm(&file.contents);
        assert!(text.contains("demo::Shape::new(0,::std::string::String::new(),false)"));
    }

    #[test]
    fn property_style_emits_lazy_statics() {
        let model = shapes_model();
        let options = GenOptions {
            accessor_style: AccessorStyle::Property,
            ..GenOptions::default()
        };
        let file = RegistryEmitter::new(&model, &options).emit().expect("emits");
        let text = norm(&file.contents);
        assert!(text.contains("pubstaticSHAPES_CIRCLE"));
        assert!(!text.contains("pubfncircle()"));
    }

    #[test]
    fn factory_exposure_constructs_fresh_instances() {
        let model = shapes_model();
        let options = GenOptions {
            exposure: Exposure::Factory,
            ..GenOptions::default()
        };
        let file = RegistryEmitter::new(&model, &options).emit().expect("emits");
        let text = norm(&file.contents);
        assert!(text.contains("pubfncircle()->::std::sync::Arc<dyndemo::Shape>{letvalue"));
    }

    #[test]
    fn indexed_view_mode_resolves_through_the_primary_map() {
        let model = shapes_model();
        let options = GenOptions {
            alt_key_mode: AltKeyMode::IndexedView,
            ..GenOptions::default()
        };
        let file = RegistryEmitter::new(&model, &options).emit().expect("emits");
        let text = norm(&file.contents);
        assert!(text.contains("HashMap<::std::string::String,i64>"));
        assert!(text.contains("Self::get(*id)"));
    }

    #[test]
    fn stage_order_is_enforced() {
        let model = shapes_model();
        let options = GenOptions::default();
        let mut emitter = RegistryEmitter::new(&model, &options);
        let err = emitter
            .emit_accessors()
            .expect_err("skipping stages must fail");
        assert!(matches!(err, EmitError::StageOrder { .. }));
    }

    #[test]
    fn malformed_collection_name_is_an_emit_error_not_a_panic() {
        let mut model = shapes_model();
        model.collection_name = "123 bad name".into();
        let options = GenOptions::default();
        let err = RegistryEmitter::new(&model, &options)
            .emit()
            .expect_err("must fail");
        assert!(matches!(err, EmitError::InvalidName { .. }));
    }

    #[test]
    fn malformed_lookup_method_name_is_an_emit_error_not_a_panic() {
        let mut model = shapes_model();
        model.lookups[0].method_name = "1ByName".into();
        let options = GenOptions::default();
        let err = RegistryEmitter::new(&model, &options)
            .emit()
            .expect_err("must fail");
        assert!(matches!(err, EmitError::InvalidName { .. }));
    }

    #[test]
    fn multi_result_lookup_returns_vectors() {
        let mut model = shapes_model();
        model.lookups[0].allow_multiple = true;
        let options = GenOptions::default();
        let file = RegistryEmitter::new(&model, &options).emit().expect("emits");
        let text = norm(&file.contents);
        assert!(text.contains("->::std::vec::Vec<"));
        assert!(text.contains("unwrap_or_default()"));
    }
}
