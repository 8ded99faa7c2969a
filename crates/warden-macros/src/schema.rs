use heck::ToSnakeCase;

#[derive(Debug)]
pub(crate) struct Record {
    /// The struct being derived for
    pub(crate) ident: syn::Ident,

    /// Table name: snake_case form of the struct name
    pub(crate) table: String,

    /// Fields in declaration order; this order is the column order
    pub(crate) fields: Vec<Field>,
}

#[derive(Debug)]
pub(crate) struct Field {
    /// Field identifier
    pub(crate) ident: syn::Ident,

    /// Field type, used for the `FieldType` storage-class lookup
    pub(crate) ty: syn::Type,

    /// Column name: `#[column("…")]` override or the field name
    pub(crate) column: String,

    /// True if the field is annotated with `#[key]`
    pub(crate) key: bool,

    /// True if the field is annotated with `#[json]`
    pub(crate) json: bool,

    /// True if the field is annotated with `#[unique]`
    pub(crate) unique: bool,

    /// Index over the column, if any
    pub(crate) index: Option<IndexOp>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum IndexOp {
    Asc,
    Desc,
}

impl Record {
    pub(crate) fn from_ast(item: &syn::ItemStruct) -> syn::Result<Self> {
        if !item.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &item.generics,
                "Record cannot be derived for a generic type",
            ));
        }

        let syn::Fields::Named(named) = &item.fields else {
            return Err(syn::Error::new_spanned(
                &item.ident,
                "Record requires a struct with named fields",
            ));
        };

        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            fields.push(Field::from_ast(field)?);
        }

        let mut keys = fields.iter().filter(|field| field.key);
        if keys.next().is_none() {
            return Err(syn::Error::new_spanned(
                &item.ident,
                "one field must be marked #[key]",
            ));
        }
        if let Some(second) = keys.next() {
            return Err(syn::Error::new(
                second.ident.span(),
                "only one field may be marked #[key]",
            ));
        }

        Ok(Record {
            ident: item.ident.clone(),
            table: item.ident.to_string().to_snake_case(),
            fields,
        })
    }
}

impl Field {
    fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let ident = field.ident.clone().expect("named field");

        let mut column = None;
        let mut key = false;
        let mut json = false;
        let mut unique = false;
        let mut asc = false;
        let mut desc = false;

        for attr in &field.attrs {
            if attr.path().is_ident("key") {
                flag(attr)?;
                key = true;
            } else if attr.path().is_ident("json") {
                flag(attr)?;
                json = true;
            } else if attr.path().is_ident("unique") {
                flag(attr)?;
                unique = true;
            } else if attr.path().is_ident("index") {
                match &attr.meta {
                    syn::Meta::Path(_) => asc = true,
                    _ => {
                        let op: syn::Ident = attr.parse_args()?;
                        if op == "asc" {
                            asc = true;
                        } else if op == "desc" {
                            desc = true;
                        } else {
                            return Err(syn::Error::new(
                                op.span(),
                                "expected `asc` or `desc`",
                            ));
                        }
                    }
                }
            } else if attr.path().is_ident("column") {
                let name: syn::LitStr = attr.parse_args()?;
                column = Some(name.value());
            }
        }

        if key && json {
            return Err(syn::Error::new(
                ident.span(),
                "the primary key cannot be opaque-encoded",
            ));
        }

        // Ascending and descending markers are mutually exclusive;
        // ascending wins. `#[unique]` alone implies an ascending index.
        let index = if asc {
            Some(IndexOp::Asc)
        } else if desc {
            Some(IndexOp::Desc)
        } else if unique {
            Some(IndexOp::Asc)
        } else {
            None
        };

        Ok(Field {
            column: column.unwrap_or_else(|| ident.to_string()),
            ty: field.ty.clone(),
            ident,
            key,
            json,
            unique,
            index,
        })
    }
}

/// Marker attributes take no arguments.
fn flag(attr: &syn::Attribute) -> syn::Result<()> {
    match &attr.meta {
        syn::Meta::Path(_) => Ok(()),
        _ => Err(syn::Error::new_spanned(attr, "attribute takes no arguments")),
    }
}
