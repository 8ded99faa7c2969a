use crate::schema::{Field, IndexOp, Record};

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn record(record: &Record) -> TokenStream {
    let ident = &record.ident;
    let table = &record.table;
    let len = record.fields.len();

    let columns = record.fields.iter().map(column);
    let binds = record.fields.iter().map(bind);
    let loads = record.fields.iter().map(load);

    wrap_in_const(quote! {
        impl _warden::Record for #ident {
            const TABLE: &'static str = #table;

            const COLUMNS: &'static [_warden::Column] = &[#(#columns),*];

            fn to_row(&self) -> _warden::Result<::std::vec::Vec<_warden::Value>> {
                let mut row = ::std::vec::Vec::with_capacity(#len);
                #(#binds)*
                ::core::result::Result::Ok(row)
            }

            fn load(row: &mut _warden::RowCursor) -> _warden::Result<Self> {
                ::core::result::Result::Ok(Self {
                    #(#loads,)*
                })
            }
        }
    })
}

fn column(field: &Field) -> TokenStream {
    let name = &field.column;
    let primary_key = field.key;
    let json = field.json;
    let unique = field.unique;

    // Opaque-encoded columns are always TEXT; scalar columns take their
    // storage class from the field type.
    let ty = if field.json {
        quote!(_warden::ColumnType::Text)
    } else {
        let field_ty = &field.ty;
        quote!(<#field_ty as _warden::FieldType>::TYPE)
    };

    let index = match field.index {
        None => quote!(::core::option::Option::None),
        Some(IndexOp::Asc) => quote!(::core::option::Option::Some(_warden::IndexOp::Asc)),
        Some(IndexOp::Desc) => quote!(::core::option::Option::Some(_warden::IndexOp::Desc)),
    };

    quote! {
        _warden::Column {
            name: #name,
            ty: #ty,
            primary_key: #primary_key,
            json: #json,
            index: #index,
            unique: #unique,
        }
    }
}

fn bind(field: &Field) -> TokenStream {
    let ident = &field.ident;

    if field.json {
        let column = &field.column;
        quote!(row.push(_warden::encode_json(#column, &self.#ident)?);)
    } else {
        quote!(row.push(_warden::FieldType::to_value(&self.#ident));)
    }
}

fn load(field: &Field) -> TokenStream {
    let ident = &field.ident;

    if field.json {
        quote!(#ident: row.read_json()?)
    } else {
        quote!(#ident: row.read()?)
    }
}

fn wrap_in_const(tokens: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use ::warden_store::codegen_support as _warden;

            #tokens
        };
    }
}
