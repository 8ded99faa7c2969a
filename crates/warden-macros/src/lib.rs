extern crate proc_macro;

mod expand;
mod schema;

use proc_macro::TokenStream;

/// Derives the `Record` persistence contract for a struct.
///
/// Field attributes: `#[key]` (primary key, exactly one), `#[index]` /
/// `#[index(desc)]`, `#[unique]`, `#[json]`, `#[column("name")]`. If a
/// field carries both ascending and descending index markers, ascending
/// wins.
#[proc_macro_derive(Record, attributes(key, column, index, unique, json))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    match generate(input.into()) {
        Ok(output) => output.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate(input: proc_macro2::TokenStream) -> syn::Result<proc_macro2::TokenStream> {
    let item: syn::ItemStruct = syn::parse2(input)?;
    let record = schema::Record::from_ast(&item)?;

    Ok(expand::record(&record))
}
