//! Descriptor derivation: the `#[derive(Record)]` output for a struct's
//! field metadata.

use warden_store::schema::{Column, ColumnType, IndexOp};
use warden_store::{Record, Value};

#[derive(Debug, Record)]
struct PlayerScore {
    #[key]
    id: i64,
    #[column("handle")]
    #[index]
    name: String,
    #[index(desc)]
    score: i64,
    #[unique]
    token: String,
    active: bool,
    ratio: f64,
    #[json]
    tags: Vec<String>,
}

fn columns() -> &'static [Column] {
    PlayerScore::COLUMNS
}

#[test]
fn table_name_is_snake_cased() {
    assert_eq!(PlayerScore::TABLE, "player_score");
}

#[test]
fn columns_follow_field_order() {
    let names: Vec<&str> = columns().iter().map(|c| c.name).collect();
    assert_eq!(
        names,
        ["id", "handle", "score", "token", "active", "ratio", "tags"]
    );
}

#[test]
fn storage_classes_derive_from_field_types() {
    let types: Vec<ColumnType> = columns().iter().map(|c| c.ty).collect();
    assert_eq!(
        types,
        [
            ColumnType::Integer, // i64
            ColumnType::Text,    // String
            ColumnType::Integer, // i64
            ColumnType::Text,    // String
            ColumnType::Integer, // bool
            ColumnType::Real,    // f64
            ColumnType::Text,    // json
        ]
    );
}

#[test]
fn key_marker_sets_primary_key() {
    assert!(columns()[0].primary_key);
    assert_eq!(columns().iter().filter(|c| c.primary_key).count(), 1);
}

#[test]
fn index_markers() {
    assert_eq!(columns()[1].index, Some(IndexOp::Asc));
    assert_eq!(columns()[2].index, Some(IndexOp::Desc));
    assert_eq!(columns()[4].index, None);
}

#[test]
fn unique_implies_ascending_index() {
    let token = &columns()[3];
    assert!(token.unique);
    assert_eq!(token.index, Some(IndexOp::Asc));
}

#[test]
fn json_marker_is_opaque_text() {
    let tags = &columns()[6];
    assert!(tags.json);
    assert_eq!(tags.ty, ColumnType::Text);
}

#[derive(Debug, Record)]
struct BothMarkers {
    #[key]
    id: i64,
    #[index]
    #[index(desc)]
    value: i64,
}

#[test]
fn ascending_wins_over_descending() {
    assert_eq!(BothMarkers::COLUMNS[1].index, Some(IndexOp::Asc));
    assert!(!BothMarkers::COLUMNS[1].unique);
}

#[test]
fn bind_values_align_with_descriptor_order() {
    let record = PlayerScore {
        id: 7,
        name: "ace".into(),
        score: -3,
        token: "t0".into(),
        active: true,
        ratio: 0.5,
        tags: vec!["a".into()],
    };
    let row = record.to_row().unwrap();
    assert_eq!(
        row,
        vec![
            Value::Integer(7),
            Value::Text("ace".into()),
            Value::Integer(-3),
            Value::Text("t0".into()),
            Value::Integer(1),
            Value::Real(0.5),
            Value::Text("[\"a\"]".into()),
        ]
    );

    let row = BothMarkers { id: 1, value: 5 }.to_row().unwrap();
    assert_eq!(row.len(), BothMarkers::COLUMNS.len());
}
