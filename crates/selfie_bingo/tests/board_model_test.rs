//! Tests for the store-backed board model.

use selfie_bingo::{BoardModel, Completion, MemoryTileStore, Position, TileStore};
use std::sync::Arc;

fn model() -> (Arc<MemoryTileStore>, BoardModel) {
    let store = Arc::new(MemoryTileStore::new());
    let model = BoardModel::new(store.clone());
    (store, model)
}

#[test]
fn test_empty_store_reads_empty_board() {
    let (_store, model) = model();
    let board = model.get_all().expect("Read failed");
    assert_eq!(board.filled_count(), 0);
    assert!(model.get_completed().expect("Read failed").is_empty());
    assert!(!model.is_full_house().expect("Read failed"));
}

#[test]
fn test_writes_use_box_keys() {
    let (store, model) = model();
    model.set_name(Position::Center, "Ada").expect("Write failed");
    model
        .set_image(Position::BottomRight, "data:image/png;base64,AAAA")
        .expect("Write failed");

    assert_eq!(store.get("box5name").expect("Get failed").as_deref(), Some("Ada"));
    assert_eq!(
        store.get("box9image").expect("Get failed").as_deref(),
        Some("data:image/png;base64,AAAA")
    );
}

#[test]
fn test_queries_see_external_writes() {
    let (store, model) = model();
    assert!(!model.tile(Position::TopLeft).expect("Read failed").is_filled());

    store.set("box1image", "img").expect("Set failed");
    assert!(model.tile(Position::TopLeft).expect("Read failed").is_filled());
}

#[test]
fn test_empty_strings_read_as_absent() {
    let (store, model) = model();
    store.set("box2name", "").expect("Set failed");
    store.set("box2image", "").expect("Set failed");
    let tile = model.tile(Position::TopCenter).expect("Read failed");
    assert_eq!(tile.name(), &None);
    assert!(!tile.is_filled());
}

#[test]
fn test_queries_are_idempotent() {
    let (_store, model) = model();
    for pos in [Position::TopLeft, Position::TopCenter] {
        model.set_image(pos, "img").expect("Write failed");
    }
    let first = model.get_all().expect("Read failed");
    let second = model.get_all().expect("Read failed");
    assert_eq!(first, second);
    assert_eq!(
        model.detect(Position::TopCenter).expect("Detect failed"),
        model.detect(Position::TopCenter).expect("Detect failed")
    );
}

#[test]
fn test_line_predicates() {
    let (_store, model) = model();
    for pos in [Position::TopRight, Position::MiddleRight, Position::BottomRight] {
        model.set_image(pos, "img").expect("Write failed");
    }
    assert!(model.is_column_complete(Position::MiddleRight).expect("Read failed"));
    assert!(!model.is_row_complete(Position::MiddleRight).expect("Read failed"));
    assert!(!model.is_corner_complete(Position::TopRight).expect("Read failed"));
    assert!(!model.is_corner_complete(Position::Center).expect("Read failed"));
}

#[test]
fn test_named_tile_then_top_row_completes_row() {
    let (_store, model) = model();
    model.set_name(Position::Center, "Ada").expect("Write failed");

    model.set_image(Position::TopLeft, "a").expect("Write failed");
    assert_eq!(model.detect(Position::TopLeft).expect("Detect failed"), None);
    model.set_image(Position::TopCenter, "b").expect("Write failed");
    assert_eq!(model.detect(Position::TopCenter).expect("Detect failed"), None);
    model.set_image(Position::TopRight, "c").expect("Write failed");
    assert_eq!(
        model.detect(Position::TopRight).expect("Detect failed"),
        Some(Completion::Row(0))
    );

    let completed = model.get_completed().expect("Read failed");
    let positions: Vec<Position> = completed.iter().map(|t| *t.position()).collect();
    assert_eq!(
        positions,
        vec![Position::TopLeft, Position::TopCenter, Position::TopRight]
    );
}

#[test]
fn test_ninth_image_is_full_house_in_any_order() {
    let orders: [[u8; 9]; 3] = [
        [1, 2, 3, 4, 5, 6, 7, 8, 9],
        [9, 8, 7, 6, 5, 4, 3, 2, 1],
        [5, 1, 9, 3, 7, 2, 8, 4, 6],
    ];
    for order in orders {
        let (_store, model) = model();
        for (i, number) in order.iter().enumerate() {
            let pos = Position::from_number(*number).expect("Valid number");
            model.set_image(pos, "img").expect("Write failed");
            let detected = model.detect(pos).expect("Detect failed");
            if i == 8 {
                assert_eq!(detected, Some(Completion::FullHouse), "order {:?}", order);
            } else {
                assert_ne!(detected, Some(Completion::FullHouse), "order {:?}", order);
            }
        }
    }
}

#[test]
fn test_reset_clears_every_tile() {
    let (store, model) = model();
    for pos in Position::ALL {
        model.set_name(pos, "Someone").expect("Write failed");
        model.set_image(pos, "img").expect("Write failed");
    }
    model.reset().expect("Reset failed");

    let board = model.get_all().expect("Read failed");
    assert_eq!(board.filled_count(), 0);
    assert!(board.names().is_empty());
    assert_eq!(store.len(), 18);
}
