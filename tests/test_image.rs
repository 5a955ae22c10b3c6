//! Image URL resolution per layout and face.

mod common;

use magic_helper::image::{card_image, resolve_image};
use magic_helper::models::{CardVersion, ImageSize, Layout};
use serde_json::json;

fn version(value: serde_json::Value) -> CardVersion {
    serde_json::from_value(value).unwrap()
}

// ---------------------------------------------------------------------------
// Single-faced layouts
// ---------------------------------------------------------------------------

#[test]
fn normal_layout_uses_its_own_image() {
    let cards = common::sample_cards();
    let island = common::by_id(&cards, "island");
    assert_eq!(
        card_image(island, None, ImageSize::Normal, false),
        Some("https://img.example/island-m21.jpg")
    );
}

#[test]
fn normal_layout_has_no_other_face() {
    let cards = common::sample_cards();
    let island = common::by_id(&cards, "island");
    assert_eq!(card_image(island, None, ImageSize::Normal, true), None);
}

#[test]
fn single_layout_falls_back_to_first_face() {
    let v = version(json!({
        "ID": "split-v",
        "set": "tst",
        "rarity": "rare",
        "cardFaces": [
            {"name": "Fire", "imageUris": {"large": "https://img.example/fire.jpg"}},
            {"name": "Ice"}
        ]
    }));
    assert_eq!(
        resolve_image(&v, Layout::Split, ImageSize::Large, false),
        Some("https://img.example/fire.jpg")
    );
}

#[test]
fn missing_size_yields_none() {
    let cards = common::sample_cards();
    let island = common::by_id(&cards, "island");
    assert_eq!(card_image(island, None, ImageSize::ArtCrop, false), None);
}

// ---------------------------------------------------------------------------
// Double-faced layouts
// ---------------------------------------------------------------------------

#[test]
fn transform_front_and_back() {
    let cards = common::sample_cards();
    let delver = common::by_id(&cards, "delver");
    assert_eq!(
        card_image(delver, None, ImageSize::Normal, false),
        Some("https://img.example/delver-front.jpg")
    );
    assert_eq!(
        card_image(delver, None, ImageSize::Normal, true),
        Some("https://img.example/delver-back.jpg")
    );
}

#[test]
fn double_layout_without_faces_uses_own_image_for_front_only() {
    let v = version(json!({
        "ID": "mdfc-v",
        "set": "tst",
        "rarity": "rare",
        "imageUris": {"normal": "https://img.example/mdfc.jpg"}
    }));
    assert_eq!(
        resolve_image(&v, Layout::ModalDfc, ImageSize::Normal, false),
        Some("https://img.example/mdfc.jpg")
    );
    assert_eq!(resolve_image(&v, Layout::ModalDfc, ImageSize::Normal, true), None);
}

// ---------------------------------------------------------------------------
// Printing choice and unknown layouts
// ---------------------------------------------------------------------------

#[test]
fn selected_printing_is_used_when_present() {
    let card = common::card(json!({
        "ID": "bolt",
        "name": "Lightning Bolt",
        "CMC": 1,
        "colorIdentity": ["R"],
        "typeLine": "Instant",
        "versions": [
            {"ID": "bolt-a", "set": "a", "rarity": "common", "isDefault": true,
             "imageUris": {"small": "https://img.example/bolt-a.jpg"}},
            {"ID": "bolt-b", "set": "b", "rarity": "common",
             "imageUris": {"small": "https://img.example/bolt-b.jpg"}}
        ]
    }));
    assert_eq!(
        card_image(&card, Some("bolt-b"), ImageSize::Small, false),
        Some("https://img.example/bolt-b.jpg")
    );
    assert_eq!(
        card_image(&card, Some("gone"), ImageSize::Small, false),
        Some("https://img.example/bolt-a.jpg")
    );
}

#[test]
fn unknown_layout_has_no_image() {
    let card = common::card(json!({
        "ID": "odd",
        "name": "Odd Card",
        "layout": "something_new",
        "versions": [{"ID": "odd-v", "set": "x", "rarity": "common",
                      "imageUris": {"normal": "https://img.example/odd.jpg"}}]
    }));
    assert_eq!(card.layout, Layout::Unknown);
    assert_eq!(card_image(&card, None, ImageSize::Normal, false), None);
}

#[test]
fn card_without_printings_has_no_image() {
    let card = common::card(json!({"ID": "bare", "name": "Bare"}));
    assert_eq!(card_image(&card, None, ImageSize::Normal, false), None);
}
