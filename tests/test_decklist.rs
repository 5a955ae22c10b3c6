//! Decklist export, parsing, import and commander warnings.

mod common;

use magic_helper::decklist::{
    allowed_copies, apply_import, export_deck, export_name, import_decklist, normalize_name,
    parse_decklist, CardLookup, CopyLimit, DecklistLine,
};
use magic_helper::models::{Deck, DeckCard, DeckCardType, MainOrSide, Position};
use magic_helper::warnings::{commander_warnings, WarningKind};
use serde_json::json;

const PASTED: &str = "\
Commander
1 Atraxa, Praetors\u{2019} Voice

Deck
1 Atraxa, Praetors' Voice
4 Shock
3 Shock
20 Seven Dwarves
40 Relentless Rats
30 Island (M21) 264
1 Insectile Aberration
1 Nonexistent Card
this is not a line
";

fn line(name: &str, count: u32) -> DecklistLine {
    DecklistLine {
        name: name.to_string(),
        count,
    }
}

fn commander_deck() -> Deck {
    let mut deck = Deck::new("d", "Atraxa Superfriends");
    deck.cards.push(
        DeckCard::new("atraxa", MainOrSide::Main, Position::new(0.0, 0.0))
            .with_type(DeckCardType::Commander),
    );
    deck.cards.push(DeckCard::new("shock", MainOrSide::Main, Position::new(100.0, 0.0)));
    deck.cards.push(DeckCard::new(
        "delver",
        MainOrSide::Main,
        Position::new(200.0, 0.0),
    ));
    deck.cards.push(DeckCard::new(
        "counterspell",
        MainOrSide::Sideboard,
        Position::new(300.0, 0.0),
    ));
    deck
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[test]
fn export_writes_commander_then_main_deck() {
    let catalogue = common::sample_catalogue();
    assert_eq!(
        export_deck(&commander_deck(), &catalogue),
        "Commander\n1 Atraxa, Praetors' Voice\n\nDeck\n1 Shock\n1 Delver of Secrets\n"
    );
}

#[test]
fn export_without_commander_has_only_the_deck_section() {
    let catalogue = common::sample_catalogue();
    let mut deck = Deck::new("d", "Burn");
    deck.add_card("shock", MainOrSide::Main);
    deck.add_card("shock", MainOrSide::Main);
    deck.add_card("not-in-catalogue", MainOrSide::Main);
    assert_eq!(export_deck(&deck, &catalogue), "Deck\n2 Shock\n");
}

#[test]
fn export_name_keeps_the_front_face() {
    assert_eq!(export_name("Fire // Ice"), "Fire");
    assert_eq!(export_name("Shock"), "Shock");
}

#[test]
fn exported_list_imports_back() {
    let catalogue = common::sample_catalogue();
    let text = export_deck(&commander_deck(), &catalogue);
    let import = import_decklist(&text, &catalogue);
    assert_eq!(import.commander.map(|c| c.id.as_str()), Some("atraxa"));
    let ids: Vec<(&str, u32)> = import.cards.iter().map(|(c, n)| (c.id.as_str(), *n)).collect();
    assert_eq!(ids, vec![("shock", 1), ("delver", 1)]);
    assert!(import.unmatched.is_empty());
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[test]
fn parse_splits_sections_and_collects_errors() {
    let parsed = parse_decklist(PASTED);
    assert_eq!(parsed.decks.len(), 2);
    assert_eq!(parsed.decks[0].commander, vec![line("Atraxa, Praetors\u{2019} Voice", 1)]);
    assert_eq!(parsed.decks[1].deck.len(), 8);
    assert_eq!(parsed.decks[1].deck[5], line("Island", 30));
    assert_eq!(parsed.errors, vec!["this is not a line"]);
}

#[test]
fn parse_reads_sideboard_and_companion() {
    let parsed = parse_decklist("2 Shock\n\nSideboard\n1 Counterspell\nCompanion\n1 Lurrus\n");
    assert_eq!(parsed.decks.len(), 1);
    let deck = &parsed.decks[0];
    assert_eq!(deck.deck, vec![line("Shock", 2)]);
    assert_eq!(deck.sideboard, vec![line("Counterspell", 1)]);
    assert_eq!(deck.companion, vec![line("Lurrus", 1)]);
}

#[test]
fn zero_counts_are_errors() {
    let parsed = parse_decklist("0 Shock\n1 Shock");
    assert_eq!(parsed.errors, vec!["0 Shock"]);
    assert_eq!(parsed.decks[0].deck, vec![line("Shock", 1)]);
}

// ---------------------------------------------------------------------------
// Lookup and copy limits
// ---------------------------------------------------------------------------

#[test]
fn names_are_normalized() {
    assert_eq!(normalize_name("  Atraxa, Praetors\u{2019} Voice "), "atraxa, praetors' voice");
    assert_eq!(normalize_name("Jace`s \u{2212}Plan"), "jace's -plan");
}

#[test]
fn lookup_finds_halves_faces_and_alternates() {
    let cards = common::sample_cards();
    let lookup = CardLookup::new(&cards);
    let id = |name: &str| lookup.find(name).map(|c| c.id.as_str());
    assert_eq!(id("SHOCK"), Some("shock"));
    assert_eq!(id("A-Shock"), Some("shock"));
    assert_eq!(id("Delver of Secrets"), Some("delver"));
    assert_eq!(id("Insectile Aberration"), Some("delver"));
    assert_eq!(id("Delver of Secrets // Insectile Aberration"), Some("delver"));
    assert_eq!(id("Lightning Bolt"), None);
}

#[test]
fn copy_limits_follow_type_and_oracle_text() {
    let cards = common::sample_cards();
    let limit = |id: &str| allowed_copies(common::by_id(&cards, id));
    assert_eq!(limit("island"), CopyLimit::Unlimited);
    assert_eq!(limit("relentless-rats"), CopyLimit::Unlimited);
    assert_eq!(limit("seven-dwarves"), CopyLimit::Limited(7));
    assert_eq!(limit("shock"), CopyLimit::Limited(1));

    let numeric = common::card(json!({
        "ID": "n",
        "name": "Numbered",
        "oracleText": "A deck can have up to 12 cards named Numbered.",
        "typeLine": "Creature — Test"
    }));
    assert_eq!(allowed_copies(&numeric), CopyLimit::Limited(12));
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[test]
fn import_merges_clamps_and_reports() {
    let catalogue = common::sample_catalogue();
    let import = import_decklist(PASTED, &catalogue);
    assert_eq!(import.commander.map(|c| c.id.as_str()), Some("atraxa"));
    let cards: Vec<(&str, u32)> = import.cards.iter().map(|(c, n)| (c.id.as_str(), *n)).collect();
    assert_eq!(
        cards,
        vec![
            ("shock", 1),
            ("seven-dwarves", 7),
            ("relentless-rats", 40),
            ("island", 30),
            ("delver", 1),
        ]
    );
    assert_eq!(import.unmatched, vec!["Nonexistent Card"]);
    assert_eq!(import.errors, vec!["this is not a line"]);
}

#[test]
fn huge_repeated_counts_saturate() {
    let catalogue = common::sample_catalogue();
    let import = import_decklist("4000000000 Island\n4000000000 Island\n", &catalogue);
    let cards: Vec<(&str, u32)> = import.cards.iter().map(|(c, n)| (c.id.as_str(), *n)).collect();
    assert_eq!(cards, vec![("island", u32::MAX)]);
}

#[test]
fn unmatched_commander_is_labelled() {
    let catalogue = common::sample_catalogue();
    let import = import_decklist("Commander\n1 Nobody\n", &catalogue);
    assert!(import.commander.is_none());
    assert_eq!(import.unmatched, vec!["Commander: Nobody"]);
}

#[test]
fn apply_import_replaces_the_main_deck() {
    let catalogue = common::sample_catalogue();
    let mut deck = Deck::new("d", "Old");
    let mut old_commander = DeckCard::new("emrakul", MainOrSide::Main, Position::new(0.0, 0.0))
        .with_type(DeckCardType::Commander);
    old_commander.phantoms.push(Position::new(600.0, 600.0));
    deck.cards.push(old_commander);
    deck.cards.push(DeckCard::new(
        "counterspell",
        MainOrSide::Sideboard,
        Position::new(100.0, 0.0),
    ));
    deck.cards.push(DeckCard::new(
        "azorius-charm",
        MainOrSide::Main,
        Position::new(200.0, 0.0),
    ));

    let import = import_decklist(PASTED, &catalogue);
    let updated = apply_import(&deck, &import, &catalogue);

    let ids: Vec<&str> = updated.cards.iter().map(|c| c.card_id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "atraxa",
            "counterspell",
            "delver",
            "island",
            "relentless-rats",
            "seven-dwarves",
            "shock",
        ]
    );

    let commander = updated.commander().unwrap();
    assert_eq!(commander.card_id, "atraxa");
    assert_eq!(commander.position, Position::new(0.0, 0.0));
    assert!(commander.phantoms.is_empty());
    assert_eq!(commander.selected_version_id.as_deref(), Some("atraxa-c16"));

    let shock = updated.card("shock", MainOrSide::Main).unwrap();
    assert_eq!(shock.position, Position::new(200.0, 0.0));
    assert_eq!(shock.selected_version_id.as_deref(), Some("shock-m19"));
    let delver = updated.card("delver", MainOrSide::Main).unwrap();
    assert_eq!(delver.position, Position::new(0.0, 50.0));
    assert_eq!(updated.card("island", MainOrSide::Main).unwrap().count, 30);
    assert!(updated.card("counterspell", MainOrSide::Sideboard).is_some());
    assert_eq!(updated.name, "Old");
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

#[test]
fn warnings_flag_extra_copies_and_off_color_cards() {
    let catalogue = common::sample_catalogue();
    let mut deck = Deck::new("d", "Atraxa");
    deck.cards.push(
        DeckCard::new("atraxa", MainOrSide::Main, Position::new(0.0, 0.0))
            .with_type(DeckCardType::Commander),
    );
    let mut shock = DeckCard::new("shock", MainOrSide::Main, Position::new(100.0, 0.0));
    shock.phantoms.push(Position::new(100.0, 200.0));
    deck.cards.push(shock);
    let mut rats = DeckCard::new("relentless-rats", MainOrSide::Main, Position::new(200.0, 0.0));
    rats.count = 40;
    deck.cards.push(rats);
    let mut island = DeckCard::new("island", MainOrSide::Main, Position::new(300.0, 0.0));
    island.count = 30;
    deck.cards.push(island);
    let mut side = DeckCard::new("counterspell", MainOrSide::Sideboard, Position::new(400.0, 0.0));
    side.count = 5;
    deck.cards.push(side);

    let kinds: Vec<(String, WarningKind)> = commander_warnings(&deck, &catalogue)
        .into_iter()
        .map(|w| (w.card_id, w.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (
                "shock".to_string(),
                WarningKind::TooManyCopies {
                    copies: 2,
                    allowed: 1
                }
            ),
            ("shock".to_string(), WarningKind::OutsideColorIdentity),
        ]
    );
}

#[test]
fn huge_counts_with_phantoms_do_not_overflow() {
    let catalogue = common::sample_catalogue();
    let mut deck = commander_deck();
    deck.cards.retain(|c| c.card_id == "atraxa");
    let mut island = DeckCard::new("island", MainOrSide::Main, Position::new(100.0, 0.0));
    island.count = u32::MAX;
    island.phantoms.push(Position::new(100.0, 200.0));
    deck.cards.push(island);
    assert!(commander_warnings(&deck, &catalogue).is_empty());
}

#[test]
fn decks_without_a_commander_have_no_warnings() {
    let catalogue = common::sample_catalogue();
    let mut deck = Deck::new("d", "Burn");
    deck.add_card("shock", MainOrSide::Main);
    deck.add_card("shock", MainOrSide::Main);
    assert!(commander_warnings(&deck, &catalogue).is_empty());
}

#[test]
fn warning_messages_name_the_card() {
    let catalogue = common::sample_catalogue();
    let mut deck = commander_deck();
    deck.cards.retain(|c| c.card_id != "delver");
    let warnings = commander_warnings(&deck, &catalogue);
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].message,
        "Shock is outside Atraxa, Praetors' Voice's color identity"
    );
}
