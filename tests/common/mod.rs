//! Shared fixtures for the integration tests.
//!
//! `sample_cards()` returns a small catalogue covering basic lands,
//! multicolor spells, commanders, a transform card, cards with unusual copy
//! limits and an unreleased printing.

#![allow(dead_code)]

use chrono::NaiveDate;
use magic_helper::models::Card;
use magic_helper::Catalogue;
use serde_json::json;

/// Deserialize a card from its JSON wire form.
pub fn card(value: serde_json::Value) -> Card {
    serde_json::from_value(value).unwrap()
}

/// Fixed "today" used by release-date filters.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

pub fn sample_cards() -> Vec<Card> {
    vec![
        card(json!({
            "ID": "island",
            "name": "Island",
            "CMC": 0,
            "colorIdentity": [],
            "typeLine": "Basic Land — Island",
            "layout": "normal",
            "versions": [{
                "ID": "island-m21",
                "set": "m21",
                "setName": "Core Set 2021",
                "rarity": "common",
                "releasedAt": "2020-07-03",
                "legalities": {"commander": "legal", "standard": "not_legal"},
                "games": ["paper", "arena", "mtgo"],
                "imageUris": {"normal": "https://img.example/island-m21.jpg"},
                "isDefault": true
            }]
        })),
        card(json!({
            "ID": "shock",
            "name": "Shock",
            "oracleText": "Shock deals 2 damage to any target.",
            "CMC": 1,
            "colorIdentity": ["R"],
            "typeLine": "Instant",
            "versions": [
                {
                    "ID": "shock-m19",
                    "set": "m19",
                    "setName": "Core Set 2019",
                    "rarity": "common",
                    "releasedAt": "2018-07-13",
                    "legalities": {"commander": "legal", "modern": "legal"},
                    "games": ["paper", "arena"],
                    "flavorText": "Lightning tethers souls to the world.",
                    "isDefault": true
                },
                {
                    "ID": "shock-2xm",
                    "set": "2xm",
                    "setName": "Double Masters",
                    "rarity": "uncommon",
                    "releasedAt": "2020-08-07",
                    "legalities": {"commander": "legal", "modern": "legal"},
                    "games": ["paper", "mtgo"]
                }
            ]
        })),
        card(json!({
            "ID": "counterspell",
            "name": "Counterspell",
            "oracleText": "Counter target spell.",
            "CMC": 2,
            "colorIdentity": ["U"],
            "typeLine": "Instant",
            "versions": [{
                "ID": "counterspell-mh2",
                "set": "mh2",
                "setName": "Modern Horizons 2",
                "rarity": "uncommon",
                "releasedAt": "2021-06-18",
                "legalities": {"commander": "legal", "modern": "legal"},
                "games": ["paper", "mtgo"],
                "flavorText": "The duel was going well until the wizard said no.",
                "isDefault": true
            }]
        })),
        card(json!({
            "ID": "azorius-charm",
            "name": "Azorius Charm",
            "oracleText": "Choose one — You gain life; or draw a card; or put target attacking or blocking creature on top of its owner's library.",
            "CMC": 2,
            "colorIdentity": ["W", "U"],
            "typeLine": "Instant",
            "versions": [{
                "ID": "azorius-charm-rtr",
                "set": "rtr",
                "setName": "Return to Ravnica",
                "rarity": "uncommon",
                "releasedAt": "2012-10-05",
                "legalities": {"commander": "legal", "modern": "legal"},
                "games": ["paper", "mtgo"],
                "isDefault": true
            }]
        })),
        card(json!({
            "ID": "atraxa",
            "name": "Atraxa, Praetors' Voice",
            "oracleText": "Flying, vigilance, deathtouch, lifelink",
            "CMC": 4,
            "colorIdentity": ["W", "U", "B", "G"],
            "typeLine": "Legendary Creature — Phyrexian Angel Horror",
            "keywords": ["Flying", "Vigilance", "Deathtouch", "Lifelink"],
            "versions": [{
                "ID": "atraxa-c16",
                "set": "c16",
                "setName": "Commander 2016",
                "rarity": "mythic",
                "releasedAt": "2016-11-11",
                "legalities": {"commander": "legal", "legacy": "legal"},
                "games": ["paper", "mtgo"],
                "isDefault": true
            }]
        })),
        card(json!({
            "ID": "emrakul",
            "name": "Emrakul, the Aeons Torn",
            "oracleText": "This spell can't be countered.",
            "CMC": 15,
            "colorIdentity": [],
            "typeLine": "Legendary Creature — Eldrazi",
            "versions": [{
                "ID": "emrakul-roe",
                "set": "roe",
                "setName": "Rise of the Eldrazi",
                "rarity": "mythic",
                "releasedAt": "2010-04-23",
                "legalities": {"commander": "banned", "legacy": "banned"},
                "games": ["paper", "mtgo"],
                "isDefault": true
            }]
        })),
        card(json!({
            "ID": "delver",
            "name": "Delver of Secrets // Insectile Aberration",
            "CMC": 1,
            "colorIdentity": ["U"],
            "typeLine": "Creature — Human Wizard // Creature — Human Insect",
            "layout": "transform",
            "versions": [{
                "ID": "delver-isd",
                "set": "isd",
                "setName": "Innistrad",
                "rarity": "common",
                "releasedAt": "2011-09-30",
                "legalities": {"commander": "legal", "legacy": "legal"},
                "games": ["paper", "mtgo"],
                "isDefault": true,
                "cardFaces": [
                    {
                        "name": "Delver of Secrets",
                        "typeLine": "Creature — Human Wizard",
                        "oracleText": "At the beginning of your upkeep, look at the top card of your library.",
                        "layout": "transform",
                        "imageUris": {"normal": "https://img.example/delver-front.jpg"}
                    },
                    {
                        "name": "Insectile Aberration",
                        "typeLine": "Creature — Human Insect",
                        "oracleText": "Flying",
                        "imageUris": {"normal": "https://img.example/delver-back.jpg"}
                    }
                ]
            }]
        })),
        card(json!({
            "ID": "relentless-rats",
            "name": "Relentless Rats",
            "oracleText": "Relentless Rats gets +1/+1 for each other creature on the battlefield named Relentless Rats.\nA deck can have any number of cards named Relentless Rats.",
            "CMC": 3,
            "colorIdentity": ["B"],
            "typeLine": "Creature — Rat",
            "tags": ["tribal"],
            "versions": [{
                "ID": "relentless-rats-m11",
                "set": "m11",
                "setName": "Magic 2011",
                "rarity": "uncommon",
                "releasedAt": "2010-07-16",
                "legalities": {"commander": "legal"},
                "games": ["paper", "mtgo"],
                "isDefault": true
            }]
        })),
        card(json!({
            "ID": "seven-dwarves",
            "name": "Seven Dwarves",
            "oracleText": "Seven Dwarves gets +1/+1 for each other creature named Seven Dwarves you control.\nA deck can have up to seven cards named Seven Dwarves.",
            "CMC": 3,
            "colorIdentity": ["R"],
            "typeLine": "Creature — Dwarf",
            "tags": ["tribal"],
            "versions": [{
                "ID": "seven-dwarves-eld",
                "set": "eld",
                "setName": "Throne of Eldraine",
                "rarity": "common",
                "releasedAt": "2019-10-04",
                "legalities": {"commander": "legal"},
                "games": ["paper", "arena"],
                "isDefault": true
            }]
        })),
        card(json!({
            "ID": "sol-ring",
            "name": "Sol Ring",
            "oracleText": "{T}: Add {C}{C}.",
            "CMC": 1,
            "colorIdentity": [],
            "typeLine": "Artifact",
            "tags": ["ramp"],
            "versions": [{
                "ID": "sol-ring-cmm",
                "set": "cmm",
                "setName": "Commander Masters",
                "rarity": "uncommon",
                "releasedAt": "2023-08-04",
                "legalities": {"commander": "legal", "legacy": "banned"},
                "games": ["paper", "mtgo"],
                "isDefault": true
            }]
        })),
        card(json!({
            "ID": "tomorrow",
            "name": "Tomorrow's Promise",
            "oracleText": "Draw two cards.",
            "CMC": 3,
            "colorIdentity": ["U"],
            "typeLine": "Sorcery",
            "versions": [{
                "ID": "tomorrow-fut",
                "set": "fut",
                "setName": "Future Set",
                "rarity": "rare",
                "releasedAt": "2099-01-01",
                "legalities": {},
                "games": ["paper"],
                "isDefault": true
            }]
        })),
    ]
}

pub fn sample_catalogue() -> Catalogue {
    Catalogue::new(sample_cards())
}

/// Names of a card slice, for readable assertions.
pub fn names<'a>(cards: &[&'a Card]) -> Vec<&'a str> {
    cards.iter().map(|c| c.name.as_str()).collect()
}

pub fn by_id<'a>(cards: &'a [Card], id: &str) -> &'a Card {
    cards.iter().find(|c| c.id == id).unwrap()
}
