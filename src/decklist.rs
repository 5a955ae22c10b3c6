//! Plain-text decklists in the Arena/MTGO exchange format.
//!
//! ```text
//! Commander
//! 1 Atraxa, Praetors' Voice
//!
//! Deck
//! 1 Sol Ring
//! 30 Island (M21) 264
//! ```

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;

use crate::board::layout::find_next_available_position;
use crate::catalogue::Catalogue;
use crate::models::{Card, Deck, DeckCard, DeckCardType, MainOrSide};

static ARENA_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(.+?)(?:\s+\([^)]*\)\s+\d+)?$").expect("valid regex")
});

static SIMPLE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(.+)$").expect("valid regex"));

static UP_TO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"deck (?:can|may) have up to ([a-z0-9-]+) cards named").expect("valid regex")
});

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Name as written in a decklist: the front face of a multi-face card.
pub fn export_name(name: &str) -> &str {
    name.split("//").next().unwrap_or_default().trim()
}

/// Render the commander and main-board cards as a decklist.
/// Cards missing from the catalogue are skipped.
pub fn export_deck(deck: &Deck, catalogue: &Catalogue) -> String {
    let mut out = String::new();
    if let Some(commander) = deck.commander().and_then(|c| catalogue.get(&c.card_id)) {
        out.push_str(&format!("Commander\n1 {}\n\n", export_name(&commander.name)));
    }
    out.push_str("Deck\n");
    for deck_card in deck.cards.iter().filter(|c| c.is_main_normal()) {
        if let Some(card) = catalogue.get(&deck_card.card_id) {
            out.push_str(&format!("{} {}\n", deck_card.count, export_name(&card.name)));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecklistLine {
    pub name: String,
    pub count: u32,
}

/// One deck in a pasted decklist, split by section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDeck {
    pub commander: Vec<DecklistLine>,
    pub companion: Vec<DecklistLine>,
    pub deck: Vec<DecklistLine>,
    pub sideboard: Vec<DecklistLine>,
}

impl ParsedDeck {
    fn is_empty(&self) -> bool {
        self.commander.is_empty()
            && self.companion.is_empty()
            && self.deck.is_empty()
            && self.sideboard.is_empty()
    }

    fn section_mut(&mut self, section: Section) -> &mut Vec<DecklistLine> {
        match section {
            Section::Commander => &mut self.commander,
            Section::Companion => &mut self.companion,
            Section::Deck => &mut self.deck,
            Section::Sideboard => &mut self.sideboard,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDecklist {
    pub decks: Vec<ParsedDeck>,
    /// Lines that could not be read as `<count> <name>`.
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Deck,
    Sideboard,
    Commander,
    Companion,
}

fn section_header(line: &str) -> Option<Section> {
    match line.to_lowercase().as_str() {
        "deck" => Some(Section::Deck),
        "sideboard" => Some(Section::Sideboard),
        "commander" => Some(Section::Commander),
        "companion" => Some(Section::Companion),
        _ => None,
    }
}

/// Parse pasted decklist text. A `Deck` header after content starts a new deck.
pub fn parse_decklist(input: &str) -> ParsedDecklist {
    let mut result = ParsedDecklist::default();
    let mut current = ParsedDeck::default();
    let mut section = Section::Deck;

    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(header) = section_header(line) {
            if header == Section::Deck && !current.is_empty() {
                result.decks.push(std::mem::take(&mut current));
            }
            section = header;
            continue;
        }
        let captures = ARENA_LINE_RE
            .captures(line)
            .or_else(|| SIMPLE_LINE_RE.captures(line));
        let parsed = captures.and_then(|c| {
            let count = c.get(1)?.as_str().parse::<u32>().ok()?;
            let name = c.get(2)?.as_str().trim();
            (count > 0 && !name.is_empty()).then(|| DecklistLine {
                name: name.to_string(),
                count,
            })
        });
        match parsed {
            Some(entry) => current.section_mut(section).push(entry),
            None => result.errors.push(line.to_string()),
        }
    }
    if !current.is_empty() {
        result.decks.push(current);
    }
    result
}

// ---------------------------------------------------------------------------
// Name lookup
// ---------------------------------------------------------------------------

/// Fold the punctuation variants decklist sites emit, trim and lowercase.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\u{2019}' | '`' => '\'',
            '\u{2212}' => '-',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_lowercase()
}

fn with_halves(name: &str) -> Vec<String> {
    let mut names = vec![name.to_string()];
    if name.contains("//") {
        names.extend(name.split("//").map(|part| part.trim().to_string()));
    }
    names
}

/// Case-insensitive card lookup by full name, split halves, face names and
/// alternate (`A-`) names. The first card to claim a name keeps it.
pub struct CardLookup<'a> {
    by_name: HashMap<String, &'a Card>,
}

impl<'a> CardLookup<'a> {
    pub fn new(cards: &'a [Card]) -> Self {
        let mut by_name = HashMap::new();
        for card in cards {
            let mut names = with_halves(&card.name);
            if let Some(base) = card.name.strip_prefix("A-") {
                names.push(base.to_string());
            }
            for face in card.faces() {
                names.extend(with_halves(&face.name));
            }
            for name in names {
                by_name.entry(normalize_name(&name)).or_insert(card);
            }
        }
        Self { by_name }
    }

    pub fn find(&self, name: &str) -> Option<&'a Card> {
        let normalized = normalize_name(name);
        let mut candidates = vec![normalized.clone()];
        if let Some(base) = normalized.strip_prefix("a-") {
            candidates.push(base.to_string());
        }
        if normalized.contains("//") {
            candidates.extend(
                normalized
                    .split("//")
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .take(2),
            );
        }
        candidates
            .iter()
            .find_map(|candidate| self.by_name.get(candidate).copied())
    }
}

// ---------------------------------------------------------------------------
// Copy limits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyLimit {
    Limited(u32),
    Unlimited,
}

fn number_word(word: &str) -> Option<u32> {
    const WORDS: [&str; 20] = [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
        "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
        "nineteen", "twenty",
    ];
    WORDS
        .iter()
        .position(|w| *w == word)
        .and_then(|i| u32::try_from(i + 1).ok())
}

/// How many copies of a card a singleton deck may hold.
pub fn allowed_copies(card: &Card) -> CopyLimit {
    let type_line = card.type_line.to_lowercase();
    if type_line.contains("basic") && type_line.contains("land") {
        return CopyLimit::Unlimited;
    }
    let oracle = card
        .oracle_text
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    if oracle.contains("deck can have any number of cards named")
        || oracle.contains("deck may have any number of cards named")
    {
        return CopyLimit::Unlimited;
    }
    if let Some(token) = UP_TO_RE.captures(&oracle).and_then(|c| c.get(1)) {
        let token = token.as_str();
        if let Ok(n) = token.parse::<u32>() {
            return CopyLimit::Limited(n);
        }
        if let Some(n) = token.split('-').find_map(number_word) {
            return CopyLimit::Limited(n);
        }
    }
    CopyLimit::Limited(1)
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// A decklist resolved against the catalogue.
#[derive(Debug, Clone, Default)]
pub struct DeckImport<'a> {
    pub commander: Option<&'a Card>,
    /// Main-deck cards with their clamped counts, in first-seen order.
    pub cards: Vec<(&'a Card, u32)>,
    /// Names that matched no card, sorted.
    pub unmatched: Vec<String>,
    /// Lines that could not be parsed.
    pub errors: Vec<String>,
}

/// Resolve parsed decks against `lookup`, merging repeated cards and
/// clamping counts to each card's copy limit.
pub fn aggregate<'a>(parsed: &ParsedDecklist, lookup: &CardLookup<'a>) -> DeckImport<'a> {
    let mut import = DeckImport {
        errors: parsed.errors.clone(),
        ..DeckImport::default()
    };
    let mut unmatched = BTreeSet::new();

    for deck in &parsed.decks {
        for line in &deck.commander {
            match lookup.find(&line.name) {
                Some(card) => import.commander = Some(card),
                None => {
                    unmatched.insert(format!("Commander: {}", line.name));
                }
            }
        }
        for line in &deck.deck {
            let Some(card) = lookup.find(&line.name) else {
                unmatched.insert(line.name.clone());
                continue;
            };
            if import.commander.is_some_and(|c| c.id == card.id) {
                continue;
            }
            let limit = allowed_copies(card);
            match import.cards.iter_mut().find(|(c, _)| c.id == card.id) {
                Some((_, count)) => {
                    *count = match limit {
                        CopyLimit::Unlimited => count.saturating_add(line.count),
                        CopyLimit::Limited(max) => max.min(count.saturating_add(line.count)),
                    }
                }
                None => {
                    let count = match limit {
                        CopyLimit::Unlimited => line.count,
                        CopyLimit::Limited(max) => max.min(line.count),
                    };
                    import.cards.push((card, count));
                }
            }
        }
    }
    for name in &unmatched {
        tracing::warn!(name = %name, "decklist line matched no card");
    }
    import.unmatched = unmatched.into_iter().collect();
    import
}

/// Parse and resolve decklist text in one step.
pub fn import_decklist<'a>(input: &str, catalogue: &'a Catalogue) -> DeckImport<'a> {
    let lookup = CardLookup::new(catalogue.cards());
    aggregate(&parse_decklist(input), &lookup)
}

/// Replace the main-board normal cards of `deck` with an import.
///
/// Sideboard, commander and companion slots are kept. An imported commander
/// replaces the existing commander slot in place, or is added at a free
/// spot. Imported cards take successive free grid spots and the result is
/// ordered by card name.
pub fn apply_import(deck: &Deck, import: &DeckImport<'_>, catalogue: &Catalogue) -> Deck {
    let mut cards: Vec<DeckCard> = deck
        .cards
        .iter()
        .filter(|c| !c.is_main_normal())
        .cloned()
        .collect();

    if let Some(commander) = import.commander {
        let version_id = commander.default_version().map(|v| v.id.clone());
        match cards
            .iter_mut()
            .find(|c| c.deck_card_type == DeckCardType::Commander)
        {
            Some(slot) => {
                slot.card_id = commander.id.clone();
                slot.count = 1;
                slot.phantoms.clear();
                slot.selected_version_id = version_id;
            }
            None => {
                let position = find_next_available_position(&cards);
                let mut slot = DeckCard::new(commander.id.clone(), MainOrSide::Main, position)
                    .with_type(DeckCardType::Commander);
                slot.selected_version_id = version_id;
                cards.push(slot);
            }
        }
    }

    for (card, count) in &import.cards {
        if import.commander.is_some_and(|c| c.id == card.id) {
            continue;
        }
        let position = find_next_available_position(&cards);
        let mut slot = DeckCard::new(card.id.clone(), MainOrSide::Main, position);
        slot.count = *count;
        slot.selected_version_id = card.default_version().map(|v| v.id.clone());
        cards.push(slot);
    }

    let name_of = |c: &DeckCard| {
        catalogue
            .get(&c.card_id)
            .map(|card| card.name.to_lowercase())
            .unwrap_or_default()
    };
    cards.sort_by_cached_key(name_of);

    Deck {
        cards,
        ..deck.clone()
    }
}
