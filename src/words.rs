// Word lists and themes: the fixed vocabulary the generator draws from.
// Everything here is read-only after startup.

use std::fmt;

pub const ADJECTIVES: &[&str] = &[
    "Cool", "Epic", "Pro", "Super", "Mega", "Ultra", "Legendary", "Supreme",
    "Golden", "Silver", "Diamond", "Royal", "Noble", "Mystic", "Shadow",
    "Cosmic", "Atomic", "Thunder", "Lightning", "Phoenix", "Dragon", "Tiger",
    "Swift", "Brave", "Wild", "Dark", "Bright", "Silent", "Loud", "Fast",
];

pub const NOUNS: &[&str] = &[
    "Warrior", "Legend", "Master", "King", "Queen", "Hero", "Champion",
    "Knight", "Ninja", "Samurai", "Hunter", "Ranger", "Scout", "Wizard",
    "Mage", "Sage", "Lord", "Chief", "Captain", "Commander", "General",
    "Admiral", "Emperor", "Prince", "Duke", "Baron", "Guardian", "Defender",
];

pub const ACTIONS: &[&str] = &[
    "Rising", "Flying", "Running", "Jumping", "Fighting", "Dancing", "Singing",
    "Blazing", "Shining", "Glowing", "Roaring", "Howling", "Striking", "Crushing",
    "Smashing", "Breaking", "Building", "Creating", "Winning", "Leading",
];

pub const ELEMENTS: &[&str] = &[
    "Fire", "Water", "Earth", "Wind", "Ice", "Storm", "Light", "Shadow",
    "Thunder", "Lightning", "Frost", "Flame", "Spark", "Wave", "Stone",
    "Steel", "Iron", "Gold", "Silver", "Crystal", "Plasma", "Energy",
];

pub const ANIMALS: &[&str] = &[
    "Wolf", "Lion", "Tiger", "Bear", "Eagle", "Hawk", "Falcon", "Dragon",
    "Phoenix", "Griffin", "Panther", "Cobra", "Viper", "Shark", "Raven",
    "Owl", "Fox", "Lynx", "Jaguar", "Leopard", "Cheetah", "Rhino",
];

/// Shortest word accepted from any source.
pub const MIN_WORD_LEN: usize = 3;
/// Longest word accepted by the api and hybrid strategies.
pub const MAX_WORD_LEN: usize = 8;

/// A named, fixed list of words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCategory {
    pub name: &'static str,
    pub words: &'static [&'static str],
}

/// The five categories the local strategies pick from.
///
/// `WordBank::standard()` is what the CLI uses; a custom bank can be handed to
/// the composer when a different vocabulary is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordBank {
    pub adjectives: WordCategory,
    pub nouns: WordCategory,
    pub actions: WordCategory,
    pub elements: WordCategory,
    pub animals: WordCategory,
}

impl WordBank {
    pub const fn standard() -> Self {
        WordBank {
            adjectives: WordCategory { name: "Adjectives", words: ADJECTIVES },
            nouns: WordCategory { name: "Nouns", words: NOUNS },
            actions: WordCategory { name: "Actions", words: ACTIONS },
            elements: WordCategory { name: "Elements", words: ELEMENTS },
            animals: WordCategory { name: "Animals", words: ANIMALS },
        }
    }

    /// Categories in their canonical order.
    pub fn categories(&self) -> [WordCategory; 5] {
        [self.adjectives, self.nouns, self.actions, self.elements, self.animals]
    }

    /// Every word of every category, duplicates kept.
    pub fn all_words(&self) -> Vec<&'static str> {
        self.categories().iter().flat_map(|c| c.words.iter().copied()).collect()
    }

    /// Words of the given categories concatenated in order.
    pub fn join(categories: &[WordCategory]) -> Vec<&'static str> {
        categories.iter().flat_map(|c| c.words.iter().copied()).collect()
    }
}

/// Named theme used by the themed strategy.
///
/// Theme names are matched case-insensitively. Names outside the fixed table
/// are kept as `Other` and draw from adjectives and nouns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Theme {
    Fantasy,
    Gaming,
    Nature,
    Warrior,
    Royal,
    Tech,
    Dark,
    Light,
    Other(String),
}

impl Theme {
    /// The eight themes offered by the interactive menu, in menu order.
    pub const MENU: [Theme; 8] = [
        Theme::Fantasy,
        Theme::Gaming,
        Theme::Nature,
        Theme::Warrior,
        Theme::Royal,
        Theme::Tech,
        Theme::Dark,
        Theme::Light,
    ];

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "fantasy" => Theme::Fantasy,
            "gaming" => Theme::Gaming,
            "nature" => Theme::Nature,
            "warrior" => Theme::Warrior,
            "royal" => Theme::Royal,
            "tech" => Theme::Tech,
            "dark" => Theme::Dark,
            "light" => Theme::Light,
            _ => Theme::Other(name.trim().to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Theme::Fantasy => "fantasy",
            Theme::Gaming => "gaming",
            Theme::Nature => "nature",
            Theme::Warrior => "warrior",
            Theme::Royal => "royal",
            Theme::Tech => "tech",
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Other(name) => name,
        }
    }

    /// Short blurb shown next to the theme in the menu.
    pub fn hint(&self) -> &'static str {
        match self {
            Theme::Fantasy => "mystic, magic, quest",
            Theme::Gaming => "pro, epic, legendary",
            Theme::Nature => "elements, animals",
            Theme::Warrior => "battle, combat",
            Theme::Royal => "king, noble, crown",
            Theme::Tech => "cyber, digital, quantum",
            Theme::Dark => "shadow, night, phantom",
            Theme::Light => "bright, shine, radiant",
            Theme::Other(_) => "adjectives, nouns",
        }
    }

    /// Base words for this theme, drawn from `bank` where the theme builds on
    /// a category.
    pub fn words(&self, bank: &WordBank) -> Vec<&'static str> {
        match self {
            Theme::Fantasy => {
                let head = &bank.adjectives.words[..bank.adjectives.words.len().min(10)];
                let mut words = head.to_vec();
                words.extend(["Mystic", "Magic", "Spell", "Quest"]);
                words
            }
            Theme::Gaming => vec!["Pro", "Epic", "Legendary", "Elite", "Master", "Champion"],
            Theme::Nature => WordBank::join(&[bank.elements, bank.animals]),
            Theme::Warrior => {
                let mut words = WordBank::join(&[bank.actions, bank.nouns]);
                words.extend(["Battle", "Combat", "Fight"]);
                words
            }
            Theme::Royal => vec!["Royal", "Noble", "King", "Queen", "Prince", "Crown", "Gold"],
            Theme::Tech => vec!["Cyber", "Digital", "Quantum", "Nano", "Virtual", "Matrix"],
            Theme::Dark => vec!["Shadow", "Dark", "Night", "Void", "Raven", "Phantom"],
            Theme::Light => vec!["Bright", "Shine", "Glow", "Light", "Solar", "Radiant"],
            Theme::Other(_) => WordBank::join(&[bank.adjectives, bank.nouns]),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&title_case(self.name()))
    }
}

/// True when `word` is non-empty and made of alphabetic characters only.
pub fn is_alphabetic(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

/// Length in characters, not bytes.
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// Valid for the api and hybrid pools: alphabetic, 3 to 8 characters.
pub fn is_pool_word(word: &str) -> bool {
    is_alphabetic(word) && (MIN_WORD_LEN..=MAX_WORD_LEN).contains(&char_len(word))
}

/// First letter uppercase, the rest lowercase.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Capitalizes every alphabetic run, so `"hello world"` becomes `"Hello World"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_start = false;
        } else {
            out.push(c);
            at_start = true;
        }
    }
    out
}

/// Keeps alphabetic words of at least three characters, capitalized.
/// This is the shape both word services are normalized to.
pub fn normalize_supplied<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter(|w| is_alphabetic(w.as_ref()) && char_len(w.as_ref()) >= MIN_WORD_LEN)
        .map(|w| capitalize(w.as_ref()))
        .collect()
}
