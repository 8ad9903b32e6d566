use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Substring a source puts in a meal cell when the restaurant is closed.
pub const CLOSED_MARKER: &str = "휴점";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum MealKind {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealKind::Breakfast => "breakfast",
            MealKind::Lunch => "lunch",
            MealKind::Dinner => "dinner",
        }
    }

    pub fn korean_label(&self) -> &'static str {
        match self {
            MealKind::Breakfast => "아침",
            MealKind::Lunch => "점심",
            MealKind::Dinner => "저녁",
        }
    }
}

impl fmt::Display for MealKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meals {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

impl Meals {
    pub fn get(&self, kind: MealKind) -> &str {
        match kind {
            MealKind::Breakfast => &self.breakfast,
            MealKind::Lunch => &self.lunch,
            MealKind::Dinner => &self.dinner,
        }
    }
}

/// One restaurant's menu for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub name: String,
    pub favorite: bool,
    pub meals: Meals,
}

impl MenuEntry {
    /// False when the meal text is blank or carries the closed marker.
    pub fn has_menu(&self, kind: MealKind) -> bool {
        let text = self.meals.get(kind);
        !text.trim().is_empty() && !text.contains(CLOSED_MARKER)
    }
}

/// All restaurants for one calendar date, keyed by name.
///
/// Favorites iterate first in the order they were inserted, then the rest
/// in first-seen order. Re-inserting an existing name replaces the entry in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateMenu {
    favorites: Vec<MenuEntry>,
    others: Vec<MenuEntry>,
}

impl DateMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: MenuEntry) {
        let (section, opposite) = if entry.favorite {
            (&mut self.favorites, &mut self.others)
        } else {
            (&mut self.others, &mut self.favorites)
        };

        opposite.retain(|existing| existing.name != entry.name);

        match section.iter_mut().find(|existing| existing.name == entry.name) {
            Some(slot) => *slot = entry,
            None => section.push(entry),
        }
    }

    /// Key union with `other`; entries from `other` win on name collisions.
    pub fn merge(&mut self, other: DateMenu) {
        for entry in other {
            self.insert(entry);
        }
    }

    pub fn get(&self, name: &str) -> Option<&MenuEntry> {
        self.iter().find(|entry| entry.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuEntry> {
        self.favorites.iter().chain(self.others.iter())
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|entry| entry.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.favorites.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IntoIterator for DateMenu {
    type Item = MenuEntry;
    type IntoIter = std::iter::Chain<std::vec::IntoIter<MenuEntry>, std::vec::IntoIter<MenuEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.favorites.into_iter().chain(self.others)
    }
}

impl Serialize for DateMenu {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Aligned columns pulled out of one raw menu page, header row included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    pub titles: Vec<String>,
    pub breakfasts: Vec<String>,
    pub lunches: Vec<String>,
    pub dinners: Vec<String>,
}
