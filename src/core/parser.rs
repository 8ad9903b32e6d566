use crate::domain::model::{DateMenu, ExtractedPage, Meals, MenuEntry};
use crate::domain::ports::Extractor;
use crate::utils::error::{MenuError, Result};

/// Trims a restaurant title and drops one trailing balanced parenthetical
/// such as a phone number: `"301동식당 (889-8955)"` becomes `"301동식당"`.
/// Unbalanced parentheses are left alone.
pub fn normalize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.ends_with(')') {
        return trimmed.to_string();
    }

    let mut depth = 0usize;
    for (idx, ch) in trimmed.char_indices().rev() {
        match ch {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    return trimmed[..idx].trim_end().to_string();
                }
            }
            _ => {}
        }
    }

    trimmed.to_string()
}

fn normalize_all(names: &[String]) -> Vec<String> {
    names.iter().map(|name| normalize_name(name)).collect()
}

pub struct MenuParser<E: Extractor> {
    extractor: E,
}

impl<E: Extractor> MenuParser<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    pub fn parse(&self, raw_page: &str, favorites: &[String], excluded: &[String]) -> Result<DateMenu> {
        let page = self.extractor.extract(raw_page)?;
        build_date_menu(&page, favorites, excluded)
    }
}

/// Turns extracted columns into a `DateMenu`. The first cell of every column
/// is the table header and is always dropped. List entries are normalized
/// the same way as titles before matching.
pub fn build_date_menu(page: &ExtractedPage, favorites: &[String], excluded: &[String]) -> Result<DateMenu> {
    let favorites = normalize_all(favorites);
    let excluded = normalize_all(excluded);
    let mut menu = DateMenu::new();

    for (i, title) in page.titles.iter().enumerate().skip(1) {
        let name = normalize_name(title);

        if name.is_empty() {
            tracing::debug!("skipping row {} with blank title {:?}", i, title);
            continue;
        }

        if excluded.iter().any(|e| *e == name) {
            tracing::debug!("skipping excluded restaurant {}", name);
            continue;
        }

        let meals = Meals {
            breakfast: cell(&page.breakfasts, i, "breakfast")?,
            lunch: cell(&page.lunches, i, "lunch")?,
            dinner: cell(&page.dinners, i, "dinner")?,
        };

        let favorite = favorites.iter().any(|f| *f == name);
        menu.insert(MenuEntry { name, favorite, meals });
    }

    Ok(menu)
}

fn cell(column: &[String], index: usize, column_name: &str) -> Result<String> {
    column
        .get(index)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| MenuError::Extraction {
            message: format!(
                "{} column has {} cells, row {} has a title",
                column_name,
                column.len(),
                index
            ),
        })
}
