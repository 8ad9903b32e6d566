//! Column extraction for the menu tables served by both sources.
//!
//! Every restaurant row carries cells classed `title`, `breakfast`, `lunch`
//! and `dinner`. The table header uses the same classes, so each column
//! starts with a header cell that callers must drop.

use crate::domain::model::ExtractedPage;
use crate::domain::ports::Extractor;
use crate::utils::error::Result;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| selector(".title"));
static BREAKFAST_SEL: LazyLock<Selector> = LazyLock::new(|| selector(".breakfast"));
static LUNCH_SEL: LazyLock<Selector> = LazyLock::new(|| selector(".lunch"));
static DINNER_SEL: LazyLock<Selector> = LazyLock::new(|| selector(".dinner"));

// Class selectors are literals; parsing them cannot fail.
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperExtractor;

impl ScraperExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for ScraperExtractor {
    fn extract(&self, raw_page: &str) -> Result<ExtractedPage> {
        let document = Html::parse_document(raw_page);

        let page = ExtractedPage {
            titles: column(&document, &TITLE_SEL),
            breakfasts: column(&document, &BREAKFAST_SEL),
            lunches: column(&document, &LUNCH_SEL),
            dinners: column(&document, &DINNER_SEL),
        };

        tracing::debug!("extracted {} title cells", page.titles.len());
        Ok(page)
    }
}

fn column(document: &Html, sel: &Selector) -> Vec<String> {
    document.select(sel).map(cell_text).collect()
}

/// Text of a cell with each text node trimmed; `<br>`-separated lines stay
/// on their own lines.
fn cell_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body><table>
  <tr><th class="title">식당</th><th class="breakfast">아침</th><th class="lunch">점심</th><th class="dinner">저녁</th></tr>
  <tr>
    <td class="title"> 학생회관식당 (880-5543) </td>
    <td class="breakfast"></td>
    <td class="lunch">제육볶음<br>미역국</td>
    <td class="dinner">휴점</td>
  </tr>
</table></body></html>
"#;

    #[test]
    fn test_extract_keeps_header_row() {
        let page = ScraperExtractor::new().extract(PAGE).unwrap();

        assert_eq!(page.titles, vec!["식당", "학생회관식당 (880-5543)"]);
        assert_eq!(page.breakfasts, vec!["아침", ""]);
        assert_eq!(page.lunches, vec!["점심", "제육볶음\n미역국"]);
        assert_eq!(page.dinners, vec!["저녁", "휴점"]);
    }

    #[test]
    fn test_page_without_table_yields_empty_columns() {
        let page = ScraperExtractor::new()
            .extract("<html><body><p>점검 중</p></body></html>")
            .unwrap();
        assert_eq!(page, ExtractedPage::default());
    }
}
