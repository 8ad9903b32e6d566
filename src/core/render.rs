use crate::domain::model::{DateMenu, MealKind};
use chrono::Timelike;

/// Meal being served at `hour` (0-23). Late evening shows breakfast.
pub fn current_meal(hour: u32) -> MealKind {
    match hour {
        0..=9 => MealKind::Breakfast,
        10..=14 => MealKind::Lunch,
        15..=19 => MealKind::Dinner,
        _ => MealKind::Breakfast,
    }
}

pub fn current_meal_now() -> MealKind {
    current_meal(chrono::Local::now().hour())
}

/// One `name\nmenu\n\n` block per restaurant serving `meal`, in menu order.
/// Blank and closed meals are left out.
pub fn menu_text(menu: &DateMenu, meal: MealKind) -> String {
    let mut text = String::new();
    for entry in menu.iter().filter(|entry| entry.has_menu(meal)) {
        text.push_str(&entry.name);
        text.push('\n');
        text.push_str(entry.meals.get(meal));
        text.push_str("\n\n");
    }
    text
}
