//! Shopping list aggregation over the recipes in a user's cart.
//!
//! Cart recipes often share ingredients. Lines are keyed by ingredient
//! identity and their amounts summed, so two recipes needing 2 and 3 units
//! of the same flour produce one line of 5.

use std::collections::BTreeMap;

use super::IngredientId;

/// Heading written before the ingredient lines.
pub const SHOPPING_LIST_HEADER: &str = "Foodgram\nShopping list:\n";

/// One ingredient line of one recipe in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListRow {
    pub ingredient_id: IngredientId,
    pub name: String,
    pub unit: String,
    pub amount: i16,
}

/// Summed amount for one ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListLine {
    pub name: String,
    pub unit: String,
    pub amount: u64,
}

/// Aggregated shopping list, ordered by name, then unit, then ingredient id.
///
/// # Examples
/// ```
/// use foodgram::domain::{IngredientId, ShoppingList, ShoppingListRow};
///
/// let flour = IngredientId::new(1).expect("valid id");
/// let rows = [2, 3].map(|amount| ShoppingListRow {
///     ingredient_id: flour,
///     name: "flour".to_owned(),
///     unit: "g".to_owned(),
///     amount,
/// });
/// let list = ShoppingList::aggregate(rows);
/// assert_eq!(list.render(), "Foodgram\nShopping list:\nflour, 5 g\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    lines: Vec<ShoppingListLine>,
}

impl ShoppingList {
    /// Group rows by ingredient and sum their amounts.
    pub fn aggregate(rows: impl IntoIterator<Item = ShoppingListRow>) -> Self {
        let mut grouped: BTreeMap<(String, String, IngredientId), u64> = BTreeMap::new();
        for row in rows {
            // Amounts are validated positive on write.
            let amount = u64::try_from(row.amount).unwrap_or(0);
            let total = grouped
                .entry((row.name, row.unit, row.ingredient_id))
                .or_insert(0);
            *total = total.saturating_add(amount);
        }
        let lines = grouped
            .into_iter()
            .map(|((name, unit, _), amount)| ShoppingListLine { name, unit, amount })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[ShoppingListLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Plain-text rendering served as the cart download.
    pub fn render(&self) -> String {
        let body: String = self
            .lines
            .iter()
            .map(|line| format!("{}, {} {}\n", line.name, line.amount, line.unit))
            .collect();
        format!("{SHOPPING_LIST_HEADER}{body}")
    }
}
