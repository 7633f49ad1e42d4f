//! Menu page.

use cafe_cart::{CategoryFilter, Menu};

use super::CommandError;
use crate::render;

/// Print the menu under `filter`.
///
/// # Errors
///
/// Returns `CommandError::Json` if JSON output cannot be produced.
pub fn show(filter: CategoryFilter, json: bool) -> Result<(), CommandError> {
    let menu = Menu::bundled();
    let items: Vec<_> = menu.filter(filter).collect();

    if json {
        render::json(&items)?;
    } else {
        render::menu(&items);
    }
    Ok(())
}
