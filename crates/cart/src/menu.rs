//! Bundled menu and the menu page model.
//!
//! Prices and names come from this catalog, never from user input. The
//! [`MenuPage`] tracks what the customer has dialled in for each item (the
//! quantity spinner and temperature choice) and turns it into an
//! [`add_item`](crate::CartStore::add_item) call.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use cafe_cart_core::{LineItemId, Price, Quantity};
use serde::Serialize;
use tracing::instrument;

use crate::error::{CartError, Result};
use crate::line_item::NewLineItem;
use crate::storage::CartStorage;
use crate::store::CartStore;

/// Temperature choices offered on coffee drinks.
pub const TEMPERATURES: &[&str] = &["Hot", "Iced"];

/// Menu section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Coffee,
    Tea,
    Pastry,
    Meal,
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Coffee, Self::Tea, Self::Pastry, Self::Meal];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Coffee => "coffee",
            Self::Tea => "tea",
            Self::Pastry => "pastry",
            Self::Meal => "meal",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Coffee => "Coffee",
            Self::Tea => "Tea",
            Self::Pastry => "Pastries",
            Self::Meal => "Meals",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category filter button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether `category` is shown under this filter.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Category::ALL
            .into_iter()
            .find(|category| category.key().eq_ignore_ascii_case(s))
            .map(Self::Only)
            .ok_or_else(|| format!("invalid category: {s} (expected all, coffee, tea, pastry or meal)"))
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub slug: &'static str,
    pub name: &'static str,
    pub price: Price,
    pub image: &'static str,
    pub category: Category,
    /// Variant choices; the first is preselected.
    pub variants: &'static [&'static str],
}

impl MenuItem {
    /// Variant preselected on the page, if the item has any.
    #[must_use]
    pub fn default_variant(&self) -> Option<&'static str> {
        self.variants.first().copied()
    }

    fn offers(&self, variant: &str) -> Option<&'static str> {
        self.variants
            .iter()
            .copied()
            .find(|v| v.eq_ignore_ascii_case(variant))
    }
}

const fn coffee(slug: &'static str, name: &'static str, cents: i64, image: &'static str) -> MenuItem {
    MenuItem {
        slug,
        name,
        price: Price::from_cents(cents),
        image,
        category: Category::Coffee,
        variants: TEMPERATURES,
    }
}

const fn plain(
    slug: &'static str,
    name: &'static str,
    cents: i64,
    image: &'static str,
    category: Category,
) -> MenuItem {
    MenuItem {
        slug,
        name,
        price: Price::from_cents(cents),
        image,
        category,
        variants: &[],
    }
}

static BUNDLED: [MenuItem; 13] = [
    coffee("americano", "Americano", 300, "images/americano.jpg"),
    coffee("latte", "Cafe Latte", 350, "images/latte.jpg"),
    coffee("cappuccino", "Cappuccino", 375, "images/cappuccino.jpg"),
    coffee("spanish-latte", "Spanish Latte", 400, "images/spanish-latte.jpg"),
    coffee("caramel-macchiato", "Caramel Macchiato", 425, "images/caramel-macchiato.jpg"),
    MenuItem {
        slug: "matcha-latte",
        name: "Matcha Latte",
        price: Price::from_cents(400),
        image: "images/matcha-latte.jpg",
        category: Category::Tea,
        variants: TEMPERATURES,
    },
    plain("calamansi-tea", "Calamansi Honey Tea", 275, "images/calamansi-tea.jpg", Category::Tea),
    plain("croissant", "Butter Croissant", 275, "images/croissant.jpg", Category::Pastry),
    plain("ensaymada", "Ensaymada", 250, "images/ensaymada.jpg", Category::Pastry),
    plain("ube-pandesal", "Ube Cheese Pandesal", 300, "images/ube-pandesal.jpg", Category::Pastry),
    plain("tapsilog", "Tapsilog", 650, "images/tapsilog.jpg", Category::Meal),
    plain("adobo-rice", "Chicken Adobo Rice", 600, "images/adobo-rice.jpg", Category::Meal),
    plain("clubhouse", "Clubhouse Sandwich", 550, "images/clubhouse.jpg", Category::Meal),
];

/// A catalog of menu items.
#[derive(Debug, Clone, Copy)]
pub struct Menu {
    items: &'static [MenuItem],
}

impl Menu {
    /// The menu shipped with the site.
    #[must_use]
    pub fn bundled() -> Self {
        Self { items: &BUNDLED }
    }

    /// All items in catalog order.
    #[must_use]
    pub const fn items(&self) -> &'static [MenuItem] {
        self.items
    }

    /// Items shown under `filter`, in catalog order.
    pub fn filter(&self, filter: CategoryFilter) -> impl Iterator<Item = &'static MenuItem> + use<> {
        self.items
            .iter()
            .filter(move |item| filter.matches(item.category))
    }

    /// Look up an item by slug.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<&'static MenuItem> {
        self.items.iter().find(|item| item.slug == slug)
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::bundled()
    }
}

/// Quantity spinner next to each menu item.
///
/// Starts at one and never goes below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuantitySelector {
    value: Quantity,
}

impl QuantitySelector {
    #[must_use]
    pub const fn value(self) -> Quantity {
        self.value
    }

    pub const fn increment(&mut self) {
        self.value = self.value.increment();
    }

    pub fn decrement(&mut self) {
        if let Some(lower) = self.value.decrement() {
            self.value = lower;
        }
    }

    pub const fn set(&mut self, value: Quantity) {
        self.value = value;
    }

    pub const fn reset(&mut self) {
        self.value = Quantity::ONE;
    }
}

#[derive(Debug, Clone, Default)]
struct Selection {
    quantity: QuantitySelector,
    variant: Option<&'static str>,
}

/// Per-item input state of the menu page.
#[derive(Debug, Clone, Default)]
pub struct MenuPage {
    menu: Menu,
    filter: CategoryFilter,
    selections: HashMap<&'static str, Selection>,
}

impl MenuPage {
    #[must_use]
    pub fn new(menu: Menu) -> Self {
        Self {
            menu,
            filter: CategoryFilter::All,
            selections: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Currently active category filter.
    #[must_use]
    pub const fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub const fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// Items visible under the active filter.
    pub fn visible_items(&self) -> impl Iterator<Item = &'static MenuItem> + use<> {
        self.menu.filter(self.filter)
    }

    /// Quantity currently dialled in for `slug`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownMenuItem` if `slug` is not on the menu.
    pub fn quantity(&self, slug: &str) -> Result<Quantity> {
        let item = self.lookup(slug)?;
        Ok(self
            .selections
            .get(item.slug)
            .map_or(Quantity::ONE, |s| s.quantity.value()))
    }

    /// Bump the spinner for `slug`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownMenuItem` if `slug` is not on the menu.
    pub fn increment(&mut self, slug: &str) -> Result<Quantity> {
        let selection = self.selection_mut(slug)?;
        selection.quantity.increment();
        Ok(selection.quantity.value())
    }

    /// Lower the spinner for `slug`, stopping at one.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownMenuItem` if `slug` is not on the menu.
    pub fn decrement(&mut self, slug: &str) -> Result<Quantity> {
        let selection = self.selection_mut(slug)?;
        selection.quantity.decrement();
        Ok(selection.quantity.value())
    }

    /// Set the spinner for `slug` directly.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownMenuItem` if `slug` is not on the menu.
    pub fn set_quantity(&mut self, slug: &str, quantity: Quantity) -> Result<()> {
        self.selection_mut(slug)?.quantity.set(quantity);
        Ok(())
    }

    /// Choose a variant for `slug`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownMenuItem` for an unknown slug and
    /// `CartError::UnknownVariant` if the item does not offer `variant`.
    pub fn select_variant(&mut self, slug: &str, variant: &str) -> Result<()> {
        let item = self.lookup(slug)?;
        let chosen = item.offers(variant).ok_or_else(|| CartError::UnknownVariant {
            item: item.slug.to_string(),
            variant: variant.to_string(),
        })?;
        self.selection_mut(slug)?.variant = Some(chosen);
        Ok(())
    }

    /// Variant that would be added for `slug`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownMenuItem` if `slug` is not on the menu.
    pub fn variant(&self, slug: &str) -> Result<Option<&'static str>> {
        let item = self.lookup(slug)?;
        Ok(self
            .selections
            .get(item.slug)
            .and_then(|s| s.variant)
            .or_else(|| item.default_variant()))
    }

    /// Add the dialled-in quantity and variant of `slug` to the cart, then
    /// reset the spinner to one.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownMenuItem` for an unknown slug, or any
    /// error from [`CartStore::add_item`].
    #[instrument(skip(self, store))]
    pub fn add_to_cart<S: CartStorage>(
        &mut self,
        slug: &str,
        store: &mut CartStore<S>,
    ) -> Result<LineItemId> {
        let item = self.lookup(slug)?;
        let quantity = self.quantity(slug)?;
        let variant = self.variant(slug)?;

        let mut request =
            NewLineItem::new(item.name, item.price, item.image).with_quantity(quantity);
        if let Some(variant) = variant {
            request = request.with_variant(variant);
        }

        let id = store.add_item(request)?;
        self.selection_mut(slug)?.quantity.reset();
        Ok(id)
    }

    fn lookup(&self, slug: &str) -> Result<&'static MenuItem> {
        self.menu
            .find(slug)
            .ok_or_else(|| CartError::UnknownMenuItem(slug.to_string()))
    }

    fn selection_mut(&mut self, slug: &str) -> Result<&mut Selection> {
        let item = self.lookup(slug)?;
        Ok(self.selections.entry(item.slug).or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_bundled_slugs_are_unique() {
        let menu = Menu::bundled();
        for item in menu.items() {
            assert_eq!(
                menu.items().iter().filter(|i| i.slug == item.slug).count(),
                1,
                "duplicate slug {}",
                item.slug
            );
        }
    }

    #[test]
    fn test_filter_by_category() {
        let menu = Menu::bundled();
        assert_eq!(menu.filter(CategoryFilter::All).count(), menu.items().len());

        let pastries: Vec<_> = menu
            .filter(CategoryFilter::Only(Category::Pastry))
            .map(|i| i.slug)
            .collect();
        assert_eq!(pastries, ["croissant", "ensaymada", "ube-pandesal"]);
    }

    #[test]
    fn test_category_filter_from_str() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Coffee".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Coffee)
        );
        assert!("dessert".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_quantity_selector_floors_at_one() {
        let mut selector = QuantitySelector::default();
        selector.decrement();
        assert_eq!(selector.value(), Quantity::ONE);

        selector.increment();
        selector.increment();
        assert_eq!(selector.value().get(), 3);

        selector.reset();
        assert_eq!(selector.value(), Quantity::ONE);
    }

    #[test]
    fn test_add_to_cart_uses_selection_and_resets_spinner() {
        let mut page = MenuPage::new(Menu::bundled());
        let mut store = CartStore::open(MemoryStorage::new(), "cart");

        page.increment("latte").unwrap();
        page.select_variant("latte", "iced").unwrap();
        page.add_to_cart("latte", &mut store).unwrap();

        let line = store.items().first().unwrap();
        assert_eq!(line.name, "Cafe Latte (Iced)");
        assert_eq!(line.quantity.get(), 2);
        assert_eq!(page.quantity("latte").unwrap(), Quantity::ONE);
        assert_eq!(page.variant("latte").unwrap(), Some("Iced"));
    }

    #[test]
    fn test_add_to_cart_defaults() {
        let mut page = MenuPage::new(Menu::bundled());
        let mut store = CartStore::open(MemoryStorage::new(), "cart");

        page.add_to_cart("americano", &mut store).unwrap();
        page.add_to_cart("croissant", &mut store).unwrap();

        let names: Vec<_> = store.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Americano (Hot)", "Butter Croissant"]);
    }

    #[test]
    fn test_unknown_slug_and_variant() {
        let mut page = MenuPage::new(Menu::bundled());
        let mut store = CartStore::open(MemoryStorage::new(), "cart");

        assert!(matches!(
            page.add_to_cart("espresso-tonic", &mut store),
            Err(CartError::UnknownMenuItem(_))
        ));
        assert!(matches!(
            page.select_variant("croissant", "Iced"),
            Err(CartError::UnknownVariant { .. })
        ));
        assert!(store.is_empty());
    }
}
