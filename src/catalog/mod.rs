//! Catalog
//!
//! The static, read-only menu. Each [`Category`] is described by a YAML data
//! file named after its slug (`menu/coffee.yml`, `menu/light-bites.yml`, ...).
//! The files shipped with the crate are embedded at compile time; a directory
//! of replacement files can be loaded instead.

use std::{fs, path::Path};

use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::menu::{Category, ItemId, MenuItem, UnknownCategory};

pub mod items;

const EMBEDDED_MENU: [(Category, &str); 5] = [
    (Category::Coffee, include_str!("../../menu/coffee.yml")),
    (Category::Tea, include_str!("../../menu/tea.yml")),
    (Category::Desserts, include_str!("../../menu/desserts.yml")),
    (Category::LightBites, include_str!("../../menu/light-bites.yml")),
    (Category::MainCourse, include_str!("../../menu/main-course.yml")),
];

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a data file
    #[error("Failed to read menu file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// The file names a category that doesn't exist
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    /// The file was loaded for one category but declares another
    #[error("Expected category {expected}, file declares {found}")]
    CategoryMismatch {
        /// Category the file was loaded for
        expected: Category,
        /// Category declared inside the file
        found: Category,
    },

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between items
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Two items share an id
    #[error("Duplicate menu item id: {0}")]
    DuplicateItem(ItemId),

    /// Item not found
    #[error("Menu item not found: {0}")]
    ItemNotFound(ItemId),

    /// No items loaded yet
    #[error("No menu items loaded yet; currency unknown")]
    NoCurrency,
}

/// Catalog
#[derive(Debug, Default)]
pub struct Catalog<'a> {
    /// Items in load order
    items: Vec<MenuItem<'a>>,

    /// Item id -> position in `items`
    index: FxHashMap<ItemId, usize>,

    /// Currency shared by every item
    currency: Option<&'static Currency>,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: FxHashMap::default(),
            currency: None,
        }
    }

    /// Load the menu shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded data file is malformed.
    pub fn embedded() -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for (category, contents) in EMBEDDED_MENU {
            catalog.load_category(category, contents)?;
        }

        Ok(catalog)
    }

    /// Load every category from `<dir>/<slug>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is missing, cannot be parsed, or disagrees
    /// with the rest of the menu on currency or item ids.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let mut catalog = Self::new();

        for category in Category::ALL {
            let path = dir.join(format!("{}.yml", category.slug()));
            let contents = fs::read_to_string(&path)?;

            catalog.load_category(category, &contents)?;
        }

        Ok(catalog)
    }

    /// Parse one category's data file and append its items.
    ///
    /// Nothing is added unless the whole file is valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, declares a different
    /// category, contains an invalid price, mixes currencies or repeats an id.
    pub fn load_category(
        &mut self,
        category: Category,
        contents: &str,
    ) -> Result<&mut Self, CatalogError> {
        let file: items::CategoryFile = serde_norway::from_str(contents)?;
        let declared: Category = file.category.parse()?;

        if declared != category {
            return Err(CatalogError::CategoryMismatch {
                expected: category,
                found: declared,
            });
        }

        // A bad file leaves the catalog untouched.
        let mut currency = self.currency;
        let mut seen = FxHashSet::default();
        let mut loaded = Vec::with_capacity(file.items.len());

        for item_file in file.items {
            let item = item_file.into_menu_item(category)?;
            let item_currency = item.price.currency();

            match currency {
                Some(existing) if existing != item_currency => {
                    return Err(CatalogError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        item_currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => currency = Some(item_currency),
            }

            if self.index.contains_key(&item.id) || !seen.insert(item.id.clone()) {
                return Err(CatalogError::DuplicateItem(item.id));
            }

            loaded.push(item);
        }

        self.currency = currency;

        for item in loaded {
            self.index.insert(item.id.clone(), self.items.len());
            self.items.push(item);
        }

        debug!(category = category.slug(), total = self.items.len(), "loaded menu category");

        Ok(self)
    }

    /// Look up an item by id
    pub fn item(&self, id: &ItemId) -> Option<&MenuItem<'a>> {
        self.index.get(id).and_then(|&idx| self.items.get(idx))
    }

    /// Look up an item by id
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ItemNotFound`] if no item has this id.
    pub fn get(&self, id: &ItemId) -> Result<&MenuItem<'a>, CatalogError> {
        self.item(id)
            .ok_or_else(|| CatalogError::ItemNotFound(id.clone()))
    }

    /// Items listed under `category`, in display order
    pub fn category(&self, category: Category) -> impl Iterator<Item = &MenuItem<'a>> {
        self.items
            .iter()
            .filter(move |item| item.category == category)
    }

    /// All items
    pub fn items(&self) -> &[MenuItem<'a>] {
        &self.items
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing has been loaded
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency every item is priced in
    ///
    /// # Errors
    ///
    /// Returns an error if no items have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, CatalogError> {
        self.currency.ok_or(CatalogError::NoCurrency)
    }
}
