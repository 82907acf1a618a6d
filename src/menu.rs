//! Menu

use std::{fmt, str::FromStr};

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

/// Stable identifier of a menu item, e.g. `coffee-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new item id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Unrecognised category slug.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown menu category: {0}")]
pub struct UnknownCategory(pub String);

/// Menu category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Category {
    /// Handcrafted coffees
    Coffee,

    /// Teas and tisanes
    Tea,

    /// Cakes, pies and ice cream
    Desserts,

    /// Snacks and small plates
    LightBites,

    /// Full meals
    MainCourse,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Category; 5] = [
        Category::Coffee,
        Category::Tea,
        Category::Desserts,
        Category::LightBites,
        Category::MainCourse,
    ];

    /// URL slug, also the name of the category's data file.
    pub fn slug(self) -> &'static str {
        match self {
            Category::Coffee => "coffee",
            Category::Tea => "tea",
            Category::Desserts => "desserts",
            Category::LightBites => "light-bites",
            Category::MainCourse => "main-course",
        }
    }

    /// Display title
    pub fn title(self) -> &'static str {
        match self {
            Category::Coffee => "Coffee",
            Category::Tea => "Tea",
            Category::Desserts => "Desserts",
            Category::LightBites => "Light Bites",
            Category::MainCourse => "Main Course",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.slug() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A purchasable menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem<'a> {
    /// Item id
    pub id: ItemId,

    /// Item name
    pub name: String,

    /// Short description shown under the name
    pub description: String,

    /// Unit price
    pub price: Money<'a, Currency>,

    /// Category the item is listed under
    pub category: Category,

    /// Path of the item's picture, if it has one
    pub image: Option<String>,
}
