use coachdash_shared::mealplan::Category;
use serde::Serialize;
use serde_json::{Map, Value};
use strum::VariantArray;

use crate::{BaseGrams, Categories, CategoryProjector, FoodItem};

/// One meal or snack instance, e.g. "Breakfast 2".
///
/// `items` is a cache of `CategoryProjector::project(&categories)`. Fields are
/// private so every change to a category goes through a method that
/// re-derives it.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Section {
    title: String,
    categories: Categories,
    items: Vec<FoodItem>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self::from_categories(title, Categories::default())
    }

    /// Placeholders are added to empty buckets before `items` is derived.
    pub fn from_categories(title: impl Into<String>, mut categories: Categories) -> Self {
        categories.fill_placeholders();
        let items = CategoryProjector::project(&categories);

        Self {
            title: title.into(),
            categories,
            items,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    /// Items that survive submission filtering.
    pub fn valid_items(&self) -> impl Iterator<Item = &FoodItem> {
        self.items.iter().filter(|i| i.is_valid())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Appends an empty input row to `category`.
    pub fn add_item(&mut self, category: Category) {
        self.update_category(category, |items| items.push(FoodItem::placeholder()));
    }

    /// Removing the only row of a category leaves an empty row behind.
    pub fn remove_item(&mut self, category: Category, index: usize) -> coachdash_shared::Result<FoodItem> {
        let len = self.categories.get(category).len();
        if index >= len {
            coachdash_shared::out_of_range!("item", index, len);
        }

        Ok(self.update_category(category, |items| items.remove(index)))
    }

    pub fn set_item_name(
        &mut self,
        category: Category,
        index: usize,
        name: impl Into<String>,
    ) -> coachdash_shared::Result<()> {
        let name = name.into();
        self.update_item(category, index, |item| item.name = name)
    }

    pub fn set_item_base_grams(
        &mut self,
        category: Category,
        index: usize,
        base_grams: BaseGrams,
    ) -> coachdash_shared::Result<()> {
        self.update_item(category, index, |item| item.base_grams = base_grams)
    }

    fn update_item(
        &mut self,
        category: Category,
        index: usize,
        f: impl FnOnce(&mut FoodItem),
    ) -> coachdash_shared::Result<()> {
        let len = self.categories.get(category).len();
        if index >= len {
            coachdash_shared::out_of_range!("item", index, len);
        }

        self.update_category(category, |items| f(&mut items[index]));

        Ok(())
    }

    /// Runs `f` on one bucket, then restores the placeholder rule and `items`.
    pub(crate) fn update_category<R>(
        &mut self,
        category: Category,
        f: impl FnOnce(&mut Vec<FoodItem>) -> R,
    ) -> R {
        let result = f(self.categories.get_mut(category));
        self.categories.fill_placeholders();
        self.items = CategoryProjector::project(&self.categories);

        result
    }

    /// Runs `f` on every item of every bucket, then re-derives `items`.
    pub(crate) fn update_all_items(&mut self, mut f: impl FnMut(&mut FoodItem)) {
        for bucket in self.categories.iter_mut() {
            bucket.iter_mut().for_each(&mut f);
        }
        self.items = CategoryProjector::project(&self.categories);
    }
}

/// Turns any stored, AI-generated or edited section object into a [`Section`].
///
/// Shapes are tried in priority order: canonical `categories` record, AI
/// top-level category arrays, then a flat legacy `items` list. Malformed
/// input degrades to placeholders, this never fails.
pub struct SectionNormalizer;

impl SectionNormalizer {
    /// `fallback_title` is used when the raw title is missing or blank.
    pub fn normalize(raw: &Value, fallback_title: &str) -> Section {
        Self::normalize_with(raw, fallback_title, BaseGrams::Blank)
    }

    /// Like [`SectionNormalizer::normalize`], with `bare_grams` as the amount
    /// given to legacy items stored as bare strings.
    pub fn normalize_with(raw: &Value, fallback_title: &str, bare_grams: BaseGrams) -> Section {
        let Some(object) = raw.as_object() else {
            tracing::debug!(fallback_title, "section is not an object, using an empty one");
            return Section::new(fallback_title);
        };

        let categories = if let Some(Value::Object(categories)) = object.get("categories") {
            Categories::from_fn(|category| {
                bucket(categories, category, |item| FoodItem::from_raw(item, bare_grams))
            })
        } else if has_ai_categories(object) {
            Categories::from_fn(|category| bucket(object, category, FoodItem::from_ai))
        } else {
            let items = match object.get("items") {
                Some(Value::Array(items)) => items
                    .iter()
                    .map(|item| FoodItem::from_raw(item, bare_grams))
                    .collect(),
                _ => Vec::new(),
            };
            tracing::debug!(
                fallback_title,
                items = items.len(),
                "section has no category information, placing items under protein"
            );

            CategoryProjector::unproject(items)
        };

        let title = match object.get("title") {
            Some(Value::String(title)) if !title.trim().is_empty() => title.to_owned(),
            _ => fallback_title.to_owned(),
        };

        Section::from_categories(title, categories)
    }
}

fn has_ai_categories(object: &Map<String, Value>) -> bool {
    Category::VARIANTS
        .iter()
        .any(|c| object.contains_key(c.key()))
}

fn bucket(
    source: &Map<String, Value>,
    category: Category,
    read: impl Fn(&Value) -> FoodItem,
) -> Vec<FoodItem> {
    match source.get(category.key()) {
        Some(Value::Array(items)) if !items.is_empty() => items.iter().map(read).collect(),
        _ => vec![FoodItem::placeholder()],
    }
}
