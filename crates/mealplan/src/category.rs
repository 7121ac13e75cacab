use coachdash_shared::mealplan::Category;
use serde::Serialize;
use strum::VariantArray;

use crate::FoodItem;

/// Fixed-key category record of a section. Every key is always present.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Categories {
    pub protein: Vec<FoodItem>,
    pub carbs: Vec<FoodItem>,
    pub fats: Vec<FoodItem>,
    pub meat: Vec<FoodItem>,
    pub chicken: Vec<FoodItem>,
    pub fish: Vec<FoodItem>,
}

impl Default for Categories {
    fn default() -> Self {
        Self::from_fn(|_| vec![FoodItem::placeholder()])
    }
}

impl Categories {
    /// Builds every bucket from `f`, in the fixed category order.
    pub fn from_fn(mut f: impl FnMut(Category) -> Vec<FoodItem>) -> Self {
        Self {
            protein: f(Category::Protein),
            carbs: f(Category::Carbs),
            fats: f(Category::Fats),
            meat: f(Category::Meat),
            chicken: f(Category::Chicken),
            fish: f(Category::Fish),
        }
    }

    pub fn get(&self, category: Category) -> &Vec<FoodItem> {
        match category {
            Category::Protein => &self.protein,
            Category::Carbs => &self.carbs,
            Category::Fats => &self.fats,
            Category::Meat => &self.meat,
            Category::Chicken => &self.chicken,
            Category::Fish => &self.fish,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut Vec<FoodItem> {
        match category {
            Category::Protein => &mut self.protein,
            Category::Carbs => &mut self.carbs,
            Category::Fats => &mut self.fats,
            Category::Meat => &mut self.meat,
            Category::Chicken => &mut self.chicken,
            Category::Fish => &mut self.fish,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &Vec<FoodItem>)> {
        Category::VARIANTS.iter().map(|c| (*c, self.get(*c)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Vec<FoodItem>> {
        [
            &mut self.protein,
            &mut self.carbs,
            &mut self.fats,
            &mut self.meat,
            &mut self.chicken,
            &mut self.fish,
        ]
        .into_iter()
    }

    /// Puts an empty input row into every bucket that has none.
    pub fn fill_placeholders(&mut self) {
        for items in self.iter_mut() {
            if items.is_empty() {
                items.push(FoodItem::placeholder());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Maps a category record to and from the flat item list.
pub struct CategoryProjector;

impl CategoryProjector {
    /// Concatenates the six buckets in the fixed category order.
    pub fn project(categories: &Categories) -> Vec<FoodItem> {
        let mut items = Vec::with_capacity(categories.len());
        for (_, bucket) in categories.iter() {
            items.extend(bucket.iter().cloned());
        }

        items
    }

    /// Lossy fallback for flat legacy data: the source category of a flat item
    /// cannot be recovered, so every item lands in `protein` and the other
    /// buckets get a placeholder.
    pub fn unproject(items: Vec<FoodItem>) -> Categories {
        let mut items = Some(items);
        let mut categories = Categories::from_fn(|category| match category {
            Category::Protein => items.take().unwrap_or_default(),
            _ => Vec::new(),
        });
        categories.fill_placeholders();

        categories
    }
}
