use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr, VariantArray};

/// Fixed food buckets of a section. Declaration order is the order in which
/// the flat item list is derived.
#[derive(
    EnumString,
    VariantArray,
    IntoStaticStr,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Protein,
    Carbs,
    Fats,
    Meat,
    Chicken,
    Fish,
}

impl Category {
    /// JSON key of the bucket, e.g. "carbs".
    pub fn key(&self) -> &'static str {
        self.into()
    }
}

/// Meal and snack slots are kept apart even though their sections share a shape.
#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Meal,
    Snack,
}

#[derive(
    EnumString,
    VariantArray,
    IntoStaticStr,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Breakfasts,
    Lunches,
    Dinners,
    Snacks,
}

impl Family {
    pub const MIN_SECTIONS: usize = 1;
    pub const MAX_SECTIONS: usize = 3;

    pub fn key(&self) -> &'static str {
        self.into()
    }

    /// Single-object key used by templates saved before families held several sections.
    pub fn legacy_key(&self) -> Option<&'static str> {
        match self {
            Family::Breakfasts => Some("breakfast"),
            Family::Lunches => Some("lunch"),
            Family::Dinners => Some("dinner"),
            Family::Snacks => None,
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            Family::Snacks => SectionKind::Snack,
            _ => SectionKind::Meal,
        }
    }

    /// Default title for the section at `index` (zero based), e.g. "Lunch 2".
    pub fn label(&self, index: usize) -> String {
        let name = match self {
            Family::Breakfasts => "Breakfast",
            Family::Lunches => "Lunch",
            Family::Dinners => "Dinner",
            Family::Snacks => "Snack",
        };

        format!("{name} {}", index + 1)
    }
}
