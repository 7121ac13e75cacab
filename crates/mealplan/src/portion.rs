use coachdash_shared::Metadata;
use serde::{Deserialize, Serialize};

use crate::{AssignableSection, AssignableTemplate, FoodItem, Section, Template};

/// Per-user multiplier applied to `baseGrams`. Computed elsewhere from
/// biometric data; only finite, non-negative values are accepted.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct PortionScale(f64);

impl PortionScale {
    pub const IDENTITY: PortionScale = PortionScale(1.0);

    pub fn new(value: f64) -> coachdash_shared::Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(coachdash_shared::Error::InvalidPortionScale(value));
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for PortionScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<f64> for PortionScale {
    type Error = coachdash_shared::Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PortionScale> for f64 {
    fn from(value: PortionScale) -> Self {
        value.0
    }
}

/// Anything holding food items whose portions can be resolved.
pub trait Portionable {
    /// Runs `f` on every item and keeps derived item lists in sync.
    fn update_items(&mut self, f: &mut dyn FnMut(&mut FoodItem));
}

impl Portionable for Section {
    fn update_items(&mut self, f: &mut dyn FnMut(&mut FoodItem)) {
        self.update_all_items(f);
    }
}

impl Portionable for Template {
    fn update_items(&mut self, f: &mut dyn FnMut(&mut FoodItem)) {
        for section in self.iter_mut() {
            section.update_all_items(&mut *f);
        }
    }
}

impl Portionable for AssignableSection {
    fn update_items(&mut self, f: &mut dyn FnMut(&mut FoodItem)) {
        for bucket in self.categories.iter_mut() {
            bucket.iter_mut().for_each(&mut *f);
        }
        self.rederive();
    }
}

impl Portionable for AssignableTemplate {
    fn update_items(&mut self, f: &mut dyn FnMut(&mut FoodItem)) {
        for section in self.iter_mut() {
            section.update_items(f);
        }
    }
}

/// Recomputes `grams` on every item of a template or an assigned plan.
/// Previously stored `grams` are overwritten, never read.
pub struct PortionProjector;

impl PortionProjector {
    pub fn project<T: Portionable + Clone>(value: &T, scale: PortionScale) -> T {
        let mut value = value.clone();
        Self::apply(&mut value, scale);

        value
    }

    /// In-place variant, to be re-run after every structural edit.
    pub fn apply<T: Portionable + ?Sized>(value: &mut T, scale: PortionScale) {
        value.update_items(&mut |item| item.grams = Some(item.scaled_grams(scale.value())));
    }
}

/// A cleaned template assigned to one user, with portions resolved for
/// their scale.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignedPlan {
    pub user_id: String,
    pub plan: AssignableTemplate,
    pub portion_scale: PortionScale,
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl AssignedPlan {
    pub fn new(
        user_id: impl Into<String>,
        template: &AssignableTemplate,
        portion_scale: PortionScale,
        metadata: Metadata,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            plan: PortionProjector::project(template, portion_scale),
            portion_scale,
            metadata,
        }
    }
}
