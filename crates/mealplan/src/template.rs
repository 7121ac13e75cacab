use coachdash_shared::mealplan::Family;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::VariantArray;

use crate::{BaseGrams, Section, SectionNormalizer};

/// Canonical meal-plan template: every family holds between one and three
/// sections.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Template {
    breakfasts: Vec<Section>,
    lunches: Vec<Section>,
    dinners: Vec<Section>,
    snacks: Vec<Section>,
}

impl Default for Template {
    fn default() -> Self {
        Self::new()
    }
}

impl Template {
    /// Empty template with one default section per family.
    pub fn new() -> Self {
        Self {
            breakfasts: vec![Section::new(Family::Breakfasts.label(0))],
            lunches: vec![Section::new(Family::Lunches.label(0))],
            dinners: vec![Section::new(Family::Dinners.label(0))],
            snacks: vec![Section::new(Family::Snacks.label(0))],
        }
    }

    pub fn sections(&self, family: Family) -> &[Section] {
        match family {
            Family::Breakfasts => &self.breakfasts,
            Family::Lunches => &self.lunches,
            Family::Dinners => &self.dinners,
            Family::Snacks => &self.snacks,
        }
    }

    pub(crate) fn sections_mut(&mut self, family: Family) -> &mut Vec<Section> {
        match family {
            Family::Breakfasts => &mut self.breakfasts,
            Family::Lunches => &mut self.lunches,
            Family::Dinners => &mut self.dinners,
            Family::Snacks => &mut self.snacks,
        }
    }

    pub fn section(&self, family: Family, index: usize) -> Option<&Section> {
        self.sections(family).get(index)
    }

    pub fn section_mut(
        &mut self,
        family: Family,
        index: usize,
    ) -> coachdash_shared::Result<&mut Section> {
        let sections = self.sections_mut(family);
        let len = sections.len();

        match sections.get_mut(index) {
            Some(section) => Ok(section),
            None => coachdash_shared::out_of_range!("section", index, len),
        }
    }

    /// Every section with its family and position, breakfasts first.
    pub fn iter(&self) -> impl Iterator<Item = (Family, usize, &Section)> {
        Family::VARIANTS.iter().flat_map(move |family| {
            self.sections(*family)
                .iter()
                .enumerate()
                .map(move |(index, section)| (*family, index, section))
        })
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Section> {
        self.breakfasts
            .iter_mut()
            .chain(self.lunches.iter_mut())
            .chain(self.dinners.iter_mut())
            .chain(self.snacks.iter_mut())
    }

    /// Appends a default section. A family already holding three sections is
    /// left untouched.
    pub fn add_section(&mut self, family: Family) -> coachdash_shared::Result<&mut Section> {
        let sections = self.sections_mut(family);
        let len = sections.len();
        if len >= Family::MAX_SECTIONS {
            tracing::warn!(%family, len, "section limit reached");
            return Err(coachdash_shared::Error::BoundsExceeded { family, len });
        }

        sections.push(Section::new(family.label(len)));

        Ok(&mut sections[len])
    }

    /// Removes a section. The last section of a family is never removed.
    pub fn remove_section(
        &mut self,
        family: Family,
        index: usize,
    ) -> coachdash_shared::Result<Section> {
        let sections = self.sections_mut(family);
        let len = sections.len();
        if len <= Family::MIN_SECTIONS {
            tracing::warn!(%family, "refusing to remove the only section");
            return Err(coachdash_shared::Error::BoundsExceeded { family, len });
        }

        if index >= len {
            coachdash_shared::out_of_range!("section", index, len);
        }

        Ok(sections.remove(index))
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(TemplateNormalizer::normalize(&raw))
    }
}

/// Builds a canonical [`Template`] out of any stored, AI-generated or edited
/// template object.
///
/// `normalize(normalize(t)) == normalize(t)` holds for every input.
pub struct TemplateNormalizer;

impl TemplateNormalizer {
    pub fn normalize(raw: &Value) -> Template {
        Self::normalize_with(raw, BaseGrams::Blank)
    }

    /// `bare_grams` is handed down to [`SectionNormalizer::normalize_with`].
    pub fn normalize_with(raw: &Value, bare_grams: BaseGrams) -> Template {
        let family = |family: Family| Self::family(raw, family, bare_grams);

        Template {
            breakfasts: family(Family::Breakfasts),
            lunches: family(Family::Lunches),
            dinners: family(Family::Dinners),
            snacks: family(Family::Snacks),
        }
    }

    fn family(raw: &Value, family: Family, bare_grams: BaseGrams) -> Vec<Section> {
        let sections = match raw.get(family.key()) {
            Some(Value::Array(sections)) => sections.as_slice(),
            _ => &[],
        };

        if !sections.is_empty() {
            if sections.len() > Family::MAX_SECTIONS {
                tracing::debug!(%family, len = sections.len(), "truncating family to 3 sections");
            }

            return sections
                .iter()
                .take(Family::MAX_SECTIONS)
                .enumerate()
                .map(|(index, section)| {
                    SectionNormalizer::normalize_with(section, &family.label(index), bare_grams)
                })
                .collect();
        }

        let legacy = family
            .legacy_key()
            .and_then(|key| raw.get(key))
            .filter(|section| !section.is_null());

        if let Some(section) = legacy {
            return vec![SectionNormalizer::normalize_with(
                section,
                &family.label(0),
                bare_grams,
            )];
        }

        vec![Section::new(family.label(0))]
    }
}

#[cfg(test)]
mod tests {
    use coachdash_shared::Error;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_missing_families_get_default_section() {
        let template = TemplateNormalizer::normalize(&json!({}));

        assert_eq!(template, Template::new());
        assert_eq!(template.sections(Family::Snacks)[0].title(), "Snack 1");
    }

    #[test]
    fn test_family_is_truncated_to_three() {
        let raw = json!({
            "lunches": [{"title": "A"}, {"title": "B"}, {"title": "C"}, {"title": "D"}]
        });

        let template = TemplateNormalizer::normalize(&raw);

        let titles = template
            .sections(Family::Lunches)
            .iter()
            .map(|s| s.title())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_plural_wins_over_legacy_singular() {
        let raw = json!({
            "dinners": [{"title": "New"}],
            "dinner": {"title": "Old"}
        });

        let template = TemplateNormalizer::normalize(&raw);

        assert_eq!(template.sections(Family::Dinners).len(), 1);
        assert_eq!(template.sections(Family::Dinners)[0].title(), "New");
    }

    #[test]
    fn test_empty_plural_falls_back_to_singular() {
        let raw = json!({"lunches": [], "lunch": {"items": ["Soup"]}});

        let template = TemplateNormalizer::normalize(&raw);

        let lunch = &template.sections(Family::Lunches)[0];
        assert_eq!(lunch.title(), "Lunch 1");
        assert_eq!(lunch.categories().protein[0].name, "Soup");
    }

    #[test]
    fn test_default_titles_follow_position() {
        let raw = json!({"snacks": [{}, {"title": ""}]});

        let template = TemplateNormalizer::normalize(&raw);

        assert_eq!(template.sections(Family::Snacks)[1].title(), "Snack 2");
    }

    #[test]
    fn test_add_section_stops_at_three() {
        let mut template = Template::new();
        template.add_section(Family::Breakfasts).unwrap();
        let added = template.add_section(Family::Breakfasts).unwrap();
        assert_eq!(added.title(), "Breakfast 3");

        let before = template.clone();
        let err = template.add_section(Family::Breakfasts).unwrap_err();

        assert!(matches!(err, Error::BoundsExceeded { len: 3, .. }));
        assert_eq!(template, before);
    }

    #[test]
    fn test_remove_only_section_is_rejected() {
        let mut template = Template::new();

        let err = template.remove_section(Family::Snacks, 0).unwrap_err();

        assert!(matches!(err, Error::BoundsExceeded { len: 1, .. }));
        assert_eq!(template, Template::new());
    }

    #[test]
    fn test_remove_section_by_index() {
        let mut template = Template::new();
        template
            .add_section(Family::Snacks)
            .unwrap()
            .set_title("Shake");

        let removed = template.remove_section(Family::Snacks, 0).unwrap();

        assert_eq!(removed.title(), "Snack 1");
        assert_eq!(template.sections(Family::Snacks)[0].title(), "Shake");
        assert!(template.remove_section(Family::Snacks, 5).is_err());
    }

    #[test]
    fn test_deserialize_goes_through_normalizer() {
        let template: Template =
            serde_json::from_value(json!({"breakfast": {"title": "BF", "items": ["Egg"]}})).unwrap();

        assert_eq!(template.sections(Family::Breakfasts)[0].title(), "BF");
        assert_eq!(template.iter().count(), 4);
    }
}
