use coachdash_shared::mealplan::{Family, SectionKind};

use crate::{Section, Template};

#[derive(Clone, Debug, PartialEq)]
pub struct ClipboardEntry {
    pub kind: SectionKind,
    pub section: Section,
}

/// Single-slot copy buffer owned by one editing session.
///
/// A copy overwrites the slot; pasting leaves it in place so one copy can be
/// pasted many times.
#[derive(Clone, Debug, Default)]
pub struct SectionClipboard {
    entry: Option<ClipboardEntry>,
}

impl SectionClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self) -> Option<&ClipboardEntry> {
        self.entry.as_ref()
    }

    pub fn copy(&mut self, section: &Section, kind: SectionKind) {
        self.entry = Some(ClipboardEntry {
            kind,
            section: section.clone(),
        });
    }

    /// Copies a section of `template`, tagged with its family's kind.
    pub fn copy_from(
        &mut self,
        template: &Template,
        family: Family,
        index: usize,
    ) -> coachdash_shared::Result<()> {
        let Some(section) = template.section(family, index) else {
            coachdash_shared::out_of_range!("section", index, template.sections(family).len());
        };

        self.copy(section, family.kind());

        Ok(())
    }

    /// Replaces the target section with a copy of the buffered one. Meal
    /// sections only go into meal families and snacks only into snacks; a
    /// mismatch leaves the template untouched.
    pub fn paste(
        &self,
        template: &mut Template,
        family: Family,
        index: usize,
    ) -> coachdash_shared::Result<()> {
        let Some(entry) = &self.entry else {
            return Err(coachdash_shared::Error::ClipboardEmpty);
        };

        if entry.kind != family.kind() {
            tracing::warn!(clipboard = %entry.kind, target = %family, "incompatible paste");
            return Err(coachdash_shared::Error::IncompatibleKind {
                clipboard: entry.kind,
                target: family,
            });
        }

        *template.section_mut(family, index)? = entry.section.clone();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use coachdash_shared::{Error, mealplan::Category};

    use super::*;

    fn template_with_breakfast(name: &str) -> Template {
        let mut template = Template::new();
        let section = template.section_mut(Family::Breakfasts, 0).unwrap();
        section.set_title("Power breakfast");
        section.set_item_name(Category::Protein, 0, name).unwrap();
        template
    }

    #[test]
    fn test_paste_into_other_meal_family() {
        let mut template = template_with_breakfast("Egg");
        let mut clipboard = SectionClipboard::new();
        clipboard
            .copy_from(&template, Family::Breakfasts, 0)
            .unwrap();

        clipboard
            .paste(&mut template, Family::Dinners, 0)
            .unwrap();

        assert_eq!(
            template.sections(Family::Dinners)[0],
            template.sections(Family::Breakfasts)[0]
        );
    }

    #[test]
    fn test_buffer_survives_many_pastes() {
        let mut template = template_with_breakfast("Egg");
        let mut clipboard = SectionClipboard::new();
        clipboard
            .copy_from(&template, Family::Breakfasts, 0)
            .unwrap();

        clipboard.paste(&mut template, Family::Lunches, 0).unwrap();
        template.add_section(Family::Lunches).unwrap();
        clipboard.paste(&mut template, Family::Lunches, 1).unwrap();

        assert_eq!(template.sections(Family::Lunches)[1].title(), "Power breakfast");
        assert!(clipboard.entry().is_some());
    }

    #[test]
    fn test_buffer_is_a_deep_copy() {
        let mut template = template_with_breakfast("Egg");
        let mut clipboard = SectionClipboard::new();
        clipboard
            .copy_from(&template, Family::Breakfasts, 0)
            .unwrap();

        template
            .section_mut(Family::Breakfasts, 0)
            .unwrap()
            .set_item_name(Category::Protein, 0, "Tofu")
            .unwrap();

        assert_eq!(
            clipboard.entry().unwrap().section.categories().protein[0].name,
            "Egg"
        );
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let mut template = template_with_breakfast("Egg");
        let mut clipboard = SectionClipboard::new();
        clipboard
            .copy_from(&template, Family::Breakfasts, 0)
            .unwrap();
        let before = template.clone();

        let err = clipboard
            .paste(&mut template, Family::Snacks, 0)
            .unwrap_err();

        assert!(matches!(
            err,
            Error::IncompatibleKind {
                clipboard: SectionKind::Meal,
                target: Family::Snacks
            }
        ));
        assert_eq!(template, before);

        clipboard
            .copy_from(&template, Family::Snacks, 0)
            .unwrap();
        assert!(clipboard.paste(&mut template, Family::Lunches, 0).is_err());
        assert_eq!(template, before);
    }

    #[test]
    fn test_empty_clipboard() {
        let mut template = Template::new();

        let err = SectionClipboard::new()
            .paste(&mut template, Family::Lunches, 0)
            .unwrap_err();

        assert!(matches!(err, Error::ClipboardEmpty));
    }

    #[test]
    fn test_paste_out_of_range() {
        let mut template = template_with_breakfast("Egg");
        let mut clipboard = SectionClipboard::new();
        clipboard.copy(&template.sections(Family::Breakfasts)[0], SectionKind::Meal);

        assert!(clipboard.paste(&mut template, Family::Lunches, 2).is_err());
    }
}
