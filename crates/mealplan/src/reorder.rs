use coachdash_shared::mealplan::{Category, Family};

use crate::Template;

/// Index-based moves produced by drag and drop.
///
/// Both moves are a remove-then-insert splice: only the moved element changes
/// position relative to the others, nothing is sorted.
pub struct ReorderEngine;

impl ReorderEngine {
    pub fn reorder_item(
        template: &mut Template,
        family: Family,
        section_index: usize,
        category: Category,
        from_index: usize,
        to_index: usize,
    ) -> coachdash_shared::Result<()> {
        let section = template.section_mut(family, section_index)?;
        let len = section.categories().get(category).len();
        check_move("item", from_index, to_index, len)?;

        if from_index == to_index {
            return Ok(());
        }

        section.update_category(category, |items| splice(items, from_index, to_index));

        Ok(())
    }

    pub fn reorder_section(
        template: &mut Template,
        family: Family,
        from_index: usize,
        to_index: usize,
    ) -> coachdash_shared::Result<()> {
        let sections = template.sections_mut(family);
        check_move("section", from_index, to_index, sections.len())?;

        splice(sections, from_index, to_index);

        Ok(())
    }
}

fn check_move(
    what: &'static str,
    from_index: usize,
    to_index: usize,
    len: usize,
) -> coachdash_shared::Result<()> {
    for index in [from_index, to_index] {
        if index >= len {
            return Err(coachdash_shared::Error::IndexOutOfRange { what, index, len });
        }
    }

    Ok(())
}

fn splice<T>(items: &mut Vec<T>, from_index: usize, to_index: usize) {
    if from_index == to_index {
        return;
    }

    let item = items.remove(from_index);
    items.insert(to_index, item);
}

#[cfg(test)]
mod tests {
    use coachdash_shared::Error;

    use super::*;
    use crate::{CategoryProjector, FoodItem};

    fn template_with_carbs(names: &[&str]) -> Template {
        let mut template = Template::new();
        let section = template.section_mut(Family::Lunches, 0).unwrap();
        for (index, name) in names.iter().enumerate() {
            if index > 0 {
                section.add_item(Category::Carbs);
            }
            section.set_item_name(Category::Carbs, index, *name).unwrap();
        }
        template
    }

    fn carbs(template: &Template) -> Vec<String> {
        template.sections(Family::Lunches)[0]
            .categories()
            .carbs
            .iter()
            .map(|i| i.name.to_owned())
            .collect()
    }

    #[test]
    fn test_move_item_to_front() {
        let mut template = template_with_carbs(&["a", "b", "c", "d"]);

        ReorderEngine::reorder_item(&mut template, Family::Lunches, 0, Category::Carbs, 2, 0)
            .unwrap();

        assert_eq!(carbs(&template), vec!["c", "a", "b", "d"]);
        let section = &template.sections(Family::Lunches)[0];
        assert_eq!(section.items(), CategoryProjector::project(section.categories()).as_slice());
        assert_eq!(section.items()[1], FoodItem::blank("c"));
    }

    #[test]
    fn test_every_move_is_a_permutation() {
        let names = ["a", "b", "c", "d"];
        for from in 0..names.len() {
            for to in 0..names.len() {
                let mut template = template_with_carbs(&names);
                ReorderEngine::reorder_item(&mut template, Family::Lunches, 0, Category::Carbs, from, to)
                    .unwrap();

                let mut moved = carbs(&template);
                assert_eq!(moved[to], names[from]);
                moved.sort();
                assert_eq!(moved, names);
            }
        }
    }

    #[test]
    fn test_same_index_is_noop() {
        let mut template = template_with_carbs(&["a", "b"]);
        let before = template.clone();

        ReorderEngine::reorder_item(&mut template, Family::Lunches, 0, Category::Carbs, 1, 1)
            .unwrap();

        assert_eq!(template, before);
    }

    #[test]
    fn test_reorder_section() {
        let mut template = Template::new();
        template.add_section(Family::Snacks).unwrap();
        template.add_section(Family::Snacks).unwrap();

        ReorderEngine::reorder_section(&mut template, Family::Snacks, 0, 2).unwrap();

        let titles = template
            .sections(Family::Snacks)
            .iter()
            .map(|s| s.title())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["Snack 2", "Snack 3", "Snack 1"]);
    }

    #[test]
    fn test_out_of_range_target_is_rejected() {
        let mut template = Template::new();
        template.add_section(Family::Snacks).unwrap();
        let before = template.clone();

        let err = ReorderEngine::reorder_section(&mut template, Family::Snacks, 0, 2).unwrap_err();

        assert!(matches!(err, Error::IndexOutOfRange { index: 2, len: 2, .. }));
        assert_eq!(template, before);
        assert!(
            ReorderEngine::reorder_item(&mut template, Family::Snacks, 0, Category::Fish, 0, 1)
                .is_err()
        );
    }
}
