use coachdash_mealplan::{
    Category, Family, FoodItem, ReorderEngine, SectionClipboard, Template, TemplateNormalizer,
};
use coachdash_shared::Error;
use serde_json::{Value, json};

fn renormalize(template: &Template) -> anyhow::Result<Template> {
    Ok(TemplateNormalizer::normalize(&serde_json::to_value(template)?))
}

fn placeholder() -> Value {
    json!({"name": "", "baseGrams": ""})
}

#[test]
fn test_legacy_breakfast_is_canonicalized() -> anyhow::Result<()> {
    let template = TemplateNormalizer::normalize(&json!({
        "breakfast": {"title": "BF", "items": ["Egg"]}
    }));

    let value = serde_json::to_value(&template)?;

    assert_eq!(
        value["breakfasts"],
        json!([{
            "title": "BF",
            "categories": {
                "protein": [{"name": "Egg", "baseGrams": ""}],
                "carbs": [placeholder()],
                "fats": [placeholder()],
                "meat": [placeholder()],
                "chicken": [placeholder()],
                "fish": [placeholder()]
            },
            "items": [
                {"name": "Egg", "baseGrams": ""},
                placeholder(),
                placeholder(),
                placeholder(),
                placeholder(),
                placeholder()
            ]
        }])
    );
    assert_eq!(value["lunches"][0]["title"], "Lunch 1");
    assert_eq!(value["snacks"][0]["title"], "Snack 1");

    Ok(())
}

#[test]
fn test_normalization_is_idempotent() -> anyhow::Result<()> {
    let inputs = [
        json!({"breakfast": {"title": "BF", "items": ["Egg", {"name": "Toast", "baseGrams": "40"}]}}),
        json!({
            "lunches": [
                {"title": "L", "categories": {"carbs": [{"name": "Rice", "baseGrams": 130}]}},
                {"categories": {"fish": []}}
            ],
            "snacks": []
        }),
        json!({"dinners": [{"title": "AI", "chicken": [{"name": "Thigh", "baseGrams": 150.4}], "fats": ["Olive oil"]}]}),
        json!(null),
        json!({"breakfasts": [{}, {}, {}, {}]}),
    ];

    for input in inputs {
        let once = TemplateNormalizer::normalize(&input);
        let twice = renormalize(&once)?;

        assert_eq!(once, twice, "input: {input}");
    }

    Ok(())
}

#[test]
fn test_every_section_satisfies_shape_invariants() {
    let template = TemplateNormalizer::normalize(&json!({
        "breakfasts": [{"categories": {"protein": [], "carbs": [{"name": "Oats", "baseGrams": 60}]}}],
        "dinner": {"items": [{"name": "Steak", "baseGrams": 200}]}
    }));

    for (family, index, section) in template.iter() {
        assert!(!section.title().is_empty(), "{family} {index}");
        for (category, items) in section.categories().iter() {
            assert!(!items.is_empty(), "{family} {index} {category}");
        }
        let flattened: Vec<FoodItem> = section
            .categories()
            .iter()
            .flat_map(|(_, items)| items.iter().cloned())
            .collect();
        assert_eq!(section.items(), flattened.as_slice());
    }

    for family in [Family::Breakfasts, Family::Lunches, Family::Dinners, Family::Snacks] {
        let len = template.sections(family).len();
        assert!((1..=3).contains(&len));
    }
}

#[test]
fn test_fourth_breakfast_is_rejected() -> anyhow::Result<()> {
    let mut template = Template::new();
    template.add_section(Family::Breakfasts)?;
    template.add_section(Family::Breakfasts)?;
    let before = template.clone();

    let err = template.add_section(Family::Breakfasts).unwrap_err();

    assert!(matches!(
        err,
        Error::BoundsExceeded {
            family: Family::Breakfasts,
            len: 3
        }
    ));
    assert_eq!(template.sections(Family::Breakfasts).len(), 3);
    assert_eq!(template, before);
    assert_eq!(template.sections(Family::Breakfasts)[2].title(), "Breakfast 3");

    Ok(())
}

#[test]
fn test_copy_paste_then_edit_source() -> anyhow::Result<()> {
    let mut template = Template::new();
    template.add_section(Family::Lunches)?;
    template
        .section_mut(Family::Lunches, 0)?
        .set_item_name(Category::Carbs, 0, "Rice")?;

    let mut clipboard = SectionClipboard::new();
    clipboard.copy_from(&template, Family::Lunches, 0)?;
    clipboard.paste(&mut template, Family::Dinners, 0)?;

    template
        .section_mut(Family::Lunches, 0)?
        .set_item_name(Category::Carbs, 0, "Quinoa")?;

    let dinner = &template.sections(Family::Dinners)[0];
    assert_eq!(dinner.categories().carbs[0].name, "Rice");
    assert_eq!(dinner.title(), "Lunch 1");

    let err = clipboard
        .paste(&mut template, Family::Snacks, 0)
        .unwrap_err();
    assert!(matches!(err, Error::IncompatibleKind { .. }));
    assert_eq!(template.sections(Family::Snacks)[0].title(), "Snack 1");

    Ok(())
}

#[test]
fn test_reorder_keeps_items_in_sync() -> anyhow::Result<()> {
    let mut template = TemplateNormalizer::normalize(&json!({
        "snacks": [{"categories": {"fats": ["a", "b", "c", "d"]}}]
    }));

    ReorderEngine::reorder_item(&mut template, Family::Snacks, 0, Category::Fats, 2, 0)?;

    let snack = &template.sections(Family::Snacks)[0];
    let names: Vec<&str> = snack
        .categories()
        .fats
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(names, ["c", "a", "b", "d"]);
    assert_eq!(snack.items()[2].name, "c");

    let before = template.clone();
    assert!(ReorderEngine::reorder_item(&mut template, Family::Snacks, 0, Category::Fats, 4, 0).is_err());
    assert_eq!(template, before);

    Ok(())
}
