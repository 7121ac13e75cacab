use std::path::Path;

use anyhow::Context;
use coachdash_mealplan::{PortionProjector, PortionScale, Template, TemplateNormalizer, ai};
use serde_json::Value;

pub(crate) fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub(crate) fn read_json(path: &Path) -> anyhow::Result<Value> {
    let raw = serde_json::from_str(&read(path)?)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    Ok(raw)
}

pub(crate) fn load(path: &Path) -> anyhow::Result<Template> {
    Ok(TemplateNormalizer::normalize(&read_json(path)?))
}

/// Normalizes a stored template of any shape into the canonical form.
pub fn normalize(path: &Path) -> anyhow::Result<Template> {
    let template = load(path)?;
    tracing::info!(path = %path.display(), sections = template.iter().count(), "template normalized");

    Ok(template)
}

/// Ingests a raw AI response, fenced or surrounded by prose.
pub fn ai(path: &Path) -> anyhow::Result<Template> {
    let template = ai::template_from_response(&read(path)?)?;
    tracing::info!(path = %path.display(), "AI template ingested");

    Ok(template)
}

/// Normalizes then recomputes every grams value for `scale`.
pub fn scale(path: &Path, scale: f64) -> anyhow::Result<Template> {
    let scale = PortionScale::new(scale)?;
    let template = load(path)?;
    tracing::info!(path = %path.display(), scale = scale.value(), "scaling template");

    Ok(PortionProjector::project(&template, scale))
}
