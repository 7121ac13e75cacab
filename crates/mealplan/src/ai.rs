//! Ingestion of AI-generated templates.
//!
//! Models tend to wrap their JSON in a Markdown code fence or surround it
//! with prose. Only the outermost JSON object is kept; everything inside it
//! goes through the regular tolerant normalizers.

use coachdash_shared::mealplan::Family;
use serde_json::Value;

use crate::{Section, SectionNormalizer, Template, TemplateNormalizer};

/// Parses a whole template out of an AI text response.
pub fn template_from_response(text: &str) -> coachdash_shared::Result<Template> {
    let raw = parse(text)?;

    Ok(TemplateNormalizer::normalize(&raw))
}

/// Parses a single generated section meant for `family` at `index`.
pub fn section_from_response(
    text: &str,
    family: Family,
    index: usize,
) -> coachdash_shared::Result<Section> {
    let raw = parse(text)?;

    Ok(SectionNormalizer::normalize(&raw, &family.label(index)))
}

fn parse(text: &str) -> coachdash_shared::Result<Value> {
    let json = extract_json(text);
    tracing::debug!(len = json.len(), "parsing AI response");

    Ok(serde_json::from_str(json)?)
}

fn extract_json(text: &str) -> &str {
    let text = text.trim();
    let body = match text.strip_prefix("```") {
        Some(fenced) => {
            let fenced = fenced.split_once('\n').map_or(fenced, |(_, rest)| rest);
            fenced.rsplit_once("```").map_or(fenced, |(body, _)| body)
        }
        None => text,
    };

    match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => &body[start..=end],
        _ => body.trim(),
    }
}
