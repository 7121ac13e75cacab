use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{Template, validation};

/// Template saved under a name so it can be reused for later assignments.
#[derive(Serialize, Deserialize, Validate, Clone, Debug, PartialEq)]
pub struct NamedTemplate {
    #[validate(custom(function = "validation::not_blank"))]
    pub name: String,
    pub template: Template,
}

impl NamedTemplate {
    pub fn new(name: impl Into<String>, template: Template) -> Self {
        Self {
            name: name.into(),
            template,
        }
    }

    /// Pre-save checks: a name plus one valid item per section.
    pub fn check(&self) -> coachdash_shared::Result<()> {
        validation::merge(
            self.validate(),
            validation::validate_sections(&self.template),
        )?;

        Ok(())
    }
}
