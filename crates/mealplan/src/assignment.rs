use async_trait::async_trait;
use coachdash_shared::{Metadata, mealplan::Family};
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use crate::{
    BaseGrams, Categories, CategoryProjector, DEFAULT_BASE_GRAMS, FoodItem, PortionScale, Section,
    Template, TemplateNormalizer, validation,
};

/// Section payload sent to the assignment collaborator. Unlike [`Section`],
/// buckets may be empty once invalid rows are dropped.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AssignableSection {
    pub title: String,
    pub categories: Categories,
    pub items: Vec<FoodItem>,
}

impl AssignableSection {
    pub(crate) fn rederive(&mut self) {
        self.items = CategoryProjector::project(&self.categories);
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AssignableTemplate {
    pub breakfasts: Vec<AssignableSection>,
    pub lunches: Vec<AssignableSection>,
    pub dinners: Vec<AssignableSection>,
    pub snacks: Vec<AssignableSection>,
}

impl AssignableTemplate {
    pub fn sections(&self, family: Family) -> &[AssignableSection] {
        match family {
            Family::Breakfasts => &self.breakfasts,
            Family::Lunches => &self.lunches,
            Family::Dinners => &self.dinners,
            Family::Snacks => &self.snacks,
        }
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut AssignableSection> {
        self.breakfasts
            .iter_mut()
            .chain(self.lunches.iter_mut())
            .chain(self.dinners.iter_mut())
            .chain(self.snacks.iter_mut())
    }
}

#[derive(Debug, Clone, Validate)]
pub struct AssignInput {
    #[validate(custom(function = "validation::not_blank"))]
    pub title: String,
    #[validate(length(min = 1, message = "at least one user must be selected"))]
    pub user_ids: Vec<String>,
    pub assigned_by: String,
    pub template: Template,
}

impl AssignInput {
    /// Builds the input from stored template JSON. Bare-string legacy items
    /// count as 100 g here, as in
    /// [`BulkAssignmentPlanner::format_raw_for_assignment`].
    pub fn from_raw(
        title: impl Into<String>,
        user_ids: Vec<String>,
        assigned_by: impl Into<String>,
        raw: &Value,
    ) -> Self {
        Self {
            title: title.into(),
            user_ids,
            assigned_by: assigned_by.into(),
            template: TemplateNormalizer::normalize_with(
                raw,
                BaseGrams::Grams(DEFAULT_BASE_GRAMS),
            ),
        }
    }

    /// Field checks plus the per-section "at least one valid item" rule.
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        validation::merge(
            self.validate(),
            validation::validate_sections(&self.template),
        )
    }
}

/// Request body handed to the assignment collaborator, which looks up each
/// user's portion scale and writes the per-user plans.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulkAssignment {
    pub title: String,
    pub user_ids: Vec<String>,
    pub template: AssignableTemplate,
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl BulkAssignment {
    /// Per-user plans for the collaborator, given how it resolves scales.
    pub fn assigned_plans(
        &self,
        mut scale_for: impl FnMut(&str) -> PortionScale,
    ) -> Vec<crate::AssignedPlan> {
        self.user_ids
            .iter()
            .map(|user_id| {
                crate::AssignedPlan::new(
                    user_id,
                    &self.template,
                    scale_for(user_id),
                    self.metadata.clone(),
                )
            })
            .collect()
    }
}

/// Seam for the external fan-out writer (a REST endpoint in production).
#[async_trait]
pub trait Assigner: Send + Sync {
    async fn assign(&self, request: &BulkAssignment) -> anyhow::Result<()>;
}

pub struct BulkAssignmentPlanner;

impl BulkAssignmentPlanner {
    /// Drops rows without a name or a positive amount. Sections are kept even
    /// when nothing survives; the validator reports those.
    pub fn format_for_assignment(template: &Template) -> AssignableTemplate {
        let family = |family: Family| {
            template
                .sections(family)
                .iter()
                .map(Self::format_section)
                .collect::<Vec<_>>()
        };

        AssignableTemplate {
            breakfasts: family(Family::Breakfasts),
            lunches: family(Family::Lunches),
            dinners: family(Family::Dinners),
            snacks: family(Family::Snacks),
        }
    }

    /// Same as [`BulkAssignmentPlanner::format_for_assignment`] for stored
    /// data, where bare-string legacy items default to 100 g.
    pub fn format_raw_for_assignment(raw: &Value) -> AssignableTemplate {
        let template =
            TemplateNormalizer::normalize_with(raw, BaseGrams::Grams(DEFAULT_BASE_GRAMS));
        Self::format_for_assignment(&template)
    }

    fn format_section(section: &Section) -> AssignableSection {
        let categories = Categories::from_fn(|category| {
            section
                .categories()
                .get(category)
                .iter()
                .filter(|item| item.is_valid())
                .map(|item| FoodItem {
                    grams: None,
                    ..item.clone()
                })
                .collect()
        });
        let items = CategoryProjector::project(&categories);

        AssignableSection {
            title: section.title().to_owned(),
            categories,
            items,
        }
    }

    /// Validates the input and builds the request body.
    pub fn plan(input: AssignInput) -> coachdash_shared::Result<BulkAssignment> {
        input.validate_all()?;

        let template = Self::format_for_assignment(&input.template);
        let metadata = Metadata::new(input.assigned_by);
        metadata.assigned_by()?;

        tracing::info!(
            id = %metadata.id,
            title = %input.title,
            users = input.user_ids.len(),
            "bulk assignment planned"
        );

        Ok(BulkAssignment {
            title: input.title,
            user_ids: input.user_ids,
            template,
            metadata,
        })
    }

    /// Plans the request and hands it to `assigner`. Nothing reaches the
    /// collaborator when validation fails.
    #[tracing::instrument(skip_all, fields(title = %input.title))]
    pub async fn submit<A: Assigner + ?Sized>(
        assigner: &A,
        input: AssignInput,
    ) -> coachdash_shared::Result<BulkAssignment> {
        let request = Self::plan(input)?;
        assigner.assign(&request).await?;

        Ok(request)
    }
}
