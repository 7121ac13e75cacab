use std::path::Path;

use async_trait::async_trait;
use coachdash_mealplan::{AssignInput, Assigner, BulkAssignment, BulkAssignmentPlanner};

/// Writes the assignment request body to stdout instead of sending it.
pub struct StdoutAssigner {
    pub pretty: bool,
}

#[async_trait]
impl Assigner for StdoutAssigner {
    async fn assign(&self, request: &BulkAssignment) -> anyhow::Result<()> {
        println!("{}", super::render(request, self.pretty)?);

        Ok(())
    }
}

pub struct AssignArgs {
    pub user_ids: Vec<String>,
    pub assigned_by: String,
    pub title: Option<String>,
}

/// Loads the template at `path` and submits it for every user through
/// `assigner`. The title defaults to the file stem. Bare-string legacy
/// items are assigned with 100 g.
pub async fn assign<A: Assigner + ?Sized>(
    assigner: &A,
    path: &Path,
    args: AssignArgs,
) -> anyhow::Result<BulkAssignment> {
    let raw = super::template::read_json(path)?;
    let title = args.title.unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    let input = AssignInput::from_raw(title, args.user_ids, args.assigned_by, &raw);
    let request = BulkAssignmentPlanner::submit(assigner, input).await?;

    Ok(request)
}
