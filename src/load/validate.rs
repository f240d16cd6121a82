//! Check tasks against the project/category taxonomy

use crate::{
    load::error::{ParseError, Problem},
    task::{Field, Task},
    taxonomy::Taxonomy,
};

/// Check the project and category of a task written on line `line` (1-based)
///
/// Legacy tasks carry neither project nor category and always pass.
/// Blank fields are reported before taxonomy mismatches, in the order
/// project, category, description.
pub fn validate(task: &Task, line: usize, taxonomy: &Taxonomy) -> Result<(), ParseError> {
    check(task, taxonomy).map_err(|problem| problem.at(line))
}

fn check(task: &Task, taxonomy: &Taxonomy) -> Result<(), Problem> {
    let assignment = match &task.assignment {
        Some(assignment) => assignment,
        None => return Ok(()),
    };
    for (field, text) in [
        (Field::Project, &assignment.project),
        (Field::Category, &assignment.category),
        (Field::Description, &task.description),
    ] {
        if text.trim().is_empty() {
            return Err(Problem::EmptyField(field));
        }
    }
    let categories = taxonomy
        .categories(&assignment.project)
        .ok_or_else(|| Problem::UnknownProject {
            project: assignment.project.clone(),
            valid: taxonomy.projects().map(String::from).collect(),
        })?;
    if !categories.contains(&assignment.category) {
        return Err(Problem::InvalidCategory {
            category: assignment.category.clone(),
            project: assignment.project.clone(),
            valid: categories.to_vec(),
        });
    }
    Ok(())
}
