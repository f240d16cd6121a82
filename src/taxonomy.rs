//! Project → categories mapping used to check current-format tasks

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
    projects: BTreeMap<String, Vec<String>>,
}

impl Taxonomy {
    /// Parse and check a JSON object `{ "Project": ["Category", ...], ... }`
    pub fn from_json(contents: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(contents)?;
        if !value.is_object() {
            return Err(Error::InvalidTaxonomy(
                "expected an object mapping projects to category lists".to_string(),
            ));
        }
        let taxonomy: Self = serde_json::from_value(value)?;
        taxonomy.check()?;
        Ok(taxonomy)
    }

    pub fn from_pairs<I, P, C>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, Vec<C>)>,
        P: ToString,
        C: ToString,
    {
        let projects = pairs
            .into_iter()
            .map(|(p, cs)| (p.to_string(), cs.iter().map(|c| c.to_string()).collect()))
            .collect();
        let taxonomy = Self { projects };
        taxonomy.check()?;
        Ok(taxonomy)
    }

    fn check(&self) -> Result<()> {
        if self.projects.is_empty() {
            return Err(Error::InvalidTaxonomy("no project defined".to_string()));
        }
        for (project, categories) in &self.projects {
            if project.trim().is_empty() {
                return Err(Error::InvalidTaxonomy("blank project name".to_string()));
            }
            if categories.is_empty() {
                return Err(Error::InvalidTaxonomy(format!(
                    "project '{}' has no categories",
                    project
                )));
            }
            for (i, category) in categories.iter().enumerate() {
                if category.trim().is_empty() {
                    return Err(Error::InvalidTaxonomy(format!(
                        "category at index {} of project '{}' is blank",
                        i, project
                    )));
                }
                if categories[..i].contains(category) {
                    return Err(Error::InvalidTaxonomy(format!(
                        "category '{}' appears twice in project '{}'",
                        category, project
                    )));
                }
            }
        }
        Ok(())
    }

    /// Known projects, sorted
    pub fn projects(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }

    pub fn categories(&self, project: &str) -> Option<&[String]> {
        self.projects.get(project).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! rejected {
        ( $json:expr ) => {
            assert!(
                matches!(Taxonomy::from_json($json), Err(Error::InvalidTaxonomy(_))),
                "{} should be rejected",
                $json
            );
        };
    }

    #[test]
    fn loads_object() {
        let t = Taxonomy::from_json(r#"{"Zeta": ["Ops"], "Acme": ["Development", "Meetings"]}"#)
            .unwrap();
        assert_eq!(t.projects().collect::<Vec<_>>(), vec!["Acme", "Zeta"]);
        assert_eq!(
            t.categories("Acme").unwrap(),
            &["Development".to_string(), "Meetings".to_string()]
        );
        assert!(t.categories("Nope").is_none());
    }

    #[test]
    fn rejects_bad_shapes() {
        rejected!("[]");
        rejected!("{}");
        rejected!(r#"{"Acme": []}"#);
        rejected!(r#"{"Acme": ["Dev", "  "]}"#);
        rejected!(r#"{"Acme": ["Dev", "Dev"]}"#);
        assert!(matches!(Taxonomy::from_json("{"), Err(Error::Json(_))));
        assert!(matches!(Taxonomy::from_json(r#"{"Acme": [1]}"#), Err(Error::Json(_))));
    }
}
