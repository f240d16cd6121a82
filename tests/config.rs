use std::fs;

use timesheet::{Error, Taxonomy};

#[test]
fn shipped_taxonomy_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/projects-categories.json");
    let contents = fs::read_to_string(path).expect("config file present");
    let taxonomy = Taxonomy::from_json(&contents).expect("config file valid");

    let projects = taxonomy.projects().collect::<Vec<_>>();
    assert!(!projects.is_empty());
    for project in projects {
        let categories = taxonomy.categories(project).expect("listed project");
        assert!(!categories.is_empty(), "{} has no categories", project);
        assert!(categories.iter().all(|c| !c.trim().is_empty()));
    }
}

#[test]
fn taxonomy_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("projects-categories.json");
    fs::write(&path, r#"{ "Acme": ["Development"], "Beta": ["Support", "Meetings"] }"#)?;

    let taxonomy = Taxonomy::from_json(&fs::read_to_string(&path)?)?;
    assert_eq!(taxonomy.projects().collect::<Vec<_>>(), vec!["Acme", "Beta"]);
    assert_eq!(taxonomy.categories("Beta").map(|c| c.len()), Some(2));
    Ok(())
}

#[test]
fn malformed_taxonomy_is_fatal() {
    let err = Taxonomy::from_json(r#"["Development"]"#).unwrap_err();
    assert!(matches!(err, Error::InvalidTaxonomy(_)));
    assert_eq!(err.exit_code(), timesheet::error::exit_codes::USER_ERROR);

    let err = Taxonomy::from_json(r#"{ "Acme": [] }"#).unwrap_err();
    assert!(err.to_string().contains("Acme"));
}
