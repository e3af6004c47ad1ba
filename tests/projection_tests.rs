use std::collections::HashMap;

use covmap::{
    import_json, project_importance, project_total_lines, table_rows, CoverageReport, FileCoverage,
    Importance,
};
use indoc::indoc;
use pretty_assertions::assert_eq;

struct MapImportance(HashMap<String, u64>);

impl Importance for MapImportance {
    fn get_importance(&self, path: &str) -> u64 {
        self.0.get(path).copied().unwrap_or(0)
    }
}

fn report() -> CoverageReport {
    [
        ("pkg/views.py".to_string(), FileCoverage::new(6, 2)),
        ("pkg/models.py".to_string(), FileCoverage::new(1, 3)),
        ("setup.py".to_string(), FileCoverage::new(0, 0)),
        ("".to_string(), FileCoverage::new(7, 5)),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_importance_projection_drops_unscored_rows() {
    let importance = MapImportance(
        [
            ("pkg/views.py".to_string(), 800u64),
            ("pkg/models.py".to_string(), 0u64),
            ("".to_string(), 999u64),
        ]
        .into_iter()
        .collect(),
    );
    let records = project_importance(&report(), &importance);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path, "pkg/views.py");
    assert_eq!(records[0].name, "views.py");
    assert_eq!(records[0].value, 800);
    assert_eq!(records[0].percent_covered, 75.0);
    assert_eq!(records[0].segments, vec!["pkg", "views.py"]);
}

#[test]
fn test_total_lines_projection_keeps_every_named_file() {
    let records = project_total_lines(&report());
    let paths: Vec<&str> = records.iter().map(|r| r.path.as_str()).collect();

    assert_eq!(paths, vec!["pkg/models.py", "pkg/views.py", "setup.py"]);
    assert_eq!(records[2].value, 0);
    assert_eq!(records[2].percent_covered, 0.0);
}

#[test]
fn test_imported_report_projects_end_to_end() {
    let text = indoc! {r#"
        {
            "files": {
                "b/deep/file.py": {"summary": {"covered_lines": 5, "missing_lines": 5}},
                "a.py": {"summary": {"covered_lines": 2, "missing_lines": 0}}
            }
        }
    "#};
    let report = import_json(text).unwrap();
    let rows = table_rows(&project_total_lines(&report));

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["path"], "a.py");
    assert_eq!(rows[0]["p0"], "a.py");
    assert_eq!(rows[0]["p1"], "");
    assert_eq!(rows[0]["p2"], "");
    assert_eq!(rows[1]["path"], "b/deep/file.py");
    assert_eq!(rows[1]["p0"], "b");
    assert_eq!(rows[1]["p1"], "deep");
    assert_eq!(rows[1]["p2"], "file.py");
    assert_eq!(rows[1]["percent_covered"], 50.0);
}
