//! Project report: search filters and row formatting.

use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::project_status::ProjectStatus;

pub const MISSING_TITLE: &str = "Sin título";
pub const MISSING_INSTITUTION: &str = "Sin institución";
pub const MISSING_TEACHER: &str = "Sin docente asignado";
pub const MISSING_STATUS: &str = "Sin estado";

/// Which column the search text is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportField {
    /// No filtering; the search text is ignored.
    #[default]
    All,
    Institution,
    Teacher,
    Title,
    Status,
}

impl FromStr for ReportField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "institution" => Ok(Self::Institution),
            "teacher" => Ok(Self::Teacher),
            "title" => Ok(Self::Title),
            "status" => Ok(Self::Status),
            other => Err(CoreError::Validation(format!(
                "Unknown report filter '{other}'. Must be one of: all, institution, teacher, title, status"
            ))),
        }
    }
}

/// The raw project fields a report needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSource {
    pub title: Option<String>,
    pub institution: Option<String>,
    pub teacher: Option<String>,
    pub status: Option<ProjectStatus>,
}

/// One display row, with placeholders filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// 1-based position in the filtered list.
    pub index: usize,
    pub title: String,
    pub institution: String,
    pub teacher: String,
    pub status: String,
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

fn to_row(source: &ReportSource, index: usize) -> ReportRow {
    ReportRow {
        index,
        title: or_placeholder(source.title.as_deref(), MISSING_TITLE),
        institution: or_placeholder(source.institution.as_deref(), MISSING_INSTITUTION),
        teacher: or_placeholder(source.teacher.as_deref(), MISSING_TEACHER),
        status: source
            .status
            .map_or_else(|| MISSING_STATUS.to_string(), |s| s.label().to_string()),
    }
}

/// Filter projects and number the surviving rows.
///
/// Matching is a case-insensitive substring test against the displayed
/// value, so placeholders such as `Sin estado` are searchable too.
pub fn build_rows(sources: &[ReportSource], field: ReportField, search: &str) -> Vec<ReportRow> {
    let needle = search.trim().to_lowercase();
    sources
        .iter()
        .map(|s| to_row(s, 0))
        .filter(|row| {
            let haystack = match field {
                ReportField::All => return true,
                ReportField::Institution => &row.institution,
                ReportField::Teacher => &row.teacher,
                ReportField::Title => &row.title,
                ReportField::Status => &row.status,
            };
            haystack.to_lowercase().contains(&needle)
        })
        .enumerate()
        .map(|(i, row)| ReportRow {
            index: i + 1,
            ..row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(title: &str, institution: &str, status: Option<ProjectStatus>) -> ReportSource {
        ReportSource {
            title: Some(title.into()),
            institution: Some(institution.into()),
            teacher: None,
            status,
        }
    }

    fn sample() -> Vec<ReportSource> {
        vec![
            source("Robotics Club", "Colegio Norte", Some(ProjectStatus::Active)),
            source("Huerta Escolar", "Colegio Sur", None),
            source("Water Lab", "Instituto Norte", Some(ProjectStatus::Finished)),
        ]
    }

    #[test]
    fn all_ignores_search() {
        let rows = build_rows(&sample(), ReportField::All, "zzz");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].index, 3);
    }

    #[test]
    fn institution_filter_is_case_insensitive() {
        let rows = build_rows(&sample(), ReportField::Institution, "NORTE");
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Robotics Club", "Water Lab"]);
        assert_eq!(rows[1].index, 2);
    }

    #[test]
    fn placeholders_fill_missing_fields() {
        let rows = build_rows(&sample(), ReportField::Title, "huerta");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].teacher, MISSING_TEACHER);
        assert_eq!(rows[0].status, MISSING_STATUS);
    }

    #[test]
    fn status_filter_matches_labels_and_placeholder() {
        let rows = build_rows(&sample(), ReportField::Status, "activo");
        assert_eq!(rows.len(), 1);
        let rows = build_rows(&sample(), ReportField::Status, "sin estado");
        assert_eq!(rows[0].title, "Huerta Escolar");
    }

    #[test]
    fn blank_title_gets_placeholder() {
        let rows = build_rows(
            &[ReportSource {
                title: Some("  ".into()),
                institution: None,
                teacher: Some("Prof. Díaz".into()),
                status: None,
            }],
            ReportField::All,
            "",
        );
        assert_eq!(rows[0].title, MISSING_TITLE);
        assert_eq!(rows[0].institution, MISSING_INSTITUTION);
        assert_eq!(rows[0].teacher, "Prof. Díaz");
    }

    #[test]
    fn parses_filter_names() {
        assert_eq!("teacher".parse::<ReportField>().unwrap(), ReportField::Teacher);
        assert_eq!("".parse::<ReportField>().unwrap(), ReportField::All);
        assert!("budget".parse::<ReportField>().is_err());
    }
}
