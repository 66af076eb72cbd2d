mod content;

use serde::Serialize;

/// A weekly handout definition. Pages differ only in this data; the pipeline
/// and renderer are shared.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Handout {
    pub id: &'static str,
    pub course: &'static str,
    pub file_stem: &'static str,
    pub week: u32,
    pub title: &'static str,
    pub subtitle: &'static str,
    #[serde(skip)]
    pub objectives: &'static [&'static str],
    #[serde(skip)]
    pub sections: &'static [Section],
    #[serde(skip)]
    pub key_terms: &'static [(&'static str, &'static str)],
    #[serde(skip)]
    pub activities: &'static [Activity],
    #[serde(skip)]
    pub reflection: &'static [&'static str],
}

#[derive(Debug)]
pub struct Section {
    pub heading: &'static str,
    pub paragraphs: &'static [&'static str],
    pub points: &'static [&'static str],
}

#[derive(Debug)]
pub struct Activity {
    pub title: &'static str,
    pub minutes: u32,
    pub steps: &'static [&'static str],
}

impl Handout {
    pub fn week_label(&self) -> String {
        format!("Week {}", self.week)
    }

    /// `<Course>_Week<N>_Handout_<YYYY-MM-DD>.pdf`
    pub fn pdf_filename(&self, date: chrono::NaiveDate) -> String {
        format!(
            "{}_Week{}_Handout_{}.pdf",
            self.file_stem,
            self.week,
            date.format("%Y-%m-%d")
        )
    }
}

pub fn catalog() -> &'static [Handout] {
    content::HANDOUTS
}

pub fn find(id: &str) -> Option<&'static Handout> {
    catalog().iter().find(|h| h.id == id)
}
