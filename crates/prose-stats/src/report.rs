use std::fmt::Write;

use serde::Serialize;

use crate::count_table::CountTable;

const NO_DATA: &str = "no data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub key: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportBuilder {
    sections: Vec<Section>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the top `k` entries of `table` under `title`.
    pub fn section(mut self, title: impl Into<String>, table: &CountTable, k: usize) -> Self {
        self.push_ranked(title, table.top_k(k));
        self
    }

    /// Add an already ranked list (e.g. from `names_containing`).
    pub fn ranked(mut self, title: impl Into<String>, ranked: Vec<(String, u64)>) -> Self {
        self.push_ranked(title, ranked);
        self
    }

    pub fn push_ranked(&mut self, title: impl Into<String>, ranked: Vec<(String, u64)>) {
        self.sections.push(Section {
            title: title.into(),
            entries: ranked
                .into_iter()
                .map(|(key, count)| Entry { key, count })
                .collect(),
        });
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Plain text, one block per section; empty sections read `no data`.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "== {} ==", section.title);
            if section.entries.is_empty() {
                let _ = writeln!(out, "  {NO_DATA}");
                continue;
            }
            let width = section
                .entries
                .iter()
                .map(|e| e.key.chars().count())
                .max()
                .unwrap_or(0);
            for entry in &section.entries {
                let _ = writeln!(out, "  {:<width$}  {}", entry.key, entry.count);
            }
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
