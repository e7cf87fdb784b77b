// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Assembles the final release notes Markdown document.
///
/// Layout, one part per line:
/// - centered `<h1>` header
/// - optional extra info: centered `<h2>` title and a centered `<div>`
/// - every non-empty category section: `<h2>` heading, a blank line, the
///   numbered items, then a blank line
use crate::{
    categorize::{CategorySection, Sections},
    settings::ExtraInfo,
};

const H1_OPEN: &str = "<h1 align=\"center\" style=\"color: mediumseagreen;font-weight: bold;\">";
const H2_OPEN: &str = "<h2 align=\"center\" style=\"font-weight: bold;\">";
const DIV_OPEN: &str = "<div align=\"center\">";

/// Renders the document from an already substituted header.
///
/// # Example
///
/// ```
/// use relnotes::{Sections, render_document};
///
/// let document = render_document("Release v1.0.0", None, &Sections::new(),);
/// assert!(document.starts_with("<h1 align=\"center\""));
/// ```
pub fn render_document(header: &str, extra_info: Option<&ExtraInfo,>, sections: &Sections,) -> String
{
    let mut lines = vec![format!("{H1_OPEN}{header}</h1>"), String::new()];

    if let Some(info,) = extra_info {
        lines.extend(render_extra_info(info,),);
        lines.push(String::new(),);
    }

    for section in sections.values() {
        lines.extend(render_section(section,),);
        lines.push(String::new(),);
    }

    lines.join("\n",)
}

fn render_extra_info(info: &ExtraInfo,) -> Vec<String,>
{
    vec![
        format!("{H2_OPEN}{}</h2>", info.title),
        String::new(),
        DIV_OPEN.to_owned(),
        String::new(),
        info.text.clone(),
        String::new(),
        "</div>".to_owned(),
    ]
}

fn render_section(section: &CategorySection,) -> Vec<String,>
{
    let mut lines = Vec::with_capacity(section.lines.len() + 2,);
    lines.push(format!("{H2_OPEN}{}</h2>", section.heading),);
    lines.push(String::new(),);
    lines.extend(section.lines.iter().cloned(),);
    lines
}
