// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Partitions milestone items into named release notes sections.
///
/// Four passes run over the sanitized items: issue type, issue label, pull
/// request label and the "other" catch-all. Each pass yields only non-empty
/// sections. Passes are merged in that order into one ordered map; a section
/// name produced again by a later pass replaces the earlier section's
/// content while keeping its position.
///
/// The issue type and label passes match items against the mapping *key*
/// (the category name), while the section heading shows the mapping *value*.
use indexmap::IndexMap;
use tracing::debug;

use crate::{
    settings::GeneratorSettings,
    tracker::{Issue, LineItem, PullRequest},
};

/// Ordered sections keyed by category display name.
pub type Sections = IndexMap<String, CategorySection,>;

/// One rendered category: a heading and its numbered lines.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct CategorySection
{
    /// Text shown in the section heading.
    pub heading: String,
    /// Numbered Markdown lines, one per item, in fetch order.
    pub lines:   Vec<String,>,
}

impl CategorySection
{
    fn from_items<'a, T, I,>(heading: &str, items: I,) -> Option<Self,>
    where
        T: LineItem + 'a,
        I: IntoIterator<Item = &'a T,>,
    {
        let lines: Vec<String,> = items
            .into_iter()
            .enumerate()
            .map(|(index, item,)| format_line(index + 1, item,),)
            .collect();

        if lines.is_empty() {
            None
        } else {
            Some(Self {
                heading: heading.to_owned(), lines,
            },)
        }
    }
}

/// Formats one numbered line: `N. [#number](url) - title.`
pub fn format_line<T: LineItem,>(position: usize, item: &T,) -> String
{
    format!("{position}. [#{}]({}) - {}.", item.number(), item.url(), item.title())
}

/// Runs every pass and merges the results.
pub fn categorize(
    issues: &[Issue],
    pull_requests: &[PullRequest],
    settings: &GeneratorSettings,
) -> Sections
{
    let passes = [
        issue_type_sections(issues, &settings.issue_category_issue_type_mappings,),
        label_sections(issues, &settings.issue_category_label_mappings,),
        label_sections(pull_requests, &settings.pr_category_label_mappings,),
        other_sections(issues, settings,),
    ];

    let mut merged = Sections::new();
    for pass in passes {
        for (name, section,) in pass {
            if merged.insert(name.clone(), section,).is_some() {
                debug!("Section '{}' replaced by a later categorization pass", name);
            }
        }
    }

    merged
}

/// Groups issues whose issue type equals the mapping key.
///
/// Dashes in the key become spaces in the section name.
pub fn issue_type_sections(issues: &[Issue], mappings: &IndexMap<String, String,>,) -> Sections
{
    mappings
        .iter()
        .filter_map(|(category, heading,)| {
            let matched = issues
                .iter()
                .filter(|issue| issue.issue_type.as_deref() == Some(category.as_str(),),);
            CategorySection::from_items(heading, matched,)
                .map(|section| (category.replace('-', " ",), section,),)
        },)
        .collect()
}

/// Groups items carrying a label named like the mapping key.
pub fn label_sections<T: LineItem,>(items: &[T], mappings: &IndexMap<String, String,>,) -> Sections
{
    mappings
        .iter()
        .filter_map(|(category, heading,)| {
            let matched = items.iter().filter(|item| item.has_label(category,),);
            CategorySection::from_items(heading, matched,).map(|section| (category.clone(), section,),)
        },)
        .collect()
}

/// Collects issues claimed by neither an issue label key nor an issue type
/// key under `otherCategoryName`.
///
/// Pull requests never land here.
pub fn other_sections(issues: &[Issue], settings: &GeneratorSettings,) -> Sections
{
    let Some(name,) = settings.other_category_name.as_deref().filter(|name| !name.is_empty(),) else {
        return Sections::new();
    };

    let label_keys: Vec<String,> =
        settings.issue_category_label_mappings.keys().cloned().collect();
    let type_keys = &settings.issue_category_issue_type_mappings;

    let unclaimed = issues.iter().filter(|issue| {
        let typed = issue.issue_type.as_deref().is_some_and(|kind| type_keys.contains_key(kind,),);
        !typed && !issue.has_any_label(&label_keys,)
    },);

    CategorySection::from_items(name, unclaimed,)
        .map(|section| (name.to_owned(), section,),)
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn issue(number: u64, title: &str, labels: &[&str], issue_type: Option<&str,>,) -> Issue
    {
        Issue {
            number,
            title: title.to_owned(),
            html_url: format!("https://github.com/octo/repo/issues/{number}"),
            labels: labels.iter().map(|label| (*label).to_owned(),).collect(),
            issue_type: issue_type.map(str::to_owned,),
        }
    }

    fn pull_request(number: u64, title: &str, labels: &[&str],) -> PullRequest
    {
        PullRequest {
            number,
            title: title.to_owned(),
            html_url: format!("https://github.com/octo/repo/pull/{number}"),
            labels: labels.iter().map(|label| (*label).to_owned(),).collect(),
        }
    }

    fn map(pairs: &[(&str, &str,)],) -> IndexMap<String, String,>
    {
        pairs.iter().map(|(key, value,)| ((*key).to_owned(), (*value).to_owned(),),).collect()
    }

    #[test]
    fn format_line_matches_markdown_shape()
    {
        let item = issue(10, "Fixed crash", &[], None,);
        assert_eq!(
            format_line(1, &item,),
            "1. [#10](https://github.com/octo/repo/issues/10) - Fixed crash."
        );
    }

    #[test]
    fn label_sections_skip_empty_categories_and_keep_order()
    {
        let issues =
            vec![issue(1, "A", &["Features"], None,), issue(2, "B", &["Features"], None,)];
        let mappings = map(&[("Bug Fixes", "Bug Fixes",), ("Features", "New Features",)],);

        let sections = label_sections(&issues, &mappings,);
        assert_eq!(sections.len(), 1);
        let section = &sections["Features"];
        assert_eq!(section.heading, "New Features");
        assert_eq!(section.lines.len(), 2);
        assert!(section.lines[1].starts_with("2. [#2]"));
    }

    #[test]
    fn label_sections_match_the_mapping_key_not_the_value()
    {
        let issues = vec![issue(1, "A", &["bug"], None,)];
        let by_value = label_sections(&issues, &map(&[("Bug Fixes", "bug",)],),);
        assert!(by_value.is_empty());

        let by_key = label_sections(&issues, &map(&[("bug", "Bug Fixes",)],),);
        assert_eq!(by_key["bug"].heading, "Bug Fixes");
    }

    #[test]
    fn issue_type_sections_match_key_and_replace_dashes()
    {
        let issues = vec![
            issue(1, "A", &[], Some("Tech-Debt",),),
            issue(2, "B", &[], Some("Tech Debt",),),
            issue(3, "C", &[], None,),
        ];
        let sections = issue_type_sections(&issues, &map(&[("Tech-Debt", "Cleanup",)],),);

        let section = &sections["Tech Debt"];
        assert_eq!(section.heading, "Cleanup");
        assert_eq!(section.lines, vec![
            "1. [#1](https://github.com/octo/repo/issues/1) - A.".to_owned()
        ]);
    }

    #[test]
    fn other_section_collects_unclaimed_issues()
    {
        let settings = GeneratorSettings {
            issue_category_label_mappings: map(&[("bug", "Bugs",)],),
            issue_category_issue_type_mappings: map(&[("Feature", "Features",)],),
            other_category_name: Some("Other Changes".to_owned(),),
            ..GeneratorSettings::default()
        };
        let issues = vec![
            issue(1, "Labeled", &["bug"], None,),
            issue(2, "Typed", &[], Some("Feature",),),
            issue(3, "Loose", &["question"], Some("Task",),),
        ];

        let sections = other_sections(&issues, &settings,);
        let section = &sections["Other Changes"];
        assert_eq!(section.heading, "Other Changes");
        assert_eq!(section.lines, vec![
            "1. [#3](https://github.com/octo/repo/issues/3) - Loose.".to_owned()
        ]);
    }

    #[test]
    fn other_section_requires_a_name()
    {
        let issues = vec![issue(1, "Loose", &[], None,)];
        assert!(other_sections(&issues, &GeneratorSettings::default()).is_empty());
    }

    #[test]
    fn categorize_merges_in_pass_order()
    {
        let settings = GeneratorSettings {
            issue_category_issue_type_mappings: map(&[("Bug", "Typed Bugs",)],),
            issue_category_label_mappings: map(&[("docs", "Documentation",)],),
            pr_category_label_mappings: map(&[("deps", "Dependencies",)],),
            other_category_name: Some("Other".to_owned(),),
            ..GeneratorSettings::default()
        };
        let issues = vec![
            issue(1, "Typed", &[], Some("Bug",),),
            issue(2, "Docs", &["docs"], None,),
            issue(3, "Loose", &[], None,),
        ];
        let prs = vec![pull_request(4, "Bump", &["deps"],)];

        let sections = categorize(&issues, &prs, &settings,);
        let names: Vec<&str,> = sections.keys().map(String::as_str,).collect();
        assert_eq!(names, ["Bug", "docs", "deps", "Other"]);
    }

    #[test]
    fn later_pass_overwrites_section_with_same_name()
    {
        let settings = GeneratorSettings {
            issue_category_label_mappings: map(&[("release", "Issues",), ("bug", "Bugs",)],),
            pr_category_label_mappings: map(&[("release", "Pull Requests",)],),
            ..GeneratorSettings::default()
        };
        let issues =
            vec![issue(1, "Issue one", &["release"], None,), issue(2, "Crash", &["bug"], None,)];
        let prs = vec![pull_request(5, "PR five", &["release"],)];

        let sections = categorize(&issues, &prs, &settings,);
        let names: Vec<&str,> = sections.keys().map(String::as_str,).collect();
        assert_eq!(names, ["release", "bug"]);

        let release = &sections["release"];
        assert_eq!(release.heading, "Pull Requests");
        assert_eq!(release.lines, vec![
            "1. [#5](https://github.com/octo/repo/pull/5) - PR five.".to_owned()
        ]);
    }

    #[test]
    fn empty_later_pass_does_not_erase_earlier_section()
    {
        let settings = GeneratorSettings {
            issue_category_label_mappings: map(&[("release", "Issues",)],),
            pr_category_label_mappings: map(&[("release", "Pull Requests",)],),
            ..GeneratorSettings::default()
        };
        let issues = vec![issue(1, "Issue one", &["release"], None,)];

        let sections = categorize(&issues, &[], &settings,);
        assert_eq!(sections["release"].heading, "Issues");
    }
}
