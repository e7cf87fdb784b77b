// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Settings document types describing one release notes generation run.
//!
//! The types mirror the structure of the YAML or JSON documents consumed by
//! the CLI. Mapping settings are kept in declaration order because category
//! ordering in the rendered document follows the order the caller wrote them
//! in.

use std::{fs, path::Path};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{self, Error};

const DEFAULT_MILESTONE_NAME: &str = "${VERSION}";

/// Caller supplied settings for a single generation run.
///
/// # Examples
///
/// ```
/// use relnotes::parse_settings;
///
/// let yaml = r#"
/// ownerName: octocat
/// repoName: hello-world
/// githubTokenEnvVarName: GITHUB_TOKEN
/// headerText: "Hello World ${VERSION}"
/// issueCategoryLabelMappings:
///   "Bug Fixes": "Bug Fixes"
/// "#;
/// let settings = parse_settings(yaml,).expect("valid settings",);
/// assert_eq!(settings.milestone_name, "${VERSION}");
/// assert_eq!(settings.issue_category_label_mappings.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorSettings
{
    /// Account owning the repository.
    #[serde(default)]
    pub owner_name: String,

    /// Repository to pull milestone items from.
    #[serde(default)]
    pub repo_name: String,

    /// Name of the environment variable holding the tracker token.
    #[serde(default)]
    pub github_token_env_var_name: String,

    /// Milestone title template.
    #[serde(default = "default_milestone_name")]
    pub milestone_name: String,

    /// Document header template.
    #[serde(default)]
    pub header_text: String,

    /// Value substituted for `${VERSION}`.
    #[serde(default)]
    pub version: Option<String,>,

    /// Value substituted for `${ENVIRONMENT}` and `${RELEASETYPE}`.
    #[serde(default)]
    pub release_type: Option<String,>,

    /// Optional free text section rendered after the header.
    #[serde(default)]
    pub extra_info: Option<ExtraInfo,>,

    /// Literal substring replacements applied to whole titles.
    #[serde(default)]
    pub word_replacements: IndexMap<String, String,>,

    /// Replacements for the capitalized first word of a title.
    #[serde(default)]
    pub first_word_replacements: IndexMap<String, String,>,

    /// Words to emphasize, mapped to a style list such as `"bold,italic"`.
    #[serde(default)]
    pub styled_words_list: IndexMap<String, String,>,

    /// Emojis stripped from titles.
    #[serde(default)]
    pub emojis_to_remove_from_title: Vec<String,>,

    /// Category name to issue type name.
    #[serde(default)]
    pub issue_category_issue_type_mappings: IndexMap<String, String,>,

    /// Category name to issue label name.
    #[serde(default)]
    pub issue_category_label_mappings: IndexMap<String, String,>,

    /// Category name to pull request label name.
    #[serde(default)]
    pub pr_category_label_mappings: IndexMap<String, String,>,

    /// Labels excluding an item from the notes entirely.
    ///
    /// `None` and an empty list have the same effect.
    #[serde(default)]
    pub ignore_labels: Option<Vec<String,>,>,

    /// Section name collecting issues no other issue category claimed.
    #[serde(default)]
    pub other_category_name: Option<String,>,

    /// Render versions in bold.
    #[serde(default)]
    pub bolded_versions: bool,

    /// Render versions in italics.
    #[serde(default)]
    pub italic_versions: bool,
}

impl GeneratorSettings
{
    /// Style applied to versions found in titles.
    pub fn version_style(&self,) -> TextStyle
    {
        TextStyle {
            bold: self.bolded_versions, italic: self.italic_versions,
        }
    }

    /// Ignore list, empty when the setting is absent.
    pub fn ignored_labels(&self,) -> &[String]
    {
        self.ignore_labels.as_deref().unwrap_or_default()
    }

    /// Checks that every required field is present.
    ///
    /// Fields are checked in a fixed order and the first blank one is
    /// reported. No network I/O happens here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the missing field.
    pub fn check_required(&self,) -> Result<(), Error,>
    {
        let required = [
            ("ownerName", &self.owner_name,),
            ("repoName", &self.repo_name,),
            ("headerText", &self.header_text,),
            ("githubTokenEnvVarName", &self.github_token_env_var_name,),
        ];

        for (field, value,) in required {
            if value.trim().is_empty() {
                return Err(Error::configuration(field,),);
            }
        }

        Ok((),)
    }
}

fn default_milestone_name() -> String
{
    DEFAULT_MILESTONE_NAME.to_owned()
}

/// Extra free text section rendered between the header and the categories.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize,)]
pub struct ExtraInfo
{
    /// Section title.
    pub title: String,
    /// Section body, rendered as-is.
    pub text:  String,
}

/// Markdown emphasis applied to a word or version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default,)]
pub struct TextStyle
{
    /// Wrap in `**`.
    pub bold:   bool,
    /// Wrap in `_`.
    pub italic: bool,
}

impl TextStyle
{
    /// Parses a comma separated style list.
    ///
    /// Tokens are compared case-insensitively after trimming. Anything other
    /// than `bold` or `italic` is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use relnotes::TextStyle;
    ///
    /// let style = TextStyle::parse("Bold, italic, underline",);
    /// assert!(style.bold && style.italic);
    /// assert_eq!(style.wrap("crash"), "**_crash_**");
    /// ```
    pub fn parse(styles: &str,) -> Self
    {
        styles.to_lowercase().split(',',).map(str::trim,).fold(Self::default(), |style, token| {
            match token {
                "bold" => Self {
                    bold: true, ..style
                },
                "italic" => Self {
                    italic: true, ..style
                },
                _ => style,
            }
        },)
    }

    /// Opening and closing markers, outermost first.
    pub fn markers(self,) -> (&'static str, &'static str,)
    {
        match (self.bold, self.italic,) {
            (true, true,) => ("**_", "_**",),
            (true, false,) => ("**", "**",),
            (false, true,) => ("_", "_",),
            (false, false,) => ("", "",),
        }
    }

    /// Returns `true` when the style adds no markers.
    pub fn is_plain(self,) -> bool
    {
        !self.bold && !self.italic
    }

    /// Wraps `text` in the markers of this style.
    pub fn wrap(self, text: &str,) -> String
    {
        let (open, close,) = self.markers();
        format!("{open}{text}{close}")
    }
}

/// Loads settings from the provided YAML or JSON file path.
///
/// # Errors
///
/// Returns an [`Error`] when the file cannot be read or decoded.
pub fn load_settings(path: &Path,) -> Result<GeneratorSettings, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_settings(&contents,)
}

/// Parses settings from a YAML or JSON document string.
///
/// Required fields are not checked here; see
/// [`GeneratorSettings::check_required`].
///
/// # Errors
///
/// Propagates [`Error::Parse`] when the document cannot be decoded and
/// [`Error::Validation`] when it is empty.
pub fn parse_settings(contents: &str,) -> Result<GeneratorSettings, Error,>
{
    if contents.trim().is_empty() {
        return Err(Error::validation("settings document is empty",),);
    }

    Ok(serde_yaml::from_str(contents,)?,)
}
