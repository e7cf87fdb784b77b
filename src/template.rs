// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Placeholder substitution for milestone and header templates.

use crate::settings::GeneratorSettings;

const VERSION: &str = "${VERSION}";
const ENVIRONMENT: &str = "${ENVIRONMENT}";
const RELEASE_TYPE: &str = "${RELEASETYPE}";
const REPO_NAME: &str = "${REPONAME}";

/// Values substituted into templates.
///
/// Absent values substitute as the empty string. Only the first occurrence of
/// each placeholder is replaced.
///
/// # Examples
///
/// ```
/// use relnotes::Placeholders;
///
/// let values = Placeholders {
///     version: Some("v1.2.0",), release_type: Some("Preview",), repo_name: "Velaptor",
/// };
/// assert_eq!(values.apply("${REPONAME} ${ENVIRONMENT} ${VERSION}",), "Velaptor Preview v1.2.0");
/// ```
#[derive(Debug, Clone, Copy, Default,)]
pub struct Placeholders<'a,>
{
    pub version:      Option<&'a str,>,
    pub release_type: Option<&'a str,>,
    pub repo_name:    &'a str,
}

impl<'a,> Placeholders<'a,>
{
    /// Collects placeholder values from settings.
    pub fn from_settings(settings: &'a GeneratorSettings,) -> Self
    {
        Self {
            version:      settings.version.as_deref(),
            release_type: settings.release_type.as_deref(),
            repo_name:    &settings.repo_name,
        }
    }

    /// Substitutes every known placeholder in `template`.
    pub fn apply(&self, template: &str,) -> String
    {
        let release_type = self.release_type.unwrap_or_default();

        [
            (VERSION, self.version.unwrap_or_default(),),
            (ENVIRONMENT, release_type,),
            (RELEASE_TYPE, release_type,),
            (REPO_NAME, self.repo_name,),
        ]
        .into_iter()
        .fold(template.to_owned(), |text, (placeholder, value,)| text.replacen(placeholder, value, 1,),)
    }
}
