// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Release notes generation entry point.
//!
//! One call to [`ReleaseNotesGenerator::generate_notes`] runs the whole flow:
//! required fields, credential, remote validation, milestone fetch, ignore
//! filtering, title sanitization, categorization and rendering. Any failure
//! aborts the call without producing output.

use tracing::{debug, info};

use crate::{
    categorize::categorize,
    credential::CredentialProvider,
    error::Error,
    render::render_document,
    sanitize::sanitize,
    settings::GeneratorSettings,
    template::Placeholders,
    tracker::{Issue, IssueTracker, LineItem, PullRequest, TrackerConnector},
    validate::SettingsValidator
};

/// Generates release notes for one settings document.
///
/// # Example
///
/// ```no_run
/// use relnotes::{EnvCredentialProvider, GitHubConnector, ReleaseNotesGenerator, load_settings};
///
/// # async fn example() -> Result<(), relnotes::Error> {
/// let settings = load_settings(std::path::Path::new("release-notes.yaml"))?;
/// let generator = ReleaseNotesGenerator::new(GitHubConnector::default(), EnvCredentialProvider);
/// let markdown = generator.generate_notes(&settings).await?;
/// println!("{markdown}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReleaseNotesGenerator<C, P> {
    connector:   C,
    credentials: P
}

/// Items of one milestone after ignore filtering and sanitization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MilestoneItems {
    pub issues:        Vec<Issue>,
    pub pull_requests: Vec<PullRequest>
}

impl<C, P> ReleaseNotesGenerator<C, P>
where
    C: TrackerConnector,
    P: CredentialProvider
{
    pub fn new(connector: C, credentials: P) -> Self {
        Self {
            connector,
            credentials
        }
    }

    /// Produces the Markdown document for `settings`.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] for a missing required setting
    /// - [`Error::MissingCredential`] when the token variable is not set
    /// - [`Error::RepositoryNotFound`] and [`Error::InvalidLabels`] from
    ///   validation
    /// - [`Error::VersionResolution`] for malformed versions in titles
    /// - [`Error::Service`] for tracker transport failures
    pub async fn generate_notes(&self, settings: &GeneratorSettings) -> Result<String, Error> {
        settings.check_required()?;

        let credential = self.credentials.resolve(&settings.github_token_env_var_name)?;
        let tracker = self.connector.connect(&credential)?;

        SettingsValidator::new(&tracker).validate(settings).await?;

        let items = fetch_items(&tracker, settings).await?;
        let sections = categorize(&items.issues, &items.pull_requests, settings);
        debug!("Categorized items into {} sections", sections.len());

        let header = Placeholders::from_settings(settings).apply(&settings.header_text);
        let document = render_document(&header, settings.extra_info.as_ref(), &sections);

        info!(
            "Generated release notes for {}/{} with {} sections",
            settings.owner_name,
            settings.repo_name,
            sections.len()
        );
        Ok(document)
    }
}

/// Fetches milestone issues and pull requests, drops ignored items and
/// sanitizes every remaining title.
///
/// # Errors
///
/// Propagates tracker errors and [`Error::VersionResolution`].
pub async fn fetch_items<T>(tracker: &T, settings: &GeneratorSettings) -> Result<MilestoneItems, Error>
where
    T: IssueTracker + ?Sized
{
    let milestone = Placeholders::from_settings(settings).apply(&settings.milestone_name);
    let owner = settings.owner_name.as_str();
    let repo = settings.repo_name.as_str();
    info!("Fetching items for milestone '{}' of {}/{}", milestone, owner, repo);

    let (issues, pull_requests) = tokio::try_join!(
        tracker.milestone_issues(owner, repo, &milestone),
        tracker.milestone_pull_requests(owner, repo, &milestone)
    )?;
    debug!("Fetched {} issues and {} pull requests", issues.len(), pull_requests.len());

    Ok(MilestoneItems {
        issues:        prepare(issues, settings)?,
        pull_requests: prepare(pull_requests, settings)?
    })
}

fn prepare<T: LineItem>(items: Vec<T>, settings: &GeneratorSettings) -> Result<Vec<T>, Error> {
    let kept = match settings.ignore_labels.as_deref() {
        Some(ignored) => {
            let before = items.len();
            let kept: Vec<T> = items
                .into_iter()
                .filter(|item| !item.has_any_label(ignored))
                .collect();
            debug!("Ignore list removed {} items", before - kept.len());
            kept
        }
        None => items
    };

    kept.into_iter()
        .map(|mut item| {
            let title = sanitize(item.title(), settings)?;
            item.set_title(title);
            Ok::<T, Error>(item)
        })
        .collect()
}
