// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Remote precondition checks run before any milestone item is fetched.
///
/// The repository must exist and every label referenced by the label
/// mappings and the ignore list must be defined in it. Labels of one setting
/// group are checked concurrently and every missing label is reported at
/// once.
use futures::future::join_all;
use tracing::{debug, info};

use crate::{
    error::{Error, LabelList},
    settings::GeneratorSettings,
    tracker::IssueTracker,
};

/// Validates settings against a connected tracker.
pub struct SettingsValidator<'a, T: ?Sized,>
{
    tracker: &'a T,
}

impl<'a, T: IssueTracker + ?Sized,> SettingsValidator<'a, T,>
{
    pub fn new(tracker: &'a T,) -> Self
    {
        Self {
            tracker,
        }
    }

    /// Checks the repository, then each label group in turn.
    ///
    /// Required fields are expected to have been checked already with
    /// [`GeneratorSettings::check_required`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::RepositoryNotFound`], [`Error::InvalidLabels`] for the
    /// first group with unknown labels, or the tracker's transport error.
    pub async fn validate(&self, settings: &GeneratorSettings,) -> Result<(), Error,>
    {
        let owner = settings.owner_name.as_str();
        let repo = settings.repo_name.as_str();

        debug!("Checking that {}/{} exists", owner, repo);
        if !self.tracker.repository_exists(owner, repo,).await? {
            return Err(Error::RepositoryNotFound {
                owner: owner.to_owned(),
                repo:  repo.to_owned(),
            },);
        }

        let groups = [
            ("issueCategoryLabelMappings", distinct(settings.issue_category_label_mappings.keys(),),),
            ("prCategoryLabelMappings", distinct(settings.pr_category_label_mappings.keys(),),),
            ("ignoreLabels", distinct(settings.ignored_labels().iter(),),),
        ];

        for (setting, labels,) in groups {
            self.check_labels(owner, repo, setting, &labels,).await?;
        }

        info!("Settings validated against {}/{}", owner, repo);
        Ok((),)
    }

    async fn check_labels(
        &self,
        owner: &str,
        repo: &str,
        setting: &str,
        labels: &[String],
    ) -> Result<(), Error,>
    {
        if labels.is_empty() {
            return Ok((),);
        }

        debug!("Checking {} labels referenced by {}", labels.len(), setting);
        let results =
            join_all(labels.iter().map(|label| self.tracker.label_exists(owner, repo, label,),),)
                .await;

        let mut missing = Vec::new();
        for (label, result,) in labels.iter().zip(results,) {
            if !result? {
                missing.push(label.clone(),);
            }
        }

        if missing.is_empty() {
            Ok((),)
        } else {
            Err(Error::InvalidLabels {
                setting:    setting.to_owned(),
                repository: format!("{owner}/{repo}"),
                labels:     LabelList(missing,),
            },)
        }
    }
}

fn distinct<'a,>(labels: impl Iterator<Item = &'a String,>,) -> Vec<String,>
{
    let mut unique: Vec<String,> = Vec::new();
    for label in labels {
        if !unique.contains(label,) {
            unique.push(label.clone(),);
        }
    }
    unique
}

#[cfg(test)]
mod tests
{
    use std::time::Duration;

    use super::*;
    use crate::testing::FakeTracker;

    fn settings() -> GeneratorSettings
    {
        GeneratorSettings {
            owner_name: "octo".to_owned(),
            repo_name: "repo".to_owned(),
            github_token_env_var_name: "TOKEN".to_owned(),
            header_text: "Notes".to_owned(),
            ..GeneratorSettings::default()
        }
    }

    #[tokio::test]
    async fn missing_repository_fails_before_label_checks()
    {
        let tracker = FakeTracker::new().without_repository();
        let mut settings = settings();
        settings.ignore_labels = Some(vec!["wontfix".to_owned()],);

        let error = SettingsValidator::new(&tracker,)
            .validate(&settings,)
            .await
            .expect_err("expected missing repository",);
        assert!(matches!(error, Error::RepositoryNotFound { .. }));
        assert_eq!(tracker.label_checks(), 0);
    }

    #[tokio::test]
    async fn every_missing_label_of_a_group_is_reported()
    {
        let tracker = FakeTracker::new().with_labels(&["bug"],);
        let mut settings = settings();
        settings.issue_category_label_mappings.insert("bug".to_owned(), "Bugs".to_owned(),);
        settings.issue_category_label_mappings.insert("docs".to_owned(), "Docs".to_owned(),);
        settings.issue_category_label_mappings.insert("perf".to_owned(), "Perf".to_owned(),);

        let error = SettingsValidator::new(&tracker,)
            .validate(&settings,)
            .await
            .expect_err("expected invalid labels",);
        match error {
            Error::InvalidLabels {
                setting,
                labels,
                ..
            } => {
                assert_eq!(setting, "issueCategoryLabelMappings");
                assert_eq!(labels.0, vec!["docs".to_owned(), "perf".to_owned()]);
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
        assert_eq!(tracker.label_checks(), 3);
    }

    #[tokio::test]
    async fn labels_of_a_group_are_checked_concurrently()
    {
        let tracker = FakeTracker::new().with_labels(&["bug", "docs", "perf"],).with_label_gate(3,);
        let mut settings = settings();
        settings.issue_category_label_mappings.insert("bug".to_owned(), "Bugs".to_owned(),);
        settings.issue_category_label_mappings.insert("docs".to_owned(), "Docs".to_owned(),);
        settings.issue_category_label_mappings.insert("perf".to_owned(), "Perf".to_owned(),);

        let validator = SettingsValidator::new(&tracker,);
        let validation = validator.validate(&settings,);
        tokio::time::timeout(Duration::from_secs(5,), validation,)
            .await
            .expect("label checks of one group must be in flight together",)
            .expect("valid settings",);
        assert_eq!(tracker.label_checks(), 3);
    }

    #[tokio::test]
    async fn groups_are_checked_in_order()
    {
        let tracker = FakeTracker::new().with_labels(&["bug"],);
        let mut settings = settings();
        settings.pr_category_label_mappings.insert("deps".to_owned(), "Deps".to_owned(),);
        settings.ignore_labels = Some(vec!["wontfix".to_owned()],);

        let error = SettingsValidator::new(&tracker,)
            .validate(&settings,)
            .await
            .expect_err("expected invalid labels",);
        assert!(error.to_string().contains("'prCategoryLabelMappings'"));
        assert!(!error.to_string().contains("wontfix"));
    }

    #[tokio::test]
    async fn duplicate_labels_are_checked_once()
    {
        let tracker = FakeTracker::new().with_labels(&["wontfix"],);
        let mut settings = settings();
        settings.ignore_labels = Some(vec!["wontfix".to_owned(), "wontfix".to_owned()],);

        SettingsValidator::new(&tracker,).validate(&settings,).await.expect("valid settings",);
        assert_eq!(tracker.label_checks(), 1);
    }

    #[tokio::test]
    async fn empty_ignore_list_needs_no_lookups()
    {
        let tracker = FakeTracker::new();
        let mut settings = settings();
        settings.ignore_labels = Some(Vec::new(),);

        SettingsValidator::new(&tracker,).validate(&settings,).await.expect("valid settings",);
        assert_eq!(tracker.label_checks(), 0);
    }

    #[tokio::test]
    async fn transport_errors_propagate()
    {
        let tracker = FakeTracker::new().failing_label_checks();
        let mut settings = settings();
        settings.ignore_labels = Some(vec!["wontfix".to_owned()],);

        let error = SettingsValidator::new(&tracker,)
            .validate(&settings,)
            .await
            .expect_err("expected service error",);
        assert!(matches!(error, Error::Service { .. }));
    }
}
