// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Tracked items and the contract the generator needs from an issue tracker.
///
/// Issues and pull requests share the fields that end up in a release notes
/// line through [`LineItem`]. Only issues carry an issue type.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{credential::Credential, error::Error};

/// Issue snapshot belonging to a milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct Issue
{
    pub number:     u64,
    pub title:      String,
    pub html_url:   String,
    pub labels:     Vec<String,>,
    /// Organization issue type name, such as `Bug` or `Feature`.
    pub issue_type: Option<String,>,
}

/// Pull request snapshot belonging to a milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct PullRequest
{
    pub number:   u64,
    pub title:    String,
    pub html_url: String,
    pub labels:   Vec<String,>,
}

/// Fields shared by every item that can appear as a release notes line.
pub trait LineItem
{
    fn number(&self,) -> u64;
    fn title(&self,) -> &str;
    fn url(&self,) -> &str;
    fn labels(&self,) -> &[String];

    /// Replaces the title, used once sanitization has run.
    fn set_title(&mut self, title: String,);

    /// Returns `true` when the item carries a label named exactly `name`.
    fn has_label(&self, name: &str,) -> bool
    {
        self.labels().iter().any(|label| label == name,)
    }

    /// Returns `true` when the item carries any of `names`.
    fn has_any_label(&self, names: &[String],) -> bool
    {
        names.iter().any(|name| self.has_label(name,),)
    }
}

impl LineItem for Issue
{
    fn number(&self,) -> u64
    {
        self.number
    }

    fn title(&self,) -> &str
    {
        &self.title
    }

    fn url(&self,) -> &str
    {
        &self.html_url
    }

    fn labels(&self,) -> &[String]
    {
        &self.labels
    }

    fn set_title(&mut self, title: String,)
    {
        self.title = title;
    }
}

impl LineItem for PullRequest
{
    fn number(&self,) -> u64
    {
        self.number
    }

    fn title(&self,) -> &str
    {
        &self.title
    }

    fn url(&self,) -> &str
    {
        &self.html_url
    }

    fn labels(&self,) -> &[String]
    {
        &self.labels
    }

    fn set_title(&mut self, title: String,)
    {
        self.title = title;
    }
}

/// Read-only view of a remote issue tracker scoped by owner and repository.
///
/// Implementations own transport concerns such as timeouts and retries.
#[async_trait]
pub trait IssueTracker: Send + Sync
{
    /// Returns `true` when `owner/repo` exists and is visible.
    async fn repository_exists(&self, owner: &str, repo: &str,) -> Result<bool, Error,>;

    /// Returns `true` when `owner/repo` defines a label named `label`.
    async fn label_exists(&self, owner: &str, repo: &str, label: &str,) -> Result<bool, Error,>;

    /// Issues attached to the milestone titled `milestone`, open or closed.
    async fn milestone_issues(
        &self,
        owner: &str,
        repo: &str,
        milestone: &str,
    ) -> Result<Vec<Issue,>, Error,>;

    /// Pull requests attached to the milestone titled `milestone`, open or
    /// closed.
    async fn milestone_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        milestone: &str,
    ) -> Result<Vec<PullRequest,>, Error,>;
}

/// Builds an authenticated [`IssueTracker`].
pub trait TrackerConnector
{
    type Tracker: IssueTracker;

    /// Creates a tracker client authenticated with `credential`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when the client cannot be constructed.
    fn connect(&self, credential: &Credential,) -> Result<Self::Tracker, Error,>;
}
