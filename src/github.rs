// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// GitHub REST implementation of [`IssueTracker`].
///
/// Milestones are matched by exact title. GitHub lists pull requests through
/// the issues endpoint as well; entries carrying a `pull_request` object are
/// reported as pull requests and the rest as issues. The milestone listing is
/// fetched once per tracker and milestone and shared by both item kinds.
use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex, PoisonError},
};

use async_trait::async_trait;
use masterror::AppError;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::{
    credential::Credential,
    error::Error,
    retry::{RetryConfig, retry_with_backoff},
    tracker::{Issue, IssueTracker, PullRequest, TrackerConnector},
};

const PER_PAGE: u8 = 100;
const MAX_PAGES: u32 = 50;

/// Builds [`GitHubTracker`] clients from personal access tokens.
#[derive(Debug, Clone, Default,)]
pub struct GitHubConnector
{
    retry: RetryConfig,
}

impl GitHubConnector
{
    pub fn new(retry: RetryConfig,) -> Self
    {
        Self {
            retry,
        }
    }
}

impl TrackerConnector for GitHubConnector
{
    type Tracker = GitHubTracker;

    fn connect(&self, credential: &Credential,) -> Result<Self::Tracker, Error,>
    {
        let client =
            Octocrab::builder().personal_token(credential.expose().to_owned(),).build().map_err(
                |e| AppError::unauthorized(format!("failed to initialize GitHub client: {e}"),),
            )?;

        Ok(GitHubTracker::new(client, self.retry.clone(),),)
    }
}

/// Authenticated GitHub client.
#[derive(Debug, Clone,)]
pub struct GitHubTracker
{
    client:     Octocrab,
    retry:      RetryConfig,
    milestones: MilestoneCache,
}

/// Milestone items keyed by `owner/repo#milestone`, each fetched at most once.
#[derive(Debug, Clone, Default,)]
struct MilestoneCache
{
    entries: Arc<Mutex<HashMap<String, Arc<OnceCell<Vec<IssueRecord,>,>,>,>,>,>,
}

impl MilestoneCache
{
    fn cell(&self, milestone: &str,) -> Arc<OnceCell<Vec<IssueRecord,>,>,>
    {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner,);
        entries.entry(milestone.to_owned(),).or_default().clone()
    }

    /// Returns the cached records, running `fetch` only for the first caller.
    async fn records<F, Fut,>(&self, milestone: &str, fetch: F,) -> Result<Vec<IssueRecord,>, Error,>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<IssueRecord,>, Error,>,>,
    {
        let cell = self.cell(milestone,);
        let records = cell.get_or_try_init(fetch,).await?;
        Ok(records.clone(),)
    }
}

#[derive(Debug, Clone, Serialize,)]
struct PageQuery
{
    state:     &'static str,
    per_page:  u8,
    page:      u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    milestone: Option<String,>,
}

#[derive(Debug, Deserialize,)]
struct MilestoneRecord
{
    number: u64,
    title:  String,
}

#[derive(Debug, Clone, Deserialize,)]
struct LabelRecord
{
    name: String,
}

#[derive(Debug, Clone, Deserialize,)]
struct IssueTypeRecord
{
    name: String,
}

#[derive(Debug, Clone, Deserialize,)]
struct IssueRecord
{
    number:       u64,
    title:        String,
    html_url:     String,
    #[serde(default)]
    labels:       Vec<LabelRecord,>,
    #[serde(default, rename = "type")]
    issue_type:   Option<IssueTypeRecord,>,
    #[serde(default)]
    pull_request: Option<serde_json::Value,>,
}

impl IssueRecord
{
    fn is_pull_request(&self,) -> bool
    {
        self.pull_request.is_some()
    }

    fn label_names(labels: Vec<LabelRecord,>,) -> Vec<String,>
    {
        labels.into_iter().map(|label| label.name,).collect()
    }
}

impl From<IssueRecord,> for Issue
{
    fn from(record: IssueRecord,) -> Self
    {
        Self {
            number:     record.number,
            title:      record.title,
            html_url:   record.html_url,
            labels:     IssueRecord::label_names(record.labels,),
            issue_type: record.issue_type.map(|kind| kind.name,),
        }
    }
}

impl From<IssueRecord,> for PullRequest
{
    fn from(record: IssueRecord,) -> Self
    {
        Self {
            number:   record.number,
            title:    record.title,
            html_url: record.html_url,
            labels:   IssueRecord::label_names(record.labels,),
        }
    }
}

impl GitHubTracker
{
    pub fn new(client: Octocrab, retry: RetryConfig,) -> Self
    {
        Self {
            client,
            retry,
            milestones: MilestoneCache::default(),
        }
    }

    /// Issues a GET and maps HTTP 404 to `false`.
    async fn resource_exists(&self, route: String, operation: &str,) -> Result<bool, Error,>
    {
        let client = self.client.clone();

        let found = retry_with_backoff(&self.retry, operation, || {
            let client = client.clone();
            let route = route.clone();
            async move {
                match client.get::<serde_json::Value, _, (),>(route, None,).await {
                    Ok(_,) => Ok(true,),
                    Err(error,) if is_not_found(&error,) => Ok(false,),
                    Err(error,) => Err(AppError::service(format!("GitHub request failed: {error}"),),),
                }
            }
        },)
        .await?;

        Ok(found,)
    }

    /// Collects every page of a list endpoint.
    async fn fetch_all<T,>(
        &self,
        route: &str,
        milestone: Option<u64,>,
        operation: &str,
    ) -> Result<Vec<T,>, Error,>
    where
        T: DeserializeOwned + Send,
    {
        let mut items = Vec::new();

        for page in 1..=MAX_PAGES {
            let query = PageQuery {
                state: "all",
                per_page: PER_PAGE,
                page,
                milestone: milestone.map(|number| number.to_string(),),
            };
            let client = self.client.clone();

            let batch: Vec<T,> = retry_with_backoff(&self.retry, operation, || {
                let client = client.clone();
                let query = query.clone();
                let route = route.to_owned();
                async move {
                    client.get(route, Some(&query,),).await.map_err(|e| {
                        AppError::service(format!("GitHub request failed: {e}"),)
                    },)
                }
            },)
            .await?;

            let count = batch.len();
            items.extend(batch,);
            debug!("{}: page {} returned {} entries", operation, page, count);

            if count < usize::from(PER_PAGE,) {
                return Ok(items,);
            }
        }

        warn!("{}: stopped after {} pages", operation, MAX_PAGES);
        Ok(items,)
    }

    async fn milestone_number(
        &self,
        owner: &str,
        repo: &str,
        milestone: &str,
    ) -> Result<Option<u64,>, Error,>
    {
        let milestones: Vec<MilestoneRecord,> = self
            .fetch_all(&format!("/repos/{owner}/{repo}/milestones"), None, "list milestones",)
            .await?;

        Ok(milestones.into_iter().find(|record| record.title == milestone,).map(|record| record.number,),)
    }

    async fn cached_milestone_records(
        &self,
        owner: &str,
        repo: &str,
        milestone: &str,
    ) -> Result<Vec<IssueRecord,>, Error,>
    {
        let key = format!("{owner}/{repo}#{milestone}");
        self.milestones.records(&key, || self.milestone_records(owner, repo, milestone,),).await
    }

    async fn milestone_records(
        &self,
        owner: &str,
        repo: &str,
        milestone: &str,
    ) -> Result<Vec<IssueRecord,>, Error,>
    {
        let Some(number,) = self.milestone_number(owner, repo, milestone,).await? else {
            warn!("Milestone '{}' not found in {}/{}", milestone, owner, repo);
            return Ok(Vec::new(),);
        };

        let records: Vec<IssueRecord,> = self
            .fetch_all(
                &format!("/repos/{owner}/{repo}/issues"),
                Some(number,),
                "list milestone items",
            )
            .await?;

        info!("Milestone '{}' holds {} items in {}/{}", milestone, records.len(), owner, repo);
        Ok(records,)
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker
{
    async fn repository_exists(&self, owner: &str, repo: &str,) -> Result<bool, Error,>
    {
        self.resource_exists(format!("/repos/{owner}/{repo}"), "get repository",).await
    }

    async fn label_exists(&self, owner: &str, repo: &str, label: &str,) -> Result<bool, Error,>
    {
        let route = format!("/repos/{owner}/{repo}/labels/{}", urlencoding::encode(label,));
        self.resource_exists(route, "get label",).await
    }

    async fn milestone_issues(
        &self,
        owner: &str,
        repo: &str,
        milestone: &str,
    ) -> Result<Vec<Issue,>, Error,>
    {
        let records = self.cached_milestone_records(owner, repo, milestone,).await?;
        Ok(records.into_iter().filter(|record| !record.is_pull_request(),).map(Issue::from,).collect(),)
    }

    async fn milestone_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        milestone: &str,
    ) -> Result<Vec<PullRequest,>, Error,>
    {
        let records = self.cached_milestone_records(owner, repo, milestone,).await?;
        Ok(records
            .into_iter()
            .filter(IssueRecord::is_pull_request,)
            .map(PullRequest::from,)
            .collect(),)
    }
}

fn is_not_found(error: &octocrab::Error,) -> bool
{
    matches!(error, octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404)
}
