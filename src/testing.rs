// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory tracker used by unit tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use tokio::sync::Barrier;

use crate::{
    credential::Credential,
    error::Error,
    tracker::{Issue, IssueTracker, PullRequest, TrackerConnector},
};

/// Fake tracker serving fixed items and counting lookups.
#[derive(Debug, Clone,)]
pub struct FakeTracker
{
    repository_exists: bool,
    labels:            Vec<String,>,
    fail_label_checks: bool,
    label_gate:        Option<Arc<Barrier,>,>,
    issues:            Vec<Issue,>,
    pull_requests:     Vec<PullRequest,>,
    label_checks:      Arc<AtomicUsize,>,
    milestones:        Arc<Mutex<Vec<String,>,>,>,
}

impl FakeTracker
{
    pub fn new() -> Self
    {
        Self {
            repository_exists: true,
            labels:            Vec::new(),
            fail_label_checks: false,
            label_gate:        None,
            issues:            Vec::new(),
            pull_requests:     Vec::new(),
            label_checks:      Arc::new(AtomicUsize::new(0,),),
            milestones:        Arc::new(Mutex::new(Vec::new(),),),
        }
    }

    pub fn without_repository(mut self,) -> Self
    {
        self.repository_exists = false;
        self
    }

    pub fn with_labels(mut self, labels: &[&str],) -> Self
    {
        self.labels.extend(labels.iter().map(|label| (*label).to_owned(),),);
        self
    }

    pub fn failing_label_checks(mut self,) -> Self
    {
        self.fail_label_checks = true;
        self
    }

    /// Makes every label check wait until `parties` checks are in flight.
    pub fn with_label_gate(mut self, parties: usize,) -> Self
    {
        self.label_gate = Some(Arc::new(Barrier::new(parties,),),);
        self
    }

    pub fn with_issue(mut self, issue: Issue,) -> Self
    {
        self.issues.push(issue,);
        self
    }

    pub fn with_pull_request(mut self, pull_request: PullRequest,) -> Self
    {
        self.pull_requests.push(pull_request,);
        self
    }

    /// Number of label existence checks served so far.
    pub fn label_checks(&self,) -> usize
    {
        self.label_checks.load(Ordering::SeqCst,)
    }

    /// Milestone names requested so far, one entry per lookup.
    pub fn milestone_lookups(&self,) -> Vec<String,>
    {
        self.milestones.lock().expect("milestone log poisoned",).clone()
    }

    fn record_milestone(&self, milestone: &str,)
    {
        self.milestones.lock().expect("milestone log poisoned",).push(milestone.to_owned(),);
    }
}

#[async_trait]
impl IssueTracker for FakeTracker
{
    async fn repository_exists(&self, _owner: &str, _repo: &str,) -> Result<bool, Error,>
    {
        Ok(self.repository_exists,)
    }

    async fn label_exists(&self, _owner: &str, _repo: &str, label: &str,) -> Result<bool, Error,>
    {
        self.label_checks.fetch_add(1, Ordering::SeqCst,);
        if let Some(gate,) = &self.label_gate {
            gate.wait().await;
        }
        if self.fail_label_checks {
            return Err(Error::service("label lookup timed out",),);
        }
        Ok(self.labels.iter().any(|known| known == label,),)
    }

    async fn milestone_issues(
        &self,
        _owner: &str,
        _repo: &str,
        milestone: &str,
    ) -> Result<Vec<Issue,>, Error,>
    {
        self.record_milestone(milestone,);
        Ok(self.issues.clone(),)
    }

    async fn milestone_pull_requests(
        &self,
        _owner: &str,
        _repo: &str,
        milestone: &str,
    ) -> Result<Vec<PullRequest,>, Error,>
    {
        self.record_milestone(milestone,);
        Ok(self.pull_requests.clone(),)
    }
}

/// Connector handing out clones of one [`FakeTracker`].
///
/// Clones share their counters, so the test keeps observing lookups.
#[derive(Debug, Clone,)]
pub struct FakeConnector
{
    pub tracker: FakeTracker,
}

impl TrackerConnector for FakeConnector
{
    type Tracker = FakeTracker;

    fn connect(&self, _credential: &Credential,) -> Result<Self::Tracker, Error,>
    {
        Ok(self.tracker.clone(),)
    }
}
