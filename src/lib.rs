//! Release notes generation from GitHub milestones.
//!
//! The library loads a settings document, validates it against the target
//! repository, fetches the issues and pull requests of one milestone and
//! renders them into a categorized Markdown document. Titles are cleaned up
//! on the way (emoji removal, word replacement, emphasis and version
//! normalization). The issue tracker sits behind [`IssueTracker`] so the whole
//! flow runs against in-memory fakes in tests.

mod categorize;
mod credential;
mod error;
mod generator;
mod github;
mod render;
pub mod retry;
mod sanitize;
mod settings;
mod template;
#[cfg(test)]
mod testing;
mod tracker;
mod validate;
mod version;

pub use categorize::{
    CategorySection, Sections, categorize, format_line, issue_type_sections, label_sections,
    other_sections,
};
pub use credential::{Credential, CredentialProvider, EnvCredentialProvider, StaticCredentialProvider};
pub use error::{Error, LabelList, io_error};
pub use generator::{MilestoneItems, ReleaseNotesGenerator, fetch_items};
pub use github::{GitHubConnector, GitHubTracker};
pub use render::render_document;
pub use sanitize::{replace_first_word, replace_words, sanitize, strip_emojis, style_words};
pub use settings::{ExtraInfo, GeneratorSettings, TextStyle, load_settings, parse_settings};
pub use template::Placeholders;
pub use tracker::{Issue, IssueTracker, LineItem, PullRequest, TrackerConnector};
pub use validate::SettingsValidator;
pub use version::{resolve_version, style_versions};
