#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the release notes crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

/// Unified error type returned by the generator, its collaborators and the CLI.
///
/// Every variant is fatal to the generation attempt that produced it. There is
/// no partial document output.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// A required setting is missing or blank.
    #[error("missing required setting '{field}'")]
    Configuration {
        /// Settings document field name, as written in the document.
        field: String
    },
    /// The credential environment variable is absent or empty.
    #[error("the credential variable '{name}' is not set or is empty")]
    MissingCredential {
        /// Name of the variable that was looked up.
        name: String
    },
    /// The target repository does not exist or is not visible.
    #[error("the repository '{owner}/{repo}' does not exist")]
    RepositoryNotFound {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repo:  String
    },
    /// One or more labels referenced by a setting group are unknown.
    #[error("the following labels in '{setting}' do not exist in '{repository}': {labels}")]
    InvalidLabels {
        /// Settings field that referenced the labels.
        setting:    String,
        /// `owner/repo` the labels were checked against.
        repository: String,
        /// Every missing label, in the order the setting declares them.
        labels:     LabelList
    },
    /// A version-like substring could not be resolved to three components.
    #[error("internal error: unable to resolve version '{version}' to major.minor.patch")]
    VersionResolution {
        /// The offending substring.
        version: String
    },
    /// Wraps I/O errors that occur while reading settings files.
    #[error("failed to read settings from {path:?}: {source}")]
    Io {
        /// Location of the settings file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML/JSON decoding errors.
    #[error("failed to parse settings: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Returned when a settings document violates invariants.
    #[error("invalid settings: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Service errors when interacting with the issue tracker.
    #[error("service error: {message}")]
    Service {
        /// Human readable message describing the service error.
        message: String
    }
}

/// Comma separated label names used in [`Error::InvalidLabels`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelList(pub Vec<String>);

impl std::fmt::Display for LabelList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a service error from the provided displayable value.
    pub fn service<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Service {
            message: message.into()
        }
    }

    /// Constructs a configuration error naming the missing field.
    pub fn configuration<F>(field: F) -> Self
    where
        F: Into<String>
    {
        Self::Configuration {
            field: field.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<masterror::AppError> for Error {
    fn from(error: masterror::AppError) -> Self {
        Self::Service {
            message: error.to_string()
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}
