// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Credential resolution for tracker clients.
///
/// The generator never reads process state directly. It asks a
/// [`CredentialProvider`] for the secret stored under the name given in the
/// settings, which keeps tests and embedders free of global environment
/// mutation.
use std::collections::HashMap;

use crate::error::Error;

/// Secret token used to authenticate against the tracker.
#[derive(Clone, PartialEq, Eq,)]
pub struct Credential(String,);

impl Credential
{
    /// Wraps a raw token.
    pub fn new(token: impl Into<String,>,) -> Self
    {
        Self(token.into(),)
    }

    /// Exposes the raw token to the client builder.
    pub fn expose(&self,) -> &str
    {
        &self.0
    }
}

impl std::fmt::Debug for Credential
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_,>,) -> std::fmt::Result
    {
        f.write_str("Credential(***)",)
    }
}

/// Looks up credentials by name.
pub trait CredentialProvider
{
    /// Resolves the credential registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] when nothing usable is stored
    /// under `name`.
    fn resolve(&self, name: &str,) -> Result<Credential, Error,>;
}

/// Reads credentials from process environment variables at call time.
#[derive(Debug, Clone, Copy, Default,)]
pub struct EnvCredentialProvider;

impl CredentialProvider for EnvCredentialProvider
{
    fn resolve(&self, name: &str,) -> Result<Credential, Error,>
    {
        non_blank(name, std::env::var(name,).ok(),)
    }
}

/// Serves credentials from an explicit in-memory map.
#[derive(Debug, Clone, Default,)]
pub struct StaticCredentialProvider
{
    secrets: HashMap<String, String,>,
}

impl StaticCredentialProvider
{
    /// Creates an empty provider.
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Registers `token` under `name`, replacing any previous value.
    pub fn with(mut self, name: impl Into<String,>, token: impl Into<String,>,) -> Self
    {
        self.secrets.insert(name.into(), token.into(),);
        self
    }
}

impl CredentialProvider for StaticCredentialProvider
{
    fn resolve(&self, name: &str,) -> Result<Credential, Error,>
    {
        non_blank(name, self.secrets.get(name,).cloned(),)
    }
}

fn non_blank(name: &str, value: Option<String,>,) -> Result<Credential, Error,>
{
    match value {
        Some(token,) if !token.trim().is_empty() => Ok(Credential::new(token,),),
        _ => Err(Error::MissingCredential {
            name: name.to_owned(),
        },),
    }
}
