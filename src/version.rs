// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Version detection, normalization and styling inside titles.
///
/// A version is a run of dot separated numbers with an optional `v` prefix
/// and optional semver pre-release (`-rc.1`) and build (`+sha.5114f85`)
/// suffixes. Matching is substring based: a lone number such as the `3` in
/// `Fix 3 bugs` is a version, and so is the `v1.2` tail of `dev1.2`.
use std::sync::LazyLock;

use regex::Regex;

use crate::{error::Error, settings::TextStyle};

static VERSION_PATTERN: LazyLock<Regex,> = LazyLock::new(|| {
    Regex::new(
        r"(?P<prefix>v?)(?P<core>\d+(?:\.\d+)*)(?P<suffix>(?:-[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?)",
    )
    .expect("version pattern is valid",)
},);

/// Expands a version without `v` prefix to three numeric components.
///
/// `1` becomes `1.0.0` and `1.2` becomes `1.2.0`. Pre-release and build
/// suffixes are kept verbatim.
///
/// # Errors
///
/// Returns [`Error::VersionResolution`] when the numeric part has more than
/// three groups or is not made of dot separated numbers.
///
/// # Examples
///
/// ```
/// use relnotes::resolve_version;
///
/// assert_eq!(resolve_version("1",)?, "1.0.0");
/// assert_eq!(resolve_version("1.2-preview.4",)?, "1.2.0-preview.4");
/// assert!(resolve_version("1.2.3.4",).is_err());
/// # Ok::<(), relnotes::Error>(())
/// ```
pub fn resolve_version(version: &str,) -> Result<String, Error,>
{
    let suffix_start = version.find(['-', '+',],).unwrap_or(version.len(),);
    let (core, suffix,) = version.split_at(suffix_start,);

    let groups: Vec<&str,> = core.split('.',).collect();
    if groups.iter().any(|group| group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit(),),) {
        return Err(resolution_error(version,),);
    }

    let resolved = match groups.as_slice() {
        [major,] => format!("{major}.0.0"),
        [major, minor,] => format!("{major}.{minor}.0"),
        [_, _, _,] => core.to_owned(),
        _ => return Err(resolution_error(version,),),
    };

    Ok(format!("{resolved}{suffix}"),)
}

/// Normalizes every version in `title` to `v{major}.{minor}.{patch}` and wraps
/// it in the markers of `style`.
///
/// A version already wrapped in exactly those markers is left alone, so
/// running the stage twice does not double-wrap.
///
/// # Errors
///
/// Returns [`Error::VersionResolution`] for versions with more than three
/// numeric groups.
pub fn style_versions(title: &str, style: TextStyle,) -> Result<String, Error,>
{
    let (open, close,) = style.markers();
    let mut output = String::with_capacity(title.len() + 16,);
    let mut last = 0;

    for captures in VERSION_PATTERN.captures_iter(title,) {
        let Some(whole,) = captures.get(0,) else {
            continue;
        };
        if !style.is_plain()
            && title[..whole.start()].ends_with(open,)
            && title[whole.end()..].starts_with(close,)
        {
            continue;
        }

        let prefix_len = captures.name("prefix",).map_or(0, |prefix| prefix.len(),);
        let resolved = resolve_version(&whole.as_str()[prefix_len..],)?;

        output.push_str(&title[last..whole.start()],);
        output.push_str(&style.wrap(&format!("v{resolved}"),),);
        last = whole.end();
    }

    output.push_str(&title[last..],);
    Ok(output,)
}

fn resolution_error(version: &str,) -> Error
{
    Error::VersionResolution {
        version: version.to_owned(),
    }
}
