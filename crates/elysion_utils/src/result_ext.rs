use anyhow::anyhow;
use std::{error::Error, fmt::Display};

use crate::AnyResult;

/// Attaches a human readable context message to a failed [`Result`] or an empty [`Option`].
///
/// ## Example
/// ```
/// use elysion_utils::AnyhowResultExt;
///
/// let missing: Option<u32> = None;
/// let error = missing.otherwise("no frame count given").unwrap_err();
/// assert_eq!(error.to_string(), "no frame count given");
/// ```
pub trait AnyhowResultExt<T> {
    fn otherwise(self, s: impl Display) -> AnyResult<T>;
}

impl<T, E: Error + Send + Sync + 'static> AnyhowResultExt<T> for Result<T, E> {
    fn otherwise(self, s: impl Display) -> AnyResult<T> {
        self.map_err(|e| anyhow::Error::from(e).context(s.to_string()))
    }
}

impl<T> AnyhowResultExt<T> for Option<T> {
    fn otherwise(self, s: impl Display) -> AnyResult<T> {
        self.ok_or_else(|| anyhow!("{s}"))
    }
}
