//! Editor-authored markup that is safe to inject into a page without escaping.
//!
//! Text-block sections carry raw HTML written by site editors. The only way to
//! obtain a [`TrustedHtml`] is through [`TrustedHtml::sanitize`], which runs the
//! markup through ammonia's allow-list once, when the section leaves the
//! content store. Templates then emit it verbatim with `|safe`.
//!
//! The trust boundary is therefore the content store: anything that writes
//! section content bypassing this type must itself be trusted.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub fn sanitize(raw: &str) -> Self {
        Self(ammonia::clean(raw))
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
