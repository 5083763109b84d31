//! Named CMS resources and their paths.

use std::fmt;
use std::str::FromStr;

use crate::error::ConsumerError;

/// A named resource on the CMS.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourcePath {
    /// `/snippets/{name}`
    Snippet(String),
    /// `/page/{name}`
    Page(String),
    /// `/page/{page}/{part}`
    PagePart { page: String, part: String },
}

impl ResourcePath {
    /// A snippet resource.
    pub fn snippet(name: impl Into<String>) -> Self {
        Self::Snippet(name.into())
    }

    /// A page resource.
    pub fn page(name: impl Into<String>) -> Self {
        Self::Page(name.into())
    }

    /// A page part resource.
    pub fn page_part(page: impl Into<String>, part: impl Into<String>) -> Self {
        Self::PagePart {
            page: page.into(),
            part: part.into(),
        }
    }

    /// Build a resource from a kind and names, as given on a command line.
    ///
    /// # Errors
    ///
    /// Returns `Other` for an unknown kind or a page part without a part name.
    pub fn from_kind(kind: ResourceKind, name: &str, part: Option<&str>) -> crate::Result<Self> {
        match (kind, part) {
            (ResourceKind::Snippet, None) => Ok(Self::snippet(name)),
            (ResourceKind::Page, None) => Ok(Self::page(name)),
            (ResourceKind::PagePart, Some(part)) => Ok(Self::page_part(name, part)),
            (ResourceKind::PagePart, None) => Err(ConsumerError::Other(anyhow::anyhow!(
                "page part requires a part name"
            ))),
            (kind, Some(_)) => Err(ConsumerError::Other(anyhow::anyhow!(
                "{} does not take a part name",
                kind
            ))),
        }
    }

    /// The kind of this resource.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Snippet(_) => ResourceKind::Snippet,
            Self::Page(_) => ResourceKind::Page,
            Self::PagePart { .. } => ResourceKind::PagePart,
        }
    }

    /// Path relative to the CMS base URL.
    pub fn path(&self) -> String {
        match self {
            Self::Snippet(name) => format!("/snippets/{}", name),
            Self::Page(name) => format!("/page/{}", name),
            Self::PagePart { page, part } => format!("/page/{}/{}", page, part),
        }
    }

    /// Full URL under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Kinds of CMS resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Snippet,
    Page,
    PagePart,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snippet => write!(f, "snippet"),
            Self::Page => write!(f, "page"),
            Self::PagePart => write!(f, "part"),
        }
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snippet" | "snippets" => Ok(Self::Snippet),
            "page" | "pages" => Ok(Self::Page),
            "part" | "page-part" | "page_part" => Ok(Self::PagePart),
            other => Err(format!(
                "unknown resource kind '{}' (expected snippet, page or part)",
                other
            )),
        }
    }
}
