use thiserror::Error;

use crate::config::ConfigError;

/// Why a page yielded no usable HTML, guessed from the raw response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureReason {
    /// The portal answered with its login page.
    SessionExpired,
    /// The portal answered with an error page.
    UpstreamError,
    /// Neither; the page template no longer matches.
    StructureChanged,
}

impl StructureReason {
    /// Scans for the markers the portal's login and error pages contain.
    /// Only meaningful once the expected markup is known to be missing.
    pub fn classify(body: &str) -> Self {
        if body.contains("login") || body.contains("signin") {
            StructureReason::SessionExpired
        } else if body.contains("error") || body.contains("Error") {
            StructureReason::UpstreamError
        } else {
            StructureReason::StructureChanged
        }
    }

    /// Status the HTTP boundary should answer with.
    pub fn http_status(self) -> u16 {
        match self {
            StructureReason::SessionExpired => 401,
            StructureReason::UpstreamError => 502,
            StructureReason::StructureChanged => 500,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            StructureReason::SessionExpired => "session expired, please login again",
            StructureReason::UpstreamError => "portal returned an error response",
            StructureReason::StructureChanged => "page structure may have changed",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("{page}: no usable HTML ({})", .reason.describe())]
    StructureNotFound {
        page: &'static str,
        reason: StructureReason,
    },
}

impl PageError {
    pub fn http_status(&self) -> u16 {
        match self {
            PageError::StructureNotFound { reason, .. } => reason.http_status(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PortalError {
    #[error(transparent)]
    Page(#[from] PageError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    #[error("invalid portal url: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PortalError {
    pub fn http_status(&self) -> u16 {
        match self {
            PortalError::Page(err) => err.http_status(),
            PortalError::Http(_) | PortalError::Middleware(_) => 502,
            PortalError::Url(_) | PortalError::Config(_) => 500,
        }
    }
}
