use http::Extensions;
use reqwest::header::{ACCEPT, HeaderName, HeaderValue, REFERER};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

const X_REQUESTED_WITH: &str = "x-requested-with";

/// Makes every request look like the portal's own XHR page loads. Headers a
/// request already sets are left alone.
pub struct PortalHeadersMiddleware {
    referer: HeaderValue,
}

impl PortalHeadersMiddleware {
    pub fn new(referer: HeaderValue) -> Self {
        PortalHeadersMiddleware { referer }
    }
}

#[async_trait::async_trait]
impl Middleware for PortalHeadersMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let headers = req.headers_mut();
        headers
            .entry(ACCEPT)
            .or_insert_with(|| HeaderValue::from_static("*/*"));
        headers
            .entry(REFERER)
            .or_insert_with(|| self.referer.clone());
        headers
            .entry(HeaderName::from_static(X_REQUESTED_WITH))
            .or_insert_with(|| HeaderValue::from_static("XMLHttpRequest"));
        next.run(req, extensions).await
    }
}
