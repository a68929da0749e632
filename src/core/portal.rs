use cookie::Cookie;
use log::{debug, info, warn};
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest_cookie_store::{CookieStore, CookieStoreMutex};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::PortalConfig;
use crate::core::scrape;
use crate::error::PortalError;
use crate::http::portal_headers::PortalHeadersMiddleware;
use crate::model::attendance::AttendanceReport;
use crate::model::calendar::AcademicCalendar;
use crate::model::marks::InternalMarksReport;
use crate::model::profile::StudentProfile;
use crate::model::timetable::Timetable;

const DOCUMENT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8";

/// Seeds a cookie jar from a `name=value; name2=value2` session string.
/// Pairs the jar rejects are skipped.
pub fn session_cookie_store(session: &str, origin: &Url) -> CookieStore {
    let mut store = CookieStore::default();
    for cookie in Cookie::split_parse(session) {
        let cookie = match cookie {
            Ok(cookie) => cookie,
            Err(err) => {
                debug!("skipping malformed session cookie: {}", err);
                continue;
            }
        };
        let pair = format!("{}={}", cookie.name(), cookie.value());
        if let Err(err) = store.parse(&pair, origin) {
            debug!("cookie {} rejected: {}", cookie.name(), err);
        }
    }
    store
}

/// Authenticated view of the portal for one session.
pub struct Portal {
    client: ClientWithMiddleware,
    cookie_store: Arc<CookieStoreMutex>,
    base: Url,
    config: PortalConfig,
}

impl Portal {
    pub fn new(config: PortalConfig, session: &str) -> Result<Self, PortalError> {
        let base = config.base()?;

        let cookie_store = session_cookie_store(session, &base);
        let cookie_store = Arc::new(CookieStoreMutex::new(cookie_store));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_provider(Arc::clone(&cookie_store))
            .build()?;

        let referer = HeaderValue::from_str(&format!("{}/", base.as_str().trim_end_matches('/')))
            .unwrap_or_else(|_| HeaderValue::from_static("/"));
        let client = ClientBuilder::new(client)
            .with(PortalHeadersMiddleware::new(referer))
            .build();

        Ok(Portal {
            client,
            cookie_store,
            base,
            config,
        })
    }

    /// Number of cookies the session currently holds.
    pub fn cookie_count(&self) -> usize {
        match self.cookie_store.lock() {
            Ok(store) => store.iter_unexpired().count(),
            Err(_) => 0,
        }
    }

    async fn fetch(&self, path: &str, accept: Option<&'static str>) -> Result<String, PortalError> {
        let url = self.base.join(path)?;
        let mut request = self.client.get(url.clone());
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            debug!("GET {} -> {} ({} bytes)", url, status, text.len());
        } else {
            // The body is still parsed: the portal serves its login and error
            // pages with arbitrary status codes.
            warn!("GET {} -> {}", url, status);
        }
        Ok(text)
    }

    pub async fn attendance(&self) -> Result<AttendanceReport, PortalError> {
        let raw = self.fetch(&self.config.attendance_page, None).await?;
        Ok(scrape::read_attendance(&raw, self.config.target_percentage)?)
    }

    pub async fn internal_marks(&self) -> Result<InternalMarksReport, PortalError> {
        let raw = self.fetch(&self.config.attendance_page, None).await?;
        Ok(scrape::read_internal_marks(&raw)?)
    }

    pub async fn timetable(&self) -> Result<Timetable, PortalError> {
        let raw = self.fetch(&self.config.timetable_page, None).await?;
        Ok(scrape::read_timetable(&raw)?)
    }

    pub async fn calendar(&self) -> Result<AcademicCalendar, PortalError> {
        let raw = self
            .fetch(&self.config.planner_page, Some(DOCUMENT_ACCEPT))
            .await?;
        Ok(scrape::read_calendar(&raw)?)
    }

    pub async fn profile(&self) -> Result<StudentProfile, PortalError> {
        let raw = self.fetch(&self.config.timetable_page, None).await?;
        let profile = scrape::read_profile(&raw)?;
        info!(
            "profile: {} details, registration {:?}",
            profile.student_details.len(),
            profile.registration_number
        );
        Ok(profile)
    }
}
