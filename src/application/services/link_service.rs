//! Shortcode creation and redirect resolution service.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use tracing::debug;
use validator::Validate;

use crate::domain::audit::{AuditLevel, AuditLogger};
use crate::domain::entities::{Link, NewClick, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::validate_url;

/// Default lifetime of a shortcode when the caller gives none.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// Upper bound on generation attempts before giving up with an internal error.
const MAX_GENERATION_ATTEMPTS: usize = 32;

/// Service for creating shortcodes and resolving redirects.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    audit: AuditLogger,
    default_validity_minutes: i64,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service with the standard 30-minute default validity.
    pub fn new(link_repository: Arc<L>, audit: AuditLogger) -> Self {
        Self {
            link_repository,
            audit,
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
        }
    }

    /// Overrides the validity applied when a create request carries none.
    pub fn with_default_validity(mut self, minutes: i64) -> Self {
        self.default_validity_minutes = minutes;
        self
    }

    /// Creates a shortcode for a URL.
    ///
    /// # Code Selection
    ///
    /// - If `new_link.code` is set, it is validated and used as-is; an existing
    ///   record with the same code is a conflict, never silently replaced
    /// - Otherwise a random 6-character alphanumeric code is generated, retrying
    ///   on collision (each attempt is checked atomically by the repository)
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL is not an absolute HTTP(S) URL or is too long
    /// - [`AppError::InvalidShortcode`] if the custom code is malformed
    /// - [`AppError::InvalidValidity`] if the validity is not a positive number of minutes
    /// - [`AppError::ShortcodeConflict`] if the custom code is taken
    pub async fn create_short_link(&self, new_link: NewLink) -> Result<Link, AppError> {
        let result = self.try_create(new_link).await;

        match &result {
            Ok(link) => {
                metrics::counter!("shortcodes_created_total").increment(1);
                self.audit.record(
                    AuditLevel::Info,
                    "registry",
                    format!(
                        "Created shortcode {} for {} (expires {})",
                        link.code,
                        link.long_url,
                        link.expires_at.to_rfc3339()
                    ),
                );
            }
            Err(e) => self.audit_rejected_create(e),
        }

        result
    }

    /// Audits a create request the HTTP layer could not turn into a [`NewLink`]
    /// and hands the error back.
    pub fn reject_create(&self, err: AppError) -> AppError {
        self.audit_rejected_create(&err);
        err
    }

    fn audit_rejected_create(&self, err: &AppError) {
        self.audit.record(
            audit_level_for(err),
            "registry",
            format!("Create rejected: {err}"),
        );
    }

    async fn try_create(&self, new_link: NewLink) -> Result<Link, AppError> {
        new_link.validate()?;

        let long_url = validate_url(&new_link.long_url).map_err(|e| {
            AppError::invalid_url("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(custom) = &new_link.code {
            validate_custom_code(custom)?;
        }

        let minutes = new_link
            .validity_minutes
            .unwrap_or(self.default_validity_minutes);
        let validity = validity_duration(minutes)?;

        match new_link.code {
            Some(custom) => {
                let link = build_link(custom, long_url, validity, minutes)?;
                self.link_repository.create(link).await
            }
            None => self.create_with_generated_code(long_url, validity, minutes).await,
        }
    }

    /// Inserts a link under a freshly generated code, retrying on collision.
    async fn create_with_generated_code(
        &self,
        long_url: String,
        validity: Duration,
        minutes: i64,
    ) -> Result<Link, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let link = build_link(generate_code(), long_url.clone(), validity, minutes)?;

            match self.link_repository.create(link).await {
                Ok(link) => return Ok(link),
                Err(AppError::ShortcodeConflict { .. }) => {
                    debug!(attempt, "Generated shortcode collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique shortcode",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Resolves a shortcode to its original URL, recording the click.
    ///
    /// The click count increment and the ledger append happen atomically in
    /// the repository; an expired record is left untouched.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the shortcode does not exist
    /// - [`AppError::Expired`] if the shortcode is past its expiry
    pub async fn resolve(&self, code: &str, click: NewClick) -> Result<String, AppError> {
        let origin = click.origin.clone();
        let result = self
            .link_repository
            .record_click(code, click.at(Utc::now()))
            .await;

        match &result {
            Ok(link) => {
                metrics::counter!("redirects_total", "outcome" => "ok").increment(1);
                self.audit.record(
                    AuditLevel::Info,
                    "registry",
                    format!("Redirected {} to {}", link.code, link.long_url),
                );
                self.audit.record(
                    AuditLevel::Debug,
                    "ledger",
                    format!("Click #{} recorded for {} from {}", link.clicks, link.code, origin),
                );
            }
            Err(e) => {
                metrics::counter!("redirects_total", "outcome" => e.code()).increment(1);
                self.audit.record(
                    audit_level_for(e),
                    "registry",
                    format!("Redirect refused for {code}: {e}"),
                );
            }
        }

        result.map(|link| link.long_url)
    }

    /// Constructs the full short URL from a base URL and code.
    pub fn get_short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }
}

fn validity_duration(minutes: i64) -> Result<Duration, AppError> {
    if minutes <= 0 {
        return Err(AppError::invalid_validity(
            "Validity must be a positive number of minutes",
            json!({ "validity": minutes }),
        ));
    }

    Duration::try_minutes(minutes).ok_or_else(|| {
        AppError::invalid_validity("Validity is too large", json!({ "validity": minutes }))
    })
}

fn build_link(
    code: String,
    long_url: String,
    validity: Duration,
    minutes: i64,
) -> Result<Link, AppError> {
    Link::with_validity(code, long_url, Utc::now(), validity).ok_or_else(|| {
        AppError::invalid_validity("Validity is too large", json!({ "validity": minutes }))
    })
}

/// Caller mistakes are warnings; anything internal is an error.
fn audit_level_for(err: &AppError) -> AuditLevel {
    match err {
        AppError::Internal { .. } => AuditLevel::Error,
        _ => AuditLevel::Warn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::AuditEvent;
    use crate::domain::entities::Click;
    use crate::domain::repositories::MockLinkRepository;
    use tokio::sync::mpsc;

    fn create_test_link(code: &str, url: &str) -> Link {
        let now = Utc::now();
        Link::new(
            code.to_string(),
            url.to_string(),
            now,
            now + Duration::minutes(30),
        )
    }

    fn new_link(url: &str, code: Option<&str>, validity: Option<i64>) -> NewLink {
        NewLink {
            long_url: url.to_string(),
            code: code.map(str::to_string),
            validity_minutes: validity,
        }
    }

    fn visitor() -> NewClick {
        NewClick {
            referrer: Some("https://google.com".to_string()),
            origin: "192.168.1.1".to_string(),
        }
    }

    fn service_with_audit(
        repo: MockLinkRepository,
    ) -> (LinkService<MockLinkRepository>, mpsc::Receiver<AuditEvent>) {
        let (tx, rx) = mpsc::channel(16);
        (LinkService::new(Arc::new(repo), AuditLogger::new(tx)), rx)
    }

    #[tokio::test]
    async fn test_create_short_link_generated_code() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_create()
            .withf(|link| link.code.len() == 6 && link.code.chars().all(|c| c.is_ascii_alphanumeric()))
            .times(1)
            .returning(Ok);

        let service = LinkService::new(Arc::new(mock_link_repo), AuditLogger::disabled());

        let link = service
            .create_short_link(new_link("https://example.com/page", None, None))
            .await
            .unwrap();

        assert_eq!(link.long_url, "https://example.com/page");
        assert_eq!(link.expires_at - link.created_at, Duration::minutes(30));
        assert_eq!(link.clicks, 0);
    }

    #[tokio::test]
    async fn test_create_short_link_custom_code_and_validity() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_create()
            .withf(|link| link.code == "abc123")
            .times(1)
            .returning(Ok);

        let service = LinkService::new(Arc::new(mock_link_repo), AuditLogger::disabled());

        let link = service
            .create_short_link(new_link("https://example.com/page", Some("abc123"), Some(1)))
            .await
            .unwrap();

        assert_eq!(link.code, "abc123");
        assert_eq!(link.expires_at - link.created_at, Duration::minutes(1));
    }

    #[tokio::test]
    async fn test_create_short_link_configured_default_validity() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(1).returning(Ok);

        let service = LinkService::new(Arc::new(mock_link_repo), AuditLogger::disabled())
            .with_default_validity(120);

        let link = service
            .create_short_link(new_link("https://example.com", None, None))
            .await
            .unwrap();

        assert_eq!(link.expires_at - link.created_at, Duration::minutes(120));
    }

    #[tokio::test]
    async fn test_create_short_link_retries_on_collision() {
        let mut mock_link_repo = MockLinkRepository::new();
        let mut seq = mockall::Sequence::new();

        mock_link_repo
            .expect_create()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|link| {
                Err(AppError::conflict(
                    "Shortcode already exists",
                    json!({ "shortcode": link.code }),
                ))
            });
        mock_link_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(Ok);

        let service = LinkService::new(Arc::new(mock_link_repo), AuditLogger::disabled());

        let result = service
            .create_short_link(new_link("https://example.com", None, None))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_short_link_gives_up_after_max_attempts() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_create()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|_| Err(AppError::conflict("taken", json!({}))));

        let service = LinkService::new(Arc::new(mock_link_repo), AuditLogger::disabled());

        let result = service
            .create_short_link(new_link("https://example.com", None, None))
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_create_short_link_invalid_url() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo), AuditLogger::disabled());

        let result = service
            .create_short_link(new_link("not-a-url", None, None))
            .await;

        assert!(matches!(result, Err(AppError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_create_short_link_url_with_line_break() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo), AuditLogger::disabled());

        let result = service
            .create_short_link(new_link("https://example.com/a\nb", Some("nline1"), None))
            .await;

        assert!(matches!(result, Err(AppError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_create_short_link_url_too_long() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo), AuditLogger::disabled());

        let long_url = format!("https://example.com/{}", "a".repeat(2048));
        let result = service.create_short_link(new_link(&long_url, None, None)).await;

        assert!(matches!(result, Err(AppError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_create_short_link_audits_validation_failures() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(0);

        let (service, mut rx) = service_with_audit(mock_link_repo);

        service
            .create_short_link(new_link("https://example.com", Some("abc"), None))
            .await
            .unwrap_err();
        service
            .create_short_link(new_link("https://example.com", None, Some(0)))
            .await
            .unwrap_err();

        for _ in 0..2 {
            let event = rx.try_recv().unwrap();
            assert_eq!(event.level, AuditLevel::Warn);
            assert_eq!(event.package, "registry");
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_reject_create_audits_and_returns_error() {
        let (service, mut rx) = service_with_audit(MockLinkRepository::new());

        let err = service.reject_create(AppError::invalid_validity(
            "Validity must be a whole number of minutes",
            json!({}),
        ));

        assert!(matches!(err, AppError::InvalidValidity { .. }));
        let event = rx.try_recv().unwrap();
        assert_eq!(event.level, AuditLevel::Warn);
        assert!(event.message.contains("whole number"));
    }

    #[tokio::test]
    async fn test_create_short_link_short_custom_code() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo), AuditLogger::disabled());

        let result = service
            .create_short_link(new_link("https://example.com", Some("abc"), None))
            .await;

        assert!(matches!(result, Err(AppError::InvalidShortcode { .. })));
    }

    #[tokio::test]
    async fn test_create_short_link_invalid_validity() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo), AuditLogger::disabled());

        for validity in [0, -5, i64::MAX] {
            let result = service
                .create_short_link(new_link("https://example.com", None, Some(validity)))
                .await;

            assert!(
                matches!(result, Err(AppError::InvalidValidity { .. })),
                "validity {validity} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_create_short_link_custom_code_conflict() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_create()
            .withf(|link| link.code == "taken123")
            .times(1)
            .returning(|link| {
                Err(AppError::conflict(
                    "Shortcode already exists",
                    json!({ "shortcode": link.code }),
                ))
            });

        let (service, mut rx) = service_with_audit(mock_link_repo);

        let result = service
            .create_short_link(new_link("https://example.com", Some("taken123"), None))
            .await;

        assert!(matches!(result, Err(AppError::ShortcodeConflict { .. })));

        let event = rx.try_recv().unwrap();
        assert_eq!(event.level, AuditLevel::Warn);
        assert_eq!(event.package, "registry");
    }

    #[tokio::test]
    async fn test_create_short_link_audits_success() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(1).returning(Ok);

        let (service, mut rx) = service_with_audit(mock_link_repo);

        let link = service
            .create_short_link(new_link("https://example.com", Some("audited"), None))
            .await
            .unwrap();

        let event = rx.try_recv().unwrap();
        assert_eq!(event.level, AuditLevel::Info);
        assert!(event.message.contains(&link.code));
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_record_click()
            .withf(|code, click: &Click| {
                code == "abc123"
                    && click.origin == "192.168.1.1"
                    && click.referrer.as_deref() == Some("https://google.com")
            })
            .times(1)
            .returning(|code, _| {
                let mut link = create_test_link(code, "https://example.com/page");
                link.clicks = 1;
                Ok(link)
            });

        let (service, mut rx) = service_with_audit(mock_link_repo);

        let url = service.resolve("abc123", visitor()).await.unwrap();
        assert_eq!(url, "https://example.com/page");

        assert_eq!(rx.try_recv().unwrap().package, "registry");
        assert_eq!(rx.try_recv().unwrap().package, "ledger");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_record_click()
            .times(1)
            .returning(|code, _| {
                Err(AppError::not_found(
                    "Shortcode not found",
                    json!({ "shortcode": code }),
                ))
            });

        let (service, mut rx) = service_with_audit(mock_link_repo);

        let result = service.resolve("missing", visitor()).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
        assert_eq!(rx.try_recv().unwrap().level, AuditLevel::Warn);
    }

    #[tokio::test]
    async fn test_resolve_expired() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_record_click()
            .times(1)
            .returning(|_, _| Err(AppError::expired("Shortcode has expired", json!({}))));

        let service = LinkService::new(Arc::new(mock_link_repo), AuditLogger::disabled());

        let result = service.resolve("old", visitor()).await;
        assert!(matches!(result, Err(AppError::Expired { .. })));
    }

    #[test]
    fn test_get_short_url() {
        let service = LinkService::new(
            Arc::new(MockLinkRepository::new()),
            AuditLogger::disabled(),
        );

        assert_eq!(
            service.get_short_url("http://localhost:3000/", "abc123"),
            "http://localhost:3000/abc123"
        );
        assert_eq!(
            service.get_short_url("https://s.example.com", "abcd"),
            "https://s.example.com/abcd"
        );
    }
}
