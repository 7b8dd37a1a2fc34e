use crate::common::ErrorResponse;
use crate::config::TranslatorConfig;
use crate::exception::http::{
    INTERNAL_SERVER_ERROR_MESSAGE, StatusFilter, UnhandledExceptionFilter, ValidationFilter,
};
use crate::exception::{ArgumentsHost, Exception, ExceptionFilter, NotFound};
use crate::pipe::MethodArgumentNotValid;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::{TypeId, type_name};
use std::error::Error;
use std::sync::Arc;

/// Maps exceptions to error responses, most specific filter first
///
/// Every registered filter reports how deep in the exception's cause chain it
/// applies. The shallowest match wins and ties go to the filter registered
/// first. When nothing matches, the fallback filter answers with a 500.
pub struct ExceptionTranslator {
    filters: Vec<Arc<dyn ExceptionFilter>>,
    fallback: Arc<dyn ExceptionFilter>,
    config: TranslatorConfig,
}

impl ExceptionTranslator {
    /// Start from the built-in not-found and validation filters
    pub fn builder() -> ExceptionTranslatorBuilder {
        ExceptionTranslatorBuilder::new()
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    fn select(&self, exception: &Exception) -> &dyn ExceptionFilter {
        self.filters
            .iter()
            .filter_map(|filter| filter.matches(exception).map(|depth| (depth, filter)))
            .min_by_key(|(depth, _)| *depth)
            .map_or(self.fallback.as_ref(), |(_, filter)| filter.as_ref())
    }

    /// Build the error body for an exception without logging it
    pub fn resolve(&self, exception: &Exception, host: &ArgumentsHost) -> ErrorResponse {
        let mut body = self
            .select(exception)
            .catch(exception, host)
            .with_timestamp_format(self.config.timestamp_format);

        if body.status.is_server_error() && !self.config.expose_internal_messages {
            body.message = INTERNAL_SERVER_ERROR_MESSAGE.to_string();
        }
        body
    }

    /// Translate an exception into the HTTP response sent to the caller
    pub fn translate(&self, exception: &Exception, host: &ArgumentsHost) -> Response {
        let body = self.resolve(exception, host);

        if body.status.is_server_error() {
            tracing::error!(
                status = body.status.as_u16(),
                details = %body.details,
                "Unhandled exception: {:#}",
                exception.error()
            );
        } else {
            tracing::warn!(
                status = body.status.as_u16(),
                details = %body.details,
                message = %body.message,
                "Request failed"
            );
        }

        body.into_response()
    }
}

impl Default for ExceptionTranslator {
    fn default() -> Self {
        Self::builder().build()
    }
}

struct Registration {
    type_id: Option<TypeId>,
    filter: Arc<dyn ExceptionFilter>,
}

/// Builder for an [`ExceptionTranslator`]
///
/// # Example
/// ```
/// use restfault::exception::ExceptionTranslator;
/// use axum::http::StatusCode;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("user {0} not found")]
/// struct UserNotFound(u32);
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("quota exceeded")]
/// struct QuotaExceeded;
///
/// let translator = ExceptionTranslator::builder()
///     .not_found::<UserNotFound>()
///     .on::<QuotaExceeded>(StatusCode::TOO_MANY_REQUESTS)
///     .build();
/// ```
pub struct ExceptionTranslatorBuilder {
    registrations: Vec<Registration>,
    fallback: Option<Arc<dyn ExceptionFilter>>,
    config: TranslatorConfig,
}

impl ExceptionTranslatorBuilder {
    pub fn new() -> Self {
        Self::empty()
            .not_found::<NotFound>()
            .register(
                Some(TypeId::of::<MethodArgumentNotValid>()),
                type_name::<MethodArgumentNotValid>(),
                Arc::new(ValidationFilter),
            )
    }

    /// A builder with no filters; every exception reaches the fallback
    pub fn empty() -> Self {
        Self {
            registrations: Vec::new(),
            fallback: None,
            config: TranslatorConfig::default(),
        }
    }

    /// Map error type `E` to `status`
    ///
    /// Registering the same type again replaces the earlier mapping in place.
    pub fn on<E>(self, status: StatusCode) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.register(
            Some(TypeId::of::<E>()),
            type_name::<E>(),
            Arc::new(StatusFilter::<E>::new(status)),
        )
    }

    /// Treat error type `E` as a missing entity
    pub fn not_found<E>(self) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.on::<E>(StatusCode::NOT_FOUND)
    }

    /// Register a custom filter
    pub fn filter<F: ExceptionFilter>(self, filter: F) -> Self {
        self.register(None, type_name::<F>(), Arc::new(filter))
    }

    /// Replace the catch-all filter
    pub fn fallback<F: ExceptionFilter>(mut self, filter: F) -> Self {
        self.fallback = Some(Arc::new(filter));
        self
    }

    pub fn config(mut self, config: TranslatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> ExceptionTranslator {
        ExceptionTranslator {
            filters: self
                .registrations
                .into_iter()
                .map(|registration| registration.filter)
                .collect(),
            fallback: self
                .fallback
                .unwrap_or_else(|| Arc::new(UnhandledExceptionFilter)),
            config: self.config,
        }
    }

    fn register(
        mut self,
        type_id: Option<TypeId>,
        name: &'static str,
        filter: Arc<dyn ExceptionFilter>,
    ) -> Self {
        if let Some(type_id) = type_id {
            if let Some(existing) = self
                .registrations
                .iter_mut()
                .find(|registration| registration.type_id == Some(type_id))
            {
                tracing::debug!("Replacing exception filter for {}", name);
                existing.filter = filter;
                return self;
            }
        }

        self.registrations.push(Registration { type_id, filter });
        self
    }
}

impl Default for ExceptionTranslatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::TimestampFormat;
    use crate::exception::http::VALIDATION_FAILED_MESSAGE;
    use crate::pipe::BindingResult;
    use anyhow::Context;
    use axum::http::Method;

    #[derive(Debug, thiserror::Error)]
    #[error("user {0} not found")]
    struct UserNotFound(u32);

    #[derive(Debug, thiserror::Error)]
    #[error("storage unavailable")]
    struct StorageDown {
        #[source]
        cause: NotFound,
    }

    struct TeapotFilter;

    impl ExceptionFilter for TeapotFilter {
        fn matches(&self, exception: &Exception) -> Option<usize> {
            exception.message().contains("tea").then_some(0)
        }

        fn catch(&self, exception: &Exception, host: &ArgumentsHost) -> ErrorResponse {
            ErrorResponse::new(StatusCode::IM_A_TEAPOT, exception.message(), host.description())
        }
    }

    fn host() -> ArgumentsHost {
        ArgumentsHost::new(Method::GET, "/users/5".parse().unwrap())
    }

    #[test]
    fn test_unmatched_exception_is_500_with_its_message() {
        let translator = ExceptionTranslator::default();
        let body = translator.resolve(&Exception::msg("connection reset"), &host());

        assert_eq!(body.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "connection reset");
        assert_eq!(body.details, "uri=/users/5");
    }

    #[test]
    fn test_not_found_is_404_regardless_of_message() {
        let translator = ExceptionTranslator::default();
        for message in ["id-5", "", "Internal failure"] {
            let body = translator.resolve(&Exception::new(NotFound::new(message)), &host());
            assert_eq!(body.status, StatusCode::NOT_FOUND);
            assert_eq!(body.message, message);
        }
    }

    #[test]
    fn test_validation_is_400_with_fixed_message() {
        let mut result = BindingResult::new("user");
        result.reject("payload is empty");
        let exception = Exception::new(MethodArgumentNotValid::new(result));

        let body = ExceptionTranslator::default().resolve(&exception, &host());
        assert_eq!(body.status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, VALIDATION_FAILED_MESSAGE);
        assert!(body.details.starts_with("BindingResult for object 'user': 1 errors"));
    }

    #[test]
    fn test_registered_domain_type() {
        let translator = ExceptionTranslator::builder()
            .not_found::<UserNotFound>()
            .build();

        let body = translator.resolve(&Exception::new(UserNotFound(5)), &host());
        assert_eq!(body.status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "user 5 not found");
    }

    #[test]
    fn test_context_wrapped_not_found_still_404() {
        let result: anyhow::Result<()> = Err(NotFound::new("id-5")).context("fetching profile");
        let exception = Exception::from(result.unwrap_err());

        let body = ExceptionTranslator::default().resolve(&exception, &host());
        assert_eq!(body.status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "fetching profile");
    }

    #[test]
    fn test_shallowest_match_wins() {
        let exception = Exception::new(StorageDown {
            cause: NotFound::new("id-5"),
        });

        let translator = ExceptionTranslator::default();
        assert_eq!(
            translator.resolve(&exception, &host()).status,
            StatusCode::NOT_FOUND
        );

        let translator = ExceptionTranslator::builder()
            .on::<StorageDown>(StatusCode::SERVICE_UNAVAILABLE)
            .build();
        let body = translator.resolve(&exception, &host());
        assert_eq!(body.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.message, "storage unavailable");
    }

    #[test]
    fn test_ties_go_to_first_registration() {
        let translator = ExceptionTranslator::builder()
            .filter(TeapotFilter)
            .on::<UserNotFound>(StatusCode::GONE)
            .build();

        // "tea" never appears, so only the typed filter applies
        let body = translator.resolve(&Exception::new(UserNotFound(1)), &host());
        assert_eq!(body.status, StatusCode::GONE);

        let translator = ExceptionTranslator::builder()
            .filter(TeapotFilter)
            .build();
        let body = translator.resolve(&Exception::new(NotFound::new("no tea left")), &host());
        assert_eq!(body.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_reregistering_replaces_in_place() {
        let translator = ExceptionTranslator::builder()
            .on::<NotFound>(StatusCode::GONE)
            .build();
        let body = translator.resolve(&Exception::new(NotFound::new("id-5")), &host());
        assert_eq!(body.status, StatusCode::GONE);
    }

    #[test]
    fn test_empty_builder_sends_everything_to_fallback() {
        let translator = ExceptionTranslatorBuilder::empty().build();
        let body = translator.resolve(&Exception::new(NotFound::new("id-5")), &host());
        assert_eq!(body.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_custom_fallback() {
        let translator = ExceptionTranslator::builder().fallback(TeapotFilter).build();
        let body = translator.resolve(&Exception::msg("anything"), &host());
        assert_eq!(body.status, StatusCode::IM_A_TEAPOT);
    }

    #[test]
    fn test_hidden_internal_messages() {
        let translator = ExceptionTranslator::builder()
            .config(TranslatorConfig {
                expose_internal_messages: false,
                ..TranslatorConfig::default()
            })
            .build();

        let body = translator.resolve(&Exception::msg("password=hunter2"), &host());
        assert_eq!(body.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, INTERNAL_SERVER_ERROR_MESSAGE);

        let body = translator.resolve(&Exception::new(NotFound::new("id-5")), &host());
        assert_eq!(body.message, "id-5");
    }

    #[test]
    fn test_timestamp_format_applied() {
        let translator = ExceptionTranslator::builder()
            .config(TranslatorConfig {
                timestamp_format: TimestampFormat::EpochMillis,
                ..TranslatorConfig::default()
            })
            .build();

        let body = translator.resolve(&Exception::msg("x"), &host());
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["timestamp"].is_i64());
    }
}
