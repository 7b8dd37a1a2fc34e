use crate::exception::{ArgumentsHost, BoxError, Exception, ExceptionTranslator, RaisedException};
use axum::{body::Body, http::Request, response::Response};
use futures_util::FutureExt;
use std::convert::Infallible;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower Layer translating every failure of the wrapped service
///
/// Register it once on the router; it never fails, so it can be applied with
/// `Router::layer`.
#[derive(Clone)]
pub struct ExceptionLayer {
    translator: Arc<ExceptionTranslator>,
}

impl ExceptionLayer {
    pub fn new(translator: ExceptionTranslator) -> Self {
        Self::shared(Arc::new(translator))
    }

    pub fn shared(translator: Arc<ExceptionTranslator>) -> Self {
        Self { translator }
    }

    pub fn translator(&self) -> &Arc<ExceptionTranslator> {
        &self.translator
    }
}

impl Default for ExceptionLayer {
    fn default() -> Self {
        Self::new(ExceptionTranslator::default())
    }
}

impl<S> Layer<S> for ExceptionLayer {
    type Service = ExceptionMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ExceptionMiddleware {
            inner,
            translator: Arc::clone(&self.translator),
            not_ready: None,
        }
    }
}

/// Service produced by [`ExceptionLayer`]
pub struct ExceptionMiddleware<S> {
    inner: S,
    translator: Arc<ExceptionTranslator>,
    // Readiness failure of `inner`, answered by the next `call`.
    not_ready: Option<Exception>,
}

impl<S: Clone> Clone for ExceptionMiddleware<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            translator: Arc::clone(&self.translator),
            not_ready: None,
        }
    }
}

impl<S> Service<Request<Body>> for ExceptionMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Into<BoxError>,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        if self.not_ready.is_some() {
            return Poll::Ready(Ok(()));
        }
        match self.inner.poll_ready(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(())) => Poll::Ready(Ok(())),
            Poll::Ready(Err(error)) => {
                self.not_ready = Some(Exception::from_boxed(error.into()));
                Poll::Ready(Ok(()))
            }
        }
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let translator = Arc::clone(&self.translator);
        let host = ArgumentsHost::from_request(&request);

        if let Some(exception) = self.not_ready.take() {
            tracing::debug!("Inner service not ready for {}", host.description());
            return Box::pin(async move { Ok(translator.translate(&exception, &host)) });
        }

        // The clone may not be ready; keep the one poll_ready was called on.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let outcome = AssertUnwindSafe(async move { inner.call(request).await })
                .catch_unwind()
                .await;

            let response = match outcome {
                Ok(Ok(mut response)) => match response.extensions_mut().remove::<RaisedException>()
                {
                    Some(RaisedException(exception)) => translator.translate(&exception, &host),
                    None => response,
                },
                Ok(Err(error)) => translator.translate(&Exception::from_boxed(error.into()), &host),
                Err(panic) => {
                    tracing::debug!("Caught panic while handling {}", host.description());
                    translator.translate(&Exception::from_panic(panic), &host)
                }
            };

            Ok(response)
        })
    }
}
