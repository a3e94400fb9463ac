//! What a page's results region shows, and how a failed fetch lands there.

use crate::toast::ToastKind;
use crate::FetchError;

/// Results and errors are never shown together.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> RequestState<T> {
    pub fn ready(&self) -> Option<T>
    where
        T: Clone,
    {
        match self {
            RequestState::Ready(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Log `err`, raise exactly one error toast and return the failed state.
    pub fn fail(context: &str, err: &FetchError, notifier: &impl Notify) -> Self {
        if err.is_transport() {
            log::error!("{} failed: {}", context, err);
        } else {
            log::warn!("{} rejected: {}", context, err);
        }
        let message = err.user_message();
        notifier.notify(format!("❌ {}", message), ToastKind::Error);
        RequestState::Failed(message)
    }
}

/// Something that can put a toast on screen.
pub trait Notify {
    fn notify(&self, message: String, kind: ToastKind);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{classify_response, interpret_envelope};
    use crate::defaults::NETWORK_MESSAGE;
    use crate::models::ForecastResponse;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<(String, ToastKind)>>);

    impl Notify for Recorder {
        fn notify(&self, message: String, kind: ToastKind) {
            self.0.borrow_mut().push((message, kind));
        }
    }

    fn settle(err: FetchError) -> (RequestState<ForecastResponse>, Vec<(String, ToastKind)>) {
        let recorder = Recorder::default();
        let state = RequestState::fail("Forecast", &err, &recorder);
        (state, recorder.0.into_inner())
    }

    #[test]
    fn network_failure_shows_error_without_results() {
        let (state, toasts) = settle(FetchError::Network("offline".into()));
        assert_eq!(state, RequestState::Failed(NETWORK_MESSAGE.to_string()));
        assert!(state.ready().is_none());
        assert_eq!(toasts, vec![(format!("❌ {}", NETWORK_MESSAGE), ToastKind::Error)]);
    }

    #[test]
    fn rejected_request_shows_server_message_once() {
        let err = interpret_envelope::<ForecastResponse>(
            json!({"success": false, "message": "Insufficient historical data"}),
            "fallback",
        )
        .unwrap_err();
        let (state, toasts) = settle(err);
        assert_eq!(state, RequestState::Failed("Insufficient historical data".into()));
        assert!(state.ready().is_none());
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].0, "❌ Insufficient historical data");
        assert_eq!(toasts[0].1, ToastKind::Error);
    }

    #[test]
    fn bad_gateway_html_counts_as_network_error() {
        let err = classify_response::<ForecastResponse>(502, false, "<html>Bad Gateway</html>", "x")
            .unwrap_err();
        assert_eq!(err, FetchError::Http(502));
        let (state, toasts) = settle(err);
        assert_eq!(state, RequestState::Failed(NETWORK_MESSAGE.to_string()));
        assert_eq!(toasts.len(), 1);
    }

    #[test]
    fn ready_hands_out_the_payload() {
        let state = RequestState::Ready(7);
        assert_eq!(state.ready(), Some(7));
        assert_eq!(RequestState::<i32>::Loading.ready(), None);
    }
}
