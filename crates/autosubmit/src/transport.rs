//! Outbound request seam
//!
//! `post` starts the request immediately and hands back a future that only
//! reports how it ended. The browser implementation goes through `fetch`.

use futures::future::{FutureExt, LocalBoxFuture};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response, UrlSearchParams, Window};

use crate::error::{describe_js, DeliveryError};
use crate::payload::Payload;

pub trait Transport {
    /// POST `payload` to `url`. The returned future resolves once the
    /// request has completed or failed; its value is never a response body.
    fn post(
        &self,
        url: &str,
        payload: &Payload,
    ) -> LocalBoxFuture<'static, Result<(), DeliveryError>>;
}

/// `window.fetch` with a form-encoded body
#[derive(Debug, Clone)]
pub struct FetchTransport {
    window: Window,
}

impl FetchTransport {
    pub const fn new(window: Window) -> Self {
        Self { window }
    }
}

/// `POST url` carrying `payload` as `application/x-www-form-urlencoded`
pub fn build_request(url: &str, payload: &Payload) -> Result<Request, DeliveryError> {
    let body = UrlSearchParams::new().map_err(|e| DeliveryError::Request(describe_js(&e)))?;
    for (name, value) in payload.iter() {
        body.append(name, value);
    }

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&body);

    Request::new_with_str_and_init(url, &init)
        .map_err(|e| DeliveryError::Request(describe_js(&e)))
}

/// Anything outside 2xx counts as a failed delivery
pub fn check_status(status: u16) -> Result<(), DeliveryError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(DeliveryError::Status(status))
    }
}

impl Transport for FetchTransport {
    fn post(
        &self,
        url: &str,
        payload: &Payload,
    ) -> LocalBoxFuture<'static, Result<(), DeliveryError>> {
        let pending = build_request(url, payload).map(|req| self.window.fetch_with_request(&req));

        async move {
            let resp_val = JsFuture::from(pending?)
                .await
                .map_err(|e| DeliveryError::Network(describe_js(&e)))?;
            let resp: Response = resp_val
                .dyn_into()
                .map_err(|e| DeliveryError::Network(describe_js(&e)))?;

            check_status(resp.status())
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_status() {
        assert_eq!(check_status(200), Ok(()));
        assert_eq!(check_status(204), Ok(()));
        assert_eq!(check_status(302), Err(DeliveryError::Status(302)));
        assert_eq!(check_status(404), Err(DeliveryError::Status(404)));
        assert_eq!(check_status(500), Err(DeliveryError::Status(500)));
    }
}
