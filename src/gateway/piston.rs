use crate::config::TutorConfig;
use crate::error::GatewayError;
use crate::model::ExecutionResult;

#[cfg(not(target_arch = "wasm32"))]
use super::Executor;
use super::{build_request, interpret_response, transport_failure};

/// Client for a Piston-style `POST /execute` endpoint.
///
/// One attempt per call: no retries, no local timeout.
#[derive(Clone)]
pub struct PistonGateway {
    config: TutorConfig,
    #[cfg(not(target_arch = "wasm32"))]
    client: reqwest::blocking::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl PistonGateway {
    pub fn new(config: TutorConfig) -> Result<Self, GatewayError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()?;
        Ok(Self { config, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Executor for PistonGateway {
    fn execute(&self, source: &str) -> ExecutionResult {
        let payload = build_request(&self.config, source);

        let response = match self.client.post(&self.config.endpoint).json(&payload).send() {
            Ok(response) => response,
            Err(err) => return transport_failure(&GatewayError::from(err)),
        };

        let status = response.status().as_u16();
        match response.text() {
            Ok(body) => interpret_response(status, &body),
            Err(err) => transport_failure(&GatewayError::from(err)),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl PistonGateway {
    pub fn new(config: TutorConfig) -> Result<Self, GatewayError> {
        Ok(Self { config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub async fn execute(&self, source: &str) -> ExecutionResult {
        match self.fetch(source).await {
            Ok((status, body)) => interpret_response(status, &body),
            Err(err) => transport_failure(&err),
        }
    }

    async fn fetch(&self, source: &str) -> Result<(u16, String), GatewayError> {
        use wasm_bindgen::{JsCast, JsValue};
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Request, RequestInit, RequestMode, Response};

        let payload = serde_json::to_string(&build_request(&self.config, source))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&payload));

        let request = Request::new_with_str_and_init(&self.config.endpoint, &opts)
            .map_err(|err| GatewayError::Fetch(format!("{err:?}")))?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|err| GatewayError::Fetch(format!("{err:?}")))?;

        let window =
            web_sys::window().ok_or_else(|| GatewayError::Fetch("window yok".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|err| GatewayError::Fetch(format!("{err:?}")))?;
        let response: Response = resp_value
            .dyn_into()
            .map_err(|_| GatewayError::Fetch("geçersiz Response".into()))?;

        let text_promise = response
            .text()
            .map_err(|err| GatewayError::Fetch(format!("{err:?}")))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|err| GatewayError::Fetch(format!("{err:?}")))?
            .as_string()
            .ok_or_else(|| GatewayError::Fetch("yanıt metni okunamadı".into()))?;

        Ok((response.status(), text))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::model::ExecutionError;

    #[test]
    fn unreachable_service_becomes_transport_failure() {
        // Nothing listens on the discard port.
        let config = TutorConfig {
            endpoint: "http://127.0.0.1:9/api/v2/piston/execute".into(),
            ..TutorConfig::default()
        };
        let gateway = PistonGateway::new(config).unwrap();
        let result = gateway.execute("class Main {}");
        assert!(result.raw_output.is_empty());
        match result.error {
            Some(ExecutionError::Transport(text)) => assert!(text.starts_with("Hata: ")),
            other => panic!("expected transport failure, got {other:?}"),
        }
    }

    #[test]
    fn invalid_url_becomes_transport_failure() {
        let config = TutorConfig {
            endpoint: "not a url".into(),
            ..TutorConfig::default()
        };
        let gateway = PistonGateway::new(config).unwrap();
        assert!(gateway.execute("x").is_transport_failure());
    }
}
