//! Purpose: Production `Transport` backed by a blocking `ureq::Agent`.
//! Exports: `AgentTransport`, `AgentTransportConfig`.
//! Role: Owns all network policy (timeouts, redirects, TLS) on behalf of callers.
//! Invariants: Every HTTP status comes back as a `Response`; only network failures are errors.
//! Invariants: Request bodies are sent with a `Content-Length` frame, never chunked.
use crate::core::transport::{Request, Response, Transport, TransportError};
use std::io::Read;
use std::time::Duration;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AgentTransportConfig {
    /// Overall per-request deadline; `None` leaves ureq's default (no limit).
    pub timeout: Option<Duration>,
    pub redirects: Option<u32>,
}

impl AgentTransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_redirects(mut self, redirects: u32) -> Self {
        self.redirects = Some(redirects);
        self
    }
}

#[derive(Clone, Debug)]
pub struct AgentTransport {
    agent: ureq::Agent,
}

impl AgentTransport {
    pub fn new() -> Self {
        Self::with_config(&AgentTransportConfig::default())
    }

    pub fn with_config(config: &AgentTransportConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(redirects) = config.redirects {
            builder = builder.redirects(redirects);
        }
        Self::from_agent(builder.build())
    }

    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for AgentTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for AgentTransport {
    fn send(&self, mut request: Request) -> Result<Response, TransportError> {
        let mut call = self
            .agent
            .request(request.method().as_str(), request.url().as_str());
        for (name, value) in request.headers() {
            call = call.set(name, value);
        }

        let result = match request.take_body() {
            Some(mut body) => {
                let mut bytes = Vec::new();
                body.read_to_end(&mut bytes)?;
                call.send_bytes(&bytes)
            }
            None => call.call(),
        };

        match result {
            Ok(resp) => Ok(into_response(resp)),
            Err(ureq::Error::Status(_, resp)) => Ok(into_response(resp)),
            Err(ureq::Error::Transport(err)) => Err(Box::new(err)),
        }
    }
}

fn into_response(resp: ureq::Response) -> Response {
    Response::new(resp.status(), resp.into_reader())
}

#[cfg(test)]
mod tests {
    use super::{AgentTransport, AgentTransportConfig};
    use crate::core::error::ErrorKind;
    use crate::core::request::execute;
    use std::net::TcpListener;
    use std::time::Duration;

    #[test]
    fn config_builders_set_fields() {
        let config = AgentTransportConfig::new()
            .with_timeout(Duration::from_millis(250))
            .with_redirects(0);
        assert_eq!(config.timeout, Some(Duration::from_millis(250)));
        assert_eq!(config.redirects, Some(0));
        assert_eq!(AgentTransportConfig::default().timeout, None);
    }

    #[test]
    fn refused_connection_is_a_transport_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let transport = AgentTransport::new();
        let url = format!("http://127.0.0.1:{port}/");
        let err = execute(&transport, &url, "GET", []).expect_err("refused");
        assert_eq!(err.kind(), ErrorKind::Transport);
        let source = err.into_source().expect("source");
        assert!(source.downcast_ref::<ureq::Transport>().is_some());
    }
}
