//! JWT issuance against the iPaaS auth endpoint.

use serde_json::Value;

use crewsync_transport::{read_json, Transport, TransportError};

use crate::error::FetchError;

/// Field the auth endpoint uses to carry its error message.
const ERROR_FIELD: &str = "Failed to obtain a jwt";

pub struct TokenClient<'a> {
    transport: &'a Transport,
}

impl<'a> TokenClient<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// POST `auth_url[?scope=<scope>]` with `Authorization: <credential>` and
    /// return the `jwt` field of the response.
    pub fn issue_token(
        &self,
        auth_url: &str,
        credential: &str,
        scope: &str,
    ) -> Result<String, FetchError> {
        let response = self
            .transport
            .execute(auth_url, |agent| {
                let mut request = agent.post(auth_url).set("Authorization", credential);
                if !scope.is_empty() {
                    request = request.query("scope", scope);
                }
                request.call()
            })
            .map_err(authentication_error)?;

        let json: Value = read_json(auth_url, response).map_err(|err| match err {
            TransportError::Json { source, .. } => {
                FetchError::MalformedToken(format!("response is not JSON: {source}"))
            }
            other => FetchError::Transport(other),
        })?;
        match json.get("jwt").and_then(Value::as_str) {
            Some(jwt) if !jwt.is_empty() => {
                tracing::debug!("obtained iPaaS jwt");
                Ok(jwt.to_owned())
            }
            _ => Err(FetchError::MalformedToken(
                "response has no 'jwt' field".into(),
            )),
        }
    }
}

fn authentication_error(err: TransportError) -> FetchError {
    match err {
        TransportError::Status { status, body, .. } => FetchError::Authentication {
            status,
            payload: error_payload(&body),
        },
        other => FetchError::Transport(other),
    }
}

fn error_payload(body: &str) -> String {
    let field = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get(ERROR_FIELD).cloned());
    match field {
        Some(Value::String(message)) => message,
        Some(other) => other.to_string(),
        None => body.to_owned(),
    }
}
