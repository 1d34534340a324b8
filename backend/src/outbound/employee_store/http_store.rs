//! Reqwest-backed employee store adapter.
//!
//! This adapter owns transport details only: URL building, timeouts, trace
//! header forwarding, HTTP error mapping and envelope decoding. It performs
//! exactly one attempt per call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{CreateEmployeeBody, DeleteEmployeeBody, EmployeeDto, EnvelopeDto};
use crate::domain::ports::{EmployeeStore, EmployeeStoreError, Envelope};
use crate::domain::{Employee, EmployeeDraft, TRACE_ID_HEADER, TraceId};

/// Connection settings for [`HttpEmployeeStore`].
#[derive(Debug, Clone)]
pub struct HttpEmployeeStoreConfig {
    /// Collection URL, e.g. `http://localhost:8112/api/v1/employee`.
    pub base_url: Url,
    /// Upper bound on establishing a connection.
    pub connect_timeout: Duration,
    /// Upper bound on waiting for response data.
    pub read_timeout: Duration,
}

/// Employee store adapter issuing one HTTP request per call.
///
/// The inner client pools connections and is cheap to share.
#[derive(Debug, Clone)]
pub struct HttpEmployeeStore {
    client: Client,
    base_url: Url,
}

impl HttpEmployeeStore {
    /// Build an adapter with explicit connect and read timeouts.
    /// ```rust,ignore
    /// let store = HttpEmployeeStore::new(config)?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: HttpEmployeeStoreConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Collection URL this adapter targets.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send<D>(&self, request: RequestBuilder) -> Result<EnvelopeDto<D>, EmployeeStoreError>
    where
        D: DeserializeOwned,
    {
        let request = match TraceId::current() {
            Some(trace_id) => request.header(TRACE_ID_HEADER, trace_id.to_string()),
            None => request,
        };
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "upstream responded");
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_envelope(body.as_ref())
    }
}

#[async_trait]
impl EmployeeStore for HttpEmployeeStore {
    async fn list(&self) -> Result<Envelope<Vec<Employee>>, EmployeeStoreError> {
        let request = self.client.get(self.base_url.clone());
        let envelope: EnvelopeDto<Vec<EmployeeDto>> = self.send(request).await?;
        Ok(envelope.into_domain(EmployeeDto::into_domain_list))
    }

    async fn fetch(&self, id: &str) -> Result<Envelope<Employee>, EmployeeStoreError> {
        let request = self.client.get(member_url(&self.base_url, id)?);
        let envelope: EnvelopeDto<EmployeeDto> = self.send(request).await?;
        Ok(envelope.into_domain(EmployeeDto::into_domain))
    }

    async fn create(&self, draft: &EmployeeDraft) -> Result<Envelope<Employee>, EmployeeStoreError> {
        let request = self
            .client
            .post(self.base_url.clone())
            .json(&CreateEmployeeBody::from(draft));
        let envelope: EnvelopeDto<EmployeeDto> = self.send(request).await?;
        Ok(envelope.into_domain(EmployeeDto::into_domain))
    }

    async fn delete_by_name(&self, name: &str) -> Result<Envelope<bool>, EmployeeStoreError> {
        let request = self
            .client
            .delete(self.base_url.clone())
            .json(&DeleteEmployeeBody { name });
        let envelope: EnvelopeDto<bool> = self.send(request).await?;
        Ok(envelope.into_domain(|deleted| deleted))
    }
}

fn member_url(base: &Url, id: &str) -> Result<Url, EmployeeStoreError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| {
            EmployeeStoreError::invalid_request(format!("base URL {base} cannot carry a path"))
        })?
        .pop_if_empty()
        .push(id);
    Ok(url)
}

fn parse_envelope<D>(body: &[u8]) -> Result<EnvelopeDto<D>, EmployeeStoreError>
where
    D: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|error| {
        EmployeeStoreError::decode(format!(
            "invalid employee envelope: {error}; body: {}",
            body_preview(body)
        ))
    })
}

fn map_transport_error(error: reqwest::Error) -> EmployeeStoreError {
    if error.is_timeout() {
        EmployeeStoreError::timeout(error.to_string())
    } else {
        EmployeeStoreError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> EmployeeStoreError {
    EmployeeStoreError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    fn base() -> Url {
        Url::parse("http://localhost:8112/api/v1/employee").expect("valid base URL")
    }

    #[rstest]
    #[case::plain("4a3a170b", "http://localhost:8112/api/v1/employee/4a3a170b")]
    #[case::slash_is_encoded("a/b", "http://localhost:8112/api/v1/employee/a%2Fb")]
    #[case::space_is_encoded("a b", "http://localhost:8112/api/v1/employee/a%20b")]
    fn member_url_appends_one_segment(#[case] id: &str, #[case] expected: &str) {
        assert_eq!(member_url(&base(), id).expect("url builds").as_str(), expected);
    }

    #[test]
    fn member_url_tolerates_trailing_slash() {
        let base = Url::parse("http://localhost:8112/api/v1/employee/").expect("valid base URL");
        let url = member_url(&base, "7").expect("url builds");
        assert_eq!(url.as_str(), "http://localhost:8112/api/v1/employee/7");
    }

    #[test]
    fn member_url_rejects_cannot_be_a_base() {
        let base = Url::parse("mailto:ops@example.com").expect("valid URL");
        let error = member_url(&base, "7").expect_err("mailto has no path segments");
        assert!(matches!(error, EmployeeStoreError::InvalidRequest { .. }));
    }

    #[rstest]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS)]
    #[case::not_found(StatusCode::NOT_FOUND)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_errors_keep_the_status(#[case] status: StatusCode) {
        let error = map_status_error(status, b"{\"status\":\"error\"}");
        assert_eq!(error.status_code(), Some(status.as_u16()));
    }

    #[test]
    fn body_preview_compacts_whitespace() {
        assert_eq!(body_preview(b"{\n  \"a\":   1\n}"), "{ \"a\": 1 }");
    }

    #[test]
    fn body_preview_truncates_long_bodies() {
        let body = "x".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn parses_envelope_with_employee_payload() {
        let body = r#"{
            "data": {
                "id": "4a3a170b-22cd-4ac2-aad1-9bb5b34a1507",
                "employee_name": "Tiger Nixon",
                "employee_salary": 320800,
                "employee_age": 61,
                "employee_title": "Vice Chair Executive Principal of Chief Operations Implementation Specialist",
                "employee_email": "tnixon@company.com"
            },
            "status": "Successfully processed request."
        }"#;

        let envelope: EnvelopeDto<EmployeeDto> =
            parse_envelope(body.as_bytes()).expect("envelope decodes");
        let envelope = envelope.into_domain(EmployeeDto::into_domain);
        let employee = envelope.payload.expect("payload present");
        assert_eq!(employee.name.as_deref(), Some("Tiger Nixon"));
        assert_eq!(employee.salary, Some(320_800));
        assert_eq!(envelope.status, "Successfully processed request.");
        assert_eq!(envelope.error, None);
    }

    #[test]
    fn parses_envelope_with_null_data() {
        let body = br#"{"data": null, "status": "Failed to process request.", "error": "boom"}"#;
        let envelope: EnvelopeDto<bool> = parse_envelope(body).expect("envelope decodes");
        let envelope = envelope.into_domain(|deleted| deleted);
        assert_eq!(envelope.payload, None);
        assert_eq!(envelope.error.as_deref(), Some("boom"));
    }

    #[test]
    fn missing_data_key_decodes_as_absent_payload() {
        let body = br#"{"status": "Successfully processed request."}"#;
        let envelope: EnvelopeDto<Vec<EmployeeDto>> =
            parse_envelope(body).expect("envelope decodes");
        let envelope = envelope.into_domain(EmployeeDto::into_domain_list);
        assert!(envelope.payload.is_none());
        assert_eq!(envelope.status, "Successfully processed request.");
    }

    #[test]
    fn tolerates_missing_optional_employee_fields() {
        let body = br#"{"data": [{"id": "1"}], "status": "ok"}"#;
        let envelope: EnvelopeDto<Vec<EmployeeDto>> =
            parse_envelope(body).expect("envelope decodes");
        let employees = envelope
            .into_domain(EmployeeDto::into_domain_list)
            .payload
            .expect("payload present");
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].name, None);
        assert_eq!(employees[0].salary, None);
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let error = parse_envelope::<bool>(b"<html>oops</html>").expect_err("not JSON");
        assert!(matches!(error, EmployeeStoreError::Decode { .. }));
    }

    #[test]
    fn create_body_uses_upstream_field_names() {
        let draft = crate::test_support::employees::sample_draft("Jane Roe");
        let body = serde_json::to_value(CreateEmployeeBody::from(&draft)).expect("serialises");
        assert_eq!(
            body,
            serde_json::json!({
                "name": "Jane Roe",
                "salary": 75000,
                "age": 30,
                "title": "Software Engineer"
            })
        );
    }
}
