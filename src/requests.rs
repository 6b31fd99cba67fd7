// src/requests.rs
use crate::error::ZurichError;

use reqwest::Method;
use serde_json::Value;

impl crate::ZurichClient {
    /// Performs one request against the Open Data Platform and returns the decoded GeoJSON.
    ///
    /// # Arguments
    /// * `method`: HTTP method, usually `Method::GET`.
    /// * `uri`: path relative to the API base, for example `"Behindertenparkplaetze"`.
    /// * `params`: optional query parameters.
    ///
    /// # Errors
    /// * `ZurichError::Connection` on timeout or transport failure.
    /// * `ZurichError::Status` on a non-2xx response.
    /// * `ZurichError::UnexpectedContentType` if the response is not `application/vnd.geo+json`.
    /// * `ZurichError::JsonError` if the body is not valid JSON.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<Value, ZurichError> {
        self._request(method, uri, params).await
    }

    pub async fn get(
        &self,
        uri: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<Value, ZurichError> {
        self._request(Method::GET, uri, params).await
    }
}
