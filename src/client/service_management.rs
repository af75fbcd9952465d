// ABOUTME: Deployment client backed by the hosted-service management REST API.
// ABOUTME: Authenticates with a client certificate and speaks XML over HTTPS.

use async_trait::async_trait;
use snafu::ResultExt;
use urlencoding::encode;

use super::error::{
    BuildSnafu, ClientError, DecodeSnafu, EndpointSnafu, IdentitySnafu, RequestSnafu,
    StatusSnafu,
};
use super::xml;
use super::{Credentials, DeploymentClient};
use crate::config::ManagementSettings;
use crate::types::{DeploymentSlot, InstanceName, ServiceName, Snapshot};

const VERSION_HEADER: &str = "x-ms-version";

/// Management API client for one subscription.
#[derive(Debug, Clone)]
pub struct ServiceManagementClient {
    http: reqwest::Client,
    routes: Routes,
    api_version: String,
}

impl ServiceManagementClient {
    pub fn new(
        credentials: &Credentials,
        settings: &ManagementSettings,
    ) -> Result<Self, ClientError> {
        let endpoint = reqwest::Url::parse(&settings.endpoint).map_err(|e| {
            EndpointSnafu {
                endpoint: settings.endpoint.as_str(),
                message: e.to_string(),
            }
            .build()
        })?;
        if !matches!(endpoint.scheme(), "https" | "http") {
            return EndpointSnafu {
                endpoint: settings.endpoint.as_str(),
                message: format!("unsupported scheme '{}'", endpoint.scheme()),
            }
            .fail();
        }

        let identity =
            reqwest::Identity::from_pem(credentials.certificate_pem()).context(IdentitySnafu)?;
        let http = reqwest::Client::builder()
            .identity(identity)
            .timeout(settings.request_timeout)
            .build()
            .context(BuildSnafu)?;

        Ok(Self {
            http,
            routes: Routes::new(&settings.endpoint, credentials.subscription_id()),
            api_version: settings.api_version.clone(),
        })
    }

    /// Send a request and return the body of a 2xx response.
    async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> Result<String, ClientError> {
        let response = request
            .header(VERSION_HEADER, &self.api_version)
            .send()
            .await
            .context(RequestSnafu { url })?;

        let status = response.status();
        let body = response.text().await.context(RequestSnafu { url })?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(status_error(url, status, &body))
        }
    }

    async fn post_operation(
        &self,
        service: &ServiceName,
        instance: &InstanceName,
        slot: DeploymentSlot,
        operation: &str,
    ) -> Result<(), ClientError> {
        let url = self.routes.operation(service, instance, slot, operation);
        tracing::debug!(%url, operation, "posting role instance operation");

        self.send(self.http.post(&url).body(""), &url).await?;
        Ok(())
    }
}

#[async_trait]
impl DeploymentClient for ServiceManagementClient {
    async fn snapshot(
        &self,
        service: &ServiceName,
        slot: DeploymentSlot,
    ) -> Result<Snapshot, ClientError> {
        let url = self.routes.deployment(service, slot);
        tracing::debug!(%url, "fetching deployment");

        let body = self.send(self.http.get(&url), &url).await?;
        xml::parse_deployment(&body).context(DecodeSnafu { url: url.as_str() })
    }

    async fn request_reimage(
        &self,
        service: &ServiceName,
        instance: &InstanceName,
        slot: DeploymentSlot,
    ) -> Result<(), ClientError> {
        self.post_operation(service, instance, slot, "reimage").await
    }

    async fn request_reboot(
        &self,
        service: &ServiceName,
        instance: &InstanceName,
        slot: DeploymentSlot,
    ) -> Result<(), ClientError> {
        self.post_operation(service, instance, slot, "reboot").await
    }
}

/// URL layout of the management API for one subscription.
#[derive(Debug, Clone)]
struct Routes {
    subscription_url: String,
}

impl Routes {
    fn new(endpoint: &str, subscription_id: &str) -> Self {
        Self {
            subscription_url: format!(
                "{}/{}",
                endpoint.trim_end_matches('/'),
                encode(subscription_id)
            ),
        }
    }

    fn deployment(&self, service: &ServiceName, slot: DeploymentSlot) -> String {
        format!(
            "{}/services/hostedservices/{}/deploymentslots/{}",
            self.subscription_url,
            encode(service.as_str()),
            slot.as_str()
        )
    }

    fn operation(
        &self,
        service: &ServiceName,
        instance: &InstanceName,
        slot: DeploymentSlot,
        operation: &str,
    ) -> String {
        format!(
            "{}/roleinstances/{}?comp={}",
            self.deployment(service, slot),
            encode(instance.as_str()),
            operation
        )
    }
}

/// Map a non-2xx response to a status error, preferring the remote error document.
fn status_error(url: &str, status: reqwest::StatusCode, body: &str) -> ClientError {
    let (code, message) = match xml::parse_error(body) {
        Some(document) => (document.code, document.message),
        None => (
            status.canonical_reason().unwrap_or("Unknown").to_string(),
            body.trim().to_string(),
        ),
    };

    StatusSnafu {
        url,
        status: status.as_u16(),
        code,
        message,
    }
    .build()
}
