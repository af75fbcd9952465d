// ABOUTME: Subscription identity and management certificate loading.
// ABOUTME: Validates both before any remote call is attempted.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("subscription ID cannot be empty")]
    EmptySubscription,

    #[error("certificate file {} is not readable: {source}", .path.display())]
    UnreadableCertificate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("certificate file {} is empty", .0.display())]
    EmptyCertificate(PathBuf),
}

/// Subscription ID plus the PEM bundle (certificate and private key) used
/// for client authentication.
#[derive(Clone)]
pub struct Credentials {
    subscription_id: String,
    certificate_pem: Vec<u8>,
}

impl Credentials {
    pub fn load(subscription_id: &str, certificate: &Path) -> Result<Self, CredentialsError> {
        let subscription_id = subscription_id.trim();
        if subscription_id.is_empty() {
            return Err(CredentialsError::EmptySubscription);
        }

        let certificate_pem =
            std::fs::read(certificate).map_err(|source| CredentialsError::UnreadableCertificate {
                path: certificate.to_path_buf(),
                source,
            })?;

        if certificate_pem.iter().all(u8::is_ascii_whitespace) {
            return Err(CredentialsError::EmptyCertificate(certificate.to_path_buf()));
        }

        Ok(Self {
            subscription_id: subscription_id.to_string(),
            certificate_pem,
        })
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn certificate_pem(&self) -> &[u8] {
        &self.certificate_pem
    }
}

// Key material stays out of debug output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("subscription_id", &self.subscription_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rejects_blank_subscription() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = Credentials::load("   ", file.path()).unwrap_err();
        assert!(matches!(err, CredentialsError::EmptySubscription));
    }

    #[test]
    fn rejects_missing_certificate() {
        let err = Credentials::load("sub", Path::new("/nonexistent/cert.pem")).unwrap_err();
        assert!(matches!(err, CredentialsError::UnreadableCertificate { .. }));
    }

    #[test]
    fn rejects_empty_certificate() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = Credentials::load("sub", file.path()).unwrap_err();
        assert!(matches!(err, CredentialsError::EmptyCertificate(_)));
    }

    #[test]
    fn loads_certificate_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "-----BEGIN CERTIFICATE-----").unwrap();

        let creds = Credentials::load(" sub-123 ", file.path()).unwrap();
        assert_eq!(creds.subscription_id(), "sub-123");
        assert!(!creds.certificate_pem().is_empty());
        assert!(!format!("{creds:?}").contains("BEGIN"));
    }
}
