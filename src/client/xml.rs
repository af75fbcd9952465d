// ABOUTME: XML payloads of the hosted-service management API.
// ABOUTME: Decodes deployment rosters and error documents with quick-xml serde.

use quick_xml::DeError;
use serde::Deserialize;
use serde::de::Error as _;

use crate::types::{InstanceName, InstanceRecord, InstanceStatus, Snapshot};

#[derive(Debug, Deserialize)]
struct DeploymentDocument {
    #[serde(rename = "RoleInstanceList", default)]
    role_instance_list: RoleInstanceList,
}

#[derive(Debug, Default, Deserialize)]
struct RoleInstanceList {
    #[serde(rename = "RoleInstance", default)]
    role_instances: Vec<RoleInstanceElement>,
}

#[derive(Debug, Deserialize)]
struct RoleInstanceElement {
    #[serde(rename = "RoleName", default)]
    role_name: String,
    #[serde(rename = "InstanceName")]
    instance_name: String,
    #[serde(rename = "InstanceStatus", default)]
    instance_status: String,
}

/// Error document returned with non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ErrorDocument {
    #[serde(rename = "Code", default)]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: String,
}

pub(crate) fn parse_deployment(body: &str) -> Result<Snapshot, DeError> {
    let document: DeploymentDocument = quick_xml::de::from_str(strip_bom(body))?;

    let instances = document
        .role_instance_list
        .role_instances
        .into_iter()
        .map(|element| {
            let name = InstanceName::new(element.instance_name).map_err(DeError::custom)?;
            let status = InstanceStatus::from(element.instance_status.trim());
            Ok(InstanceRecord::new(name, element.role_name, status))
        })
        .collect::<Result<Vec<_>, DeError>>()?;

    Ok(Snapshot::new(instances))
}

/// Best effort: bodies that are not an error document yield `None`.
pub(crate) fn parse_error(body: &str) -> Option<ErrorDocument> {
    let body = strip_bom(body);
    if body.trim().is_empty() {
        return None;
    }
    quick_xml::de::from_str(body).ok()
}

fn strip_bom(body: &str) -> &str {
    body.trim_start_matches('\u{feff}')
}
