//! Pulsar topic names
//!
//! Accepted forms:
//! - `persistent://tenant/namespace/topic` (or `non-persistent://`)
//! - `tenant/namespace/topic` (persistent)
//! - `topic` (persistent, `public/default`)

use std::fmt;

use crate::ContractError;

const DEFAULT_TENANT: &str = "public";
const DEFAULT_NAMESPACE: &str = "default";

/// Topic persistence domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicDomain {
    Persistent,
    NonPersistent,
}

impl TopicDomain {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Persistent => "persistent",
            Self::NonPersistent => "non-persistent",
        }
    }
}

/// Fully qualified topic name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicName {
    pub domain: TopicDomain,
    pub tenant: String,
    pub namespace: String,
    pub local_name: String,
}

impl TopicName {
    pub fn parse(raw: &str) -> Result<Self, ContractError> {
        let (domain, rest) = if let Some(rest) = raw.strip_prefix("persistent://") {
            (TopicDomain::Persistent, rest)
        } else if let Some(rest) = raw.strip_prefix("non-persistent://") {
            (TopicDomain::NonPersistent, rest)
        } else if raw.contains("://") {
            return Err(ContractError::invalid_topic(raw, "unknown topic domain"));
        } else {
            (TopicDomain::Persistent, raw)
        };

        let parts: Vec<&str> = rest.split('/').collect();
        let (tenant, namespace, local_name) = match parts.as_slice() {
            [name] if !raw.contains("://") => (DEFAULT_TENANT, DEFAULT_NAMESPACE, *name),
            [tenant, namespace, name] => (*tenant, *namespace, *name),
            _ => {
                return Err(ContractError::invalid_topic(
                    raw,
                    "expected 'tenant/namespace/topic'",
                ))
            }
        };

        if tenant.is_empty() || namespace.is_empty() || local_name.is_empty() {
            return Err(ContractError::invalid_topic(raw, "empty path segment"));
        }

        Ok(Self {
            domain,
            tenant: tenant.to_string(),
            namespace: namespace.to_string(),
            local_name: local_name.to_string(),
        })
    }

    /// Path segment used by the broker REST API: `persistent/tenant/ns/topic`
    pub fn rest_path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.domain.as_str(),
            self.tenant,
            self.namespace,
            self.local_name
        )
    }
}

impl fmt::Display for TopicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}/{}/{}",
            self.domain.as_str(),
            self.tenant,
            self.namespace,
            self.local_name
        )
    }
}
