//! Canned key vault payloads.
//!
//! Every success response is the same fixed object with its identifier
//! URLs rewritten to point at the vault, name and version that were
//! requested.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const RECOVERY_LEVEL: &str = "CustomizedRecoverable+Purgeable";

/// The resource a request addresses, taken from its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub vault: String,
    pub name: String,
    pub version: String,
}

impl ResourceRef {
    /// `{base}/keyvault/{vault}/{collection}/{name}/{version}`
    pub fn versioned_url(&self, base_url: &str, collection: &str) -> String {
        format!(
            "{}/{}/{}",
            self.collection_url(base_url, collection),
            self.name,
            self.version
        )
    }

    fn collection_url(&self, base_url: &str, collection: &str) -> String {
        format!("{}/keyvault/{}/{}", base_url, self.vault, collection)
    }
}

// ── Secrets ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct SecretAttributes {
    pub created: i64,
    pub enabled: bool,
    pub exp: i64,
    #[serde(rename = "recoverableDays")]
    pub recoverable_days: i32,
    #[serde(rename = "recoveryLevel")]
    pub recovery_level: String,
    pub updated: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SecretBundle {
    pub attributes: SecretAttributes,
    pub id: String,
    pub tags: BTreeMap<String, String>,
    pub value: String,
}

impl SecretBundle {
    pub fn canned(resource: &ResourceRef, base_url: &str) -> Self {
        Self {
            attributes: SecretAttributes {
                created: 1660313443,
                enabled: true,
                exp: 1723385117,
                recoverable_days: 7,
                recovery_level: RECOVERY_LEVEL.to_string(),
                updated: 1660313868,
            },
            id: resource.versioned_url(base_url, "secrets"),
            tags: BTreeMap::new(),
            value: "This is the fake secret value".to_string(),
        }
    }
}

// ── Keys ─────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct KeyAttributes {
    pub created: i64,
    pub enabled: bool,
    #[serde(rename = "recoverableDays")]
    pub recoverable_days: i32,
    #[serde(rename = "recoveryLevel")]
    pub recovery_level: String,
    pub updated: i64,
}

/// JSON web key material.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonWebKey {
    pub e: String,
    pub key_ops: Vec<String>,
    pub kid: String,
    pub kty: String,
    pub n: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KeyBundle {
    pub attributes: KeyAttributes,
    pub key: JsonWebKey,
    pub tags: BTreeMap<String, String>,
}

impl KeyBundle {
    pub fn canned(resource: &ResourceRef, base_url: &str) -> Self {
        let key_ops = ["sign", "verify", "wrapKey", "unwrapKey", "encrypt", "decrypt"];
        Self {
            attributes: KeyAttributes {
                created: 1673029410,
                enabled: true,
                recoverable_days: 7,
                recovery_level: RECOVERY_LEVEL.to_string(),
                updated: 1673029410,
            },
            key: JsonWebKey {
                e: "AQAB".to_string(),
                key_ops: key_ops.iter().map(|op| op.to_string()).collect(),
                kid: resource.versioned_url(base_url, "keys"),
                kty: "RSA".to_string(),
                n: "ruqZAvsEEnCJqpNmVZbi...==".to_string(),
            },
            tags: BTreeMap::new(),
        }
    }
}

// ── Certificates ─────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct CertificateAttributes {
    pub created: i64,
    pub enabled: bool,
    pub exp: i64,
    pub nbf: i64,
    #[serde(rename = "recoverableDays")]
    pub recoverable_days: i32,
    #[serde(rename = "recoveryLevel")]
    pub recovery_level: String,
    pub updated: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PendingOperation {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PolicyAttributes {
    pub created: i64,
    pub enabled: bool,
    pub updated: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IssuerParameters {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KeyProperties {
    pub exportable: bool,
    pub key_size: i32,
    pub kty: String,
    pub reuse_key: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LifetimeAction {
    pub action: ActionType,
    pub trigger: Trigger,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionType {
    pub action_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Trigger {
    pub lifetime_percentage: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SecretProperties {
    #[serde(rename = "contentType")]
    pub content_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BasicConstraints {
    pub ca: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubjectAlternativeNames {
    pub dns_names: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct X509Properties {
    pub basic_constraints: BasicConstraints,
    pub ekus: Vec<String>,
    pub key_usage: Vec<String>,
    pub sans: SubjectAlternativeNames,
    pub subject: String,
    pub validity_months: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CertificatePolicy {
    pub attributes: PolicyAttributes,
    pub id: String,
    pub issuer: IssuerParameters,
    pub key_props: KeyProperties,
    pub lifetime_actions: Vec<LifetimeAction>,
    pub secret_props: SecretProperties,
    pub x509_props: X509Properties,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CertificateBundle {
    pub attributes: CertificateAttributes,
    pub cer: String,
    pub id: String,
    pub kid: String,
    pub pending: PendingOperation,
    pub policy: CertificatePolicy,
    pub sid: String,
    pub tags: BTreeMap<String, String>,
    pub x5t: String,
}

impl CertificateBundle {
    pub fn canned(resource: &ResourceRef, base_url: &str) -> Self {
        let certificates = resource.collection_url(base_url, "certificates");
        let cert_url = resource.versioned_url(base_url, "certificates");

        Self {
            attributes: CertificateAttributes {
                created: 1673029993,
                enabled: true,
                exp: 1704565993,
                nbf: 1673029393,
                recoverable_days: 7,
                recovery_level: RECOVERY_LEVEL.to_string(),
                updated: 1673029993,
            },
            cer: "MIIDPDCC...==".to_string(),
            id: cert_url.clone(),
            // the backing key shares the certificate's name and version
            kid: resource.versioned_url(base_url, "keys"),
            pending: PendingOperation {
                id: format!("{}/{}/pending", certificates, resource.name),
            },
            policy: CertificatePolicy {
                attributes: PolicyAttributes {
                    created: 1673029989,
                    enabled: true,
                    updated: 1673029989,
                },
                id: format!("{}/{}/policy", certificates, resource.name),
                issuer: IssuerParameters {
                    name: "Self".to_string(),
                },
                key_props: KeyProperties {
                    exportable: true,
                    key_size: 2048,
                    kty: "RSA".to_string(),
                    reuse_key: false,
                },
                lifetime_actions: vec![LifetimeAction {
                    action: ActionType {
                        action_type: "AutoRenew".to_string(),
                    },
                    trigger: Trigger {
                        lifetime_percentage: 80,
                    },
                }],
                secret_props: SecretProperties {
                    content_type: "application/x-pem-file".to_string(),
                },
                x509_props: X509Properties {
                    basic_constraints: BasicConstraints { ca: false },
                    ekus: vec!["1.3.6.1.5.5.7.3.1".to_string(), "1.3.6.1.5.5.7.3.2".to_string()],
                    key_usage: vec!["digitalSignature".to_string(), "keyEncipherment".to_string()],
                    sans: SubjectAlternativeNames { dns_names: vec![] },
                    subject: "CN=test-certificate".to_string(),
                    validity_months: 12,
                },
            },
            sid: cert_url,
            tags: BTreeMap::new(),
            x5t: "wOSk8759bvVk2tJc32vnVASBRLk".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://fakeazure:8081";

    fn resource() -> ResourceRef {
        ResourceRef {
            vault: "v1".into(),
            name: "n1".into(),
            version: "ver1".into(),
        }
    }

    #[test]
    fn test_secret_id_embeds_path() {
        let secret = SecretBundle::canned(&resource(), BASE);
        assert_eq!(secret.id, "http://fakeazure:8081/keyvault/v1/secrets/n1/ver1");
        assert_eq!(secret.value, "This is the fake secret value");
    }

    #[test]
    fn test_key_kid_embeds_path() {
        let key = KeyBundle::canned(&resource(), BASE);
        assert_eq!(key.key.kid, "http://fakeazure:8081/keyvault/v1/keys/n1/ver1");
        assert_eq!(key.key.key_ops.len(), 6);
    }

    #[test]
    fn test_certificate_identifiers() {
        let cert = CertificateBundle::canned(&resource(), BASE);
        assert_eq!(cert.id, "http://fakeazure:8081/keyvault/v1/certificates/n1/ver1");
        assert_eq!(cert.sid, cert.id);
        assert_eq!(cert.kid, "http://fakeazure:8081/keyvault/v1/keys/n1/ver1");
        assert_eq!(cert.policy.id, "http://fakeazure:8081/keyvault/v1/certificates/n1/policy");
        assert_eq!(cert.pending.id, "http://fakeazure:8081/keyvault/v1/certificates/n1/pending");
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(CertificateBundle::canned(&resource(), BASE)).unwrap();
        assert_eq!(json["attributes"]["recoverableDays"], 7);
        assert_eq!(json["attributes"]["recoveryLevel"], RECOVERY_LEVEL);
        assert_eq!(json["policy"]["secret_props"]["contentType"], "application/x-pem-file");
        assert_eq!(json["policy"]["x509_props"]["sans"]["dns_names"], serde_json::json!([]));
        assert_eq!(json["tags"], serde_json::json!({}));
    }
}
