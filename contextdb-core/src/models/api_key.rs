use serde::Serialize;

use super::permission::Permission;

/// Body of `POST /auth/keys`.
///
/// Permissions are plain strings so capabilities unknown to [`Permission`]
/// still reach the server.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ApiKeyRequest {
    pub name: String,
    pub author_id: String,
    pub permissions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<String>,
}

impl ApiKeyRequest {
    pub fn new(name: impl Into<String>, author_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            author_id: author_id.into(),
            permissions: Vec::new(),
            expires_in: None,
        }
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission.to_string());
        self
    }

    pub fn expires_in(mut self, duration: impl Into<String>) -> Self {
        self.expires_in = Some(duration.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_expires_in_omitted_when_absent() {
        let request = ApiKeyRequest::new("ci", "bot").with_permission(Permission::Search);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({"name": "ci", "author_id": "bot", "permissions": ["search"]})
        );
    }

    #[test]
    fn test_expires_in_included_when_set() {
        let request = ApiKeyRequest::new("ci", "bot")
            .with_permissions(["read:operations", "custom:thing"])
            .expires_in("24h");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["expires_in"], "24h");
        assert_eq!(body["permissions"], json!(["read:operations", "custom:thing"]));
    }
}
