use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capabilities a ContextDB server grants to an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "read:operations")]
    ReadOperations,
    #[serde(rename = "write:operations")]
    WriteOperations,
    #[serde(rename = "read:documents")]
    ReadDocuments,
    #[serde(rename = "write:documents")]
    WriteDocuments,
    #[serde(rename = "analyze")]
    Analyze,
    #[serde(rename = "search")]
    Search,
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "*")]
    All,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ReadOperations => "read:operations",
            Permission::WriteOperations => "write:operations",
            Permission::ReadDocuments => "read:documents",
            Permission::WriteDocuments => "write:documents",
            Permission::Analyze => "analyze",
            Permission::Search => "search",
            Permission::Admin => "admin",
            Permission::All => "*",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read:operations" => Ok(Permission::ReadOperations),
            "write:operations" => Ok(Permission::WriteOperations),
            "read:documents" => Ok(Permission::ReadDocuments),
            "write:documents" => Ok(Permission::WriteDocuments),
            "analyze" => Ok(Permission::Analyze),
            "search" => Ok(Permission::Search),
            "admin" => Ok(Permission::Admin),
            "*" => Ok(Permission::All),
            _ => Err(format!(
                "Invalid permission '{}'. Valid options: read:operations, write:operations, \
                 read:documents, write:documents, analyze, search, admin, *",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_from_str() {
        assert_eq!(
            Permission::from_str("read:operations").unwrap(),
            Permission::ReadOperations
        );
        assert_eq!(Permission::from_str("*").unwrap(), Permission::All);
        assert!(Permission::from_str("write").is_err());
        assert!(Permission::from_str("").is_err());
    }

    #[test]
    fn test_permission_serializes_as_server_string() {
        let json = serde_json::to_string(&Permission::WriteDocuments).unwrap();
        assert_eq!(json, "\"write:documents\"");
        assert_eq!(Permission::Admin.to_string(), "admin");
    }
}
