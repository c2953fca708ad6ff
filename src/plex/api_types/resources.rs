use anyhow::{Context, Result};
use serde::Deserialize;

/// A device registered to the account, from `clients.plex.tv/api/v2/resources`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub(in crate::plex) name: String,
    /// Comma-separated capabilities, e.g. `server` or `client,player`
    #[serde(default)]
    pub(in crate::plex) provides: String,
    #[serde(default)]
    pub(in crate::plex) access_token: Option<String>,
    #[serde(default)]
    pub(in crate::plex) connections: Vec<Connection>,
}

#[derive(Deserialize)]
pub struct Connection {
    pub(in crate::plex) uri: String,
    #[serde(default)]
    pub(in crate::plex) local: bool,
    #[serde(default)]
    pub(in crate::plex) relay: bool,
}

impl Resource {
    fn is_server(&self) -> bool {
        self.provides.split(',').any(|p| p.trim() == "server")
    }

    /// Connection URIs to try, local first and relays last.
    pub fn connection_uris(&self) -> Vec<&str> {
        let mut connections: Vec<&Connection> = self.connections.iter().collect();
        connections.sort_by_key(|c| (c.relay, !c.local));
        connections.into_iter().map(|c| c.uri.as_str()).collect()
    }
}

pub fn find_server<'a>(resources: &'a [Resource], name: &str) -> Result<&'a Resource> {
    resources
        .iter()
        .find(|r| r.is_server() && r.name == name)
        .with_context(|| format!("no server named \"{name}\" on this account"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESOURCES_JSON: &str = r#"[
        {
            "name": "Living Room TV",
            "product": "Plex for Android (TV)",
            "provides": "client,player",
            "connections": []
        },
        {
            "name": "media",
            "product": "Plex Media Server",
            "provides": "server",
            "accessToken": "server-token",
            "connections": [
                {"protocol": "https", "uri": "https://relay.plex.direct:8443", "local": false, "relay": true},
                {"protocol": "https", "uri": "https://remote.plex.direct:32400", "local": false, "relay": false},
                {"protocol": "https", "uri": "https://local.plex.direct:32400", "local": true, "relay": false}
            ]
        }
    ]"#;

    #[test]
    fn test_find_server_and_order_connections() {
        let resources: Vec<Resource> = serde_json::from_str(RESOURCES_JSON).unwrap();
        let server = find_server(&resources, "media").unwrap();
        assert_eq!(server.access_token.as_deref(), Some("server-token"));
        assert_eq!(
            server.connection_uris(),
            vec![
                "https://local.plex.direct:32400",
                "https://remote.plex.direct:32400",
                "https://relay.plex.direct:8443",
            ],
        );
    }

    #[test]
    fn test_find_server_ignores_clients() {
        let resources: Vec<Resource> = serde_json::from_str(RESOURCES_JSON).unwrap();
        assert!(find_server(&resources, "Living Room TV").is_err());
        assert!(find_server(&resources, "missing").is_err());
    }
}
