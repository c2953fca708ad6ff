use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, info, warn};

use crate::import::PlaylistSink;
use crate::plex::custom_types::CatalogTrack;
use crate::plex::{APP_IDENTIFIER, APP_NAME, api_types};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

fn build_client(token: Option<&str>) -> Result<reqwest::Client> {
    let headers = {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("X-Plex-Product", HeaderValue::from_static(APP_NAME));
        headers.insert(
            "X-Plex-Client-Identifier",
            HeaderValue::from_static(APP_IDENTIFIER),
        );
        if let Some(token) = token {
            let mut token: HeaderValue = token.try_into()?;
            token.set_sensitive(true);
            headers.insert("X-Plex-Token", token);
        }
        headers
    };
    Ok(reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()?)
}

/// A signed-in plex.tv account.
pub struct Account {
    client: reqwest::Client,
    token: String,
}

impl Account {
    pub async fn sign_in(username: &str, password: &str) -> Result<Self> {
        let response: api_types::sign_in::Root = build_client(None)?
            .post("https://plex.tv/users/sign_in.json")
            .basic_auth(username, Some(password))
            .send()
            .await?
            .error_for_status()
            .context("plex.tv sign in failed")?
            .json()
            .await?;
        Self::from_token(response.user.auth_token)
    }

    pub fn from_token(token: String) -> Result<Self> {
        ensure!(!token.is_empty(), "empty Plex token");
        Ok(Self {
            client: build_client(Some(&token))?,
            token,
        })
    }

    /// Connects to the account's server named `server_name`, trying each of its
    /// advertised addresses until one answers.
    pub async fn connect(&self, server_name: &str) -> Result<Server> {
        let resources: Vec<api_types::resources::Resource> = self
            .client
            .get("https://clients.plex.tv/api/v2/resources?includeHttps=1&includeRelay=1")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let resource = api_types::resources::find_server(&resources, server_name)?;
        let token = resource.access_token.as_deref().unwrap_or(&self.token);
        let client = build_client(Some(token))?;

        for uri in resource.connection_uris() {
            let base_url = Url::parse(uri)?;
            match identify(&client, &base_url).await {
                Ok(machine_identifier) => {
                    info!(%base_url, "connected to {server_name}");
                    return Ok(Server {
                        client,
                        base_url,
                        machine_identifier,
                        name: server_name.to_owned(),
                    });
                }
                Err(error) => debug!(%base_url, "connection failed: {error:#}"),
            }
        }

        bail!("could not reach any address of server \"{server_name}\"")
    }
}

async fn identify(client: &reqwest::Client, base_url: &Url) -> Result<String> {
    let identity: api_types::identity::Root = client
        .get(base_url.join("identity")?)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(identity.media_container.machine_identifier)
}

/// A Plex Media Server reached through one of its connections.
pub struct Server {
    client: reqwest::Client,
    base_url: Url,
    machine_identifier: String,
    name: String,
}

impl Server {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn music_section(&self, title: &str) -> Result<String> {
        let sections: api_types::library::SectionsRoot = self
            .client
            .get(self.base_url.join("library/sections")?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(sections.music_section_key(title)?.to_owned())
    }

    /// Every track in the section, in the server's order.
    ///
    /// Tracks without a media file are skipped.
    pub async fn all_tracks(&self, section_key: &str, page_size: u32) -> Result<Vec<CatalogTrack>> {
        ensure!(page_size > 0, "page size must be positive");
        let url = self
            .base_url
            .join(&format!("library/sections/{section_key}/all?type=10"))?;

        let mut start: u32 = 0;
        let mut tracks = Vec::new();
        loop {
            let page: api_types::library::TracksRoot = self
                .client
                .get(url.clone())
                .header("X-Plex-Container-Start", start.to_string())
                .header("X-Plex-Container-Size", page_size.to_string())
                .send()
                .await?
                .error_for_status()?
                .json()
                .await
                .with_context(|| format!("failed to read tracks page at offset {start}"))?;
            let page = page.media_container;
            if page.metadata.is_empty() {
                break;
            }

            start += page.metadata.len() as u32;
            debug!(start, total = ?page.total_size, "fetched tracks page");
            for track in page.metadata {
                match CatalogTrack::try_from(track) {
                    Ok(track) => tracks.push(track),
                    Err(error) => warn!("skipping catalog track: {error:#}"),
                }
            }

            if let Some(total) = page.total_size
                && start >= total
            {
                break;
            }
        }

        Ok(tracks)
    }

    fn library_uri(&self, tracks: &[&CatalogTrack]) -> String {
        let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
        format!(
            "server://{}/com.plexapp.plugins.library/library/metadata/{}",
            self.machine_identifier,
            ids.join(","),
        )
    }
}

impl PlaylistSink for Server {
    async fn create_playlist(&self, name: &str, tracks: &[&CatalogTrack]) -> Result<()> {
        ensure!(
            !tracks.is_empty(),
            "must include items to add when creating playlist \"{name}\"",
        );

        let mut url = self.base_url.join("playlists")?;
        url.query_pairs_mut()
            .append_pair("type", "audio")
            .append_pair("title", name)
            .append_pair("smart", "0")
            .append_pair("uri", &self.library_uri(tracks));

        let response: api_types::playlist::Root = self
            .client
            .post(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let playlist = response
            .media_container
            .metadata
            .into_iter()
            .next()
            .context("create playlist response had no playlist")?;
        debug!(
            rating_key = %playlist.rating_key,
            items = ?playlist.leaf_count,
            "created playlist \"{}\"",
            playlist.title,
        );
        Ok(())
    }
}
