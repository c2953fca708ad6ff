use serde::Deserialize;

#[derive(Deserialize)]
pub struct Root {
    #[serde(rename = "MediaContainer")]
    pub(in crate::plex) media_container: Container,
}

#[derive(Deserialize)]
pub struct Container {
    #[serde(rename = "Metadata", default)]
    pub(in crate::plex) metadata: Vec<Playlist>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub(in crate::plex) rating_key: String,
    pub(in crate::plex) title: String,
    #[serde(default)]
    pub(in crate::plex) leaf_count: Option<u32>,
}
