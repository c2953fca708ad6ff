use serde::Deserialize;

#[derive(Deserialize)]
pub struct Root {
    #[serde(rename = "MediaContainer")]
    pub(in crate::plex) media_container: Identity,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub(in crate::plex) machine_identifier: String,
}
