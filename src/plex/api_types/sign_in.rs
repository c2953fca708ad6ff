use serde::Deserialize;

#[derive(Deserialize)]
pub struct Root {
    pub(in crate::plex) user: User,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub(in crate::plex) auth_token: String,
}
