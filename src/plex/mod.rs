mod api_types;
mod client;
pub mod custom_types;

pub use client::Account;

pub const APP_NAME: &str = "Apple Playlist Importer";
pub const APP_IDENTIFIER: &str = "apple-plex-playlist-importer";

/// Plex server names are free text but never blank.
pub fn validate_server_name(name: &str) -> bool {
    !name.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_server_name() {
        assert!(validate_server_name("media"));
        assert!(!validate_server_name("   "));
    }
}
