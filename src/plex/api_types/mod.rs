pub mod identity;
pub mod library;
pub mod playlist;
pub mod resources;
pub mod sign_in;
