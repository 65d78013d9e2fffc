pub mod api;
pub mod models;

/// Longest message text accepted, counted in characters.
pub const MAX_MESSAGE_LEN: usize = 255;

/// Shortest password accepted at registration, counted in characters.
pub const MIN_PASSWORD_LEN: usize = 4;
