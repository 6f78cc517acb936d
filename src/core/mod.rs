pub mod chapters;
pub mod controller;
pub mod history;
pub mod loop_store;
pub mod media_bridge;
pub mod media_server;
pub mod paths;
pub mod playback;
pub mod store;
pub mod thumbnailer;
pub mod time_source;
