//! Service configuration.
//!
//! Every knob has a deployment-tested default and an environment
//! override. Settings are plain owned structs handed to the components
//! that need them; nothing reads the environment after startup.

mod settings;

pub use settings::{
    ConfigError, HttpSettings, MatchingSettings, SessionSettings, Settings, TileCacheSettings,
    TileDefaults,
};
