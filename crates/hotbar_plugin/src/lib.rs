//! # Reload Hotbar Plugin
//!
//! Chat commands that reload or unload every weapon on a player's
//! quick-access belt in one go.
//!
//! - `/reload` tops up each belt weapon from matching ammo in the inventory
//! - `/unload` empties each belt weapon back into the inventory
//!
//! Both commands need the `reloadhotbar.use` permission. Command tokens are
//! configurable in a versioned TOML file.
//!
//! ## Example
//!
//! ```rust,ignore
//! let config = PluginConfig::load("config/ReloadHotbar.toml")?;
//! let mut plugin = ReloadHotbar::new(config, PermissionRegistry::new());
//! plugin.init()?;
//!
//! plugin.handle_chat_command(Some(&mut player), "reload", &[], &mut host, &mut chat);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod chat;
pub mod config;
pub mod error;
pub mod lang;
pub mod permission;
pub mod plugin;

pub use chat::{ChatLog, ChatSink};
pub use config::{PluginConfig, PLUGIN_VERSION};
pub use error::{PluginError, PluginResult};
pub use lang::{format_message, MessageCatalog, MessageKey, DEFAULT_LANGUAGE};
pub use permission::{PermissionRegistry, PermissionService, PERMISSION_USE};
pub use plugin::{Command, CommandOutcome, Player, ReloadHotbar};
