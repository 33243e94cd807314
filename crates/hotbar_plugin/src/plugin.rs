//! # Command Dispatcher
//!
//! Routes chat commands to the redistribution core.
//!
//! ## Command Flow
//!
//! ```text
//! chat token ──> command lookup ──> player present? ──> permission?
//!                                                          │
//!                         "Reloading..." / "Unloading..." <┘
//!                                     │
//!                              belt present? ──no──> NoWeapon
//!                                     │
//!                         hotbar_core reload / unload
//!                                     │
//!                    empty report ──> NoWeapon
//!                    otherwise    ──> Success / SuccessUnload
//! ```
//!
//! Every handled command ends in exactly one outcome message. A missing
//! player gets nothing, since there is nobody to reply to.

use std::collections::HashMap;

use hotbar_core::{reload, unload, Host, PlayerInventory, ReloadReport, UnloadReport};
use tracing::{debug, info};

use crate::chat::ChatSink;
use crate::config::PluginConfig;
use crate::error::{PluginError, PluginResult};
use crate::lang::{MessageCatalog, MessageKey, DEFAULT_LANGUAGE};
use crate::permission::{PermissionService, PERMISSIONS, PERMISSION_USE};

/// A player issuing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    /// Stable user id, used for permissions and replies.
    pub user_id: String,
    /// Preferred message language.
    pub language: String,
    /// The player's containers.
    pub inventory: PlayerInventory,
}

impl Player {
    /// Creates a player using the default language.
    #[must_use]
    pub fn new(user_id: impl Into<String>, inventory: PlayerInventory) -> Self {
        Self {
            user_id: user_id.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            inventory,
        }
    }

    /// Sets the preferred language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Commands this plugin provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Top up belt weapons from the pool.
    Reload,
    /// Empty belt weapons into the pool.
    Unload,
}

/// What a command invocation did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// No player was attached; nothing was sent.
    NoPlayer,
    /// The token is not bound to a command; nothing was sent.
    UnknownCommand,
    /// The player lacks the use permission.
    NoPermission,
    /// No weapon qualified, or the belt is missing.
    NoWeapon,
    /// At least one weapon was topped up.
    Reloaded(ReloadReport),
    /// At least one weapon was emptied.
    Unloaded(UnloadReport),
}

/// The reload/unload plugin.
#[derive(Debug)]
pub struct ReloadHotbar<P> {
    config: PluginConfig,
    permissions: P,
    catalog: MessageCatalog,
    commands: HashMap<String, Command>,
}

impl<P: PermissionService> ReloadHotbar<P> {
    /// Creates the plugin. Call [`ReloadHotbar::init`] before dispatching.
    #[must_use]
    pub fn new(config: PluginConfig, permissions: P) -> Self {
        Self {
            config,
            permissions,
            catalog: MessageCatalog::new(),
            commands: HashMap::new(),
        }
    }

    /// Registers permissions and binds the configured command tokens.
    ///
    /// # Errors
    ///
    /// Returns `PluginError::InvalidConfig` if the command tokens are unusable.
    pub fn init(&mut self) -> PluginResult<()> {
        self.config.validate()?;

        for permission in PERMISSIONS {
            self.permissions.register_permission(permission);
        }

        self.commands.clear();
        for (token, command) in [
            (&self.config.reload_chat_command, Command::Reload),
            (&self.config.unload_chat_command, Command::Unload),
        ] {
            if self.commands.insert(token.to_lowercase(), command).is_some() {
                return Err(PluginError::InvalidConfig(format!(
                    "command {token:?} bound twice"
                )));
            }
        }

        info!(
            reload = %self.config.reload_chat_command,
            unload = %self.config.unload_chat_command,
            "commands registered"
        );
        Ok(())
    }

    /// The loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// The permission service.
    #[must_use]
    pub const fn permissions(&self) -> &P {
        &self.permissions
    }

    /// The permission service, for granting and revoking.
    pub fn permissions_mut(&mut self) -> &mut P {
        &mut self.permissions
    }

    /// The message catalog, for registering translations.
    pub fn catalog_mut(&mut self) -> &mut MessageCatalog {
        &mut self.catalog
    }

    /// Resolves a chat token to a command, ignoring case.
    #[must_use]
    pub fn command_for(&self, token: &str) -> Option<Command> {
        self.commands.get(&token.to_lowercase()).copied()
    }

    /// Handles a chat command. Arguments are accepted and ignored.
    pub fn handle_chat_command<H, C>(
        &self,
        player: Option<&mut Player>,
        token: &str,
        _args: &[&str],
        host: &mut H,
        chat: &mut C,
    ) -> CommandOutcome
    where
        H: Host + ?Sized,
        C: ChatSink + ?Sized,
    {
        let Some(command) = self.command_for(token) else {
            debug!(token, "unknown command");
            return CommandOutcome::UnknownCommand;
        };
        let Some(player) = player else {
            return CommandOutcome::NoPlayer;
        };
        self.run(command, player, host, chat)
    }

    /// Runs a command for a player.
    pub fn run<H, C>(
        &self,
        command: Command,
        player: &mut Player,
        host: &mut H,
        chat: &mut C,
    ) -> CommandOutcome
    where
        H: Host + ?Sized,
        C: ChatSink + ?Sized,
    {
        info!(user_id = %player.user_id, ?command, "command received");

        if !self
            .permissions
            .user_has_permission(&player.user_id, PERMISSION_USE)
        {
            self.reply(chat, player, MessageKey::NoPermission, &[]);
            return CommandOutcome::NoPermission;
        }

        let outcome = match command {
            Command::Reload => {
                self.reply(chat, player, MessageKey::Reloading, &[]);
                reload(&mut player.inventory, host)
                    .filter(|report| !report.is_empty())
                    .map(CommandOutcome::Reloaded)
            }
            Command::Unload => {
                self.reply(chat, player, MessageKey::Unloading, &[]);
                unload(&mut player.inventory, host)
                    .filter(|report| !report.is_empty())
                    .map(CommandOutcome::Unloaded)
            }
        };

        match outcome {
            Some(CommandOutcome::Reloaded(report)) => {
                let details = report.details();
                self.reply(
                    chat,
                    player,
                    MessageKey::Success,
                    &[&report.weapons_reloaded(), &report.total_ammo_used(), &details],
                );
                CommandOutcome::Reloaded(report)
            }
            Some(CommandOutcome::Unloaded(report)) => {
                let details = report.details();
                self.reply(
                    chat,
                    player,
                    MessageKey::SuccessUnload,
                    &[&report.weapons_unloaded(), &report.total_ammo_unloaded(), &details],
                );
                CommandOutcome::Unloaded(report)
            }
            _ => {
                self.reply(chat, player, MessageKey::NoWeapon, &[]);
                CommandOutcome::NoWeapon
            }
        }
    }

    fn reply<C: ChatSink + ?Sized>(
        &self,
        chat: &mut C,
        player: &Player,
        key: MessageKey,
        args: &[&dyn std::fmt::Display],
    ) {
        let message = self.catalog.message(key, &player.language, args);
        chat.send_reply(&player.user_id, &message);
    }
}
