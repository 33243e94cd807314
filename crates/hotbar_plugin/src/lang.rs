//! # Messages
//!
//! Player-facing text, keyed by [`MessageKey`] and looked up per language
//! with English as the fallback. Templates use positional placeholders
//! (`{0}`, `{1}`, ...); `{{` and `}}` produce literal braces.

use std::collections::HashMap;
use std::fmt::{self, Display};

/// Language every lookup falls back to.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Identifier of a message template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// The player lacks the use permission.
    NoPermission,
    /// Sent before a reload starts.
    Reloading,
    /// Nothing to reload or unload.
    NoWeapon,
    /// Reload summary: count, total, itemization.
    Success,
    /// No matching ammo. Registered but never sent.
    NoAmmo,
    /// Sent before an unload starts.
    Unloading,
    /// Unload summary: count, total, itemization.
    SuccessUnload,
}

impl MessageKey {
    /// Every key, in catalog order.
    pub const ALL: [Self; 7] = [
        Self::NoPermission,
        Self::Reloading,
        Self::NoWeapon,
        Self::Success,
        Self::NoAmmo,
        Self::Unloading,
        Self::SuccessUnload,
    ];

    /// The key's name in message files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoPermission => "NoPermission",
            Self::Reloading => "Reloading",
            Self::NoWeapon => "NoWeapon",
            Self::Success => "Success",
            Self::NoAmmo => "NoAmmo",
            Self::Unloading => "Unloading",
            Self::SuccessUnload => "SuccessUnload",
        }
    }

    /// Looks up a key by its name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// Built-in English template.
    #[must_use]
    pub const fn english(self) -> &'static str {
        match self {
            Self::NoPermission => "You do not have permission to use this command.",
            Self::Reloading => "Reloading your hotbar weapons...",
            Self::NoWeapon => "No weapons in your hotbar need reloading.",
            Self::Success => "Reloaded {0} weapons using a total of {1} ammo:\n{2}",
            Self::NoAmmo => "You have no matching ammo in your inventory to reload your weapons.",
            Self::Unloading => "Unloading your hotbar weapons...",
            Self::SuccessUnload => "Unloaded {0} weapons, removing a total of {1} ammo:\n{2}",
        }
    }
}

impl Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message templates per language.
#[derive(Clone, Debug)]
pub struct MessageCatalog {
    languages: HashMap<String, HashMap<MessageKey, String>>,
}

impl MessageCatalog {
    /// Creates a catalog holding the English templates.
    #[must_use]
    pub fn new() -> Self {
        let mut catalog = Self {
            languages: HashMap::new(),
        };
        catalog.register(
            DEFAULT_LANGUAGE,
            MessageKey::ALL.map(|key| (key, key.english().to_string())),
        );
        catalog
    }

    /// Adds or replaces templates for a language.
    ///
    /// Keys not given keep their previous template (or fall back to English).
    pub fn register(
        &mut self,
        language: &str,
        messages: impl IntoIterator<Item = (MessageKey, String)>,
    ) {
        self.languages
            .entry(language.to_lowercase())
            .or_default()
            .extend(messages);
    }

    /// Gets the template for `key` in `language`, falling back to English.
    #[must_use]
    pub fn get(&self, key: MessageKey, language: &str) -> &str {
        self.lookup(key, &language.to_lowercase())
            .or_else(|| self.lookup(key, DEFAULT_LANGUAGE))
            .unwrap_or(key.as_str())
    }

    fn lookup(&self, key: MessageKey, language: &str) -> Option<&str> {
        self.languages
            .get(language)
            .and_then(|messages| messages.get(&key))
            .map(String::as_str)
    }

    /// Looks up and formats a message.
    ///
    /// Templates are only formatted when `args` is non-empty, so argument-free
    /// messages may contain raw braces.
    #[must_use]
    pub fn message(&self, key: MessageKey, language: &str, args: &[&dyn Display]) -> String {
        let template = self.get(key, language);
        if args.is_empty() {
            template.to_string()
        } else {
            format_message(template, args)
        }
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces `{N}` placeholders with `args[N]`.
///
/// Placeholders with no matching argument, and anything that is not a
/// placeholder, are copied through unchanged.
#[must_use]
pub fn format_message(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut index = String::new();
                while let Some(&d) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    index.push(d);
                    chars.next();
                }

                let arg = if chars.peek() == Some(&'}') {
                    index.parse::<usize>().ok().and_then(|i| args.get(i))
                } else {
                    None
                };

                if let Some(arg) = arg {
                    chars.next();
                    out.push_str(&arg.to_string());
                } else {
                    out.push('{');
                    out.push_str(&index);
                }
            }
            other => out.push(other),
        }
    }

    out
}
