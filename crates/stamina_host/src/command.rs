use bevy_ecs::entity::Entity;
use bevy_ecs::message::{Message, MessageWriter};
use bevy_ecs::prelude::{Component, Query};
use bevy_ecs::system::SystemParam;
use rustc_hash::FxHashSet;
use thiserror::Error;

/// Who typed a command. The console holds every permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandSource {
    Console,
    Player(Entity),
}

#[derive(Component, Debug, Default, Clone)]
pub struct Permissions(FxHashSet<String>);

impl Permissions {
    pub const WILDCARD: &'static str = "*";

    pub fn grant(&mut self, node: impl Into<String>) {
        self.0.insert(node.into());
    }

    pub fn revoke(&mut self, node: &str) -> bool {
        self.0.remove(node)
    }

    pub fn has(&self, node: &str) -> bool {
        self.0.contains(node) || self.0.contains(Self::WILDCARD)
    }
}

impl<S: Into<String>> FromIterator<S> for Permissions {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("empty command line")]
    Empty,
    #[error("mismatched quotes in command line")]
    MismatchedQuotes,
}

fn split_command_line(line: &str) -> Result<(String, Vec<String>), CommandParseError> {
    let line = line.trim_start();
    let line = line.strip_prefix('/').unwrap_or(line);
    let mut words = shellwords::split(line)
        .map_err(|_| CommandParseError::MismatchedQuotes)?
        .into_iter();
    let label = words.next().ok_or(CommandParseError::Empty)?;
    Ok((label.to_lowercase(), words.collect()))
}

/// A command line submitted from chat or the console, split into label and
/// arguments.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct CommandIssued {
    pub source: CommandSource,
    pub label: String,
    pub args: Vec<String>,
}

impl CommandIssued {
    pub fn parse(source: CommandSource, line: &str) -> Result<Self, CommandParseError> {
        let (label, args) = split_command_line(line)?;
        Ok(Self {
            source,
            label,
            args,
        })
    }
}

/// Sent while the client is typing a command. The last argument is the one
/// being completed and is empty when the line ends with whitespace.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct TabCompleteRequest {
    pub source: CommandSource,
    pub label: String,
    pub args: Vec<String>,
}

impl TabCompleteRequest {
    pub fn parse(source: CommandSource, line: &str) -> Result<Self, CommandParseError> {
        let (label, mut args) = split_command_line(line)?;
        if line.ends_with(char::is_whitespace) {
            args.push(String::new());
        }
        Ok(Self {
            source,
            label,
            args,
        })
    }
}

#[derive(Message, Debug, Clone, PartialEq)]
pub struct TabCompleteSuggestions {
    pub source: CommandSource,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatColor {
    #[default]
    White,
    Green,
    Red,
}

#[derive(Message, Debug, Clone, PartialEq)]
pub struct SystemChat {
    pub recipient: CommandSource,
    pub content: String,
    pub color: ChatColor,
}

/// Permission lookups and feedback for command handlers.
#[derive(SystemParam)]
pub struct CommandContext<'w, 's> {
    permissions: Query<'w, 's, &'static Permissions>,
    chat: MessageWriter<'w, SystemChat>,
}

impl CommandContext<'_, '_> {
    pub fn has_permission(&self, source: CommandSource, node: &str) -> bool {
        match source {
            CommandSource::Console => true,
            CommandSource::Player(player) => self
                .permissions
                .get(player)
                .is_ok_and(|permissions| permissions.has(node)),
        }
    }

    pub fn reply(&mut self, recipient: CommandSource, content: impl Into<String>, color: ChatColor) {
        self.chat.write(SystemChat {
            recipient,
            content: content.into(),
            color,
        });
    }
}
