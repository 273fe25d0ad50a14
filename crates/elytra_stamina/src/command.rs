use crate::config::StaminaSettings;
use crate::session::StaminaSessions;
use bevy_ecs::message::{MessageReader, MessageWriter};
use bevy_ecs::prelude::{Query, Res, ResMut, With};
use stamina_host::command::{
    ChatColor, CommandContext, CommandIssued, CommandSource, TabCompleteRequest,
    TabCompleteSuggestions,
};
use stamina_host::entity::player::{GameProfile, Player};
use thiserror::Error;
use tracing::info;

pub const COMMAND_LABEL: &str = "elytrastamina";
pub const SET_PERMISSION: &str = "elytrastamina.set";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StaminaCommandError {
    #[error("You don't have permission to do that.")]
    NoPermission,
    #[error("Usage: /elytrastamina <player> <amount>")]
    Usage,
    #[error("Player not found.")]
    PlayerNotFound,
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// Exact name first (ignoring case), otherwise the shortest online name that
/// starts with `name`.
fn find_player<'a>(
    players: &'a Query<&GameProfile, With<Player>>,
    name: &str,
) -> Option<&'a GameProfile> {
    if let Some(exact) = players
        .iter()
        .find(|profile| profile.username.eq_ignore_ascii_case(name))
    {
        return Some(exact);
    }
    let prefix = name.to_lowercase();
    players
        .iter()
        .filter(|profile| profile.username.to_lowercase().starts_with(&prefix))
        .min_by(|a, b| {
            (a.username.len(), &a.username).cmp(&(b.username.len(), &b.username))
        })
}

fn parse_amount(arg: &str) -> Result<f64, StaminaCommandError> {
    match arg.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(StaminaCommandError::InvalidNumber(arg.to_string())),
    }
}

pub(crate) fn handle_stamina_command(
    mut reader: MessageReader<CommandIssued>,
    mut ctx: CommandContext,
    players: Query<&GameProfile, With<Player>>,
    settings: Res<StaminaSettings>,
    mut sessions: ResMut<StaminaSessions>,
) {
    for cmd in reader.read() {
        if cmd.label != COMMAND_LABEL {
            continue;
        }
        let result = if ctx.has_permission(cmd.source, SET_PERMISSION) {
            set_stamina(&cmd.args, &players, &settings, &mut sessions)
        } else {
            Err(StaminaCommandError::NoPermission)
        };

        match result {
            Ok((username, amount)) => {
                info!("{:?} set stamina of {username} to {amount}", cmd.source);
                ctx.reply(
                    cmd.source,
                    format!("Set stamina of {username} to {amount:?}"),
                    ChatColor::Green,
                );
            }
            Err(e) => ctx.reply(cmd.source, e.to_string(), ChatColor::Red),
        }
    }
}

fn set_stamina(
    args: &[String],
    players: &Query<&GameProfile, With<Player>>,
    settings: &StaminaSettings,
    sessions: &mut StaminaSessions,
) -> Result<(String, f64), StaminaCommandError> {
    let [name, amount, ..] = args else {
        return Err(StaminaCommandError::Usage);
    };
    let profile = find_player(players, name).ok_or(StaminaCommandError::PlayerNotFound)?;
    let amount = parse_amount(amount)?;

    let stored = sessions
        .get_or_create(profile.id, settings)
        .set(amount, settings);
    Ok((profile.username.clone(), stored))
}

pub(crate) fn complete_stamina_command(
    mut reader: MessageReader<TabCompleteRequest>,
    mut writer: MessageWriter<TabCompleteSuggestions>,
    players: Query<&GameProfile, With<Player>>,
) {
    for req in reader.read() {
        if req.label != COMMAND_LABEL {
            continue;
        }
        writer.write(TabCompleteSuggestions {
            source: req.source,
            suggestions: suggest(&req.args, &players),
        });
    }
}

fn suggest(args: &[String], players: &Query<&GameProfile, With<Player>>) -> Vec<String> {
    let [partial] = args else {
        return Vec::new();
    };
    let partial = partial.to_lowercase();
    let mut names: Vec<String> = players
        .iter()
        .filter(|profile| profile.username.to_lowercase().starts_with(&partial))
        .map(|profile| profile.username.clone())
        .collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_must_be_finite() {
        assert_eq!(parse_amount("12.5"), Ok(12.5));
        assert_eq!(parse_amount("-5"), Ok(-5.0));
        assert_eq!(
            parse_amount("abc"),
            Err(StaminaCommandError::InvalidNumber("abc".into()))
        );
        assert_eq!(
            parse_amount("NaN"),
            Err(StaminaCommandError::InvalidNumber("NaN".into()))
        );
        assert_eq!(
            parse_amount("inf"),
            Err(StaminaCommandError::InvalidNumber("inf".into()))
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            StaminaCommandError::NoPermission.to_string(),
            "You don't have permission to do that."
        );
        assert_eq!(
            StaminaCommandError::Usage.to_string(),
            "Usage: /elytrastamina <player> <amount>"
        );
        assert_eq!(
            StaminaCommandError::PlayerNotFound.to_string(),
            "Player not found."
        );
        assert_eq!(
            StaminaCommandError::InvalidNumber("x".into()).to_string(),
            "Invalid number: x"
        );
    }
}
