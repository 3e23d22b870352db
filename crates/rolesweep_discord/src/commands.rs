//! Slash-command definitions and option parsing.

use crate::convert::to_target_role;
use rolesweep_core::{AttachmentFilter, TargetRole};
use rolesweep_error::{ScanError, ScanErrorKind, ScanResult};
use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::application::{CommandOptionType, ResolvedValue};
use serenity::model::channel::ChannelType;
use serenity::model::id::ChannelId;
use serenity::model::permissions::Permissions;
use strum::IntoEnumIterator;

const FILTER_DESCRIPTION: &str =
    "Give role only to: image senders, link senders, or everyone (default: everyone)";
const START_DESCRIPTION: &str =
    "Message link to start from (optional, scans from beginning if not set)";
const END_DESCRIPTION: &str = "Message link to end at (optional, scans to latest message if not set)";

/// The scan commands the bot registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, derive_more::Display)]
pub enum ScanCommand {
    /// Scan a named text channel.
    #[display("giverolechannel")]
    Channel,
    /// Scan the thread the command is invoked in.
    #[display("giverolethread")]
    Thread,
}

impl ScanCommand {
    /// Registered command name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanCommand::Channel => "giverolechannel",
            ScanCommand::Thread => "giverolethread",
        }
    }

    /// Look up a command by its registered name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|command| command.as_str() == name)
    }

    fn description(&self) -> &'static str {
        match self {
            ScanCommand::Channel => "Scan a channel and assign roles to valid submitters",
            ScanCommand::Thread => "Scan a thread and assign roles to valid submitters",
        }
    }

    /// Build the registration payload for this command.
    pub fn definition(&self) -> CreateCommand {
        let mut command = CreateCommand::new(self.as_str())
            .description(self.description())
            .default_member_permissions(Permissions::MANAGE_ROLES);

        if *self == ScanCommand::Channel {
            command = command.add_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "The channel to scan (required)",
                )
                .channel_types(vec![ChannelType::Text, ChannelType::News])
                .required(true),
            );
        }

        command
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Role,
                    "role",
                    "The role to assign (required)",
                )
                .required(true),
            )
            .add_option(filter_option())
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "start_message",
                START_DESCRIPTION,
            ))
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "end_message",
                END_DESCRIPTION,
            ))
    }
}

fn filter_option() -> CreateCommandOption {
    AttachmentFilter::iter().fold(
        CreateCommandOption::new(
            CommandOptionType::String,
            "attachment_filter",
            FILTER_DESCRIPTION,
        ),
        |option, filter| option.add_string_choice(filter.choice_label(), filter.as_str()),
    )
}

/// Registration payloads for every scan command.
pub fn scan_commands() -> Vec<CreateCommand> {
    ScanCommand::iter().map(|command| command.definition()).collect()
}

/// Arguments of a scan command invocation.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ScanOptions {
    channel: Option<ChannelId>,
    role: TargetRole,
    filter: AttachmentFilter,
    start_message: Option<String>,
    end_message: Option<String>,
}

impl ScanOptions {
    /// Collect options from `(name, value)` pairs.
    ///
    /// Empty link strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ScanErrorKind::InvalidOption`] when the role is missing or
    /// the filter value is unknown.
    pub fn parse<'a>(
        options: impl IntoIterator<Item = (&'a str, ResolvedValue<'a>)>,
    ) -> ScanResult<Self> {
        let mut channel = None;
        let mut role = None;
        let mut filter = AttachmentFilter::default();
        let mut start_message = None;
        let mut end_message = None;

        for (name, value) in options {
            match (name, value) {
                ("channel", ResolvedValue::Channel(partial)) => channel = Some(partial.id),
                ("role", ResolvedValue::Role(resolved)) => role = Some(to_target_role(resolved)),
                ("attachment_filter", ResolvedValue::String(value)) => {
                    filter = value
                        .parse()
                        .map_err(|e| ScanError::new(ScanErrorKind::InvalidOption(e)))?;
                }
                ("start_message", ResolvedValue::String(link)) => {
                    start_message = non_empty(link);
                }
                ("end_message", ResolvedValue::String(link)) => end_message = non_empty(link),
                (other, _) => {
                    return Err(ScanError::new(ScanErrorKind::InvalidOption(
                        other.to_string(),
                    )));
                }
            }
        }

        let role = role
            .ok_or_else(|| ScanError::new(ScanErrorKind::InvalidOption("role".to_string())))?;

        Ok(Self {
            channel,
            role,
            filter,
            start_message,
            end_message,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn payload(command: ScanCommand) -> Value {
        serde_json::to_value(command.definition()).unwrap()
    }

    fn option_names(payload: &Value) -> Vec<String> {
        payload["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_command_names_round_trip() {
        for command in ScanCommand::iter() {
            assert_eq!(ScanCommand::from_name(command.as_str()), Some(command));
            assert_eq!(command.to_string(), command.as_str());
        }
        assert_eq!(ScanCommand::from_name("ping"), None);
    }

    #[test]
    fn test_channel_command_takes_channel_first() {
        let payload = payload(ScanCommand::Channel);
        assert_eq!(payload["name"], "giverolechannel");
        assert_eq!(
            option_names(&payload),
            ["channel", "role", "attachment_filter", "start_message", "end_message"]
        );
    }

    #[test]
    fn test_thread_command_has_no_channel_option() {
        let payload = payload(ScanCommand::Thread);
        assert_eq!(
            option_names(&payload),
            ["role", "attachment_filter", "start_message", "end_message"]
        );
    }

    #[test]
    fn test_commands_require_manage_roles() {
        for command in ScanCommand::iter() {
            let payload = payload(command);
            assert_eq!(
                payload["default_member_permissions"],
                Permissions::MANAGE_ROLES.bits().to_string()
            );
        }
    }

    #[test]
    fn test_filter_choices_are_labelled() {
        let payload = payload(ScanCommand::Thread);
        let choices: Vec<(String, String)> = payload["options"][1]["choices"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| {
                (
                    c["name"].as_str().unwrap().to_string(),
                    c["value"].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(
            choices,
            [
                ("Everyone".to_string(), "none".to_string()),
                ("Image senders".to_string(), "image".to_string()),
                ("Link senders".to_string(), "link".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_role_is_rejected() {
        let err = ScanOptions::parse([("attachment_filter", ResolvedValue::String("image"))])
            .unwrap_err();
        assert_eq!(
            err.kind(),
            &ScanErrorKind::InvalidOption("role".to_string())
        );
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        let err = ScanOptions::parse([("attachment_filter", ResolvedValue::String("video"))])
            .unwrap_err();
        assert!(matches!(err.kind(), ScanErrorKind::InvalidOption(_)));
    }
}
