//! Conversions from serenity models into scan records.

use rolesweep_core::{
    Attachment, Author, MessageId, Reaction, ReactionEmoji, RoleId, RoleRank, ScannedMessage,
    TargetRole,
};
use serenity::model::channel::{Message, MessageReaction, ReactionType};
use serenity::model::guild::Role;
use serenity::model::user::User;

/// Convert a serenity user into a message author.
pub fn to_author(user: &User) -> Author {
    Author::new(user.id.get(), user.name.clone(), user.bot)
}

/// Convert a serenity reaction emoji.
///
/// Returns `None` for emoji kinds the scan has no vocabulary for.
pub fn to_reaction_emoji(reaction: &ReactionType) -> Option<ReactionEmoji> {
    match reaction {
        ReactionType::Unicode(symbol) => Some(ReactionEmoji::Unicode(symbol.clone())),
        ReactionType::Custom { id, name, .. } => Some(ReactionEmoji::Custom {
            id: id.get(),
            name: name.clone(),
        }),
        _ => None,
    }
}

/// Convert a reaction summary on a message.
pub fn to_reaction(reaction: &MessageReaction) -> Option<Reaction> {
    to_reaction_emoji(&reaction.reaction_type).map(|emoji| Reaction::new(emoji, reaction.count))
}

/// Convert a fetched message into the record the aggregator consumes.
pub fn to_scanned_message(message: &Message) -> ScannedMessage {
    let attachments = message
        .attachments
        .iter()
        .map(|a| Attachment::new(a.filename.clone(), a.content_type.clone()))
        .collect();

    let reactions = message.reactions.iter().filter_map(to_reaction).collect();

    ScannedMessage::new(
        MessageId(message.id.get()),
        to_author(&message.author),
        message.content.clone(),
        attachments,
        reactions,
    )
}

/// Hierarchy rank of a guild role.
pub fn to_role_rank(role: &Role) -> RoleRank {
    RoleRank::new(role.position, RoleId(role.id.get()))
}

/// Convert a guild role into a grant target.
pub fn to_target_role(role: &Role) -> TargetRole {
    TargetRole::new(RoleId(role.id.get()), role.name.clone(), role.position)
}
