//! Oldest-first message history over a bounded range.

use crate::convert::to_scanned_message;
use futures::Stream;
use rolesweep_core::{MessageId, ScannedMessage};
use rolesweep_error::{ScanError, ScanErrorKind, ScanResult};
use rolesweep_scan::HistoryRange;
use serenity::builder::GetMessages;
use serenity::http::Http;
use serenity::model::id::{ChannelId, MessageId as SerenityMessageId};
use std::sync::Arc;
use tracing::{debug, error};

/// Stream a channel's messages in chronological order.
///
/// Pages forward from the range's lower bound and stops at the first message
/// at or beyond the upper bound. A failed page ends the stream with a
/// [`ScanErrorKind::History`] error.
pub fn history_stream(
    http: Arc<Http>,
    channel: ChannelId,
    range: HistoryRange,
    page_size: u8,
) -> impl Stream<Item = ScanResult<ScannedMessage>> + Send {
    async_stream::try_stream! {
        // Snowflakes are non-zero, so an open lower bound starts at 1.
        let mut cursor = range.after().map_or(1, |id| id.0.max(1));
        let mut pages = 0usize;

        loop {
            let request = GetMessages::new()
                .after(SerenityMessageId::new(cursor))
                .limit(page_size);

            let mut page = channel
                .messages(http.as_ref(), request)
                .await
                .map_err(|e| {
                    error!(channel_id = %channel, cursor, error = %e, "Failed to fetch history page");
                    ScanError::new(ScanErrorKind::History(e.to_string()))
                })?;

            pages += 1;
            debug!(channel_id = %channel, cursor, fetched = page.len(), pages, "History page fetched");

            let Some(last) = page.iter().map(|m| m.id.get()).max() else {
                break;
            };
            let full_page = page.len() >= usize::from(page_size);
            page.sort_by_key(|m| m.id);

            let mut reached_end = false;
            for message in &page {
                if !range.contains(MessageId(message.id.get())) {
                    reached_end = true;
                    break;
                }
                yield to_scanned_message(message);
            }

            if reached_end || !full_page {
                break;
            }
            cursor = last;
        }
    }
}
