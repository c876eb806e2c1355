use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use serenity::builder::GetMessages;
use serenity::http::Http;
use serenity::model::prelude::*;

use crate::discord::errors::CommandError;

/// Largest deletable request. The fetch window is amount + 1 (the trigger
/// message rides along) and the platform caps both the message page and a
/// bulk delete at 100.
pub const MAX_PURGE_AMOUNT: u64 = 99;

/// How long the confirmation notice stays up before deleting itself.
pub const CONFIRMATION_TTL: Duration = Duration::from_millis(2500);

/// Message operations of the channel being purged. Bulk deletion is a
/// single all-or-nothing platform call; messages older than the platform
/// age window make the whole call fail.
#[async_trait]
pub trait PurgeChannel {
    async fn recent_messages(&self, limit: u8) -> Result<Vec<MessageId>, CommandError>;
    async fn bulk_delete(&self, ids: &[MessageId]) -> Result<(), CommandError>;
    async fn send_notice(&self, text: &str) -> Result<MessageId, CommandError>;
    async fn delete_notice(&self, id: MessageId) -> Result<(), CommandError>;
}

/// Deletes the `amount` most recent messages plus the triggering command
/// message, confirms with the count excluding the trigger, and schedules
/// the confirmation to delete itself after [`CONFIRMATION_TTL`].
///
/// Returns the reported count. Any platform failure before the
/// confirmation aborts the command; the deferred self-delete is
/// fire-and-forget and its failure is only logged.
pub async fn purge_messages<C>(channel: &Arc<C>, amount: u64) -> Result<usize, CommandError>
where
    C: PurgeChannel + Send + Sync + 'static,
{
    if amount == 0 || amount > MAX_PURGE_AMOUNT {
        return Err(CommandError::InvalidArgument(format!(
            "The amount must be between 1 and {}.",
            MAX_PURGE_AMOUNT
        )));
    }

    let ids = channel.recent_messages((amount + 1) as u8).await?;
    if !ids.is_empty() {
        channel.bulk_delete(&ids).await?;
    }

    // The trigger message is deleted too but not reported.
    let deleted = ids.len().saturating_sub(1);

    let notice = channel
        .send_notice(&format!("{} messages deleted successfully", deleted))
        .await?;
    tokio::spawn(expire_notice(Arc::clone(channel), notice));

    Ok(deleted)
}

/// Deletes the confirmation notice after its TTL. Best effort: the notice
/// may already be gone (swept up by another purge, removed by a moderator)
/// and that is not worth surfacing.
pub async fn expire_notice<C>(channel: Arc<C>, notice: MessageId)
where
    C: PurgeChannel + Send + Sync,
{
    tokio::time::sleep(CONFIRMATION_TTL).await;
    if let Err(e) = channel.delete_notice(notice).await {
        warn!("Failed to delete purge confirmation message: {}", e);
    }
}

/// Serenity-backed [`PurgeChannel`].
pub struct ChannelMessages {
    pub http: Arc<Http>,
    pub channel_id: ChannelId,
}

#[async_trait]
impl PurgeChannel for ChannelMessages {
    async fn recent_messages(&self, limit: u8) -> Result<Vec<MessageId>, CommandError> {
        let messages = self
            .channel_id
            .messages(&self.http, GetMessages::new().limit(limit))
            .await?;
        Ok(messages.into_iter().map(|message| message.id).collect())
    }

    async fn bulk_delete(&self, ids: &[MessageId]) -> Result<(), CommandError> {
        // The platform rejects a bulk call for a single message.
        if let [only] = ids {
            self.channel_id.delete_message(&self.http, *only).await?;
        } else {
            self.channel_id.delete_messages(&self.http, ids).await?;
        }
        Ok(())
    }

    async fn send_notice(&self, text: &str) -> Result<MessageId, CommandError> {
        let message = self.channel_id.say(&self.http, text).await?;
        Ok(message.id)
    }

    async fn delete_notice(&self, id: MessageId) -> Result<(), CommandError> {
        self.channel_id.delete_message(&self.http, id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Fetch(u8),
        BulkDelete(Vec<MessageId>),
        Notice(String),
        DeleteNotice(MessageId),
    }

    struct MockChannel {
        backlog: Vec<MessageId>,
        fail_bulk_delete: bool,
        fail_delete_notice: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl MockChannel {
        fn with_backlog(len: u64) -> Self {
            MockChannel {
                backlog: (1..=len).map(MessageId::new).collect(),
                fail_bulk_delete: false,
                fail_delete_notice: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PurgeChannel for MockChannel {
        async fn recent_messages(&self, limit: u8) -> Result<Vec<MessageId>, CommandError> {
            self.calls.lock().unwrap().push(Call::Fetch(limit));
            Ok(self.backlog.iter().take(limit as usize).copied().collect())
        }

        async fn bulk_delete(&self, ids: &[MessageId]) -> Result<(), CommandError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::BulkDelete(ids.to_vec()));
            if self.fail_bulk_delete {
                return Err(CommandError::Platform(serenity::Error::Other(
                    "message too old for bulk deletion",
                )));
            }
            Ok(())
        }

        async fn send_notice(&self, text: &str) -> Result<MessageId, CommandError> {
            self.calls.lock().unwrap().push(Call::Notice(text.to_string()));
            Ok(MessageId::new(9999))
        }

        async fn delete_notice(&self, id: MessageId) -> Result<(), CommandError> {
            self.calls.lock().unwrap().push(Call::DeleteNotice(id));
            if self.fail_delete_notice {
                return Err(CommandError::Platform(serenity::Error::Other(
                    "unknown message",
                )));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn purge_deletes_amount_plus_trigger_and_reports_amount() {
        let channel = Arc::new(MockChannel::with_backlog(50));
        let deleted = purge_messages(&channel, 5).await.unwrap();
        assert_eq!(deleted, 5);

        let calls = channel.calls();
        assert_eq!(calls[0], Call::Fetch(6));
        match &calls[1] {
            Call::BulkDelete(ids) => assert_eq!(ids.len(), 6),
            other => panic!("expected bulk delete, got {:?}", other),
        }
        assert_eq!(
            calls[2],
            Call::Notice("5 messages deleted successfully".to_string())
        );
    }

    #[tokio::test]
    async fn purge_reports_fewer_when_channel_is_short() {
        let channel = Arc::new(MockChannel::with_backlog(3));
        let deleted = purge_messages(&channel, 10).await.unwrap();
        assert_eq!(deleted, 2);
        assert!(channel
            .calls()
            .contains(&Call::Notice("2 messages deleted successfully".to_string())));
    }

    #[tokio::test]
    async fn purge_rejects_out_of_range_amounts() {
        let channel = Arc::new(MockChannel::with_backlog(10));
        assert!(matches!(
            purge_messages(&channel, 0).await,
            Err(CommandError::InvalidArgument(_))
        ));
        assert!(matches!(
            purge_messages(&channel, MAX_PURGE_AMOUNT + 1).await,
            Err(CommandError::InvalidArgument(_))
        ));
        assert!(channel.calls().is_empty());
    }

    #[tokio::test]
    async fn purge_surfaces_bulk_delete_failure_without_confirming() {
        let channel = Arc::new(MockChannel {
            fail_bulk_delete: true,
            ..MockChannel::with_backlog(20)
        });
        let err = purge_messages(&channel, 5).await.unwrap_err();
        assert!(matches!(err, CommandError::Platform(_)));
        assert!(!channel
            .calls()
            .iter()
            .any(|call| matches!(call, Call::Notice(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn notice_expires_after_the_ttl() {
        let channel = Arc::new(MockChannel::with_backlog(0));
        expire_notice(Arc::clone(&channel), MessageId::new(9999)).await;
        assert_eq!(channel.calls(), vec![Call::DeleteNotice(MessageId::new(9999))]);
    }

    #[tokio::test(start_paused = true)]
    async fn notice_expiry_failure_is_swallowed() {
        let channel = Arc::new(MockChannel {
            fail_delete_notice: true,
            ..MockChannel::with_backlog(0)
        });
        // Must not panic or propagate; the failure is logged and dropped.
        expire_notice(Arc::clone(&channel), MessageId::new(9999)).await;
    }
}
