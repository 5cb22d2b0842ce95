//! Wizard command channel
//!
//! A closed set of console-level commands delivered through an explicit
//! subscription, replacing ambient broadcast events. Consumers register by
//! calling `subscribe`; senders without a live subscriber are dropped.

use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardCommand {
    /// Move keyboard focus to the console search field (UI-owned).
    FocusSearch,
    /// Attempt to publish the current quiz; still gated by `canFinalize`.
    BulkPublish,
    /// Regenerate every question in the review set.
    BulkRegenerate,
}

#[derive(Clone)]
pub struct CommandBus {
    tx: broadcast::Sender<WizardCommand>,
}

impl CommandBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Register a consumer. Each receiver sees every command sent after the
    /// subscription was created.
    pub fn subscribe(&self) -> broadcast::Receiver<WizardCommand> {
        self.tx.subscribe()
    }

    /// Deliver a command to all current subscribers; returns how many
    /// received it.
    pub fn send(&self, command: WizardCommand) -> usize {
        self.tx.send(command).unwrap_or(0)
    }
}

impl Default for CommandBus {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_commands_in_order() {
        let bus = CommandBus::default();
        let mut rx = bus.subscribe();
        assert_eq!(bus.send(WizardCommand::BulkRegenerate), 1);
        assert_eq!(bus.send(WizardCommand::BulkPublish), 1);
        assert_eq!(rx.recv().await.unwrap(), WizardCommand::BulkRegenerate);
        assert_eq!(rx.recv().await.unwrap(), WizardCommand::BulkPublish);
    }

    #[test]
    fn send_without_subscribers_is_dropped() {
        let bus = CommandBus::default();
        assert_eq!(bus.send(WizardCommand::FocusSearch), 0);
    }

    #[tokio::test]
    async fn late_subscribers_miss_earlier_commands() {
        let bus = CommandBus::default();
        bus.send(WizardCommand::FocusSearch);
        let mut rx = bus.subscribe();
        bus.send(WizardCommand::BulkPublish);
        assert_eq!(rx.recv().await.unwrap(), WizardCommand::BulkPublish);
    }
}
