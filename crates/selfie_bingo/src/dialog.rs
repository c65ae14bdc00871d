//! User dialog collaborator.

/// Native alert/prompt/confirm dialogs supplied by the host.
#[async_trait::async_trait]
pub trait Dialogs: Send + Sync {
    /// Shows a message.
    async fn alert(&self, message: &str, title: &str);

    /// Asks for text. `None` means the prompt was dismissed.
    async fn prompt(&self, message: &str, title: &str, default_text: &str) -> Option<String>;

    /// Asks a yes/no question. `true` means the OK button was chosen.
    async fn confirm(&self, message: &str, title: &str, ok_label: &str, cancel_label: &str)
    -> bool;
}
