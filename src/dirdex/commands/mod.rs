use crate::cache::CacheStatus;
use crate::config::DirdexConfig;
use crate::model::Directory;

pub mod config;
pub mod export;
pub mod list;
pub mod search;
pub mod show;
pub mod sync;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Structured result returned from every command. The CLI layer turns
/// this into terminal output; nothing in the command layer prints.
#[derive(Debug, Default)]
pub struct CmdResult {
    /// Filtered, sorted, paginated records for listing commands.
    pub listed: Vec<Directory>,
    /// Size of the collection before filtering ("showing X of Y").
    pub total: usize,
    /// Single record for `show`.
    pub directory: Option<Directory>,
    /// Cache information for `config show`.
    pub cache_status: Option<CacheStatus>,
    pub config: Option<DirdexConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, listed: Vec<Directory>, total: usize) -> Self {
        self.listed = listed;
        self.total = total;
        self
    }

    pub fn with_directory(mut self, directory: Directory) -> Self {
        self.directory = Some(directory);
        self
    }
}
