//! CLI context for storing global options during command execution

use crate::client::{RootRegistry, UploadService};
use crate::config::Config;
use crate::storage::{FileService, FileStore};
use std::cell::RefCell;
use std::path::PathBuf;

thread_local! {
    static CLI_CONTEXT: RefCell<Option<CliContext>> = const { RefCell::new(None) };
}

/// Context containing global CLI options and the resolved configuration
#[derive(Debug, Clone, Default)]
pub struct CliContext {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub verbose: bool,
    pub quiet: bool,
}

impl CliContext {
    /// Set the global CLI context for the current thread
    pub fn set(context: CliContext) {
        CLI_CONTEXT.with(|c| {
            *c.borrow_mut() = Some(context);
        });
    }

    /// Get the current CLI context
    pub fn get() -> Option<CliContext> {
        CLI_CONTEXT.with(|c| c.borrow().clone())
    }

    /// Get the current context, falling back to defaults
    pub fn current() -> CliContext {
        Self::get().unwrap_or_default()
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose() -> bool {
        Self::get().map(|ctx| ctx.verbose).unwrap_or(false)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet() -> bool {
        Self::get().map(|ctx| ctx.quiet).unwrap_or(false)
    }

    /// Store-side service over the configured data directory
    pub fn file_service(&self) -> FileService {
        FileService::new(
            FileStore::new(&self.config.store.data_dir),
            self.config.store.tree_format,
        )
    }

    /// Local root registry
    pub fn root_registry(&self) -> RootRegistry {
        RootRegistry::new(&self.config.client.roots_dir)
    }

    /// Client-side service talking to the in-process store
    pub fn upload_service(&self) -> UploadService<FileService> {
        UploadService::new(
            self.file_service(),
            self.root_registry(),
            &self.config.client.downloads_dir,
        )
        .with_remove_after_upload(self.config.client.remove_after_upload)
    }
}
