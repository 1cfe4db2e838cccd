//! soundstudio-common - Browser-independent helpers for the SoundStudio upload page
//!
//! Everything here is pure logic over small capability traits (storage
//! backend, banner host, upload surface, chart backend, scheduler) so the
//! page behaviour can be exercised natively. The browser implementations of
//! those traits live in `soundstudio-web`.

pub mod chart;
pub mod config;
pub mod content_type;
pub mod debounce;
pub mod format;
pub mod notify;
pub mod scheduler;
pub mod storage;
pub mod upload;
pub mod validation;

pub use chart::{create_visualization, ChartBackend, ChartError, PlotConfig, Rendered};
pub use config::{ConfigError, StudioConfig};
pub use content_type::AudioFormat;
pub use debounce::Debouncer;
pub use format::{format_duration, format_file_size};
pub use notify::{Banner, BannerHost, BannerTicket, Notifier, NotifyError, Severity};
pub use scheduler::{Scheduler, TaskId};
pub use storage::{BackendError, JsonStorage, KeyValueBackend, MemoryBackend, StorageError};
pub use upload::{EventOutcome, Highlight, SelectedFile, UploadEvent, UploadHandler, UploadSurface};
pub use validation::{validate_audio_file, AudioValidator, ValidationError};

#[cfg(any(test, feature = "test-utils"))]
pub use scheduler::ManualScheduler;
