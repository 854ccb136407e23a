pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, OutputFormat};

pub use crate::adapters::memory::{MemoryPage, NodeSpec, PageSnapshot};
#[cfg(not(target_arch = "wasm32"))]
pub use crate::app::event_loop::{simulate, simulate_blocking, EventLoop, LoopOutcome, TraceRow};
pub use crate::app::script::{PageEvent, Script, ScriptStep};
pub use crate::config::ControllerConfig;
pub use crate::core::controller::ScrollUiController;
pub use crate::utils::error::{FolioError, Result};
