//! Adapters — concrete implementations of the port traits and the text
//! surfaces built on the control surface.
//!
//! | Adapter      | Implements / wraps | Connects to                     |
//! |--------------|--------------------|---------------------------------|
//! | `attributes` | ControlSurface     | sysfs-style named attributes    |
//! | `console`    | AttributeTable     | Serial command line             |
//! | `log_sink`   | ViolationQueue     | Serial log output               |
//! | `nvs`        | StoragePort        | ESP-IDF NVS partition           |
//! | `settings`   | StoragePort        | Persisted `FilterConfig`, RAM store |
//! | `status`     | FilterSnapshot     | Status text / JSON bridge       |

pub mod attributes;
pub mod console;
pub mod log_sink;
#[cfg(target_os = "espidf")]
pub mod nvs;
pub mod settings;
pub mod status;
