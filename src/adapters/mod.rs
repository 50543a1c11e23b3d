//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements          | Connects to                |
//! |---------------|---------------------|----------------------------|
//! | `hardware`    | ButtonPinPort       | ESP32 GPIO levels          |
//! |               | LampPort            | ESP32 LEDC PWM             |
//! | `log_sink`    | EventSink           | Serial log output          |
//! | `shadow_link` | ShadowPort          | Cloud shadow transport     |

pub mod hardware;
pub mod log_sink;
pub mod shadow_link;
