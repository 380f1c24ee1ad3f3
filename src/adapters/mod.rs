//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter          | Implements         | Connects to                  |
//! |------------------|--------------------|------------------------------|
//! | `gpio_actuators` | ActuatorDriver     | any embedded-hal `OutputPin` |
//! | `esp_spi`        | DuplexTransport    | ESP32 SPI2 slave + DMA (ISR) |
//! |                  | PolledTransport    | ESP32 SPI2 slave (blocking)  |

pub mod gpio_actuators;

#[cfg(feature = "espidf")]
pub mod esp_spi;
