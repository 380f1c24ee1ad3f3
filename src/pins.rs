//! GPIO / peripheral pin assignments for the endpoint board.
//!
//! Single source of truth — the SPI slave adapter and the firmware entry
//! point reference this module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// SPI slave (SPI2 / FSPI, IO-MUX pins on ESP32-S3)
// ---------------------------------------------------------------------------

pub const SPI_SCLK_GPIO: i32 = 12;
pub const SPI_MOSI_GPIO: i32 = 11;
pub const SPI_MISO_GPIO: i32 = 13;
/// Select line, active low.  Also read directly by the polling driver.
pub const SPI_CS_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// Indicator LEDs, channel index order (G, O, R, B)
// ---------------------------------------------------------------------------

pub const LED_GREEN_GPIO: i32 = 4;
pub const LED_ORANGE_GPIO: i32 = 5;
pub const LED_RED_GPIO: i32 = 6;
pub const LED_BLUE_GPIO: i32 = 7;

pub const LED_GPIOS: [i32; crate::wire::CHANNEL_COUNT] =
    [LED_GREEN_GPIO, LED_ORANGE_GPIO, LED_RED_GPIO, LED_BLUE_GPIO];

// ---------------------------------------------------------------------------
// SPI bus parameters
// ---------------------------------------------------------------------------

/// DMA channel selection for the slave host (auto on ESP32-S3).
pub const SPI_DMA_CHAN_AUTO: u32 = 3;
/// Transactions the slave driver may hold queued.
pub const SPI_QUEUE_SIZE: i32 = 1;
