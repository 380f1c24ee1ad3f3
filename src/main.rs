//! SPI LED endpoint firmware — main entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                     │
//! │   EspSpiHost ─▶ EspDuplex | EspPolled       PinActuators      │
//! │   (DuplexTransport | PolledTransport)       (ActuatorDriver)  │
//! │                                                               │
//! │  ──────────────── Port Trait Boundary ───────────────────     │
//! │                                                               │
//! │   Endpoint ─▶ TransferFsm | PollingFsm (exactly one)          │
//! │   parser · dispatcher · actuator store · responses            │
//! └───────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::{Duration, Instant};

use anyhow::Result;
use esp_idf_hal::gpio::{AnyIOPin, Output, PinDriver};
use log::info;

use spi_led_endpoint::adapters::esp_spi::EspSpiHost;
use spi_led_endpoint::adapters::gpio_actuators::PinActuators;
use spi_led_endpoint::app::service::Endpoint;
use spi_led_endpoint::config::{DriveMode, EndpointConfig};
use spi_led_endpoint::diagnostics::LinkStats;
use spi_led_endpoint::events::EventQueue;
use spi_led_endpoint::fsm::polling::PollOutcome;
use spi_led_endpoint::pins;

type LedPin = PinDriver<'static, AnyIOPin, Output>;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("SPI LED endpoint v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config ─────────────────────────────────────────────
    let config = EndpointConfig::from_json(include_str!("../endpoint.json"))
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    info!("config: {:?}", config);

    // ── 3. LED pins, channel order G, O, R, B ─────────────────
    let leds = PinActuators::new(led_pins()?);
    let endpoint = Endpoint::new(config.clone(), leds);

    // ── 4. SPI slave + exactly one driver ─────────────────────
    let host = EspSpiHost::take(&config).map_err(|e| anyhow::anyhow!("{e}"))?;
    let stats_every = Duration::from_secs(u64::from(config.stats_log_interval_secs));

    match config.drive_mode {
        DriveMode::Interrupt => {
            let queue: &'static mut EventQueue = Box::leak(Box::new(EventQueue::new()));
            let (producer, consumer) = queue.split();
            let mut link = endpoint.interrupt_driven(host.into_duplex(producer), consumer);
            run_forever(stats_every, || {
                if link.service() == 0 {
                    std::thread::sleep(Duration::from_millis(1));
                }
                *link.stats()
            })
        }
        DriveMode::Polling => {
            // The CS pad belongs to SPI2; read it in place.
            let select = host.select_line();
            let mut link = endpoint.polling(host.into_polled(select));
            run_forever(stats_every, || {
                if link.drive_exchange_once() == PollOutcome::NoRequest {
                    std::thread::sleep(Duration::from_millis(1));
                }
                *link.stats()
            })
        }
    }
}

fn led_pins() -> Result<[LedPin; 4]> {
    let mut out = Vec::with_capacity(pins::LED_GPIOS.len());
    for gpio in pins::LED_GPIOS {
        // SAFETY: LED GPIOs are dedicated outputs owned by this adapter.
        let pin = unsafe { AnyIOPin::new(gpio) };
        out.push(PinDriver::output(pin)?);
    }
    out.try_into()
        .map_err(|_| anyhow::anyhow!("LED pin table length mismatch"))
}

/// Service the link forever, logging statistics periodically.
fn run_forever(stats_every: Duration, mut step: impl FnMut() -> LinkStats) -> ! {
    let mut last_log = Instant::now();
    loop {
        let stats = step();
        if last_log.elapsed() >= stats_every {
            stats.log_summary();
            last_log = Instant::now();
        }
    }
}
