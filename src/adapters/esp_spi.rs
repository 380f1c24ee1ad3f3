//! ESP32 SPI2 slave transport.
//!
//! Raw ESP-IDF `spi_slave_*` calls with DMA.  The host is a singleton
//! token: [`EspSpiHost::take`] succeeds once, and the token is consumed by
//! either [`EspSpiHost::into_duplex`] (post-transaction ISR feeds the event
//! queue) or [`EspSpiHost::into_polled`] (blocking transfers from the main
//! loop).  Bus settings: 8-bit, MSB first, hardware CS, mode from config.

use core::cell::UnsafeCell;
use core::ptr;
use core::sync::atomic::{AtomicBool, Ordering};

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};
use esp_idf_svc::sys::*;
use log::{info, warn};

use crate::app::ports::{DuplexTransport, PolledTransport};
use crate::config::EndpointConfig;
use crate::error::{Error, TransportFault};
use crate::events::{EventProducer, LinkEvent, push_event};
use crate::pins;
use crate::wire::{FRAME_CAPACITY, Frame};

const HOST: spi_host_device_t = spi_host_device_t_SPI2_HOST;
const FRAME_BITS: usize = FRAME_CAPACITY * 8;

static HOST_TAKEN: AtomicBool = AtomicBool::new(false);

// ── ISR → queue handoff ───────────────────────────────────────

struct IsrProducer(UnsafeCell<Option<EventProducer<'static>>>);

// SAFETY: written once by `into_duplex` before the first transaction is
// queued, afterwards only touched from the post-transaction ISR, which
// never preempts itself.
unsafe impl Sync for IsrProducer {}

static ISR_PRODUCER: IsrProducer = IsrProducer(UnsafeCell::new(None));

/// Post-transaction callback, ISR context.
unsafe extern "C" fn post_trans(trans: *mut spi_slave_transaction_t) {
    // SAFETY: the driver hands back the descriptor it just completed; its
    // rx buffer is one of our FRAME_CAPACITY-byte DMA buffers.
    let (bits, rx) = unsafe { ((*trans).trans_len, (*trans).rx_buffer as *const u8) };

    let event = if bits < FRAME_BITS {
        LinkEvent::ExchangeFaulted(TransportFault::Framing)
    } else {
        // SAFETY: see above; the transfer is finished so DMA no longer writes.
        let bytes = unsafe { core::slice::from_raw_parts(rx, FRAME_CAPACITY) };
        LinkEvent::ExchangeCompleted(Frame::from_bytes(bytes))
    };

    // SAFETY: see `IsrProducer`.
    if let Some(producer) = unsafe { (*ISR_PRODUCER.0.get()).as_mut() } {
        push_event(producer, event);
    }
}

// ── DMA buffers ───────────────────────────────────────────────

/// Word-aligned buffer, as the slave DMA requires.
#[repr(C, align(4))]
struct DmaFrame([u8; FRAME_CAPACITY]);

struct DmaBuffers {
    tx: Box<DmaFrame>,
    rx: Box<DmaFrame>,
    trans: Box<spi_slave_transaction_t>,
}

impl DmaBuffers {
    fn new() -> Self {
        Self {
            tx: Box::new(DmaFrame([0; FRAME_CAPACITY])),
            rx: Box::new(DmaFrame([0; FRAME_CAPACITY])),
            trans: Box::new(spi_slave_transaction_t::default()),
        }
    }

    /// Load `outbound`, clear rx and rebuild the descriptor.
    fn stage(&mut self, outbound: &Frame) -> *const spi_slave_transaction_t {
        self.tx.0.copy_from_slice(outbound.as_bytes());
        self.rx.0.fill(0);
        *self.trans = spi_slave_transaction_t {
            length: FRAME_BITS,
            trans_len: 0,
            tx_buffer: self.tx.0.as_ptr().cast(),
            rx_buffer: self.rx.0.as_mut_ptr().cast(),
            user: ptr::null_mut(),
            ..Default::default()
        };
        &raw const *self.trans
    }
}

fn ms_to_ticks(ms: u32) -> TickType_t {
    ((u64::from(ms) * u64::from(CONFIG_FREERTOS_HZ)) / 1000).max(1) as TickType_t
}

/// Pop a finished descriptor from the driver's result queue.
fn collect_result(ticks: TickType_t) -> esp_err_t {
    let mut done: *mut spi_slave_transaction_t = ptr::null_mut();
    // SAFETY: the driver only writes the out-pointer.
    unsafe { spi_slave_get_trans_result(HOST, &mut done, ticks) }
}

// ── Host token ────────────────────────────────────────────────

pub struct EspSpiHost {
    _private: (),
}

impl EspSpiHost {
    /// Initialise SPI2 as a slave.  Fails if called twice.
    pub fn take(config: &EndpointConfig) -> Result<Self, Error> {
        if HOST_TAKEN.swap(true, Ordering::AcqRel) {
            return Err(Error::Init("SPI2 host already taken"));
        }

        let bus = spi_bus_config_t {
            __bindgen_anon_1: spi_bus_config_t__bindgen_ty_1 {
                mosi_io_num: pins::SPI_MOSI_GPIO,
            },
            __bindgen_anon_2: spi_bus_config_t__bindgen_ty_2 {
                miso_io_num: pins::SPI_MISO_GPIO,
            },
            sclk_io_num: pins::SPI_SCLK_GPIO,
            __bindgen_anon_3: spi_bus_config_t__bindgen_ty_3 { quadwp_io_num: -1 },
            __bindgen_anon_4: spi_bus_config_t__bindgen_ty_4 { quadhd_io_num: -1 },
            max_transfer_sz: FRAME_CAPACITY as i32,
            ..Default::default()
        };

        let slave = spi_slave_interface_config_t {
            spics_io_num: pins::SPI_CS_GPIO,
            flags: 0,
            queue_size: pins::SPI_QUEUE_SIZE,
            mode: config.spi_mode,
            post_setup_cb: None,
            post_trans_cb: Some(post_trans),
            ..Default::default()
        };

        // SAFETY: both config structs outlive the call; the driver copies them.
        let ret = unsafe { spi_slave_initialize(HOST, &bus, &slave, pins::SPI_DMA_CHAN_AUTO) };
        if ret != ESP_OK as i32 {
            HOST_TAKEN.store(false, Ordering::Release);
            return Err(Error::Init("spi_slave_initialize failed"));
        }

        info!(
            "spi: SPI2 slave ready (mode {}, CS=GPIO{})",
            config.spi_mode,
            pins::SPI_CS_GPIO
        );
        Ok(Self { _private: () })
    }

    /// Completion / fault reporting through the ISR and `producer`.
    pub fn into_duplex(self, producer: EventProducer<'static>) -> EspDuplex {
        // SAFETY: the token is unique and no transaction has been queued
        // yet, so the ISR cannot be reading the slot.
        unsafe {
            *ISR_PRODUCER.0.get() = Some(producer);
        }
        EspDuplex {
            buffers: DmaBuffers::new(),
        }
    }

    /// Reader for the slave's own CS pad.  Use this as the polled select
    /// input: a `PinDriver` on the same GPIO resets the pad to plain GPIO
    /// function and the peripheral stops seeing CS.
    pub fn select_line(&self) -> SelectLine {
        SelectLine { _private: () }
    }

    /// Blocking transfers gated on the select line.
    pub fn into_polled<P: InputPin>(self, select: P) -> EspPolled<P> {
        EspPolled {
            buffers: DmaBuffers::new(),
            select,
            in_flight: false,
        }
    }
}

// ── Select line ───────────────────────────────────────────────

/// Level of the CS pad, read without touching its IO-MUX routing.
pub struct SelectLine {
    _private: (),
}

impl ErrorType for SelectLine {
    type Error = Infallible;
}

impl InputPin for SelectLine {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        // SAFETY: reads the input register only; the pad stays owned by SPI2.
        Ok(unsafe { gpio_get_level(pins::SPI_CS_GPIO) } != 0)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

// ── Event-driven transport ────────────────────────────────────

pub struct EspDuplex {
    buffers: DmaBuffers,
}

impl DuplexTransport for EspDuplex {
    fn arm(&mut self, outbound: &Frame) -> Result<(), TransportFault> {
        // The previous descriptor's result is still in the driver's queue.
        let ret = collect_result(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_TIMEOUT as i32 {
            warn!("spi: get_trans_result rc={}", ret);
        }

        let trans = self.buffers.stage(outbound);
        // SAFETY: the descriptor and both buffers are boxed and owned by
        // self, so they stay put until the next arm replaces them.
        let ret = unsafe { spi_slave_queue_trans(HOST, trans, 0) };
        if ret == ESP_OK as i32 {
            Ok(())
        } else {
            Err(TransportFault::Busy)
        }
    }
}

// ── Polled transport ──────────────────────────────────────────

pub struct EspPolled<P> {
    buffers: DmaBuffers,
    select: P,
    /// A timed-out descriptor is still queued; wait for it instead of
    /// queueing another.
    in_flight: bool,
}

impl<P: InputPin> PolledTransport for EspPolled<P> {
    fn exchange_requested(&mut self) -> bool {
        self.select.is_low().unwrap_or(false)
    }

    fn transfer(
        &mut self,
        outbound: &Frame,
        inbound: &mut Frame,
        timeout_ms: u32,
    ) -> Result<(), TransportFault> {
        if !self.in_flight {
            let trans = self.buffers.stage(outbound);
            // SAFETY: as for `EspDuplex::arm`.
            let ret = unsafe { spi_slave_queue_trans(HOST, trans, 0) };
            if ret != ESP_OK as i32 {
                return Err(TransportFault::Busy);
            }
            self.in_flight = true;
        }

        let ret = collect_result(ms_to_ticks(timeout_ms));
        if ret == ESP_ERR_TIMEOUT as i32 {
            return Err(TransportFault::Timeout);
        }
        self.in_flight = false;
        if ret != ESP_OK as i32 {
            warn!("spi: get_trans_result rc={}", ret);
            return Err(TransportFault::ModeFault);
        }
        if self.buffers.trans.trans_len < FRAME_BITS {
            return Err(TransportFault::Framing);
        }
        inbound.as_mut_bytes().copy_from_slice(&self.buffers.rx.0);
        Ok(())
    }
}
