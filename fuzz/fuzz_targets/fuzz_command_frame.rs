//! Fuzz target: inbound command frames
//!
//! Feeds arbitrary bytes through the link context as one or more 32-byte
//! inbound frames and asserts that it never panics, always stages a reply
//! from the closed response set, and leaves channel state alone on `ERR`.
//!
//! cargo fuzz run fuzz_command_frame

#![no_main]

use libfuzzer_sys::fuzz_target;
use spi_led_endpoint::app::ports::ActuatorDriver;
use spi_led_endpoint::fsm::context::LinkContext;
use spi_led_endpoint::wire::{FRAME_CAPACITY, Frame};

struct Pins([bool; 4]);

impl ActuatorDriver for Pins {
    fn set_pin(&mut self, index: usize, on: bool) {
        self.0[index] = on;
    }
}

fuzz_target!(|data: &[u8]| {
    let mut ctx = LinkContext::new(Pins([false; 4]));
    ctx.prime();

    // Short tails are padded with NUL, the same as a partially-filled buffer.
    for chunk in data.chunks(FRAME_CAPACITY) {
        let before = ctx.bank().snapshot();
        ctx.process_inbound(&Frame::from_bytes(chunk));

        let reply = ctx.outbound().payload();
        let well_formed = match reply {
            b"OK\n" | b"ERR\n" => true,
            [b'S', b'T', b'A', b':', bits @ .., b'\n'] => {
                bits.len() == 4 && bits.iter().all(|b| matches!(b, b'0' | b'1'))
            }
            _ => false,
        };
        assert!(well_formed, "reply outside the response set");
        if reply == b"ERR\n" {
            assert_eq!(ctx.bank().snapshot(), before, "ERR must not change state");
        }
        assert_eq!(ctx.bank().driver().0, ctx.bank().snapshot());
    }
});
