//! I2C bus recovery for a stuck SDA line.
//!
//! A device that was mid-transfer when the controller reset can hold SDA low
//! forever, waiting for clocks that never come. The standard remedy is to
//! bit-bang SCL until the device finishes shifting out its byte and releases
//! the data line. [`recover`] implements that procedure with a hard bound so
//! a dead bus (shorted SDA, missing pull-up) cannot hang the caller.
//!
//! The pins must already be configured by the caller: SDA as an input (ideally
//! open-drain with a pull-up) and SCL as an output driven high. How that is
//! done is platform-specific and outside this crate. After recovery the pins
//! can be handed back to the I2C peripheral.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as PinError, ErrorKind, InputPin, OutputPin};

/// Half period of the recovery clock in microseconds. A full SCL pulse takes
/// twice this, giving a 500 Hz clock, slow enough for any I2C device.
pub const CLOCK_HALF_PERIOD_US: u32 = 1_000;

/// Error type for bus recovery.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecoveryError {
    /// SDA never rose before the deadline expired
    Timeout,
    /// A GPIO operation failed
    Pin(ErrorKind),
}

/// Time bound for the recovery loop.
///
/// The loop asks `expired()` before each SCL pulse and gives up when it
/// returns `true`. Any `FnMut() -> bool` works, so the bound can come from a
/// tick counter, a monotonic clock, or a fixed pulse budget:
///
/// ```ignore
/// let mut pulses = 0u32;
/// let mut deadline = || {
///     pulses += 1;
///     pulses > 16
/// };
/// recover(&mut sda, &mut scl, &mut delay, &mut deadline)?;
/// ```
pub trait Deadline {
    /// Returns `true` once the time budget is used up.
    fn expired(&mut self) -> bool;
}

impl<F: FnMut() -> bool> Deadline for F {
    fn expired(&mut self) -> bool {
        self()
    }
}

/// Clocks SCL until the device holding SDA low releases it.
///
/// Returns immediately without touching SCL when SDA already reads high.
/// Otherwise SCL is pulsed low/high at [`CLOCK_HALF_PERIOD_US`] intervals,
/// checking SDA after each full pulse. When `deadline` expires first, SCL is
/// driven back to its idle-high state and [`RecoveryError::Timeout`] is
/// returned.
///
/// Safe to call on a healthy bus; it is a no-op then.
///
/// # Errors
///
/// [`RecoveryError::Timeout`] when the deadline expires with SDA still low,
/// [`RecoveryError::Pin`] when reading SDA or driving SCL fails.
pub fn recover<SDA, SCL, D, T>(
    sda: &mut SDA,
    scl: &mut SCL,
    delay: &mut D,
    deadline: &mut T,
) -> Result<(), RecoveryError>
where
    SDA: InputPin,
    SCL: OutputPin,
    D: DelayNs,
    T: Deadline,
{
    if sda.is_high().map_err(|e| RecoveryError::Pin(e.kind()))? {
        return Ok(());
    }
    warning!("SDA held low, clocking SCL to release it");

    loop {
        if deadline.expired() {
            // Leave the bus in its idle state even on failure
            scl.set_high().map_err(|e| RecoveryError::Pin(e.kind()))?;
            return Err(RecoveryError::Timeout);
        }

        scl.set_low().map_err(|e| RecoveryError::Pin(e.kind()))?;
        delay.delay_us(CLOCK_HALF_PERIOD_US);
        scl.set_high().map_err(|e| RecoveryError::Pin(e.kind()))?;
        delay.delay_us(CLOCK_HALF_PERIOD_US);

        if sda.is_high().map_err(|e| RecoveryError::Pin(e.kind()))? {
            debug!("SDA released");
            return Ok(());
        }
    }
}
