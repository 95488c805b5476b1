//! A platform-agnostic driver for the DS3231 real-time clock.
//!
//! The driver speaks [`embedded_hal::i2c::I2c`] (or the `embedded-hal-async`
//! equivalent with the `async` feature) and covers:
//!
//! - reading and setting the time and calendar registers, with the packed-BCD
//!   codec and per-field range validation handled here
//! - type-safe configuration of both alarms, including the match-mask bits
//!   and the shared day-of-week/date-of-month register slot
//! - control register configuration and status flag handling
//! - recovery of an I2C bus whose SDA line is stuck low
//!   (see the [`recovery`] module)
//!
//! The driver holds no state besides the bus handle; every operation reads or
//! writes the chip directly. Validation happens before any bus traffic, so a
//! rejected value never reaches the chip.
//!
//! ```ignore
//! use ds3231_rtc::{DS3231, Time};
//!
//! let mut rtc = DS3231::new(i2c);
//! rtc.set_time(&Time { hours: 13, minutes: 37, seconds: 0 })?;
//! let now = rtc.time()?;
//! ```

#![no_std]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod alarm;
pub mod recovery;
pub mod registers;

#[cfg(feature = "async")]
pub mod asynch;

use embedded_hal::i2c::I2c;

use crate::alarm::{Alarm1Config, Alarm2Config, AlarmError, DS3231Alarm1, DS3231Alarm2};
use crate::registers::{
    AlarmDayDate, AlarmHours, AlarmMinutes, AlarmSeconds, Control, Date, Day, Hours,
    InterruptControl, Minutes, Month, Oscillator, RegAddr, Seconds, SquareWaveFrequency, Status,
    Year, DEVICE_ADDRESS,
};

/// A time or calendar field, used to name which value failed validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// Seconds (0-59)
    Seconds,
    /// Minutes (0-59)
    Minutes,
    /// Hours (0-23)
    Hours,
    /// Day of week (1-7)
    DayOfWeek,
    /// Date of month (1-31)
    DayOfMonth,
    /// Month (1-12)
    Month,
    /// Year (0-99)
    Year,
}

/// Error type for DS3231 operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DS3231Error<I2CE> {
    /// The underlying I2C transfer failed. The transport's own error value is
    /// passed through untouched, so timeout/bus-fault discrimination stays
    /// with the HAL.
    I2c(I2CE),
    /// A time or calendar value is outside its representable range
    OutOfRange(Field),
    /// Alarm resolution failed
    Alarm(AlarmError),
}

impl<I2CE> From<I2CE> for DS3231Error<I2CE> {
    fn from(e: I2CE) -> Self {
        DS3231Error::I2c(e)
    }
}

/// Wall-clock time of day, 24-hour form.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Time {
    /// Hours (0-23)
    pub hours: u8,
    /// Minutes (0-59)
    pub minutes: u8,
    /// Seconds (0-59)
    pub seconds: u8,
}

/// Calendar date. Only the representable envelope is checked on write; the
/// driver does not know about month lengths or leap years.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calendar {
    /// Date of month (1-31)
    pub day_of_month: u8,
    /// Month (1-12)
    pub month: u8,
    /// Year within the century (0-99)
    pub year: u8,
}

/// Control register configuration.
///
/// [`DS3231::configure`] composes the full control byte from this and writes
/// it in one transfer; it never reads the register first.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Whether the oscillator keeps running on battery power
    pub oscillator_enable: Oscillator,
    /// Function of the INT/SQW pin
    pub interrupt_control: InterruptControl,
    /// Square wave output while on battery power
    pub battery_backed_square_wave: bool,
    /// Square wave output frequency
    pub square_wave_frequency: SquareWaveFrequency,
    /// Route alarm 1 matches to the INT/SQW pin
    pub alarm1_interrupt_enable: bool,
    /// Route alarm 2 matches to the INT/SQW pin
    pub alarm2_interrupt_enable: bool,
}

/// Selects one of the chip's two alarms.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alarm {
    /// Alarm 1 (seconds precision)
    One,
    /// Alarm 2 (minute precision)
    Two,
}

// Generates a set_<name>/<name> register accessor pair.
macro_rules! set_and_get_register {
    ($(($name:ident, $regaddr:expr, $typ:ty)),+) => {
        $(
            paste::paste!{
                /// Writes this register directly.
                pub fn [< set_ $name >](&mut self, value: $typ) -> Result<(), DS3231Error<I2C::Error>> {
                    self.i2c.write(
                        self.address,
                        &[$regaddr as u8, value.into()],
                        )?;
                    Ok(())
                }
            }

            /// Reads this register directly.
            pub fn $name(&mut self) -> Result<$typ, DS3231Error<I2C::Error>> {
                let mut data = [0];
                self.i2c
                    .write_read(self.address, &[$regaddr as u8], &mut data)?;
                Ok(paste::paste!([<$typ>])(data[0]))
            }
        )+
    }
}

/// Synchronous DS3231 driver.
pub struct DS3231<I2C: I2c> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> DS3231<I2C> {
    /// Creates a new driver over the given bus. The DS3231's address is fixed
    /// in hardware, so there is nothing else to choose.
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: DEVICE_ADDRESS,
        }
    }

    /// Releases the bus handle.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Writes the control register from `config`.
    ///
    /// The byte is composed locally and written whole; unspecified control
    /// bits end up zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the I2C write fails.
    pub fn configure(&mut self, config: &Config) -> Result<(), DS3231Error<I2C::Error>> {
        let mut control = Control::default();
        control.set_oscillator_enable(config.oscillator_enable);
        control.set_battery_backed_square_wave(config.battery_backed_square_wave);
        control.set_square_wave_frequency(config.square_wave_frequency);
        control.set_interrupt_control(config.interrupt_control);
        control.set_alarm1_interrupt_enable(config.alarm1_interrupt_enable);
        control.set_alarm2_interrupt_enable(config.alarm2_interrupt_enable);
        debug!("writing control register {}", u8::from(control));
        self.set_control(control)
    }

    /// Sets the time registers.
    ///
    /// Fields are validated and written one register at a time in order
    /// seconds, minutes, hours. The first out-of-range field stops the
    /// sequence; registers already written stay written.
    ///
    /// # Errors
    ///
    /// Returns [`DS3231Error::OutOfRange`] naming the offending field, or an
    /// I2C error from a failed write.
    pub fn set_time(&mut self, time: &Time) -> Result<(), DS3231Error<I2C::Error>> {
        let seconds = Seconds::from_value(time.seconds)
            .ok_or(DS3231Error::OutOfRange(Field::Seconds))?;
        self.set_second(seconds)?;
        let minutes = Minutes::from_value(time.minutes)
            .ok_or(DS3231Error::OutOfRange(Field::Minutes))?;
        self.set_minute(minutes)?;
        let hours = Hours::from_value(time.hours).ok_or(DS3231Error::OutOfRange(Field::Hours))?;
        self.set_hour(hours)?;
        Ok(())
    }

    /// Reads the time registers.
    ///
    /// # Errors
    ///
    /// Returns an error if an I2C read fails.
    pub fn time(&mut self) -> Result<Time, DS3231Error<I2C::Error>> {
        let seconds = self.second()?.value();
        let minutes = self.minute()?.value();
        let hours = self.hour()?.value();
        Ok(Time {
            hours,
            minutes,
            seconds,
        })
    }

    /// Sets the calendar registers.
    ///
    /// Same write discipline as [`set_time`](Self::set_time): date, month,
    /// year, validated and written one register at a time.
    ///
    /// # Errors
    ///
    /// Returns [`DS3231Error::OutOfRange`] naming the offending field, or an
    /// I2C error from a failed write.
    pub fn set_calendar(&mut self, calendar: &Calendar) -> Result<(), DS3231Error<I2C::Error>> {
        let date = Date::from_value(calendar.day_of_month)
            .ok_or(DS3231Error::OutOfRange(Field::DayOfMonth))?;
        self.set_date(date)?;
        let month =
            Month::from_value(calendar.month).ok_or(DS3231Error::OutOfRange(Field::Month))?;
        self.set_month(month)?;
        let year = Year::from_value(calendar.year).ok_or(DS3231Error::OutOfRange(Field::Year))?;
        self.set_year(year)?;
        Ok(())
    }

    /// Reads the calendar registers.
    ///
    /// # Errors
    ///
    /// Returns an error if an I2C read fails.
    pub fn calendar(&mut self) -> Result<Calendar, DS3231Error<I2C::Error>> {
        let day_of_month = self.date()?.value();
        let month = self.month()?.value();
        let year = self.year()?.value();
        Ok(Calendar {
            day_of_month,
            month,
            year,
        })
    }

    /// Programs alarm 1 from a typed configuration.
    ///
    /// The configuration is resolved to register values before any bus
    /// traffic, then the four alarm registers are written in order seconds,
    /// minutes, hours, day/date.
    ///
    /// # Errors
    ///
    /// Returns [`DS3231Error::Alarm`] when resolution fails (nothing is
    /// written), or an I2C error from a failed write.
    pub fn set_alarm1(&mut self, config: &Alarm1Config) -> Result<(), DS3231Error<I2C::Error>> {
        let alarm = DS3231Alarm1::from_config(config).map_err(DS3231Error::Alarm)?;
        self.write_alarm1(&alarm)
    }

    /// Programs alarm 1 from field-wise settings, `None` meaning "always
    /// matches". See [`DS3231Alarm1::from_fields`] for the resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`DS3231Error::Alarm`] when resolution fails (nothing is
    /// written), or an I2C error from a failed write.
    pub fn set_alarm1_fields(
        &mut self,
        seconds: Option<u8>,
        minutes: Option<u8>,
        hours: Option<u8>,
        day_of_week: Option<u8>,
        day_of_month: Option<u8>,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let alarm = DS3231Alarm1::from_fields(seconds, minutes, hours, day_of_week, day_of_month)
            .map_err(DS3231Error::Alarm)?;
        self.write_alarm1(&alarm)
    }

    fn write_alarm1(&mut self, alarm: &DS3231Alarm1) -> Result<(), DS3231Error<I2C::Error>> {
        self.set_alarm1_seconds(alarm.seconds())?;
        self.set_alarm1_minutes(alarm.minutes())?;
        self.set_alarm1_hours(alarm.hours())?;
        self.set_alarm1_day_date(alarm.day_date())?;
        Ok(())
    }

    /// Programs alarm 2 from a typed configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DS3231Error::Alarm`] when resolution fails (nothing is
    /// written), or an I2C error from a failed write.
    pub fn set_alarm2(&mut self, config: &Alarm2Config) -> Result<(), DS3231Error<I2C::Error>> {
        let alarm = DS3231Alarm2::from_config(config).map_err(DS3231Error::Alarm)?;
        self.write_alarm2(&alarm)
    }

    /// Programs alarm 2 from field-wise settings, `None` meaning "always
    /// matches". See [`DS3231Alarm2::from_fields`] for the resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`DS3231Error::Alarm`] when resolution fails (nothing is
    /// written), or an I2C error from a failed write.
    pub fn set_alarm2_fields(
        &mut self,
        minutes: Option<u8>,
        hours: Option<u8>,
        day_of_week: Option<u8>,
        day_of_month: Option<u8>,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let alarm = DS3231Alarm2::from_fields(minutes, hours, day_of_week, day_of_month)
            .map_err(DS3231Error::Alarm)?;
        self.write_alarm2(&alarm)
    }

    fn write_alarm2(&mut self, alarm: &DS3231Alarm2) -> Result<(), DS3231Error<I2C::Error>> {
        self.set_alarm2_minutes(alarm.minutes())?;
        self.set_alarm2_hours(alarm.hours())?;
        self.set_alarm2_day_date(alarm.day_date())?;
        Ok(())
    }

    /// Reads an alarm's fired flag without clearing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the I2C read fails.
    pub fn alarm_fired(&mut self, alarm: Alarm) -> Result<bool, DS3231Error<I2C::Error>> {
        let status = self.status()?;
        Ok(match alarm {
            Alarm::One => status.alarm1_flag(),
            Alarm::Two => status.alarm2_flag(),
        })
    }

    /// Clears an alarm's fired flag, leaving every other status bit as read.
    ///
    /// # Errors
    ///
    /// Returns an error if the I2C read or write fails.
    pub fn clear_alarm_flag(&mut self, alarm: Alarm) -> Result<(), DS3231Error<I2C::Error>> {
        let mut status = self.status()?;
        match alarm {
            Alarm::One => status.set_alarm1_flag(false),
            Alarm::Two => status.set_alarm2_flag(false),
        }
        self.set_status(status)
    }

    /// Reads and clears an alarm's fired flag in one call. The status write
    /// is skipped when the flag was not set.
    ///
    /// # Errors
    ///
    /// Returns an error if the I2C read or write fails.
    pub fn take_alarm_flag(&mut self, alarm: Alarm) -> Result<bool, DS3231Error<I2C::Error>> {
        let mut status = self.status()?;
        let fired = match alarm {
            Alarm::One => status.alarm1_flag(),
            Alarm::Two => status.alarm2_flag(),
        };
        if fired {
            match alarm {
                Alarm::One => status.set_alarm1_flag(false),
                Alarm::Two => status.set_alarm2_flag(false),
            }
            self.set_status(status)?;
        }
        Ok(fired)
    }

    set_and_get_register!(
        (second, RegAddr::Seconds, Seconds),
        (minute, RegAddr::Minutes, Minutes),
        (hour, RegAddr::Hours, Hours),
        (day_of_week, RegAddr::Day, Day),
        (date, RegAddr::Date, Date),
        (month, RegAddr::Month, Month),
        (year, RegAddr::Year, Year),
        (alarm1_seconds, RegAddr::Alarm1Seconds, AlarmSeconds),
        (alarm1_minutes, RegAddr::Alarm1Minutes, AlarmMinutes),
        (alarm1_hours, RegAddr::Alarm1Hours, AlarmHours),
        (alarm1_day_date, RegAddr::Alarm1DayDate, AlarmDayDate),
        (alarm2_minutes, RegAddr::Alarm2Minutes, AlarmMinutes),
        (alarm2_hours, RegAddr::Alarm2Hours, AlarmHours),
        (alarm2_day_date, RegAddr::Alarm2DayDate, AlarmDayDate),
        (control, RegAddr::Control, Control),
        (status, RegAddr::ControlStatus, Status)
    );
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    use alloc::vec;

    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use super::*;

    #[test]
    fn test_set_time_writes_registers_in_order() {
        let expectations = [
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x00, 0x56]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x01, 0x34]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x02, 0x12]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        rtc.set_time(&Time {
            hours: 12,
            minutes: 34,
            seconds: 56,
        })
        .unwrap();

        i2c.done();
    }

    #[test]
    fn test_set_time_rejects_out_of_range_seconds_without_writing() {
        let mut i2c = I2cMock::new(&[]);
        let mut rtc = DS3231::new(i2c.clone());

        let result = rtc.set_time(&Time {
            hours: 0,
            minutes: 0,
            seconds: 60,
        });
        assert_eq!(result, Err(DS3231Error::OutOfRange(Field::Seconds)));

        i2c.done();
    }

    #[test]
    fn test_set_time_stops_at_first_invalid_field() {
        // Seconds are valid and get written; minutes fail validation and
        // nothing further reaches the bus
        let expectations = [I2cTransaction::write(DEVICE_ADDRESS, vec![0x00, 0x30])];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        let result = rtc.set_time(&Time {
            hours: 0,
            minutes: 60,
            seconds: 30,
        });
        assert_eq!(result, Err(DS3231Error::OutOfRange(Field::Minutes)));

        i2c.done();
    }

    #[test]
    fn test_set_time_transport_error_short_circuits() {
        let expectations = [
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x00, 0x00]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x01, 0x30]).with_error(ErrorKind::Other),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        let result = rtc.set_time(&Time {
            hours: 12,
            minutes: 30,
            seconds: 0,
        });
        assert!(matches!(result, Err(DS3231Error::I2c(_))));

        i2c.done();
    }

    #[test]
    fn test_time_reads_registers() {
        let expectations = [
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x00], vec![0x56]),
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x01], vec![0x34]),
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x02], vec![0x12]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        let time = rtc.time().unwrap();
        assert_eq!(
            time,
            Time {
                hours: 12,
                minutes: 34,
                seconds: 56,
            }
        );

        i2c.done();
    }

    #[test]
    fn test_set_calendar_writes_registers_in_order() {
        let expectations = [
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x04, 0x31]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x05, 0x12]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x06, 0x99]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        rtc.set_calendar(&Calendar {
            day_of_month: 31,
            month: 12,
            year: 99,
        })
        .unwrap();

        i2c.done();
    }

    #[test]
    fn test_set_calendar_rejects_invalid_month() {
        // Date is written first, then the month check fails
        let expectations = [I2cTransaction::write(DEVICE_ADDRESS, vec![0x04, 0x01])];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        let result = rtc.set_calendar(&Calendar {
            day_of_month: 1,
            month: 13,
            year: 0,
        });
        assert_eq!(result, Err(DS3231Error::OutOfRange(Field::Month)));

        i2c.done();
    }

    #[test]
    fn test_calendar_reads_registers() {
        let expectations = [
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x04], vec![0x15]),
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x05], vec![0x08]),
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x06], vec![0x99]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        let calendar = rtc.calendar().unwrap();
        assert_eq!(
            calendar,
            Calendar {
                day_of_month: 15,
                month: 8,
                year: 99,
            }
        );

        i2c.done();
    }

    #[test]
    fn test_set_alarm1_every_second() {
        let expectations = [
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x07, 0x80]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x08, 0x80]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x09, 0x80]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x0A, 0x80]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        rtc.set_alarm1(&Alarm1Config::EverySecond).unwrap();

        i2c.done();
    }

    #[test]
    fn test_set_alarm1_at_time_on_date() {
        let expectations = [
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x07, 0x00]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x08, 0x30]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x09, 0x07]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x0A, 0x15]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        rtc.set_alarm1(&Alarm1Config::AtTimeOnDate {
            hours: 7,
            minutes: 30,
            seconds: 0,
            date: 15,
        })
        .unwrap();

        i2c.done();
    }

    #[test]
    fn test_set_alarm1_at_time_on_day_sets_discriminator() {
        let expectations = [
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x07, 0x00]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x08, 0x00]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x09, 0x09]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x0A, 0x43]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        rtc.set_alarm1(&Alarm1Config::AtTimeOnDay {
            hours: 9,
            minutes: 0,
            seconds: 0,
            day: 3,
        })
        .unwrap();

        i2c.done();
    }

    #[test]
    fn test_set_alarm1_fields_ambiguous_day_no_writes() {
        let mut i2c = I2cMock::new(&[]);
        let mut rtc = DS3231::new(i2c.clone());

        let result = rtc.set_alarm1_fields(Some(0), Some(0), Some(9), Some(2), Some(15));
        assert_eq!(
            result,
            Err(DS3231Error::Alarm(AlarmError::AmbiguousDaySpecifier))
        );

        i2c.done();
    }

    #[test]
    fn test_set_alarm2_every_minute() {
        let expectations = [
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x0B, 0x80]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x0C, 0x80]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x0D, 0x80]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        rtc.set_alarm2(&Alarm2Config::EveryMinute).unwrap();

        i2c.done();
    }

    #[test]
    fn test_set_alarm2_fields_out_of_range_no_writes() {
        let mut i2c = I2cMock::new(&[]);
        let mut rtc = DS3231::new(i2c.clone());

        let result = rtc.set_alarm2_fields(Some(60), None, None, None);
        assert_eq!(
            result,
            Err(DS3231Error::Alarm(AlarmError::OutOfRange(Field::Minutes)))
        );

        i2c.done();
    }

    #[test]
    fn test_configure_composes_control_byte() {
        // Hz4096 (bits 4:3 = 10), interrupt mode (bit 2), both alarm
        // interrupts enabled (bits 1:0)
        let expectations = [I2cTransaction::write(DEVICE_ADDRESS, vec![0x0E, 0x17])];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        rtc.configure(&Config {
            oscillator_enable: Oscillator::Enabled,
            interrupt_control: InterruptControl::Interrupt,
            battery_backed_square_wave: false,
            square_wave_frequency: SquareWaveFrequency::Hz4096,
            alarm1_interrupt_enable: true,
            alarm2_interrupt_enable: true,
        })
        .unwrap();

        i2c.done();
    }

    #[test]
    fn test_alarm_fired_reads_without_writing() {
        let expectations = [
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x0F], vec![0x02]),
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x0F], vec![0x02]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        assert!(!rtc.alarm_fired(Alarm::One).unwrap());
        assert!(rtc.alarm_fired(Alarm::Two).unwrap());

        i2c.done();
    }

    #[test]
    fn test_take_alarm_flag_clears_only_its_bit() {
        // Both flags set; taking alarm 1 writes back with only bit 0 cleared
        let expectations = [
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x0F], vec![0b0000_0011]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x0F, 0b0000_0010]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        assert!(rtc.take_alarm_flag(Alarm::One).unwrap());

        i2c.done();
    }

    #[test]
    fn test_take_alarm_flag_preserves_other_status_bits() {
        // OSF and EN32kHz stay untouched by the read-modify-write
        let expectations = [
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x0F], vec![0b1000_1001]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x0F, 0b1000_1000]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        assert!(rtc.take_alarm_flag(Alarm::One).unwrap());

        i2c.done();
    }

    #[test]
    fn test_take_alarm_flag_skips_write_when_clear() {
        let expectations = [I2cTransaction::write_read(
            DEVICE_ADDRESS,
            vec![0x0F],
            vec![0x00],
        )];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        assert!(!rtc.take_alarm_flag(Alarm::One).unwrap());

        i2c.done();
    }

    #[test]
    fn test_clear_alarm_flag() {
        let expectations = [
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x0F], vec![0b0000_0011]),
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x0F, 0b0000_0001]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        rtc.clear_alarm_flag(Alarm::Two).unwrap();

        i2c.done();
    }

    #[test]
    fn test_raw_register_accessors() {
        let expectations = [
            I2cTransaction::write(DEVICE_ADDRESS, vec![0x06, 0x99]),
            I2cTransaction::write_read(DEVICE_ADDRESS, vec![0x06], vec![0x99]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut rtc = DS3231::new(i2c.clone());

        rtc.set_year(Year::from_value(99).unwrap()).unwrap();
        assert_eq!(rtc.year().unwrap().value(), 99);

        i2c.done();
    }
}
