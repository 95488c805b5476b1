//! Async implementation of the DS3231 driver.
//!
//! This module provides an async interface to the DS3231 RTC device using
//! `embedded-hal-async` traits. It is only available when the `async` feature
//! is enabled. The API mirrors the blocking driver in the crate root.
//!
//! # Example
//!
//! ```rust,ignore
//! use ds3231_rtc::asynch::DS3231;
//!
//! let mut rtc = DS3231::new(i2c);
//!
//! rtc.configure(&config).await?;
//! let time = rtc.time().await?;
//! ```

use embedded_hal_async::i2c::I2c;
use paste::paste;

use crate::alarm::{Alarm1Config, Alarm2Config, DS3231Alarm1, DS3231Alarm2};
use crate::registers::{
    AlarmDayDate, AlarmHours, AlarmMinutes, AlarmSeconds, Control, Date, Day, Hours, Minutes,
    Month, RegAddr, Seconds, Status, Year, DEVICE_ADDRESS,
};
use crate::{Alarm, Calendar, Config, DS3231Error, Field, Time};

/// DS3231 Real-Time Clock async driver.
///
/// This struct provides the async interface to the DS3231 RTC device.
/// It supports async I2C operations through the `embedded-hal-async` traits.
pub struct DS3231<I2C: I2c> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> DS3231<I2C> {
    /// Creates a new DS3231 async driver instance over the given bus.
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

    /// Writes the control register from `config`. The byte is composed
    /// locally and written whole; unspecified control bits end up zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the I2C write fails.
    pub async fn configure(&mut self, config: &Config) -> Result<(), DS3231Error<I2C::Error>> {
        let mut control = Control::default();
        control.set_oscillator_enable(config.oscillator_enable);
        control.set_battery_backed_square_wave(config.battery_backed_square_wave);
        control.set_square_wave_frequency(config.square_wave_frequency);
        control.set_interrupt_control(config.interrupt_control);
        control.set_alarm1_interrupt_enable(config.alarm1_interrupt_enable);
        control.set_alarm2_interrupt_enable(config.alarm2_interrupt_enable);
        debug!("writing control register {}", u8::from(control));
        self.set_control(control).await
    }

    /// Sets the time registers, validating and writing one register at a
    /// time in order seconds, minutes, hours. The first out-of-range field
    /// stops the sequence; registers already written stay written.
    ///
    /// # Errors
    ///
    /// Returns [`DS3231Error::OutOfRange`] naming the offending field, or an
    /// I2C error from a failed write.
    pub async fn set_time(&mut self, time: &Time) -> Result<(), DS3231Error<I2C::Error>> {
        let seconds = Seconds::from_value(time.seconds)
            .ok_or(DS3231Error::OutOfRange(Field::Seconds))?;
        self.set_second(seconds).await?;
        let minutes = Minutes::from_value(time.minutes)
            .ok_or(DS3231Error::OutOfRange(Field::Minutes))?;
        self.set_minute(minutes).await?;
        let hours = Hours::from_value(time.hours).ok_or(DS3231Error::OutOfRange(Field::Hours))?;
        self.set_hour(hours).await?;
        Ok(())
    }

    /// Reads the time registers.
    ///
    /// # Errors
    ///
    /// Returns an error if an I2C read fails.
    pub async fn time(&mut self) -> Result<Time, DS3231Error<I2C::Error>> {
        let seconds = self.second().await?.value();
        let minutes = self.minute().await?.value();
        let hours = self.hour().await?.value();
        Ok(Time {
            hours,
            minutes,
            seconds,
        })
    }

    /// Sets the calendar registers: date, month, year, validated and written
    /// one register at a time.
    ///
    /// # Errors
    ///
    /// Returns [`DS3231Error::OutOfRange`] naming the offending field, or an
    /// I2C error from a failed write.
    pub async fn set_calendar(
        &mut self,
        calendar: &Calendar,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let date = Date::from_value(calendar.day_of_month)
            .ok_or(DS3231Error::OutOfRange(Field::DayOfMonth))?;
        self.set_date(date).await?;
        let month =
            Month::from_value(calendar.month).ok_or(DS3231Error::OutOfRange(Field::Month))?;
        self.set_month(month).await?;
        let year = Year::from_value(calendar.year).ok_or(DS3231Error::OutOfRange(Field::Year))?;
        self.set_year(year).await?;
        Ok(())
    }

    /// Reads the calendar registers.
    ///
    /// # Errors
    ///
    /// Returns an error if an I2C read fails.
    pub async fn calendar(&mut self) -> Result<Calendar, DS3231Error<I2C::Error>> {
        let day_of_month = self.date().await?.value();
        let month = self.month().await?.value();
        let year = self.year().await?.value();
        Ok(Calendar {
            day_of_month,
            month,
            year,
        })
    }

    /// Programs alarm 1 from a typed configuration. Resolution happens
    /// before any bus traffic.
    ///
    /// # Errors
    ///
    /// Returns [`DS3231Error::Alarm`] when resolution fails (nothing is
    /// written), or an I2C error from a failed write.
    pub async fn set_alarm1(
        &mut self,
        config: &Alarm1Config,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let alarm = DS3231Alarm1::from_config(config).map_err(DS3231Error::Alarm)?;
        self.write_alarm1(&alarm).await
    }

    /// Programs alarm 1 from field-wise settings, `None` meaning "always
    /// matches". See [`DS3231Alarm1::from_fields`] for the resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`DS3231Error::Alarm`] when resolution fails (nothing is
    /// written), or an I2C error from a failed write.
    pub async fn set_alarm1_fields(
        &mut self,
        seconds: Option<u8>,
        minutes: Option<u8>,
        hours: Option<u8>,
        day_of_week: Option<u8>,
        day_of_month: Option<u8>,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let alarm = DS3231Alarm1::from_fields(seconds, minutes, hours, day_of_week, day_of_month)
            .map_err(DS3231Error::Alarm)?;
        self.write_alarm1(&alarm).await
    }

    async fn write_alarm1(&mut self, alarm: &DS3231Alarm1) -> Result<(), DS3231Error<I2C::Error>> {
        self.set_alarm1_seconds(alarm.seconds()).await?;
        self.set_alarm1_minutes(alarm.minutes()).await?;
        self.set_alarm1_hours(alarm.hours()).await?;
        self.set_alarm1_day_date(alarm.day_date()).await?;
        Ok(())
    }

    /// Programs alarm 2 from a typed configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DS3231Error::Alarm`] when resolution fails (nothing is
    /// written), or an I2C error from a failed write.
    pub async fn set_alarm2(
        &mut self,
        config: &Alarm2Config,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let alarm = DS3231Alarm2::from_config(config).map_err(DS3231Error::Alarm)?;
        self.write_alarm2(&alarm).await
    }

    /// Programs alarm 2 from field-wise settings, `None` meaning "always
    /// matches". See [`DS3231Alarm2::from_fields`] for the resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`DS3231Error::Alarm`] when resolution fails (nothing is
    /// written), or an I2C error from a failed write.
    pub async fn set_alarm2_fields(
        &mut self,
        minutes: Option<u8>,
        hours: Option<u8>,
        day_of_week: Option<u8>,
        day_of_month: Option<u8>,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let alarm = DS3231Alarm2::from_fields(minutes, hours, day_of_week, day_of_month)
            .map_err(DS3231Error::Alarm)?;
        self.write_alarm2(&alarm).await
    }

    async fn write_alarm2(&mut self, alarm: &DS3231Alarm2) -> Result<(), DS3231Error<I2C::Error>> {
        self.set_alarm2_minutes(alarm.minutes()).await?;
        self.set_alarm2_hours(alarm.hours()).await?;
        self.set_alarm2_day_date(alarm.day_date()).await?;
        Ok(())
    }

    /// Reads an alarm's fired flag without clearing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the I2C read fails.
    pub async fn alarm_fired(&mut self, alarm: Alarm) -> Result<bool, DS3231Error<I2C::Error>> {
        let status = self.status().await?;
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
    pub async fn clear_alarm_flag(&mut self, alarm: Alarm) -> Result<(), DS3231Error<I2C::Error>> {
        let mut status = self.status().await?;
        match alarm {
            Alarm::One => status.set_alarm1_flag(false),
            Alarm::Two => status.set_alarm2_flag(false),
        }
        self.set_status(status).await
    }

    /// Reads and clears an alarm's fired flag in one call. The status write
    /// is skipped when the flag was not set.
    ///
    /// # Errors
    ///
    /// Returns an error if the I2C read or write fails.
    pub async fn take_alarm_flag(&mut self, alarm: Alarm) -> Result<bool, DS3231Error<I2C::Error>> {
        let mut status = self.status().await?;
        let fired = match alarm {
            Alarm::One => status.alarm1_flag(),
            Alarm::Two => status.alarm2_flag(),
        };
        if fired {
            match alarm {
                Alarm::One => status.set_alarm1_flag(false),
                Alarm::Two => status.set_alarm2_flag(false),
            }
            self.set_status(status).await?;
        }
        Ok(fired)
    }
}

// Register access implementations
macro_rules! impl_register_access {
    ($(($name:ident, $regaddr:expr, $typ:ty)),+) => {
        impl<I2C: I2c> DS3231<I2C> {
            $(
                paste! {
                    #[doc = concat!("Gets the value of the ", stringify!($name), " register.")]
                    pub async fn $name(&mut self) -> Result<$typ, DS3231Error<I2C::Error>> {
                        let mut data = [0];
                        self.i2c
                            .write_read(self.address, &[$regaddr as u8], &mut data)
                            .await?;
                        Ok($typ(data[0]))
                    }

                    #[doc = concat!("Sets the value of the ", stringify!($name), " register.")]
                    pub async fn [<set_ $name>](&mut self, value: $typ) -> Result<(), DS3231Error<I2C::Error>> {
                        self.i2c.write(
                            self.address,
                            &[$regaddr as u8, value.into()],
                        ).await?;
                        Ok(())
                    }
                }
            )+
        }
    }
}

impl_register_access!(
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
