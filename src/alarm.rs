//! Alarm configuration utilities for the DS3231 RTC.
//!
//! This module provides type-safe alarm configuration for the DS3231's alarm registers.
//! It uses enum-based configurations that clearly express the different alarm modes,
//! so a wildcard field and the day-of-week/date-of-month choice are stated by the
//! variant rather than by sentinel values.
//!
//! # Alarm Types
//!
//! ## Alarm 1 Configurations
//! - `EverySecond` - Triggers every second
//! - `AtSeconds` - Triggers when seconds match
//! - `AtMinutesSeconds` - Triggers when minutes:seconds match
//! - `AtTime` - Triggers when hours:minutes:seconds match (daily)
//! - `AtTimeOnDate` - Triggers at specific time on specific date of month
//! - `AtTimeOnDay` - Triggers at specific time on specific day of week
//!
//! ## Alarm 2 Configurations
//! - `EveryMinute` - Triggers every minute (at 00 seconds)
//! - `AtMinutes` - Triggers when minutes match at 00 seconds
//! - `AtTime` - Triggers when hours:minutes match (at 00 seconds, daily)
//! - `AtTimeOnDate` - Triggers at specific time on specific date of month (at 00 seconds)
//! - `AtTimeOnDay` - Triggers at specific time on specific day of week (at 00 seconds)
//!
//! The lower-level [`DS3231Alarm1::from_fields`] / [`DS3231Alarm2::from_fields`]
//! constructors take each field as an `Option`, with `None` meaning "always
//! matches" (the register's mask bit). They reject the one combination the
//! register file cannot express: a concrete day of week *and* a concrete date
//! of month, which share a single register slot.

use crate::registers::{
    bcd_digits, AlarmDayDate, AlarmHours, AlarmMinutes, AlarmSeconds, DayDateSelect,
};
use crate::Field;

/// Error type for alarm configuration operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmError {
    /// A field value is outside its representable range
    OutOfRange(Field),
    /// Both a day of week and a date of month were given; the alarm
    /// day/date register can only hold one of them
    AmbiguousDaySpecifier,
}

/// Alarm 1 specific configurations.
///
/// Alarm 1 supports seconds-level precision and can match against various time components.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alarm1Config {
    /// Trigger every second (all mask bits set)
    EverySecond,

    /// Trigger when seconds match (A1M1=0, others=1)
    AtSeconds {
        /// Seconds value (0-59)
        seconds: u8,
    },

    /// Trigger when minutes and seconds match (A1M1=0, A1M2=0, others=1)
    AtMinutesSeconds {
        /// Minutes value (0-59)
        minutes: u8,
        /// Seconds value (0-59)
        seconds: u8,
    },

    /// Trigger when hours, minutes, and seconds match (A1M1=0, A1M2=0, A1M3=0, A1M4=1)
    /// This creates a daily alarm at the specified time.
    AtTime {
        /// Hours value (0-23)
        hours: u8,
        /// Minutes value (0-59)
        minutes: u8,
        /// Seconds value (0-59)
        seconds: u8,
    },

    /// Trigger at specific time on specific date of month (all mask bits=0, DY/DT=0)
    AtTimeOnDate {
        /// Hours value (0-23)
        hours: u8,
        /// Minutes value (0-59)
        minutes: u8,
        /// Seconds value (0-59)
        seconds: u8,
        /// Date of month (1-31)
        date: u8,
    },

    /// Trigger at specific time on specific day of week (all mask bits=0, DY/DT=1)
    AtTimeOnDay {
        /// Hours value (0-23)
        hours: u8,
        /// Minutes value (0-59)
        minutes: u8,
        /// Seconds value (0-59)
        seconds: u8,
        /// Day of week (1-7, where 1=Sunday)
        day: u8,
    },
}

/// Alarm 2 specific configurations.
///
/// Alarm 2 has no seconds register and always triggers at 00 seconds of the matching minute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alarm2Config {
    /// Trigger every minute at 00 seconds (all mask bits set)
    EveryMinute,

    /// Trigger when minutes match at 00 seconds (A2M2=0, others=1)
    AtMinutes {
        /// Minutes value (0-59)
        minutes: u8,
    },

    /// Trigger when hours and minutes match at 00 seconds (A2M2=0, A2M3=0, A2M4=1)
    /// This creates a daily alarm at the specified time.
    AtTime {
        /// Hours value (0-23)
        hours: u8,
        /// Minutes value (0-59)
        minutes: u8,
    },

    /// Trigger at specific time on specific date of month at 00 seconds (all mask bits=0, DY/DT=0)
    AtTimeOnDate {
        /// Hours value (0-23)
        hours: u8,
        /// Minutes value (0-59)
        minutes: u8,
        /// Date of month (1-31)
        date: u8,
    },

    /// Trigger at specific time on specific day of week at 00 seconds (all mask bits=0, DY/DT=1)
    AtTimeOnDay {
        /// Hours value (0-23)
        hours: u8,
        /// Minutes value (0-59)
        minutes: u8,
        /// Day of week (1-7, where 1=Sunday)
        day: u8,
    },
}

/// Builds the alarm seconds register: `None` sets the mask bit (always
/// matches), `Some` encodes the value in BCD.
fn alarm_seconds(field: Option<u8>) -> Result<AlarmSeconds, AlarmError> {
    let mut reg = AlarmSeconds::default();
    match field {
        None => reg.set_alarm_mask1(true),
        Some(value) => {
            let (ones, tens) =
                bcd_digits(value, 59).ok_or(AlarmError::OutOfRange(Field::Seconds))?;
            reg.set_seconds(ones);
            reg.set_ten_seconds(tens);
        }
    }
    Ok(reg)
}

fn alarm_minutes(field: Option<u8>) -> Result<AlarmMinutes, AlarmError> {
    let mut reg = AlarmMinutes::default();
    match field {
        None => reg.set_alarm_mask2(true),
        Some(value) => {
            let (ones, tens) =
                bcd_digits(value, 59).ok_or(AlarmError::OutOfRange(Field::Minutes))?;
            reg.set_minutes(ones);
            reg.set_ten_minutes(tens);
        }
    }
    Ok(reg)
}

fn alarm_hours(field: Option<u8>) -> Result<AlarmHours, AlarmError> {
    let mut reg = AlarmHours::default();
    match field {
        None => reg.set_alarm_mask3(true),
        Some(value) => {
            let (ones, tens) = bcd_digits(value, 23).ok_or(AlarmError::OutOfRange(Field::Hours))?;
            reg.set_hours(ones);
            reg.set_ten_hours(tens);
        }
    }
    Ok(reg)
}

/// Builds the shared day/date register. The two concrete forms are mutually
/// exclusive; supplying both is rejected rather than silently preferring one.
fn alarm_day_date(
    day_of_week: Option<u8>,
    day_of_month: Option<u8>,
) -> Result<AlarmDayDate, AlarmError> {
    let mut reg = AlarmDayDate::default();
    match (day_of_week, day_of_month) {
        (Some(_), Some(_)) => return Err(AlarmError::AmbiguousDaySpecifier),
        (None, None) => reg.set_alarm_mask4(true),
        (Some(day), None) => {
            if day == 0 || day > 7 {
                return Err(AlarmError::OutOfRange(Field::DayOfWeek));
            }
            reg.set_day_date_select(DayDateSelect::Day);
            reg.set_day_or_date(day);
        }
        (None, Some(date)) => {
            if date == 0 {
                return Err(AlarmError::OutOfRange(Field::DayOfMonth));
            }
            let (ones, tens) =
                bcd_digits(date, 31).ok_or(AlarmError::OutOfRange(Field::DayOfMonth))?;
            reg.set_day_date_select(DayDateSelect::Date);
            reg.set_day_or_date(ones);
            reg.set_ten_date(tens);
        }
    }
    Ok(reg)
}

/// Resolved register values for DS3231 Alarm 1.
///
/// This struct models the 4 alarm 1 registers of the DS3231, using
/// strongly-typed bitfield wrappers for each field.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DS3231Alarm1 {
    seconds: AlarmSeconds,
    minutes: AlarmMinutes,
    hours: AlarmHours,
    day_date: AlarmDayDate,
}

impl DS3231Alarm1 {
    /// Resolves field-wise alarm settings into register values.
    ///
    /// `None` marks a field as "always matches" (its mask bit is set in the
    /// register). Time fields are validated in order seconds, minutes, hours,
    /// then the day/date slot.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmError::OutOfRange`] naming the first out-of-range field,
    /// or [`AlarmError::AmbiguousDaySpecifier`] when both `day_of_week` and
    /// `day_of_month` are concrete.
    pub fn from_fields(
        seconds: Option<u8>,
        minutes: Option<u8>,
        hours: Option<u8>,
        day_of_week: Option<u8>,
        day_of_month: Option<u8>,
    ) -> Result<Self, AlarmError> {
        Ok(Self {
            seconds: alarm_seconds(seconds)?,
            minutes: alarm_minutes(minutes)?,
            hours: alarm_hours(hours)?,
            day_date: alarm_day_date(day_of_week, day_of_month)?,
        })
    }

    /// Creates an Alarm 1 register configuration from an [`Alarm1Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration contains out-of-range values.
    pub fn from_config(config: &Alarm1Config) -> Result<Self, AlarmError> {
        match *config {
            Alarm1Config::EverySecond => Self::from_fields(None, None, None, None, None),
            Alarm1Config::AtSeconds { seconds } => {
                Self::from_fields(Some(seconds), None, None, None, None)
            }
            Alarm1Config::AtMinutesSeconds { minutes, seconds } => {
                Self::from_fields(Some(seconds), Some(minutes), None, None, None)
            }
            Alarm1Config::AtTime {
                hours,
                minutes,
                seconds,
            } => Self::from_fields(Some(seconds), Some(minutes), Some(hours), None, None),
            Alarm1Config::AtTimeOnDay {
                hours,
                minutes,
                seconds,
                day,
            } => Self::from_fields(Some(seconds), Some(minutes), Some(hours), Some(day), None),
            Alarm1Config::AtTimeOnDate {
                hours,
                minutes,
                seconds,
                date,
            } => Self::from_fields(Some(seconds), Some(minutes), Some(hours), None, Some(date)),
        }
    }

    /// Gets the alarm seconds register
    #[must_use]
    pub fn seconds(&self) -> AlarmSeconds {
        self.seconds
    }

    /// Gets the alarm minutes register
    #[must_use]
    pub fn minutes(&self) -> AlarmMinutes {
        self.minutes
    }

    /// Gets the alarm hours register
    #[must_use]
    pub fn hours(&self) -> AlarmHours {
        self.hours
    }

    /// Gets the alarm day/date register
    #[must_use]
    pub fn day_date(&self) -> AlarmDayDate {
        self.day_date
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DS3231Alarm1 {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "DS3231Alarm1 {{ ");
        defmt::write!(f, "seconds: {}, ", self.seconds);
        defmt::write!(f, "minutes: {}, ", self.minutes);
        defmt::write!(f, "hours: {}, ", self.hours);
        defmt::write!(f, "day_date: {} ", self.day_date);
        defmt::write!(f, "}}");
    }
}

/// Resolved register values for DS3231 Alarm 2.
///
/// This struct models the 3 alarm 2 registers of the DS3231 (no seconds register).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DS3231Alarm2 {
    minutes: AlarmMinutes,
    hours: AlarmHours,
    day_date: AlarmDayDate,
}

impl DS3231Alarm2 {
    /// Resolves field-wise alarm settings into register values.
    ///
    /// Same contract as [`DS3231Alarm1::from_fields`], minus the seconds field.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmError::OutOfRange`] naming the first out-of-range field,
    /// or [`AlarmError::AmbiguousDaySpecifier`] when both `day_of_week` and
    /// `day_of_month` are concrete.
    pub fn from_fields(
        minutes: Option<u8>,
        hours: Option<u8>,
        day_of_week: Option<u8>,
        day_of_month: Option<u8>,
    ) -> Result<Self, AlarmError> {
        Ok(Self {
            minutes: alarm_minutes(minutes)?,
            hours: alarm_hours(hours)?,
            day_date: alarm_day_date(day_of_week, day_of_month)?,
        })
    }

    /// Creates an Alarm 2 register configuration from an [`Alarm2Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration contains out-of-range values.
    pub fn from_config(config: &Alarm2Config) -> Result<Self, AlarmError> {
        match *config {
            Alarm2Config::EveryMinute => Self::from_fields(None, None, None, None),
            Alarm2Config::AtMinutes { minutes } => {
                Self::from_fields(Some(minutes), None, None, None)
            }
            Alarm2Config::AtTime { hours, minutes } => {
                Self::from_fields(Some(minutes), Some(hours), None, None)
            }
            Alarm2Config::AtTimeOnDay {
                hours,
                minutes,
                day,
            } => Self::from_fields(Some(minutes), Some(hours), Some(day), None),
            Alarm2Config::AtTimeOnDate {
                hours,
                minutes,
                date,
            } => Self::from_fields(Some(minutes), Some(hours), None, Some(date)),
        }
    }

    /// Gets the alarm minutes register
    #[must_use]
    pub fn minutes(&self) -> AlarmMinutes {
        self.minutes
    }

    /// Gets the alarm hours register
    #[must_use]
    pub fn hours(&self) -> AlarmHours {
        self.hours
    }

    /// Gets the alarm day/date register
    #[must_use]
    pub fn day_date(&self) -> AlarmDayDate {
        self.day_date
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DS3231Alarm2 {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "DS3231Alarm2 {{ ");
        defmt::write!(f, "minutes: {}, ", self.minutes);
        defmt::write!(f, "hours: {}, ", self.hours);
        defmt::write!(f, "day_date: {} ", self.day_date);
        defmt::write!(f, "}}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alarm1_every_second() {
        let config = Alarm1Config::EverySecond;
        let alarm = DS3231Alarm1::from_config(&config).unwrap();

        // All four registers carry only the mask bit
        assert_eq!(u8::from(alarm.seconds()), 0x80);
        assert_eq!(u8::from(alarm.minutes()), 0x80);
        assert_eq!(u8::from(alarm.hours()), 0x80);
        assert_eq!(u8::from(alarm.day_date()), 0x80);
    }

    #[test]
    fn test_alarm1_at_seconds() {
        let config = Alarm1Config::AtSeconds { seconds: 30 };
        let alarm = DS3231Alarm1::from_config(&config).unwrap();

        assert!(!alarm.seconds().alarm_mask1());
        assert_eq!(alarm.seconds().seconds(), 0);
        assert_eq!(alarm.seconds().ten_seconds(), 3);
        assert!(alarm.minutes().alarm_mask2());
        assert!(alarm.hours().alarm_mask3());
        assert!(alarm.day_date().alarm_mask4());
    }

    #[test]
    fn test_alarm1_at_minutes_seconds() {
        let config = Alarm1Config::AtMinutesSeconds {
            minutes: 15,
            seconds: 30,
        };
        let alarm = DS3231Alarm1::from_config(&config).unwrap();

        assert!(!alarm.seconds().alarm_mask1());
        assert_eq!(alarm.seconds().seconds(), 0);
        assert_eq!(alarm.seconds().ten_seconds(), 3);

        assert!(!alarm.minutes().alarm_mask2());
        assert_eq!(alarm.minutes().minutes(), 5);
        assert_eq!(alarm.minutes().ten_minutes(), 1);

        assert!(alarm.hours().alarm_mask3());
        assert!(alarm.day_date().alarm_mask4());
    }

    #[test]
    fn test_alarm1_at_time() {
        let config = Alarm1Config::AtTime {
            hours: 15,
            minutes: 30,
            seconds: 45,
        };
        let alarm = DS3231Alarm1::from_config(&config).unwrap();

        assert!(!alarm.seconds().alarm_mask1());
        assert!(!alarm.minutes().alarm_mask2());
        assert!(!alarm.hours().alarm_mask3());
        assert!(alarm.day_date().alarm_mask4());

        assert_eq!(u8::from(alarm.hours()), 0x15);
    }

    #[test]
    fn test_alarm1_at_time_on_day() {
        let config = Alarm1Config::AtTimeOnDay {
            hours: 9,
            minutes: 0,
            seconds: 0,
            day: 3, // Tuesday
        };
        let alarm = DS3231Alarm1::from_config(&config).unwrap();

        assert!(!alarm.day_date().alarm_mask4());
        assert_eq!(alarm.day_date().day_date_select(), DayDateSelect::Day);
        assert_eq!(alarm.day_date().day_or_date(), 3);
        // DY/DT bit plus the day value
        assert_eq!(u8::from(alarm.day_date()), 0x43);
    }

    #[test]
    fn test_alarm1_at_time_on_date() {
        let config = Alarm1Config::AtTimeOnDate {
            hours: 12,
            minutes: 0,
            seconds: 0,
            date: 15,
        };
        let alarm = DS3231Alarm1::from_config(&config).unwrap();

        assert!(!alarm.day_date().alarm_mask4());
        assert_eq!(alarm.day_date().day_date_select(), DayDateSelect::Date);
        assert_eq!(alarm.day_date().day_or_date(), 5); // BCD ones place of 15
        assert_eq!(alarm.day_date().ten_date(), 1); // BCD tens place of 15
        assert_eq!(u8::from(alarm.day_date()), 0x15);
    }

    #[test]
    fn test_alarm1_ambiguous_day_specifier() {
        let result = DS3231Alarm1::from_fields(Some(0), Some(0), Some(9), Some(2), Some(15));
        assert_eq!(result, Err(AlarmError::AmbiguousDaySpecifier));
    }

    #[test]
    fn test_alarm1_masked_day_slot() {
        let alarm = DS3231Alarm1::from_fields(Some(0), Some(0), Some(9), None, None).unwrap();
        assert_eq!(u8::from(alarm.day_date()), 0x80);
    }

    #[test]
    fn test_alarm1_field_validation_order() {
        // Time fields are checked before the day slot, so an out-of-range
        // seconds value wins over an ambiguous day specifier
        let result = DS3231Alarm1::from_fields(Some(60), None, None, Some(2), Some(15));
        assert_eq!(result, Err(AlarmError::OutOfRange(Field::Seconds)));
    }

    #[test]
    fn test_alarm1_out_of_range_fields() {
        assert_eq!(
            DS3231Alarm1::from_config(&Alarm1Config::AtSeconds { seconds: 60 }),
            Err(AlarmError::OutOfRange(Field::Seconds))
        );
        assert_eq!(
            DS3231Alarm1::from_config(&Alarm1Config::AtMinutesSeconds {
                minutes: 60,
                seconds: 0,
            }),
            Err(AlarmError::OutOfRange(Field::Minutes))
        );
        assert_eq!(
            DS3231Alarm1::from_config(&Alarm1Config::AtTime {
                hours: 24,
                minutes: 0,
                seconds: 0,
            }),
            Err(AlarmError::OutOfRange(Field::Hours))
        );
        assert_eq!(
            DS3231Alarm1::from_config(&Alarm1Config::AtTimeOnDay {
                hours: 9,
                minutes: 0,
                seconds: 0,
                day: 8,
            }),
            Err(AlarmError::OutOfRange(Field::DayOfWeek))
        );
        assert_eq!(
            DS3231Alarm1::from_config(&Alarm1Config::AtTimeOnDay {
                hours: 9,
                minutes: 0,
                seconds: 0,
                day: 0,
            }),
            Err(AlarmError::OutOfRange(Field::DayOfWeek))
        );
        assert_eq!(
            DS3231Alarm1::from_config(&Alarm1Config::AtTimeOnDate {
                hours: 9,
                minutes: 0,
                seconds: 0,
                date: 32,
            }),
            Err(AlarmError::OutOfRange(Field::DayOfMonth))
        );
        assert_eq!(
            DS3231Alarm1::from_config(&Alarm1Config::AtTimeOnDate {
                hours: 9,
                minutes: 0,
                seconds: 0,
                date: 0,
            }),
            Err(AlarmError::OutOfRange(Field::DayOfMonth))
        );
    }

    #[test]
    fn test_alarm2_every_minute() {
        let config = Alarm2Config::EveryMinute;
        let alarm = DS3231Alarm2::from_config(&config).unwrap();

        assert_eq!(u8::from(alarm.minutes()), 0x80);
        assert_eq!(u8::from(alarm.hours()), 0x80);
        assert_eq!(u8::from(alarm.day_date()), 0x80);
    }

    #[test]
    fn test_alarm2_at_minutes() {
        let config = Alarm2Config::AtMinutes { minutes: 15 };
        let alarm = DS3231Alarm2::from_config(&config).unwrap();

        assert!(!alarm.minutes().alarm_mask2());
        assert_eq!(alarm.minutes().minutes(), 5);
        assert_eq!(alarm.minutes().ten_minutes(), 1);
        assert!(alarm.hours().alarm_mask3());
        assert!(alarm.day_date().alarm_mask4());
    }

    #[test]
    fn test_alarm2_at_time() {
        let config = Alarm2Config::AtTime {
            hours: 14,
            minutes: 30,
        };
        let alarm = DS3231Alarm2::from_config(&config).unwrap();

        assert!(!alarm.minutes().alarm_mask2());
        assert!(!alarm.hours().alarm_mask3());
        assert!(alarm.day_date().alarm_mask4());
        assert_eq!(u8::from(alarm.hours()), 0x14);
    }

    #[test]
    fn test_alarm2_at_time_on_date() {
        let config = Alarm2Config::AtTimeOnDate {
            hours: 8,
            minutes: 30,
            date: 25,
        };
        let alarm = DS3231Alarm2::from_config(&config).unwrap();

        assert!(!alarm.minutes().alarm_mask2());
        assert!(!alarm.hours().alarm_mask3());
        assert!(!alarm.day_date().alarm_mask4());
        assert_eq!(alarm.day_date().day_date_select(), DayDateSelect::Date);
        assert_eq!(u8::from(alarm.day_date()), 0x25);
    }

    #[test]
    fn test_alarm2_at_time_on_day() {
        let config = Alarm2Config::AtTimeOnDay {
            hours: 17,
            minutes: 45,
            day: 6, // Friday
        };
        let alarm = DS3231Alarm2::from_config(&config).unwrap();

        assert!(!alarm.minutes().alarm_mask2());
        assert!(!alarm.hours().alarm_mask3());
        assert!(!alarm.day_date().alarm_mask4());
        assert_eq!(alarm.day_date().day_date_select(), DayDateSelect::Day);
        assert_eq!(u8::from(alarm.day_date()), 0x46);
    }

    #[test]
    fn test_alarm2_ambiguous_day_specifier() {
        let result = DS3231Alarm2::from_fields(Some(0), Some(9), Some(2), Some(15));
        assert_eq!(result, Err(AlarmError::AmbiguousDaySpecifier));
    }

    #[test]
    fn test_alarm_config_clone_and_partialeq() {
        let config1 = Alarm1Config::AtTime {
            hours: 9,
            minutes: 30,
            seconds: 0,
        };
        let config2 = config1.clone();
        assert_eq!(config1, config2);

        let config3 = Alarm1Config::AtTime {
            hours: 10,
            minutes: 30,
            seconds: 0,
        };
        assert_ne!(config1, config3);
    }
}
