use chrono::{Datelike, Weekday};

use crate::config::Language;

const DAYS_ES: [&str; 7] = ["Domingo", "Lunes", "Martes", "Miercoles", "Jueves", "Viernes", "Sabado"];
const DAYS_EN: [&str; 7] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

/// Day-of-week name for `date`, indexed Sunday-first.
///
/// Only the weekday is looked at. Time zone conversion is the caller's job:
/// pass a date that is already in the zone the widget displays.
pub fn day_name<D: Datelike>(date: &D, language: Language) -> &'static str {
    weekday_name(date.weekday(), language)
}

pub fn weekday_name(weekday: Weekday, language: Language) -> &'static str {
    let names = match language {
        Language::Es => &DAYS_ES,
        Language::En => &DAYS_EN,
    };
    names[weekday.num_days_from_sunday() as usize]
}
