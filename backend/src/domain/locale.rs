//! Locale-aware calendar formatting.
//!
//! The formatter resolves its locale tag on every call instead of caching
//! anything derived from it, so a host can swap the locale (through a
//! supplier closure) between renders and the next sheet picks it up.
//!
//! Only a handful of languages ship name tables; unknown languages fall back
//! to English names while still honouring the region's first day of week and
//! weekend days.

use chrono::Datelike;
use shared::{CalendarDate, CalendarWeek, NameStyle};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// Where the formatter gets its locale tag from
#[derive(Clone)]
pub enum LocaleSource {
    Fixed(String),
    Dynamic(Rc<dyn Fn() -> String>),
}

impl LocaleSource {
    pub fn resolve(&self) -> String {
        match self {
            LocaleSource::Fixed(tag) => tag.clone(),
            LocaleSource::Dynamic(supplier) => supplier(),
        }
    }
}

impl fmt::Debug for LocaleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleSource::Fixed(tag) => f.debug_tuple("Fixed").field(tag).finish(),
            LocaleSource::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for LocaleSource {
    fn from(tag: &str) -> Self {
        LocaleSource::Fixed(tag.to_string())
    }
}

impl From<String> for LocaleSource {
    fn from(tag: String) -> Self {
        LocaleSource::Fixed(tag)
    }
}

#[derive(Debug, Clone, Copy)]
enum DatePattern {
    /// March 15, 2024
    MonthDayYear,
    /// 15 March 2024
    DayMonthYear,
    /// 15. März 2024
    DayDotMonthYear,
    /// 15 de marzo de 2024
    DayDeMonthDeYear,
}

struct LanguageTable {
    months: [&'static str; 12],
    months_short: [&'static str; 12],
    /// Sunday first
    weekdays: [&'static str; 7],
    weekdays_short: [&'static str; 7],
    pattern: DatePattern,
}

const ENGLISH: LanguageTable = LanguageTable {
    months: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    months_short: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    weekdays: [
        "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
    ],
    weekdays_short: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    pattern: DatePattern::MonthDayYear,
};

const GERMAN: LanguageTable = LanguageTable {
    months: [
        "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
        "Oktober", "November", "Dezember",
    ],
    months_short: [
        "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
        "Dez.",
    ],
    weekdays: [
        "Sonntag", "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag",
    ],
    weekdays_short: ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"],
    pattern: DatePattern::DayDotMonthYear,
};

const FRENCH: LanguageTable = LanguageTable {
    months: [
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
        "octobre", "novembre", "décembre",
    ],
    months_short: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
        "nov.", "déc.",
    ],
    weekdays: [
        "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
    ],
    weekdays_short: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
    pattern: DatePattern::DayMonthYear,
};

const SPANISH: LanguageTable = LanguageTable {
    months: [
        "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
        "octubre", "noviembre", "diciembre",
    ],
    months_short: [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
    ],
    weekdays: [
        "domingo", "lunes", "martes", "miércoles", "jueves", "viernes", "sábado",
    ],
    weekdays_short: ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"],
    pattern: DatePattern::DayDeMonthDeYear,
};

/// Regions whose week starts on Sunday
const SUNDAY_FIRST: &[&str] = &[
    "US", "CA", "MX", "BR", "JP", "KR", "IL", "PH", "IN", "ZA", "TW", "HK", "SA",
];

/// Regions whose week starts on Saturday
const SATURDAY_FIRST: &[&str] = &["AE", "EG", "DZ", "IQ", "JO", "KW", "LY", "OM", "QA", "SY"];

/// Regions with a Friday/Saturday weekend
const FRIDAY_SATURDAY_WEEKEND: &[&str] = &[
    "AE", "BH", "DZ", "EG", "IL", "IQ", "JO", "KW", "LY", "OM", "QA", "SA", "SY",
];

/// A parsed locale tag
#[derive(Debug, Clone, PartialEq, Eq)]
struct LocaleTag {
    language: String,
    region: Option<String>,
}

impl LocaleTag {
    fn parse(tag: &str) -> Self {
        let mut parts = tag.split(['-', '_']).filter(|part| !part.is_empty());
        let language = parts.next().unwrap_or("en").to_ascii_lowercase();
        let region = parts
            .find(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
            .map(str::to_ascii_uppercase);
        Self { language, region }
    }

    /// Region, falling back to the language's home region
    fn effective_region(&self) -> Option<&str> {
        self.region.as_deref().or(match self.language.as_str() {
            "en" => Some("US"),
            "de" => Some("DE"),
            "fr" => Some("FR"),
            "es" => Some("ES"),
            _ => None,
        })
    }

    fn table(&self) -> &'static LanguageTable {
        match self.language.as_str() {
            "de" => &GERMAN,
            "fr" => &FRENCH,
            "es" => &SPANISH,
            _ => &ENGLISH,
        }
    }
}

/// Calendar field formatter bound to a (possibly changing) locale
#[derive(Debug, Clone)]
pub struct LocaleFormatter {
    source: LocaleSource,
}

impl LocaleFormatter {
    pub fn new(source: impl Into<LocaleSource>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Formatter that asks `supplier` for the locale tag on every call
    pub fn dynamic(supplier: impl Fn() -> String + 'static) -> Self {
        Self {
            source: LocaleSource::Dynamic(Rc::new(supplier)),
        }
    }

    pub fn locale_tag(&self) -> String {
        self.source.resolve()
    }

    fn tag(&self) -> LocaleTag {
        LocaleTag::parse(&self.source.resolve())
    }

    /// First day of the week, 0 = Sunday
    pub fn get_first_day_of_week(&self) -> u32 {
        match self.tag().effective_region() {
            Some(region) if SUNDAY_FIRST.contains(&region) => 0,
            Some(region) if SATURDAY_FIRST.contains(&region) => 6,
            _ => 1,
        }
    }

    /// Weekday indices (0 = Sunday) of the weekend
    pub fn get_weekend_days(&self) -> BTreeSet<u32> {
        match self.tag().effective_region() {
            Some(region) if FRIDAY_SATURDAY_WEEKEND.contains(&region) => BTreeSet::from([5, 6]),
            _ => BTreeSet::from([0, 6]),
        }
    }

    /// ISO-8601 week of a date; week 1 holds the year's first Thursday
    pub fn get_calendar_week(&self, date: &CalendarDate) -> Option<CalendarWeek> {
        let iso = date.to_naive()?.iso_week();
        Some(CalendarWeek::new(iso.year(), iso.week()))
    }

    /// Weekday names, Sunday first or rotated to the locale's first day
    pub fn get_weekday_names(&self, style: NameStyle, from_first_day_of_week: bool) -> Vec<String> {
        let table = self.tag().table();
        let offset = if from_first_day_of_week {
            self.get_first_day_of_week() as usize
        } else {
            0
        };

        (0..7)
            .map(|i| {
                let index = (i + offset) % 7;
                match style {
                    NameStyle::Long => table.weekdays[index].to_string(),
                    NameStyle::Short => table.weekdays_short[index].to_string(),
                    NameStyle::Narrow => narrow(table.weekdays[index]),
                }
            })
            .collect()
    }

    /// Month name for a 0-based month index
    pub fn get_month_name(&self, index: u32, style: NameStyle) -> String {
        let table = self.tag().table();
        let index = (index % 12) as usize;
        match style {
            NameStyle::Long => table.months[index].to_string(),
            NameStyle::Short => table.months_short[index].to_string(),
            NameStyle::Narrow => narrow(table.months[index]),
        }
    }

    pub fn format_date(&self, date: &CalendarDate) -> String {
        let table = self.tag().table();
        let month = table.months[(date.month % 12) as usize];
        match table.pattern {
            DatePattern::MonthDayYear => format!("{} {}, {}", month, date.day, date.year),
            DatePattern::DayMonthYear => format!("{} {} {}", date.day, month, date.year),
            DatePattern::DayDotMonthYear => format!("{}. {} {}", date.day, month, date.year),
            DatePattern::DayDeMonthDeYear => {
                format!("{} de {} de {}", date.day, month, date.year)
            }
        }
    }

    /// Title of a month sheet, e.g. "March 2024"
    pub fn format_month_year(&self, year: i32, month: u32) -> String {
        let table = self.tag().table();
        let name = table.months[(month % 12) as usize];
        match table.pattern {
            DatePattern::DayDeMonthDeYear => format!("{} de {}", name, year),
            _ => format!("{} {}", name, year),
        }
    }

    pub fn format_week_number(&self, week: u32) -> String {
        week.to_string()
    }

    pub fn format_year(&self, year: i32) -> String {
        year.to_string()
    }

    pub fn format_decade(&self, start_year: i32) -> String {
        format!("{}-{}", start_year, start_year + 9)
    }

    pub fn format_century(&self, start_year: i32) -> String {
        format!("{}-{}", start_year, start_year + 99)
    }
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self::new("en-US")
    }
}

fn narrow(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect::<String>())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_parse_locale_tags() {
        assert_eq!(
            LocaleTag::parse("de_AT"),
            LocaleTag { language: "de".to_string(), region: Some("AT".to_string()) }
        );
        assert_eq!(
            LocaleTag::parse("zh-Hant-tw"),
            LocaleTag { language: "zh".to_string(), region: Some("TW".to_string()) }
        );
        assert_eq!(LocaleTag::parse("").language, "en");
    }

    #[test]
    fn test_first_day_of_week() {
        assert_eq!(LocaleFormatter::new("en-US").get_first_day_of_week(), 0);
        assert_eq!(LocaleFormatter::new("en").get_first_day_of_week(), 0);
        assert_eq!(LocaleFormatter::new("en-GB").get_first_day_of_week(), 1);
        assert_eq!(LocaleFormatter::new("de-DE").get_first_day_of_week(), 1);
        assert_eq!(LocaleFormatter::new("ar-EG").get_first_day_of_week(), 6);
    }

    #[test]
    fn test_weekend_days() {
        assert_eq!(LocaleFormatter::new("fr-FR").get_weekend_days(), BTreeSet::from([0, 6]));
        assert_eq!(LocaleFormatter::new("he-IL").get_weekend_days(), BTreeSet::from([5, 6]));
    }

    #[test]
    fn test_calendar_week_is_iso() {
        let formatter = LocaleFormatter::new("en-US");
        // January 1st 2021 was a Friday, so it belongs to 2020-W53
        let week = formatter.get_calendar_week(&CalendarDate::new(2021, 0, 1)).unwrap();
        assert_eq!(week, CalendarWeek::new(2020, 53));

        let week = formatter.get_calendar_week(&CalendarDate::new(2024, 0, 4)).unwrap();
        assert_eq!(week, CalendarWeek::new(2024, 1));
    }

    #[test]
    fn test_weekday_names_rotate_to_first_day() {
        let formatter = LocaleFormatter::new("en-GB");
        let names = formatter.get_weekday_names(NameStyle::Short, true);
        assert_eq!(names[0], "Mon");
        assert_eq!(names[6], "Sun");

        let names = formatter.get_weekday_names(NameStyle::Narrow, false);
        assert_eq!(names, vec!["S", "M", "T", "W", "T", "F", "S"]);
    }

    #[test]
    fn test_month_names_and_dates() {
        let german = LocaleFormatter::new("de-DE");
        assert_eq!(german.get_month_name(2, NameStyle::Long), "März");
        assert_eq!(german.format_date(&CalendarDate::new(2024, 2, 15)), "15. März 2024");

        let english = LocaleFormatter::new("en-US");
        assert_eq!(english.format_date(&CalendarDate::new(2024, 2, 15)), "March 15, 2024");
        assert_eq!(english.format_month_year(2024, 1), "February 2024");

        let spanish = LocaleFormatter::new("es");
        assert_eq!(spanish.format_month_year(2024, 0), "enero de 2024");
    }

    #[test]
    fn test_decade_and_century_labels() {
        let formatter = LocaleFormatter::default();
        assert_eq!(formatter.format_decade(2020), "2020-2029");
        assert_eq!(formatter.format_century(2000), "2000-2099");
    }

    #[test]
    fn test_dynamic_locale_is_requeried_every_call() {
        let current = Rc::new(RefCell::new("en-US".to_string()));
        let supplier = Rc::clone(&current);
        let formatter = LocaleFormatter::dynamic(move || supplier.borrow().clone());

        assert_eq!(formatter.get_first_day_of_week(), 0);
        *current.borrow_mut() = "de-DE".to_string();
        assert_eq!(formatter.get_first_day_of_week(), 1);
        assert_eq!(formatter.get_month_name(0, NameStyle::Long), "Januar");
    }
}
