//! Conversion between cell text and typed field values
//!
//! Every conversion is locale-independent: numbers use `.` as the decimal
//! separator with no grouping, booleans are `true`/`false`, and dates and
//! times use ISO 8601. Exporting a value with [`CellText::to_cell`] and
//! importing the text with [`CellText::from_cell`] yields an equal value.

use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// A field type that can be read from and written to a single cell
///
/// Implement this for custom column types, or use [`cell_text_via_str!`]
/// for types that already implement `FromStr` and `Display`.
///
/// [`cell_text_via_str!`]: crate::cell_text_via_str
pub trait CellText: Sized {
    /// Type name reported in conversion errors
    const TYPE_NAME: &'static str;

    /// Parse cell text, returning `None` if the text is not a valid value
    fn from_cell(text: &str) -> Option<Self>;

    /// Format the value as cell text
    fn to_cell(&self) -> String;
}

/// Convert cell text into a value bound to `field`
///
/// # Examples
/// ```
/// use rowbind_core::{to_value, Error};
///
/// let age: i32 = to_value(" 42 ", "Age").unwrap();
/// assert_eq!(age, 42);
///
/// let err = to_value::<i32>("abc", "Age").unwrap_err();
/// assert!(matches!(err, Error::Conversion { .. }));
/// ```
pub fn to_value<V: CellText>(text: &str, field: &str) -> Result<V> {
    V::from_cell(text).ok_or_else(|| Error::conversion(text, field, V::TYPE_NAME))
}

/// Convert a field value into cell text
pub fn to_text<V: CellText>(value: &V) -> String {
    value.to_cell()
}

/// Implement [`CellText`] for types with `FromStr` and `Display`
///
/// Surrounding whitespace is trimmed before parsing. This is the usual way to
/// bind a unit enum by variant name:
///
/// ```
/// use std::fmt;
/// use std::str::FromStr;
/// use rowbind_core::{cell_text_via_str, CellText};
///
/// #[derive(Debug, PartialEq)]
/// enum Status { Active, Closed }
///
/// impl FromStr for Status {
///     type Err = ();
///     fn from_str(s: &str) -> Result<Self, ()> {
///         match s {
///             "Active" => Ok(Status::Active),
///             "Closed" => Ok(Status::Closed),
///             _ => Err(()),
///         }
///     }
/// }
///
/// impl fmt::Display for Status {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{:?}", self)
///     }
/// }
///
/// cell_text_via_str!(Status);
///
/// assert_eq!(Status::from_cell("Closed"), Some(Status::Closed));
/// assert_eq!(Status::Active.to_cell(), "Active");
/// ```
#[macro_export]
macro_rules! cell_text_via_str {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::CellText for $ty {
            const TYPE_NAME: &'static str = stringify!($ty);

            fn from_cell(text: &str) -> ::core::option::Option<Self> {
                text.trim().parse().ok()
            }

            fn to_cell(&self) -> ::std::string::String {
                ::std::string::ToString::to_string(self)
            }
        }
    )+};
}

cell_text_via_str!(i8, i16, i32, i64, i128, isize);
cell_text_via_str!(u8, u16, u32, u64, u128, usize);
cell_text_via_str!(f32, f64);

impl CellText for String {
    const TYPE_NAME: &'static str = "String";

    fn from_cell(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn to_cell(&self) -> String {
        self.clone()
    }
}

impl CellText for char {
    const TYPE_NAME: &'static str = "char";

    fn from_cell(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    fn to_cell(&self) -> String {
        self.to_string()
    }
}

impl CellText for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_cell(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    fn to_cell(&self) -> String {
        self.to_string()
    }
}

impl CellText for Decimal {
    const TYPE_NAME: &'static str = "Decimal";

    fn from_cell(text: &str) -> Option<Self> {
        let text = text.trim();
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
    }

    fn to_cell(&self) -> String {
        self.to_string()
    }
}

/// Empty text is `None`; anything else must parse as `T`
///
/// A cell cannot tell `Some` of an empty value from `None`, so
/// `Option<String>` reads `Some(String::new())` back as `None`.
impl<T: CellText> CellText for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn from_cell(text: &str) -> Option<Self> {
        if text.is_empty() {
            Some(None)
        } else {
            T::from_cell(text).map(Some)
        }
    }

    fn to_cell(&self) -> String {
        self.as_ref().map(T::to_cell).unwrap_or_default()
    }
}

// Date/time formats accepted on import, most specific first. Export always
// uses the first one.
const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

// Serial numbers are accepted by `NaiveDate`, `NaiveDateTime`, `NaiveTime`
// (the fraction of the day) and `DateTime<Utc>`. `DateTime<FixedOffset>`
// needs an explicit offset, so it only reads RFC 3339 text.

/// Largest serial date Excel accepts (9999-12-31)
const MAX_SERIAL_DATE: f64 = 2_958_466.0;

/// Convert an Excel 1900-system serial date (days since 1899-12-30) to a
/// date/time, as found in numeric XLSX cells formatted as dates.
fn from_serial_date(text: &str) -> Option<NaiveDateTime> {
    let serial: f64 = text.parse().ok()?;
    if !serial.is_finite() || !(0.0..MAX_SERIAL_DATE).contains(&serial) {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

impl CellText for NaiveDate {
    const TYPE_NAME: &'static str = "NaiveDate";

    fn from_cell(text: &str) -> Option<Self> {
        let text = text.trim();
        NaiveDate::parse_from_str(text, DATE_FORMAT)
            .ok()
            .or_else(|| NaiveDateTime::from_cell(text).map(|dt| dt.date()))
    }

    fn to_cell(&self) -> String {
        self.format(DATE_FORMAT).to_string()
    }
}

impl CellText for NaiveDateTime {
    const TYPE_NAME: &'static str = "NaiveDateTime";

    fn from_cell(text: &str) -> Option<Self> {
        let text = text.trim();
        DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(text, DATE_FORMAT)
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .or_else(|| from_serial_date(text))
    }

    fn to_cell(&self) -> String {
        self.format(DATETIME_FORMATS[0]).to_string()
    }
}

impl CellText for NaiveTime {
    const TYPE_NAME: &'static str = "NaiveTime";

    fn from_cell(text: &str) -> Option<Self> {
        let text = text.trim();
        TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
            .or_else(|| from_serial_date(text).map(|dt| dt.time()))
    }

    fn to_cell(&self) -> String {
        self.format(TIME_FORMATS[0]).to_string()
    }
}

impl CellText for DateTime<FixedOffset> {
    const TYPE_NAME: &'static str = "DateTime<FixedOffset>";

    fn from_cell(text: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(text.trim()).ok()
    }

    fn to_cell(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }
}

impl CellText for DateTime<Utc> {
    const TYPE_NAME: &'static str = "DateTime<Utc>";

    fn from_cell(text: &str) -> Option<Self> {
        DateTime::<FixedOffset>::from_cell(text)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| from_serial_date(text.trim()).map(|dt| Utc.from_utc_datetime(&dt)))
    }

    fn to_cell(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}
