//! Field descriptor tables
//!
//! Columns bind to record fields by name. Instead of runtime introspection,
//! each record type declares a static table of [`Field`] descriptors, either
//! by hand or with the [`record!`](crate::record) macro.

use std::fmt;

use crate::error::Result;

/// Reads a field and formats it as cell text
pub type Getter<T> = fn(&T) -> String;

/// Parses cell text and stores it in a field
pub type Setter<T> = fn(&mut T, &str) -> Result<()>;

/// Descriptor for one named field of a record type
///
/// A field without a getter is not exported; a field without a setter is
/// skipped on import.
pub struct Field<T> {
    name: &'static str,
    type_name: &'static str,
    get: Option<Getter<T>>,
    set: Option<Setter<T>>,
}

impl<T> Field<T> {
    /// Create a readable and writable field
    pub const fn new(
        name: &'static str,
        type_name: &'static str,
        get: Getter<T>,
        set: Setter<T>,
    ) -> Self {
        Self {
            name,
            type_name,
            get: Some(get),
            set: Some(set),
        }
    }

    /// Create a field that is exported but never assigned on import
    pub const fn read_only(name: &'static str, type_name: &'static str, get: Getter<T>) -> Self {
        Self {
            name,
            type_name,
            get: Some(get),
            set: None,
        }
    }

    /// Create a field that is assigned on import but never exported
    pub const fn write_only(name: &'static str, type_name: &'static str, set: Setter<T>) -> Self {
        Self {
            name,
            type_name,
            get: None,
            set: Some(set),
        }
    }

    /// Column name this field binds to
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the field's value type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check if the field can be exported
    pub fn is_readable(&self) -> bool {
        self.get.is_some()
    }

    /// Check if the field can be assigned on import
    pub fn is_writable(&self) -> bool {
        self.set.is_some()
    }

    /// Format the field's current value, or `None` if it is not readable
    pub fn read(&self, record: &T) -> Option<String> {
        self.get.map(|get| get(record))
    }

    /// Assign the field from cell text
    ///
    /// Returns `Ok(false)` without touching the record if the field is not
    /// writable.
    pub fn write(&self, record: &mut T, text: &str) -> Result<bool> {
        match self.set {
            Some(set) => set(record, text).map(|()| true),
            None => Ok(false),
        }
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .finish()
    }
}

/// A type whose fields can be bound to spreadsheet columns
pub trait Record: Sized + 'static {
    /// Field descriptors in declaration order
    fn fields() -> &'static [Field<Self>];

    /// Look up a field by exact name
    fn field(name: &str) -> Option<&'static Field<Self>> {
        Self::fields().iter().find(|f| f.name() == name)
    }

    /// Names of all exported fields, in declaration order
    fn header() -> Vec<&'static str> {
        Self::fields()
            .iter()
            .filter(|f| f.is_readable())
            .map(Field::name)
            .collect()
    }
}

/// Declare the field table for a struct
///
/// Each entry maps a column name to a struct field and its type. Append
/// `[read_only]` or `[write_only]` to restrict the direction.
///
/// ```
/// use rowbind_core::{record, Record};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Invoice {
///     number: u32,
///     customer: String,
///     total: f64,
/// }
///
/// record!(Invoice {
///     "Number" => number: u32,
///     "Customer" => customer: String,
///     "Total" => total: f64 [read_only],
/// });
///
/// assert_eq!(Invoice::header(), vec!["Number", "Customer", "Total"]);
/// assert!(!Invoice::field("Total").unwrap().is_writable());
/// ```
#[macro_export]
macro_rules! record {
    (@field $ty:ty, $name:literal, $field:ident, $fty:ty) => {
        $crate::Field::new(
            $name,
            <$fty as $crate::CellText>::TYPE_NAME,
            |record: &$ty| $crate::CellText::to_cell(&record.$field),
            |record: &mut $ty, text: &str| {
                record.$field = $crate::to_value::<$fty>(text, $name)?;
                ::core::result::Result::Ok(())
            },
        )
    };
    (@field $ty:ty, $name:literal, $field:ident, $fty:ty, read_only) => {
        $crate::Field::read_only(
            $name,
            <$fty as $crate::CellText>::TYPE_NAME,
            |record: &$ty| $crate::CellText::to_cell(&record.$field),
        )
    };
    (@field $ty:ty, $name:literal, $field:ident, $fty:ty, write_only) => {
        $crate::Field::write_only(
            $name,
            <$fty as $crate::CellText>::TYPE_NAME,
            |record: &mut $ty, text: &str| {
                record.$field = $crate::to_value::<$fty>(text, $name)?;
                ::core::result::Result::Ok(())
            },
        )
    };
    ($ty:ty { $($name:literal => $field:ident : $fty:ty $([$access:ident])?),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn fields() -> &'static [$crate::Field<Self>] {
                static FIELDS: &[$crate::Field<$ty>] = &[
                    $($crate::record!(@field $ty, $name, $field, $fty $(, $access)?)),*
                ];
                FIELDS
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::to_value;

    #[derive(Debug, Default, PartialEq)]
    struct Account {
        id: i64,
        owner: String,
        balance: f64,
        secret: String,
    }

    crate::record!(Account {
        "Id" => id: i64,
        "Owner" => owner: String,
        "Balance" => balance: f64 [read_only],
        "Secret" => secret: String [write_only],
    });

    #[test]
    fn test_fields_in_declaration_order() {
        let names: Vec<_> = Account::fields().iter().map(Field::name).collect();
        assert_eq!(names, vec!["Id", "Owner", "Balance", "Secret"]);
        assert_eq!(Account::header(), vec!["Id", "Owner", "Balance"]);
    }

    #[test]
    fn test_field_lookup_is_exact() {
        assert!(Account::field("Id").is_some());
        assert!(Account::field("id").is_none());
        assert!(Account::field("Id ").is_none());
        assert_eq!(Account::field("Balance").unwrap().type_name(), "f64");
    }

    #[test]
    fn test_read_and_write() {
        let mut account = Account::default();
        let id = Account::field("Id").unwrap();

        assert!(id.write(&mut account, "17").unwrap());
        assert_eq!(account.id, 17);
        assert_eq!(id.read(&account).as_deref(), Some("17"));
    }

    #[test]
    fn test_access_restrictions() {
        let mut account = Account::default();
        account.balance = 9.5;

        let balance = Account::field("Balance").unwrap();
        assert!(!balance.write(&mut account, "1.0").unwrap());
        assert_eq!(account.balance, 9.5);

        let secret = Account::field("Secret").unwrap();
        assert_eq!(secret.read(&account), None);
        assert!(secret.write(&mut account, "hunter2").unwrap());
        assert_eq!(account.secret, "hunter2");
    }

    #[test]
    fn test_write_reports_field_name() {
        let mut account = Account::default();
        let err = Account::field("Id")
            .unwrap()
            .write(&mut account, "twelve")
            .unwrap_err();

        assert_eq!(err, Error::conversion("twelve", "Id", "i64"));
    }

    #[derive(Debug, Default)]
    struct Manual {
        code: u8,
    }

    impl Record for Manual {
        fn fields() -> &'static [Field<Self>] {
            static FIELDS: &[Field<Manual>] = &[Field::new(
                "Code",
                "u8",
                |m: &Manual| m.code.to_string(),
                |m: &mut Manual, text: &str| {
                    m.code = to_value(text, "Code")?;
                    Ok(())
                },
            )];
            FIELDS
        }
    }

    #[test]
    fn test_hand_written_table() {
        let mut m = Manual::default();
        Manual::field("Code").unwrap().write(&mut m, "200").unwrap();
        assert_eq!(m.code, 200);
    }
}
