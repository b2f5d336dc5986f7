use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form is also the serde wire name.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = EngineError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(EngineError::InvalidQuery(format!(
                        "unknown {} value: {s:?}",
                        stringify!($name)
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Gender {
    Male => "male",
    Female => "female",
});

str_enum!(BloodType {
    A => "A",
    B => "B",
    O => "O",
    Ab => "AB",
});

str_enum!(SortDirection {
    Asc => "asc",
    Desc => "desc",
});

// Column names match the legacy record field names used in query strings.
str_enum!(ColumnKey {
    Name => "name",
    Age => "age",
    Gender => "gender",
    LastVisit => "lastVisit",
    RevisitRate => "revisitRate",
    Disease => "disease",
    Distance => "distance",
    DoctorName => "doctorName",
});

impl SortDirection {
    /// Direction after clicking the header of the already-sorted column.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// How a column's values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Text,
    Date,
    Numeric,
    /// Resolved through the doctor foreign key before comparison.
    Joined,
}

impl ColumnKey {
    pub fn kind(self) -> KeyKind {
        match self {
            ColumnKey::Name | ColumnKey::Gender | ColumnKey::Disease => KeyKind::Text,
            ColumnKey::LastVisit => KeyKind::Date,
            ColumnKey::Age | ColumnKey::RevisitRate | ColumnKey::Distance => KeyKind::Numeric,
            ColumnKey::DoctorName => KeyKind::Joined,
        }
    }

    /// Next sort state when this column's header is clicked: same column
    /// flips direction, a new column starts ascending.
    pub fn click(self, current: ColumnKey, direction: SortDirection) -> (ColumnKey, SortDirection) {
        if self == current {
            (current, direction.toggled())
        } else {
            (self, SortDirection::Asc)
        }
    }
}
