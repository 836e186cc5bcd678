//! Reference value catalogs
//!
//! Fixed option lists offered by the drop-down pickers. Each catalog is a
//! static, immutable list; pickers refer to catalogs by [`Catalog`] instead
//! of carrying their own copies.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

const EQUIPMENT_TYPES: &[&str] = &[
    "ВЗД",
    "РУС",
    "Бурильные трубы",
    "Переводник",
    "Предохранительный переводник",
    "УБТ",
    "Телеметрия",
    "Ясс",
    "Калибратор",
    "Обратный клапан",
];

const BIT_TYPES: &[&str] = &[
    "PDC Шестилопостное",
    "PDC Пятилопостное",
    "PDC Четырехлопостное",
];

const CONNECTION_TYPES: &[&str] = &["Ниппель", "Муфта"];

const THREAD_SIZES: &[&str] = &[
    "З-76", "З-86", "З-88", "З-94", "З-101", "З-102", "З-108", "З-118", "З-121", "З-122", "З-133",
    "З-140", "З-147", "З-152", "З-161", "З-163", "З-171",
];

const CASING_STRINGS: &[&str] = &[
    "Направление",
    "Кондуктор",
    "Промежуточная колонна",
    "Эксплуатационная колонна",
    "Хвостовик",
];

/// Label written into column 0 of the first row of an assembly: the bit
pub const BIT_LABEL: &str = "Долото";

/// A named option list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Catalog {
    /// Assembly component kinds; each has its own reference CSV file
    EquipmentType,
    /// Drill bit designs
    BitType,
    /// Pin / box connection ends
    ConnectionType,
    /// Tool-joint thread sizes
    ThreadSize,
    /// Casing string kinds
    CasingString,
}

impl Catalog {
    /// All catalogs
    pub const ALL: [Catalog; 5] = [
        Catalog::EquipmentType,
        Catalog::BitType,
        Catalog::ConnectionType,
        Catalog::ThreadSize,
        Catalog::CasingString,
    ];

    /// Options in display order
    pub fn options(self) -> &'static [&'static str] {
        match self {
            Catalog::EquipmentType => EQUIPMENT_TYPES,
            Catalog::BitType => BIT_TYPES,
            Catalog::ConnectionType => CONNECTION_TYPES,
            Catalog::ThreadSize => THREAD_SIZES,
            Catalog::CasingString => CASING_STRINGS,
        }
    }

    /// The option a freshly created picker shows
    pub fn default_option(self) -> &'static str {
        self.options()[0]
    }

    /// Check whether `value` is one of the options
    pub fn contains(self, value: &str) -> bool {
        self.options().contains(&value)
    }

    /// Position of `value` in the option list
    pub fn position(self, value: &str) -> Option<usize> {
        self.options().iter().position(|&o| o == value)
    }

    /// Stable catalog name
    pub fn name(self) -> &'static str {
        match self {
            Catalog::EquipmentType => "equipment-type",
            Catalog::BitType => "bit-type",
            Catalog::ConnectionType => "connection-type",
            Catalog::ThreadSize => "thread-size",
            Catalog::CasingString => "casing-string",
        }
    }

    /// Look a catalog up by its [`Catalog::name`]
    pub fn from_name(name: &str) -> Option<Catalog> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Catalog {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnknownCatalog(s.to_string()))
    }
}
