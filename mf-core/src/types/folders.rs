use once_cell::sync::Lazy;

use std::collections::HashMap;

/// Folder bucket for messages whose year has no explicit assignment.
pub const DEFAULT_FOLDER: i64 = 2;

/// The fixed year to folder id assignment. The folder ids reference the
/// `folders` table which is maintained elsewhere.
static YEAR_FOLDERS: Lazy<HashMap<i32, i64>> = Lazy::new(|| {
    HashMap::from([
        (2010, 11),
        (2016, 12),
        (2018, 13),
        (2019, 14),
        (2020, 15),
        (2021, 16),
        (2022, 19),
        (2023, 20),
        (2039, 21),
        (2041, 22),
        (2056, 23),
        (2057, 24),
    ])
});

pub fn folder_for_year(year: i32) -> i64 {
    YEAR_FOLDERS.get(&year).copied().unwrap_or(DEFAULT_FOLDER)
}
