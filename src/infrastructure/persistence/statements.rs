//! SQL text for the link table and the id function.
//!
//! Statements are rendered once at startup from validated identifiers. Every
//! value coming from a request is bound through a `?` placeholder.

use crate::domain::entities::MAX_URL_LENGTH;
use crate::utils::sql_identifier::{InvalidIdentifier, validate_identifier};

pub const DEFAULT_TABLE_NAME: &str = "test";
pub const DEFAULT_FUNCTION_NAME: &str = "uuid_v4";

/// Validated names of the schema objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNames {
    table: String,
    function: String,
}

impl SchemaNames {
    /// # Errors
    ///
    /// Returns [`InvalidIdentifier`] if either name is not a plain identifier.
    pub fn new(table: &str, function: &str) -> Result<Self, InvalidIdentifier> {
        validate_identifier("table", table)?;
        validate_identifier("function", function)?;
        Ok(Self {
            table: table.to_string(),
            function: function.to_string(),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn function(&self) -> &str {
        &self.function
    }
}

impl Default for SchemaNames {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE_NAME.to_string(),
            function: DEFAULT_FUNCTION_NAME.to_string(),
        }
    }
}

/// Pre-rendered statements used by the MariaDB repositories.
#[derive(Debug, Clone)]
pub struct Statements {
    pub names: SchemaNames,
    pub table_exists: String,
    pub function_exists: String,
    pub create_table: String,
    pub create_function: String,
    pub select_all: String,
    pub select_by_id: String,
    pub insert: String,
    pub update: String,
    pub delete: String,
}

impl Statements {
    pub fn new(names: &SchemaNames) -> Self {
        let table = names.table();
        let function = names.function();

        Self {
            names: names.clone(),
            table_exists: "SELECT COUNT(*) FROM information_schema.tables \
                 WHERE table_schema = DATABASE() AND table_name = ?"
                .to_string(),
            function_exists: "SELECT COUNT(*) FROM information_schema.routines \
                 WHERE routine_schema = DATABASE() AND routine_type = 'FUNCTION' \
                 AND routine_name = ?"
                .to_string(),
            create_table: format!(
                "CREATE TABLE IF NOT EXISTS `{table}` (\
                 id CHAR(32) NOT NULL, \
                 url VARCHAR({MAX_URL_LENGTH}) NOT NULL, \
                 new_win BOOLEAN NOT NULL, \
                 PRIMARY KEY (id)\
                 ) ENGINE = InnoDB"
            ),
            // 8-4-4-4-12 hex groups without dashes; version nibble fixed to 4,
            // variant nibble drawn from 8..b.
            create_function: format!(
                "CREATE FUNCTION IF NOT EXISTS `{function}`() RETURNS CHAR(32) NOT DETERMINISTIC NO SQL \
                 RETURN LOWER(CONCAT(\
                 HEX(RANDOM_BYTES(4)), \
                 HEX(RANDOM_BYTES(2)), \
                 '4', SUBSTR(HEX(RANDOM_BYTES(2)), 2, 3), \
                 HEX(FLOOR(ASCII(RANDOM_BYTES(1)) / 64) + 8), SUBSTR(HEX(RANDOM_BYTES(2)), 2, 3), \
                 HEX(RANDOM_BYTES(6))))"
            ),
            select_all: format!("SELECT id, url, new_win FROM `{table}`"),
            select_by_id: format!("SELECT id, url, new_win FROM `{table}` WHERE id = ?"),
            insert: format!(
                "INSERT INTO `{table}` (id, url, new_win) VALUES (`{function}`(), ?, ?)"
            ),
            update: format!("UPDATE `{table}` SET url = ?, new_win = ? WHERE id = ?"),
            delete: format!("DELETE FROM `{table}` WHERE id = ?"),
        }
    }
}

impl Default for Statements {
    fn default() -> Self {
        Self::new(&SchemaNames::default())
    }
}
