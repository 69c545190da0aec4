//! Table definitions
//!
//! Tables are described as plain values rather than derived from the record
//! types. The migration step renders each definition into DDL, so the
//! runtime [`User`](crate::models::user::User) type and the stored layout
//! can evolve independently.
//!
//! # Example
//!
//! ```
//! use rollcall_shared::db::schema::USERS_TABLE;
//!
//! assert_eq!(USERS_TABLE.name, "users");
//! assert!(USERS_TABLE.create_table_sql().starts_with("CREATE TABLE IF NOT EXISTS users"));
//! ```

/// Column type as understood by PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Auto-incrementing 32-bit integer
    Serial,

    /// Unbounded text
    Text,
}

impl ColumnType {
    /// SQL spelling of the type
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Serial => "SERIAL",
            ColumnType::Text => "TEXT",
        }
    }
}

/// A single column definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name
    pub name: &'static str,

    /// Column type
    pub column_type: ColumnType,

    /// Whether the column is the primary key
    pub primary_key: bool,

    /// Whether NULL is accepted
    pub nullable: bool,
}

impl ColumnDef {
    fn to_sql(self) -> String {
        let mut sql = format!("{} {}", self.name, self.column_type.as_sql());
        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
        } else if !self.nullable {
            sql.push_str(" NOT NULL");
        }
        sql
    }
}

/// A table definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name
    pub name: &'static str,

    /// Columns in declaration order
    pub columns: &'static [ColumnDef],
}

impl TableSchema {
    /// Renders an idempotent `CREATE TABLE` statement
    pub fn create_table_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|column| column.to_sql())
            .collect::<Vec<_>>()
            .join(", ");

        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, columns)
    }

    /// Column names in declaration order
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.name).collect()
    }

    /// Looks up a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.name == name)
    }
}

/// The `users` table
///
/// Both name columns are NOT NULL: a user without a first or last name is
/// never stored.
pub const USERS_TABLE: TableSchema = TableSchema {
    name: "users",
    columns: &[
        ColumnDef {
            name: "id",
            column_type: ColumnType::Serial,
            primary_key: true,
            nullable: false,
        },
        ColumnDef {
            name: "firstname",
            column_type: ColumnType::Text,
            primary_key: false,
            nullable: false,
        },
        ColumnDef {
            name: "lastname",
            column_type: ColumnType::Text,
            primary_key: false,
            nullable: false,
        },
    ],
};

/// Every table the migration step manages, in creation order
pub const ALL_TABLES: &[TableSchema] = &[USERS_TABLE];
