//! Static table descriptors for the four resources. The SQL builder only ever
//! takes identifiers from here, never from request data.

#[derive(Clone, Copy, Debug)]
pub struct ColumnInfo {
    pub name: &'static str,
    /// PostgreSQL type used to cast bound parameters (e.g. `$1::numeric`).
    pub pg_type: &'static str,
    /// Generated by the database (SERIAL identifier); never written by INSERT/UPDATE.
    pub generated: bool,
    /// Excluded from default select lists and every API response.
    pub sensitive: bool,
}

impl ColumnInfo {
    const fn generated(name: &'static str) -> Self {
        ColumnInfo {
            name,
            pg_type: "int4",
            generated: true,
            sensitive: false,
        }
    }

    const fn plain(name: &'static str, pg_type: &'static str) -> Self {
        ColumnInfo {
            name,
            pg_type,
            generated: false,
            sensitive: false,
        }
    }

    const fn sensitive(name: &'static str, pg_type: &'static str) -> Self {
        ColumnInfo {
            name,
            pg_type,
            generated: false,
            sensitive: true,
        }
    }

    /// Selected as float8 so rows carry plain JSON numbers instead of numeric text.
    pub fn is_numeric(&self) -> bool {
        self.pg_type == "numeric"
    }
}

#[derive(Debug)]
pub struct EntityDef {
    pub table_name: &'static str,
    pub pk_column: &'static str,
    /// Human label used in response messages ("Product successfully deleted").
    pub label: &'static str,
    pub columns: &'static [ColumnInfo],
}

impl EntityDef {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn pk(&self) -> &ColumnInfo {
        self.columns
            .iter()
            .find(|c| c.name == self.pk_column)
            .unwrap_or(&self.columns[0])
    }

    /// Columns a client may write (everything but the generated identifier).
    pub fn writable_columns(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter().filter(|c| !c.generated)
    }
}

pub static USERS: EntityDef = EntityDef {
    table_name: "users",
    pk_column: "user_id",
    label: "User",
    columns: &[
        ColumnInfo::generated("user_id"),
        ColumnInfo::plain("email", "varchar"),
        ColumnInfo::plain("name", "varchar"),
        ColumnInfo::plain("username", "varchar"),
        ColumnInfo::sensitive("password_hash", "text"),
    ],
};

pub static PRODUCTS: EntityDef = EntityDef {
    table_name: "product",
    pk_column: "product_id",
    label: "Product",
    columns: &[
        ColumnInfo::generated("product_id"),
        ColumnInfo::plain("name", "varchar"),
        ColumnInfo::plain("description", "text"),
        ColumnInfo::plain("price", "numeric"),
    ],
};

pub static CARTS: EntityDef = EntityDef {
    table_name: "cart",
    pk_column: "cart_id",
    label: "Cart",
    columns: &[ColumnInfo::generated("cart_id")],
};

pub static ORDERS: EntityDef = EntityDef {
    table_name: "orders",
    pk_column: "order_id",
    label: "Order",
    columns: &[
        ColumnInfo::generated("order_id"),
        ColumnInfo::plain("status", "bool"),
        ColumnInfo::plain("total", "numeric"),
        ColumnInfo::plain("user_id", "int4"),
    ],
};
