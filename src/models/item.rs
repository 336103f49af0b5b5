use serde::Serialize;

use crate::params::{Fields, FromFields};

/// An item as sent in request bodies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub tax: Option<f64>,
}

impl Item {
    /// Price plus tax, when a tax is set.
    pub fn price_with_tax(&self) -> Option<f64> {
        self.tax.map(|tax| self.price + tax)
    }
}

impl FromFields for Item {
    fn from_fields(fields: &mut Fields<'_>) -> Option<Self> {
        let name = fields.string("name");
        let description = fields.optional_string("description");
        let price = fields.float("price");
        let tax = fields.optional_float("tax");
        Some(Item {
            name: name?,
            description: description?,
            price: price?,
            tax: tax?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub username: String,
    pub full_name: Option<String>,
}

impl FromFields for User {
    fn from_fields(fields: &mut Fields<'_>) -> Option<Self> {
        let username = fields.string("username");
        let full_name = fields.optional_string("full_name");
        Some(User {
            username: username?,
            full_name: full_name?,
        })
    }
}
