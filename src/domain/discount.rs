// src/domain/discount.rs
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::domain::ids::DiscountId;
use crate::mapping::{codec, Column, Entity, EntityId, EntityMeta, SqlValue};

/// A one-day price reduction. `ratio` is the fraction taken off the
/// booking total, in [0, 1]; bounds are the caller's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discount {
    pub id: DiscountId,
    pub date: NaiveDate,
    pub ratio: f64,
}

static META: Lazy<EntityMeta> = Lazy::new(|| {
    const COLUMNS: &[Column] = &[
        Column::new("date", "date"),
        Column::new("ratio", "ratio"),
    ];
    EntityMeta::new("Discount", "discount", Column::new("id", "id"), COLUMNS)
        .expect("discount descriptor")
});

impl Discount {
    pub fn new(date: NaiveDate, ratio: f64) -> Self {
        Self {
            id: DiscountId::UNSET,
            date,
            ratio,
        }
    }
}

impl Entity for Discount {
    type Id = DiscountId;

    fn meta() -> &'static EntityMeta {
        &META
    }

    fn id(&self) -> DiscountId {
        self.id
    }

    fn set_id(&mut self, id: DiscountId) {
        self.id = id;
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: codec::decode_date(row, 1)?,
            ratio: row.get(2)?,
        })
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.date.into(), self.ratio.into()]
    }
}
