use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderView};
use crate::domain::ports::OrderRepository;
use crate::schema::{orders, products};

use super::models::{NewOrderRow, OrderRow};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn order_view(row: OrderRow, product_name: String) -> Result<OrderView, DomainError> {
    Ok(OrderView {
        id: row.id,
        user_id: row.user_id,
        product_id: row.product_id,
        product_name,
        card_last_four: row.card_last_four,
        status: row.status.parse()?,
        created_at: row.created_at,
    })
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, order: NewOrder) -> Result<OrderView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let product_name: String = products::table
                .find(order.product_id)
                .select(products::name)
                .first(conn)
                .optional()?
                .ok_or(DomainError::NotFound("Product"))?;

            let row: OrderRow = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    user_id: order.user_id,
                    product_id: order.product_id,
                    card_last_four: order.card_last_four,
                    status: order.status.as_str().to_string(),
                })
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            order_view(row, product_name)
        })
    }

    fn find_for_user(&self, user_id: i32, id: i32) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let row: Option<(OrderRow, String)> = orders::table
            .inner_join(products::table)
            .filter(orders::id.eq(id))
            .filter(orders::user_id.eq(user_id))
            .select((OrderRow::as_select(), products::name))
            .first(&mut conn)
            .optional()?;

        row.map(|(order, name)| order_view(order, name)).transpose()
    }

    fn list_for_user(&self, user_id: i32) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<(OrderRow, String)> = orders::table
            .inner_join(products::table)
            .filter(orders::user_id.eq(user_id))
            .select((OrderRow::as_select(), products::name))
            .order((orders::created_at.desc(), orders::id.desc()))
            .load(&mut conn)?;

        rows.into_iter()
            .map(|(order, name)| order_view(order, name))
            .collect()
    }
}
