//! [`Review`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{review, user, Review},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C, IDs> Database<Select<By<HashMap<review::Id, Review>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[review::Id]>,
{
    type Ok = HashMap<review::Id, Review>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<review::Id, Review>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[review::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let limit = i32::try_from(ids.len()).unwrap();

        const SQL: &str = "\
            SELECT id, business_id, reviewer_id, \
                   rating, comment, \
                   created_at, updated_at \
            FROM reviews \
            WHERE id IN (SELECT unnest($1::UUID[]) LIMIT $2::INT4) \
            LIMIT $2::INT4";
        Ok(self
            .query(SQL, &[&ids, &limit])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let id = row.get("id");
                (
                    id,
                    Review {
                        id,
                        business_id: row.get("business_id"),
                        reviewer_id: row.get("reviewer_id"),
                        rating: row.get("rating"),
                        comment: row.get("comment"),
                        created_at: row.get("created_at"),
                        updated_at: row.get("updated_at"),
                    },
                )
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<Review>, review::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<review::Id, Review>, [review::Id; 1]>>,
        Ok = HashMap<review::Id, Review>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Review>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Review>, review::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C> Database<Select<By<Option<Review>, (user::Id, user::Id)>>>
    for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Option<Review>, review::Id>>,
        Ok = Option<Review>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Review>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Review>, (user::Id, user::Id)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (reviewer_id, business_id) = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM reviews \
            WHERE reviewer_id = $1::UUID \
              AND business_id = $2::UUID \
            LIMIT 1";
        let Some(row) = self
            .query_opt(SQL, &[&reviewer_id, &business_id])
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        let id = row.get("id");
        self.execute(Select(By::new(id)))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Review>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Review>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(review): Insert<Review>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(review))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Review>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(review): Update<Review>,
    ) -> Result<Self::Ok, Self::Err> {
        let Review {
            id,
            business_id,
            reviewer_id,
            rating,
            comment,
            created_at,
            updated_at,
        } = review;

        const SQL: &str = "\
            INSERT INTO reviews (\
                id, business_id, reviewer_id, \
                rating, comment, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, \
                $4::INT2, $5::VARCHAR, \
                $6::TIMESTAMPTZ, $7::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET business_id = EXCLUDED.business_id, \
                reviewer_id = EXCLUDED.reviewer_id, \
                rating = EXCLUDED.rating, \
                comment = EXCLUDED.comment, \
                created_at = EXCLUDED.created_at, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &business_id,
                &reviewer_id,
                &rating,
                &comment,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Review, review::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Review, review::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: review::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO reviews_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Review, review::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Review, review::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: review::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM reviews \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<Select<By<read::review::list::Page, read::review::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::review::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::review::list::Page, read::review::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::review::list::Selector {
            arguments,
            filter: read::review::list::Filter { business, reviewer },
            sorting,
        } = by.into_inner();

        let limit = i32::try_from(arguments.limit()).unwrap() + 1;

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });
        let business_idx = business.as_ref().map(|b| {
            ps.push(b);
            ps.len()
        });
        let reviewer_idx = reviewer.as_ref().map(|r| {
            ps.push(r);
            ps.len()
        });

        let traversal = sorting.traversal(arguments.kind());
        let op = traversal.operator(arguments.kind().is_including());
        let sort_col = match sorting.by {
            read::review::list::OrderBy::UpdatedAt => "updated_at",
            read::review::list::OrderBy::Rating => "rating",
        };

        let sql = format!(
            "SELECT id \
             FROM reviews \
             WHERE true \
                   {business_filtering} \
                   {reviewer_filtering} \
                   {cursor} \
             ORDER BY {sort_col} {order}, id {order} \
             LIMIT $1::INT4",
            business_filtering =
                business_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND business_id = ${idx}::UUID"))
                }),
            reviewer_filtering =
                reviewer_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND reviewer_id = ${idx}::UUID"))
                }),
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!(
                    "AND ({sort_col}, id) {op} \
                         ((SELECT c.{sort_col} \
                           FROM reviews AS c \
                           WHERE c.id = ${idx}::UUID), \
                          ${idx}::UUID)"
                ))
            }),
            order = traversal.sql(),
        );
        let rows = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?;

        let has_more = rows.len() > arguments.limit();
        let edges = rows
            .into_iter()
            .take(arguments.limit())
            .map(|row| {
                let id = row.get("id");
                (id, id)
            })
            .collect::<Vec<_>>();

        Ok(read::review::list::Page::new(&arguments, edges, has_more))
    }
}

impl<C> Database<Select<By<read::review::list::TotalCount, ()>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::review::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::review::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM reviews";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i32>(0).into())
    }
}

impl<C> Database<Select<By<read::review::AverageRating, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::review::AverageRating;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::review::AverageRating, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COALESCE(AVG(rating), 0)::FLOAT8 \
            FROM reviews";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                read::review::AverageRating::new(
                    row.expect("always exists").get::<_, f64>(0),
                )
            })
    }
}
