//! [`Offer`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{
        offer::{self, detail, Detail},
        Offer,
    },
    infra::{
        database::{
            self,
            postgres::{Connection, FuzzPattern},
            Postgres,
        },
        Database,
    },
    read,
};

impl<C, IDs> Database<Select<By<HashMap<offer::Id, Offer>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[offer::Id]>,
{
    type Ok = HashMap<offer::Id, Offer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<offer::Id, Offer>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[offer::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let limit = i32::try_from(ids.len()).unwrap();

        const SQL: &str = "\
            SELECT id, owner_id, \
                   title, image_url, description, \
                   created_at, updated_at \
            FROM offers \
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
                    Offer {
                        id,
                        owner_id: row.get("owner_id"),
                        title: row.get("title"),
                        image_url: row.get("image_url"),
                        description: row.get("description"),
                        created_at: row.get("created_at"),
                        updated_at: row.get("updated_at"),
                    },
                )
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<Offer>, offer::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<offer::Id, Offer>, [offer::Id; 1]>>,
        Ok = HashMap<offer::Id, Offer>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Offer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Offer>, offer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C> Database<Insert<Offer>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Offer>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(offer): Insert<Offer>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(offer)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Offer>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(offer): Update<Offer>,
    ) -> Result<Self::Ok, Self::Err> {
        let Offer {
            id,
            owner_id,
            title,
            image_url,
            description,
            created_at,
            updated_at,
        } = offer;

        const SQL: &str = "\
            INSERT INTO offers (\
                id, owner_id, \
                title, image_url, description, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, \
                $3::VARCHAR, $4::VARCHAR, $5::VARCHAR, \
                $6::TIMESTAMPTZ, $7::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET owner_id = EXCLUDED.owner_id, \
                title = EXCLUDED.title, \
                image_url = EXCLUDED.image_url, \
                description = EXCLUDED.description, \
                created_at = EXCLUDED.created_at, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &owner_id,
                &title,
                &image_url,
                &description,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Offer, offer::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Offer, offer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: offer::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO offers_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Offer, offer::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Offer, offer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: offer::Id = by.into_inner();

        // `offer_details` rows are removed by the `ON DELETE CASCADE`.
        const SQL: &str = "\
            DELETE FROM offers \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Vec<Detail>, offer::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Detail>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Detail>, offer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let offer_id: offer::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, offer_id, \
                   title, revisions, delivery_time, \
                   price, features, kind \
            FROM offer_details \
            WHERE offer_id = $1::UUID \
            ORDER BY kind ASC, price ASC, id ASC";
        Ok(self
            .query(SQL, &[&offer_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Detail {
                id: row.get("id"),
                offer_id: row.get("offer_id"),
                title: row.get("title"),
                revisions: row.get("revisions"),
                delivery_time: row.get("delivery_time"),
                price: row.get("price"),
                features: row.get("features"),
                kind: row.get("kind"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<Detail>, detail::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Detail>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Detail>, detail::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: detail::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, offer_id, \
                   title, revisions, delivery_time, \
                   price, features, kind \
            FROM offer_details \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Detail {
                id: row.get("id"),
                offer_id: row.get("offer_id"),
                title: row.get("title"),
                revisions: row.get("revisions"),
                delivery_time: row.get("delivery_time"),
                price: row.get("price"),
                features: row.get("features"),
                kind: row.get("kind"),
            }))
    }
}

impl<C> Database<Insert<Detail>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Detail>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(detail): Insert<Detail>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(detail))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Detail>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(detail): Update<Detail>,
    ) -> Result<Self::Ok, Self::Err> {
        let Detail {
            id,
            offer_id,
            title,
            revisions,
            delivery_time,
            price,
            features,
            kind,
        } = detail;

        const SQL: &str = "\
            INSERT INTO offer_details (\
                id, offer_id, \
                title, revisions, delivery_time, \
                price, features, kind\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, \
                $3::VARCHAR, $4::INT4, $5::INT4, \
                $6::NUMERIC, $7::VARCHAR[], $8::INT2\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET offer_id = EXCLUDED.offer_id, \
                title = EXCLUDED.title, \
                revisions = EXCLUDED.revisions, \
                delivery_time = EXCLUDED.delivery_time, \
                price = EXCLUDED.price, \
                features = EXCLUDED.features, \
                kind = EXCLUDED.kind";
        self.exec(
            SQL,
            &[
                &id,
                &offer_id,
                &title,
                &revisions,
                &delivery_time,
                &price,
                &features,
                &kind,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Detail, detail::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Detail, detail::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: detail::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO offer_details_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<Select<By<read::offer::list::Page, read::offer::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::offer::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::offer::list::Page, read::offer::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::offer::list::Selector {
            arguments,
            filter:
                read::offer::list::Filter {
                    owner,
                    min_price,
                    max_delivery_time,
                    search,
                },
            sorting,
        } = by.into_inner();

        let limit = i32::try_from(arguments.limit()).unwrap() + 1;

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });
        let owner_idx = owner.as_ref().map(|o| {
            ps.push(o);
            ps.len()
        });
        let min_price_idx = min_price.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });
        let max_delivery_time_idx = max_delivery_time.as_ref().map(|t| {
            ps.push(t);
            ps.len()
        });

        let search_pattern =
            search.as_ref().map(|s| FuzzPattern::new(s.as_ref()));
        let search_idx = search_pattern.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });

        let traversal = sorting.traversal(arguments.kind());
        let op = traversal.operator(arguments.kind().is_including());
        let sort_col = match sorting.by {
            read::offer::list::OrderBy::UpdatedAt => "updated_at",
            read::offer::list::OrderBy::MinPrice => "min_price",
        };

        let sql = format!(
            "SELECT id \
             FROM (\
                 SELECT o.id AS id, \
                        o.updated_at AS updated_at, \
                        MIN(d.price) AS min_price, \
                        MIN(d.delivery_time) AS min_delivery_time \
                 FROM offers AS o \
                 LEFT JOIN offer_details AS d ON d.offer_id = o.id \
                 WHERE true \
                       {owner_filtering} \
                       {search_filtering} \
                 GROUP BY o.id\
             ) AS o \
             WHERE true \
                   {min_price_filtering} \
                   {max_delivery_time_filtering} \
                   {cursor} \
             ORDER BY {sort_col} {order}, id {order} \
             LIMIT $1::INT4",
            owner_filtering =
                owner_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND o.owner_id = ${idx}::UUID"))
                }),
            search_filtering =
                search_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!(
                        "AND (LOWER(o.title) \
                              SIMILAR TO LOWER(${idx}::VARCHAR) \
                          OR LOWER(o.description) \
                              SIMILAR TO LOWER(${idx}::VARCHAR))"
                    ))
                }),
            min_price_filtering =
                min_price_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND min_price >= ${idx}::NUMERIC"))
                }),
            max_delivery_time_filtering = max_delivery_time_idx
                .into_iter()
                .format_with("", |idx, f| {
                    f(&format_args!(
                        "AND min_delivery_time <= ${idx}::INT4"
                    ))
                }),
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                match sorting.by {
                    read::offer::list::OrderBy::UpdatedAt => f(&format_args!(
                        "AND (updated_at, id) {op} \
                             ((SELECT updated_at \
                               FROM offers \
                               WHERE id = ${idx}::UUID), \
                              ${idx}::UUID)"
                    )),
                    read::offer::list::OrderBy::MinPrice => f(&format_args!(
                        "AND (min_price, id) {op} \
                             ((SELECT MIN(price) \
                               FROM offer_details \
                               WHERE offer_id = ${idx}::UUID), \
                              ${idx}::UUID)"
                    )),
                }
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

        Ok(read::offer::list::Page::new(&arguments, edges, has_more))
    }
}

impl<C> Database<Select<By<read::offer::list::TotalCount, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::offer::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::offer::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM offers";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i32>(0).into())
    }
}
