//! [`Profile`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Insert, Lock, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{profile, user, Profile},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C, IDs> Database<Select<By<HashMap<user::Id, Profile>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[user::Id]>,
{
    type Ok = HashMap<user::Id, Profile>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<user::Id, Profile>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[user::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let limit = i32::try_from(ids.len()).unwrap();

        const SQL: &str = "\
            SELECT user_id, kind, \
                   first_name, last_name, \
                   avatar_url, location, tel, \
                   description, working_hours, \
                   created_at \
            FROM profiles \
            WHERE user_id IN (SELECT unnest($1::UUID[]) LIMIT $2::INT4) \
            LIMIT $2::INT4";
        Ok(self
            .query(SQL, &[&ids, &limit])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let user_id = row.get("user_id");
                (
                    user_id,
                    Profile {
                        user_id,
                        kind: row.get("kind"),
                        first_name: row.get("first_name"),
                        last_name: row.get("last_name"),
                        avatar_url: row.get("avatar_url"),
                        location: row.get("location"),
                        tel: row.get("tel"),
                        description: row.get("description"),
                        working_hours: row.get("working_hours"),
                        created_at: row.get("created_at"),
                    },
                )
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<Profile>, user::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<user::Id, Profile>, [user::Id; 1]>>,
        Ok = HashMap<user::Id, Profile>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Profile>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Profile>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id = by.into_inner();
        Ok(self
            .execute(Select(By::new([user_id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&user_id))
    }
}

impl<C> Database<Insert<Profile>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Profile>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(profile): Insert<Profile>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(profile))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Profile>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(profile): Update<Profile>,
    ) -> Result<Self::Ok, Self::Err> {
        let Profile {
            user_id,
            kind,
            first_name,
            last_name,
            avatar_url,
            location,
            tel,
            description,
            working_hours,
            created_at,
        } = profile;

        const SQL: &str = "\
            INSERT INTO profiles (\
                user_id, kind, \
                first_name, last_name, \
                avatar_url, location, tel, \
                description, working_hours, \
                created_at\
            ) \
            VALUES (\
                $1::UUID, $2::INT2, \
                $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::VARCHAR, $7::VARCHAR, \
                $8::VARCHAR, $9::VARCHAR, \
                $10::TIMESTAMPTZ\
            ) \
            ON CONFLICT (user_id) DO UPDATE \
            SET kind = EXCLUDED.kind, \
                first_name = EXCLUDED.first_name, \
                last_name = EXCLUDED.last_name, \
                avatar_url = EXCLUDED.avatar_url, \
                location = EXCLUDED.location, \
                tel = EXCLUDED.tel, \
                description = EXCLUDED.description, \
                working_hours = EXCLUDED.working_hours, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &user_id,
                &kind,
                &first_name,
                &last_name,
                &avatar_url,
                &location,
                &tel,
                &description,
                &working_hours,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Profile, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Profile, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let user_id: user::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO profiles_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (user_id) DO NOTHING";
        self.query(SQL, &[&user_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<
        Select<By<read::profile::list::Page, read::profile::list::Selector>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::profile::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::profile::list::Page, read::profile::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::profile::list::Selector {
            arguments,
            filter: read::profile::list::Filter { kind },
        } = by.into_inner();

        let limit = i32::try_from(arguments.limit()).unwrap() + 1;

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });
        let kind_idx = kind.as_ref().map(|k| {
            ps.push(k);
            ps.len()
        });

        let sql = format!(
            "SELECT user_id \
             FROM profiles \
             WHERE true \
                   {cursor} \
                   {kind_filtering} \
             ORDER BY user_id {order} \
             LIMIT $1::INT4",
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                let op = arguments.kind().operator();
                f(&format_args!("AND user_id {op} ${idx}::UUID"))
            }),
            order = arguments.kind().order().sql(),
            kind_filtering = kind_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND kind = ${idx}::INT2"))
            }),
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
                let user_id = row.get("user_id");
                (user_id, user_id)
            })
            .collect::<Vec<_>>();

        Ok(read::profile::list::Page::new(&arguments, edges, has_more))
    }
}

impl<C> Database<Select<By<read::profile::list::TotalCount, ()>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::profile::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::profile::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM profiles";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i32>(0).into())
    }
}

impl<C> Database<Select<By<read::profile::list::TotalCount, profile::Kind>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::profile::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::profile::list::TotalCount, profile::Kind>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let kind: profile::Kind = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM profiles \
            WHERE kind = $1::INT2";
        self.query_opt(SQL, &[&kind])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i32>(0).into())
    }
}
