//! [`Command`] for updating a [`Profile`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{profile, user, Profile, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Profile`].
///
/// Every [`None`] field is left unchanged. The [`profile::Kind`] is immutable
/// and cannot be updated at all. A new [`user::Email`] lands on the [`User`]
/// record itself.
#[derive(Clone, Debug)]
pub struct UpdateProfile {
    /// ID of the [`User`] updating the [`Profile`].
    pub initiator_id: user::Id,

    /// ID of the [`User`] whose [`Profile`] should be updated.
    pub user_id: user::Id,

    /// New [`user::Email`] of the account.
    pub email: Option<user::Email>,

    /// New [`profile::FirstName`].
    pub first_name: Option<profile::FirstName>,

    /// New [`profile::LastName`].
    pub last_name: Option<profile::LastName>,

    /// New avatar [`profile::FileUrl`].
    pub avatar_url: Option<profile::FileUrl>,

    /// New [`profile::Location`].
    pub location: Option<profile::Location>,

    /// New [`profile::Tel`].
    pub tel: Option<profile::Tel>,

    /// New [`profile::Description`].
    pub description: Option<profile::Description>,

    /// New [`profile::WorkingHours`].
    pub working_hours: Option<profile::WorkingHours>,
}

impl<Db> Command<UpdateProfile> for Service<Db>
where
    Db: for<'e> Database<
            Select<By<Option<User>, &'e user::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Profile>, user::Id>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Profile, user::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<User, user::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Profile>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<User>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Profile;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateProfile) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProfile {
            initiator_id,
            user_id,
            email,
            first_name,
            last_name,
            avatar_url,
            location,
            tel,
            description,
            working_hours,
        } = cmd;

        if initiator_id != user_id {
            return Err(tracerr::new!(E::NotOwner(initiator_id)));
        }

        if let Some(address) = &email {
            let u = self
                .database()
                .execute(Select(By::new(address)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if u.is_some_and(|u| u.id != user_id) {
                return Err(tracerr::new!(E::EmailOccupied(address.clone())));
            }
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Profile`.
        tx.execute(Lock(By::<Profile, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut profile = tx
            .execute(Select(By::<Option<Profile>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ProfileNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        if let Some(address) = email {
            tx.execute(Lock(By::<User, _>::new(user_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;

            let mut user = tx
                .execute(Select(By::<Option<User>, _>::new(user_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::UserNotExists(user_id))
                .map_err(tracerr::wrap!())?;

            user.email = address;

            tx.execute(Update(user))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }

        if let Some(name) = first_name {
            profile.first_name = Some(name);
        }
        if let Some(name) = last_name {
            profile.last_name = Some(name);
        }
        if let Some(url) = avatar_url {
            profile.avatar_url = Some(url);
        }
        if let Some(loc) = location {
            profile.location = Some(loc);
        }
        if let Some(num) = tel {
            profile.tel = Some(num);
        }
        if let Some(desc) = description {
            profile.description = Some(desc);
        }
        if let Some(hours) = working_hours {
            profile.working_hours = Some(hours);
        }

        tx.execute(Update(profile.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(profile)
    }
}

/// Error of [`UpdateProfile`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`user::Email`] is already occupied.
    #[display("`{_0}` email is occupied")]
    #[from(ignore)]
    EmailOccupied(#[error(not(source))] user::Email),

    /// [`User`] doesn't own the [`Profile`] being updated.
    #[display("`User(id: {_0})` doesn't own the updated `Profile`")]
    #[from(ignore)]
    NotOwner(#[error(not(source))] user::Id),

    /// [`Profile`] doesn't exist.
    #[display("`Profile(user_id: {_0})` does not exist")]
    #[from(ignore)]
    ProfileNotExists(#[error(not(source))] user::Id),

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
