//! [`Command`] for creating a new [`Offer`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime, Price,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{
        offer::{self, detail, Detail},
        profile, user, Offer, Profile,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Offer`] along with its [`Detail`]s.
#[derive(Clone, Debug)]
pub struct CreateOffer {
    /// ID of the business [`User`] creating the [`Offer`].
    pub owner_id: user::Id,

    /// [`offer::Title`] of the new [`Offer`].
    pub title: offer::Title,

    /// [`offer::ImageUrl`] of the new [`Offer`], if any.
    pub image_url: Option<offer::ImageUrl>,

    /// [`offer::Description`] of the new [`Offer`].
    pub description: offer::Description,

    /// [`DetailDraft`]s to create the [`Offer`]'s [`Detail`]s from.
    ///
    /// At least [`Offer::MIN_DETAILS`] are required.
    pub details: Vec<DetailDraft>,
}

/// Blueprint of a single [`Detail`] in a [`CreateOffer`] [`Command`].
#[derive(Clone, Debug)]
pub struct DetailDraft {
    /// [`detail::Title`] of the [`Detail`].
    pub title: detail::Title,

    /// Number of [`detail::Revisions`] included into the [`Detail`].
    pub revisions: detail::Revisions,

    /// [`detail::DeliveryTime`] promised by the [`Detail`].
    pub delivery_time: detail::DeliveryTime,

    /// [`Price`] of the [`Detail`].
    pub price: Price,

    /// [`detail::Feature`]s included into the [`Detail`].
    pub features: Vec<detail::Feature>,

    /// [`detail::Kind`] of the [`Detail`].
    pub kind: detail::Kind,
}

/// Output of [`CreateOffer`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Created [`Offer`].
    pub offer: Offer,

    /// Created [`Detail`]s of the [`Offer`].
    pub details: Vec<Detail>,
}

impl<Db> Command<CreateOffer> for Service<Db>
where
    Db: Database<
            Select<By<Option<Profile>, user::Id>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Offer>, Err = Traced<database::Error>>
        + Database<Insert<Detail>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateOffer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateOffer {
            owner_id,
            title,
            image_url,
            description,
            details,
        } = cmd;

        let kind = self
            .database()
            .execute(Select(By::<Option<Profile>, _>::new(owner_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ProfileNotExists(owner_id))
            .map_err(tracerr::wrap!())?
            .kind;
        if kind != profile::Kind::Business {
            return Err(tracerr::new!(E::UserNotBusiness(owner_id)));
        }

        if details.len() < Offer::MIN_DETAILS {
            return Err(tracerr::new!(E::InsufficientDetails(details.len())));
        }

        let now = DateTime::now();
        let offer = Offer {
            id: offer::Id::new(),
            owner_id,
            title,
            image_url,
            description,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };
        let details = details
            .into_iter()
            .map(|d| Detail {
                id: detail::Id::new(),
                offer_id: offer.id,
                title: d.title,
                revisions: d.revisions,
                delivery_time: d.delivery_time,
                price: d.price,
                features: d.features,
                kind: d.kind,
            })
            .collect::<Vec<_>>();

        // An `Offer` and its `Detail`s must appear together.
        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(offer.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        for d in &details {
            tx.execute(Insert(d.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(Output { offer, details })
    }
}

/// Error of [`CreateOffer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Not enough [`DetailDraft`]s provided.
    #[display("`Offer` must be created with at least 3 `Detail`s, got {_0}")]
    InsufficientDetails(#[error(not(source))] usize),

    /// [`Profile`] of the [`User`] doesn't exist.
    #[display("`Profile(user_id: {_0})` does not exist")]
    #[from(ignore)]
    ProfileNotExists(#[error(not(source))] user::Id),

    /// [`User`] is not a business one.
    #[display("`User(id: {_0})` is not a business `User`")]
    #[from(ignore)]
    UserNotBusiness(#[error(not(source))] user::Id),
}
