//! [`Command`] for updating an [`Offer`].

use common::{
    operations::{
        By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
    },
    DateTime, Price,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{
        offer::{self, detail, Detail},
        user, Offer,
    },
    infra::{database, Database},
    Service,
};

use super::{create_offer::DetailDraft, Command};

/// [`Command`] for updating an [`Offer`] and its [`Detail`]s.
///
/// Every [`None`] field of the [`Offer`] itself is left unchanged, and so are
/// the [`Detail`]s not mentioned in [`UpdateOffer::details`]. [`Detail`]s may
/// only be added or patched, never removed.
#[derive(Clone, Debug)]
pub struct UpdateOffer {
    /// ID of the [`User`] updating the [`Offer`].
    pub initiator_id: user::Id,

    /// ID of the [`Offer`] to be updated.
    pub offer_id: offer::Id,

    /// New [`offer::Title`].
    pub title: Option<offer::Title>,

    /// New [`offer::ImageUrl`].
    pub image_url: Option<offer::ImageUrl>,

    /// New [`offer::Description`].
    pub description: Option<offer::Description>,

    /// [`DetailChange`]s to apply to the [`Offer`]'s [`Detail`]s.
    pub details: Vec<DetailChange>,
}

/// Single [`Detail`] change in an [`UpdateOffer`] [`Command`].
#[derive(Clone, Debug, From)]
pub enum DetailChange {
    /// Patch of an existing [`Detail`].
    Update(DetailPatch),

    /// Addition of a new [`Detail`].
    Add(DetailDraft),
}

/// Patch of a single existing [`Detail`] in an [`UpdateOffer`] [`Command`].
///
/// Every [`None`] field is left unchanged.
#[derive(Clone, Debug)]
pub struct DetailPatch {
    /// ID of the [`Detail`] to be patched.
    pub id: detail::Id,

    /// New [`detail::Title`].
    pub title: Option<detail::Title>,

    /// New number of included [`detail::Revisions`].
    pub revisions: Option<detail::Revisions>,

    /// New [`detail::DeliveryTime`].
    pub delivery_time: Option<detail::DeliveryTime>,

    /// New [`Price`].
    ///
    /// Doesn't affect the already created [`Order`]s.
    ///
    /// [`Order`]: crate::domain::Order
    pub price: Option<Price>,

    /// New list of included [`detail::Feature`]s.
    pub features: Option<Vec<detail::Feature>>,

    /// New [`detail::Kind`].
    pub kind: Option<detail::Kind>,
}

/// Output of [`UpdateOffer`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Updated [`Offer`].
    pub offer: Offer,

    /// All the [`Detail`]s of the [`Offer`] after the update.
    pub details: Vec<Detail>,
}

impl<Db> Command<UpdateOffer> for Service<Db>
where
    Db: Database<
            Select<By<Option<Offer>, offer::Id>>,
            Ok = Option<Offer>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Offer>, offer::Id>>,
            Ok = Option<Offer>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Detail>, offer::Id>>,
            Ok = Vec<Detail>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Offer, offer::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Offer>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<Detail>, Ok = (), Err = Traced<database::Error>>
        + Database<Insert<Detail>, Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateOffer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateOffer {
            initiator_id,
            offer_id,
            title,
            image_url,
            description,
            details: changes,
        } = cmd;

        let offer = self
            .database()
            .execute(Select(By::<Option<Offer>, _>::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OfferNotExists(offer_id))
            .map_err(tracerr::wrap!())?;
        if offer.owner_id != initiator_id {
            return Err(tracerr::new!(E::NotOwner(initiator_id)));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Offer`.
        tx.execute(Lock(By::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut offer = tx
            .execute(Select(By::<Option<Offer>, _>::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OfferNotExists(offer_id))
            .map_err(tracerr::wrap!())?;
        let mut details = tx
            .execute(Select(By::<Vec<Detail>, _>::new(offer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if let Some(title) = title {
            offer.title = title;
        }
        if let Some(url) = image_url {
            offer.image_url = Some(url);
        }
        if let Some(desc) = description {
            offer.description = desc;
        }
        offer.updated_at = DateTime::now().coerce();

        for change in changes {
            match change {
                DetailChange::Update(patch) => {
                    let detail = details
                        .iter_mut()
                        .find(|d| d.id == patch.id)
                        .ok_or(E::DetailNotExists(patch.id))
                        .map_err(tracerr::wrap!())?;

                    let DetailPatch {
                        id: _,
                        title,
                        revisions,
                        delivery_time,
                        price,
                        features,
                        kind,
                    } = patch;
                    if let Some(title) = title {
                        detail.title = title;
                    }
                    if let Some(revisions) = revisions {
                        detail.revisions = revisions;
                    }
                    if let Some(time) = delivery_time {
                        detail.delivery_time = time;
                    }
                    if let Some(price) = price {
                        detail.price = price;
                    }
                    if let Some(features) = features {
                        detail.features = features;
                    }
                    if let Some(kind) = kind {
                        detail.kind = kind;
                    }

                    tx.execute(Update(detail.clone()))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))?;
                }
                DetailChange::Add(draft) => {
                    let detail = Detail {
                        id: detail::Id::new(),
                        offer_id,
                        title: draft.title,
                        revisions: draft.revisions,
                        delivery_time: draft.delivery_time,
                        price: draft.price,
                        features: draft.features,
                        kind: draft.kind,
                    };
                    tx.execute(Insert(detail.clone()))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))
                        .map(drop)?;
                    details.push(detail);
                }
            }
        }

        tx.execute(Update(offer.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Output { offer, details })
    }
}

/// Error of [`UpdateOffer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Detail`] doesn't exist in the updated [`Offer`].
    #[display("`Detail(id: {_0})` does not exist in the updated `Offer`")]
    #[from(ignore)]
    DetailNotExists(#[error(not(source))] detail::Id),

    /// [`User`] doesn't own the updated [`Offer`].
    #[display("`User(id: {_0})` doesn't own the updated `Offer`")]
    #[from(ignore)]
    NotOwner(#[error(not(source))] user::Id),

    /// [`Offer`] doesn't exist.
    #[display("`Offer(id: {_0})` does not exist")]
    #[from(ignore)]
    OfferNotExists(#[error(not(source))] offer::Id),
}
