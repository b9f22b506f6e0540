//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{command, domain, Command as _};

use crate::{api, define_error, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `User` with the provided credentials, along with their
    /// `Profile` of the provided `ProfileKind`, and authenticates them.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EMAIL_OCCUPIED` - provided `UserEmail` is occupied by another
    ///                      `User`;
    /// - `LOGIN_OCCUPIED` - provided `UserLogin` is occupied by another
    ///                      `User`;
    /// - `PASSWORDS_MISMATCH` - provided `UserPassword`s do not match.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createUser",
            email = %email,
            kind = ?kind,
            login = %login,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user(
        login: api::user::Login,
        email: api::user::Email,
        password: api::user::Password,
        repeated_password: api::user::Password,
        kind: api::profile::Kind,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let created = ctx
            .service()
            .execute(command::CreateUser {
                login: login.into(),
                email: email.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
                repeat_password: secrecy::SecretBox::init_with(move || {
                    repeated_password.into()
                }),
                kind: kind.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByUserId(created.user.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            user_id: output.user.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Creates a new `UserSession` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials do not match any `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createUserSession",
            login = %login,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user_session(
        login: api::user::Login,
        password: api::user::Password,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByCredentials {
                login: login.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            user_id: output.user.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Updates the `Profile` of the `User` with the provided ID.
    ///
    /// Only the provided fields are updated, the omitted ones stay unchanged.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EMAIL_OCCUPIED` - provided `UserEmail` is occupied by another
    ///                      `User`;
    /// - `NOT_OWNER` - the authenticated `User` is not the owner of the
    ///                 `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            avatar_url = ?avatar_url,
            description = ?description,
            email = ?email,
            first_name = ?first_name,
            gql.name = "updateProfile",
            last_name = ?last_name,
            location = ?location,
            otel.name = Self::SPAN_NAME,
            tel = ?tel,
            user_id = %user_id,
            working_hours = ?working_hours,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn update_profile(
        user_id: api::user::Id,
        email: Option<api::user::Email>,
        first_name: Option<api::profile::FirstName>,
        last_name: Option<api::profile::LastName>,
        avatar_url: Option<api::profile::FileUrl>,
        location: Option<api::profile::Location>,
        tel: Option<api::profile::Tel>,
        description: Option<api::profile::Description>,
        working_hours: Option<api::profile::WorkingHours>,
        ctx: &Context,
    ) -> Result<api::Profile, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateProfile {
                initiator_id: my_id.into(),
                user_id: user_id.into(),
                email: email.map(Into::into),
                first_name: first_name.map(Into::into),
                last_name: last_name.map(Into::into),
                avatar_url: avatar_url.map(Into::into),
                location: location.map(Into::into),
                tel: tel.map(Into::into),
                description: description.map(Into::into),
                working_hours: working_hours.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Offer` with the provided `OfferDetail`s.
    ///
    /// At least 3 `OfferDetail`s are required.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INSUFFICIENT_DETAILS` - less than 3 `OfferDetail`s are provided;
    /// - `INVALID_DELIVERY_TIME` - some delivery time is not a non-negative
    ///                             number of days;
    /// - `INVALID_REVISIONS` - some revisions number is negative;
    /// - `NOT_BUSINESS` - the authenticated `User` does not have a business
    ///                    `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            description = %description,
            details = details.len(),
            gql.name = "createOffer",
            image_url = ?image_url,
            otel.name = Self::SPAN_NAME,
            title = %title,
        ),
    )]
    pub async fn create_offer(
        title: api::offer::Title,
        description: api::offer::Description,
        image_url: Option<api::offer::ImageUrl>,
        details: Vec<api::offer::detail::Draft>,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        let details = details
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<_, _>>()
            .map_err(ctx.error())?;

        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CreateOffer {
                owner_id: my_id.into(),
                title: title.into(),
                image_url: image_url.map(Into::into),
                description: description.into(),
                details,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `Offer` with the provided ID.
    ///
    /// Only the provided fields are updated, the omitted ones stay unchanged.
    /// An `OfferDetailChange` with an ID patches the existing `OfferDetail`,
    /// while an `OfferDetailChange` without an ID adds a new one.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INCOMPLETE_DETAIL_DRAFT` - an `OfferDetailChange` without an ID
    ///                               misses some required fields;
    /// - `INVALID_DELIVERY_TIME` - some delivery time is not a non-negative
    ///                             number of days;
    /// - `INVALID_REVISIONS` - some revisions number is negative;
    /// - `NOT_OWNER` - the authenticated `User` is not the owner of the
    ///                 `Offer`;
    /// - `OFFER_DETAIL_NOT_EXISTS` - some `OfferDetailChange` points to an
    ///                               `OfferDetail` not belonging to the
    ///                               `Offer`;
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the provided ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            description = ?description,
            details = ?details.as_ref().map(Vec::len),
            gql.name = "updateOffer",
            id = %id,
            image_url = ?image_url,
            otel.name = Self::SPAN_NAME,
            title = ?title,
        ),
    )]
    pub async fn update_offer(
        id: api::offer::Id,
        title: Option<api::offer::Title>,
        description: Option<api::offer::Description>,
        image_url: Option<api::offer::ImageUrl>,
        details: Option<Vec<api::offer::detail::Change>>,
        ctx: &Context,
    ) -> Result<api::Offer, Error> {
        let details = details
            .unwrap_or_default()
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<_, _>>()
            .map_err(ctx.error())?;

        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateOffer {
                initiator_id: my_id.into(),
                offer_id: id.into(),
                title: title.map(Into::into),
                image_url: image_url.map(Into::into),
                description: description.map(Into::into),
                details,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Offer` with the provided ID, along with all of its
    /// `OfferDetail`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_OWNER` - the authenticated `User` is not the owner of the
    ///                 `Offer`;
    /// - `OFFER_NOT_EXISTS` - the `Offer` with the provided ID does not
    ///                        exist;
    /// - `ORDERS_EXIST` - the `Offer` with the provided ID has been ordered
    ///                    already.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteOffer",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_offer(
        id: api::offer::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteOffer {
                initiator_id: my_id.into(),
                offer_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Creates a new `Order` of the `OfferDetail` with the provided ID.
    ///
    /// The `Price` of the `OfferDetail` is fixed in the created `Order` at
    /// this very moment, so its further changes never affect the `Order`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_CUSTOMER` - the authenticated `User` does not have a customer
    ///                    `Profile`;
    /// - `OFFER_DETAIL_NOT_EXISTS` - the `OfferDetail` with the provided ID
    ///                               does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            detail_id = %detail_id,
            gql.name = "createOrder",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_order(
        detail_id: api::offer::detail::Id,
        ctx: &Context,
    ) -> Result<api::Order, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CreateOrder {
                customer_id: my_id.into(),
                detail_id: detail_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Moves the `Order` with the provided ID into the provided
    /// `OrderStatus`.
    ///
    /// Only the business party of the `Order` may do this, and only the
    /// `IN_PROGRESS` -> `COMPLETED` and `IN_PROGRESS` -> `CANCELLED`
    /// transitions are possible.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_BUSINESS_PARTY` - the authenticated `User` is not the business
    ///                          party of the `Order`;
    /// - `ORDER_NOT_EXISTS` - the `Order` with the provided ID does not
    ///                        exist;
    /// - `UNREACHABLE_STATUS` - the `Order` cannot move into the requested
    ///                          `OrderStatus`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateOrderStatus",
            id = %id,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn update_order_status(
        id: api::order::Id,
        status: api::order::Status,
        ctx: &Context,
    ) -> Result<api::Order, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateOrderStatus {
                initiator_id: my_id.into(),
                order_id: id.into(),
                status: status.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Order` with the provided ID.
    ///
    /// Only admin `User`s may do this, since a deleted `Order` disappears
    /// from the counts of both its parties.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the authenticated `User` is not an admin;
    /// - `ORDER_NOT_EXISTS` - the `Order` with the provided ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteOrder",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_order(
        id: api::order::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteOrder {
                initiator_id: my_id.into(),
                order_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Creates a new `Review` about the business `User` with the provided ID.
    ///
    /// Every customer `User` may review a business `User` only once.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ALREADY_REVIEWED` - the authenticated `User` has reviewed the
    ///                        business `User` already;
    /// - `INVALID_RATING` - provided rating does not fit the 1..=5 range;
    /// - `NOT_CUSTOMER` - the authenticated `User` does not have a customer
    ///                    `Profile`;
    /// - `PROFILE_NOT_EXISTS` - the `User` with the provided ID has no
    ///                          `Profile`;
    /// - `USER_NOT_BUSINESS` - the `User` with the provided ID does not have
    ///                         a business `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            business_user_id = %business_user_id,
            gql.name = "createReview",
            otel.name = Self::SPAN_NAME,
            rating = %rating,
        ),
    )]
    pub async fn create_review(
        business_user_id: api::user::Id,
        rating: i32,
        comment: api::review::Comment,
        ctx: &Context,
    ) -> Result<api::Review, Error> {
        let rating = i16::try_from(rating)
            .ok()
            .and_then(domain::review::Rating::new)
            .ok_or_else(|| api::review::RatingError::Invalid.into())
            .map_err(ctx.error())?;

        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CreateReview {
                reviewer_id: my_id.into(),
                business_id: business_user_id.into(),
                rating,
                comment: comment.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `Review` with the provided ID.
    ///
    /// Only the provided fields are updated, the omitted ones stay unchanged.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_RATING` - provided rating does not fit the 1..=5 range;
    /// - `NOT_OWNER` - the authenticated `User` is not the creator of the
    ///                 `Review`;
    /// - `REVIEW_NOT_EXISTS` - the `Review` with the provided ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateReview",
            id = %id,
            otel.name = Self::SPAN_NAME,
            rating = ?rating,
        ),
    )]
    pub async fn update_review(
        id: api::review::Id,
        rating: Option<i32>,
        comment: Option<api::review::Comment>,
        ctx: &Context,
    ) -> Result<api::Review, Error> {
        let rating = rating
            .map(|num| {
                i16::try_from(num)
                    .ok()
                    .and_then(domain::review::Rating::new)
                    .ok_or_else(|| api::review::RatingError::Invalid.into())
            })
            .transpose()
            .map_err(ctx.error())?;

        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateReview {
                initiator_id: my_id.into(),
                review_id: id.into(),
                rating,
                comment: comment.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Review` with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_OWNER` - the authenticated `User` is not the creator of the
    ///                 `Review`;
    /// - `REVIEW_NOT_EXISTS` - the `Review` with the provided ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteReview",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_review(
        id: api::review::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteReview {
                initiator_id: my_id.into(),
                review_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "EMAIL_OCCUPIED"]
                #[status = BAD_REQUEST]
                #[message = "`UserEmail` is occupied by another `User`"]
                EmailOccupied,

                #[code = "LOGIN_OCCUPIED"]
                #[status = BAD_REQUEST]
                #[message = "`UserLogin` is occupied by another `User`"]
                LoginOccupied,

                #[code = "PASSWORDS_MISMATCH"]
                #[status = BAD_REQUEST]
                #[message = "Provided `UserPassword`s do not match"]
                PasswordsMismatch,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(Error::EmailOccupied.into()),
            Self::LoginOccupied(_) => Some(Error::LoginOccupied.into()),
            Self::PasswordsMismatch => Some(Error::PasswordsMismatch.into()),
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[status = UNAUTHORIZED]
                #[message = "Provided credentials do not match any `User`"]
                WrongCredentials,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::UserNotExists(_) | Self::WrongCredentials => {
                Some(Error::WrongCredentials.into())
            }
        }
    }
}

impl AsError for command::update_profile::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "EMAIL_OCCUPIED"]
                #[status = BAD_REQUEST]
                #[message = "`UserEmail` is occupied by another `User`"]
                EmailOccupied,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::EmailOccupied(_) => Error::EmailOccupied.into(),
            Self::NotOwner(_) => api::PrivilegeError::Owner.into(),
            Self::ProfileNotExists(_) | Self::UserNotExists(_) => return None,
        })
    }
}

impl AsError for command::create_offer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INSUFFICIENT_DETAILS"]
                #[status = BAD_REQUEST]
                #[message = "`Offer` must have at least 3 `OfferDetail`s"]
                InsufficientDetails,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::InsufficientDetails(_) => Error::InsufficientDetails.into(),
            Self::ProfileNotExists(_) => return None,
            Self::UserNotBusiness(_) => api::PrivilegeError::Business.into(),
        })
    }
}

impl AsError for command::update_offer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "OFFER_DETAIL_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`OfferDetail` with the provided ID does not \
                             exist in the `Offer`"]
                DetailNotExists,

                #[code = "OFFER_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Offer` with the provided ID does not exist"]
                OfferNotExists,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::DetailNotExists(_) => Error::DetailNotExists.into(),
            Self::NotOwner(_) => api::PrivilegeError::Owner.into(),
            Self::OfferNotExists(_) => Error::OfferNotExists.into(),
        })
    }
}

impl AsError for command::delete_offer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "OFFER_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Offer` with the provided ID does not exist"]
                OfferNotExists,

                #[code = "ORDERS_EXIST"]
                #[status = CONFLICT]
                #[message = "`Offer` with the provided ID has been ordered \
                             already"]
                OrdersExist,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::NotOwner(_) => api::PrivilegeError::Owner.into(),
            Self::OfferNotExists(_) => Error::OfferNotExists.into(),
            Self::OrdersExist(_) => Error::OrdersExist.into(),
        })
    }
}

impl AsError for command::create_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "OFFER_DETAIL_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`OfferDetail` with the provided ID does not \
                             exist"]
                DetailNotExists,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::DetailNotExists(_) => Error::DetailNotExists.into(),
            Self::OfferNotExists(_) | Self::ProfileNotExists(_) => {
                return None;
            }
            Self::UserNotCustomer(_) => api::PrivilegeError::Customer.into(),
        })
    }
}

impl AsError for command::update_order_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NOT_BUSINESS_PARTY"]
                #[status = FORBIDDEN]
                #[message = "Authenticated `User` is not the business party \
                             of the `Order`"]
                NotBusinessParty,

                #[code = "ORDER_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Order` with the provided ID does not exist"]
                OrderNotExists,

                #[code = "UNREACHABLE_STATUS"]
                #[status = CONFLICT]
                #[message = "`Order` cannot move into the requested \
                             `OrderStatus`"]
                UnreachableStatus,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::NotBusinessParty(_) => Error::NotBusinessParty.into(),
            Self::OrderNotExists(_) => Error::OrderNotExists.into(),
            Self::UnreachableStatus(..) => Error::UnreachableStatus.into(),
        })
    }
}

impl AsError for command::delete_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ORDER_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Order` with the provided ID does not exist"]
                OrderNotExists,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::InitiatorNotExists(_) => return None,
            Self::NotAdmin(_) => api::PrivilegeError::Admin.into(),
            Self::OrderNotExists(_) => Error::OrderNotExists.into(),
        })
    }
}

impl AsError for command::create_review::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ALREADY_REVIEWED"]
                #[status = CONFLICT]
                #[message = "`User` with the provided ID has been reviewed \
                             already"]
                AlreadyReviewed,

                #[code = "PROFILE_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Profile` of the provided `User` does not exist"]
                ProfileNotExists,

                #[code = "USER_NOT_BUSINESS"]
                #[status = BAD_REQUEST]
                #[message = "`User` with the provided ID does not have a \
                             business `Profile`"]
                UserNotBusiness,
            }
        }

        Some(match self {
            Self::AlreadyReviewed(..) => Error::AlreadyReviewed.into(),
            Self::Db(e) => return e.try_as_error(),
            Self::ProfileNotExists(_) => Error::ProfileNotExists.into(),
            Self::ReviewerNotCustomer(_) => {
                api::PrivilegeError::Customer.into()
            }
            Self::UserNotBusiness(_) => Error::UserNotBusiness.into(),
        })
    }
}

impl AsError for command::update_review::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "REVIEW_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Review` with the provided ID does not exist"]
                ReviewNotExists,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::NotReviewer(_) => api::PrivilegeError::Owner.into(),
            Self::ReviewNotExists(_) => Error::ReviewNotExists.into(),
        })
    }
}

impl AsError for command::delete_review::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "REVIEW_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Review` with the provided ID does not exist"]
                ReviewNotExists,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::NotReviewer(_) => api::PrivilegeError::Owner.into(),
            Self::ReviewNotExists(_) => Error::ReviewNotExists.into(),
        })
    }
}
