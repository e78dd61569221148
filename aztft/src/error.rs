use aztft_core::armid::ArmIdError;

use crate::client::ClientError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Id(#[from] ArmIdError),

    #[error("unknown resource type {0:?}")]
    UnknownResourceType(String),

    #[error("id {id:?} doesn't correspond to resource type {resource_type:?}")]
    ScopeMismatch { id: String, resource_type: String },

    #[error("normalizing id {id:?} for {resource_type:?} with import spec {spec:?}: {source}")]
    Normalize {
        id:            String,
        resource_type: String,
        spec:          String,
        #[source]
        source:        ArmIdError,
    },

    #[error("{id}: unexpected nil {field} in response")]
    MissingField { id: String, field: String },

    #[error("{id}: unknown {field} {value:?}")]
    UnknownDiscriminator { id: String, field: String, value: String },

    #[error("{id}: {reason}")]
    UnexpectedShape { id: String, reason: String },

    #[error("{id}: no {target} association found in the live configuration")]
    AssociationNotFound { id: String, target: String },

    #[error("retrieving {id:?}: {source}")]
    Retrieval {
        id:     String,
        #[source]
        source: ClientError,
    },

    #[error("no dynamic builder for resource type {0:?}")]
    NoDynamicBuilder(String),

    #[error("no type resolver for {0:?}")]
    NoResolver(String),

    #[error("{0} can only be resolved with API access")]
    ApiRequired(String),

    #[error("no resource type corresponds to {0:?}")]
    NoCandidate(String),

    #[error("invalid catalog: {0}")]
    Catalog(String),

    #[error(transparent)]
    Client(ClientError),

    #[error("configuration: {0}")]
    Config(String),
}

/// Coarse classification of an [`Error`], for callers deciding what to do with a failed id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A malformed resource id, either the input or one referenced from live state.
    Parse,
    /// Unknown type, or an id that fits none of the type's import specs.
    Catalog,
    /// Live state is missing an expected field or carries an unrecognized value.
    Data,
    /// The management API call itself failed.
    Retrieval,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Id(ArmIdError::Parse { .. }) => ErrorKind::Parse,
            Error::Id(ArmIdError::SpecMismatch { .. }) => ErrorKind::Catalog,
            Error::UnknownResourceType(_)
            | Error::ScopeMismatch { .. }
            | Error::Normalize { .. }
            | Error::NoDynamicBuilder(_)
            | Error::NoResolver(_)
            | Error::ApiRequired(_)
            | Error::NoCandidate(_)
            | Error::Catalog(_) => ErrorKind::Catalog,
            Error::MissingField { .. }
            | Error::UnknownDiscriminator { .. }
            | Error::UnexpectedShape { .. }
            | Error::AssociationNotFound { .. } => ErrorKind::Data,
            Error::Retrieval { .. } | Error::Client(_) => ErrorKind::Retrieval,
            Error::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn missing(id: impl ToString, field: &str) -> Error {
        Error::MissingField {
            id:    id.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn retrieval(id: impl ToString) -> impl FnOnce(ClientError) -> Error {
        let id = id.to_string();
        move |source| Error::Retrieval { id, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let parse = Error::from(aztft_core::armid::ResourceId::parse("nope").unwrap_err());
        assert_eq!(parse.kind(), ErrorKind::Parse);
        assert_eq!(Error::UnknownResourceType("x".into()).kind(), ErrorKind::Catalog);
        assert_eq!(Error::missing("/subscriptions/s", "properties").kind(), ErrorKind::Data);
        assert_eq!(
            Error::retrieval("/subscriptions/s")(ClientError::NotFound("gone".into())).kind(),
            ErrorKind::Retrieval
        );
    }

    #[test]
    fn test_messages_carry_the_id() {
        let err = Error::missing("/subscriptions/s1/resourceGroups/rg1", "properties.osProfile");
        assert_eq!(
            err.to_string(),
            "/subscriptions/s1/resourceGroups/rg1: unexpected nil properties.osProfile in response"
        );
    }
}
