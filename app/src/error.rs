use std::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DBError {
    #[error(transparent)]
    SQLError(#[from] sqlx::Error),
    #[error("Did not find plant: {0}")]
    PlantNotFound(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unknown actuator kind: {0}")]
    UnknownActuator(String),
}

#[derive(Debug, Error)]
pub enum ObserverError {
    #[error(transparent)]
    User(Box<dyn error::Error + Send + Sync>),
    #[error(transparent)]
    Internal(Box<dyn error::Error + Send + Sync>),
}

impl From<DBError> for ObserverError {
    fn from(err: DBError) -> Self {
        match err {
            DBError::PlantNotFound(_) => ObserverError::User(Box::from(err)),
            DBError::SQLError(_) => ObserverError::Internal(Box::from(err)),
        }
    }
}

impl From<ApiError> for ObserverError {
    fn from(err: ApiError) -> Self {
        ObserverError::User(Box::from(err))
    }
}
