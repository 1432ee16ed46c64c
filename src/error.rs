use thiserror::Error;

use crate::shared::FishingPhase;

#[derive(Debug, Error)]
pub enum FishingError {
    #[error("phase {0:?} is not registered in the fishing state machine")]
    UnregisteredPhase(FishingPhase),

    #[error("phase {0:?} is already registered in the fishing state machine")]
    DuplicatePhase(FishingPhase),

    #[error("already in the first phase, cannot go to the previous one")]
    AtFirstPhase,

    #[error("already in the last phase, cannot go to the next one")]
    AtLastPhase,

    #[error("state machine is missing phases: {0:?}")]
    IncompleteRegistry(Vec<FishingPhase>),

    #[error("unknown fish '{0}'")]
    UnknownFish(String),

    #[error("unknown rod '{0}'")]
    UnknownRod(String),

    #[error("invalid zone layout: {0}")]
    InvalidZones(String),

    #[error("could not read config {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),
}

pub type FishingResult<T> = Result<T, FishingError>;
