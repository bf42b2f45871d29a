use mc_bridge_entity::EntityError;
use mc_bridge_proto::error::ProtoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid replay file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid entity kind {identifier}: width and height must be positive")]
    InvalidKind { identifier: String },

    #[error("raw metadata is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("malformed metadata list: {0}")]
    Metadata(#[from] ProtoError),

    #[error(transparent)]
    Entity(#[from] EntityError),
}
