//! Entity state translation: Java entity metadata in, Bedrock actor packets out.
//!
//! Each session owns one [`EntityCache`]. Inbound updates are routed to the
//! tracked entity for their Java id; every outgoing packet goes through the
//! [`Session`] handle passed into the call.

pub mod armor_stand;
pub mod cache;
pub mod chat;
pub mod entity;
pub mod error;
pub mod metadata;
pub mod pose;
pub mod registry;
pub mod session;

pub use armor_stand::{ArmorStand, StandRole};
pub use cache::{EntityCache, TrackedEntity};
pub use entity::{EntityBase, Equipment, EquipmentSlot, Facing, Invisibility, LifeState};
pub use error::EntityError;
pub use metadata::{EntityDataKey, EntityFlag, EntityFlags, EntityMetadataStore};
pub use pose::{ArmorStandPose, BedrockArmorStandPose, Joint};
pub use registry::{EntityBehavior, EntityDefinition, EntityKindRegistry};
pub use session::{EntityIdAllocator, RecordingSession, Session};
