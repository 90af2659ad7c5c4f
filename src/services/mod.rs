// Service exports
pub mod presets;
pub mod sampler;
pub mod sessions;

pub use presets::{PresetCatalog, PresetError};
pub use sampler::{participant_names, ProfileSampler};
pub use sessions::{Session, SessionEdit, SessionError, SessionStore};
