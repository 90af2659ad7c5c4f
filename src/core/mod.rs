// Core algorithm exports
pub mod editor;
pub mod enumerator;
pub mod matcher;
pub mod profile;
pub mod scoring;
pub mod stability;

pub use editor::{apply_edit, check_candidate, update_preference_list, EditOutcome};
pub use enumerator::{enumerate_stable_matchings, Permutations};
pub use matcher::{Evaluation, Matcher, DEFAULT_MAX_PARTICIPANTS};
pub use profile::RankTable;
pub use scoring::score;
pub use stability::{find_blocking_pair, is_stable};
