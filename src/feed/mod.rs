pub mod partition;
pub mod overflow;

pub use partition::{claim_ids, dedup_by_id, exclude_claimed, ClaimSet};
pub use overflow::{backfill_other, split_at_limit, Split};
