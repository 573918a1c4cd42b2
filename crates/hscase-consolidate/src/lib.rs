//! hscase-consolidate
//!
//! Dual-path candidate generation and fusion: a tariff-table name
//! similarity path chained into explanatory-manual lookup, and a direct
//! keyword path over the manual itself. The two paths have complementary
//! blind spots; their scores are fused into a short ranked candidate list
//! with a per-code confidence tag.

pub mod consolidator;
pub mod manual;
pub mod tariff;

pub use consolidator::{fuse, Consolidation, DualPathConsolidator, PathAHit, PathBHit};
pub use manual::{heading_codes, Manual, ManualContent, ManualEntry};
pub use tariff::{TariffEntry, TariffHit, TariffTable};
