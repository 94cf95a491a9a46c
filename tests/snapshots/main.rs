//! Inline snapshots of converted documents.

mod narrative;
