//! # Filter Engine and Sort/Paginate Stage
//!
//! A single pass over the in-memory collection applying the caller's
//! [`FilterSpec`] as a conjunction of independent predicates, followed by
//! a stable comparator sort and an offset/limit slice.
//!
//! Filtering rules worth calling out:
//!
//! - Inactive records never survive, even with an empty spec.
//! - Within a field the requested values are OR'd; across fields the
//!   predicates are AND'd.
//! - All label comparisons are case-insensitive; stored casing is kept.
//! - A domain rating of zero means "unknown" and is exempt from both
//!   rating bounds — it neither satisfies nor violates them.
//!
//! Sorting is performed locally and deterministically regardless of the
//! order the remote returned: the cache can serve snapshots saved under a
//! different sort, and offline output must not depend on server ordering.
//! Ties keep the original collection order (stable sort).

use crate::model::{Directory, FilterSpec, SortKey};

/// Apply the spec's predicates, preserving relative order of survivors.
pub fn apply(records: &[Directory], spec: &FilterSpec) -> Vec<Directory> {
    records
        .iter()
        .filter(|dir| matches(dir, spec))
        .cloned()
        .collect()
}

fn matches(dir: &Directory, spec: &FilterSpec) -> bool {
    if !dir.is_active {
        return false;
    }

    if let Some(query) = spec.query.as_deref() {
        if !query.is_empty() {
            let query = query.to_lowercase();
            let name = dir.name.to_lowercase();
            let description = dir.description.to_lowercase();
            if !name.contains(&query) && !description.contains(&query) {
                return false;
            }
        }
    }

    if !spec.categories.is_empty() {
        let hit = spec.categories.iter().any(|wanted| {
            dir.categories
                .iter()
                .any(|have| have.eq_ignore_ascii_case(wanted))
        });
        if !hit {
            return false;
        }
    }

    if !spec.pricing.is_empty()
        && !spec
            .pricing
            .iter()
            .any(|p| p.eq_ignore_ascii_case(&dir.pricing))
    {
        return false;
    }

    if !spec.link_types.is_empty()
        && !spec
            .link_types
            .iter()
            .any(|lt| lt.eq_ignore_ascii_case(&dir.link_type))
    {
        return false;
    }

    // Unknown ratings are exempt from both bounds.
    if dir.domain_rating > 0 {
        if let Some(min) = spec.dr_min {
            if dir.domain_rating < min {
                return false;
            }
        }
        if let Some(max) = spec.dr_max {
            if dir.domain_rating > max {
                return false;
            }
        }
    }

    true
}

/// Stable in-place sort by the given key. Equal keys keep their relative
/// order, so repeated runs over the same input are byte-identical.
pub fn sort_records(records: &mut [Directory], key: SortKey) {
    match key {
        SortKey::Helpful => records.sort_by(|a, b| b.helpful_count.cmp(&a.helpful_count)),
        SortKey::Rating => records.sort_by(|a, b| b.domain_rating.cmp(&a.domain_rating)),
        SortKey::Newest => records.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Alpha => {
            records.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
    }
}

/// Slice out one page. A non-positive limit returns everything; an offset
/// past the end returns an empty page.
pub fn paginate(records: Vec<Directory>, limit: usize, offset: usize) -> Vec<Directory> {
    if limit == 0 {
        return records;
    }
    if offset >= records.len() {
        return Vec::new();
    }
    let end = (offset + limit).min(records.len());
    records[offset..end].to_vec()
}

/// The full pipeline: filter, sort, paginate.
pub fn filter_and_page(records: &[Directory], spec: &FilterSpec) -> Vec<Directory> {
    let mut filtered = apply(records, spec);
    sort_records(&mut filtered, spec.sort);
    paginate(filtered, spec.limit, spec.offset)
}
