//! Slug derivation for catalog records.
//!
//! Every record with a unique key derives it from its identifying fields with
//! [`slugify`]. Slugs are recomputed unconditionally on every save, so callers
//! must not assume stability if the inputs change after creation.

/// Normalize text into a lower-case, URL-safe key.
///
/// Each maximal run of non-alphanumeric characters collapses to a single `_`
/// separator; leading and trailing separators are trimmed.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_sep = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_sep = true;
        }
    }

    slug
}

/// Slug for a management unit: lake abbreviation, unit-type abbreviation and
/// label joined with underscores, then slugified.
pub fn unit_slug(lake_abbrev: &str, mu_type_abbrev: &str, label: &str) -> String {
    slugify(&format!("{}_{}_{}", lake_abbrev, mu_type_abbrev, label))
}

/// Slug for an FN011 project: the project code, slugified.
pub fn project_slug(prj_cd: &str) -> String {
    slugify(prj_cd)
}

/// Slug for an FN121 sample: the fishnet key `{prj_cd}-{sam}`, slugified.
pub fn sample_slug(prj_cd: &str, sam: &str) -> String {
    slugify(&format!("{}-{}", prj_cd, sam))
}
