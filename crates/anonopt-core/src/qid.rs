/// Normalize a quasi-identifier name for workload lookup.
///
/// Hyphens become underscores and the result is uppercased, so `zip-code`,
/// `Zip_Code` and `ZIP_CODE` all name the same attribute.
pub fn normalize_qid(name: &str) -> String {
    name.replace('-', "_").to_uppercase()
}
