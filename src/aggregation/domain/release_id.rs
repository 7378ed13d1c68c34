/// Derives the normalized release id from a compose name
///
/// A compose name such as `RHEL-7.1-20170101.0` yields `rhel-7.1`: the
/// first hyphen-delimited token lower-cased, rejoined with the second.
/// Compose names with fewer than two tokens carry no release id.
pub fn release_id_from_compose(compose: &str) -> Option<String> {
    let mut tokens = compose.split('-');
    let product = tokens.next()?;
    let version = tokens.next()?;
    if product.is_empty() || version.is_empty() {
        return None;
    }
    Some(format!("{}-{}", product.to_lowercase(), version))
}
