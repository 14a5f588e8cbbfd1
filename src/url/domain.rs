/// Derives the brand term from a host name
///
/// The brand term is the registrable-domain label, used by the anchor
/// classifier to recognize branded anchor text. A leading `www.` is
/// stripped, and short second-level labels (`co`, `com`, `org`) are treated
/// as part of a compound public suffix.
///
/// # Examples
///
/// ```
/// use sitegauge::url::brand_term;
///
/// assert_eq!(brand_term("example.com"), "example");
/// assert_eq!(brand_term("www.shop-example.co.uk"), "shop-example");
/// assert_eq!(brand_term("blog.example.com"), "example");
/// ```
pub fn brand_term(host: &str) -> String {
    let host = host.strip_prefix("www.").unwrap_or(host);
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();

    match labels.len() {
        0 => String::new(),
        1 => labels[0].to_lowercase(),
        n => {
            let second_level = labels[n - 2];
            if second_level.len() <= 3 && n >= 3 {
                labels[n - 3].to_lowercase()
            } else {
                second_level.to_lowercase()
            }
        }
    }
}

/// Checks whether a host matches a domain entry from an allow-list
///
/// A host matches the entry itself or any of its subdomains.
pub fn host_matches(host: &str, entry: &str) -> bool {
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.eq_ignore_ascii_case(entry)
        || host
            .to_lowercase()
            .ends_with(&format!(".{}", entry.to_lowercase()))
}
