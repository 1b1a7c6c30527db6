//! Utility functions

/// Masks the local part of an email for log output.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let keep: String = local.chars().take(if local.chars().count() <= 2 { 1 } else { 2 }).collect();
            format!("{}***@{}", keep, domain)
        }
        None => "***".to_string(),
    }
}

/// Trims and lower-cases a slug the way storefront URLs expect it.
pub fn normalize_slug(slug: &str) -> String {
    slug.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("jane.doe@example.com"), "ja***@example.com");
        assert_eq!(mask_email("jo@example.com"), "j***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("  Sun-Glasses "), "sun-glasses");
    }
}
