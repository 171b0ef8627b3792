use rand::Rng;

/// Six-digit numeric referral code shared by users.
pub fn generate_referral_code() -> String {
    let mut rng = rand::thread_rng();
    format!("{:06}", rng.gen_range(100000..=999999))
}

/// Lowercase alphanumeric slug for an affiliate link.
pub fn generate_link_slug() -> String {
    let mut rng = rand::thread_rng();
    (0..10)
        .map(|_| {
            let chars = b"abcdefghijklmnopqrstuvwxyz0123456789";
            chars[rng.gen_range(0..chars.len())] as char
        })
        .collect()
}

/// Unique reference stamped on a withdrawal request, e.g. `WD-9F3K2A7Q1B0C`.
pub fn generate_payout_reference() -> String {
    let mut rng = rand::thread_rng();
    let tail: String = (0..12)
        .map(|_| {
            let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
            chars[rng.gen_range(0..chars.len())] as char
        })
        .collect();
    format!("WD-{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_referral_code() {
        let code = generate_referral_code();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        let code_num: u32 = code.parse().unwrap();
        assert!((100000..=999999).contains(&code_num));
    }

    #[test]
    fn test_generate_link_slug() {
        let slug = generate_link_slug();
        assert_eq!(slug.len(), 10);
        assert!(
            slug.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_generate_payout_reference() {
        let reference = generate_payout_reference();
        assert!(reference.starts_with("WD-"));
        assert_eq!(reference.len(), 15);
        assert!(
            reference[3..]
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }
}
