use rand::Rng;

/// Generate a 4-digit delivery confirmation code (1000..=9999)
///
/// Kept numeric-only so agents can read it to customers over the phone.
pub fn generate_otp() -> String {
    rand::thread_rng().gen_range(1000..=9999).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_is_four_digits() {
        for _ in 0..200 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 4);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));

            let value: u32 = otp.parse().unwrap();
            assert!((1000..=9999).contains(&value));
        }
    }

    #[test]
    fn test_otp_never_has_leading_zero() {
        for _ in 0..200 {
            assert_ne!(generate_otp().chars().next(), Some('0'));
        }
    }
}
