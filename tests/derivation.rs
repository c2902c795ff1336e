use std::collections::HashSet;

use sitepass::charset::CharClass;
use sitepass::{
    Error, MIN_LENGTH, assemble_password, canonical_message, derive_seed, generate_password,
    generate_password_from_raw,
};

fn covers_every_class(password: &str) -> bool {
    CharClass::ALL
        .iter()
        .all(|class| password.chars().any(|ch| CharClass::of(ch) == Some(*class)))
}

#[test]
fn test_concrete_scenario() {
    let password = generate_password(b"test-secret", "example.com", 0, 10).unwrap();

    assert_eq!(*password, "H7t#7trcJ!");
    assert_eq!(password.chars().count(), 10);
    assert!(covers_every_class(&password));
}

#[test]
fn test_orchestration_matches_stages() {
    let seed = derive_seed(b"test-secret", "example.com", 0);
    let staged = assemble_password(&seed, 10).unwrap();
    let direct = generate_password(b"test-secret", "example.com", 0, 10).unwrap();
    assert_eq!(*staged, *direct);
}

#[test]
fn test_every_length_in_product_range() {
    for length in MIN_LENGTH..=64 {
        let password = generate_password(b"test-secret", "example.com", 5, length).unwrap();
        assert_eq!(password.chars().count(), length);
        assert!(covers_every_class(&password), "{}", *password);
    }
}

#[test]
fn test_prefix_stability_is_not_promised_across_lengths() {
    // Changing the length reshuffles the whole password.
    let short = generate_password(b"test-secret", "example.com", 0, 10).unwrap();
    let long = generate_password(b"test-secret", "example.com", 0, 11).unwrap();
    assert_ne!(&long[..10], &*short);
}

#[test]
fn test_sensitivity_to_each_input() {
    let base = generate_password(b"test-secret", "example.com", 0, 16).unwrap();

    let other_secret = generate_password(b"test-secreu", "example.com", 0, 16).unwrap();
    let other_site = generate_password(b"test-secret", "example.co", 0, 16).unwrap();
    let other_version = generate_password(b"test-secret", "example.com", 1, 16).unwrap();

    assert_ne!(*base, *other_secret);
    assert_ne!(*base, *other_site);
    assert_ne!(*base, *other_version);
}

#[test]
fn test_no_collisions_across_sample() {
    let mut seen = HashSet::new();

    for secret in ["alpha", "bravo", "charlie", "delta"] {
        for site in ["example.com", "example.org", "bank", "mail.example.com", "git"] {
            for version in 0..25 {
                let password =
                    generate_password(secret.as_bytes(), site, version, 16).unwrap();
                assert!(
                    seen.insert(password.to_string()),
                    "collision for {}/{}/{}",
                    secret,
                    site,
                    version
                );
            }
        }
    }

    assert_eq!(seen.len(), 4 * 5 * 25);
}

#[test]
fn test_site_normalization() {
    assert_eq!(canonical_message("Example.com ", 0), "example.com:0");

    let a = generate_password(b"test-secret", "Example.com ", 2, 12).unwrap();
    let b = generate_password(b"test-secret", "example.com", 2, 12).unwrap();
    assert_eq!(*a, *b);
}

#[test]
fn test_version_accepts_large_values() {
    let password = generate_password(b"test-secret", "example.com", u64::MAX, 12).unwrap();
    assert_eq!(password.len(), 12);
}

#[test]
fn test_boundary_lengths() {
    assert!(matches!(
        generate_password(b"test-secret", "example.com", 0, 3),
        Err(Error::InvalidLength {
            length: 3,
            minimum: 4,
            ..
        })
    ));
    assert!(generate_password(b"test-secret", "example.com", 0, 4).is_ok());
    assert!(matches!(
        generate_password(b"test-secret", "example.com", 0, usize::MAX),
        Err(Error::InvalidLength { .. })
    ));
}

#[test]
fn test_preconditions() {
    assert!(matches!(
        generate_password(b"", "example.com", 0, 10),
        Err(Error::InvalidInput { .. })
    ));
    assert!(matches!(
        generate_password(b"test-secret", " ", 0, 10),
        Err(Error::InvalidInput { .. })
    ));
    assert!(matches!(
        generate_password_from_raw(b"test-secret", &[0xc0, 0x80], 0, 10),
        Err(Error::InvalidInput { .. })
    ));
}

#[test]
fn test_concurrent_calls_agree() {
    let expected = generate_password(b"test-secret", "example.com", 0, 24)
        .unwrap()
        .to_string();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(|| {
                generate_password(b"test-secret", "example.com", 0, 24)
                    .unwrap()
                    .to_string()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_errors_do_not_leak_secret() {
    let err = generate_password(b"hunter2-secret", "example.com", 0, 2).unwrap_err();
    assert!(!err.to_string().contains("hunter2"));
}
