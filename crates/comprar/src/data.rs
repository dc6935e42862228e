//! Test Data Provider: fixture bundles consumed by scenarios.
//!
//! All records are plain immutable value bundles. The only generated
//! piece of state in the suite is the unique-email stamp: it is an
//! explicit constructor argument ([`RegisterFixtures::with_stamp`]), and
//! the clock-based default is applied only at the outermost layer
//! ([`RegisterFixtures::from_clock`]) — never cached across runs — so a
//! fixed stamp replays the exact same fixtures.

use serde::{Deserialize, Serialize};

use crate::config::SuiteConfig;

/// Path of the registration form
pub const REGISTER_PATH: &str = "/customer/account/create/";

/// Path of the login form
pub const LOGIN_PATH: &str = "/customer/account/login/";

/// URL fragment both registration and login land on when they succeed
pub const ACCOUNT_URL_PATTERN: &str = "/customer/account/";

/// Path of the jackets category listing
pub const JACKETS_PATH: &str = "/men/tops-men/jackets-men.html";

/// A login credential pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

/// A full registration form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    /// First name field
    pub first_name: String,
    /// Last name field
    pub last_name: String,
    /// Email field
    pub email: String,
    /// Password field
    pub password: String,
    /// Password confirmation field
    pub confirm_password: String,
}

impl RegistrationRecord {
    fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }

    /// The full name the account page displays after registration
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Millisecond-clock stamp for unique per-run emails.
///
/// Only call this at the outermost layer of a run; everything below
/// takes the stamp as data.
#[must_use]
pub fn unique_stamp() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

/// The six registration fixture sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterFixtures {
    /// Well-formed registration with a unique email
    pub valid: RegistrationRecord,
    /// Malformed email address
    pub invalid_email: RegistrationRecord,
    /// Password and confirmation differ
    pub password_mismatch: RegistrationRecord,
    /// Password below the storefront's strength bar
    pub weak_password: RegistrationRecord,
    /// Every field empty
    pub empty: RegistrationRecord,
    /// Email already registered
    pub existing_email: RegistrationRecord,
}

impl RegisterFixtures {
    /// Build the fixture sets from an explicit uniqueness stamp
    #[must_use]
    pub fn with_stamp(stamp: &str) -> Self {
        Self {
            valid: RegistrationRecord::new(
                "John",
                "Doe",
                &format!("john.doe.{stamp}@example.com"),
                "Password123!",
                "Password123!",
            ),
            invalid_email: RegistrationRecord::new(
                "Jane",
                "Smith",
                "invalid-email-format",
                "Password123!",
                "Password123!",
            ),
            password_mismatch: RegistrationRecord::new(
                "Bob",
                "Johnson",
                &format!("bob.johnson.{stamp}@example.com"),
                "Password123!",
                "DifferentPassword123!",
            ),
            weak_password: RegistrationRecord::new(
                "Alice",
                "Brown",
                &format!("alice.brown.{stamp}@example.com"),
                "123",
                "123",
            ),
            empty: RegistrationRecord::new("", "", "", "", ""),
            existing_email: RegistrationRecord::new(
                "Test",
                "User",
                "zurid@mailinator.com",
                "Password123!",
                "Password123!",
            ),
        }
    }

    /// Build the fixture sets with a fresh clock stamp
    #[must_use]
    pub fn from_clock() -> Self {
        Self::with_stamp(&unique_stamp())
    }
}

/// The four login fixture sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginFixtures {
    /// A known-good account
    pub valid: Credentials,
    /// Well-formed but unknown credentials
    pub invalid: Credentials,
    /// Malformed email address
    pub invalid_email_format: Credentials,
    /// Both fields empty
    pub empty: Credentials,
}

impl LoginFixtures {
    /// The standard login fixture sets
    #[must_use]
    pub fn standard() -> Self {
        Self {
            valid: Credentials::new("zurid@mailinator.com", "zurid@mailinator.com123!"),
            invalid: Credentials::new("invalid@example.com", "wrongpassword"),
            invalid_email_format: Credentials::new("invalid-email-format", "password123"),
            empty: Credentials::new("", ""),
        }
    }
}

/// Product and category parameters for the jackets journey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductData {
    /// Human-readable category path
    pub category_path: String,
    /// Expected category listing URL
    pub category_url: String,
    /// Valid size tokens for the category
    pub sizes: Vec<String>,
    /// Size used by the happy-path add
    pub default_size: String,
    /// Quantity used by the happy-path add
    pub default_quantity: u32,
    /// Substring every success toast carries
    pub success_fragment: String,
    /// Longer substring of the add-to-cart confirmation
    pub cart_added_fragment: String,
}

impl ProductData {
    /// Men > Tops > Jackets, resolved against the configured base URL
    #[must_use]
    pub fn jackets(config: &SuiteConfig) -> Self {
        Self {
            category_path: "Men > Tops > Jackets".to_string(),
            category_url: config.url(JACKETS_PATH),
            sizes: ["XS", "S", "M", "L", "XL"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            default_size: "M".to_string(),
            default_quantity: 1,
            success_fragment: "You added".to_string(),
            cart_added_fragment: "added to your shopping cart".to_string(),
        }
    }
}
