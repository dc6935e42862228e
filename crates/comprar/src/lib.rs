//! Comprar: storefront E2E test suite.
//!
//! A page-object test suite for a retail storefront's registration,
//! login, and shopping-cart flows, driven through a small abstract
//! browser boundary.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     COMPRAR Architecture                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐   ┌─────────────┐   ┌──────────────┐            │
//! │   │ Scenario   │   │ Page        │   │ PageDriver   │            │
//! │   │ (journey + │──►│ Objects     │──►│ (CDP browser │            │
//! │   │ checkpoints│   │ (locators + │   │  or scripted │            │
//! │   │ )          │   │  actions)   │   │  mock)       │            │
//! │   └────────────┘   └─────────────┘   └──────────────┘            │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The scenario composes page objects; page objects resolve declarative
//! locators against the live page through the driver; checkpoints
//! compare observed state against fixture expectations, and the first
//! mismatch aborts the run.
//!
//! Enable the `browser` feature for real Chromium control over CDP; the
//! default build ships the scripted [`mock::MockPage`] so everything
//! compiles and tests without a browser.

#![warn(missing_docs)]

pub mod config;
pub mod data;
pub mod driver;
pub mod locator;
pub mod mock;
pub mod pages;
pub mod result;
pub mod scenario;
pub mod wait;

pub use config::SuiteConfig;
pub use data::{LoginFixtures, ProductData, RegisterFixtures};
pub use driver::PageDriver;
pub use locator::{Locator, Selector};
pub use pages::{LoginPage, ProductPage, RegisterPage};
pub use result::{ComprarError, ComprarResult};
pub use scenario::{JourneyReport, ShoppingJourney};

#[cfg(feature = "browser")]
pub use driver::CdpDriver;

/// Convenience re-exports for suite authors
pub mod prelude {
    pub use crate::config::SuiteConfig;
    pub use crate::data::{Credentials, LoginFixtures, ProductData, RegisterFixtures, RegistrationRecord};
    pub use crate::driver::PageDriver;
    pub use crate::locator::{Locator, LocatorOptions, Selector};
    pub use crate::mock::{MockElement, MockPage};
    pub use crate::pages::{LoginPage, ProductPage, RegisterPage, Selection};
    pub use crate::result::{ComprarError, ComprarResult};
    pub use crate::scenario::{
        expect_contains, expect_eq, expect_true, expect_url_matches, JourneyReport,
        ShoppingJourney,
    };
    pub use crate::wait::{poll_until, WaitOptions};

    #[cfg(feature = "browser")]
    pub use crate::driver::CdpDriver;
}
