//! Ensemble language detection
//!
//! This crate combines the scorers of `glossa-core` into one detector:
//! it picks a primary strategy per request (external fastText process,
//! n-gram classifier or dictionary coverage), corrects weak results with
//! common-word counts, applies the caller's bias lists and keeps the
//! external process alive across failures.
//!
//! # Example
//!
//! ```rust
//! use glossa_engine::{DetectionRequest, LanguageDetector};
//! use glossa_core::NgramProfile;
//!
//! let detector = LanguageDetector::builder()
//!     .ngram_profiles(vec![
//!         NgramProfile::train("en", "this is the house and that is the dog of the man"),
//!         NgramProfile::train("de", "das ist das haus und der hund von dem mann"),
//!     ])
//!     .build()
//!     .unwrap();
//!
//! let request = DetectionRequest::new("der hund und das haus");
//! let result = detector.detect(&request).unwrap();
//! assert_eq!(result.language(), Some("de"));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod detector;
pub mod error;
pub mod process;
pub mod registry;
pub mod request;
pub mod result;
pub mod supervisor;

pub use config::EngineConfig;
pub use detector::{LanguageDetector, LanguageDetectorBuilder};
pub use error::{EngineError, Result};
pub use process::{ClassifierProcess, FastTextSpawner, ProcessSpawner};
pub use registry::{DetectorRegistry, Slot};
pub use request::DetectionRequest;
pub use result::{DetectionResult, SourceTrace};
pub use supervisor::{ClassifierHealth, ExternalClassifier};

// Re-export from core for convenience
pub use glossa_core::{LanguageCatalog, LanguageScores};
